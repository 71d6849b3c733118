mod cli;
mod config;
mod fix;
mod llm;
mod rule;
mod scan;
mod types;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Init(args) => {
            if let Err(e) = init_config(&args.config, args.r#override) {
                eprintln!("Failed to initialize config: {e:#}");
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Scan(args) => {
            let config = load_config(&args.config);
            let result =
                fix::orchestrator::run_scan(&config, Path::new(&args.root), args.output.as_deref());
            if let Err(e) = result {
                eprintln!("Scan failed: {e:#}");
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Fix(args) => {
            // Checked before any work so a missing credential aborts up front
            let Some(api_key) = args.api_key.as_deref().filter(|k| !k.is_empty()) else {
                eprintln!(
                    "Error: MOCKSMITH_LLM_API_KEY environment variable not set (or pass --api-key)"
                );
                std::process::exit(EXIT_FAILURE);
            };
            let config = load_config(&args.config);
            let result = fix::orchestrator::orchestrate_and_run(
                &config,
                Path::new(&args.root),
                api_key,
                &args.report,
                &args.pr_description,
                args.dry_run,
            )
            .await;
            if let Err(e) = result {
                eprintln!("Fix run failed: {e:#}");
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}

fn load_config(path: &str) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e:#}");
        std::process::exit(EXIT_FAILURE);
    })
}

fn init_config(path: &str, overwrite: bool) -> anyhow::Result<()> {
    if Path::new(path).exists() && !overwrite {
        anyhow::bail!("{} already exists (pass --override to replace it)", path);
    }
    std::fs::write(path, config::DEFAULT_CONFIG)?;
    println!("Wrote {}", path);
    Ok(())
}
