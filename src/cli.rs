use clap::{Parser, Subcommand};

// Display order for API key option (placed at top of help text)
const API_KEY_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(
    name = "mocksmith",
    version,
    about = "Finds placeholder code and drafts real implementations with an LLM",
    long_about = None
)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: MOCKSMITH_LOG=] [default: info]
    #[arg(
        long,
        env = "MOCKSMITH_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default mocksmith.toml config file
    Init(InitArgs),
    /// Scan for placeholder code without calling the generation service
    Scan(ScanArgs),
    /// Scan, draft replacement implementations, and write the run reports
    Fix(FixArgs),
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = "mocksmith.toml")]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to config file (initialize with `mocksmith init`)
    #[arg(long, default_value = "mocksmith.toml")]
    pub config: String,

    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Output file path (.md or .json); prints to the console when omitted
    #[arg(long)]
    pub output: Option<String>,
}

/// Arguments for the fix command
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Path to config file (initialize with `mocksmith init`)
    #[arg(long, default_value = "mocksmith.toml")]
    pub config: String,

    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Generation service API key
    #[arg(
        long,
        env = "MOCKSMITH_LLM_API_KEY",
        hide_env_values = true,
        display_order = API_KEY_DISPLAY_ORDER
    )]
    pub api_key: Option<String>,

    /// Machine-readable report path
    #[arg(long, default_value = "ai_fix_report.json")]
    pub report: String,

    /// Proposed-change description path
    #[arg(long, default_value = "pr_description.md")]
    pub pr_description: String,

    /// Dry run: list the violations that would be processed without calling the service
    #[arg(long)]
    pub dry_run: bool,
}
