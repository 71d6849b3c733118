use crate::config::Config;
use crate::fix::{context, generator, render};
use crate::llm::GenerationClient;
use crate::rule::body::compile_rules;
use crate::scan::scanner::{self, ScanOutcome};
use crate::types::Fix;
use anyhow::{Context as _, bail};
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Scan only: list violations on the console or write them to a file.
pub fn run_scan(config: &Config, root: &Path, output: Option<&str>) -> anyhow::Result<()> {
    let rules = compile_rules(&config.rules)?;
    info!("Scanning {} for placeholder code", root.display());
    let outcome = scanner::scan_tree(root, &rules, &config.scan);
    info!(
        "Found {} violations in {} files ({} skipped)",
        outcome.violations.len(),
        outcome.files_scanned,
        outcome.skipped_files.len()
    );

    match output {
        Some(path) => write_scan_output(path, &outcome),
        None => {
            for line in render::format_violations(&outcome.violations).lines() {
                info!("{}", line);
            }
            Ok(())
        }
    }
}

/// Run the whole pipeline: scan, cap, extract context, generate, record,
/// write both report artifacts.
///
/// Violations are processed strictly one at a time; a service or context
/// failure skips that violation and the run continues. Scanned files are
/// never modified.
pub async fn orchestrate_and_run(
    config: &Config,
    root: &Path,
    api_key: &str,
    report_path: &str,
    pr_path: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let rules = compile_rules(&config.rules)?;
    info!("Scanning {} for placeholder code", root.display());
    let outcome = scanner::scan_tree(root, &rules, &config.scan);
    info!(
        "Found {} violations in {} files ({} skipped)",
        outcome.violations.len(),
        outcome.files_scanned,
        outcome.skipped_files.len()
    );

    let budget = fix_budget(outcome.violations.len(), config.fix.max_fixes);
    let targets = &outcome.violations[..budget];

    if dry_run {
        info!("Dry run - {} violations would be processed:", targets.len());
        for (i, violation) in targets.iter().enumerate() {
            info!(
                "  {}: {}:{} [{}] {}",
                i + 1,
                violation.file,
                violation.line,
                violation.kind,
                violation.content
            );
        }
        return Ok(());
    }

    let client = GenerationClient::new(
        &config.llm.base_url,
        api_key,
        &config.llm.model,
        config.llm.max_tokens,
        &config.llm.headers,
    );

    let mut fixes: Vec<Fix> = Vec::new();
    for (i, violation) in targets.iter().enumerate() {
        info!(
            "Processing violation {}/{}: {}:{} [{}]",
            i + 1,
            targets.len(),
            violation.file,
            violation.line,
            violation.kind
        );

        let ctx = match context::extract(root, &violation.file, violation.line) {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(
                    "Skipping {}:{}, context extraction failed: {:#}",
                    violation.file, violation.line, e
                );
                continue;
            }
        };

        match generator::generate_fix(&client, &ctx).await {
            Ok(fixed) => {
                info!("Fix generated for {}:{}", violation.file, violation.line);
                fixes.push(Fix {
                    file: violation.file.clone(),
                    line: violation.line,
                    original: ctx.violation_line,
                    fixed,
                });
            }
            Err(e) => {
                warn!(
                    "Fix generation failed for {}:{}, skipping: {:#}",
                    violation.file, violation.line, e
                );
            }
        }
    }

    write_reports(&outcome, &fixes, report_path, pr_path)?;
    info!(
        "Completed: {} violations found, {} fixes recorded",
        outcome.violations.len(),
        fixes.len()
    );
    Ok(())
}

/// How many violations one run may send to the generation service
fn fix_budget(total: usize, cap: usize) -> usize {
    total.min(cap)
}

fn write_scan_output(path: &str, outcome: &ScanOutcome) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        let output = serde_json::json!({
            "violations_found": outcome.violations.len(),
            "violations": outcome.violations,
            "skipped_files": outcome.skipped_files,
        });
        serde_json::to_string_pretty(&output)?
    } else if path.ends_with(".md") {
        render::format_violations(&outcome.violations)
    } else {
        bail!("output file must end with .md or .json");
    };

    fs::write(path, content).with_context(|| format!("failed to write {}", path))?;
    info!("Results written to {}", path);
    Ok(())
}

fn write_reports(
    outcome: &ScanOutcome,
    fixes: &[Fix],
    report_path: &str,
    pr_path: &str,
) -> anyhow::Result<()> {
    let report = render::Report {
        violations_found: outcome.violations.len(),
        fixes_applied: fixes.len(),
        violations: &outcome.violations,
        fixes,
        skipped_files: &outcome.skipped_files,
        generated_at: Utc::now(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(report_path, json).with_context(|| format!("failed to write {}", report_path))?;
    info!("Report written to {}", report_path);

    let description = render::format_pr_description(outcome.violations.len(), fixes);
    fs::write(pr_path, description).with_context(|| format!("failed to write {}", pr_path))?;
    info!("PR description written to {}", pr_path);
    Ok(())
}
