use crate::config::ScanConfig;
use crate::rule::body::CompiledRule;
use crate::scan::walker;
use crate::types::Violation;
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Everything one scan pass produced
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Violations in traversal order, then line order, then rule order
    pub violations: Vec<Violation>,
    /// Number of files whose contents were scanned
    pub files_scanned: usize,
    /// Files that could not be read and were skipped
    pub skipped_files: Vec<String>,
}

/// Scan the tree under `root` with the given rules.
///
/// A file that cannot be read is skipped and recorded, not fatal: one bad
/// file must not void the rest of the scan. A line matching several rules
/// yields one violation per match; nothing is deduplicated.
pub fn scan_tree(root: &Path, rules: &[CompiledRule], scan: &ScanConfig) -> ScanOutcome {
    let files = walker::collect_files(root, &scan.exclude, &scan.extensions);
    debug!("Walk found {} candidate files", files.len());

    let mut outcome = ScanOutcome::default();
    for path in files {
        let rel_path = display_path(&path, root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", rel_path, e);
                outcome.skipped_files.push(rel_path);
                continue;
            }
        };

        outcome.files_scanned += 1;
        for (idx, line) in content.lines().enumerate() {
            for rule in rules {
                if rule.regex.is_match(line) {
                    trace!("{}:{} matched rule '{}'", rel_path, idx + 1, rule.name);
                    outcome.violations.push(Violation {
                        file: rel_path.clone(),
                        line: (idx + 1) as u32,
                        kind: rule.kind,
                        content: line.trim().to_string(),
                    });
                }
            }
        }
    }
    outcome
}

/// Path as reported in violations and the report: relative to the scan root
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
