use crate::types::{Fix, Violation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Machine-readable run summary, serialized as the JSON report
#[derive(Serialize)]
pub struct Report<'a> {
    /// Total violations from the scan, before the fix cap is applied
    pub violations_found: usize,
    /// Fixes actually recorded (bounded by the cap and by service failures)
    pub fixes_applied: usize,
    pub violations: &'a [Violation],
    pub fixes: &'a [Fix],
    /// Files the scanner could not read
    pub skipped_files: &'a [String],
    pub generated_at: DateTime<Utc>,
}

/// Group fixes by file in first-seen order. Deliberately not a map: the
/// narrative output must be identical across runs on an unchanged tree.
fn group_fixes_by_file(fixes: &[Fix]) -> Vec<(&str, Vec<&Fix>)> {
    let mut groups: Vec<(&str, Vec<&Fix>)> = Vec::new();
    for fix in fixes {
        match groups.iter_mut().find(|(file, _)| *file == fix.file) {
            Some((_, entries)) => entries.push(fix),
            None => groups.push((fix.file.as_str(), vec![fix])),
        }
    }
    groups
}

/// Render the proposed-change description: summary counts, fixes grouped by
/// file, and the fixed reviewer checklist.
pub fn format_pr_description(violations_found: usize, fixes: &[Fix]) -> String {
    let files_modified = group_fixes_by_file(fixes);

    let mut output = String::new();
    output.push_str("# Mock Code Fixes\n\n");
    output.push_str(
        "This change was generated automatically: placeholder implementations were \
         replaced with drafts from a language model.\n\n",
    );
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Violations found**: {}\n", violations_found));
    output.push_str(&format!("- **Fixes applied**: {}\n", fixes.len()));
    output.push_str(&format!("- **Files modified**: {}\n", files_modified.len()));
    output.push_str("\n## Changes\n\n");

    for (file, file_fixes) in &files_modified {
        output.push_str(&format!("### `{}`\n\n", file));
        for fix in file_fixes {
            output.push_str(&format!(
                "- Line {}: Replaced placeholder with real implementation\n",
                fix.line
            ));
        }
        output.push('\n');
    }

    output.push_str(
        "## Review required\n\n\
         Carefully review every change before merging:\n\
         1. Verify the generated implementations are correct\n\
         2. Run all tests to ensure nothing is broken\n\
         3. Check that the new code follows project standards\n",
    );
    output
}

/// Console/markdown listing of scan results, grouped by file
pub fn format_violations(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "No violations found".to_string();
    }

    let mut output = String::new();
    let mut current_file: Option<&str> = None;
    for violation in violations {
        if current_file != Some(violation.file.as_str()) {
            if current_file.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("# Violations in {}\n\n", violation.file));
            current_file = Some(violation.file.as_str());
        }
        output.push_str(&format!(
            "- Line {} [{}]: {}\n",
            violation.line, violation.kind, violation.content
        ));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViolationKind;

    fn fix(file: &str, line: u32) -> Fix {
        Fix {
            file: file.into(),
            line,
            original: "return 0.5f; // placeholder".into(),
            fixed: "return rms(buffer);".into(),
        }
    }

    #[test]
    fn pr_description_counts_and_grouping() {
        let fixes = vec![fix("a.cpp", 10), fix("b.cpp", 3), fix("a.cpp", 20)];
        let doc = format_pr_description(7, &fixes);

        assert!(doc.contains("- **Violations found**: 7"));
        assert!(doc.contains("- **Fixes applied**: 3"));
        assert!(doc.contains("- **Files modified**: 2"));

        // First-seen file order, one line per fix
        let a = doc.find("### `a.cpp`").unwrap();
        let b = doc.find("### `b.cpp`").unwrap();
        assert!(a < b);
        assert!(doc.contains("- Line 10: Replaced placeholder with real implementation"));
        assert!(doc.contains("- Line 20: Replaced placeholder with real implementation"));
    }

    #[test]
    fn pr_description_has_reviewer_checklist() {
        let doc = format_pr_description(0, &[]);
        assert!(doc.contains("## Review required"));
        assert!(doc.contains("1. Verify the generated implementations are correct"));
    }

    #[test]
    fn pr_description_is_deterministic() {
        let fixes = vec![fix("x.ts", 1), fix("y.ts", 2), fix("x.ts", 9)];
        assert_eq!(
            format_pr_description(5, &fixes),
            format_pr_description(5, &fixes)
        );
    }

    #[test]
    fn violation_listing_groups_by_file() {
        let violations = vec![
            Violation {
                file: "a.cpp".into(),
                line: 1,
                kind: ViolationKind::TodoComment,
                content: "// TODO: x".into(),
            },
            Violation {
                file: "a.cpp".into(),
                line: 5,
                kind: ViolationKind::SimplifiedImplementation,
                content: "// simplified".into(),
            },
            Violation {
                file: "b.js".into(),
                line: 2,
                kind: ViolationKind::RandomDataGeneration,
                content: "Math.random()".into(),
            },
        ];
        let listing = format_violations(&violations);
        assert!(listing.contains("# Violations in a.cpp"));
        assert!(listing.contains("- Line 5 [simplified_implementation]: // simplified"));
        assert!(listing.contains("# Violations in b.js"));
    }

    #[test]
    fn empty_violation_listing() {
        assert_eq!(format_violations(&[]), "No violations found");
    }

    #[test]
    fn report_serializes_original_field_names() {
        let violations = vec![];
        let fixes = vec![fix("a.cpp", 1)];
        let skipped = vec!["bad.cpp".to_string()];
        let report = Report {
            violations_found: 0,
            fixes_applied: 1,
            violations: &violations,
            fixes: &fixes,
            skipped_files: &skipped,
            generated_at: Utc::now(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["violations_found"], 0);
        assert_eq!(json["fixes_applied"], 1);
        assert_eq!(json["fixes"][0]["original"], "return 0.5f; // placeholder");
        assert_eq!(json["fixes"][0]["fixed"], "return rms(buffer);");
        assert_eq!(json["skipped_files"][0], "bad.cpp");
    }
}
