use anyhow::{Context as _, bail};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Lines of surrounding context captured on each side of a violation
const WINDOW_LINES: usize = 20;
/// How far above a violation the declaration heuristic looks, target line included
const FUNCTION_LOOKBACK_LINES: usize = 50;
/// Label used when no declaration is found within the lookback
pub const UNKNOWN_FUNCTION: &str = "Unknown function";

// Declaration shapes the heuristic recognizes: class-method style
// (`ret Type::name(`), plain functions, and async functions. String matching,
// not a parser; false negatives are expected and acceptable.
static DECLARATION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^\s*\w+\s+\w+::\w+\s*\(").unwrap(),
        Regex::new(r"^\s*function\s+\w+\s*\(").unwrap(),
        Regex::new(r"^\s*async\s+function\s+\w+\s*\(").unwrap(),
    ]
});

/// The slice of a source file handed to the generator for one violation
#[derive(Debug, Clone)]
pub struct FixContext {
    /// File path as reported by the scanner
    pub file: String,
    /// Violation line number (1-indexed)
    pub line: u32,
    /// Up to 20 lines either side of the violation, clipped to file bounds
    pub window: String,
    /// Best-guess enclosing declaration, or `UNKNOWN_FUNCTION`
    pub function: String,
    /// The violating line, trimmed
    pub violation_line: String,
}

/// Re-read `path` and capture the context around a 1-indexed `line`.
///
/// The file was readable during the scan but may have changed since; a read
/// failure or an out-of-range line is an error the caller treats as
/// per-violation recoverable.
pub fn extract(root: &Path, file: &str, line: u32) -> anyhow::Result<FixContext> {
    let path = root.join(file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {} for context", path.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    let line_idx = line as usize;
    if line_idx == 0 || line_idx > lines.len() {
        bail!("line {} out of range for {} ({} lines)", line, file, lines.len());
    }

    let (start, end) = window_bounds(line_idx, lines.len());
    let window = lines[start - 1..end].join("\n");

    Ok(FixContext {
        file: file.to_string(),
        line,
        window,
        function: enclosing_function(&lines, line_idx),
        violation_line: lines[line_idx - 1].trim().to_string(),
    })
}

/// Inclusive 1-indexed window bounds around `line`, clipped to `[1, total]`
fn window_bounds(line: usize, total: usize) -> (usize, usize) {
    let start = line.saturating_sub(WINDOW_LINES).max(1);
    let end = (line + WINDOW_LINES).min(total);
    (start, end)
}

/// Scan backward from the violation line for the nearest declaration-looking
/// line, giving up after the lookback bound.
fn enclosing_function(lines: &[&str], line: usize) -> String {
    let stop = line.saturating_sub(FUNCTION_LOOKBACK_LINES);
    let mut idx = line;
    while idx > stop {
        let candidate = lines[idx - 1];
        if DECLARATION_PATTERNS.iter().any(|re| re.is_match(candidate)) {
            return candidate.trim().to_string();
        }
        idx -= 1;
    }
    UNKNOWN_FUNCTION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn window_clips_at_file_start() {
        let (start, end) = window_bounds(3, 100);
        assert_eq!(start, 1);
        assert_eq!(end, 23);
    }

    #[test]
    fn window_clips_at_file_end() {
        let (start, end) = window_bounds(95, 100);
        assert_eq!(start, 75);
        assert_eq!(end, 100);
    }

    #[test]
    fn window_full_span_in_large_file() {
        let (start, end) = window_bounds(50, 100);
        assert_eq!(start, 30);
        assert_eq!(end, 70);
    }

    #[test]
    fn extract_near_top_of_file_starts_at_line_one() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "short.cpp", "line one\nline two\n// TODO: x\nline four\n");
        let ctx = extract(dir.path(), "short.cpp", 3).unwrap();
        assert!(ctx.window.starts_with("line one"));
        assert!(ctx.window.ends_with("line four"));
        assert_eq!(ctx.violation_line, "// TODO: x");
    }

    #[test]
    fn finds_cpp_method_declaration() {
        let lines = vec![
            "float Analyzer::energy(const Buffer& b) {",
            "    // math goes here",
            "    return 0.5f; // placeholder",
        ];
        assert_eq!(
            enclosing_function(&lines, 3),
            "float Analyzer::energy(const Buffer& b) {"
        );
    }

    #[test]
    fn finds_plain_and_async_function_declarations() {
        let plain = vec!["function tempo(data) {", "  return 120;"];
        assert_eq!(enclosing_function(&plain, 2), "function tempo(data) {");

        let asynch = vec!["async function fetchScore(id) {", "  throw new Error('not implemented');"];
        assert_eq!(
            enclosing_function(&asynch, 2),
            "async function fetchScore(id) {"
        );
    }

    #[test]
    fn unknown_when_no_declaration_in_lookback() {
        let mut lines = vec!["function far() {"];
        // Push the declaration outside the 50-line bound
        let filler: Vec<&str> = std::iter::repeat_n("    sum += 1;", 60).collect();
        lines.extend(filler);
        assert_eq!(enclosing_function(&lines, 61), UNKNOWN_FUNCTION);
    }

    #[test]
    fn declaration_just_inside_lookback_is_found() {
        let mut lines = vec!["function near() {"];
        let filler: Vec<&str> = std::iter::repeat_n("    sum += 1;", 49).collect();
        lines.extend(filler);
        // Line 1 is 49 lines above line 50, inside the 50-line bound
        assert_eq!(enclosing_function(&lines, 50), "function near() {");
    }

    #[test]
    fn out_of_range_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "tiny.cpp", "one line\n");
        assert!(extract(dir.path(), "tiny.cpp", 9).is_err());
    }
}
