use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of placeholder code a pattern rule detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Hardcoded return value with a "placeholder" comment
    HardcodedPlaceholder,
    /// Thrown "not implemented" error
    NotImplementedError,
    /// A known hardcoded string literal returned as a result
    HardcodedString,
    /// TODO/FIXME/HACK comment marker
    TodoComment,
    /// Code self-described as "simplified"
    SimplifiedImplementation,
    /// Random numbers standing in for real data
    RandomDataGeneration,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HardcodedPlaceholder => "hardcoded_placeholder",
            Self::NotImplementedError => "not_implemented_error",
            Self::HardcodedString => "hardcoded_string",
            Self::TodoComment => "todo_comment",
            Self::SimplifiedImplementation => "simplified_implementation",
            Self::RandomDataGeneration => "random_data_generation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line of placeholder code found by the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// File path, relative to the scan root
    pub file: String,
    /// Line number (1-indexed)
    pub line: u32,
    /// Which pattern rule matched
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// The matching line, trimmed
    pub content: String,
}

/// A generated replacement implementation for one violation.
///
/// Fixes are recorded, never written back into the scanned tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    /// File path, relative to the scan root
    pub file: String,
    /// Line number of the violation (1-indexed)
    pub line: u32,
    /// The original violating line
    pub original: String,
    /// Generated replacement text, taken verbatim from the model
    pub fixed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ViolationKind::TodoComment).unwrap();
        assert_eq!(json, "\"todo_comment\"");
    }

    #[test]
    fn violation_kind_field_serializes_as_type() {
        let v = Violation {
            file: "src/a.cpp".into(),
            line: 3,
            kind: ViolationKind::HardcodedPlaceholder,
            content: "return 0.5f; // placeholder".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "hardcoded_placeholder");
        assert_eq!(json["line"], 3);
    }
}
