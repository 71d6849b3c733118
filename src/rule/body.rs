use crate::types::ViolationKind;
use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A pattern rule: one regex tested against every scanned line.
///
/// The builtin set below is the default; `mocksmith.toml` may replace it with
/// custom `[[rules]]` entries. Patterns stay as strings until `compile` so a
/// config file with a bad pattern fails at startup with a pointed message.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RuleBody {
    /// Human-readable rule name, used in log output only
    pub name: String,
    /// Violation kind reported for every match
    pub kind: ViolationKind,
    /// Regex tested against each line (not anchored)
    pub pattern: String,
}

/// A rule with its pattern compiled, ready for the scanner
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub kind: ViolationKind,
    pub regex: Regex,
}

impl RuleBody {
    pub fn compile(&self) -> anyhow::Result<CompiledRule> {
        let regex = Regex::new(&self.pattern)
            .with_context(|| format!("invalid pattern in rule '{}'", self.name))?;
        Ok(CompiledRule {
            name: self.name.clone(),
            kind: self.kind,
            regex,
        })
    }

    pub fn hardcoded_placeholder() -> Self {
        Self {
            name: "Hardcoded Placeholder Return".into(),
            kind: ViolationKind::HardcodedPlaceholder,
            pattern: r#"return\s+0\.5f\s*;.*placeholder"#.into(),
        }
    }

    pub fn not_implemented_error() -> Self {
        Self {
            name: "Not Implemented Error".into(),
            kind: ViolationKind::NotImplementedError,
            pattern: r#"throw\s+.*Error.*not implemented"#.into(),
        }
    }

    pub fn hardcoded_string() -> Self {
        Self {
            name: "Hardcoded String Result".into(),
            kind: ViolationKind::HardcodedString,
            pattern: r#"return\s+"(Contemporary|Neutral|2010s)""#.into(),
        }
    }

    pub fn todo_comment() -> Self {
        Self {
            name: "TODO Comment".into(),
            kind: ViolationKind::TodoComment,
            pattern: r#"//\s*(TODO|FIXME|HACK):"#.into(),
        }
    }

    pub fn simplified_implementation() -> Self {
        Self {
            name: "Simplified Implementation".into(),
            kind: ViolationKind::SimplifiedImplementation,
            pattern: r#"simplified|Simplified|SIMPLIFIED"#.into(),
        }
    }

    pub fn random_data_generation() -> Self {
        Self {
            name: "Random Data Generation".into(),
            kind: ViolationKind::RandomDataGeneration,
            pattern: r#"Math\.random\(\)"#.into(),
        }
    }
}

/// Default rule set, in match order. A line may match several rules and is
/// reported once per match.
pub fn builtin_rules() -> Vec<RuleBody> {
    vec![
        RuleBody::hardcoded_placeholder(),
        RuleBody::not_implemented_error(),
        RuleBody::hardcoded_string(),
        RuleBody::todo_comment(),
        RuleBody::simplified_implementation(),
        RuleBody::random_data_generation(),
    ]
}

/// Compile a rule list, failing on the first invalid pattern
pub fn compile_rules(rules: &[RuleBody]) -> anyhow::Result<Vec<CompiledRule>> {
    rules.iter().map(RuleBody::compile).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled() -> Vec<CompiledRule> {
        compile_rules(&builtin_rules()).unwrap()
    }

    fn kinds_matching(line: &str) -> Vec<ViolationKind> {
        compiled()
            .iter()
            .filter(|r| r.regex.is_match(line))
            .map(|r| r.kind)
            .collect()
    }

    #[test]
    fn builtin_rules_all_compile() {
        assert_eq!(compiled().len(), 6);
    }

    #[test]
    fn placeholder_return_requires_comment() {
        assert_eq!(
            kinds_matching("    return 0.5f; // placeholder value"),
            vec![ViolationKind::HardcodedPlaceholder]
        );
        assert!(kinds_matching("    return 0.5f;").is_empty());
    }

    #[test]
    fn todo_fixme_hack_markers() {
        assert_eq!(
            kinds_matching("// TODO: fix this"),
            vec![ViolationKind::TodoComment]
        );
        assert_eq!(
            kinds_matching("  // FIXME: leaks on error"),
            vec![ViolationKind::TodoComment]
        );
        assert_eq!(
            kinds_matching("//HACK: bypass cache"),
            vec![ViolationKind::TodoComment]
        );
        // Marker without the colon is not a violation
        assert!(kinds_matching("// TODO fix this").is_empty());
    }

    #[test]
    fn not_implemented_throw() {
        assert_eq!(
            kinds_matching(r#"throw new Error("not implemented");"#),
            vec![ViolationKind::NotImplementedError]
        );
    }

    #[test]
    fn hardcoded_string_literals() {
        assert_eq!(
            kinds_matching(r#"return "Contemporary";"#),
            vec![ViolationKind::HardcodedString]
        );
        assert!(kinds_matching(r#"return "Baroque";"#).is_empty());
    }

    #[test]
    fn simplified_any_casing() {
        assert_eq!(
            kinds_matching("// Simplified energy estimate"),
            vec![ViolationKind::SimplifiedImplementation]
        );
        assert_eq!(
            kinds_matching("int simplified_path = 1;"),
            vec![ViolationKind::SimplifiedImplementation]
        );
    }

    #[test]
    fn math_random_call() {
        assert_eq!(
            kinds_matching("const bpm = Math.random() * 200;"),
            vec![ViolationKind::RandomDataGeneration]
        );
        assert!(kinds_matching("const bpm = Math.randomInt;").is_empty());
    }

    #[test]
    fn line_can_match_multiple_rules() {
        let kinds = kinds_matching("return 0.5f; // TODO: placeholder, simplified");
        assert!(kinds.contains(&ViolationKind::HardcodedPlaceholder));
        assert!(kinds.contains(&ViolationKind::TodoComment));
        assert!(kinds.contains(&ViolationKind::SimplifiedImplementation));
    }

    #[test]
    fn invalid_pattern_fails_compile() {
        let rule = RuleBody {
            name: "Broken".into(),
            kind: ViolationKind::TodoComment,
            pattern: "(unclosed".into(),
        };
        assert!(rule.compile().is_err());
    }
}
