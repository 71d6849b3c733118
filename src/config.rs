use crate::rule::body::{RuleBody, builtin_rules};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub fix: FixConfig,
    #[serde(default = "builtin_rules")]
    pub rules: Vec<RuleBody>,
}

#[derive(Deserialize, Debug)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Output-length budget per generation request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Extra headers sent with every request (e.g. gateway routing)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Deserialize, Debug)]
pub struct ScanConfig {
    /// Subtrees whose path contains any of these markers are skipped
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Only file names ending in one of these are scanned
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct FixConfig {
    /// Hard cap on generation calls per run
    #[serde(default = "default_max_fixes")]
    pub max_fixes: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            headers: HashMap::new(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            extensions: default_extensions(),
        }
    }
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            max_fixes: default_max_fixes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            scan: ScanConfig::default(),
            fix: FixConfig::default(),
            rules: builtin_rules(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_exclude() -> Vec<String> {
    vec!["node_modules".into(), ".git".into(), "build".into()]
}

fn default_extensions() -> Vec<String> {
    vec![".cpp".into(), ".h".into(), ".js".into(), ".ts".into()]
}

fn default_max_fixes() -> usize {
    5
}

/// Template written by `mocksmith init`. Field meanings are documented inline
/// so the generated file is self-describing.
pub const DEFAULT_CONFIG: &str = r#"[llm]
# OpenAI-compatible endpoint; the chat completions path is appended
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
# Output-length budget per generation request
max_tokens = 1000

[scan]
# Subtrees whose path contains any of these markers are skipped
exclude = ["node_modules", ".git", "build"]
# Only file names ending in one of these are scanned
extensions = [".cpp", ".h", ".js", ".ts"]

[fix]
# Hard cap on generation calls per run
max_fixes = 5

# Uncomment to replace the builtin pattern set:
# [[rules]]
# name = "TODO Comment"
# kind = "todo_comment"
# pattern = '//\s*(TODO|FIXME|HACK):'
"#;

impl Config {
    /// Load config from `path`, falling back to the builtin defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            debug!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
