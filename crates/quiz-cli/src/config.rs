//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$CALCQUIZ_CONFIG` environment variable
//! 2. `~/.config/calcquiz/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub quiz: QuizConfig,
}

/// Database storage settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database path. Default: platform-specific data dir.
    pub path: Option<String>,
}

/// Quiz shape settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions per quiz run.
    pub questions: usize,
    /// Terms per surd problem.
    pub surd_terms: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: 5,
            surd_terms: 3,
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("CALCQUIZ_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. ~/.config/calcquiz/config.toml
    if let Some(home) = dirs_home() {
        let p = home.join(".config").join("calcquiz").join("config.toml");
        return Some(p);
    }

    None
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Show the active config path (for `calcquiz config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.quiz.questions, 5);
        assert_eq!(config.quiz.surd_terms, 3);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[quiz]
questions = 10
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.quiz.questions, 10);
        // Other fields should be defaults
        assert_eq!(config.quiz.surd_terms, 3);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[store]
path = "/tmp/quiz.db"

[quiz]
questions = 3
surd_terms = 4
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.path.as_deref(), Some("/tmp/quiz.db"));
        assert_eq!(config.quiz.questions, 3);
        assert_eq!(config.quiz.surd_terms, 4);
    }
}
