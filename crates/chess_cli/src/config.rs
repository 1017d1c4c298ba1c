//! Front-end configuration, read from an optional TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chess_rules::DrawRules;
use serde::{Deserialize, Serialize};

/// Everything in the file is optional.
///
/// ```toml
/// start_fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"
/// log_filter = "chess_rules=debug"
/// json = true
///
/// [rules]
/// repetition_count = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Position new games start from; the standard start when absent.
    pub start_fen: Option<String>,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Print one JSON object per response instead of plain text.
    pub json: bool,
    pub rules: DrawRules,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            start_fen: None,
            log_filter: "info".to_string(),
            json: false,
            rules: DrawRules::default(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
