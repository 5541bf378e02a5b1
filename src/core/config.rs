//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::wrap::DEFAULT_WRAP_WIDTH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Settings applied when a conversation parses its script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Column budget for NPC text. Zero disables wrapping.
    pub wrap_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a configuration from a RON string. Missing fields take their
    /// defaults.
    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_width() {
        assert_eq!(EngineConfig::default().wrap_width, 50);
    }

    #[test]
    fn parse_ron_values() {
        let config = EngineConfig::parse_ron("(wrap_width: 32)").unwrap();
        assert_eq!(config.wrap_width, 32);
    }

    #[test]
    fn parse_ron_missing_fields_use_defaults() {
        let config = EngineConfig::parse_ron("()").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn parse_ron_error() {
        assert!(EngineConfig::parse_ron("(wrap_width: \"wide\")").is_err());
    }

    #[test]
    fn load_fixture() {
        let path = std::path::PathBuf::from("tests/fixtures/engine_config.ron");
        let config = EngineConfig::load_from_ron(&path).unwrap();
        assert_eq!(config.wrap_width, 40);
    }
}
