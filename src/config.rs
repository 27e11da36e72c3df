//! Configuration for the workout track merger.

use crate::core::{default_workers, MergeOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Merge pipeline settings
    pub merge: MergeOptions,

    /// Worker threads used for batches of records
    pub workers: usize,

    /// Format the CLI writes tracks in
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            merge: MergeOptions::default(),
            workers: default_workers(),
            output_format: OutputFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("workout-track")
            .join("config.json")
    }
}

/// How merged tracks are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON array
    Json,
    /// One track per line
    Jsonl,
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_SENTINEL;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.merge.compact_gaps);
        assert_eq!(config.merge.sentinel.0, DEFAULT_SENTINEL);
        assert!(config.workers >= 1);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "merge": { "compact_gaps": true }, "output_format": "jsonl" }"#)
                .unwrap();
        assert!(config.merge.compact_gaps);
        assert_eq!(config.merge.cost_time, -1.0);
        assert_eq!(config.output_format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("workout-track-config-{}", std::process::id()))
            .join("config.json");

        let mut config = Config::default();
        config.workers = 3;
        config.merge.sentinel = crate::core::Sentinel(-1);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.workers, 3);
        assert_eq!(loaded.merge.sentinel.0, -1);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("workout-track-does-not-exist.json");
        let config = Config::load_from(&path).unwrap();
        assert!(!config.merge.compact_gaps);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let path = std::env::temp_dir()
            .join(format!("workout-track-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        let _ = std::fs::remove_file(&path);
    }
}
