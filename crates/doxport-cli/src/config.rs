//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default artifact path when `--out` is not given
    pub out: Option<PathBuf>,

    /// Fail exports that drop model fragments
    pub strict: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Default verbosity level
    pub verbosity: u8,
}

/// Logging configuration as read from config files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Include timestamps
    pub timestamps: bool,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out: None,
            strict: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            verbosity: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            timestamps: true,
            thread_ids: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
            || path.extension().and_then(|s| s.to_str()) == Some("yml")
        {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let config_paths = Self::default_config_paths();

        for path in &config_paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // No config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        paths.push(PathBuf::from(".doxport.yaml"));
        paths.push(PathBuf::from(".doxport.json"));
        paths.push(PathBuf::from("doxport.yaml"));
        paths.push(PathBuf::from("doxport.json"));

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let doxport_dir = config_dir.join("doxport");
            paths.push(doxport_dir.join("config.yaml"));
            paths.push(doxport_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".doxport.yaml"));
            paths.push(home_dir.join(".doxport.json"));
        }

        paths
    }

    /// Merge with another config (other takes precedence)
    #[allow(dead_code)]
    pub fn merge(&mut self, other: Config) {
        if other.export.out.is_some() {
            self.export.out = other.export.out;
        }
        self.export.strict = other.export.strict;
        self.output = other.output;
        self.logging = other.logging;
    }

    /// Save configuration to a file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
            || path.extension().and_then(|s| s.to_str()) == Some("yml")
        {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.format, "human");
        assert!(config.output.color);
        assert!(!config.export.strict);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doxport.yaml");
        std::fs::write(
            &path,
            "export:\n  strict: true\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.export.strict);
        assert_eq!(config.logging.level, "debug");
        // Sections not present keep their defaults
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.export.out = Some(PathBuf::from("api.json"));
        other.logging.level = "trace".to_string();

        base.merge(other);
        assert_eq!(base.export.out, Some(PathBuf::from("api.json")));
        assert_eq!(base.logging.level, "trace");
    }
}
