use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Header text of the single column.
    pub header: String,

    /// Whether `update_tree` also refreshes every expanded subtree
    /// against the document.
    pub refresh_loaded_on_update: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            header: "Dependency tree".to_string(),
            refresh_loaded_on_update: true,
        }
    }
}

impl ModelConfig {
    /// Parses a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ModelConfig::from_json(r#"{ "header": "Uses" }"#).unwrap();
        assert_eq!(config.header, "Uses");
        assert!(config.refresh_loaded_on_update);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ModelConfig::load("/nonexistent/deptree.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
