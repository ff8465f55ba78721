//! Configuration handling for the TUI

use crate::scheduler::DEFAULT_SUBMIT_DELAY;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Simulated submit latency in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// Form type whose records the table shows at startup
    pub default_data_type: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dynamic-form", "dynamic-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Submit latency, falling back to the default
    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUBMIT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir().join(format!("dynamic-form-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.submit_delay_ms.is_none());
        assert!(config.default_data_type.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_submit_delay_override() {
        let config = TuiConfig {
            submit_delay_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.submit_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            submit_delay_ms: Some(500),
            default_data_type: Some("paymentInfo".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.submit_delay_ms, Some(500));
        assert_eq!(parsed.default_data_type, Some("paymentInfo".to_string()));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.submit_delay_ms.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Unknown keys are ignored
        let json = r#"{"submit_delay_ms": 10, "theme": "dark"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay_ms, Some(10));
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config_path();
        fs::write(&path, r#"{"default_data_type": "addressInfo"}"#).unwrap();

        let config = TuiConfig::load_from(&path).unwrap();
        assert_eq!(config.default_data_type.as_deref(), Some("addressInfo"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_invalid_json_errors() {
        let path = temp_config_path();
        fs::write(&path, "not json").unwrap();

        assert!(TuiConfig::load_from(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_config_path_is_json_file() {
        if let Some(path) = TuiConfig::config_path() {
            assert!(path.ends_with("config.json"));
        }
    }
}
