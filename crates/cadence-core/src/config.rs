//! Application configuration.
//!
//! Settings come from `$XDG_CONFIG_HOME/cadence/config.toml` (or an explicit
//! path), then environment variables override individual fields. A missing
//! file yields defaults; an unparseable one is logged and ignored.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{CadenceError, Result},
    models::HISTORY_CAP,
};

/// Primary environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback credential variable.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "CADENCE_API_BASE_URL";
pub const USAGE_QUOTA_ENV: &str = "CADENCE_USAGE_QUOTA";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Credential for the generative service
    pub api_key: Option<String>,
    /// Scheme and host of the service, without the `/v1beta` path
    pub api_base_url: String,
    /// Model used for plan text
    pub text_model: String,
    /// Model used for post images
    pub image_model: String,
    /// Maximum number of generations; unlimited when absent
    pub usage_quota: Option<u32>,
    /// Number of plans kept in history
    pub history_cap: usize,
    /// Override for the SQLite store location
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            usage_quota: None,
            history_cap: HISTORY_CAP,
            data_file: None,
        }
    }
}

impl Config {
    /// Loads the config file at `path` (or the XDG default) and applies the
    /// process environment on top.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let config = match config_path {
            Some(config_path) => Self::from_file(&config_path),
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok())
    }

    /// Defaults plus the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_env(|name| std::env::var(name).ok())
    }

    fn from_file(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No config file at {}; using defaults", config_path.display());
                Self::default()
            }
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CadenceError::Configuration {
            message: e.to_string(),
        })
    }

    /// Overrides fields from environment variables resolved by `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV).or_else(|| non_empty(API_KEY_FALLBACK_ENV)) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = non_empty(BASE_URL_ENV) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(quota) = non_empty(USAGE_QUOTA_ENV) {
            match quota.trim().parse::<u32>() {
                Ok(limit) => self.usage_quota = Some(limit),
                Err(e) => warn!("Ignoring {USAGE_QUOTA_ENV}={quota}: {e}"),
            }
        }
        self
    }

    /// The credential, or [`CadenceError::MissingCredential`] when it is
    /// absent or blank.
    pub fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CadenceError::MissingCredential {
                variable: API_KEY_ENV.to_string(),
            })
    }

    /// `$XDG_CONFIG_HOME/cadence/config.toml` (or a system config dir), when it exists.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence").find_config_file("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history_cap, 15);
        assert_eq!(config.usage_quota, None);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert!(config.credential().is_err());
    }

    #[test]
    fn test_toml_overrides_only_given_fields() {
        let config = Config::from_toml_str("usage_quota = 35\ntext_model = \"gemini-2.5-pro\"\n")
            .unwrap();
        assert_eq!(config.usage_quota, Some(35));
        assert_eq!(config.text_model, "gemini-2.5-pro");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        assert!(matches!(
            Config::from_toml_str("usage_quota = \"lots\""),
            Err(CadenceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file_and_falls_back_to_api_key() {
        let config = Config::default().apply_env(env(&[
            ("API_KEY", " AIzaFallback "),
            ("CADENCE_USAGE_QUOTA", "3"),
        ]));
        assert_eq!(config.credential().unwrap(), "AIzaFallback");
        assert_eq!(config.usage_quota, Some(3));

        let config = Config::default().apply_env(env(&[
            ("GEMINI_API_KEY", "AIzaPrimary"),
            ("API_KEY", "AIzaFallback"),
        ]));
        assert_eq!(config.credential().unwrap(), "AIzaPrimary");
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.credential(),
            Err(CadenceError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_bad_quota_env_is_ignored() {
        let config = Config::default().apply_env(env(&[("CADENCE_USAGE_QUOTA", "many")]));
        assert_eq!(config.usage_quota, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::from_file(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }
}
