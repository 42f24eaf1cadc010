//! Configuration Management
//!
//! Resolves the Lynx connection parameters. Sources, highest priority first:
//! explicit values (provider config or CLI flags), the `LYNX_API_URL` /
//! `LYNX_API_KEY` environment variables, then `<config_dir>/lynx/config.json`.

use crate::lynx::error::{LynxError, Result};
use crate::lynx::http::DEFAULT_TIMEOUT;
use crate::lynx::LynxClient;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the API URL
pub const ENV_API_URL: &str = "LYNX_API_URL";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "LYNX_API_KEY";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "LYNX_TIMEOUT_SECS";

/// Connection configuration, every field optional until resolved
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LynxConfig {
    /// Base URL of the Lynx API, e.g. `http://localhost:4000/api/v1`
    #[serde(default)]
    pub api_url: Option<String>,
    /// API key sent as `X-API-Key`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Fully resolved connection parameters
#[derive(Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResolvedConfig {
    /// Build the shared client from these parameters
    pub fn client(&self) -> Result<LynxClient> {
        LynxClient::with_timeout(&self.api_url, &self.api_key, self.timeout)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LynxConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lynx").join("config.json"))
    }

    /// Load configuration from the default config file
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file, falling back to defaults when it is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: non_empty(lookup(ENV_API_URL)),
            api_key: non_empty(lookup(ENV_API_KEY)),
            timeout_secs: non_empty(lookup(ENV_TIMEOUT_SECS)).and_then(|v| v.parse().ok()),
        }
    }

    /// Fill unset fields of `self` from `fallback`
    pub fn or(self, fallback: LynxConfig) -> Self {
        Self {
            api_url: non_empty(self.api_url).or_else(|| non_empty(fallback.api_url)),
            api_key: non_empty(self.api_key).or_else(|| non_empty(fallback.api_key)),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }

    /// Explicit values, then environment, then config file
    pub fn effective(explicit: LynxConfig) -> Self {
        explicit.or(Self::from_env()).or(Self::load())
    }

    /// Validate and resolve into concrete connection parameters
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let api_url = non_empty(self.api_url.clone()).ok_or_else(|| {
            LynxError::Configuration(format!(
                "missing Lynx API URL: set api_url or the {} environment variable",
                ENV_API_URL
            ))
        })?;

        let parsed = url::Url::parse(&api_url)
            .map_err(|e| LynxError::Configuration(format!("invalid API URL '{}': {}", api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LynxError::Configuration(format!(
                "invalid API URL '{}': scheme must be http or https",
                api_url
            )));
        }

        let api_key = non_empty(self.api_key.clone()).ok_or_else(|| {
            LynxError::Configuration(format!(
                "missing Lynx API key: set api_key or the {} environment variable",
                ENV_API_KEY
            ))
        })?;

        let timeout = match self.timeout_secs {
            Some(0) => {
                return Err(LynxError::Configuration(
                    "timeout must be greater than zero".to_string(),
                ))
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(ResolvedConfig {
            api_url,
            api_key,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full() -> LynxConfig {
        LynxConfig {
            api_url: Some("http://localhost:4000/api/v1".to_string()),
            api_key: Some("secret".to_string()),
            timeout_secs: None,
        }
    }

    #[test]
    fn test_resolve_defaults_timeout() {
        let resolved = full().resolve().unwrap();
        assert_eq!(resolved.api_url, "http://localhost:4000/api/v1");
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_url_is_configuration_error() {
        let config = LynxConfig {
            api_url: None,
            ..full()
        };
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, LynxError::Configuration(_)));
        assert!(err.to_string().contains(ENV_API_URL));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let config = LynxConfig {
            api_key: Some("   ".to_string()),
            ..full()
        };
        assert!(matches!(
            config.resolve(),
            Err(LynxError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        for url in ["not a url", "ftp://example.com"] {
            let config = LynxConfig {
                api_url: Some(url.to_string()),
                ..full()
            };
            assert!(matches!(
                config.resolve(),
                Err(LynxError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = LynxConfig {
            timeout_secs: Some(0),
            ..full()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_explicit_values_win_over_fallback() {
        let env = LynxConfig::from_lookup(|key| {
            let vars: HashMap<&str, &str> = HashMap::from([
                (ENV_API_URL, "http://env:4000"),
                (ENV_API_KEY, "env-key"),
                (ENV_TIMEOUT_SECS, "30"),
            ]);
            vars.get(key).map(|v| v.to_string())
        });
        let explicit = LynxConfig {
            api_url: Some("http://explicit:4000".to_string()),
            api_key: Some(String::new()),
            timeout_secs: None,
        };

        let merged = explicit.or(env);
        assert_eq!(merged.api_url.as_deref(), Some("http://explicit:4000"));
        assert_eq!(merged.api_key.as_deref(), Some("env-key"));
        assert_eq!(merged.timeout_secs, Some(30));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_url": "http://file:4000", "timeout_secs": 5}"#).unwrap();

        let config = LynxConfig::load_from(&path);
        assert_eq!(config.api_url.as_deref(), Some("http://file:4000"));
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_load_from_missing_or_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            LynxConfig::load_from(&dir.path().join("missing.json")),
            LynxConfig::default()
        );

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        assert_eq!(LynxConfig::load_from(&path), LynxConfig::default());
    }

    #[test]
    fn test_debug_redacts_key() {
        let resolved = full().resolve().unwrap();
        assert!(!format!("{:?}", resolved).contains("secret"));
    }
}
