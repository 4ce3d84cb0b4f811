//! Top-level wraith configuration with layered resolution.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CatalogConfig, ObservabilityConfig, PresenceConfig, SessionConfig, SyncConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`WRAITH_*`)
/// 2. Config file passed to [`WraithConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WraithConfig {
    pub session: SessionConfig,
    pub presence: PresenceConfig,
    pub sync: SyncConfig,
    pub catalog: CatalogConfig,
    pub observability: ObservabilityConfig,
}

impl WraithConfig {
    /// Load configuration: defaults, then `path` if given, then env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    /// Unknown keys are silently ignored.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `WRAITH_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_env(&lookup, "WRAITH_IDLE_TIMEOUT_SECS")? {
            self.session.idle_timeout_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_EMPTY_GRACE_SECS")? {
            self.session.empty_grace_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_SWEEP_INTERVAL_SECS")? {
            self.session.sweep_interval_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_DEDUP_WINDOW")? {
            self.session.dedup_window = v;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_HEARTBEAT_TIMEOUT_SECS")? {
            self.presence.heartbeat_timeout_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_SUBSCRIBER_BUFFER")? {
            self.sync.subscriber_buffer = v;
        }
        if let Some(path) = lookup("WRAITH_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup("WRAITH_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(v) = parse_env(&lookup, "WRAITH_LOG_JSON")? {
            self.observability.json = v;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("session.idle_timeout_secs", self.session.idle_timeout_secs),
            ("session.empty_grace_secs", self.session.empty_grace_secs),
            ("session.sweep_interval_secs", self.session.sweep_interval_secs),
            (
                "presence.heartbeat_timeout_secs",
                self.presence.heartbeat_timeout_secs,
            ),
            ("sync.poll_interval_ms", self.sync.poll_interval_ms),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if self.session.idle_timeout_secs <= self.session.empty_grace_secs {
            return Err(ConfigError::ValidationFailed {
                field: "session.idle_timeout_secs".to_string(),
                message: "must be longer than session.empty_grace_secs".to_string(),
            });
        }
        if self.sync.subscriber_buffer == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "sync.subscriber_buffer".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.sync.poll_backoff_max_ms < self.sync.poll_backoff_base_ms {
            return Err(ConfigError::ValidationFailed {
                field: "sync.poll_backoff_max_ms".to_string(),
                message: "must not be below sync.poll_backoff_base_ms".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::ValidationFailed {
                field: key.to_string(),
                message: e.to_string(),
            }),
    }
}
