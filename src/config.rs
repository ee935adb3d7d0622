//! Watcher configuration.
//!
//! Loaded from a JSON file before anything else starts. Validation is
//! strict about the things the loop cannot run without (targets, sinks,
//! telegram settings when the telegram sink is selected) and merely warns
//! about aggressive polling intervals.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

/// Minimum interval/sleep (seconds) before we warn about hammering the
/// remote service.
const THROTTLE_WARN_FLOOR: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Logfile,
    Telegram,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Poll period in seconds.
    pub interval_seconds: u64,
    /// Pause between per-identity profile fetches, in seconds.
    pub sleep_seconds: u64,
    pub credentials: Credentials,
    /// Handles to watch. Fixed for the watcher's lifetime.
    pub target_handles: Vec<String>,
    /// Where notifications go. A set, not an exclusive choice.
    pub output_sinks: BTreeSet<SinkKind>,
    pub telegram: Option<TelegramConfig>,
    pub remote: RemoteConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file [{path}]: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file [{path}]: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("target_handles is empty, there is nothing to watch")]
    NoTargets,
    #[error("output_sinks is empty, pick at least one of [\"logfile\", \"telegram\"]")]
    NoSinks,
    #[error("output_sinks includes telegram but the telegram section is missing")]
    TelegramUnconfigured,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Malformed {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checked once, before the loop starts. Low intervals are allowed but
    /// warned about: the remote service may throttle or ban the account.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_handles.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.output_sinks.is_empty() {
            return Err(ConfigError::NoSinks);
        }
        if self.output_sinks.contains(&SinkKind::Telegram) && self.telegram.is_none() {
            return Err(ConfigError::TelegramUnconfigured);
        }

        if self.interval_seconds < THROTTLE_WARN_FLOOR {
            tracing::warn!(
                interval_seconds = self.interval_seconds,
                "interval is low, try {} seconds or more",
                THROTTLE_WARN_FLOOR
            );
        }
        if self.sleep_seconds < THROTTLE_WARN_FLOOR {
            tracing::warn!(
                sleep_seconds = self.sleep_seconds,
                "sleep is low, try {} seconds or more",
                THROTTLE_WARN_FLOOR
            );
        }

        Ok(())
    }
}

/// Starter config written by `vigil init`.
pub const CONFIG_TEMPLATE: &str = r######"{
  "interval_seconds": 15,
  "sleep_seconds": 10,
  "credentials": {
    "username": "#####",
    "password": "#####"
  },
  "target_handles": ["#####"],
  "output_sinks": ["logfile"],
  "telegram": {
    "token": "###",
    "chat_id": 0
  },
  "remote": {
    "base_url": "https://api.example.com"
  }
}
"######;
