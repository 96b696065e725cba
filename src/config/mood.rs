//! Mood pipeline settings
//!
//! Read once per request so operators can retune the threshold or swap upstream
//! endpoints without a restart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_ACTIVATE_API: &str = "SENSORS_ACTIVATE_API";
pub const ENV_MEASURE_API: &str = "SENSORS_MEASURE_API";
pub const ENV_HAPPY_THRESHOLD: &str = "HAPPY_THRESHOLD";
pub const ENV_ACTIVATION_BATCH: &str = "SENSORS_ACTIVATION_BATCH";
pub const ENV_DECODE_POLICY: &str = "MOOD_DECODE_POLICY";

pub const DEFAULT_ACTIVATION_BATCH: usize = 10;

/// Where per-request settings come from
pub trait SettingsSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SettingsSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not set")]
    Missing { key: &'static str },

    #[error("{key}={value:?} is not an integer")]
    NotAnInteger { key: &'static str, value: String },

    #[error("{key}={value:?} must be a positive integer")]
    NotPositive { key: &'static str, value: String },

    #[error("{key}={value:?} is not a decode policy (expected strict or best-effort)")]
    UnknownPolicy { key: &'static str, value: String },
}

/// What to do when the measurement body does not decode as a sensor list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Abort the request; the stored snapshot is left alone
    #[default]
    Strict,
    /// Keep the stored snapshot and carry on with it
    BestEffort,
}

impl DecodePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodePolicy::Strict => "strict",
            DecodePolicy::BestEffort => "best-effort",
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(DecodePolicy::Strict),
            "best-effort" | "best_effort" | "besteffort" => Ok(DecodePolicy::BestEffort),
            _ => Err(ConfigError::UnknownPolicy {
                key: ENV_DECODE_POLICY,
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for one pass of the mood pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSettings {
    pub activate_url: String,
    pub measure_url: String,
    /// Percentage the happy share has to exceed
    pub happy_threshold: i64,
    pub activation_batch: usize,
    pub decode_policy: DecodePolicy,
}

impl MoodSettings {
    /// Load settings from any source.
    ///
    /// The threshold is checked first so a bad threshold is always reported as such,
    /// even when the endpoints are missing too.
    pub fn load(source: &dyn SettingsSource) -> Result<Self, ConfigError> {
        let happy_threshold = match source.get(ENV_HAPPY_THRESHOLD) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::NotAnInteger {
                    key: ENV_HAPPY_THRESHOLD,
                    value: raw.clone(),
                })?,
            None => {
                return Err(ConfigError::Missing {
                    key: ENV_HAPPY_THRESHOLD,
                })
            }
        };

        let activate_url = required(source, ENV_ACTIVATE_API)?;
        let measure_url = required(source, ENV_MEASURE_API)?;

        let activation_batch = match source.get(ENV_ACTIVATION_BATCH) {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::NotPositive {
                        key: ENV_ACTIVATION_BATCH,
                        value: raw,
                    })
                }
                Ok(n) => n,
            },
            _ => DEFAULT_ACTIVATION_BATCH,
        };

        let decode_policy = match source.get(ENV_DECODE_POLICY) {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<DecodePolicy>()?,
            _ => DecodePolicy::default(),
        };

        Ok(Self {
            activate_url,
            measure_url,
            happy_threshold,
            activation_batch,
            decode_policy,
        })
    }
}

fn required(source: &dyn SettingsSource, key: &'static str) -> Result<String, ConfigError> {
    match source.get(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing { key }),
    }
}
