// ==========================================
// SubOuts Tracker - configuration manager
// ==========================================
// Flat key/value store (global scope) with typed getters and
// defaults. Sources, lowest to highest precedence:
//   built-in defaults < JSON object (string or file) < SUBOUTS_* env vars
// ==========================================

use crate::config::rule_config_trait::RuleConfigReader;
use crate::engine::urgency::HeatMapSettings;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::RwLock;
use thiserror::Error;

/// Environment variable prefix for overrides (`SUBOUTS_HEAT_MAP_WINDOW_DAYS=10`).
pub const ENV_PREFIX: &str = "SUBOUTS_";

// ==========================================
// ConfigError
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value: key={key}, value={value}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("config lock poisoned: {0}")]
    Lock(String),

    #[error("config file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // loads
    pub const DEFAULT_LOAD_CAPACITY_LBS: &str = "default_load_capacity_lbs";
    pub const CAPACITY_WARNING_RATIO: &str = "capacity_warning_ratio";

    // heat map
    pub const HEAT_MAP_WINDOW_DAYS: &str = "heat_map_window_days";
    pub const GREEN_TINT_ALPHA: &str = "green_tint_alpha";
    pub const MAX_TINT_ALPHA: &str = "max_tint_alpha";

    pub const ALL: [&str; 5] = [
        DEFAULT_LOAD_CAPACITY_LBS,
        CAPACITY_WARNING_RATIO,
        HEAT_MAP_WINDOW_DAYS,
        GREEN_TINT_ALPHA,
        MAX_TINT_ALPHA,
    ];
}

fn default_for(key: &str) -> Option<&'static str> {
    match key {
        config_keys::DEFAULT_LOAD_CAPACITY_LBS => Some("48000"),
        config_keys::CAPACITY_WARNING_RATIO => Some("0.85"),
        config_keys::HEAT_MAP_WINDOW_DAYS => Some("14"),
        config_keys::GREEN_TINT_ALPHA => Some("0.18"),
        config_keys::MAX_TINT_ALPHA => Some("0.60"),
        _ => None,
    }
}

/// JSON scalars become their string form; strings stay unquoted.
fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ==========================================
// ConfigManager
// ==========================================
#[derive(Debug, Default)]
pub struct ConfigManager {
    values: RwLock<HashMap<String, String>>,
}

impl ConfigManager {
    /// Built-in defaults only.
    pub fn new() -> Self {
        Self::default()
    }

    /// From a JSON object of key -> scalar.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let values = raw
            .iter()
            .map(|(k, v)| (k.clone(), json_scalar_to_string(v)))
            .collect();
        Ok(Self {
            values: RwLock::new(values),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Applies `SUBOUTS_<KEY>` overrides for every known key.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(self)
    }

    /// Override hook shared by env loading and tests.
    pub fn apply_overrides<F>(&self, lookup: F) -> ConfigResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut count = 0;
        for key in config_keys::ALL {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Some(value) = lookup(&var) {
                self.set(key, &value)?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_or_default(&self, key: &str) -> ConfigResult<String> {
        Ok(self
            .get(key)?
            .or_else(|| default_for(key).map(str::to_string))
            .unwrap_or_default())
    }

    fn parse<T>(&self, key: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.get_or_default(key)?;
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })
    }

    fn parse_ratio(&self, key: &str) -> ConfigResult<f64> {
        let ratio: f64 = self.parse(key)?;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: ratio.to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }
        Ok(ratio)
    }

    /// Effective configuration (defaults merged in) as a JSON object.
    pub fn snapshot(&self) -> ConfigResult<String> {
        let values = self
            .values
            .read()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;
        let mut merged: HashMap<&str, String> = config_keys::ALL
            .iter()
            .filter_map(|k| default_for(k).map(|d| (*k, d.to_string())))
            .collect();
        for (k, v) in values.iter() {
            merged.insert(k.as_str(), v.clone());
        }
        Ok(serde_json::to_string(&merged)?)
    }

    /// Overwrites values from a snapshot. Keys starting with `__meta_` are skipped.
    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(snapshot_json)?;
        let mut values = self
            .values
            .write()
            .map_err(|e| ConfigError::Lock(e.to_string()))?;

        let mut count = 0;
        for (key, value) in raw.iter() {
            if key.starts_with("__meta_") {
                continue;
            }
            values.insert(key.clone(), json_scalar_to_string(value));
            count += 1;
        }
        Ok(count)
    }
}

// ==========================================
// RuleConfigReader implementation
// ==========================================
impl RuleConfigReader for ConfigManager {
    fn default_load_capacity_lbs(&self) -> ConfigResult<f64> {
        let capacity: f64 = self.parse(config_keys::DEFAULT_LOAD_CAPACITY_LBS)?;
        if capacity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::DEFAULT_LOAD_CAPACITY_LBS.to_string(),
                value: capacity.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(capacity)
    }

    fn capacity_warning_ratio(&self) -> ConfigResult<f64> {
        self.parse_ratio(config_keys::CAPACITY_WARNING_RATIO)
    }

    fn heat_map_settings(&self) -> ConfigResult<HeatMapSettings> {
        let window_days: i64 = self.parse(config_keys::HEAT_MAP_WINDOW_DAYS)?;
        if window_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::HEAT_MAP_WINDOW_DAYS.to_string(),
                value: window_days.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(HeatMapSettings {
            window_days,
            green_alpha: self.parse_ratio(config_keys::GREEN_TINT_ALPHA)?,
            max_alpha: self.parse_ratio(config_keys::MAX_TINT_ALPHA)?,
        })
    }
}
