use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::common::{
    enums::Zone,
    exception::{ErrCode, RlwError},
};

pub const DEFAULT_PERIOD: usize = 14;
pub const MIN_PERIOD: usize = 1;
pub const MAX_PERIOD: usize = 999;
pub const DEFAULT_UPPER_LEVEL: f64 = -20.0;
pub const DEFAULT_LOWER_LEVEL: f64 = -80.0;

/// %R oscillator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RlwConfig {
    /// Lookback window in bars
    pub period: usize,
    /// Overbought reference level
    pub upper_level: f64,
    /// Oversold reference level
    pub lower_level: f64,
}

impl Default for RlwConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            upper_level: DEFAULT_UPPER_LEVEL,
            lower_level: DEFAULT_LOWER_LEVEL,
        }
    }
}

impl RlwConfig {
    /// Build a config from a key/value map; missing keys take defaults
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, RlwError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            period: conf.get("period")?.unwrap_or(default.period),
            upper_level: conf.get("upper_level")?.unwrap_or(default.upper_level),
            lower_level: conf.get("lower_level")?.unwrap_or(default.lower_level),
        };

        conf.check()?;
        config.check()?;
        Ok(config)
    }

    pub fn with_period(period: usize) -> Result<Self, RlwError> {
        let config = Self {
            period,
            ..Self::default()
        };
        config.check()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, RlwError> {
        let config: Self = serde_json::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, RlwError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RlwError::new(
                format!("cannot read config {}: {}", path.display(), e),
                ErrCode::SrcDataNotFound,
            )
        })?;
        Self::from_json_str(&content)
    }

    pub fn check_period(period: usize) -> Result<(), RlwError> {
        if !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
            return Err(RlwError::new(
                format!("period={} must be in [{}, {}]", period, MIN_PERIOD, MAX_PERIOD),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }

    pub fn check(&self) -> Result<(), RlwError> {
        Self::check_period(self.period)?;
        for (name, level) in [("upper_level", self.upper_level), ("lower_level", self.lower_level)] {
            if !(-100.0..=0.0).contains(&level) {
                return Err(RlwError::new(
                    format!("{}={} must be in [-100, 0]", name, level),
                    ErrCode::ConfigError,
                ));
            }
        }
        if self.lower_level >= self.upper_level {
            return Err(RlwError::new(
                format!(
                    "lower_level={} must be below upper_level={}",
                    self.lower_level, self.upper_level
                ),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }

    pub fn short_name(&self) -> String {
        format!("RLW ({})", self.period)
    }

    pub fn min_history_depth(&self) -> usize {
        self.period
    }

    pub fn zone(&self, value: f64) -> Zone {
        if value >= self.upper_level {
            Zone::Overbought
        } else if value <= self.lower_level {
            Zone::Oversold
        } else {
            Zone::Neutral
        }
    }
}

/// Key/value map that remembers which keys were consumed
struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, RlwError> {
        match self.conf.remove(key) {
            None => Ok(None),
            Some(v) => serde_json::from_value(v.clone()).map(Some).map_err(|e| {
                RlwError::new(format!("invalid {}={}: {}", key, v, e), ErrCode::ParaError)
            }),
        }
    }

    fn check(&self) -> Result<(), RlwError> {
        if let Some(k) = self.conf.keys().next() {
            return Err(RlwError::new(format!("unknown para = {}", k), ErrCode::ParaError));
        }
        Ok(())
    }
}
