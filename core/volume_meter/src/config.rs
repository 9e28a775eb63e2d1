use std::path::Path;

use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_EVENT_CAPACITY, DEFAULT_LOUD_THRESHOLD, DEFAULT_MAX_VOLUME, DEFAULT_MIN_VOLUME,
        VOLUME_DECIMALS,
    },
    error::{MeterError, Result},
};

/// Meter display range, icon threshold and event queue size.
///
/// Every field is optional in TOML:
///
/// ```toml
/// max_volume = 2.0
/// loud_threshold = 1.0
/// precision = 4
/// event_capacity = 64
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeterConfig {
    pub min_volume: f64,
    pub max_volume: f64,
    /// Volumes above this switch the meter to its loud icon
    pub loud_threshold: f64,
    /// Decimals shown in the meter label
    pub precision: usize,
    /// Pending position changes the meter can buffer
    pub event_capacity: usize,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            min_volume: DEFAULT_MIN_VOLUME,
            max_volume: DEFAULT_MAX_VOLUME,
            loud_threshold: DEFAULT_LOUD_THRESHOLD,
            precision: VOLUME_DECIMALS,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl MeterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_volume, self.max_volume, self.loud_threshold]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(MeterError::InvalidConfig(
                "volume bounds must be finite".to_owned(),
            ));
        }
        if self.min_volume >= self.max_volume {
            return Err(MeterError::InvalidConfig(format!(
                "min_volume ({}) must be below max_volume ({})",
                self.min_volume, self.max_volume
            )));
        }
        if self.precision > 8 {
            return Err(MeterError::InvalidConfig(format!(
                "precision {} is above 8 decimals",
                self.precision
            )));
        }
        if self.event_capacity == 0 {
            return Err(MeterError::InvalidConfig(
                "event_capacity must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
