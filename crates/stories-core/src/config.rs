//! Presenter configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

const TICK_INTERVAL_ENV: &str = "STORIES_TICK_INTERVAL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds added to the selected item's progress per tick
    pub tick_interval_secs: f64,
}

impl Config {
    pub fn new(tick_interval_secs: f64) -> Self {
        Self { tick_interval_secs }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.tick_interval()?;
        Ok(config)
    }

    /// Read overrides from the environment; unset variables keep defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(TICK_INTERVAL_ENV) {
            Ok(raw) => Self::parse_tick_interval(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Validated tick interval
    pub fn tick_interval(&self) -> Result<Duration> {
        let secs = self.tick_interval_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "tick interval must be a positive number of seconds, got {}",
                secs
            )));
        }

        Duration::try_from_secs_f64(secs).map_err(|e| CoreError::Config(e.to_string()))
    }

    fn parse_tick_interval(raw: &str) -> Result<Self> {
        let secs: f64 = raw.trim().parse().map_err(|_| {
            CoreError::Config(format!("{} is not a number: {:?}", TICK_INTERVAL_ENV, raw))
        })?;
        let config = Self::new(secs);
        config.tick_interval()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(stories_tabs::DEFAULT_TICK_INTERVAL.as_secs_f64())
    }
}
