use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::path_projector::DEFAULT_STRIDE;
use crate::route_sampler::DEFAULT_INTERVAL_SECS;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    pub sample_interval_secs: u64,
    pub projection_stride: usize,
    pub chart_height: usize,
    /// Also the number of elevation samples worth requesting upstream.
    pub chart_width: usize,
    pub hourly_window_hours: i64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            sample_interval_secs: DEFAULT_INTERVAL_SECS,
            projection_stride: DEFAULT_STRIDE,
            chart_height: 10,
            chart_width: 60,
            hourly_window_hours: 24,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: CoreConfig =
            serde_json::from_str(text).context("failed to parse core config")?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text).with_context(|| format!("{}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_secs == 0 {
            bail!("sampleIntervalSecs must be positive");
        }
        if self.projection_stride == 0 {
            bail!("projectionStride must be positive");
        }
        if self.chart_height == 0 || self.chart_width == 0 {
            bail!(
                "chart must be at least 1x1, got {}x{}",
                self.chart_width,
                self.chart_height
            );
        }
        if self.hourly_window_hours < 0 {
            bail!("hourlyWindowHours must not be negative");
        }
        if TimeDelta::try_hours(self.hourly_window_hours).is_none() {
            bail!(
                "hourlyWindowHours is too large, got {}",
                self.hourly_window_hours
            );
        }
        Ok(())
    }

    /// Saturates for a window `validate` would reject.
    pub fn hourly_window(&self) -> TimeDelta {
        match TimeDelta::try_hours(self.hourly_window_hours) {
            Some(window) => window,
            None if self.hourly_window_hours < 0 => TimeDelta::MIN,
            None => TimeDelta::MAX,
        }
    }
}
