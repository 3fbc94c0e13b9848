//! Emulator configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dvs_core::{AdaptConfig, DvsError, DvsResult, Resolution};
use dvs_sensor::RowScheduler;

use crate::DiffMethod;

/// Everything needed to stand up a session and its pipeline
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub width: usize,
    pub height: usize,
    /// Nominal source frame rate, 0 when unknown
    pub fps: u32,
    pub threshold: f32,
    pub relax_rate: f32,
    pub adapt_up: f32,
    pub adapt_down: f32,
    /// Worker threads for the row scheduler; 0 uses rayon's global pool,
    /// 1 runs on the calling thread
    pub threads: usize,
    pub rows_per_task: usize,
    /// Method for the naive difference preview
    pub diff_method: DiffMethod,
    /// FPS report period in milliseconds, 0 disables reporting
    pub fps_report_ms: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        let adapt = AdaptConfig::default();
        EmulatorConfig {
            width: 640,
            height: 480,
            fps: 0,
            threshold: adapt.base_threshold,
            relax_rate: adapt.relax_rate,
            adapt_up: adapt.adapt_up,
            adapt_down: adapt.adapt_down,
            threads: 0,
            rows_per_task: 1,
            diff_method: DiffMethod::AbsDiff,
            fps_report_ms: 1000,
        }
    }
}

impl EmulatorConfig {
    /// Parse from a JSON document
    pub fn from_json_str(text: &str) -> DvsResult<Self> {
        serde_json::from_str(text).map_err(|e| DvsError::Config(e.to_string()))
    }

    /// Read and parse a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> DvsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> DvsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DvsError::Config(e.to_string()))
    }

    pub fn resolution(&self) -> DvsResult<Resolution> {
        Resolution::new(self.width, self.height)
    }

    pub fn adapt(&self) -> AdaptConfig {
        AdaptConfig::new(self.threshold, self.relax_rate, self.adapt_up, self.adapt_down)
    }

    /// Build the row scheduler described by `threads` and `rows_per_task`
    pub fn scheduler(&self) -> DvsResult<RowScheduler> {
        let scheduler = match self.threads {
            0 => RowScheduler::parallel(),
            1 => RowScheduler::sequential(),
            n => RowScheduler::with_threads(n)?,
        };
        Ok(scheduler.rows_per_task(self.rows_per_task))
    }

    pub fn fps_report_period(&self) -> Option<Duration> {
        (self.fps_report_ms > 0).then(|| Duration::from_millis(self.fps_report_ms))
    }

    /// Check the fields a session cannot start without
    pub fn validate(&self) -> DvsResult<()> {
        self.resolution()?;
        self.adapt().validate()
    }
}
