//! Pipeline configuration

use alerting::{ThresholdConfig, TriggerMode};
use serde::{Deserialize, Serialize};
use threat_estimator::EstimatorConfig;

use crate::ProximityError;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Process only frames whose tick index is a multiple of this
    pub sample_every: u64,

    /// Seconds between two captured frames (1 / sensor fps)
    pub frame_period_s: f32,

    /// Initial alert thresholds
    pub thresholds: ThresholdConfig,

    /// Actuator notification mode
    pub trigger_mode: TriggerMode,

    /// Threat distance tuning
    pub estimator: EstimatorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_every: 10,
            frame_period_s: 1.0 / 60.0,
            thresholds: ThresholdConfig::default(),
            trigger_mode: TriggerMode::Edge,
            estimator: EstimatorConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Config for a sensor running at `fps`
    pub fn for_fps(fps: u32) -> Self {
        Self {
            frame_period_s: 1.0 / fps.max(1) as f32,
            ..Default::default()
        }
    }

    /// Seconds between two sampled ticks
    pub fn tick_interval_s(&self) -> f32 {
        self.sample_every as f32 * self.frame_period_s
    }

    /// Check structural settings; thresholds are clamped, not rejected
    pub fn validate(&self) -> Result<(), ProximityError> {
        if self.sample_every == 0 {
            return Err(ProximityError::Config("sample_every must be at least 1".into()));
        }
        if !(self.frame_period_s.is_finite() && self.frame_period_s > 0.0) {
            return Err(ProximityError::Config(format!(
                "frame_period_s must be positive, got {}",
                self.frame_period_s
            )));
        }
        let estimator = &self.estimator;
        if estimator.quantile_divisor < 2 {
            return Err(ProximityError::Config(format!(
                "quantile_divisor must be at least 2, got {}",
                estimator.quantile_divisor
            )));
        }
        for (field, value) in [
            ("band_fraction", estimator.band_fraction),
            ("band_cap_m", estimator.band_cap_m),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProximityError::Config(format!(
                    "{} must be finite and non-negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}
