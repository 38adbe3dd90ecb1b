//! Collision Alerting
//!
//! Provides threshold configuration with range clamping, the alert
//! decision rule, and edge-triggered alert transitions for actuators.

mod policy;
mod thresholds;
mod trigger;

pub use policy::{AlertPolicy, AlertState};
pub use thresholds::{AlertRule, ThresholdConfig, DISTANCE_DIFF_RANGE, SPEED_RANGE, TTI_RANGE};
pub use trigger::{AlertTransition, AlertTrigger, TriggerMode};

use thiserror::Error;

/// Threshold configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}
