//! Obstacle Proximity Pipeline
//!
//! Turns a stream of depth frames into collision-risk alerts:
//! - Central region extraction and robust threat distance
//! - Sliding window look-back over sampled ticks
//! - Closing speed and time-to-impact
//! - Threshold policy with edge-triggered transitions

pub mod config;
pub mod pipeline;
pub mod snapshot;
pub mod thresholds;

pub use config::PipelineConfig;
pub use pipeline::{PipelineStats, ProximityPipeline, TickOutcome};
pub use snapshot::MetricsSnapshot;
pub use thresholds::ThresholdHandle;

pub use alerting::{AlertRule, AlertState, AlertTransition, ThresholdConfig, TriggerMode};
pub use kinematics::{KinematicsResult, LateralDrift, TimeToImpact};

use thiserror::Error;

/// Pipeline error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProximityError {
    #[error("Frame rejected: {0}")]
    Frame(#[from] depth_capture::FrameError),

    #[error("Estimation failed: {0}")]
    Estimator(#[from] threat_estimator::EstimatorError),

    #[error("Kinematics failed: {0}")]
    Kinematics(#[from] kinematics::KinematicsError),

    #[error("Window error: {0}")]
    Window(#[from] ring_buffer::WindowError),

    #[error("Threshold error: {0}")]
    Threshold(#[from] alerting::ConfigError),

    #[error("Tick {tick} is not after last sampled tick {last}")]
    NonMonotonicTick { tick: u64, last: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}
