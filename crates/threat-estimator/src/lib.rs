//! Threat Distance Estimation
//!
//! Reduces the central region of a depth frame to one robust
//! "nearest obstacle" distance using a low-quartile band filter.

mod estimator;

pub use estimator::{threat_distance, EstimatorConfig, RobustDistanceEstimator};

use depth_capture::FrameError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Estimation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("No finite depth samples in region")]
    NoValidSamples,

    #[error("No samples inside the close band")]
    EmptyCloseSet,

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// One threat distance estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatSample {
    /// Estimated nearest obstacle distance (meters)
    pub distance: f32,

    /// Tick index the sample was produced on
    pub tick: u64,

    /// Frame pixel (x, y) of the low-quartile reading
    pub anchor: (u32, u32),
}

impl ThreatSample {
    pub fn new(distance: f32, tick: u64, anchor: (u32, u32)) -> Self {
        Self {
            distance,
            tick,
            anchor,
        }
    }
}
