//! Threat Kinematics
//!
//! Derives how fast the nearest obstacle is closing in from a pair of
//! threat samples taken one window apart:
//! - Signed distance difference and closing speed
//! - Time-to-impact at constant velocity
//! - Lateral drift of the nearest surface

mod motion;

pub use motion::{KinematicsEstimator, KinematicsResult, LateralDrift, TimeToImpact};

use thiserror::Error;

/// Kinematics error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Sample interval must be finite and positive, got {0}s")]
    InvalidInterval(f32),
}
