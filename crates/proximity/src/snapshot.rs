//! Metrics exposed to display sinks

use alerting::AlertState;
use kinematics::{KinematicsResult, LateralDrift, TimeToImpact};
use serde::{Deserialize, Serialize};
use threat_estimator::ThreatSample;

/// Read-only metrics of the latest computed tick (SI units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Tick the metrics were computed on
    pub tick: u64,

    /// Threat distance now (meters)
    pub current_distance: f32,

    /// Threat distance one window ago (meters)
    pub previous_distance: f32,

    /// current - previous (meters)
    pub difference: f32,

    /// Signed speed (m/s), negative = approaching
    pub speed: f32,

    /// Projected time-to-impact
    pub time_to_impact: TimeToImpact,

    /// Sideways drift of the nearest surface
    pub lateral: LateralDrift,

    /// Alert decision for this tick
    pub alert_state: AlertState,
}

impl MetricsSnapshot {
    pub fn new(
        previous: &ThreatSample,
        current: &ThreatSample,
        kinematics: &KinematicsResult,
        alert_state: AlertState,
    ) -> Self {
        Self {
            tick: current.tick,
            current_distance: current.distance,
            previous_distance: previous.distance,
            difference: kinematics.difference,
            speed: kinematics.speed,
            time_to_impact: kinematics.time_to_impact,
            lateral: kinematics.lateral,
            alert_state,
        }
    }

    /// Time-to-impact in seconds, infinite when not approaching
    pub fn tti_s(&self) -> f32 {
        self.time_to_impact.as_secs()
    }
}
