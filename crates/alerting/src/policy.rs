//! Alert decision rule

use kinematics::KinematicsResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AlertRule, ThresholdConfig};

/// Alert level for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertState {
    #[default]
    Normal,
    Alert,
}

impl AlertState {
    pub fn is_alert(&self) -> bool {
        matches!(self, AlertState::Alert)
    }
}

/// Stateless threshold policy; each tick is judged on its own inputs
pub struct AlertPolicy;

impl AlertPolicy {
    /// Evaluate one tick's kinematics against the live thresholds
    pub fn evaluate(kinematics: &KinematicsResult, thresholds: &ThresholdConfig) -> AlertState {
        let closing_fast = kinematics.speed < thresholds.speed_threshold;

        let alert = match thresholds.rule {
            AlertRule::SpeedAndTti => {
                closing_fast && kinematics.time_to_impact.is_below(thresholds.tti_threshold)
            }
            AlertRule::DifferenceOnly => kinematics.difference < thresholds.distance_diff_threshold,
            AlertRule::SpeedOnly => closing_fast,
        };

        debug!(
            rule = ?thresholds.rule,
            speed_mps = kinematics.speed,
            tti_s = kinematics.time_to_impact.as_secs(),
            alert,
            "alert rule evaluated"
        );

        if alert {
            AlertState::Alert
        } else {
            AlertState::Normal
        }
    }
}
