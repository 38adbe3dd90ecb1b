//! Alert transition triggering

use kinematics::KinematicsResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AlertState;

/// When to notify the actuator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Notify once when entering alert, once when leaving it
    #[default]
    Edge,
    /// Notify on every alert tick, plus once when leaving it
    Level,
}

/// Event handed to the alert actuator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlertTransition {
    /// Collision risk raised
    Raised {
        tick: u64,
        distance_m: f32,
        kinematics: KinematicsResult,
    },
    /// Collision risk cleared
    Cleared { tick: u64 },
}

impl AlertTransition {
    pub fn tick(&self) -> u64 {
        match self {
            AlertTransition::Raised { tick, .. } | AlertTransition::Cleared { tick } => *tick,
        }
    }
}

/// Turns per-tick alert states into actuator events
#[derive(Debug, Clone, Default)]
pub struct AlertTrigger {
    mode: TriggerMode,
    /// State seen on the previous observed tick
    last: AlertState,
    /// Number of Raised events emitted
    raised_count: usize,
}

impl AlertTrigger {
    pub fn new(mode: TriggerMode) -> Self {
        Self {
            mode,
            last: AlertState::Normal,
            raised_count: 0,
        }
    }

    /// Observe one tick's alert state and emit a transition if one is due
    pub fn observe(
        &mut self,
        tick: u64,
        state: AlertState,
        distance_m: f32,
        kinematics: &KinematicsResult,
    ) -> Option<AlertTransition> {
        let previous = std::mem::replace(&mut self.last, state);

        let transition = match (previous, state, self.mode) {
            (AlertState::Normal, AlertState::Alert, _)
            | (AlertState::Alert, AlertState::Alert, TriggerMode::Level) => {
                self.raised_count += 1;
                info!(
                    "Collision alert raised at tick {}: {:.2} m, {:.2} m/s (count: {})",
                    tick, distance_m, kinematics.speed, self.raised_count
                );
                Some(AlertTransition::Raised {
                    tick,
                    distance_m,
                    kinematics: *kinematics,
                })
            }
            (AlertState::Alert, AlertState::Normal, _) => {
                info!("Collision alert cleared at tick {}", tick);
                Some(AlertTransition::Cleared { tick })
            }
            _ => None,
        };

        if transition.is_none() {
            debug!(tick, ?state, "no alert transition");
        }
        transition
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// State seen on the last observed tick
    pub fn last_state(&self) -> AlertState {
        self.last
    }

    /// Get number of Raised events emitted
    pub fn raised_count(&self) -> usize {
        self.raised_count
    }

    /// Forget the last state (on session restart)
    pub fn reset(&mut self) {
        self.last = AlertState::Normal;
    }
}
