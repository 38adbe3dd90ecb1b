//! Alert actuator task
//!
//! Receives alert transitions off the frame loop and drives the
//! warning output. Here the output is the log.

use proximity::AlertTransition;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Consume transitions until the sender is dropped; returns how many
/// alerts were raised.
pub async fn run_actuator(mut rx: mpsc::Receiver<AlertTransition>) -> usize {
    let mut raised = 0;

    while let Some(transition) = rx.recv().await {
        match transition {
            AlertTransition::Raised {
                tick,
                distance_m,
                kinematics,
            } => {
                raised += 1;
                warn!(
                    tick,
                    distance_m,
                    speed = kinematics.speed,
                    tti_s = kinematics.time_to_impact.as_secs(),
                    "COLLISION RISK: obstacle {:.2}m ahead, closing at {:.2} m/s",
                    distance_m,
                    -kinematics.speed
                );
            }
            AlertTransition::Cleared { tick } => {
                info!(tick, "Collision risk cleared");
            }
        }
    }

    raised
}
