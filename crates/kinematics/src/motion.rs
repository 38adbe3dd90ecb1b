//! Difference, speed and time-to-impact

use serde::{Deserialize, Serialize};
use threat_estimator::ThreatSample;
use tracing::debug;

use crate::KinematicsError;

/// Projected time until the threat distance reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeToImpact {
    /// Obstacle approaching, impact in this many seconds
    Seconds(f32),
    /// Receding or stationary
    Never,
}

impl TimeToImpact {
    /// Seconds until impact, `f32::INFINITY` when never
    pub fn as_secs(&self) -> f32 {
        match self {
            TimeToImpact::Seconds(s) => *s,
            TimeToImpact::Never => f32::INFINITY,
        }
    }

    /// Check if impact is projected strictly sooner than `threshold_s`
    pub fn is_below(&self, threshold_s: f32) -> bool {
        match self {
            TimeToImpact::Seconds(s) => *s < threshold_s,
            TimeToImpact::Never => false,
        }
    }
}

/// Sideways movement of the nearest surface anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateralDrift {
    Left,
    Right,
    #[default]
    Steady,
}

/// Kinematics derived from one (previous, current) sample pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicsResult {
    /// current - previous threat distance (meters), negative = closer
    pub difference: f32,

    /// Signed speed (m/s), negative = approaching
    pub speed: f32,

    /// Projected time-to-impact
    pub time_to_impact: TimeToImpact,

    /// Sideways drift of the nearest surface in the image
    pub lateral: LateralDrift,

    /// Seconds between the two samples
    pub interval_s: f32,
}

impl KinematicsResult {
    /// Check if the obstacle got closer
    pub fn approaching(&self) -> bool {
        self.speed < 0.0
    }
}

/// Kinematics estimator for a fixed capture rate
#[derive(Debug, Clone)]
pub struct KinematicsEstimator {
    /// Seconds between two captured frames
    frame_period_s: f32,
}

impl KinematicsEstimator {
    /// Create an estimator for frames captured every `frame_period_s` seconds
    pub fn new(frame_period_s: f32) -> Result<Self, KinematicsError> {
        check_interval(frame_period_s)?;
        Ok(Self { frame_period_s })
    }

    pub fn frame_period_s(&self) -> f32 {
        self.frame_period_s
    }

    /// Real time elapsed between two samples, from their tick indices
    pub fn interval_between(&self, previous: &ThreatSample, current: &ThreatSample) -> f32 {
        current.tick.saturating_sub(previous.tick) as f32 * self.frame_period_s
    }

    /// Kinematics for a pair, timing taken from the samples' tick indices
    pub fn estimate(
        &self,
        previous: &ThreatSample,
        current: &ThreatSample,
    ) -> Result<KinematicsResult, KinematicsError> {
        Self::compute(previous, current, self.interval_between(previous, current))
    }

    /// Kinematics for a pair taken `interval_s` seconds apart
    pub fn compute(
        previous: &ThreatSample,
        current: &ThreatSample,
        interval_s: f32,
    ) -> Result<KinematicsResult, KinematicsError> {
        check_interval(interval_s)?;

        let difference = current.distance - previous.distance;
        let speed = difference / interval_s;

        let time_to_impact = if speed < 0.0 {
            // Distance at or below zero means contact already happened
            TimeToImpact::Seconds(current.distance.max(0.0) / speed.abs())
        } else {
            TimeToImpact::Never
        };

        let lateral = match current.anchor.0.cmp(&previous.anchor.0) {
            std::cmp::Ordering::Less => LateralDrift::Left,
            std::cmp::Ordering::Greater => LateralDrift::Right,
            std::cmp::Ordering::Equal => LateralDrift::Steady,
        };

        debug!(
            previous_tick = previous.tick,
            current_tick = current.tick,
            difference_m = difference,
            speed_mps = speed,
            tti_s = time_to_impact.as_secs(),
            "kinematics computed"
        );

        Ok(KinematicsResult {
            difference,
            speed,
            time_to_impact,
            lateral,
            interval_s,
        })
    }
}

fn check_interval(interval_s: f32) -> Result<(), KinematicsError> {
    if interval_s.is_finite() && interval_s > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidInterval(interval_s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(distance: f32, tick: u64) -> ThreatSample {
        ThreatSample::new(distance, tick, (0, 0))
    }

    #[test]
    fn test_approaching_pair() {
        let result = KinematicsEstimator::compute(&sample(5.0, 0), &sample(3.0, 100), 0.5).unwrap();

        assert!((result.difference + 2.0).abs() < 1e-6);
        assert!((result.speed + 4.0).abs() < 1e-6);
        assert_eq!(result.time_to_impact, TimeToImpact::Seconds(0.75));
        assert!(result.approaching());
    }

    #[test]
    fn test_stationary_is_never() {
        let result = KinematicsEstimator::compute(&sample(2.0, 0), &sample(2.0, 10), 1.0).unwrap();

        assert_eq!(result.difference, 0.0);
        assert_eq!(result.speed, 0.0);
        assert_eq!(result.time_to_impact, TimeToImpact::Never);
        assert_eq!(result.time_to_impact.as_secs(), f32::INFINITY);
    }

    #[test]
    fn test_receding_is_never() {
        let result = KinematicsEstimator::compute(&sample(2.0, 0), &sample(3.0, 10), 1.0).unwrap();
        assert!(result.speed > 0.0);
        assert_eq!(result.time_to_impact, TimeToImpact::Never);
    }

    #[test]
    fn test_contact_gives_zero_tti() {
        let result = KinematicsEstimator::compute(&sample(1.0, 0), &sample(0.0, 10), 0.5).unwrap();
        assert_eq!(result.time_to_impact, TimeToImpact::Seconds(0.0));
        assert!(result.time_to_impact.is_below(0.1));
    }

    #[test]
    fn test_invalid_interval() {
        for interval in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = KinematicsEstimator::compute(&sample(1.0, 0), &sample(1.0, 1), interval);
            assert!(result.is_err());
        }
        assert!(KinematicsEstimator::new(0.0).is_err());
    }

    #[test]
    fn test_interval_from_ticks() {
        // 60 fps, samples 100 frames apart
        let estimator = KinematicsEstimator::new(1.0 / 60.0).unwrap();
        let previous = sample(4.0, 20);
        let current = sample(3.0, 120);

        let interval = estimator.interval_between(&previous, &current);
        assert!((interval - 100.0 / 60.0).abs() < 1e-5);

        let result = estimator.estimate(&previous, &current).unwrap();
        assert!((result.speed + 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_lateral_drift() {
        let previous = ThreatSample::new(2.0, 0, (40, 10));
        let left = ThreatSample::new(2.0, 10, (12, 10));
        let right = ThreatSample::new(2.0, 10, (41, 3));
        let steady = ThreatSample::new(2.0, 10, (40, 30));

        let drift = |current: &ThreatSample| {
            KinematicsEstimator::compute(&previous, current, 1.0)
                .unwrap()
                .lateral
        };
        assert_eq!(drift(&left), LateralDrift::Left);
        assert_eq!(drift(&right), LateralDrift::Right);
        assert_eq!(drift(&steady), LateralDrift::Steady);
    }

    #[test]
    fn test_never_is_never_below() {
        assert!(!TimeToImpact::Never.is_below(f32::MAX));
        assert!(TimeToImpact::Seconds(2.9).is_below(3.0));
        assert!(!TimeToImpact::Seconds(3.0).is_below(3.0));
    }

    proptest! {
        #[test]
        fn tti_is_finite_exactly_when_approaching(
            previous in 0.1f32..10.0,
            current in 0.0f32..10.0,
            interval in 0.01f32..5.0,
        ) {
            let result = KinematicsEstimator::compute(
                &sample(previous, 0),
                &sample(current, 1),
                interval,
            ).unwrap();

            if result.speed < 0.0 {
                let tti = result.time_to_impact.as_secs();
                prop_assert!(tti.is_finite() && tti >= 0.0);
            } else {
                prop_assert_eq!(result.time_to_impact, TimeToImpact::Never);
            }
        }
    }
}
