//! Alert threshold configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Valid range for the distance difference threshold (meters)
pub const DISTANCE_DIFF_RANGE: (f32, f32) = (-5.0, 0.0);
/// Valid range for the closing speed threshold (m/s)
pub const SPEED_RANGE: (f32, f32) = (-5.0, 0.0);
/// Valid range for the time-to-impact threshold (seconds)
pub const TTI_RANGE: (f32, f32) = (0.0, 6.0);

/// Which kinematic conditions raise an alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRule {
    /// Time-to-impact and closing speed both past their thresholds
    #[default]
    SpeedAndTti,
    /// Distance difference alone past its threshold
    DifferenceOnly,
    /// Closing speed alone past its threshold
    SpeedOnly,
}

/// Alert thresholds, editable at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Alert when the window difference falls below this (meters, negative)
    pub distance_diff_threshold: f32,
    /// Alert when speed falls below this (m/s, negative = closing)
    pub speed_threshold: f32,
    /// Alert when time-to-impact falls below this (seconds)
    pub tti_threshold: f32,
    /// Decision rule
    pub rule: AlertRule,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            distance_diff_threshold: -1.0,
            speed_threshold: -2.2,
            tti_threshold: 3.0,
            rule: AlertRule::SpeedAndTti,
        }
    }
}

impl ThresholdConfig {
    /// Earlier warnings (slower closing speeds, longer horizon)
    pub fn cautious() -> Self {
        Self {
            distance_diff_threshold: -0.5,
            speed_threshold: -1.0,
            tti_threshold: 5.0,
            ..Default::default()
        }
    }

    /// Fewer warnings (only fast, imminent approaches)
    pub fn relaxed() -> Self {
        Self {
            distance_diff_threshold: -2.0,
            speed_threshold: -3.5,
            tti_threshold: 1.5,
            ..Default::default()
        }
    }

    /// Set the distance difference threshold, clamped to its range.
    /// Returns the value actually applied.
    pub fn set_distance_diff_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.distance_diff_threshold =
            clamp_field("distance_diff_threshold", value, DISTANCE_DIFF_RANGE)?;
        Ok(self.distance_diff_threshold)
    }

    /// Set the speed threshold, clamped to its range
    pub fn set_speed_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.speed_threshold = clamp_field("speed_threshold", value, SPEED_RANGE)?;
        Ok(self.speed_threshold)
    }

    /// Set the time-to-impact threshold, clamped to its range
    pub fn set_tti_threshold(&mut self, value: f32) -> Result<f32, ConfigError> {
        self.tti_threshold = clamp_field("tti_threshold", value, TTI_RANGE)?;
        Ok(self.tti_threshold)
    }

    /// Check every field against its range without modifying anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("distance_diff_threshold", self.distance_diff_threshold, DISTANCE_DIFF_RANGE)?;
        check_range("speed_threshold", self.speed_threshold, SPEED_RANGE)?;
        check_range("tti_threshold", self.tti_threshold, TTI_RANGE)
    }

    /// Copy with every field clamped into range.
    /// Non-finite fields fall back to their defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();
        if out.set_distance_diff_threshold(self.distance_diff_threshold).is_err() {
            out.distance_diff_threshold = defaults.distance_diff_threshold;
        }
        if out.set_speed_threshold(self.speed_threshold).is_err() {
            out.speed_threshold = defaults.speed_threshold;
        }
        if out.set_tti_threshold(self.tti_threshold).is_err() {
            out.tti_threshold = defaults.tti_threshold;
        }
        out
    }
}

fn check_range(field: &'static str, value: f32, range: (f32, f32)) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(field));
    }
    if value < range.0 || value > range.1 {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        })
    } else {
        Ok(())
    }
}

fn clamp_field(field: &'static str, value: f32, range: (f32, f32)) -> Result<f32, ConfigError> {
    match check_range(field, value, range) {
        Ok(()) => Ok(value),
        Err(ConfigError::OutOfRange { .. }) => {
            let clamped = value.clamp(range.0, range.1);
            warn!("{} value {} out of range, clamped to {}", field, value, clamped);
            Ok(clamped)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ThresholdConfig::default().validate().is_ok());
        assert!(ThresholdConfig::cautious().validate().is_ok());
        assert!(ThresholdConfig::relaxed().validate().is_ok());
    }

    #[test]
    fn test_setters_clamp() {
        let mut config = ThresholdConfig::default();

        assert_eq!(config.set_speed_threshold(-9.0), Ok(-5.0));
        assert_eq!(config.set_speed_threshold(1.5), Ok(0.0));
        assert_eq!(config.set_distance_diff_threshold(-0.3), Ok(-0.3));
        assert_eq!(config.set_tti_threshold(10.0), Ok(6.0));
        assert_eq!(config.set_tti_threshold(-1.0), Ok(0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected_and_value_kept() {
        let mut config = ThresholdConfig::default();
        assert_eq!(
            config.set_tti_threshold(f32::NAN),
            Err(ConfigError::NotFinite("tti_threshold"))
        );
        assert_eq!(config.tti_threshold, 3.0);
    }

    #[test]
    fn test_validate_reports_field() {
        let config = ThresholdConfig {
            speed_threshold: 2.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "speed_threshold",
                value: 2.0,
                min: -5.0,
                max: 0.0,
            })
        );
    }

    #[test]
    fn test_clamped_copy() {
        let config = ThresholdConfig {
            distance_diff_threshold: f32::NEG_INFINITY,
            speed_threshold: -7.0,
            tti_threshold: 8.0,
            rule: AlertRule::SpeedOnly,
        };
        let fixed = config.clamped();

        assert_eq!(fixed.distance_diff_threshold, -1.0);
        assert_eq!(fixed.speed_threshold, -5.0);
        assert_eq!(fixed.tti_threshold, 6.0);
        assert_eq!(fixed.rule, AlertRule::SpeedOnly);
    }
}
