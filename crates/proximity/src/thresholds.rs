//! Shared threshold access

use std::sync::{Arc, RwLock};

use alerting::{ConfigError, ThresholdConfig};

/// Cloneable handle to the live alert thresholds.
///
/// The pipeline takes one snapshot at the top of each tick, so an update
/// made from another thread applies from the next tick on and never
/// mid-evaluation.
#[derive(Debug, Clone, Default)]
pub struct ThresholdHandle {
    inner: Arc<RwLock<ThresholdConfig>>,
}

impl ThresholdHandle {
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config.clamped())),
        }
    }

    /// Copy of the current thresholds
    pub fn snapshot(&self) -> ThresholdConfig {
        // Poisoning only means a writer panicked; the plain-data config is still whole
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Replace all thresholds, clamping out-of-range fields
    pub fn replace(&self, config: ThresholdConfig) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = config.clamped();
    }

    /// Edit thresholds in place.
    ///
    /// Whatever the closure leaves behind is clamped before the lock is
    /// released, including fields assigned directly; non-finite fields fall
    /// back to their defaults.
    pub fn update<R>(
        &self,
        edit: impl FnOnce(&mut ThresholdConfig) -> Result<R, ConfigError>,
    ) -> Result<R, ConfigError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let result = edit(&mut guard);
        *guard = guard.clamped();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::AlertRule;

    #[test]
    fn test_update_clamps() {
        let handle = ThresholdHandle::default();
        let applied = handle.update(|t| t.set_speed_threshold(-12.0)).unwrap();

        assert_eq!(applied, -5.0);
        assert_eq!(handle.snapshot().speed_threshold, -5.0);
    }

    #[test]
    fn test_update_clamps_direct_assignment() {
        let handle = ThresholdHandle::default();
        handle
            .update(|t| {
                t.tti_threshold = 60.0;
                t.distance_diff_threshold = 3.0;
                t.speed_threshold = f32::NAN;
                Ok(())
            })
            .unwrap();

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tti_threshold, 6.0);
        assert_eq!(snapshot.distance_diff_threshold, 0.0);
        assert_eq!(snapshot.speed_threshold, -2.2);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_failed_update_still_clamps() {
        let handle = ThresholdHandle::default();
        let result = handle.update(|t| {
            t.tti_threshold = -1.0;
            t.set_speed_threshold(f32::NAN)
        });

        assert_eq!(result, Err(ConfigError::NotFinite("speed_threshold")));
        assert_eq!(handle.snapshot().tti_threshold, 0.0);
    }

    #[test]
    fn test_replace_clamps() {
        let handle = ThresholdHandle::default();
        handle.replace(ThresholdConfig {
            tti_threshold: 9.0,
            rule: AlertRule::SpeedOnly,
            ..Default::default()
        });

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tti_threshold, 6.0);
        assert_eq!(snapshot.rule, AlertRule::SpeedOnly);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = ThresholdHandle::default();
        let surface = handle.clone();

        std::thread::spawn(move || {
            surface.update(|t| t.set_tti_threshold(1.0)).unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(handle.snapshot().tti_threshold, 1.0);
    }
}
