//! Robust nearest-distance estimator

use depth_capture::{DepthFrame, Region};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{EstimatorError, ThreatSample};

/// Estimator tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Sorted index `n / quantile_divisor` picks the reference depth (4 = low quartile)
    pub quantile_divisor: usize,
    /// Close band width as a fraction of the reference depth
    pub band_fraction: f32,
    /// Upper bound on the close band width (meters)
    pub band_cap_m: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            quantile_divisor: 4,
            band_fraction: 0.1,
            band_cap_m: 0.5,
        }
    }
}

impl EstimatorConfig {
    /// Upper edge of the close band above reference depth `d`.
    /// Farther readings are noisier, so the band widens with distance up to the cap.
    pub fn band_threshold(&self, d: f32) -> f32 {
        d + self.band_cap_m.min(self.band_fraction * d)
    }

    /// Reference index into `n` sorted readings, always below `n`
    fn quantile_index(&self, n: usize) -> usize {
        (n / self.quantile_divisor.max(1)).min(n.saturating_sub(1))
    }
}

/// Quartile-band threat distance estimator
#[derive(Debug, Clone, Default)]
pub struct RobustDistanceEstimator {
    config: EstimatorConfig,
}

impl RobustDistanceEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the threat distance inside `region` of `frame`
    pub fn estimate(
        &self,
        frame: &DepthFrame<'_>,
        region: &Region,
        tick: u64,
    ) -> Result<ThreatSample, EstimatorError> {
        let mut samples = frame.finite_samples(region)?;
        if samples.is_empty() {
            return Err(EstimatorError::NoValidSamples);
        }

        samples.sort_by(|a, b| a.2.total_cmp(&b.2));

        let q = self.config.quantile_index(samples.len());
        let (ax, ay, d) = samples[q];
        let threshold = self.config.band_threshold(d);
        let distance = close_mean(samples.iter().map(|s| s.2), threshold)?;

        debug!(
            tick,
            valid = samples.len(),
            region_area = region.area(),
            frame_holes = frame.invalid_count(),
            reference_m = d,
            threshold_m = threshold,
            distance_m = distance,
            "threat distance estimated"
        );

        Ok(ThreatSample::new(distance, tick, (ax, ay)))
    }

    /// Threat distance over a plain list of readings (non-finite values ignored)
    pub fn distance(&self, values: &[f32]) -> Result<f32, EstimatorError> {
        let mut finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(EstimatorError::NoValidSamples);
        }

        finite.sort_by(f32::total_cmp);

        let d = finite[self.config.quantile_index(finite.len())];
        close_mean(finite.iter().copied(), self.config.band_threshold(d))
    }
}

/// Threat distance over `values` with the default tuning
pub fn threat_distance(values: &[f32]) -> Result<f32, EstimatorError> {
    RobustDistanceEstimator::default().distance(values)
}

/// Mean of the ascending `sorted` values at or below `threshold`
fn close_mean(sorted: impl Iterator<Item = f32>, threshold: f32) -> Result<f32, EstimatorError> {
    let (sum, count) = sorted
        .take_while(|&v| v <= threshold)
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v as f64, count + 1));

    if count == 0 {
        return Err(EstimatorError::EmptyCloseSet);
    }
    Ok((sum / count as f64) as f32)
}
