//! Per-tick pipeline orchestration

use alerting::{AlertPolicy, AlertState, AlertTransition, AlertTrigger, ThresholdConfig};
use depth_capture::{central_region, DepthFrame};
use kinematics::KinematicsEstimator;
use ring_buffer::SlidingWindow;
use threat_estimator::{RobustDistanceEstimator, ThreatSample};
use tracing::{debug, info, warn};

use crate::{MetricsSnapshot, PipelineConfig, ProximityError, ThresholdHandle};

/// Result of one `on_frame` call
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Not a sampling tick; nothing was touched
    Skipped,

    /// Session paused; nothing was touched
    Paused,

    /// Sample buffered, window not yet full
    InsufficientHistory { buffered: usize },

    /// Metrics and alert decision for this tick
    Computed {
        metrics: MetricsSnapshot,
        alert_state: AlertState,
        transition: Option<AlertTransition>,
    },
}

/// Frame and tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames handed to `on_frame`
    pub frames_seen: u64,
    /// Sampling ticks that produced a sample
    pub ticks_processed: u64,
    /// Sampling ticks dropped on error
    pub ticks_failed: u64,
    /// `Raised` transitions emitted by the trigger
    pub alerts_raised: u64,
}

/// Obstacle proximity pipeline.
///
/// Owns the sample window, alert trigger and threshold handle. Driven
/// synchronously by the frame source, one `on_frame` call per captured
/// frame; the depth buffer is only borrowed for the duration of the call.
pub struct ProximityPipeline {
    config: PipelineConfig,
    estimator: RobustDistanceEstimator,
    kinematics: KinematicsEstimator,
    window: SlidingWindow<ThreatSample>,
    thresholds: ThresholdHandle,
    trigger: AlertTrigger,
    last_snapshot: Option<MetricsSnapshot>,
    running: bool,
    stats: PipelineStats,
}

impl ProximityPipeline {
    /// Create a new pipeline with configuration
    pub fn new(config: PipelineConfig) -> Result<Self, ProximityError> {
        let thresholds = ThresholdHandle::new(config.thresholds.clone());
        Self::with_thresholds(config, thresholds)
    }

    /// Create a pipeline reading thresholds from an existing handle
    pub fn with_thresholds(
        config: PipelineConfig,
        thresholds: ThresholdHandle,
    ) -> Result<Self, ProximityError> {
        config.validate()?;

        info!(
            "Creating proximity pipeline: every {} frames, {:.3}s per frame",
            config.sample_every, config.frame_period_s
        );

        Ok(Self {
            estimator: RobustDistanceEstimator::new(config.estimator.clone()),
            kinematics: KinematicsEstimator::new(config.frame_period_s)?,
            window: SlidingWindow::with_default_capacity(),
            trigger: AlertTrigger::new(config.trigger_mode),
            thresholds,
            last_snapshot: None,
            running: true,
            stats: PipelineStats::default(),
            config,
        })
    }

    /// Process one captured frame.
    ///
    /// Only every `sample_every`-th tick index is processed. A failed tick
    /// leaves the window and last snapshot untouched.
    pub fn on_frame(
        &mut self,
        width: u32,
        height: u32,
        depth: &[f32],
        tick_index: u64,
    ) -> Result<TickOutcome, ProximityError> {
        self.stats.frames_seen += 1;

        if !self.running {
            return Ok(TickOutcome::Paused);
        }
        if tick_index % self.config.sample_every != 0 {
            return Ok(TickOutcome::Skipped);
        }

        match self.process(width, height, depth, tick_index) {
            Ok(outcome) => {
                self.stats.ticks_processed += 1;
                Ok(outcome)
            }
            Err(e) => {
                self.stats.ticks_failed += 1;
                warn!("Tick {} skipped: {}", tick_index, e);
                Err(e)
            }
        }
    }

    fn process(
        &mut self,
        width: u32,
        height: u32,
        depth: &[f32],
        tick_index: u64,
    ) -> Result<TickOutcome, ProximityError> {
        let thresholds = self.thresholds.snapshot();

        let frame = DepthFrame::new(width, height, depth)?;
        let region = central_region(width, height)?;

        if let Some(last) = self.window.latest() {
            if tick_index <= last.tick {
                return Err(ProximityError::NonMonotonicTick {
                    tick: tick_index,
                    last: last.tick,
                });
            }
        }

        let sample = self.estimator.estimate(&frame, &region, tick_index)?;

        let Some((previous, current)) = self.window.append(sample) else {
            debug!(tick = tick_index, buffered = self.window.len(), "window filling");
            return Ok(TickOutcome::InsufficientHistory {
                buffered: self.window.len(),
            });
        };

        let kinematics = self.kinematics.estimate(&previous, &current)?;
        let alert_state = AlertPolicy::evaluate(&kinematics, &thresholds);
        let transition = self
            .trigger
            .observe(tick_index, alert_state, current.distance, &kinematics);

        if matches!(transition, Some(AlertTransition::Raised { .. })) {
            self.stats.alerts_raised += 1;
        }

        let metrics = MetricsSnapshot::new(&previous, &current, &kinematics, alert_state);
        self.last_snapshot = Some(metrics.clone());

        Ok(TickOutcome::Computed {
            metrics,
            alert_state,
            transition,
        })
    }

    /// Stop processing frames
    pub fn pause(&mut self) {
        if self.running {
            info!("Proximity session paused");
        }
        self.running = false;
    }

    /// Resume processing with an empty window.
    /// Samples from before the pause would span the gap.
    pub fn resume(&mut self) {
        if !self.running {
            info!("Proximity session resumed");
            self.window.clear();
            self.trigger.reset();
        }
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Metrics of the latest computed tick
    pub fn last_snapshot(&self) -> Option<&MetricsSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Handle for the threshold configuration surface
    pub fn thresholds(&self) -> ThresholdHandle {
        self.thresholds.clone()
    }

    /// Replace the thresholds (same-thread configuration surface)
    pub fn set_thresholds(&self, thresholds: ThresholdConfig) {
        self.thresholds.replace(thresholds);
    }

    /// Number of buffered samples
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Buffered threat samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &ThreatSample> {
        self.window.iter()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
