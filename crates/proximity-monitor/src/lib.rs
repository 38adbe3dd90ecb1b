//! Obstacle Proximity Monitor
//!
//! Host process for the proximity pipeline: pulls frames from a depth
//! source, counts ticks, and forwards alert transitions to an actuator
//! task so a slow output never stalls the frame loop.

pub mod actuator;
pub mod settings;
pub mod source;

pub use settings::{Settings, SourceSettings};
pub use source::{DepthBuffer, FrameSource, ReplaySource, SimulatedSource};

use std::time::Duration;

use proximity::{ProximityError, ProximityPipeline, TickOutcome};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::actuator::run_actuator;

/// Pending transitions the actuator may lag behind by
const ALERT_QUEUE_DEPTH: usize = 16;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] ProximityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Actuator task failed: {0}")]
    Task(String),
}

/// Totals of one monitor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub computed_ticks: u64,
    pub failed_ticks: u64,
    /// Alerts raised by the pipeline
    pub alerts_raised: u64,
    /// Alerts the actuator received; lower than `alerts_raised` when the
    /// queue overflowed
    pub alerts_delivered: usize,
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> Result<(), MonitorError> {
    let level: Level = level
        .parse()
        .map_err(|_| MonitorError::Logging(format!("unknown log level '{}'", level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MonitorError::Logging(e.to_string()))
}

fn open_source(settings: &Settings) -> Result<Box<dyn FrameSource + Send>, MonitorError> {
    match &settings.source {
        SourceSettings::Simulated {
            start_distance_m,
            min_distance_m,
            approach_speed_mps,
            hole_ratio,
        } => Ok(Box::new(SimulatedSource::new(
            &settings.sensor,
            *start_distance_m,
            *min_distance_m,
            *approach_speed_mps,
            *hole_ratio,
        )?)),
        SourceSettings::Replay { path } => Ok(Box::new(ReplaySource::open(path)?)),
    }
}

/// Run the monitor until the source is exhausted or `max_frames` is hit
pub async fn run(settings: &Settings) -> Result<RunSummary, MonitorError> {
    let mut pipeline = ProximityPipeline::new(settings.pipeline_config())?;
    let frame_period = Duration::from_secs_f32(pipeline.config().frame_period_s);
    let mut source = open_source(settings)?;

    let (tx, rx) = mpsc::channel(ALERT_QUEUE_DEPTH);
    let actuator = tokio::spawn(run_actuator(rx));

    let mut pacer = settings
        .realtime()
        .then(|| tokio::time::interval(frame_period));

    let mut summary = RunSummary::default();
    // Tick indices start at 1
    let mut tick: u64 = 0;

    info!(
        "Monitoring: sampling every {} frames, {:?} per frame",
        pipeline.config().sample_every,
        frame_period
    );

    loop {
        if settings.max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }
        if let Some(pacer) = pacer.as_mut() {
            pacer.tick().await;
        }

        let Some(frame) = source.next_frame()? else {
            break;
        };
        tick += 1;
        summary.frames += 1;

        match pipeline.on_frame(frame.width, frame.height, &frame.depth, tick) {
            Ok(TickOutcome::Computed {
                metrics,
                transition,
                ..
            }) => {
                summary.computed_ticks += 1;
                debug!(
                    tick,
                    distance_m = metrics.current_distance,
                    difference_m = metrics.difference,
                    speed = metrics.speed,
                    tti_s = metrics.tti_s(),
                    lateral = ?metrics.lateral,
                    alert = metrics.alert_state.is_alert(),
                    "metrics"
                );

                if let Some(transition) = transition {
                    if let Err(e) = tx.try_send(transition) {
                        warn!("Alert transition dropped at tick {}: {}", tick, e);
                    }
                }
            }
            Ok(_) => {}
            // Already logged by the pipeline; the next sampling tick retries
            Err(_) => summary.failed_ticks += 1,
        }
    }

    drop(tx);
    summary.alerts_raised = pipeline.stats().alerts_raised;
    summary.alerts_delivered = actuator
        .await
        .map_err(|e| MonitorError::Task(e.to_string()))?;

    info!(
        "Monitor stopped: {} frames, {} computed ticks, {} failed, {} alerts ({} delivered)",
        summary.frames,
        summary.computed_ticks,
        summary.failed_ticks,
        summary.alerts_raised,
        summary.alerts_delivered
    );

    Ok(summary)
}
