//! Monitor settings
//!
//! Loaded from an optional `proximity.toml` (path override via
//! `PROXIMITY_CONFIG`) layered under `PROXIMITY__SECTION__KEY`
//! environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use depth_capture::DepthSensorConfig;
use proximity::PipelineConfig;
use serde::{Deserialize, Serialize};

use crate::MonitorError;

/// Where depth frames come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSettings {
    /// Synthetic wall moving toward the sensor and back
    Simulated {
        /// Farthest wall distance (meters)
        start_distance_m: f32,
        /// Closest wall distance before it recedes (meters)
        min_distance_m: f32,
        /// Wall speed (m/s)
        approach_speed_mps: f32,
        /// Share of pixels replaced by NaN holes (0.0 - 1.0)
        hole_ratio: f32,
    },
    /// JSON-lines recording of `{width, height, depth}` frames
    Replay { path: PathBuf },
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings::Simulated {
            start_distance_m: 6.0,
            min_distance_m: 0.3,
            approach_speed_mps: 2.5,
            hole_ratio: 0.05,
        }
    }
}

/// Complete monitor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Depth sensor resolution and rate
    pub sensor: DepthSensorConfig,

    /// Pipeline tuning; `frame_period_s` is derived from `sensor.fps`
    pub pipeline: PipelineConfig,

    /// Frame source
    pub source: SourceSettings,

    /// Pace frames at the sensor rate instead of as fast as possible
    pub realtime: Option<bool>,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, MonitorError> {
        let path = std::env::var("PROXIMITY_CONFIG").unwrap_or_else(|_| "proximity".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("PROXIMITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }

    /// Pipeline config with the frame period taken from the sensor rate
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            frame_period_s: self.sensor.frame_period_s(),
            ..self.pipeline.clone()
        }
    }

    pub fn realtime(&self) -> bool {
        self.realtime.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.realtime());
        assert_eq!(settings.log_level(), "info");
        assert!(matches!(settings.source, SourceSettings::Simulated { .. }));
    }

    #[test]
    fn test_frame_period_follows_sensor() {
        let settings = from_toml(
            r#"
            [sensor]
            width = 64
            height = 48
            fps = 30
            "#,
        );
        let pipeline = settings.pipeline_config();
        assert!((pipeline.frame_period_s - 1.0 / 30.0).abs() < 1e-6);
        assert_eq!(pipeline.sample_every, 10);
    }

    #[test]
    fn test_thresholds_and_replay_source() {
        let settings = from_toml(
            r#"
            max_frames = 500

            [pipeline]
            sample_every = 5
            trigger_mode = "level"

            [pipeline.thresholds]
            speed_threshold = -1.5
            rule = "speed_only"

            [source]
            kind = "replay"
            path = "session.jsonl"
            "#,
        );

        assert_eq!(settings.max_frames, Some(500));
        assert_eq!(settings.pipeline.sample_every, 5);
        assert_eq!(settings.pipeline.trigger_mode, proximity::TriggerMode::Level);
        assert_eq!(settings.pipeline.thresholds.speed_threshold, -1.5);
        assert_eq!(settings.pipeline.thresholds.tti_threshold, 3.0);
        assert_eq!(settings.pipeline.thresholds.rule, proximity::AlertRule::SpeedOnly);
        assert!(matches!(
            settings.source,
            SourceSettings::Replay { ref path } if path == &PathBuf::from("session.jsonl")
        ));
    }
}
