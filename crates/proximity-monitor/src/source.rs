//! Depth frame sources
//!
//! Each source owns one reusable buffer and overwrites it on every call,
//! so the pipeline may only borrow a frame until the next one is pulled.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use depth_capture::DepthSensorConfig;
use serde::Deserialize;
use tracing::{debug, info};

use crate::MonitorError;

/// Owned depth buffer handed out by reference
#[derive(Debug, Clone, Default)]
pub struct DepthBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major depth in meters; NaN marks an invalid pixel
    pub depth: Vec<f32>,
}

/// Produces depth frames one at a time
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<&DepthBuffer>, MonitorError>;
}

/// Synthetic scene: a wall in the middle of the view that approaches
/// down to `min_distance_m`, then recedes back, repeating.
pub struct SimulatedSource {
    buffer: DepthBuffer,
    frame_period_s: f32,
    start_distance_m: f32,
    min_distance_m: f32,
    speed_mps: f32,
    /// Holes per thousand pixels
    holes_per_mille: u64,
    frame_index: u64,
}

impl SimulatedSource {
    pub fn new(
        sensor: &DepthSensorConfig,
        start_distance_m: f32,
        min_distance_m: f32,
        speed_mps: f32,
        hole_ratio: f32,
    ) -> Result<Self, MonitorError> {
        if !(speed_mps > 0.0 && start_distance_m > min_distance_m && min_distance_m >= 0.0) {
            return Err(MonitorError::Source(format!(
                "simulated wall needs speed > 0 and start > min >= 0 (speed {}, start {}, min {})",
                speed_mps, start_distance_m, min_distance_m
            )));
        }

        info!(
            "Simulated source: {}x{} @ {} fps, wall {:.1}m <-> {:.1}m at {:.1} m/s",
            sensor.width, sensor.height, sensor.fps, start_distance_m, min_distance_m, speed_mps
        );

        Ok(Self {
            buffer: DepthBuffer {
                width: sensor.width,
                height: sensor.height,
                depth: vec![0.0; sensor.pixel_count()],
            },
            frame_period_s: sensor.frame_period_s(),
            start_distance_m,
            min_distance_m,
            speed_mps,
            holes_per_mille: (hole_ratio.clamp(0.0, 1.0) * 1000.0) as u64,
            frame_index: 0,
        })
    }

    /// Wall distance at a given frame (triangle wave)
    pub fn wall_distance(&self, frame_index: u64) -> f32 {
        let t = frame_index as f32 * self.frame_period_s;
        let leg = (self.start_distance_m - self.min_distance_m) / self.speed_mps;
        let phase = t % (2.0 * leg);

        if phase < leg {
            self.start_distance_m - self.speed_mps * phase
        } else {
            self.min_distance_m + self.speed_mps * (phase - leg)
        }
    }
}

impl FrameSource for SimulatedSource {
    fn next_frame(&mut self) -> Result<Option<&DepthBuffer>, MonitorError> {
        let wall = self.wall_distance(self.frame_index);
        let background = self.start_distance_m + 2.0;
        let (w, h) = (self.buffer.width as usize, self.buffer.height as usize);

        for (i, depth) in self.buffer.depth.iter_mut().enumerate() {
            let (x, y) = (i % w, i / w);
            let hash = (i as u64)
                .wrapping_mul(2_654_435_761)
                .wrapping_add(self.frame_index.wrapping_mul(40_503))
                % 1000;

            *depth = if hash < self.holes_per_mille {
                f32::NAN
            } else if x >= w / 4 && x < 3 * w / 4 && y >= h / 4 && y < 3 * h / 4 {
                // Sensor ripple of up to 2 cm
                wall + 0.01 * ((x + y) % 3) as f32
            } else {
                background
            };
        }

        self.frame_index += 1;
        Ok(Some(&self.buffer))
    }
}

/// One line of a JSON-lines recording; `null` depth marks an invalid pixel
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    width: u32,
    height: u32,
    depth: Vec<Option<f32>>,
}

/// Replays a JSON-lines depth recording
pub struct ReplaySource {
    lines: Lines<BufReader<File>>,
    buffer: DepthBuffer,
    line_number: usize,
}

impl ReplaySource {
    pub fn open(path: &Path) -> Result<Self, MonitorError> {
        let file = File::open(path)?;
        info!("Replaying depth recording {}", path.display());
        Ok(Self {
            lines: BufReader::new(file).lines(),
            buffer: DepthBuffer::default(),
            line_number: 0,
        })
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<&DepthBuffer>, MonitorError> {
        loop {
            let Some(line) = self.lines.next() else {
                debug!("Recording exhausted after {} lines", self.line_number);
                return Ok(None);
            };
            let line = line?;
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let frame: RecordedFrame = serde_json::from_str(&line).map_err(|e| {
                MonitorError::Source(format!("line {}: {}", self.line_number, e))
            })?;

            self.buffer.width = frame.width;
            self.buffer.height = frame.height;
            self.buffer.depth.clear();
            self.buffer
                .depth
                .extend(frame.depth.into_iter().map(|d| d.unwrap_or(f32::NAN)));

            return Ok(Some(&self.buffer));
        }
    }
}
