//! Depth Capture Types for Proximity Sensing
//!
//! Provides the read-only view a frame source hands to the pipeline:
//! - Bounds-checked borrowed depth frames (meters, row-major)
//! - Central region extraction (middle cell of a 3x3 grid)
//! - Sensor configuration (resolution and capture rate)

pub mod frame;
pub mod region;

pub use frame::DepthFrame;
pub use region::{central_region, Region};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Invalid frame: {width}x{height} is too small for region extraction")]
    InvalidFrame { width: u32, height: u32 },

    #[error("Depth buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Depth sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthSensorConfig {
    /// Depth map width (pixels)
    pub width: u32,
    /// Depth map height (pixels)
    pub height: u32,
    /// Capture rate (frames per second)
    pub fps: u32,
}

impl Default for DepthSensorConfig {
    fn default() -> Self {
        // Typical LiDAR scene depth resolution
        Self {
            width: 256,
            height: 192,
            fps: 60,
        }
    }
}

impl DepthSensorConfig {
    /// Seconds between two captured frames
    pub fn frame_period_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Number of depth readings in one frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_period() {
        let config = DepthSensorConfig {
            fps: 20,
            ..Default::default()
        };
        assert!((config.frame_period_s() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let config = DepthSensorConfig {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_period_s(), 1.0);
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(DepthSensorConfig::default().pixel_count(), 256 * 192);
    }
}
