//! Borrowed depth frame view

use ndarray::{s, ArrayView2};
use tracing::trace;

use crate::{FrameError, Region};

/// Read-only depth map borrowed from the frame source for one tick.
///
/// Readings are distances to the camera in meters, row-major. Invalid
/// pixels may hold non-finite sentinels; they are kept as-is.
#[derive(Debug, Clone, Copy)]
pub struct DepthFrame<'a> {
    view: ArrayView2<'a, f32>,
}

impl<'a> DepthFrame<'a> {
    /// Wrap a raw depth buffer, checking its length against the dimensions
    pub fn new(width: u32, height: u32, depth: &'a [f32]) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize;
        if depth.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: depth.len(),
            });
        }
        if expected == 0 {
            return Err(FrameError::InvalidFrame { width, height });
        }

        let view = ArrayView2::from_shape((height as usize, width as usize), depth).map_err(|_| {
            FrameError::LengthMismatch {
                expected,
                actual: depth.len(),
            }
        })?;

        trace!(width, height, "depth frame borrowed");
        Ok(Self { view })
    }

    /// Frame width
    pub fn width(&self) -> u32 {
        self.view.ncols() as u32
    }

    /// Frame height
    pub fn height(&self) -> u32 {
        self.view.nrows() as u32
    }

    /// Get depth at (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.view.get((y as usize, x as usize)).copied()
    }

    /// Borrow the sub-grid covered by `region`, rows indexed by y
    pub fn region_view(&self, region: &Region) -> Result<ArrayView2<'a, f32>, FrameError> {
        if region.x0 >= region.x1
            || region.y0 >= region.y1
            || region.x1 > self.width()
            || region.y1 > self.height()
        {
            return Err(FrameError::InvalidFrame {
                width: self.width(),
                height: self.height(),
            });
        }

        let (x0, x1) = (region.x0 as usize, region.x1 as usize);
        let (y0, y1) = (region.y0 as usize, region.y1 as usize);
        Ok(self.view.slice_move(s![y0..y1, x0..x1]))
    }

    /// Collect finite readings inside `region` as (x, y, depth)
    pub fn finite_samples(&self, region: &Region) -> Result<Vec<(u32, u32, f32)>, FrameError> {
        let sub = self.region_view(region)?;
        Ok(sub
            .indexed_iter()
            .filter(|(_, depth)| depth.is_finite())
            .map(|((row, col), &depth)| (region.x0 + col as u32, region.y0 + row as u32, depth))
            .collect())
    }

    /// Count non-finite readings in the whole frame
    pub fn invalid_count(&self) -> usize {
        self.view.iter().filter(|d| !d.is_finite()).count()
    }
}
