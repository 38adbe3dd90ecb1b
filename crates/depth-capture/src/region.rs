//! Central region selection

use crate::FrameError;
use serde::{Deserialize, Serialize};

/// Sub-rectangle of a frame, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl Region {
    /// Region width (pixels)
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Region height (pixels)
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Number of samples covered
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Select the middle cell of a 3x3 grid over a `width` x `height` frame.
///
/// Bounds use floor division: `x in [w/3, 2w/3)`, `y in [h/3, 2h/3)`.
/// Frames narrower or shorter than 3 pixels have no middle cell.
pub fn central_region(width: u32, height: u32) -> Result<Region, FrameError> {
    if width < 3 || height < 3 {
        return Err(FrameError::InvalidFrame { width, height });
    }

    Ok(Region {
        x0: width / 3,
        x1: two_thirds(width),
        y0: height / 3,
        y1: two_thirds(height),
    })
}

/// `2n/3` in 64-bit so large dimensions cannot overflow
fn two_thirds(n: u32) -> u32 {
    (n as u64 * 2 / 3) as u32
}
