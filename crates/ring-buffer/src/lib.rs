//! Sliding Sample Window
//!
//! Provides a fixed-capacity FIFO that pairs each new sample with the one
//! it evicts, giving a constant look-back horizon for rate estimation.

mod buffer;

pub use buffer::{SlidingWindow, DEFAULT_CAPACITY};

use thiserror::Error;

/// Window error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window capacity must be at least 1")]
    ZeroCapacity,
}
