//! FIFO Sliding Window Implementation

use crate::WindowError;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::trace;

/// Default window capacity (one reporting cycle of 10 samples)
pub const DEFAULT_CAPACITY: usize = 10;

/// Fixed-capacity FIFO of samples in arrival order
#[derive(Debug, Clone, Serialize)]
pub struct SlidingWindow<T> {
    /// Samples, oldest at the front
    data: VecDeque<T>,
    /// Maximum number of samples held
    capacity: usize,
    /// Total samples appended (for statistics)
    total_appended: u64,
}

impl<T: Clone> SlidingWindow<T> {
    /// Create a new window with given capacity
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            total_appended: 0,
        })
    }

    /// Create a window with default capacity (10 samples)
    pub fn with_default_capacity() -> Self {
        Self {
            data: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            total_appended: 0,
        }
    }

    /// Append a sample.
    ///
    /// When the window was already full, the oldest sample is evicted and
    /// returned as `previous` alongside the new `current` sample. Below
    /// capacity nothing is evicted and `None` is returned.
    pub fn append(&mut self, sample: T) -> Option<(T, T)> {
        self.total_appended += 1;

        if self.data.len() < self.capacity {
            self.data.push_back(sample);
            trace!(len = self.data.len(), capacity = self.capacity, "window filling");
            return None;
        }

        let previous = self.data.pop_front()?;
        self.data.push_back(sample.clone());
        Some((previous, sample))
    }

    /// Get the number of samples currently held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended sample
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Iterate samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Get total samples appended (for statistics)
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    /// Drop all held samples
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Clone> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_pair_until_full() {
        let mut window = SlidingWindow::with_default_capacity();

        for i in 0..10 {
            assert_eq!(window.append(i), None);
        }

        assert!(window.is_full());
        assert_eq!(window.len(), 10);
    }

    #[test]
    fn test_eleventh_append_pairs_with_first() {
        let mut window = SlidingWindow::with_default_capacity();
        for i in 0..10 {
            window.append(i);
        }

        assert_eq!(window.append(10), Some((0, 10)));
        assert_eq!(window.append(11), Some((1, 11)));
        assert_eq!(window.len(), 10);
        assert_eq!(window.iter().next(), Some(&2));
        assert_eq!(window.latest(), Some(&11));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            SlidingWindow::<u32>::new(0).unwrap_err(),
            WindowError::ZeroCapacity
        );
    }

    #[test]
    fn test_capacity_one() {
        let mut window = SlidingWindow::new(1).unwrap();
        assert_eq!(window.append('a'), None);
        assert_eq!(window.append('b'), Some(('a', 'b')));
        assert_eq!(window.append('c'), Some(('b', 'c')));
    }

    #[test]
    fn test_clear() {
        let mut window = SlidingWindow::with_default_capacity();
        for i in 0..12 {
            window.append(i);
        }
        window.clear();

        assert!(window.is_empty());
        assert_eq!(window.total_appended(), 12);
        assert_eq!(window.append(99), None);
    }

    #[test]
    fn test_iter_oldest_first() {
        let mut window = SlidingWindow::new(3).unwrap();
        for i in 0..5 {
            window.append(i);
        }
        let held: Vec<_> = window.iter().copied().collect();
        assert_eq!(held, vec![2, 3, 4]);
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity_and_evicts_in_order(
            capacity in 1usize..32,
            count in 0usize..200,
        ) {
            let mut window = SlidingWindow::new(capacity).unwrap();
            for n in 0..count {
                let pair = window.append(n);
                prop_assert!(window.len() <= capacity);
                if n >= capacity {
                    prop_assert_eq!(pair, Some((n - capacity, n)));
                } else {
                    prop_assert_eq!(pair, None);
                }
            }
        }
    }
}
