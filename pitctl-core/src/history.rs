//! Fixed-Capacity Sample History
//!
//! ## Overview
//!
//! Keeps the most recent temperature samples in arrival order so the trend
//! estimator has a sliding window to work from. The window has a fixed
//! capacity chosen at construction; once full, every push evicts the oldest
//! sample (FIFO), so the window always holds the last `capacity` readings.
//!
//! ## Design Rationale
//!
//! The storage is a `heapless::Vec` with a runtime capacity on top of a
//! fixed backing array:
//!
//! - No heap allocation, deterministic memory use on embedded targets
//! - Samples stay contiguous, so consumers get a plain `&[f32]` in
//!   oldest-to-newest order with no iterator gymnastics
//! - Eviction is an O(len) front removal; at control-loop rates (one sample
//!   every few seconds, at most a few hundred samples) this is noise
//!
//! Capacity is validated at construction: a window that can hold zero
//! samples is a configuration error, not something to discover at runtime.
//!
//! ## Usage
//!
//! ```rust
//! use pitctl_core::history::SampleHistory;
//!
//! let mut history = SampleHistory::new(3).unwrap();
//! history.push(101.0);
//! history.push(102.0);
//! history.push(103.0);
//! history.push(104.0); // evicts 101.0
//!
//! assert_eq!(history.values(), &[102.0, 103.0, 104.0]);
//! ```

use heapless::Vec;

use crate::constants::MAX_HISTORY;
use crate::errors::{ControlError, ControlResult};

/// Insertion-ordered window of the most recent temperature samples
///
/// ## Invariants
///
/// - `len() <= capacity()` at all times
/// - `values()` is oldest-to-newest
/// - Mutated only by [`push`](Self::push); never shrinks except by eviction
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: Vec<f32, MAX_HISTORY>,
    capacity: usize,
}

impl SampleHistory {
    /// Creates an empty history holding at most `capacity` samples
    ///
    /// `capacity` must be between 1 and [`MAX_HISTORY`]; anything else is
    /// rejected with `InvalidConfiguration` before the loop can start.
    pub fn new(capacity: usize) -> ControlResult<Self> {
        if capacity == 0 || capacity > MAX_HISTORY {
            return Err(ControlError::InvalidConfiguration {
                parameter: "history_capacity",
                value: capacity as f32,
            });
        }

        Ok(Self {
            samples: Vec::new(),
            capacity,
        })
    }

    /// Appends a sample, evicting the oldest one if the window is full
    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.remove(0);
        }

        // Cannot fail: len < capacity <= MAX_HISTORY after the eviction above
        let _ = self.samples.push(sample);
    }

    /// Current contents, oldest to newest
    pub fn values(&self) -> &[f32] {
        &self.samples
    }

    /// Most recent sample, if any
    pub fn last(&self) -> Option<f32> {
        self.samples.last().copied()
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples the window holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all samples, keeping the capacity
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_history() {
        let history = SampleHistory::new(5).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.capacity(), 5);
        assert!(history.last().is_none());
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = SampleHistory::new(0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidConfiguration { .. }));
    }

    #[test]
    fn oversized_capacity_rejected() {
        let err = SampleHistory::new(MAX_HISTORY + 1).unwrap_err();
        assert!(matches!(err, ControlError::InvalidConfiguration { .. }));
    }

    #[test]
    fn push_and_retrieve() {
        let mut history = SampleHistory::new(5).unwrap();
        history.push(107.5);

        assert_eq!(history.len(), 1);
        assert_eq!(history.last(), Some(107.5));
        assert_eq!(history.values(), &[107.5]);
    }

    #[test]
    fn fifo_eviction_keeps_newest() {
        let mut history = SampleHistory::new(3).unwrap();

        for i in 0..5 {
            history.push(i as f32);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.values(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut history = SampleHistory::new(2).unwrap();
        history.push(1.0);
        history.push(2.0);
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);

        history.push(3.0);
        assert_eq!(history.values(), &[3.0]);
    }

    proptest! {
        #[test]
        fn window_is_always_the_newest_suffix(
            samples in prop::collection::vec(-100.0f32..500.0, 0..200),
            capacity in 1usize..64,
        ) {
            let mut history = SampleHistory::new(capacity).unwrap();
            for &s in &samples {
                history.push(s);
            }

            prop_assert!(history.len() <= capacity);

            let start = samples.len().saturating_sub(capacity);
            prop_assert_eq!(history.values(), &samples[start..]);
        }
    }
}
