// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable random sources for picking a reply index.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Picks an index in `0..len`.
///
/// Callers always pass `len >= 1`. Implementations must be safe to share
/// across threads since one selector serves every request.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draws from the thread-local RNG. Used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always returns the same index, clamped to the last valid one.
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Cycles through a fixed list of indices, each clamped to `0..len`.
#[derive(Debug)]
pub struct Sequence {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl Sequence {
    /// Create a sequence source. An empty list behaves like `FixedIndex(0)`.
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for Sequence {
    fn pick(&self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.indices[n % self.indices.len()].min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.pick(len) < len);
            }
        }
    }

    #[test]
    fn fixed_index_clamps() {
        assert_eq!(FixedIndex(0).pick(3), 0);
        assert_eq!(FixedIndex(2).pick(3), 2);
        assert_eq!(FixedIndex(7).pick(3), 2);
    }

    #[test]
    fn sequence_cycles_and_clamps() {
        let seq = Sequence::new(vec![1, 0, 9]);
        assert_eq!(seq.pick(3), 1);
        assert_eq!(seq.pick(3), 0);
        assert_eq!(seq.pick(3), 2);
        assert_eq!(seq.pick(3), 1);
    }

    #[test]
    fn empty_sequence_returns_zero() {
        assert_eq!(Sequence::new(vec![]).pick(4), 0);
    }
}
