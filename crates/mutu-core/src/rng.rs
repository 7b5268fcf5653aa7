//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seeded `StdRng`. In tests a scripted
//! implementation is injected so shuffles are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Creates an RNG with a fixed seed; identical seeds give identical streams.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }
}

/// Shuffles `items` in place with Fisher–Yates, drawing from `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = rng.next_u32_range(0, upper) as usize;
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SeededRng::from_seed(42);
        let mut b = SeededRng::from_seed(42);

        let left: Vec<u32> = (0..16).map(|_| a.next_u32_range(0, 100)).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32_range(0, 100)).collect();

        assert_eq!(left, right);
        assert!(left.iter().all(|v| *v <= 100));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SeededRng::from_seed(7);
        let mut items: Vec<u32> = (0..20).collect();

        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let mut first: Vec<u32> = (0..10).collect();
        let mut second: Vec<u32> = (0..10).collect();

        shuffle(&mut first, &mut SeededRng::from_seed(99));
        shuffle(&mut second, &mut SeededRng::from_seed(99));

        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_handles_empty_and_single() {
        let mut rng = SeededRng::from_seed(1);
        let mut empty: Vec<u32> = Vec::new();
        let mut single = vec![5];

        shuffle(&mut empty, &mut rng);
        shuffle(&mut single, &mut rng);

        assert!(empty.is_empty());
        assert_eq!(single, vec![5]);
    }
}
