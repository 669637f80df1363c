//! Random draws used for the diversity settings profile and for shuffling.
//!
//! Everything derives from a single primitive, a uniform integer in `[min, max)`,
//! so a scripted source in tests pins every derived value exactly.

use std::sync::Mutex;

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};

/// A source of uniform integer draws over a half-open range.
///
/// Implementations must be safe to share between concurrent requests.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[min, max)`. Returns `min` when the range is empty.
    fn int_in(&self, min: i64, max: i64) -> i64;

    /// Uniform float in `[min, max)` with two-decimal granularity:
    /// an integer draw over `[min·100, max·100)` divided by 100.
    fn float_in(&self, min: f32, max: f32) -> f32 {
        let lo = (min * 100.0).round() as i64;
        let hi = (max * 100.0).round() as i64;
        self.int_in(lo, hi) as f32 / 100.0
    }

    fn maybe_float_in(&self, min: f32, max: f32) -> Option<f32> {
        Some(self.float_in(min, max))
    }

    fn maybe_int_in(&self, min: u32, max: u32) -> Option<u32> {
        Some(self.int_in(i64::from(min), i64::from(max)) as u32)
    }
}

/// Draws from the operating system CSPRNG. Stateless, so sharing needs no lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn int_in(&self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        OsRng.gen_range(min..max)
    }
}

/// Reproducible source for replaying a run from a known seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        // A poisoned lock still holds a valid generator state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(min..max)
    }
}

/// Test source that replays queued draws, clamped into the requested range.
#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::RandomSource;

    pub struct ScriptedRandom {
        draws: Mutex<VecDeque<i64>>,
        requested: Mutex<Vec<(i64, i64)>>,
    }

    impl ScriptedRandom {
        pub fn new(draws: &[i64]) -> Self {
            Self {
                draws: Mutex::new(draws.iter().copied().collect()),
                requested: Mutex::new(Vec::new()),
            }
        }

        /// The `(min, max)` ranges requested so far, in order.
        pub fn requested(&self) -> Vec<(i64, i64)> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl RandomSource for ScriptedRandom {
        fn int_in(&self, min: i64, max: i64) -> i64 {
            self.requested.lock().unwrap().push((min, max));
            let next = self.draws.lock().unwrap().pop_front().unwrap_or(min);
            if max <= min {
                return min;
            }
            next.clamp(min, max - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedRandom;
    use super::*;

    #[test]
    fn test_os_random_stays_in_half_open_range() {
        for _ in 0..1000 {
            let n = OsRandom.int_in(1, 10);
            assert!((1..10).contains(&n), "draw {n} outside [1, 10)");
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        assert_eq!(OsRandom.int_in(5, 5), 5);
        assert_eq!(OsRandom.int_in(7, 3), 7);
        assert_eq!(SeededRandom::new(1).int_in(4, 4), 4);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let draws_a: Vec<i64> = (0..20).map(|_| a.int_in(0, 1000)).collect();
        let draws_b: Vec<i64> = (0..20).map(|_| b.int_in(0, 1000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_float_in_uses_hundredths() {
        let rng = ScriptedRandom::new(&[42]);
        let value = rng.float_in(0.3, 0.9);
        assert_eq!(rng.requested(), vec![(30, 90)]);
        assert!((value - 0.42).abs() < f32::EPSILON);
    }

    #[test]
    fn test_float_in_range_bounds_for_awkward_decimals() {
        let rng = ScriptedRandom::new(&[0]);
        rng.float_in(0.2, 0.85);
        assert_eq!(rng.requested(), vec![(20, 85)]);
    }

    #[test]
    fn test_float_in_never_reaches_upper_bound() {
        for _ in 0..1000 {
            let value = OsRandom.float_in(0.3, 0.9);
            assert!((0.3..0.9).contains(&value), "draw {value} outside [0.3, 0.9)");
        }
    }

    #[test]
    fn test_maybe_helpers_wrap_draws() {
        let rng = ScriptedRandom::new(&[200, 55]);
        assert_eq!(rng.maybe_int_in(175, 275), Some(200));
        assert_eq!(rng.maybe_float_in(0.1, 0.8), Some(0.55));
    }

    #[test]
    fn test_os_random_usable_across_threads() {
        let rng = std::sync::Arc::new(OsRandom);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rng = rng.clone();
                std::thread::spawn(move || (0..100).all(|_| (0..3).contains(&rng.int_in(0, 3))))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
