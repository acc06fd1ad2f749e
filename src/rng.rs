//! Deterministic RNG based on splitmix64. One stream per run, draw order matters.

use std::time::{SystemTime, UNIX_EPOCH};

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Seed taken from the wall clock, whole seconds since the epoch.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Source of uniform floats in [0, 1).
pub trait RandomSource {
    fn uniform(&mut self) -> f64;
}

/// Simple sequential RNG driving every draw of a scene.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        // 53 mantissa bits
        (self.next_u64() >> 11) as f64 / 9007199254740992.0
    }
}

impl RandomSource for Rng {
    fn uniform(&mut self) -> f64 {
        self.next_f64()
    }
}

/// Closed interval sampled uniformly: `min + u * (max - min)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomRange {
    pub min: f64,
    pub max: f64,
}

impl RandomRange {
    /// Symmetric jitter factor.
    pub const UNIT: RandomRange = RandomRange::new(-1.0, 1.0);
    /// +-20% scale factor used throughout tree generation.
    pub const WOBBLE: RandomRange = RandomRange::new(0.8, 1.2);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample(&self, rng: &mut impl RandomSource) -> f64 {
        self.min + rng.uniform() * (self.max - self.min)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of uniforms, cycling when exhausted.
    pub(crate) struct Scripted {
        values: Vec<f64>,
        pos: usize,
    }

    impl Scripted {
        pub(crate) fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                pos: 0,
            }
        }

        pub(crate) fn constant(v: f64) -> Self {
            Self::new(&[v])
        }

        pub(crate) fn draws(&self) -> usize {
            self.pos
        }
    }

    impl RandomSource for Scripted {
        fn uniform(&mut self) -> f64 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Rng::new(1234);
        let mut b = Rng::new(1234);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn range_maps_endpoints() {
        let r = RandomRange::new(-1.0, 1.0);
        assert_eq!(r.sample(&mut Scripted::constant(0.0)), -1.0);
        assert_eq!(r.sample(&mut Scripted::constant(0.5)), 0.0);
        assert_eq!(r.sample(&mut Scripted::constant(0.75)), 0.5);
    }

    #[test]
    fn degenerate_range_is_constant() {
        let r = RandomRange::new(3.5, 3.5);
        let mut rng = Rng::new(99);
        for _ in 0..100 {
            assert_eq!(r.sample(&mut rng), 3.5);
        }
    }
}
