//! Deterministic pseudo-random jitter used by every procedural brush texture.
//!
//! The value for a given `(index, seed)` pair never changes, so redrawing an
//! unchanged stroke reproduces the exact same texture.

/// Knuth's multiplicative hash constant.
const INDEX_MULTIPLIER: u64 = 2_654_435_761;
const JITTER_RANGE: u64 = 10_000;

/// Returns a value in `[0, 1)` that depends only on `index` and `seed`.
pub fn jitter(index: usize, seed: u64) -> f32 {
    let mut h = seed ^ (index as u64).wrapping_mul(INDEX_MULTIPLIER);
    // murmur3 finalizer
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    ((h & 0x7FFF_FFFF_FFFF_FFFF) % JITTER_RANGE) as f32 / JITTER_RANGE as f32
}

/// A seeded jitter stream. Channels derived from one source are uncorrelated,
/// which keeps separate texture passes of the same stroke from lining up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterSource {
    seed: u64,
}

impl JitterSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Value in `[0, 1)`.
    pub fn sample(&self, index: usize) -> f32 {
        jitter(index, self.seed)
    }

    /// Value in `[-1, 1)`.
    pub fn signed(&self, index: usize) -> f32 {
        self.sample(index) * 2.0 - 1.0
    }

    pub fn channel(&self, channel: u64) -> Self {
        Self {
            seed: self.seed ^ channel.wrapping_mul(0x9e37_79b9_7f4a_7c15).rotate_left(17),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_is_deterministic() {
        for seed in [0u64, 1, 42, u64::MAX, 0xdead_beef] {
            for index in 0..500 {
                assert_eq!(jitter(index, seed), jitter(index, seed));
            }
        }
    }

    #[test]
    fn test_jitter_range() {
        for index in 0..10_000 {
            let v = jitter(index, 7);
            assert!((0.0..1.0).contains(&v), "jitter out of range: {v}");
        }
    }

    #[test]
    fn test_jitter_is_roughly_uniform() {
        let mut buckets = [0usize; 10];
        let samples = 20_000;
        for index in 0..samples {
            let v = jitter(index, 0x1234_5678);
            buckets[(v * 10.0) as usize] += 1;
        }
        let expected = samples / 10;
        for (i, count) in buckets.iter().enumerate() {
            let deviation = (*count as f32 - expected as f32).abs() / expected as f32;
            assert!(deviation < 0.1, "bucket {i} has {count} samples");
        }
    }

    #[test]
    fn test_channels_differ() {
        let source = JitterSource::new(99);
        let a = source.channel(1);
        let b = source.channel(2);
        let same = (0..100).filter(|&i| a.sample(i) == b.sample(i)).count();
        assert!(same < 5);
        assert_eq!(a, source.channel(1));
    }

    #[test]
    fn test_signed_range() {
        let source = JitterSource::new(3);
        for i in 0..1000 {
            let v = source.signed(i);
            assert!((-1.0..1.0).contains(&v));
        }
    }
}
