/// A small seeded pseudo random number generator is represented here.
///
/// The sequencer only ever needs coin flips and probability checks, so a tiny PCG is plenty.
#[derive(Debug, Clone)]
pub struct Rng(oorandom::Rand32);

impl Rng {
    /// `Rng::new(s)` is a new random number generator seeded with `s`
    ///
    /// The same seed always produces the same sequence.
    pub fn new(seed: u64) -> Self {
        Self(oorandom::Rand32::new(seed))
    }

    /// `rng.bit()` is a uniformly random bit
    pub fn bit(&mut self) -> bool {
        self.0.rand_u32() & 1 == 1
    }

    /// `rng.chance(p)` is true with probability `p`, where `p` is in `[0.0, 1.0]`
    pub fn chance(&mut self, probability: f32) -> bool {
        self.0.rand_float() < probability
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Seed used when the firmware has no better entropy source, such as floating ADC noise
pub const DEFAULT_SEED: u64 = 0x4d6f_6431;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bits() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);

        for _ in 0..64 {
            assert_eq!(a.bit(), b.bit());
        }
    }

    #[test]
    fn bits_are_not_stuck() {
        let mut rng = Rng::default();
        let num_ones = (0..1_000).filter(|_| rng.bit()).count();

        assert!(350 < num_ones && num_ones < 650);
    }

    #[test]
    fn zero_chance_never_happens() {
        let mut rng = Rng::default();
        assert!((0..1_000).all(|_| !rng.chance(0.0)));
    }

    #[test]
    fn certain_chance_always_happens() {
        let mut rng = Rng::default();
        assert!((0..1_000).all(|_| rng.chance(1.0)));
    }
}
