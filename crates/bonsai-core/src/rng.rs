//! Deterministic linear congruential generator used by every seeded generator.
//!
//! The sequence is part of the scene contract: a given seed must always
//! yield the same scene, tree and particle field, so this generator never
//! delegates to `rand` (whose algorithms may change between releases).

const LCG_A: u32 = 1_664_525;
const LCG_C: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance one step and return a value in `[0, 1)`.
    #[inline]
    pub fn next(&mut self) -> f64 {
        self.state = LCG_A.wrapping_mul(self.state).wrapping_add(LCG_C);
        self.state as f64 / TWO_POW_32
    }

    /// `min + (max - min) * next()`, computed in double precision.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next();
        (min as f64 + (max as f64 - min as f64) * t) as f32
    }

    /// Draw used for boolean decisions: `next() > threshold`.
    #[inline]
    pub fn chance_above(&mut self, threshold: f64) -> bool {
        self.next() > threshold
    }
}
