//! Random matrix contents.
//!
//! Fill helpers used by tests and benchmarks to populate a store with
//! random data through the scalar write path.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::scalar::Element;
use crate::store::PolyMem;

/// Trait for element types that can be sampled from a uniform distribution.
pub trait RandomUniform: Element {
    /// Sample a random value; `[0, 1)` for floats, full range for integers.
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

macro_rules! impl_random_uniform {
    ($($t:ty),*) => {
        $(
            impl RandomUniform for $t {
                fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
                    rng.sample(StandardUniform)
                }
            }
        )*
    };
}

impl_random_uniform!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

/// Trait for element types that can be sampled from a standard normal
/// distribution.
pub trait RandomNormal: Element {
    /// Sample a random value from N(0, 1).
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for f32 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl<ElT: RandomUniform> PolyMem<ElT> {
    /// Fill the whole matrix with uniform random values.
    pub fn fill_uniform<R: Rng>(&mut self, rng: &mut R) {
        let (rows, cols) = (self.geometry().rows(), self.geometry().cols());
        for i in 0..rows {
            for j in 0..cols {
                let v = ElT::sample_uniform(rng);
                self.put(i, j, v);
            }
        }
    }
}

impl<ElT: RandomNormal> PolyMem<ElT> {
    /// Fill the whole matrix with standard normal random values.
    pub fn fill_normal<R: Rng>(&mut self, rng: &mut R) {
        let (rows, cols) = (self.geometry().rows(), self.geometry().cols());
        for i in 0..rows {
            for j in 0..cols {
                let v = ElT::sample_normal(rng);
                self.put(i, j, v);
            }
        }
    }
}
