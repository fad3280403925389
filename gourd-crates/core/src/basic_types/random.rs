use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

use crate::gourd_assert_simple;

/// Source of randomness for the heuristics.
///
/// Implemented for every seedable generator, so tests can pass a seeded
/// [`SmallRng`](rand::rngs::SmallRng) and get reproducible runs.
pub trait Random: Debug {
    /// A bool which is true with probability `probability`, which must lie in `[0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// A float sampled uniformly from `[0, 1)`.
    fn generate_f64(&mut self) -> f64;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        gourd_assert_simple!(
            (0.0..=1.0).contains(&probability),
            "probability {probability} is not in [0, 1]"
        );
        self.gen_bool(probability)
    }

    fn generate_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}
