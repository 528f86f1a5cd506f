//! # Number Generators
//!
//! Several operator parameters (crossover probability, crossover points,
//! mutation counts, truncation ratio, tournament probability) can either be a
//! fixed value or vary from one call to the next. A [`NumberGenerator`]
//! produces one value per call; [`Constant`] always yields the same value and
//! [`Uniform`] draws from an inclusive range using the engine's RNG.
//!
//! ```rust
//! use evolve::generator::{Constant, NumberGenerator, Uniform};
//! use evolve::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let fixed = Constant(0.7);
//! assert_eq!(fixed.next_value(&mut rng), 0.7);
//!
//! let points = Uniform::new(1u32, 3).unwrap();
//! let value = points.next_value(&mut rng);
//! assert!((1..=3).contains(&value));
//! ```

use std::fmt::Debug;

use rand::distributions::uniform::SampleUniform;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A source of numeric parameter values, queried once per operator call.
pub trait NumberGenerator<N>: Debug + Send + Sync {
    /// Returns the next value of the sequence.
    fn next_value(&self, rng: &mut RandomNumberGenerator) -> N;
}

/// A generator that always yields the same value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<N>(pub N);

impl<N> NumberGenerator<N> for Constant<N>
where
    N: Copy + Debug + Send + Sync,
{
    fn next_value(&self, _rng: &mut RandomNumberGenerator) -> N {
        self.0
    }
}

/// A generator that draws uniformly from the inclusive range `[low, high]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform<N> {
    low: N,
    high: N,
}

/// Numeric types that [`Uniform`] can draw from.
pub trait UniformBound: PartialOrd + Debug {
    /// Returns `true` if the bound can be sampled from, i.e. is not NaN or infinite.
    fn is_sampleable(&self) -> bool;

    /// Returns `true` if the width of `[low, high]` is representable.
    fn width_is_sampleable(low: &Self, high: &Self) -> bool;
}

macro_rules! integer_bound {
    ($($t:ty),*) => {
        $(impl UniformBound for $t {
            fn is_sampleable(&self) -> bool {
                true
            }

            fn width_is_sampleable(_low: &Self, _high: &Self) -> bool {
                true
            }
        })*
    };
}

macro_rules! float_bound {
    ($($t:ty),*) => {
        $(impl UniformBound for $t {
            fn is_sampleable(&self) -> bool {
                self.is_finite()
            }

            fn width_is_sampleable(low: &Self, high: &Self) -> bool {
                (high - low).is_finite()
            }
        })*
    };
}

integer_bound!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
float_bound!(f32, f64);

impl<N> Uniform<N>
where
    N: UniformBound,
{
    /// Creates a uniform generator over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `low > high`, if either bound is
    /// NaN or infinite, or if the range is too wide to sample from.
    pub fn new(low: N, high: N) -> Result<Self> {
        if !low.is_sampleable() || !high.is_sampleable() {
            return Err(GeneticError::Configuration(format!(
                "Uniform bounds must be finite: [{:?}, {:?}]",
                low, high
            )));
        }
        if !(low <= high) {
            return Err(GeneticError::Configuration(format!(
                "Uniform range is empty: {:?} > {:?}",
                low, high
            )));
        }
        if !N::width_is_sampleable(&low, &high) {
            return Err(GeneticError::Configuration(format!(
                "Uniform range is too wide: [{:?}, {:?}]",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> &N {
        &self.low
    }

    pub fn high(&self) -> &N {
        &self.high
    }
}

impl<N> NumberGenerator<N> for Uniform<N>
where
    N: SampleUniform + PartialOrd + Copy + Debug + Send + Sync,
{
    fn next_value(&self, rng: &mut RandomNumberGenerator) -> N {
        rng.gen_range(self.low..=self.high)
    }
}

impl<N, G> NumberGenerator<N> for Box<G>
where
    G: NumberGenerator<N> + ?Sized,
{
    fn next_value(&self, rng: &mut RandomNumberGenerator) -> N {
        (**self).next_value(rng)
    }
}
