//! # Variation Operators
//!
//! Operators turn the parents picked by a selection strategy into the
//! offspring of the next generation. Every operator takes ownership of the
//! selected list and returns a list of the same length; the candidates are
//! never modified in place, changed candidates are fresh values.
//!
//! The usual setup is a [`Pipeline`] of [`Crossover`] followed by
//! [`Mutation`]:
//!
//! ```rust
//! use evolve::bitstring::BitString;
//! use evolve::operators::{
//!     BitStringMater, BitStringMutater, Crossover, EvolutionaryOperator, Mutation, Pipeline,
//! };
//! use evolve::rng::RandomNumberGenerator;
//!
//! fn main() -> evolve::Result<()> {
//!     let pipeline: Pipeline<BitString> = Pipeline::new(vec![
//!         Box::new(Crossover::new(BitStringMater)),
//!         Box::new(Mutation::new(BitStringMutater::new(0.01)?)),
//!     ])?;
//!
//!     let mut rng = RandomNumberGenerator::from_seed(5);
//!     let parents: Vec<BitString> = (0..4).map(|_| BitString::random(16, &mut rng)).collect();
//!     let offspring = pipeline.apply(parents, &mut rng)?;
//!     assert_eq!(offspring.len(), 4);
//!     Ok(())
//! }
//! ```

mod compound;
mod crossover;
mod mutation;

pub use compound::{OperatorSwitch, Pipeline};
pub use crossover::{BitStringMater, Crossover, Mater, SliceMater, StringMater};
pub use mutation::{BitStringMutater, ListOrderMutater, Mutater, Mutation, StringMutater};

use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// A stochastic transformation of a list of candidates.
pub trait EvolutionaryOperator<T: Phenotype>: Send + Sync {
    /// Transforms `selected` into a list of the same length.
    ///
    /// # Errors
    ///
    /// Fails on violated preconditions (for example parents of different
    /// lengths) or when a configured generator yields an out-of-range value.
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>>;
}

impl<T, O> EvolutionaryOperator<T> for Box<O>
where
    T: Phenotype,
    O: EvolutionaryOperator<T> + ?Sized,
{
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>> {
        (**self).apply(selected, rng)
    }
}
