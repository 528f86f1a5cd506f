//! # Candidate Factories
//!
//! A factory produces random candidates for the initial population. The
//! engine only ever calls [`CandidateFactory::seed_initial_population`],
//! which mixes caller-supplied seeds with fresh random candidates.
//!
//! Any closure `Fn(&mut RandomNumberGenerator) -> T` is a factory:
//!
//! ```rust
//! use evolve::factory::CandidateFactory;
//! use evolve::rng::RandomNumberGenerator;
//!
//! let factory = |rng: &mut RandomNumberGenerator| rng.gen_range(0..10u32);
//! let mut rng = RandomNumberGenerator::from_seed(3);
//!
//! let population = factory.seed_initial_population(4, &[42, 43], &mut rng);
//! assert_eq!(population.len(), 4);
//! assert_eq!(&population[..2], &[42, 43]);
//! assert!(population[2..].iter().all(|v| *v < 10));
//! ```

mod bitstring;
mod permutation;
pub(crate) mod string;

pub use bitstring::BitStringFactory;
pub use permutation::PermutationFactory;
pub use string::StringFactory;

use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Creates random candidates.
pub trait CandidateFactory<T: Phenotype>: Send + Sync {
    /// Creates one random candidate.
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> T;

    /// Creates `size` random candidates.
    fn generate_initial_population(&self, size: usize, rng: &mut RandomNumberGenerator) -> Vec<T> {
        (0..size)
            .map(|_| self.generate_random_candidate(rng))
            .collect()
    }

    /// Creates exactly `size` candidates, starting with copies of `seeds`.
    ///
    /// Seeds beyond `size` are ignored; the remainder is filled with random
    /// candidates.
    fn seed_initial_population(
        &self,
        size: usize,
        seeds: &[T],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<T> {
        let mut population = Vec::with_capacity(size);
        population.extend(seeds.iter().take(size).cloned());
        while population.len() < size {
            population.push(self.generate_random_candidate(rng));
        }
        population
    }
}

impl<T, F> CandidateFactory<T> for F
where
    T: Phenotype,
    F: Fn(&mut RandomNumberGenerator) -> T + Send + Sync,
{
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> T {
        self(rng)
    }
}
