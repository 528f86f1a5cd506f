use std::fmt::Debug;

use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// Selection strategies choose parents from an evaluated population. The
/// population passed in is sorted best-first with respect to `natural`, so
/// strategies that only care about rank can rely on index 0 being the
/// fittest candidate. Candidates may be picked more than once.
///
/// # Examples
///
/// ```
/// use evolve::population::EvaluatedCandidate;
/// use evolve::rng::RandomNumberGenerator;
/// use evolve::selection::{IdentitySelection, SelectionStrategy};
///
/// fn main() -> evolve::Result<()> {
///     let population = vec![
///         EvaluatedCandidate::new("best", 3.0)?,
///         EvaluatedCandidate::new("middle", 2.0)?,
///         EvaluatedCandidate::new("worst", 1.0)?,
///     ];
///     let mut rng = RandomNumberGenerator::from_seed(7);
///
///     let selected = IdentitySelection.select(&population, true, 2, &mut rng)?;
///     assert_eq!(selected, vec!["best", "middle"]);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<T>: Debug + Send + Sync
where
    T: Phenotype,
{
    /// Selects `count` candidates from `population`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if candidates are requested from an empty
    /// population, or a `Configuration` error if a configured generator
    /// produced an out-of-range value.
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>>;
}

impl<T, S> SelectionStrategy<T> for Box<S>
where
    T: Phenotype,
    S: SelectionStrategy<T> + ?Sized,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        (**self).select(population, natural, count, rng)
    }
}
