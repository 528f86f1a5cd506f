use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::proportionate::{select_proportionate, ProportionateSelection};
use crate::selection::selection_strategy::SelectionStrategy;
use crate::selection::sus::StochasticUniversalSampling;

/// A selection strategy that selects individuals based on their rank in the population.
///
/// Rank-based selection replaces each fitness score with a pseudo-fitness derived
/// from the candidate's position in the sorted population, then delegates to a
/// fitness-proportionate selector. This helps prevent premature convergence when
/// there are a few individuals with much higher fitness than the rest of the
/// population.
///
/// The candidate at 1-based rank `r` in a population of size `n` scores `n - r`.
///
/// # Examples
///
/// ```
/// use evolve::population::EvaluatedCandidate;
/// use evolve::rng::RandomNumberGenerator;
/// use evolve::selection::{RankSelection, RouletteWheelSelection, SelectionStrategy};
///
/// fn main() -> evolve::Result<()> {
///     let population = vec![
///         EvaluatedCandidate::new('a', 1000.0)?,
///         EvaluatedCandidate::new('b', 2.0)?,
///         EvaluatedCandidate::new('c', 1.0)?,
///     ];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = RankSelection::with_selector(RouletteWheelSelection);
///     let selected = selection.select(&population, true, 4, &mut rng)?;
///     assert_eq!(selected.len(), 4);
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RankSelection<S = StochasticUniversalSampling> {
    selector: S,
}

impl RankSelection {
    /// Rank selection backed by stochastic universal sampling.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> RankSelection<S>
where
    S: ProportionateSelection,
{
    pub fn with_selector(selector: S) -> Self {
        Self { selector }
    }

    /// Maps a 1-based rank to a pseudo-fitness score.
    pub fn map_rank_to_score(rank: usize, population_size: usize) -> f64 {
        population_size.saturating_sub(rank) as f64
    }
}

impl<T, S> SelectionStrategy<T> for RankSelection<S>
where
    T: Phenotype,
    S: ProportionateSelection,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        _natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        let size = population.len();
        let scores = (1..=size)
            .map(|rank| Self::map_rank_to_score(rank, size))
            .collect();
        select_proportionate(&self.selector, population, scores, true, count, rng)
    }
}
