use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::proportionate::{select_proportionate, ProportionateSelection};
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their fitness. For non-natural
/// fitness the reciprocal of the score is used instead, see
/// [`adjusted_fitness`](super::adjusted_fitness).
///
/// Each pick is an independent spin of the wheel, so the actual number of times
/// a candidate is chosen can differ a lot from its expectation. Use
/// [`StochasticUniversalSampling`](super::StochasticUniversalSampling) for a
/// low-variance alternative.
///
/// # Examples
///
/// ```
/// use evolve::population::EvaluatedCandidate;
/// use evolve::rng::RandomNumberGenerator;
/// use evolve::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// fn main() -> evolve::Result<()> {
///     let population = vec![
///         EvaluatedCandidate::new(1, 0.9)?,
///         EvaluatedCandidate::new(2, 0.5)?,
///         EvaluatedCandidate::new(3, 0.1)?,
///     ];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selected = RouletteWheelSelection.select(&population, true, 5, &mut rng)?;
///     assert_eq!(selected.len(), 5);
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Calculates the cumulative weights of all individuals.
    fn cumulative_weights(weights: &[f64]) -> Vec<f64> {
        weights
            .iter()
            .scan(0.0, |total, &weight| {
                *total += weight;
                Some(*total)
            })
            .collect()
    }

    /// Spins the wheel once and returns the index it lands on.
    fn spin(cumulative: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let total = cumulative.last().copied().unwrap_or(0.0);
        let target = rng.next_f64() * total;
        // first index whose cumulative weight exceeds the target
        let index = cumulative.partition_point(|&c| c <= target);
        if index < cumulative.len() {
            index
        } else {
            // target rounded up to the total: take the last positive weight
            cumulative
                .partition_point(|&c| c < total)
                .min(cumulative.len() - 1)
        }
    }
}

impl ProportionateSelection for RouletteWheelSelection {
    fn select_indices(
        &self,
        weights: &[f64],
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<usize> {
        let cumulative = Self::cumulative_weights(weights);
        (0..count).map(|_| Self::spin(&cumulative, rng)).collect()
    }
}

impl<T> SelectionStrategy<T> for RouletteWheelSelection
where
    T: Phenotype,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        let scores = population.iter().map(|c| c.fitness()).collect();
        select_proportionate(self, population, scores, natural, count, rng)
    }
}
