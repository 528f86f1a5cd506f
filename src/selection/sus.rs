use crate::error::Result;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::proportionate::{select_proportionate, ProportionateSelection};
use crate::selection::selection_strategy::SelectionStrategy;

/// Stochastic universal sampling.
///
/// A fitness-proportionate strategy that uses a single random offset and
/// `count` equally spaced pointers. Every candidate is selected at least
/// `floor(e)` and at most `ceil(e)` times, where `e` is its expected number
/// of selections, which makes it a low-variance replacement for
/// [`RouletteWheelSelection`](super::RouletteWheelSelection).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticUniversalSampling;

impl StochasticUniversalSampling {
    pub fn new() -> Self {
        Self
    }
}

impl ProportionateSelection for StochasticUniversalSampling {
    fn select_indices(
        &self,
        weights: &[f64],
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<usize> {
        let total: f64 = weights.iter().sum();
        let offset = rng.next_f64();

        let mut selected = Vec::with_capacity(count);
        let mut expectation = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            expectation += weight / total * count as f64;
            while expectation > offset + selected.len() as f64 && selected.len() < count {
                selected.push(index);
            }
        }

        // rounding can leave the last pointer just past the end of the wheel
        if selected.len() < count {
            let last = weights.iter().rposition(|&w| w > 0.0).unwrap_or(0);
            selected.resize(count, last);
        }
        selected
    }
}

impl<T> SelectionStrategy<T> for StochasticUniversalSampling
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

#[cfg(test)]
mod tests {
    use super::*;

    fn population(scores: &[(&'static str, f64)]) -> Vec<EvaluatedCandidate<&'static str>> {
        scores
            .iter()
            .map(|&(name, fitness)| EvaluatedCandidate::new(name, fitness).unwrap())
            .collect()
    }

    fn count_of(selected: &[&str], name: &str) -> usize {
        selected.iter().filter(|s| **s == name).count()
    }

    #[test]
    fn test_sus_selection_frequencies() {
        // expectations: 2.5, 1.125, 0.25, 0.125
        let population = population(&[("Steve", 10.0), ("John", 4.5), ("Mary", 1.0), ("Gary", 0.5)]);

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = StochasticUniversalSampling
                .select(&population, true, 4, &mut rng)
                .unwrap();

            assert_eq!(selected.len(), 4);
            assert!((2..=3).contains(&count_of(&selected, "Steve")));
            assert!((1..=2).contains(&count_of(&selected, "John")));
            assert!(count_of(&selected, "Mary") <= 1);
            assert!(count_of(&selected, "Gary") <= 1);
        }
    }

    #[test]
    fn test_sus_selection_close_scores() {
        // expectations: 1.188, 1.082, 1.0, 0.738
        let population = population(&[("Steve", 10.0), ("Mary", 9.1), ("John", 8.4), ("Gary", 6.2)]);

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = StochasticUniversalSampling
                .select(&population, true, 4, &mut rng)
                .unwrap();

            assert_eq!(selected.len(), 4);
            assert!((1..=2).contains(&count_of(&selected, "Steve")));
            assert!((1..=2).contains(&count_of(&selected, "Mary")));
            assert!(count_of(&selected, "John") <= 1);
            assert!(count_of(&selected, "Gary") <= 1);
        }
    }

    #[test]
    fn test_sus_non_natural() {
        // adjusted weights: 1.0, 0.5, 0.25, 0.25 -> expectations 2.0, 1.0, 0.5, 0.5
        let population = population(&[("Steve", 1.0), ("John", 2.0), ("Mary", 4.0), ("Gary", 4.0)]);

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = StochasticUniversalSampling
                .select(&population, false, 4, &mut rng)
                .unwrap();

            assert_eq!(count_of(&selected, "Steve"), 2);
            assert_eq!(count_of(&selected, "John"), 1);
        }
    }

    #[test]
    fn test_sus_perfect_non_natural_candidate() {
        let population = population(&[("perfect", 0.0), ("other", 1.0)]);
        let mut rng = RandomNumberGenerator::from_seed(4);

        let selected = StochasticUniversalSampling
            .select(&population, false, 6, &mut rng)
            .unwrap();

        assert_eq!(selected, vec!["perfect"; 6]);
    }

    #[test]
    fn test_sus_extreme_scores() {
        let mut rng = RandomNumberGenerator::from_seed(21);

        let non_natural = population(&[("a", 1e-308), ("b", 1e-308), ("worst", 5.0)]);
        let selected = StochasticUniversalSampling
            .select(&non_natural, false, 10, &mut rng)
            .unwrap();
        assert_eq!(count_of(&selected, "a"), 5);
        assert_eq!(count_of(&selected, "b"), 5);

        let natural = population(&[("a", 1e308), ("b", 1e308), ("tiny", 1.0)]);
        let selected = StochasticUniversalSampling
            .select(&natural, true, 10, &mut rng)
            .unwrap();
        assert_eq!(count_of(&selected, "tiny"), 0);
    }

    #[test]
    fn test_sus_zero_count() {
        let population = population(&[("a", 1.0)]);
        let mut rng = RandomNumberGenerator::from_seed(4);

        let selected = StochasticUniversalSampling
            .select(&population, true, 0, &mut rng)
            .unwrap();

        assert!(selected.is_empty());
    }
}
