use crate::error::{GeneticError, Result};
use crate::generator::{Constant, NumberGenerator, Uniform};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Truncation selection.
///
/// Only the best `round(ratio * population_size)` candidates are eligible
/// (never more than the number requested, never fewer than one). The
/// eligible candidates are repeated in order until enough have been
/// selected, so no randomness is involved once the ratio is known.
#[derive(Debug)]
pub struct TruncationSelection {
    ratio: Box<dyn NumberGenerator<f64>>,
}

impl TruncationSelection {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `ratio` is not in `(0, 1]`.
    pub fn new(ratio: f64) -> Result<Self> {
        Self::check_ratio(ratio)?;
        Ok(Self {
            ratio: Box::new(Constant(ratio)),
        })
    }

    /// Draws the ratio uniformly from `[low, high]` on every call.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if either bound is not in `(0, 1]`
    /// or if `low > high`.
    pub fn with_range(low: f64, high: f64) -> Result<Self> {
        Self::check_ratio(low)?;
        Self::check_ratio(high)?;
        Ok(Self {
            ratio: Box::new(Uniform::new(low, high)?),
        })
    }

    /// Uses an arbitrary ratio generator. Out-of-range draws make `select` fail.
    pub fn with_generator<G>(ratio: G) -> Self
    where
        G: NumberGenerator<f64> + 'static,
    {
        Self {
            ratio: Box::new(ratio),
        }
    }

    fn check_ratio(ratio: f64) -> Result<()> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(GeneticError::Configuration(format!(
                "Truncation ratio must be in (0, 1], got {}",
                ratio
            )));
        }
        Ok(())
    }
}

impl<T> SelectionStrategy<T> for TruncationSelection
where
    T: Phenotype,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        _natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let ratio = self.ratio.next_value(rng);
        Self::check_ratio(ratio)?;

        let eligible = ((ratio * population.len() as f64).round() as usize)
            .min(count)
            .clamp(1, population.len());

        Ok(population[..eligible]
            .iter()
            .cycle()
            .take(count)
            .map(|candidate| candidate.candidate().clone())
            .collect())
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

    #[test]
    fn test_truncation_returns_the_fittest() {
        let population = population(&[("Steve", 10.0), ("Mary", 9.1), ("John", 8.4), ("Gary", 6.2)]);
        let selection = TruncationSelection::new(0.5).unwrap();

        for seed in 0..10 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = selection.select(&population, true, 2, &mut rng).unwrap();
            assert_eq!(selected, vec!["Steve", "Mary"]);
        }
    }

    #[test]
    fn test_truncation_repeats_eligible_candidates() {
        let population = population(&[("a", 4.0), ("b", 3.0), ("c", 2.0), ("d", 1.0)]);
        let selection = TruncationSelection::new(0.25).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = selection.select(&population, true, 3, &mut rng).unwrap();
        assert_eq!(selected, vec!["a", "a", "a"]);
    }

    #[test]
    fn test_truncation_eligible_at_least_one() {
        let population = population(&[("a", 4.0), ("b", 3.0)]);
        let selection = TruncationSelection::new(0.1).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = selection.select(&population, true, 2, &mut rng).unwrap();
        assert_eq!(selected, vec!["a", "a"]);
    }

    #[test]
    fn test_invalid_ratio() {
        assert!(matches!(
            TruncationSelection::new(0.0),
            Err(GeneticError::Configuration(_))
        ));
        assert!(TruncationSelection::new(1.5).is_err());
        assert!(TruncationSelection::with_range(0.2, 1.2).is_err());
        assert!(TruncationSelection::with_range(0.8, 0.2).is_err());
        assert!(TruncationSelection::with_range(0.2, 0.8).is_ok());
    }

    #[test]
    fn test_ratio_range() {
        let population = population(&[("a", 4.0), ("b", 3.0), ("c", 2.0), ("d", 1.0)]);
        let selection = TruncationSelection::with_range(0.5, 1.0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(17);

        let selected = selection.select(&population, true, 8, &mut rng).unwrap();
        assert_eq!(selected.len(), 8);
        assert_eq!(&selected[..2], &["a", "b"]);
    }
}
