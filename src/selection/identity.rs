use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Returns the first `count` candidates of the sorted population verbatim.
///
/// Useful for strategies where selection pressure comes entirely from
/// elsewhere, and in tests.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySelection;

impl<T> SelectionStrategy<T> for IdentitySelection
where
    T: Phenotype,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        _natural: bool,
        count: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if count > population.len() {
            return Err(GeneticError::Precondition(format!(
                "Cannot select {} candidates from a population of {}",
                count,
                population.len()
            )));
        }

        Ok(population[..count]
            .iter()
            .map(|candidate| candidate.candidate().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_selection() {
        let population: Vec<_> = [(1, 0.9), (2, 0.8), (3, 0.5), (4, 0.3)]
            .into_iter()
            .map(|(value, fitness)| EvaluatedCandidate::new(value, fitness).unwrap())
            .collect();
        let mut rng = RandomNumberGenerator::new();

        for count in 0..=population.len() {
            let selected = IdentitySelection
                .select(&population, true, count, &mut rng)
                .unwrap();
            assert_eq!(selected, (1..=count as i32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_identity_selection_too_many() {
        let population = vec![EvaluatedCandidate::new(1, 1.0).unwrap()];
        let mut rng = RandomNumberGenerator::new();

        let result = IdentitySelection.select(&population, true, 2, &mut rng);
        assert!(matches!(result, Err(GeneticError::Precondition(_))));
    }
}
