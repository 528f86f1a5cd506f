use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::operators::EvolutionaryOperator;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

/// Produces the candidates of the next generation from the current one.
pub trait EpochStrategy<T: Phenotype>: Send + Sync {
    /// Breeds the next generation.
    ///
    /// `population` is evaluated and sorted best-first. The returned list
    /// must have the same length; the engine evaluates and sorts it.
    fn epoch(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        elite_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>>;
}

impl<T, E> EpochStrategy<T> for Box<E>
where
    T: Phenotype,
    E: EpochStrategy<T> + ?Sized,
{
    fn epoch(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        elite_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        (**self).epoch(population, natural, elite_count, rng)
    }
}

/// The classic generational scheme.
///
/// The `elite_count` best candidates are copied into the next generation
/// unchanged. The rest of the next generation is bred by selecting parents
/// and passing them through the variation operator.
#[derive(Debug, Clone)]
pub struct GenerationalEpoch<O, S> {
    operator: O,
    selection: S,
}

impl<O, S> GenerationalEpoch<O, S> {
    pub fn new(operator: O, selection: S) -> Self {
        Self {
            operator,
            selection,
        }
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }
}

impl<T, O, S> EpochStrategy<T> for GenerationalEpoch<O, S>
where
    T: Phenotype,
    O: EvolutionaryOperator<T>,
    S: SelectionStrategy<T>,
{
    fn epoch(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        elite_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        let elite_count = elite_count.min(population.len());
        let offspring_count = population.len() - elite_count;

        let parents = self
            .selection
            .select(population, natural, offspring_count, rng)?;
        let offspring = self.operator.apply(parents, rng)?;
        if offspring.len() != offspring_count {
            return Err(GeneticError::Evolution(format!(
                "Operator returned {} candidates, expected {}",
                offspring.len(),
                offspring_count
            )));
        }
        trace!(elite_count, offspring_count, "bred next generation");

        let mut next = Vec::with_capacity(population.len());
        next.extend(
            population[..elite_count]
                .iter()
                .map(|elite| elite.candidate().clone()),
        );
        next.extend(offspring);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Mutation;
    use crate::selection::{IdentitySelection, TruncationSelection};

    fn population(values: &[u32]) -> Vec<EvaluatedCandidate<u32>> {
        values
            .iter()
            .map(|&v| EvaluatedCandidate::new(v, v as f64).unwrap())
            .collect()
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let epoch = GenerationalEpoch::new(
            Mutation::new(|_: &u32, _: &mut RandomNumberGenerator| 0),
            IdentitySelection,
        );
        let mut rng = RandomNumberGenerator::from_seed(0);

        let next = epoch
            .epoch(&population(&[9, 8, 7, 6, 5]), true, 2, &mut rng)
            .unwrap();
        assert_eq!(next, vec![9, 8, 0, 0, 0]);
    }

    #[test]
    fn test_without_elites() {
        let epoch = GenerationalEpoch::new(
            Mutation::new(|v: &u32, _: &mut RandomNumberGenerator| v + 1),
            TruncationSelection::new(1.0).unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(0);

        let next = epoch
            .epoch(&population(&[3, 2, 1]), true, 0, &mut rng)
            .unwrap();
        assert_eq!(next, vec![4, 3, 2]);
    }

    struct Shrinking;

    impl EvolutionaryOperator<u32> for Shrinking {
        fn apply(&self, mut selected: Vec<u32>, _rng: &mut RandomNumberGenerator) -> Result<Vec<u32>> {
            selected.pop();
            Ok(selected)
        }
    }

    #[test]
    fn test_operator_changing_size_is_an_error() {
        let epoch = GenerationalEpoch::new(Shrinking, IdentitySelection);
        let mut rng = RandomNumberGenerator::from_seed(0);

        let result = epoch.epoch(&population(&[3, 2, 1]), true, 1, &mut rng);
        assert!(matches!(result, Err(GeneticError::Evolution(_))));
    }
}
