use std::sync::Arc;

use crate::{
    error::{GeneticError, Result},
    factory::CandidateFactory,
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
};

use super::{EpochStrategy, EvolutionEngine, EvolutionObserver, FitnessEvaluator};

/// Assembles an [`EvolutionEngine`] step by step.
///
/// ```rust
/// use evolve::evolution::{EvolutionEngineBuilder, FitnessFunction, GenerationalEpoch};
/// use evolve::evolution::options::EvolutionOptions;
/// use evolve::operators::Mutation;
/// use evolve::rng::RandomNumberGenerator;
/// use evolve::selection::TournamentSelection;
/// use evolve::termination::TargetFitness;
///
/// let mut engine = EvolutionEngineBuilder::<i64, _, _, _>::new()
///     .with_factory(|rng: &mut RandomNumberGenerator| rng.gen_range(0..100i64))
///     .with_evaluator(FitnessFunction::non_natural(|v: &i64| (v - 42).abs() as f64))
///     .with_epoch_strategy(GenerationalEpoch::new(
///         Mutation::new(|v: &i64, rng: &mut RandomNumberGenerator| v + rng.gen_range(-3..=3)),
///         TournamentSelection::new(0.9).unwrap(),
///     ))
///     .with_seed(7)
///     .build()
///     .unwrap();
///
/// let options = EvolutionOptions::new(20, 2).end_on(TargetFitness::new(0.0, false));
/// assert_eq!(engine.evolve(&options).unwrap(), 42);
/// ```
pub struct EvolutionEngineBuilder<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    factory: Option<F>,
    evaluator: Option<E>,
    epoch: Option<P>,
    rng: Option<RandomNumberGenerator>,
    concurrency: usize,
    observers: Vec<Arc<dyn EvolutionObserver<T>>>,
}

impl<T, F, E, P> EvolutionEngineBuilder<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    pub fn new() -> Self {
        Self {
            factory: None,
            evaluator: None,
            epoch: None,
            rng: None,
            concurrency: 1,
            observers: Vec::new(),
        }
    }

    pub fn with_factory(mut self, factory: F) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn with_evaluator(mut self, evaluator: E) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn with_epoch_strategy(mut self, epoch: P) -> Self {
        self.epoch = Some(epoch);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(RandomNumberGenerator::from_seed(seed));
        self
    }

    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Number of worker threads used for fitness evaluation.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: EvolutionObserver<T> + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    pub fn build(self) -> Result<EvolutionEngine<T, F, E, P>> {
        let factory = self
            .factory
            .ok_or_else(|| GeneticError::Configuration("Factory not specified".to_string()))?;

        let evaluator = self
            .evaluator
            .ok_or_else(|| GeneticError::Configuration("Evaluator not specified".to_string()))?;

        let epoch = self.epoch.ok_or_else(|| {
            GeneticError::Configuration("Epoch strategy not specified".to_string())
        })?;

        let mut engine =
            EvolutionEngine::with_rng(factory, evaluator, epoch, self.rng.unwrap_or_default())
                .with_concurrency(self.concurrency)?;
        for observer in self.observers {
            engine.add_shared_observer(observer);
        }
        Ok(engine)
    }
}

impl<T, F, E, P> Default for EvolutionEngineBuilder<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::{FitnessFunction, GenerationalEpoch};
    use crate::operators::Mutation;
    use crate::selection::IdentitySelection;

    type Factory = fn(&mut RandomNumberGenerator) -> u8;
    type Evaluator = FitnessFunction<fn(&u8) -> f64>;
    type Epoch = GenerationalEpoch<Mutation<fn(&u8, &mut RandomNumberGenerator) -> u8>, IdentitySelection>;

    fn factory(_: &mut RandomNumberGenerator) -> u8 {
        1
    }

    fn score(v: &u8) -> f64 {
        *v as f64
    }

    fn same(v: &u8, _: &mut RandomNumberGenerator) -> u8 {
        *v
    }

    fn epoch() -> Epoch {
        GenerationalEpoch::new(Mutation::new(same as fn(&u8, &mut RandomNumberGenerator) -> u8), IdentitySelection)
    }

    #[test]
    fn test_missing_components() {
        let missing_factory = EvolutionEngineBuilder::<u8, Factory, Evaluator, Epoch>::new()
            .with_evaluator(FitnessFunction::natural(score as fn(&u8) -> f64))
            .with_epoch_strategy(epoch())
            .build();
        assert!(matches!(missing_factory, Err(GeneticError::Configuration(_))));

        let missing_epoch = EvolutionEngineBuilder::<u8, Factory, Evaluator, Epoch>::default()
            .with_factory(factory as Factory)
            .with_evaluator(FitnessFunction::natural(score as fn(&u8) -> f64))
            .build();
        match missing_epoch {
            Err(GeneticError::Configuration(message)) => {
                assert_eq!(message, "Epoch strategy not specified")
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_concurrency_and_observers() {
        let engine = EvolutionEngineBuilder::<u8, Factory, Evaluator, Epoch>::new()
            .with_factory(factory as Factory)
            .with_evaluator(FitnessFunction::natural(score as fn(&u8) -> f64))
            .with_epoch_strategy(epoch())
            .with_concurrency(3)
            .with_observer(|_: &crate::stats::PopulationStats<u8>| {})
            .build()
            .unwrap();

        let debug = format!("{:?}", engine);
        assert!(debug.contains("max_concurrency: 3"));
        assert!(debug.contains("observers: 1"));
    }
}
