//! # EvolutionEngine
//!
//! The engine owns the population and the random number generator of a run
//! and drives the generation loop:
//!
//! 1. seed the initial population from the factory,
//! 2. evaluate it (in parallel when a worker pool is configured),
//! 3. sort it best-first and compute its statistics,
//! 4. notify the observers,
//! 5. stop if any termination condition is satisfied,
//! 6. otherwise breed the next generation through the epoch strategy and go
//!    back to step 2.
//!
//! Elites are re-evaluated every generation. Wrap pure evaluators in a
//! cache (see [`CachingEvaluator`](super::CachingEvaluator)) to avoid the
//! repeated work.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::{EpochStrategy, EvolutionObserver, EvolutionOptions, FitnessEvaluator};
use crate::{
    error::{GeneticError, OptionExt, Result},
    factory::CandidateFactory,
    phenotype::Phenotype,
    pool::WorkerPool,
    population::{sort_evaluated_population, EvaluatedCandidate},
    rng::RandomNumberGenerator,
    stats::{compute_population_stats, PopulationStats},
    termination::TerminationCondition,
};

/// The outcome of [`EvolutionEngine::evolve_population`].
#[derive(Clone)]
pub struct EvolutionResult<T: Phenotype> {
    /// The final population, sorted best-first.
    pub population: Vec<EvaluatedCandidate<T>>,
    /// Every condition satisfied by the final generation, in configuration order.
    pub satisfied_conditions: Vec<Arc<dyn TerminationCondition<T>>>,
    /// Statistics of the final generation.
    pub stats: PopulationStats<T>,
}

impl<T: Phenotype> EvolutionResult<T> {
    /// The fittest candidate of the final population.
    pub fn best(&self) -> Option<&EvaluatedCandidate<T>> {
        self.population.first()
    }
}

impl<T: Phenotype> fmt::Debug for EvolutionResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionResult")
            .field("population", &self.population.len())
            .field("satisfied_conditions", &self.satisfied_conditions)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Evaluates every candidate and pairs it with its score.
///
/// Candidates keep their input order. With a pool the evaluations run
/// concurrently; without one they run on the calling thread.
///
/// # Errors
///
/// Returns `NegativeFitness` or `FitnessCalculation` if the evaluator
/// produced an invalid score.
pub fn evaluate_population<T, E>(
    population: &[T],
    evaluator: &E,
    pool: Option<&WorkerPool>,
) -> Result<Vec<EvaluatedCandidate<T>>>
where
    T: Phenotype,
    E: FitnessEvaluator<T> + ?Sized,
{
    let scores: Vec<f64> = match pool {
        Some(pool) => pool.map(population, |candidate| {
            evaluator.fitness(candidate, population)
        }),
        None => population
            .iter()
            .map(|candidate| evaluator.fitness(candidate, population))
            .collect(),
    };

    population
        .iter()
        .zip(scores)
        .map(|(candidate, score)| EvaluatedCandidate::new(candidate.clone(), score))
        .collect()
}

/// A generic evolutionary algorithm.
pub struct EvolutionEngine<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    factory: F,
    evaluator: E,
    epoch: P,
    rng: RandomNumberGenerator,
    pool: Option<WorkerPool>,
    observers: Vec<Arc<dyn EvolutionObserver<T>>>,
    satisfied: Option<Vec<Arc<dyn TerminationCondition<T>>>>,
}

impl<T, F, E, P> EvolutionEngine<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    /// Creates a sequential engine with an entropy-seeded generator.
    pub fn new(factory: F, evaluator: E, epoch: P) -> Self {
        Self::with_rng(factory, evaluator, epoch, RandomNumberGenerator::new())
    }

    pub fn with_rng(factory: F, evaluator: E, epoch: P, rng: RandomNumberGenerator) -> Self {
        Self {
            factory,
            evaluator,
            epoch,
            rng,
            pool: None,
            observers: Vec::new(),
            satisfied: None,
        }
    }

    /// Evaluates on up to `concurrency` worker threads. One or less means
    /// sequential evaluation on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker threads cannot be created.
    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self> {
        self.pool = if concurrency > 1 {
            Some(WorkerPool::new(concurrency)?)
        } else {
            None
        };
        Ok(self)
    }

    /// Replaces the random number generator, e.g. to reseed between runs.
    pub fn set_rng(&mut self, rng: RandomNumberGenerator) {
        self.rng = rng;
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn is_natural(&self) -> bool {
        self.evaluator.is_natural()
    }

    /// Registers an observer and returns the handle needed to remove it.
    pub fn add_observer<O>(&mut self, observer: O) -> Arc<dyn EvolutionObserver<T>>
    where
        O: EvolutionObserver<T> + 'static,
    {
        let observer: Arc<dyn EvolutionObserver<T>> = Arc::new(observer);
        self.observers.push(Arc::clone(&observer));
        observer
    }

    /// Registers an observer that is shared with other engines.
    pub fn add_shared_observer(&mut self, observer: Arc<dyn EvolutionObserver<T>>) {
        self.observers.push(observer);
    }

    /// Removes an observer previously returned by [`add_observer`](Self::add_observer).
    /// Returns `false` if it was not registered.
    pub fn remove_observer(&mut self, observer: &Arc<dyn EvolutionObserver<T>>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != before
    }

    /// Runs the generation loop until a termination condition is satisfied.
    ///
    /// # Errors
    ///
    /// Returns a `Precondition` error for invalid options. Any error from the
    /// evaluator, the selection strategy or the operators aborts the run.
    pub fn evolve_population(&mut self, options: &EvolutionOptions<T>) -> Result<EvolutionResult<T>> {
        options.validate()?;
        self.satisfied = None;

        let start = Instant::now();
        let natural = self.evaluator.is_natural();
        let elite_count = options.elite_count();
        let mut generation = 0;

        let candidates = self.factory.seed_initial_population(
            options.population_size(),
            options.seeds(),
            &mut self.rng,
        );
        let mut population = evaluate_population(&candidates, &self.evaluator, self.pool.as_ref())?;

        loop {
            sort_evaluated_population(&mut population, natural);
            let stats =
                compute_population_stats(&population, natural, elite_count, generation, start)?;
            debug!(
                generation,
                best_fitness = stats.best_fitness,
                mean_fitness = stats.mean_fitness,
                std_dev = stats.fitness_standard_deviation,
                "generation evaluated"
            );

            for observer in &self.observers {
                observer.population_update(&stats);
            }

            // every condition is asked, stateful ones rely on it
            let satisfied: Vec<Arc<dyn TerminationCondition<T>>> = options
                .termination_conditions()
                .iter()
                .filter(|condition| condition.is_satisfied(&stats))
                .cloned()
                .collect();

            if !satisfied.is_empty() {
                info!(
                    generation,
                    best_fitness = stats.best_fitness,
                    conditions = %describe(&satisfied),
                    "evolution terminated"
                );
                self.satisfied = Some(satisfied.clone());
                return Ok(EvolutionResult {
                    population,
                    satisfied_conditions: satisfied,
                    stats,
                });
            }

            generation += 1;
            let next = self
                .epoch
                .epoch(&population, natural, elite_count, &mut self.rng)?;
            population = evaluate_population(&next, &self.evaluator, self.pool.as_ref())?;
        }
    }

    /// Runs evolution and returns the fittest candidate of the final generation.
    ///
    /// # Errors
    ///
    /// See [`evolve_population`](Self::evolve_population).
    pub fn evolve(&mut self, options: &EvolutionOptions<T>) -> Result<T> {
        let result = self.evolve_population(options)?;
        result
            .population
            .into_iter()
            .next()
            .map(EvaluatedCandidate::into_candidate)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// The conditions that ended the most recent run.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalState` error if no run has terminated yet.
    pub fn satisfied_termination_conditions(&self) -> Result<&[Arc<dyn TerminationCondition<T>>]> {
        self.satisfied.as_deref().ok_or_else(|| {
            GeneticError::IllegalState(
                "Evolution has not terminated, no satisfied conditions available".to_string(),
            )
        })
    }
}

fn describe<T>(conditions: &[Arc<dyn TerminationCondition<T>>]) -> String {
    conditions
        .iter()
        .map(|condition| condition.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl<T, F, E, P> fmt::Debug for EvolutionEngine<T, F, E, P>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("natural", &self.evaluator.is_natural())
            .field("pool", &self.pool)
            .field("observers", &self.observers.len())
            .finish()
    }
}
