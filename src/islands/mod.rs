//! # Island Model
//!
//! Several engines (islands) evolve separate populations concurrently. After
//! every epoch of `epoch_length` generations a [`Migration`] strategy moves
//! candidates between the islands, and the termination conditions are
//! checked against the combined population.
//!
//! All islands must agree on the natural flag of their evaluators. Each
//! island gets its own generator forked from the island model's generator,
//! so seeded runs are reproducible even though islands run in parallel.

mod migration;
mod options;

pub use migration::{Migration, RandomMigration, RingMigration};
pub use options::{IslandEvolutionOptions, IslandEvolutionOptionsBuilder};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::{
    error::{GeneticError, OptionExt, Result},
    evolution::{
        EpochStrategy, EvolutionEngine, EvolutionObserver, EvolutionOptions, EvolutionResult,
        FitnessEvaluator,
    },
    factory::CandidateFactory,
    phenotype::Phenotype,
    pool::{work_with, Task, WorkerPool},
    population::{candidates_of, sort_evaluated_population, EvaluatedCandidate},
    rng::RandomNumberGenerator,
    stats::{compute_population_stats, PopulationStats},
    termination::{GenerationCount, TerminationCondition},
};

/// Observes an island run.
///
/// `population_update` receives the combined statistics once per epoch on
/// the calling thread. `island_population_update` receives the statistics
/// of every island generation and is called from that island's worker
/// thread.
pub trait IslandEvolutionObserver<T: Phenotype>: Send + Sync {
    fn population_update(&self, stats: &PopulationStats<T>);

    fn island_population_update(&self, _island: usize, _stats: &PopulationStats<T>) {}
}

impl<T, F> IslandEvolutionObserver<T> for F
where
    T: Phenotype,
    F: Fn(&PopulationStats<T>) + Send + Sync,
{
    fn population_update(&self, stats: &PopulationStats<T>) {
        self(stats)
    }
}

struct IslandObserverAdapter<T: Phenotype> {
    island: usize,
    observer: Arc<dyn IslandEvolutionObserver<T>>,
}

impl<T: Phenotype> EvolutionObserver<T> for IslandObserverAdapter<T> {
    fn population_update(&self, stats: &PopulationStats<T>) {
        self.observer.island_population_update(self.island, stats);
    }
}

struct RegisteredObserver<T: Phenotype> {
    observer: Arc<dyn IslandEvolutionObserver<T>>,
    adapters: Vec<Arc<dyn EvolutionObserver<T>>>,
}

/// An island model over engines of one type.
pub struct IslandEvolution<T, F, E, P, M>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
    M: Migration<T>,
{
    islands: Vec<EvolutionEngine<T, F, E, P>>,
    migration: M,
    rng: RandomNumberGenerator,
    pool: WorkerPool,
    natural: bool,
    observers: Vec<RegisteredObserver<T>>,
    satisfied: Option<Vec<Arc<dyn TerminationCondition<T>>>>,
}

impl<T, F, E, P, M> IslandEvolution<T, F, E, P, M>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
    M: Migration<T>,
{
    /// Creates an island model with an entropy-seeded generator.
    ///
    /// # Errors
    ///
    /// See [`with_rng`](Self::with_rng).
    pub fn new(islands: Vec<EvolutionEngine<T, F, E, P>>, migration: M) -> Result<Self> {
        Self::with_rng(islands, migration, RandomNumberGenerator::new())
    }

    /// Creates an island model. Every island is reseeded from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if there are no islands or their
    /// evaluators disagree on the natural flag.
    pub fn with_rng(
        mut islands: Vec<EvolutionEngine<T, F, E, P>>,
        migration: M,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let natural = islands
            .first()
            .map(|island| island.is_natural())
            .ok_or_else_genetic(|| {
                GeneticError::Configuration("At least one island is required".to_string())
            })?;
        if islands.iter().any(|island| island.is_natural() != natural) {
            return Err(GeneticError::Configuration(
                "All islands must use the same natural fitness flag".to_string(),
            ));
        }

        for island in islands.iter_mut() {
            island.set_rng(rng.fork());
        }
        let pool = WorkerPool::new(islands.len())?;

        Ok(Self {
            islands,
            migration,
            rng,
            pool,
            natural,
            observers: Vec::new(),
            satisfied: None,
        })
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    pub fn is_natural(&self) -> bool {
        self.natural
    }

    /// Registers an observer on the island model and on every island.
    pub fn add_observer<O>(&mut self, observer: O) -> Arc<dyn IslandEvolutionObserver<T>>
    where
        O: IslandEvolutionObserver<T> + 'static,
    {
        let observer: Arc<dyn IslandEvolutionObserver<T>> = Arc::new(observer);
        let adapters = self
            .islands
            .iter_mut()
            .enumerate()
            .map(|(island, engine)| {
                let adapter: Arc<dyn EvolutionObserver<T>> = Arc::new(IslandObserverAdapter {
                    island,
                    observer: Arc::clone(&observer),
                });
                engine.add_shared_observer(Arc::clone(&adapter));
                adapter
            })
            .collect();

        self.observers.push(RegisteredObserver {
            observer: Arc::clone(&observer),
            adapters,
        });
        observer
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn IslandEvolutionObserver<T>>) -> bool {
        let Some(position) = self
            .observers
            .iter()
            .position(|registered| Arc::ptr_eq(&registered.observer, observer))
        else {
            return false;
        };

        let registered = self.observers.remove(position);
        for (engine, adapter) in self.islands.iter_mut().zip(&registered.adapters) {
            engine.remove_observer(adapter);
        }
        true
    }

    /// Runs epochs until a termination condition is satisfied by the
    /// combined population.
    ///
    /// # Errors
    ///
    /// Returns a `Precondition` error for invalid options; any island or
    /// migration error aborts the run.
    pub fn evolve_population(
        &mut self,
        options: &IslandEvolutionOptions<T>,
    ) -> Result<EvolutionResult<T>> {
        options.validate()?;
        self.satisfied = None;

        let start = Instant::now();
        let natural = self.natural;
        let elite_count = options.elite_count() * self.islands.len();
        let epoch_length = GenerationCount::new(options.epoch_length())?;
        let mut seeds: Vec<Vec<T>> = vec![Vec::new(); self.islands.len()];
        let mut epoch = 0;

        loop {
            let pool = &self.pool;
            let tasks: Vec<Task<Result<EvolutionResult<T>>>> = self
                .islands
                .iter_mut()
                .zip(seeds)
                .enumerate()
                .map(|(island, (engine, island_seeds))| {
                    let mut island_options =
                        EvolutionOptions::new(options.population_size(), options.elite_count())
                            .end_on(epoch_length);
                    island_options.set_seeds(island_seeds);
                    work_with(move || {
                        let span = info_span!("island_epoch", island, epoch);
                        let _guard = span.enter();
                        engine.evolve_population(&island_options)
                    })
                })
                .collect();

            let mut islands: Vec<Vec<EvaluatedCandidate<T>>> = pool
                .submit(tasks)
                .into_iter()
                .map(|result| result.map(|outcome| outcome.population))
                .collect::<Result<_>>()?;

            self.migration
                .migrate(&mut islands, options.migrant_count(), &mut self.rng)?;

            let mut combined: Vec<EvaluatedCandidate<T>> =
                islands.iter().flatten().cloned().collect();
            sort_evaluated_population(&mut combined, natural);
            let stats = compute_population_stats(&combined, natural, elite_count, epoch, start)?;
            debug!(
                epoch,
                best_fitness = stats.best_fitness,
                mean_fitness = stats.mean_fitness,
                "island epoch completed"
            );

            for registered in &self.observers {
                registered.observer.population_update(&stats);
            }

            let satisfied: Vec<Arc<dyn TerminationCondition<T>>> = options
                .termination_conditions()
                .iter()
                .filter(|condition| condition.is_satisfied(&stats))
                .cloned()
                .collect();

            if !satisfied.is_empty() {
                info!(
                    epoch,
                    best_fitness = stats.best_fitness,
                    islands = self.islands.len(),
                    "island evolution terminated"
                );
                self.satisfied = Some(satisfied.clone());
                return Ok(EvolutionResult {
                    population: combined,
                    satisfied_conditions: satisfied,
                    stats,
                });
            }

            seeds = islands.iter().map(|island| candidates_of(island)).collect();
            epoch += 1;
        }
    }

    /// Runs evolution and returns the fittest candidate across all islands.
    ///
    /// # Errors
    ///
    /// See [`evolve_population`](Self::evolve_population).
    pub fn evolve(&mut self, options: &IslandEvolutionOptions<T>) -> Result<T> {
        let result = self.evolve_population(options)?;
        result
            .population
            .into_iter()
            .next()
            .map(EvaluatedCandidate::into_candidate)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// # Errors
    ///
    /// Returns an `IllegalState` error if no run has terminated yet.
    pub fn satisfied_termination_conditions(&self) -> Result<&[Arc<dyn TerminationCondition<T>>]> {
        self.satisfied.as_deref().ok_or_else(|| {
            GeneticError::IllegalState(
                "Island evolution has not terminated, no satisfied conditions available"
                    .to_string(),
            )
        })
    }
}

impl<T, F, E, P, M> fmt::Debug for IslandEvolution<T, F, E, P, M>
where
    T: Phenotype,
    F: CandidateFactory<T>,
    E: FitnessEvaluator<T>,
    P: EpochStrategy<T>,
    M: Migration<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IslandEvolution")
            .field("islands", &self.islands.len())
            .field("migration", &self.migration)
            .field("natural", &self.natural)
            .finish()
    }
}
