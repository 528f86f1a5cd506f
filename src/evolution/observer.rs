use tracing::info;

use crate::phenotype::Phenotype;
use crate::stats::PopulationStats;

/// Receives a snapshot of every generation.
///
/// Observers are notified on the thread that drives the engine, in
/// generation order. They must be quick and must not fail.
pub trait EvolutionObserver<T: Phenotype>: Send + Sync {
    fn population_update(&self, stats: &PopulationStats<T>);
}

impl<T, F> EvolutionObserver<T> for F
where
    T: Phenotype,
    F: Fn(&PopulationStats<T>) + Send + Sync,
{
    fn population_update(&self, stats: &PopulationStats<T>) {
        self(stats)
    }
}

/// Emits one `info` event per generation through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver {
    every: usize,
}

impl LoggingObserver {
    /// Logs every generation.
    pub fn new() -> Self {
        Self { every: 1 }
    }

    /// Logs every `every`-th generation. Zero is treated as one.
    pub fn every(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl<T: Phenotype> EvolutionObserver<T> for LoggingObserver {
    fn population_update(&self, stats: &PopulationStats<T>) {
        if stats.generation % self.every.max(1) != 0 {
            return;
        }
        info!(
            generation = stats.generation,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            std_dev = stats.fitness_standard_deviation,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            best = ?stats.best_candidate,
            "population update"
        );
    }
}
