//! # Termination Conditions
//!
//! A termination condition inspects the statistics of the latest generation
//! and decides whether evolution should stop. The engine checks every
//! configured condition once per generation, in the order they were
//! supplied, and stops as soon as at least one is satisfied. All satisfied
//! conditions of the final generation are reported back to the caller.
//!
//! ```rust
//! use std::time::Duration;
//! use evolve::termination::{ElapsedTime, GenerationCount, TargetFitness, UserAbort};
//!
//! let generations = GenerationCount::new(100).unwrap();
//! let timeout = ElapsedTime::new(Duration::from_secs(5));
//! let target = TargetFitness::new(20.0, true);
//! let abort = UserAbort::new();
//!
//! assert_eq!(generations.to_string(), "GenerationCount(100)");
//! assert!(!abort.is_aborted());
//! ```

use std::fmt::{self, Debug, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::error::{GeneticError, Result};
use crate::population::is_fitter;
use crate::stats::PopulationStats;

/// Decides when evolution stops.
///
/// Implementations must be `Display` so that satisfied conditions can be
/// reported in logs and results.
pub trait TerminationCondition<T>: Debug + Display + Send + Sync {
    /// Returns `true` if evolution should stop after the generation described by `stats`.
    fn is_satisfied(&self, stats: &PopulationStats<T>) -> bool;
}

/// Satisfied once the elapsed time reaches a fixed duration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElapsedTime {
    max_duration: Duration,
}

impl ElapsedTime {
    pub fn new(max_duration: Duration) -> Self {
        Self { max_duration }
    }
}

impl<T> TerminationCondition<T> for ElapsedTime {
    fn is_satisfied(&self, stats: &PopulationStats<T>) -> bool {
        stats.elapsed >= self.max_duration
    }
}

impl Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElapsedTime({:?})", self.max_duration)
    }
}

/// Satisfied once a fixed number of generations has run.
///
/// Generation 0 is the initial population, so `GenerationCount::new(k)`
/// stops after generation index `k - 1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationCount {
    generations: usize,
}

impl GenerationCount {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `generations` is zero.
    pub fn new(generations: usize) -> Result<Self> {
        if generations == 0 {
            return Err(GeneticError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        Ok(Self { generations })
    }

    pub fn generations(&self) -> usize {
        self.generations
    }
}

impl<T> TerminationCondition<T> for GenerationCount {
    fn is_satisfied(&self, stats: &PopulationStats<T>) -> bool {
        stats.generation + 1 >= self.generations
    }
}

impl Display for GenerationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationCount({})", self.generations)
    }
}

/// Satisfied once the best fitness reaches a target value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFitness {
    fitness: f64,
    natural: bool,
}

impl TargetFitness {
    /// `natural` must match the evaluator's natural flag: higher scores
    /// reach the target from below when `true`, lower scores from above
    /// when `false`.
    pub fn new(fitness: f64, natural: bool) -> Self {
        Self { fitness, natural }
    }
}

impl<T> TerminationCondition<T> for TargetFitness {
    fn is_satisfied(&self, stats: &PopulationStats<T>) -> bool {
        if self.natural {
            stats.best_fitness >= self.fitness
        } else {
            stats.best_fitness <= self.fitness
        }
    }
}

impl Display for TargetFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TargetFitness({}, {})",
            self.fitness,
            if self.natural { "natural" } else { "non-natural" }
        )
    }
}

/// A flag that lets another thread stop evolution.
///
/// Clones share the same flag, so keep one clone and hand another to the
/// engine. The flag is checked once per generation.
#[derive(Debug, Clone, Default)]
pub struct UserAbort {
    aborted: Arc<AtomicBool>,
}

impl UserAbort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination at the next generation boundary.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    /// Clears the flag so the condition can be reused.
    pub fn reset(&self) {
        self.aborted.store(false, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

impl<T> TerminationCondition<T> for UserAbort {
    fn is_satisfied(&self, _stats: &PopulationStats<T>) -> bool {
        self.is_aborted()
    }
}

impl Display for UserAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserAbort")
    }
}

#[derive(Debug, Clone, Copy)]
struct StagnationState {
    best_fitness: f64,
    improved_at: usize,
    last_generation: usize,
}

/// Satisfied when the best fitness has not improved for a number of
/// consecutive generations.
///
/// The condition remembers the best fitness seen so far. A generation index
/// that goes backwards marks the start of a new run and resets it.
#[derive(Debug)]
pub struct Stagnation {
    generation_limit: usize,
    natural: bool,
    state: Mutex<Option<StagnationState>>,
}

impl Stagnation {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `generation_limit` is zero.
    pub fn new(generation_limit: usize, natural: bool) -> Result<Self> {
        if generation_limit == 0 {
            return Err(GeneticError::Configuration(
                "Stagnation generation limit must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            generation_limit,
            natural,
            state: Mutex::new(None),
        })
    }
}

impl<T> TerminationCondition<T> for Stagnation {
    fn is_satisfied(&self, stats: &PopulationStats<T>) -> bool {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = match *guard {
            Some(mut state) if stats.generation > state.last_generation => {
                if is_fitter(stats.best_fitness, state.best_fitness, self.natural) {
                    state.best_fitness = stats.best_fitness;
                    state.improved_at = stats.generation;
                }
                state.last_generation = stats.generation;
                state
            }
            _ => StagnationState {
                best_fitness: stats.best_fitness,
                improved_at: stats.generation,
                last_generation: stats.generation,
            },
        };
        *guard = Some(state);
        stats.generation - state.improved_at >= self.generation_limit
    }
}

impl Display for Stagnation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stagnation({})", self.generation_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(generation: usize, best_fitness: f64, elapsed: Duration) -> PopulationStats<u32> {
        PopulationStats {
            best_candidate: 0,
            best_fitness,
            mean_fitness: best_fitness / 2.0,
            fitness_standard_deviation: 0.0,
            natural: true,
            population_size: 10,
            elite_count: 0,
            generation,
            elapsed,
        }
    }

    #[test]
    fn test_generation_count() {
        let condition = GenerationCount::new(3).unwrap();
        assert!(!condition.is_satisfied(&stats(0, 1.0, Duration::ZERO)));
        assert!(!condition.is_satisfied(&stats(1, 1.0, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(2, 1.0, Duration::ZERO)));
    }

    #[test]
    fn test_generation_count_rejects_zero() {
        assert!(GenerationCount::new(0).is_err());
    }

    #[test]
    fn test_elapsed_time() {
        let condition = ElapsedTime::new(Duration::from_millis(100));
        assert!(!condition.is_satisfied(&stats(0, 1.0, Duration::from_millis(99))));
        assert!(condition.is_satisfied(&stats(0, 1.0, Duration::from_millis(100))));
    }

    #[test]
    fn test_target_fitness_natural() {
        let condition = TargetFitness::new(10.0, true);
        assert!(!condition.is_satisfied(&stats(0, 9.5, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(0, 10.0, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(0, 12.0, Duration::ZERO)));
    }

    #[test]
    fn test_target_fitness_non_natural() {
        let condition = TargetFitness::new(0.0, false);
        assert!(!condition.is_satisfied(&stats(0, 0.5, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(0, 0.0, Duration::ZERO)));
    }

    #[test]
    fn test_user_abort_shared_between_clones() {
        let abort = UserAbort::new();
        let handle = abort.clone();
        assert!(!abort.is_satisfied(&stats(0, 0.0, Duration::ZERO)));

        std::thread::spawn(move || handle.abort()).join().unwrap();
        assert!(abort.is_satisfied(&stats(0, 0.0, Duration::ZERO)));

        abort.reset();
        assert!(!abort.is_aborted());
    }

    #[test]
    fn test_stagnation() {
        let condition = Stagnation::new(2, true).unwrap();
        assert!(!condition.is_satisfied(&stats(0, 1.0, Duration::ZERO)));
        assert!(!condition.is_satisfied(&stats(1, 2.0, Duration::ZERO)));
        assert!(!condition.is_satisfied(&stats(2, 2.0, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(3, 1.5, Duration::ZERO)));
    }

    #[test]
    fn test_stagnation_resets_on_new_run() {
        let condition = Stagnation::new(1, true).unwrap();
        assert!(!condition.is_satisfied(&stats(0, 5.0, Duration::ZERO)));
        assert!(condition.is_satisfied(&stats(1, 5.0, Duration::ZERO)));
        // generation index restarts
        assert!(!condition.is_satisfied(&stats(0, 1.0, Duration::ZERO)));
    }

    #[test]
    fn test_display() {
        assert_eq!(TargetFitness::new(0.0, false).to_string(), "TargetFitness(0, non-natural)");
        assert_eq!(UserAbort::new().to_string(), "UserAbort");
        assert_eq!(Stagnation::new(4, true).unwrap().to_string(), "Stagnation(4)");
    }
}
