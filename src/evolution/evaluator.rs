use std::fmt;

use crate::phenotype::Phenotype;

/// Scores candidates.
///
/// `fitness` receives the whole population so that co-evolutionary
/// evaluators can score a candidate relative to its peers; most evaluators
/// ignore it. Scores must be finite and non-negative. Evaluators are called
/// from worker threads and must be safe to share.
pub trait FitnessEvaluator<T: Phenotype>: Send + Sync {
    /// Returns the fitness score of `candidate`.
    fn fitness(&self, candidate: &T, population: &[T]) -> f64;

    /// `true` if higher scores are better, `false` for minimization.
    fn is_natural(&self) -> bool;
}

impl<T, E> FitnessEvaluator<T> for Box<E>
where
    T: Phenotype,
    E: FitnessEvaluator<T> + ?Sized,
{
    fn fitness(&self, candidate: &T, population: &[T]) -> f64 {
        (**self).fitness(candidate, population)
    }

    fn is_natural(&self) -> bool {
        (**self).is_natural()
    }
}

impl<T, E> FitnessEvaluator<T> for std::sync::Arc<E>
where
    T: Phenotype,
    E: FitnessEvaluator<T> + ?Sized,
{
    fn fitness(&self, candidate: &T, population: &[T]) -> f64 {
        (**self).fitness(candidate, population)
    }

    fn is_natural(&self) -> bool {
        (**self).is_natural()
    }
}

/// Adapts a closure `Fn(&T) -> f64` into an evaluator that ignores the population.
///
/// ```rust
/// use evolve::evolution::{FitnessEvaluator, FitnessFunction};
///
/// let evaluator = FitnessFunction::non_natural(|s: &String| s.len() as f64);
/// assert_eq!(evaluator.fitness(&"abc".to_string(), &[]), 3.0);
/// assert!(!FitnessEvaluator::<String>::is_natural(&evaluator));
/// ```
#[derive(Clone)]
pub struct FitnessFunction<F> {
    function: F,
    natural: bool,
}

impl<F> FitnessFunction<F> {
    /// Higher scores are better.
    pub fn natural(function: F) -> Self {
        Self {
            function,
            natural: true,
        }
    }

    /// Lower scores are better.
    pub fn non_natural(function: F) -> Self {
        Self {
            function,
            natural: false,
        }
    }
}

impl<T, F> FitnessEvaluator<T> for FitnessFunction<F>
where
    T: Phenotype,
    F: Fn(&T) -> f64 + Send + Sync,
{
    fn fitness(&self, candidate: &T, _population: &[T]) -> f64 {
        (self.function)(candidate)
    }

    fn is_natural(&self) -> bool {
        self.natural
    }
}

impl<F> fmt::Debug for FitnessFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessFunction")
            .field("natural", &self.natural)
            .finish()
    }
}
