use crate::{
    caching::{CacheKey, CachedEvaluator, ThreadLocalCachedEvaluator},
    evolution::FitnessEvaluator,
    phenotype::Phenotype,
};

/// The type of fitness cache to wrap an evaluator with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// One map shared by all worker threads.
    #[default]
    Global,
    /// One map per worker thread.
    ThreadLocal,
}

/// Trait for wrapping an evaluator with caching functionality.
///
/// ```
/// use evolve::evolution::{CacheType, CachingEvaluator, FitnessEvaluator, FitnessFunction};
///
/// let evaluator = FitnessFunction::natural(|s: &String| s.len() as f64);
/// let cached = evaluator.with_global_cache();
/// assert_eq!(cached.fitness(&"abc".to_string(), &[]), 3.0);
/// assert_eq!(cached.cache_size(), 1);
///
/// let boxed = evaluator.with_cache(CacheType::ThreadLocal);
/// assert!(boxed.is_natural());
/// ```
pub trait CachingEvaluator<P: Phenotype>: FitnessEvaluator<P> + Sized + Clone {
    /// Wraps this evaluator in a [`CachedEvaluator`] shared across all threads.
    fn with_global_cache(&self) -> CachedEvaluator<P, Self>
    where
        P: CacheKey;

    /// Wraps this evaluator in a [`ThreadLocalCachedEvaluator`].
    fn with_thread_local_cache(&self) -> ThreadLocalCachedEvaluator<P, Self>
    where
        P: CacheKey;

    /// Wraps this evaluator in a cache of the requested type.
    fn with_cache(&self, cache_type: CacheType) -> Box<dyn FitnessEvaluator<P>>
    where
        P: CacheKey,
        Self: 'static,
    {
        match cache_type {
            CacheType::Global => Box::new(self.with_global_cache()),
            CacheType::ThreadLocal => Box::new(self.with_thread_local_cache()),
        }
    }
}

impl<P, E> CachingEvaluator<P> for E
where
    P: Phenotype,
    E: FitnessEvaluator<P> + Clone,
{
    fn with_global_cache(&self) -> CachedEvaluator<P, Self>
    where
        P: CacheKey,
    {
        CachedEvaluator::new(self.clone())
    }

    fn with_thread_local_cache(&self) -> ThreadLocalCachedEvaluator<P, Self>
    where
        P: CacheKey,
    {
        ThreadLocalCachedEvaluator::new(self.clone())
    }
}
