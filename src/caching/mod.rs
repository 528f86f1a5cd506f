//! # Caching Module
//!
//! This module provides memoizing wrappers around fitness evaluators.
//! Caching is particularly useful for expensive fitness functions or when the
//! same candidates are evaluated repeatedly, for example elites that are
//! re-scored every generation.
//!
//! Cached scores are only correct for isolated evaluators, i.e. evaluators
//! whose score does not depend on the rest of the population.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::bitstring::BitString;
use crate::evolution::FitnessEvaluator;
use crate::phenotype::Phenotype;

/// A trait for candidates that can be used as cache keys.
///
/// Candidates that would receive the same fitness score should produce the
/// same key.
pub trait CacheKey: Phenotype {
    /// The type of the cache key.
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Generates a cache key for this candidate.
    fn cache_key(&self) -> Self::Key;
}

macro_rules! cache_key_by_clone {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CacheKey for $ty {
                type Key = $ty;

                fn cache_key(&self) -> Self::Key {
                    self.clone()
                }
            }
        )*
    };
}

cache_key_by_clone!(
    BitString,
    String,
    Vec<u8>,
    Vec<i32>,
    Vec<i64>,
    Vec<u32>,
    Vec<usize>,
    i32,
    i64,
    u32,
    u64,
    usize,
);

/// An evaluator wrapper with a cache shared by all threads.
///
/// Lookups take a read lock; the wrapped evaluator runs without holding any
/// lock, and the first score inserted for a key wins.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    evaluator: E,
    cache: Arc<RwLock<HashMap<P::Key, f64>>>,
    _marker: PhantomData<P>,
}

impl<P, E> CachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    /// Creates a new cached evaluator wrapping the given evaluator.
    pub fn new(evaluator: E) -> Self {
        Self::with_cache(evaluator, HashMap::new())
    }

    /// Creates a new cached evaluator with a pre-populated cache.
    pub fn with_cache(evaluator: E, cache: HashMap<P::Key, f64>) -> Self {
        Self {
            evaluator,
            cache: Arc::new(RwLock::new(cache)),
            _marker: PhantomData,
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<P::Key, f64> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<P, E> FitnessEvaluator<P> for CachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    fn fitness(&self, candidate: &P, population: &[P]) -> f64 {
        let key = candidate.cache_key();

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(score) = cached {
            trace!(?key, "fitness cache hit");
            return score;
        }

        let score = self.evaluator.fitness(candidate, population);
        *self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(score)
    }

    fn is_natural(&self) -> bool {
        self.evaluator.is_natural()
    }
}

/// A thread-local cache for fitness evaluations.
///
/// Each thread has its own map, so there is no contention between workers
/// at the cost of duplicated evaluations across threads.
#[derive(Debug)]
pub struct ThreadLocalCache<P>
where
    P: CacheKey,
{
    cache: thread_local::ThreadLocal<RefCell<HashMap<P::Key, f64>>>,
}

impl<P> ThreadLocalCache<P>
where
    P: CacheKey,
{
    /// Creates a new empty thread-local cache.
    pub fn new() -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
        }
    }

    fn local(&self) -> &RefCell<HashMap<P::Key, f64>> {
        self.cache.get_or(|| RefCell::new(HashMap::new()))
    }

    /// Gets a cached fitness value if available.
    pub fn get(&self, key: &P::Key) -> Option<f64> {
        self.local().borrow().get(key).copied()
    }

    /// Inserts a fitness value into the cache of the current thread.
    pub fn insert(&self, key: P::Key, value: f64) {
        self.local().borrow_mut().insert(key, value);
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        self.local().borrow_mut().clear();
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.local().borrow().len()
    }

    /// Returns `true` if the cache for the current thread is empty.
    pub fn is_empty(&self) -> bool {
        self.local().borrow().is_empty()
    }
}

impl<P> Default for ThreadLocalCache<P>
where
    P: CacheKey,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An evaluator wrapper backed by a [`ThreadLocalCache`].
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    evaluator: E,
    cache: Arc<ThreadLocalCache<P>>,
}

impl<P, E> ThreadLocalCachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    /// Creates a new thread-local cached evaluator wrapping the given evaluator.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<P, E> FitnessEvaluator<P> for ThreadLocalCachedEvaluator<P, E>
where
    P: CacheKey,
    E: FitnessEvaluator<P>,
{
    fn fitness(&self, candidate: &P, population: &[P]) -> f64 {
        let key = candidate.cache_key();

        if let Some(score) = self.cache.get(&key) {
            trace!(?key, "thread-local fitness cache hit");
            return score;
        }

        let score = self.evaluator.fitness(candidate, population);
        self.cache.insert(key, score);
        score
    }

    fn is_natural(&self) -> bool {
        self.evaluator.is_natural()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct TestEvaluator {
        target: i32,
        // Counter to track the number of evaluations
        evaluations: Arc<AtomicUsize>,
    }

    impl TestEvaluator {
        fn new(target: i32) -> Self {
            Self {
                target,
                evaluations: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn get_evaluations(&self) -> usize {
            self.evaluations.load(Ordering::SeqCst)
        }
    }

    impl FitnessEvaluator<i32> for TestEvaluator {
        fn fitness(&self, candidate: &i32, _population: &[i32]) -> f64 {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            (candidate - self.target).abs() as f64
        }

        fn is_natural(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_cached_evaluator() {
        let evaluator = TestEvaluator::new(50);
        let cached = CachedEvaluator::new(evaluator.clone());

        // First evaluation should calculate the score
        let score1 = cached.fitness(&10, &[]);
        assert_eq!(score1, 40.0);
        assert_eq!(evaluator.get_evaluations(), 1);

        // Second evaluation of the same candidate should use the cache
        let score2 = cached.fitness(&10, &[]);
        assert_eq!(evaluator.get_evaluations(), 1);
        assert_eq!(score1, score2);

        // Different candidate should calculate a new score
        let score3 = cached.fitness(&20, &[]);
        assert_eq!(evaluator.get_evaluations(), 2);
        assert_ne!(score1, score3);

        assert_eq!(cached.cache_size(), 2);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);

        // After clearing, should calculate again
        cached.fitness(&10, &[]);
        assert_eq!(evaluator.get_evaluations(), 3);
    }

    #[test]
    fn test_cached_evaluator_mirrors_natural_flag() {
        let cached = CachedEvaluator::new(TestEvaluator::new(0));
        assert!(!cached.is_natural());
    }

    #[test]
    fn test_pre_populated_cache() {
        let evaluator = TestEvaluator::new(50);

        let mut cache = HashMap::new();
        cache.insert(10, 0.5);

        let cached = CachedEvaluator::with_cache(evaluator.clone(), cache);

        assert_eq!(cached.fitness(&10, &[]), 0.5);
        assert_eq!(evaluator.get_evaluations(), 0);

        let cache = cached.get_cache();
        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&10).unwrap(), 0.5);
    }

    #[test]
    fn test_cached_evaluator_shared_across_threads() {
        let evaluator = TestEvaluator::new(0);
        let cached = CachedEvaluator::new(evaluator.clone());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for value in 0..25 {
                        assert_eq!(cached.fitness(&value, &[]), value as f64);
                    }
                });
            }
        });

        assert_eq!(cached.cache_size(), 25);
        // concurrent misses may evaluate a key more than once, never more than once per thread
        assert!(evaluator.get_evaluations() >= 25);
        assert!(evaluator.get_evaluations() <= 100);
    }

    #[test]
    fn test_thread_local_cached_evaluator() {
        let evaluator = TestEvaluator::new(50);
        let cached = ThreadLocalCachedEvaluator::new(evaluator.clone());

        let score1 = cached.fitness(&10, &[]);
        assert_eq!(evaluator.get_evaluations(), 1);

        let score2 = cached.fitness(&10, &[]);
        assert_eq!(evaluator.get_evaluations(), 1);
        assert_eq!(score1, score2);

        cached.fitness(&20, &[]);
        assert_eq!(evaluator.get_evaluations(), 2);
        assert_eq!(cached.cache_size(), 2);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);

        cached.fitness(&10, &[]);
        assert_eq!(evaluator.get_evaluations(), 3);
    }

    #[test]
    fn test_thread_local_caches_are_separate() {
        let evaluator = TestEvaluator::new(0);
        let cached = ThreadLocalCachedEvaluator::new(evaluator.clone());

        cached.fitness(&7, &[]);
        let other = cached.clone();
        std::thread::spawn(move || {
            assert_eq!(other.cache_size(), 0);
            other.fitness(&7, &[]);
        })
        .join()
        .unwrap();

        assert_eq!(evaluator.get_evaluations(), 2);
        assert_eq!(cached.cache_size(), 1);
    }

    #[test]
    fn test_bitstring_cache_key() {
        let bits: BitString = "1011".parse().unwrap();
        assert_eq!(bits.cache_key(), bits);
    }
}
