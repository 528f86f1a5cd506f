use evolve::{
    caching::CacheKey,
    evolution::{
        CacheType, CachingEvaluator, EvolutionEngineBuilder, EvolutionOptions, FitnessEvaluator,
        GenerationalEpoch,
    },
    operators::Mutation,
    rng::RandomNumberGenerator,
    selection::TournamentSelection,
    termination::GenerationCount,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// A small candidate whose cache key is its value
#[derive(Clone, Debug, PartialEq)]
struct Dial {
    value: i32,
}

impl CacheKey for Dial {
    type Key = i32;

    fn cache_key(&self) -> Self::Key {
        self.value
    }
}

// An evaluator that counts how often it actually runs
#[derive(Clone)]
struct CostlyEvaluator {
    evaluations: Arc<AtomicUsize>,
}

impl CostlyEvaluator {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl FitnessEvaluator<Dial> for CostlyEvaluator {
    fn fitness(&self, candidate: &Dial, _population: &[Dial]) -> f64 {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(1));
        (candidate.value - 5).abs() as f64
    }

    fn is_natural(&self) -> bool {
        false
    }
}

fn random_dial(rng: &mut RandomNumberGenerator) -> Dial {
    Dial {
        value: rng.gen_range(0..10),
    }
}

fn nudge(dial: &Dial, rng: &mut RandomNumberGenerator) -> Dial {
    Dial {
        value: (dial.value + rng.gen_range(-1..=1)).clamp(0, 9),
    }
}

#[test]
fn test_direct_caching() {
    let evaluator = CostlyEvaluator::new();
    let cached = evaluator.with_global_cache();

    let dial = Dial { value: 42 };
    assert_eq!(cached.fitness(&dial, &[]), 37.0);
    assert_eq!(evaluator.evaluations(), 1);

    // Second evaluation comes from the cache
    assert_eq!(cached.fitness(&dial, &[]), 37.0);
    assert_eq!(evaluator.evaluations(), 1);

    assert_eq!(cached.fitness(&Dial { value: 3 }, &[]), 2.0);
    assert_eq!(evaluator.evaluations(), 2);
    assert_eq!(cached.cache_size(), 2);

    cached.clear_cache();
    assert_eq!(cached.cache_size(), 0);
    cached.fitness(&dial, &[]);
    assert_eq!(evaluator.evaluations(), 3);
}

#[test]
fn test_thread_local_caching() {
    let evaluator = CostlyEvaluator::new();
    let cached = evaluator.with_thread_local_cache();

    let dial = Dial { value: 7 };
    assert_eq!(cached.fitness(&dial, &[]), 2.0);
    assert_eq!(cached.fitness(&dial, &[]), 2.0);
    assert_eq!(evaluator.evaluations(), 1);

    let thread_cached = cached.clone();
    let thread_dial = dial.clone();
    std::thread::spawn(move || {
        assert_eq!(thread_cached.fitness(&thread_dial, &[]), 2.0);
    })
    .join()
    .unwrap();

    // The other thread had its own cache
    assert_eq!(evaluator.evaluations(), 2);
}

#[test]
fn test_boxed_cache_keeps_direction() {
    let evaluator = CostlyEvaluator::new();
    for cache_type in [CacheType::Global, CacheType::ThreadLocal] {
        let boxed = evaluator.with_cache(cache_type);
        assert!(!boxed.is_natural());
        assert_eq!(boxed.fitness(&Dial { value: 5 }, &[]), 0.0);
    }
}

fn evolve_with<E>(evaluator: E, concurrency: usize) -> Dial
where
    E: FitnessEvaluator<Dial>,
{
    let mut engine = EvolutionEngineBuilder::<Dial, _, _, _>::new()
        .with_factory(random_dial)
        .with_evaluator(evaluator)
        .with_epoch_strategy(GenerationalEpoch::new(
            Mutation::new(nudge),
            TournamentSelection::new(0.75).unwrap(),
        ))
        .with_seed(11)
        .with_concurrency(concurrency)
        .build()
        .unwrap();

    let options = EvolutionOptions::new(20, 2).end_on(GenerationCount::new(10).unwrap());
    engine.evolve(&options).unwrap()
}

#[test]
fn test_evolution_with_caching() {
    let plain = CostlyEvaluator::new();
    let best_without_cache = evolve_with(plain.clone(), 1);
    assert_eq!(plain.evaluations(), 200);

    let counted = CostlyEvaluator::new();
    let best_with_cache = evolve_with(counted.with_global_cache(), 1);

    // Only ten distinct dial positions exist
    assert!(counted.evaluations() <= 10);
    // Caching does not change the outcome of a seeded run
    assert_eq!(best_with_cache, best_without_cache);
}

#[test]
fn test_parallel_evolution_with_thread_local_cache() {
    let counted = CostlyEvaluator::new();
    let best = evolve_with(counted.with_thread_local_cache(), 4);

    assert!(counted.evaluations() <= 10 * 4);
    assert!((0..10).contains(&best.value));
}
