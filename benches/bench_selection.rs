use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use evolve::{
    population::{sort_evaluated_population, EvaluatedCandidate},
    rng::RandomNumberGenerator,
    selection::{
        RankSelection, RouletteWheelSelection, SelectionStrategy, SigmaScaling,
        StochasticUniversalSampling, TournamentSelection, TruncationSelection,
    },
};

fn population(size: usize, rng: &mut RandomNumberGenerator) -> Vec<EvaluatedCandidate<u64>> {
    let mut population: Vec<EvaluatedCandidate<u64>> = (0..size)
        .map(|i| EvaluatedCandidate::new(i as u64, rng.next_f64() * 100.0).unwrap())
        .collect();
    sort_evaluated_population(&mut population, true);
    population
}

fn bench_selection_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let mut rng = RandomNumberGenerator::from_seed(3);

    let strategies: Vec<(&str, Box<dyn SelectionStrategy<u64>>)> = vec![
        ("roulette", Box::new(RouletteWheelSelection::new())),
        ("sus", Box::new(StochasticUniversalSampling::new())),
        ("rank", Box::new(RankSelection::new())),
        ("sigma", Box::new(SigmaScaling::new())),
        ("tournament", Box::new(TournamentSelection::new(0.7).unwrap())),
        ("truncation", Box::new(TruncationSelection::new(0.5).unwrap())),
    ];

    for size in [100, 1000, 10000].iter() {
        let candidates = population(*size, &mut rng);
        for (name, strategy) in &strategies {
            group.bench_with_input(BenchmarkId::new(*name, size), &candidates, |b, candidates| {
                b.iter(|| {
                    strategy
                        .select(black_box(candidates), true, candidates.len(), &mut rng)
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_selection_strategies);
criterion_main!(benches);
