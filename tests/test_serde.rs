#![cfg(feature = "serde")]

use evolve::{
    bitstring::BitString,
    population::EvaluatedCandidate,
    stats::compute_population_stats,
    termination::TargetFitness,
};
use std::time::Instant;

#[test]
fn test_population_stats_to_json() {
    let population = vec![
        EvaluatedCandidate::new("111".parse::<BitString>().unwrap(), 3.0).unwrap(),
        EvaluatedCandidate::new("101".parse::<BitString>().unwrap(), 2.0).unwrap(),
    ];
    let stats = compute_population_stats(&population, true, 1, 4, Instant::now()).unwrap();

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["best_fitness"], 3.0);
    assert_eq!(json["mean_fitness"], 2.5);
    assert_eq!(json["generation"], 4);
    assert_eq!(json["best_candidate"]["length"], 3);
}

#[test]
fn test_termination_condition_from_json() {
    let condition: TargetFitness =
        serde_json::from_str(r#"{"fitness": 0.0, "natural": false}"#).unwrap();
    assert_eq!(condition, TargetFitness::new(0.0, false));
}
