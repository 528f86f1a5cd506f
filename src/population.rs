//! # Population
//!
//! An evaluated population is a `Vec<EvaluatedCandidate<T>>`. After
//! [`sort_evaluated_population`] it is ordered best-first with respect to the
//! evaluator's natural flag: index 0 holds the largest score for natural
//! fitness and the smallest score for non-natural fitness.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;

/// A candidate paired with its fitness score.
///
/// Equality, hashing and ordering consider the fitness only. The score is
/// guaranteed to be finite and non-negative.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvaluatedCandidate<T> {
    candidate: T,
    fitness: f64,
}

impl<T> EvaluatedCandidate<T> {
    /// Pairs a candidate with its fitness score.
    ///
    /// # Errors
    ///
    /// Returns `NegativeFitness` for scores below zero and
    /// `FitnessCalculation` for NaN or infinite scores.
    pub fn new(candidate: T, fitness: f64) -> Result<Self> {
        if fitness.is_nan() || fitness.is_infinite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                fitness
            )));
        }
        if fitness < 0.0 {
            return Err(GeneticError::NegativeFitness(fitness));
        }
        // normalizes -0.0
        let fitness = fitness + 0.0;
        Ok(Self { candidate, fitness })
    }

    pub fn candidate(&self) -> &T {
        &self.candidate
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn into_candidate(self) -> T {
        self.candidate
    }
}

impl<T> PartialEq for EvaluatedCandidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl<T> Eq for EvaluatedCandidate<T> {}

impl<T> PartialOrd for EvaluatedCandidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EvaluatedCandidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

impl<T> Hash for EvaluatedCandidate<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fitness.to_bits().hash(state);
    }
}

/// Orders two fitness scores so that the better one comes first.
pub fn compare_fitness(a: f64, b: f64, natural: bool) -> Ordering {
    if natural {
        b.total_cmp(&a)
    } else {
        a.total_cmp(&b)
    }
}

/// Returns `true` if `a` is strictly better than `b`.
pub fn is_fitter(a: f64, b: f64, natural: bool) -> bool {
    compare_fitness(a, b, natural) == Ordering::Less
}

/// Sorts a population best-first. The sort is stable.
pub fn sort_evaluated_population<T>(population: &mut [EvaluatedCandidate<T>], natural: bool) {
    population.sort_by(|a, b| compare_fitness(a.fitness, b.fitness, natural));
}

/// Returns `true` if the population is ordered best-first.
pub fn is_sorted<T>(population: &[EvaluatedCandidate<T>], natural: bool) -> bool {
    population
        .windows(2)
        .all(|pair| compare_fitness(pair[0].fitness, pair[1].fitness, natural) != Ordering::Greater)
}

/// Strips the fitness scores, keeping candidate order.
pub fn candidates_of<T: Phenotype>(population: &[EvaluatedCandidate<T>]) -> Vec<T> {
    population.iter().map(|e| e.candidate.clone()).collect()
}
