//! Shared machinery for fitness-proportionate selection.
//!
//! Proportionate selectors work on non-negative weights, where a bigger
//! weight means a better chance of being picked. [`selection_weights`] turns
//! raw scores into such weights for either fitness direction.

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;

/// Maps a raw score to a selection weight.
///
/// Natural scores are used as-is. Non-natural scores are inverted, with a
/// perfect score of zero mapped to `f64::MAX`. Scores so close to zero that
/// their reciprocal overflows count as perfect too.
pub fn adjusted_fitness(fitness: f64, natural: bool) -> f64 {
    if natural {
        return fitness;
    }
    let inverted = 1.0 / fitness;
    if inverted.is_finite() {
        inverted
    } else {
        f64::MAX
    }
}

/// Computes selection weights for a sequence of scores.
///
/// The returned weights are scaled so the largest one is `1.0`, which keeps
/// their sum positive and finite:
/// - if any non-natural score is perfect, only the perfect candidates get a
///   weight (of one each), so they share the selection uniformly;
/// - if every weight is zero, all candidates get a weight of one.
pub fn selection_weights<I>(scores: I, natural: bool) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut weights: Vec<f64> = scores
        .into_iter()
        .map(|score| adjusted_fitness(score, natural))
        .collect();

    if !natural && weights.iter().any(|&w| w == f64::MAX) {
        for weight in weights.iter_mut() {
            *weight = if *weight == f64::MAX { 1.0 } else { 0.0 };
        }
        return weights;
    }

    let largest = weights.iter().copied().fold(0.0, f64::max);
    if largest > 0.0 {
        weights.iter_mut().for_each(|weight| *weight /= largest);
    } else {
        weights.iter_mut().for_each(|weight| *weight = 1.0);
    }

    weights
}

/// A selector that picks indices with probability proportional to weight.
///
/// Implementors can be plugged into [`RankSelection`](super::RankSelection)
/// and [`SigmaScaling`](super::SigmaScaling).
pub trait ProportionateSelection: Debug + Send + Sync {
    /// Picks `count` indices into `weights`.
    ///
    /// `weights` is non-empty and its sum is positive and finite.
    fn select_indices(
        &self,
        weights: &[f64],
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<usize>;
}

/// Runs a proportionate selector over an evaluated population.
pub(crate) fn select_proportionate<T, S>(
    selector: &S,
    population: &[EvaluatedCandidate<T>],
    scores: Vec<f64>,
    natural: bool,
    count: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<T>>
where
    T: Phenotype,
    S: ProportionateSelection + ?Sized,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    let weights = selection_weights(scores, natural);
    Ok(selector
        .select_indices(&weights, count, rng)
        .into_iter()
        .map(|index| population[index].candidate().clone())
        .collect())
}
