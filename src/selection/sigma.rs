use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;
use crate::selection::proportionate::{select_proportionate, ProportionateSelection};
use crate::selection::selection_strategy::SelectionStrategy;
use crate::selection::sus::StochasticUniversalSampling;
use crate::stats::Dataset;

/// The smallest scaled score; keeps weak candidates selectable.
const MIN_SCALED_FITNESS: f64 = 0.1;

/// Sigma scaling.
///
/// Rescales raw scores relative to the population mean `μ` and standard
/// deviation `σ` as `max(0.1, 1 + (f - μ) / (2σ))`, which keeps selection
/// pressure steady as the population converges. When `σ` is zero every
/// candidate scores 1. The scaled scores are handed to a proportionate
/// selector with the original fitness direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct SigmaScaling<S = StochasticUniversalSampling> {
    selector: S,
}

impl SigmaScaling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> SigmaScaling<S>
where
    S: ProportionateSelection,
{
    pub fn with_selector(selector: S) -> Self {
        Self { selector }
    }

    fn scaled_scores<T>(population: &[EvaluatedCandidate<T>]) -> Result<Vec<f64>> {
        let mut dataset = Dataset::with_capacity(population.len());
        for candidate in population {
            dataset.add_value(candidate.fitness());
        }
        let mean = dataset.arithmetic_mean()?;
        let sigma = dataset.standard_deviation()?;

        Ok(population
            .iter()
            .map(|candidate| {
                if sigma == 0.0 {
                    1.0
                } else {
                    (1.0 + (candidate.fitness() - mean) / (2.0 * sigma)).max(MIN_SCALED_FITNESS)
                }
            })
            .collect())
    }
}

impl<T, S> SelectionStrategy<T> for SigmaScaling<S>
where
    T: Phenotype,
    S: ProportionateSelection,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let scores = Self::scaled_scores(population)?;
        select_proportionate(&self.selector, population, scores, natural, count, rng)
    }
}
