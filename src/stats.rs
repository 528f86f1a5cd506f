//! # Statistics
//!
//! [`Dataset`] accumulates floating-point values and answers the usual
//! descriptive statistics. [`PopulationStats`] is the per-generation snapshot
//! handed to observers and termination conditions.
//!
//! ```rust
//! use evolve::stats::Dataset;
//!
//! let mut data = Dataset::new();
//! data.add_values(&[1.0, 2.0, 3.0, 4.0]);
//!
//! assert_eq!(data.len(), 4);
//! assert_eq!(data.arithmetic_mean().unwrap(), 2.5);
//! assert_eq!(data.median().unwrap(), 2.5);
//! assert!(Dataset::new().maximum().is_err());
//! ```

use std::time::{Duration, Instant};

use crate::error::{GeneticError, OptionExt, Result};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;

/// An append-only multiset of values with running aggregates.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Dataset {
    values: Vec<f64>,
    total: f64,
    product: f64,
    reciprocal_sum: f64,
    log_sum: f64,
    minimum: f64,
    maximum: f64,
}

impl Dataset {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            total: 0.0,
            product: 1.0,
            reciprocal_sum: 0.0,
            log_sum: 0.0,
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
        }
    }

    pub fn add_value(&mut self, value: f64) {
        self.values.push(value);
        self.total += value;
        self.product *= value;
        self.reciprocal_sum += 1.0 / value;
        self.log_sum += value.ln();
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
    }

    pub fn add_values(&mut self, values: &[f64]) {
        for &value in values {
            self.add_value(value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(GeneticError::EmptyDataset);
        }
        Ok(())
    }

    pub fn minimum(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.minimum)
    }

    pub fn maximum(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.maximum)
    }

    /// The median, computed on a sorted copy of the values.
    pub fn median(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let middle = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Ok((sorted[middle - 1] + sorted[middle]) / 2.0)
        } else {
            Ok(sorted[middle])
        }
    }

    /// The sum of all values.
    pub fn aggregate(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.total)
    }

    pub fn product(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.product)
    }

    pub fn reciprocal_sum(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.reciprocal_sum)
    }

    pub fn arithmetic_mean(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.total / self.values.len() as f64)
    }

    /// The n-th root of the product, computed through logarithms to avoid overflow.
    pub fn geometric_mean(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok((self.log_sum / self.values.len() as f64).exp())
    }

    pub fn harmonic_mean(&self) -> Result<f64> {
        self.ensure_not_empty()?;
        Ok(self.values.len() as f64 / self.reciprocal_sum)
    }

    /// Mean absolute deviation from the arithmetic mean.
    pub fn mean_deviation(&self) -> Result<f64> {
        let mean = self.arithmetic_mean()?;
        let deviations: f64 = self.values.iter().map(|v| (v - mean).abs()).sum();
        Ok(deviations / self.values.len() as f64)
    }

    fn sum_squared_diffs(&self) -> Result<f64> {
        let mean = self.arithmetic_mean()?;
        Ok(self.values.iter().map(|v| (v - mean).powi(2)).sum())
    }

    /// Population variance.
    pub fn variance(&self) -> Result<f64> {
        Ok(self.sum_squared_diffs()? / self.values.len() as f64)
    }

    /// Population standard deviation.
    pub fn standard_deviation(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Sample variance (Bessel's correction). Needs at least two values.
    pub fn sample_variance(&self) -> Result<f64> {
        if self.values.len() < 2 {
            return Err(GeneticError::IllegalState(format!(
                "Sample variance needs at least two values, dataset has {}",
                self.values.len()
            )));
        }
        Ok(self.sum_squared_diffs()? / (self.values.len() - 1) as f64)
    }

    pub fn sample_standard_deviation(&self) -> Result<f64> {
        Ok(self.sample_variance()?.sqrt())
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a single generation, passed to observers and
/// termination conditions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct PopulationStats<T> {
    pub best_candidate: T,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub fitness_standard_deviation: f64,
    pub natural: bool,
    pub population_size: usize,
    pub elite_count: usize,
    /// Zero-based index of the generation (or epoch for island runs).
    pub generation: usize,
    /// Time since evolution started.
    pub elapsed: Duration,
}

/// Computes the statistics of a population that is already sorted best-first.
///
/// # Errors
///
/// Returns `EmptyPopulation` if the population is empty.
pub fn compute_population_stats<T: Phenotype>(
    population: &[EvaluatedCandidate<T>],
    natural: bool,
    elite_count: usize,
    generation: usize,
    start: Instant,
) -> Result<PopulationStats<T>> {
    let best = population
        .first()
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

    let mut dataset = Dataset::with_capacity(population.len());
    for candidate in population {
        dataset.add_value(candidate.fitness());
    }

    Ok(PopulationStats {
        best_candidate: best.candidate().clone(),
        best_fitness: best.fitness(),
        mean_fitness: dataset.arithmetic_mean()?,
        fitness_standard_deviation: dataset.standard_deviation()?,
        natural,
        population_size: population.len(),
        elite_count,
        generation,
        elapsed: start.elapsed(),
    })
}
