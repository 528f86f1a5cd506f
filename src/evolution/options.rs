//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct describes one evolution run: the population
//! size, how many elites survive unchanged into each new generation, optional
//! seed candidates for the initial population, and the termination
//! conditions that end the run.
//!
//! ## Example
//!
//! ```rust
//! use evolve::evolution::options::EvolutionOptions;
//! use evolve::termination::{GenerationCount, TargetFitness};
//!
//! let options = EvolutionOptions::<u32>::builder()
//!     .population_size(50)
//!     .elite_count(2)
//!     .seeds(vec![7, 11])
//!     .end_on(TargetFitness::new(100.0, true))
//!     .end_on(GenerationCount::new(500).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.population_size(), 50);
//! assert_eq!(options.termination_conditions().len(), 2);
//!
//! // a run needs at least one way to stop
//! assert!(EvolutionOptions::<u32>::builder().population_size(10).build().is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::termination::TerminationCondition;

/// Configuration of a single evolution run.
#[derive(Clone)]
pub struct EvolutionOptions<T: Phenotype> {
    population_size: usize,
    elite_count: usize,
    seeds: Vec<T>,
    termination_conditions: Vec<Arc<dyn TerminationCondition<T>>>,
}

impl<T: Phenotype> EvolutionOptions<T> {
    /// Creates options without seeds or termination conditions.
    ///
    /// Add at least one condition with [`EvolutionOptions::end_on`] before
    /// evolving.
    pub fn new(population_size: usize, elite_count: usize) -> Self {
        Self {
            population_size,
            elite_count,
            seeds: Vec::new(),
            termination_conditions: Vec::new(),
        }
    }

    pub fn builder() -> EvolutionOptionsBuilder<T> {
        EvolutionOptionsBuilder::default()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn seeds(&self) -> &[T] {
        &self.seeds
    }

    pub fn termination_conditions(&self) -> &[Arc<dyn TerminationCondition<T>>] {
        &self.termination_conditions
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_elite_count(&mut self, elite_count: usize) {
        self.elite_count = elite_count;
    }

    pub fn set_seeds(&mut self, seeds: Vec<T>) {
        self.seeds = seeds;
    }

    pub fn end_on<C>(mut self, condition: C) -> Self
    where
        C: TerminationCondition<T> + 'static,
    {
        self.termination_conditions.push(Arc::new(condition));
        self
    }

    /// Adds a shared condition, e.g. a [`UserAbort`](crate::termination::UserAbort)
    /// that is also held by the caller.
    pub fn end_on_arc(mut self, condition: Arc<dyn TerminationCondition<T>>) -> Self {
        self.termination_conditions.push(condition);
        self
    }

    /// Checks the preconditions of a run.
    ///
    /// # Errors
    ///
    /// Returns a `Precondition` error if the population is empty, the elite
    /// count is not smaller than the population, or no termination condition
    /// is configured.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Precondition(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(GeneticError::Precondition(format!(
                "Elite count ({}) must be smaller than the population size ({})",
                self.elite_count, self.population_size
            )));
        }
        if self.termination_conditions.is_empty() {
            return Err(GeneticError::Precondition(
                "At least one termination condition is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl<T: Phenotype> fmt::Debug for EvolutionOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvolutionOptions")
            .field("population_size", &self.population_size)
            .field("elite_count", &self.elite_count)
            .field("seeds", &self.seeds.len())
            .field("termination_conditions", &self.termination_conditions)
            .finish()
    }
}

/// Builder for [`EvolutionOptions`].
#[derive(Clone)]
pub struct EvolutionOptionsBuilder<T: Phenotype> {
    population_size: Option<usize>,
    elite_count: Option<usize>,
    seeds: Vec<T>,
    termination_conditions: Vec<Arc<dyn TerminationCondition<T>>>,
}

impl<T: Phenotype> Default for EvolutionOptionsBuilder<T> {
    fn default() -> Self {
        Self {
            population_size: None,
            elite_count: None,
            seeds: Vec::new(),
            termination_conditions: Vec::new(),
        }
    }
}

impl<T: Phenotype> EvolutionOptionsBuilder<T> {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn seeds(mut self, value: Vec<T>) -> Self {
        self.seeds = value;
        self
    }

    pub fn end_on<C>(mut self, condition: C) -> Self
    where
        C: TerminationCondition<T> + 'static,
    {
        self.termination_conditions.push(Arc::new(condition));
        self
    }

    pub fn end_on_arc(mut self, condition: Arc<dyn TerminationCondition<T>>) -> Self {
        self.termination_conditions.push(condition);
        self
    }

    /// Builds and validates the options. The elite count defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if no population size was given, or
    /// the `Precondition` error of [`EvolutionOptions::validate`].
    pub fn build(self) -> Result<EvolutionOptions<T>> {
        let population_size = self.population_size.ok_or_else(|| {
            GeneticError::Configuration("Population size not specified".to_string())
        })?;

        let options = EvolutionOptions {
            population_size,
            elite_count: self.elite_count.unwrap_or(0),
            seeds: self.seeds,
            termination_conditions: self.termination_conditions,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::{GenerationCount, UserAbort};

    #[test]
    fn test_builder_defaults() {
        let options = EvolutionOptions::<u8>::builder()
            .population_size(10)
            .end_on(GenerationCount::new(3).unwrap())
            .build()
            .unwrap();

        assert_eq!(options.population_size(), 10);
        assert_eq!(options.elite_count(), 0);
        assert!(options.seeds().is_empty());
    }

    #[test]
    fn test_missing_population_size() {
        let result = EvolutionOptions::<u8>::builder()
            .end_on(UserAbort::new())
            .build();
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_validate() {
        let abort = UserAbort::new();

        let zero = EvolutionOptions::<u8>::new(0, 0).end_on(abort.clone());
        assert!(matches!(zero.validate(), Err(GeneticError::Precondition(_))));

        let elites = EvolutionOptions::<u8>::new(5, 5).end_on(abort.clone());
        assert!(matches!(elites.validate(), Err(GeneticError::Precondition(_))));

        let no_conditions = EvolutionOptions::<u8>::new(5, 1);
        assert!(matches!(
            no_conditions.validate(),
            Err(GeneticError::Precondition(_))
        ));

        let valid = EvolutionOptions::<u8>::new(5, 4).end_on(abort);
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_shared_condition() {
        let abort = Arc::new(UserAbort::new());
        let options = EvolutionOptions::<u8>::new(5, 0).end_on_arc(abort.clone());
        assert_eq!(options.termination_conditions()[0].to_string(), "UserAbort");
    }
}
