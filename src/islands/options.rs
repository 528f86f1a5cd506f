use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::termination::TerminationCondition;

/// Configuration of an island run.
///
/// `population_size` and `elite_count` apply to every island. Each epoch
/// runs every island for `epoch_length` generations, then migrates
/// `migrant_count` candidates. The termination conditions are checked
/// against the combined population after each migration.
#[derive(Clone)]
pub struct IslandEvolutionOptions<T: Phenotype> {
    population_size: usize,
    elite_count: usize,
    epoch_length: usize,
    migrant_count: usize,
    termination_conditions: Vec<Arc<dyn TerminationCondition<T>>>,
}

impl<T: Phenotype> IslandEvolutionOptions<T> {
    pub fn builder() -> IslandEvolutionOptionsBuilder<T> {
        IslandEvolutionOptionsBuilder::default()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn epoch_length(&self) -> usize {
        self.epoch_length
    }

    pub fn migrant_count(&self) -> usize {
        self.migrant_count
    }

    pub fn termination_conditions(&self) -> &[Arc<dyn TerminationCondition<T>>] {
        &self.termination_conditions
    }

    /// # Errors
    ///
    /// Returns a `Precondition` error for an empty island, an elite count
    /// not smaller than the island size, a zero epoch length, more migrants
    /// than candidates per island, or no termination condition.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Precondition(
                "Island population size must be at least 1".to_string(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(GeneticError::Precondition(format!(
                "Elite count ({}) must be smaller than the island population size ({})",
                self.elite_count, self.population_size
            )));
        }
        if self.epoch_length == 0 {
            return Err(GeneticError::Precondition(
                "Epoch length must be at least 1 generation".to_string(),
            ));
        }
        if self.migrant_count > self.population_size {
            return Err(GeneticError::Precondition(format!(
                "Migrant count ({}) exceeds the island population size ({})",
                self.migrant_count, self.population_size
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

impl<T: Phenotype> fmt::Debug for IslandEvolutionOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IslandEvolutionOptions")
            .field("population_size", &self.population_size)
            .field("elite_count", &self.elite_count)
            .field("epoch_length", &self.epoch_length)
            .field("migrant_count", &self.migrant_count)
            .field("termination_conditions", &self.termination_conditions)
            .finish()
    }
}

/// Builder for [`IslandEvolutionOptions`].
#[derive(Clone)]
pub struct IslandEvolutionOptionsBuilder<T: Phenotype> {
    population_size: Option<usize>,
    elite_count: usize,
    epoch_length: Option<usize>,
    migrant_count: usize,
    termination_conditions: Vec<Arc<dyn TerminationCondition<T>>>,
}

impl<T: Phenotype> Default for IslandEvolutionOptionsBuilder<T> {
    fn default() -> Self {
        Self {
            population_size: None,
            elite_count: 0,
            epoch_length: None,
            migrant_count: 0,
            termination_conditions: Vec::new(),
        }
    }
}

impl<T: Phenotype> IslandEvolutionOptionsBuilder<T> {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = value;
        self
    }

    pub fn epoch_length(mut self, value: usize) -> Self {
        self.epoch_length = Some(value);
        self
    }

    pub fn migrant_count(mut self, value: usize) -> Self {
        self.migrant_count = value;
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

    /// # Errors
    ///
    /// Returns a `Configuration` error if the population size or the epoch
    /// length is missing, or the `Precondition` error of
    /// [`IslandEvolutionOptions::validate`].
    pub fn build(self) -> Result<IslandEvolutionOptions<T>> {
        let population_size = self.population_size.ok_or_else(|| {
            GeneticError::Configuration("Population size not specified".to_string())
        })?;
        let epoch_length = self
            .epoch_length
            .ok_or_else(|| GeneticError::Configuration("Epoch length not specified".to_string()))?;

        let options = IslandEvolutionOptions {
            population_size,
            elite_count: self.elite_count,
            epoch_length,
            migrant_count: self.migrant_count,
            termination_conditions: self.termination_conditions,
        };
        options.validate()?;
        Ok(options)
    }
}
