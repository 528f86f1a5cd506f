use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::operators::EvolutionaryOperator;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Applies a list of operators in order, feeding each one's output into the next.
pub struct Pipeline<T: Phenotype> {
    operators: Vec<Box<dyn EvolutionaryOperator<T>>>,
}

impl<T: Phenotype> Pipeline<T> {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `operators` is empty.
    pub fn new(operators: Vec<Box<dyn EvolutionaryOperator<T>>>) -> Result<Self> {
        if operators.is_empty() {
            return Err(GeneticError::Configuration(
                "Pipeline requires at least one operator".to_string(),
            ));
        }
        Ok(Self { operators })
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<T: Phenotype> EvolutionaryOperator<T> for Pipeline<T> {
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>> {
        self.operators
            .iter()
            .try_fold(selected, |population, operator| operator.apply(population, rng))
    }
}

/// Runs exactly one of its operators per call, cycling through them in order.
pub struct OperatorSwitch<T: Phenotype> {
    operators: Vec<Box<dyn EvolutionaryOperator<T>>>,
    cursor: AtomicUsize,
}

impl<T: Phenotype> OperatorSwitch<T> {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `operators` is empty.
    pub fn new(operators: Vec<Box<dyn EvolutionaryOperator<T>>>) -> Result<Self> {
        if operators.is_empty() {
            return Err(GeneticError::Configuration(
                "Operator switch requires at least one operator".to_string(),
            ));
        }
        Ok(Self {
            operators,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Index of the operator the next call will run.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl<T: Phenotype> EvolutionaryOperator<T> for OperatorSwitch<T> {
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>> {
        let count = self.operators.len();
        let index = self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| Some((c + 1) % count))
            .unwrap_or_else(|current| current);
        trace!(index, "operator switch");
        self.operators[index].apply(selected, rng)
    }
}
