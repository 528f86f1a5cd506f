//! # Error Types
//!
//! This module defines the error type shared by the whole library. Every
//! failure that can happen while configuring or running an evolution is
//! reported through [`GeneticError`] and the [`Result`] alias.
//!
//! Errors fall into a few categories:
//!
//! - configuration errors, returned when an operator or strategy is built
//!   with out-of-range parameters,
//! - precondition violations, returned when `evolve` is called with an
//!   invalid population size, elite count or no termination condition,
//! - illegal state errors, such as asking for satisfied termination
//!   conditions before a run has finished,
//! - fitness errors, raised when an evaluator produces a negative or
//!   non-finite score.
//!
//! ## Examples
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evolve::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> evolve::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert!(find_best_candidate(&[]).is_err());
//! assert_eq!(find_best_candidate(&[3, 9, 4]).unwrap(), 9);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur in the evolution library.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An operator, strategy or condition was configured with invalid parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument violated a documented precondition.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// An evaluated candidate was constructed with a negative fitness score.
    #[error("Fitness must be non-negative, got {0}")]
    NegativeFitness(f64),

    /// A fitness calculation produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// An operation was attempted while the object was in the wrong state.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A statistic was requested from a dataset that holds no values.
    #[error("Cannot compute statistics on an empty dataset")]
    EmptyDataset,

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// An evolutionary operator or epoch failed.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for evolution operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// This trait provides a convenient way to add context to errors when
/// converting from a foreign error type to `GeneticError`.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    ///
    /// The error is converted into [`GeneticError::Other`] carrying both the
    /// context and the original message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
