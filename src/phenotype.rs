//! # Phenotype Trait
//!
//! The `Phenotype` trait names the bounds a candidate solution must satisfy
//! to flow through the engine. Candidates are opaque to the library: all
//! problem knowledge lives in the factory, the evaluator and the operators
//! supplied by the user.
//!
//! The trait is implemented automatically for every type that is `Clone`,
//! `Debug`, `Send`, `Sync` and `'static`, so plain types such as `String`,
//! `Vec<u8>` or [`BitString`](crate::bitstring::BitString) can be evolved
//! directly.
//!
//! ```rust
//! use evolve::phenotype::Phenotype;
//!
//! fn assert_phenotype<P: Phenotype>() {}
//!
//! assert_phenotype::<String>();
//! assert_phenotype::<Vec<i32>>();
//! ```

use std::fmt::Debug;

/// Trait for types that represent candidate solutions in an evolutionary algorithm.
///
/// Candidates are treated as immutable within a generation. Operators never
/// modify a candidate in place; they produce fresh values instead. The
/// `Send + Sync` bounds allow candidates to be evaluated on worker threads.
pub trait Phenotype: Clone + Debug + Send + Sync + 'static {}

impl<T> Phenotype for T where T: Clone + Debug + Send + Sync + 'static {}
