//! # Evolution
//!
//! The generation loop and the pluggable pieces it is driven by: fitness
//! evaluators, epoch strategies, observers and run options.

pub mod builder;
pub mod caching_evaluator;
pub mod engine;
pub mod epoch;
pub mod evaluator;
pub mod observer;
pub mod options;

pub use builder::EvolutionEngineBuilder;
pub use caching_evaluator::{CacheType, CachingEvaluator};
pub use engine::{evaluate_population, EvolutionEngine, EvolutionResult};
pub use epoch::{EpochStrategy, GenerationalEpoch};
pub use evaluator::{FitnessEvaluator, FitnessFunction};
pub use observer::{EvolutionObserver, LoggingObserver};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
