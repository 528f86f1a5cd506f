pub mod bitstring;
pub mod caching;
pub mod error;
pub mod evolution;
pub mod factory;
pub mod generator;
pub mod islands;
pub mod operators;
pub mod phenotype;
pub mod pool;
pub mod population;
pub mod rng;
pub mod selection;
pub mod stats;
pub mod termination;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{
    EvolutionEngine, EvolutionEngineBuilder, EvolutionOptions, EvolutionResult, FitnessEvaluator,
    FitnessFunction, GenerationalEpoch,
};
pub use factory::CandidateFactory;
pub use operators::EvolutionaryOperator;
pub use phenotype::Phenotype;
pub use population::EvaluatedCandidate;
pub use rng::RandomNumberGenerator;
pub use selection::SelectionStrategy;
pub use stats::PopulationStats;
pub use termination::TerminationCondition;
