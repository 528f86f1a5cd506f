pub mod identity;
pub mod proportionate;
pub mod rank;
pub mod roulette;
pub mod selection_strategy;
pub mod sigma;
pub mod sus;
pub mod tournament;
pub mod truncation;

pub use identity::IdentitySelection;
pub use proportionate::{adjusted_fitness, selection_weights, ProportionateSelection};
pub use rank::RankSelection;
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::SelectionStrategy;
pub use sigma::SigmaScaling;
pub use sus::StochasticUniversalSampling;
pub use tournament::TournamentSelection;
pub use truncation::TruncationSelection;
