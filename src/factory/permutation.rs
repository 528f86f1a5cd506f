use std::fmt::Debug;

use crate::factory::CandidateFactory;
use crate::rng::RandomNumberGenerator;

/// Creates random orderings of a fixed list of elements.
///
/// Every candidate contains each element exactly once, which makes this the
/// factory of choice for routing and scheduling problems.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationFactory<E> {
    elements: Vec<E>,
}

impl<E> PermutationFactory<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }
}

impl<E> CandidateFactory<Vec<E>> for PermutationFactory<E>
where
    E: Clone + Debug + Send + Sync + 'static,
{
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> Vec<E> {
        let mut candidate = self.elements.clone();
        rng.shuffle(&mut candidate);
        candidate
    }
}
