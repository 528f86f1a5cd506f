use crate::bitstring::BitString;
use crate::factory::CandidateFactory;
use crate::rng::RandomNumberGenerator;

/// Creates random bit strings of a fixed length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitStringFactory {
    length: usize,
}

impl BitStringFactory {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl CandidateFactory<BitString> for BitStringFactory {
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> BitString {
        BitString::random(self.length, rng)
    }
}
