use crate::error::{GeneticError, Result};
use crate::factory::CandidateFactory;
use crate::rng::RandomNumberGenerator;

/// Creates random strings of a fixed length over an ASCII alphabet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFactory {
    alphabet: Vec<u8>,
    length: usize,
}

impl StringFactory {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `alphabet` is empty or contains
    /// non-ASCII characters.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        Ok(Self {
            alphabet: ascii_alphabet(alphabet)?,
            length,
        })
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl CandidateFactory<String> for StringFactory {
    fn generate_random_candidate(&self, rng: &mut RandomNumberGenerator) -> String {
        (0..self.length)
            .map(|_| self.alphabet[rng.next_index(self.alphabet.len())] as char)
            .collect()
    }
}

/// Validates an alphabet for byte-wise string operators.
pub(crate) fn ascii_alphabet(alphabet: &str) -> Result<Vec<u8>> {
    if alphabet.is_empty() {
        return Err(GeneticError::Configuration(
            "Alphabet must not be empty".to_string(),
        ));
    }
    if !alphabet.is_ascii() {
        return Err(GeneticError::Configuration(format!(
            "Alphabet must only contain ASCII characters, got {:?}",
            alphabet
        )));
    }
    Ok(alphabet.as_bytes().to_vec())
}
