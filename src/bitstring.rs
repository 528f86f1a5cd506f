//! # BitString
//!
//! A fixed-length sequence of bits, the classic candidate representation for
//! binary search problems. Bit `0` is the least significant bit; the string
//! form lists the most significant bit first.
//!
//! ```rust
//! use evolve::bitstring::BitString;
//!
//! let mut bits: BitString = "1010".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert!(bits.get(1));
//! assert!(!bits.get(0));
//!
//! bits.flip(0);
//! assert_eq!(bits.ones_count(), 3);
//! assert_eq!(bits.to_string(), "1011");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::GeneticError;
use crate::rng::RandomNumberGenerator;

const WORD_BITS: usize = 64;

/// A fixed-length string of bits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    length: usize,
    words: Vec<u64>,
}

impl BitString {
    /// Creates a bit string of the given length with every bit cleared.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            words: vec![0; length.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a bit string of the given length with uniformly random bits.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let mut bits = Self::new(length);
        for word in bits.words.iter_mut() {
            *word = rand::Rng::gen(&mut rng.rng);
        }
        bits.clear_unused_bits();
        bits
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the value of the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        self.assert_index(index);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: bool) {
        self.assert_index(index);
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
    }

    /// Inverts the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn flip(&mut self, index: usize) {
        self.assert_index(index);
        self.words[index / WORD_BITS] ^= 1u64 << (index % WORD_BITS);
    }

    /// Number of bits set to one.
    pub fn ones_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Exchanges bits `[0, length)` between `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if `length` exceeds either bit string.
    pub fn swap_prefix(&mut self, other: &mut BitString, length: usize) {
        assert!(
            length <= self.length && length <= other.length,
            "prefix of {} bits exceeds bit string lengths {} and {}",
            length,
            self.length,
            other.length
        );
        let full_words = length / WORD_BITS;
        for i in 0..full_words {
            std::mem::swap(&mut self.words[i], &mut other.words[i]);
        }
        let remaining = length % WORD_BITS;
        if remaining > 0 {
            let mask = (1u64 << remaining) - 1;
            let mine = self.words[full_words] & mask;
            let theirs = other.words[full_words] & mask;
            self.words[full_words] = (self.words[full_words] & !mask) | theirs;
            other.words[full_words] = (other.words[full_words] & !mask) | mine;
        }
    }

    fn assert_index(&self, index: usize) {
        assert!(
            index < self.length,
            "bit index {} out of range for bit string of length {}",
            index,
            self.length
        );
    }

    fn clear_unused_bits(&mut self) {
        let used = self.length % WORD_BITS;
        if used > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..self.length).rev() {
            f.write_str(if self.get(index) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.len();
        let mut bits = BitString::new(length);
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits.set(length - 1 - position, true),
                other => {
                    return Err(GeneticError::Configuration(format!(
                        "Illegal character '{}' in bit string",
                        other
                    )))
                }
            }
        }
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zeros() {
        let bits = BitString::new(70);
        assert_eq!(bits.len(), 70);
        assert_eq!(bits.ones_count(), 0);
    }

    #[test]
    fn test_parse_and_display() {
        let bits: BitString = "0110010".parse().unwrap();
        assert_eq!(bits.to_string(), "0110010");
        assert!(bits.get(1));
        assert!(!bits.get(0));
        assert!(bits.get(5));
        assert_eq!(bits.ones_count(), 3);
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        assert!("10a1".parse::<BitString>().is_err());
    }

    #[test]
    fn test_set_and_flip_across_words() {
        let mut bits = BitString::new(130);
        bits.set(0, true);
        bits.set(64, true);
        bits.set(129, true);
        assert_eq!(bits.ones_count(), 3);
        bits.flip(64);
        assert!(!bits.get(64));
        assert_eq!(bits.ones_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let bits = BitString::new(8);
        bits.get(8);
    }

    #[test]
    fn test_random_respects_length() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let bits = BitString::random(10, &mut rng);
        assert!(bits.ones_count() <= 10);
        assert_eq!(bits.to_string().len(), 10);
    }

    #[test]
    fn test_swap_prefix() {
        let mut a: BitString = "11111111".parse().unwrap();
        let mut b: BitString = "00000000".parse().unwrap();
        a.swap_prefix(&mut b, 3);
        assert_eq!(a.to_string(), "11111000");
        assert_eq!(b.to_string(), "00000111");
    }

    #[test]
    fn test_swap_prefix_spanning_words() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut a = BitString::random(150, &mut rng);
        let mut b = BitString::random(150, &mut rng);
        let (original_a, original_b) = (a.clone(), b.clone());

        a.swap_prefix(&mut b, 100);

        for i in 0..150 {
            if i < 100 {
                assert_eq!(a.get(i), original_b.get(i));
                assert_eq!(b.get(i), original_a.get(i));
            } else {
                assert_eq!(a.get(i), original_a.get(i));
                assert_eq!(b.get(i), original_b.get(i));
            }
        }
    }

    #[test]
    fn test_equal_strings_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert("101".parse::<BitString>().unwrap());
        assert!(set.contains(&"101".parse::<BitString>().unwrap()));
    }
}
