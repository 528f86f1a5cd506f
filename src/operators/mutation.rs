use std::fmt::Debug;

use crate::bitstring::BitString;
use crate::error::{GeneticError, Result};
use crate::factory::string::ascii_alphabet;
use crate::generator::{Constant, NumberGenerator};
use crate::operators::EvolutionaryOperator;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Produces a (possibly) modified copy of one candidate.
///
/// The mutater decides whether and how to change the candidate; returning an
/// unchanged copy is fine.
pub trait Mutater<T: Phenotype>: Send + Sync {
    fn mutate(&self, candidate: &T, rng: &mut RandomNumberGenerator) -> T;
}

impl<T, F> Mutater<T> for F
where
    T: Phenotype,
    F: Fn(&T, &mut RandomNumberGenerator) -> T + Send + Sync,
{
    fn mutate(&self, candidate: &T, rng: &mut RandomNumberGenerator) -> T {
        self(candidate, rng)
    }
}

/// Applies a [`Mutater`] to every selected candidate.
#[derive(Debug, Clone)]
pub struct Mutation<M> {
    mutater: M,
}

impl<M> Mutation<M> {
    pub fn new(mutater: M) -> Self {
        Self { mutater }
    }
}

impl<T, M> EvolutionaryOperator<T> for Mutation<M>
where
    T: Phenotype,
    M: Mutater<T>,
{
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>> {
        Ok(selected
            .iter()
            .map(|candidate| self.mutater.mutate(candidate, rng))
            .collect())
    }
}

fn check_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::Configuration(format!(
            "Mutation probability must be in [0, 1], got {}",
            probability
        )));
    }
    Ok(())
}

/// Flips random bits of a [`BitString`].
///
/// With the configured probability a candidate is mutated by flipping
/// `flip_count` randomly chosen bits (the same bit may be picked twice).
/// Generated probabilities are clamped to `[0, 1]`.
#[derive(Debug)]
pub struct BitStringMutater {
    probability: Box<dyn NumberGenerator<f64>>,
    flip_count: Box<dyn NumberGenerator<u32>>,
}

impl BitStringMutater {
    /// Flips a single bit with the given probability.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        check_probability(probability)?;
        Ok(Self {
            probability: Box::new(Constant(probability)),
            flip_count: Box::new(Constant(1)),
        })
    }

    pub fn with_generators<P, C>(probability: P, flip_count: C) -> Self
    where
        P: NumberGenerator<f64> + 'static,
        C: NumberGenerator<u32> + 'static,
    {
        Self {
            probability: Box::new(probability),
            flip_count: Box::new(flip_count),
        }
    }

    pub fn with_flip_count(mut self, flip_count: u32) -> Self {
        self.flip_count = Box::new(Constant(flip_count));
        self
    }
}

impl Mutater<BitString> for BitStringMutater {
    fn mutate(&self, candidate: &BitString, rng: &mut RandomNumberGenerator) -> BitString {
        let probability = self.probability.next_value(rng).clamp(0.0, 1.0);
        let mut mutant = candidate.clone();
        if mutant.is_empty() || rng.next_f64() >= probability {
            return mutant;
        }
        let flips = self.flip_count.next_value(rng);
        for _ in 0..flips {
            let index = rng.next_index(mutant.len());
            mutant.flip(index);
        }
        mutant
    }
}

/// Replaces characters of a string with random characters from an alphabet.
///
/// Every character is replaced independently with the configured probability.
#[derive(Debug, Clone)]
pub struct StringMutater {
    alphabet: Vec<u8>,
    probability: f64,
}

impl StringMutater {
    /// # Errors
    ///
    /// Returns a `Configuration` error if `alphabet` is empty or not ASCII,
    /// or if `probability` is not in `[0, 1]`.
    pub fn new(alphabet: &str, probability: f64) -> Result<Self> {
        check_probability(probability)?;
        Ok(Self {
            alphabet: ascii_alphabet(alphabet)?,
            probability,
        })
    }
}

impl Mutater<String> for StringMutater {
    fn mutate(&self, candidate: &String, rng: &mut RandomNumberGenerator) -> String {
        candidate
            .chars()
            .map(|c| {
                if rng.next_f64() < self.probability {
                    self.alphabet[rng.next_index(self.alphabet.len())] as char
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Reorders the elements of a list by swapping pairs.
///
/// Performs `count` swaps; each swaps a random element with the one
/// `amount` positions further along (wrapping around). Every element is
/// preserved, so permutations stay valid.
#[derive(Debug)]
pub struct ListOrderMutater {
    count: Box<dyn NumberGenerator<u32>>,
    amount: Box<dyn NumberGenerator<u32>>,
}

impl ListOrderMutater {
    /// One swap of adjacent elements per candidate.
    pub fn new() -> Self {
        Self::with_generators(Constant(1), Constant(1))
    }

    pub fn with_generators<C, A>(count: C, amount: A) -> Self
    where
        C: NumberGenerator<u32> + 'static,
        A: NumberGenerator<u32> + 'static,
    {
        Self {
            count: Box::new(count),
            amount: Box::new(amount),
        }
    }
}

impl Default for ListOrderMutater {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Mutater<Vec<E>> for ListOrderMutater
where
    E: Clone + Debug + Send + Sync + 'static,
{
    fn mutate(&self, candidate: &Vec<E>, rng: &mut RandomNumberGenerator) -> Vec<E> {
        let mut mutant = candidate.clone();
        if mutant.len() < 2 {
            return mutant;
        }
        let count = self.count.next_value(rng);
        for _ in 0..count {
            let from = rng.next_index(mutant.len());
            let amount = self.amount.next_value(rng) as usize;
            let to = (from + amount) % mutant.len();
            mutant.swap(from, to);
        }
        mutant
    }
}
