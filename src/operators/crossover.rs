use std::fmt::Debug;

use crate::bitstring::BitString;
use crate::error::{GeneticError, Result};
use crate::generator::{Constant, NumberGenerator};
use crate::operators::EvolutionaryOperator;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Produces two offspring from two parents.
pub trait Mater<T: Phenotype>: Send + Sync {
    /// Crosses `first` and `second` at `crossover_points` positions.
    ///
    /// The parents are left untouched; the offspring are fresh values.
    fn mate(
        &self,
        first: &T,
        second: &T,
        crossover_points: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(T, T)>;
}

/// Pairwise crossover driven by a [`Mater`].
///
/// The selected list is shuffled, then consecutive pairs are mated with the
/// configured probability. Pairs that are not mated, and the trailing
/// candidate of an odd-sized list, pass through unchanged. Both the
/// probability and the number of crossover points are drawn once per pair.
pub struct Crossover<M> {
    mater: M,
    probability: Box<dyn NumberGenerator<f64>>,
    crossover_points: Box<dyn NumberGenerator<u32>>,
}

impl<M> Crossover<M> {
    /// Single-point crossover applied to every pair.
    pub fn new(mater: M) -> Self {
        Self {
            mater,
            probability: Box::new(Constant(1.0)),
            crossover_points: Box::new(Constant(1)),
        }
    }

    /// # Errors
    ///
    /// Returns a `Configuration` error if `probability` is not in `[0, 1]`.
    pub fn with_probability(mut self, probability: f64) -> Result<Self> {
        check_probability(probability)?;
        self.probability = Box::new(Constant(probability));
        Ok(self)
    }

    /// Draws the probability from `generator`. Out-of-range draws fail `apply`.
    pub fn with_probability_generator<G>(mut self, generator: G) -> Self
    where
        G: NumberGenerator<f64> + 'static,
    {
        self.probability = Box::new(generator);
        self
    }

    /// # Errors
    ///
    /// Returns a `Configuration` error if `points` exceeds `i32::MAX`.
    pub fn with_crossover_points(mut self, points: u32) -> Result<Self> {
        check_points(points)?;
        self.crossover_points = Box::new(Constant(points));
        Ok(self)
    }

    /// Draws the number of crossover points from `generator`. Out-of-range
    /// draws fail `apply`.
    pub fn with_crossover_points_generator<G>(mut self, generator: G) -> Self
    where
        G: NumberGenerator<u32> + 'static,
    {
        self.crossover_points = Box::new(generator);
        self
    }
}

fn check_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::Configuration(format!(
            "Crossover probability must be in [0, 1], got {}",
            probability
        )));
    }
    Ok(())
}

fn check_points(points: u32) -> Result<()> {
    if points > i32::MAX as u32 {
        return Err(GeneticError::Configuration(format!(
            "Number of crossover points must be in [0, {}], got {}",
            i32::MAX,
            points
        )));
    }
    Ok(())
}

impl<T, M> EvolutionaryOperator<T> for Crossover<M>
where
    T: Phenotype,
    M: Mater<T>,
{
    fn apply(&self, selected: Vec<T>, rng: &mut RandomNumberGenerator) -> Result<Vec<T>> {
        let mut selected = selected;
        rng.shuffle(&mut selected);

        let mut offspring = Vec::with_capacity(selected.len());
        let mut parents = selected.into_iter();
        while let Some(first) = parents.next() {
            let Some(second) = parents.next() else {
                offspring.push(first);
                break;
            };

            let probability = self.probability.next_value(rng);
            check_probability(probability)?;
            let points = self.crossover_points.next_value(rng);
            check_points(points)?;

            if rng.next_f64() < probability {
                let (a, b) = self.mater.mate(&first, &second, points, rng)?;
                offspring.push(a);
                offspring.push(b);
            } else {
                offspring.push(first);
                offspring.push(second);
            }
        }

        Ok(offspring)
    }
}

impl<M: Debug> Debug for Crossover<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossover")
            .field("mater", &self.mater)
            .field("probability", &self.probability)
            .field("crossover_points", &self.crossover_points)
            .finish()
    }
}

fn check_lengths(first: usize, second: usize) -> Result<()> {
    if first != second {
        return Err(GeneticError::Precondition(format!(
            "Cannot mate parents of different lengths ({} and {})",
            first, second
        )));
    }
    Ok(())
}

/// Draws a cut position in `[1, length - 1]`.
fn cut_point(length: usize, rng: &mut RandomNumberGenerator) -> usize {
    1 + rng.next_index(length - 1)
}

/// Cross-over for [`BitString`] candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitStringMater;

impl Mater<BitString> for BitStringMater {
    fn mate(
        &self,
        first: &BitString,
        second: &BitString,
        crossover_points: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(BitString, BitString)> {
        check_lengths(first.len(), second.len())?;
        let mut a = first.clone();
        let mut b = second.clone();
        if a.len() < 2 {
            return Ok((a, b));
        }
        for _ in 0..crossover_points {
            let cut = cut_point(a.len(), rng);
            a.swap_prefix(&mut b, cut);
        }
        Ok((a, b))
    }
}

/// Cross-over for fixed-length sequences such as byte or integer vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceMater;

impl<E> Mater<Vec<E>> for SliceMater
where
    E: Clone + Debug + Send + Sync + 'static,
{
    fn mate(
        &self,
        first: &Vec<E>,
        second: &Vec<E>,
        crossover_points: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<E>, Vec<E>)> {
        check_lengths(first.len(), second.len())?;
        let mut a = first.clone();
        let mut b = second.clone();
        if a.len() < 2 {
            return Ok((a, b));
        }
        for _ in 0..crossover_points {
            let cut = cut_point(a.len(), rng);
            a[..cut].swap_with_slice(&mut b[..cut]);
        }
        Ok((a, b))
    }
}

/// Cross-over for strings, cutting between characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMater;

impl Mater<String> for StringMater {
    fn mate(
        &self,
        first: &String,
        second: &String,
        crossover_points: u32,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(String, String)> {
        let first: Vec<char> = first.chars().collect();
        let second: Vec<char> = second.chars().collect();
        let (a, b) = SliceMater.mate(&first, &second, crossover_points, rng)?;
        Ok((a.into_iter().collect(), b.into_iter().collect()))
    }
}
