use crate::error::{GeneticError, Result};
use crate::generator::{Constant, NumberGenerator};
use crate::phenotype::Phenotype;
use crate::population::{is_fitter, EvaluatedCandidate};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Binary tournament selection.
///
/// Each pick draws two candidates uniformly at random (with replacement). With
/// the configured probability the fitter of the two wins, otherwise the weaker
/// one does. The probability must lie in `(0.5, 1]`; at 1 the fitter
/// candidate always wins.
///
/// # Examples
///
/// ```
/// use evolve::population::EvaluatedCandidate;
/// use evolve::rng::RandomNumberGenerator;
/// use evolve::selection::{SelectionStrategy, TournamentSelection};
///
/// fn main() -> evolve::Result<()> {
///     let population = vec![
///         EvaluatedCandidate::new("fit", 5.0)?,
///         EvaluatedCandidate::new("unfit", 1.0)?,
///     ];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = TournamentSelection::new(0.8)?;
///     let selected = selection.select(&population, true, 10, &mut rng)?;
///     assert_eq!(selected.len(), 10);
///
///     assert!(TournamentSelection::new(0.5).is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TournamentSelection {
    probability: Box<dyn NumberGenerator<f64>>,
}

impl TournamentSelection {
    /// Creates a tournament where the fitter candidate wins with a fixed probability.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `probability` is not in `(0.5, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Self::check_probability(probability)?;
        Ok(Self {
            probability: Box::new(Constant(probability)),
        })
    }

    /// Creates a tournament whose probability is drawn once per call to `select`.
    ///
    /// Drawn values are checked when used; an out-of-range draw makes
    /// `select` fail with a `Configuration` error.
    pub fn with_generator<G>(probability: G) -> Self
    where
        G: NumberGenerator<f64> + 'static,
    {
        Self {
            probability: Box::new(probability),
        }
    }

    fn check_probability(probability: f64) -> Result<()> {
        if !(probability > 0.5 && probability <= 1.0) {
            return Err(GeneticError::Configuration(format!(
                "Tournament probability must be in (0.5, 1], got {}",
                probability
            )));
        }
        Ok(())
    }
}

impl<T> SelectionStrategy<T> for TournamentSelection
where
    T: Phenotype,
{
    fn select(
        &self,
        population: &[EvaluatedCandidate<T>],
        natural: bool,
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let probability = self.probability.next_value(rng);
        Self::check_probability(probability)?;

        let mut selected = Vec::with_capacity(count);
        for _ in 0..count {
            let first = &population[rng.next_index(population.len())];
            let second = &population[rng.next_index(population.len())];

            let (fitter, weaker) = if is_fitter(second.fitness(), first.fitness(), natural) {
                (second, first)
            } else {
                (first, second)
            };

            let winner = if rng.next_f64() < probability {
                fitter
            } else {
                weaker
            };
            selected.push(winner.candidate().clone());
        }

        Ok(selected)
    }
}
