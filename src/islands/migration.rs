use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::population::EvaluatedCandidate;
use crate::rng::RandomNumberGenerator;

/// Moves candidates between island populations at the end of an epoch.
///
/// Implementations must keep every island at its original size. The island
/// populations are not sorted afterwards.
pub trait Migration<T: Phenotype>: Debug + Send + Sync {
    /// # Errors
    ///
    /// Returns a `Precondition` error if `migrant_count` exceeds the size of
    /// any island.
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;
}

fn check_migrant_count<T>(islands: &[Vec<EvaluatedCandidate<T>>], migrant_count: usize) -> Result<()> {
    if let Some((index, island)) = islands
        .iter()
        .enumerate()
        .find(|(_, island)| island.len() < migrant_count)
    {
        return Err(GeneticError::Precondition(format!(
            "Migrant count ({}) exceeds the size of island {} ({})",
            migrant_count,
            index,
            island.len()
        )));
    }
    Ok(())
}

/// Each island sends `m` random candidates to the next island, the last
/// island sends to the first. Immigrants replace the emigrants' slots.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RingMigration;

impl<T: Phenotype> Migration<T> for RingMigration {
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        check_migrant_count(islands, migrant_count)?;
        if migrant_count == 0 || islands.len() < 2 {
            return Ok(());
        }

        let last = islands.len() - 1;
        rng.shuffle(&mut islands[last]);
        let start = islands[last].len() - migrant_count;
        let mut incoming = islands[last][start..].to_vec();

        for (index, island) in islands.iter_mut().enumerate() {
            if index != last {
                rng.shuffle(island);
            }
            let start = island.len() - migrant_count;
            let outgoing = island[start..].to_vec();
            island[start..].clone_from_slice(&incoming);
            incoming = outgoing;
        }
        Ok(())
    }
}

/// Pools `m` random candidates from every island, shuffles the pool and
/// deals it back out. Migrants may return home and a group of emigrants may
/// end up split across several islands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMigration;

impl<T: Phenotype> Migration<T> for RandomMigration {
    fn migrate(
        &self,
        islands: &mut [Vec<EvaluatedCandidate<T>>],
        migrant_count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        check_migrant_count(islands, migrant_count)?;
        if migrant_count == 0 {
            return Ok(());
        }

        let mut migrants = Vec::with_capacity(islands.len() * migrant_count);
        for island in islands.iter_mut() {
            rng.shuffle(island);
            migrants.extend_from_slice(&island[..migrant_count]);
        }
        rng.shuffle(&mut migrants);

        for (island, arrivals) in islands.iter_mut().zip(migrants.chunks(migrant_count)) {
            island[..migrant_count].clone_from_slice(arrivals);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn island(label: char, size: usize) -> Vec<EvaluatedCandidate<char>> {
        (0..size)
            .map(|i| EvaluatedCandidate::new(label, i as f64).unwrap())
            .collect()
    }

    fn labels(island: &[EvaluatedCandidate<char>]) -> Vec<char> {
        let mut labels: Vec<char> = island.iter().map(|c| *c.candidate()).collect();
        labels.sort_unstable();
        labels
    }

    #[test]
    fn test_ring_migration_moves_whole_islands() {
        let mut islands = vec![island('A', 3), island('B', 3), island('C', 3)];
        let mut rng = RandomNumberGenerator::from_seed(12);

        RingMigration.migrate(&mut islands, 3, &mut rng).unwrap();

        assert_eq!(labels(&islands[0]), vec!['C'; 3]);
        assert_eq!(labels(&islands[1]), vec!['A'; 3]);
        assert_eq!(labels(&islands[2]), vec!['B'; 3]);
    }

    #[test]
    fn test_ring_migration_partial() {
        let mut islands = vec![island('A', 5), island('B', 5)];
        let mut rng = RandomNumberGenerator::from_seed(3);

        RingMigration.migrate(&mut islands, 2, &mut rng).unwrap();

        assert_eq!(labels(&islands[0]), vec!['A', 'A', 'A', 'B', 'B']);
        assert_eq!(labels(&islands[1]), vec!['A', 'A', 'B', 'B', 'B']);
    }

    #[test]
    fn test_random_migration_preserves_candidates() {
        let mut islands = vec![island('A', 4), island('B', 4), island('C', 4)];
        let mut rng = RandomNumberGenerator::from_seed(8);

        RandomMigration.migrate(&mut islands, 2, &mut rng).unwrap();

        let mut all: Vec<char> = islands.iter().flat_map(|i| labels(i)).collect();
        all.sort_unstable();
        let mut expected = vec!['A'; 4];
        expected.extend(vec!['B'; 4]);
        expected.extend(vec!['C'; 4]);
        assert_eq!(all, expected);
        assert!(islands.iter().all(|i| i.len() == 4));
        // the two non-migrating slots of every island stay home
        for (island, label) in islands.iter().zip(['A', 'B', 'C']) {
            assert!(island[2..].iter().all(|c| *c.candidate() == label));
        }
    }

    #[test]
    fn test_too_many_migrants() {
        let mut islands = vec![island('A', 3), island('B', 2)];
        let mut rng = RandomNumberGenerator::from_seed(0);

        assert!(matches!(
            RingMigration.migrate(&mut islands, 3, &mut rng),
            Err(GeneticError::Precondition(_))
        ));
        assert!(matches!(
            RandomMigration.migrate(&mut islands, 3, &mut rng),
            Err(GeneticError::Precondition(_))
        ));
    }

    #[test]
    fn test_zero_migrants_is_a_no_op() {
        let mut islands = vec![island('A', 3), island('B', 3)];
        let mut rng = RandomNumberGenerator::from_seed(0);

        RingMigration.migrate(&mut islands, 0, &mut rng).unwrap();
        assert_eq!(labels(&islands[0]), vec!['A'; 3]);
        assert_eq!(labels(&islands[1]), vec!['B'; 3]);
    }
}
