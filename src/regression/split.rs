use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::ViewError;

/// Disjoint train/test row indices covering every row exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Number of held-out rows for `n_rows` at `test_fraction`.
pub fn test_size(n_rows: usize, test_fraction: f64) -> usize {
    (test_fraction * n_rows as f64).round() as usize
}

/// Shuffle `0..n_rows` with a seeded generator; the first `round(fraction·n)`
/// indices are held out, the rest train. Both sides must be non-empty.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, ViewError> {
    let n_test = test_size(n_rows, test_fraction);
    if n_test == 0 || n_test >= n_rows {
        return Err(ViewError::TooFewRows {
            rows: n_rows,
            needed: min_rows(test_fraction),
        });
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    log::debug!("split {n_rows} rows: {} train, {n_test} test (seed {seed})", train.len());
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

/// Smallest row count for which both partitions are non-empty.
fn min_rows(test_fraction: f64) -> usize {
    (2..=10_000)
        .find(|&n| {
            let t = test_size(n, test_fraction);
            t > 0 && t < n
        })
        .unwrap_or(2)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        for n in 3..60 {
            let split = train_test_split(n, 0.2, 4).unwrap();
            assert_eq!(split.test.len(), (0.2 * n as f64).round() as usize, "n = {n}");
            let train: BTreeSet<_> = split.train.iter().copied().collect();
            let test: BTreeSet<_> = split.test.iter().copied().collect();
            assert!(train.is_disjoint(&test));
            assert_eq!(train.len() + test.len(), n);
            assert_eq!(train.union(&test).count(), n);
        }
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(train_test_split(25, 0.2, 4).unwrap(), train_test_split(25, 0.2, 4).unwrap());
    }

    #[test]
    fn tiny_datasets_cannot_be_split() {
        let err = train_test_split(2, 0.2, 4).unwrap_err();
        assert_eq!(err, ViewError::TooFewRows { rows: 2, needed: 3 });
        assert!(train_test_split(0, 0.2, 4).is_err());
    }
}
