//! Seeded train/test split.
//!
//! Row indices are shuffled with a `StdRng` seeded from the run seed; the first
//! `ceil(n * test_fraction)` shuffled indices are held out.

use nalgebra::DMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split, AppError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::usage(format!(
            "Test fraction must be in (0, 1), got {test_fraction}."
        )));
    }

    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(AppError::data(format!(
            "Cannot split {n} rows with test fraction {test_fraction}: both splits must be non-empty."
        )));
    }

    let mut idx: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let train = idx.split_off(n_test);
    Ok(Split { train, test: idx })
}

/// Gather rows of `x` in the order given by `idx`.
pub fn take_rows(x: &DMatrix<f64>, idx: &[usize]) -> DMatrix<f64> {
    x.select_rows(idx.iter())
}

/// Gather entries of `y` in the order given by `idx`.
pub fn take<T: Copy>(y: &[T], idx: &[usize]) -> Vec<T> {
    idx.iter().map(|&i| y[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_ceiling_of_fraction() {
        let s = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(s.test.len(), 2);
        assert_eq!(s.train.len(), 8);

        let s = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(s.test.len(), 3);
    }

    #[test]
    fn split_is_a_partition() {
        let s = train_test_split(50, 0.2, 7).unwrap();
        let mut all: Vec<usize> = s.train.iter().chain(&s.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn rejects_bad_fractions_and_tiny_inputs() {
        assert_eq!(train_test_split(10, 0.0, 1).unwrap_err().exit_code(), 2);
        assert_eq!(train_test_split(10, 1.0, 1).unwrap_err().exit_code(), 2);
        assert_eq!(train_test_split(1, 0.2, 1).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn take_rows_preserves_order() {
        let x = DMatrix::from_row_slice(3, 1, &[10.0, 20.0, 30.0]);
        let picked = take_rows(&x, &[2, 0]);
        assert_eq!(picked.as_slice(), &[30.0, 10.0]);
        assert_eq!(take(&[1u8, 2, 3], &[1, 1]), vec![2, 2]);
    }
}
