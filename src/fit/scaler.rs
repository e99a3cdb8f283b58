//! Zero-mean / unit-variance feature scaling.
//!
//! Variance is the population variance (divide by `n`). A column with zero
//! variance keeps a scale of `1.0` so it is centred but not blown up.

use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fitted per-feature statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub var: Vec<f64>,
    pub scale: Vec<f64>,
    pub n_samples_seen: usize,
}

impl StandardScaler {
    /// Fit on the columns of `x`.
    pub fn fit(x: &DMatrix<f64>, feature_names: &[String]) -> Result<Self, AppError> {
        let n = x.nrows();
        if n == 0 {
            return Err(AppError::data("Cannot fit a scaler on zero rows."));
        }
        if feature_names.len() != x.ncols() {
            return Err(AppError::usage(format!(
                "Scaler got {} feature names for {} columns.",
                feature_names.len(),
                x.ncols()
            )));
        }

        let stats: Vec<(f64, f64)> = (0..x.ncols())
            .into_par_iter()
            .map(|j| {
                let col = x.column(j);
                let mean = col.iter().sum::<f64>() / n as f64;
                let var = col.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
                (mean, var)
            })
            .collect();

        let mean: Vec<f64> = stats.iter().map(|s| s.0).collect();
        let var: Vec<f64> = stats.iter().map(|s| s.1).collect();
        let scale = var
            .iter()
            .map(|&v| if v > 0.0 { v.sqrt() } else { 1.0 })
            .collect();

        Ok(Self {
            feature_names: feature_names.to_vec(),
            mean,
            var,
            scale,
            n_samples_seen: n,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Scale every row of `x`.
    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, AppError> {
        if x.ncols() != self.n_features() {
            return Err(AppError::usage(format!(
                "Scaler expects {} features, got {}.",
                self.n_features(),
                x.ncols()
            )));
        }
        Ok(DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - self.mean[j]) / self.scale[j]
        }))
    }

    /// Scale one raw feature vector.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, AppError> {
        if row.len() != self.n_features() {
            return Err(AppError::usage(format!(
                "Scaler expects {} features, got {}.",
                self.n_features(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn transformed_columns_have_zero_mean_unit_variance() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 60.0]);
        let scaler = StandardScaler::fit(&x, &names(2)).unwrap();
        assert_eq!(scaler.mean, vec![2.5, 30.0]);
        assert!((scaler.var[0] - 1.25).abs() < 1e-12);

        let z = scaler.transform(&x).unwrap();
        for j in 0..2 {
            let col = z.column(j);
            let mean = col.iter().sum::<f64>() / 4.0;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_keeps_unit_scale() {
        let x = DMatrix::from_row_slice(3, 1, &[5.0, 5.0, 5.0]);
        let scaler = StandardScaler::fit(&x, &names(1)).unwrap();
        assert_eq!(scaler.var, vec![0.0]);
        assert_eq!(scaler.scale, vec![1.0]);
        assert_eq!(scaler.transform_row(&[7.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn row_transform_matches_matrix_transform() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 4.0, 2.0, 8.0, 6.0, 3.0]);
        let scaler = StandardScaler::fit(&x, &names(2)).unwrap();
        let z = scaler.transform(&x).unwrap();
        let row = scaler.transform_row(&[2.0, 8.0]).unwrap();
        assert_eq!(row, vec![z[(1, 0)], z[(1, 1)]]);
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let scaler = StandardScaler::fit(&x, &names(2)).unwrap();
        assert!(scaler.transform_row(&[1.0]).is_err());
        assert!(scaler.transform(&DMatrix::zeros(2, 3)).is_err());
        assert!(StandardScaler::fit(&x, &names(1)).is_err());
    }
}
