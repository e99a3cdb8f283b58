//! Feature extraction with mean imputation.
//!
//! Missing numeric cells are replaced by the mean of the non-missing values in
//! the same column over the whole dataset (before any train/test split).

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::data::dataset::Dataset;
use crate::error::AppError;

/// Dense feature matrix (rows = records, columns = `names`).
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub values: DMatrix<f64>,
    /// Number of imputed cells per column.
    pub imputed: Vec<usize>,
}

/// Extract the named numeric columns, imputing missing cells by column mean.
pub fn extract_features(dataset: &Dataset, names: &[&str]) -> Result<FeatureMatrix, AppError> {
    if names.is_empty() {
        return Err(AppError::usage("At least one feature column is required."));
    }

    // Columns are independent, so they are imputed in parallel; each column is
    // still summed sequentially so results do not depend on thread count.
    let columns: Vec<(Vec<f64>, usize)> = names
        .par_iter()
        .map(|name| {
            let raw = dataset.numeric_column(name)?;
            impute_mean(name, &raw)
        })
        .collect::<Result<_, AppError>>()?;

    let n = dataset.n_rows();
    let mut values = DMatrix::<f64>::zeros(n, names.len());
    let mut imputed = Vec::with_capacity(names.len());
    for (j, (column, count)) in columns.into_iter().enumerate() {
        for (i, v) in column.into_iter().enumerate() {
            values[(i, j)] = v;
        }
        if count > 0 {
            tracing::debug!(column = names[j], count, "imputed missing values with column mean");
        }
        imputed.push(count);
    }

    Ok(FeatureMatrix {
        names: names.iter().map(|s| s.to_string()).collect(),
        values,
        imputed,
    })
}

fn impute_mean(name: &str, raw: &[Option<f64>]) -> Result<(Vec<f64>, usize), AppError> {
    let present: Vec<f64> = raw.iter().flatten().copied().collect();
    if present.is_empty() {
        return Err(AppError::data(format!("Column `{name}` has no values to impute from.")));
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let missing = raw.len() - present.len();
    Ok((raw.iter().map(|v| v.unwrap_or(mean)).collect(), missing))
}
