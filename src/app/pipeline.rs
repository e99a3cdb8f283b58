//! The offline training pipeline.
//!
//! load -> label remap -> feature extraction (mean imputation) -> scale ->
//! seeded split -> logistic regression -> held-out accuracy -> persist
//!
//! Artifacts are written only after every earlier step has succeeded, so a
//! failed run never leaves a fresh file behind.

use crate::data::{Dataset, FEATURE_COLUMNS, Schema, extract_features, load_dataset};
use crate::domain::TrainConfig;
use crate::error::AppError;
use crate::fit::{LogisticOptions, StandardScaler, fit_logistic, take, take_rows, train_test_split};
use crate::io::ModelArtifact;

/// All computed outputs of a single training run.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub artifact: ModelArtifact,
    pub rows: usize,
    /// `(good, bad)` label counts over the whole dataset.
    pub label_counts: (usize, usize),
    /// Imputed cell count per feature, in feature order.
    pub imputed: Vec<usize>,
    pub n_train: usize,
    pub n_test: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
}

/// Load the dataset named by `config` and fit a model. Nothing is written.
pub fn fit(config: &TrainConfig) -> Result<TrainingRun, AppError> {
    let dataset = load_dataset(&config.data_path, Schema::credit())?;
    fit_dataset(&dataset, config)
}

/// Fit a model on an already loaded dataset.
pub fn fit_dataset(dataset: &Dataset, config: &TrainConfig) -> Result<TrainingRun, AppError> {
    let labels = dataset.labels()?;
    let bad = labels.iter().filter(|&&y| y == 1).count();
    let label_counts = (labels.len() - bad, bad);
    tracing::info!(good = label_counts.0, bad = label_counts.1, "label balance");

    let features = extract_features(dataset, &FEATURE_COLUMNS)?;

    // Statistics come from the full dataset, before the split.
    let scaler = StandardScaler::fit(&features.values, &features.names)?;
    let scaled = scaler.transform(&features.values)?;

    let split = train_test_split(dataset.n_rows(), config.test_fraction, config.seed)?;
    let x_train = take_rows(&scaled, &split.train);
    let y_train = take(&labels, &split.train);
    let x_test = take_rows(&scaled, &split.test);
    let y_test = take(&labels, &split.test);
    tracing::info!(train = split.train.len(), test = split.test.len(), seed = config.seed, "split dataset");

    let opts = LogisticOptions {
        c: config.c,
        max_iter: config.max_iter,
        tol: config.tol,
    };
    let classifier = fit_logistic(&x_train, &y_train, &features.names, &opts)?;
    tracing::info!(
        iterations = classifier.n_iter,
        converged = classifier.converged,
        "fitted logistic regression"
    );

    let train_accuracy = classifier.accuracy(&x_train, &y_train);
    let test_accuracy = classifier.accuracy(&x_test, &y_test);
    tracing::info!(train_accuracy, test_accuracy, "evaluated classifier");

    Ok(TrainingRun {
        artifact: ModelArtifact { scaler, classifier },
        rows: dataset.n_rows(),
        label_counts,
        imputed: features.imputed,
        n_train: split.train.len(),
        n_test: split.test.len(),
        train_accuracy,
        test_accuracy,
    })
}

/// Fit and persist both artifacts at the configured paths.
pub fn run_training(config: &TrainConfig) -> Result<TrainingRun, AppError> {
    let run = fit(config)?;
    run.artifact.save(&config.scaler_path, &config.model_path)?;
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use std::path::Path;

    /// Synthetic rows in the 21-column credit layout. Longer durations and
    /// larger amounts lean towards the bad label.
    fn synthetic_dataset(rows: usize) -> String {
        let mut out = String::new();
        for i in 0..rows {
            let duration = 6 + (i * 7) % 48;
            let amount = 500 + (i * 373) % 9000;
            let age = 20 + (i * 11) % 50;
            let risky = duration > 30 || amount > 7000;
            let label = if (i % 9 == 0) != risky { 2 } else { 1 };
            writeln!(
                out,
                "A11 {duration} A34 A43 {amount} A65 A75 4 A93 A101 4 A121 {age} A143 A152 2 A173 1 A192 A201 {label}"
            )
            .unwrap();
        }
        out
    }

    fn config_in(dir: &Path) -> TrainConfig {
        TrainConfig {
            data_path: dir.join("credit_data.csv"),
            model_path: dir.join("credit_model.json"),
            scaler_path: dir.join("scaler.json"),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn training_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.data_path, synthetic_dataset(200)).unwrap();

        let run = run_training(&config).unwrap();
        assert_eq!(run.rows, 200);
        assert_eq!(run.n_test, 40);
        assert_eq!(run.n_train, 160);
        assert_eq!(run.imputed, vec![0, 0, 0]);
        assert!(run.artifact.classifier.converged);
        assert_eq!(run.artifact.scaler.feature_names, vec!["age", "credit_amount", "duration"]);
        assert!((0.0..=1.0).contains(&run.test_accuracy));
        assert!(run.train_accuracy > 0.6, "train accuracy {}", run.train_accuracy);

        let loaded = ModelArtifact::load(&config.scaler_path, &config.model_path).unwrap();
        assert_eq!(loaded, run.artifact);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.data_path, synthetic_dataset(150)).unwrap();

        let a = fit(&config).unwrap();
        let b = fit(&config).unwrap();
        assert_eq!(a.artifact, b.artifact);
        assert_eq!(a.test_accuracy, b.test_accuracy);
    }

    #[test]
    fn missing_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = run_training(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!config.model_path.exists());
        assert!(!config.scaler_path.exists());
    }

    #[test]
    fn schema_mismatch_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut text = synthetic_dataset(20);
        text.push_str("A11 12 A34\n");
        std::fs::write(&config.data_path, text).unwrap();

        let err = run_training(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("Line 21"), "{err}");
        assert!(!config.model_path.exists());
        assert!(!config.scaler_path.exists());
    }

    #[test]
    fn missing_feature_values_are_imputed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        // Blank out the age of the first row.
        let text = synthetic_dataset(60).replacen(" A121 20 ", " A121 NA ", 1);
        std::fs::write(&config.data_path, text).unwrap();

        let run = fit(&config).unwrap();
        assert_eq!(run.imputed, vec![1, 0, 0]);
    }
}
