//! Read/write model artifacts.
//!
//! A training run produces two independent JSON files:
//! - the fitted `StandardScaler`
//! - the fitted `LogisticRegression`
//!
//! Both carry their feature names; consumers must feed raw features in the
//! order `[age, credit_amount, duration]`. Files are overwritten in place.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::fit::{LogisticRegression, StandardScaler};

/// Fitted scaler + classifier pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub scaler: StandardScaler,
    pub classifier: LogisticRegression,
}

impl ModelArtifact {
    /// Write both files. The classifier goes first, then the scaler.
    pub fn save(&self, scaler_path: &Path, model_path: &Path) -> Result<(), AppError> {
        write_json(model_path, &self.classifier, "classifier")?;
        write_json(scaler_path, &self.scaler, "scaler")?;
        Ok(())
    }

    pub fn load(scaler_path: &Path, model_path: &Path) -> Result<Self, AppError> {
        let scaler: StandardScaler = read_json(scaler_path, "scaler")?;
        let classifier: LogisticRegression = read_json(model_path, "classifier")?;
        if scaler.feature_names != classifier.feature_names {
            return Err(AppError::data(format!(
                "Scaler features {:?} do not match classifier features {:?}.",
                scaler.feature_names, classifier.feature_names
            )));
        }
        Ok(Self { scaler, classifier })
    }

    /// Probability of the high-risk class for one raw (unscaled) feature row.
    pub fn predict_proba(&self, raw: &[f64]) -> Result<f64, AppError> {
        let scaled = self.scaler.transform_row(raw)?;
        Ok(self.classifier.predict_proba(&scaled))
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {what} artifact '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::io(format!("Failed to write {what} artifact: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush {what} artifact: {e}")))?;
    tracing::info!(path = %path.display(), "wrote {what} artifact");
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open {what} artifact '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::data(format!("Invalid {what} artifact '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelArtifact {
        let names: Vec<String> = ["age", "credit_amount", "duration"].map(String::from).to_vec();
        ModelArtifact {
            scaler: StandardScaler {
                feature_names: names.clone(),
                mean: vec![35.5, 3271.3, 20.9],
                var: vec![129.2, 7_960_000.0, 145.3],
                scale: vec![11.37, 2821.3, 12.05],
                n_samples_seen: 1000,
            },
            classifier: LogisticRegression {
                feature_names: names,
                weights: vec![-0.21, 0.12, 0.33],
                bias: -0.9,
                c: 1.0,
                n_iter: 6,
                converged: true,
            },
        }
    }

    #[test]
    fn save_then_load_restores_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join("scaler.json");
        let model_path = dir.path().join("credit_model.json");

        let artifact = sample();
        artifact.save(&scaler_path, &model_path).unwrap();
        assert_eq!(ModelArtifact::load(&scaler_path, &model_path).unwrap(), artifact);
    }

    #[test]
    fn save_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join("scaler.json");
        let model_path = dir.path().join("credit_model.json");
        std::fs::write(&scaler_path, "stale").unwrap();
        std::fs::write(&model_path, "stale").unwrap();

        sample().save(&scaler_path, &model_path).unwrap();
        assert!(ModelArtifact::load(&scaler_path, &model_path).is_ok());
    }

    #[test]
    fn mismatched_feature_lists_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join("scaler.json");
        let model_path = dir.path().join("credit_model.json");

        let mut artifact = sample();
        artifact.classifier.feature_names.reverse();
        artifact.save(&scaler_path, &model_path).unwrap();
        assert_eq!(ModelArtifact::load(&scaler_path, &model_path).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn predict_proba_scales_before_scoring() {
        let artifact = sample();
        let at_mean = artifact.predict_proba(&[35.5, 3271.3, 20.9]).unwrap();
        let expected = crate::math::sigmoid(-0.9);
        assert!((at_mean - expected).abs() < 1e-12);
        assert!(artifact.predict_proba(&[1.0]).is_err());
    }
}
