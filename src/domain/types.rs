//! Shared domain types.
//!
//! Scoring types are serializable because they cross the transport boundary as
//! JSON; configuration types are plain structs assembled by `app` from CLI flags
//! and the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scoring::Jitter;

/// Lowest score the heuristic can report.
pub const SCORE_MIN: u16 = 300;
/// Highest score the heuristic can report.
pub const SCORE_MAX: u16 = 850;

/// Score at or above which an applicant is `Low` risk.
pub const LOW_RISK_THRESHOLD: u16 = 700;
/// Score at or above which an applicant is at most `Moderate` risk.
pub const MODERATE_RISK_THRESHOLD: u16 = 600;

/// The four alternative signals accepted by the scorer.
///
/// All fields default to `0.0`; see [`crate::scoring::coerce_numeric`] for how
/// request values are turned into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringInput {
    pub monthly_income: f64,
    pub monthly_rent: f64,
    pub on_time_utilities: f64,
    pub employment_years: f64,
}

/// Coarse banding of the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Band a clamped credit score.
    pub fn from_score(score: u16) -> Self {
        if score >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score >= MODERATE_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a successful scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub credit_score: u16,
    pub default_probability: f64,
    pub risk_level: RiskLevel,
}

/// Settings for one offline training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Fraction of rows held out for evaluation, in `(0, 1)`.
    pub test_fraction: f64,
    /// Inverse L2 regularization strength.
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("credit_data.csv"),
            model_path: PathBuf::from("credit_model.json"),
            scaler_path: PathBuf::from("scaler.json"),
            seed: 42,
            test_fraction: 0.2,
            c: 1.0,
            max_iter: 100,
            tol: 1e-8,
        }
    }
}

/// Settings for the HTTP scoring service.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub jitter: Jitter,
}

impl ServeConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bands_follow_thresholds() {
        assert_eq!(RiskLevel::from_score(SCORE_MIN), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(599), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(600), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(699), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(700), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(SCORE_MAX), RiskLevel::Low);
    }

    #[test]
    fn result_serializes_with_plain_risk_label() {
        let result = ScoringResult {
            credit_score: 665,
            default_probability: 0.39,
            risk_level: RiskLevel::Moderate,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["credit_score"], 665);
        assert_eq!(json["default_probability"], 0.39);
        assert_eq!(json["risk_level"], "Moderate");
    }
}
