//! Formula-based credit score over alternative signals.
//!
//! ```text
//! score = 400
//!       + income / 5000 * 100
//!       + affordability * 75          affordability = 1 - rent/income, or 0
//!       + on_time_utilities * 12
//!       + min(employment_years, 8) * 15
//!       + jitter
//! ```
//!
//! The sum is rounded half-to-even, clamped to `[300, 850]`, and mapped to a
//! default probability `max(0.02, (900 - score) / 600)` rounded to 2 decimals
//! (exact decimal rounding of the stored value, see `math::round_decimal`).

use rand::Rng;

use crate::domain::{RiskLevel, SCORE_MAX, SCORE_MIN, ScoringInput, ScoringResult};
use crate::math::round_decimal;
use crate::scoring::jitter::{Jitter, sample_jitter};
use crate::scoring::{ScoreError, ScoringStrategy};

const BASE_SCORE: f64 = 400.0;
const INCOME_UNIT: f64 = 5000.0;
const INCOME_POINTS: f64 = 100.0;
const AFFORDABILITY_POINTS: f64 = 75.0;
const UTILITY_POINTS: f64 = 12.0;
const EMPLOYMENT_CAP_YEARS: f64 = 8.0;
const EMPLOYMENT_POINTS: f64 = 15.0;

const PD_FLOOR: f64 = 0.02;
const PD_ANCHOR: f64 = 900.0;
const PD_SPAN: f64 = 600.0;

/// Per-term contributions, in score points, before rounding and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub income_factor: f64,
    pub rent_factor: f64,
    pub utilities_factor: f64,
    pub employment_factor: f64,
    pub jitter: f64,
}

impl ScoreBreakdown {
    pub fn compute(input: &ScoringInput, jitter: f64) -> Self {
        Self {
            base: BASE_SCORE,
            income_factor: input.monthly_income / INCOME_UNIT * INCOME_POINTS,
            rent_factor: income_ratio(input.monthly_income, input.monthly_rent) * AFFORDABILITY_POINTS,
            utilities_factor: input.on_time_utilities * UTILITY_POINTS,
            employment_factor: input.employment_years.min(EMPLOYMENT_CAP_YEARS) * EMPLOYMENT_POINTS,
            jitter,
        }
    }

    pub fn total(&self) -> f64 {
        self.base + self.income_factor + self.rent_factor + self.utilities_factor + self.employment_factor + self.jitter
    }
}

/// Share of income left after rent.
///
/// Zero when income is not positive or rent is at least income, so neither a
/// missing income nor an unaffordable rent turns into a bonus or a penalty.
pub fn income_ratio(income: f64, rent: f64) -> f64 {
    if income > rent && income > 0.0 {
        1.0 - rent / income
    } else {
        0.0
    }
}

/// Default probability for a clamped score, rounded to 2 decimals.
pub fn default_probability(credit_score: u16) -> f64 {
    let pd = ((PD_ANCHOR - f64::from(credit_score)) / PD_SPAN).max(PD_FLOOR);
    round_decimal(pd, 2)
}

/// Score with an explicit jitter value. Deterministic.
pub fn score_with_jitter(input: &ScoringInput, jitter: f64) -> Result<ScoringResult, ScoreError> {
    let breakdown = ScoreBreakdown::compute(input, jitter);
    let raw = breakdown.total().round_ties_even();
    if !raw.is_finite() {
        return Err(ScoreError::NonFinite {
            stage: "raw score",
            value: raw,
        });
    }

    let credit_score = raw.clamp(f64::from(SCORE_MIN), f64::from(SCORE_MAX)) as u16;
    Ok(ScoringResult {
        credit_score,
        default_probability: default_probability(credit_score),
        risk_level: RiskLevel::from_score(credit_score),
    })
}

/// Score with jitter drawn from the supplied generator.
pub fn score_with_rng<R: Rng + ?Sized>(input: &ScoringInput, rng: &mut R) -> Result<ScoringResult, ScoreError> {
    score_with_jitter(input, sample_jitter(rng))
}

/// Score with production jitter (thread-local entropy).
pub fn score(input: &ScoringInput) -> Result<ScoringResult, ScoreError> {
    score_with_jitter(input, Jitter::Entropy.draw())
}

/// The heuristic as a `ScoringStrategy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    jitter: Jitter,
}

impl HeuristicScorer {
    pub fn new(jitter: Jitter) -> Self {
        Self { jitter }
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }
}

impl ScoringStrategy for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn score(&self, input: &ScoringInput) -> Result<ScoringResult, ScoreError> {
        score_with_jitter(input, self.jitter.draw())
    }
}
