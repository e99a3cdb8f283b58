//! Lenient numeric coercion for scoring requests.
//!
//! Policy: every field is optional and anything that is not a usable number
//! counts as `0.0`. Malformed values never fail the request.
//!
//! | JSON value                     | result            |
//! |--------------------------------|-------------------|
//! | finite number                  | the number        |
//! | string parsing to finite `f64` | the parsed value  |
//! | `true` / `false`               | `1.0` / `0.0`     |
//! | anything else, or absent       | `0.0`             |

use serde_json::{Map, Value};

use crate::domain::ScoringInput;

pub const FIELD_MONTHLY_INCOME: &str = "monthly_income";
pub const FIELD_MONTHLY_RENT: &str = "monthly_rent";
pub const FIELD_ON_TIME_UTILITIES: &str = "on_time_utilities";
pub const FIELD_EMPLOYMENT_YEARS: &str = "employment_years";

/// Coerce an optional JSON value to `f64`, defaulting to `0.0`.
pub fn coerce_numeric(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl ScoringInput {
    /// Build an input from a request object; unknown keys are ignored.
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        Self {
            monthly_income: coerce_numeric(map.get(FIELD_MONTHLY_INCOME)),
            monthly_rent: coerce_numeric(map.get(FIELD_MONTHLY_RENT)),
            on_time_utilities: coerce_numeric(map.get(FIELD_ON_TIME_UTILITIES)),
            employment_years: coerce_numeric(map.get(FIELD_EMPLOYMENT_YEARS)),
        }
    }
}
