//! Request/response contract shared by the HTTP endpoint and `altcredit score`.
//!
//! - body missing, not JSON, not an object, or an empty object -> 400
//! - scoring failure -> 500 with the failure message
//! - success -> 200 with the `ScoringResult` fields

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::domain::ScoringInput;
use crate::scoring::ScoringStrategy;

pub const NO_INPUT_MESSAGE: &str = "No input data provided.";

/// Status + JSON body for one scoring request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

/// Evaluate a raw request body against `scorer`.
pub fn evaluate_request(scorer: &dyn ScoringStrategy, body: &[u8]) -> Reply {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting unparseable request body");
            return Reply::error(StatusCode::BAD_REQUEST, NO_INPUT_MESSAGE);
        }
    };

    let Some(fields) = parsed.as_object().filter(|m| !m.is_empty()) else {
        tracing::debug!("rejecting empty or non-object request body");
        return Reply::error(StatusCode::BAD_REQUEST, NO_INPUT_MESSAGE);
    };

    let input = ScoringInput::from_json_map(fields);
    match scorer.score(&input) {
        Ok(result) => match serde_json::to_value(result) {
            Ok(body) => Reply {
                status: StatusCode::OK,
                body,
            },
            Err(e) => Reply::error(StatusCode::INTERNAL_SERVER_ERROR, format!("Internal server error: {e}")),
        },
        Err(e) => {
            tracing::warn!(strategy = scorer.name(), error = %e, "scoring failed");
            Reply::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
