//! Persona payload types exchanged with the generation service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::quiz::AnswerStore;

// ─────────────────────────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────────────────────────

/// Body of a persona generation call.
///
/// The answer store is the payload: every question id maps to its current
/// value, with unset single-selects sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PersonaRequest {
    answers: Value,
}

impl PersonaRequest {
    pub fn from_answers(answers: &AnswerStore) -> Self {
        Self {
            answers: answers.to_json(),
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.answers
    }
}

// ─────────────────────────────────────────────────────────────────
// Result
// ─────────────────────────────────────────────────────────────────

/// Persona returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaResult {
    pub persona_tags: Vec<String>,
    pub persona_summary: String,
    pub investment_style: String,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
    pub recommended_opportunities: Vec<String>,

    /// Timestamp the service attached, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl PersonaResult {
    /// Parse a success body. Any missing or mistyped field is a malformed response.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::malformed_response("response body is not a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::malformed_response(e.to_string()))
    }

    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::malformed_response(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }
}

/// Error body shape used by the service for non-success responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: Value,
}

impl ErrorDetail {
    /// Extract a readable detail string, falling back to the raw body
    pub(crate) fn from_body(body: &str) -> String {
        match serde_json::from_str::<ErrorDetail>(body) {
            Ok(ErrorDetail { detail: Value::String(s) }) => s,
            Ok(ErrorDetail { detail }) => detail.to_string(),
            Err(_) if body.trim().is_empty() => "no detail".to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────

/// Result of probing the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    /// Whether the service answered the health check successfully
    pub operational: bool,

    /// Endpoint that was checked
    pub endpoint: String,

    /// Any error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
