//! Error types for the persona quiz
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown in the quiz view when a persona could not be generated
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Failed to generate persona. Please ensure the persona service is running.";

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Input errors (3xx)
    UnknownQuestion = 300,
    WrongQuestionKind = 301,
    OptionNotAllowed = 302,
    SliderOutOfRange = 303,
    AnswersMalformed = 304,

    // Submission errors (4xx)
    SubmissionFailed = 400,
    ServiceStatus = 401,
    SubmissionTimeout = 402,
    MalformedResponse = 403,
    SubmissionInFlight = 404,

    // Internal errors (9xx)
    InternalError = 900,
    PromptFailed = 901,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Input errors
            400..=499 => 40, // Submission errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the quiz
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Edit targets a question id that is not in the catalog
    #[error("Unknown question: {question_id}")]
    UnknownQuestion { question_id: String },

    /// Edit operation does not match the question's kind
    #[error("Question {question_id} is a {actual} question, not {expected}")]
    WrongQuestionKind {
        question_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Selected value is not one of the declared options
    #[error("'{value}' is not an option of question {question_id}")]
    OptionNotAllowed { question_id: String, value: String },

    /// Slider value outside the declared range
    #[error("Value {value} for {question_id} is outside {min}..={max}")]
    SliderOutOfRange {
        question_id: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Answers file has the wrong shape
    #[error("Malformed answers: {message}")]
    AnswersMalformed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Submission Errors
    // ─────────────────────────────────────────────────────────────

    /// Transport-level failure talking to the persona service
    #[error("Failed to reach persona service at {url}: {message}")]
    SubmissionFailed { url: String, message: String },

    /// Persona service answered with a non-success status
    #[error("Persona service returned {status}: {detail}")]
    ServiceStatus { status: u16, detail: String },

    /// Persona service did not answer in time
    #[error("Persona service at {url} timed out after {timeout_ms}ms")]
    SubmissionTimeout { url: String, timeout_ms: u64 },

    /// Persona service answered successfully with an unusable body
    #[error("Malformed persona response: {message}")]
    MalformedResponse { message: String },

    /// A submission for this session is still running
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,
            Error::Json(_) => ErrorCode::AnswersMalformed,

            Error::UnknownQuestion { .. } => ErrorCode::UnknownQuestion,
            Error::WrongQuestionKind { .. } => ErrorCode::WrongQuestionKind,
            Error::OptionNotAllowed { .. } => ErrorCode::OptionNotAllowed,
            Error::SliderOutOfRange { .. } => ErrorCode::SliderOutOfRange,
            Error::AnswersMalformed { .. } => ErrorCode::AnswersMalformed,

            Error::SubmissionFailed { .. } => ErrorCode::SubmissionFailed,
            Error::ServiceStatus { .. } => ErrorCode::ServiceStatus,
            Error::SubmissionTimeout { .. } => ErrorCode::SubmissionTimeout,
            Error::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            Error::SubmissionInFlight => ErrorCode::SubmissionInFlight,

            Error::Prompt(_) => ErrorCode::PromptFailed,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether this error rejected an answer edit
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::UnknownQuestion { .. }
                | Error::WrongQuestionKind { .. }
                | Error::OptionNotAllowed { .. }
                | Error::SliderOutOfRange { .. }
                | Error::AnswersMalformed { .. }
        )
    }

    /// Whether this error ended a persona submission attempt.
    ///
    /// Malformed responses fall in here too: they are handled exactly like
    /// transport failures.
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            Error::SubmissionFailed { .. }
                | Error::ServiceStatus { .. }
                | Error::SubmissionTimeout { .. }
                | Error::MalformedResponse { .. }
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// The single message surfaced in the quiz view
    pub fn user_message(&self) -> String {
        if self.is_submission_failure() {
            SUBMISSION_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'persona-quiz config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'persona-quiz config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values."
            ),

            Error::UnknownQuestion { .. } | Error::OptionNotAllowed { .. } => Some(
                "Run 'persona-quiz catalog' to list question ids and their exact options."
            ),
            Error::SliderOutOfRange { .. } => Some(
                "Slider answers must lie within the range shown by 'persona-quiz catalog'."
            ),

            Error::SubmissionFailed { .. } | Error::SubmissionTimeout { .. } => Some(
                "Check that the persona service is running and 'service.base_url' points at it."
            ),
            Error::ServiceStatus { .. } => Some(
                "The persona service rejected the request. Check the service logs for details."
            ),
            Error::MalformedResponse { .. } => Some(
                "The persona service returned an incomplete persona. Try submitting again."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>, source: Option<toml::de::Error>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an unknown question error
    pub fn unknown_question(question_id: impl Into<String>) -> Self {
        Error::UnknownQuestion {
            question_id: question_id.into(),
        }
    }

    /// Create an option not allowed error
    pub fn option_not_allowed(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Error::OptionNotAllowed {
            question_id: question_id.into(),
            value: value.into(),
        }
    }

    /// Create a malformed answers error
    pub fn answers_malformed(message: impl Into<String>) -> Self {
        Error::AnswersMalformed {
            message: message.into(),
        }
    }

    /// Create a submission failed error
    pub fn submission_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SubmissionFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::UnknownQuestion.as_str(), "E300");
        assert_eq!(ErrorCode::SubmissionFailed.as_str(), "E400");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::SliderOutOfRange.exit_code(), 30);
        assert_eq!(ErrorCode::MalformedResponse.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_display() {
        let err = Error::SliderOutOfRange {
            question_id: "risk_tolerance".into(),
            value: 9,
            min: 1,
            max: 5,
        };
        let text = err.to_string();
        assert!(text.contains("risk_tolerance"));
        assert!(text.contains("1..=5"));
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(Error::unknown_question("nope").is_invalid_input());
        assert!(Error::option_not_allowed("time_horizon", "Forever").is_invalid_input());
        assert!(!Error::malformed_response("missing strengths").is_invalid_input());
    }

    #[test]
    fn test_submission_failure_classification() {
        assert!(Error::submission_failed("http://x", "refused").is_submission_failure());
        assert!(Error::ServiceStatus { status: 500, detail: "boom".into() }.is_submission_failure());
        assert!(Error::SubmissionTimeout { url: "http://x".into(), timeout_ms: 10 }
            .is_submission_failure());
        assert!(Error::malformed_response("missing").is_submission_failure());
        assert!(!Error::SubmissionInFlight.is_submission_failure());
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = Error::ServiceStatus { status: 500, detail: "stack trace".into() };
        assert_eq!(err.user_message(), SUBMISSION_FAILED_MESSAGE);

        let err = Error::malformed_response("missing persona_tags");
        assert_eq!(err.user_message(), SUBMISSION_FAILED_MESSAGE);

        let err = Error::unknown_question("nope");
        assert!(err.user_message().contains("nope"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::unknown_question("nope");
        assert!(err.suggestion().unwrap().contains("catalog"));
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_terminal();

        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_log();

        assert!(formatted.contains("[E100]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
