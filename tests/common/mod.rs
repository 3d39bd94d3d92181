//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::path::PathBuf;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Get the valid config fixture path
pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

/// Get the invalid config fixture path
pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// Answers file with every question answered
pub fn complete_answers_fixture() -> PathBuf {
    fixture_path("answers_complete.json")
}

/// Body of a successful persona generation call
pub fn persona_response() -> String {
    std::fs::read_to_string(fixture_path("persona_response.json")).unwrap()
}

/// Command for the persona-quiz binary, isolated from the user's config
pub fn quiz_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("persona-quiz").unwrap();
    cmd.env_remove("PERSONA_QUIZ_CONFIG")
        .env_remove("PERSONA_QUIZ_BASE_URL")
        .env_remove("PERSONA_QUIZ_TIMEOUT_SECS")
        .env_remove("PERSONA_QUIZ_LOG_FILE");
    cmd
}

// ─────────────────────────────────────────────────────────────────
// Stub Persona Service
// ─────────────────────────────────────────────────────────────────

#[path = "../../src/persona/stub_http.rs"]
mod stub_http;

pub use stub_http::{unreachable_base_url, SeenRequest, StubService};
