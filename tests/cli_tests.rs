//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use common::{complete_answers_fixture, fixture_path, persona_response, quiz_cmd, StubService};
use predicates::prelude::*;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    quiz_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("investor persona"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    quiz_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-quiz"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"))
        .stdout(predicate::str::contains("Questions:  18"));
}

#[test]
fn test_short_version_flag() {
    quiz_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-quiz"));
}

// ─────────────────────────────────────────────────────────────────
// Catalog and Score Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_catalog_lists_every_step() {
    quiz_cmd()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1: Goals & Prefs"))
        .stdout(predicate::str::contains("Step 4: Final Details"))
        .stdout(predicate::str::contains("risk_tolerance (slider)"))
        .stdout(predicate::str::contains("range 1..=5"))
        .stdout(predicate::str::contains("sectors (multi-select)"))
        .stdout(predicate::str::contains("key_lesson (free-text)"))
        .stdout(predicate::str::contains("- More than 7 years"));
}

#[test]
fn test_score_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let answers = temp_dir.path().join("empty.json");
    std::fs::write(&answers, "{}").unwrap();

    let output = quiz_cmd()
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let scores: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let values: Vec<i64> = scores
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["value"].as_i64().unwrap())
        .collect();
    assert_eq!(values, vec![3, 2, 1, 2, 1]);
}

#[test]
fn test_score_text_matrix() {
    quiz_cmd()
        .arg("score")
        .arg("-a")
        .arg(complete_answers_fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile Matrix"))
        .stdout(predicate::str::contains("Risk        ####. 4/5"))
        .stdout(predicate::str::contains("Time        ####. 4/5"))
        .stdout(predicate::str::contains("Active      ###.. 3/5"))
        .stdout(predicate::str::contains("Capital     ###.. 3/5"))
        .stdout(predicate::str::contains("Experience  ####. 4/5"));
}

#[test]
fn test_score_rejects_out_of_range_slider() {
    quiz_cmd()
        .arg("score")
        .arg("-a")
        .arg(fixture_path("answers_out_of_range.json"))
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("E303"));
}

#[test]
fn test_score_missing_answers_file() {
    quiz_cmd()
        .arg("score")
        .arg("-a")
        .arg("/nonexistent/answers.json")
        .assert()
        .failure()
        .code(20);
}

// ─────────────────────────────────────────────────────────────────
// Submit Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_submit_renders_persona() {
    let service = StubService::start("200 OK", persona_response());

    quiz_cmd()
        .arg("submit")
        .arg("--answers")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg(&service.base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Patient Capital]"))
        .stdout(predicate::str::contains("Executive Summary"))
        .stdout(predicate::str::contains("#1 Multi-unit franchise with a manager"))
        .stdout(predicate::str::contains("#2 Revenue share in an established brand"));

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /generate-persona"));

    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["risk_tolerance"], 4);
    assert_eq!(body["time_horizon"], "4-7 years");
    assert_eq!(body["geo_scope"], serde_json::json!(["Across India"]));
    assert_eq!(body["key_lesson"], "Cash flow beats headlines");
    assert_eq!(body.as_object().unwrap().len(), 18);
}

#[test]
fn test_submit_saves_profile() {
    let service = StubService::start("200 OK", persona_response());
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("profiles").join("me.json");

    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg(&service.base_url)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved to"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved["persona"]["persona_tags"][1], "System Seeker");
    assert_eq!(saved["answers"]["ticket_size"], "₹15-50 lakh");
    assert!(saved["saved_at"].is_string());
}

#[test]
fn test_submit_service_error_shows_generic_message() {
    let service = StubService::start(
        "500 Internal Server Error",
        r#"{"detail":"model overloaded"}"#.to_string(),
    );

    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg(&service.base_url)
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains(
            "Failed to generate persona. Please ensure the persona service is running.",
        ))
        .stderr(predicate::str::contains("E401"));
}

#[test]
fn test_submit_malformed_response() {
    let service = StubService::start("200 OK", r#"{"persona_tags":[]}"#.to_string());

    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg(&service.base_url)
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("E403"));
}

#[test]
fn test_submit_unreachable_service() {
    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg(common::unreachable_base_url())
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("Failed to generate persona"));
}

#[test]
fn test_submit_unknown_question_never_calls_service() {
    let service = StubService::start("200 OK", persona_response());
    let temp_dir = TempDir::new().unwrap();
    let answers = temp_dir.path().join("bad.json");
    std::fs::write(&answers, r#"{"favourite_colour":"blue"}"#).unwrap();

    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(&answers)
        .arg("--base-url")
        .arg(&service.base_url)
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("Unknown question: favourite_colour"));

    assert!(service.requests().is_empty());
}

#[test]
fn test_submit_invalid_base_url() {
    quiz_cmd()
        .arg("submit")
        .arg("-a")
        .arg(complete_answers_fixture())
        .arg("--base-url")
        .arg("not a url")
        .assert()
        .failure()
        .code(10);
}

// ─────────────────────────────────────────────────────────────────
// Health Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_health_operational() {
    let service = StubService::start("200 OK", r#"{"status":"ok"}"#.to_string());

    quiz_cmd()
        .arg("health")
        .arg("--base-url")
        .arg(&service.base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("is operational"));

    assert!(service.requests()[0].request_line.starts_with("GET /health"));
}

#[test]
fn test_health_down_is_reported() {
    quiz_cmd()
        .arg("health")
        .arg("--base-url")
        .arg(common::unreachable_base_url())
        .assert()
        .success()
        .stdout(predicate::str::contains("is unavailable"));
}

// ─────────────────────────────────────────────────────────────────
// Verbosity Flag Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_verbose_flag() {
    quiz_cmd().arg("-v").arg("version").assert().success();
}

#[test]
fn test_quiet_flag() {
    quiz_cmd().arg("--quiet").arg("catalog").assert().success();
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_run_with_invalid_config() {
    quiz_cmd()
        .arg("run")
        .arg("--config")
        .arg("/nonexistent/config.toml")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unknown_command() {
    quiz_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    quiz_cmd().assert().failure();
}
