// crates/degree-audit-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for user state loading and text rendering in the CLI.
// Purpose: Ensure oversized inputs fail closed and summaries stay readable.
// Dependencies: degree-audit-cli main helpers
// ============================================================================

//! ## Overview
//! Validates user state loading errors, the text report renderer, and the
//! catalog summary lines.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use degree_audit_config::MAX_DATA_FILE_SIZE;
use degree_audit_core::CatalogDefinition;
use degree_audit_core::EngineOptions;
use degree_audit_core::ExamCreditTable;
use degree_audit_core::FulfillmentEngine;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::UserState;

use super::catalog_summary;
use super::load_user_state;
use super::render_text;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn catalog() -> RequirementCatalog {
    let definition: CatalogDefinition = serde_json::from_str(
        r#"{
  "university": [{ "name": "PE", "fulfilled_by": "self-check" }],
  "colleges": { "EN": { "name": "Engineering", "requirements": [] } },
  "majors": {
    "CS": {
      "name": "Computer Science",
      "schools": ["EN"],
      "requirements": [
        {
          "name": "Intro",
          "fulfilled_by": "courses",
          "checkers": [["CS 1110"]],
          "per_slot_min_count": [1],
          "slot_names": ["Course"]
        },
        {
          "name": "Programming",
          "fulfilled_by": "courses",
          "checkers": [["CS 1110", "CS 2110"]],
          "per_slot_min_count": [2],
          "slot_names": ["Course"]
        }
      ]
    }
  }
}"#,
    )
    .expect("catalog json");
    RequirementCatalog::from_definition(&definition).expect("catalog builds")
}

/// Single-course CS plan.
const USER_JSON: &str = r#"{
  "semesters": [{
    "year": 2025,
    "season": "Fall",
    "courses": [{ "unique_id": 1, "course_id": 358526, "code": "CS 1110", "credits": 4 }]
  }],
  "onboarding": { "college": "EN", "majors": ["CS"] }
}"#;

fn user() -> UserState {
    serde_json::from_str(USER_JSON).expect("user json")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn user_state_over_the_data_limit_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("user.json");
    fs::write(&path, vec![b' '; MAX_DATA_FILE_SIZE + 1]).expect("write file");

    let message = load_user_state(&path).expect_err("limit enforced").to_string();
    assert!(message.starts_with("invalid user state"), "{message}");
    assert!(message.contains("size limit"), "{message}");
}

#[test]
fn missing_user_state_reports_a_read_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let message =
        load_user_state(&dir.path().join("absent.json")).expect_err("missing").to_string();
    assert!(message.starts_with("failed to read user state"), "{message}");
}

#[test]
fn user_state_loads_through_the_shared_reader() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("user.json");
    fs::write(&path, USER_JSON).expect("write file");
    assert_eq!(load_user_state(&path).expect("user state loads"), user());
}

#[test]
fn text_report_lists_groups_and_double_counts() {
    let catalog = catalog();
    let options = EngineOptions {
        swim_test: false,
        ..EngineOptions::default()
    };
    let exams = ExamCreditTable::default();
    let engine = FulfillmentEngine::new(&catalog, &exams, options);
    let outcome = engine.compute(&user());
    let lines = render_text(&outcome.report);

    assert_eq!(lines[0], "College EN");
    assert!(lines.contains(&"Major CS".to_string()));
    assert!(lines.iter().any(|line| line.ends_with("[x] Intro  safe 1/1  dangerous 1/1")));
    assert!(lines.iter().any(|line| line.ends_with("[ ] Programming  safe 0/2  dangerous 1/2")));
    assert_eq!(lines.last().map(String::as_str), Some("double counted: 1"));
}

#[test]
fn catalog_summary_counts_programs_per_source() {
    let lines = catalog_summary(&catalog());
    assert_eq!(lines[0], "university: 1 requirements");
    assert_eq!(lines[1], "colleges: 1 programs, 0 requirements");
    assert_eq!(lines[2], "majors: 1 programs, 2 requirements");
    assert_eq!(lines.last().map(String::as_str), Some("catalog ok: 3 requirements"));
}
