// crates/rule-logic/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Transcript fixtures and a result helper shared by rule tests.
// ============================================================================
//! ## Overview
//! Rules are exercised against a small transcript of courses so the tests
//! read like the checkers catalogs actually contain.

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
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

pub mod courses;

/// Result type for tests that use `?` on parser and validator errors.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fails the test with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        return Ok(());
    }
    let message: String = message.into();
    Err(message.into())
}
