// crates/rule-logic/tests/dsl.rs
// ============================================================================
// Test Module: Rule Expressions
// Coverage: Precedence, group calls, leaf arguments, and error cases.
// ============================================================================
//! ## Overview
//! Integration tests for `parse_rule` with course checks as leaves.

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

mod support;

use rule_logic::DslError;
use rule_logic::Rule;
use rule_logic::ValidationError;
use rule_logic::matching_indices;
use rule_logic::parse_rule;
use support::TestResult;
use support::courses::CourseCheck;
use support::courses::resolve;
use support::courses::transcript;
use support::ensure;

fn subject(code: &str) -> Rule<CourseCheck> {
    Rule::leaf(CourseCheck::Subject(code.to_string()))
}

fn parse(input: &str) -> Result<Rule<CourseCheck>, DslError> {
    parse_rule(input, &resolve)
}

#[test]
fn and_binds_tighter_than_or() -> TestResult {
    let rule = parse(r#"subject("PE") || subject("CS") && min_level(3)"#)?;
    let expected = Rule::any(vec![
        subject("PE"),
        Rule::all(vec![subject("CS"), Rule::leaf(CourseCheck::MinLevel(3))]),
    ]);
    ensure(rule == expected, format!("unexpected tree {rule:?}"))
}

#[test]
fn parentheses_and_bang_group_as_written() -> TestResult {
    let rule = parse(r#"!(subject("PE") || number(1910))"#)?;
    let found = matching_indices(&rule, &transcript());
    ensure(found == vec![0, 2, 4, 5, 6], format!("matched {found:?}"))
}

#[test]
fn group_calls_build_group_nodes() -> TestResult {
    let rule = parse(r#"at_least(2, subject("MATH"), min_level(4), min_credits(4))"#)?;
    let found = matching_indices(&rule, &transcript());
    ensure(found == vec![1, 5, 6], format!("matched {found:?}"))?;

    let listed = parse(r#"any(number(1110), number(2110))"#)?;
    let infix = parse(r#"number(1110) || number(2110)"#)?;
    ensure(listed == infix, "any(..) and || agree")?;

    let called = parse(r#"not(subject("PE"))"#)?;
    ensure(called == Rule::negate(subject("PE")), "not(..) negates its member")?;
    let err = parse(r#"not(subject("PE"), subject("CS"))"#).unwrap_err();
    ensure(matches!(err, DslError::Syntax { position: 0, .. }), format!("unexpected error {err:?}"))
}

#[test]
fn rejected_leaf_reports_call_position() -> TestResult {
    let err = parse(r#"subject("CS") || credits(4)"#).unwrap_err();
    ensure(
        matches!(err, DslError::Leaf { ref name, position: 17, .. } if name == "credits"),
        format!("unexpected error {err:?}"),
    )
}

#[test]
fn malformed_expressions_are_rejected() -> TestResult {
    let cases: [(&str, fn(&DslError) -> bool); 8] = [
        ("   ", |e| matches!(e, DslError::Empty)),
        (r#"subject("CS") &"#, |e| matches!(e, DslError::Syntax { position: 14, .. })),
        (r#"subject("CS") number(1)"#, |e| matches!(e, DslError::Syntax { position: 14, .. })),
        (r#"subject("CS"#, |e| matches!(e, DslError::Syntax { position: 8, .. })),
        ("subject", |e| matches!(e, DslError::Syntax { .. })),
        ("at_least(300, number(1))", |e| matches!(e, DslError::Number { .. })),
        ("at_least(3, number(1), number(2))", |e| {
            matches!(e, DslError::Invalid(ValidationError::MinimumExceedsMembers { .. }))
        }),
        ("all()", |e| matches!(e, DslError::Invalid(ValidationError::EmptyGroup("all")))),
    ];
    for (input, check) in cases {
        match parse(input) {
            Err(err) => ensure(check(&err), format!("{input:?} gave {err:?}"))?,
            Ok(rule) => ensure(false, format!("{input:?} parsed to {rule:?}"))?,
        }
    }
    Ok(())
}

#[test]
fn nesting_and_size_limits_hold() -> TestResult {
    let deep = format!("{}subject(\"CS\"){}", "(".repeat(40), ")".repeat(40));
    let err = parse(&deep).unwrap_err();
    ensure(matches!(err, DslError::TooDeep { .. }), format!("unexpected error {err:?}"))?;

    let long = vec![r#"number(1110)"#; 2000].join(" || ");
    let err = parse(&long).unwrap_err();
    ensure(matches!(err, DslError::TooLarge { .. }), format!("unexpected error {err:?}"))
}
