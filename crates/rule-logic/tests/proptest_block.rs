// crates/rule-logic/tests/proptest_block.rs
// ============================================================================
// Test Module: Window Evaluation Properties
// Coverage: Window masks agree with per-course matching.
// ============================================================================
//! ## Overview
//! Property tests comparing `matching_indices` with `Rule::matches`.

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

use proptest::prelude::*;
use rule_logic::Rule;
use rule_logic::matching_indices;
use support::courses::Course;
use support::courses::CourseCheck;
use support::courses::course;

static SUBJECTS: [&str; 3] = ["CS", "MATH", "PE"];

fn any_course() -> impl Strategy<Value = Course> {
    (prop::sample::select(&SUBJECTS[..]), 1000u16 .. 5000, 1u8 .. 5)
        .prop_map(|(subject, number, credits)| course(subject, number, credits))
}

fn leaf() -> impl Strategy<Value = Rule<CourseCheck>> {
    prop_oneof![
        prop::sample::select(&SUBJECTS[..])
            .prop_map(|subject| Rule::leaf(CourseCheck::Subject(subject.to_string()))),
        (1u16 .. 5).prop_map(|level| Rule::leaf(CourseCheck::MinLevel(level))),
        (1u8 .. 5).prop_map(|credits| Rule::leaf(CourseCheck::MinCredits(credits))),
    ]
}

fn rule_tree() -> impl Strategy<Value = Rule<CourseCheck>> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Rule::all),
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Rule::any),
            inner.clone().prop_map(Rule::negate),
            (0u8 .. 4, prop::collection::vec(inner, 0 .. 4))
                .prop_map(|(min, members)| Rule::at_least(min, members)),
        ]
    })
}

proptest! {
    #[test]
    fn windowed_scan_matches_per_course(
        rule in rule_tree(),
        courses in prop::collection::vec(any_course(), 0 .. 150),
    ) {
        let expected: Vec<usize> =
            (0 .. courses.len()).filter(|index| rule.matches(&courses[*index])).collect();
        prop_assert_eq!(matching_indices(&rule, &courses), expected);
    }
}
