// crates/degree-audit-core/tests/proptest_graphs.rs
// ============================================================================
// Module: Fulfillment Graph Property-Based Tests
// Description: Bracketing, soundness, and determinism over generated plans.
// Purpose: Check builder and engine invariants across wide course sets.
// ============================================================================

//! Property-based tests for fulfillment graph invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod support;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use degree_audit_core::CourseTaken;
use degree_audit_core::EngineOptions;
use degree_audit_core::ExamCreditTable;
use degree_audit_core::FulfillmentEngine;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::build_graphs;
use degree_audit_core::resolve_requirements;
use proptest::prelude::*;
use support::course;
use support::courses_req;
use support::user;

const CODES: [&str; 6] = ["CS 2110", "CS 3110", "CS 4820", "CS 4410", "MATH 1920", "PE 1100"];

fn overlapping_catalog() -> RequirementCatalog {
    let mut writing = courses_req("Writing", &["CS 3110", "CS 4410"], 1.0);
    writing.allow_course_double_counting = true;
    support::catalog(
        vec![courses_req("PE", &["PE ****"], 2.0)],
        vec![courses_req("Math", &["MATH ****", "CS 2110"], 1.0)],
        vec![
            courses_req("Core", &["CS 2110", "CS 3110"], 2.0),
            courses_req("Theory", &["CS 4820", "CS 3110"], 1.0),
            courses_req("Electives", &["CS ****"], 3.0),
            writing,
        ],
    )
}

fn plan_strategy() -> impl Strategy<Value = Vec<CourseTaken>> {
    prop::collection::vec((0 .. CODES.len(), 1u8 ..= 4), 0 .. 10).prop_map(|picks| {
        picks
            .into_iter()
            .enumerate()
            .map(|(row, (code, credits))| {
                let unique_id = u64::try_from(row).unwrap() + 1;
                let course_id = u64::try_from(code).unwrap() + 1_000;
                course(unique_id, course_id, CODES[code], f64::from(credits))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn safe_graph_is_subset_of_dangerous(courses in plan_strategy()) {
        let catalog = overlapping_catalog();
        let onboarding = user(&[]).onboarding;
        let resolved = resolve_requirements(&catalog, &onboarding, &BTreeMap::new(), &BTreeMap::new());
        let pair = build_graphs(&resolved, &courses);
        for requirement in &resolved {
            for course in pair.safe.courses_for_requirement(requirement.id()) {
                prop_assert!(pair.dangerous.contains_edge(requirement.id(), course));
            }
        }
    }

    #[test]
    fn double_counted_set_matches_dangerous_graph(courses in plan_strategy()) {
        let catalog = overlapping_catalog();
        let onboarding = user(&[]).onboarding;
        let resolved = resolve_requirements(&catalog, &onboarding, &BTreeMap::new(), &BTreeMap::new());
        let pair = build_graphs(&resolved, &courses);

        let shared: BTreeSet<_> = courses
            .iter()
            .map(|course| &course.unique_id)
            .filter(|unique_id| {
                let linked: Vec<_> = resolved
                    .iter()
                    .filter(|requirement| {
                        pair.dangerous
                            .courses_for_requirement(requirement.id())
                            .iter()
                            .any(|course| &course.unique_id == *unique_id)
                    })
                    .collect();
                linked.len() >= 2 && !linked.iter().all(|requirement| requirement.allows_double_counting())
            })
            .cloned()
            .collect();
        prop_assert_eq!(shared, pair.double_counted);
    }

    #[test]
    fn report_is_idempotent_and_order_independent(courses in plan_strategy()) {
        let catalog = overlapping_catalog();
        let exams = ExamCreditTable::default();
        let engine = FulfillmentEngine::new(&catalog, &exams, EngineOptions::default());

        let forward = engine.compute(&user(&courses)).report;
        let again = engine.compute(&user(&courses)).report;
        prop_assert_eq!(&forward, &again);

        let mut reversed_courses = courses.clone();
        reversed_courses.reverse();
        let reversed = engine.compute(&user(&reversed_courses)).report;
        prop_assert_eq!(forward.requirement_count(), reversed.requirement_count());
        for (left, right) in forward.groups.iter().zip(&reversed.groups) {
            for (a, b) in left.requirements.iter().zip(&right.requirements) {
                prop_assert_eq!(&a.requirement.id, &b.requirement.id);
                prop_assert_eq!(a.fulfillment.safe.min_count_fulfilled, b.fulfillment.safe.min_count_fulfilled);
                prop_assert_eq!(a.fulfillment.dangerous.min_count_fulfilled, b.fulfillment.dangerous.min_count_fulfilled);
                prop_assert_eq!(a.fulfillment.safe.min_count_required, b.fulfillment.safe.min_count_required);
            }
        }
        prop_assert_eq!(forward.double_counted_course_unique_ids, reversed.double_counted_course_unique_ids);
    }
}
