// crates/degree-audit-core/tests/statistics.rs
// ============================================================================
// Test Module: Fulfillment Statistics
// Coverage: Counting modes, slot gating, self-check, toggleable resolution.
// ============================================================================
//! ## Overview
//! Statistics computed over the dangerous graph for single-requirement catalogs.

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

use std::collections::BTreeMap;

use degree_audit_core::CourseTaken;
use degree_audit_core::FulfilledBy;
use degree_audit_core::FulfillmentStatistics;
use degree_audit_core::OnboardingData;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::RequirementDefinition;
use degree_audit_core::RequirementId;
use degree_audit_core::RequirementKind;
use degree_audit_core::SubRequirementProgress;
use degree_audit_core::ToggleableRequirementChoices;
use degree_audit_core::build_graphs;
use degree_audit_core::compute_statistics;
use degree_audit_core::resolve_requirements;
use support::course;
use support::courses_req;
use support::major_catalog;
use support::self_check;
use support::slotted;
use support::toggleable;

fn stats_with(
    catalog: &RequirementCatalog,
    courses: &[CourseTaken],
    choices: &ToggleableRequirementChoices,
) -> Vec<(Option<String>, FulfillmentStatistics)> {
    let onboarding = OnboardingData {
        majors: vec!["CS".to_string()],
        ..OnboardingData::default()
    };
    let resolved = resolve_requirements(catalog, &onboarding, choices, &BTreeMap::new());
    let pair = build_graphs(&resolved, courses);
    resolved
        .iter()
        .map(|requirement| {
            let connected = pair.dangerous.courses_for_requirement(requirement.id());
            (requirement.chosen_option.map(str::to_string), compute_statistics(requirement, connected))
        })
        .collect()
}

fn single(requirement: RequirementDefinition, courses: &[CourseTaken]) -> FulfillmentStatistics {
    let catalog = major_catalog(vec![requirement]);
    stats_with(&catalog, courses, &BTreeMap::new()).remove(0).1
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn credits_sum_across_connected_courses() {
    let requirement = slotted("Science", RequirementKind::Credits, &[("Credits", &["PHYS ****"], 4.0)]);
    let stats = single(requirement, &[
        course(1, 20_001, "PHYS 1112", 3.0),
        course(2, 20_002, "PHYS 2213", 2.0),
    ]);
    assert_eq!(stats.fulfilled_by, FulfilledBy::Credits);
    assert!(close(stats.min_count_fulfilled, 5.0));
    assert!(close(stats.min_count_required, 4.0));
    assert!(stats.is_fulfilled);
}

#[test]
fn any_can_count_counts_every_matching_course() {
    let stats = single(courses_req("Electives", &["CS 4***"], 1.0), &[
        course(1, 1, "CS 4110", 3.0),
        course(2, 2, "CS 4120", 3.0),
        course(3, 3, "CS 4820", 4.0),
    ]);
    assert!(close(stats.min_count_fulfilled, 3.0));
    assert_eq!(stats.per_slot_courses[0].len(), 3);
    assert!(close(stats.display_count(), 1.0));
}

#[test]
fn every_course_needed_counts_each_slot_once() {
    let mut requirement = slotted("Core", RequirementKind::Courses, &[
        ("Intro", &["CS 1110", "CS 1112"], 1.0),
        ("Data Structures", &["CS 2110"], 1.0),
    ]);
    requirement.sub_requirement_progress = SubRequirementProgress::EveryCourseNeeded;
    let stats = single(requirement, &[course(1, 1, "CS 1110", 4.0), course(2, 2, "CS 1112", 4.0)]);
    assert!(close(stats.min_count_fulfilled, 1.0));
    assert!(close(stats.min_count_required, 2.0));
    assert_eq!(stats.slots_satisfied, 1);
    assert!(!stats.is_fulfilled);
}

#[test]
fn every_course_needed_slot_above_one_is_never_satisfied() {
    let mut requirement = slotted("Core", RequirementKind::Courses, &[(
        "Systems",
        &["CS 3410", "CS 4410"],
        2.0,
    )]);
    requirement.sub_requirement_progress = SubRequirementProgress::EveryCourseNeeded;
    let stats = single(requirement, &[course(1, 1, "CS 3410", 4.0), course(2, 2, "CS 4410", 4.0)]);
    assert_eq!(stats.per_slot_courses[0].len(), 2);
    assert!(close(stats.min_count_fulfilled, 1.0));
    assert!(close(stats.min_count_required, 2.0));
    assert_eq!(stats.slots_satisfied, 0);
    assert!(!stats.is_fulfilled);
}

#[test]
fn every_course_needed_credits_deduplicate_by_course_id() {
    let mut requirement =
        slotted("Lab", RequirementKind::Credits, &[("Lab", &["CHEM 2080"], 4.0)]);
    requirement.sub_requirement_progress = SubRequirementProgress::EveryCourseNeeded;
    let stats = single(requirement, &[
        course(1, 30_001, "CHEM 2080", 4.0),
        course(2, 30_001, "CHEM 2080", 4.0),
    ]);
    assert!(close(stats.min_count_fulfilled, 4.0));
    assert_eq!(stats.per_slot_courses[0].len(), 2);
}

#[test]
fn course_matching_two_slots_lands_in_both_buckets() {
    let stats = single(
        slotted("Overlap", RequirementKind::Courses, &[
            ("Any CS", &["CS ****"], 1.0),
            ("Systems", &["CS 4410"], 1.0),
        ]),
        &[course(1, 1, "CS 4410", 4.0)],
    );
    assert_eq!(stats.per_slot_courses[0].len(), 1);
    assert_eq!(stats.per_slot_courses[1].len(), 1);
    assert!(close(stats.min_count_fulfilled, 2.0));
}

#[test]
fn min_number_of_slots_gates_fulfillment() {
    let mut requirement = slotted("Foundations", RequirementKind::Courses, &[
        ("Theory", &["CS 4810", "CS 4820", "CS 4830"], 1.0),
        ("Systems", &["CS 4410"], 1.0),
        ("AI", &["CS 4700"], 1.0),
    ]);
    requirement.min_number_of_slots = Some(2);
    let stats = single(requirement, &[
        course(1, 1, "CS 4810", 3.0),
        course(2, 2, "CS 4820", 4.0),
        course(3, 3, "CS 4830", 3.0),
    ]);
    assert!(close(stats.min_count_required, 2.0));
    assert!(close(stats.min_count_fulfilled, 3.0));
    assert_eq!(stats.slots_satisfied, 1);
    assert!(!stats.is_fulfilled);
}

#[test]
fn self_check_reports_zero_of_one() {
    let stats = single(self_check("Advisor Meeting"), &[course(1, 1, "CS 1110", 4.0)]);
    assert_eq!(stats, FulfillmentStatistics::self_check());
    assert!(close(stats.min_count_required, 1.0));
    assert!(!stats.is_fulfilled);
}

#[test]
fn toggleable_defaults_to_first_option() {
    let catalog = major_catalog(vec![toggleable("Track", &[
        ("Option 1", &["CS 3110"], 1.0),
        ("Option 2", &["CS 3410"], 1.0),
    ])]);
    let courses = [course(1, 1, "CS 3410", 4.0)];
    let (option, stats) = stats_with(&catalog, &courses, &BTreeMap::new()).remove(0);
    assert_eq!(option.as_deref(), Some("Option 1"));
    assert!(close(stats.min_count_fulfilled, 0.0));

    let mut choices = BTreeMap::new();
    choices.insert(RequirementId::new("Major-CS-Track"), "Option 2".to_string());
    let (option, stats) = stats_with(&catalog, &courses, &choices).remove(0);
    assert_eq!(option.as_deref(), Some("Option 2"));
    assert!(close(stats.min_count_fulfilled, 1.0));
}

#[test]
fn stale_option_choice_falls_back_to_default() {
    let catalog = major_catalog(vec![toggleable("Track", &[
        ("Option 1", &["CS 3110"], 1.0),
        ("Option 2", &["CS 3410"], 1.0),
    ])]);
    let mut choices = BTreeMap::new();
    choices.insert(RequirementId::new("Major-CS-Track"), "Retired Option".to_string());
    choices.insert(RequirementId::new("Major-CS-Removed"), "Option 2".to_string());
    let (option, _) = stats_with(&catalog, &[], &choices).remove(0);
    assert_eq!(option.as_deref(), Some("Option 1"));
}

#[test]
fn empty_course_list_reports_zero_progress() {
    let stats = single(courses_req("Core", &["CS 2110"], 1.0), &[]);
    assert!(close(stats.min_count_fulfilled, 0.0));
    assert!(close(stats.min_count_required, 1.0));
    assert!(stats.per_slot_courses.iter().all(Vec::is_empty));
}
