// crates/degree-audit-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Catalog, course, and user builders for engine tests.
// ============================================================================
//! ## Overview
//! Small builders so each test states only the catalog shape it exercises.

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

use std::collections::BTreeMap;

use degree_audit_core::CatalogDefinition;
use degree_audit_core::CourseId;
use degree_audit_core::CourseTaken;
use degree_audit_core::OnboardingData;
use degree_audit_core::OptionDefinition;
use degree_audit_core::PlanCourse;
use degree_audit_core::PlannedCourse;
use degree_audit_core::ProgramDefinition;
use degree_audit_core::RawChecker;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::RequirementDefinition;
use degree_audit_core::RequirementKind;
use degree_audit_core::Season;
use degree_audit_core::Semester;
use degree_audit_core::SubRequirementProgress;
use degree_audit_core::UserState;

// ========================================================================
// Courses
// ========================================================================

/// Builds a normalized plan course.
pub fn course(unique_id: u64, course_id: u64, code: &str, credits: f64) -> CourseTaken {
    CourseTaken::new(unique_id, course_id, code, credits)
}

/// Wraps normalized courses into a single-semester plan.
pub fn plan(courses: &[CourseTaken]) -> Vec<Semester> {
    let entries = courses
        .iter()
        .map(|course| {
            let unique_id = match &course.unique_id {
                degree_audit_core::UniqueId::Numeric(id) => *id,
                degree_audit_core::UniqueId::Named(_) => panic!("plan courses use numeric ids"),
            };
            PlanCourse::Course(PlannedCourse {
                unique_id,
                course_id: course.course_id,
                code: course.code.clone(),
                credits: course.credits,
            })
        })
        .collect();
    vec![Semester {
        year: 2024,
        season: Season::Fall,
        courses: entries,
    }]
}

// ========================================================================
// Requirements
// ========================================================================

/// Slot shorthand: name, code patterns, minimum.
pub type SlotDef<'a> = (&'a str, &'a [&'a str], f64);

/// Builds a slotted requirement matching course codes.
pub fn slotted(name: &str, kind: RequirementKind, slots: &[SlotDef<'_>]) -> RequirementDefinition {
    RequirementDefinition {
        name: name.to_string(),
        description: String::new(),
        source: String::new(),
        fulfilled_by: kind,
        checkers: slots
            .iter()
            .map(|(_, codes, _)| RawChecker::Codes(codes.iter().map(ToString::to_string).collect()))
            .collect(),
        per_slot_min_count: slots.iter().map(|(_, _, min)| *min).collect(),
        slot_names: slots.iter().map(|(slot, _, _)| (*slot).to_string()).collect(),
        sub_requirement_progress: SubRequirementProgress::AnyCanCount,
        min_number_of_slots: None,
        options: Vec::new(),
        allow_course_double_counting: false,
    }
}

/// Builds a single-slot course requirement matching the given codes.
pub fn courses_req(name: &str, codes: &[&str], min: f64) -> RequirementDefinition {
    slotted(name, RequirementKind::Courses, &[("Course", codes, min)])
}

/// Builds a self-check requirement.
pub fn self_check(name: &str) -> RequirementDefinition {
    RequirementDefinition {
        checkers: Vec::new(),
        per_slot_min_count: Vec::new(),
        slot_names: Vec::new(),
        ..slotted(name, RequirementKind::SelfCheck, &[])
    }
}

/// Builds a toggleable requirement from named single-slot options.
pub fn toggleable(name: &str, options: &[(&str, &[&str], f64)]) -> RequirementDefinition {
    RequirementDefinition {
        options: options
            .iter()
            .map(|(option, codes, min)| OptionDefinition {
                name: (*option).to_string(),
                description: String::new(),
                counting: degree_audit_core::Counting::Courses,
                checkers: vec![RawChecker::Codes(codes.iter().map(ToString::to_string).collect())],
                per_slot_min_count: vec![*min],
                slot_names: vec!["Course".to_string()],
                sub_requirement_progress: SubRequirementProgress::AnyCanCount,
                min_number_of_slots: None,
            })
            .collect(),
        ..slotted(name, RequirementKind::Toggleable, &[])
    }
}

/// Builds a program definition.
pub fn program(name: &str, requirements: Vec<RequirementDefinition>) -> ProgramDefinition {
    ProgramDefinition {
        name: name.to_string(),
        schools: Vec::new(),
        requirements,
    }
}

/// Builds a catalog with one college and one major.
pub fn catalog(
    university: Vec<RequirementDefinition>,
    college: Vec<RequirementDefinition>,
    major: Vec<RequirementDefinition>,
) -> RequirementCatalog {
    let mut definition = CatalogDefinition {
        university,
        ..CatalogDefinition::default()
    };
    definition.colleges.insert("EN".to_string(), program("Engineering", college));
    definition.majors.insert("CS".to_string(), program("Computer Science", major));
    RequirementCatalog::from_definition(&definition).expect("test catalog compiles")
}

/// Builds a catalog holding only the given major requirements.
pub fn major_catalog(major: Vec<RequirementDefinition>) -> RequirementCatalog {
    catalog(Vec::new(), Vec::new(), major)
}

// ========================================================================
// Users
// ========================================================================

/// Builds a user in college EN with major CS.
pub fn user(courses: &[CourseTaken]) -> UserState {
    UserState {
        semesters: plan(courses),
        onboarding: OnboardingData {
            college: Some("EN".to_string()),
            majors: vec!["CS".to_string()],
            ..OnboardingData::default()
        },
        toggleable_choices: BTreeMap::new(),
        overridden_choices: BTreeMap::new(),
    }
}

/// Returns the course id wrapper.
pub const fn id(course_id: u64) -> CourseId {
    CourseId::new(course_id)
}
