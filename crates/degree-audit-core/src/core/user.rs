// crates/degree-audit-core/src/core/user.rs
// ============================================================================
// Module: User State
// Description: Per-user snapshot read by the fulfillment engine.
// Purpose: Model semesters, onboarding data, and requirement choices.
// Dependencies: crate::core::{exam, identifiers}, serde
// ============================================================================

//! ## Overview
//! The user snapshot is plain data: ordered semesters of planned courses,
//! onboarding selections, the chosen option of each toggleable requirement,
//! and per-slot opt-in/opt-out overrides. Every field defaults so partial
//! documents load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::exam::ExamRecord;
use crate::core::identifiers::CourseId;
use crate::core::identifiers::RequirementId;

// ============================================================================
// SECTION: Semesters
// ============================================================================

/// Academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    /// Winter session.
    Winter,
    /// Spring semester.
    Spring,
    /// Summer session.
    Summer,
    /// Fall semester.
    Fall,
}

/// A catalog course placed in a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Enrollment identity, unique within the plan.
    pub unique_id: u64,
    /// Catalog identity.
    pub course_id: CourseId,
    /// Subject and number, e.g. `CS 2110`.
    pub code: String,
    /// Credit value.
    pub credits: f64,
}

/// An unresolved placeholder slot in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderCourse {
    /// Placeholder identity.
    pub unique_id: u64,
    /// Display name, e.g. `Liberal Studies Elective`.
    pub name: String,
}

/// Entry in a semester plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanCourse {
    /// A real course.
    Course(PlannedCourse),
    /// A placeholder; never counts toward requirements.
    Placeholder(PlaceholderCourse),
}

/// One term of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    /// Calendar year.
    pub year: u16,
    /// Term within the year.
    pub season: Season,
    /// Planned courses in display order.
    #[serde(default)]
    pub courses: Vec<PlanCourse>,
}

// ============================================================================
// SECTION: Onboarding
// ============================================================================

/// Onboarding selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingData {
    /// College code; `None` for graduate-only students.
    #[serde(default)]
    pub college: Option<String>,
    /// Major codes in declaration order.
    #[serde(default)]
    pub majors: Vec<String>,
    /// Minor codes in declaration order.
    #[serde(default)]
    pub minors: Vec<String>,
    /// Graduate program code.
    #[serde(default)]
    pub grad_program: Option<String>,
    /// AP/IB exam results.
    #[serde(default)]
    pub exams: Vec<ExamRecord>,
    /// Whether the swim test has been passed.
    #[serde(default)]
    pub took_swim_test: bool,
}

// ============================================================================
// SECTION: Choices
// ============================================================================

/// Chosen option name per toggleable requirement.
pub type ToggleableRequirementChoices = BTreeMap<RequirementId, String>;

/// Per-slot manual assignment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOverride {
    /// Courses forced into the slot.
    #[serde(default)]
    pub opt_in: Vec<CourseId>,
    /// Courses forbidden from the requirement.
    #[serde(default)]
    pub opt_out: Vec<CourseId>,
}

/// Overrides keyed by requirement, then slot name.
pub type OverriddenFulfillmentChoices = BTreeMap<RequirementId, BTreeMap<String, SlotOverride>>;

// ============================================================================
// SECTION: User State
// ============================================================================

/// Complete per-user input to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// Ordered semesters.
    #[serde(default)]
    pub semesters: Vec<Semester>,
    /// Onboarding selections.
    #[serde(default)]
    pub onboarding: OnboardingData,
    /// Toggleable option choices.
    #[serde(default)]
    pub toggleable_choices: ToggleableRequirementChoices,
    /// Slot overrides.
    #[serde(default)]
    pub overridden_choices: OverriddenFulfillmentChoices,
}
