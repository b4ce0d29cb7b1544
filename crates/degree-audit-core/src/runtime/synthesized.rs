// crates/degree-audit-core/src/runtime/synthesized.rs
// ============================================================================
// Module: Synthesized College Requirements
// Description: Total academic credits and swim test requirements.
// Purpose: Report college-wide requirements decided by closed-form filters.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Two requirements are computed outside the graph for users with a college:
//! total academic credits (for colleges with a credit policy) and the swim
//! test. Both report identical safe and dangerous statistics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::CourseId;
use crate::core::CourseTaken;
use crate::core::FulfilledBy;
use crate::core::FulfillmentStatistics;
use crate::core::RequirementFulfillment;
use crate::core::RequirementId;
use crate::core::RequirementSummary;
use crate::core::SafeDangerous;
use crate::core::SourceType;
use crate::core::UniqueId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default total credits required for graduation.
pub const DEFAULT_REQUIRED_CREDITS: f64 = 120.0;

/// Colleges with a total-credit requirement by default.
pub const DEFAULT_CREDIT_COLLEGES: [&str; 5] = ["AG", "AS1", "HE", "IL", "BU"];

/// Swim test requirement id.
pub const SWIM_TEST_ID: &str = "College-UNI-SwimTest";

/// Code of the pseudo-course recorded for a passed swim test.
const SWIM_TEST_CODE: &str = "Swim Test";

// ============================================================================
// SECTION: Total Credits
// ============================================================================

/// Which courses count toward total academic credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditEligibility {
    /// Everything except PE.
    ExcludePe,
    /// Everything except PE and courses numbered 10xx; exam credit counts.
    ExcludePeAndIntro,
    /// As above, but exam credit counts only through its credits carrier.
    ExcludePeIntroAndExam,
}

impl CreditEligibility {
    /// Returns true when the course counts.
    #[must_use]
    pub fn admits(self, course: &CourseTaken) -> bool {
        let is_pe = course.subject() == "PE";
        let is_intro = course.number().starts_with("10");
        match self {
            Self::ExcludePe => !is_pe,
            Self::ExcludePeAndIntro => course.is_exam_credit() || (!is_pe && !is_intro),
            Self::ExcludePeIntroAndExam => {
                course.course_id == CourseId::CREDITS
                    || (!course.is_exam_credit() && !is_pe && !is_intro)
            }
        }
    }

    /// Returns the description shown for the requirement.
    fn describe(self, required: f64) -> String {
        let excluded = match self {
            Self::ExcludePe => "PE courses do not count.",
            Self::ExcludePeAndIntro | Self::ExcludePeIntroAndExam => {
                "PE courses and courses numbered 1000-1099 do not count."
            }
        };
        format!("{required} academic credits are required. {excluded}")
    }
}

/// Total academic credit policy.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalCreditsPolicy {
    /// Whether the requirement is reported at all.
    pub enabled: bool,
    /// Credits required.
    pub required: f64,
    /// Eligibility rule per college; other colleges have no requirement.
    pub colleges: BTreeMap<String, CreditEligibility>,
}

impl Default for TotalCreditsPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            required: DEFAULT_REQUIRED_CREDITS,
            colleges: DEFAULT_CREDIT_COLLEGES
                .iter()
                .map(|college| ((*college).to_string(), CreditEligibility::ExcludePeAndIntro))
                .collect(),
        }
    }
}

impl TotalCreditsPolicy {
    /// Computes the total-credit entry for a college, if it has one.
    #[must_use]
    pub fn fulfillment(&self, college: &str, courses: &[CourseTaken]) -> Option<RequirementFulfillment> {
        if !self.enabled {
            return None;
        }
        let eligibility = *self.colleges.get(college)?;
        let eligible: Vec<CourseTaken> =
            courses.iter().filter(|course| eligibility.admits(course)).cloned().collect();
        let fulfilled: f64 = eligible.iter().map(|course| course.credits).sum();
        let statistics = single_slot(FulfilledBy::Credits, fulfilled, self.required, eligible);

        Some(RequirementFulfillment {
            requirement: RequirementSummary {
                id: RequirementId::new(format!("College-{college}-total-credits")),
                name: "Total Academic Credits".to_string(),
                description: eligibility.describe(self.required),
                source: String::new(),
                source_type: SourceType::College,
                source_specific_name: college.to_string(),
                fulfilled_by: FulfilledBy::Credits,
                chosen_option: None,
                slot_names: vec!["Credits".to_string()],
                per_slot_min_count: vec![self.required],
                min_number_of_slots: None,
                allow_course_double_counting: true,
            },
            fulfillment: SafeDangerous {
                safe: statistics.clone(),
                dangerous: statistics,
            },
        })
    }
}

// ============================================================================
// SECTION: Swim Test
// ============================================================================

/// Computes the swim test entry for a college.
#[must_use]
pub fn swim_test_fulfillment(
    college: &str,
    courses: &[CourseTaken],
    took_swim_test: bool,
) -> RequirementFulfillment {
    let mut passed: Vec<CourseTaken> =
        courses.iter().filter(|course| course.course_id == CourseId::SWIM_TEST).cloned().collect();
    if took_swim_test {
        passed.push(CourseTaken {
            unique_id: UniqueId::Named(SWIM_TEST_CODE.to_string()),
            course_id: CourseId::SWIM_TEST,
            code: SWIM_TEST_CODE.to_string(),
            credits: 0.0,
        });
    }
    let fulfilled = if passed.is_empty() { 0.0 } else { 1.0 };
    let statistics = single_slot(FulfilledBy::Courses, fulfilled, 1.0, passed);

    RequirementFulfillment {
        requirement: RequirementSummary {
            id: RequirementId::new(SWIM_TEST_ID),
            name: "Swim Test".to_string(),
            description: "A basic swimming and water safety competency is required of all \
                          entering first-year undergraduate students."
                .to_string(),
            source: String::new(),
            source_type: SourceType::College,
            source_specific_name: college.to_string(),
            fulfilled_by: FulfilledBy::Courses,
            chosen_option: None,
            slot_names: vec!["Course".to_string()],
            per_slot_min_count: vec![1.0],
            min_number_of_slots: None,
            allow_course_double_counting: true,
        },
        fulfillment: SafeDangerous {
            safe: statistics.clone(),
            dangerous: statistics,
        },
    }
}

/// Builds statistics for a single-slot synthesized requirement.
fn single_slot(
    fulfilled_by: FulfilledBy,
    fulfilled: f64,
    required: f64,
    courses: Vec<CourseTaken>,
) -> FulfillmentStatistics {
    let is_fulfilled = fulfilled >= required;
    FulfillmentStatistics {
        fulfilled_by,
        min_count_fulfilled: fulfilled,
        min_count_required: required,
        per_slot_courses: vec![courses],
        slots_satisfied: usize::from(is_fulfilled),
        is_fulfilled,
    }
}
