// crates/degree-audit-core/src/runtime/normalizer.rs
// ============================================================================
// Module: Course Record Normalizer
// Description: Flattens the semester plan and exam results into courses.
// Purpose: Give every downstream stage one uniform course shape.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Plan courses become [`CourseTaken`] rows keyed by their numeric plan id.
//! Placeholder entries are dropped so they never count toward anything.
//! Exam results are expanded through the [`ExamCreditConverter`] and appended
//! after the plan courses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::core::CourseTaken;
use crate::core::ExamCreditConverter;
use crate::core::OnboardingData;
use crate::core::PlanCourse;
use crate::core::Semester;
use crate::core::UniqueId;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Builds the course list the engine evaluates.
///
/// Plan courses come first in semester order; placeholders are dropped.
/// Exam results follow, expanded through `exams`.
#[must_use]
pub fn normalize_courses<X>(
    semesters: &[Semester],
    onboarding: &OnboardingData,
    exams: &X,
) -> Vec<CourseTaken>
where
    X: ExamCreditConverter + ?Sized,
{
    let mut courses: Vec<CourseTaken> = semesters
        .iter()
        .flat_map(|semester| semester.courses.iter())
        .filter_map(|entry| match entry {
            PlanCourse::Course(course) => Some(CourseTaken {
                unique_id: UniqueId::Numeric(course.unique_id),
                course_id: course.course_id,
                code: course.code.clone(),
                credits: course.credits,
            }),
            PlanCourse::Placeholder(_) => None,
        })
        .collect();
    let planned = courses.len();

    courses.extend(exams.convert(
        onboarding.college.as_deref(),
        &onboarding.majors,
        &onboarding.exams,
    ));
    debug!(planned, exam = courses.len() - planned, "normalized courses");
    courses
}
