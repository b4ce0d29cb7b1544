// crates/degree-audit-core/src/runtime/statistics.rs
// ============================================================================
// Module: Fulfillment Statistics
// Description: Per-slot bucketing and progress aggregation.
// Purpose: Turn a requirement's connected courses into progress numbers.
// Dependencies: crate::core, crate::runtime::resolver
// ============================================================================

//! ## Overview
//! Connected courses are re-partitioned into slot buckets by their checkers;
//! a course may land in several buckets. A course opted into specific slots
//! lands only in those. Each bucket then contributes according to the
//! counting unit and aggregation mode:
//!
//! | Counting | any-can-count | every-course-needed |
//! |---|---|---|
//! | courses | bucket size | 1 if non-empty |
//! | credits | credit sum | credit sum, one per course id |
//!
//! The raw sum is reported uncapped. With `min_number_of_slots` set, the
//! requirement is unfulfilled until that many slots meet their own minimum.
//!
//! Counting courses with every-course-needed caps a slot's contribution at 1,
//! so a slot whose own minimum is above 1 never counts as satisfied there.
//! Catalogs use a minimum of 1 per slot in that mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::Counting;
use crate::core::CourseTaken;
use crate::core::FulfillmentStatistics;
use crate::core::SlotSpec;
use crate::core::SubRequirementProgress;
use crate::runtime::resolver::Evaluation;
use crate::runtime::resolver::ResolvedRequirement;

// ============================================================================
// SECTION: Statistics
// ============================================================================

/// Computes progress for one requirement from its connected courses.
#[must_use]
pub fn compute_statistics(
    requirement: &ResolvedRequirement<'_>,
    courses: &[CourseTaken],
) -> FulfillmentStatistics {
    let spec = match requirement.evaluation {
        Evaluation::SelfCheck => return FulfillmentStatistics::self_check(),
        Evaluation::Slots(spec) => spec,
    };

    let buckets = partition(requirement, spec, courses);
    let mut fulfilled = 0.0;
    let mut slots_satisfied = 0;
    for (slot, bucket) in spec.slots.iter().zip(&buckets) {
        let contribution = contribution(spec, bucket);
        fulfilled += contribution;
        if !bucket.is_empty() && contribution >= slot.min_count {
            slots_satisfied += 1;
        }
    }

    let required = spec.min_count_required();
    let covered = spec.min_number_of_slots.is_none_or(|needed| slots_satisfied >= needed);
    FulfillmentStatistics {
        fulfilled_by: requirement.fulfilled_by(),
        min_count_fulfilled: fulfilled,
        min_count_required: required,
        per_slot_courses: buckets,
        slots_satisfied,
        is_fulfilled: fulfilled >= required && covered,
    }
}

/// Splits connected courses into one bucket per slot.
fn partition(
    requirement: &ResolvedRequirement<'_>,
    spec: &SlotSpec,
    courses: &[CourseTaken],
) -> Vec<Vec<CourseTaken>> {
    let mut buckets = vec![Vec::new(); spec.slots.len()];
    for course in courses {
        let forced = requirement.opted_in_slots(course.course_id);
        if forced.is_empty() {
            for (slot, bucket) in spec.slots.iter().zip(buckets.iter_mut()) {
                if slot.checker.matches(course) {
                    bucket.push(course.clone());
                }
            }
        } else {
            for index in forced {
                if let Some(bucket) = buckets.get_mut(index) {
                    bucket.push(course.clone());
                }
            }
        }
    }
    buckets
}

/// Returns one bucket's contribution.
///
/// Course-counted every-course-needed slots contribute 0 or 1.
fn contribution(spec: &SlotSpec, bucket: &[CourseTaken]) -> f64 {
    match (spec.counting, spec.progress) {
        (Counting::Courses, SubRequirementProgress::AnyCanCount) => count_as_f64(bucket.len()),
        (Counting::Courses, SubRequirementProgress::EveryCourseNeeded) => {
            if bucket.is_empty() { 0.0 } else { 1.0 }
        }
        (Counting::Credits, SubRequirementProgress::AnyCanCount) => {
            bucket.iter().map(|course| course.credits).sum()
        }
        (Counting::Credits, SubRequirementProgress::EveryCourseNeeded) => {
            let mut seen = BTreeSet::new();
            bucket
                .iter()
                .filter(|course| seen.insert(course.course_id))
                .map(|course| course.credits)
                .sum()
        }
    }
}

/// Converts a course count to the progress unit.
fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}
