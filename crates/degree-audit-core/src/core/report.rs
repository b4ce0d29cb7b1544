// crates/degree-audit-core/src/core/report.rs
// ============================================================================
// Module: Fulfillment Report
// Description: Per-requirement statistics and the grouped report.
// Purpose: Define the serializable output consumed by presentation layers.
// Dependencies: crate::core::{course, identifiers, requirement}, serde
// ============================================================================

//! ## Overview
//! Every requirement is reported twice: against the safe graph (lower bound)
//! and the dangerous graph (upper bound). Reports are grouped by owning
//! program and carry the set of course identities that are ambiguously shared
//! between requirements.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::course::CourseTaken;
use crate::core::identifiers::RequirementId;
use crate::core::identifiers::UniqueId;
use crate::core::requirement::SourceType;

// ============================================================================
// SECTION: Statistics
// ============================================================================

/// Unit a statistic is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FulfilledBy {
    /// Course counts.
    Courses,
    /// Credit sums.
    Credits,
    /// Manual confirmation.
    SelfCheck,
}

/// Progress of one requirement against one graph variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentStatistics {
    /// Unit of the counts below.
    pub fulfilled_by: FulfilledBy,
    /// Raw progress sum, not capped.
    pub min_count_fulfilled: f64,
    /// Progress needed.
    pub min_count_required: f64,
    /// Courses bucketed per slot, in insertion order.
    pub per_slot_courses: Vec<Vec<CourseTaken>>,
    /// Number of slots whose own minimum is met.
    pub slots_satisfied: usize,
    /// Whether the requirement is met.
    pub is_fulfilled: bool,
}

impl FulfillmentStatistics {
    /// Statistics reported for self-check requirements.
    #[must_use]
    pub const fn self_check() -> Self {
        Self {
            fulfilled_by: FulfilledBy::SelfCheck,
            min_count_fulfilled: 0.0,
            min_count_required: 1.0,
            per_slot_courses: Vec::new(),
            slots_satisfied: 0,
            is_fulfilled: false,
        }
    }

    /// Returns progress capped at the requirement for display.
    #[must_use]
    pub fn display_count(&self) -> f64 {
        self.min_count_fulfilled.min(self.min_count_required)
    }
}

/// Lower and upper bound statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeDangerous<T> {
    /// Conservative bound.
    pub safe: T,
    /// Optimistic bound.
    pub dangerous: T,
}

// ============================================================================
// SECTION: Requirement Entries
// ============================================================================

/// Requirement metadata echoed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSummary {
    /// Requirement id.
    pub id: RequirementId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Citation.
    pub source: String,
    /// Kind of owning program.
    pub source_type: SourceType,
    /// Owning program code.
    pub source_specific_name: String,
    /// Unit of the statistics.
    pub fulfilled_by: FulfilledBy,
    /// Active option for toggleable requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_option: Option<String>,
    /// Slot names of the active definition.
    pub slot_names: Vec<String>,
    /// Slot minimums of the active definition.
    pub per_slot_min_count: Vec<f64>,
    /// Required covered slots, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_number_of_slots: Option<usize>,
    /// Whether courses may be shared with other requirements.
    pub allow_course_double_counting: bool,
}

/// One report entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementFulfillment {
    /// Requirement metadata.
    pub requirement: RequirementSummary,
    /// Safe and dangerous progress.
    pub fulfillment: SafeDangerous<FulfillmentStatistics>,
}

// ============================================================================
// SECTION: Groups
// ============================================================================

/// Report group kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupKind {
    /// College and university requirements.
    College,
    /// One major.
    Major,
    /// One minor.
    Minor,
    /// The graduate program.
    Grad,
}

impl From<SourceType> for GroupKind {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::College => Self::College,
            SourceType::Major => Self::Major,
            SourceType::Minor => Self::Minor,
            SourceType::Grad => Self::Grad,
        }
    }
}

/// Requirements of one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRequirementFulfillmentReport {
    /// Group kind.
    pub group: GroupKind,
    /// Program code (college code for the College group).
    pub specific: String,
    /// Ordered entries.
    pub requirements: Vec<RequirementFulfillment>,
}

/// Complete engine report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentReport {
    /// Groups: College first, then majors, minors, grad.
    pub groups: Vec<GroupedRequirementFulfillmentReport>,
    /// Course identities ambiguously shared between requirements.
    pub double_counted_course_unique_ids: BTreeSet<UniqueId>,
}

impl FulfillmentReport {
    /// Returns the entry for a requirement id.
    #[must_use]
    pub fn requirement(&self, id: &RequirementId) -> Option<&RequirementFulfillment> {
        self.groups
            .iter()
            .flat_map(|group| group.requirements.iter())
            .find(|entry| &entry.requirement.id == id)
    }

    /// Returns the total number of entries.
    #[must_use]
    pub fn requirement_count(&self) -> usize {
        self.groups.iter().map(|group| group.requirements.len()).sum()
    }
}
