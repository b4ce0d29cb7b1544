// crates/degree-audit-core/src/core/requirement.rs
// ============================================================================
// Module: Requirement Model
// Description: Compiled requirement definitions with slot-structured checkers.
// Purpose: Represent how each requirement is fulfilled as a closed sum type.
// Dependencies: crate::core::{checker, identifiers}, serde
// ============================================================================

//! ## Overview
//! A requirement is fulfilled in one of three ways: never programmatically
//! (self-check), by a fixed list of slots, or by one of several named slot
//! lists chosen by the user (toggleable). Each slot pairs a compiled checker
//! with a minimum contribution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::checker::SlotChecker;
use crate::core::identifiers::RequirementId;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Kind of program that owns a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceType {
    /// University-wide or college requirement.
    College,
    /// Major requirement.
    Major,
    /// Minor requirement.
    Minor,
    /// Graduate program requirement.
    Grad,
}

/// Unit a slotted requirement counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Counting {
    /// Count matching courses.
    Courses,
    /// Sum matching course credits.
    Credits,
}

/// How a slot turns its matching courses into progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubRequirementProgress {
    /// Every matching course contributes.
    #[default]
    AnyCanCount,
    /// A slot counts once when satisfied; credits are deduplicated per course.
    EveryCourseNeeded,
}

// ============================================================================
// SECTION: Slots
// ============================================================================

/// One named sub-component of a requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Display name of the slot.
    pub name: String,
    /// Compiled predicate deciding slot membership.
    pub checker: SlotChecker,
    /// Minimum contribution needed from this slot.
    pub min_count: f64,
}

/// Slot-structured fulfillment definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    /// Counting unit.
    pub counting: Counting,
    /// Per-slot aggregation mode.
    pub progress: SubRequirementProgress,
    /// Ordered slots.
    pub slots: Vec<Slot>,
    /// When set, only this many slots need to be satisfied.
    pub min_number_of_slots: Option<usize>,
}

impl SlotSpec {
    /// Returns the total contribution required.
    ///
    /// With `min_number_of_slots = n` this is the sum of the `n` smallest
    /// slot minimums; otherwise every slot minimum is summed.
    #[must_use]
    pub fn min_count_required(&self) -> f64 {
        match self.min_number_of_slots {
            Some(needed) => {
                let mut mins: Vec<f64> = self.slots.iter().map(|slot| slot.min_count).collect();
                mins.sort_by(f64::total_cmp);
                mins.iter().take(needed).sum()
            }
            None => self.slots.iter().map(|slot| slot.min_count).sum(),
        }
    }

    /// Returns the slot index with the given name.
    #[must_use]
    pub fn slot_index(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }
}

// ============================================================================
// SECTION: Fulfillment
// ============================================================================

/// One named alternative of a toggleable requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct FulfillmentOption {
    /// Option name, e.g. `Option 1`.
    pub name: String,
    /// Option description.
    pub description: String,
    /// Slots used when this option is active.
    pub spec: SlotSpec,
}

/// How a requirement is fulfilled.
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfillment {
    /// Confirmed manually; always zero progress against one unit.
    SelfCheck,
    /// Fixed slot list.
    Fixed(SlotSpec),
    /// Exactly one option is active per user; the first is the default.
    Toggleable(Vec<FulfillmentOption>),
}

// ============================================================================
// SECTION: Requirement
// ============================================================================

/// One compiled degree requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementSpec {
    /// Globally unique identity.
    pub id: RequirementId,
    /// Display name.
    pub name: String,
    /// Description shown to students.
    pub description: String,
    /// Citation for the requirement text.
    pub source: String,
    /// Kind of owning program.
    pub source_type: SourceType,
    /// Owning program code, e.g. `CS` or `EN`.
    pub source_specific_name: String,
    /// Fulfillment definition.
    pub fulfillment: Fulfillment,
    /// Whether a course may count here and elsewhere at the same time.
    pub allow_course_double_counting: bool,
}

impl RequirementSpec {
    /// Returns the named option, if this requirement is toggleable.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&FulfillmentOption> {
        match &self.fulfillment {
            Fulfillment::Toggleable(options) => options.iter().find(|option| option.name == name),
            Fulfillment::SelfCheck | Fulfillment::Fixed(_) => None,
        }
    }
}
