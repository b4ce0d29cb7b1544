// crates/degree-audit-core/src/runtime/resolver.rs
// ============================================================================
// Module: Requirement Catalog Resolver
// Description: Selects and concretizes the requirements that apply to a user.
// Purpose: Hand the graph builder a flat list of slot-shaped requirements.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Resolution picks the university and college requirements (only when the
//! user has a college), then each major, minor, and the graduate program in
//! the user's order. Toggleable requirements are narrowed to the chosen
//! option, defaulting to the first option. Overrides are attached per slot.
//!
//! Unknown requirement ids and option names in the user's choices fall back
//! to defaults without error so that catalog edits never break a report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use tracing::debug;
use tracing::warn;

use crate::core::Counting;
use crate::core::CourseId;
use crate::core::FulfilledBy;
use crate::core::Fulfillment;
use crate::core::OnboardingData;
use crate::core::OverriddenFulfillmentChoices;
use crate::core::Program;
use crate::core::RequirementCatalog;
use crate::core::RequirementId;
use crate::core::RequirementSpec;
use crate::core::RequirementSummary;
use crate::core::Slot;
use crate::core::SlotSpec;
use crate::core::ToggleableRequirementChoices;

// ============================================================================
// SECTION: Resolved Requirement
// ============================================================================

/// Concrete evaluation shape of a resolved requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation<'c> {
    /// Manually confirmed requirement.
    SelfCheck,
    /// Slot list in effect.
    Slots(&'c SlotSpec),
}

/// Manual overrides for one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotOverrides {
    /// Courses forced into the slot.
    pub opt_in: BTreeSet<CourseId>,
    /// Courses removed from the requirement.
    pub opt_out: BTreeSet<CourseId>,
}

/// A requirement made concrete for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequirement<'c> {
    /// Catalog definition.
    pub spec: &'c RequirementSpec,
    /// Evaluation shape after option selection.
    pub evaluation: Evaluation<'c>,
    /// Active option for toggleable requirements.
    pub chosen_option: Option<&'c str>,
    /// Overrides indexed like the active slots.
    pub overrides: Vec<SlotOverrides>,
}

impl<'c> ResolvedRequirement<'c> {
    /// Resolves a requirement with no choices or overrides.
    #[must_use]
    pub fn with_defaults(spec: &'c RequirementSpec) -> Self {
        let (evaluation, chosen_option) = select_evaluation(spec, None);
        let overrides = vec![SlotOverrides::default(); slot_count(evaluation)];
        Self {
            spec,
            evaluation,
            chosen_option,
            overrides,
        }
    }

    /// Returns the requirement id.
    #[must_use]
    pub const fn id(&self) -> &'c RequirementId {
        &self.spec.id
    }

    /// Returns the active slots; empty for self-check requirements.
    #[must_use]
    pub fn slots(&self) -> &'c [Slot] {
        match self.evaluation {
            Evaluation::SelfCheck => &[],
            Evaluation::Slots(spec) => &spec.slots,
        }
    }

    /// Returns true when courses may be shared with other requirements.
    #[must_use]
    pub const fn allows_double_counting(&self) -> bool {
        self.spec.allow_course_double_counting
    }

    /// Returns true when the course is opted out of any slot.
    #[must_use]
    pub fn is_opted_out(&self, course_id: CourseId) -> bool {
        self.overrides.iter().any(|slot| slot.opt_out.contains(&course_id))
    }

    /// Returns the slots the course is forced into; empty when opted out.
    #[must_use]
    pub fn opted_in_slots(&self, course_id: CourseId) -> Vec<usize> {
        if self.is_opted_out(course_id) {
            return Vec::new();
        }
        self.overrides
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.opt_in.contains(&course_id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns true when the course is forced into at least one slot.
    #[must_use]
    pub fn is_opted_in(&self, course_id: CourseId) -> bool {
        !self.is_opted_out(course_id)
            && self.overrides.iter().any(|slot| slot.opt_in.contains(&course_id))
    }

    /// Returns the unit this requirement reports in.
    #[must_use]
    pub const fn fulfilled_by(&self) -> FulfilledBy {
        match self.evaluation {
            Evaluation::SelfCheck => FulfilledBy::SelfCheck,
            Evaluation::Slots(spec) => match spec.counting {
                Counting::Courses => FulfilledBy::Courses,
                Counting::Credits => FulfilledBy::Credits,
            },
        }
    }

    /// Builds the report summary for this requirement.
    #[must_use]
    pub fn summary(&self) -> RequirementSummary {
        let slots = self.slots();
        RequirementSummary {
            id: self.spec.id.clone(),
            name: self.spec.name.clone(),
            description: self.spec.description.clone(),
            source: self.spec.source.clone(),
            source_type: self.spec.source_type,
            source_specific_name: self.spec.source_specific_name.clone(),
            fulfilled_by: self.fulfilled_by(),
            chosen_option: self.chosen_option.map(str::to_string),
            slot_names: slots.iter().map(|slot| slot.name.clone()).collect(),
            per_slot_min_count: slots.iter().map(|slot| slot.min_count).collect(),
            min_number_of_slots: match self.evaluation {
                Evaluation::SelfCheck => None,
                Evaluation::Slots(spec) => spec.min_number_of_slots,
            },
            allow_course_double_counting: self.spec.allow_course_double_counting,
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves every requirement that applies to the user.
#[must_use]
pub fn resolve_requirements<'c>(
    catalog: &'c RequirementCatalog,
    onboarding: &OnboardingData,
    choices: &ToggleableRequirementChoices,
    overrides: &OverriddenFulfillmentChoices,
) -> Vec<ResolvedRequirement<'c>> {
    let mut specs: Vec<&'c RequirementSpec> = Vec::new();

    if let Some(college) = onboarding.college.as_deref() {
        specs.extend(catalog.university());
        match catalog.college(college) {
            Some(program) => specs.extend(&program.requirements),
            None => warn!(college, "unknown college; only university requirements apply"),
        }
    }
    extend_programs(&mut specs, &onboarding.majors, "major", |code| catalog.major(code));
    extend_programs(&mut specs, &onboarding.minors, "minor", |code| catalog.minor(code));
    extend_programs(&mut specs, onboarding.grad_program.as_slice(), "grad", |code| {
        catalog.grad(code)
    });

    let mut seen = BTreeSet::new();
    let resolved: Vec<ResolvedRequirement<'c>> = specs
        .into_iter()
        .filter(|&spec| seen.insert(&spec.id))
        .map(|spec| resolve_one(spec, choices, overrides))
        .collect();
    debug!(requirements = resolved.len(), "resolved requirements");
    resolved
}

/// Appends the requirements of each known program code.
fn extend_programs<'c>(
    specs: &mut Vec<&'c RequirementSpec>,
    codes: &[String],
    kind: &str,
    lookup: impl Fn(&str) -> Option<&'c Program>,
) {
    for code in codes {
        match lookup(code) {
            Some(program) => specs.extend(&program.requirements),
            None => warn!(kind, code = code.as_str(), "unknown program; skipped"),
        }
    }
}

/// Applies the user's option choice and overrides to one requirement.
fn resolve_one<'c>(
    spec: &'c RequirementSpec,
    choices: &ToggleableRequirementChoices,
    overrides: &OverriddenFulfillmentChoices,
) -> ResolvedRequirement<'c> {
    let choice = choices.get(&spec.id).map(String::as_str);
    let (evaluation, chosen_option) = select_evaluation(spec, choice);

    let mut slot_overrides = vec![SlotOverrides::default(); slot_count(evaluation)];
    if let (Evaluation::Slots(slots), Some(by_slot)) = (evaluation, overrides.get(&spec.id)) {
        for (slot_name, choice) in by_slot {
            let Some(index) = slots.slot_index(slot_name) else {
                debug!(requirement = %spec.id, slot = slot_name.as_str(), "override for unknown slot ignored");
                continue;
            };
            if let Some(target) = slot_overrides.get_mut(index) {
                target.opt_in.extend(choice.opt_in.iter().copied());
                target.opt_out.extend(choice.opt_out.iter().copied());
            }
        }
    }

    ResolvedRequirement {
        spec,
        evaluation,
        chosen_option,
        overrides: slot_overrides,
    }
}

/// Picks the evaluation shape, falling back to the first option.
fn select_evaluation<'c>(
    spec: &'c RequirementSpec,
    choice: Option<&str>,
) -> (Evaluation<'c>, Option<&'c str>) {
    match &spec.fulfillment {
        Fulfillment::SelfCheck => (Evaluation::SelfCheck, None),
        Fulfillment::Fixed(slots) => (Evaluation::Slots(slots), None),
        Fulfillment::Toggleable(options) => {
            let chosen = choice.and_then(|name| {
                let found = spec.option(name);
                if found.is_none() {
                    debug!(requirement = %spec.id, option = name, "stale option choice; using default");
                }
                found
            });
            match chosen.or_else(|| options.first()) {
                Some(option) => (Evaluation::Slots(&option.spec), Some(option.name.as_str())),
                None => (Evaluation::SelfCheck, None),
            }
        }
    }
}

/// Returns the number of active slots.
fn slot_count(evaluation: Evaluation<'_>) -> usize {
    match evaluation {
        Evaluation::SelfCheck => 0,
        Evaluation::Slots(spec) => spec.slots.len(),
    }
}
