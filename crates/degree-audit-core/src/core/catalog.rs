// crates/degree-audit-core/src/core/catalog.rs
// ============================================================================
// Module: Requirement Catalog
// Description: Catalog data format and its compiled, validated form.
// Purpose: Turn authored requirement data into typed requirements once.
// Dependencies: crate::core::{checker, identifiers, requirement}, serde, thiserror
// ============================================================================

//! ## Overview
//! Catalog data is authored with parallel arrays per requirement
//! (`checkers`, `per_slot_min_count`, `slot_names`) and a `fulfilled_by`
//! discriminator. [`RequirementCatalog::from_definition`] compiles every
//! checker, checks the arrays line up, assigns requirement ids, and produces
//! the [`Fulfillment`] sum type the engine consumes. A catalog that compiles
//! satisfies the slot arity invariant everywhere, including inside every
//! toggleable option.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::checker::RawChecker;
use crate::core::checker::SlotChecker;
use crate::core::identifiers::RequirementId;
use crate::core::requirement::Counting;
use crate::core::requirement::Fulfillment;
use crate::core::requirement::FulfillmentOption;
use crate::core::requirement::RequirementSpec;
use crate::core::requirement::Slot;
use crate::core::requirement::SlotSpec;
use crate::core::requirement::SourceType;
use crate::core::requirement::SubRequirementProgress;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Program code used for university-wide requirements.
pub const UNIVERSITY_CODE: &str = "UNI";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog malformation detected while compiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two requirements produced the same id.
    #[error("duplicate requirement id `{0}`")]
    DuplicateRequirement(RequirementId),
    /// Slot arrays have different lengths.
    #[error(
        "{location}: {checkers} checkers, {min_counts} minimum counts, {slot_names} slot names"
    )]
    SlotArityMismatch {
        /// Requirement (and option) being compiled.
        location: String,
        /// Number of checkers.
        checkers: usize,
        /// Number of per-slot minimums.
        min_counts: usize,
        /// Number of slot names.
        slot_names: usize,
    },
    /// Slotted requirement declared no slots.
    #[error("{location}: no slots declared")]
    NoSlots {
        /// Requirement (and option) being compiled.
        location: String,
    },
    /// Slot minimum was negative or not finite.
    #[error("{location}: slot `{slot}` has an invalid minimum count")]
    InvalidMinCount {
        /// Requirement (and option) being compiled.
        location: String,
        /// Slot name.
        slot: String,
    },
    /// `min_number_of_slots` was zero or exceeded the slot count.
    #[error("{location}: min_number_of_slots {min} is not within 1..={slots}")]
    InvalidMinNumberOfSlots {
        /// Requirement (and option) being compiled.
        location: String,
        /// Declared minimum.
        min: usize,
        /// Slot count.
        slots: usize,
    },
    /// A checker failed to compile.
    #[error("{location}: slot `{slot}`: {message}")]
    Checker {
        /// Requirement (and option) being compiled.
        location: String,
        /// Slot name.
        slot: String,
        /// Compiler message.
        message: String,
    },
    /// Toggleable requirement declared no options.
    #[error("{location}: toggleable requirement has no options")]
    EmptyToggleable {
        /// Requirement being compiled.
        location: String,
    },
    /// Toggleable requirement declared the same option twice.
    #[error("{location}: duplicate option `{option}`")]
    DuplicateOption {
        /// Requirement being compiled.
        location: String,
        /// Repeated option name.
        option: String,
    },
}

// ============================================================================
// SECTION: Catalog Data Format
// ============================================================================

/// Authored `fulfilled_by` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementKind {
    /// Slots counted in courses.
    Courses,
    /// Slots counted in credits.
    Credits,
    /// Manually confirmed.
    SelfCheck,
    /// User picks one of `options`.
    Toggleable,
}

/// Authored requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementDefinition {
    /// Display name; also forms the requirement id.
    pub name: String,
    /// Description shown to students.
    #[serde(default)]
    pub description: String,
    /// Citation for the requirement text.
    #[serde(default)]
    pub source: String,
    /// Fulfillment discriminator.
    pub fulfilled_by: RequirementKind,
    /// Slot checkers (courses/credits).
    #[serde(default)]
    pub checkers: Vec<RawChecker>,
    /// Slot minimums (courses/credits).
    #[serde(default)]
    pub per_slot_min_count: Vec<f64>,
    /// Slot names (courses/credits).
    #[serde(default)]
    pub slot_names: Vec<String>,
    /// Per-slot aggregation mode (courses/credits).
    #[serde(default)]
    pub sub_requirement_progress: SubRequirementProgress,
    /// Number of slots that must be satisfied (courses/credits).
    #[serde(default)]
    pub min_number_of_slots: Option<usize>,
    /// Options (toggleable).
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
    /// Whether courses may also count toward other requirements.
    #[serde(default)]
    pub allow_course_double_counting: bool,
}

/// Authored toggleable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Option name.
    pub name: String,
    /// Option description.
    #[serde(default)]
    pub description: String,
    /// Counting unit.
    pub counting: Counting,
    /// Slot checkers.
    pub checkers: Vec<RawChecker>,
    /// Slot minimums.
    pub per_slot_min_count: Vec<f64>,
    /// Slot names.
    pub slot_names: Vec<String>,
    /// Per-slot aggregation mode.
    #[serde(default)]
    pub sub_requirement_progress: SubRequirementProgress,
    /// Number of slots that must be satisfied.
    #[serde(default)]
    pub min_number_of_slots: Option<usize>,
}

/// Authored program (college, major, minor, or grad program).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDefinition {
    /// Display name.
    pub name: String,
    /// Colleges offering the program.
    #[serde(default)]
    pub schools: Vec<String>,
    /// Ordered requirements.
    #[serde(default)]
    pub requirements: Vec<RequirementDefinition>,
}

/// Authored catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    /// University-wide requirements, applied to every undergraduate.
    #[serde(default)]
    pub university: Vec<RequirementDefinition>,
    /// Colleges keyed by code.
    #[serde(default)]
    pub colleges: BTreeMap<String, ProgramDefinition>,
    /// Majors keyed by code.
    #[serde(default)]
    pub majors: BTreeMap<String, ProgramDefinition>,
    /// Minors keyed by code.
    #[serde(default)]
    pub minors: BTreeMap<String, ProgramDefinition>,
    /// Graduate programs keyed by code.
    #[serde(default)]
    pub grad: BTreeMap<String, ProgramDefinition>,
}

// ============================================================================
// SECTION: Compiled Catalog
// ============================================================================

/// Compiled program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Program code, e.g. `CS`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Colleges offering the program.
    pub schools: Vec<String>,
    /// Ordered requirements.
    pub requirements: Vec<RequirementSpec>,
}

/// Compiled requirement catalog.
///
/// # Invariants
/// - Requirement ids are unique across the catalog.
/// - Every slot list has matching checker, minimum, and name counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementCatalog {
    /// University-wide requirements.
    university: Vec<RequirementSpec>,
    /// Colleges keyed by code.
    colleges: BTreeMap<String, Program>,
    /// Majors keyed by code.
    majors: BTreeMap<String, Program>,
    /// Minors keyed by code.
    minors: BTreeMap<String, Program>,
    /// Graduate programs keyed by code.
    grad: BTreeMap<String, Program>,
}

impl RequirementCatalog {
    /// Compiles an authored catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError`] for the first malformed requirement found.
    pub fn from_definition(definition: &CatalogDefinition) -> Result<Self, CatalogError> {
        let mut ids = BTreeSet::new();
        let university = compile_requirements(
            &definition.university,
            SourceType::College,
            UNIVERSITY_CODE,
            &mut ids,
        )?;
        let colleges = compile_programs(&definition.colleges, SourceType::College, &mut ids)?;
        let majors = compile_programs(&definition.majors, SourceType::Major, &mut ids)?;
        let minors = compile_programs(&definition.minors, SourceType::Minor, &mut ids)?;
        let grad = compile_programs(&definition.grad, SourceType::Grad, &mut ids)?;
        Ok(Self {
            university,
            colleges,
            majors,
            minors,
            grad,
        })
    }

    /// Returns the university-wide requirements.
    #[must_use]
    pub fn university(&self) -> &[RequirementSpec] {
        &self.university
    }

    /// Returns a college by code.
    #[must_use]
    pub fn college(&self, code: &str) -> Option<&Program> {
        self.colleges.get(code)
    }

    /// Returns a major by code.
    #[must_use]
    pub fn major(&self, code: &str) -> Option<&Program> {
        self.majors.get(code)
    }

    /// Returns a minor by code.
    #[must_use]
    pub fn minor(&self, code: &str) -> Option<&Program> {
        self.minors.get(code)
    }

    /// Returns a graduate program by code.
    #[must_use]
    pub fn grad(&self, code: &str) -> Option<&Program> {
        self.grad.get(code)
    }

    /// Returns all programs of one source type in code order.
    pub fn programs(&self, source_type: SourceType) -> impl Iterator<Item = &Program> {
        match source_type {
            SourceType::College => self.colleges.values(),
            SourceType::Major => self.majors.values(),
            SourceType::Minor => self.minors.values(),
            SourceType::Grad => self.grad.values(),
        }
    }

    /// Returns every requirement in the catalog.
    pub fn requirements(&self) -> impl Iterator<Item = &RequirementSpec> {
        self.university.iter().chain(
            [&self.colleges, &self.majors, &self.minors, &self.grad]
                .into_iter()
                .flat_map(BTreeMap::values)
                .flat_map(|program| program.requirements.iter()),
        )
    }

    /// Returns the number of requirements in the catalog.
    #[must_use]
    pub fn requirement_count(&self) -> usize {
        self.requirements().count()
    }
}

// ============================================================================
// SECTION: Compilation
// ============================================================================

/// Compiles every program of one source type.
fn compile_programs(
    programs: &BTreeMap<String, ProgramDefinition>,
    source_type: SourceType,
    ids: &mut BTreeSet<RequirementId>,
) -> Result<BTreeMap<String, Program>, CatalogError> {
    let mut compiled = BTreeMap::new();
    for (code, program) in programs {
        let requirements = compile_requirements(&program.requirements, source_type, code, ids)?;
        compiled.insert(code.clone(), Program {
            code: code.clone(),
            name: program.name.clone(),
            schools: program.schools.clone(),
            requirements,
        });
    }
    Ok(compiled)
}

/// Compiles the requirements of one program.
fn compile_requirements(
    definitions: &[RequirementDefinition],
    source_type: SourceType,
    code: &str,
    ids: &mut BTreeSet<RequirementId>,
) -> Result<Vec<RequirementSpec>, CatalogError> {
    definitions
        .iter()
        .map(|definition| {
            let id = requirement_id(source_type, code, &definition.name);
            if !ids.insert(id.clone()) {
                return Err(CatalogError::DuplicateRequirement(id));
            }
            compile_requirement(definition, id, source_type, code)
        })
        .collect()
}

/// Forms the requirement id for a program requirement.
fn requirement_id(source_type: SourceType, code: &str, name: &str) -> RequirementId {
    let prefix = match source_type {
        SourceType::College => "College",
        SourceType::Major => "Major",
        SourceType::Minor => "Minor",
        SourceType::Grad => "Grad",
    };
    RequirementId::new(format!("{prefix}-{code}-{name}"))
}

/// Compiles one requirement definition.
fn compile_requirement(
    definition: &RequirementDefinition,
    id: RequirementId,
    source_type: SourceType,
    code: &str,
) -> Result<RequirementSpec, CatalogError> {
    let location = format!("requirement `{id}`");
    let fulfillment = match definition.fulfilled_by {
        RequirementKind::SelfCheck => Fulfillment::SelfCheck,
        RequirementKind::Courses | RequirementKind::Credits => {
            let counting = if definition.fulfilled_by == RequirementKind::Courses {
                Counting::Courses
            } else {
                Counting::Credits
            };
            Fulfillment::Fixed(compile_slots(&location, &SlotsInput {
                counting,
                progress: definition.sub_requirement_progress,
                checkers: &definition.checkers,
                min_counts: &definition.per_slot_min_count,
                slot_names: &definition.slot_names,
                min_number_of_slots: definition.min_number_of_slots,
            })?)
        }
        RequirementKind::Toggleable => {
            if definition.options.is_empty() {
                return Err(CatalogError::EmptyToggleable {
                    location,
                });
            }
            let mut seen = BTreeSet::new();
            let mut options = Vec::with_capacity(definition.options.len());
            for option in &definition.options {
                if !seen.insert(option.name.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        location,
                        option: option.name.clone(),
                    });
                }
                let option_location = format!("{location} option `{}`", option.name);
                options.push(FulfillmentOption {
                    name: option.name.clone(),
                    description: option.description.clone(),
                    spec: compile_slots(&option_location, &SlotsInput {
                        counting: option.counting,
                        progress: option.sub_requirement_progress,
                        checkers: &option.checkers,
                        min_counts: &option.per_slot_min_count,
                        slot_names: &option.slot_names,
                        min_number_of_slots: option.min_number_of_slots,
                    })?,
                });
            }
            Fulfillment::Toggleable(options)
        }
    };

    Ok(RequirementSpec {
        id,
        name: definition.name.clone(),
        description: definition.description.clone(),
        source: definition.source.clone(),
        source_type,
        source_specific_name: code.to_string(),
        fulfillment,
        allow_course_double_counting: definition.allow_course_double_counting,
    })
}

/// Borrowed slot arrays for one requirement or option.
struct SlotsInput<'a> {
    /// Counting unit.
    counting: Counting,
    /// Aggregation mode.
    progress: SubRequirementProgress,
    /// Checkers.
    checkers: &'a [RawChecker],
    /// Minimums.
    min_counts: &'a [f64],
    /// Names.
    slot_names: &'a [String],
    /// Required satisfied slots.
    min_number_of_slots: Option<usize>,
}

/// Validates arity and compiles each slot checker.
fn compile_slots(location: &str, input: &SlotsInput<'_>) -> Result<SlotSpec, CatalogError> {
    let count = input.checkers.len();
    if input.min_counts.len() != count || input.slot_names.len() != count {
        return Err(CatalogError::SlotArityMismatch {
            location: location.to_string(),
            checkers: count,
            min_counts: input.min_counts.len(),
            slot_names: input.slot_names.len(),
        });
    }
    if count == 0 {
        return Err(CatalogError::NoSlots {
            location: location.to_string(),
        });
    }
    if let Some(min) = input.min_number_of_slots {
        if min == 0 || min > count {
            return Err(CatalogError::InvalidMinNumberOfSlots {
                location: location.to_string(),
                min,
                slots: count,
            });
        }
    }

    let slots = input
        .checkers
        .iter()
        .zip(input.min_counts)
        .zip(input.slot_names)
        .map(|((raw, min_count), name)| {
            if !min_count.is_finite() || *min_count < 0.0 {
                return Err(CatalogError::InvalidMinCount {
                    location: location.to_string(),
                    slot: name.clone(),
                });
            }
            let checker = SlotChecker::compile(raw).map_err(|err| CatalogError::Checker {
                location: location.to_string(),
                slot: name.clone(),
                message: err.to_string(),
            })?;
            Ok(Slot {
                name: name.clone(),
                checker,
                min_count: *min_count,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SlotSpec {
        counting: input.counting,
        progress: input.progress,
        slots,
        min_number_of_slots: input.min_number_of_slots,
    })
}
