// crates/degree-audit-core/src/core/mod.rs
// ============================================================================
// Module: Degree Audit Core Types
// Description: Courses, requirements, catalog, user state, and reports.
// Purpose: Provide the serializable data model consumed and produced by the engine.
// Dependencies: rule-logic, serde, thiserror
// ============================================================================

//! ## Overview
//! Core types describe the static requirement catalog, the per-user snapshot
//! the engine reads, and the grouped report it writes. Catalog definitions are
//! compiled into typed requirements once; nothing here performs I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod checker;
pub mod course;
pub mod exam;
pub mod identifiers;
pub mod pattern;
pub mod report;
pub mod requirement;
pub mod user;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogDefinition;
pub use catalog::CatalogError;
pub use catalog::OptionDefinition;
pub use catalog::Program;
pub use catalog::ProgramDefinition;
pub use catalog::RequirementCatalog;
pub use catalog::RequirementDefinition;
pub use catalog::RequirementKind;
pub use checker::CheckerError;
pub use checker::CoursePredicate;
pub use checker::RawChecker;
pub use checker::SlotChecker;
pub use course::CourseTaken;
pub use exam::ExamCreditConverter;
pub use exam::ExamCreditTable;
pub use exam::ExamRecord;
pub use exam::ExamRule;
pub use exam::ExamType;
pub use identifiers::CourseId;
pub use identifiers::RequirementId;
pub use identifiers::UniqueId;
pub use pattern::CodePattern;
pub use pattern::PatternError;
pub use report::FulfilledBy;
pub use report::FulfillmentReport;
pub use report::FulfillmentStatistics;
pub use report::GroupKind;
pub use report::GroupedRequirementFulfillmentReport;
pub use report::RequirementFulfillment;
pub use report::RequirementSummary;
pub use report::SafeDangerous;
pub use requirement::Counting;
pub use requirement::Fulfillment;
pub use requirement::FulfillmentOption;
pub use requirement::RequirementSpec;
pub use requirement::Slot;
pub use requirement::SlotSpec;
pub use requirement::SourceType;
pub use requirement::SubRequirementProgress;
pub use user::OnboardingData;
pub use user::OverriddenFulfillmentChoices;
pub use user::PlaceholderCourse;
pub use user::PlanCourse;
pub use user::PlannedCourse;
pub use user::Season;
pub use user::Semester;
pub use user::SlotOverride;
pub use user::ToggleableRequirementChoices;
pub use user::UserState;
