// crates/degree-audit-core/src/lib.rs
// ============================================================================
// Module: Degree Audit Core Library
// Description: Public API surface for the degree audit engine.
// Purpose: Expose the requirement model and the fulfillment runtime.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Degree audit core computes how far a student's planned and completed
//! courses go toward their degree requirements. Courses may legitimately
//! satisfy several requirements, but most requirements forbid sharing a
//! course; rather than solving the assignment problem exactly the engine
//! reports two bounds per requirement, a conservative "safe" count and an
//! optimistic "dangerous" count.
//!
//! The engine is a pure function of its inputs: no I/O, no global state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use runtime::CreditEligibility;
pub use runtime::EngineOptions;
pub use runtime::Evaluation;
pub use runtime::FulfillmentEngine;
pub use runtime::FulfillmentGraph;
pub use runtime::FulfillmentOutcome;
pub use runtime::GraphPair;
pub use runtime::ResolvedRequirement;
pub use runtime::SlotOverrides;
pub use runtime::TotalCreditsPolicy;
pub use runtime::build_graphs;
pub use runtime::compute_statistics;
pub use runtime::normalize_courses;
pub use runtime::resolve_requirements;
