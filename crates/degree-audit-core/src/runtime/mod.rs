// crates/degree-audit-core/src/runtime/mod.rs
// ============================================================================
// Module: Degree Audit Runtime
// Description: Normalization, resolution, graph building, and statistics.
// Purpose: Compute grouped fulfillment reports from a user snapshot.
// Dependencies: crate::core, rule-logic, tracing
// ============================================================================

//! ## Overview
//! The runtime is a pipeline of pure stages:
//! normalize courses, resolve the user's requirements, build the safe and
//! dangerous fulfillment graphs, then compute statistics per requirement
//! against each graph. [`FulfillmentEngine`] drives the stages and groups the
//! results by program.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builder;
pub mod engine;
pub mod graph;
pub mod normalizer;
pub mod resolver;
pub mod statistics;
pub mod synthesized;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::GraphPair;
pub use builder::build_graphs;
pub use engine::EngineOptions;
pub use engine::FulfillmentEngine;
pub use engine::FulfillmentOutcome;
pub use graph::FulfillmentGraph;
pub use normalizer::normalize_courses;
pub use resolver::Evaluation;
pub use resolver::ResolvedRequirement;
pub use resolver::SlotOverrides;
pub use resolver::resolve_requirements;
pub use statistics::compute_statistics;
pub use synthesized::CreditEligibility;
pub use synthesized::TotalCreditsPolicy;
