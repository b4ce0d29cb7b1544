// crates/rule-logic/src/lib.rs
// ============================================================================
// Module: Rule Logic Root
// Description: Public API surface for the rule algebra.
// Purpose: Wire together rules, predicates, validation, and the expression parser.
// Dependencies: crate::{dsl, predicate, rule, validate}
// ============================================================================

//! ## Overview
//! `rule-logic` answers "does this item pass?" for boolean rules over caller
//! predicates. Rules are written as text, parsed by [`parse_rule`] and checked
//! by [`validate`], then applied to single items or to whole slices in
//! 64-item windows.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod dsl;
pub mod predicate;
pub mod rule;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dsl::DslError;
pub use dsl::Literal;
pub use dsl::parse_rule;
pub use predicate::Mask64;
pub use predicate::Predicate;
pub use predicate::matching_indices;
pub use rule::Rule;
pub use validate::ValidationError;
pub use validate::validate;
