// crates/degree-audit-config/src/lib.rs
// ============================================================================
// Module: Degree Audit Config Library
// Description: Engine configuration model, validation, and data loading.
// Purpose: Single source of truth for degree-audit.toml semantics.
// Dependencies: degree-audit-core, ron, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! `degree-audit-config` defines the configuration model for the degree audit
//! engine: where the requirement catalog and exam table live, and which
//! synthesized college requirements apply. Validation is strict and fails
//! closed; catalog and exam files are read with hard size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod loader;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use loader::DataFormat;
pub use loader::MAX_DATA_FILE_SIZE;
pub use loader::load_catalog;
pub use loader::load_catalog_definition;
pub use loader::load_exam_table;
pub use loader::load_user_state;
pub use loader::read_data_file;
