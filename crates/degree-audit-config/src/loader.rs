// crates/degree-audit-config/src/loader.rs
// ============================================================================
// Module: Data Loader
// Description: Size-limited reading of catalog, exam table, and user state files.
// Purpose: Parse engine data files by extension with hard byte limits.
// Dependencies: degree-audit-core, ron, serde, serde_json
// ============================================================================

//! ## Overview
//! Catalog, exam table and user state files are JSON or RON, chosen by
//! extension. Files are checked against [`MAX_DATA_FILE_SIZE`] before and
//! while reading.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use degree_audit_core::CatalogDefinition;
use degree_audit_core::ExamCreditTable;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::UserState;
use serde::de::DeserializeOwned;

use crate::config::ConfigError;
use crate::config::validate_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of any data file in bytes.
pub const MAX_DATA_FILE_SIZE: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Data file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// JSON document.
    Json,
    /// Rusty Object Notation document.
    Ron,
}

impl DataFormat {
    /// Picks the format from a path extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::Invalid(format!(
                "unsupported data file extension: {}",
                path.display()
            ))),
        }
    }

    /// Parses text in this format.
    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            Self::Json => {
                serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Self::Ron => ron::from_str(content).map_err(|err| ConfigError::Parse(err.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Reads a UTF-8 data file, enforcing [`MAX_DATA_FILE_SIZE`].
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is missing, too large, or not UTF-8.
pub fn read_data_file(path: &Path) -> Result<String, ConfigError> {
    validate_path(path)?;
    let io_error = |err: std::io::Error| ConfigError::Io(format!("{}: {err}", path.display()));
    let file = File::open(path).map_err(io_error)?;
    let size = file.metadata().map_err(io_error)?.len();
    let limit = u64::try_from(MAX_DATA_FILE_SIZE).unwrap_or(u64::MAX);
    if size > limit {
        return Err(too_large(path));
    }

    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > MAX_DATA_FILE_SIZE {
        return Err(too_large(path));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid(format!("{} must be utf-8", path.display())))
}

/// Loads an uncompiled catalog definition.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed.
pub fn load_catalog_definition(path: &Path) -> Result<CatalogDefinition, ConfigError> {
    let format = DataFormat::from_path(path)?;
    format.parse(&read_data_file(path)?)
}

/// Loads and compiles a requirement catalog.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, parsed, or compiled.
pub fn load_catalog(path: &Path) -> Result<RequirementCatalog, ConfigError> {
    let definition = load_catalog_definition(path)?;
    RequirementCatalog::from_definition(&definition)
        .map_err(|err| ConfigError::Catalog(err.to_string()))
}

/// Loads an exam credit table.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed.
pub fn load_exam_table(path: &Path) -> Result<ExamCreditTable, ConfigError> {
    let format = DataFormat::from_path(path)?;
    format.parse(&read_data_file(path)?)
}

/// Loads a user's plan, onboarding and choices.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and another
/// variant when it is too large or malformed.
pub fn load_user_state(path: &Path) -> Result<UserState, ConfigError> {
    let format = DataFormat::from_path(path)?;
    format.parse(&read_data_file(path)?)
}

/// Builds the size-limit error for a path.
fn too_large(path: &Path) -> ConfigError {
    ConfigError::Invalid(format!("{} exceeds size limit of {MAX_DATA_FILE_SIZE} bytes", path.display()))
}
