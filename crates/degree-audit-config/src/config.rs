// crates/degree-audit-config/src/config.rs
// ============================================================================
// Module: Degree Audit Configuration
// Description: Configuration loading and validation for the audit engine.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: degree-audit-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Data paths inside the file resolve relative to the file's directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use degree_audit_core::CreditEligibility;
use degree_audit_core::EngineOptions;
use degree_audit_core::ExamCreditTable;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::TotalCreditsPolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::loader;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "degree-audit.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DEGREE_AUDIT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a log filter directive.
pub(crate) const MAX_LOG_FILTER_LENGTH: usize = 1024;
/// Maximum number of college credit policies.
pub(crate) const MAX_CREDIT_COLLEGES: usize = 64;
/// Default total academic credits required.
const DEFAULT_REQUIRED_CREDITS: f64 = 120.0;
/// Default catalog filename.
const DEFAULT_CATALOG_PATH: &str = "catalog.json";

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Degree audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Log filter directive used when the environment sets none.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Requirement catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Exam credit table source; absent means no exam credit.
    #[serde(default)]
    pub exams: Option<ExamsConfig>,
    /// Total academic credits policy.
    #[serde(default)]
    pub total_credits: TotalCreditsConfig,
    /// Swim test policy.
    #[serde(default)]
    pub swim_test: SwimTestConfig,
    /// Directory relative data paths resolve against (not serialized).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Requirement catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog file path (`.json` or `.ron`).
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}

/// Exam credit table source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExamsConfig {
    /// Exam table file path (`.json` or `.ron`).
    pub path: String,
}

/// Eligibility rule for one college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollegeCreditConfig {
    /// College code.
    pub college: String,
    /// Which courses count.
    pub eligibility: CreditEligibility,
}

/// Total academic credits policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TotalCreditsConfig {
    /// Whether the requirement is reported.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Credits required.
    #[serde(default = "default_required_credits")]
    pub required: f64,
    /// Colleges with a total-credit requirement.
    #[serde(default = "default_credit_colleges")]
    pub colleges: Vec<CollegeCreditConfig>,
}

impl Default for TotalCreditsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            required: DEFAULT_REQUIRED_CREDITS,
            colleges: default_credit_colleges(),
        }
    }
}

impl TotalCreditsConfig {
    /// Validates the credit policy.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.required.is_finite() || self.required <= 0.0 {
            return Err(ConfigError::Invalid(
                "total_credits.required must be a positive number".to_string(),
            ));
        }
        if self.colleges.len() > MAX_CREDIT_COLLEGES {
            return Err(ConfigError::Invalid("total_credits.colleges exceeds max entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for entry in &self.colleges {
            let college = entry.college.trim();
            if college.is_empty() {
                return Err(ConfigError::Invalid(
                    "total_credits.colleges.college must be non-empty".to_string(),
                ));
            }
            if !seen.insert(college) {
                return Err(ConfigError::Invalid(format!(
                    "total_credits.colleges has duplicate college {college}"
                )));
            }
        }
        Ok(())
    }

    /// Converts to the engine policy.
    #[must_use]
    pub fn policy(&self) -> TotalCreditsPolicy {
        let colleges: BTreeMap<String, CreditEligibility> = self
            .colleges
            .iter()
            .map(|entry| (entry.college.trim().to_string(), entry.eligibility))
            .collect();
        TotalCreditsPolicy {
            enabled: self.enabled,
            required: self.required,
            colleges,
        }
    }
}

/// Swim test policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwimTestConfig {
    /// Whether the requirement is reported.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SwimTestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl AuditConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.base_dir = resolved.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid("log_filter must be non-empty".to_string()));
            }
            if filter.len() > MAX_LOG_FILTER_LENGTH {
                return Err(ConfigError::Invalid("log_filter exceeds max length".to_string()));
            }
        }
        validate_path_string("catalog.path", &self.catalog.path)?;
        if let Some(exams) = &self.exams {
            validate_path_string("exams.path", &exams.path)?;
        }
        self.total_credits.validate()
    }

    /// Returns the resolved catalog path.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve_data_path(&self.catalog.path)
    }

    /// Returns the resolved exam table path, if configured.
    #[must_use]
    pub fn exams_path(&self) -> Option<PathBuf> {
        self.exams.as_ref().map(|exams| self.resolve_data_path(&exams.path))
    }

    /// Resolves a data path against the config file directory.
    fn resolve_data_path(&self, value: &str) -> PathBuf {
        let path = Path::new(value.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Loads and compiles the configured requirement catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the catalog cannot be read or compiled.
    pub fn load_catalog(&self) -> Result<RequirementCatalog, ConfigError> {
        loader::load_catalog(&self.catalog_path())
    }

    /// Loads the configured exam table, or an empty table when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the table cannot be read or parsed.
    pub fn load_exam_table(&self) -> Result<ExamCreditTable, ConfigError> {
        self.exams_path().map_or_else(|| Ok(ExamCreditTable::default()), |path| loader::load_exam_table(&path))
    }

    /// Returns the engine options described by this configuration.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            total_credits: self.total_credits.policy(),
            swim_test: self.swim_test.enabled,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration and data loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration or data.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML, JSON, or RON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Catalog failed to compile.
    #[error("invalid catalog: {0}")]
    Catalog(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serde default for enabled flags.
const fn default_true() -> bool {
    true
}

/// Serde default for required credits.
const fn default_required_credits() -> f64 {
    DEFAULT_REQUIRED_CREDITS
}

/// Serde default for college credit policies.
fn default_credit_colleges() -> Vec<CollegeCreditConfig> {
    TotalCreditsPolicy::default()
        .colleges
        .into_iter()
        .map(|(college, eligibility)| CollegeCreditConfig {
            college,
            eligibility,
        })
        .collect()
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a resolved path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
