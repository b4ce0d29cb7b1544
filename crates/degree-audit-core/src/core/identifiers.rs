// crates/degree-audit-core/src/core/identifiers.rs
// ============================================================================
// Module: Degree Audit Identifiers
// Description: Requirement, catalog-course, and enrollment identifiers.
// Purpose: Provide strongly typed, serializable IDs with stable forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Three identities matter to the engine. [`RequirementId`] names a catalog
//! requirement. [`CourseId`] is the catalog identity of a course and drives
//! predicate matching. [`UniqueId`] distinguishes enrollments: a course
//! repeated across semesters has one `CourseId` but several `UniqueId`s, while
//! the pseudo-courses generated from one exam share a single `UniqueId`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Requirement Id
// ============================================================================

/// Globally unique requirement identifier, e.g. `Major-CS-Introductory Programming`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(String);

impl RequirementId {
    /// Creates a new requirement identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RequirementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RequirementId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Course Id
// ============================================================================

/// Catalog course identifier, stable across semesters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    /// Exam credit with no catalog equivalent; visible in reports, matches nothing.
    pub const NO_EQUIVALENT: Self = Self(1);
    /// Credits-only carrier for exams that map to zero or several equivalents.
    pub const CREDITS: Self = Self(10);
    /// Writing-seminar credit granted by the English exams.
    pub const FWS_EXAM: Self = Self(100_000);
    /// Swim test completion marker.
    pub const SWIM_TEST: Self = Self(100_001);

    /// Creates a course identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for CourseId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Unique Id
// ============================================================================

/// Enrollment identity of a taken or planned course.
///
/// Plan entries carry numeric ids; synthesized entries (exam credit, swim
/// test) carry a descriptive name such as `AP Computer Science A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniqueId {
    /// Plan-assigned numeric id.
    Numeric(u64),
    /// Synthesized entry name.
    Named(String),
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => id.fmt(f),
            Self::Named(name) => name.fmt(f),
        }
    }
}

impl From<u64> for UniqueId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for UniqueId {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<String> for UniqueId {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}
