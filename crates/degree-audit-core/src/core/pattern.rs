// crates/degree-audit-core/src/core/pattern.rs
// ============================================================================
// Module: Course Code Patterns
// Description: Compiled wildcard patterns over course codes.
// Purpose: Match codes like `CS 4411` against catalog patterns like `CS 4**1`.
// Dependencies: crate::core::course, serde, thiserror
// ============================================================================

//! ## Overview
//! A pattern is a subject followed by a number template in which `*` matches
//! any single character. Patterns are compiled once at catalog load and then
//! matched without allocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::course::CourseTaken;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while compiling a course code pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern text was empty.
    #[error("course code pattern is empty")]
    Empty,
    /// Pattern had a subject but no number template.
    #[error("course code pattern `{0}` is missing a number")]
    MissingNumber(String),
    /// Subject contained characters other than ASCII letters and digits.
    #[error("course code pattern `{0}` has an invalid subject")]
    InvalidSubject(String),
    /// Number template contained characters other than digits, letters, or `*`.
    #[error("course code pattern `{0}` has an invalid number")]
    InvalidNumber(String),
}

// ============================================================================
// SECTION: Pattern
// ============================================================================

/// Compiled course code pattern, e.g. `CS 4**1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodePattern {
    /// Upper-cased subject.
    subject: String,
    /// Number template; `None` positions are wildcards.
    number: Vec<Option<u8>>,
}

impl CodePattern {
    /// Compiles a pattern from text.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the text is not `SUBJECT NUMBER`.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut parts = trimmed.split_whitespace();
        let subject = parts.next().unwrap_or_default();
        let Some(number) = parts.next() else {
            return Err(PatternError::MissingNumber(trimmed.to_string()));
        };
        if parts.next().is_some() {
            return Err(PatternError::InvalidNumber(trimmed.to_string()));
        }
        if !subject.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(PatternError::InvalidSubject(trimmed.to_string()));
        }
        if !number.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'*') {
            return Err(PatternError::InvalidNumber(trimmed.to_string()));
        }
        Ok(Self {
            subject: subject.to_ascii_uppercase(),
            number: number
                .bytes()
                .map(|b| (b != b'*').then(|| b.to_ascii_uppercase()))
                .collect(),
        })
    }

    /// Returns true when `code` matches this pattern.
    #[must_use]
    pub fn matches_code(&self, code: &str) -> bool {
        let mut parts = code.split_whitespace();
        let (Some(subject), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        if !subject.eq_ignore_ascii_case(&self.subject) || number.len() != self.number.len() {
            return false;
        }
        number
            .bytes()
            .zip(&self.number)
            .all(|(actual, expected)| expected.is_none_or(|e| actual.to_ascii_uppercase() == e))
    }

    /// Returns true when the course's code matches this pattern.
    #[must_use]
    pub fn matches(&self, course: &CourseTaken) -> bool {
        self.matches_code(&course.code)
    }
}

impl fmt::Display for CodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)?;
        f.write_str(" ")?;
        for slot in &self.number {
            match slot {
                Some(byte) => write!(f, "{}", char::from(*byte))?,
                None => f.write_str("*")?,
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for CodePattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CodePattern> for String {
    fn from(value: CodePattern) -> Self {
        value.to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
