// crates/degree-audit-core/src/core/course.rs
// ============================================================================
// Module: Course Records
// Description: Normalized course record consumed by the engine.
// Purpose: Give every downstream stage one uniform course shape.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! [`CourseTaken`] is the only course shape the graph builder and statistics
//! computer see. Plan entries, exam pseudo-courses, and the swim-test marker
//! are all converted into it before evaluation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CourseId;
use crate::core::identifiers::UniqueId;

// ============================================================================
// SECTION: Course Taken
// ============================================================================

/// A course instance the user has taken or plans to take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTaken {
    /// Enrollment identity.
    pub unique_id: UniqueId,
    /// Catalog identity used for matching and deduplication.
    pub course_id: CourseId,
    /// Subject and number, e.g. `CS 2110`.
    pub code: String,
    /// Credit value used by credit-counted requirements.
    pub credits: f64,
}

impl CourseTaken {
    /// Creates a course record.
    #[must_use]
    pub fn new(
        unique_id: impl Into<UniqueId>,
        course_id: impl Into<CourseId>,
        code: impl Into<String>,
        credits: f64,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            course_id: course_id.into(),
            code: code.into(),
            credits,
        }
    }

    /// Returns the subject portion of the code (`CS` in `CS 2110`).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.code.split_whitespace().next().unwrap_or("")
    }

    /// Returns the number portion of the code (`2110` in `CS 2110`).
    ///
    /// Synthesized codes such as `AP Computer Science A` return the remainder
    /// after the subject.
    #[must_use]
    pub fn number(&self) -> &str {
        self.code.trim_start().split_once(char::is_whitespace).map_or("", |(_, rest)| rest.trim())
    }

    /// Returns true for credit granted by an exam rather than a class.
    ///
    /// Covers the credits carrier, the writing-seminar equivalent English
    /// exams map to, and codes under the `AP`, `IB` or `CREDITS` subjects.
    #[must_use]
    pub fn is_exam_credit(&self) -> bool {
        matches!(self.course_id, CourseId::CREDITS | CourseId::FWS_EXAM)
            || matches!(self.subject(), "AP" | "IB" | "CREDITS")
    }
}
