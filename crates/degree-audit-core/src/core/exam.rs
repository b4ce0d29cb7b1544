// crates/degree-audit-core/src/core/exam.rs
// ============================================================================
// Module: Exam Credit
// Description: AP/IB exam records and their conversion to pseudo-courses.
// Purpose: Let exam credit participate in matching like any other course.
// Dependencies: crate::core::{course, identifiers}, serde
// ============================================================================

//! ## Overview
//! An exam converts to course records sharing one unique id (`AP Biology`).
//! The best rule for an exam is the one whose name contains the exam subject,
//! whose minimum score the exam meets, with the highest minimum. Equivalents
//! come from the student's college, falling back to `DEFAULT`.
//!
//! - Exactly one equivalent: one course carrying the exam credits.
//! - Zero or several: a [`CourseId::CREDITS`] course carrying the credits
//!   plus a zero-credit course per equivalent.
//! - Subject unknown to the table, or the major is excluded: a zero-credit
//!   [`CourseId::NO_EQUIVALENT`] course, visible but matching nothing.
//! - Subject known but the score is below every threshold: nothing.
//!
//! Students with no college (graduate-only) receive no exam courses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::course::CourseTaken;
use crate::core::identifiers::CourseId;
use crate::core::identifiers::UniqueId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Equivalents key used when the student's college has no entry.
pub const DEFAULT_EQUIVALENTS_KEY: &str = "DEFAULT";

// ============================================================================
// SECTION: Exam Records
// ============================================================================

/// Exam program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamType {
    /// Advanced Placement.
    #[serde(rename = "AP")]
    Ap,
    /// International Baccalaureate.
    #[serde(rename = "IB")]
    Ib,
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ap => f.write_str("AP"),
            Self::Ib => f.write_str("IB"),
        }
    }
}

/// One exam result entered during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Exam program.
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    /// Exam subject, e.g. `Computer Science A`.
    pub subject: String,
    /// Reported score.
    pub score: u32,
}

impl ExamRecord {
    /// Returns the shared code and unique id for this exam's courses.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{} {}", self.exam_type, self.subject)
    }
}

// ============================================================================
// SECTION: Conversion Trait
// ============================================================================

/// Converts exam records into pseudo-courses.
pub trait ExamCreditConverter {
    /// Converts `exams` for a student in `college` with the given majors.
    fn convert(
        &self,
        college: Option<&str>,
        majors: &[String],
        exams: &[ExamRecord],
    ) -> Vec<CourseTaken>;
}

// ============================================================================
// SECTION: Exam Table
// ============================================================================

/// One credit rule for an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRule {
    /// Exam name; matched by containment against the record subject.
    pub name: String,
    /// Minimum qualifying score.
    pub minimum_score: u32,
    /// Credits awarded.
    pub credits: f64,
    /// Course equivalents keyed by college code or `DEFAULT`.
    #[serde(default)]
    pub course_equivalents: BTreeMap<String, Vec<CourseId>>,
    /// Majors that do not accept this credit.
    #[serde(default)]
    pub majors_excluded: Vec<String>,
}

/// Static exam credit table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamCreditTable {
    /// AP rules.
    #[serde(default, rename = "AP")]
    pub ap: Vec<ExamRule>,
    /// IB rules.
    #[serde(default, rename = "IB")]
    pub ib: Vec<ExamRule>,
}

impl ExamCreditTable {
    /// Returns the rules for one exam program.
    #[must_use]
    pub fn rules(&self, exam_type: ExamType) -> &[ExamRule] {
        match exam_type {
            ExamType::Ap => &self.ap,
            ExamType::Ib => &self.ib,
        }
    }

    /// Converts exams for a single (optional) major.
    fn convert_for_major(
        &self,
        college: &str,
        major: Option<&str>,
        exams: &[ExamRecord],
    ) -> Vec<CourseTaken> {
        let mut courses = Vec::new();
        // AP results precede IB results.
        for exam_type in [ExamType::Ap, ExamType::Ib] {
            for exam in exams.iter().filter(|exam| exam.exam_type == exam_type) {
                self.convert_exam(college, major, exam, &mut courses);
            }
        }
        courses
    }

    /// Appends the courses produced by one exam.
    fn convert_exam(
        &self,
        college: &str,
        major: Option<&str>,
        exam: &ExamRecord,
        courses: &mut Vec<CourseTaken>,
    ) {
        let code = exam.code();
        let rules = self.rules(exam.exam_type);
        let known = !exam.subject.is_empty() && rules.iter().any(|rule| rule.name.contains(&exam.subject));
        let best = if known {
            rules
                .iter()
                .filter(|rule| rule.name.contains(&exam.subject) && exam.score >= rule.minimum_score)
                .fold(None, |best: Option<&ExamRule>, rule| match best {
                    Some(current) if current.minimum_score >= rule.minimum_score => Some(current),
                    _ => Some(rule),
                })
        } else {
            None
        };

        let Some(rule) = best else {
            if !known {
                courses.push(pseudo_course(&code, CourseId::NO_EQUIVALENT, 0.0));
            }
            return;
        };

        if major.is_some_and(|major| rule.majors_excluded.iter().any(|excluded| excluded == major)) {
            courses.push(pseudo_course(&code, CourseId::NO_EQUIVALENT, 0.0));
            return;
        }

        let equivalents = rule
            .course_equivalents
            .get(college)
            .or_else(|| rule.course_equivalents.get(DEFAULT_EQUIVALENTS_KEY))
            .map_or(&[][..], Vec::as_slice);
        if let [single] = equivalents {
            courses.push(pseudo_course(&code, *single, rule.credits));
        } else {
            courses.push(pseudo_course(&code, CourseId::CREDITS, rule.credits));
            courses.extend(equivalents.iter().map(|id| pseudo_course(&code, *id, 0.0)));
        }
    }
}

impl ExamCreditConverter for ExamCreditTable {
    fn convert(
        &self,
        college: Option<&str>,
        majors: &[String],
        exams: &[ExamRecord],
    ) -> Vec<CourseTaken> {
        let Some(college) = college else {
            return Vec::new();
        };
        if majors.is_empty() {
            return self.convert_for_major(college, None, exams);
        }

        // The first major to produce a code owns every course with that code.
        let mut claimed = BTreeSet::new();
        let mut courses = Vec::new();
        for major in majors {
            let produced = self.convert_for_major(college, Some(major), exams);
            let fresh: BTreeSet<String> = produced
                .iter()
                .filter(|course| !claimed.contains(&course.code))
                .map(|course| course.code.clone())
                .collect();
            courses.extend(produced.into_iter().filter(|course| fresh.contains(&course.code)));
            claimed.extend(fresh);
        }
        courses
    }
}

/// Builds one exam pseudo-course.
fn pseudo_course(code: &str, course_id: CourseId, credits: f64) -> CourseTaken {
    CourseTaken {
        unique_id: UniqueId::Named(code.to_string()),
        course_id,
        code: code.to_string(),
        credits,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use super::*;

    fn rule(name: &str, minimum_score: u32, credits: f64, equivalents: &[u64]) -> ExamRule {
        let mut course_equivalents = BTreeMap::new();
        course_equivalents.insert(
            DEFAULT_EQUIVALENTS_KEY.to_string(),
            equivalents.iter().copied().map(CourseId::new).collect(),
        );
        ExamRule {
            name: name.to_string(),
            minimum_score,
            credits,
            course_equivalents,
            majors_excluded: Vec::new(),
        }
    }

    fn ap(subject: &str, score: u32) -> ExamRecord {
        ExamRecord {
            exam_type: ExamType::Ap,
            subject: subject.to_string(),
            score,
        }
    }

    #[test]
    fn highest_qualifying_threshold_wins() {
        let table = ExamCreditTable {
            ap: vec![rule("Biology", 4, 4.0, &[100]), rule("Biology", 5, 8.0, &[100])],
            ib: Vec::new(),
        };
        let courses = table.convert(Some("AS"), &[], &[ap("Biology", 5)]);
        assert_eq!(courses.len(), 1);
        assert!((courses[0].credits - 8.0).abs() < f64::EPSILON);
        assert_eq!(courses[0].course_id, CourseId::new(100));
    }

    #[test]
    fn several_equivalents_split_credits() {
        let table = ExamCreditTable {
            ap: Vec::new(),
            ib: vec![rule("Chemical and Physical Systems", 6, 8.0, &[355_142, 355_143])],
        };
        let exam = ExamRecord {
            exam_type: ExamType::Ib,
            subject: "Chemical and Physical Systems".to_string(),
            score: 6,
        };
        let courses = table.convert(Some("EN"), &["CS".to_string()], &[exam]);
        let ids: Vec<u64> = courses.iter().map(|course| course.course_id.get()).collect();
        assert_eq!(ids, vec![10, 355_142, 355_143]);
        assert!(courses.iter().all(|course| course.code == "IB Chemical and Physical Systems"));
        assert!((courses.iter().map(|course| course.credits).sum::<f64>() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_subject_yields_no_equivalent() {
        let table = ExamCreditTable::default();
        let courses = table.convert(Some("AS"), &[], &[ap("Latin", 5)]);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_id, CourseId::NO_EQUIVALENT);
    }

    #[test]
    fn excluded_major_yields_no_equivalent() {
        let mut excluded = rule("Physics C", 5, 4.0, &[200]);
        excluded.majors_excluded = vec!["PHYS".to_string()];
        let table = ExamCreditTable {
            ap: vec![excluded],
            ib: Vec::new(),
        };
        let courses = table.convert(Some("AS"), &["PHYS".to_string()], &[ap("Physics C", 5)]);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_id, CourseId::NO_EQUIVALENT);
    }

    #[test]
    fn no_college_yields_nothing() {
        let table = ExamCreditTable {
            ap: vec![rule("Biology", 4, 4.0, &[100])],
            ib: Vec::new(),
        };
        assert!(table.convert(None, &[], &[ap("Biology", 5)]).is_empty());
    }

    #[test]
    fn multiple_majors_deduplicate_by_code() {
        let table = ExamCreditTable {
            ap: vec![rule("Biology", 4, 4.0, &[100, 101])],
            ib: Vec::new(),
        };
        let majors = ["BIO".to_string(), "CS".to_string()];
        let courses = table.convert(Some("AS"), &majors, &[ap("Biology", 5)]);
        assert_eq!(courses.len(), 3);
    }
}
