// crates/degree-audit-core/src/core/checker.rs
// ============================================================================
// Module: Slot Checkers
// Description: Course predicates and compiled slot checkers.
// Purpose: Compile catalog checker text once and evaluate it over course slices.
// Dependencies: rule-logic, crate::core::{course, identifiers, pattern}, serde, thiserror
// ============================================================================

//! ## Overview
//! A slot checker decides whether a course can count toward one slot of a
//! requirement. Catalog authors write checkers either as a list of course
//! codes / catalog ids, or as a rule expression:
//!
//! ```text
//! any(code("CS 4**1"), course(358526)) && !subject("PE")
//! ```
//!
//! Expressions are parsed by `rule-logic` into a `Rule<CoursePredicate>` and
//! scanned over a plan's courses 64 at a time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rule_logic::DslError;
use rule_logic::Literal;
use rule_logic::Predicate;
use rule_logic::Rule;
use rule_logic::matching_indices;
use rule_logic::parse_rule;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::course::CourseTaken;
use crate::core::identifiers::CourseId;
use crate::core::pattern::CodePattern;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while compiling a slot checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckerError {
    /// Checker expression failed to parse or resolve.
    #[error("invalid checker expression: {0}")]
    Expression(#[from] DslError),
    /// Code list contained an invalid pattern.
    #[error("invalid course code: {0}")]
    Pattern(String),
    /// Checker list was empty.
    #[error("checker matches no course")]
    Empty,
}

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Atomic predicate over a single course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoursePredicate {
    /// Course code matches a pattern such as `CS 4**1`.
    Code(CodePattern),
    /// Course has this catalog identity.
    Course(CourseId),
    /// Course subject equals this value (case-insensitive).
    Subject(String),
    /// Course number begins with a digit at least this large (`3` for 3000+).
    MinLevel(u8),
}

impl Predicate<CourseTaken> for CoursePredicate {
    fn test(&self, course: &CourseTaken) -> bool {
        match self {
            Self::Code(pattern) => pattern.matches(course),
            Self::Course(id) => course.course_id == *id,
            Self::Subject(subject) => course.subject().eq_ignore_ascii_case(subject),
            Self::MinLevel(level) => course
                .number()
                .bytes()
                .next()
                .filter(u8::is_ascii_digit)
                .is_some_and(|digit| digit - b'0' >= *level),
        }
    }
}

impl CoursePredicate {
    /// Resolves a DSL call into a predicate.
    ///
    /// Supported calls: `code("CS 2110")`, `course(358526)`, `subject("PE")`,
    /// `min_level(3)`.
    ///
    /// # Errors
    /// Returns a message for unknown names or malformed arguments.
    pub fn resolve(name: &str, args: &[Literal<'_>]) -> Result<Self, String> {
        match (name, args) {
            ("code", [Literal::Str(text)]) => {
                CodePattern::parse(text).map(Self::Code).map_err(|err| err.to_string())
            }
            ("course", [Literal::Number(id)]) => Ok(Self::Course(CourseId::new(*id))),
            ("subject", [Literal::Str(subject)]) if !subject.trim().is_empty() => {
                Ok(Self::Subject(subject.trim().to_ascii_uppercase()))
            }
            ("min_level", [Literal::Number(level)]) if (1 ..= 9).contains(level) => {
                Ok(Self::MinLevel(u8::try_from(*level).map_err(|err| err.to_string())?))
            }
            ("code" | "subject", _) => Err("expects one string argument".to_string()),
            ("course", _) => Err("expects one catalog id".to_string()),
            ("min_level", _) => Err("expects one level between 1 and 9".to_string()),
            _ => Err("unknown course predicate".to_string()),
        }
    }
}

// ============================================================================
// SECTION: Raw Checkers
// ============================================================================

/// Checker as written in catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChecker {
    /// Rule expression.
    Expression(String),
    /// Any of these course codes or code patterns.
    Codes(Vec<String>),
    /// Any of these catalog course ids.
    CourseIds(Vec<u64>),
}

// ============================================================================
// SECTION: Slot Checker
// ============================================================================

/// Compiled checker for one requirement slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotChecker {
    /// Compiled rule.
    rule: Rule<CoursePredicate>,
}

impl SlotChecker {
    /// Compiles a catalog checker.
    ///
    /// # Errors
    /// Returns [`CheckerError`] when the expression or a code is malformed.
    pub fn compile(raw: &RawChecker) -> Result<Self, CheckerError> {
        let rule = match raw {
            RawChecker::Expression(text) => parse_rule(text, &CoursePredicate::resolve)?,
            RawChecker::Codes(codes) => {
                let patterns = codes
                    .iter()
                    .map(|code| {
                        CodePattern::parse(code)
                            .map(|pattern| Rule::leaf(CoursePredicate::Code(pattern)))
                            .map_err(|err| CheckerError::Pattern(err.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                any_of(patterns)?
            }
            RawChecker::CourseIds(ids) => any_of(
                ids.iter()
                    .map(|id| Rule::leaf(CoursePredicate::Course(CourseId::new(*id))))
                    .collect(),
            )?,
        };
        Ok(Self {
            rule,
        })
    }

    /// Returns true when the course satisfies this checker.
    #[must_use]
    pub fn matches(&self, course: &CourseTaken) -> bool {
        self.rule.matches(course)
    }

    /// Returns the indices of every matching course, in slice order.
    #[must_use]
    pub fn matching_indices(&self, courses: &[CourseTaken]) -> Vec<usize> {
        matching_indices(&self.rule, courses)
    }
}

/// Collapses a non-empty list into a single `any` rule.
fn any_of(mut rules: Vec<Rule<CoursePredicate>>) -> Result<Rule<CoursePredicate>, CheckerError> {
    match rules.len() {
        0 => Err(CheckerError::Empty),
        1 => Ok(rules.remove(0)),
        _ => Ok(Rule::any(rules)),
    }
}
