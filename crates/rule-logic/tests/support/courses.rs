// crates/rule-logic/tests/support/courses.rs
// ============================================================================
// Module: Course Fixtures
// Description: Minimal course records and checks for rule tests.
// ============================================================================
//! ## Overview
//! `Course` carries a subject, a four-digit number and credits. `CourseCheck`
//! is the leaf predicate and `resolve` maps expression calls onto it.

use rule_logic::Literal;
use rule_logic::Predicate;

/// Course as seen by the tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    /// Subject code such as `CS`.
    pub subject: &'static str,
    /// Catalog number such as `2110`.
    pub number: u16,
    /// Credit hours.
    pub credits: u8,
}

/// Shorthand constructor.
pub const fn course(subject: &'static str, number: u16, credits: u8) -> Course {
    Course {
        subject,
        number,
        credits,
    }
}

/// Leaf checks over a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseCheck {
    /// Subject equals this code.
    Subject(String),
    /// Number equals this value.
    Number(u16),
    /// Number is at least `level * 1000`.
    MinLevel(u16),
    /// Credits are at least this many.
    MinCredits(u8),
}

impl Predicate<Course> for CourseCheck {
    fn test(&self, course: &Course) -> bool {
        match self {
            Self::Subject(subject) => course.subject == subject.as_str(),
            Self::Number(number) => course.number == *number,
            Self::MinLevel(level) => course.number / 1000 >= *level,
            Self::MinCredits(credits) => course.credits >= *credits,
        }
    }
}

/// Resolves `subject("CS")`, `number(2110)`, `min_level(3)` and `min_credits(4)`.
pub fn resolve(name: &str, args: &[Literal<'_>]) -> Result<CourseCheck, String> {
    match (name, args) {
        ("subject", [Literal::Str(subject)]) => Ok(CourseCheck::Subject((*subject).to_string())),
        ("number", [Literal::Number(n)]) => {
            u16::try_from(*n).map(CourseCheck::Number).map_err(|err| err.to_string())
        }
        ("min_level", [Literal::Number(n)]) => {
            u16::try_from(*n).map(CourseCheck::MinLevel).map_err(|err| err.to_string())
        }
        ("min_credits", [Literal::Number(n)]) => {
            u8::try_from(*n).map(CourseCheck::MinCredits).map_err(|err| err.to_string())
        }
        _ => Err(format!("no check named `{name}` with {} arguments", args.len())),
    }
}

/// A first-year-through-senior transcript.
pub fn transcript() -> Vec<Course> {
    vec![
        course("CS", 1110, 4),
        course("MATH", 1910, 4),
        course("CS", 2110, 4),
        course("PE", 1100, 1),
        course("CS", 3110, 4),
        course("MATH", 4130, 3),
        course("CS", 4820, 4),
    ]
}
