// crates/rule-logic/src/validate.rs
// ============================================================================
// Module: Rule Validation
// Description: Shape checks for rules built from untrusted text.
// Purpose: Reject rules that are too deep or whose groups can never be useful.
// Dependencies: crate::rule, std::fmt
// ============================================================================

//! ## Overview
//! [`validate`] walks a rule without recursion and fails on the first node
//! that is too deep, an empty `all`/`any`, or an `at_least` whose minimum is
//! zero or larger than its member count.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::rule::Rule;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Deepest node accepted, counting the root as depth 0.
pub const MAX_DEPTH: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Shape problem found in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A node sits deeper than [`MAX_DEPTH`].
    TooDeep {
        /// Depth of the offending node.
        depth: usize,
    },
    /// An `all` or `any` with no members.
    EmptyGroup(&'static str),
    /// `at_least` asks for more members than it has.
    MinimumExceedsMembers {
        /// Requested minimum.
        min: u8,
        /// Member count.
        members: usize,
    },
    /// `at_least(0, ..)` holds for every item.
    ZeroMinimum,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooDeep {
                depth,
            } => write!(f, "rule nests {depth} levels deep (max {MAX_DEPTH})"),
            Self::EmptyGroup(group) => write!(f, "`{group}()` needs at least one member"),
            Self::MinimumExceedsMembers {
                min,
                members,
            } => write!(f, "at_least({min}, ..) has only {members} members"),
            Self::ZeroMinimum => f.write_str("at_least(0, ..) always holds"),
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks the shape of `rule`.
///
/// # Errors
/// Returns the first [`ValidationError`] found in depth-first order.
pub fn validate<P>(rule: &Rule<P>) -> Result<(), ValidationError> {
    let mut pending = vec![(rule, 0usize)];
    while let Some((node, depth)) = pending.pop() {
        if depth > MAX_DEPTH {
            return Err(ValidationError::TooDeep {
                depth,
            });
        }
        let members = match node {
            Rule::All(members) if members.is_empty() => {
                return Err(ValidationError::EmptyGroup("all"));
            }
            Rule::Any(members) if members.is_empty() => {
                return Err(ValidationError::EmptyGroup("any"));
            }
            Rule::AtLeast {
                min: 0, ..
            } => return Err(ValidationError::ZeroMinimum),
            Rule::AtLeast {
                min,
                members,
            } if usize::from(*min) > members.len() => {
                return Err(ValidationError::MinimumExceedsMembers {
                    min: *min,
                    members: members.len(),
                });
            }
            Rule::All(members)
            | Rule::Any(members)
            | Rule::AtLeast {
                members, ..
            } => members,
            Rule::Not(inner) => {
                pending.push((&**inner, depth + 1));
                continue;
            }
            Rule::Leaf(_) => continue,
        };
        pending.extend(members.iter().rev().map(|member| (&**member, depth + 1)));
    }
    Ok(())
}
