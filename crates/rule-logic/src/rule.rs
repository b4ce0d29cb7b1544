// crates/rule-logic/src/rule.rs
// ============================================================================
// Module: Rule Tree
// Description: Boolean combinations of leaf predicates.
// Purpose: Define `Rule` with per-item and per-window evaluation.
// Dependencies: crate::predicate, serde, smallvec
// ============================================================================

//! ## Overview
//! A [`Rule`] combines leaves with `all`, `any`, `not` and `at_least`. The
//! same tree answers for one item through [`Rule::matches`] or for a window of
//! up to 64 items through [`Rule::mask`]; both agree item for item.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::predicate::Mask64;
use crate::predicate::Predicate;
use crate::predicate::WINDOW;
use crate::predicate::live_bits;

// ============================================================================
// SECTION: Rule Definition
// ============================================================================

/// Child list of a group node.
pub type Members<P> = SmallVec<[Box<Rule<P>>; 4]>;

/// Boolean rule over leaf predicates of type `P`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule<P> {
    /// Every member holds. An empty list always holds.
    All(Members<P>),
    /// Some member holds. An empty list never holds.
    Any(Members<P>),
    /// The inner rule does not hold.
    Not(Box<Self>),
    /// At least `min` members hold.
    AtLeast {
        /// Members that must hold.
        min: u8,
        /// Candidate members.
        members: Members<P>,
    },
    /// Leaf predicate.
    Leaf(P),
}

impl<P> Rule<P> {
    /// Builds an `all` group.
    #[must_use]
    pub fn all(members: Vec<Self>) -> Self {
        Self::All(boxed(members))
    }

    /// Builds an `any` group.
    #[must_use]
    pub fn any(members: Vec<Self>) -> Self {
        Self::Any(boxed(members))
    }

    /// Inverts a rule.
    #[must_use]
    pub fn negate(rule: Self) -> Self {
        Self::Not(Box::new(rule))
    }

    /// Builds an `at_least` group.
    #[must_use]
    pub fn at_least(min: u8, members: Vec<Self>) -> Self {
        Self::AtLeast {
            min,
            members: boxed(members),
        }
    }

    /// Wraps a leaf predicate.
    #[must_use]
    pub const fn leaf(predicate: P) -> Self {
        Self::Leaf(predicate)
    }
}

/// Boxes each member into a child list.
fn boxed<P>(members: Vec<Rule<P>>) -> Members<P> {
    members.into_iter().map(Box::new).collect()
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<P> Rule<P> {
    /// Returns true when `item` satisfies the rule.
    pub fn matches<T>(&self, item: &T) -> bool
    where
        P: Predicate<T>,
    {
        match self {
            Self::Leaf(predicate) => predicate.test(item),
            Self::Not(inner) => !inner.matches(item),
            Self::All(members) => members.iter().all(|member| member.matches(item)),
            Self::Any(members) => members.iter().any(|member| member.matches(item)),
            Self::AtLeast {
                min,
                members,
            } => {
                let min = usize::from(*min);
                members.iter().filter(|member| member.matches(item)).take(min).count() == min
            }
        }
    }

    /// Answers the rule for the first 64 items of `window`.
    pub fn mask<T>(&self, window: &[T]) -> Mask64
    where
        P: Predicate<T>,
    {
        let live = live_bits(window.len());
        if live == 0 {
            return 0;
        }
        match self {
            Self::Leaf(predicate) => predicate.mask(window) & live,
            Self::Not(inner) => !inner.mask(window) & live,
            Self::All(members) => {
                let mut mask = live;
                for member in members {
                    if mask == 0 {
                        break;
                    }
                    mask &= member.mask(window);
                }
                mask
            }
            Self::Any(members) => {
                let mut mask = 0;
                for member in members {
                    if mask == live {
                        break;
                    }
                    mask |= member.mask(window);
                }
                mask & live
            }
            Self::AtLeast {
                min,
                members,
            } => {
                let min = usize::from(*min);
                let masks: Vec<Mask64> = members.iter().map(|member| member.mask(window)).collect();
                (0 .. window.len().min(WINDOW))
                    .filter(|bit| masks.iter().filter(|mask| (*mask >> bit) & 1 == 1).count() >= min)
                    .fold(0, |out, bit| out | (1u64 << bit))
            }
        }
    }
}
