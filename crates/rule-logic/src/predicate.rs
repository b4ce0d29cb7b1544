// crates/rule-logic/src/predicate.rs
// ============================================================================
// Module: Predicates
// Description: Leaf contract evaluated against single items and item windows.
// Purpose: Let rules run over plain slices in 64-item windows.
// Dependencies: crate::rule
// ============================================================================

//! ## Overview
//! A [`Predicate`] answers a yes/no question about one item. Rules are applied
//! to slices a window at a time: bit `n` of a [`Mask64`] is the answer for the
//! `n`-th item of the window.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::rule::Rule;

// ============================================================================
// SECTION: Windows
// ============================================================================

/// Answers for one window, one bit per item.
pub type Mask64 = u64;

/// Number of items evaluated per window.
pub const WINDOW: usize = 64;

/// Returns the mask with one bit set for each of the first `len` items.
#[must_use]
pub(crate) const fn live_bits(len: usize) -> Mask64 {
    if len >= WINDOW { Mask64::MAX } else { (1u64 << len) - 1 }
}

// ============================================================================
// SECTION: Predicate Trait
// ============================================================================

/// Leaf question asked of a single item of type `T`.
pub trait Predicate<T> {
    /// Returns true when `item` satisfies the predicate.
    fn test(&self, item: &T) -> bool;

    /// Answers the predicate for the first [`WINDOW`] items of `window`.
    fn mask(&self, window: &[T]) -> Mask64 {
        window
            .iter()
            .take(WINDOW)
            .enumerate()
            .filter(|(_, item)| self.test(item))
            .fold(0, |mask, (bit, _)| mask | (1u64 << bit))
    }
}

// ============================================================================
// SECTION: Slice Evaluation
// ============================================================================

/// Returns the indices of every item the rule accepts, in slice order.
pub fn matching_indices<T, P>(rule: &Rule<P>, items: &[T]) -> Vec<usize>
where
    P: Predicate<T>,
{
    let mut indices = Vec::new();
    for (chunk, window) in items.chunks(WINDOW).enumerate() {
        let mut mask = rule.mask(window);
        while mask != 0 {
            let bit = mask.trailing_zeros() as usize;
            indices.push(chunk * WINDOW + bit);
            mask &= mask - 1;
        }
    }
    indices
}
