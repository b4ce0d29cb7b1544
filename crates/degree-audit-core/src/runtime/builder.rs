// crates/degree-audit-core/src/runtime/builder.rs
// ============================================================================
// Module: Fulfillment Graph Builder
// Description: Matches courses to requirements and applies double counting.
// Purpose: Produce the safe and dangerous graphs bracketing the optimum.
// Dependencies: crate::core, crate::runtime::{graph, resolver}, tracing
// ============================================================================

//! ## Overview
//! Every slot checker is evaluated over the whole course slice (block-wise),
//! yielding candidate edges. Manual overrides are then applied: an opt-out
//! removes the (course, requirement) pair entirely and wins over an opt-in;
//! an opt-in forces the edge.
//!
//! - The dangerous graph receives every candidate and forced edge.
//! - The safe graph receives edges into requirements that allow double
//!   counting, forced edges, and uncontested edges. A course contested by
//!   several non-double-counting requirements goes only to a requirement for
//!   which it is the sole candidate; the first such requirement in resolved
//!   order wins. A forced edge into a non-double-counting requirement claims
//!   the course, dropping its other contested edges.
//!
//! Contention is decided per course identity (`unique_id`), so exam
//! pseudo-courses sharing one identity contend as a unit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::collections::HashMap;

use tracing::debug;

use crate::core::CourseTaken;
use crate::core::RequirementId;
use crate::core::UniqueId;
use crate::runtime::graph::FulfillmentGraph;
use crate::runtime::resolver::ResolvedRequirement;

// ============================================================================
// SECTION: Output
// ============================================================================

/// Safe and dangerous graphs plus the shared-course warning set.
#[derive(Debug, Clone, Default)]
pub struct GraphPair {
    /// Conservative graph.
    pub safe: FulfillmentGraph,
    /// Optimistic graph.
    pub dangerous: FulfillmentGraph,
    /// Course identities connected to several requirements in the dangerous
    /// graph where not all of them allow double counting.
    pub double_counted: BTreeSet<UniqueId>,
}

// ============================================================================
// SECTION: Candidates
// ============================================================================

/// Candidate course rows for one requirement.
#[derive(Debug, Default)]
struct Candidates {
    /// Rows matched by a slot checker and not overridden.
    matched: BTreeSet<usize>,
    /// Rows forced in by an opt-in.
    forced: BTreeSet<usize>,
}

impl Candidates {
    /// Collects candidate rows after applying overrides.
    fn collect(requirement: &ResolvedRequirement<'_>, courses: &[CourseTaken]) -> Self {
        let forced: BTreeSet<usize> = courses
            .iter()
            .enumerate()
            .filter(|(_, course)| requirement.is_opted_in(course.course_id))
            .map(|(row, _)| row)
            .collect();
        let mut matched = BTreeSet::new();
        for slot in requirement.slots() {
            matched.extend(slot.checker.matching_indices(courses));
        }
        matched.retain(|row| {
            !forced.contains(row)
                && courses.get(*row).is_some_and(|course| !requirement.is_opted_out(course.course_id))
        });
        Self {
            matched,
            forced,
        }
    }

    /// Returns every candidate row in course order.
    fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.matched.union(&self.forced).copied()
    }
}

/// Non-double-counting requirements competing for one course identity.
#[derive(Debug, Default)]
struct Contenders {
    /// Requirement indices with a checker match.
    matched: Vec<usize>,
    /// Requirement indices with an opt-in.
    forced: Vec<usize>,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds both graphs for the resolved requirements.
#[must_use]
pub fn build_graphs(requirements: &[ResolvedRequirement<'_>], courses: &[CourseTaken]) -> GraphPair {
    let candidates: Vec<Candidates> =
        requirements.iter().map(|requirement| Candidates::collect(requirement, courses)).collect();

    let matched_ids: Vec<BTreeSet<&UniqueId>> = candidates
        .iter()
        .map(|found| found.matched.iter().map(|row| &courses[*row].unique_id).collect())
        .collect();

    let mut contested: HashMap<&UniqueId, Contenders> = HashMap::new();
    for (index, (requirement, found)) in requirements.iter().zip(&candidates).enumerate() {
        if requirement.allows_double_counting() {
            continue;
        }
        for unique_id in &matched_ids[index] {
            contested.entry(*unique_id).or_default().matched.push(index);
        }
        let forced_ids: BTreeSet<&UniqueId> =
            found.forced.iter().map(|row| &courses[*row].unique_id).collect();
        for unique_id in forced_ids {
            contested.entry(unique_id).or_default().forced.push(index);
        }
    }

    let mut pair = GraphPair::default();
    for (index, (requirement, found)) in requirements.iter().zip(&candidates).enumerate() {
        let id = requirement.id();
        pair.dangerous.add_requirement(id);
        pair.safe.add_requirement(id);
        for row in found.rows() {
            let course = &courses[row];
            pair.dangerous.add_edge(id, course);
            let keep = requirement.allows_double_counting()
                || found.forced.contains(&row)
                || contested
                    .get(&course.unique_id)
                    .is_none_or(|contenders| wins_contest(index, contenders, &matched_ids));
            if keep {
                pair.safe.add_edge(id, course);
            }
        }
    }

    pair.double_counted = double_counted(requirements, &pair.dangerous);
    debug!(
        safe_edges = pair.safe.edge_count(),
        dangerous_edges = pair.dangerous.edge_count(),
        double_counted = pair.double_counted.len(),
        "built fulfillment graphs"
    );
    pair
}

/// Decides whether requirement `index` keeps a contested course in the safe graph.
fn wins_contest(index: usize, contenders: &Contenders, matched_ids: &[BTreeSet<&UniqueId>]) -> bool {
    if contenders.forced.iter().any(|other| *other != index) {
        return false;
    }
    if contenders.matched.len() <= 1 {
        return true;
    }
    // The course must be the requirement's only candidate; declaration order breaks ties.
    contenders.matched.iter().copied().find(|other| matched_ids[*other].len() == 1) == Some(index)
}

/// Collects course identities ambiguously shared in the dangerous graph.
fn double_counted(
    requirements: &[ResolvedRequirement<'_>],
    dangerous: &FulfillmentGraph,
) -> BTreeSet<UniqueId> {
    let allows: HashMap<&RequirementId, bool> = requirements
        .iter()
        .map(|requirement| (requirement.id(), requirement.allows_double_counting()))
        .collect();
    dangerous
        .course_ids()
        .filter(|unique_id| {
            let linked = dangerous.requirements_for_course(unique_id);
            linked.len() >= 2 && !linked.iter().all(|id| allows.get(id).copied().unwrap_or(false))
        })
        .cloned()
        .collect()
}
