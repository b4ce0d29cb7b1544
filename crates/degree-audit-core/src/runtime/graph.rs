// crates/degree-audit-core/src/runtime/graph.rs
// ============================================================================
// Module: Fulfillment Graph
// Description: Bipartite relation between requirements and courses.
// Purpose: Store builder decisions with indexed lookup in both directions.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The graph stores edges `(requirement, course)` and answers
//! "which courses count toward this requirement" and "which requirements does
//! this course count toward" without rescanning. It performs no matching.
//!
//! # Invariants
//! - Courses per requirement keep insertion order.
//! - Re-adding an existing edge is a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use crate::core::CourseId;
use crate::core::CourseTaken;
use crate::core::RequirementId;
use crate::core::UniqueId;

// ============================================================================
// SECTION: Graph
// ============================================================================

/// Requirement-to-course relation.
#[derive(Debug, Clone, Default)]
pub struct FulfillmentGraph {
    /// Courses per requirement in insertion order.
    courses: HashMap<RequirementId, Vec<CourseTaken>>,
    /// Requirements per course identity in insertion order.
    requirements: HashMap<UniqueId, Vec<RequirementId>>,
    /// Course-level edges for idempotent insertion.
    edges: HashSet<(RequirementId, UniqueId, CourseId)>,
}

impl FulfillmentGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a requirement so it reports an empty course list.
    pub fn add_requirement(&mut self, requirement: &RequirementId) {
        self.courses.entry(requirement.clone()).or_default();
    }

    /// Adds an edge; returns false when it already existed.
    pub fn add_edge(&mut self, requirement: &RequirementId, course: &CourseTaken) -> bool {
        let key = (requirement.clone(), course.unique_id.clone(), course.course_id);
        if !self.edges.insert(key) {
            return false;
        }
        self.courses.entry(requirement.clone()).or_default().push(course.clone());
        let linked = self.requirements.entry(course.unique_id.clone()).or_default();
        if !linked.contains(requirement) {
            linked.push(requirement.clone());
        }
        true
    }

    /// Returns the courses connected to a requirement.
    #[must_use]
    pub fn courses_for_requirement(&self, requirement: &RequirementId) -> &[CourseTaken] {
        self.courses.get(requirement).map_or(&[], Vec::as_slice)
    }

    /// Returns the requirements a course identity is connected to.
    #[must_use]
    pub fn requirements_for_course(&self, unique_id: &UniqueId) -> &[RequirementId] {
        self.requirements.get(unique_id).map_or(&[], Vec::as_slice)
    }

    /// Returns true when the course is connected to the requirement.
    #[must_use]
    pub fn contains_edge(&self, requirement: &RequirementId, course: &CourseTaken) -> bool {
        self.edges.contains(&(requirement.clone(), course.unique_id.clone(), course.course_id))
    }

    /// Returns every connected course identity.
    pub fn course_ids(&self) -> impl Iterator<Item = &UniqueId> {
        self.requirements.keys()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
