// crates/degree-audit-core/src/runtime/engine.rs
// ============================================================================
// Module: Fulfillment Engine
// Description: Top-level pipeline producing grouped fulfillment reports.
// Purpose: Run normalization, resolution, graph building, and statistics.
// Dependencies: crate::core, crate::runtime, tracing
// ============================================================================

//! ## Overview
//! [`FulfillmentEngine`] borrows a compiled catalog and an exam-credit
//! converter and computes a [`FulfillmentReport`] for any [`UserState`].
//! Computation is pure: identical inputs give identical reports, and every
//! call builds fresh graphs.
//!
//! Groups are ordered College first (total credits, swim test, university and
//! college requirements), then each major, minor, and the graduate program in
//! the user's order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::core::CourseTaken;
use crate::core::ExamCreditConverter;
use crate::core::FulfillmentReport;
use crate::core::GroupKind;
use crate::core::GroupedRequirementFulfillmentReport;
use crate::core::RequirementCatalog;
use crate::core::RequirementFulfillment;
use crate::core::SafeDangerous;
use crate::core::SourceType;
use crate::core::UserState;
use crate::runtime::builder::GraphPair;
use crate::runtime::builder::build_graphs;
use crate::runtime::normalizer::normalize_courses;
use crate::runtime::resolver::ResolvedRequirement;
use crate::runtime::resolver::resolve_requirements;
use crate::runtime::statistics::compute_statistics;
use crate::runtime::synthesized::TotalCreditsPolicy;
use crate::runtime::synthesized::swim_test_fulfillment;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Engine behavior switches.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Total academic credit policy.
    pub total_credits: TotalCreditsPolicy,
    /// Whether the swim test requirement is reported.
    pub swim_test: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            total_credits: TotalCreditsPolicy::default(),
            swim_test: true,
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Everything one computation produces.
#[derive(Debug, Clone)]
pub struct FulfillmentOutcome {
    /// Grouped report.
    pub report: FulfillmentReport,
    /// Normalized courses the report was computed from.
    pub courses: Vec<CourseTaken>,
    /// Safe and dangerous graphs, kept for diagnostics.
    pub graphs: GraphPair,
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Degree fulfillment engine.
#[derive(Debug)]
pub struct FulfillmentEngine<'a, X: ?Sized> {
    /// Compiled requirement catalog.
    catalog: &'a RequirementCatalog,
    /// Exam credit converter.
    exams: &'a X,
    /// Behavior switches.
    options: EngineOptions,
}

impl<'a, X> FulfillmentEngine<'a, X>
where
    X: ExamCreditConverter + ?Sized,
{
    /// Creates an engine.
    #[must_use]
    pub const fn new(catalog: &'a RequirementCatalog, exams: &'a X, options: EngineOptions) -> Self {
        Self {
            catalog,
            exams,
            options,
        }
    }

    /// Returns the engine options.
    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Computes the grouped report for a user.
    #[must_use]
    pub fn compute(&self, user: &UserState) -> FulfillmentOutcome {
        let onboarding = &user.onboarding;
        let courses = normalize_courses(&user.semesters, onboarding, self.exams);
        let requirements = resolve_requirements(
            self.catalog,
            onboarding,
            &user.toggleable_choices,
            &user.overridden_choices,
        );
        let graphs = build_graphs(&requirements, &courses);

        let mut groups = self.group_skeleton(user);
        if let (Some(college), Some(group)) = (onboarding.college.as_deref(), groups.first_mut()) {
            group.requirements.extend(self.options.total_credits.fulfillment(college, &courses));
            if self.options.swim_test {
                group.requirements.push(swim_test_fulfillment(
                    college,
                    &courses,
                    onboarding.took_swim_test,
                ));
            }
        }

        for requirement in &requirements {
            let entry = fulfillment_entry(requirement, &graphs);
            let spec = requirement.spec;
            let kind = GroupKind::from(spec.source_type);
            let slot = groups.iter_mut().find(|group| {
                group.group == kind
                    && (kind == GroupKind::College || group.specific == spec.source_specific_name)
            });
            if let Some(group) = slot {
                group.requirements.push(entry);
            }
        }

        let report = FulfillmentReport {
            groups,
            double_counted_course_unique_ids: graphs.double_counted.clone(),
        };
        debug!(
            courses = courses.len(),
            groups = report.groups.len(),
            requirements = report.requirement_count(),
            "computed fulfillment report"
        );
        FulfillmentOutcome {
            report,
            courses,
            graphs,
        }
    }

    /// Lays out empty groups in report order for the user's known programs.
    fn group_skeleton(&self, user: &UserState) -> Vec<GroupedRequirementFulfillmentReport> {
        let onboarding = &user.onboarding;
        let mut groups: Vec<GroupedRequirementFulfillmentReport> = Vec::new();
        let mut push = |group: GroupKind, specific: &str| {
            if !groups.iter().any(|existing| existing.group == group && existing.specific == specific) {
                groups.push(GroupedRequirementFulfillmentReport {
                    group,
                    specific: specific.to_string(),
                    requirements: Vec::new(),
                });
            }
        };

        if let Some(college) = onboarding.college.as_deref() {
            push(GroupKind::College, college);
        }
        let programs = [
            (SourceType::Major, onboarding.majors.as_slice()),
            (SourceType::Minor, onboarding.minors.as_slice()),
            (SourceType::Grad, onboarding.grad_program.as_slice()),
        ];
        for (source_type, codes) in programs {
            for code in codes {
                let known = match source_type {
                    SourceType::Major => self.catalog.major(code).is_some(),
                    SourceType::Minor => self.catalog.minor(code).is_some(),
                    SourceType::Grad => self.catalog.grad(code).is_some(),
                    SourceType::College => false,
                };
                if known {
                    push(GroupKind::from(source_type), code);
                }
            }
        }
        groups
    }
}

/// Computes safe and dangerous statistics for one requirement.
fn fulfillment_entry(
    requirement: &ResolvedRequirement<'_>,
    graphs: &GraphPair,
) -> RequirementFulfillment {
    let id = requirement.id();
    RequirementFulfillment {
        requirement: requirement.summary(),
        fulfillment: SafeDangerous {
            safe: compute_statistics(requirement, graphs.safe.courses_for_requirement(id)),
            dangerous: compute_statistics(requirement, graphs.dangerous.courses_for_requirement(id)),
        },
    }
}
