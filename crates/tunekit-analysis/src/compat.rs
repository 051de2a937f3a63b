//! Compatibility checking: unmet prerequisites, derived conflicts, and the
//! single-upgrade gating predicate.
//!
//! Conflicts are a set-overlap heuristic over `invalidates` and `stresses`
//! edges, not a constraint solver: two selected upgrades invalidating the
//! same component is a critical conflict, several upgrades stressing a
//! component nothing in the build addresses is a warning. False positives
//! and negatives within that scope are accepted.

use serde::{Deserialize, Serialize};
use tunekit_core::catalog::Catalog;
use tunekit_core::graph::RelationshipGraph;
use tunekit_core::id::{ComponentId, UpgradeId};
use tunekit_core::selection::SelectionSet;

/// One unmet hard prerequisite: `upgrade` is selected, `missing` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRequirement {
    pub upgrade: UpgradeId,
    pub missing: UpgradeId,
}

/// Display severity for a conflict. Ordered: Info < Warning < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A conflict between selected upgrades, anchored on one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub component: ComponentId,
    pub message: String,
    pub severity: Severity,
}

/// Output of [`check_compatibility`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// One entry per (selected upgrade, unmet requirement) pair; not
    /// deduplicated when several upgrades require the same missing target.
    pub missing_requirements: Vec<MissingRequirement>,
    /// Sorted critical-first; ties keep detection order.
    pub conflicts: Vec<Conflict>,
}

impl CompatibilityReport {
    pub fn is_clean(&self) -> bool {
        self.missing_requirements.is_empty() && self.conflicts.is_empty()
    }
}

/// Selectability of one candidate upgrade for UI gating.
/// Precedence: Selected > Locked > Recommended > Available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeState {
    Selected,
    Locked,
    Recommended,
    Available,
}

// ---------------------------------------------------------------------------
// Missing requirements
// ---------------------------------------------------------------------------

/// Collect every (selected upgrade, unmet requirement) pair in selection
/// iteration order. Selection ids unknown to the catalog contribute nothing.
pub fn missing_requirements(
    catalog: &Catalog,
    graph: &RelationshipGraph,
    selection: &SelectionSet,
) -> Vec<MissingRequirement> {
    let mut missing = Vec::new();
    for upgrade in selection.iter() {
        if catalog.upgrade(upgrade).is_none() {
            continue;
        }
        for &required in &graph.edges_from(upgrade).requires {
            if !selection.contains(required) {
                missing.push(MissingRequirement {
                    upgrade,
                    missing: required,
                });
            }
        }
    }
    missing
}

// ---------------------------------------------------------------------------
// Full compatibility check
// ---------------------------------------------------------------------------

/// Check a selection for unmet prerequisites and derived conflicts.
pub fn check_compatibility(
    catalog: &Catalog,
    graph: &RelationshipGraph,
    selection: &SelectionSet,
) -> CompatibilityReport {
    let missing = missing_requirements(catalog, graph, selection);

    // Count distinct invalidators and stressors per component, in
    // first-encounter order over the selection walk. Per-upgrade edges are
    // already deduplicated, so each selected upgrade counts at most once
    // per component.
    let mut invalidators: Vec<(ComponentId, usize)> = Vec::new();
    let mut stressors: Vec<(ComponentId, usize)> = Vec::new();
    let mut addressed: Vec<ComponentId> = Vec::new();

    for upgrade in selection.iter() {
        if catalog.upgrade(upgrade).is_none() {
            continue;
        }
        let edges = graph.edges_from(upgrade);
        for &component in &edges.invalidates {
            bump(&mut invalidators, component);
        }
        for &component in &edges.stresses {
            bump(&mut stressors, component);
        }
        for &component in edges.improves.iter().chain(edges.modifies.iter()) {
            if !addressed.contains(&component) {
                addressed.push(component);
            }
        }
    }

    // Critical conflicts first, then warnings; within a severity the
    // first-encounter order above is preserved.
    let mut conflicts = Vec::new();
    for &(component, count) in &invalidators {
        if count >= 2 {
            conflicts.push(Conflict {
                component,
                message: format!(
                    "{count} selected upgrades invalidate {}",
                    catalog.component_name(component)
                ),
                severity: Severity::Critical,
            });
        }
    }
    for &(component, count) in &stressors {
        if count >= 2 && !addressed.contains(&component) {
            conflicts.push(Conflict {
                component,
                message: format!(
                    "{count} selected upgrades stress {} and nothing in the build addresses it",
                    catalog.component_name(component)
                ),
                severity: Severity::Warning,
            });
        }
    }

    CompatibilityReport {
        missing_requirements: missing,
        conflicts,
    }
}

fn bump(counts: &mut Vec<(ComponentId, usize)>, component: ComponentId) {
    match counts.iter_mut().find(|(c, _)| *c == component) {
        Some((_, n)) => *n += 1,
        None => counts.push((component, 1)),
    }
}

// ---------------------------------------------------------------------------
// Gating predicate
// ---------------------------------------------------------------------------

/// Determine the selectability state of one candidate upgrade.
///
/// A selected upgrade is always `Selected`, even when its own requirements
/// are unmet; that case surfaces through
/// [`check_compatibility`]'s missing-requirements list instead of here.
pub fn upgrade_state(
    graph: &RelationshipGraph,
    selection: &SelectionSet,
    candidate: UpgradeId,
) -> UpgradeState {
    if selection.contains(candidate) {
        return UpgradeState::Selected;
    }

    let edges = graph.edges_from(candidate);
    if edges.requires.iter().any(|r| !selection.contains(*r)) {
        return UpgradeState::Locked;
    }

    let recommended = selection
        .iter()
        .any(|selected| graph.edges_from(selected).recommends.contains(&candidate));
    if recommended {
        return UpgradeState::Recommended;
    }

    UpgradeState::Available
}

// ===========================================================================
// Tests
// ===========================================================================
