//! The build aggregator: merges every selected upgrade's outgoing edges
//! into one Build Analysis.
//!
//! Pure and total: every selection (including the empty one) has a defined
//! output and there is no error path. Recomputed wholesale on each
//! selection change; nothing here caches.

use crate::compat::{missing_requirements, MissingRequirement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tunekit_core::catalog::Catalog;
use tunekit_core::graph::{ImpactKind, RelationshipGraph};
use tunekit_core::id::{ComponentId, SystemId, UpgradeId};
use tunekit_core::selection::SelectionSet;

/// Display cap for the recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Deduplicated component impacts, one set per edge kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub improves: BTreeSet<ComponentId>,
    pub modifies: BTreeSet<ComponentId>,
    pub stresses: BTreeSet<ComponentId>,
    pub invalidates: BTreeSet<ComponentId>,
    pub compromises: BTreeSet<ComponentId>,
}

impl ImpactSummary {
    /// The impacted components for one kind.
    pub fn of(&self, kind: ImpactKind) -> &BTreeSet<ComponentId> {
        match kind {
            ImpactKind::Improves => &self.improves,
            ImpactKind::Modifies => &self.modifies,
            ImpactKind::Stresses => &self.stresses,
            ImpactKind::Invalidates => &self.invalidates,
            ImpactKind::Compromises => &self.compromises,
        }
    }

    fn of_mut(&mut self, kind: ImpactKind) -> &mut BTreeSet<ComponentId> {
        match kind {
            ImpactKind::Improves => &mut self.improves,
            ImpactKind::Modifies => &mut self.modifies,
            ImpactKind::Stresses => &mut self.stresses,
            ImpactKind::Invalidates => &mut self.invalidates,
            ImpactKind::Compromises => &mut self.compromises,
        }
    }

    pub fn is_empty(&self) -> bool {
        ImpactKind::ALL.iter().all(|&k| self.of(k).is_empty())
    }
}

/// An un-selected upgrade recommended by a selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub from: UpgradeId,
    pub recommends: UpgradeId,
}

/// The aggregated analysis of one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAnalysis {
    pub impacts: ImpactSummary,
    /// Count of distinct systems any impacted component belongs to.
    pub systems_affected: usize,
    /// Deduplicated by target, first-encountered-wins over selection order,
    /// capped at [`MAX_RECOMMENDATIONS`].
    pub recommendations: Vec<Recommendation>,
    pub missing_requirements: Vec<MissingRequirement>,
    /// `|improves|`.
    pub improves_count: usize,
    /// `|stresses| + |invalidates|` -- the single risk metric the UI shows;
    /// invalidation folds into stress here, it is not a separate counter.
    pub stresses_count: usize,
}

/// Aggregate all outgoing edges of the selection into a Build Analysis.
pub fn analyze_build(
    catalog: &Catalog,
    graph: &RelationshipGraph,
    selection: &SelectionSet,
) -> BuildAnalysis {
    let mut impacts = ImpactSummary::default();
    let mut recommendations: Vec<Recommendation> = Vec::new();

    for upgrade in selection.iter() {
        if catalog.upgrade(upgrade).is_none() {
            continue;
        }
        let edges = graph.edges_from(upgrade);

        for kind in ImpactKind::ALL {
            impacts.of_mut(kind).extend(edges.impacts(kind).iter().copied());
        }

        for &target in &edges.recommends {
            if recommendations.len() >= MAX_RECOMMENDATIONS {
                break;
            }
            if selection.contains(target) || catalog.upgrade(target).is_none() {
                continue;
            }
            if recommendations.iter().any(|r| r.recommends == target) {
                continue;
            }
            recommendations.push(Recommendation {
                from: upgrade,
                recommends: target,
            });
        }
    }

    let mut systems: BTreeSet<SystemId> = BTreeSet::new();
    for kind in ImpactKind::ALL {
        for &component in impacts.of(kind) {
            if let Some(system) = catalog.system_of(component) {
                systems.insert(system);
            }
        }
    }

    let improves_count = impacts.improves.len();
    let stresses_count = impacts.stresses.len() + impacts.invalidates.len();

    BuildAnalysis {
        systems_affected: systems.len(),
        recommendations,
        missing_requirements: missing_requirements(catalog, graph, selection),
        improves_count,
        stresses_count,
        impacts,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
