//! The typed relationship graph between upgrades and components.
//!
//! Two edge families: Upgrade→Component *impact* edges (five kinds) and
//! Upgrade→Upgrade *link* edges (`requires`/`recommends`). Edges are stored
//! as per-upgrade adjacency indexed by dense [`UpgradeId`], so
//! [`RelationshipGraph::edges_from`] is a plain Vec index. Unknown ids are
//! treated as having no edges rather than erroring, because the catalog is
//! hand-maintained and data-entry gaps must never crash the consumer.

use crate::id::{ComponentId, UpgradeId};
use serde::{Deserialize, Serialize};

/// How an upgrade affects a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactKind {
    /// The upgrade makes the component better at its job.
    Improves,
    /// The upgrade alters the component without a clear better/worse.
    Modifies,
    /// The upgrade puts additional load on the component.
    Stresses,
    /// The upgrade makes the component's current setup wrong or void.
    Invalidates,
    /// The upgrade trades away some of the component's behavior.
    Compromises,
}

impl ImpactKind {
    /// All kinds in display order.
    pub const ALL: [ImpactKind; 5] = [
        ImpactKind::Improves,
        ImpactKind::Modifies,
        ImpactKind::Stresses,
        ImpactKind::Invalidates,
        ImpactKind::Compromises,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImpactKind::Improves => "improves",
            ImpactKind::Modifies => "modifies",
            ImpactKind::Stresses => "stresses",
            ImpactKind::Invalidates => "invalidates",
            ImpactKind::Compromises => "compromises",
        }
    }
}

/// How one upgrade relates to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Hard prerequisite: selecting the source without the target is invalid.
    Requires,
    /// Advisory synergy: the target pairs well with the source.
    Recommends,
}

/// All outgoing edges of a single upgrade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEdges {
    pub improves: Vec<ComponentId>,
    pub modifies: Vec<ComponentId>,
    pub stresses: Vec<ComponentId>,
    pub invalidates: Vec<ComponentId>,
    pub compromises: Vec<ComponentId>,
    pub requires: Vec<UpgradeId>,
    pub recommends: Vec<UpgradeId>,
}

impl UpgradeEdges {
    /// The impact targets for one kind.
    pub fn impacts(&self, kind: ImpactKind) -> &[ComponentId] {
        match kind {
            ImpactKind::Improves => &self.improves,
            ImpactKind::Modifies => &self.modifies,
            ImpactKind::Stresses => &self.stresses,
            ImpactKind::Invalidates => &self.invalidates,
            ImpactKind::Compromises => &self.compromises,
        }
    }

    fn impacts_mut(&mut self, kind: ImpactKind) -> &mut Vec<ComponentId> {
        match kind {
            ImpactKind::Improves => &mut self.improves,
            ImpactKind::Modifies => &mut self.modifies,
            ImpactKind::Stresses => &mut self.stresses,
            ImpactKind::Invalidates => &mut self.invalidates,
            ImpactKind::Compromises => &mut self.compromises,
        }
    }

    fn links_mut(&mut self, kind: LinkKind) -> &mut Vec<UpgradeId> {
        match kind {
            LinkKind::Requires => &mut self.requires,
            LinkKind::Recommends => &mut self.recommends,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.improves.is_empty()
            && self.modifies.is_empty()
            && self.stresses.is_empty()
            && self.invalidates.is_empty()
            && self.compromises.is_empty()
            && self.requires.is_empty()
            && self.recommends.is_empty()
    }
}

// Returned for ids the graph has never seen.
static EMPTY_EDGES: UpgradeEdges = UpgradeEdges {
    improves: Vec::new(),
    modifies: Vec::new(),
    stresses: Vec::new(),
    invalidates: Vec::new(),
    compromises: Vec::new(),
    requires: Vec::new(),
    recommends: Vec::new(),
};

/// Errors from graph validation.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The `requires` relation contains a cycle; the listed path starts and
    /// ends at the same upgrade.
    #[error("requires cycle through upgrades {path:?}")]
    RequiresCycle { path: Vec<UpgradeId> },
}

/// Builder for constructing an immutable RelationshipGraph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    edges: Vec<UpgradeEdges>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, from: UpgradeId) -> &mut UpgradeEdges {
        let idx = from.0 as usize;
        if idx >= self.edges.len() {
            self.edges.resize_with(idx + 1, UpgradeEdges::default);
        }
        &mut self.edges[idx]
    }

    /// Record an Upgrade→Component impact edge. Duplicate (from, to, kind)
    /// triples are collapsed.
    pub fn add_impact(&mut self, from: UpgradeId, to: ComponentId, kind: ImpactKind) {
        let targets = self.slot(from).impacts_mut(kind);
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Record an Upgrade→Upgrade link edge. Duplicates are collapsed; a
    /// self-`requires` link is refused (an upgrade cannot gate itself) and
    /// reported to the caller via the return value.
    pub fn add_link(&mut self, from: UpgradeId, to: UpgradeId, kind: LinkKind) -> bool {
        if kind == LinkKind::Requires && from == to {
            return false;
        }
        let targets = self.slot(from).links_mut(kind);
        if !targets.contains(&to) {
            targets.push(to);
        }
        true
    }

    /// Freeze into the immutable graph.
    pub fn build(self) -> RelationshipGraph {
        RelationshipGraph { edges: self.edges }
    }
}

/// Immutable, index-based relationship graph. Frozen after build().
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipGraph {
    edges: Vec<UpgradeEdges>,
}

impl RelationshipGraph {
    /// All outgoing edges of an upgrade. An id with no recorded edges
    /// (including ids the catalog has never heard of) yields an empty edge
    /// set; this never errors.
    pub fn edges_from(&self, from: UpgradeId) -> &UpgradeEdges {
        self.edges.get(from.0 as usize).unwrap_or(&EMPTY_EDGES)
    }

    /// Number of upgrades with at least one recorded edge.
    pub fn linked_upgrade_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_empty()).count()
    }

    /// Verify that `requires` edges form no cycle. `recommends` cycles are
    /// legal and not inspected. Runs an iterative three-color DFS; the error
    /// carries one offending path for diagnostics.
    pub fn validate_requires_acyclic(&self) -> Result<(), GraphError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let n = self.edges.len();
        let mut color = vec![Color::White; n];

        for start in 0..n {
            if color[start] != Color::White {
                continue;
            }
            // Stack of (node, next-child-index); path tracks the gray chain.
            let mut stack = vec![(start, 0usize)];
            let mut path = vec![start];
            color[start] = Color::Gray;

            while let Some(&mut (node, ref mut next)) = stack.last_mut() {
                let requires = &self.edges[node].requires;
                if *next < requires.len() {
                    let child = requires[*next].0 as usize;
                    *next += 1;
                    // Targets outside the edge table have no outgoing edges.
                    if child >= n {
                        continue;
                    }
                    match color[child] {
                        Color::White => {
                            color[child] = Color::Gray;
                            stack.push((child, 0));
                            path.push(child);
                        }
                        Color::Gray => {
                            let cycle_start =
                                path.iter().position(|&p| p == child).unwrap_or(0);
                            let mut cycle: Vec<UpgradeId> = path[cycle_start..]
                                .iter()
                                .map(|&p| UpgradeId(p as u32))
                                .collect();
                            cycle.push(UpgradeId(child as u32));
                            return Err(GraphError::RequiresCycle { path: cycle });
                        }
                        Color::Black => {}
                    }
                } else {
                    color[node] = Color::Black;
                    stack.pop();
                    path.pop();
                }
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
