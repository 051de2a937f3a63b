//! Property-based tests for the build analysis pipeline.
//!
//! Uses proptest to generate random catalogs, relationship graphs and
//! selections, then verify the analysis invariants hold.

use proptest::prelude::*;
use tunekit_analysis::{
    BaseVehicle, UpgradeState, VehicleTier, analyze_build, check_compatibility,
    estimate_cost_and_output, upgrade_state, MAX_RECOMMENDATIONS,
};
use tunekit_core::catalog::{Catalog, CatalogBuilder, UpgradeStats};
use tunekit_core::graph::{GraphBuilder, ImpactKind, LinkKind, RelationshipGraph};
use tunekit_core::id::{ComponentId, UpgradeId};
use tunekit_core::selection::SelectionSet;

// ===========================================================================
// Generators
// ===========================================================================

const COMPONENT_KEYS: &[&str] = &[
    "head-gasket",
    "fuel-pump",
    "clutch-disc",
    "axle-shaft",
    "wheel-bearing",
    "radiator-core",
    "brake-line",
    "engine-mount",
];

/// Build a world from raw edge descriptors. Indices are taken modulo the
/// respective counts so any random tuple lands on a real id.
fn build_world(
    upgrade_count: usize,
    impacts: &[(usize, usize, u8)],
    links: &[(usize, usize, u8)],
) -> (Catalog, RelationshipGraph) {
    let mut catalog = CatalogBuilder::new();
    catalog.register_system("engine", "Engine", "Powertrain", "#c0392b");
    catalog.register_system("chassis", "Chassis", "Rolling gear", "#2980b9");
    for (i, key) in COMPONENT_KEYS.iter().enumerate() {
        let system = if i % 2 == 0 { "engine" } else { "chassis" };
        catalog.register_component(key, key, system);
    }
    for i in 0..upgrade_count {
        let i32u = i as u32;
        catalog.register_upgrade(
            &format!("upgrade-{i}"),
            &format!("Upgrade {i}"),
            UpgradeStats {
                cost_low: 100 * (i32u + 1),
                cost_high: 150 * (i32u + 1),
                hp_gain: 5 * i32u,
                torque_gain: 4 * i32u,
            },
        );
    }

    let mut graph = GraphBuilder::new();
    for &(from, to, kind) in impacts {
        graph.add_impact(
            UpgradeId((from % upgrade_count) as u32),
            ComponentId((to % COMPONENT_KEYS.len()) as u32),
            ImpactKind::ALL[kind as usize % ImpactKind::ALL.len()],
        );
    }
    for &(from, to, kind) in links {
        let kind = if kind % 2 == 0 {
            LinkKind::Requires
        } else {
            LinkKind::Recommends
        };
        graph.add_link(
            UpgradeId((from % upgrade_count) as u32),
            UpgradeId((to % upgrade_count) as u32),
            kind,
        );
    }
    (catalog.build(), graph.build())
}

fn arb_world() -> impl Strategy<Value = (Catalog, RelationshipGraph)> {
    (1..30usize).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..COMPONENT_KEYS.len(), 0..5u8), 0..60),
            proptest::collection::vec((0..n, 0..n, 0..2u8), 0..30),
        )
            .prop_map(|(n, impacts, links)| build_world(n, &impacts, &links))
    })
}

/// Turn raw picks into a selection against a concrete catalog.
fn selection_from_picks(catalog: &Catalog, picks: &[usize]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    for &p in picks {
        selection.add(UpgradeId((p % catalog.upgrade_count()) as u32));
    }
    selection
}

fn arb_picks() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..1000usize, 0..12)
}

fn arb_tier() -> impl Strategy<Value = VehicleTier> {
    prop_oneof![
        Just(VehicleTier::Mainstream),
        Just(VehicleTier::Premium),
        Just(VehicleTier::Luxury),
    ]
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Analysis is a pure function of its inputs: two runs agree exactly.
    #[test]
    fn analysis_is_idempotent((catalog, graph) in arb_world(), picks in arb_picks()) {
        let selection = selection_from_picks(&catalog, &picks);
        let first = analyze_build(&catalog, &graph, &selection);
        let second = analyze_build(&catalog, &graph, &selection);
        prop_assert_eq!(first, second);
    }

    /// Growing the selection never shrinks any impact set.
    #[test]
    fn impacts_grow_with_selection(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
        extras in arb_picks(),
    ) {
        let smaller = selection_from_picks(&catalog, &picks);
        let mut larger = smaller.clone();
        for &p in &extras {
            larger.add(UpgradeId((p % catalog.upgrade_count()) as u32));
        }

        let a = analyze_build(&catalog, &graph, &smaller);
        let b = analyze_build(&catalog, &graph, &larger);
        for &kind in &ImpactKind::ALL {
            prop_assert!(
                a.impacts.of(kind).is_subset(b.impacts.of(kind)),
                "{:?} impacts shrank when the selection grew", kind
            );
        }
        prop_assert!(a.systems_affected <= b.systems_affected);
    }

    /// An empty selection produces an empty analysis and a clean report.
    #[test]
    fn empty_selection_is_inert((catalog, graph) in arb_world(), tier in arb_tier()) {
        let selection = SelectionSet::new();

        let analysis = analyze_build(&catalog, &graph, &selection);
        prop_assert!(analysis.impacts.is_empty());
        prop_assert_eq!(analysis.systems_affected, 0);
        prop_assert!(analysis.recommendations.is_empty());
        prop_assert!(analysis.missing_requirements.is_empty());

        let report = check_compatibility(&catalog, &graph, &selection);
        prop_assert!(report.is_clean());

        let base = BaseVehicle { base_hp: 300, base_torque: 280, tier };
        let estimate = estimate_cost_and_output(&catalog, &selection, base);
        prop_assert_eq!(estimate.total_cost_low, 0);
        prop_assert_eq!(estimate.total_cost_high, 0);
        prop_assert_eq!(estimate.final_hp, 300);
        prop_assert_eq!(estimate.final_torque, 280);
        prop_assert_eq!(estimate.cost_per_hp, 0);
    }

    /// Every reported missing requirement is a real unmet `requires` edge.
    #[test]
    fn missing_requirements_are_real_edges(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
    ) {
        let selection = selection_from_picks(&catalog, &picks);
        let analysis = analyze_build(&catalog, &graph, &selection);
        for mr in &analysis.missing_requirements {
            prop_assert!(selection.contains(mr.upgrade));
            prop_assert!(!selection.contains(mr.missing));
            prop_assert!(
                graph.edges_from(mr.upgrade).requires.contains(&mr.missing),
                "{:?} -> {:?} is not a requires edge", mr.upgrade, mr.missing
            );
        }
    }

    /// Selecting the whole catalog satisfies every requirement.
    #[test]
    fn full_selection_has_no_missing_requirements((catalog, graph) in arb_world()) {
        let selection: SelectionSet =
            (0..catalog.upgrade_count() as u32).map(UpgradeId).collect();
        let analysis = analyze_build(&catalog, &graph, &selection);
        prop_assert!(analysis.missing_requirements.is_empty());
    }

    /// A selected upgrade always reports Selected, whatever its edges say.
    #[test]
    fn selected_upgrades_report_selected(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
    ) {
        let selection = selection_from_picks(&catalog, &picks);
        for id in selection.iter() {
            prop_assert_eq!(upgrade_state(&graph, &selection, id), UpgradeState::Selected);
        }
        // An unselected upgrade never reports Selected.
        for i in 0..catalog.upgrade_count() as u32 {
            let id = UpgradeId(i);
            if !selection.contains(id) {
                prop_assert_ne!(upgrade_state(&graph, &selection, id), UpgradeState::Selected);
            }
        }
    }

    /// Recommendations are capped, deduplicated, and never point at a
    /// selected upgrade.
    #[test]
    fn recommendations_are_bounded(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
    ) {
        let selection = selection_from_picks(&catalog, &picks);
        let analysis = analyze_build(&catalog, &graph, &selection);
        prop_assert!(analysis.recommendations.len() <= MAX_RECOMMENDATIONS);

        let mut seen = std::collections::HashSet::new();
        for rec in &analysis.recommendations {
            prop_assert!(!selection.contains(rec.recommends));
            prop_assert!(seen.insert(rec.recommends), "duplicate target {:?}", rec.recommends);
        }
    }

    /// Conflicts come out criticals first, then warnings.
    #[test]
    fn conflicts_sorted_by_severity(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
    ) {
        let selection = selection_from_picks(&catalog, &picks);
        let report = check_compatibility(&catalog, &graph, &selection);
        for pair in report.conflicts.windows(2) {
            prop_assert!(pair[0].severity >= pair[1].severity);
        }
    }

    /// Adding an upgrade never lowers any cost or output total.
    #[test]
    fn estimate_is_monotone(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
        extra in 0..1000usize,
        tier in arb_tier(),
    ) {
        let _ = &graph;
        let base = BaseVehicle { base_hp: 250, base_torque: 240, tier };
        let smaller = selection_from_picks(&catalog, &picks);
        let mut larger = smaller.clone();
        larger.add(UpgradeId((extra % catalog.upgrade_count()) as u32));

        let a = estimate_cost_and_output(&catalog, &smaller, base);
        let b = estimate_cost_and_output(&catalog, &larger, base);
        prop_assert!(a.total_cost_low <= b.total_cost_low);
        prop_assert!(a.total_cost_high <= b.total_cost_high);
        prop_assert!(a.total_hp_gain <= b.total_hp_gain);
        prop_assert!(a.total_torque_gain <= b.total_torque_gain);
        prop_assert!(a.final_hp <= b.final_hp);
        prop_assert!(a.final_torque <= b.final_torque);
    }

    /// The estimator never divides by zero and never inverts its cost range.
    #[test]
    fn estimate_is_safe(
        (catalog, graph) in arb_world(),
        picks in arb_picks(),
        tier in arb_tier(),
    ) {
        let _ = &graph;
        let selection = selection_from_picks(&catalog, &picks);
        let base = BaseVehicle { base_hp: 0, base_torque: 0, tier };
        let estimate = estimate_cost_and_output(&catalog, &selection, base);
        prop_assert!(estimate.total_cost_low <= estimate.total_cost_high);
        if estimate.total_hp_gain == 0 {
            prop_assert_eq!(estimate.cost_per_hp, 0);
        }
    }
}
