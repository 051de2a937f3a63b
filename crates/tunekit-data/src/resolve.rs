//! Resolution pipeline: raw data file entries into a frozen catalog, graph,
//! and presets.
//!
//! The catalog is hand-maintained, so resolution is lenient: duplicate keys
//! and dangling references are logged, recorded as [`LoadWarning`]s, and
//! skipped. The one authoring error that fails the load outright is a
//! `requires` cycle, because a cyclic prerequisite chain can never be
//! satisfied by any selection.

use log::warn;
use std::collections::HashSet;
use std::path::Path;
use tunekit_core::catalog::{Catalog, CatalogBuilder, UpgradeStats};
use tunekit_core::graph::{GraphBuilder, LinkKind, RelationshipGraph};
use tunekit_core::selection::SelectionSet;

use crate::loader::{DataLoadError, deserialize_list, deserialize_optional_list, require_data_file};
use crate::schema::{ComponentData, ImpactData, LinkData, PresetData, SystemData, UpgradeData};

// ===========================================================================
// Output types
// ===========================================================================

/// A data-entry gap found during resolution. The offending entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadWarning {
    #[error("duplicate {kind} key '{key}'; keeping the first definition")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("component '{component}' references unknown system '{system}'")]
    UnknownSystem { component: String, system: String },

    #[error("{referenced_by} references unknown upgrade '{key}'")]
    UnknownUpgrade {
        referenced_by: &'static str,
        key: String,
    },

    #[error("impact on '{upgrade}' references unknown component '{key}'")]
    UnknownComponent { upgrade: String, key: String },

    #[error("upgrade '{upgrade}' requires itself; link dropped")]
    SelfRequires { upgrade: String },
}

/// A named build preset with its upgrade keys resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub selection: SelectionSet,
}

/// The fully resolved output of a data directory.
#[derive(Debug)]
pub struct BuildData {
    pub catalog: Catalog,
    pub graph: RelationshipGraph,
    pub presets: Vec<Preset>,
    pub warnings: Vec<LoadWarning>,
}

/// Raw file contents before cross-reference resolution.
#[derive(Debug, Default)]
pub struct RawData {
    pub systems: Vec<SystemData>,
    pub components: Vec<ComponentData>,
    pub upgrades: Vec<UpgradeData>,
    pub impacts: Vec<ImpactData>,
    pub links: Vec<LinkData>,
    pub presets: Vec<PresetData>,
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load a data directory and resolve it.
///
/// `systems`, `components`, and `upgrades` files are required; `impacts`,
/// `links`, and `presets` are optional and default to empty.
pub fn load_build_data(dir: &Path) -> Result<BuildData, DataLoadError> {
    let systems_path = require_data_file(dir, "systems")?;
    let components_path = require_data_file(dir, "components")?;
    let upgrades_path = require_data_file(dir, "upgrades")?;

    let raw = RawData {
        systems: deserialize_list(&systems_path, "systems")?,
        components: deserialize_list(&components_path, "components")?,
        upgrades: deserialize_list(&upgrades_path, "upgrades")?,
        impacts: deserialize_optional_list(dir, "impacts", "impacts")?,
        links: deserialize_optional_list(dir, "links", "links")?,
        presets: deserialize_optional_list(dir, "presets", "presets")?,
    };

    resolve(raw)
}

/// Resolve raw entries into a frozen catalog, graph, and presets.
pub fn resolve(raw: RawData) -> Result<BuildData, DataLoadError> {
    let mut warnings = Vec::new();

    let catalog = resolve_catalog(&raw, &mut warnings);
    let graph = resolve_graph(&raw, &catalog, &mut warnings)?;
    let presets = resolve_presets(&raw, &catalog, &mut warnings);

    Ok(BuildData {
        catalog,
        graph,
        presets,
        warnings,
    })
}

// ===========================================================================
// Resolution steps
// ===========================================================================

fn resolve_catalog(raw: &RawData, warnings: &mut Vec<LoadWarning>) -> Catalog {
    let mut builder = CatalogBuilder::new();
    let mut seen = HashSet::new();

    for system in &raw.systems {
        if !seen.insert(system.key.clone()) {
            push_warning(
                warnings,
                LoadWarning::DuplicateKey {
                    kind: "system",
                    key: system.key.clone(),
                },
            );
            continue;
        }
        builder.register_system(
            &system.key,
            &system.name,
            &system.description,
            &system.display_color,
        );
    }

    seen.clear();
    for component in &raw.components {
        if !seen.insert(component.key.clone()) {
            push_warning(
                warnings,
                LoadWarning::DuplicateKey {
                    kind: "component",
                    key: component.key.clone(),
                },
            );
            continue;
        }
        if builder
            .register_component(&component.key, &component.name, &component.system)
            .is_none()
        {
            push_warning(
                warnings,
                LoadWarning::UnknownSystem {
                    component: component.key.clone(),
                    system: component.system.clone(),
                },
            );
        }
    }

    seen.clear();
    for upgrade in &raw.upgrades {
        if !seen.insert(upgrade.key.clone()) {
            push_warning(
                warnings,
                LoadWarning::DuplicateKey {
                    kind: "upgrade",
                    key: upgrade.key.clone(),
                },
            );
            continue;
        }
        builder.register_upgrade(
            &upgrade.key,
            &upgrade.name,
            UpgradeStats {
                cost_low: upgrade.cost_low,
                cost_high: upgrade.cost_high,
                hp_gain: upgrade.hp_gain,
                torque_gain: upgrade.torque_gain,
            },
        );
    }

    builder.build()
}

fn resolve_graph(
    raw: &RawData,
    catalog: &Catalog,
    warnings: &mut Vec<LoadWarning>,
) -> Result<RelationshipGraph, DataLoadError> {
    let mut builder = GraphBuilder::new();

    for impact in &raw.impacts {
        let Some(from) = catalog.upgrade_id(&impact.upgrade) else {
            push_warning(
                warnings,
                LoadWarning::UnknownUpgrade {
                    referenced_by: "impact edge",
                    key: impact.upgrade.clone(),
                },
            );
            continue;
        };
        let Some(to) = catalog.component_id(&impact.component) else {
            push_warning(
                warnings,
                LoadWarning::UnknownComponent {
                    upgrade: impact.upgrade.clone(),
                    key: impact.component.clone(),
                },
            );
            continue;
        };
        builder.add_impact(from, to, impact.kind);
    }

    for link in &raw.links {
        let Some(from) = catalog.upgrade_id(&link.upgrade) else {
            push_warning(
                warnings,
                LoadWarning::UnknownUpgrade {
                    referenced_by: "link edge",
                    key: link.upgrade.clone(),
                },
            );
            continue;
        };
        let Some(to) = catalog.upgrade_id(&link.target) else {
            push_warning(
                warnings,
                LoadWarning::UnknownUpgrade {
                    referenced_by: "link edge",
                    key: link.target.clone(),
                },
            );
            continue;
        };
        if !builder.add_link(from, to, link.kind) && link.kind == LinkKind::Requires {
            push_warning(
                warnings,
                LoadWarning::SelfRequires {
                    upgrade: link.upgrade.clone(),
                },
            );
        }
    }

    let graph = builder.build();
    graph.validate_requires_acyclic()?;
    Ok(graph)
}

fn resolve_presets(
    raw: &RawData,
    catalog: &Catalog,
    warnings: &mut Vec<LoadWarning>,
) -> Vec<Preset> {
    raw.presets
        .iter()
        .map(|preset| {
            let mut selection = SelectionSet::new();
            for key in &preset.upgrades {
                match catalog.upgrade_id(key) {
                    Some(id) => {
                        selection.add(id);
                    }
                    None => push_warning(
                        warnings,
                        LoadWarning::UnknownUpgrade {
                            referenced_by: "preset",
                            key: key.clone(),
                        },
                    ),
                }
            }
            Preset {
                name: preset.name.clone(),
                selection,
            }
        })
        .collect()
}

fn push_warning(warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
    warn!("{warning}");
    warnings.push(warning);
}

// ===========================================================================
// Tests
// ===========================================================================
