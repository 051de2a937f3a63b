//! Serde data file structs for catalog content definitions.
//!
//! These structs define the on-disk format for vehicle systems, components,
//! upgrades, impact edges, link edges, and build presets. They are
//! deserialized from RON, JSON, or TOML data files and then resolved into
//! catalog types by the loader.

use serde::Deserialize;
use tunekit_core::graph::{ImpactKind, LinkKind};

// ===========================================================================
// Catalog entries
// ===========================================================================

/// A vehicle system definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemData {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_color: String,
}

/// A component definition in a data file. `system` references a system key.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData {
    pub key: String,
    pub name: String,
    pub system: String,
}

/// An upgrade definition in a data file. Costs and gains default to zero so
/// partially-priced entries still load.
#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeData {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub cost_low: u32,
    #[serde(default)]
    pub cost_high: u32,
    #[serde(default)]
    pub hp_gain: u32,
    #[serde(default)]
    pub torque_gain: u32,
}

// ===========================================================================
// Edges
// ===========================================================================

/// An Upgrade→Component impact edge in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactData {
    pub upgrade: String,
    pub component: String,
    pub kind: ImpactKind,
}

/// An Upgrade→Upgrade link edge in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkData {
    pub upgrade: String,
    pub target: String,
    pub kind: LinkKind,
}

// ===========================================================================
// Presets
// ===========================================================================

/// A named build preset: a list of upgrade keys.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetData {
    pub name: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
}

// ===========================================================================
// TOML wrappers (TOML does not support top-level arrays)
// ===========================================================================

/// Wrapper for a list of systems in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlSystems {
    pub systems: Vec<SystemData>,
}

/// Wrapper for a list of components in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlComponents {
    pub components: Vec<ComponentData>,
}

/// Wrapper for a list of upgrades in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlUpgrades {
    pub upgrades: Vec<UpgradeData>,
}

/// Wrapper for a list of impact edges in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlImpacts {
    pub impacts: Vec<ImpactData>,
}

/// Wrapper for a list of link edges in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlLinks {
    pub links: Vec<LinkData>,
}

/// Wrapper for a list of presets in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlPresets {
    pub presets: Vec<PresetData>,
}

// ===========================================================================
// Tests
// ===========================================================================
