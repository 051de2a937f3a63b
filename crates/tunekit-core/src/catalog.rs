//! The immutable catalog of systems, components, and upgrades.
//!
//! Built once at startup via [`CatalogBuilder`] and frozen; every analysis
//! call borrows the frozen [`Catalog`] read-only. Ids are dense indices
//! assigned in registration order, so lookup by id is a plain Vec index.

use crate::category::{derive_category, UpgradeCategory};
use crate::id::{ComponentId, SystemId, UpgradeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A top-level vehicle subsystem (engine, suspension, brakes, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemDef {
    /// Unique key, e.g. `"engine"`.
    pub key: String,
    pub name: String,
    pub description: String,
    /// CSS-style color the consuming UI renders this system in.
    pub display_color: String,
}

/// A named part within a system; the target of upgrade impact edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDef {
    /// Globally unique key, conventionally `"<system>.<component>"`.
    pub key: String,
    pub name: String,
    pub system: SystemId,
}

/// A purchasable/installable modification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeDef {
    /// Unique key, e.g. `"big-brake-kit"`.
    pub key: String,
    pub name: String,
    /// Derived from the key at registration; see [`crate::category`].
    pub category: UpgradeCategory,
    /// Editorial cost range in whole dollars. `cost_high >= cost_low`.
    pub cost_low: u32,
    pub cost_high: u32,
    /// Editorial output gains; 0 for purely handling/safety upgrades.
    pub hp_gain: u32,
    pub torque_gain: u32,
}

/// Numeric fields of an upgrade, separated so data files and call sites
/// don't grow a six-argument register call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UpgradeStats {
    pub cost_low: u32,
    pub cost_high: u32,
    pub hp_gain: u32,
    pub torque_gain: u32,
}

/// Builder for constructing an immutable Catalog.
/// Two-phase lifecycle: registration -> freeze.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    systems: Vec<SystemDef>,
    system_key_to_id: HashMap<String, SystemId>,
    components: Vec<ComponentDef>,
    component_key_to_id: HashMap<String, ComponentId>,
    upgrades: Vec<UpgradeDef>,
    upgrade_key_to_id: HashMap<String, UpgradeId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system. Returns its id, or the existing id if the key is
    /// already registered (re-registration does not overwrite).
    pub fn register_system(&mut self, key: &str, name: &str, description: &str, color: &str) -> SystemId {
        if let Some(&id) = self.system_key_to_id.get(key) {
            return id;
        }
        let id = SystemId(self.systems.len() as u16);
        self.systems.push(SystemDef {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            display_color: color.to_string(),
        });
        self.system_key_to_id.insert(key.to_string(), id);
        id
    }

    /// Register a component under an already-registered system. Returns
    /// `None` if the system key is unknown, leaving the builder unchanged;
    /// the data layer logs and skips such entries.
    pub fn register_component(&mut self, key: &str, name: &str, system_key: &str) -> Option<ComponentId> {
        if let Some(&id) = self.component_key_to_id.get(key) {
            return Some(id);
        }
        let system = *self.system_key_to_id.get(system_key)?;
        let id = ComponentId(self.components.len() as u32);
        self.components.push(ComponentDef {
            key: key.to_string(),
            name: name.to_string(),
            system,
        });
        self.component_key_to_id.insert(key.to_string(), id);
        Some(id)
    }

    /// Register an upgrade. The category is derived from the key; a cost
    /// range with `cost_high < cost_low` is clamped up to `cost_low`.
    pub fn register_upgrade(&mut self, key: &str, name: &str, stats: UpgradeStats) -> UpgradeId {
        if let Some(&id) = self.upgrade_key_to_id.get(key) {
            return id;
        }
        let id = UpgradeId(self.upgrades.len() as u32);
        self.upgrades.push(UpgradeDef {
            key: key.to_string(),
            name: name.to_string(),
            category: derive_category(key),
            cost_low: stats.cost_low,
            cost_high: stats.cost_high.max(stats.cost_low),
            hp_gain: stats.hp_gain,
            torque_gain: stats.torque_gain,
        });
        self.upgrade_key_to_id.insert(key.to_string(), id);
        id
    }

    /// Lookup a component id by key during registration (used by the data
    /// layer to resolve edges before freezing).
    pub fn component_id(&self, key: &str) -> Option<ComponentId> {
        self.component_key_to_id.get(key).copied()
    }

    /// Lookup an upgrade id by key during registration.
    pub fn upgrade_id(&self, key: &str) -> Option<UpgradeId> {
        self.upgrade_key_to_id.get(key).copied()
    }

    /// Whether a system key has been registered.
    pub fn has_system(&self, key: &str) -> bool {
        self.system_key_to_id.contains_key(key)
    }

    /// Freeze into the immutable catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            systems: self.systems,
            system_key_to_id: self.system_key_to_id,
            components: self.components,
            component_key_to_id: self.component_key_to_id,
            upgrades: self.upgrades,
            upgrade_key_to_id: self.upgrade_key_to_id,
        }
    }
}

/// Immutable catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    systems: Vec<SystemDef>,
    system_key_to_id: HashMap<String, SystemId>,
    components: Vec<ComponentDef>,
    component_key_to_id: HashMap<String, ComponentId>,
    upgrades: Vec<UpgradeDef>,
    upgrade_key_to_id: HashMap<String, UpgradeId>,
}

impl Catalog {
    pub fn system(&self, id: SystemId) -> Option<&SystemDef> {
        self.systems.get(id.0 as usize)
    }

    pub fn component(&self, id: ComponentId) -> Option<&ComponentDef> {
        self.components.get(id.0 as usize)
    }

    pub fn upgrade(&self, id: UpgradeId) -> Option<&UpgradeDef> {
        self.upgrades.get(id.0 as usize)
    }

    pub fn system_id(&self, key: &str) -> Option<SystemId> {
        self.system_key_to_id.get(key).copied()
    }

    pub fn component_id(&self, key: &str) -> Option<ComponentId> {
        self.component_key_to_id.get(key).copied()
    }

    pub fn upgrade_id(&self, key: &str) -> Option<UpgradeId> {
        self.upgrade_key_to_id.get(key).copied()
    }

    /// The system a component belongs to, if the id is valid.
    pub fn system_of(&self, id: ComponentId) -> Option<SystemId> {
        self.component(id).map(|c| c.system)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn upgrade_count(&self) -> usize {
        self.upgrades.len()
    }

    pub fn systems(&self) -> impl Iterator<Item = (SystemId, &SystemDef)> {
        self.systems
            .iter()
            .enumerate()
            .map(|(i, def)| (SystemId(i as u16), def))
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &ComponentDef)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, def)| (ComponentId(i as u32), def))
    }

    pub fn upgrades(&self) -> impl Iterator<Item = (UpgradeId, &UpgradeDef)> {
        self.upgrades
            .iter()
            .enumerate()
            .map(|(i, def)| (UpgradeId(i as u32), def))
    }

    /// Display name for an upgrade, falling back to its key and then to a
    /// placeholder. Never panics on an unknown id.
    pub fn upgrade_name(&self, id: UpgradeId) -> &str {
        self.upgrade(id).map(|u| u.name.as_str()).unwrap_or("(unknown upgrade)")
    }

    /// Display name for a component; same fallback behavior.
    pub fn component_name(&self, id: ComponentId) -> &str {
        self.component(id)
            .map(|c| c.name.as_str())
            .unwrap_or("(unknown component)")
    }
}

// ===========================================================================
// Tests
// ===========================================================================
