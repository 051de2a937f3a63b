//! The caller-owned selection set: the upgrades making up one build.
//!
//! Insertion-ordered and duplicate-free. Analysis functions borrow it
//! read-only and never retain a reference; the owning UI layer is free to
//! mutate it between calls. Insertion order matters twice: recommendation
//! dedup is first-encountered-wins over this order, and the shareable
//! string serialization preserves it.

use crate::catalog::Catalog;
use crate::id::UpgradeId;
use log::warn;
use serde::{Deserialize, Serialize};

/// An unordered-semantics, insertion-ordered set of selected upgrades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    // Catalogs top out at a few hundred upgrades and builds at a few dozen
    // selections; a scan beats hashing at this size and keeps order.
    selected: Vec<UpgradeId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an upgrade. Adding a present id is a no-op. Returns whether the
    /// set changed.
    pub fn add(&mut self, id: UpgradeId) -> bool {
        if self.selected.contains(&id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    /// Remove an upgrade. Removing an absent id is a no-op. Returns whether
    /// the set changed.
    pub fn remove(&mut self, id: UpgradeId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&s| s != id);
        self.selected.len() != before
    }

    /// Flip an upgrade in or out. Returns whether the upgrade is selected
    /// after the call.
    pub fn toggle(&mut self, id: UpgradeId) -> bool {
        if self.remove(id) { false } else { self.add(id) }
    }

    pub fn contains(&self, id: UpgradeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = UpgradeId> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Serialize as an ordered, comma-separated list of upgrade keys,
    /// suitable for a shareable link. Ids unknown to the catalog are
    /// skipped.
    pub fn to_share_string(&self, catalog: &Catalog) -> String {
        let keys: Vec<&str> = self
            .selected
            .iter()
            .filter_map(|&id| catalog.upgrade(id).map(|u| u.key.as_str()))
            .collect();
        keys.join(",")
    }

    /// Parse a comma-separated key list back into a selection. Unknown keys
    /// are logged and skipped rather than failing, since shared links
    /// outlive catalog edits. Duplicate keys collapse to one entry.
    pub fn from_share_string(catalog: &Catalog, s: &str) -> Self {
        let mut selection = Self::new();
        for key in s.split(',') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            match catalog.upgrade_id(key) {
                Some(id) => {
                    selection.add(id);
                }
                None => warn!("selection references unknown upgrade '{key}'; skipping"),
            }
        }
        selection
    }
}

impl FromIterator<UpgradeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = UpgradeId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.add(id);
        }
        selection
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, UpgradeStats};

    fn catalog_with(keys: &[&str]) -> Catalog {
        let mut b = CatalogBuilder::new();
        for key in keys {
            b.register_upgrade(key, key, UpgradeStats::default());
        }
        b.build()
    }

    #[test]
    fn add_is_idempotent() {
        let mut s = SelectionSet::new();
        assert!(s.add(UpgradeId(1)));
        assert!(!s.add(UpgradeId(1)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut s = SelectionSet::new();
        s.add(UpgradeId(1));
        assert!(!s.remove(UpgradeId(2)));
        assert!(s.remove(UpgradeId(1)));
        assert!(s.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut s = SelectionSet::new();
        assert!(s.toggle(UpgradeId(3)));
        assert!(s.contains(UpgradeId(3)));
        assert!(!s.toggle(UpgradeId(3)));
        assert!(!s.contains(UpgradeId(3)));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut s = SelectionSet::new();
        s.add(UpgradeId(5));
        s.add(UpgradeId(1));
        s.add(UpgradeId(3));
        let order: Vec<UpgradeId> = s.iter().collect();
        assert_eq!(order, vec![UpgradeId(5), UpgradeId(1), UpgradeId(3)]);
    }

    #[test]
    fn share_string_roundtrip() {
        let catalog = catalog_with(&["ecu-tune", "coilovers", "big-brake-kit"]);
        let mut s = SelectionSet::new();
        s.add(catalog.upgrade_id("coilovers").unwrap());
        s.add(catalog.upgrade_id("ecu-tune").unwrap());

        let share = s.to_share_string(&catalog);
        assert_eq!(share, "coilovers,ecu-tune");

        let restored = SelectionSet::from_share_string(&catalog, &share);
        assert_eq!(restored, s);
    }

    #[test]
    fn parse_skips_unknown_and_empty_entries() {
        let catalog = catalog_with(&["ecu-tune"]);
        let s = SelectionSet::from_share_string(&catalog, "ecu-tune,,nitrous, ");
        assert_eq!(s.len(), 1);
        assert!(s.contains(catalog.upgrade_id("ecu-tune").unwrap()));
    }

    #[test]
    fn parse_collapses_duplicates() {
        let catalog = catalog_with(&["ecu-tune", "coilovers"]);
        let s = SelectionSet::from_share_string(&catalog, "ecu-tune,coilovers,ecu-tune");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn parse_trims_whitespace() {
        let catalog = catalog_with(&["ecu-tune", "coilovers"]);
        let s = SelectionSet::from_share_string(&catalog, " ecu-tune , coilovers ");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn empty_share_string_is_empty_selection() {
        let catalog = catalog_with(&[]);
        let s = SelectionSet::from_share_string(&catalog, "");
        assert!(s.is_empty());
        assert_eq!(s.to_share_string(&catalog), "");
    }

    #[test]
    fn from_iterator_dedups() {
        let s: SelectionSet = [UpgradeId(1), UpgradeId(2), UpgradeId(1)]
            .into_iter()
            .collect();
        assert_eq!(s.len(), 2);
    }
}
