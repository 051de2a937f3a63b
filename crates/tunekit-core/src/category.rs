//! Category derivation for upgrades.
//!
//! An upgrade's category is derived from its key by an explicit ordered list
//! of substring rules, evaluated top to bottom; the first matching rule wins
//! and the fallback is [`UpgradeCategory::Power`]. UI grouping and filtering
//! depend on the exact ordering of this table, so it lives in this one
//! module and nowhere else.

use serde::{Deserialize, Serialize};

/// The category an upgrade is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeCategory {
    Power,
    ForcedInduction,
    Exhaust,
    Suspension,
    Brakes,
    Wheels,
    Cooling,
    Aero,
    Drivetrain,
    Safety,
    Internals,
}

impl UpgradeCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            UpgradeCategory::Power => "Power",
            UpgradeCategory::ForcedInduction => "Forced Induction",
            UpgradeCategory::Exhaust => "Exhaust",
            UpgradeCategory::Suspension => "Suspension",
            UpgradeCategory::Brakes => "Brakes",
            UpgradeCategory::Wheels => "Wheels & Tires",
            UpgradeCategory::Cooling => "Cooling",
            UpgradeCategory::Aero => "Aero",
            UpgradeCategory::Drivetrain => "Drivetrain",
            UpgradeCategory::Safety => "Safety",
            UpgradeCategory::Internals => "Engine Internals",
        }
    }
}

/// Ordered derivation rules. First matching substring wins.
///
/// Ordering is load-bearing: `intercooler` must hit the Cooling rule before
/// any broader match, and `turbo`/`supercharger` outrank everything so that
/// forced-induction kits never fall through to Exhaust via a compound key
/// like `turbo-exhaust-manifold`.
const CATEGORY_RULES: &[(&str, UpgradeCategory)] = &[
    ("turbo", UpgradeCategory::ForcedInduction),
    ("supercharger", UpgradeCategory::ForcedInduction),
    ("intercooler", UpgradeCategory::Cooling),
    ("radiator", UpgradeCategory::Cooling),
    ("oil-cooler", UpgradeCategory::Cooling),
    ("exhaust", UpgradeCategory::Exhaust),
    ("header", UpgradeCategory::Exhaust),
    ("downpipe", UpgradeCategory::Exhaust),
    ("coilover", UpgradeCategory::Suspension),
    ("spring", UpgradeCategory::Suspension),
    ("sway-bar", UpgradeCategory::Suspension),
    ("bushing", UpgradeCategory::Suspension),
    ("brake", UpgradeCategory::Brakes),
    ("rotor", UpgradeCategory::Brakes),
    ("caliper", UpgradeCategory::Brakes),
    ("wheel", UpgradeCategory::Wheels),
    ("tire", UpgradeCategory::Wheels),
    ("splitter", UpgradeCategory::Aero),
    ("wing", UpgradeCategory::Aero),
    ("diffuser", UpgradeCategory::Aero),
    ("clutch", UpgradeCategory::Drivetrain),
    ("flywheel", UpgradeCategory::Drivetrain),
    ("differential", UpgradeCategory::Drivetrain),
    ("driveshaft", UpgradeCategory::Drivetrain),
    ("cage", UpgradeCategory::Safety),
    ("harness", UpgradeCategory::Safety),
    ("seat", UpgradeCategory::Safety),
    ("piston", UpgradeCategory::Internals),
    ("rod", UpgradeCategory::Internals),
    ("cam", UpgradeCategory::Internals),
    ("valve", UpgradeCategory::Internals),
];

/// Derive the category for an upgrade key.
pub fn derive_category(key: &str) -> UpgradeCategory {
    for (needle, category) in CATEGORY_RULES {
        if key.contains(needle) {
            return *category;
        }
    }
    UpgradeCategory::Power
}
