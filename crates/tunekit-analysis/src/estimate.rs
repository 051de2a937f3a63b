//! Cost and output estimation over a selection.
//!
//! Totals are saturating u32 sums of editorial constants; the tier
//! multiplier and the cost-per-horsepower ratio run in Q32.32 fixed point
//! ([`Money64`]) so results are identical on every platform. Division by a
//! zero horsepower gain short-circuits to 0 -- the caller never sees NaN,
//! infinity, or a panic.

use serde::{Deserialize, Serialize};
use tunekit_core::catalog::Catalog;
use tunekit_core::fixed::{checked_div_money, money_round_u32, u32_to_money, Money64};
use tunekit_core::selection::SelectionSet;

/// Manufacturer tier of the base vehicle; parts and labor cost more on
/// premium platforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleTier {
    #[default]
    Mainstream,
    Premium,
    Luxury,
}

impl VehicleTier {
    /// Multiplier applied to both cost totals.
    pub fn cost_multiplier(self) -> Money64 {
        match self {
            VehicleTier::Mainstream => Money64::from_num(1),
            VehicleTier::Premium => Money64::from_num(1.15),
            VehicleTier::Luxury => Money64::from_num(1.3),
        }
    }
}

/// Starting point the gains apply to. All zeros + Mainstream when the
/// vehicle is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseVehicle {
    pub base_hp: u32,
    pub base_torque: u32,
    pub tier: VehicleTier,
}

/// Aggregate cost/output estimate for one selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostOutput {
    pub total_cost_low: u32,
    pub total_cost_high: u32,
    pub total_hp_gain: u32,
    pub total_torque_gain: u32,
    pub final_hp: u32,
    pub final_torque: u32,
    /// `round(midpoint(total costs) / total_hp_gain)`; 0 when no hp is
    /// gained.
    pub cost_per_hp: u32,
}

/// Sum the selection's cost ranges and gains and derive the efficiency
/// metric. Selection ids unknown to the catalog are skipped.
pub fn estimate_cost_and_output(
    catalog: &Catalog,
    selection: &SelectionSet,
    base: BaseVehicle,
) -> CostOutput {
    let mut cost_low: u32 = 0;
    let mut cost_high: u32 = 0;
    let mut hp_gain: u32 = 0;
    let mut torque_gain: u32 = 0;

    for id in selection.iter() {
        let Some(upgrade) = catalog.upgrade(id) else {
            continue;
        };
        cost_low = cost_low.saturating_add(upgrade.cost_low);
        cost_high = cost_high.saturating_add(upgrade.cost_high);
        hp_gain = hp_gain.saturating_add(upgrade.hp_gain);
        torque_gain = torque_gain.saturating_add(upgrade.torque_gain);
    }

    let multiplier = base.tier.cost_multiplier();
    let total_cost_low = apply_multiplier(cost_low, multiplier);
    let total_cost_high = apply_multiplier(cost_high, multiplier);

    let cost_per_hp = if hp_gain == 0 {
        0
    } else {
        let midpoint =
            u32_to_money(total_cost_low).saturating_add(u32_to_money(total_cost_high)) / 2;
        // The divisor shares Money64's 31 integer bits; clamp like the costs.
        let divisor = u32_to_money(hp_gain.min(i32::MAX as u32));
        checked_div_money(midpoint, divisor)
            .map(money_round_u32)
            .unwrap_or(0)
    };

    CostOutput {
        total_cost_low,
        total_cost_high,
        total_hp_gain: hp_gain,
        total_torque_gain: torque_gain,
        final_hp: base.base_hp.saturating_add(hp_gain),
        final_torque: base.base_torque.saturating_add(torque_gain),
        cost_per_hp,
    }
}

/// Multiply a cost total by the tier multiplier in fixed point, rounding to
/// whole dollars. Saturates instead of overflowing on absurd totals.
fn apply_multiplier(amount: u32, multiplier: Money64) -> u32 {
    // Money64 holds 31 integer bits; clamp before converting.
    let clamped = amount.min(i32::MAX as u32);
    money_round_u32(u32_to_money(clamped).saturating_mul(multiplier))
}

// ===========================================================================
// Tests
// ===========================================================================
