//! TuneKit Analysis -- pure build analysis over the frozen catalog.
//!
//! Every function here is a total function of `(&Catalog,
//! &RelationshipGraph, &SelectionSet)` plus small value inputs: no I/O, no
//! hidden state, no error paths. The empty selection yields all-empty
//! outputs, and selection ids the catalog does not know are skipped rather
//! than rejected, so a stale shared link degrades to a smaller analysis
//! instead of a failure.
//!
//! The caller re-runs the full analysis on every selection change; at a few
//! hundred upgrades and a few thousand edges a whole-graph re-walk is
//! cheaper than maintaining incremental state.
//!
//! # Operations
//!
//! - [`compat::check_compatibility`] -- unmet prerequisites and
//!   severity-ranked conflict warnings.
//! - [`compat::upgrade_state`] -- per-upgrade UI gating
//!   (selected/locked/recommended/available).
//! - [`aggregate::analyze_build`] -- merged component impacts, systems
//!   touched, and top recommendations.
//! - [`estimate::estimate_cost_and_output`] -- cost/horsepower totals and
//!   the cost-per-hp efficiency metric.

pub mod aggregate;
pub mod compat;
pub mod estimate;

pub use aggregate::{analyze_build, BuildAnalysis, ImpactSummary, Recommendation, MAX_RECOMMENDATIONS};
pub use compat::{
    check_compatibility, upgrade_state, CompatibilityReport, Conflict, MissingRequirement,
    Severity, UpgradeState,
};
pub use estimate::{estimate_cost_and_output, BaseVehicle, CostOutput, VehicleTier};
