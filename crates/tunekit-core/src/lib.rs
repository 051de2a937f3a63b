//! TuneKit Core -- the data model for vehicle build planning.
//!
//! This crate provides the immutable catalog of vehicle systems, components,
//! and upgrades, the typed relationship graph between them, and the
//! caller-owned selection set that represents one build in progress.
//!
//! # Load-Once Lifecycle
//!
//! Catalog and graph data are assembled once at startup and frozen:
//!
//! 1. **Registration** -- [`catalog::CatalogBuilder`] interns systems,
//!    components, and upgrades, assigning dense ids.
//! 2. **Linking** -- [`graph::GraphBuilder`] records typed edges between the
//!    interned ids, deduplicating repeated (from, to, kind) triples.
//! 3. **Freeze** -- `build()` produces the read-only [`catalog::Catalog`] and
//!    [`graph::RelationshipGraph`] that every analysis call borrows.
//!
//! Nothing mutates the frozen structures afterwards; the only mutable state
//! in the whole engine is the caller's [`selection::SelectionSet`].
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable registry of systems, components, and
//!   upgrades with key-based lookup.
//! - [`graph::RelationshipGraph`] -- Per-upgrade adjacency over the five
//!   component impact kinds plus `requires`/`recommends` links.
//! - [`category::UpgradeCategory`] -- Category derived from an upgrade key
//!   via the ordered rule table in [`category`].
//! - [`selection::SelectionSet`] -- Insertion-ordered, duplicate-free set of
//!   selected upgrades, serializable as a shareable key list.
//! - [`fixed::Money64`] -- Q32.32 fixed-point used for cost arithmetic.

pub mod catalog;
pub mod category;
pub mod fixed;
pub mod graph;
pub mod id;
pub mod selection;
