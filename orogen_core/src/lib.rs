// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared data model and representation contracts for scene-graph
//! invalidation.
//!
//! `orogen_core` defines the vocabulary the rest of the workspace speaks:
//! object paths, per-category dirty-bit fields, change-region locators, the
//! value and topology types the two object models exchange, and the traits
//! that describe those object models. It is `no_std` compatible (with
//! `alloc`) and holds no mutable state of its own.
//!
//! # Architecture
//!
//! Two incompatible object models describe the same scene:
//!
//! ```text
//!   flat (query)                      hierarchical (tree)
//!   SceneQuery ──── orogen_bridge ──── SceneTree + TreeObserver
//!        │        (adapters, both         │
//!        │         directions)            │ DirtiedEntry { LocatorSet }
//!        │                                ▼
//!        └──── dirty bits ────── orogen_track::ChangeLedger
//! ```
//!
//! **[`path`]** — [`Name`](path::Name) segments and ordered, hashable
//! [`ScenePath`](path::ScenePath) identifiers.
//!
//! **[`dirty`]** — one `bitflags` field per object
//! [`Category`](dirty::Category), with the `CLEAN`/`ALL_DIRTY` conventions
//! and the reserved caller-defined bit range.
//!
//! **[`locator`]** — [`Locator`](locator::Locator) change regions and the
//! sorted, prefix-free [`LocatorSet`](locator::LocatorSet) the translation
//! layer scans in a single pass.
//!
//! **[`value`]**, **[`matrix`]**, **[`types`]** — the exchanged value
//! kinds, a minimal 4×4 transform, and topology/attribute/camera types
//! with documented empty defaults.
//!
//! **[`source`]**, **[`tree`]**, **[`query`]** — the hierarchical node
//! model (containers and sampled leaves), the scene-tree and observer
//! contracts, and the flat getter contract.
//!
//! **[`schema`]** — the canonical locator per data region and the fixed
//! aspect order both translation directions share.

#![no_std]

extern crate alloc;

pub mod dirty;
pub mod locator;
pub mod matrix;
pub mod path;
pub mod query;
pub mod schema;
pub mod source;
pub mod tree;
pub mod types;
pub mod value;
