// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Representation bridging: translation and adapters between the flat
//! (query) and hierarchical (tree) scene models.
//!
//! Either model can drive the same downstream pipeline:
//!
//! ```text
//!   producer authors flat            producer authors the tree
//!          │                                   │
//!          ▼                                   ▼
//!   QueryPrimSource                     TreeQueryAdapter
//!   (source module)                     (adapter module)
//!          │                                   │
//!          ▼                                   ▼
//!   modern consumer reads            legacy consumer reads the
//!   the tree                         flat surface; the ledger and
//!                                    render target stay current
//! ```
//!
//! **[`translate`]** — the shared protocol: bidirectional, order-dependent
//! translation between per-category dirty bits and locator sets, with an
//! injectable registry for custom State types.
//!
//! **[`source`]** — the Query→Hierarchical adapter:
//! [`QueryPrimSource`](source::QueryPrimSource) lazily materializes a tree
//! view over one flat-interface object, caching the attribute collection
//! and instancer topology behind atomically swapped handles.
//!
//! **[`adapter`]** — the Hierarchical→Query adapter:
//! [`TreeQueryAdapter`](adapter::TreeQueryAdapter) observes tree change
//! notices, drives the ledger and a [`RenderTarget`](registry::RenderTarget),
//! fans instancer dirtiness out along the ledger's dependency edges, and
//! answers the flat getter surface from the tree.
//!
//! **[`registry`]** — type-tag classification
//! ([`CategoryRegistry`](registry::CategoryRegistry)) and the downstream
//! render-index contract.

pub mod adapter;
pub mod registry;
pub mod source;
pub mod translate;

pub use adapter::TreeQueryAdapter;
pub use registry::{CategoryRegistry, RenderTarget};
pub use source::QueryPrimSource;
pub use translate::TranslatorRegistry;
