// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchical representation's scene contract.
//!
//! A [`SceneTree`] hands out typed tree nodes by path and announces every
//! structural or value change through the [`TreeObserver`] protocol. The
//! three notice kinds are delivered in batches; a dirtied notice carries a
//! [`LocatorSet`] describing what changed, with the empty locator meaning
//! "everything about this object".

use alloc::vec::Vec;

use crate::locator::LocatorSet;
use crate::path::{Name, ScenePath};
use crate::source::ContainerHandle;

/// A typed tree node, as returned by [`SceneTree::prim`].
///
/// Unknown paths yield an empty type tag and no source.
#[derive(Clone)]
pub struct TreePrim {
    /// The object's type tag (e.g. `mesh`, `camera`).
    pub type_tag: Name,
    /// The object's data tree, if the path is populated.
    pub source: Option<ContainerHandle>,
}

impl TreePrim {
    /// Returns the empty node used for unknown paths.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            type_tag: Name::new(""),
            source: None,
        }
    }
}

/// A provider of hierarchical scene data.
pub trait SceneTree: Send + Sync {
    /// Returns the node at `path` ([`TreePrim::absent`] if unpopulated).
    fn prim(&self, path: &ScenePath) -> TreePrim;

    /// Returns the paths of `path`'s direct children.
    fn child_paths(&self, path: &ScenePath) -> Vec<ScenePath>;
}

/// One newly added object.
#[derive(Clone, Debug)]
pub struct AddedEntry {
    /// The object's path.
    pub path: ScenePath,
    /// The object's type tag.
    pub type_tag: Name,
}

/// One removed object (and, implicitly, its subtree).
#[derive(Clone, Debug)]
pub struct RemovedEntry {
    /// The removed path. The root path means "everything".
    pub path: ScenePath,
}

/// One dirtied object.
#[derive(Clone, Debug)]
pub struct DirtiedEntry {
    /// The object's path.
    pub path: ScenePath,
    /// The changed regions.
    pub locators: LocatorSet,
}

/// Receives change notices from a [`SceneTree`].
///
/// Notices for one batch arrive on one thread, but different batches may
/// arrive on different threads; implementations use interior mutability.
pub trait TreeObserver: Send + Sync {
    /// Called after objects are added (or re-typed in place).
    fn prims_added(&self, entries: &[AddedEntry]);

    /// Called after objects are removed.
    fn prims_removed(&self, entries: &[RemovedEntry]);

    /// Called after object data changes.
    fn prims_dirtied(&self, entries: &[DirtiedEntry]);
}
