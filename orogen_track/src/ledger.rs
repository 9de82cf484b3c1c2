// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-object dirty-state ledger.
//!
//! [`ChangeLedger`] owns, per tracked object, a bit field of stale aspects,
//! plus the global version counters consumers use to answer "did anything I
//! care about change" without enumerating objects. Entries live from
//! `*_inserted` to `*_removed`; in between they are mutated only by
//! `mark_*_dirty` (bitwise OR) and `mark_*_clean` (replace).
//!
//! Every lookup on an unknown path is defaulted (`CLEAN`, version 0), never
//! an error: the ledger cannot distinguish "never inserted" from "already
//! removed earlier in the same update batch", so permissiveness is the
//! contract.
//!
//! The ledger also records instancer dependency edges, but does **not** fan
//! dirtiness out along them — that policy lives in the bridging layer,
//! which consults [`geometry_dependents_of`](ChangeLedger::geometry_dependents_of)
//! and [`instancer_dependents_of`](ChangeLedger::instancer_dependents_of)
//! when an instancer's own aspects change.
//!
//! Concurrency: per-entry mutations are atomic (sharded map), global
//! counters are relaxed atomic increments. There is no ordering guarantee
//! across different paths or counters.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, trace, warn};

use orogen_core::dirty::{
    Category, GeometryDirty, InstancerDirty, ResourceDirty, StateDirty, TaskDirty,
};
use orogen_core::path::{Name, ScenePath};

type DependencyMap = DashMap<ScenePath, HashSet<ScenePath>>;

/// The per-object dirty-state and version-counter store.
#[derive(Debug, Default)]
pub struct ChangeLedger {
    // -- Per-category dirty state --
    geometry: DashMap<ScenePath, GeometryDirty>,
    state: DashMap<ScenePath, StateDirty>,
    resource: DashMap<ScenePath, ResourceDirty>,
    instancer: DashMap<ScenePath, InstancerDirty>,
    task: DashMap<ScenePath, TaskDirty>,

    // -- Named version counters --
    collections: DashMap<Name, u64>,
    general_state: DashMap<Name, u64>,

    // -- Dependency edges (recorded here, fanned out by callers) --
    instancer_geometry_deps: DependencyMap,
    instancer_instancer_deps: DependencyMap,

    // -- Global counters --
    //
    // Start at 1: observers initialize their remembered value to 0, so the
    // first comparison always mismatches and forces first-time processing.
    counters: Counters,
}

#[derive(Debug)]
struct Counters {
    scene: AtomicU64,
    varying_state: AtomicU64,
    geometry_index: AtomicU64,
    state_index: AtomicU64,
    resource_index: AtomicU64,
    instancer_index: AtomicU64,
    visibility_change: AtomicU64,
    render_tag: AtomicU64,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            scene: AtomicU64::new(1),
            varying_state: AtomicU64::new(1),
            geometry_index: AtomicU64::new(1),
            state_index: AtomicU64::new(1),
            resource_index: AtomicU64::new(1),
            instancer_index: AtomicU64::new(1),
            visibility_change: AtomicU64::new(1),
            render_tag: AtomicU64::new(1),
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl ChangeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Geometry --

    /// Registers a geometry entry with its initial dirty bits.
    ///
    /// Callers must not double-insert; a duplicate is overwritten with a
    /// diagnostic rather than rejected.
    pub fn geometry_inserted(&self, path: &ScenePath, initial: GeometryDirty) {
        debug!(target: "orogen::ledger", %path, "geometry inserted");
        if self.geometry.insert(path.clone(), initial).is_some() {
            warn!(target: "orogen::ledger", %path, "geometry inserted twice");
        }
        bump(&self.counters.scene);
        bump(&self.counters.geometry_index);
    }

    /// Removes a geometry entry.
    pub fn geometry_removed(&self, path: &ScenePath) {
        debug!(target: "orogen::ledger", %path, "geometry removed");
        self.geometry.remove(path);
        bump(&self.counters.scene);
        bump(&self.counters.geometry_index);
    }

    /// ORs `bits` into a geometry entry.
    ///
    /// The `VARYING` marker is owned by the ledger: caller-supplied
    /// `VARYING` is ignored, and the first dirtying of a non-varying entry
    /// sets it (bumping the varying-state version). Re-marking already-set
    /// bits is a no-op, except that `RENDER_TAG`/`REPR` always re-trigger
    /// filtering because the object may have been filtered out of the last
    /// sync without being cleaned.
    pub fn mark_geometry_dirty(&self, path: &ScenePath, bits: GeometryDirty) {
        let bits = bits.difference(GeometryDirty::VARYING);
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", %path, "mark_geometry_dirty called with clean bits");
            return;
        }
        let filter_bits = GeometryDirty::RENDER_TAG | GeometryDirty::REPR;
        {
            let Some(mut entry) = self.geometry.get_mut(path) else {
                trace!(target: "orogen::ledger", %path, "mark on unknown geometry path");
                return;
            };
            if entry.contains(bits) && !bits.intersects(filter_bits) {
                return;
            }
            let old = *entry;
            let mut set = bits;
            if !old.is_varying() {
                trace!(target: "orogen::ledger", %path, ?bits, "entry became varying");
                set |= GeometryDirty::VARYING;
                bump(&self.counters.varying_state);
            }
            *entry = old | set;
        }
        bump(&self.counters.scene);
        if bits.intersects(GeometryDirty::VISIBILITY) {
            bump(&self.counters.visibility_change);
        }
        if bits.intersects(GeometryDirty::RENDER_TAG) {
            bump(&self.counters.render_tag);
        }
        if bits.intersects(filter_bits) {
            // Render tags and repr selection feed object filtering, so they
            // count as structural edits.
            bump(&self.counters.geometry_index);
        }
    }

    /// ORs `bits` into every geometry entry in one pass.
    pub fn mark_all_geometry_dirty(&self, bits: GeometryDirty) {
        let bits = bits.difference(GeometryDirty::VARYING);
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", "mark_all_geometry_dirty called with clean bits");
            return;
        }
        let filter_bits = GeometryDirty::RENDER_TAG | GeometryDirty::REPR;
        let mut any_became_varying = false;
        for mut entry in self.geometry.iter_mut() {
            if bits.intersects(entry.complement() | filter_bits) {
                let old = *entry.value();
                let mut set = bits;
                if !old.is_varying() {
                    set |= GeometryDirty::VARYING;
                    any_became_varying = true;
                }
                *entry.value_mut() = old | set;
            }
        }
        if any_became_varying {
            bump(&self.counters.varying_state);
        }
        bump(&self.counters.scene);
        if bits.intersects(GeometryDirty::VISIBILITY) {
            bump(&self.counters.visibility_change);
        }
        if bits.intersects(GeometryDirty::RENDER_TAG) {
            bump(&self.counters.render_tag);
        }
        if bits.intersects(filter_bits) {
            bump(&self.counters.geometry_index);
        }
    }

    /// Replaces a geometry entry's bits, preserving the `VARYING` marker.
    pub fn mark_geometry_clean(&self, path: &ScenePath, new_bits: GeometryDirty) {
        trace!(target: "orogen::ledger", %path, "geometry cleaned");
        let Some(mut entry) = self.geometry.get_mut(path) else {
            trace!(target: "orogen::ledger", %path, "clean on unknown geometry path");
            return;
        };
        let preserved = entry.intersection(GeometryDirty::VARYING);
        *entry = preserved | new_bits;
    }

    /// Clears `VARYING` from every geometry entry and bumps the
    /// varying-state version.
    ///
    /// Across steady-state update cycles the set of varying objects is
    /// expected to stabilize; the version bump is the single cheap signal
    /// that the stable-set assumption needs re-validation.
    pub fn reset_varying_state(&self) {
        bump(&self.counters.varying_state);
        for mut entry in self.geometry.iter_mut() {
            let cleared = entry.difference(GeometryDirty::VARYING);
            *entry.value_mut() = cleared;
        }
    }

    /// Clears one geometry entry's `VARYING` marker without touching any
    /// version counter, so the change is picked up on the next cycle.
    pub fn reset_geometry_varying(&self, path: &ScenePath) {
        if let Some(mut entry) = self.geometry.get_mut(path) {
            let cleared = entry.difference(GeometryDirty::VARYING);
            *entry = cleared;
        }
    }

    /// Returns a geometry entry's bits (`CLEAN` for unknown paths).
    #[must_use]
    pub fn geometry_dirty_bits(&self, path: &ScenePath) -> GeometryDirty {
        self.geometry
            .get(path)
            .map_or(GeometryDirty::CLEAN, |entry| *entry)
    }

    /// Returns whether a geometry entry has any dirty bit set.
    #[must_use]
    pub fn is_geometry_dirty(&self, path: &ScenePath) -> bool {
        self.geometry_dirty_bits(path).is_dirty()
    }

    // -- State --

    /// Registers a state entry with its initial dirty bits.
    pub fn state_inserted(&self, path: &ScenePath, initial: StateDirty) {
        debug!(target: "orogen::ledger", %path, "state inserted");
        if self.state.insert(path.clone(), initial).is_some() {
            warn!(target: "orogen::ledger", %path, "state inserted twice");
        }
        bump(&self.counters.scene);
        bump(&self.counters.state_index);
    }

    /// Removes a state entry.
    pub fn state_removed(&self, path: &ScenePath) {
        debug!(target: "orogen::ledger", %path, "state removed");
        self.state.remove(path);
        bump(&self.counters.scene);
        bump(&self.counters.state_index);
    }

    /// ORs `bits` into a state entry.
    pub fn mark_state_dirty(&self, path: &ScenePath, bits: StateDirty) {
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", %path, "mark_state_dirty called with clean bits");
            return;
        }
        let Some(mut entry) = self.state.get_mut(path) else {
            trace!(target: "orogen::ledger", %path, "mark on unknown state path");
            return;
        };
        *entry |= bits;
        drop(entry);
        bump(&self.counters.scene);
    }

    /// Replaces a state entry's bits.
    pub fn mark_state_clean(&self, path: &ScenePath, new_bits: StateDirty) {
        if let Some(mut entry) = self.state.get_mut(path) {
            *entry = new_bits;
        }
    }

    /// Returns a state entry's bits (`CLEAN` for unknown paths).
    #[must_use]
    pub fn state_dirty_bits(&self, path: &ScenePath) -> StateDirty {
        self.state.get(path).map_or(StateDirty::CLEAN, |entry| *entry)
    }

    // -- Resource --

    /// Registers a resource entry with its initial dirty bits.
    pub fn resource_inserted(&self, path: &ScenePath, initial: ResourceDirty) {
        debug!(target: "orogen::ledger", %path, "resource inserted");
        if self.resource.insert(path.clone(), initial).is_some() {
            warn!(target: "orogen::ledger", %path, "resource inserted twice");
        }
        bump(&self.counters.scene);
        bump(&self.counters.resource_index);
    }

    /// Removes a resource entry.
    pub fn resource_removed(&self, path: &ScenePath) {
        debug!(target: "orogen::ledger", %path, "resource removed");
        self.resource.remove(path);
        bump(&self.counters.scene);
        bump(&self.counters.resource_index);
    }

    /// ORs `bits` into a resource entry.
    pub fn mark_resource_dirty(&self, path: &ScenePath, bits: ResourceDirty) {
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", %path, "mark_resource_dirty called with clean bits");
            return;
        }
        let Some(mut entry) = self.resource.get_mut(path) else {
            trace!(target: "orogen::ledger", %path, "mark on unknown resource path");
            return;
        };
        *entry |= bits;
        drop(entry);
        bump(&self.counters.scene);
    }

    /// Replaces a resource entry's bits.
    pub fn mark_resource_clean(&self, path: &ScenePath, new_bits: ResourceDirty) {
        if let Some(mut entry) = self.resource.get_mut(path) {
            *entry = new_bits;
        }
    }

    /// Returns a resource entry's bits (`CLEAN` for unknown paths).
    #[must_use]
    pub fn resource_dirty_bits(&self, path: &ScenePath) -> ResourceDirty {
        self.resource
            .get(path)
            .map_or(ResourceDirty::CLEAN, |entry| *entry)
    }

    // -- Instancer --

    /// Registers an instancer entry with its initial dirty bits.
    pub fn instancer_inserted(&self, path: &ScenePath, initial: InstancerDirty) {
        debug!(target: "orogen::ledger", %path, "instancer inserted");
        if self.instancer.insert(path.clone(), initial).is_some() {
            warn!(target: "orogen::ledger", %path, "instancer inserted twice");
        }
        bump(&self.counters.scene);
        bump(&self.counters.instancer_index);
    }

    /// Removes an instancer entry.
    pub fn instancer_removed(&self, path: &ScenePath) {
        debug!(target: "orogen::ledger", %path, "instancer removed");
        self.instancer.remove(path);
        bump(&self.counters.scene);
        bump(&self.counters.instancer_index);
    }

    /// ORs `bits` into an instancer entry.
    ///
    /// Dependents recorded via the dependency edges are *not* marked here;
    /// the calling layer decides the fan-out.
    pub fn mark_instancer_dirty(&self, path: &ScenePath, bits: InstancerDirty) {
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", %path, "mark_instancer_dirty called with clean bits");
            return;
        }
        let Some(mut entry) = self.instancer.get_mut(path) else {
            trace!(target: "orogen::ledger", %path, "mark on unknown instancer path");
            return;
        };
        if entry.contains(bits) {
            return;
        }
        *entry |= bits;
        drop(entry);
        bump(&self.counters.scene);
    }

    /// Replaces an instancer entry's bits.
    pub fn mark_instancer_clean(&self, path: &ScenePath, new_bits: InstancerDirty) {
        if let Some(mut entry) = self.instancer.get_mut(path) {
            *entry = new_bits;
        }
    }

    /// Returns an instancer entry's bits (`CLEAN` for unknown paths).
    #[must_use]
    pub fn instancer_dirty_bits(&self, path: &ScenePath) -> InstancerDirty {
        self.instancer
            .get(path)
            .map_or(InstancerDirty::CLEAN, |entry| *entry)
    }

    // -- Task --

    /// Registers a task entry with its initial dirty bits.
    ///
    /// Tasks have no index version; only the scene version moves.
    pub fn task_inserted(&self, path: &ScenePath, initial: TaskDirty) {
        debug!(target: "orogen::ledger", %path, "task inserted");
        if self.task.insert(path.clone(), initial).is_some() {
            warn!(target: "orogen::ledger", %path, "task inserted twice");
        }
        bump(&self.counters.scene);
    }

    /// Removes a task entry.
    pub fn task_removed(&self, path: &ScenePath) {
        debug!(target: "orogen::ledger", %path, "task removed");
        self.task.remove(path);
        bump(&self.counters.scene);
    }

    /// ORs `bits` into a task entry. Newly setting `RENDER_TAGS` also
    /// marks the render-tag version dirty, since the task's tag set feeds
    /// object filtering.
    pub fn mark_task_dirty(&self, path: &ScenePath, bits: TaskDirty) {
        if !bits.is_dirty() {
            warn!(target: "orogen::ledger", %path, "mark_task_dirty called with clean bits");
            return;
        }
        let Some(mut entry) = self.task.get_mut(path) else {
            trace!(target: "orogen::ledger", %path, "mark on unknown task path");
            return;
        };
        let newly_tagged = bits.contains(TaskDirty::RENDER_TAGS)
            && !entry.contains(TaskDirty::RENDER_TAGS);
        *entry |= bits;
        drop(entry);
        if newly_tagged {
            self.mark_render_tags_dirty();
        }
        bump(&self.counters.scene);
    }

    /// Replaces a task entry's bits.
    pub fn mark_task_clean(&self, path: &ScenePath, new_bits: TaskDirty) {
        if let Some(mut entry) = self.task.get_mut(path) {
            *entry = new_bits;
        }
    }

    /// Returns a task entry's bits (`CLEAN` for unknown paths).
    #[must_use]
    pub fn task_dirty_bits(&self, path: &ScenePath) -> TaskDirty {
        self.task.get(path).map_or(TaskDirty::CLEAN, |entry| *entry)
    }

    /// Bumps the render-tag version (and the scene version).
    pub fn mark_render_tags_dirty(&self) {
        bump(&self.counters.render_tag);
        bump(&self.counters.scene);
    }

    // -- Dependency edges --

    /// Records that geometry `dependent` is affected by `instancer`.
    pub fn add_instancer_geometry_dependency(
        &self,
        instancer: &ScenePath,
        dependent: &ScenePath,
    ) {
        Self::add_dependency(&self.instancer_geometry_deps, instancer, dependent);
    }

    /// Removes one instancer→geometry edge.
    pub fn remove_instancer_geometry_dependency(
        &self,
        instancer: &ScenePath,
        dependent: &ScenePath,
    ) {
        Self::remove_dependency(&self.instancer_geometry_deps, instancer, dependent);
    }

    /// Records that instancer `dependent` is affected by `parent`.
    pub fn add_instancer_instancer_dependency(
        &self,
        parent: &ScenePath,
        dependent: &ScenePath,
    ) {
        Self::add_dependency(&self.instancer_instancer_deps, parent, dependent);
    }

    /// Removes one instancer→instancer edge.
    pub fn remove_instancer_instancer_dependency(
        &self,
        parent: &ScenePath,
        dependent: &ScenePath,
    ) {
        Self::remove_dependency(&self.instancer_instancer_deps, parent, dependent);
    }

    /// Returns a snapshot of the geometry objects affected by `instancer`.
    #[must_use]
    pub fn geometry_dependents_of(&self, instancer: &ScenePath) -> Vec<ScenePath> {
        self.instancer_geometry_deps
            .get(instancer)
            .map_or_else(Vec::new, |set| set.iter().cloned().collect())
    }

    /// Returns a snapshot of the instancers affected by `instancer`.
    #[must_use]
    pub fn instancer_dependents_of(&self, instancer: &ScenePath) -> Vec<ScenePath> {
        self.instancer_instancer_deps
            .get(instancer)
            .map_or_else(Vec::new, |set| set.iter().cloned().collect())
    }

    fn add_dependency(map: &DependencyMap, parent: &ScenePath, child: &ScenePath) {
        map.entry(parent.clone()).or_default().insert(child.clone());
    }

    fn remove_dependency(map: &DependencyMap, parent: &ScenePath, child: &ScenePath) {
        let Some(mut entry) = map.get_mut(parent) else {
            return;
        };
        entry.remove(child);
        let now_empty = entry.is_empty();
        drop(entry);
        if now_empty {
            // Leave no trace of the edge in either direction.
            map.remove_if(parent, |_, set| set.is_empty());
        }
    }

    // -- Named collections and general state --

    /// Creates a collection version counter at 0 if absent.
    pub fn add_collection(&self, name: impl Into<Name>) {
        self.collections.entry(name.into()).or_insert(0);
    }

    /// Bumps a collection's version counter (and the scene version).
    pub fn mark_collection_dirty(&self, name: &str) {
        let Some(mut entry) = self.collections.get_mut(name) else {
            warn!(target: "orogen::ledger", name, "unknown collection");
            return;
        };
        *entry += 1;
        drop(entry);
        bump(&self.counters.scene);
    }

    /// Returns a collection's version, folded with the geometry index
    /// version so that membership changes are visible through it too.
    #[must_use]
    pub fn collection_version(&self, name: &str) -> u64 {
        let base = self.counters.geometry_index.load(Ordering::Relaxed);
        self.collections.get(name).map_or(base, |entry| *entry + base)
    }

    /// Creates a general-state version counter at 0 if absent.
    pub fn add_general_state(&self, name: impl Into<Name>) {
        self.general_state.entry(name.into()).or_insert(0);
    }

    /// Bumps a general-state version counter.
    pub fn mark_general_state_dirty(&self, name: &str) {
        let Some(mut entry) = self.general_state.get_mut(name) else {
            warn!(target: "orogen::ledger", name, "unknown general state");
            return;
        };
        *entry += 1;
    }

    /// Returns a general-state version (0 for unknown names).
    #[must_use]
    pub fn general_state_version(&self, name: &str) -> u64 {
        self.general_state.get(name).map_or(0, |entry| *entry)
    }

    // -- Global counters --

    /// The cheapest "did literally anything change" signal: bumps on every
    /// insert, remove, and effective dirty-marking across all categories.
    #[must_use]
    pub fn scene_version(&self) -> u64 {
        self.counters.scene.load(Ordering::Relaxed)
    }

    /// Version of the varying-object set.
    #[must_use]
    pub fn varying_state_version(&self) -> u64 {
        self.counters.varying_state.load(Ordering::Relaxed)
    }

    /// Bumps once per geometry insert/remove (and render-tag/repr edits).
    #[must_use]
    pub fn geometry_index_version(&self) -> u64 {
        self.counters.geometry_index.load(Ordering::Relaxed)
    }

    /// Bumps once per state insert/remove.
    #[must_use]
    pub fn state_index_version(&self) -> u64 {
        self.counters.state_index.load(Ordering::Relaxed)
    }

    /// Bumps once per resource insert/remove.
    #[must_use]
    pub fn resource_index_version(&self) -> u64 {
        self.counters.resource_index.load(Ordering::Relaxed)
    }

    /// Bumps once per instancer insert/remove.
    #[must_use]
    pub fn instancer_index_version(&self) -> u64 {
        self.counters.instancer_index.load(Ordering::Relaxed)
    }

    /// Counts visibility-bit dirtyings.
    #[must_use]
    pub fn visibility_change_count(&self) -> u64 {
        self.counters.visibility_change.load(Ordering::Relaxed)
    }

    /// Version of the render-tag state.
    #[must_use]
    pub fn render_tag_version(&self) -> u64 {
        self.counters.render_tag.load(Ordering::Relaxed)
    }

    // -- Bulk --

    /// Returns the number of tracked entries in one category.
    #[must_use]
    pub fn entry_count(&self, category: Category) -> usize {
        match category {
            Category::Geometry => self.geometry.len(),
            Category::State => self.state.len(),
            Category::Resource => self.resource.len(),
            Category::Instancer => self.instancer.len(),
            Category::Task => self.task.len(),
        }
    }

    /// Drops every entry and dependency edge, bumping the index versions
    /// and the scene version. Named counters persist for the ledger's
    /// lifetime.
    pub fn clear(&self) {
        debug!(target: "orogen::ledger", "ledger cleared");
        self.geometry.clear();
        self.state.clear();
        self.resource.clear();
        self.instancer.clear();
        self.task.clear();
        self.instancer_geometry_deps.clear();
        self.instancer_instancer_deps.clear();
        bump(&self.counters.scene);
        bump(&self.counters.geometry_index);
        bump(&self.counters.state_index);
        bump(&self.counters.resource_index);
        bump(&self.counters.instancer_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> ScenePath {
        ScenePath::parse(text)
    }

    #[test]
    fn marks_accumulate_until_cleaned() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::TOPOLOGY);
        ledger.mark_geometry_dirty(&p, GeometryDirty::TRANSFORM);

        let bits = ledger.geometry_dirty_bits(&p);
        assert!(bits.contains(GeometryDirty::TOPOLOGY | GeometryDirty::TRANSFORM));

        ledger.mark_geometry_clean(&p, GeometryDirty::CLEAN);
        assert!(!ledger.is_geometry_dirty(&p));
    }

    #[test]
    fn unknown_paths_default_to_clean() {
        let ledger = ChangeLedger::new();
        assert_eq!(ledger.geometry_dirty_bits(&path("/nope")), GeometryDirty::CLEAN);
        assert_eq!(ledger.state_dirty_bits(&path("/nope")), StateDirty::CLEAN);
        // Marking an unknown path is a silent no-op, not an error.
        ledger.mark_geometry_dirty(&path("/nope"), GeometryDirty::POINTS);
        assert!(!ledger.is_geometry_dirty(&path("/nope")));
    }

    #[test]
    fn removal_erases_exactly_one_entry() {
        let ledger = ChangeLedger::new();
        ledger.geometry_inserted(&path("/a"), GeometryDirty::ALL_DIRTY);
        ledger.geometry_inserted(&path("/b"), GeometryDirty::ALL_DIRTY);
        ledger.geometry_removed(&path("/a"));
        assert_eq!(ledger.geometry_dirty_bits(&path("/a")), GeometryDirty::CLEAN);
        assert!(ledger.is_geometry_dirty(&path("/b")));
    }

    #[test]
    fn ledger_owns_the_varying_marker() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::CLEAN);

        let v0 = ledger.varying_state_version();
        ledger.mark_geometry_dirty(&p, GeometryDirty::POINTS);
        assert!(ledger.geometry_dirty_bits(&p).is_varying());
        assert!(ledger.varying_state_version() > v0, "transition bumps the version");

        // Already varying: marking again does not bump.
        let v1 = ledger.varying_state_version();
        ledger.mark_geometry_dirty(&p, GeometryDirty::NORMALS);
        assert_eq!(ledger.varying_state_version(), v1);
    }

    #[test]
    fn reset_varying_state_clears_only_the_marker() {
        let ledger = ChangeLedger::new();
        let a = path("/a");
        let b = path("/b");
        ledger.geometry_inserted(&a, GeometryDirty::CLEAN);
        ledger.geometry_inserted(&b, GeometryDirty::CLEAN);
        ledger.mark_geometry_dirty(&a, GeometryDirty::POINTS);
        ledger.mark_geometry_dirty(&b, GeometryDirty::TOPOLOGY);

        let v0 = ledger.varying_state_version();
        ledger.reset_varying_state();
        assert!(ledger.varying_state_version() > v0);
        for p in [&a, &b] {
            let bits = ledger.geometry_dirty_bits(p);
            assert!(!bits.is_varying(), "{p}");
            assert!(bits.is_dirty(), "other bits untouched for {p}");
        }
    }

    #[test]
    fn clean_preserves_varying() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::CLEAN);
        ledger.mark_geometry_dirty(&p, GeometryDirty::POINTS);
        ledger.mark_geometry_clean(&p, GeometryDirty::CLEAN);

        let bits = ledger.geometry_dirty_bits(&p);
        assert!(bits.is_varying());
        assert!(!bits.is_dirty());
    }

    #[test]
    fn early_out_skips_scene_version() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::CLEAN);
        ledger.mark_geometry_dirty(&p, GeometryDirty::POINTS);

        let scene = ledger.scene_version();
        ledger.mark_geometry_dirty(&p, GeometryDirty::POINTS);
        assert_eq!(ledger.scene_version(), scene, "no new bits, no version bump");
    }

    #[test]
    fn render_tag_and_repr_bypass_the_early_out() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::RENDER_TAG);

        let scene = ledger.scene_version();
        let index = ledger.geometry_index_version();
        let tags = ledger.render_tag_version();
        ledger.mark_geometry_dirty(&p, GeometryDirty::RENDER_TAG);
        assert!(ledger.scene_version() > scene);
        assert!(ledger.geometry_index_version() > index);
        assert!(ledger.render_tag_version() > tags);
    }

    #[test]
    fn visibility_bumps_the_change_count() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::CLEAN);
        let count = ledger.visibility_change_count();
        ledger.mark_geometry_dirty(&p, GeometryDirty::VISIBILITY);
        assert!(ledger.visibility_change_count() > count);
    }

    #[test]
    fn mark_all_geometry_dirty_touches_every_entry() {
        let ledger = ChangeLedger::new();
        let a = path("/a");
        let b = path("/b");
        ledger.geometry_inserted(&a, GeometryDirty::CLEAN);
        ledger.geometry_inserted(&b, GeometryDirty::POINTS);

        let v0 = ledger.varying_state_version();
        ledger.mark_all_geometry_dirty(GeometryDirty::VISIBILITY);
        assert!(ledger.geometry_dirty_bits(&a).contains(GeometryDirty::VISIBILITY));
        assert!(ledger.geometry_dirty_bits(&b).contains(GeometryDirty::VISIBILITY));
        assert!(ledger.varying_state_version() > v0);
    }

    #[test]
    fn index_versions_track_membership_not_dirtying() {
        let ledger = ChangeLedger::new();
        let p = path("/a");
        ledger.geometry_inserted(&p, GeometryDirty::CLEAN);
        let index = ledger.geometry_index_version();
        ledger.mark_geometry_dirty(&p, GeometryDirty::POINTS);
        assert_eq!(ledger.geometry_index_version(), index);
        ledger.geometry_removed(&p);
        assert!(ledger.geometry_index_version() > index);
    }

    #[test]
    fn dependency_edges_are_symmetric() {
        let ledger = ChangeLedger::new();
        let i = path("/instancer");
        let r = path("/mesh");
        ledger.add_instancer_geometry_dependency(&i, &r);
        assert_eq!(ledger.geometry_dependents_of(&i), [r.clone()]);

        ledger.remove_instancer_geometry_dependency(&i, &r);
        assert!(ledger.geometry_dependents_of(&i).is_empty());
    }

    #[test]
    fn instancer_chains_are_recorded_not_propagated() {
        let ledger = ChangeLedger::new();
        let parent = path("/outer");
        let child = path("/inner");
        ledger.instancer_inserted(&parent, InstancerDirty::CLEAN);
        ledger.instancer_inserted(&child, InstancerDirty::CLEAN);
        ledger.add_instancer_instancer_dependency(&parent, &child);

        ledger.mark_instancer_dirty(&parent, InstancerDirty::TRANSFORM);
        // The ledger records the edge but leaves fan-out to the caller.
        assert_eq!(ledger.instancer_dirty_bits(&child), InstancerDirty::CLEAN);
        assert_eq!(ledger.instancer_dependents_of(&parent), [child]);
    }

    #[test]
    fn collections_report_versions_relative_to_the_index() {
        let ledger = ChangeLedger::new();
        ledger.add_collection("visible");
        let v0 = ledger.collection_version("visible");
        ledger.mark_collection_dirty("visible");
        assert_eq!(ledger.collection_version("visible"), v0 + 1);

        // Membership changes surface through the folded index version.
        ledger.geometry_inserted(&path("/a"), GeometryDirty::CLEAN);
        assert_eq!(ledger.collection_version("visible"), v0 + 2);

        // Re-adding never resets.
        ledger.add_collection("visible");
        assert_eq!(ledger.collection_version("visible"), v0 + 2);
    }

    #[test]
    fn general_state_counters() {
        let ledger = ChangeLedger::new();
        assert_eq!(ledger.general_state_version("lightLinks"), 0);
        ledger.add_general_state("lightLinks");
        assert_eq!(ledger.general_state_version("lightLinks"), 0);
        ledger.mark_general_state_dirty("lightLinks");
        assert_eq!(ledger.general_state_version("lightLinks"), 1);
    }

    #[test]
    fn task_render_tags_feed_the_render_tag_version() {
        let ledger = ChangeLedger::new();
        let p = path("/task");
        ledger.task_inserted(&p, TaskDirty::CLEAN);
        let tags = ledger.render_tag_version();
        ledger.mark_task_dirty(&p, TaskDirty::RENDER_TAGS);
        assert!(ledger.render_tag_version() > tags);

        // Already set: no second bump.
        let tags = ledger.render_tag_version();
        ledger.mark_task_dirty(&p, TaskDirty::RENDER_TAGS | TaskDirty::PARAMS);
        assert_eq!(ledger.render_tag_version(), tags);
    }

    #[test]
    fn scene_version_moves_on_every_structural_event() {
        let ledger = ChangeLedger::new();
        let mut last = ledger.scene_version();
        let mut expect_bump = |ledger: &ChangeLedger| {
            let now = ledger.scene_version();
            assert!(now > last);
            last = now;
        };

        ledger.state_inserted(&path("/cam"), StateDirty::CLEAN);
        expect_bump(&ledger);
        ledger.mark_state_dirty(&path("/cam"), StateDirty::PARAMS);
        expect_bump(&ledger);
        ledger.state_removed(&path("/cam"));
        expect_bump(&ledger);
    }

    #[test]
    fn clear_drops_entries_but_keeps_named_counters() {
        let ledger = ChangeLedger::new();
        ledger.geometry_inserted(&path("/a"), GeometryDirty::CLEAN);
        ledger.add_general_state("s");
        ledger.mark_general_state_dirty("s");

        ledger.clear();
        assert_eq!(ledger.entry_count(Category::Geometry), 0);
        assert_eq!(ledger.general_state_version("s"), 1);
    }

    #[test]
    fn concurrent_marks_on_distinct_paths() {
        use std::sync::Arc;

        let ledger = Arc::new(ChangeLedger::new());
        let paths: Vec<ScenePath> = (0..32).map(|i| path(&format!("/obj{i}"))).collect();
        for p in &paths {
            ledger.geometry_inserted(p, GeometryDirty::CLEAN);
        }

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                let paths = paths.clone();
                std::thread::spawn(move || {
                    for p in &paths {
                        let bit = GeometryDirty::from_bits_retain(1 << (2 + t));
                        ledger.mark_geometry_dirty(p, bit);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for p in &paths {
            let bits = ledger.geometry_dirty_bits(p);
            for t in 0..4 {
                assert!(
                    bits.contains(GeometryDirty::from_bits_retain(1 << (2 + t))),
                    "no marks lost on {p}"
                );
            }
        }
    }
}
