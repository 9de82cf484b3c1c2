// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Hierarchical→Query adapter: observes tree change notices, drives
//! the ledger and the downstream render target, and answers the flat
//! getter surface by reading the tree.
//!
//! [`TreeQueryAdapter`] implements both [`TreeObserver`] (the tree's
//! notice protocol) and [`SceneQuery`] (the legacy getter surface). On the
//! notice side it classifies type tags through a [`CategoryRegistry`],
//! translates locator sets to dirty bits, and performs the instancer
//! fan-out that the ledger deliberately leaves to its callers. On the
//! getter side it resolves tree nodes per call, adapting the few spots
//! where the two schemas disagree, and answers unknown paths with the
//! documented empty values.
//!
//! Attribute-descriptor results are cached per path behind a three-state
//! (unread/reading/read) flag: readers on the fast path take no lock once
//! the state is read, and two threads computing the same descriptors race
//! benignly — one result is retained, the loser's is handed back to its
//! caller and discarded.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use orogen_core::dirty::{
    Category, GeometryDirty, InstancerDirty, ResourceDirty, StateDirty,
};
use orogen_core::locator::{Locator, LocatorSet};
use orogen_core::matrix::Matrix4;
use orogen_core::path::{Name, ScenePath};
use orogen_core::query::{SceneQuery, TimeSamples};
use orogen_core::schema::{self, token};
use orogen_core::source::{descend, ContainerHandle, ValueHandle};
use orogen_core::tree::{AddedEntry, DirtiedEntry, RemovedEntry, SceneTree, TreeObserver};
use orogen_core::types::{
    AttributeDescriptor, ClippingRange, CurveTopology, Extent, InstancerTopology, Interpolation,
    MeshTopology, Projection,
};
use orogen_core::value::Value;

use orogen_track::ChangeLedger;

use crate::registry::{CategoryRegistry, RenderTarget};
use crate::translate::{self, TranslatorRegistry};

// -- Descriptor cache --

const STATE_UNREAD: u8 = 0;
const STATE_READING: u8 = 1;
const STATE_READ: u8 = 2;

type DescriptorTable = [Vec<AttributeDescriptor>; Interpolation::COUNT];

/// Per-path descriptor cache with a lock-free fast path.
///
/// Unread → reading → read; `invalidate` returns to unread. A writer that
/// loses the unread→reading race keeps its freshly computed table for its
/// own caller and discards it from the cache.
struct DescriptorCache {
    state: AtomicU8,
    table: RwLock<DescriptorTable>,
}

impl DescriptorCache {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_UNREAD),
            table: RwLock::new(std::array::from_fn(|_| Vec::new())),
        }
    }

    fn get_or_compute(
        &self,
        interpolation: Interpolation,
        compute: impl FnOnce() -> DescriptorTable,
    ) -> Vec<AttributeDescriptor> {
        if self.state.load(Ordering::Acquire) == STATE_READ {
            return self.table.read()[interpolation.index()].clone();
        }

        let computed = compute();
        if self
            .state
            .compare_exchange(
                STATE_UNREAD,
                STATE_READING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
        {
            let result = computed[interpolation.index()].clone();
            *self.table.write() = computed;
            self.state.store(STATE_READ, Ordering::Release);
            result
        } else {
            // Someone else is filling (or has filled) the cache; hand our
            // work to the caller and discard it.
            computed[interpolation.index()].clone()
        }
    }

    fn invalidate(&self) {
        let mut table = self.table.write();
        *table = std::array::from_fn(|_| Vec::new());
        self.state.store(STATE_UNREAD, Ordering::Release);
    }
}

struct PrimEntry {
    type_tag: Name,
    /// `None` for tags the category registry does not know; such entries
    /// stay in the table (a later re-type may revive them) but drive
    /// neither the ledger nor the render target.
    category: Option<Category>,
    descriptors: DescriptorCache,
    computed: DescriptorCache,
}

impl PrimEntry {
    fn new(type_tag: Name, category: Option<Category>) -> Arc<Self> {
        Arc::new(Self {
            type_tag,
            category,
            descriptors: DescriptorCache::new(),
            computed: DescriptorCache::new(),
        })
    }
}

struct TranslateMemo {
    type_tag: Name,
    locators: LocatorSet,
    bits: GeometryDirty,
}

/// Bridges a hierarchical scene to the flat query surface.
pub struct TreeQueryAdapter {
    tree: Arc<dyn SceneTree>,
    ledger: Arc<ChangeLedger>,
    target: Arc<dyn RenderTarget>,
    categories: Arc<CategoryRegistry>,
    translators: Arc<TranslatorRegistry>,
    prims: RwLock<BTreeMap<ScenePath, Arc<PrimEntry>>>,
    /// Single-entry `(type, locator set) → bits` memo; batched updates
    /// commonly repeat the same combination back to back.
    memo: Mutex<Option<TranslateMemo>>,
}

impl std::fmt::Debug for TreeQueryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeQueryAdapter")
            .field("prims", &self.prims.read().len())
            .finish_non_exhaustive()
    }
}

impl TreeQueryAdapter {
    /// Wires the adapter to its collaborators.
    #[must_use]
    pub fn new(
        tree: Arc<dyn SceneTree>,
        ledger: Arc<ChangeLedger>,
        target: Arc<dyn RenderTarget>,
        categories: Arc<CategoryRegistry>,
        translators: Arc<TranslatorRegistry>,
    ) -> Arc<Self> {
        Arc::new(Self {
            tree,
            ledger,
            target,
            categories,
            translators,
            prims: RwLock::new(BTreeMap::new()),
            memo: Mutex::new(None),
        })
    }

    /// The ledger this adapter drives.
    #[must_use]
    pub fn ledger(&self) -> &Arc<ChangeLedger> {
        &self.ledger
    }

    /// The custom-type translator registry.
    #[must_use]
    pub fn translators(&self) -> &Arc<TranslatorRegistry> {
        &self.translators
    }

    // -- Notice handling --

    fn prim_added(&self, path: &ScenePath, type_tag: &Name) {
        let mut prims = self.prims.write();
        if let Some(existing) = prims.get(path) {
            if existing.type_tag == *type_tag {
                // Re-adding the same path with the same type is a no-op.
                return;
            }
            // Type changed in place: the old registration goes first, and
            // removal is type-directed.
            if let Some(category) = existing.category {
                let old_tag = existing.type_tag.clone();
                self.unregister(path, category, &old_tag);
            }
        }

        let category = self.categories.category_of(type_tag);
        if category.is_none() {
            warn!(target: "orogen::adapter", %path, %type_tag, "unclassified type tag");
        }
        if let Some(category) = category {
            self.register(path, category, type_tag);
        }
        prims.insert(path.clone(), PrimEntry::new(type_tag.clone(), category));
    }

    fn register(&self, path: &ScenePath, category: Category, type_tag: &Name) {
        trace!(target: "orogen::adapter", %path, %type_tag, ?category, "register");
        match category {
            Category::Geometry => {
                self.ledger.geometry_inserted(path, GeometryDirty::ALL_DIRTY);
                self.target.insert_geometry(type_tag, path);
            }
            Category::State => {
                self.ledger.state_inserted(path, StateDirty::ALL_DIRTY);
                self.target.insert_state(type_tag, path);
            }
            Category::Resource => {
                self.ledger.resource_inserted(path, ResourceDirty::ALL_DIRTY);
                self.target.insert_resource(type_tag, path);
            }
            Category::Instancer => {
                self.ledger
                    .instancer_inserted(path, InstancerDirty::ALL_DIRTY);
                self.target.insert_instancer(path);
            }
            Category::Task => {
                self.ledger
                    .task_inserted(path, orogen_core::dirty::TaskDirty::ALL_DIRTY);
                self.target.insert_task(path);
            }
        }
    }

    fn ledger_remove(&self, path: &ScenePath, category: Category) {
        match category {
            Category::Geometry => self.ledger.geometry_removed(path),
            Category::State => self.ledger.state_removed(path),
            Category::Resource => self.ledger.resource_removed(path),
            Category::Instancer => self.ledger.instancer_removed(path),
            Category::Task => self.ledger.task_removed(path),
        }
    }

    fn unregister(&self, path: &ScenePath, category: Category, type_tag: &Name) {
        trace!(target: "orogen::adapter", %path, %type_tag, ?category, "unregister");
        self.ledger_remove(path, category);
        match category {
            Category::Geometry => self.target.remove_geometry(path),
            Category::State => self.target.remove_state(type_tag, path),
            Category::Resource => self.target.remove_resource(type_tag, path),
            Category::Instancer => self.target.remove_instancer(path),
            Category::Task => self.target.remove_task(path),
        }
    }

    fn prim_removed(&self, path: &ScenePath) {
        // The root path means "clear everything"; a wholesale reset is far
        // cheaper than enumerating.
        if path.is_root() {
            debug!(target: "orogen::adapter", "root removal clears the scene");
            self.target.clear();
            self.ledger.clear();
            self.prims.write().clear();
            return;
        }

        let mut prims = self.prims.write();
        if !prims.contains_key(path) {
            return;
        }

        // Subtree removal is expensive downstream, so detect the common
        // single-object case: the entry right after `path` in path order is
        // a descendant iff the path has any cached descendants at all.
        let next_is_descendant = prims
            .range((Bound::Excluded(path.clone()), Bound::Unbounded))
            .next()
            .is_some_and(|(next, _)| next.starts_with(path));

        if next_is_descendant {
            let doomed: Vec<(ScenePath, Arc<PrimEntry>)> = prims
                .range(path.clone()..)
                .take_while(|(candidate, _)| candidate.starts_with(path))
                .map(|(candidate, entry)| (candidate.clone(), Arc::clone(entry)))
                .collect();
            for (candidate, entry) in &doomed {
                prims.remove(candidate);
                if let Some(category) = entry.category {
                    self.ledger_remove(candidate, category);
                }
            }
            // One bulk call downstream instead of per-object removals.
            self.target.remove_subtree(path);
        } else if let Some(entry) = prims.remove(path) {
            if let Some(category) = entry.category {
                self.unregister(path, category, &entry.type_tag);
            }
        }
    }

    fn memoized_geometry_bits(&self, type_tag: &Name, locators: &LocatorSet) -> GeometryDirty {
        let mut memo = self.memo.lock();
        if let Some(hit) = memo
            .as_ref()
            .filter(|m| m.type_tag == *type_tag && m.locators == *locators)
        {
            return hit.bits;
        }
        let bits = translate::geometry_locators_to_dirty_bits(type_tag, locators);
        *memo = Some(TranslateMemo {
            type_tag: type_tag.clone(),
            locators: locators.clone(),
            bits,
        });
        bits
    }

    /// Marks everything the dirtied instancer affects, following the
    /// ledger's dependency edges. The dependent always learns its
    /// instancer changed; transform and instance-index changes additionally
    /// propagate, since dependents consume both.
    fn fan_out_instancer(&self, path: &ScenePath, bits: InstancerDirty) {
        let mut geometry_bits = GeometryDirty::INSTANCER;
        let mut instancer_bits = InstancerDirty::INSTANCER;
        if bits.intersects(InstancerDirty::TRANSFORM) {
            geometry_bits |= GeometryDirty::TRANSFORM;
            instancer_bits |= InstancerDirty::TRANSFORM;
        }
        if bits.intersects(InstancerDirty::INSTANCE_INDEX) {
            geometry_bits |= GeometryDirty::INSTANCE_INDEX;
            instancer_bits |= InstancerDirty::INSTANCE_INDEX;
        }

        for dependent in self.ledger.instancer_dependents_of(path) {
            self.ledger.mark_instancer_dirty(&dependent, instancer_bits);
            self.fan_out_instancer(&dependent, instancer_bits);
        }
        for dependent in self.ledger.geometry_dependents_of(path) {
            self.ledger.mark_geometry_dirty(&dependent, geometry_bits);
        }
    }

    fn prim_dirtied(&self, entry: &DirtiedEntry) {
        let prim = self.prims.read().get(&entry.path).map(Arc::clone);
        let Some(prim) = prim else {
            // Nothing registered here; nothing to invalidate.
            return;
        };

        match prim.category {
            Some(Category::Geometry) => {
                let bits = self.memoized_geometry_bits(&prim.type_tag, &entry.locators);
                if bits.is_dirty() {
                    self.ledger.mark_geometry_dirty(&entry.path, bits);
                }
            }
            Some(Category::State) => {
                let bits = translate::state_locators_to_dirty_bits(
                    &self.translators,
                    &prim.type_tag,
                    &entry.locators,
                );
                if bits.is_dirty() {
                    self.ledger.mark_state_dirty(&entry.path, bits);
                }
            }
            Some(Category::Resource) => {
                let bits =
                    translate::resource_locators_to_dirty_bits(&prim.type_tag, &entry.locators);
                if bits.is_dirty() {
                    self.ledger.mark_resource_dirty(&entry.path, bits);
                }
            }
            Some(Category::Instancer) => {
                let bits = translate::instancer_locators_to_dirty_bits(&entry.locators);
                if bits.is_dirty() {
                    self.ledger.mark_instancer_dirty(&entry.path, bits);
                    // Fan-out lives here, in the calling layer, not in the
                    // ledger.
                    self.fan_out_instancer(&entry.path, bits);
                }
            }
            // Tasks are excluded from locator translation.
            Some(Category::Task) | None => {}
        }

        if entry.locators.intersects(&schema::attributes()) {
            prim.descriptors.invalidate();
        }
        if entry.locators.intersects(&schema::computed_attributes()) {
            prim.computed.invalidate();
        }
    }

    // -- Tree reading helpers --

    fn node(&self, path: &ScenePath) -> Option<ContainerHandle> {
        self.tree.prim(path).source
    }

    fn leaf_at(&self, path: &ScenePath, locator: &Locator) -> Option<ValueHandle> {
        descend(&self.node(path)?, locator)?.as_value()
    }

    fn value_at(&self, path: &ScenePath, locator: &Locator) -> Option<Value> {
        self.leaf_at(path, locator)?.value(0.0)
    }

    fn token_at(&self, path: &ScenePath, locator: &Locator) -> Option<Name> {
        self.value_at(path, locator)?.as_token().cloned()
    }

    fn int_array_at(&self, path: &ScenePath, locator: &Locator) -> Option<Arc<[i32]>> {
        self.value_at(path, locator)?.as_int_array().cloned()
    }

    fn compute_descriptors(&self, path: &ScenePath, region: &str) -> DescriptorTable {
        let mut table: DescriptorTable = std::array::from_fn(|_| Vec::new());
        let Some(node) = self.node(path) else {
            return table;
        };
        let Some(collection) = node.get(region).and_then(|n| n.as_container()) else {
            return table;
        };

        for name in collection.names() {
            let Some(attribute) = collection.get(&name).and_then(|n| n.as_container()) else {
                continue;
            };
            let Some(interpolation) = attribute
                .get(token::INTERPOLATION)
                .and_then(|n| n.as_value())
                .and_then(|leaf| leaf.value(0.0))
                .and_then(|v| v.as_token().map(|t| t.to_string()))
                .and_then(|t| Interpolation::from_token(&t))
            else {
                trace!(target: "orogen::adapter", %path, %name, "attribute without interpolation");
                continue;
            };
            let role = attribute
                .get(token::ROLE)
                .and_then(|n| n.as_value())
                .and_then(|leaf| leaf.value(0.0))
                .and_then(|v| v.as_token().cloned())
                .unwrap_or_else(|| Name::new(""));
            let indexed = attribute.has(token::INDICES);

            table[interpolation.index()].push(AttributeDescriptor {
                name,
                interpolation,
                role,
                indexed,
            });
        }
        table
    }
}

impl TreeObserver for TreeQueryAdapter {
    fn prims_added(&self, entries: &[AddedEntry]) {
        for entry in entries {
            self.prim_added(&entry.path, &entry.type_tag);
        }
    }

    fn prims_removed(&self, entries: &[RemovedEntry]) {
        for entry in entries {
            self.prim_removed(&entry.path);
        }
    }

    fn prims_dirtied(&self, entries: &[DirtiedEntry]) {
        for entry in entries {
            self.prim_dirtied(entry);
        }
    }
}

impl SceneQuery for TreeQueryAdapter {
    fn get(&self, path: &ScenePath, key: &str) -> Option<Value> {
        self.value_at(path, &schema::attribute(key).append(token::VALUE))
    }

    fn indexed_attribute(&self, path: &ScenePath, key: &str) -> Option<(Value, Arc<[i32]>)> {
        let indices = self.int_array_at(path, &schema::attribute(key).append(token::INDICES))?;
        let value = self.value_at(path, &schema::attribute(key).append(token::VALUE))?;
        Some((value, indices))
    }

    fn sample_attribute(
        &self,
        path: &ScenePath,
        key: &str,
        start: f64,
        end: f64,
        capacity: usize,
        out: &mut TimeSamples,
    ) -> usize {
        out.clear();
        let Some(leaf) = self.leaf_at(path, &schema::attribute(key).append(token::VALUE)) else {
            return 0;
        };
        let times = leaf
            .sample_times(start, end)
            .unwrap_or_else(|| vec![0.0]);
        for &time in times.iter().take(capacity) {
            if let Some(value) = leaf.value(time) {
                out.times.push(time);
                out.values.push(value);
            }
        }
        if out.is_empty() { 0 } else { times.len() }
    }

    fn attribute_descriptors(
        &self,
        path: &ScenePath,
        interpolation: Interpolation,
    ) -> Vec<AttributeDescriptor> {
        let prim = self.prims.read().get(path).map(Arc::clone);
        let Some(prim) = prim else {
            return Vec::new();
        };
        prim.descriptors.get_or_compute(interpolation, || {
            self.compute_descriptors(path, token::ATTRIBUTES)
        })
    }

    fn computed_attribute_descriptors(
        &self,
        path: &ScenePath,
        interpolation: Interpolation,
    ) -> Vec<AttributeDescriptor> {
        let prim = self.prims.read().get(path).map(Arc::clone);
        let Some(prim) = prim else {
            return Vec::new();
        };
        prim.computed.get_or_compute(interpolation, || {
            self.compute_descriptors(path, token::COMPUTED_ATTRIBUTES)
        })
    }

    fn mesh_topology(&self, path: &ScenePath) -> MeshTopology {
        let mut topology = MeshTopology::default();
        let Some(counts) = self.int_array_at(
            path,
            &schema::mesh_topology().append(token::FACE_VERTEX_COUNTS),
        ) else {
            return topology;
        };
        let Some(indices) = self.int_array_at(
            path,
            &schema::mesh_topology().append(token::FACE_VERTEX_INDICES),
        ) else {
            return topology;
        };
        topology.face_vertex_counts = counts;
        topology.face_vertex_indices = indices;
        if let Some(holes) =
            self.int_array_at(path, &schema::mesh_topology().append(token::HOLE_INDICES))
        {
            topology.hole_indices = holes;
        }
        if let Some(orientation) =
            self.token_at(path, &schema::mesh_topology().append(token::ORIENTATION))
        {
            topology.orientation = orientation;
        }
        if let Some(scheme) = self.token_at(path, &schema::mesh_subdivision_scheme()) {
            topology.scheme = scheme;
        }
        topology
    }

    fn curve_topology(&self, path: &ScenePath) -> CurveTopology {
        let mut topology = CurveTopology::default();
        let Some(counts) = self.int_array_at(
            path,
            &schema::curve_topology().append(token::CURVE_VERTEX_COUNTS),
        ) else {
            return topology;
        };
        topology.curve_vertex_counts = counts;
        if let Some(indices) =
            self.int_array_at(path, &schema::curve_topology().append(token::CURVE_INDICES))
        {
            topology.curve_indices = indices;
        }
        for (field, slot) in [
            (token::CURVE_TYPE, &mut topology.curve_type),
            (token::BASIS, &mut topology.basis),
            (token::WRAP, &mut topology.wrap),
        ] {
            if let Some(value) = self.token_at(path, &schema::curve_topology().append(field)) {
                *slot = value;
            }
        }
        topology
    }

    fn instancer_topology(&self, path: &ScenePath) -> InstancerTopology {
        let mut topology = InstancerTopology::default();
        let Some(prototypes) = self
            .value_at(path, &schema::instancer_topology().append(token::PROTOTYPES))
            .and_then(|v| v.as_path_array().cloned())
        else {
            return topology;
        };
        topology.prototypes = prototypes.to_vec();
        topology.instance_indices = (0..topology.prototypes.len())
            .map(|slot| {
                self.int_array_at(
                    path,
                    &schema::instancer_topology()
                        .append(token::INSTANCE_INDICES)
                        .append(slot.to_string().as_str()),
                )
                .unwrap_or_else(|| Arc::from([]))
            })
            .collect();
        topology
    }

    fn transform(&self, path: &ScenePath) -> Matrix4 {
        self.value_at(path, &schema::xform().append(token::MATRIX))
            .and_then(|v| v.as_matrix())
            .unwrap_or(Matrix4::IDENTITY)
    }

    fn visible(&self, path: &ScenePath) -> bool {
        self.value_at(path, &schema::visibility().append(token::VISIBILITY))
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    fn extent(&self, path: &ScenePath) -> Option<Extent> {
        let min = self
            .value_at(path, &schema::extent().append(token::MIN))?
            .as_vec3()?;
        let max = self
            .value_at(path, &schema::extent().append(token::MAX))?
            .as_vec3()?;
        Some(Extent { min, max })
    }

    fn material_binding(&self, path: &ScenePath) -> Option<ScenePath> {
        self.value_at(path, &schema::material_bindings().append(token::BINDING))?
            .as_path()
            .cloned()
    }

    fn camera_projection(&self, path: &ScenePath) -> Projection {
        // Token in the tree, enum on the flat surface.
        self.token_at(path, &schema::camera().append(token::PROJECTION))
            .and_then(|t| Projection::from_token(&t))
            .unwrap_or_default()
    }

    fn camera_clipping_range(&self, path: &ScenePath) -> ClippingRange {
        // 2-vector in the tree, range struct on the flat surface.
        self.value_at(path, &schema::camera().append(token::CLIPPING_RANGE))
            .and_then(|v| v.as_vec2())
            .map_or_else(ClippingRange::default, ClippingRange::from_vec2)
    }

    fn camera_param(&self, path: &ScenePath, name: &str) -> Option<Value> {
        self.value_at(path, &schema::camera().append(name))
    }

    fn light_param(&self, path: &ScenePath, name: &str) -> Option<Value> {
        self.value_at(path, &schema::light().append(name))
    }

    fn render_tag(&self, path: &ScenePath) -> Name {
        self.token_at(path, &schema::purpose().append(token::PURPOSE))
            .unwrap_or_else(|| Name::new(token::DEFAULT_PURPOSE))
    }

    fn categories(&self, path: &ScenePath) -> Vec<Name> {
        self.value_at(path, &schema::categories().append(token::INCLUDED))
            .and_then(|v| v.as_token_array().cloned())
            .map(|names| names.to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::type_tag;
    use orogen_core::source::RetainedContainer;

    // -- Test doubles --

    /// Records downstream registry calls as readable strings.
    #[derive(Default)]
    struct RecordingTarget {
        events: Mutex<Vec<String>>,
    }

    impl RecordingTarget {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut self.events.lock())
        }

        fn push(&self, event: String) {
            self.events.lock().push(event);
        }
    }

    impl RenderTarget for RecordingTarget {
        fn insert_geometry(&self, type_tag: &Name, path: &ScenePath) {
            self.push(format!("+geo {type_tag} {path}"));
        }
        fn remove_geometry(&self, path: &ScenePath) {
            self.push(format!("-geo {path}"));
        }
        fn insert_state(&self, type_tag: &Name, path: &ScenePath) {
            self.push(format!("+state {type_tag} {path}"));
        }
        fn remove_state(&self, type_tag: &Name, path: &ScenePath) {
            self.push(format!("-state {type_tag} {path}"));
        }
        fn insert_resource(&self, type_tag: &Name, path: &ScenePath) {
            self.push(format!("+res {type_tag} {path}"));
        }
        fn remove_resource(&self, type_tag: &Name, path: &ScenePath) {
            self.push(format!("-res {type_tag} {path}"));
        }
        fn insert_instancer(&self, path: &ScenePath) {
            self.push(format!("+inst {path}"));
        }
        fn remove_instancer(&self, path: &ScenePath) {
            self.push(format!("-inst {path}"));
        }
        fn insert_task(&self, path: &ScenePath) {
            self.push(format!("+task {path}"));
        }
        fn remove_task(&self, path: &ScenePath) {
            self.push(format!("-task {path}"));
        }
        fn remove_subtree(&self, path: &ScenePath) {
            self.push(format!("-subtree {path}"));
        }
        fn clear(&self) {
            self.push("clear".into());
        }
    }

    /// An in-memory hierarchical scene.
    #[derive(Default)]
    struct RetainedTree {
        prims: RwLock<BTreeMap<ScenePath, (Name, ContainerHandle)>>,
    }

    impl RetainedTree {
        fn set(&self, path: &str, type_tag: &str, source: ContainerHandle) {
            self.prims
                .write()
                .insert(ScenePath::parse(path), (Name::new(type_tag), source));
        }
    }

    impl SceneTree for RetainedTree {
        fn prim(&self, path: &ScenePath) -> orogen_core::tree::TreePrim {
            self.prims.read().get(path).map_or_else(
                orogen_core::tree::TreePrim::absent,
                |(type_tag, source)| orogen_core::tree::TreePrim {
                    type_tag: type_tag.clone(),
                    source: Some(Arc::clone(source)),
                },
            )
        }

        fn child_paths(&self, path: &ScenePath) -> Vec<ScenePath> {
            self.prims
                .read()
                .keys()
                .filter(|candidate| candidate.parent().as_ref() == Some(path))
                .cloned()
                .collect()
        }
    }

    struct Fixture {
        tree: Arc<RetainedTree>,
        target: Arc<RecordingTarget>,
        adapter: Arc<TreeQueryAdapter>,
    }

    fn fixture() -> Fixture {
        let tree = Arc::new(RetainedTree::default());
        let target = Arc::new(RecordingTarget::default());
        let adapter = TreeQueryAdapter::new(
            Arc::clone(&tree) as Arc<dyn SceneTree>,
            Arc::new(ChangeLedger::new()),
            Arc::clone(&target) as Arc<dyn RenderTarget>,
            Arc::new(CategoryRegistry::new()),
            Arc::new(TranslatorRegistry::new()),
        );
        Fixture {
            tree,
            target,
            adapter,
        }
    }

    fn added(path: &str, type_tag: &str) -> AddedEntry {
        AddedEntry {
            path: ScenePath::parse(path),
            type_tag: Name::new(type_tag),
        }
    }

    fn removed(path: &str) -> RemovedEntry {
        RemovedEntry {
            path: ScenePath::parse(path),
        }
    }

    fn dirtied(path: &str, locators: &[Locator]) -> DirtiedEntry {
        DirtiedEntry {
            path: ScenePath::parse(path),
            locators: locators.iter().cloned().collect(),
        }
    }

    fn attributes_tree() -> ContainerHandle {
        RetainedContainer::builder()
            .child(
                token::ATTRIBUTES,
                RetainedContainer::builder()
                    .child(
                        "points",
                        RetainedContainer::builder()
                            .value(token::VALUE, vec![0.0, 1.0])
                            .value(token::INTERPOLATION, "vertex")
                            .value(token::ROLE, "point")
                            .build(),
                    )
                    .child(
                        "displayColor",
                        RetainedContainer::builder()
                            .value(token::VALUE, vec![0.5, 0.5, 0.5])
                            .value(token::INTERPOLATION, "constant")
                            .value(token::ROLE, "color")
                            .build(),
                    )
                    .build(),
            )
            .child(
                token::XFORM,
                RetainedContainer::builder()
                    .value(token::MATRIX, Matrix4::from_translation(2.0, 0.0, 0.0))
                    .build(),
            )
            .child(
                token::VISIBILITY,
                RetainedContainer::builder()
                    .value(token::VISIBILITY, false)
                    .build(),
            )
            .build()
    }

    // -- Observer protocol --

    #[test]
    fn added_prims_register_by_category() {
        let f = fixture();
        f.adapter.prims_added(&[
            added("/mesh", type_tag::MESH),
            added("/cam", type_tag::CAMERA),
            added("/buf", type_tag::RENDER_BUFFER),
            added("/inst", type_tag::INSTANCER),
        ]);

        assert_eq!(
            f.target.take(),
            [
                "+geo mesh /mesh",
                "+state camera /cam",
                "+res renderBuffer /buf",
                "+inst /inst"
            ]
        );
        let ledger = f.adapter.ledger();
        assert_eq!(
            ledger.geometry_dirty_bits(&ScenePath::parse("/mesh")),
            GeometryDirty::ALL_DIRTY
        );
        assert_eq!(ledger.entry_count(Category::State), 1);
        assert_eq!(ledger.entry_count(Category::Resource), 1);
        assert_eq!(ledger.entry_count(Category::Instancer), 1);
    }

    #[test]
    fn same_type_re_add_is_a_no_op() {
        let f = fixture();
        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);
        let scene = f.adapter.ledger().scene_version();
        f.target.take();

        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);
        assert!(f.target.take().is_empty());
        assert_eq!(f.adapter.ledger().scene_version(), scene);
    }

    #[test]
    fn type_change_removes_the_old_registration_first() {
        let f = fixture();
        f.adapter.prims_added(&[added("/obj", type_tag::MESH)]);
        f.target.take();

        f.adapter.prims_added(&[added("/obj", type_tag::CAMERA)]);
        assert_eq!(f.target.take(), ["-geo /obj", "+state camera /obj"]);
        let ledger = f.adapter.ledger();
        assert_eq!(ledger.entry_count(Category::Geometry), 0);
        assert_eq!(ledger.entry_count(Category::State), 1);
    }

    #[test]
    fn root_removal_clears_everything() {
        let f = fixture();
        f.adapter.prims_added(&[
            added("/a", type_tag::MESH),
            added("/b", type_tag::CAMERA),
        ]);
        f.target.take();

        f.adapter.prims_removed(&[removed("/")]);
        assert_eq!(f.target.take(), ["clear"]);
        assert_eq!(f.adapter.ledger().entry_count(Category::Geometry), 0);
        assert_eq!(f.adapter.ledger().entry_count(Category::State), 0);
    }

    #[test]
    fn leaf_removal_takes_the_cheap_path() {
        let f = fixture();
        f.adapter.prims_added(&[
            added("/geo/a", type_tag::MESH),
            added("/geo/b", type_tag::MESH),
        ]);
        f.target.take();

        f.adapter.prims_removed(&[removed("/geo/a")]);
        assert_eq!(f.target.take(), ["-geo /geo/a"]);
        assert_eq!(f.adapter.ledger().entry_count(Category::Geometry), 1);
    }

    #[test]
    fn populated_subtrees_are_removed_in_bulk() {
        let f = fixture();
        f.adapter.prims_added(&[
            added("/geo", type_tag::MESH),
            added("/geo/child", type_tag::MESH),
            added("/geo/child/grandchild", type_tag::CAMERA),
            added("/geo2", type_tag::MESH),
        ]);
        f.target.take();

        f.adapter.prims_removed(&[removed("/geo")]);
        assert_eq!(f.target.take(), ["-subtree /geo"]);
        let ledger = f.adapter.ledger();
        assert_eq!(ledger.entry_count(Category::Geometry), 1, "/geo2 survives");
        assert_eq!(ledger.entry_count(Category::State), 0);

        // A sibling whose name shares a string prefix is not a descendant.
        f.adapter.prims_removed(&[removed("/geo2")]);
        assert_eq!(f.target.take(), ["-geo /geo2"]);
    }

    #[test]
    fn dirtied_geometry_translates_and_marks() {
        let f = fixture();
        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);
        let ledger = f.adapter.ledger();
        let path = ScenePath::parse("/mesh");
        ledger.mark_geometry_clean(&path, GeometryDirty::CLEAN);

        f.adapter
            .prims_dirtied(&[dirtied("/mesh", &[schema::xform()])]);
        assert!(
            ledger
                .geometry_dirty_bits(&path)
                .contains(GeometryDirty::TRANSFORM)
        );

        // Batched repeats of the same (type, locator set) hit the memo and
        // must translate identically.
        ledger.mark_geometry_clean(&path, GeometryDirty::CLEAN);
        f.adapter
            .prims_dirtied(&[dirtied("/mesh", &[schema::xform()])]);
        assert!(
            ledger
                .geometry_dirty_bits(&path)
                .contains(GeometryDirty::TRANSFORM)
        );
    }

    #[test]
    fn empty_locator_means_all_dirty_and_moves_the_scene_version() {
        let f = fixture();
        f.adapter.prims_added(&[added("/inst", type_tag::INSTANCER)]);
        let ledger = f.adapter.ledger();
        let path = ScenePath::parse("/inst");
        ledger.mark_instancer_clean(&path, InstancerDirty::CLEAN);

        let scene = ledger.scene_version();
        f.adapter
            .prims_dirtied(&[dirtied("/inst", &[Locator::empty()])]);
        assert_eq!(
            ledger.instancer_dirty_bits(&path),
            InstancerDirty::ALL_DIRTY
        );
        assert!(ledger.scene_version() > scene);
    }

    #[test]
    fn dirtied_instancers_fan_out_to_dependents() {
        let f = fixture();
        f.adapter.prims_added(&[
            added("/outer", type_tag::INSTANCER),
            added("/inner", type_tag::INSTANCER),
            added("/mesh", type_tag::MESH),
        ]);
        let ledger = f.adapter.ledger();
        ledger.add_instancer_instancer_dependency(
            &ScenePath::parse("/outer"),
            &ScenePath::parse("/inner"),
        );
        ledger.add_instancer_geometry_dependency(
            &ScenePath::parse("/inner"),
            &ScenePath::parse("/mesh"),
        );
        for path in ["/outer", "/inner"] {
            ledger.mark_instancer_clean(&ScenePath::parse(path), InstancerDirty::CLEAN);
        }
        ledger.mark_geometry_clean(&ScenePath::parse("/mesh"), GeometryDirty::CLEAN);

        f.adapter
            .prims_dirtied(&[dirtied("/outer", &[schema::xform()])]);

        assert!(
            ledger
                .instancer_dirty_bits(&ScenePath::parse("/inner"))
                .contains(InstancerDirty::TRANSFORM | InstancerDirty::INSTANCER)
        );
        let mesh_bits = ledger.geometry_dirty_bits(&ScenePath::parse("/mesh"));
        assert!(
            mesh_bits.contains(GeometryDirty::TRANSFORM | GeometryDirty::INSTANCER),
            "chained fan-out reaches the geometry: {mesh_bits:?}"
        );
    }

    #[test]
    fn dirtied_unknown_paths_are_ignored() {
        let f = fixture();
        let scene = f.adapter.ledger().scene_version();
        f.adapter
            .prims_dirtied(&[dirtied("/ghost", &[schema::xform()])]);
        assert_eq!(f.adapter.ledger().scene_version(), scene);
    }

    // -- Getter surface --

    #[test]
    fn getters_read_through_the_tree() {
        let f = fixture();
        f.tree.set("/mesh", type_tag::MESH, attributes_tree());
        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);

        let path = ScenePath::parse("/mesh");
        assert_eq!(
            f.adapter.transform(&path),
            Matrix4::from_translation(2.0, 0.0, 0.0)
        );
        assert!(!f.adapter.visible(&path));
        assert_eq!(
            f.adapter.get(&path, "points"),
            Some(Value::from(vec![0.0, 1.0]))
        );
    }

    #[test]
    fn unknown_paths_return_the_documented_defaults() {
        let f = fixture();
        let path = ScenePath::parse("/nowhere");
        assert_eq!(f.adapter.transform(&path), Matrix4::IDENTITY);
        assert!(f.adapter.visible(&path));
        assert_eq!(f.adapter.mesh_topology(&path), MeshTopology::default());
        assert_eq!(f.adapter.curve_topology(&path), CurveTopology::default());
        assert_eq!(
            f.adapter.instancer_topology(&path),
            InstancerTopology::default()
        );
        assert_eq!(f.adapter.extent(&path), None);
        assert_eq!(f.adapter.material_binding(&path), None);
        assert_eq!(f.adapter.render_tag(&path).as_str(), "geometry");
        assert!(f.adapter.categories(&path).is_empty());
        assert!(
            f.adapter
                .attribute_descriptors(&path, Interpolation::Vertex)
                .is_empty()
        );
    }

    #[test]
    fn mesh_topology_reads_counts_indices_and_scheme() {
        let f = fixture();
        let tree = RetainedContainer::builder()
            .child(
                token::MESH,
                RetainedContainer::builder()
                    .value(token::SUBDIVISION_SCHEME, "catmullClark")
                    .child(
                        token::TOPOLOGY,
                        RetainedContainer::builder()
                            .value(token::FACE_VERTEX_COUNTS, vec![3, 3])
                            .value(token::FACE_VERTEX_INDICES, vec![0, 1, 2, 0, 2, 3])
                            .build(),
                    )
                    .build(),
            )
            .build();
        f.tree.set("/mesh", type_tag::MESH, tree);

        let topology = f.adapter.mesh_topology(&ScenePath::parse("/mesh"));
        assert_eq!(topology.face_count(), 2);
        assert_eq!(topology.scheme.as_str(), "catmullClark");
        assert_eq!(topology.orientation.as_str(), "rightHanded");
    }

    #[test]
    fn camera_values_adapt_between_schemas() {
        let f = fixture();
        let tree = RetainedContainer::builder()
            .child(
                token::CAMERA,
                RetainedContainer::builder()
                    .value(token::PROJECTION, "orthographic")
                    .value(token::CLIPPING_RANGE, Value::Vec2([0.25, 250.0]))
                    .value("focalLength", 50.0)
                    .build(),
            )
            .build();
        f.tree.set("/cam", type_tag::CAMERA, tree);

        let path = ScenePath::parse("/cam");
        assert_eq!(f.adapter.camera_projection(&path), Projection::Orthographic);
        assert_eq!(
            f.adapter.camera_clipping_range(&path),
            ClippingRange {
                near: 0.25,
                far: 250.0
            }
        );
        assert_eq!(f.adapter.camera_param(&path, "focalLength"), Some(Value::from(50.0)));

        // Unauthored camera values fall back to the defaults.
        let ghost = ScenePath::parse("/ghost");
        assert_eq!(f.adapter.camera_projection(&ghost), Projection::Perspective);
        assert_eq!(f.adapter.camera_clipping_range(&ghost), ClippingRange::default());
    }

    #[test]
    fn instancer_topology_round_trips_through_the_tree() {
        let f = fixture();
        let tree = RetainedContainer::builder()
            .child(
                token::INSTANCER_TOPOLOGY,
                RetainedContainer::builder()
                    .value(
                        token::PROTOTYPES,
                        vec![ScenePath::parse("/proto/a"), ScenePath::parse("/proto/b")],
                    )
                    .child(
                        token::INSTANCE_INDICES,
                        RetainedContainer::builder()
                            .value("0", vec![0, 2])
                            .value("1", vec![1])
                            .build(),
                    )
                    .build(),
            )
            .build();
        f.tree.set("/inst", type_tag::INSTANCER, tree);

        let topology = f.adapter.instancer_topology(&ScenePath::parse("/inst"));
        assert_eq!(topology.prototypes.len(), 2);
        assert_eq!(&topology.instance_indices[0][..], [0, 2]);
        assert_eq!(&topology.instance_indices[1][..], [1]);
    }

    #[test]
    fn descriptors_are_cached_until_attribute_locators_dirty() {
        let f = fixture();
        f.tree.set("/mesh", type_tag::MESH, attributes_tree());
        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);
        let path = ScenePath::parse("/mesh");

        let vertex = f.adapter.attribute_descriptors(&path, Interpolation::Vertex);
        assert_eq!(vertex.len(), 1);
        assert_eq!(vertex[0].name.as_str(), "points");
        let constant = f
            .adapter
            .attribute_descriptors(&path, Interpolation::Constant);
        assert_eq!(constant[0].name.as_str(), "displayColor");

        // Swap the authored tree; the cache still answers until dirtied.
        f.tree.set(
            "/mesh",
            type_tag::MESH,
            RetainedContainer::builder()
                .child(token::ATTRIBUTES, RetainedContainer::builder().build())
                .build(),
        );
        assert_eq!(
            f.adapter
                .attribute_descriptors(&path, Interpolation::Vertex)
                .len(),
            1,
            "stale but cached"
        );

        f.adapter
            .prims_dirtied(&[dirtied("/mesh", &[schema::points()])]);
        assert!(
            f.adapter
                .attribute_descriptors(&path, Interpolation::Vertex)
                .is_empty(),
            "invalidated and recomputed"
        );
    }

    #[test]
    fn concurrent_descriptor_reads_agree() {
        let f = fixture();
        f.tree.set("/mesh", type_tag::MESH, attributes_tree());
        f.adapter.prims_added(&[added("/mesh", type_tag::MESH)]);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let adapter = Arc::clone(&f.adapter);
                std::thread::spawn(move || {
                    adapter.attribute_descriptors(
                        &ScenePath::parse("/mesh"),
                        Interpolation::Vertex,
                    )
                })
            })
            .collect();
        for handle in handles {
            let descriptors = handle.join().unwrap();
            assert_eq!(descriptors.len(), 1);
            assert_eq!(descriptors[0].name.as_str(), "points");
        }
    }

    #[test]
    fn sampling_through_the_tree_bridges_single_samples() {
        let f = fixture();
        f.tree.set("/mesh", type_tag::MESH, attributes_tree());

        let mut out = TimeSamples::default();
        let authored = f.adapter.sample_attribute(
            &ScenePath::parse("/mesh"),
            "points",
            -0.25,
            0.25,
            4,
            &mut out,
        );
        assert_eq!(authored, 1);
        assert_eq!(out.times, [0.0]);
        assert_eq!(
            f.adapter
                .sample_attribute(&ScenePath::parse("/mesh"), "missing", -0.25, 0.25, 4, &mut out),
            0
        );
    }
}
