// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Query→Hierarchical adapter: exposes one flat-interface object as a
//! lazily materialized tree.
//!
//! [`QueryPrimSource`] implements [`ContainerSource`] for a single
//! `(path, type tag)` over a [`SceneQuery`]. Most regions are rebuilt from
//! the query interface on every `get`, since caching them buys nothing.
//! Two sub-trees are expensive enough to cache: the attribute collection
//! (descriptor enumeration fans out into many calls) and the instancer
//! topology. Those sit behind atomically swapped handles —
//! [`prim_dirtied`](QueryPrimSource::prim_dirtied) clears them when the
//! incoming locators intersect, and concurrent readers observe either the
//! old or the fully built new value, never a partially built one. Racing
//! rebuilds are not deduplicated; the last writer wins and the losers'
//! work is discarded.
//!
//! Type-specific sub-adapters (mesh topology, curve topology, camera and
//! light parameters, sampled/indexed attribute values) share one pattern:
//! one expensive query call wrapped in a lazily built shared store, with
//! narrow per-field views that recompute nothing while the store is valid.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;

use orogen_core::locator::LocatorSet;
use orogen_core::path::{Name, ScenePath};
use orogen_core::query::{SceneQuery, TimeSamples};
use orogen_core::schema::{self, token};
use orogen_core::source::{
    ContainerHandle, ContainerSource, DataSourceHandle, RetainedContainer, RetainedValue,
    ValueSource,
};
use orogen_core::types::{CurveTopology, InstancerTopology, Interpolation, MeshTopology};
use orogen_core::value::Value;

use crate::registry::type_tag;
use crate::translate::is_light_type;

type Query = Arc<dyn SceneQuery>;

// -- Generic per-key value views --

/// Reads one flat-interface attribute on demand.
struct GenericGetSource {
    path: ScenePath,
    key: Name,
    query: Query,
}

impl ValueSource for GenericGetSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        self.query.get(&self.path, &self.key)
    }
}

/// Capacity used for the first attempt at a sampled read; re-queried with
/// the authored count when it turns out larger.
const SAMPLE_PROBE_CAPACITY: usize = 8;

/// Reads a (possibly time-sampled) attribute value.
struct SampledAttributeSource {
    path: ScenePath,
    key: Name,
    query: Query,
}

impl SampledAttributeSource {
    fn sample(&self, start: f64, end: f64) -> TimeSamples {
        let mut out = TimeSamples::default();
        let authored = self.query.sample_attribute(
            &self.path,
            &self.key,
            start,
            end,
            SAMPLE_PROBE_CAPACITY,
            &mut out,
        );
        if authored > SAMPLE_PROBE_CAPACITY {
            // Undersized buffer; the documented recovery is a re-query
            // with the authored count.
            self.query
                .sample_attribute(&self.path, &self.key, start, end, authored, &mut out);
        }
        out
    }
}

impl ValueSource for SampledAttributeSource {
    fn value(&self, shutter_offset: f64) -> Option<Value> {
        if shutter_offset == 0.0 {
            return self.query.get(&self.path, &self.key);
        }
        let samples = self.sample(shutter_offset, shutter_offset);
        // Nearest sample to the requested offset.
        let mut best: Option<(f64, &Value)> = None;
        for (time, value) in samples.times.iter().zip(&samples.values) {
            let distance = (time - shutter_offset).abs();
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, value));
            }
        }
        best.map(|(_, value)| value.clone())
    }

    fn sample_times(&self, start: f64, end: f64) -> Option<Vec<f64>> {
        let samples = self.sample(start, end);
        (samples.len() > 1).then_some(samples.times)
    }
}

/// Reads the value half of an indexed attribute.
struct IndexedAttributeSource {
    path: ScenePath,
    key: Name,
    query: Query,
}

impl ValueSource for IndexedAttributeSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        self.query
            .indexed_attribute(&self.path, &self.key)
            .map(|(value, _)| value)
    }
}

/// Reads the index array half of an indexed attribute.
struct AttributeIndicesSource {
    path: ScenePath,
    key: Name,
    query: Query,
}

impl ValueSource for AttributeIndicesSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        self.query
            .indexed_attribute(&self.path, &self.key)
            .map(|(_, indices)| Value::IntArray(indices))
    }
}

/// A lazy container whose children are flat-interface keys.
struct GetKeyContainer {
    path: ScenePath,
    names: Vec<Name>,
    query: Query,
}

impl ContainerSource for GetKeyContainer {
    fn names(&self) -> Vec<Name> {
        self.names.clone()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        Some(DataSourceHandle::Value(Arc::new(GenericGetSource {
            path: self.path.clone(),
            key: Name::new(name),
            query: Arc::clone(&self.query),
        })))
    }
}

// -- Mesh topology --

/// Caches one `mesh_topology` query call behind an atomic handle.
struct MeshTopologyStore {
    path: ScenePath,
    query: Query,
    cache: ArcSwapOption<MeshTopology>,
}

impl MeshTopologyStore {
    fn new(path: ScenePath, query: Query) -> Arc<Self> {
        Arc::new(Self {
            path,
            query,
            cache: ArcSwapOption::empty(),
        })
    }

    fn get(&self) -> Arc<MeshTopology> {
        if let Some(topology) = self.cache.load_full() {
            return topology;
        }
        let topology = Arc::new(self.query.mesh_topology(&self.path));
        self.cache.store(Some(Arc::clone(&topology)));
        topology
    }
}

#[derive(Clone, Copy)]
enum MeshTopologyField {
    FaceVertexCounts,
    FaceVertexIndices,
    HoleIndices,
    Orientation,
    SubdivisionScheme,
}

/// A narrow view onto one field of a shared [`MeshTopologyStore`].
struct MeshTopologyFieldSource {
    store: Arc<MeshTopologyStore>,
    field: MeshTopologyField,
}

impl ValueSource for MeshTopologyFieldSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        let topology = self.store.get();
        Some(match self.field {
            MeshTopologyField::FaceVertexCounts => {
                Value::IntArray(Arc::clone(&topology.face_vertex_counts))
            }
            MeshTopologyField::FaceVertexIndices => {
                Value::IntArray(Arc::clone(&topology.face_vertex_indices))
            }
            MeshTopologyField::HoleIndices => {
                Value::IntArray(Arc::clone(&topology.hole_indices))
            }
            MeshTopologyField::Orientation => Value::Token(topology.orientation.clone()),
            MeshTopologyField::SubdivisionScheme => Value::Token(topology.scheme.clone()),
        })
    }
}

struct MeshTopologyContainer {
    store: Arc<MeshTopologyStore>,
}

impl MeshTopologyContainer {
    fn field(&self, field: MeshTopologyField) -> DataSourceHandle {
        DataSourceHandle::Value(Arc::new(MeshTopologyFieldSource {
            store: Arc::clone(&self.store),
            field,
        }))
    }
}

impl ContainerSource for MeshTopologyContainer {
    fn names(&self) -> Vec<Name> {
        vec![
            Name::new(token::FACE_VERTEX_COUNTS),
            Name::new(token::FACE_VERTEX_INDICES),
            Name::new(token::HOLE_INDICES),
            Name::new(token::ORIENTATION),
        ]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::FACE_VERTEX_COUNTS => Some(self.field(MeshTopologyField::FaceVertexCounts)),
            token::FACE_VERTEX_INDICES => Some(self.field(MeshTopologyField::FaceVertexIndices)),
            token::HOLE_INDICES => Some(self.field(MeshTopologyField::HoleIndices)),
            token::ORIENTATION => Some(self.field(MeshTopologyField::Orientation)),
            _ => None,
        }
    }
}

/// The `mesh` region: topology plus mesh-level fields, all views onto one
/// shared topology store.
struct MeshContainer {
    store: Arc<MeshTopologyStore>,
}

impl ContainerSource for MeshContainer {
    fn names(&self) -> Vec<Name> {
        vec![
            Name::new(token::DOUBLE_SIDED),
            Name::new(token::SUBDIVISION_SCHEME),
            Name::new(token::TOPOLOGY),
        ]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::DOUBLE_SIDED => Some(DataSourceHandle::Value(Arc::new(GenericGetSource {
                path: self.store.path.clone(),
                key: Name::new(token::DOUBLE_SIDED),
                query: Arc::clone(&self.store.query),
            }))),
            token::SUBDIVISION_SCHEME => {
                Some(DataSourceHandle::Value(Arc::new(MeshTopologyFieldSource {
                    store: Arc::clone(&self.store),
                    field: MeshTopologyField::SubdivisionScheme,
                })))
            }
            token::TOPOLOGY => Some(DataSourceHandle::Container(Arc::new(
                MeshTopologyContainer {
                    store: Arc::clone(&self.store),
                },
            ))),
            _ => None,
        }
    }
}

// -- Curve topology --

struct CurveTopologyStore {
    path: ScenePath,
    query: Query,
    cache: ArcSwapOption<CurveTopology>,
}

impl CurveTopologyStore {
    fn new(path: ScenePath, query: Query) -> Arc<Self> {
        Arc::new(Self {
            path,
            query,
            cache: ArcSwapOption::empty(),
        })
    }

    fn get(&self) -> Arc<CurveTopology> {
        if let Some(topology) = self.cache.load_full() {
            return topology;
        }
        let topology = Arc::new(self.query.curve_topology(&self.path));
        self.cache.store(Some(Arc::clone(&topology)));
        topology
    }
}

#[derive(Clone, Copy)]
enum CurveTopologyField {
    CurveType,
    Basis,
    Wrap,
    CurveVertexCounts,
    CurveIndices,
}

struct CurveTopologyFieldSource {
    store: Arc<CurveTopologyStore>,
    field: CurveTopologyField,
}

impl ValueSource for CurveTopologyFieldSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        let topology = self.store.get();
        Some(match self.field {
            CurveTopologyField::CurveType => Value::Token(topology.curve_type.clone()),
            CurveTopologyField::Basis => Value::Token(topology.basis.clone()),
            CurveTopologyField::Wrap => Value::Token(topology.wrap.clone()),
            CurveTopologyField::CurveVertexCounts => {
                Value::IntArray(Arc::clone(&topology.curve_vertex_counts))
            }
            CurveTopologyField::CurveIndices => {
                Value::IntArray(Arc::clone(&topology.curve_indices))
            }
        })
    }
}

struct CurveTopologyContainer {
    store: Arc<CurveTopologyStore>,
}

impl CurveTopologyContainer {
    fn field(&self, field: CurveTopologyField) -> DataSourceHandle {
        DataSourceHandle::Value(Arc::new(CurveTopologyFieldSource {
            store: Arc::clone(&self.store),
            field,
        }))
    }
}

impl ContainerSource for CurveTopologyContainer {
    fn names(&self) -> Vec<Name> {
        vec![
            Name::new(token::CURVE_TYPE),
            Name::new(token::BASIS),
            Name::new(token::WRAP),
            Name::new(token::CURVE_VERTEX_COUNTS),
            Name::new(token::CURVE_INDICES),
        ]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::CURVE_TYPE => Some(self.field(CurveTopologyField::CurveType)),
            token::BASIS => Some(self.field(CurveTopologyField::Basis)),
            token::WRAP => Some(self.field(CurveTopologyField::Wrap)),
            token::CURVE_VERTEX_COUNTS => Some(self.field(CurveTopologyField::CurveVertexCounts)),
            token::CURVE_INDICES => Some(self.field(CurveTopologyField::CurveIndices)),
            _ => None,
        }
    }
}

struct CurveContainer {
    store: Arc<CurveTopologyStore>,
}

impl ContainerSource for CurveContainer {
    fn names(&self) -> Vec<Name> {
        vec![Name::new(token::TOPOLOGY)]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        (name == token::TOPOLOGY).then(|| {
            DataSourceHandle::Container(Arc::new(CurveTopologyContainer {
                store: Arc::clone(&self.store),
            }))
        })
    }
}

// -- Attribute collection --

/// One attribute's container: `value`, `interpolation`, `role`, and
/// `indices` when the attribute is indexed.
struct AttributeEntryContainer {
    path: ScenePath,
    name: Name,
    interpolation: Interpolation,
    role: Name,
    indexed: bool,
    query: Query,
}

impl ContainerSource for AttributeEntryContainer {
    fn names(&self) -> Vec<Name> {
        let mut names = vec![
            Name::new(token::VALUE),
            Name::new(token::INTERPOLATION),
            Name::new(token::ROLE),
        ];
        if self.indexed {
            names.push(Name::new(token::INDICES));
        }
        names
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::VALUE if self.indexed => {
                Some(DataSourceHandle::Value(Arc::new(IndexedAttributeSource {
                    path: self.path.clone(),
                    key: self.name.clone(),
                    query: Arc::clone(&self.query),
                })))
            }
            token::VALUE => Some(DataSourceHandle::Value(Arc::new(SampledAttributeSource {
                path: self.path.clone(),
                key: self.name.clone(),
                query: Arc::clone(&self.query),
            }))),
            token::INTERPOLATION => Some(DataSourceHandle::Value(RetainedValue::new(
                self.interpolation.as_token(),
            ))),
            token::ROLE => Some(DataSourceHandle::Value(RetainedValue::new(
                self.role.clone(),
            ))),
            token::INDICES if self.indexed => {
                Some(DataSourceHandle::Value(Arc::new(AttributeIndicesSource {
                    path: self.path.clone(),
                    key: self.name.clone(),
                    query: Arc::clone(&self.query),
                })))
            }
            _ => None,
        }
    }
}

/// Which descriptor family an attribute collection is built from.
#[derive(Clone, Copy)]
enum AttributeFamily {
    Authored,
    Computed,
}

/// The cached attribute collection: one child per descriptor, enumerated
/// across every interpolation at build time.
struct AttributesContainer {
    entries: Vec<(Name, ContainerHandle)>,
}

impl AttributesContainer {
    fn build(path: &ScenePath, query: &Query, family: AttributeFamily) -> Self {
        let mut entries: Vec<(Name, ContainerHandle)> = Vec::new();
        for interpolation in Interpolation::ALL {
            let descriptors = match family {
                AttributeFamily::Authored => query.attribute_descriptors(path, interpolation),
                AttributeFamily::Computed => {
                    query.computed_attribute_descriptors(path, interpolation)
                }
            };
            for descriptor in descriptors {
                let container: ContainerHandle = Arc::new(AttributeEntryContainer {
                    path: path.clone(),
                    name: descriptor.name.clone(),
                    interpolation: descriptor.interpolation,
                    role: descriptor.role,
                    indexed: descriptor.indexed,
                    query: Arc::clone(query),
                });
                entries.push((descriptor.name, container));
            }
        }
        Self { entries }
    }
}

impl ContainerSource for AttributesContainer {
    fn names(&self) -> Vec<Name> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.as_str() == name)
            .map(|(_, container)| DataSourceHandle::Container(Arc::clone(container)))
    }
}

// -- Instancer topology --

struct InstanceIndicesContainer {
    indices: Vec<Arc<[i32]>>,
}

impl ContainerSource for InstanceIndicesContainer {
    fn names(&self) -> Vec<Name> {
        (0..self.indices.len())
            .map(|i| Name::from(i.to_string()))
            .collect()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        let slot: usize = name.parse().ok()?;
        let indices = self.indices.get(slot)?;
        Some(DataSourceHandle::Value(RetainedValue::new(Value::IntArray(
            Arc::clone(indices),
        ))))
    }
}

/// The cached instancer topology region.
struct InstancerTopologyContainer {
    topology: InstancerTopology,
}

impl InstancerTopologyContainer {
    fn build(path: &ScenePath, query: &Query) -> Self {
        Self {
            topology: query.instancer_topology(path),
        }
    }
}

impl ContainerSource for InstancerTopologyContainer {
    fn names(&self) -> Vec<Name> {
        vec![
            Name::new(token::PROTOTYPES),
            Name::new(token::INSTANCE_INDICES),
        ]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::PROTOTYPES => Some(DataSourceHandle::Value(RetainedValue::new(
                Value::PathArray(self.topology.prototypes.clone().into()),
            ))),
            token::INSTANCE_INDICES => Some(DataSourceHandle::Container(Arc::new(
                InstanceIndicesContainer {
                    indices: self.topology.instance_indices.clone(),
                },
            ))),
            _ => None,
        }
    }
}

// -- Camera and light parameters --

/// Reads one camera parameter, adapting the representations that differ
/// between the two schemas: the projection enum becomes its token form and
/// the clipping range becomes a 2-vector.
struct CameraParamSource {
    path: ScenePath,
    name: Name,
    query: Query,
}

impl ValueSource for CameraParamSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        match self.name.as_str() {
            token::PROJECTION => Some(Value::from(
                self.query.camera_projection(&self.path).as_token(),
            )),
            token::CLIPPING_RANGE => Some(Value::Vec2(
                self.query.camera_clipping_range(&self.path).to_vec2(),
            )),
            name => self.query.camera_param(&self.path, name),
        }
    }
}

struct CameraContainer {
    path: ScenePath,
    query: Query,
}

impl ContainerSource for CameraContainer {
    fn names(&self) -> Vec<Name> {
        vec![Name::new(token::PROJECTION), Name::new(token::CLIPPING_RANGE)]
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        Some(DataSourceHandle::Value(Arc::new(CameraParamSource {
            path: self.path.clone(),
            name: Name::new(name),
            query: Arc::clone(&self.query),
        })))
    }
}

struct LightParamSource {
    path: ScenePath,
    name: Name,
    query: Query,
}

impl ValueSource for LightParamSource {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        self.query.light_param(&self.path, &self.name)
    }
}

struct LightContainer {
    path: ScenePath,
    query: Query,
}

impl ContainerSource for LightContainer {
    fn names(&self) -> Vec<Name> {
        // Light parameters are not enumerable through the flat interface;
        // consumers ask for the names they know.
        Vec::new()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        Some(DataSourceHandle::Value(Arc::new(LightParamSource {
            path: self.path.clone(),
            name: Name::new(name),
            query: Arc::clone(&self.query),
        })))
    }
}

// -- The prim-level source --

/// A hierarchical view over one flat-interface object.
pub struct QueryPrimSource {
    path: ScenePath,
    type_tag: Name,
    query: Query,
    attributes: ArcSwapOption<AttributesContainer>,
    attributes_built: AtomicBool,
    computed_attributes: ArcSwapOption<AttributesContainer>,
    computed_built: AtomicBool,
    instancer_topology: ArcSwapOption<InstancerTopologyContainer>,
}

impl std::fmt::Debug for QueryPrimSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPrimSource")
            .field("path", &self.path)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}

impl QueryPrimSource {
    /// Creates the tree view for one object.
    #[must_use]
    pub fn new(path: ScenePath, type_tag: Name, query: Arc<dyn SceneQuery>) -> Arc<Self> {
        Arc::new(Self {
            path,
            type_tag,
            query,
            attributes: ArcSwapOption::empty(),
            attributes_built: AtomicBool::new(false),
            computed_attributes: ArcSwapOption::empty(),
            computed_built: AtomicBool::new(false),
            instancer_topology: ArcSwapOption::empty(),
        })
    }

    /// The sole invalidation entry point: clears the cached sub-trees the
    /// incoming locators intersect. Locators outside
    /// [`cached_locators`](Self::cached_locators) are ignored — those
    /// regions are re-read from the query interface on every `get`.
    pub fn prim_dirtied(&self, locators: &LocatorSet) {
        if locators.intersects(&schema::attributes()) {
            self.attributes_built.store(false, Ordering::Release);
            self.computed_built.store(false, Ordering::Release);
            self.attributes.store(None);
            self.computed_attributes.store(None);
        }
        if locators.intersects(&schema::instancer_topology()) {
            self.instancer_topology.store(None);
        }
    }

    /// Exactly the locators [`prim_dirtied`](Self::prim_dirtied) responds
    /// to, so callers can skip notifying for anything else.
    #[must_use]
    pub fn cached_locators() -> LocatorSet {
        [schema::attributes(), schema::instancer_topology()]
            .into_iter()
            .collect()
    }

    /// The object's path.
    #[must_use]
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// The object's type tag.
    #[must_use]
    pub fn type_tag(&self) -> &Name {
        &self.type_tag
    }

    fn attributes_container(&self) -> ContainerHandle {
        if self.attributes_built.load(Ordering::Acquire) {
            if let Some(container) = self.attributes.load_full() {
                return container;
            }
        }
        let built = Arc::new(AttributesContainer::build(
            &self.path,
            &self.query,
            AttributeFamily::Authored,
        ));
        self.attributes.store(Some(Arc::clone(&built)));
        self.attributes_built.store(true, Ordering::Release);
        built
    }

    fn computed_attributes_container(&self) -> ContainerHandle {
        if self.computed_built.load(Ordering::Acquire) {
            if let Some(container) = self.computed_attributes.load_full() {
                return container;
            }
        }
        let built = Arc::new(AttributesContainer::build(
            &self.path,
            &self.query,
            AttributeFamily::Computed,
        ));
        self.computed_attributes.store(Some(Arc::clone(&built)));
        self.computed_built.store(true, Ordering::Release);
        built
    }

    fn instancer_topology_container(&self) -> ContainerHandle {
        if let Some(container) = self.instancer_topology.load_full() {
            return container;
        }
        let built = Arc::new(InstancerTopologyContainer::build(&self.path, &self.query));
        self.instancer_topology.store(Some(Arc::clone(&built)));
        built
    }

    fn is_geometry(&self) -> bool {
        matches!(
            self.type_tag.as_str(),
            type_tag::MESH
                | type_tag::CURVES
                | type_tag::POINTS
                | type_tag::CUBE
                | type_tag::SPHERE
                | type_tag::VOLUME
        )
    }

    fn extent_container(&self) -> Option<ContainerHandle> {
        let extent = self.query.extent(&self.path)?;
        Some(
            RetainedContainer::builder()
                .value(token::MIN, Value::Vec3(extent.min))
                .value(token::MAX, Value::Vec3(extent.max))
                .build(),
        )
    }

    fn material_bindings_container(&self) -> Option<ContainerHandle> {
        let binding = self.query.material_binding(&self.path)?;
        Some(
            RetainedContainer::builder()
                .value(token::BINDING, binding)
                .build(),
        )
    }
}

impl ContainerSource for QueryPrimSource {
    fn names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        match self.type_tag.as_str() {
            type_tag::MESH => names.push(Name::new(token::MESH)),
            type_tag::CURVES => names.push(Name::new(token::CURVES)),
            type_tag::CAMERA => names.push(Name::new(token::CAMERA)),
            type_tag::INSTANCER => names.push(Name::new(token::INSTANCER_TOPOLOGY)),
            tag if is_light_type(tag) => names.push(Name::new(token::LIGHT)),
            _ => {}
        }
        // Every object can advertise attributes; that is the only channel
        // for callers to discover what is authored.
        names.push(Name::new(token::ATTRIBUTES));
        if self.is_geometry() {
            names.extend([
                Name::new(token::CATEGORIES),
                Name::new(token::COMPUTED_ATTRIBUTES),
                Name::new(token::DISPLAY_STYLE),
                Name::new(token::EXTENT),
                Name::new(token::INSTANCED_BY),
                Name::new(token::MATERIAL_BINDINGS),
                Name::new(token::PURPOSE),
            ]);
        }
        if is_light_type(&self.type_tag) {
            names.push(Name::new(token::MATERIAL_BINDINGS));
        }
        names.extend([Name::new(token::VISIBILITY), Name::new(token::XFORM)]);
        names
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        match name {
            token::ATTRIBUTES => Some(DataSourceHandle::Container(self.attributes_container())),
            token::COMPUTED_ATTRIBUTES => Some(DataSourceHandle::Container(
                self.computed_attributes_container(),
            )),
            token::MESH if self.type_tag == type_tag::MESH => {
                Some(DataSourceHandle::Container(Arc::new(MeshContainer {
                    store: MeshTopologyStore::new(self.path.clone(), Arc::clone(&self.query)),
                })))
            }
            token::CURVES if self.type_tag == type_tag::CURVES => {
                Some(DataSourceHandle::Container(Arc::new(CurveContainer {
                    store: CurveTopologyStore::new(self.path.clone(), Arc::clone(&self.query)),
                })))
            }
            token::CAMERA if self.type_tag == type_tag::CAMERA => {
                Some(DataSourceHandle::Container(Arc::new(CameraContainer {
                    path: self.path.clone(),
                    query: Arc::clone(&self.query),
                })))
            }
            token::LIGHT if is_light_type(&self.type_tag) => {
                Some(DataSourceHandle::Container(Arc::new(LightContainer {
                    path: self.path.clone(),
                    query: Arc::clone(&self.query),
                })))
            }
            token::INSTANCER_TOPOLOGY if self.type_tag == type_tag::INSTANCER => Some(
                DataSourceHandle::Container(self.instancer_topology_container()),
            ),
            token::CATEGORIES => {
                let included = self.query.categories(&self.path);
                Some(DataSourceHandle::Container(
                    RetainedContainer::builder()
                        .value(token::INCLUDED, included)
                        .build(),
                ))
            }
            token::DISPLAY_STYLE => Some(DataSourceHandle::Container(Arc::new(GetKeyContainer {
                path: self.path.clone(),
                names: vec![Name::new(token::CULL_STYLE), Name::new(token::REPR)],
                query: Arc::clone(&self.query),
            }))),
            token::EXTENT => self.extent_container().map(DataSourceHandle::Container),
            token::MATERIAL_BINDINGS => self
                .material_bindings_container()
                .map(DataSourceHandle::Container),
            token::PURPOSE => Some(DataSourceHandle::Container(
                RetainedContainer::builder()
                    .value(token::PURPOSE, self.query.render_tag(&self.path))
                    .build(),
            )),
            token::VISIBILITY => Some(DataSourceHandle::Container(
                RetainedContainer::builder()
                    .value(token::VISIBILITY, self.query.visible(&self.path))
                    .build(),
            )),
            token::XFORM => Some(DataSourceHandle::Container(
                RetainedContainer::builder()
                    .value(token::MATRIX, self.query.transform(&self.path))
                    .build(),
            )),
            _ => None,
        }
    }
}
