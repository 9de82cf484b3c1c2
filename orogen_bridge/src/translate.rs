// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional translation between dirty-bit fields and locator sets.
//!
//! The forward functions map `(type tag, bits)` to the locators of the
//! changed regions; the inverse functions recover bits from a locator set.
//! Both directions walk the schema regions in the same fixed ascending
//! order (see [`orogen_core::schema`]), which lets the inverse resolve an
//! entire sorted set with one forward-moving cursor.
//!
//! Sentinels are uniform across categories: a bit field equal to
//! `ALL_DIRTY` forward-translates to the empty-locator singleton, and a set
//! whose first element is the empty locator inverse-translates to
//! `ALL_DIRTY`. Callers must check the sentinel first — it subsumes every
//! other bit.
//!
//! Bits with no defined locator (geometry `PRIM_ID`) are dropped by the
//! forward map. This asymmetry is intentional; do not invent a catch-all
//! locator for them.
//!
//! State-category translation is extensible through an injectable
//! [`TranslatorRegistry`]. Unregistered unknown type tags translate
//! maximally conservatively: any non-empty bit field maps to the wildcard
//! locator and any intersecting locator maps to `ALL_DIRTY`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use orogen_core::dirty::{GeometryDirty, InstancerDirty, ResourceDirty, StateDirty};
use orogen_core::locator::{Locator, LocatorSet};
use orogen_core::path::Name;
use orogen_core::schema;

use crate::registry::type_tag;

/// Custom forward translation: bits in, locators appended to the set.
pub type ToLocatorsFn = Arc<dyn Fn(StateDirty, &mut LocatorSet) + Send + Sync>;

/// Custom inverse translation: locator set in, bits out.
pub type ToBitsFn = Arc<dyn Fn(&LocatorSet) -> StateDirty + Send + Sync>;

#[derive(Clone)]
struct CustomTranslator {
    to_locators: ToLocatorsFn,
    to_bits: ToBitsFn,
}

/// Registry of caller-supplied translations for custom State type tags.
///
/// Owned by whichever component composes the translator and passed by
/// reference to every call site — deliberately not a process-wide static.
/// The contract is append-only: the last registration for a tag wins and
/// there is no unregister.
#[derive(Default)]
pub struct TranslatorRegistry {
    entries: RwLock<HashMap<Name, CustomTranslator>>,
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<Name> = self.entries.read().keys().cloned().collect();
        tags.sort();
        f.debug_struct("TranslatorRegistry")
            .field("tags", &tags)
            .finish()
    }
}

impl TranslatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the translation pair for `tag`, replacing any previous one.
    pub fn register(
        &self,
        tag: impl Into<Name>,
        to_locators: impl Fn(StateDirty, &mut LocatorSet) + Send + Sync + 'static,
        to_bits: impl Fn(&LocatorSet) -> StateDirty + Send + Sync + 'static,
    ) {
        self.entries.write().insert(
            tag.into(),
            CustomTranslator {
                to_locators: Arc::new(to_locators),
                to_bits: Arc::new(to_bits),
            },
        );
    }

    fn lookup(&self, tag: &str) -> Option<CustomTranslator> {
        self.entries.read().get(tag).cloned()
    }
}

/// Advances `cursor` through the sorted `set`, looking for elements that
/// intersect `target`.
///
/// With `advance_to_next`, the cursor ends on the first element that is
/// greater than `target` and not an extension of it, and the return value
/// says whether any skipped element intersected. Without it, the cursor
/// stops on the first intersecting element so the caller can walk the
/// target's sub-locators itself.
///
/// Targets must be probed in ascending order or the scan misses elements;
/// this is the invariant the fixed aspect order exists for.
fn find_locator(
    target: &Locator,
    set: &LocatorSet,
    cursor: &mut usize,
    advance_to_next: bool,
) -> bool {
    let items = set.as_slice();
    let mut found = false;
    while let Some(item) = items.get(*cursor) {
        if item.intersects(target) {
            found = true;
            if !advance_to_next {
                break;
            }
        } else if target < item {
            break;
        }
        *cursor += 1;
    }
    found
}

/// Returns whether `tag` names a light type.
#[must_use]
pub fn is_light_type(tag: &str) -> bool {
    matches!(
        tag,
        type_tag::CYLINDER_LIGHT
            | type_tag::DISK_LIGHT
            | type_tag::DISTANT_LIGHT
            | type_tag::DOME_LIGHT
            | type_tag::RECT_LIGHT
            | type_tag::SPHERE_LIGHT
    )
}

// -- Geometry --

/// Maps geometry dirty bits to the locators of the changed regions.
pub fn geometry_dirty_bits_to_locators(
    tag: &str,
    bits: GeometryDirty,
    set: &mut LocatorSet,
) {
    if bits == GeometryDirty::ALL_DIRTY {
        set.insert(Locator::empty());
        return;
    }

    // Appends run in ascending locator order so the set never has to
    // shuffle; keep additions sorted by locator name, matching the inverse.

    if bits.intersects(GeometryDirty::PRIMVAR) {
        set.insert(schema::attributes());
    } else {
        if bits.intersects(GeometryDirty::NORMALS) {
            set.insert(schema::normals());
        }
        if bits.intersects(GeometryDirty::POINTS) {
            set.insert(schema::points());
        }
        if bits.intersects(GeometryDirty::WIDTHS) {
            set.insert(schema::widths());
        }
    }

    if bits.intersects(GeometryDirty::CATEGORIES) {
        set.insert(schema::categories());
    }

    if bits.intersects(GeometryDirty::PRIMVAR) {
        set.insert(schema::computed_attributes());
    }

    if tag == type_tag::CUBE && bits.intersects(GeometryDirty::PRIMVAR) {
        set.insert(schema::cube());
    }

    if tag == type_tag::CURVES && bits.intersects(GeometryDirty::TOPOLOGY) {
        set.insert(schema::curve_topology());
    }

    if bits.intersects(GeometryDirty::DISPLAY_STYLE) {
        set.insert(schema::display_style());
    } else {
        if bits.intersects(GeometryDirty::CULL_STYLE) {
            set.insert(schema::cull_style());
        }
        if bits.intersects(GeometryDirty::REPR) {
            set.insert(schema::repr());
        }
    }

    if bits.intersects(GeometryDirty::EXTENT) {
        set.insert(schema::extent());
    }

    if bits.intersects(GeometryDirty::INSTANCER) {
        set.insert(schema::instanced_by());
    }

    if bits.intersects(GeometryDirty::INSTANCE_INDEX) {
        set.insert(schema::instancer_topology());
    }

    if bits.intersects(GeometryDirty::MATERIAL_ID) {
        set.insert(schema::material_bindings());
    }

    if tag == type_tag::MESH {
        if bits.intersects(GeometryDirty::DOUBLE_SIDED) {
            set.insert(schema::mesh_double_sided());
        }
        if bits.intersects(GeometryDirty::TOPOLOGY) {
            set.insert(schema::mesh_subdivision_scheme());
        }
        if bits.intersects(GeometryDirty::SUBDIV_TAGS) {
            set.insert(schema::mesh_subdivision_tags());
        }
        if bits.intersects(GeometryDirty::TOPOLOGY) {
            set.insert(schema::mesh_topology());
        }
    }

    if bits.intersects(GeometryDirty::RENDER_TAG) {
        set.insert(schema::purpose());
    }

    if tag == type_tag::SPHERE && bits.intersects(GeometryDirty::PRIMVAR) {
        set.insert(schema::sphere());
    }

    if bits.intersects(GeometryDirty::VISIBILITY) {
        set.insert(schema::visibility());
    }

    if bits.intersects(GeometryDirty::VOLUME_FIELD) {
        set.insert(schema::volume_field_binding());
    }

    if bits.intersects(GeometryDirty::TRANSFORM) {
        set.insert(schema::xform());
    }
}

/// Recovers geometry dirty bits from a locator set.
#[must_use]
pub fn geometry_locators_to_dirty_bits(tag: &str, set: &LocatorSet) -> GeometryDirty {
    let items = set.as_slice();
    let Some(first) = items.first() else {
        return GeometryDirty::CLEAN;
    };
    // The empty locator subsumes the set; nothing else can be present.
    if first.is_empty() {
        return GeometryDirty::ALL_DIRTY;
    }

    let mut bits = GeometryDirty::CLEAN;
    let mut cursor = 0;

    // Probes run in the same ascending order as the forward map; each
    // find_locator call resumes where the previous one left the cursor.

    // attributes: one parent region covering four bits. A prefix of the
    // region marks everything; otherwise the intersecting children are
    // walked to disambiguate, making sure `attributes/points` maps to
    // POINTS alone rather than PRIMVAR.
    let attributes = schema::attributes();
    if find_locator(&attributes, set, &mut cursor, false) {
        if attributes.has_prefix(&items[cursor]) {
            bits |= GeometryDirty::PRIMVAR
                | GeometryDirty::NORMALS
                | GeometryDirty::POINTS
                | GeometryDirty::WIDTHS;
        } else {
            loop {
                let item = &items[cursor];
                if item.has_prefix(&schema::normals()) {
                    bits |= GeometryDirty::NORMALS;
                } else if item.has_prefix(&schema::points()) {
                    bits |= GeometryDirty::POINTS;
                } else if item.has_prefix(&schema::widths()) {
                    bits |= GeometryDirty::WIDTHS;
                } else {
                    bits |= GeometryDirty::PRIMVAR;
                }
                cursor += 1;
                if items.get(cursor).is_none_or(|next| !next.intersects(&attributes)) {
                    break;
                }
            }
        }
    }

    if find_locator(&schema::categories(), set, &mut cursor, true) {
        bits |= GeometryDirty::CATEGORIES;
    }

    if find_locator(&schema::computed_attributes(), set, &mut cursor, true) {
        bits |= GeometryDirty::PRIMVAR;
    }

    if tag == type_tag::CUBE && find_locator(&schema::cube(), set, &mut cursor, true) {
        bits |= GeometryDirty::PRIMVAR;
    }

    if tag == type_tag::CURVES
        && find_locator(&schema::curve_topology(), set, &mut cursor, true)
    {
        bits |= GeometryDirty::TOPOLOGY;
    }

    // displayStyle: parent region with two named sub-bits.
    let display_style = schema::display_style();
    if find_locator(&display_style, set, &mut cursor, false) {
        if display_style.has_prefix(&items[cursor]) {
            bits |= GeometryDirty::DISPLAY_STYLE
                | GeometryDirty::CULL_STYLE
                | GeometryDirty::REPR;
        } else {
            loop {
                let item = &items[cursor];
                if item.has_prefix(&schema::cull_style()) {
                    bits |= GeometryDirty::CULL_STYLE;
                } else if item.has_prefix(&schema::repr()) {
                    bits |= GeometryDirty::REPR;
                } else {
                    bits |= GeometryDirty::DISPLAY_STYLE;
                }
                cursor += 1;
                if items
                    .get(cursor)
                    .is_none_or(|next| !next.intersects(&display_style))
                {
                    break;
                }
            }
        }
    }

    if find_locator(&schema::extent(), set, &mut cursor, true) {
        bits |= GeometryDirty::EXTENT;
    }

    if find_locator(&schema::instanced_by(), set, &mut cursor, true) {
        bits |= GeometryDirty::INSTANCER;
    }

    if find_locator(&schema::instancer_topology(), set, &mut cursor, true) {
        bits |= GeometryDirty::INSTANCE_INDEX;
    }

    if find_locator(&schema::material_bindings(), set, &mut cursor, true) {
        bits |= GeometryDirty::MATERIAL_ID;
    }

    // mesh: parent region with four named sub-regions; the bare `mesh`
    // locator must light all of them up.
    if tag == type_tag::MESH {
        let mesh = schema::mesh();
        if find_locator(&mesh, set, &mut cursor, false) {
            if mesh.has_prefix(&items[cursor]) {
                bits |= GeometryDirty::DOUBLE_SIDED
                    | GeometryDirty::SUBDIV_TAGS
                    | GeometryDirty::TOPOLOGY;
            } else {
                loop {
                    let item = &items[cursor];
                    if item.has_prefix(&schema::mesh_double_sided()) {
                        bits |= GeometryDirty::DOUBLE_SIDED;
                    } else if item.has_prefix(&schema::mesh_subdivision_tags()) {
                        bits |= GeometryDirty::SUBDIV_TAGS;
                    } else {
                        // subdivisionScheme, topology, and unknown mesh
                        // fields all invalidate topology.
                        bits |= GeometryDirty::TOPOLOGY;
                    }
                    cursor += 1;
                    if items.get(cursor).is_none_or(|next| !next.intersects(&mesh)) {
                        break;
                    }
                }
            }
        }
    }

    if find_locator(&schema::purpose(), set, &mut cursor, true) {
        bits |= GeometryDirty::RENDER_TAG;
    }

    if tag == type_tag::SPHERE && find_locator(&schema::sphere(), set, &mut cursor, true) {
        bits |= GeometryDirty::PRIMVAR;
    }

    if find_locator(&schema::visibility(), set, &mut cursor, true) {
        bits |= GeometryDirty::VISIBILITY;
    }

    if find_locator(&schema::volume_field_binding(), set, &mut cursor, true) {
        bits |= GeometryDirty::VOLUME_FIELD;
    }

    if find_locator(&schema::xform(), set, &mut cursor, true) {
        bits |= GeometryDirty::TRANSFORM;
    }

    bits
}

// -- State --

/// Maps state dirty bits to the locators of the changed regions.
///
/// Unknown type tags consult `registry`; unregistered tags translate any
/// non-empty field to the wildcard locator.
pub fn state_dirty_bits_to_locators(
    registry: &TranslatorRegistry,
    tag: &str,
    bits: StateDirty,
    set: &mut LocatorSet,
) {
    if bits == StateDirty::ALL_DIRTY {
        set.insert(Locator::empty());
        return;
    }

    if tag == type_tag::MATERIAL {
        if bits.intersects(StateDirty::RESOURCE | StateDirty::PARAMS) {
            set.insert(schema::material());
        }
    } else if tag == type_tag::CAMERA {
        if bits.intersects(
            StateDirty::PARAMS | StateDirty::WINDOW_POLICY | StateDirty::CLIP_PLANES,
        ) {
            set.insert(schema::camera());
        }
        if bits.intersects(StateDirty::TRANSFORM) {
            set.insert(schema::xform());
        }
    } else if is_light_type(tag) {
        if bits.intersects(StateDirty::PARAMS) {
            set.insert(schema::attributes());
        }
        if bits.intersects(StateDirty::INSTANCER) {
            set.insert(schema::instanced_by());
        }
        if bits.intersects(
            StateDirty::PARAMS | StateDirty::SHADOW_PARAMS | StateDirty::COLLECTION,
        ) {
            set.insert(schema::light());
        }
        if bits.intersects(StateDirty::RESOURCE) {
            set.insert(schema::material());
        }
        if bits.intersects(StateDirty::PARAMS | StateDirty::VISIBILITY) {
            set.insert(schema::visibility());
        }
        if bits.intersects(StateDirty::TRANSFORM) {
            set.insert(schema::xform());
        }
    } else if let Some(custom) = registry.lookup(tag) {
        (custom.to_locators)(bits, set);
    } else if bits.is_dirty() {
        // Unknown type: invalidate everything rather than guess.
        set.insert(Locator::empty());
    }
}

/// Recovers state dirty bits from a locator set.
#[must_use]
pub fn state_locators_to_dirty_bits(
    registry: &TranslatorRegistry,
    tag: &str,
    set: &LocatorSet,
) -> StateDirty {
    let items = set.as_slice();
    let Some(first) = items.first() else {
        return StateDirty::CLEAN;
    };
    if first.is_empty() {
        return StateDirty::ALL_DIRTY;
    }

    let mut bits = StateDirty::CLEAN;
    let mut cursor = 0;

    if tag == type_tag::MATERIAL {
        if find_locator(&schema::material(), set, &mut cursor, true) {
            bits |= StateDirty::RESOURCE | StateDirty::PARAMS;
        }
    } else if tag == type_tag::CAMERA {
        if find_locator(&schema::camera(), set, &mut cursor, true) {
            bits |= StateDirty::PARAMS | StateDirty::WINDOW_POLICY | StateDirty::CLIP_PLANES;
        }
        if find_locator(&schema::xform(), set, &mut cursor, true) {
            bits |= StateDirty::TRANSFORM;
        }
    } else if is_light_type(tag) {
        if find_locator(&schema::attributes(), set, &mut cursor, true) {
            bits |= StateDirty::PARAMS;
        }
        if find_locator(&schema::instanced_by(), set, &mut cursor, true) {
            bits |= StateDirty::INSTANCER;
        }
        if find_locator(&schema::light(), set, &mut cursor, true) {
            bits |= StateDirty::PARAMS | StateDirty::SHADOW_PARAMS | StateDirty::COLLECTION;
        }
        if find_locator(&schema::material(), set, &mut cursor, true) {
            bits |= StateDirty::RESOURCE;
        }
        if find_locator(&schema::visibility(), set, &mut cursor, true) {
            bits |= StateDirty::PARAMS;
        }
        if find_locator(&schema::xform(), set, &mut cursor, true) {
            bits |= StateDirty::TRANSFORM;
        }
    } else if let Some(custom) = registry.lookup(tag) {
        bits = (custom.to_bits)(set);
    } else {
        // Unknown type: any intersection means fully dirty.
        bits = StateDirty::ALL_DIRTY;
    }

    bits
}

// -- Resource --

/// Maps resource dirty bits to the locators of the changed regions.
pub fn resource_dirty_bits_to_locators(
    tag: &str,
    bits: ResourceDirty,
    set: &mut LocatorSet,
) {
    if bits == ResourceDirty::ALL_DIRTY {
        set.insert(Locator::empty());
        return;
    }

    if tag == type_tag::RENDER_BUFFER {
        if bits.intersects(ResourceDirty::DESCRIPTION) {
            set.insert(schema::render_buffer());
        }
    } else if tag == type_tag::RENDER_SETTINGS {
        if bits.intersects(ResourceDirty::ACTIVE) {
            set.insert(schema::render_settings_active());
        }
        if bits.intersects(ResourceDirty::COLOR_SPACE) {
            set.insert(schema::render_settings_color_space());
        }
        if bits.intersects(ResourceDirty::PRODUCTS) {
            set.insert(schema::render_settings_products());
        }
    } else if tag == type_tag::FIELD && bits.intersects(ResourceDirty::PARAMS) {
        set.insert(schema::volume_field());
    }
}

/// Recovers resource dirty bits from a locator set.
#[must_use]
pub fn resource_locators_to_dirty_bits(tag: &str, set: &LocatorSet) -> ResourceDirty {
    let items = set.as_slice();
    let Some(first) = items.first() else {
        return ResourceDirty::CLEAN;
    };
    if first.is_empty() {
        return ResourceDirty::ALL_DIRTY;
    }

    let mut bits = ResourceDirty::CLEAN;
    let mut cursor = 0;

    if tag == type_tag::RENDER_BUFFER {
        if find_locator(&schema::render_buffer(), set, &mut cursor, true) {
            bits |= ResourceDirty::DESCRIPTION;
        }
    } else if tag == type_tag::RENDER_SETTINGS {
        if find_locator(&schema::render_settings_active(), set, &mut cursor, true) {
            bits |= ResourceDirty::ACTIVE;
        }
        if find_locator(&schema::render_settings_color_space(), set, &mut cursor, true) {
            bits |= ResourceDirty::COLOR_SPACE;
        }
        if find_locator(&schema::render_settings_products(), set, &mut cursor, true) {
            bits |= ResourceDirty::PRODUCTS;
        }
    } else if tag == type_tag::FIELD
        && find_locator(&schema::volume_field(), set, &mut cursor, true)
    {
        bits |= ResourceDirty::PARAMS;
    }

    bits
}

// -- Instancer --

/// Maps instancer dirty bits to the locators of the changed regions.
pub fn instancer_dirty_bits_to_locators(bits: InstancerDirty, set: &mut LocatorSet) {
    if bits == InstancerDirty::ALL_DIRTY {
        set.insert(Locator::empty());
        return;
    }

    if bits.intersects(InstancerDirty::PRIMVAR) {
        set.insert(schema::attributes());
    }
    if bits.intersects(InstancerDirty::INSTANCER) {
        set.insert(schema::instanced_by());
    }
    if bits.intersects(InstancerDirty::INSTANCE_INDEX) {
        set.insert(schema::instancer_topology());
    }
    if bits.intersects(InstancerDirty::TRANSFORM) {
        set.insert(schema::xform());
    }
}

/// Recovers instancer dirty bits from a locator set.
#[must_use]
pub fn instancer_locators_to_dirty_bits(set: &LocatorSet) -> InstancerDirty {
    let items = set.as_slice();
    let Some(first) = items.first() else {
        return InstancerDirty::CLEAN;
    };
    if first.is_empty() {
        return InstancerDirty::ALL_DIRTY;
    }

    let mut bits = InstancerDirty::CLEAN;
    let mut cursor = 0;

    if find_locator(&schema::attributes(), set, &mut cursor, true) {
        bits |= InstancerDirty::PRIMVAR;
    }
    if find_locator(&schema::instanced_by(), set, &mut cursor, true) {
        bits |= InstancerDirty::INSTANCER;
    }
    if find_locator(&schema::instancer_topology(), set, &mut cursor, true) {
        bits |= InstancerDirty::INSTANCE_INDEX;
    }
    if find_locator(&schema::xform(), set, &mut cursor, true) {
        bits |= InstancerDirty::TRANSFORM;
    }

    bits
}
