// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The locator naming convention: one canonical locator per schema-defined
//! data region, sub-regions by appending a segment.
//!
//! # Fixed aspect order
//!
//! Both translation directions walk the regions in the same fixed order —
//! ascending locator order — so that the inverse direction can resolve an
//! entire locator set with a single forward-moving cursor. The geometry
//! scan order is:
//!
//! ```text
//! attributes (normals, points, widths)
//! categories
//! computedAttributes
//! cube
//! curves/topology
//! displayStyle (cullStyle, repr)
//! extent
//! instancedBy
//! instancerTopology
//! materialBindings
//! mesh (doubleSided, subdivisionScheme, subdivisionTags, topology)
//! purpose
//! sphere
//! visibility
//! volumeFieldBinding
//! xform
//! ```
//!
//! When adding a region, keep every translation function sorted by locator
//! name or the single-pass scan stops being exhaustive.

use crate::locator::Locator;

/// Region and field name tokens.
pub mod token {
    /// Attribute collection region.
    pub const ATTRIBUTES: &str = "attributes";
    /// Camera parameter region.
    pub const CAMERA: &str = "camera";
    /// Category membership region.
    pub const CATEGORIES: &str = "categories";
    /// Computed attribute collection region.
    pub const COMPUTED_ATTRIBUTES: &str = "computedAttributes";
    /// Implicit cube region.
    pub const CUBE: &str = "cube";
    /// Curve region.
    pub const CURVES: &str = "curves";
    /// Display style region.
    pub const DISPLAY_STYLE: &str = "displayStyle";
    /// Extent region.
    pub const EXTENT: &str = "extent";
    /// Instancing parent region.
    pub const INSTANCED_BY: &str = "instancedBy";
    /// Instancer topology region.
    pub const INSTANCER_TOPOLOGY: &str = "instancerTopology";
    /// Light parameter region.
    pub const LIGHT: &str = "light";
    /// Material network region.
    pub const MATERIAL: &str = "material";
    /// Material binding region.
    pub const MATERIAL_BINDINGS: &str = "materialBindings";
    /// Mesh region.
    pub const MESH: &str = "mesh";
    /// Purpose (render tag) region.
    pub const PURPOSE: &str = "purpose";
    /// Render buffer region.
    pub const RENDER_BUFFER: &str = "renderBuffer";
    /// Render settings region.
    pub const RENDER_SETTINGS: &str = "renderSettings";
    /// Implicit sphere region.
    pub const SPHERE: &str = "sphere";
    /// Visibility region.
    pub const VISIBILITY: &str = "visibility";
    /// Volume field region.
    pub const VOLUME_FIELD: &str = "volumeField";
    /// Volume field binding region.
    pub const VOLUME_FIELD_BINDING: &str = "volumeFieldBinding";
    /// Transform region.
    pub const XFORM: &str = "xform";

    /// Points attribute name.
    pub const POINTS: &str = "points";
    /// Normals attribute name.
    pub const NORMALS: &str = "normals";
    /// Widths attribute name.
    pub const WIDTHS: &str = "widths";
    /// Attribute value field.
    pub const VALUE: &str = "value";
    /// Attribute interpolation field.
    pub const INTERPOLATION: &str = "interpolation";
    /// Attribute role field.
    pub const ROLE: &str = "role";
    /// Attribute index-array field.
    pub const INDICES: &str = "indices";

    /// Cull style field of the display style region.
    pub const CULL_STYLE: &str = "cullStyle";
    /// Representation selector field of the display style region.
    pub const REPR: &str = "repr";

    /// Double-sided field of the mesh region.
    pub const DOUBLE_SIDED: &str = "doubleSided";
    /// Subdivision scheme field of the mesh region.
    pub const SUBDIVISION_SCHEME: &str = "subdivisionScheme";
    /// Subdivision tags field of the mesh region.
    pub const SUBDIVISION_TAGS: &str = "subdivisionTags";
    /// Topology field of the mesh and curve regions.
    pub const TOPOLOGY: &str = "topology";
    /// Face vertex counts field.
    pub const FACE_VERTEX_COUNTS: &str = "faceVertexCounts";
    /// Face vertex indices field.
    pub const FACE_VERTEX_INDICES: &str = "faceVertexIndices";
    /// Hole indices field.
    pub const HOLE_INDICES: &str = "holeIndices";
    /// Orientation field.
    pub const ORIENTATION: &str = "orientation";
    /// Curve type field.
    pub const CURVE_TYPE: &str = "type";
    /// Curve basis field.
    pub const BASIS: &str = "basis";
    /// Curve wrap field.
    pub const WRAP: &str = "wrap";
    /// Curve vertex counts field.
    pub const CURVE_VERTEX_COUNTS: &str = "curveVertexCounts";
    /// Curve indices field.
    pub const CURVE_INDICES: &str = "curveIndices";

    /// Prototype list field of the instancer topology region.
    pub const PROTOTYPES: &str = "prototypes";
    /// Instance index field of the instancer topology region.
    pub const INSTANCE_INDICES: &str = "instanceIndices";

    /// Binding field of the material bindings region.
    pub const BINDING: &str = "binding";
    /// Included names field of the categories region.
    pub const INCLUDED: &str = "included";
    /// Matrix field of the transform region.
    pub const MATRIX: &str = "matrix";
    /// Minimum corner field of the extent region.
    pub const MIN: &str = "min";
    /// Maximum corner field of the extent region.
    pub const MAX: &str = "max";

    /// Projection camera parameter.
    pub const PROJECTION: &str = "projection";
    /// Clipping range camera parameter.
    pub const CLIPPING_RANGE: &str = "clippingRange";

    /// Active field of the render settings region.
    pub const ACTIVE: &str = "active";
    /// Color space field of the render settings region.
    pub const COLOR_SPACE: &str = "colorSpace";
    /// Products field of the render settings region.
    pub const PRODUCTS: &str = "products";

    /// Fallback purpose token.
    pub const DEFAULT_PURPOSE: &str = "geometry";
}

/// `attributes`
#[must_use]
pub fn attributes() -> Locator {
    Locator::new(token::ATTRIBUTES)
}

/// `attributes/<name>`
#[must_use]
pub fn attribute(name: &str) -> Locator {
    attributes().append(name)
}

/// `attributes/points`
#[must_use]
pub fn points() -> Locator {
    attribute(token::POINTS)
}

/// `attributes/normals`
#[must_use]
pub fn normals() -> Locator {
    attribute(token::NORMALS)
}

/// `attributes/widths`
#[must_use]
pub fn widths() -> Locator {
    attribute(token::WIDTHS)
}

/// `camera`
#[must_use]
pub fn camera() -> Locator {
    Locator::new(token::CAMERA)
}

/// `categories`
#[must_use]
pub fn categories() -> Locator {
    Locator::new(token::CATEGORIES)
}

/// `computedAttributes`
#[must_use]
pub fn computed_attributes() -> Locator {
    Locator::new(token::COMPUTED_ATTRIBUTES)
}

/// `cube`
#[must_use]
pub fn cube() -> Locator {
    Locator::new(token::CUBE)
}

/// `curves/topology`
#[must_use]
pub fn curve_topology() -> Locator {
    Locator::new(token::CURVES).append(token::TOPOLOGY)
}

/// `displayStyle`
#[must_use]
pub fn display_style() -> Locator {
    Locator::new(token::DISPLAY_STYLE)
}

/// `displayStyle/cullStyle`
#[must_use]
pub fn cull_style() -> Locator {
    display_style().append(token::CULL_STYLE)
}

/// `displayStyle/repr`
#[must_use]
pub fn repr() -> Locator {
    display_style().append(token::REPR)
}

/// `extent`
#[must_use]
pub fn extent() -> Locator {
    Locator::new(token::EXTENT)
}

/// `instancedBy`
#[must_use]
pub fn instanced_by() -> Locator {
    Locator::new(token::INSTANCED_BY)
}

/// `instancerTopology`
#[must_use]
pub fn instancer_topology() -> Locator {
    Locator::new(token::INSTANCER_TOPOLOGY)
}

/// `light`
#[must_use]
pub fn light() -> Locator {
    Locator::new(token::LIGHT)
}

/// `material`
#[must_use]
pub fn material() -> Locator {
    Locator::new(token::MATERIAL)
}

/// `materialBindings`
#[must_use]
pub fn material_bindings() -> Locator {
    Locator::new(token::MATERIAL_BINDINGS)
}

/// `mesh`
#[must_use]
pub fn mesh() -> Locator {
    Locator::new(token::MESH)
}

/// `mesh/doubleSided`
#[must_use]
pub fn mesh_double_sided() -> Locator {
    mesh().append(token::DOUBLE_SIDED)
}

/// `mesh/subdivisionScheme`
#[must_use]
pub fn mesh_subdivision_scheme() -> Locator {
    mesh().append(token::SUBDIVISION_SCHEME)
}

/// `mesh/subdivisionTags`
#[must_use]
pub fn mesh_subdivision_tags() -> Locator {
    mesh().append(token::SUBDIVISION_TAGS)
}

/// `mesh/topology`
#[must_use]
pub fn mesh_topology() -> Locator {
    mesh().append(token::TOPOLOGY)
}

/// `purpose`
#[must_use]
pub fn purpose() -> Locator {
    Locator::new(token::PURPOSE)
}

/// `renderBuffer`
#[must_use]
pub fn render_buffer() -> Locator {
    Locator::new(token::RENDER_BUFFER)
}

/// `renderSettings`
#[must_use]
pub fn render_settings() -> Locator {
    Locator::new(token::RENDER_SETTINGS)
}

/// `renderSettings/active`
#[must_use]
pub fn render_settings_active() -> Locator {
    render_settings().append(token::ACTIVE)
}

/// `renderSettings/colorSpace`
#[must_use]
pub fn render_settings_color_space() -> Locator {
    render_settings().append(token::COLOR_SPACE)
}

/// `renderSettings/products`
#[must_use]
pub fn render_settings_products() -> Locator {
    render_settings().append(token::PRODUCTS)
}

/// `sphere`
#[must_use]
pub fn sphere() -> Locator {
    Locator::new(token::SPHERE)
}

/// `visibility`
#[must_use]
pub fn visibility() -> Locator {
    Locator::new(token::VISIBILITY)
}

/// `volumeField`
#[must_use]
pub fn volume_field() -> Locator {
    Locator::new(token::VOLUME_FIELD)
}

/// `volumeFieldBinding`
#[must_use]
pub fn volume_field_binding() -> Locator {
    Locator::new(token::VOLUME_FIELD_BINDING)
}

/// `xform`
#[must_use]
pub fn xform() -> Locator {
    Locator::new(token::XFORM)
}
