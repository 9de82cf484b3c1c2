// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topology, attribute, and camera value types shared by both
//! representations.
//!
//! Every type here has a documented "empty" form, because the bridging
//! layer's contract is to return defaults for unknown paths rather than
//! fail (over-invalidation is safe; erroring is not part of the protocol).

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::path::{Name, ScenePath};

/// How an attribute's values map onto a piece of geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interpolation {
    /// One value for the whole object.
    Constant,
    /// One value per face or curve.
    Uniform,
    /// Interpolated over the parametric surface.
    Varying,
    /// One value per point.
    Vertex,
    /// One value per face-vertex.
    FaceVarying,
    /// One value per instance.
    Instance,
}

impl Interpolation {
    /// All interpolations, in slot order.
    pub const ALL: [Self; 6] = [
        Self::Constant,
        Self::Uniform,
        Self::Varying,
        Self::Vertex,
        Self::FaceVarying,
        Self::Instance,
    ];

    /// Number of interpolation slots.
    pub const COUNT: usize = 6;

    /// Returns the dense slot index for this interpolation.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses the schema token form.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "constant" => Some(Self::Constant),
            "uniform" => Some(Self::Uniform),
            "varying" => Some(Self::Varying),
            "vertex" => Some(Self::Vertex),
            "faceVarying" => Some(Self::FaceVarying),
            "instance" => Some(Self::Instance),
            _ => None,
        }
    }

    /// Returns the schema token form.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Uniform => "uniform",
            Self::Varying => "varying",
            Self::Vertex => "vertex",
            Self::FaceVarying => "faceVarying",
            Self::Instance => "instance",
        }
    }
}

/// Metadata describing one authored attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Attribute name.
    pub name: Name,
    /// Interpolation mode.
    pub interpolation: Interpolation,
    /// Semantic role token (may be empty).
    pub role: Name,
    /// Whether the attribute carries a separate index array.
    pub indexed: bool,
}

/// Face topology of a mesh. The default value is the empty mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshTopology {
    /// Vertex count per face.
    pub face_vertex_counts: Arc<[i32]>,
    /// Flattened vertex indices.
    pub face_vertex_indices: Arc<[i32]>,
    /// Indices of faces to treat as holes.
    pub hole_indices: Arc<[i32]>,
    /// Winding orientation token.
    pub orientation: Name,
    /// Subdivision scheme token (`none` for polygonal meshes).
    pub scheme: Name,
}

impl Default for MeshTopology {
    fn default() -> Self {
        Self {
            face_vertex_counts: Arc::from([]),
            face_vertex_indices: Arc::from([]),
            hole_indices: Arc::from([]),
            orientation: Name::new("rightHanded"),
            scheme: Name::new("none"),
        }
    }
}

impl MeshTopology {
    /// Returns the number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_vertex_counts.len()
    }
}

/// Topology of a batch of curves. The default value is the empty batch.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveTopology {
    /// Curve type token (`linear` or `cubic`).
    pub curve_type: Name,
    /// Spline basis token.
    pub basis: Name,
    /// Wrap mode token.
    pub wrap: Name,
    /// Vertex count per curve.
    pub curve_vertex_counts: Arc<[i32]>,
    /// Optional shared-vertex indices.
    pub curve_indices: Arc<[i32]>,
}

impl Default for CurveTopology {
    fn default() -> Self {
        Self {
            curve_type: Name::new("linear"),
            basis: Name::new("bezier"),
            wrap: Name::new("nonperiodic"),
            curve_vertex_counts: Arc::from([]),
            curve_indices: Arc::from([]),
        }
    }
}

/// Which objects an instancer replicates, and with which instance indices.
///
/// `instance_indices[i]` lists the instance slots drawn with
/// `prototypes[i]`. The default value is the empty instancer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstancerTopology {
    /// Prototype object paths.
    pub prototypes: Vec<ScenePath>,
    /// Per-prototype instance index arrays.
    pub instance_indices: Vec<Arc<[i32]>>,
}

/// Camera projection mode.
///
/// The flat query interface speaks this enum; the hierarchical schema
/// stores the token form. The adapters convert at the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

impl Projection {
    /// Parses the schema token form.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "perspective" => Some(Self::Perspective),
            "orthographic" => Some(Self::Orthographic),
            _ => None,
        }
    }

    /// Returns the schema token form.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Perspective => "perspective",
            Self::Orthographic => "orthographic",
        }
    }
}

/// Near/far clipping distances.
///
/// The flat query interface speaks this struct; the hierarchical schema
/// stores a 2-vector. The adapters convert at the boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippingRange {
    /// Near plane distance.
    pub near: f64,
    /// Far plane distance.
    pub far: f64,
}

impl Default for ClippingRange {
    /// The conventional fallback window for cameras with no authored range.
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl ClippingRange {
    /// Converts from the schema's 2-vector form.
    #[must_use]
    pub const fn from_vec2(v: [f64; 2]) -> Self {
        Self {
            near: v[0],
            far: v[1],
        }
    }

    /// Converts to the schema's 2-vector form.
    #[must_use]
    pub const fn to_vec2(self) -> [f64; 2] {
        [self.near, self.far]
    }
}

/// An axis-aligned bounding extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}
