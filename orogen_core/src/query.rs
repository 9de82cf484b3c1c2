// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat (query) representation's getter contract.
//!
//! [`SceneQuery`] is the legacy per-key interface: every accessor takes an
//! object path and returns the current value of one aspect. The contract is
//! deliberately permissive — every method has a default body returning the
//! documented empty value, and implementations must answer unknown paths
//! the same way rather than erroring.
//!
//! Time-sampled access follows a capacity protocol: the caller passes a
//! buffer capacity, the implementation fills at most that many samples and
//! returns the *authored* count. A return value larger than the capacity
//! tells the caller to re-query with more room; it is not an error.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::matrix::Matrix4;
use crate::path::{Name, ScenePath};
use crate::types::{
    AttributeDescriptor, ClippingRange, CurveTopology, Extent, InstancerTopology, Interpolation,
    MeshTopology, Projection,
};
use crate::value::Value;

/// A buffer of time samples filled by [`SceneQuery::sample_attribute`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSamples {
    /// Sample times, one per sample.
    pub times: Vec<f64>,
    /// Sample values, parallel to `times`.
    pub values: Vec<Value>,
}

impl TimeSamples {
    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.times.clear();
        self.values.clear();
    }

    /// Returns the number of buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// The flat per-key getter surface of the legacy representation.
pub trait SceneQuery: Send + Sync {
    /// Returns the value of attribute `key` on `path`.
    fn get(&self, _path: &ScenePath, _key: &str) -> Option<Value> {
        None
    }

    /// Returns the value and index array of an indexed attribute.
    fn indexed_attribute(&self, _path: &ScenePath, _key: &str) -> Option<(Value, Arc<[i32]>)> {
        None
    }

    /// Fills `out` with up to `capacity` samples of attribute `key` over
    /// the shutter window `[start, end]` and returns the authored sample
    /// count (which may exceed `capacity`; re-query with more room).
    ///
    /// The default bridges to [`get`](Self::get) with a single sample at
    /// offset zero.
    fn sample_attribute(
        &self,
        path: &ScenePath,
        key: &str,
        _start: f64,
        _end: f64,
        capacity: usize,
        out: &mut TimeSamples,
    ) -> usize {
        out.clear();
        match self.get(path, key) {
            Some(value) => {
                if capacity > 0 {
                    out.times.push(0.0);
                    out.values.push(value);
                }
                1
            }
            None => 0,
        }
    }

    /// Returns descriptors for the authored attributes with the given
    /// interpolation.
    fn attribute_descriptors(
        &self,
        _path: &ScenePath,
        _interpolation: Interpolation,
    ) -> Vec<AttributeDescriptor> {
        Vec::new()
    }

    /// Returns descriptors for externally computed attributes with the
    /// given interpolation.
    fn computed_attribute_descriptors(
        &self,
        _path: &ScenePath,
        _interpolation: Interpolation,
    ) -> Vec<AttributeDescriptor> {
        Vec::new()
    }

    /// Returns the mesh topology (empty for non-meshes and unknown paths).
    fn mesh_topology(&self, _path: &ScenePath) -> MeshTopology {
        MeshTopology::default()
    }

    /// Returns the curve topology (empty for non-curves and unknown paths).
    fn curve_topology(&self, _path: &ScenePath) -> CurveTopology {
        CurveTopology::default()
    }

    /// Returns the instancer topology (empty for non-instancers).
    fn instancer_topology(&self, _path: &ScenePath) -> InstancerTopology {
        InstancerTopology::default()
    }

    /// Returns the object-to-world transform (identity for unknown paths).
    fn transform(&self, _path: &ScenePath) -> Matrix4 {
        Matrix4::IDENTITY
    }

    /// Returns the visibility flag (`true` for unknown paths).
    fn visible(&self, _path: &ScenePath) -> bool {
        true
    }

    /// Returns the authored extent, if any.
    fn extent(&self, _path: &ScenePath) -> Option<Extent> {
        None
    }

    /// Returns the bound material path, if any.
    fn material_binding(&self, _path: &ScenePath) -> Option<ScenePath> {
        None
    }

    /// Returns the camera projection mode (perspective default).
    fn camera_projection(&self, _path: &ScenePath) -> Projection {
        Projection::default()
    }

    /// Returns the camera clipping range (conventional default window).
    fn camera_clipping_range(&self, _path: &ScenePath) -> ClippingRange {
        ClippingRange::default()
    }

    /// Returns a named camera parameter.
    fn camera_param(&self, _path: &ScenePath, _name: &str) -> Option<Value> {
        None
    }

    /// Returns a named light parameter.
    fn light_param(&self, _path: &ScenePath, _name: &str) -> Option<Value> {
        None
    }

    /// Returns the object's render tag (`geometry` default).
    fn render_tag(&self, _path: &ScenePath) -> Name {
        Name::new(crate::schema::token::DEFAULT_PURPOSE)
    }

    /// Returns the category (collection) names including this object.
    fn categories(&self, _path: &ScenePath) -> Vec<Name> {
        Vec::new()
    }
}
