// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-tag classification and the downstream registry contract.
//!
//! [`CategoryRegistry`] answers which [`Category`] a type tag belongs to;
//! it ships seeded with the built-in tags and accepts caller extensions.
//! [`RenderTarget`] is the downstream render-index collaborator: it
//! receives category-qualified insert/remove calls and owns no
//! invalidation logic of its own.

use std::collections::HashMap;

use parking_lot::RwLock;

use orogen_core::dirty::Category;
use orogen_core::path::{Name, ScenePath};

/// Built-in type tags.
pub mod type_tag {
    /// Polygonal/subdivision mesh (Geometry).
    pub const MESH: &str = "mesh";
    /// Curve batch (Geometry).
    pub const CURVES: &str = "curves";
    /// Point cloud (Geometry).
    pub const POINTS: &str = "points";
    /// Implicit cube (Geometry).
    pub const CUBE: &str = "cube";
    /// Implicit sphere (Geometry).
    pub const SPHERE: &str = "sphere";
    /// Volume (Geometry).
    pub const VOLUME: &str = "volume";

    /// Camera (State).
    pub const CAMERA: &str = "camera";
    /// Material (State).
    pub const MATERIAL: &str = "material";
    /// Cylinder light (State).
    pub const CYLINDER_LIGHT: &str = "cylinderLight";
    /// Disk light (State).
    pub const DISK_LIGHT: &str = "diskLight";
    /// Distant light (State).
    pub const DISTANT_LIGHT: &str = "distantLight";
    /// Dome light (State).
    pub const DOME_LIGHT: &str = "domeLight";
    /// Rect light (State).
    pub const RECT_LIGHT: &str = "rectLight";
    /// Sphere light (State).
    pub const SPHERE_LIGHT: &str = "sphereLight";

    /// Render buffer (Resource).
    pub const RENDER_BUFFER: &str = "renderBuffer";
    /// Render settings (Resource).
    pub const RENDER_SETTINGS: &str = "renderSettings";
    /// Volume field asset (Resource).
    pub const FIELD: &str = "field";

    /// Instancer.
    pub const INSTANCER: &str = "instancer";

    /// Render task.
    pub const RENDER_TASK: &str = "renderTask";
}

/// Maps type tags to the category that tracks them.
///
/// Extensible at runtime: renderer plugins register their own tags before
/// observation starts. Registration is last-wins.
pub struct CategoryRegistry {
    entries: RwLock<HashMap<Name, Category>>,
}

impl std::fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

impl CategoryRegistry {
    /// Creates a registry seeded with the built-in tags.
    #[must_use]
    pub fn new() -> Self {
        let registry = Self {
            entries: RwLock::new(HashMap::new()),
        };
        for tag in [
            type_tag::MESH,
            type_tag::CURVES,
            type_tag::POINTS,
            type_tag::CUBE,
            type_tag::SPHERE,
            type_tag::VOLUME,
        ] {
            registry.register(tag, Category::Geometry);
        }
        for tag in [
            type_tag::CAMERA,
            type_tag::MATERIAL,
            type_tag::CYLINDER_LIGHT,
            type_tag::DISK_LIGHT,
            type_tag::DISTANT_LIGHT,
            type_tag::DOME_LIGHT,
            type_tag::RECT_LIGHT,
            type_tag::SPHERE_LIGHT,
        ] {
            registry.register(tag, Category::State);
        }
        for tag in [
            type_tag::RENDER_BUFFER,
            type_tag::RENDER_SETTINGS,
            type_tag::FIELD,
        ] {
            registry.register(tag, Category::Resource);
        }
        registry.register(type_tag::INSTANCER, Category::Instancer);
        registry.register(type_tag::RENDER_TASK, Category::Task);
        registry
    }

    /// Creates an empty registry (no built-in tags).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers (or re-registers) a tag.
    pub fn register(&self, tag: impl Into<Name>, category: Category) {
        self.entries.write().insert(tag.into(), category);
    }

    /// Returns the category of `tag`, if known.
    #[must_use]
    pub fn category_of(&self, tag: &str) -> Option<Category> {
        self.entries.read().get(tag).copied()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The downstream render-index collaborator.
///
/// Receives category-qualified membership changes and decides what render
/// work to redo by reading the ledger; it performs no invalidation itself.
/// All methods are object-level except [`remove_subtree`] and [`clear`],
/// which exist because bulk removal is cheaper downstream than per-object
/// enumeration.
///
/// [`remove_subtree`]: Self::remove_subtree
/// [`clear`]: Self::clear
pub trait RenderTarget: Send + Sync {
    /// A geometry object was registered.
    fn insert_geometry(&self, type_tag: &Name, path: &ScenePath);
    /// A geometry object was unregistered.
    fn remove_geometry(&self, path: &ScenePath);

    /// A state object was registered.
    fn insert_state(&self, type_tag: &Name, path: &ScenePath);
    /// A state object was unregistered.
    fn remove_state(&self, type_tag: &Name, path: &ScenePath);

    /// A resource object was registered.
    fn insert_resource(&self, type_tag: &Name, path: &ScenePath);
    /// A resource object was unregistered.
    fn remove_resource(&self, type_tag: &Name, path: &ScenePath);

    /// An instancer was registered.
    fn insert_instancer(&self, path: &ScenePath);
    /// An instancer was unregistered.
    fn remove_instancer(&self, path: &ScenePath);

    /// A task was registered.
    fn insert_task(&self, path: &ScenePath);
    /// A task was unregistered.
    fn remove_task(&self, path: &ScenePath);

    /// Everything under `path` was unregistered at once.
    fn remove_subtree(&self, path: &ScenePath);

    /// The whole scene was dropped.
    fn clear(&self);
}
