// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-category dirty-bit fields.
//!
//! Each tracked object carries a bitmask of stale aspects. The meaning of
//! the bits depends on the object's [`Category`], so each category gets its
//! own flags type. Two conventions recur everywhere:
//!
//! - `CLEAN` is the empty field and `ALL_DIRTY` is every semantically
//!   meaningful bit. Only geometry carries the extra
//!   [`VARYING`](GeometryDirty::VARYING) marker, which is *not* part of
//!   `ALL_DIRTY`: an object can be varying and clean at the same time.
//! - Bits 24–30 (the `CUSTOM` mask) are reserved for caller-defined
//!   extension bits and are included in `ALL_DIRTY`.
//!
//! [`GeometryDirty::PRIM_ID`] has no locator in the hierarchical schema.
//! The translation layer drops it on the forward map; this is documented
//! lossy behavior, not an oversight.

use bitflags::bitflags;

/// The object categories the ledger tracks.
///
/// The category decides which dirty-bit type and which translation table
/// applies. Task objects are tracked by the ledger but excluded from
/// locator translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Drawable scene objects (meshes, curves, volumes).
    Geometry,
    /// Non-drawable scene state (cameras, lights, materials).
    State,
    /// Render resources (buffers, settings, volume fields).
    Resource,
    /// Instancers replicating other objects.
    Instancer,
    /// Render tasks.
    Task,
}

impl Category {
    /// All categories, in ledger order.
    pub const ALL: [Self; 5] = [
        Self::Geometry,
        Self::State,
        Self::Resource,
        Self::Instancer,
        Self::Task,
    ];

    /// Returns a short lowercase label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Geometry => "geometry",
            Self::State => "state",
            Self::Resource => "resource",
            Self::Instancer => "instancer",
            Self::Task => "task",
        }
    }
}

bitflags! {
    /// Stale aspects of a geometry object.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GeometryDirty: u32 {
        /// Marker: the object changed during recent update cycles. Owned by
        /// the ledger; never part of `ALL_DIRTY`.
        const VARYING = 1 << 0;
        /// Picking/selection id. Has no locator; dropped by translation.
        const PRIM_ID = 1 << 1;
        /// Bounding extent.
        const EXTENT = 1 << 2;
        /// Whole display style block.
        const DISPLAY_STYLE = 1 << 3;
        /// The points attribute.
        const POINTS = 1 << 4;
        /// Any attribute other than points/normals/widths.
        const PRIMVAR = 1 << 5;
        /// Bound material id.
        const MATERIAL_ID = 1 << 6;
        /// Mesh or curve topology.
        const TOPOLOGY = 1 << 7;
        /// Object-to-world transform.
        const TRANSFORM = 1 << 8;
        /// Visibility flag.
        const VISIBILITY = 1 << 9;
        /// The normals attribute.
        const NORMALS = 1 << 10;
        /// Double-sidedness.
        const DOUBLE_SIDED = 1 << 11;
        /// Cull style (sub-aspect of the display style block).
        const CULL_STYLE = 1 << 12;
        /// Subdivision tags.
        const SUBDIV_TAGS = 1 << 13;
        /// The widths attribute.
        const WIDTHS = 1 << 14;
        /// The set of instancers affecting this object.
        const INSTANCER = 1 << 15;
        /// Instance indices drawn for this object.
        const INSTANCE_INDEX = 1 << 16;
        /// Representation selector (sub-aspect of the display style block).
        const REPR = 1 << 17;
        /// Render tag (purpose).
        const RENDER_TAG = 1 << 18;
        /// Category (collection membership) lists.
        const CATEGORIES = 1 << 19;
        /// Bound volume fields.
        const VOLUME_FIELD = 1 << 20;
        /// Reserved range for caller-defined extension bits.
        const CUSTOM = 0x7f00_0000;
    }
}

impl GeometryDirty {
    /// The clean field.
    pub const CLEAN: Self = Self::empty();

    /// Every meaningful dirty bit, excluding the `VARYING` marker.
    pub const ALL_DIRTY: Self =
        Self::from_bits_retain(Self::all().bits() & !Self::VARYING.bits());

    /// Returns whether any dirty bit (as opposed to the marker bit) is set.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }

    /// Returns whether the varying marker is set. Independent of
    /// [`is_dirty`](Self::is_dirty).
    #[must_use]
    pub const fn is_varying(self) -> bool {
        self.contains(Self::VARYING)
    }

    /// Returns whether any attribute-carrying bit is set.
    #[must_use]
    pub const fn any_attribute_dirty(self) -> bool {
        self.intersects(Self::from_bits_retain(
            Self::POINTS.bits()
                | Self::NORMALS.bits()
                | Self::WIDTHS.bits()
                | Self::PRIMVAR.bits(),
        ))
    }
}

bitflags! {
    /// Stale aspects of a state object (camera, light, material, …).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateDirty: u32 {
        /// Object-to-world transform.
        const TRANSFORM = 1 << 0;
        /// General parameter block.
        const PARAMS = 1 << 1;
        /// Shadow parameters (lights).
        const SHADOW_PARAMS = 1 << 2;
        /// Linked collection (lights).
        const COLLECTION = 1 << 3;
        /// Backing resource (material networks, light shaders).
        const RESOURCE = 1 << 4;
        /// Visibility flag.
        const VISIBILITY = 1 << 5;
        /// The set of instancers affecting this object.
        const INSTANCER = 1 << 6;
        /// Window policy (cameras).
        const WINDOW_POLICY = 1 << 7;
        /// Clip planes (cameras).
        const CLIP_PLANES = 1 << 8;
        /// Reserved range for caller-defined extension bits.
        const CUSTOM = 0x7f00_0000;
    }
}

impl StateDirty {
    /// The clean field.
    pub const CLEAN: Self = Self::empty();

    /// Every meaningful dirty bit.
    pub const ALL_DIRTY: Self = Self::all();

    /// Returns whether any dirty bit is set.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }
}

bitflags! {
    /// Stale aspects of a render resource object.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResourceDirty: u32 {
        /// Buffer description (format, dimensions, multisampling).
        const DESCRIPTION = 1 << 0;
        /// Active flag (render settings).
        const ACTIVE = 1 << 1;
        /// Render products (render settings).
        const PRODUCTS = 1 << 2;
        /// Rendering color space (render settings).
        const COLOR_SPACE = 1 << 3;
        /// General parameter block (volume fields).
        const PARAMS = 1 << 4;
        /// Reserved range for caller-defined extension bits.
        const CUSTOM = 0x7f00_0000;
    }
}

impl ResourceDirty {
    /// The clean field.
    pub const CLEAN: Self = Self::empty();

    /// Every meaningful dirty bit.
    pub const ALL_DIRTY: Self = Self::all();

    /// Returns whether any dirty bit is set.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }
}

bitflags! {
    /// Stale aspects of an instancer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InstancerDirty: u32 {
        /// Instancer-to-world transform.
        const TRANSFORM = 1 << 0;
        /// Per-instance attributes (scales, rotations, translations).
        const PRIMVAR = 1 << 1;
        /// Instance index arrays.
        const INSTANCE_INDEX = 1 << 2;
        /// The set of parent instancers affecting this instancer.
        const INSTANCER = 1 << 3;
        /// Reserved range for caller-defined extension bits.
        const CUSTOM = 0x7f00_0000;
    }
}

impl InstancerDirty {
    /// The clean field.
    pub const CLEAN: Self = Self::empty();

    /// Every meaningful dirty bit.
    pub const ALL_DIRTY: Self = Self::all();

    /// Returns whether any dirty bit is set.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }
}

bitflags! {
    /// Stale aspects of a render task.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TaskDirty: u32 {
        /// Task parameter block.
        const PARAMS = 1 << 0;
        /// Task object collection.
        const COLLECTION = 1 << 1;
        /// The set of render tags the task draws.
        const RENDER_TAGS = 1 << 2;
        /// Reserved range for caller-defined extension bits.
        const CUSTOM = 0x7f00_0000;
    }
}

impl TaskDirty {
    /// The clean field.
    pub const CLEAN: Self = Self::empty();

    /// Every meaningful dirty bit.
    pub const ALL_DIRTY: Self = Self::all();

    /// Returns whether any dirty bit is set.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        self.intersects(Self::ALL_DIRTY)
    }
}
