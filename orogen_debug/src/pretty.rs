// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable formatting for dirty-bit fields and locator sets.

use orogen_core::dirty::{
    GeometryDirty, InstancerDirty, ResourceDirty, StateDirty, TaskDirty,
};
use orogen_core::locator::LocatorSet;

fn push_label(out: &mut String, label: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(label);
}

fn custom_suffix(out: &mut String, bits: u32) {
    let custom = (bits >> 24) & 0x7f;
    if custom != 0 {
        // Caller-defined bits, low to high.
        push_label(out, &format!("Custom:{custom:07b}"));
    }
}

/// Formats a geometry dirty field, one label per set bit.
#[must_use]
pub fn geometry_dirty(bits: GeometryDirty) -> String {
    if bits == GeometryDirty::CLEAN {
        return "Clean".into();
    }
    let mut out = String::new();
    if bits.contains(GeometryDirty::VARYING) {
        push_label(&mut out, "<Varying>");
    }
    let labels = [
        (GeometryDirty::PRIM_ID, "PrimId"),
        (GeometryDirty::EXTENT, "Extent"),
        (GeometryDirty::DISPLAY_STYLE, "DisplayStyle"),
        (GeometryDirty::POINTS, "Points"),
        (GeometryDirty::PRIMVAR, "Primvar"),
        (GeometryDirty::MATERIAL_ID, "MaterialId"),
        (GeometryDirty::TOPOLOGY, "Topology"),
        (GeometryDirty::TRANSFORM, "Transform"),
        (GeometryDirty::VISIBILITY, "Visibility"),
        (GeometryDirty::NORMALS, "Normals"),
        (GeometryDirty::DOUBLE_SIDED, "DoubleSided"),
        (GeometryDirty::CULL_STYLE, "CullStyle"),
        (GeometryDirty::SUBDIV_TAGS, "SubdivTags"),
        (GeometryDirty::WIDTHS, "Widths"),
        (GeometryDirty::INSTANCER, "Instancer"),
        (GeometryDirty::INSTANCE_INDEX, "InstanceIndex"),
        (GeometryDirty::REPR, "Repr"),
        (GeometryDirty::RENDER_TAG, "RenderTag"),
        (GeometryDirty::CATEGORIES, "Categories"),
        (GeometryDirty::VOLUME_FIELD, "VolumeField"),
    ];
    for (bit, label) in labels {
        if bits.contains(bit) {
            push_label(&mut out, label);
        }
    }
    custom_suffix(&mut out, bits.bits());
    out
}

/// Formats a state dirty field.
#[must_use]
pub fn state_dirty(bits: StateDirty) -> String {
    if bits == StateDirty::CLEAN {
        return "Clean".into();
    }
    let mut out = String::new();
    let labels = [
        (StateDirty::TRANSFORM, "Transform"),
        (StateDirty::PARAMS, "Params"),
        (StateDirty::SHADOW_PARAMS, "ShadowParams"),
        (StateDirty::COLLECTION, "Collection"),
        (StateDirty::RESOURCE, "Resource"),
        (StateDirty::VISIBILITY, "Visibility"),
        (StateDirty::INSTANCER, "Instancer"),
        (StateDirty::WINDOW_POLICY, "WindowPolicy"),
        (StateDirty::CLIP_PLANES, "ClipPlanes"),
    ];
    for (bit, label) in labels {
        if bits.contains(bit) {
            push_label(&mut out, label);
        }
    }
    custom_suffix(&mut out, bits.bits());
    out
}

/// Formats a resource dirty field.
#[must_use]
pub fn resource_dirty(bits: ResourceDirty) -> String {
    if bits == ResourceDirty::CLEAN {
        return "Clean".into();
    }
    let mut out = String::new();
    let labels = [
        (ResourceDirty::DESCRIPTION, "Description"),
        (ResourceDirty::ACTIVE, "Active"),
        (ResourceDirty::PRODUCTS, "Products"),
        (ResourceDirty::COLOR_SPACE, "ColorSpace"),
        (ResourceDirty::PARAMS, "Params"),
    ];
    for (bit, label) in labels {
        if bits.contains(bit) {
            push_label(&mut out, label);
        }
    }
    custom_suffix(&mut out, bits.bits());
    out
}

/// Formats an instancer dirty field.
#[must_use]
pub fn instancer_dirty(bits: InstancerDirty) -> String {
    if bits == InstancerDirty::CLEAN {
        return "Clean".into();
    }
    let mut out = String::new();
    let labels = [
        (InstancerDirty::TRANSFORM, "Transform"),
        (InstancerDirty::PRIMVAR, "Primvar"),
        (InstancerDirty::INSTANCE_INDEX, "InstanceIndex"),
        (InstancerDirty::INSTANCER, "Instancer"),
    ];
    for (bit, label) in labels {
        if bits.contains(bit) {
            push_label(&mut out, label);
        }
    }
    custom_suffix(&mut out, bits.bits());
    out
}

/// Formats a task dirty field.
#[must_use]
pub fn task_dirty(bits: TaskDirty) -> String {
    if bits == TaskDirty::CLEAN {
        return "Clean".into();
    }
    let mut out = String::new();
    let labels = [
        (TaskDirty::PARAMS, "Params"),
        (TaskDirty::COLLECTION, "Collection"),
        (TaskDirty::RENDER_TAGS, "RenderTags"),
    ];
    for (bit, label) in labels {
        if bits.contains(bit) {
            push_label(&mut out, label);
        }
    }
    custom_suffix(&mut out, bits.bits());
    out
}

/// Formats a locator set as `{a, b/c}`; the empty locator prints as `*`.
#[must_use]
pub fn locator_set(set: &LocatorSet) -> String {
    let mut out = String::from("{");
    for (i, locator) in set.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if locator.is_empty() {
            out.push('*');
        } else {
            out.push_str(&locator.to_string());
        }
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_core::locator::Locator;

    #[test]
    fn clean_fields_say_so() {
        assert_eq!(geometry_dirty(GeometryDirty::CLEAN), "Clean");
        assert_eq!(state_dirty(StateDirty::CLEAN), "Clean");
    }

    #[test]
    fn labels_follow_bit_order() {
        let bits = GeometryDirty::TOPOLOGY | GeometryDirty::POINTS | GeometryDirty::VARYING;
        assert_eq!(geometry_dirty(bits), "<Varying> Points Topology");
    }

    #[test]
    fn custom_bits_render_as_a_bitfield() {
        let bits = StateDirty::from_bits_retain(1 << 24 | 1 << 26);
        assert_eq!(state_dirty(bits), "Custom:0000101");
    }

    #[test]
    fn locator_sets_render_sorted_with_wildcard() {
        let set: LocatorSet = [Locator::new("xform"), Locator::new("extent")]
            .into_iter()
            .collect();
        assert_eq!(locator_set(&set), "{extent, xform}");

        let everything: LocatorSet = [Locator::empty()].into_iter().collect();
        assert_eq!(locator_set(&everything), "{*}");
    }
}
