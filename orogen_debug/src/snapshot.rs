// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of ledger state for postmortem dumps.

use serde_json::{json, Value};

use orogen_core::dirty::Category;
use orogen_track::ChangeLedger;

/// Summarizes a ledger as JSON: entry counts per category plus every
/// global version counter.
#[must_use]
pub fn ledger(ledger: &ChangeLedger) -> Value {
    json!({
        "entries": {
            "geometry": ledger.entry_count(Category::Geometry),
            "state": ledger.entry_count(Category::State),
            "resource": ledger.entry_count(Category::Resource),
            "instancer": ledger.entry_count(Category::Instancer),
            "task": ledger.entry_count(Category::Task),
        },
        "versions": {
            "scene": ledger.scene_version(),
            "varyingState": ledger.varying_state_version(),
            "geometryIndex": ledger.geometry_index_version(),
            "stateIndex": ledger.state_index_version(),
            "resourceIndex": ledger.resource_index_version(),
            "instancerIndex": ledger.instancer_index_version(),
            "visibilityChange": ledger.visibility_change_count(),
            "renderTag": ledger.render_tag_version(),
        },
    })
}
