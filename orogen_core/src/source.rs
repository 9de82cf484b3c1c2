// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchical representation's node model.
//!
//! A tree node is either a *container* (named children) or a *value* leaf
//! (sampled data). Handles are shared and immutable from the consumer's
//! side; producers publish a new node rather than mutating one in place,
//! which is what lets the caching layers swap whole sub-trees atomically.
//!
//! [`RetainedContainer`] and [`RetainedValue`] are the in-memory building
//! blocks: adapters use them for small fixed sub-trees and tests use them
//! to author whole scenes.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::locator::Locator;
use crate::path::Name;
use crate::value::Value;

/// Shared handle to a container node.
pub type ContainerHandle = Arc<dyn ContainerSource>;

/// Shared handle to a value leaf.
pub type ValueHandle = Arc<dyn ValueSource>;

/// A named-children tree node.
pub trait ContainerSource: Send + Sync {
    /// Returns the child names, in the container's own order.
    fn names(&self) -> Vec<Name>;

    /// Returns the child with the given name, if present.
    fn get(&self, name: &str) -> Option<DataSourceHandle>;

    /// Returns whether a child with the given name exists.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// A sampled value leaf.
pub trait ValueSource: Send + Sync {
    /// Returns the value at the given shutter offset, or `None` if nothing
    /// is authored there.
    fn value(&self, shutter_offset: f64) -> Option<Value>;

    /// Returns the sample times contributing to `[start, end]`, or `None`
    /// if the value is time-invariant.
    fn sample_times(&self, _start: f64, _end: f64) -> Option<Vec<f64>> {
        None
    }
}

/// Either kind of tree node.
#[derive(Clone)]
pub enum DataSourceHandle {
    /// A container node.
    Container(ContainerHandle),
    /// A value leaf.
    Value(ValueHandle),
}

impl DataSourceHandle {
    /// Returns the container handle, if this is a container.
    #[must_use]
    pub fn as_container(&self) -> Option<ContainerHandle> {
        match self {
            Self::Container(c) => Some(Arc::clone(c)),
            Self::Value(_) => None,
        }
    }

    /// Returns the value handle, if this is a value leaf.
    #[must_use]
    pub fn as_value(&self) -> Option<ValueHandle> {
        match self {
            Self::Value(v) => Some(Arc::clone(v)),
            Self::Container(_) => None,
        }
    }
}

impl From<ContainerHandle> for DataSourceHandle {
    fn from(c: ContainerHandle) -> Self {
        Self::Container(c)
    }
}

impl From<ValueHandle> for DataSourceHandle {
    fn from(v: ValueHandle) -> Self {
        Self::Value(v)
    }
}

/// Walks `locator` down from `root`, returning the node it names.
///
/// The empty locator names `root` itself.
#[must_use]
pub fn descend(root: &ContainerHandle, locator: &Locator) -> Option<DataSourceHandle> {
    let mut node = DataSourceHandle::Container(Arc::clone(root));
    for segment in locator.segments() {
        node = node.as_container()?.get(segment)?;
    }
    Some(node)
}

/// A time-invariant value leaf.
pub struct RetainedValue(Value);

impl RetainedValue {
    /// Wraps a value as a leaf handle.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> ValueHandle {
        Arc::new(Self(value.into()))
    }
}

impl ValueSource for RetainedValue {
    fn value(&self, _shutter_offset: f64) -> Option<Value> {
        Some(self.0.clone())
    }
}

/// An in-memory container with a fixed child list.
pub struct RetainedContainer {
    entries: Vec<(Name, DataSourceHandle)>,
}

impl RetainedContainer {
    /// Starts building a container.
    #[must_use]
    pub fn builder() -> RetainedContainerBuilder {
        RetainedContainerBuilder {
            entries: Vec::new(),
        }
    }
}

impl ContainerSource for RetainedContainer {
    fn names(&self) -> Vec<Name> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.as_str() == name)
            .map(|(_, handle)| handle.clone())
    }
}

/// Builder for [`RetainedContainer`].
pub struct RetainedContainerBuilder {
    entries: Vec<(Name, DataSourceHandle)>,
}

impl RetainedContainerBuilder {
    /// Adds a time-invariant value child.
    #[must_use]
    pub fn value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.entries.push((
            Name::new(name),
            DataSourceHandle::Value(RetainedValue::new(value)),
        ));
        self
    }

    /// Adds a container child.
    #[must_use]
    pub fn child(mut self, name: &str, child: ContainerHandle) -> Self {
        self.entries
            .push((Name::new(name), DataSourceHandle::Container(child)));
        self
    }

    /// Adds an arbitrary child handle.
    #[must_use]
    pub fn source(mut self, name: &str, handle: DataSourceHandle) -> Self {
        self.entries.push((Name::new(name), handle));
        self
    }

    /// Finishes the container.
    #[must_use]
    pub fn build(self) -> ContainerHandle {
        Arc::new(RetainedContainer {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Name;

    fn sample_tree() -> ContainerHandle {
        RetainedContainer::builder()
            .child(
                "xform",
                RetainedContainer::builder()
                    .value("matrix", crate::matrix::Matrix4::IDENTITY)
                    .build(),
            )
            .value("purpose", "geometry")
            .build()
    }

    #[test]
    fn names_and_get() {
        let tree = sample_tree();
        let names = tree.names();
        assert_eq!(names, [Name::new("xform"), Name::new("purpose")]);
        assert!(tree.has("xform"));
        assert!(!tree.has("extent"));
    }

    #[test]
    fn descend_walks_locators() {
        let tree = sample_tree();
        let matrix = descend(&tree, &Locator::new("xform").append("matrix"))
            .and_then(|node| node.as_value())
            .and_then(|leaf| leaf.value(0.0));
        assert_eq!(
            matrix.and_then(|v| v.as_matrix()),
            Some(crate::matrix::Matrix4::IDENTITY)
        );
        assert!(descend(&tree, &Locator::new("missing")).is_none());
        assert!(
            descend(&tree, &Locator::empty()).is_some(),
            "empty locator names the root"
        );
    }

    #[test]
    fn retained_values_are_time_invariant() {
        let leaf = RetainedValue::new(3.0);
        assert_eq!(leaf.value(0.0), leaf.value(0.25));
        assert_eq!(leaf.sample_times(-0.5, 0.5), None);
    }
}
