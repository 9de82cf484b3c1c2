// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locators: hierarchical descriptors of changed data regions.
//!
//! A [`Locator`] names one region of an object's hierarchical namespace;
//! the empty locator means "the entire namespace". A [`LocatorSet`] is the
//! normalized union of such regions: sorted, and free of redundancy (no
//! retained element is a strict prefix of another retained element).
//!
//! The set's iteration order is a total order consistent with prefix
//! semantics — a locator sorts before all of its extensions, and all of an
//! element's extensions are contiguous. The translation layer's single-pass
//! cursor scan is only sound because of this; a hash-based set cannot be
//! substituted here.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use smallvec::SmallVec;

use crate::path::Name;

/// A path into one object's hierarchical namespace.
///
/// Cheap to clone; most locators are a handful of segments.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Locator {
    segments: SmallVec<[Name; 4]>,
}

impl Locator {
    /// Returns the empty locator, denoting the object's entire namespace.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a single-segment locator.
    #[must_use]
    pub fn new(segment: impl Into<Name>) -> Self {
        let mut segments = SmallVec::new();
        segments.push(segment.into());
        Self { segments }
    }

    /// Builds a locator from segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Name>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new locator with `segment` appended.
    #[must_use]
    pub fn append(&self, segment: impl Into<Name>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns whether this is the empty locator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns the locator's segments.
    #[must_use]
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Returns whether `prefix` is a prefix of (or equal to) this locator.
    ///
    /// The empty locator is a prefix of every locator.
    #[must_use]
    pub fn has_prefix(&self, prefix: &Self) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Returns whether this locator and `other` describe overlapping
    /// regions: either is a prefix of the other, or they are equal.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let common = self.segments.len().min(other.segments.len());
        self.segments[..common] == other.segments[..common]
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({self})")
    }
}

/// A normalized union of [`Locator`]s.
///
/// Invariants: elements are sorted, unique, and prefix-free — inserting an
/// element already covered by a retained ancestor is a no-op, and inserting
/// an ancestor drops the retained elements it covers. Inserting the empty
/// locator therefore collapses the set to the `{empty}` singleton, the
/// canonical "everything changed" representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocatorSet {
    items: Vec<Locator>,
}

impl LocatorSet {
    /// Returns the empty set (nothing changed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a locator, maintaining sort order and collapsing prefixes.
    pub fn insert(&mut self, locator: Locator) {
        match self.items.binary_search(&locator) {
            Ok(_) => {}
            Err(idx) => {
                // In a prefix-free sorted set, the only retained ancestor
                // that could cover `locator` sits immediately before the
                // insertion point.
                if idx > 0 && locator.has_prefix(&self.items[idx - 1]) {
                    return;
                }
                // Extensions of `locator` are contiguous from `idx`; they
                // become redundant.
                let end = idx
                    + self.items[idx..]
                        .iter()
                        .take_while(|item| item.has_prefix(&locator))
                        .count();
                if end > idx {
                    let _ = self.items.drain(idx..end);
                }
                self.items.insert(idx, locator);
            }
        }
    }

    /// Returns whether any element intersects `locator`.
    #[must_use]
    pub fn intersects(&self, locator: &Locator) -> bool {
        match self.items.binary_search(locator) {
            Ok(_) => true,
            Err(idx) => {
                (idx > 0 && locator.has_prefix(&self.items[idx - 1]))
                    || self
                        .items
                        .get(idx)
                        .is_some_and(|item| item.has_prefix(locator))
            }
        }
    }

    /// Returns the elements in sorted order.
    #[must_use]
    pub fn as_slice(&self) -> &[Locator] {
        &self.items
    }

    /// Iterates the elements in sorted order.
    pub fn iter(&self) -> core::slice::Iter<'_, Locator> {
        self.items.iter()
    }

    /// Returns the number of retained elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the set is empty (nothing changed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Locator> for LocatorSet {
    fn from_iter<I: IntoIterator<Item = Locator>>(iter: I) -> Self {
        let mut set = Self::new();
        for locator in iter {
            set.insert(locator);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LocatorSet {
    type Item = &'a Locator;
    type IntoIter = core::slice::Iter<'a, Locator>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialOrd for LocatorSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocatorSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.items.cmp(&other.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn loc(text: &str) -> Locator {
        if text.is_empty() {
            Locator::empty()
        } else {
            Locator::from_segments(text.split('/').map(Name::new))
        }
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(format!("{}", loc("mesh/topology")), "mesh/topology");
        assert_eq!(format!("{}", Locator::empty()), "");
    }

    #[test]
    fn prefix_and_intersection() {
        let parent = loc("displayStyle");
        let child = loc("displayStyle/cullStyle");
        assert!(child.has_prefix(&parent));
        assert!(!parent.has_prefix(&child));
        assert!(parent.intersects(&child));
        assert!(child.intersects(&parent));
        assert!(!loc("extent").intersects(&parent));
        assert!(Locator::empty().intersects(&child));
        assert!(child.has_prefix(&Locator::empty()));
    }

    #[test]
    fn locators_sort_before_their_extensions() {
        assert!(loc("mesh") < loc("mesh/topology"));
        assert!(loc("mesh/topology") < loc("purpose"));
        assert!(Locator::empty() < loc("attributes"));
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let set: LocatorSet = [loc("xform"), loc("extent"), loc("purpose")]
            .into_iter()
            .collect();
        let order: Vec<_> = set.iter().map(|l| format!("{l}")).collect();
        assert_eq!(order, ["extent", "purpose", "xform"]);
    }

    #[test]
    fn insert_is_duplicate_collapsing() {
        let mut set = LocatorSet::new();
        set.insert(loc("extent"));
        set.insert(loc("extent"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ancestor_subsumes_descendants() {
        let mut set = LocatorSet::new();
        set.insert(loc("displayStyle/cullStyle"));
        set.insert(loc("displayStyle/repr"));
        set.insert(loc("extent"));
        set.insert(loc("displayStyle"));
        let order: Vec<_> = set.iter().map(|l| format!("{l}")).collect();
        assert_eq!(order, ["displayStyle", "extent"]);

        // Inserting a now-covered descendant is a no-op.
        set.insert(loc("displayStyle/cullStyle"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_locator_collapses_the_set() {
        let mut set = LocatorSet::new();
        set.insert(loc("extent"));
        set.insert(loc("xform"));
        set.insert(Locator::empty());
        assert_eq!(set.len(), 1);
        assert!(set.as_slice()[0].is_empty());

        set.insert(loc("visibility"));
        assert_eq!(set.len(), 1, "empty locator covers everything");
    }

    #[test]
    fn set_intersection_queries() {
        let set: LocatorSet = [loc("displayStyle/cullStyle"), loc("mesh/topology")]
            .into_iter()
            .collect();
        assert!(set.intersects(&loc("displayStyle")), "parent of an element");
        assert!(
            set.intersects(&loc("mesh/topology/faceVertexCounts")),
            "descendant of an element"
        );
        assert!(set.intersects(&loc("mesh/topology")));
        assert!(!set.intersects(&loc("mesh/doubleSided")));
        assert!(!set.intersects(&loc("visibility")));
        assert!(set.intersects(&Locator::empty()));
    }
}
