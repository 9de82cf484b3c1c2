// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object identifiers: shared name segments and hierarchical scene paths.
//!
//! A [`ScenePath`] identifies one tracked object and doubles as the node
//! address inside the hierarchical representation. Paths order
//! lexicographically by segment, which places a parent immediately before
//! its descendants; the bridging layer's subtree checks rely on that
//! property and it must not be changed.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;

/// An immutable, cheaply clonable name segment.
///
/// Equality, ordering, and hashing all delegate to the underlying string,
/// so a `Name` can be looked up by `&str` in keyed collections.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<str>);

impl Name {
    /// Creates a name from a string slice.
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// A hierarchical object identifier: an immutable sequence of name segments.
///
/// The root path has no segments and prints as `/`. Paths are totally
/// ordered (lexicographically by segment), hashable, and cheap to clone.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenePath {
    segments: Arc<[Name]>,
}

impl ScenePath {
    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self {
            segments: Arc::from([]),
        }
    }

    /// Parses a path from a `/`-separated string.
    ///
    /// Empty segments are skipped, so `"/a//b/"` parses the same as `"/a/b"`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_segments(text.split('/').filter(|s| !s.is_empty()).map(Name::new))
    }

    /// Builds a path from name segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Name>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path with `name` appended as the last segment.
    #[must_use]
    pub fn append(&self, name: impl Into<Name>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.into());
        Self {
            segments: segments.into(),
        }
    }

    /// Returns the parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].into(),
        })
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        self.segments.last()
    }

    /// Returns the path's segments.
    #[must_use]
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns whether `ancestor` is an ancestor of (or equal to) this path.
    ///
    /// The root path is an ancestor of every path.
    #[must_use]
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        self.segments.len() >= ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }
}

impl From<&str> for ScenePath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in self.segments.iter() {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let path = ScenePath::parse("/world/geo/mesh0");
        assert_eq!(path.depth(), 3);
        assert_eq!(alloc::format!("{path}"), "/world/geo/mesh0");
    }

    #[test]
    fn root_displays_as_slash() {
        assert_eq!(alloc::format!("{}", ScenePath::root()), "/");
        assert!(ScenePath::root().is_root());
        assert_eq!(ScenePath::parse("/"), ScenePath::root());
    }

    #[test]
    fn redundant_separators_are_skipped() {
        assert_eq!(ScenePath::parse("/a//b/"), ScenePath::parse("/a/b"));
    }

    #[test]
    fn append_and_parent_are_inverse() {
        let base = ScenePath::parse("/a/b");
        let child = base.append("c");
        assert_eq!(child, ScenePath::parse("/a/b/c"));
        assert_eq!(child.parent(), Some(base));
        assert_eq!(ScenePath::root().parent(), None);
    }

    #[test]
    fn name_returns_last_segment() {
        assert_eq!(ScenePath::parse("/a/b").name().unwrap().as_str(), "b");
        assert_eq!(ScenePath::root().name(), None);
    }

    #[test]
    fn starts_with_ancestors() {
        let path = ScenePath::parse("/a/b/c");
        assert!(path.starts_with(&ScenePath::root()));
        assert!(path.starts_with(&ScenePath::parse("/a/b")));
        assert!(path.starts_with(&path));
        assert!(!path.starts_with(&ScenePath::parse("/a/x")));
        // Segment-wise, not string-prefix-wise.
        assert!(!ScenePath::parse("/ab").starts_with(&ScenePath::parse("/a")));
    }

    #[test]
    fn parent_sorts_before_descendants_before_siblings() {
        let parent = ScenePath::parse("/a/b");
        let child = ScenePath::parse("/a/b/c");
        let sibling = ScenePath::parse("/a/b2");
        assert!(parent < child);
        assert!(child < sibling, "descendants sort before the next sibling");
    }
}
