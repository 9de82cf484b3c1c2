// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of value kinds the two representations exchange.

use alloc::sync::Arc;

use crate::matrix::Matrix4;
use crate::path::{Name, ScenePath};

/// A dynamically typed value carried by leaf data sources and the flat
/// query interface.
///
/// Absence is expressed as `Option<Value>` at the API surface, not as a
/// variant here.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// 2-vector.
    Vec2([f64; 2]),
    /// 3-vector.
    Vec3([f64; 3]),
    /// 4×4 matrix.
    Matrix(Matrix4),
    /// Interned token.
    Token(Name),
    /// Scene path.
    Path(ScenePath),
    /// Shared integer array.
    IntArray(Arc<[i32]>),
    /// Shared float array.
    FloatArray(Arc<[f64]>),
    /// Shared token array.
    TokenArray(Arc<[Name]>),
    /// Shared path array.
    PathArray(Arc<[ScenePath]>),
}

impl Value {
    /// Returns the contained bool, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained integer, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained float, if any.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained 2-vector, if any.
    #[must_use]
    pub fn as_vec2(&self) -> Option<[f64; 2]> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained 3-vector, if any.
    #[must_use]
    pub fn as_vec3(&self) -> Option<[f64; 3]> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained matrix, if any.
    #[must_use]
    pub fn as_matrix(&self) -> Option<Matrix4> {
        match self {
            Self::Matrix(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained token, if any.
    #[must_use]
    pub fn as_token(&self) -> Option<&Name> {
        match self {
            Self::Token(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained path, if any.
    #[must_use]
    pub fn as_path(&self) -> Option<&ScenePath> {
        match self {
            Self::Path(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained integer array, if any.
    #[must_use]
    pub fn as_int_array(&self) -> Option<&Arc<[i32]>> {
        match self {
            Self::IntArray(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained float array, if any.
    #[must_use]
    pub fn as_float_array(&self) -> Option<&Arc<[f64]>> {
        match self {
            Self::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained token array, if any.
    #[must_use]
    pub fn as_token_array(&self) -> Option<&Arc<[Name]>> {
        match self {
            Self::TokenArray(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained path array, if any.
    #[must_use]
    pub fn as_path_array(&self) -> Option<&Arc<[ScenePath]>> {
        match self {
            Self::PathArray(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Matrix4> for Value {
    fn from(v: Matrix4) -> Self {
        Self::Matrix(v)
    }
}

impl From<Name> for Value {
    fn from(v: Name) -> Self {
        Self::Token(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Token(Name::new(v))
    }
}

impl From<ScenePath> for Value {
    fn from(v: ScenePath) -> Self {
        Self::Path(v)
    }
}

impl From<Arc<[i32]>> for Value {
    fn from(v: Arc<[i32]>) -> Self {
        Self::IntArray(v)
    }
}

impl From<alloc::vec::Vec<i32>> for Value {
    fn from(v: alloc::vec::Vec<i32>) -> Self {
        Self::IntArray(v.into())
    }
}

impl From<alloc::vec::Vec<f64>> for Value {
    fn from(v: alloc::vec::Vec<f64>) -> Self {
        Self::FloatArray(v.into())
    }
}

impl From<alloc::vec::Vec<Name>> for Value {
    fn from(v: alloc::vec::Vec<Name>) -> Self {
        Self::TokenArray(v.into())
    }
}

impl From<alloc::vec::Vec<ScenePath>> for Value {
    fn from(v: alloc::vec::Vec<ScenePath>) -> Self {
        Self::PathArray(v.into())
    }
}
