//! Newtype IDs for category identifiers before and after reconciliation.
//!
//! Using newtypes prevents accidentally writing an original COCO category id
//! where a reconciled zero-based class index is expected, and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category id as it appears in an input COCO file.
///
/// Any JSON integer is accepted, negative ids included.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        CategoryId::new(id)
    }
}

impl From<ClassIndex> for CategoryId {
    fn from(index: ClassIndex) -> Self {
        // Indices count distinct category names, far below i64::MAX.
        CategoryId::new(index.as_u64() as i64)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous zero-based class index shared by every output split.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIndex(pub u64);

impl ClassIndex {
    /// Creates a new ClassIndex.
    #[inline]
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassIndex({})", self.0)
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
