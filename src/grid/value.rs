//! Voxel value type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for a kind of voxel
///
/// Type 0 is reserved for the inert empty voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoxelType(pub u16);

impl VoxelType {
    /// The empty/air voxel type
    pub const EMPTY: VoxelType = VoxelType(0);

    /// Whether this is the inert empty type
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

/// The content of one grid cell: a type plus its property set, optionally
/// carrying a structured-data blob for voxels with extended state.
///
/// Immutable value type. Builders return modified copies; nothing in the
/// edit core mutates a `VoxelValue` in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoxelValue {
    type_id: VoxelType,
    properties: BTreeMap<String, String>,
    extra: Option<serde_json::Value>,
}

impl VoxelValue {
    /// The inert empty value
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a plain value of the given type with no properties
    pub fn new(type_id: VoxelType) -> Self {
        Self {
            type_id,
            properties: BTreeMap::new(),
            extra: None,
        }
    }

    /// Return a copy with the given property set
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Return a copy carrying the given structured-data blob
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn type_id(&self) -> VoxelType {
        self.type_id
    }

    /// Look up a property by key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The attached structured-data blob, if any
    pub fn extra(&self) -> Option<&serde_json::Value> {
        self.extra.as_ref()
    }

    /// Whether this value is the inert empty voxel
    pub fn is_empty(&self) -> bool {
        self.type_id.is_empty()
    }
}
