//! Core type aliases and re-exports

pub use glam::{IVec2, IVec3};

/// Integer grid coordinate of a single voxel
pub type Position = IVec3;

/// Integer (x, z) coordinate of a vertical column
pub type Column = IVec2;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
