//! Voxel grid data model and the live-grid boundary.
//!
//! The edit core never mutates a grid directly: every change is expressed
//! as a [`GridAction`] and delivered to a [`GridAdapter`] owned by the
//! host. [`MemoryGrid`] is the in-memory reference adapter used by tests
//! and the demo binary.

pub mod value;
pub mod side_effect;
pub mod action;
pub mod tile;
pub mod adapter;
pub mod memory;

pub use value::{VoxelType, VoxelValue};
pub use side_effect::{SideEffect, SideEffectSet};
pub use action::{GridAction, Placement};
pub use tile::{TileKey, TILE_SHIFT};
pub use adapter::GridAdapter;
pub use memory::MemoryGrid;
