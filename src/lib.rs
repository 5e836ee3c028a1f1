//! Voxedit - A cooperative bulk-edit core for voxel grids
//!
//! Applies very large batches of discrete mutations to a mutable 3D voxel
//! grid without blocking the host's simulation loop. Bulk edits are split
//! into cooperative [`operation::Operation`]s, positions to touch are
//! discovered by [`traversal`] and [`visitor`] drivers, and the resulting
//! mutation stream is reordered and batched by the [`arrange`] pipeline
//! before it reaches the live grid behind [`grid::GridAdapter`].

pub mod core;
pub mod grid;
pub mod operation;
pub mod traversal;
pub mod visitor;
pub mod arrange;
pub mod session;
