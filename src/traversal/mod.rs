//! Generic breadth-first connectivity traversal.
//!
//! Flood-fill style region algorithms are built on the iterative
//! [`BreadthFirstSearch`] engine; which neighbors a search may cross into
//! is decided by a [`TraversalMask`].

pub mod mask;
pub mod bfs;
pub mod downward;

pub use mask::{Mask, Mask2D, PointMask, TraversalMask, point_mask};
pub use bfs::{AXES, BreadthFirstSearch, CellFunction, HORIZONTAL_DIAGONALS};
pub use downward::{DownwardMask, downward_search};
