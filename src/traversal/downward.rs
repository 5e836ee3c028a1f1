//! Downward fill specialization.
//!
//! Used when filling down from a surface: the search must not climb back
//! upward through connected cavities.

use crate::core::types::Position;
use crate::traversal::bfs::{BreadthFirstSearch, CellFunction};
use crate::traversal::mask::{Mask, PointMask, TraversalMask, point_mask};
use glam::IVec3;

/// Restricts a traversal so elevation never increases away from the seed
/// layer.
///
/// A step is passable only if the source sits at the seed elevation
/// (lateral spread along the surface) or the step strictly decreases
/// elevation, and the inner mask passes.
pub struct DownwardMask<M> {
    inner: M,
    base_y: i32,
}

impl<M: TraversalMask> DownwardMask<M> {
    pub fn new(inner: M, base_y: i32) -> Self {
        Self { inner, base_y }
    }
}

impl<M: TraversalMask> TraversalMask for DownwardMask<M> {
    fn can_pass(&self, from: Position, to: Position) -> bool {
        (from.y == self.base_y || to.y < from.y) && self.inner.can_pass(from, to)
    }
}

/// Search that fills down from a surface at `base_y`.
///
/// Direction set is the four lateral neighbors plus straight down; the
/// upward direction is omitted entirely, and [`DownwardMask`] forbids
/// rising even through lateral chains below the seed layer.
pub fn downward_search<F, M>(
    function: F,
    mask: M,
    base_y: i32,
) -> BreadthFirstSearch<F, DownwardMask<PointMask<M>>>
where
    F: CellFunction,
    M: Mask,
{
    BreadthFirstSearch::new(function, DownwardMask::new(point_mask(mask), base_y))
        .with_directions(vec![
            IVec3::X,
            IVec3::NEG_X,
            IVec3::Z,
            IVec3::NEG_Z,
            IVec3::NEG_Y,
        ])
}
