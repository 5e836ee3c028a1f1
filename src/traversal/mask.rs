//! Predicate seams for traversal and visitors.
//!
//! Masks are supplied by an upstream configuration layer; the core only
//! evaluates them.

use crate::core::types::{Column, Position};

/// Boolean test over a single position
pub trait Mask {
    fn test(&self, pos: Position) -> bool;
}

impl<F: Fn(Position) -> bool> Mask for F {
    fn test(&self, pos: Position) -> bool {
        self(pos)
    }
}

/// Boolean test over a column (2D projection)
pub trait Mask2D {
    fn test(&self, column: Column) -> bool;
}

impl<F: Fn(Column) -> bool> Mask2D for F {
    fn test(&self, column: Column) -> bool {
        self(column)
    }
}

/// Gate on a pair of adjacent positions: may a search step `from -> to`?
pub trait TraversalMask {
    fn can_pass(&self, from: Position, to: Position) -> bool;
}

impl<F: Fn(Position, Position) -> bool> TraversalMask for F {
    fn can_pass(&self, from: Position, to: Position) -> bool {
        self(from, to)
    }
}

/// Adapt a single-position mask into a traversal mask that tests only the
/// destination.
pub struct PointMask<M: Mask>(M);

impl<M: Mask> TraversalMask for PointMask<M> {
    fn can_pass(&self, _from: Position, to: Position) -> bool {
        self.0.test(to)
    }
}

/// Traversal mask gating propagation on the destination cell alone
pub fn point_mask<M: Mask>(mask: M) -> PointMask<M> {
    PointMask(mask)
}
