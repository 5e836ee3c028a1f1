//! Visitor over the ground layer of each column.
//!
//! Used for operations that re-surface terrain: find the first ground
//! cell scanning down each column, then apply a function to the cells
//! below it with a depth counter.

use crate::core::types::{Column, Position, Result};
use crate::operation::{Lifecycle, Operation, Resume, RunContext};
use crate::traversal::mask::Mask2D;

/// Function applied to the ground layer of a column
pub trait LayerFunction {
    /// Whether the given cell counts as ground
    fn is_ground(&mut self, pos: Position) -> bool;

    /// Apply to one cell at `depth` below the found surface (the surface
    /// cell itself is depth 0). Returning false stops the column.
    fn apply(&mut self, pos: Position, depth: u32) -> Result<bool>;
}

/// Scans each column from `max_y` down to `min_y` for the first ground
/// cell, then applies the layer function downward from it.
///
/// Columns that are already ground immediately above `max_y` are skipped:
/// the caller wants only newly exposed surfaces.
pub struct LayerVisitor<I, M, F> {
    columns: I,
    mask: M,
    function: F,
    min_y: i32,
    max_y: i32,
    affected: usize,
    state: Lifecycle,
}

impl<I, M, F> LayerVisitor<I, M, F>
where
    I: Iterator<Item = Column>,
    M: Mask2D,
    F: LayerFunction,
{
    pub fn new(columns: I, mask: M, min_y: i32, max_y: i32, function: F) -> Self {
        Self {
            columns,
            mask,
            function,
            min_y,
            max_y,
            affected: 0,
            state: Lifecycle::default(),
        }
    }

    /// Number of cells the layer function counted as affected
    pub fn affected(&self) -> usize {
        self.affected
    }
}

impl<I, M, F> Operation for LayerVisitor<I, M, F>
where
    I: Iterator<Item = Column>,
    M: Mask2D,
    F: LayerFunction,
{
    fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;

        'columns: for column in self.columns.by_ref() {
            if !self.mask.test(column) {
                continue;
            }
            // Skip columns whose surface sits above the scanned range
            if self
                .function
                .is_ground(Position::new(column.x, self.max_y + 1, column.y))
            {
                continue;
            }

            let mut ground_y = None;
            for y in (self.min_y..=self.max_y).rev() {
                let pos = Position::new(column.x, y, column.y);
                if ground_y.is_none() && self.function.is_ground(pos) {
                    ground_y = Some(y);
                }
                if let Some(surface) = ground_y {
                    let depth = (surface - y) as u32;
                    if self.function.apply(pos, depth)? {
                        self.affected += 1;
                    } else {
                        continue 'columns;
                    }
                }
            }
        }

        self.state = Lifecycle::Exhausted;
        Ok(Resume::Done)
    }

    fn cancel(&mut self) {
        self.state = Lifecycle::Cancelled;
    }

    fn status_messages(&self, out: &mut Vec<String>) {
        out.push(format!("{} positions affected", self.affected));
    }
}
