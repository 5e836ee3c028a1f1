//! The edit session: high-level bulk operations over one grid.

use crate::arrange::sink::GridSink;
use crate::arrange::{Pipeline, ReorderConfig};
use crate::core::types::{Column, Position, Result};
use crate::grid::{GridAction, GridAdapter, Placement, VoxelType, VoxelValue};
use crate::operation::drivers::complete;
use crate::operation::RunContext;
use crate::session::config::SessionConfig;
use crate::traversal::bfs::BreadthFirstSearch;
use crate::traversal::downward::downward_search;
use crate::traversal::mask::point_mask;
use crate::visitor::layer::{LayerFunction, LayerVisitor};
use std::cell::RefCell;

/// One in-flight bulk edit over a grid.
///
/// Owned by a single logical thread; mutations route through the
/// session's arranger pipeline and reach the grid on [`flush`].
/// Already-applied mutations survive errors and cancellation; undo is an
/// external capability.
///
/// [`flush`]: EditSession::flush
pub struct EditSession<G: GridAdapter> {
    pipeline: Pipeline<GridSink<G>>,
    config: SessionConfig,
    /// Placements routed since the last flush
    pending: usize,
}

impl<G: GridAdapter> EditSession<G> {
    pub fn new(grid: G, config: SessionConfig, reorder: &ReorderConfig) -> Self {
        let pipeline = Pipeline::standard(&config, reorder, GridSink::new(grid));
        Self {
            pipeline,
            config,
            pending: 0,
        }
    }

    /// Current value at a position.
    ///
    /// Reads go straight to the adapter: mutations still buffered in the
    /// pipeline are not visible until flushed.
    pub fn current_value(&self, pos: Position) -> VoxelValue {
        self.pipeline.sink().grid().current_value(pos)
    }

    /// Route one placement through the pipeline.
    ///
    /// Returns whether the new value differs from the one it overwrites.
    pub fn set_voxel(&mut self, pos: Position, value: VoxelValue) -> Result<bool> {
        let previous = self.current_value(pos);
        let changed = previous != value;
        let placement = Placement::new(pos, value, previous, self.config.default_side_effects);
        self.pipeline.write(vec![GridAction::Place(placement)])?;
        self.pending += 1;
        Ok(changed)
    }

    /// Propagate a flush boundary through the pipeline to the grid.
    ///
    /// Everything routed before this call is fully applied, in arranged
    /// order, before anything routed after it.
    pub fn flush(&mut self) -> Result<()> {
        log::debug!("flushing {} pending placements", self.pending);
        self.pending = 0;
        self.pipeline.flush()
    }

    /// Consume the session, flushing remaining work, and return the grid
    pub fn into_grid(mut self) -> Result<G> {
        self.flush()?;
        Ok(self.pipeline.into_sink().into_grid())
    }

    /// Flood-fill empty space downward from an origin.
    ///
    /// Spreads laterally across the origin's elevation within `radius`
    /// (measured in the horizontal plane) and sinks up to `depth` cells,
    /// never rising. Returns the number of cells filled.
    pub fn fill_down(
        &mut self,
        origin: Position,
        value: &VoxelValue,
        radius: u32,
        depth: u32,
    ) -> Result<usize> {
        let radius_sq = (radius as i64) * (radius as i64);
        let min_y = origin.y - depth as i32;

        let affected = {
            let cell = RefCell::new(&mut *self);
            let mask = |pos: Position| {
                let dx = (pos.x - origin.x) as i64;
                let dz = (pos.z - origin.z) as i64;
                dx * dx + dz * dz <= radius_sq
                    && pos.y >= min_y
                    && cell.borrow().current_value(pos).is_empty()
            };
            let function = |pos: Position| -> Result<bool> {
                cell.borrow_mut().set_voxel(pos, value.clone())
            };

            let mut search = downward_search(function, mask, origin.y);
            search.visit(origin);
            complete(&mut search, &RunContext::new())?;
            search.affected()
        };

        self.flush()?;
        log::debug!("fill_down affected {affected} cells from {origin}");
        Ok(affected)
    }

    /// Replace every cell connected to the origin whose type is in
    /// `matches` with the given value.
    ///
    /// Face adjacency; the origin is always attempted even if its type
    /// does not match. Returns the number of cells replaced.
    pub fn flood_replace(
        &mut self,
        origin: Position,
        matches: &[VoxelType],
        value: &VoxelValue,
    ) -> Result<usize> {
        let affected = {
            let cell = RefCell::new(&mut *self);
            let mask = point_mask(|pos: Position| {
                matches.contains(&cell.borrow().current_value(pos).type_id())
            });
            let function = |pos: Position| -> Result<bool> {
                let mut session = cell.borrow_mut();
                if !matches.contains(&session.current_value(pos).type_id()) {
                    return Ok(false);
                }
                session.set_voxel(pos, value.clone())
            };

            let mut search = BreadthFirstSearch::new(function, mask);
            search.visit(origin);
            complete(&mut search, &RunContext::new())?;
            search.affected()
        };

        self.flush()?;
        Ok(affected)
    }

    /// Apply a vertical material profile below each newly exposed
    /// surface.
    ///
    /// For each column, scans `max_y` down to `min_y` for the first cell
    /// whose type is in `ground`; from there, `layers[depth]` is placed
    /// per cell until the profile runs out. Columns already ground above
    /// `max_y` are skipped. Returns the number of cells placed.
    pub fn overlay_layers(
        &mut self,
        columns: impl Iterator<Item = Column>,
        min_y: i32,
        max_y: i32,
        ground: &[VoxelType],
        layers: &[VoxelValue],
    ) -> Result<usize> {
        let affected = {
            let cell = RefCell::new(&mut *self);
            let function = Overlay { cell: &cell, ground, layers };
            let mut visitor = LayerVisitor::new(columns, |_: Column| true, min_y, max_y, function);
            complete(&mut visitor, &RunContext::new())?;
            visitor.affected()
        };

        self.flush()?;
        Ok(affected)
    }
}

/// Layer function placing a fixed profile below the surface
struct Overlay<'a, 'b, G: GridAdapter> {
    cell: &'a RefCell<&'b mut EditSession<G>>,
    ground: &'a [VoxelType],
    layers: &'a [VoxelValue],
}

impl<G: GridAdapter> LayerFunction for Overlay<'_, '_, G> {
    fn is_ground(&mut self, pos: Position) -> bool {
        self.ground
            .contains(&self.cell.borrow().current_value(pos).type_id())
    }

    fn apply(&mut self, pos: Position, depth: u32) -> Result<bool> {
        let Some(layer) = self.layers.get(depth as usize) else {
            return Ok(false);
        };
        self.cell.borrow_mut().set_voxel(pos, layer.clone())
    }
}
