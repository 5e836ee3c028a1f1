//! Tile-residency instructions.
//!
//! The live grid may evict tiles at any time; this stage makes residency
//! explicit in the stream so the adapter never faults mid-group.

use crate::arrange::{Arranger, ArrangerContext};
use crate::core::types::Result;
use crate::grid::{GridAction, TileKey};
use std::mem;

/// Inserts an explicit load instruction before the first action touching
/// a new tile.
///
/// Operates on the full ordered action list of one flush window rather
/// than streaming: consecutive same-tile actions share a single load, so
/// a well-batched stream costs one load per tile group.
#[derive(Default)]
pub struct ChunkLoadingArranger {
    window: Vec<GridAction>,
}

impl ChunkLoadingArranger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Arranger for ChunkLoadingArranger {
    fn on_write(&mut self, _ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        self.window.extend(actions);
        Ok(())
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        let window = mem::take(&mut self.window);
        let mut out = Vec::with_capacity(window.len());
        let mut current: Option<TileKey> = None;
        for action in window {
            if let Some(tile) = action.tile() {
                if current != Some(tile) {
                    out.push(GridAction::LoadTile(tile));
                    current = Some(tile);
                }
            }
            out.push(action);
        }
        if !out.is_empty() {
            ctx.write(out)?;
        }
        ctx.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrange::Pipeline;
    use crate::arrange::sink::BufferSink;
    use crate::core::types::Position;
    use crate::grid::{Placement, SideEffectSet, VoxelType, VoxelValue};

    fn place_at(pos: Position) -> GridAction {
        GridAction::Place(Placement::new(
            pos,
            VoxelValue::new(VoxelType(1)),
            VoxelValue::empty(),
            SideEffectSet::NONE,
        ))
    }

    fn tiles_loaded(actions: &[GridAction]) -> Vec<TileKey> {
        actions
            .iter()
            .filter_map(|a| match a {
                GridAction::LoadTile(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_load_per_consecutive_tile_run() {
        let mut pipeline =
            Pipeline::new(BufferSink::new()).with_stage(Box::new(ChunkLoadingArranger::new()));
        pipeline
            .write(vec![
                place_at(Position::new(0, 0, 0)),
                place_at(Position::new(1, 0, 0)),
                place_at(Position::new(20, 0, 0)),
                place_at(Position::new(21, 0, 0)),
            ])
            .unwrap();
        pipeline.flush().unwrap();

        let sink = pipeline.into_sink();
        assert_eq!(
            tiles_loaded(sink.actions()),
            vec![TileKey::new(0, 0, 0), TileKey::new(1, 0, 0)]
        );
        // Load precedes the first action of its run
        assert!(matches!(sink.actions()[0], GridAction::LoadTile(_)));
        assert!(matches!(sink.actions()[1], GridAction::Place(_)));
    }

    #[test]
    fn test_alternating_tiles_reload() {
        // Without batching upstream, alternation costs a load per switch
        let mut pipeline =
            Pipeline::new(BufferSink::new()).with_stage(Box::new(ChunkLoadingArranger::new()));
        pipeline
            .write(vec![
                place_at(Position::new(0, 0, 0)),
                place_at(Position::new(20, 0, 0)),
                place_at(Position::new(1, 0, 0)),
            ])
            .unwrap();
        pipeline.flush().unwrap();

        assert_eq!(tiles_loaded(pipeline.sink().actions()).len(), 3);
    }

    #[test]
    fn test_resolves_residency_for_strict_grid() {
        use crate::arrange::sink::GridSink;
        use crate::grid::{GridAdapter, MemoryGrid};

        let grid = MemoryGrid::new().require_loaded_tiles();
        let mut pipeline =
            Pipeline::new(GridSink::new(grid)).with_stage(Box::new(ChunkLoadingArranger::new()));
        pipeline
            .write(vec![place_at(Position::new(40, 8, -3))])
            .unwrap();
        pipeline.flush().unwrap();

        let grid = pipeline.into_sink().into_grid();
        assert_eq!(
            grid.current_value(Position::new(40, 8, -3)),
            VoxelValue::new(VoxelType(1))
        );
    }
}
