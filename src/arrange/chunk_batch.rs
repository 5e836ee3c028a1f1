//! Spatial batching of the mutation stream.
//!
//! Groups placements by tile so the adapter only needs one tile resident
//! at a time while a group applies.

use crate::arrange::{Arranger, ArrangerContext};
use crate::core::types::Result;
use crate::grid::{GridAction, TileKey};
use std::collections::HashMap;
use std::mem;

/// Partitions spatial actions into per-tile ordered lists.
///
/// Non-spatial actions pass through immediately, so they flush before any
/// bucket group. On flush each tile's actions are emitted as one
/// contiguous, separately flushed group, in first-touch tile order.
#[derive(Default)]
pub struct ChunkBatchingArranger {
    buckets: HashMap<TileKey, Vec<GridAction>>,
    /// Tiles in the order first touched this window
    order: Vec<TileKey>,
}

impl ChunkBatchingArranger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Arranger for ChunkBatchingArranger {
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        for action in actions {
            match action.tile() {
                Some(tile) => {
                    let bucket = self.buckets.entry(tile).or_insert_with(|| {
                        self.order.push(tile);
                        Vec::new()
                    });
                    bucket.push(action);
                }
                None => ctx.write(vec![action])?,
            }
        }
        Ok(())
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        for tile in mem::take(&mut self.order) {
            if let Some(bucket) = self.buckets.remove(&tile) {
                ctx.write(bucket)?;
                ctx.flush()?;
            }
        }
        self.buckets.clear();
        ctx.flush()
    }
}
