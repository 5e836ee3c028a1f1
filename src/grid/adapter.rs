//! The live-grid boundary.
//!
//! Only the adapter may mutate the grid; synchronization against other
//! readers and writers is the adapter's responsibility, outside this
//! core. Implemented once per target platform.

use crate::core::types::{Position, Result};
use crate::grid::side_effect::SideEffectSet;
use crate::grid::tile::TileKey;
use crate::grid::value::VoxelValue;

/// Host-owned adapter to the mutable grid.
///
/// Per-mutation failures (tile not resident, mutation ceiling exceeded)
/// propagate as fatal errors through the operation loop, aborting the
/// remainder of the batch. No caller retries individual mutations.
pub trait GridAdapter {
    /// Current value at a position; empty where nothing was ever placed
    fn current_value(&self, pos: Position) -> VoxelValue;

    /// Apply one mutation.
    ///
    /// Returns `Ok(true)` if the grid changed, `Ok(false)` if the position
    /// already held the value.
    fn apply_mutation(
        &mut self,
        pos: Position,
        value: &VoxelValue,
        side_effects: SideEffectSet,
    ) -> Result<bool>;

    /// Apply previously deferred side effects at a position
    fn apply_side_effects(&mut self, pos: Position, effects: SideEffectSet) -> Result<()>;

    /// Make a tile resident before mutations touch it
    fn ensure_tile(&mut self, tile: TileKey) -> Result<()>;
}
