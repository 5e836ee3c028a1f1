//! In-memory reference grid.
//!
//! Backs tests and the demo binary. Hosts with a real simulation loop
//! implement [`GridAdapter`] over their own storage instead.

use crate::core::error::Error;
use crate::core::types::{Position, Result};
use crate::grid::adapter::GridAdapter;
use crate::grid::side_effect::SideEffectSet;
use crate::grid::tile::TileKey;
use crate::grid::value::VoxelValue;
use std::collections::{HashMap, HashSet};

/// Sparse in-memory voxel grid with an optional mutation-count ceiling.
#[derive(Default)]
pub struct MemoryGrid {
    cells: HashMap<Position, VoxelValue>,
    /// Total mutations applied over the grid's lifetime
    mutation_count: usize,
    /// Fail with `CeilingExceeded` once this many mutations were applied
    ceiling: Option<usize>,
    loaded_tiles: HashSet<TileKey>,
    /// When set, mutations outside a loaded tile fail with `TileNotLoaded`
    require_loaded_tiles: bool,
    effects_log: Vec<(Position, SideEffectSet)>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid that refuses further mutations once `ceiling` were applied
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            ceiling: Some(ceiling),
            ..Self::default()
        }
    }

    /// Require `ensure_tile` before mutations touch a tile
    pub fn require_loaded_tiles(mut self) -> Self {
        self.require_loaded_tiles = true;
        self
    }

    /// Seed a value directly, bypassing the ceiling and tile checks
    pub fn seed(&mut self, pos: Position, value: VoxelValue) {
        self.cells.insert(pos, value);
    }

    pub fn mutation_count(&self) -> usize {
        self.mutation_count
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.values().filter(|v| !v.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every side-effect application observed, in order
    pub fn effects_log(&self) -> &[(Position, SideEffectSet)] {
        &self.effects_log
    }

    fn check_ceiling(&self) -> Result<()> {
        if let Some(limit) = self.ceiling {
            if self.mutation_count >= limit {
                return Err(Error::CeilingExceeded(limit));
            }
        }
        Ok(())
    }

    fn check_tile(&self, pos: Position) -> Result<()> {
        if self.require_loaded_tiles {
            let tile = TileKey::containing(pos);
            if !self.loaded_tiles.contains(&tile) {
                return Err(Error::TileNotLoaded(tile));
            }
        }
        Ok(())
    }
}

impl GridAdapter for MemoryGrid {
    fn current_value(&self, pos: Position) -> VoxelValue {
        self.cells.get(&pos).cloned().unwrap_or_default()
    }

    fn apply_mutation(
        &mut self,
        pos: Position,
        value: &VoxelValue,
        side_effects: SideEffectSet,
    ) -> Result<bool> {
        self.check_ceiling()?;
        self.check_tile(pos)?;
        self.mutation_count += 1;
        if !side_effects.is_empty() {
            self.effects_log.push((pos, side_effects));
        }
        let changed = self.cells.get(&pos) != Some(value)
            && !(value.is_empty() && !self.cells.contains_key(&pos));
        if value.is_empty() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, value.clone());
        }
        Ok(changed)
    }

    fn apply_side_effects(&mut self, pos: Position, effects: SideEffectSet) -> Result<()> {
        self.check_tile(pos)?;
        self.effects_log.push((pos, effects));
        Ok(())
    }

    fn ensure_tile(&mut self, tile: TileKey) -> Result<()> {
        self.loaded_tiles.insert(tile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::value::VoxelType;

    #[test]
    fn test_empty_reads() {
        let grid = MemoryGrid::new();
        assert!(grid.current_value(Position::new(1, 2, 3)).is_empty());
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn test_apply_and_clear() {
        let mut grid = MemoryGrid::new();
        let stone = VoxelValue::new(VoxelType(1));
        let pos = Position::new(0, 1, 0);

        assert!(grid.apply_mutation(pos, &stone, SideEffectSet::NONE).unwrap());
        assert_eq!(grid.current_value(pos), stone);

        // Re-placing the same value is not a change
        assert!(!grid.apply_mutation(pos, &stone, SideEffectSet::NONE).unwrap());

        assert!(grid
            .apply_mutation(pos, &VoxelValue::empty(), SideEffectSet::NONE)
            .unwrap());
        assert!(grid.current_value(pos).is_empty());
        assert_eq!(grid.mutation_count(), 3);
    }

    #[test]
    fn test_ceiling() {
        let mut grid = MemoryGrid::with_ceiling(2);
        let v = VoxelValue::new(VoxelType(1));
        grid.apply_mutation(Position::new(0, 0, 0), &v, SideEffectSet::NONE).unwrap();
        grid.apply_mutation(Position::new(1, 0, 0), &v, SideEffectSet::NONE).unwrap();

        let err = grid
            .apply_mutation(Position::new(2, 0, 0), &v, SideEffectSet::NONE)
            .unwrap_err();
        assert!(matches!(err, Error::CeilingExceeded(2)));
    }

    #[test]
    fn test_tile_residency() {
        let mut grid = MemoryGrid::new().require_loaded_tiles();
        let v = VoxelValue::new(VoxelType(1));
        let pos = Position::new(20, 0, 0);

        let err = grid.apply_mutation(pos, &v, SideEffectSet::NONE).unwrap_err();
        assert!(matches!(err, Error::TileNotLoaded(t) if t == TileKey::new(1, 0, 0)));

        grid.ensure_tile(TileKey::containing(pos)).unwrap();
        assert!(grid.apply_mutation(pos, &v, SideEffectSet::NONE).unwrap());
    }
}
