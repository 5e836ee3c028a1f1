//! Coarse spatial bucketing of positions into fixed-size tiles

use crate::core::types::Position;

/// Tiles are 2^TILE_SHIFT voxels on a side (16)
pub const TILE_SHIFT: i32 = 4;

/// Integer coordinate identifying one tile of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TileKey {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Tile containing the given position
    ///
    /// Arithmetic shift, so negative coordinates bucket correctly
    /// (-1 >> 4 == -1, not 0).
    pub fn containing(pos: Position) -> Self {
        Self {
            x: pos.x >> TILE_SHIFT,
            y: pos.y >> TILE_SHIFT,
            z: pos.z >> TILE_SHIFT,
        }
    }
}
