//! Actions delivered to the live grid.
//!
//! Every change the edit core makes is expressed as one of these variants
//! and matched exhaustively wherever actions are handled.

use crate::core::types::Position;
use crate::grid::side_effect::SideEffectSet;
use crate::grid::tile::TileKey;
use crate::grid::value::VoxelValue;

/// A request to change the value at one position.
///
/// Immutable: arranger stages produce modified copies rather than
/// mutating in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// The value to place
    pub value: VoxelValue,
    /// The value being overwritten, as read when the placement was created
    pub previous: VoxelValue,
    /// Side effects to trigger when applied
    pub side_effects: SideEffectSet,
}

impl Placement {
    pub fn new(
        position: Position,
        value: VoxelValue,
        previous: VoxelValue,
        side_effects: SideEffectSet,
    ) -> Self {
        Self {
            position,
            value,
            previous,
            side_effects,
        }
    }

    /// Copy of this placement with its side-effect set replaced
    pub fn with_side_effects(&self, side_effects: SideEffectSet) -> Self {
        Self {
            side_effects,
            ..self.clone()
        }
    }
}

/// One action in the mutation stream
#[derive(Clone, Debug, PartialEq)]
pub enum GridAction {
    /// Place a value at a position
    Place(Placement),
    /// Apply previously deferred side effects at a position
    ApplySideEffects {
        position: Position,
        effects: SideEffectSet,
    },
    /// Ensure the given tile is resident before later actions touch it
    LoadTile(TileKey),
}

impl GridAction {
    /// The position this action touches, if it is spatial
    pub fn position(&self) -> Option<Position> {
        match self {
            GridAction::Place(p) => Some(p.position),
            GridAction::ApplySideEffects { position, .. } => Some(*position),
            GridAction::LoadTile(_) => None,
        }
    }

    /// The tile this action touches, if it is spatial
    pub fn tile(&self) -> Option<TileKey> {
        self.position().map(TileKey::containing)
    }
}
