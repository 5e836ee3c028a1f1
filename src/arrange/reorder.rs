//! Multi-stage placement reordering.
//!
//! Dependent structures must be placed after, and cleared before,
//! whatever they structurally depend on. This stage buckets placements by
//! priority and emits the buckets in strict order at each flush.

use crate::arrange::{Arranger, ArrangerContext};
use crate::core::types::Result;
use crate::grid::{GridAction, Placement, SideEffectSet, VoxelType, VoxelValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::mem;

/// Emission order for placements within one flush window.
///
/// A 7-level total order: clears run first (most-dependent first), then
/// static placements, then the dependent tiers. Derived from
/// [`ReorderConfig`]; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlacementPriority {
    ClearFinal,
    ClearBlockDependent,
    ClearPhysics,
    Static,
    Physics,
    BlockDependent,
    Final,
}

impl PlacementPriority {
    /// All priorities, in emission order
    pub const ORDER: [PlacementPriority; 7] = [
        PlacementPriority::ClearFinal,
        PlacementPriority::ClearBlockDependent,
        PlacementPriority::ClearPhysics,
        PlacementPriority::Static,
        PlacementPriority::Physics,
        PlacementPriority::BlockDependent,
        PlacementPriority::Final,
    ];

    fn index(self) -> usize {
        match self {
            PlacementPriority::ClearFinal => 0,
            PlacementPriority::ClearBlockDependent => 1,
            PlacementPriority::ClearPhysics => 2,
            PlacementPriority::Static => 3,
            PlacementPriority::Physics => 4,
            PlacementPriority::BlockDependent => 5,
            PlacementPriority::Final => 6,
        }
    }
}

/// Immutable voxel-type -> priority table, constructed at startup and
/// passed by reference into the arranger.
///
/// Only `Physics`, `BlockDependent` and `Final` entries are meaningful;
/// unmapped types are `Static`. Serde-derived so hosts can load the table
/// from configuration and tests can override it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReorderConfig {
    priorities: HashMap<VoxelType, PlacementPriority>,
}

impl ReorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a placement priority to a voxel type
    pub fn with_priority(mut self, type_id: VoxelType, priority: PlacementPriority) -> Self {
        self.priorities.insert(type_id, priority);
        self
    }

    /// Priority of a voxel type; `Static` if unmapped. Never discards.
    pub fn priority_of(&self, type_id: VoxelType) -> PlacementPriority {
        self.priorities
            .get(&type_id)
            .copied()
            .unwrap_or(PlacementPriority::Static)
    }
}

/// Re-orders placements into the seven priority stages.
///
/// For every incoming placement the overwritten value is inspected: if it
/// carries a non-`Static` priority, a clearing placement is synthesized
/// and routed ahead of everything that could depend on it. The original
/// placement is queued by its own priority. On flush the buckets are
/// emitted strictly in priority order, one sub-flush each.
pub struct MultiStageReorderArranger {
    config: ReorderConfig,
    buckets: [Vec<GridAction>; 7],
}

impl MultiStageReorderArranger {
    pub fn new(config: &ReorderConfig) -> Self {
        Self {
            config: config.clone(),
            buckets: Default::default(),
        }
    }

    /// The clearing placement for a destructive overwrite, and the bucket
    /// it belongs to. `None` when the overwritten value is `Static`
    /// (nothing can depend on it being gone early).
    fn clear_action(&self, placement: &Placement) -> Option<(PlacementPriority, GridAction)> {
        let overwritten = self.config.priority_of(placement.previous.type_id());

        let clear_priority = match overwritten {
            PlacementPriority::Final => PlacementPriority::ClearFinal,
            PlacementPriority::BlockDependent => PlacementPriority::ClearBlockDependent,
            PlacementPriority::Physics => PlacementPriority::ClearPhysics,
            _ => return None,
        };

        // Replace with the inert default, or with the new value directly
        // if that value is itself inert.
        let replacement = if placement.value.is_empty() {
            placement.value.clone()
        } else {
            VoxelValue::empty()
        };
        let clear = Placement::new(
            placement.position,
            replacement,
            placement.previous.clone(),
            SideEffectSet::NONE,
        );
        Some((clear_priority, GridAction::Place(clear)))
    }
}

impl Arranger for MultiStageReorderArranger {
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        for action in actions {
            let placement = match action {
                GridAction::Place(p) => p,
                // Non-placement actions carry no priority; pass through
                other => {
                    ctx.write(vec![other])?;
                    continue;
                }
            };

            if let Some((clear_priority, clear)) = self.clear_action(&placement) {
                if clear_priority == PlacementPriority::ClearFinal {
                    // Fast path: by construction of the priority table no
                    // placement in this window can depend on a Final
                    // value, so its removal is safe to emit immediately.
                    ctx.write(vec![clear])?;
                } else {
                    self.buckets[clear_priority.index()].push(clear);
                }
            }

            let priority = self.config.priority_of(placement.value.type_id());
            self.buckets[priority.index()].push(GridAction::Place(placement));
        }
        Ok(())
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        for priority in PlacementPriority::ORDER {
            let bucket = mem::take(&mut self.buckets[priority.index()]);
            if !bucket.is_empty() {
                ctx.write(bucket)?;
            }
            ctx.flush()?;
        }
        Ok(())
    }
}
