//! Session configuration

use crate::arrange::{
    ChunkBatchingArranger, ChunkLoadingArranger, DelayedLightingArranger, FastModeArranger,
    FastReorderArranger, MultiStageReorderArranger, Pipeline, ReorderConfig,
};
use crate::arrange::sink::ActionSink;
use crate::grid::SideEffectSet;

/// Which pipeline stages a session enables, and the side effects each
/// placement carries by default.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Re-order placements by structural priority
    pub reorder: bool,
    /// Strip all side effects (wins over the deferral options)
    pub fast_mode: bool,
    /// Defer and consolidate all side effects to end of batch
    pub defer_side_effects: bool,
    /// Defer only lighting recomputation to end of batch
    pub delay_lighting: bool,
    /// Group mutations by tile
    pub batch_tiles: bool,
    /// Insert explicit tile-residency instructions
    pub ensure_tiles: bool,
    /// Side-effect set attached to placements the session creates
    pub default_side_effects: SideEffectSet,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reorder: true,
            fast_mode: false,
            defer_side_effects: false,
            delay_lighting: true,
            batch_tiles: true,
            ensure_tiles: true,
            default_side_effects: SideEffectSet::all(),
        }
    }
}

impl<S: ActionSink> Pipeline<S> {
    /// The standard stage chain for a session.
    ///
    /// Upstream to downstream: priority reordering, side-effect handling,
    /// tile batching, tile residency. Disabled stages are simply absent.
    pub fn standard(config: &SessionConfig, reorder: &ReorderConfig, sink: S) -> Self {
        let mut pipeline = Pipeline::new(sink);
        if config.reorder {
            pipeline = pipeline.with_stage(Box::new(MultiStageReorderArranger::new(reorder)));
        }
        if config.fast_mode {
            pipeline = pipeline.with_stage(Box::new(FastModeArranger::new()));
        } else if config.defer_side_effects {
            pipeline = pipeline.with_stage(Box::new(FastReorderArranger::new()));
        } else if config.delay_lighting {
            pipeline = pipeline.with_stage(Box::new(DelayedLightingArranger::new()));
        }
        if config.batch_tiles {
            pipeline = pipeline.with_stage(Box::new(ChunkBatchingArranger::new()));
        }
        if config.ensure_tiles {
            pipeline = pipeline.with_stage(Box::new(ChunkLoadingArranger::new()));
        }
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrange::sink::BufferSink;
    use crate::core::types::Position;
    use crate::grid::{GridAction, Placement, VoxelType, VoxelValue};

    #[test]
    fn test_standard_chain_end_to_end() {
        let reorder = ReorderConfig::new();
        let mut pipeline =
            Pipeline::standard(&SessionConfig::default(), &reorder, BufferSink::new());

        pipeline
            .write(vec![GridAction::Place(Placement::new(
                Position::new(3, 3, 3),
                VoxelValue::new(VoxelType(1)),
                VoxelValue::empty(),
                SideEffectSet::all(),
            ))])
            .unwrap();
        pipeline.flush().unwrap();

        let sink = pipeline.into_sink();
        // Residency load, the placement (lighting stripped), then the
        // deferred lighting instruction batched into the same tile group
        let kinds: Vec<&str> = sink
            .actions()
            .iter()
            .map(|a| match a {
                GridAction::LoadTile(_) => "load",
                GridAction::Place(_) => "place",
                GridAction::ApplySideEffects { .. } => "effects",
            })
            .collect();
        assert_eq!(kinds, ["load", "place", "effects"]);
    }
}
