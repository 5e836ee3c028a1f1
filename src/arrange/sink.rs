//! Terminal sinks for the arranger pipeline

use crate::core::types::Result;
use crate::grid::{GridAction, GridAdapter};

/// Receives the fully arranged action stream
pub trait ActionSink {
    fn write(&mut self, actions: Vec<GridAction>) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Applies each action to a live grid adapter, in delivered order.
///
/// Adapter failures are fatal: the error propagates up through the
/// operation loop and the remainder of the batch is abandoned. Actions
/// are never retried or silently dropped.
pub struct GridSink<G> {
    grid: G,
    applied: usize,
}

impl<G: GridAdapter> GridSink<G> {
    pub fn new(grid: G) -> Self {
        Self { grid, applied: 0 }
    }

    /// Total actions applied since construction
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }
}

impl<G: GridAdapter> ActionSink for GridSink<G> {
    fn write(&mut self, actions: Vec<GridAction>) -> Result<()> {
        for action in actions {
            match action {
                GridAction::Place(p) => {
                    self.grid.apply_mutation(p.position, &p.value, p.side_effects)?;
                }
                GridAction::ApplySideEffects { position, effects } => {
                    self.grid.apply_side_effects(position, effects)?;
                }
                GridAction::LoadTile(tile) => {
                    self.grid.ensure_tile(tile)?;
                }
            }
            self.applied += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Records delivered actions and flush boundaries without touching a
/// grid. Useful for dry runs and for inspecting stage output in tests.
#[derive(Default)]
pub struct BufferSink {
    actions: Vec<GridAction>,
    /// Index into `actions` at each flush boundary
    boundaries: Vec<usize>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delivered actions, in order
    pub fn actions(&self) -> &[GridAction] {
        &self.actions
    }

    /// Number of flush boundaries observed
    pub fn flush_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Actions grouped by the flush boundary they arrived before.
    ///
    /// Empty flush groups are omitted.
    pub fn groups(&self) -> Vec<&[GridAction]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for &end in &self.boundaries {
            if end > start {
                groups.push(&self.actions[start..end]);
            }
            start = end;
        }
        if start < self.actions.len() {
            groups.push(&self.actions[start..]);
        }
        groups
    }
}

impl ActionSink for BufferSink {
    fn write(&mut self, actions: Vec<GridAction>) -> Result<()> {
        self.actions.extend(actions);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.boundaries.push(self.actions.len());
        Ok(())
    }
}
