//! Side-effect interception stages.
//!
//! Both stages strip the per-mutation side-effect sets from forwarded
//! placements. [`FastModeArranger`] discards them outright;
//! [`FastReorderArranger`] defers them, collapsing repeated and cascading
//! recomputation into one consolidated end-of-batch pass.

use crate::arrange::{Arranger, ArrangerContext};
use crate::core::types::{Position, Result};
use crate::grid::{GridAction, SideEffectSet};
use std::collections::HashMap;
use std::mem;

/// Strips side effects unconditionally.
#[derive(Default)]
pub struct FastModeArranger;

impl FastModeArranger {
    pub fn new() -> Self {
        Self
    }
}

impl Arranger for FastModeArranger {
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        let stripped: Vec<GridAction> = actions
            .into_iter()
            .filter_map(|action| match action {
                GridAction::Place(p) => {
                    Some(GridAction::Place(p.with_side_effects(SideEffectSet::NONE)))
                }
                GridAction::ApplySideEffects { .. } => None,
                other => Some(other),
            })
            .collect();
        ctx.write(stripped)
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        ctx.flush()
    }
}

/// Defers side effects to the end of the batch.
///
/// Placements are forwarded with empty side-effect sets while one
/// consolidated per-position instruction accumulates the union of
/// everything stripped. On flush the consolidated batch is written after
/// all placements and flushed with them: each position receives at most
/// one side-effect instruction per flush window.
#[derive(Default)]
pub struct FastReorderArranger {
    deferred: HashMap<Position, SideEffectSet>,
    /// Positions in the order first touched this window
    order: Vec<Position>,
}

impl FastReorderArranger {
    pub fn new() -> Self {
        Self::default()
    }

    fn defer(&mut self, position: Position, effects: SideEffectSet) {
        if effects.is_empty() {
            return;
        }
        let entry = self.deferred.entry(position).or_insert_with(|| {
            self.order.push(position);
            SideEffectSet::NONE
        });
        *entry = entry.union(effects);
    }
}

impl Arranger for FastReorderArranger {
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        let mut forwarded = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                GridAction::Place(p) => {
                    self.defer(p.position, p.side_effects);
                    forwarded.push(GridAction::Place(p.with_side_effects(SideEffectSet::NONE)));
                }
                GridAction::ApplySideEffects { position, effects } => {
                    // Already-deferred instructions consolidate too
                    self.defer(position, effects);
                }
                other => forwarded.push(other),
            }
        }
        ctx.write(forwarded)
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        let order = mem::take(&mut self.order);
        let mut deferred = mem::take(&mut self.deferred);
        let batch: Vec<GridAction> = order
            .into_iter()
            .filter_map(|position| {
                deferred
                    .remove(&position)
                    .map(|effects| GridAction::ApplySideEffects { position, effects })
            })
            .collect();
        if !batch.is_empty() {
            ctx.write(batch)?;
        }
        ctx.flush()
    }
}
