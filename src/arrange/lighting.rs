//! Deferred lighting recomputation.
//!
//! Lighting is the most expensive side effect; this stage guarantees it
//! never runs more than once per position per batch while all other
//! side-effect kinds ride through on the placement itself.

use crate::arrange::{Arranger, ArrangerContext};
use crate::core::types::{Position, Result};
use crate::grid::{GridAction, SideEffect, SideEffectSet};
use std::collections::HashSet;
use std::mem;

/// Defers exactly the `Lighting` side effect to one end-of-batch pass.
#[derive(Default)]
pub struct DelayedLightingArranger {
    pending: HashSet<Position>,
    /// Positions in the order first touched this window
    order: Vec<Position>,
}

impl DelayedLightingArranger {
    pub fn new() -> Self {
        Self::default()
    }

    fn defer(&mut self, position: Position) {
        if self.pending.insert(position) {
            self.order.push(position);
        }
    }
}

impl Arranger for DelayedLightingArranger {
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()> {
        let mut forwarded = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                GridAction::Place(p) if p.side_effects.contains(SideEffect::Lighting) => {
                    self.defer(p.position);
                    let stripped = p.side_effects.without(SideEffect::Lighting);
                    forwarded.push(GridAction::Place(p.with_side_effects(stripped)));
                }
                GridAction::ApplySideEffects { position, effects }
                    if effects.contains(SideEffect::Lighting) =>
                {
                    self.defer(position);
                    let rest = effects.without(SideEffect::Lighting);
                    if !rest.is_empty() {
                        forwarded.push(GridAction::ApplySideEffects { position, effects: rest });
                    }
                }
                other => forwarded.push(other),
            }
        }
        ctx.write(forwarded)
    }

    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()> {
        self.pending.clear();
        let batch: Vec<GridAction> = mem::take(&mut self.order)
            .into_iter()
            .map(|position| GridAction::ApplySideEffects {
                position,
                effects: SideEffectSet::only(SideEffect::Lighting),
            })
            .collect();
        if !batch.is_empty() {
            ctx.write(batch)?;
        }
        ctx.flush()
    }
}
