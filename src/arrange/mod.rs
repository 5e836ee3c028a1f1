//! The mutation-arranging pipeline.
//!
//! An ordered chain of [`Arranger`] stages transforms the action stream
//! before it reaches the live grid. A flush is the unit of atomicity:
//! stage N's `on_flush` output is fully delivered to stage N+1 before
//! stage N+1's own `on_flush` runs, so flush window N is completely
//! applied before window N+1 begins. Between flush boundaries stages may
//! reorder actions arbitrarily.
//!
//! Stages own their scratch state directly and clear it on flush; a
//! pipeline instance belongs to exactly one in-flight edit session and is
//! not thread-safe.

pub mod sink;
pub mod reorder;
pub mod chunk_batch;
pub mod side_effects;
pub mod lighting;
pub mod chunk_load;

pub use sink::{ActionSink, BufferSink, GridSink};
pub use reorder::{MultiStageReorderArranger, PlacementPriority, ReorderConfig};
pub use chunk_batch::ChunkBatchingArranger;
pub use side_effects::{FastModeArranger, FastReorderArranger};
pub use lighting::DelayedLightingArranger;
pub use chunk_load::ChunkLoadingArranger;

use crate::core::types::Result;
use crate::grid::GridAction;

/// One stage of the pipeline.
///
/// A stage must never silently drop an action: everything it consumes is
/// either forwarded (possibly transformed) via the context or buffered
/// until its own `on_flush` releases it.
pub trait Arranger {
    /// Consume a batch of incoming actions, forwarding transformed ones
    /// downstream via [`ArrangerContext::write`] or buffering them.
    fn on_write(&mut self, ctx: &mut dyn ArrangerContext, actions: Vec<GridAction>) -> Result<()>;

    /// Release internally buffered actions downstream, then propagate the
    /// flush boundary with [`ArrangerContext::flush`].
    fn on_flush(&mut self, ctx: &mut dyn ArrangerContext) -> Result<()>;
}

/// Downstream surface handed to a stage: everything written goes to the
/// next stage (or the terminal sink), flush propagates the boundary.
pub trait ArrangerContext {
    fn write(&mut self, actions: Vec<GridAction>) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// An ordered chain of arrangers terminating in a sink.
pub struct Pipeline<S> {
    stages: Vec<Box<dyn Arranger>>,
    sink: S,
}

/// Context over the remaining stage slice; recursion bottoms out at the
/// sink.
struct StageContext<'a> {
    rest: &'a mut [Box<dyn Arranger>],
    sink: &'a mut dyn ActionSink,
}

impl ArrangerContext for StageContext<'_> {
    fn write(&mut self, actions: Vec<GridAction>) -> Result<()> {
        match self.rest.split_first_mut() {
            Some((next, rest)) => {
                let mut ctx = StageContext { rest, sink: self.sink };
                next.on_write(&mut ctx, actions)
            }
            None => self.sink.write(actions),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self.rest.split_first_mut() {
            Some((next, rest)) => {
                let mut ctx = StageContext { rest, sink: self.sink };
                next.on_flush(&mut ctx)
            }
            None => self.sink.flush(),
        }
    }
}

impl<S: ActionSink> Pipeline<S> {
    /// Pipeline with no stages: actions pass straight to the sink
    pub fn new(sink: S) -> Self {
        Self { stages: Vec::new(), sink }
    }

    /// Append a stage at the downstream end of the chain
    pub fn with_stage(mut self, stage: Box<dyn Arranger>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Write a batch of actions into the head of the chain
    pub fn write(&mut self, actions: Vec<GridAction>) -> Result<()> {
        let mut ctx = StageContext { rest: &mut self.stages, sink: &mut self.sink };
        ctx.write(actions)
    }

    /// Flush the whole chain, in order
    pub fn flush(&mut self) -> Result<()> {
        let mut ctx = StageContext { rest: &mut self.stages, sink: &mut self.sink };
        ctx.flush()
    }

    /// The terminal sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drop the stages and recover the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
