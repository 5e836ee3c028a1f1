//! Cooperative, resumable units of work.
//!
//! Bulk edits implement [`Operation`] so the host can split them across
//! simulation-loop iterations. Suspension granularity is exactly one
//! [`Operation::resume`] call; both exhaustive and budgeted drivers live
//! in [`drivers`].

pub mod drivers;
pub mod queue;

pub use drivers::{IncrementalDriver, complete};
pub use queue::OperationQueue;

use crate::core::types::Result;
use std::fmt;

/// Hint carrier passed into each `resume` call.
///
/// Carries no obligations today; it exists so drivers can grow scheduling
/// hints without changing every operation's signature.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunContext;

impl RunContext {
    pub fn new() -> Self {
        Self
    }
}

/// Outcome of one `resume` call
pub enum Resume {
    /// More work remains on this operation; call `resume` again
    Pending,
    /// This operation is exhausted; continue with the given one
    Chain(Box<dyn Operation>),
    /// The whole chain is complete
    Done,
}

// Continuations are opaque trait objects, so render them as such.
impl fmt::Debug for Resume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resume::Pending => f.write_str("Pending"),
            Resume::Chain(_) => f.write_str("Chain(..)"),
            Resume::Done => f.write_str("Done"),
        }
    }
}

/// A cooperative task.
///
/// An operation is owned exclusively by the session that created it and
/// is never shared across concurrent edits. Failures during `resume`
/// propagate unmodified; the contract swallows nothing.
pub trait Operation {
    /// Perform some unit of work.
    ///
    /// Returning [`Resume::Chain`] hands off to a continuation; returning
    /// [`Resume::Done`] signals completion. Resuming after `cancel` is a
    /// contract violation and fails with
    /// [`Error::ResumedAfterCancel`](crate::core::Error::ResumedAfterCancel).
    fn resume(&mut self, run: &RunContext) -> Result<Resume>;

    /// Stop the operation.
    ///
    /// Idempotent and infallible. Forbids further `resume` calls; performs
    /// no rollback of already-applied mutations.
    fn cancel(&mut self);

    /// Append human-readable completion messages for the host UI
    fn status_messages(&self, _out: &mut Vec<String>) {}
}

/// Shared lifecycle bookkeeping for operation implementations.
///
/// Tracks the Runnable -> Exhausted / Cancelled transitions so each
/// operation only has to guard the top of its `resume`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Runnable,
    Exhausted,
    Cancelled,
}

impl Lifecycle {
    /// Fail if the operation may no longer be resumed
    pub fn check_resumable(self) -> Result<()> {
        match self {
            Lifecycle::Runnable => Ok(()),
            Lifecycle::Exhausted => Err(crate::core::Error::Exhausted),
            Lifecycle::Cancelled => Err(crate::core::Error::ResumedAfterCancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountDown {
        remaining: u32,
        state: Lifecycle,
    }

    impl Operation for CountDown {
        fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
            self.state.check_resumable()?;
            if self.remaining == 0 {
                self.state = Lifecycle::Exhausted;
                return Ok(Resume::Done);
            }
            self.remaining -= 1;
            Ok(Resume::Pending)
        }

        fn cancel(&mut self) {
            self.state = Lifecycle::Cancelled;
        }
    }

    #[test]
    fn test_resume_after_cancel_is_contract_violation() {
        let run = RunContext::new();
        let mut op = CountDown { remaining: 3, state: Lifecycle::default() };
        assert!(matches!(op.resume(&run).unwrap(), Resume::Pending));

        op.cancel();
        op.cancel(); // idempotent
        let err = op.resume(&run).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_resume_renders_chain_opaquely() {
        // `unwrap_err` on a `Result<Resume>` needs this rendering.
        struct Noop;
        impl Operation for Noop {
            fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
                Ok(Resume::Done)
            }
            fn cancel(&mut self) {}
        }

        assert_eq!(format!("{:?}", Resume::Pending), "Pending");
        assert_eq!(format!("{:?}", Resume::Chain(Box::new(Noop))), "Chain(..)");
        assert_eq!(format!("{:?}", Resume::Done), "Done");
    }

    #[test]
    fn test_resume_after_done_is_contract_violation() {
        let run = RunContext::new();
        let mut op = CountDown { remaining: 0, state: Lifecycle::default() };
        assert!(matches!(op.resume(&run).unwrap(), Resume::Done));
        assert!(op.resume(&run).unwrap_err().is_contract_violation());
    }
}
