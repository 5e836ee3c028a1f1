//! Drivers that run operations to completion.
//!
//! The contract makes no distinction between exhaustive and paced
//! execution; these drivers supply both.

use crate::core::types::Result;
use crate::operation::{Operation, Resume, RunContext};

/// Complete an operation blindly: resume in a tight loop until the whole
/// chain is done.
///
/// The caller keeps ownership of the root operation, so its affected
/// count and messages remain queryable afterwards. Continuations are
/// owned (and dropped) by the driver.
pub fn complete(op: &mut dyn Operation, run: &RunContext) -> Result<()> {
    let mut tail: Option<Box<dyn Operation>> = None;
    loop {
        let current: &mut dyn Operation = match tail.as_deref_mut() {
            Some(t) => t,
            None => op,
        };
        match current.resume(run)? {
            Resume::Pending => {}
            Resume::Chain(next) => tail = Some(next),
            Resume::Done => return Ok(()),
        }
    }
}

/// Completes an operation chain incrementally, a bounded number of
/// `resume` calls per host-loop iteration.
///
/// Owns the chain; when an operation hands off or finishes, its status
/// messages are collected for the host UI.
pub struct IncrementalDriver {
    current: Option<Box<dyn Operation>>,
    messages: Vec<String>,
}

impl IncrementalDriver {
    pub fn new(op: Box<dyn Operation>) -> Self {
        Self {
            current: Some(op),
            messages: Vec::new(),
        }
    }

    /// Whether the chain has run to completion (or was cancelled)
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Status messages collected from finished operations
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Perform one `resume` call. Returns true when the chain is done.
    pub fn step(&mut self, run: &RunContext) -> Result<bool> {
        let Some(op) = self.current.as_deref_mut() else {
            return Ok(true);
        };
        match op.resume(run) {
            Ok(Resume::Pending) => Ok(false),
            Ok(Resume::Chain(next)) => {
                op.status_messages(&mut self.messages);
                self.current = Some(next);
                Ok(false)
            }
            Ok(Resume::Done) => {
                op.status_messages(&mut self.messages);
                self.current = None;
                Ok(true)
            }
            Err(e) => {
                // A failed chain may not be resumed again
                self.current = None;
                Err(e)
            }
        }
    }

    /// Perform up to `budget` resume calls. Returns true when the chain
    /// is done.
    pub fn run_budget(&mut self, run: &RunContext, budget: usize) -> Result<bool> {
        for _ in 0..budget {
            if self.step(run)? {
                return Ok(true);
            }
        }
        Ok(self.is_done())
    }

    /// Cancel the remaining chain. Idempotent; already-applied mutations
    /// are not rolled back.
    pub fn cancel(&mut self) {
        if let Some(op) = self.current.as_deref_mut() {
            op.cancel();
        }
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Lifecycle;

    struct Ticker {
        ticks: u32,
        done_after: u32,
        state: Lifecycle,
        chain_to: Option<u32>,
    }

    impl Ticker {
        fn new(done_after: u32) -> Self {
            Self { ticks: 0, done_after, state: Lifecycle::default(), chain_to: None }
        }
    }

    impl Operation for Ticker {
        fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
            self.state.check_resumable()?;
            self.ticks += 1;
            if self.ticks < self.done_after {
                return Ok(Resume::Pending);
            }
            self.state = Lifecycle::Exhausted;
            match self.chain_to.take() {
                Some(n) => Ok(Resume::Chain(Box::new(Ticker::new(n)))),
                None => Ok(Resume::Done),
            }
        }

        fn cancel(&mut self) {
            self.state = Lifecycle::Cancelled;
        }

        fn status_messages(&self, out: &mut Vec<String>) {
            out.push(format!("{} ticks elapsed", self.ticks));
        }
    }

    #[test]
    fn test_complete_runs_to_exhaustion() {
        let run = RunContext::new();
        let mut op = Ticker::new(5);
        complete(&mut op, &run).unwrap();
        assert_eq!(op.ticks, 5);
    }

    #[test]
    fn test_complete_follows_chain() {
        let run = RunContext::new();
        let mut op = Ticker::new(2);
        op.chain_to = Some(3);
        complete(&mut op, &run).unwrap();
        // Root stopped at 2; the chained ticker ran to 3 inside the driver
        assert_eq!(op.ticks, 2);
    }

    #[test]
    fn test_incremental_budget() {
        let run = RunContext::new();
        let mut driver = IncrementalDriver::new(Box::new(Ticker::new(10)));

        assert!(!driver.run_budget(&run, 4).unwrap());
        assert!(!driver.run_budget(&run, 4).unwrap());
        assert!(driver.run_budget(&run, 4).unwrap());
        assert_eq!(driver.messages(), ["10 ticks elapsed"]);
    }

    #[test]
    fn test_incremental_collects_chain_messages() {
        let run = RunContext::new();
        let mut first = Ticker::new(1);
        first.chain_to = Some(2);
        let mut driver = IncrementalDriver::new(Box::new(first));

        assert!(driver.run_budget(&run, 10).unwrap());
        assert_eq!(driver.messages(), ["1 ticks elapsed", "2 ticks elapsed"]);
    }

    #[test]
    fn test_cancel_stops_chain() {
        let run = RunContext::new();
        let mut driver = IncrementalDriver::new(Box::new(Ticker::new(10)));
        driver.step(&run).unwrap();
        driver.cancel();
        driver.cancel(); // idempotent
        assert!(driver.is_done());
        assert!(driver.step(&run).unwrap());
    }
}
