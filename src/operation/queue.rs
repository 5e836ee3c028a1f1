//! Sequential composition of operations

use crate::core::types::Result;
use crate::operation::{Lifecycle, Operation, Resume, RunContext};
use std::collections::VecDeque;

/// Runs a queue of operations in order, one at a time.
///
/// Each `resume` call resumes the operation at the head of the queue, so
/// a queued bulk edit still suspends at single-operation granularity.
pub struct OperationQueue {
    queue: VecDeque<Box<dyn Operation>>,
    state: Lifecycle,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            state: Lifecycle::default(),
        }
    }

    pub fn from_ops(ops: Vec<Box<dyn Operation>>) -> Self {
        Self {
            queue: ops.into(),
            state: Lifecycle::default(),
        }
    }

    /// Append an operation to the end of the queue
    pub fn push(&mut self, op: Box<dyn Operation>) {
        self.queue.push_back(op);
    }
}

impl Default for OperationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for OperationQueue {
    fn resume(&mut self, run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;
        let Some(head) = self.queue.front_mut() else {
            self.state = Lifecycle::Exhausted;
            return Ok(Resume::Done);
        };
        match head.resume(run)? {
            Resume::Pending => {}
            Resume::Chain(next) => {
                *head = next;
            }
            Resume::Done => {
                self.queue.pop_front();
            }
        }
        Ok(Resume::Pending)
    }

    fn cancel(&mut self) {
        for op in &mut self.queue {
            op.cancel();
        }
        self.queue.clear();
        self.state = Lifecycle::Cancelled;
    }

    fn status_messages(&self, out: &mut Vec<String>) {
        for op in &self.queue {
            op.status_messages(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::drivers::complete;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Mark {
        order: Rc<Cell<u32>>,
        seen: Option<u32>,
        state: Lifecycle,
    }

    impl Operation for Mark {
        fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
            self.state.check_resumable()?;
            let n = self.order.get();
            self.order.set(n + 1);
            self.seen = Some(n);
            self.state = Lifecycle::Exhausted;
            Ok(Resume::Done)
        }

        fn cancel(&mut self) {
            self.state = Lifecycle::Cancelled;
        }
    }

    #[test]
    fn test_queue_runs_in_order() {
        let order = Rc::new(Cell::new(0));
        let mk = || Box::new(Mark { order: order.clone(), seen: None, state: Lifecycle::default() });
        let mut queue = OperationQueue::from_ops(vec![mk(), mk(), mk()]);

        complete(&mut queue, &RunContext::new()).unwrap();
        assert_eq!(order.get(), 3);
    }

    #[test]
    fn test_empty_queue_is_done() {
        let mut queue = OperationQueue::new();
        assert!(matches!(queue.resume(&RunContext::new()).unwrap(), Resume::Done));
    }

    #[test]
    fn test_cancelled_queue_refuses_resume() {
        let mut queue = OperationQueue::new();
        queue.cancel();
        assert!(queue.resume(&RunContext::new()).unwrap_err().is_contract_violation());
    }
}
