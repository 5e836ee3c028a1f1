//! Visitor over an arbitrary entity iterator

use crate::core::types::Result;
use crate::operation::{Lifecycle, Operation, Resume, RunContext};

/// Per-entity function, the entity counterpart of
/// [`CellFunction`](crate::traversal::CellFunction).
pub trait EntityFunction<E> {
    fn apply(&mut self, entity: E) -> Result<bool>;
}

impl<E, F: FnMut(E) -> Result<bool>> EntityFunction<E> for F {
    fn apply(&mut self, entity: E) -> Result<bool> {
        self(entity)
    }
}

/// Applies a function to every entity yielded by an iterator, counting
/// true results.
///
/// The entity type is whatever the host enumerates; the core imposes no
/// shape on it.
pub struct EntityVisitor<I, F> {
    entities: I,
    function: F,
    affected: usize,
    state: Lifecycle,
}

impl<E, I, F> EntityVisitor<I, F>
where
    I: Iterator<Item = E>,
    F: EntityFunction<E>,
{
    pub fn new(entities: I, function: F) -> Self {
        Self {
            entities,
            function,
            affected: 0,
            state: Lifecycle::default(),
        }
    }

    pub fn affected(&self) -> usize {
        self.affected
    }
}

impl<E, I, F> Operation for EntityVisitor<I, F>
where
    I: Iterator<Item = E>,
    F: EntityFunction<E>,
{
    fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;
        for entity in self.entities.by_ref() {
            if self.function.apply(entity)? {
                self.affected += 1;
            }
        }
        self.state = Lifecycle::Exhausted;
        Ok(Resume::Done)
    }

    fn cancel(&mut self) {
        self.state = Lifecycle::Cancelled;
    }

    fn status_messages(&self, out: &mut Vec<String>) {
        out.push(format!("{} entities affected", self.affected));
    }
}
