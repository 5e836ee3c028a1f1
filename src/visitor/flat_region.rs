//! Visitor over a 2D column projection

use crate::core::types::{Column, Result};
use crate::operation::{Lifecycle, Operation, Resume, RunContext};

/// Per-column function, the 2D counterpart of
/// [`CellFunction`](crate::traversal::CellFunction).
pub trait ColumnFunction {
    fn apply(&mut self, column: Column) -> Result<bool>;
}

impl<F: FnMut(Column) -> Result<bool>> ColumnFunction for F {
    fn apply(&mut self, column: Column) -> Result<bool> {
        self(column)
    }
}

/// Applies a function once per column of a flat region, counting true
/// results.
///
/// Like [`RegionVisitor`](crate::visitor::RegionVisitor), the whole
/// sequence is drained within one `resume` call.
pub struct FlatRegionVisitor<I, F> {
    columns: I,
    function: F,
    affected: usize,
    state: Lifecycle,
}

impl<I, F> FlatRegionVisitor<I, F>
where
    I: Iterator<Item = Column>,
    F: ColumnFunction,
{
    pub fn new(columns: I, function: F) -> Self {
        Self {
            columns,
            function,
            affected: 0,
            state: Lifecycle::default(),
        }
    }

    pub fn affected(&self) -> usize {
        self.affected
    }
}

impl<I, F> Operation for FlatRegionVisitor<I, F>
where
    I: Iterator<Item = Column>,
    F: ColumnFunction,
{
    fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;
        for column in self.columns.by_ref() {
            if self.function.apply(column)? {
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
        out.push(format!("{} columns affected", self.affected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::drivers::complete;

    #[test]
    fn test_one_entry_per_column() {
        let columns = (0..3).flat_map(|x| (0..3).map(move |z| Column::new(x, z)));
        // Count columns on the x == z diagonal
        let mut visitor = FlatRegionVisitor::new(columns, |c: Column| Ok(c.x == c.y));
        complete(&mut visitor, &RunContext::new()).unwrap();

        assert_eq!(visitor.affected(), 3);
    }

    #[test]
    fn test_named_function_implementor() {
        struct EveryOther {
            next: bool,
        }
        impl ColumnFunction for EveryOther {
            fn apply(&mut self, _column: Column) -> Result<bool> {
                self.next = !self.next;
                Ok(self.next)
            }
        }

        let columns = (0..4).map(|x| Column::new(x, 0));
        let mut visitor = FlatRegionVisitor::new(columns, EveryOther { next: false });
        complete(&mut visitor, &RunContext::new()).unwrap();

        assert_eq!(visitor.affected(), 2);
    }
}
