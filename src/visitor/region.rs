//! Visitor over a 3D position sequence

use crate::core::types::{Position, Result};
use crate::operation::{Lifecycle, Operation, Resume, RunContext};
use crate::traversal::bfs::CellFunction;

/// Applies a function to every position in a finite (possibly huge)
/// externally supplied sequence, counting true results.
///
/// The entire sequence is drained within one `resume` call; restartability
/// of the sequence is the supplier's contract.
pub struct RegionVisitor<I, F> {
    positions: I,
    function: F,
    affected: usize,
    state: Lifecycle,
}

impl<I, F> RegionVisitor<I, F>
where
    I: Iterator<Item = Position>,
    F: CellFunction,
{
    pub fn new(positions: I, function: F) -> Self {
        Self {
            positions,
            function,
            affected: 0,
            state: Lifecycle::default(),
        }
    }

    /// Number of positions the function counted as affected
    pub fn affected(&self) -> usize {
        self.affected
    }
}

impl<I, F> Operation for RegionVisitor<I, F>
where
    I: Iterator<Item = Position>,
    F: CellFunction,
{
    fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;
        for pos in self.positions.by_ref() {
            if self.function.apply(pos)? {
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
        out.push(format!("{} positions affected", self.affected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::drivers::complete;

    fn cuboid(size: i32) -> impl Iterator<Item = Position> {
        (0..size).flat_map(move |x| {
            (0..size).flat_map(move |y| (0..size).map(move |z| Position::new(x, y, z)))
        })
    }

    #[test]
    fn test_counts_true_results() {
        let function = |pos: Position| -> Result<bool> { Ok(pos.y == 0) };
        let mut visitor = RegionVisitor::new(cuboid(4), function);
        complete(&mut visitor, &RunContext::new()).unwrap();
        assert_eq!(visitor.affected(), 16);

        let mut out = Vec::new();
        visitor.status_messages(&mut out);
        assert_eq!(out, ["16 positions affected"]);
    }

    #[test]
    fn test_error_stops_mid_sequence() {
        let function = |pos: Position| -> Result<bool> {
            if pos == Position::new(1, 0, 0) {
                return Err(crate::core::Error::InvalidTarget("bad cell".into()));
            }
            Ok(true)
        };
        let mut visitor = RegionVisitor::new(cuboid(4), function);
        assert!(complete(&mut visitor, &RunContext::new()).is_err());
        // Partial completion is reported, not rolled back
        assert_eq!(visitor.affected(), 16);
    }
}
