//! Iterative breadth-first flood fill.
//!
//! Performs a breadth-first search starting from points seeded with
//! [`BreadthFirstSearch::visit`]. The search continues to an adjacent
//! point provided the traversal mask passes for that step. Iterative by
//! construction: recursion is unsafe for large connected regions.

use crate::core::types::{Position, Result};
use crate::operation::{Lifecycle, Operation, Resume, RunContext};
use crate::traversal::mask::TraversalMask;
use glam::IVec3;
use std::collections::{HashSet, VecDeque};

/// Per-cell function applied to every visited position.
///
/// The return value indicates whether the position counts as affected.
pub trait CellFunction {
    fn apply(&mut self, pos: Position) -> Result<bool>;
}

impl<F: FnMut(Position) -> Result<bool>> CellFunction for F {
    fn apply(&mut self, pos: Position) -> Result<bool> {
        self(pos)
    }
}

/// The six face-adjacent directions
pub const AXES: [IVec3; 6] = [
    IVec3::NEG_Y,
    IVec3::Y,
    IVec3::NEG_X,
    IVec3::X,
    IVec3::NEG_Z,
    IVec3::Z,
];

/// The four horizontal diagonal directions
pub const HORIZONTAL_DIAGONALS: [IVec3; 4] = [
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, -1),
];

/// Breadth-first flood fill over connected positions.
///
/// FIFO queue plus visited set. Each position is function-applied at most
/// once no matter how many paths reach it: neighbors are marked visited
/// *before* the mask is consulted, so a position rejected via one path is
/// never re-examined via another.
pub struct BreadthFirstSearch<F, M> {
    function: F,
    mask: M,
    queue: VecDeque<Position>,
    visited: HashSet<Position>,
    directions: Vec<IVec3>,
    affected: usize,
    state: Lifecycle,
}

impl<F: CellFunction, M: TraversalMask> BreadthFirstSearch<F, M> {
    /// New search over the six face-adjacent directions
    pub fn new(function: F, mask: M) -> Self {
        Self {
            function,
            mask,
            queue: VecDeque::new(),
            visited: HashSet::new(),
            directions: AXES.to_vec(),
            affected: 0,
            state: Lifecycle::default(),
        }
    }

    /// Also propagate across the four horizontal diagonals.
    ///
    /// Direction-list order is the only intra-layer ordering guarantee
    /// the search makes.
    pub fn with_diagonals(mut self) -> Self {
        self.directions.extend(HORIZONTAL_DIAGONALS);
        self
    }

    /// Replace the direction set entirely
    pub fn with_directions(mut self, directions: Vec<IVec3>) -> Self {
        self.directions = directions;
        self
    }

    /// Seed the search with a starting position.
    ///
    /// Seeded positions are enqueued unconditionally: they are always
    /// function-applied even if they fail the traversal mask. Only
    /// propagation to neighbors is gated by the mask. Seed before the
    /// search runs; a position already reached through another seed is
    /// left as-is.
    pub fn visit(&mut self, pos: Position) {
        if self.visited.insert(pos) {
            self.queue.push_back(pos);
        }
    }

    fn visit_from(&mut self, from: Position, to: Position) {
        // Mark before testing: even a rejected neighbor must never be
        // re-examined through another path.
        if self.visited.insert(to) && self.mask.can_pass(from, to) {
            self.queue.push_back(to);
        }
    }

    /// Number of positions the function counted as affected
    pub fn affected(&self) -> usize {
        self.affected
    }

    /// Number of positions marked visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Whether the frontier queue is empty
    pub fn frontier_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<F: CellFunction, M: TraversalMask> Operation for BreadthFirstSearch<F, M> {
    fn resume(&mut self, _run: &RunContext) -> Result<Resume> {
        self.state.check_resumable()?;

        while let Some(pos) = self.queue.pop_front() {
            if self.function.apply(pos)? {
                self.affected += 1;
            }
            for i in 0..self.directions.len() {
                let dir = self.directions[i];
                self.visit_from(pos, pos + dir);
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
    use crate::traversal::mask::point_mask;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn run<F: CellFunction, M: TraversalMask>(search: &mut BreadthFirstSearch<F, M>) {
        complete(search, &RunContext::new()).unwrap();
    }

    #[test]
    fn test_clears_connected_cube() {
        // 13x13x13 all-"leaf" region, function "clear leaf and count",
        // mask "value not empty", 6-direction adjacency.
        let cells = RefCell::new(HashMap::new());
        for x in 0..13 {
            for y in 0..13 {
                for z in 0..13 {
                    cells.borrow_mut().insert(Position::new(x, y, z), 1u8);
                }
            }
        }

        let function = |pos: Position| -> Result<bool> {
            Ok(cells.borrow_mut().remove(&pos).is_some())
        };
        let mask = point_mask(|pos: Position| cells.borrow().contains_key(&pos));

        let mut search = BreadthFirstSearch::new(function, mask);
        search.visit(Position::new(0, 0, 0));
        run(&mut search);

        assert_eq!(search.affected(), 2197);
        assert_eq!(search.visited_count(), 2197 + search_boundary_count());
        assert!(search.frontier_exhausted());
        assert!(cells.borrow().is_empty());
    }

    /// Rejected boundary neighbors of a 13^3 cube are still marked
    /// visited (mark-before-test): one per outward face per surface cell.
    fn search_boundary_count() -> usize {
        6 * 13 * 13
    }

    #[test]
    fn test_each_position_applied_once() {
        // Two seeds whose fills meet; counts must not double up.
        let applied = RefCell::new(HashMap::<Position, u32>::new());
        let function = |pos: Position| -> Result<bool> {
            *applied.borrow_mut().entry(pos).or_insert(0) += 1;
            Ok(true)
        };
        let mask = point_mask(|pos: Position| pos.x.abs() <= 4 && pos.y == 0 && pos.z == 0);

        let mut search = BreadthFirstSearch::new(function, mask);
        search.visit(Position::new(-4, 0, 0));
        search.visit(Position::new(4, 0, 0));
        run(&mut search);

        assert_eq!(search.affected(), 9);
        assert!(applied.borrow().values().all(|&n| n == 1));
    }

    #[test]
    fn test_seed_applied_even_if_mask_rejects() {
        let applied = RefCell::new(Vec::new());
        let function = |pos: Position| -> Result<bool> {
            applied.borrow_mut().push(pos);
            Ok(true)
        };
        // Mask rejects everything: nothing propagates, but seeds still run
        let mask = point_mask(|_: Position| false);

        let mut search = BreadthFirstSearch::new(function, mask);
        let seed = Position::new(3, 1, 2);
        search.visit(seed);
        run(&mut search);

        assert_eq!(search.affected(), 1);
        assert_eq!(*applied.borrow(), vec![seed]);
    }

    #[test]
    fn test_diagonals_extend_reach() {
        let function = |_: Position| -> Result<bool> { Ok(true) };
        // Only the two diagonal cells are passable
        let pass = |pos: Position| pos == Position::new(1, 0, 1) || pos == Position::new(2, 0, 2);

        let mut search = BreadthFirstSearch::new(function, point_mask(pass)).with_diagonals();
        search.visit(Position::new(0, 0, 0));
        run(&mut search);
        assert_eq!(search.affected(), 3);

        let mut search = BreadthFirstSearch::new(function, point_mask(pass));
        search.visit(Position::new(0, 0, 0));
        run(&mut search);
        // Face adjacency cannot reach the diagonal
        assert_eq!(search.affected(), 1);
    }

    #[test]
    fn test_function_error_propagates() {
        let function = |pos: Position| -> Result<bool> {
            if pos.x > 1 {
                return Err(crate::core::Error::InvalidTarget("boom".into()));
            }
            Ok(true)
        };
        let mask = point_mask(|pos: Position| pos.y == 0 && pos.z == 0);

        let mut search = BreadthFirstSearch::new(function, mask);
        search.visit(Position::new(0, 0, 0));
        let err = complete(&mut search, &RunContext::new()).unwrap_err();
        assert!(matches!(err, crate::core::Error::InvalidTarget(_)));
    }

    #[test]
    fn test_cancel_forbids_resume() {
        let function = |_: Position| -> Result<bool> { Ok(true) };
        let mut search = BreadthFirstSearch::new(function, point_mask(|_: Position| true));
        search.cancel();
        assert!(search.resume(&RunContext::new()).unwrap_err().is_contract_violation());
    }
}
