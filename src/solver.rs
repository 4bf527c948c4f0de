//! A* search with unsolvability detection.
//!
//! Two frontiers are advanced in lockstep: one seeded with the initial board
//! and one with its twin. Exactly one of them can reach the goal, so the
//! loop stops at the first goal pop and never has to exhaust the other.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, instrument, trace};

use crate::board::{Board, Move};
use crate::error::{Error, Result};

struct SearchNode {
    board: Board,
    moves: usize,
    predecessor: Option<usize>,
}

enum Step {
    Goal(usize),
    Continue,
    Exhausted,
}

/// One A* search. Nodes live in an arena and link to their predecessor by
/// index; the queue orders arena indices by `moves + manhattan`, breaking
/// ties by insertion order.
struct Frontier {
    name: &'static str,
    nodes: Vec<SearchNode>,
    queue: BinaryHeap<Reverse<(usize, usize)>>,
    expanded: usize,
}

impl Frontier {
    fn new(name: &'static str, root: Board) -> Self {
        let mut frontier = Self {
            name,
            nodes: Vec::new(),
            queue: BinaryHeap::new(),
            expanded: 0,
        };
        frontier.push(root, 0, None);
        frontier
    }

    fn push(&mut self, board: Board, moves: usize, predecessor: Option<usize>) {
        let priority = moves + board.manhattan();
        let index = self.nodes.len();
        self.nodes.push(SearchNode {
            board,
            moves,
            predecessor,
        });
        self.queue.push(Reverse((priority, index)));
    }

    fn step(&mut self) -> Step {
        let Some(Reverse((priority, index))) = self.queue.pop() else {
            return Step::Exhausted;
        };
        let current = &self.nodes[index];
        trace!(frontier = self.name, priority, moves = current.moves, "pop");

        if current.board.is_goal() {
            return Step::Goal(index);
        }
        self.expanded += 1;

        // Only the board we just came from is skipped, not every visited one.
        let previous = current.predecessor.map(|p| &self.nodes[p].board);
        let successors: Vec<Board> = current
            .board
            .neighbors()
            .into_iter()
            .filter(|next| Some(next) != previous)
            .collect();

        let moves = current.moves + 1;
        for board in successors {
            self.push(board, moves, Some(index));
        }
        Step::Continue
    }

    /// Boards from the root to `index`, inclusive.
    fn path(&self, index: usize) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.nodes[index].moves + 1);
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            path.push(self.nodes[i].board.clone());
            cursor = self.nodes[i].predecessor;
        }
        path.reverse();
        path
    }
}

/// Node counts from a finished solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub main_expanded: usize,
    pub main_generated: usize,
    pub twin_expanded: usize,
    pub twin_generated: usize,
}

/// The result of solving one board. All work happens in [`Solver::new`];
/// afterwards the solver is read-only.
#[derive(Debug, Clone)]
pub struct Solver {
    initial: Board,
    solution: Option<Vec<Board>>,
    stats: SolveStats,
}

impl Solver {
    #[instrument(skip_all, fields(dimension = initial.dimension()))]
    pub fn new(initial: &Board) -> Result<Self> {
        debug!(manhattan = initial.manhattan(), "solving");

        // A 1x1 board is always solved and has no twin.
        if initial.is_goal() {
            return Ok(Self {
                initial: initial.clone(),
                solution: Some(vec![initial.clone()]),
                stats: SolveStats::default(),
            });
        }

        let mut main = Frontier::new("main", initial.clone());
        let mut twin = Frontier::new("twin", initial.twin()?);

        let solution = loop {
            let main_step = main.step();
            if let Step::Goal(index) = main_step {
                break Some(main.path(index));
            }
            let twin_step = twin.step();
            if let Step::Goal(_) = twin_step {
                break None;
            }
            if let (Step::Exhausted, Step::Exhausted) = (main_step, twin_step) {
                break None;
            }
        };

        let stats = SolveStats {
            main_expanded: main.expanded,
            main_generated: main.nodes.len(),
            twin_expanded: twin.expanded,
            twin_generated: twin.nodes.len(),
        };
        debug!(
            solvable = solution.is_some(),
            moves = ?solution.as_ref().map(|p| p.len() - 1),
            ?stats,
            "solved"
        );

        Ok(Self {
            initial: initial.clone(),
            solution,
            stats,
        })
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of moves, or `-1` when the board cannot be solved.
    pub fn moves(&self) -> i64 {
        self.solution
            .as_ref()
            .map_or(-1, |path| path.len() as i64 - 1)
    }

    /// Boards from the initial one to the goal, or `None` when unsolvable.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Blank moves between consecutive boards of the solution.
    pub fn solution_moves(&self) -> Option<Vec<Move>> {
        self.solution
            .as_ref()?
            .windows(2)
            .map(|pair| pair[0].move_to(&pair[1]))
            .collect()
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }
}

impl TryFrom<Option<Board>> for Solver {
    type Error = Error;

    fn try_from(initial: Option<Board>) -> Result<Self> {
        let initial =
            initial.ok_or_else(|| Error::InvalidArgument("no initial board".to_string()))?;
        Solver::new(&initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::new(rows.iter().map(|row| row.to_vec()).collect()).expect("valid test board")
    }

    fn assert_valid_solution(solver: &Solver, initial: &Board) {
        let path = solver.solution().expect("solvable");
        assert_eq!(path.len() as i64, solver.moves() + 1);
        assert_eq!(&path[0], initial);
        assert!(path[path.len() - 1].is_goal());
        for pair in path.windows(2) {
            assert!(pair[0].neighbors().contains(&pair[1]));
        }
    }

    #[test]
    fn solves_known_puzzle() {
        let initial = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        let solver = Solver::new(&initial).expect("solve");
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 14);
        assert_valid_solution(&solver, &initial);
        let last = solver.solution().unwrap().last().unwrap();
        assert_eq!(last, &board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]));
    }

    #[test]
    fn solves_short_puzzle() {
        let initial = board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        let solver = Solver::new(&initial).expect("solve");
        assert_eq!(solver.moves(), 4);
        assert_eq!(
            solver.solution_moves(),
            Some(vec![Move::Right, Move::Down, Move::Right, Move::Down])
        );
        assert_valid_solution(&solver, &initial);
    }

    #[test]
    fn detects_unsolvable_puzzle() {
        let initial = board(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]);
        let solver = Solver::new(&initial).expect("solve");
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
        assert!(solver.solution().is_none());
        assert!(solver.solution_moves().is_none());
    }

    #[test]
    fn detects_unsolvable_2x2() {
        let solver = Solver::new(&board(&[&[2, 1], &[3, 0]])).expect("solve");
        assert!(!solver.is_solvable());
        assert_eq!(solver.moves(), -1);
    }

    #[test]
    fn single_cell_is_already_solved() {
        let initial = board(&[&[0]]);
        let solver = Solver::new(&initial).expect("no twin needed");
        assert!(solver.is_solvable());
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution(), Some(&[initial][..]));
        assert_eq!(solver.stats(), SolveStats::default());
    }

    #[test]
    fn goal_needs_no_moves() {
        let goal = Board::goal(4).unwrap();
        let solver = Solver::new(&goal).expect("solve");
        assert_eq!(solver.moves(), 0);
        assert_eq!(solver.solution().map(|p| p.len()), Some(1));
        assert_eq!(solver.solution_moves(), Some(vec![]));
    }

    #[test]
    fn solves_4x4() {
        let initial = board(&[
            &[5, 1, 2, 3],
            &[9, 6, 7, 4],
            &[13, 10, 11, 8],
            &[0, 14, 15, 12],
        ]);
        let solver = Solver::new(&initial).expect("solve");
        assert_eq!(solver.moves(), 9);
        assert_valid_solution(&solver, &initial);
        assert_eq!(solver.initial(), &initial);
        assert!(solver.stats().main_generated > solver.stats().main_expanded);
    }

    #[test]
    fn missing_board_is_invalid_argument() {
        assert!(matches!(
            Solver::try_from(None::<Board>),
            Err(Error::InvalidArgument(_))
        ));
        let solver = Solver::try_from(Some(Board::goal(2).unwrap())).expect("solve");
        assert!(solver.is_solvable());
    }
}
