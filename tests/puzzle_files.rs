use std::fs;
use std::path::PathBuf;

use slider_puzzle::{Board, Move, Solver};

fn load(name: &str) -> Board {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "puzzles", name].iter().collect();
    let text = fs::read_to_string(&path).expect("puzzle file");
    text.parse().expect("valid puzzle")
}

#[test]
fn solvable_files() {
    for (name, moves) in [
        ("puzzle1x1.txt", 0),
        ("puzzle2x2-01.txt", 1),
        ("puzzle04.txt", 4),
        ("puzzle14.txt", 14),
        ("puzzle4x4-09.txt", 9),
    ] {
        let solver = Solver::try_from(Some(load(name))).expect("solve");
        assert!(solver.is_solvable(), "{}", name);
        assert_eq!(solver.moves(), moves, "{}", name);
    }
}

#[test]
fn unsolvable_file() {
    let solver = Solver::new(&load("puzzle3x3-unsolvable.txt")).expect("solve");
    assert!(!solver.is_solvable());
    assert_eq!(solver.moves(), -1);
    assert!(solver.solution().is_none());
}

#[test]
fn scenario_ends_at_goal() {
    let initial = load("puzzle14.txt");
    assert_eq!(initial.manhattan(), 10);
    let solver = Solver::new(&initial).expect("solve");
    let last = solver.solution().and_then(|path| path.last()).expect("path");
    let goal: Board = "3\n1 2 3\n4 5 6\n7 8 0\n".parse().expect("goal");
    assert_eq!(last, &goal);
}

#[test]
fn moves_replay_the_solution() {
    let initial = load("puzzle2x2-01.txt");
    let solver = Solver::new(&initial).expect("solve");
    let moves = solver.solution_moves().expect("moves");
    assert_eq!(moves, vec![Move::Down]);

    let mut board = initial;
    for movement in moves {
        board = board.slide(movement).expect("legal move");
    }
    assert!(board.is_goal());
}
