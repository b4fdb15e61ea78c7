/// Puzzle library: static puzzle data and the puzzle loader.

use crate::domain::grid::{Board, GRID_SIZE};

/// The built-in sample puzzle.
pub const SAMPLE_PUZZLE: [[u8; GRID_SIZE]; GRID_SIZE] = [
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
];

/// Load the puzzle for a menu selection.
pub fn load_puzzle(selected_puzzle: u8) -> Board {
    // TODO: index into a real library once more than one puzzle ships
    let _ = selected_puzzle;
    Board::from_raw(&SAMPLE_PUZZLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_puzzle_loads_for_any_selection() {
        for id in [0u8, 13, 27] {
            let board = load_puzzle(id);
            // Spot-check the pattern corners and center.
            assert!(!board.solution_at(0, 0));
            assert!(board.solution_at(3, 0));
            assert!(!board.solution_at(7, 7));
            assert!(board.solution_at(0, 5));
        }
    }
}
