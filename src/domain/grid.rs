/// The puzzle board and the wrapping cursor.
///
/// Two parallel 15×15 planes:
///   - `solution`: ground truth per cell, loaded once, never mutated.
///   - `marks`:    what the player has placed, all empty at start.

use super::tile::CellMark;

pub const GRID_SIZE: usize = 15;

const MAX_COORD: u8 = (GRID_SIZE - 1) as u8;

pub struct Board {
    solution: [[bool; GRID_SIZE]; GRID_SIZE],
    marks: [[CellMark; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Build a board from raw puzzle data (0 = empty, 1 = filled).
    /// Any other cell value is invalid puzzle data.
    pub fn from_raw(raw: &[[u8; GRID_SIZE]; GRID_SIZE]) -> Board {
        let mut solution = [[false; GRID_SIZE]; GRID_SIZE];
        for (y, row) in raw.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                assert!(v <= 1, "invalid puzzle cell value {v} at ({x}, {y})");
                solution[y][x] = v == 1;
            }
        }
        Board {
            solution,
            marks: [[CellMark::Empty; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn mark_at(&self, x: u8, y: u8) -> CellMark {
        self.marks[y as usize][x as usize]
    }

    pub fn set_mark(&mut self, x: u8, y: u8, mark: CellMark) {
        self.marks[y as usize][x as usize] = mark;
    }

    pub fn solution_at(&self, x: u8, y: u8) -> bool {
        self.solution[y as usize][x as usize]
    }

    pub fn reset_marks(&mut self) {
        self.marks = [[CellMark::Empty; GRID_SIZE]; GRID_SIZE];
    }

    // ── Line views (for clue derivation and checking) ──

    pub fn solution_row(&self, y: u8) -> [bool; GRID_SIZE] {
        self.solution[y as usize]
    }

    pub fn solution_column(&self, x: u8) -> [bool; GRID_SIZE] {
        let mut col = [false; GRID_SIZE];
        for (y, row) in self.solution.iter().enumerate() {
            col[y] = row[x as usize];
        }
        col
    }

    pub fn marks_row(&self, y: u8) -> [CellMark; GRID_SIZE] {
        self.marks[y as usize]
    }

    pub fn marks_column(&self, x: u8) -> [CellMark; GRID_SIZE] {
        let mut col = [CellMark::Empty; GRID_SIZE];
        for (y, row) in self.marks.iter().enumerate() {
            col[y] = row[x as usize];
        }
        col
    }
}

/// Cursor position on the grid. Movement wraps at the edges, so the
/// coordinates are always in range by construction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cursor {
    pub x: u8,
    pub y: u8,
}

impl Cursor {
    pub fn new() -> Cursor {
        Cursor { x: 0, y: 0 }
    }

    pub fn step_left(&mut self) {
        self.x = if self.x == 0 { MAX_COORD } else { self.x - 1 };
    }

    pub fn step_right(&mut self) {
        self.x = if self.x == MAX_COORD { 0 } else { self.x + 1 };
    }

    pub fn step_up(&mut self) {
        self.y = if self.y == 0 { MAX_COORD } else { self.y - 1 };
    }

    pub fn step_down(&mut self) {
        self.y = if self.y == MAX_COORD { 0 } else { self.y + 1 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_at_edges() {
        let mut c = Cursor::new();
        c.step_left();
        assert_eq!((c.x, c.y), (14, 0));
        c.step_right();
        assert_eq!((c.x, c.y), (0, 0));
        c.step_up();
        assert_eq!((c.x, c.y), (0, 14));
        c.step_down();
        assert_eq!((c.x, c.y), (0, 0));
    }

    #[test]
    fn cursor_steps_inside_grid() {
        for x in 1..=14u8 {
            let mut c = Cursor { x, y: 7 };
            c.step_left();
            assert_eq!(c.x, x - 1);
        }
        for x in 0..=13u8 {
            let mut c = Cursor { x, y: 7 };
            c.step_right();
            assert_eq!(c.x, x + 1);
        }
        for y in 1..=14u8 {
            let mut c = Cursor { x: 3, y };
            c.step_up();
            assert_eq!(c.y, y - 1);
        }
        for y in 0..=13u8 {
            let mut c = Cursor { x: 3, y };
            c.step_down();
            assert_eq!(c.y, y + 1);
        }
    }

    #[test]
    fn board_planes_are_independent() {
        let mut raw = [[0u8; GRID_SIZE]; GRID_SIZE];
        raw[2][3] = 1;
        let mut board = Board::from_raw(&raw);

        assert!(board.solution_at(3, 2));
        assert!(board.mark_at(3, 2).is_empty());

        board.set_mark(3, 2, CellMark::Stamp);
        assert_eq!(board.mark_at(3, 2), CellMark::Stamp);
        assert!(board.solution_at(3, 2));

        board.reset_marks();
        assert!(board.mark_at(3, 2).is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid puzzle cell value")]
    fn board_rejects_bad_puzzle_data() {
        let mut raw = [[0u8; GRID_SIZE]; GRID_SIZE];
        raw[0][0] = 7;
        Board::from_raw(&raw);
    }
}
