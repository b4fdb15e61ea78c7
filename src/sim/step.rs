/// Per-frame screen steps. The main loop samples the joypad once per
/// display frame and hands the sample here.
///
/// Puzzle frame order:
///   1. START:       reserved (in-puzzle menu, not wired up)
///   2. SELECT:      swap primary/secondary tool
///   3. A:           confirm edit on the current cell
///   4. B:           alt-confirm edit with the secondary tool
///   5. on change:   refresh cursor glyph, patch the background tile
///   6. directions:  move the cursor with wraparound, refresh sprite
///
/// The puzzle screen does not edge-detect on its own: a held button
/// re-triggers every frame unless the caller samples edges instead
/// (the `debounce` config flag). The menu screen is always edge-driven.

use crate::domain::clues;
use crate::domain::grid::Cursor;
use crate::domain::rules;
use crate::domain::tile::Tool;
use crate::sim::library;
use crate::ui::input::Joypad;
use crate::ui::vram::{self, TileRam};

use super::world::{Phase, WorldState};

// ── Title screen ──

/// Poll for START. Returns true when the title screen should hand off.
pub fn title_step(pad: Joypad) -> bool {
    pad.start()
}

// ── Menu screen ──

/// Menu cursor pixel space: 4 columns × 7 rows of option slots.
pub const MENU_MIN_X: u8 = 16;
pub const MENU_STEP_X: u8 = 32;
pub const MENU_MAX_X: u8 = MENU_MIN_X + MENU_STEP_X * 3;
pub const MENU_MIN_Y: u8 = 20;
pub const MENU_STEP_Y: u8 = 16;
pub const MENU_MAX_Y: u8 = MENU_MIN_Y + MENU_STEP_Y * 6;

/// Option ids by (row, column); the letters run down the columns.
pub const MENU_OPTIONS: [[u8; 4]; 7] = [
    [0, 7, 14, 21],
    [1, 8, 15, 22],
    [2, 9, 16, 23],
    [3, 10, 17, 24],
    [4, 11, 18, 25],
    [5, 12, 19, 26],
    [6, 13, 20, 27],
];

pub fn enter_menu(world: &mut WorldState) {
    world.phase = Phase::Menu;
    world.blank_screen(1);
    world.menu_x = MENU_MIN_X;
    world.menu_y = MENU_MIN_Y;
}

/// The menu cursor's (row, column) slot.
pub fn menu_cell(world: &WorldState) -> (usize, usize) {
    (
        ((world.menu_y - MENU_MIN_Y) / MENU_STEP_Y) as usize,
        ((world.menu_x - MENU_MIN_X) / MENU_STEP_X) as usize,
    )
}

fn wrap_cursor(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        return max;
    }
    if value > max {
        return min;
    }
    value
}

/// One edge-driven menu frame. Returns the chosen option id on A.
pub fn menu_step(world: &mut WorldState, pad: Joypad) -> Option<u8> {
    if pad.a() {
        let (row, col) = menu_cell(world);
        return Some(MENU_OPTIONS[row][col]);
    } else if pad.up() {
        world.menu_y = world.menu_y.wrapping_sub(MENU_STEP_Y);
    } else if pad.down() {
        world.menu_y = world.menu_y.wrapping_add(MENU_STEP_Y);
    } else if pad.left() {
        world.menu_x = world.menu_x.wrapping_sub(MENU_STEP_X);
    } else if pad.right() {
        world.menu_x = world.menu_x.wrapping_add(MENU_STEP_X);
    }

    // TODO: skip the two blank slots after Z

    world.menu_x = wrap_cursor(world.menu_x, MENU_MIN_X, MENU_MAX_X);
    world.menu_y = wrap_cursor(world.menu_y, MENU_MIN_Y, MENU_MAX_Y);
    None
}

// ── Puzzle screen ──

pub fn enter_puzzle(world: &mut WorldState, selected_puzzle: u8) {
    world.phase = Phase::Puzzle;
    world.blank_screen(1);

    world.selected_puzzle = selected_puzzle;
    world.board = library::load_puzzle(selected_puzzle);
    world.board.reset_marks();
    world.row_clues = clues::row_clues(&world.board);
    world.col_clues = clues::column_clues(&world.board);
    world.solved = false;

    // Fresh background upload: every cell slot reads as empty.
    world.tile_ram = TileRam::new();

    world.cursor = Cursor::new();
    world.primary_tool = Tool::Fill;
    world.move_cursor_sprite();
    world.sprite.glyph = world.primary_tool;
}

/// One puzzle frame.
pub fn puzzle_step(world: &mut WorldState, pad: Joypad) {
    if pad.start() {
        // reserved: in-puzzle menu
    }
    if pad.select() {
        world.primary_tool = world.primary_tool.partner();
    }

    let (cx, cy) = (world.cursor.x, world.cursor.y);
    let mut tile_changed = false;

    if pad.a() {
        if let Some(mark) = rules::confirm(world.board.mark_at(cx, cy), world.primary_tool) {
            world.board.set_mark(cx, cy, mark);
            tile_changed = true;
        }
    }
    if pad.b() {
        let secondary = world.primary_tool.partner();
        if let Some(mark) = rules::alt_confirm(world.board.mark_at(cx, cy), secondary) {
            world.board.set_mark(cx, cy, mark);
            tile_changed = true;
        }
    }

    if tile_changed {
        let mark = world.board.mark_at(cx, cy);

        // Cursor glyph shows what the next press would do here.
        world.sprite.glyph = if mark.is_empty() {
            world.primary_tool
        } else {
            Tool::Erase
        };

        vram::patch_cell(&mut world.tile_ram, cx, cy, mark);
        refresh_progress(world, cx, cy);
    }

    let mut moved = false;
    if pad.left() {
        world.cursor.step_left();
        moved = true;
    }
    if pad.right() {
        world.cursor.step_right();
        moved = true;
    }
    if pad.up() {
        world.cursor.step_up();
        moved = true;
    }
    if pad.down() {
        world.cursor.step_down();
        moved = true;
    }
    if moved {
        world.move_cursor_sprite();

        let mark = world.board.mark_at(world.cursor.x, world.cursor.y);
        world.sprite.glyph = if mark.is_empty() {
            world.primary_tool
        } else {
            Tool::Erase
        };
    }
}

/// After an edit at (x, y): re-derive clue satisfaction for the touched
/// row and column, and the passive solved indicator.
fn refresh_progress(world: &mut WorldState, x: u8, y: u8) {
    let marks_row = world.board.marks_row(y);
    let sol_row = world.board.solution_row(y);
    clues::update_satisfied(&mut world.row_clues[y as usize], &marks_row, &sol_row);

    let marks_col = world.board.marks_column(x);
    let sol_col = world.board.solution_column(x);
    clues::update_satisfied(&mut world.col_clues[x as usize], &marks_col, &sol_col);

    world.solved = clues::check_solution(&world.board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::coords::ROW_STRIDE;
    use crate::domain::grid::GRID_SIZE;
    use crate::domain::tile::CellMark;
    use crate::ui::vram::{INK, PATCH_SIZE};

    fn puzzle_world() -> WorldState {
        let mut world = WorldState::new(&GameConfig::default());
        enter_puzzle(&mut world, 0);
        world
    }

    fn patched_solid(world: &WorldState, base: usize, ink: u8) -> bool {
        (0..PATCH_SIZE).all(|row| {
            let at = base + row * ROW_STRIDE;
            world.tile_ram.bytes()[at..at + PATCH_SIZE]
                .iter()
                .all(|&b| b == ink)
        })
    }

    #[test]
    fn fill_move_fill_end_to_end() {
        let mut w = puzzle_world();

        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Fill);
        assert!(patched_solid(&w, 32, INK));

        for _ in 0..4 {
            puzzle_step(&mut w, Joypad::none().press(Joypad::RIGHT));
        }
        assert_eq!((w.cursor.x, w.cursor.y), (4, 0));
        assert_eq!((w.sprite.px, w.sprite.py), (58 + 4 * 6, 50));

        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.board.mark_at(4, 0), CellMark::Fill);
        assert!(patched_solid(&w, 64, INK));
    }

    #[test]
    fn second_press_erases_fill() {
        let mut w = puzzle_world();
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Empty);
        assert!(patched_solid(&w, 32, 0));
    }

    #[test]
    fn select_swaps_tools_every_frame() {
        let mut w = puzzle_world();
        assert_eq!(w.primary_tool, Tool::Fill);

        puzzle_step(&mut w, Joypad::none().press(Joypad::SELECT));
        assert_eq!(w.primary_tool, Tool::Stamp);

        // Held SELECT (no debounce) swaps right back on the next frame.
        puzzle_step(&mut w, Joypad::none().press(Joypad::SELECT));
        assert_eq!(w.primary_tool, Tool::Fill);
    }

    #[test]
    fn b_button_uses_secondary_tool() {
        let mut w = puzzle_world();

        puzzle_step(&mut w, Joypad::none().press(Joypad::B));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Stamp);
        assert_eq!(w.tile_ram.mark_at(0, 0), CellMark::Stamp);

        // B on its own mark is ignored.
        puzzle_step(&mut w, Joypad::none().press(Joypad::B));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Stamp);

        // A on the other tool's mark is ignored too.
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Stamp);
    }

    #[test]
    fn b_clears_a_fill_mark() {
        let mut w = puzzle_world();
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Fill);
        puzzle_step(&mut w, Joypad::none().press(Joypad::B));
        assert_eq!(w.board.mark_at(0, 0), CellMark::Empty);
    }

    #[test]
    fn glyph_tracks_cell_state() {
        let mut w = puzzle_world();

        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert_eq!(w.sprite.glyph, Tool::Erase);

        puzzle_step(&mut w, Joypad::none().press(Joypad::RIGHT));
        assert_eq!(w.sprite.glyph, Tool::Fill);

        puzzle_step(&mut w, Joypad::none().press(Joypad::LEFT));
        assert_eq!(w.sprite.glyph, Tool::Erase);
    }

    #[test]
    fn cursor_wraps_and_moves_sprite() {
        let mut w = puzzle_world();
        puzzle_step(&mut w, Joypad::none().press(Joypad::LEFT));
        assert_eq!((w.cursor.x, w.cursor.y), (14, 0));
        assert_eq!(w.sprite.px, 58 + 14 * 6);

        puzzle_step(&mut w, Joypad::none().press(Joypad::UP));
        assert_eq!((w.cursor.x, w.cursor.y), (14, 14));
        assert_eq!(w.sprite.py, 50 + 14 * 6);
    }

    #[test]
    fn solving_the_puzzle_sets_the_indicator() {
        let mut w = puzzle_world();

        // Fill every filled solution cell except (3, 0) directly, then
        // place the last fill through a real frame.
        for y in 0..GRID_SIZE as u8 {
            for x in 0..GRID_SIZE as u8 {
                if w.board.solution_at(x, y) && (x, y) != (3, 0) {
                    w.board.set_mark(x, y, CellMark::Fill);
                }
            }
        }
        assert!(!w.solved);

        for _ in 0..3 {
            puzzle_step(&mut w, Joypad::none().press(Joypad::RIGHT));
        }
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert!(w.solved);

        // Erasing it again revokes the indicator.
        puzzle_step(&mut w, Joypad::none().press(Joypad::A));
        assert!(!w.solved);
    }

    #[test]
    fn menu_selection_maps_column_major() {
        let mut w = WorldState::new(&GameConfig::default());
        enter_menu(&mut w);

        assert_eq!(menu_step(&mut w, Joypad::none().press(Joypad::A)), Some(0));

        assert_eq!(menu_step(&mut w, Joypad::none().press(Joypad::RIGHT)), None);
        assert_eq!(menu_step(&mut w, Joypad::none().press(Joypad::A)), Some(7));

        assert_eq!(menu_step(&mut w, Joypad::none().press(Joypad::DOWN)), None);
        assert_eq!(menu_step(&mut w, Joypad::none().press(Joypad::A)), Some(8));
    }

    #[test]
    fn menu_cursor_wraps_vertically() {
        let mut w = WorldState::new(&GameConfig::default());
        enter_menu(&mut w);

        menu_step(&mut w, Joypad::none().press(Joypad::UP));
        assert_eq!(menu_cell(&w), (6, 0));

        menu_step(&mut w, Joypad::none().press(Joypad::DOWN));
        assert_eq!(menu_cell(&w), (0, 0));
    }

    #[test]
    fn menu_right_wraps_left_stays() {
        let mut w = WorldState::new(&GameConfig::default());
        enter_menu(&mut w);

        for _ in 0..3 {
            menu_step(&mut w, Joypad::none().press(Joypad::RIGHT));
        }
        assert_eq!(menu_cell(&w), (0, 3));
        menu_step(&mut w, Joypad::none().press(Joypad::RIGHT));
        assert_eq!(menu_cell(&w), (0, 0));

        // Underflow past the first column lands back on it.
        menu_step(&mut w, Joypad::none().press(Joypad::LEFT));
        assert_eq!(menu_cell(&w), (0, 0));
    }
}
