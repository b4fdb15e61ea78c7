/// WorldState: the complete state of the running game.
///
/// One phase is active at a time. The puzzle screen owns the board, the
/// wrapping cursor, the cursor sprite, and the modeled background tile
/// memory; the board's mark plane and the tile memory are parallel by
/// construction (every mark change is followed by a tile patch).

use crate::config::GameConfig;
use crate::domain::clues::Clue;
use crate::domain::coords;
use crate::domain::grid::{Board, Cursor};
use crate::domain::tile::Tool;
use crate::sim::library;
use crate::ui::palette::Palette;
use crate::ui::vram::TileRam;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Menu,
    Puzzle,
}

/// The hardware-sprite model for the puzzle cursor: a screen-pixel
/// position plus the tile glyph currently shown.
#[derive(Clone, Copy, Debug)]
pub struct CursorSprite {
    pub px: u8,
    pub py: u8,
    pub glyph: Tool,
}

pub struct WorldState {
    pub phase: Phase,
    /// Global frame counter (drives blink animations).
    pub frame: u64,

    // ── Palette (blanked on screen entry, restored after settle) ──
    pub palette: Palette,
    palette_target: Palette,
    palette_delay: u8,

    // ── Menu screen (cursor in the menu's pixel space) ──
    pub menu_x: u8,
    pub menu_y: u8,

    // ── Puzzle screen ──
    pub selected_puzzle: u8,
    pub board: Board,
    pub cursor: Cursor,
    pub primary_tool: Tool,
    pub sprite: CursorSprite,
    pub tile_ram: TileRam,
    pub row_clues: Vec<Vec<Clue>>,
    pub col_clues: Vec<Vec<Clue>>,
    /// Passive indicator: the mark plane currently reproduces the
    /// solution. Play continues regardless.
    pub solved: bool,
}

impl WorldState {
    pub fn new(config: &GameConfig) -> WorldState {
        let (px, py) = coords::to_screen(0, 0);
        let mut world = WorldState {
            phase: Phase::Title,
            frame: 0,
            palette: Palette::blank(),
            palette_target: Palette::for_mode(config.color_mode),
            palette_delay: 0,
            menu_x: 0,
            menu_y: 0,
            selected_puzzle: 0,
            board: library::load_puzzle(0),
            cursor: Cursor::new(),
            primary_tool: Tool::Fill,
            sprite: CursorSprite { px, py, glyph: Tool::Fill },
            tile_ram: TileRam::new(),
            row_clues: vec![],
            col_clues: vec![],
            solved: false,
        };
        world.blank_screen(5);
        world
    }

    /// Blank the palette for `delay` frames, then restore the configured
    /// one. Some consoles need a few frames of settle time before
    /// palettes can be loaded.
    pub fn blank_screen(&mut self, delay: u8) {
        self.palette = Palette::blank();
        self.palette_delay = delay;
    }

    /// Per-frame palette settle tick.
    pub fn tick_palette(&mut self) {
        if self.palette_delay > 0 {
            self.palette_delay -= 1;
            if self.palette_delay == 0 {
                self.palette = self.palette_target;
            }
        }
    }

    /// Reposition the cursor sprite over the current cell.
    pub fn move_cursor_sprite(&mut self) {
        self.sprite.glyph = Tool::Stamp;
        let (px, py) = coords::to_screen(self.cursor.x, self.cursor.y);
        self.sprite.px = px;
        self.sprite.py = py;
    }
}
