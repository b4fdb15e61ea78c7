/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Everything is drawn with the world's palette, so a blanked palette
/// really does black out the screen between phases, and restoring it
/// repaints every cell through the diff.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::coords::{START_X, START_Y, TILE_SIZE};
use crate::domain::grid::GRID_SIZE;
use crate::domain::tile::{CellMark, Tool};
use crate::sim::step::{menu_cell, MENU_OPTIONS};
use crate::sim::world::{Phase, WorldState};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BLACK,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell { ch: ' ', fg: Color::White, bg });
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg });
            cx += 1;
        }
    }
}

// ── Renderer ──

/// Each grid cell = 2 terminal columns.
const CELL_W: usize = 2;

/// Row of the HUD bar, and the first row available to screen content.
const HUD_ROW: usize = 0;
const CONTENT_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BLACK),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BLACK), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition
        if self.last_phase != Some(world.phase) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BLACK), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        // Build front buffer
        self.front.clear(world.palette.ink(0));

        match world.phase {
            Phase::Title => self.compose_title(world),
            Phase::Menu => self.compose_menu(world),
            Phase::Puzzle => self.compose_puzzle(world),
        }

        // Diff and emit
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BLACK;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BLACK),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;

                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: title screen ──

    fn compose_title(&mut self, w: &WorldState) {
        let pal = &w.palette;
        let bg = pal.ink(0);
        let cx = self.front.width / 2;

        let art = [
            "┌────────────────────────┐",
            "│                        │",
            "│       PICTOGRID        │",
            "│    picture • logic     │",
            "│                        │",
            "└────────────────────────┘",
        ];
        for (i, line) in art.iter().enumerate() {
            let x = cx.saturating_sub(line.chars().count() / 2);
            self.front.put_str(x, CONTENT_ROW + 2 + i, line, pal.ink(3), bg);
        }

        // Blink at half the cadence of a one-second cycle
        if w.frame % 60 < 30 {
            let msg = "PRESS START";
            let x = cx.saturating_sub(msg.len() / 2);
            self.front.put_str(x, CONTENT_ROW + 10, msg, pal.ink(2), bg);
        }

        let help = " Enter:Start   Q:Quit ";
        self.front.put_str(0, self.front.height.saturating_sub(1), help, pal.ink(1), bg);
    }

    // ── Compose: menu screen ──

    fn compose_menu(&mut self, w: &WorldState) {
        let pal = &w.palette;
        let bg = pal.ink(0);

        self.front.put_str(2, HUD_ROW, "SELECT PUZZLE", pal.ink(3), bg);

        let (cur_row, cur_col) = menu_cell(w);

        for (row, ids) in MENU_OPTIONS.iter().enumerate() {
            for (col, &id) in ids.iter().enumerate() {
                let label = if id < 26 {
                    (b'A' + id) as char
                } else {
                    '·'
                };
                let x = 4 + col * 8;
                let y = CONTENT_ROW + 1 + row * 2;
                if (row, col) == (cur_row, cur_col) {
                    self.front.put_str(x, y, &format!("▶{label}◀"), pal.ink(0), pal.obj);
                } else {
                    self.front.put_str(x, y, &format!(" {label} "), pal.ink(3), bg);
                }
            }
        }

        let help = " Arrows:Move   Z:Pick   Q:Quit ";
        self.front.put_str(0, self.front.height.saturating_sub(1), help, pal.ink(1), bg);
    }

    // ── Compose: puzzle screen ──

    fn compose_puzzle(&mut self, w: &WorldState) {
        let pal = &w.palette;
        let bg = pal.ink(0);
        let buf_h = self.front.height;

        // Gutter and header sized to the deepest clue lists
        let max_row_clues = w.row_clues.iter().map(|c| c.len()).max().unwrap_or(0);
        let max_col_clues = w.col_clues.iter().map(|c| c.len()).max().unwrap_or(0);
        let grid_left = 1 + max_row_clues * 3;
        let grid_top = CONTENT_ROW + max_col_clues;

        // ── HUD row ──
        let hud = format!(
            " PICTOGRID  A:{}  B:{}  SELECT:swap ",
            tool_name(w.primary_tool),
            tool_name(w.primary_tool.partner()),
        );
        for x in 0..self.front.width {
            self.front.set(x, HUD_ROW, Cell { ch: ' ', fg: pal.ink(0), bg: pal.ink(3) });
        }
        self.front.put_str(0, HUD_ROW, &hud, pal.ink(0), pal.ink(3));

        // ── Column clues (bottom-aligned above the grid) ──
        for x in 0..GRID_SIZE {
            let clues = &w.col_clues[x];
            for (i, clue) in clues.iter().enumerate() {
                let y = grid_top - (clues.len() - i);
                let col = grid_left + x * CELL_W;
                let fg = if clue.satisfied { pal.ink(1) } else { pal.ink(3) };
                self.front.put_str(col, y, &format!("{:>2}", clue.len), fg, bg);
            }
        }

        // ── Row clues (right-aligned in the left gutter) ──
        for y in 0..GRID_SIZE {
            let clues = &w.row_clues[y];
            let row = grid_top + y;
            let mut col = grid_left;
            for clue in clues.iter().rev() {
                col = col.saturating_sub(3);
                let fg = if clue.satisfied { pal.ink(1) } else { pal.ink(3) };
                self.front.put_str(col, row, &format!("{:>2} ", clue.len), fg, bg);
            }
        }

        // ── Grid: drawn from the background tile memory ──
        for y in 0..GRID_SIZE as u8 {
            for x in 0..GRID_SIZE as u8 {
                let col = grid_left + x as usize * CELL_W;
                let row = grid_top + y as usize;
                let (s, fg) = match w.tile_ram.mark_at(x, y) {
                    CellMark::Fill => ("██", pal.ink(2)),
                    CellMark::Stamp => ("╳ ", pal.ink(2)),
                    CellMark::Empty => ("· ", pal.ink(1)),
                };
                self.front.put_str(col, row, s, fg, bg);
            }
        }

        // ── Cursor sprite, projected from its screen pixel position ──
        let cx = ((w.sprite.px - START_X) / TILE_SIZE) as usize;
        let cy = ((w.sprite.py - START_Y) / TILE_SIZE) as usize;
        let glyph = match w.sprite.glyph {
            Tool::Erase => "□ ",
            Tool::Fill => "■ ",
            Tool::Stamp => "╳ ",
        };
        self.front.put_str(grid_left + cx * CELL_W, grid_top + cy, glyph, pal.ink(0), pal.obj);

        // ── Status / help ──
        let status_row = grid_top + GRID_SIZE + 1;
        if w.solved && status_row < buf_h {
            self.front.put_str(grid_left, status_row, " ◆ COMPLETE ◆ ", pal.ink(0), pal.ink(2));
        }

        let help = " Arrows:Move  Z:A  X:B  Tab:Select  Q:Quit ";
        self.front.put_str(0, buf_h.saturating_sub(1), help, pal.ink(1), bg);
    }
}

fn tool_name(tool: Tool) -> &'static str {
    match tool {
        Tool::Erase => "ERASE",
        Tool::Fill => "FILL",
        Tool::Stamp => "STAMP",
    }
}
