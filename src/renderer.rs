use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GridSize, Palette};
use crate::draw::Canvas;
use crate::grid::Position;

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;
const GLYPH_FILLED: &str = "██";
const GLYPH_EMPTY: &str = " ·";
const TITLE: &str = " Snake ";

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Retained cell colors; a cell keeps its color until it is erased.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CellBuffer {
    bounds: GridSize,
    cells: Vec<Option<Color>>,
}

impl CellBuffer {
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.total_cells()],
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns the color drawn at `position`, if any.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Color> {
        self.index(position).and_then(|index| self.cells[index])
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.bounds.width) + x)
    }
}

impl Canvas for CellBuffer {
    fn draw_cell(&mut self, position: Position, color: Color) {
        if let Some(index) = self.index(position) {
            self.cells[index] = Some(color);
        }
    }

    fn erase_cell(&mut self, position: Position) {
        if let Some(index) = self.index(position) {
            self.cells[index] = None;
        }
    }
}

/// Renders the retained cells as a bordered, centered board.
pub fn render(frame: &mut Frame<'_>, cells: &CellBuffer, palette: &Palette) {
    let board = centered_board(frame.area(), cells.bounds());

    let block = Block::bordered()
        .title(TITLE)
        .title_style(Style::new().fg(palette.snake_color()).add_modifier(Modifier::BOLD))
        .border_style(Style::new().fg(Color::Gray).bg(palette.background_color()));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let filled = Style::new().bg(palette.background_color());
    let empty = Style::new()
        .fg(palette.grid_line_color())
        .bg(palette.background_color());

    let buffer = frame.buffer_mut();
    for y in 0..i32::from(cells.bounds().height) {
        for x in 0..i32::from(cells.bounds().width) {
            let position = Position { x, y };
            let Some((column, row)) = logical_to_terminal(inner, cells.bounds(), position) else {
                continue;
            };

            match cells.get(position) {
                Some(color) => buffer.set_string(column, row, GLYPH_FILLED, filled.fg(color)),
                None => buffer.set_string(column, row, GLYPH_EMPTY, empty),
            }
        }
    }
}

fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// [`Canvas`] backed by the real terminal.
///
/// Owns raw mode and the alternate screen for its lifetime; dropping it
/// restores the terminal best-effort.
pub struct TerminalCanvas {
    terminal: AppTerminal,
    cells: CellBuffer,
    palette: Palette,
}

impl TerminalCanvas {
    /// Enters raw mode, switches to the alternate screen, and clears the board.
    pub fn enter(bounds: GridSize, palette: Palette) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(error) => {
                let _ = restore_terminal();
                return Err(error);
            }
        };

        Ok(Self {
            terminal,
            cells: CellBuffer::new(bounds),
            palette,
        })
    }
}

impl Canvas for TerminalCanvas {
    fn draw_cell(&mut self, position: Position, color: Color) {
        self.cells.draw_cell(position, color);
    }

    fn erase_cell(&mut self, position: Position) {
        self.cells.erase_cell(position);
    }

    fn present(&mut self) -> io::Result<()> {
        self.terminal
            .draw(|frame| render(frame, &self.cells, &self.palette))?;
        Ok(())
    }
}

impl Drop for TerminalCanvas {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
