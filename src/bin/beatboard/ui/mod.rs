//! TUI for beatboard
//!
//! Paints the sticker board, a transport bar, and a live spectrum of the
//! audio output. The board area doubles as the gesture canvas: `render`
//! returns its bounds in virtual pixels so input handling and trash
//! detection agree with what is on screen.

mod board_view;
mod spectrum;
mod transport;

pub use spectrum::SpectrumView;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use beatboard::board::{Board, Rect as CanvasRect, TokenId};
use beatboard::instruments::InstrumentBank;
use beatboard::sequencer::StepSequencer;

/// Virtual canvas pixels per terminal cell. Cells are roughly twice as
/// tall as wide, so squares on the board look square on screen.
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

/// Draw one frame. Returns the board canvas bounds in virtual pixels.
#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    board: &Board,
    sequencer: &StepSequencer,
    bank: &InstrumentBank,
    spectrum: &SpectrumView,
    selected: Option<&TokenId>,
    master_volume: f32,
) -> CanvasRect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(8),    // Sticker board
            Constraint::Length(8), // Spectrum
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    transport::render_transport(frame, chunks[0], sequencer, board.len(), master_volume);

    let board_block = Block::default().title(" Board ").borders(Borders::ALL);
    let board_inner = board_block.inner(chunks[1]);
    frame.render_widget(board_block, chunks[1]);
    board_view::render_board(frame, board_inner, board, sequencer, bank, selected);

    spectrum::render_spectrum(frame, chunks[2], spectrum);

    let help = Paragraph::new(
        " [q] Quit  [Space] Play/Pause  [s] Stop  [1-5] Drop  [d] Delete  \
         [[/]] Layer  [</>] Size  [m] Mirror  [+/-] Tempo  [v/V] Volume  drag off-board to trash",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);

    CanvasRect::new(
        board_inner.x as f32 * CELL_W,
        board_inner.y as f32 * CELL_H,
        board_inner.width as f32 * CELL_W,
        board_inner.height as f32 * CELL_H,
    )
}
