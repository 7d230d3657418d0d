//! Sticker board widget.
//!
//! Paints the board snapshot bottom-most token first, so overlap on
//! screen matches the z-order the hit test uses. Each token is a filled
//! cell rectangle colored by its instrument, labelled with its kind and
//! step number; the token at the playing step flashes white.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

use beatboard::board::{Board, TokenId, TokenSnapshot};
use beatboard::instruments::InstrumentBank;
use beatboard::sequencer::{StepSequencer, Transport};

use super::{CELL_H, CELL_W};

fn instrument_color(name: &str) -> Color {
    match name {
        "marimba" => Color::Yellow,
        "bell" => Color::Cyan,
        "bass" => Color::Blue,
        "pluck" => Color::Green,
        "drum" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    sequencer: &StepSequencer,
    bank: &InstrumentBank,
    selected: Option<&TokenId>,
) {
    let current_step = match sequencer.transport() {
        Transport::Playing => Some(sequencer.current_step()),
        _ => None,
    };

    for token in board.snapshot(current_step) {
        paint_token(frame, area, &token, bank, selected == Some(&token.id));
    }
}

fn paint_token(
    frame: &mut Frame,
    area: Rect,
    token: &TokenSnapshot,
    bank: &InstrumentBank,
    selected: bool,
) {
    // Virtual pixels to terminal cells, relative to the board area.
    let col0 = (token.position.x / CELL_W).floor() as i32;
    let row0 = (token.position.y / CELL_H).floor() as i32;
    let cols = ((token.width / CELL_W).round() as i32).max(1);
    let rows = ((token.height / CELL_H).round() as i32).max(1);

    let color = instrument_color(bank.select(&token.id).name);
    let style = if token.highlighted {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black).bg(color)
    };

    let label = format!(
        "{}{}:{}",
        if selected { "*" } else { " " },
        token.id,
        token.step_index,
    );
    let mut label_chars = label.chars();

    let buf = frame.buffer_mut();
    for dy in 0..rows {
        for dx in 0..cols {
            let col = area.x as i32 + col0 + dx;
            let row = area.y as i32 + row0 + dy;
            if col < area.x as i32
                || row < area.y as i32
                || col >= (area.x + area.width) as i32
                || row >= (area.y + area.height) as i32
            {
                continue;
            }
            let Some(cell) = buf.cell_mut((col as u16, row as u16)) else {
                continue;
            };
            // Label runs along the top edge; the rest is solid fill.
            let symbol = if dy == 0 {
                label_chars.next().unwrap_or(' ')
            } else if token.mirrored {
                '▒'
            } else {
                ' '
            };
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}
