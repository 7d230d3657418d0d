//! Transport bar widget - BPM, play state, step cursor, master volume.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use beatboard::sequencer::{StepSequencer, Transport};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    sequencer: &StepSequencer,
    token_count: usize,
    master_volume: f32,
) {
    let block = Block::default().title(" beatboard ").borders(Borders::ALL);

    let (symbol, label, color) = match sequencer.transport() {
        Transport::Playing => ("▶", "Playing", Color::Green),
        Transport::Paused => ("⏸", "Paused", Color::Yellow),
        Transport::Stopped => ("■", "Stopped", Color::DarkGray),
    };

    // Ten-notch volume meter.
    let notches = (master_volume * 10.0).round() as usize;
    let meter: String = "▮".repeat(notches) + &"▯".repeat(10 - notches.min(10));

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", sequencer.tempo()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
        Span::styled(
            format!("Step {}/{}  ", sequencer.current_step() + 1, token_count.max(1)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{token_count} stickers  "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Vol {meter}"),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
