//! Application wiring: board, gestures, sequencer, audio, terminal.
//!
//! Everything gesture- and sequencing-related runs on this one thread;
//! the only other thread is the cpal callback, fed through the trigger
//! ring. The tick deadline is re-armed from "now" on tempo changes and
//! resumes, so a tempo change never re-fires the step that just fired.

use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer;

use beatboard::board::{Board, LayerMove, Point, Rect, ScaleStep, StickerDescriptor, TokenId};
use beatboard::gesture::{GestureController, Pointers};
use beatboard::instruments::InstrumentBank;
use beatboard::io::AudioOutput;
use beatboard::sequencer::{StepSequencer, DEFAULT_TEMPO};
use beatboard::synth::VoiceSynthesizer;

use crate::ui::{self, SpectrumView, CELL_H, CELL_W};

/// Samples buffered for the spectrum view.
const MONITOR_RING_SIZE: usize = 8_192;

const STICKER_KINDS: [&str; 5] = ["star", "frog", "moon", "bolt", "heart"];

/// Application builder: configure, then `run()`.
pub struct Beatboard {
    tempo: f64,
    master_volume: f32,
}

impl Beatboard {
    pub fn new() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            master_volume: 0.8,
        }
    }

    pub fn tempo(mut self, bpm: f64) -> Self {
        self.tempo = bpm;
        self
    }

    pub fn master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn run(self) -> EyreResult<()> {
        let (monitor_tx, monitor_rx) = RingBuffer::<f32>::new(MONITOR_RING_SIZE);
        let (audio, synthesizer) = AudioOutput::start(Some(monitor_tx))?;

        let terminal = ratatui::init();
        let result = App::new(self, synthesizer, audio.sample_rate, monitor_rx).run(terminal);
        ratatui::restore();
        result
    }
}

impl Default for Beatboard {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    board: Board,
    gestures: GestureController,
    sequencer: StepSequencer,
    bank: InstrumentBank,
    synthesizer: VoiceSynthesizer,
    master_volume: f32,

    /// Last token touched or dropped; target of keyboard operations.
    selected: Option<TokenId>,
    /// Wall-clock deadline for the next sequencer tick.
    next_tick: Instant,
    /// Board area in virtual pixels, refreshed every frame.
    canvas: Rect,
    spectrum: SpectrumView,
    drop_cursor: usize,
    should_quit: bool,
}

impl App {
    fn new(
        config: Beatboard,
        synthesizer: VoiceSynthesizer,
        sample_rate: f32,
        monitor_rx: rtrb::Consumer<f32>,
    ) -> Self {
        let mut sequencer = StepSequencer::new(config.tempo);
        sequencer.play();

        Self {
            board: Board::new(),
            gestures: GestureController::new(Rect::new(0.0, 0.0, 640.0, 384.0)),
            sequencer,
            bank: InstrumentBank::standard(),
            synthesizer,
            master_volume: config.master_volume,
            selected: None,
            next_tick: Instant::now(),
            canvas: Rect::new(0.0, 0.0, 640.0, 384.0),
            spectrum: SpectrumView::new(sample_rate, monitor_rx),
            drop_cursor: 0,
            should_quit: false,
        }
    }

    fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        crossterm::execute!(std::io::stdout(), event::EnableMouseCapture)
            .wrap_err("failed to enable mouse capture")?;
        self.next_tick = Instant::now() + self.sequencer.tick_period();

        while !self.should_quit {
            self.spectrum.poll();

            let mut canvas = Rect::default();
            terminal.draw(|frame| {
                canvas = ui::render(
                    frame,
                    &self.board,
                    &self.sequencer,
                    &self.bank,
                    &self.spectrum,
                    self.selected.as_ref(),
                    self.master_volume,
                );
            })?;
            self.canvas = canvas;
            self.gestures.set_canvas(canvas);

            // Wait for input, but never past the tick deadline.
            let timeout = if self.sequencer.is_playing() && !self.board.is_empty() {
                self.next_tick
                    .saturating_duration_since(Instant::now())
                    .min(Duration::from_millis(16))
            } else {
                Duration::from_millis(16)
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.drive_sequencer();
        }

        crossterm::execute!(std::io::stdout(), event::DisableMouseCapture)
            .wrap_err("failed to disable mouse capture")?;
        Ok(())
    }

    /// Fire due ticks. Catch-up never bursts: if the loop fell behind,
    /// the deadline resyncs to one period from now.
    fn drive_sequencer(&mut self) {
        if !self.sequencer.is_playing() || self.board.is_empty() {
            return;
        }
        let now = Instant::now();
        if now < self.next_tick {
            return;
        }

        if let Some(step) = self.sequencer.tick(self.board.len()) {
            for token in self.board.tokens_at_step(step) {
                let instrument = self.bank.select(&token.id);
                self.synthesizer.trigger(
                    instrument,
                    token.step_index,
                    token.width,
                    token.height,
                    self.master_volume,
                    token.volume,
                );
            }
        }

        let period = self.sequencer.tick_period();
        self.next_tick += period;
        if self.next_tick <= now {
            self.next_tick = now + period;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char(' ') => {
                let was_playing = self.sequencer.is_playing();
                self.sequencer.toggle();
                if !was_playing && self.sequencer.is_playing() {
                    self.next_tick = Instant::now() + self.sequencer.tick_period();
                }
            }
            KeyCode::Char('s') => self.sequencer.stop(),

            KeyCode::Char('+') | KeyCode::Char('=') => self.change_tempo(10.0),
            KeyCode::Char('-') => self.change_tempo(-10.0),

            KeyCode::Char('v') => {
                self.master_volume = (self.master_volume - 0.1).max(0.0);
            }
            KeyCode::Char('V') => {
                self.master_volume = (self.master_volume + 0.1).min(1.0);
            }

            KeyCode::Char(c @ '1'..='5') => {
                let kind = STICKER_KINDS[c as usize - '1' as usize];
                self.drop_sticker(kind);
            }

            KeyCode::Char(']') => self.with_selected(|board, id| {
                board.move_layer(id, LayerMove::Up);
            }),
            KeyCode::Char('[') => self.with_selected(|board, id| {
                board.move_layer(id, LayerMove::Down);
            }),
            KeyCode::Char('>') | KeyCode::Char('.') => self.with_selected(|board, id| {
                board.scale_step(id, ScaleStep::Grow);
            }),
            KeyCode::Char('<') | KeyCode::Char(',') => self.with_selected(|board, id| {
                board.scale_step(id, ScaleStep::Shrink);
            }),
            KeyCode::Char('m') => self.with_selected(|board, id| {
                board.toggle_mirror(id);
            }),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected.take() {
                    self.board.remove_token(&id);
                }
            }
            _ => {}
        }
    }

    fn change_tempo(&mut self, delta: f64) {
        self.sequencer.set_tempo(self.sequencer.tempo() + delta);
        // Re-arm from now at the new period; never re-fire the last step.
        self.next_tick = Instant::now() + self.sequencer.tick_period();
    }

    fn with_selected(&mut self, op: impl FnOnce(&mut Board, &TokenId)) {
        if let Some(id) = self.selected.clone() {
            op(&mut self.board, &id);
        }
    }

    /// Drop a sticker at a spot that walks the canvas diagonally, so
    /// repeated drops don't pile up in one place.
    fn drop_sticker(&mut self, kind: &str) {
        let slot = self.drop_cursor as f32;
        self.drop_cursor = (self.drop_cursor + 1) % 12;
        let x = 80.0 + (slot * 53.0) % 480.0;
        let y = 60.0 + (slot * 37.0) % 260.0;
        let id = self
            .board
            .drop_token(&StickerDescriptor::new(kind.to_string()), x, y);
        self.selected = Some(id);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Gestures take screen-absolute pixels; hit testing is canvas-local.
        let point = Point::new(mouse.column as f32 * CELL_W, mouse.row as f32 * CELL_H);
        let local = Point::new(point.x - self.canvas.x, point.y - self.canvas.y);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(token) = self.board.hit_test(local) {
                    let id = token.id.clone();
                    self.gestures.begin(&self.board, &id, Pointers::One(point));
                    self.selected = Some(id);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.gestures.update(&mut self.board, Pointers::One(point));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                use beatboard::gesture::SessionOutcome;
                if let SessionOutcome::Removed(id) = self.gestures.end(&mut self.board) {
                    if self.selected.as_ref() == Some(&id) {
                        self.selected = None;
                    }
                }
            }
            _ => {}
        }
    }
}
