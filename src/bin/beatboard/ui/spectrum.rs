//! Output spectrum widget.
//!
//! Drains the monitor tap from the audio thread into a rolling window,
//! runs a Hann-windowed FFT, and shows log-spaced bins as bars. Purely
//! cosmetic; the audio path does not depend on this being drained.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
    Frame,
};
use rtrb::Consumer;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT window length in samples.
const WINDOW_LEN: usize = 1024;

/// Log-spaced display bins, 40 Hz up to Nyquist.
const DISPLAY_BINS: usize = 48;

const FLOOR_DB: f64 = -90.0;

pub struct SpectrumView {
    rx: Consumer<f32>,
    window: Vec<f32>,
    samples: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin index backing each display bin.
    bin_indices: Vec<usize>,
    /// Bar heights in 0..=100, ready for the sparkline.
    bars: Vec<u64>,
}

impl SpectrumView {
    pub fn new(sample_rate: f32, rx: Consumer<f32>) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(WINDOW_LEN);

        let window: Vec<f32> = (0..WINDOW_LEN)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * i as f32 / (WINDOW_LEN - 1) as f32;
                0.5 * (1.0 - phase.cos())
            })
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(1.0);
        let min_freq = 40.0f64.min(nyquist);
        let ratio = nyquist / min_freq;
        let half = WINDOW_LEN / 2;
        let bin_indices = (0..DISPLAY_BINS)
            .map(|i| {
                let t = i as f64 / (DISPLAY_BINS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index = (freq * WINDOW_LEN as f64 / sample_rate as f64).round() as usize;
                index.clamp(1, half - 1)
            })
            .collect();

        Self {
            rx,
            window,
            samples: vec![0.0; WINDOW_LEN],
            fft,
            scratch: vec![Complex::new(0.0, 0.0); WINDOW_LEN],
            bin_indices,
            bars: vec![0; DISPLAY_BINS],
        }
    }

    /// Drain the monitor ring, keep the newest window, recompute bars.
    pub fn poll(&mut self) {
        let mut fresh = false;
        while let Ok(sample) = self.rx.pop() {
            self.samples.push(sample);
            fresh = true;
        }
        if !fresh {
            return;
        }
        if self.samples.len() > WINDOW_LEN {
            let excess = self.samples.len() - WINDOW_LEN;
            self.samples.drain(0..excess);
        }

        for (slot, (&sample, &w)) in self
            .scratch
            .iter_mut()
            .zip(self.samples.iter().zip(self.window.iter()))
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (bar, &index) in self.bars.iter_mut().zip(self.bin_indices.iter()) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12) as f64;
            let db = 10.0 * power.log10();
            // Map [FLOOR_DB, 0] onto bar heights [0, 100].
            let t = ((db - FLOOR_DB) / -FLOOR_DB).clamp(0.0, 1.0);
            *bar = (t * 100.0) as u64;
        }
    }

    pub fn bars(&self) -> &[u64] {
        &self.bars
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &SpectrumView) {
    let sparkline = Sparkline::default()
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .style(Style::default().fg(Color::Green))
        .max(100)
        .data(spectrum.bars());
    frame.render_widget(sparkline, area);
}
