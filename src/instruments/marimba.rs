//! Marimba: woody mallet tone.
//!
//! Triangle fundamental plus the near-4x partial that gives struck bars
//! their "clack". Fast attack, medium decay, darkish filter.

use crate::dsp::oscillator::Waveform;

use super::Instrument;

/// C major pentatonic, C4 to E5.
const SCALE: [f32; 8] = [
    261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33, 659.26,
];

pub fn marimba() -> Instrument {
    Instrument {
        name: "marimba",
        scale: SCALE,
        waveform: Waveform::Triangle,
        // Struck-bar partials sit just under 4x the fundamental.
        harmonic_ratios: &[1.0, 3.93],
        harmonic_gains: &[1.0, 0.2],
        attack: 0.002,
        decay: 0.25,
        sustain: 0.12,
        release: 0.6,
        filter_cutoff: 3_500.0,
        resonance: 0.3,
        pattern: [0, 2, 4, 1, 3, 5, 2, 0],
    }
}
