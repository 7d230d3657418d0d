//! Bell: long inharmonic shimmer.
//!
//! Sine partials at the classic inharmonic bell ratios (minor-third and
//! high hum partials), slow decay, bright filter so the upper partials
//! ring through.

use crate::dsp::oscillator::Waveform;

use super::Instrument;

/// E minor pentatonic, E4 to G5.
const SCALE: [f32; 8] = [
    329.63, 392.00, 440.00, 493.88, 587.33, 659.26, 783.99, 880.00,
];

pub fn bell() -> Instrument {
    Instrument {
        name: "bell",
        scale: SCALE,
        waveform: Waveform::Sine,
        harmonic_ratios: &[1.0, 2.76, 5.40],
        harmonic_gains: &[1.0, 0.55, 0.25],
        attack: 0.005,
        decay: 0.9,
        sustain: 0.2,
        release: 2.2,
        filter_cutoff: 6_000.0,
        resonance: 0.2,
        pattern: [0, 4, 2, 6, 1, 5, 3, 7],
    }
}
