//! Pluck: short sawtooth stab.
//!
//! Instant attack and a fast decay read as a plucked string; the octave
//! harmonic keeps it bright through the mid-range filter.

use crate::dsp::oscillator::Waveform;

use super::Instrument;

/// A minor pentatonic, A3 to C5.
const SCALE: [f32; 8] = [
    220.00, 261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33,
];

pub fn pluck() -> Instrument {
    Instrument {
        name: "pluck",
        scale: SCALE,
        waveform: Waveform::Saw,
        harmonic_ratios: &[1.0, 2.0],
        harmonic_gains: &[1.0, 0.35],
        attack: 0.001,
        decay: 0.15,
        sustain: 0.15,
        release: 0.45,
        filter_cutoff: 2_500.0,
        resonance: 0.4,
        pattern: [0, 3, 1, 4, 2, 5, 3, 6],
    }
}
