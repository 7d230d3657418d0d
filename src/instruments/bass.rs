//! Bass: square fundamental with a sine-weight sub octave.
//!
//! The low cutoff keeps only the first few square harmonics; resonance
//! adds a little growl at the corner.

use crate::dsp::oscillator::Waveform;

use super::Instrument;

/// C minor pentatonic, C2 to C3.
const SCALE: [f32; 8] = [
    65.41, 77.78, 87.31, 98.00, 116.54, 130.81, 155.56, 174.61,
];

pub fn bass() -> Instrument {
    Instrument {
        name: "bass",
        scale: SCALE,
        waveform: Waveform::Square,
        // Sub octave under the fundamental for weight.
        harmonic_ratios: &[1.0, 0.5],
        harmonic_gains: &[0.8, 1.0],
        attack: 0.01,
        decay: 0.2,
        sustain: 0.5,
        release: 0.5,
        filter_cutoff: 400.0,
        resonance: 0.8,
        pattern: [0, 0, 3, 0, 5, 0, 3, 2],
    }
}
