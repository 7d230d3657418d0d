//! Drum: pitched noise burst.
//!
//! Noise through a snappy envelope reads as a snare-ish hit; the second
//! path at half "pitch" thickens the body. The noise source ignores
//! frequency, so the scale mostly shapes the filter interplay.

use crate::dsp::oscillator::Waveform;

use super::Instrument;

const SCALE: [f32; 8] = [
    130.81, 146.83, 164.81, 174.61, 196.00, 220.00, 246.94, 261.63,
];

pub fn drum() -> Instrument {
    Instrument {
        name: "drum",
        scale: SCALE,
        waveform: Waveform::Noise,
        harmonic_ratios: &[1.0, 0.5],
        harmonic_gains: &[1.0, 0.6],
        attack: 0.001,
        decay: 0.08,
        sustain: 0.15,
        release: 0.3,
        filter_cutoff: 7_000.0,
        resonance: 0.3,
        pattern: [0, 2, 0, 4, 0, 2, 6, 4],
    }
}
