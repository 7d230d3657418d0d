//! Audio-band oscillator.
//!
//! Plain phase accumulation: `phase` walks [0, 1) and each waveform maps
//! it to a sample. Naive (non-band-limited) shapes are fine here — voices
//! are short, filtered, and quiet, so aliasing stays below the noise
//! floor of the use case.

use std::f32::consts::TAU;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    phase: f32,
    /// xorshift32 state for the noise source.
    noise_state: u32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
            // Seeded from the frequency so concurrent noise voices
            // decorrelate; any nonzero seed works.
            noise_state: (frequency.to_bits() | 1).wrapping_mul(0x9e37_79b9),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Produce the next sample in [-1, 1].
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (self.phase * TAU).sin(),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
            Waveform::Noise => {
                let mut x = self.noise_state;
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                self.noise_state = x;
                (x as f32 / u32::MAX as f32) * 2.0 - 1.0
            }
        };

        self.phase += self.frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}
