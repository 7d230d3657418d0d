//! One transient multi-harmonic voice.
//!
//! Each harmonic entry of the instrument becomes an independent path:
//! oscillator → low-pass → envelope gain, summed into the voice output.
//! Paths share nothing mutable with other voices, so concurrent triggers
//! can never disturb each other's envelopes.

use crate::dsp::{envelope::TriggerEnvelope, filter::LowPass, oscillator::Oscillator};
use crate::instruments::Instrument;

struct HarmonicPath {
    osc: Oscillator,
    filter: LowPass,
    env: TriggerEnvelope,
}

pub struct Voice {
    paths: Vec<HarmonicPath>,
    sample_rate: f32,
}

impl Voice {
    /// Assemble a voice for one trigger. `overall` is the already-ceilinged
    /// per-trigger volume; each path peaks at its harmonic gain times that.
    pub fn assemble(
        instrument: &Instrument,
        step: usize,
        overall: f32,
        sample_rate: f32,
    ) -> Self {
        let paths = (0..instrument.harmonic_count())
            .map(|i| HarmonicPath {
                osc: Oscillator::new(instrument.waveform, instrument.frequency(step, i)),
                filter: LowPass::new(instrument.filter_cutoff, instrument.resonance),
                env: TriggerEnvelope::new(
                    instrument.harmonic_gains[i] * overall,
                    instrument.attack,
                    instrument.decay,
                    instrument.sustain,
                    instrument.release,
                    sample_rate,
                ),
            })
            .collect();

        Self { paths, sample_rate }
    }

    /// Mix this voice's next block into `out` (additive).
    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            let mut acc = 0.0;
            for path in &mut self.paths {
                if !path.env.is_active() {
                    continue;
                }
                let raw = path.osc.next_sample(self.sample_rate);
                let filtered = path.filter.next_sample(raw, self.sample_rate);
                acc += filtered * path.env.next_sample();
            }
            *sample += acc;
        }
    }

    /// True until every path has passed its release deadline.
    pub fn is_active(&self) -> bool {
        self.paths.iter().any(|p| p.env.is_active())
    }
}
