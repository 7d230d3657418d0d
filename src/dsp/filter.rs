//! State-variable low-pass filter.
//!
//! Two-integrator topology-preserving core. Cutoff is prewarped with tan
//! so the response lines up with the analog prototype near Nyquist;
//! resonance maps to the damping coefficient k = 2 - 2*Q with Q in
//! [0, 1).

use std::f32::consts::TAU;

pub struct LowPass {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
}

impl LowPass {
    pub fn new(cutoff_hz: f32, resonance: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            // Keep k strictly positive so the filter stays stable.
            resonance: resonance.clamp(0.0, 0.99),
        }
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let wd = TAU * self.cutoff_hz.min(sample_rate * 0.49);
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        wa / (2.0 * sample_rate)
    }

    /// Filter one sample.
    pub fn next_sample(&mut self, sample: f32, sample_rate: f32) -> f32 {
        let g = self.compute_g(sample_rate);
        let k = 2.0 - 2.0 * self.resonance;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
