//! Immutable catalog of synthesizer voice definitions.
//!
//! Each entry is configuration data only; rendering lives in `synth`.
//! Tokens map to entries through a pure hash of their identifier, so the
//! assignment is reproducible from the id alone and never needs storage.
//!
//! # Example
//!
//! ```ignore
//! use beatboard::instruments::InstrumentBank;
//!
//! let bank = InstrumentBank::standard();
//! let instrument = bank.select(&token.id);
//! ```

mod bass;
mod bell;
mod drum;
mod marimba;
mod pluck;

pub use bass::bass;
pub use bell::bell;
pub use drum::drum;
pub use marimba::marimba;
pub use pluck::pluck;

use crate::board::TokenId;
use crate::dsp::oscillator::Waveform;

/// Entries in the scale and rhythmic pattern.
pub const SCALE_LEN: usize = 8;

/// One synthesizer voice definition.
#[derive(Debug, Clone)]
pub struct Instrument {
    pub name: &'static str,
    /// Eight playable frequencies in Hz.
    pub scale: [f32; SCALE_LEN],
    pub waveform: Waveform,
    /// Frequency multipliers, one oscillator path each.
    /// Always the same length as `harmonic_gains`.
    pub harmonic_ratios: &'static [f32],
    /// Relative gain per harmonic path.
    pub harmonic_gains: &'static [f32],
    /// Envelope times in seconds; `release` is an absolute deadline from
    /// the trigger instant, not an offset from the end of decay.
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    /// Low-pass stage applied to every harmonic path.
    pub filter_cutoff: f32,
    pub resonance: f32,
    /// Eight indices into `scale`, read modulo 8 per step.
    pub pattern: [usize; SCALE_LEN],
}

impl Instrument {
    /// Frequency for one harmonic at one sequencer step.
    pub fn frequency(&self, step: usize, harmonic: usize) -> f32 {
        let degree = self.pattern[step % SCALE_LEN] % SCALE_LEN;
        self.scale[degree] * self.harmonic_ratios[harmonic]
    }

    pub fn harmonic_count(&self) -> usize {
        self.harmonic_ratios.len()
    }
}

/// The fixed catalog.
pub struct InstrumentBank {
    entries: Vec<Instrument>,
}

impl InstrumentBank {
    /// Standard five-entry catalog spanning pitched and percussive
    /// timbres.
    pub fn standard() -> Self {
        Self {
            entries: vec![marimba(), bell(), bass(), pluck(), drum()],
        }
    }

    pub fn entries(&self) -> &[Instrument] {
        &self.entries
    }

    /// Deterministic token-to-instrument mapping: the same id always
    /// lands on the same entry, with no stored state.
    pub fn select(&self, id: &TokenId) -> &Instrument {
        let index = (fnv1a(id.as_str()) % self.entries.len() as u64) as usize;
        &self.entries[index]
    }
}

/// FNV-1a over the identifier bytes. Order-sensitive and stable across
/// runs, which is all the mapping needs.
fn fnv1a(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
