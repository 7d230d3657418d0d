//! One-shot trigger envelope.
//!
//! Unlike a gated ADSR there is no note-off: every segment boundary is
//! fixed at the trigger instant t0.
//!
//!   level
//!    peak ┐    ╱╲
//!         │   ╱  ╲ exp
//!   floor │  ╱    ╲_____
//!         │ ╱           ╲╲ exp
//!   0.001 └╱──────────────╲──▶ t
//!          attack  decay    release
//!
//! - linear ramp 0 → peak over `attack` seconds;
//! - exponential decay toward floor = max(peak × sustain, 0.001) over the
//!   next `decay` seconds (the floor keeps the exponential target away
//!   from zero);
//! - exponential tail reaching 0.001 at the absolute instant t0 +
//!   `release` — release is a deadline from the trigger, not an offset
//!   from the end of decay;
//! - zero afterwards; the envelope reports itself done.
//!
//! Exponential segments use a per-sample coefficient computed once at
//! stage entry: coef = (target / start)^(1 / stage_samples), so the level
//! lands on the target exactly after stage_samples multiplications.

use crate::MIN_TIME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Attack,
    Decay,
    Tail,
    Done,
}

pub struct TriggerEnvelope {
    peak: f32,
    sustain_floor: f32,

    attack_samples: u32,
    decay_samples: u32,
    /// Absolute deadline in samples from the trigger instant.
    release_samples: u32,

    decay_coef: f32,
    tail_coef: f32,

    stage: Stage,
    level: f32,
    elapsed: u32,
}

impl TriggerEnvelope {
    pub fn new(
        peak: f32,
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        sample_rate: f32,
    ) -> Self {
        let attack_samples = (attack.max(MIN_TIME) * sample_rate).round().max(1.0) as u32;
        let decay_samples = (decay.max(MIN_TIME) * sample_rate).round().max(1.0) as u32;
        // The deadline always leaves at least one tail sample.
        let release_samples = ((release * sample_rate).round() as u32)
            .max(attack_samples + decay_samples + 1);
        let tail_samples = release_samples - attack_samples - decay_samples;

        let sustain_floor = (peak * sustain).max(0.001);
        let decay_coef = if peak > 0.0 {
            (sustain_floor / peak).powf(1.0 / decay_samples as f32)
        } else {
            1.0
        };
        let tail_coef = (0.001 / sustain_floor).powf(1.0 / tail_samples as f32);

        Self {
            peak,
            sustain_floor,
            attack_samples,
            decay_samples,
            release_samples,
            decay_coef,
            tail_coef,
            stage: Stage::Attack,
            level: 0.0,
            elapsed: 0,
        }
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self) -> f32 {
        self.elapsed = self.elapsed.saturating_add(1);

        match self.stage {
            Stage::Attack => {
                self.level += self.peak / self.attack_samples as f32;
                if self.elapsed >= self.attack_samples {
                    self.level = self.peak;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.level *= self.decay_coef;
                if self.elapsed >= self.attack_samples + self.decay_samples {
                    self.level = self.sustain_floor;
                    self.stage = Stage::Tail;
                }
            }
            Stage::Tail => {
                self.level *= self.tail_coef;
                if self.elapsed >= self.release_samples {
                    self.level = 0.0;
                    self.stage = Stage::Done;
                }
            }
            Stage::Done => {
                self.level = 0.0;
            }
        }

        self.level
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// False once the release deadline has passed.
    pub fn is_active(&self) -> bool {
        self.stage != Stage::Done
    }

    /// Samples from trigger to the release deadline.
    pub fn total_samples(&self) -> u32 {
        self.release_samples
    }
}
