//! Voice synthesis: assembling, triggering, and mixing one-shot voices.
//!
//! The control thread assembles a complete `Voice` per trigger and pushes
//! it over an SPSC ring; the audio callback drains the ring and mixes.
//! Voices are one-shot and time-bounded by their release deadline, so
//! there is no pooling or stealing — a voice plays out and is dropped.

pub mod mixer;
pub mod synthesizer;
pub mod voice;

pub use mixer::VoiceMixer;
pub use synthesizer::{trigger_channel, VoiceSynthesizer};
pub use voice::Voice;

/// Hard ceiling on the per-trigger overall volume. Keeps a board full of
/// large tokens from clipping when several sound in the same step.
pub const VOLUME_CEILING: f32 = 0.15;

/// Compute the overall volume for one trigger from token size and the
/// global and per-token volume settings.
pub fn overall_volume(width: f32, height: f32, global: f32, token: f32) -> f32 {
    ((width + height) / 160.0 * global * token * 0.1).min(VOLUME_CEILING)
}
