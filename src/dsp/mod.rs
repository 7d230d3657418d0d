//! Low-level DSP primitives used by the voice renderer.
//!
//! These components are allocation-free and realtime-safe once
//! constructed, so they can live inside voice structs that cross into the
//! audio callback. They stay focused on the signal math; orchestration
//! (which voice plays when, at what gain) lives in `synth`.

/// One-shot trigger envelope: linear attack, exponential decay and tail.
pub mod envelope;
/// State-variable low-pass filter.
pub mod filter;
/// Phase-accumulation oscillator with noise source.
pub mod oscillator;
