pub mod board; // Token collection, canvas geometry, layer ordering
pub mod dsp; // Realtime-safe signal primitives
pub mod gesture; // Pointer/touch session resolution
pub mod instruments; // Immutable voice catalog
pub mod io;
pub mod sequencer; // Transport and step cursor
pub mod synth; // Voice assembly, trigger gate, audio-thread mixing

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
