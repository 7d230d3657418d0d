//! Trigger front-end: the control-thread half of the synth.
//!
//! `VoiceSynthesizer` assembles voices and pushes them over an SPSC ring
//! to the `VoiceMixer` living in the audio callback. Triggering is
//! fire-and-forget: while the audio output is not ready (or the ring is
//! full) the trigger is dropped silently, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rtrb::{Producer, RingBuffer};

use crate::instruments::Instrument;

use super::mixer::VoiceMixer;
use super::voice::Voice;
use super::overall_volume;

/// Capacity of the trigger ring. Each step fires at most a handful of
/// voices, so this is generous.
const TRIGGER_QUEUE_SIZE: usize = 64;

/// Build the connected synthesizer/mixer pair. The mixer side moves into
/// the audio callback; the synthesizer stays with the control thread.
pub fn trigger_channel(sample_rate: f32) -> (VoiceSynthesizer, VoiceMixer) {
    let (tx, rx) = RingBuffer::<Voice>::new(TRIGGER_QUEUE_SIZE);
    let ready = Arc::new(AtomicBool::new(false));

    let synthesizer = VoiceSynthesizer {
        tx,
        ready: ready.clone(),
        sample_rate,
    };
    let mixer = VoiceMixer::new(rx, ready);

    (synthesizer, mixer)
}

pub struct VoiceSynthesizer {
    tx: Producer<Voice>,
    /// Flipped by the audio output once the stream is live.
    ready: Arc<AtomicBool>,
    sample_rate: f32,
}

impl VoiceSynthesizer {
    /// Handle to the ready gate, for the audio output to flip.
    pub fn ready_gate(&self) -> Arc<AtomicBool> {
        self.ready.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Fire one voice for a token at a sequencer step.
    ///
    /// No return value and no failure: if the audio subsystem is not
    /// ready the trigger is dropped here and nothing downstream notices.
    pub fn trigger(
        &mut self,
        instrument: &Instrument,
        step: usize,
        token_width: f32,
        token_height: f32,
        global_volume: f32,
        token_volume: f32,
    ) {
        if !self.is_ready() {
            log::debug!("trigger dropped: audio output not ready");
            return;
        }

        let overall = overall_volume(token_width, token_height, global_volume, token_volume);
        if overall <= 0.0 {
            return;
        }

        let voice = Voice::assemble(instrument, step, overall, self.sample_rate);
        if self.tx.push(voice).is_err() {
            log::debug!("trigger dropped: voice ring full");
        }
    }
}
