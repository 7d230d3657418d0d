//! Audio-thread voice pool.
//!
//! Runs inside the audio callback: drains freshly triggered voices from
//! the ring at the top of every block, mixes all live voices, and drops
//! the ones past their release deadline. Stopping the transport never
//! reaches in here — spawned voices ring out naturally, each one
//! time-bounded by its envelope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rtrb::Consumer;

use super::voice::Voice;

/// Upper bound on simultaneously ringing voices. With time-bounded
/// envelopes this is ample; excess triggers are dropped at the ring.
const MAX_ACTIVE_VOICES: usize = 64;

pub struct VoiceMixer {
    rx: Consumer<Voice>,
    voices: Vec<Voice>,
    ready: Arc<AtomicBool>,
}

impl VoiceMixer {
    pub(super) fn new(rx: Consumer<Voice>, ready: Arc<AtomicBool>) -> Self {
        Self {
            rx,
            voices: Vec::with_capacity(MAX_ACTIVE_VOICES),
            ready,
        }
    }

    /// Mark the audio output live; triggers pass the gate from here on.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Render one block: drain pending triggers, mix, retire dead voices.
    pub fn render_block(&mut self, out: &mut [f32]) {
        while let Ok(voice) = self.rx.pop() {
            if self.voices.len() < MAX_ACTIVE_VOICES {
                self.voices.push(voice);
            }
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            voice.render_block(out);
        }
        self.voices.retain(Voice::is_active);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}
