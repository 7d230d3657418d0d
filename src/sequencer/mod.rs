//! Step sequencer: transport state and the cyclic step cursor.
//!
//! The sequencer is deliberately just arithmetic plus a tiny transport
//! state machine. It holds its own authoritative tempo and cursor and is
//! handed the *current* live token count on every tick, so membership
//! changes during playback can never leave it pointing past the end —
//! the modulo is recomputed fresh each time. Driving the tick at the
//! right wall-clock moments is the caller's job (`tick_period` says how
//! long to wait); that keeps the sequencer free of timers and trivially
//! testable.

use std::time::Duration;

pub const DEFAULT_TEMPO: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stopped,
    Playing,
    Paused,
}

pub struct StepSequencer {
    tempo: f64,
    current_step: usize,
    transport: Transport,
}

impl StepSequencer {
    pub fn new(tempo: f64) -> Self {
        Self {
            tempo: if tempo > 0.0 { tempo } else { DEFAULT_TEMPO },
            current_step: 0,
            transport: Transport::Stopped,
        }
    }

    /// Two steps per beat: (60 / tempo) * 500 ms.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.tempo * 0.5)
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Change tempo. The caller re-arms its timer at the new period from
    /// now; the step that already fired is not re-fired. Non-positive
    /// values are ignored.
    pub fn set_tempo(&mut self, tempo: f64) {
        if tempo > 0.0 && tempo.is_finite() {
            self.tempo = tempo;
        } else {
            log::debug!("ignoring non-positive tempo {tempo}");
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    /// Start playback. Coming from Stopped the cursor resets to 0;
    /// resuming from Paused keeps it where it froze.
    pub fn play(&mut self) {
        if self.transport == Transport::Stopped {
            self.current_step = 0;
        }
        self.transport = Transport::Playing;
    }

    /// Freeze the cursor in place.
    pub fn pause(&mut self) {
        if self.transport == Transport::Playing {
            self.transport = Transport::Paused;
        }
    }

    /// Stop and reset the cursor.
    pub fn stop(&mut self) {
        self.transport = Transport::Stopped;
        self.current_step = 0;
    }

    pub fn toggle(&mut self) {
        match self.transport {
            Transport::Playing => self.pause(),
            Transport::Stopped | Transport::Paused => self.play(),
        }
    }

    /// Advance one tick against the current live token count and return
    /// the step to fire. `None` when not playing or the board is empty —
    /// the sequencer is terminal-free and simply waits for tokens.
    pub fn tick(&mut self, live_tokens: usize) -> Option<usize> {
        if self.transport != Transport::Playing || live_tokens == 0 {
            return None;
        }
        self.current_step = (self.current_step + 1) % live_tokens;
        Some(self.current_step)
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_period_at_default_tempo_is_250ms() {
        let seq = StepSequencer::new(120.0);
        assert_eq!(seq.tick_period(), Duration::from_millis(250));
    }

    #[test]
    fn tick_period_tracks_tempo_changes() {
        let mut seq = StepSequencer::new(120.0);
        seq.set_tempo(60.0);
        assert_eq!(seq.tick_period(), Duration::from_millis(500));
        seq.set_tempo(240.0);
        assert_eq!(seq.tick_period(), Duration::from_millis(125));
    }

    #[test]
    fn wraps_over_three_tokens_without_overflow() {
        let mut seq = StepSequencer::new(120.0);
        seq.play();

        let fired: Vec<usize> = (0..7).filter_map(|_| seq.tick(3)).collect();
        assert_eq!(fired, vec![1, 2, 0, 1, 2, 0, 1]);
        assert!(fired.iter().all(|&s| s < 3));
    }

    #[test]
    fn stale_cursor_rewraps_when_tokens_are_removed() {
        let mut seq = StepSequencer::new(120.0);
        seq.play();
        for _ in 0..5 {
            seq.tick(6);
        }
        assert_eq!(seq.current_step(), 5);

        // The board shrank to 3 tokens; the next tick must stay in range.
        assert_eq!(seq.tick(3), Some(0));
    }

    #[test]
    fn no_tokens_means_no_advance() {
        let mut seq = StepSequencer::new(120.0);
        seq.play();
        seq.tick(4);
        let frozen = seq.current_step();
        assert_eq!(seq.tick(0), None);
        assert_eq!(seq.current_step(), frozen);
    }

    #[test]
    fn pause_freezes_resume_continues_stop_resets() {
        let mut seq = StepSequencer::new(120.0);
        seq.play();
        seq.tick(4);
        seq.tick(4);
        assert_eq!(seq.current_step(), 2);

        seq.pause();
        assert_eq!(seq.tick(4), None, "paused transport must not advance");
        assert_eq!(seq.current_step(), 2);

        seq.play();
        assert_eq!(seq.current_step(), 2, "resume keeps the frozen cursor");
        assert_eq!(seq.tick(4), Some(3));

        seq.stop();
        assert_eq!(seq.current_step(), 0);
        seq.play();
        assert_eq!(seq.current_step(), 0, "play from stopped resets");
    }

    #[test]
    fn invalid_tempo_is_ignored() {
        let mut seq = StepSequencer::new(120.0);
        seq.set_tempo(0.0);
        seq.set_tempo(-10.0);
        seq.set_tempo(f64::NAN);
        assert_eq!(seq.tempo(), 120.0);
    }

    #[test]
    fn constructor_rejects_non_positive_tempo() {
        let seq = StepSequencer::new(0.0);
        assert_eq!(seq.tempo(), DEFAULT_TEMPO);
    }
}
