//! Audio output: one explicitly owned cpal stream.
//!
//! Created once at startup, dropped once at shutdown. The ready gate is
//! flipped only after the stream is playing, so `trigger()` has a
//! synchronous answer to "can I make sound yet" — triggers issued before
//! that are dropped by the synthesizer, never queued.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::Producer;
use std::sync::atomic::Ordering;

use crate::synth::{trigger_channel, VoiceSynthesizer};
use crate::MAX_BLOCK_SIZE;

/// Owns the output stream for the process lifetime.
pub struct AudioOutput {
    _stream: cpal::Stream,
    pub sample_rate: f32,
    pub channels: usize,
}

impl AudioOutput {
    /// Open the default output device and start rendering.
    ///
    /// Returns the output handle and the connected trigger front-end.
    /// `monitor` optionally taps the mono mix for visualization; pushes
    /// into a full ring are dropped, the audio path never blocks on it.
    pub fn start(mut monitor: Option<Producer<f32>>) -> EyreResult<(Self, VoiceSynthesizer)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let (synthesizer, mut mixer) = trigger_channel(sample_rate);
        let ready = synthesizer.ready_gate();

        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut written = 0;

                    while written < total_frames {
                        let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
                        let out = &mut block[..frames];
                        mixer.render_block(out);

                        // Mono fan-out to every channel.
                        let base = written * channels;
                        for (i, &s) in out.iter().enumerate() {
                            for ch in 0..channels {
                                data[base + i * channels + ch] = s;
                            }
                        }

                        if let Some(tap) = monitor.as_mut() {
                            for &s in out.iter() {
                                let _ = tap.push(s);
                            }
                        }

                        written += frames;
                    }
                },
                |err| log::warn!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        ready.store(true, Ordering::Release);

        Ok((
            Self {
                _stream: stream,
                sample_rate,
                channels,
            },
            synthesizer,
        ))
    }

    /// A synthesizer with no output behind it. The ready gate stays
    /// closed, so every trigger is silently dropped — for headless runs
    /// and tests.
    pub fn detached(sample_rate: f32) -> VoiceSynthesizer {
        let (synthesizer, _mixer) = trigger_channel(sample_rate);
        synthesizer
    }
}
