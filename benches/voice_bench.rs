//! Benchmarks for voice rendering and the audio-thread mix.
//!
//! Run with: cargo bench
//!
//! The mixer runs inside the cpal callback, so these measure the cost of
//! the worst plausible callback: every catalog instrument ringing at
//! once across the common block sizes. Voices are time-bounded by their
//! envelopes, so each iteration renders a freshly triggered voice rather
//! than one that has already rung out.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use beatboard::instruments::InstrumentBank;
use beatboard::synth::{trigger_channel, Voice, VoiceMixer};

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const SAMPLE_RATE: f32 = 48_000.0;

fn bench_single_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("voice");
    let bank = InstrumentBank::standard();

    for &size in BLOCK_SIZES {
        for instrument in bank.entries() {
            group.bench_with_input(
                BenchmarkId::new(instrument.name, size),
                &size,
                |b, &size| {
                    b.iter_batched(
                        || {
                            (
                                Voice::assemble(instrument, 0, 0.1, SAMPLE_RATE),
                                vec![0.0f32; size],
                            )
                        },
                        |(mut voice, mut buffer)| {
                            voice.render_block(black_box(&mut buffer));
                            buffer
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

/// Mixer with the whole catalog freshly triggered and drained into the
/// voice pool, the loudest realistic callback.
fn full_mixer(bank: &InstrumentBank, scratch: &mut [f32]) -> VoiceMixer {
    let (mut synth, mut mixer) = trigger_channel(SAMPLE_RATE);
    mixer.mark_ready();
    for (step, instrument) in bank.entries().iter().enumerate() {
        synth.trigger(instrument, step, 300.0, 300.0, 1.0, 1.0);
    }
    mixer.render_block(scratch);
    mixer
}

fn bench_full_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("mix");
    let bank = InstrumentBank::standard();

    for &size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("five_voices", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut scratch = vec![0.0f32; size];
                    let mixer = full_mixer(&bank, &mut scratch);
                    (mixer, scratch)
                },
                |(mut mixer, mut buffer)| {
                    mixer.render_block(black_box(&mut buffer));
                    buffer
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_voice, bench_full_mix);
criterion_main!(benches);
