//! Criterion benchmarks for grano-core
//!
//! Run with: cargo bench -p grano-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use grano_core::{
    Adsr, BatchParams, BatchScheduler, DelayLine, Effect, SampleBuffer, SingleTapDelay,
    StreamingParams, StreamingScheduler,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024, 4096];
const SOURCE_SECONDS: &[f32] = &[0.5, 1.0, 2.0];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("DelayLine");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut delay = DelayLine::new(4800);
                b.iter(|| {
                    for &sample in &input {
                        black_box(delay.process(black_box(sample), 2400));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_tap_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("SingleTapDelay");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut delay = SingleTapDelay::from_time(0.5, SAMPLE_RATE, 0.3);
                b.iter(|| {
                    delay.process_block(black_box(&input), &mut output);
                    black_box(&output);
                });
            },
        );
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adsr");
    let env = Adsr::from_seconds(0.01, 0.01, 0.8, 0.01, SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("apply_to_slice", block_size),
            &block_size,
            |b, _| {
                let mut samples = input.clone();
                b.iter(|| {
                    samples.copy_from_slice(&input);
                    env.apply_to_slice(black_box(&mut samples));
                });
            },
        );
    }

    group.finish();
}

fn bench_schedulers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scheduler");
    group.sample_size(20);

    let batch = BatchScheduler::new(BatchParams::default());
    let streaming = StreamingScheduler::new(StreamingParams::default());

    for &seconds in SOURCE_SECONDS {
        let frames = (seconds * SAMPLE_RATE) as usize;
        let source = SampleBuffer::from_mono(generate_test_signal(frames), SAMPLE_RATE);

        group.bench_with_input(BenchmarkId::new("batch", frames), &source, |b, source| {
            b.iter(|| black_box(batch.render(black_box(source))));
        });

        group.bench_with_input(
            BenchmarkId::new("streaming", frames),
            &source,
            |b, source| {
                b.iter(|| black_box(streaming.render(black_box(source))));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_delay_line,
    bench_tap_delay,
    bench_envelope,
    bench_schedulers
);
criterion_main!(benches);
