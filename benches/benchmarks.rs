//! Performance benchmarks for color conversion.
//!
//! Measures the hot paths hit on every slider step and swatch activation:
//! - HSL -> RGB for a full hue sweep
//! - RGB -> HSL for 256 colors
//! - Parsing the rendered `rgb(...)` string
//! - One mixer sync round through the stage

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use palette::Srgb;
use swatchboard::color::{Channel, hsl_to_rgb, parse_rgb_triple, rgb_string, rgb_to_hsl};
use swatchboard::mixer::MixerSync;
use swatchboard::stage::{Position, Stage, StageBounds};

/// Sample 256 colors spread across the RGB cube.
fn sample_colors() -> Vec<Srgb<u8>> {
    (0u8..=255)
        .map(|i: u8| Srgb::new(i, i.wrapping_mul(97), i.wrapping_mul(193)))
        .collect()
}

/// Benchmark HSL -> RGB for every whole hue at full saturation.
fn bench_hsl_to_rgb(c: &mut Criterion) {
    c.bench_function("hsl_to_rgb_361", |b| {
        b.iter(|| {
            for h in 0..=360u16 {
                black_box(hsl_to_rgb(black_box(h), 100, 50));
            }
        })
    });
}

/// Benchmark RGB -> HSL for 256 colors.
fn bench_rgb_to_hsl(c: &mut Criterion) {
    let colors = sample_colors();

    c.bench_function("rgb_to_hsl_256", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(rgb_to_hsl(color.red, color.green, color.blue));
            }
        })
    });
}

/// Benchmark parsing rendered color strings.
fn bench_parse_rgb_triple(c: &mut Criterion) {
    let rendered: Vec<String> = sample_colors().into_iter().map(rgb_string).collect();

    c.bench_function("parse_rgb_triple_256", |b| {
        b.iter(|| {
            for text in &rendered {
                black_box(parse_rgb_triple(black_box(text)));
            }
        })
    });
}

/// Benchmark a slider sweep through the mixer, which re-renders the swatch
/// and every widget on each step.
fn bench_mixer_slider_sweep(c: &mut Criterion) {
    let mut stage = Stage::new(StageBounds::new(800.0, 600.0));
    let id = stage.add("rgb(255,0,0)", Position::new(100.0, 100.0), 50.0);
    let mut mixer = MixerSync::new();
    mixer.activate(&mut stage, id);

    c.bench_function("mixer_slider_sweep_361", |b| {
        b.iter(|| {
            for h in 0..=360 {
                black_box(mixer.slider_input(&mut stage, Channel::Hue, f64::from(h)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_hsl_to_rgb,
    bench_rgb_to_hsl,
    bench_parse_rgb_triple,
    bench_mixer_slider_sweep,
);

criterion_main!(benches);
