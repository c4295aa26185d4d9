use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orrery_bodies::{BandPalette, BodyCategory, BodyDescriptor, Rgb, SurfaceKind};
use orrery_noise::{FractalSampler, NoiseField};
use orrery_surface::SurfaceSynthesizer;

fn bench_noise_sample(c: &mut Criterion) {
    let noise = NoiseField::new(42);
    c.bench_function("noise_sample", |bencher| {
        bencher.iter(|| black_box(noise.sample(black_box(12.34), black_box(56.78))))
    });
}

fn bench_fbm_8_octaves(c: &mut Criterion) {
    let fractal = FractalSampler::seeded(42);
    c.bench_function("fbm_8_octaves", |bencher| {
        bencher.iter(|| black_box(fractal.fbm(black_box(1.5), black_box(2.5), 8)))
    });
}

fn bench_oceanic_256(c: &mut Criterion) {
    let synth = SurfaceSynthesizer::with_resolution(256);
    let earth = BodyDescriptor::new("Earth", BodyCategory::Planet, 4.0, 45.0, 1.0, Rgb::WHITE)
        .with_surface(SurfaceKind::Oceanic);
    c.bench_function("oceanic_surface_256", |bencher| {
        bencher.iter(|| black_box(synth.surface(&earth, 7)))
    });
}

fn bench_banded_256(c: &mut Criterion) {
    let synth = SurfaceSynthesizer::with_resolution(256);
    let jupiter = BodyDescriptor::new("Jupiter", BodyCategory::Planet, 9.0, 90.0, 0.08, Rgb::WHITE)
        .with_surface(SurfaceKind::Banded {
            bands: 12,
            palette: BandPalette::Ochre,
            storm: true,
        });
    c.bench_function("banded_surface_256", |bencher| {
        bencher.iter(|| black_box(synth.surface(&jupiter, 7)))
    });
}

fn bench_clouds_256(c: &mut Criterion) {
    let synth = SurfaceSynthesizer::with_resolution(256);
    c.bench_function("clouds_256", |bencher| bencher.iter(|| black_box(synth.clouds(7))));
}

criterion_group!(
    benches,
    bench_noise_sample,
    bench_fbm_8_octaves,
    bench_oceanic_256,
    bench_banded_256,
    bench_clouds_256,
);
criterion_main!(benches);
