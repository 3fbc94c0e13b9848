//! Benchmarks for the pixel update kernel

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use dvs_core::EventClass;
use dvs_sensor::{update_pixel, update_span, KernelParams};

fn params() -> KernelParams {
    KernelParams {
        relax_rate: 0.98,
        adapt_up: 1.2,
        adapt_down: 0.95,
    }
}

fn bench_update_pixel(c: &mut Criterion) {
    let p = params();

    c.bench_function("update_pixel", |b| {
        b.iter(|| update_pixel(black_box(140.0), black_box(100.0), black_box(12.75), &p))
    });
}

fn bench_update_span(c: &mut Criterion) {
    let p = params();
    let widths = [320usize, 640, 1280, 1920];

    let mut group = c.benchmark_group("update_span");

    for width in widths {
        let input: Vec<f32> = (0..width).map(|i| (i % 256) as f32).collect();
        let mut reference = vec![64.0f32; width];
        let mut threshold = vec![12.75f32; width];
        let mut difference = vec![0.0f32; width];
        let mut events = vec![EventClass::None; width];

        group.throughput(Throughput::Elements(width as u64));
        group.bench_function(format!("{}_pixels", width), |b| {
            b.iter(|| {
                update_span(
                    &p,
                    black_box(&input),
                    &mut reference,
                    &mut threshold,
                    &mut difference,
                    &mut events,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update_pixel, bench_update_span);
criterion_main!(benches);
