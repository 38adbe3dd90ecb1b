use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depth_capture::{central_region, DepthFrame};
use threat_estimator::RobustDistanceEstimator;

const WIDTH: u32 = 256;
const HEIGHT: u32 = 192;

fn make_depth(invalid_every: usize) -> Vec<f32> {
    (0..(WIDTH * HEIGHT) as usize)
        .map(|i| {
            if invalid_every > 0 && i % invalid_every == 0 {
                f32::NAN
            } else {
                // Slanted surface between 0.8 m and 4.8 m
                0.8 + (i % WIDTH as usize) as f32 / WIDTH as f32 * 4.0
            }
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let estimator = RobustDistanceEstimator::default();
    let region = central_region(WIDTH, HEIGHT).expect("valid dimensions");

    let clean = make_depth(0);
    c.bench_function("estimate_256x192_clean", |b| {
        b.iter(|| {
            let frame = DepthFrame::new(WIDTH, HEIGHT, &clean).expect("valid frame");
            black_box(estimator.estimate(&frame, &region, 0))
        })
    });

    let holey = make_depth(7);
    c.bench_function("estimate_256x192_holes", |b| {
        b.iter(|| {
            let frame = DepthFrame::new(WIDTH, HEIGHT, &holey).expect("valid frame");
            black_box(estimator.estimate(&frame, &region, 0))
        })
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
