// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use topoview_view2d::ZoomViewport;

const VIEW: Size = Size::new(1080.0, 1920.0);

fn settle(viewport: &mut ZoomViewport) -> u32 {
    let mut frames = 0;
    while viewport.advance().animating {
        frames += 1;
    }
    frames
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator_settle");

    group.bench_function("zoom_in_to_max", |b| {
        b.iter_batched(
            || {
                let mut v = ZoomViewport::new(VIEW);
                v.smooth_zoom_to(v.max_zoom(), Point::new(200.0, 300.0));
                v
            },
            |mut v| black_box(settle(&mut v)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("reset_from_max", |b| {
        b.iter_batched(
            || {
                let mut v = ZoomViewport::new(VIEW);
                v.zoom_to(v.max_zoom(), Point::new(900.0, 1700.0));
                v.reset();
                v
            },
            |mut v| black_box(settle(&mut v)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    c.bench_function("animator_single_frame", |b| {
        let mut v = ZoomViewport::new(VIEW);
        let mut flip = false;
        b.iter(|| {
            if !v.advance().animating {
                flip = !flip;
                let zoom = if flip { 4.0 } else { 1.0 };
                v.smooth_zoom_to(zoom, Point::new(540.0, 960.0));
            }
            black_box(v.visible_rect())
        });
    });
}

fn bench_mapping(c: &mut Criterion) {
    let mut v = ZoomViewport::new(VIEW);
    v.zoom_to(2.5, Point::new(400.0, 700.0));
    let points: Vec<Point> = (0..1024)
        .map(|i| Point::new(f64::from(i % 32) * 33.0, f64::from(i / 32) * 60.0))
        .collect();
    c.bench_function("view_to_canvas_1024", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &p in &points {
                let q = v.view_to_canvas(black_box(p));
                acc += q.x + q.y;
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_settle, bench_frame, bench_mapping);
criterion_main!(benches);
