// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use topoview_diagram::{
    BoxId, BoxPrimitive, CanvasConfig, Diagram, LinePrimitive, RenderOptions, SurfaceCanvas,
    TextPrimitive,
};
use topoview_imaging_ref::RefBackend;
use topoview_zoom::ZoomView;

/// A machine box holding `cores` core boxes in rows of 16, each with a
/// label and a connector to the row above.
fn machine(cores: u32) -> Diagram {
    let rows = cores.div_ceil(16);
    let natural = Size::new(16.0 * 40.0 + 10.0, f64::from(rows) * 40.0 + 10.0);
    let mut d = Diagram::new(natural, 10.0).with(
        BoxPrimitive::new(BoxId(0), Color::from_rgb8(0xef, 0xdf, 0xde), natural.to_rect())
            .with_info("Machine (16GB)"),
    );
    d.push(TextPrimitive::in_box("Machine", BoxId(0)).with_bold(true));
    for i in 0..cores {
        let id = BoxId(i + 1);
        let x = f64::from(i % 16) * 40.0 + 10.0;
        let y = f64::from(i / 16) * 40.0 + 10.0;
        d.push(
            BoxPrimitive::new(id, Color::from_rgb8(0xbe, 0xbe, 0xbe), Rect::new(x, y, x + 30.0, y + 30.0))
                .with_style((i % 3) as u8)
                .with_info(format!("Core L#{i}")),
        );
        d.push(TextPrimitive::in_box(format!("PU#{i}"), id));
        if i >= 16 {
            d.push(LinePrimitive::new(
                Point::new(x + 15.0, y - 10.0),
                Point::new(x + 15.0, y),
            ));
        }
    }
    d
}

fn loaded(cores: u32) -> SurfaceCanvas {
    let mut diagram = machine(cores);
    let mut canvas = SurfaceCanvas::new(CanvasConfig::default().with_density(2.625));
    canvas
        .load(&mut diagram, &RenderOptions::default())
        .expect("benchmark diagram is valid");
    canvas
}

fn bench_load(c: &mut Criterion) {
    let diagram = machine(256);
    c.bench_function("canvas_load_256", |b| {
        b.iter_batched(
            || (diagram.clone(), SurfaceCanvas::default()),
            |(mut diagram, mut canvas)| {
                canvas
                    .load(&mut diagram, &RenderOptions::default())
                    .expect("valid");
                black_box(canvas.box_count())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_paint(c: &mut Criterion) {
    use topoview_zoom::Surface as _;

    let mut canvas = loaded(256);
    c.bench_function("canvas_paint_256", |b| {
        b.iter(|| {
            let mut backend = RefBackend::default();
            canvas.paint(&mut backend);
            black_box(backend.events().len())
        });
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let canvas = loaded(256);
    let probes: Vec<Point> = (0..256)
        .map(|i| Point::new(f64::from(i % 16) * 67.0 + 5.0, f64::from(i / 16) * 110.0 + 5.0))
        .collect();
    c.bench_function("canvas_hit_test_256x256", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|&&p| canvas.hit_test(black_box(p)).is_some())
                .count()
        });
    });
}

fn bench_zoomed_frames(c: &mut Criterion) {
    c.bench_function("zoom_view_animation_256", |b| {
        b.iter_batched(
            || {
                let mut view = ZoomView::with_child(loaded(256));
                view.smooth_zoom_to(4.0, Point::new(300.0, 500.0));
                view
            },
            |mut view| {
                let mut backend = RefBackend::default();
                let mut frames = 0_u32;
                while view.render(&mut backend).needs_frame {
                    frames += 1;
                }
                black_box(frames)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_paint,
    bench_hit_test,
    bench_zoomed_frames
);
criterion_main!(benches);
