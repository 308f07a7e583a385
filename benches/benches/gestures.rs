// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use topoview_event_state::gesture::{GestureClassifier, GestureConfig};
use topoview_event_state::pointer::{PointerAction, TouchEvent};

fn drag_stream(len: usize) -> Vec<TouchEvent> {
    let mut events = Vec::with_capacity(len + 2);
    events.push(TouchEvent::single(
        PointerAction::Down,
        Point::new(100.0, 100.0),
        0,
    ));
    for i in 1..=len {
        let x = 100.0 + i as f64 * 3.0;
        events.push(TouchEvent::single(
            PointerAction::Move,
            Point::new(x, 100.0),
            i as u64 * 8,
        ));
    }
    events.push(TouchEvent::single(
        PointerAction::Up,
        Point::new(100.0 + len as f64 * 3.0, 100.0),
        len as u64 * 8 + 8,
    ));
    events
}

fn pinch_stream(len: usize) -> Vec<TouchEvent> {
    let center = Point::new(500.0, 800.0);
    (0..len)
        .map(|i| {
            let spread = 50.0 + i as f64 * 2.0;
            let action = if i == 0 {
                PointerAction::Down
            } else {
                PointerAction::Move
            };
            TouchEvent::pair(
                action,
                Point::new(center.x - spread, center.y),
                Point::new(center.x + spread, center.y),
                i as u64 * 8,
            )
        })
        .collect()
}

fn tap_stream(taps: usize) -> Vec<TouchEvent> {
    (0..taps)
        .flat_map(|i| {
            let t = i as u64 * 300;
            let p = Point::new(40.0 + (i % 10) as f64 * 20.0, 60.0);
            [
                TouchEvent::single(PointerAction::Down, p, t),
                TouchEvent::single(PointerAction::Up, p, t + 40),
            ]
        })
        .collect()
}

fn run(events: &[TouchEvent], zoomed_in: bool) -> usize {
    let mut classifier = GestureClassifier::new(GestureConfig::default());
    events
        .iter()
        .filter(|ev| classifier.classify(ev, zoomed_in).gesture.is_some())
        .count()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for (name, events, zoomed_in) in [
        ("drag_zoomed_256", drag_stream(256), true),
        ("drag_unzoomed_256", drag_stream(256), false),
        ("pinch_256", pinch_stream(256), true),
        ("taps_128", tap_stream(128), true),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || events.clone(),
                |events| black_box(run(&events, zoomed_in)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
