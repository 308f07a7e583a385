// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Receives zoom-state changes from a [`ZoomView`](crate::ZoomView).
pub trait ZoomListener {
    /// A new zoom target was set: `zoom` and `focus` are the clamped target.
    ///
    /// Fired for programmatic zooms as well as for double taps, pinches, and
    /// minimap jumps. Plain pans do not fire it.
    fn on_zoom_started(&mut self, zoom: f64, focus: Point);

    /// A frame was rendered while the zoom factor was still moving toward
    /// its target. `zoom` and `focus` describe what was drawn.
    fn on_zooming(&mut self, zoom: f64, focus: Point);
}

/// A zoom-state change, as seen by a closure passed to [`listener_fn`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEvent {
    /// See [`ZoomListener::on_zoom_started`].
    Started {
        /// Target zoom.
        zoom: f64,
        /// Target focus in canvas coordinates.
        focus: Point,
    },
    /// See [`ZoomListener::on_zooming`].
    Zooming {
        /// Zoom drawn this frame.
        zoom: f64,
        /// Focus drawn this frame, in canvas coordinates.
        focus: Point,
    },
}

/// Adapts a closure into a [`ZoomListener`].
///
/// ```
/// use topoview_zoom::{ZoomEvent, ZoomListener, listener_fn};
///
/// let mut seen = Vec::new();
/// let mut listener = listener_fn(|ev| seen.push(ev));
/// listener.on_zoom_started(2.0, kurbo::Point::new(1.0, 1.0));
/// drop(listener);
/// assert!(matches!(seen[0], ZoomEvent::Started { zoom, .. } if zoom == 2.0));
/// ```
pub fn listener_fn<F: FnMut(ZoomEvent)>(f: F) -> FnListener<F> {
    FnListener(f)
}

/// [`ZoomListener`] backed by a closure. Created by [`listener_fn`].
pub struct FnListener<F>(F);

impl<F> core::fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

impl<F: FnMut(ZoomEvent)> ZoomListener for FnListener<F> {
    fn on_zoom_started(&mut self, zoom: f64, focus: Point) {
        (self.0)(ZoomEvent::Started { zoom, focus });
    }

    fn on_zooming(&mut self, zoom: f64, focus: Point) {
        (self.0)(ZoomEvent::Zooming { zoom, focus });
    }
}
