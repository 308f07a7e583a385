// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying recognized gestures to a viewport.

use kurbo::Point;
use topoview_event_state::gesture::Gesture;
use topoview_view2d::{ZoomTarget, ZoomViewport};

/// Canvas point and zoom captured when a pinch starts.
///
/// Every pinch update zooms relative to `base_zoom` and keeps `canvas`
/// under the current pinch midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchAnchor {
    /// Canvas point under the midpoint when the pinch started.
    pub canvas: Point,
    /// Zoom factor on screen when the pinch started.
    pub base_zoom: f64,
}

impl PinchAnchor {
    /// Anchor for a pinch starting at `midpoint` (view coordinates).
    pub fn capture(viewport: &ZoomViewport, midpoint: Point) -> Self {
        Self {
            canvas: viewport.view_to_canvas(midpoint),
            base_zoom: viewport.zoom(),
        }
    }
}

/// Applies `gesture` to `viewport`.
///
/// `pinch` carries the anchor of the pinch in progress between calls.
/// Returns the new zoom target when the gesture set one; pans only move the
/// focus and return `None`.
///
/// - Pan: the canvas follows the pointer.
/// - Double tap: zooms to the maximum around the tapped canvas point, or
///   back to `1.0` centred when already zoomed in.
/// - Pinch: zoom is the starting zoom times the separation ratio, with the
///   canvas point first under the midpoint kept under it.
pub fn apply_gesture(
    viewport: &mut ZoomViewport,
    gesture: &Gesture,
    pinch: &mut Option<PinchAnchor>,
) -> Option<ZoomTarget> {
    match *gesture {
        Gesture::Pan { delta } => {
            viewport.pan_by_view(delta);
            None
        }
        Gesture::Tap { .. } => None,
        Gesture::DoubleTap { position } => Some(if viewport.target_zoom() == 1.0 {
            let focus = viewport.view_to_canvas(position);
            viewport.smooth_zoom_to(viewport.max_zoom(), focus)
        } else {
            viewport.reset()
        }),
        Gesture::PinchStart { midpoint } => {
            *pinch = Some(PinchAnchor::capture(viewport, midpoint));
            None
        }
        Gesture::Pinch {
            start_midpoint,
            midpoint,
            scale,
        } => {
            let anchor = *pinch.get_or_insert_with(|| PinchAnchor::capture(viewport, start_midpoint));
            Some(viewport.smooth_zoom_about(anchor.base_zoom * scale, anchor.canvas, midpoint))
        }
        Gesture::PinchEnd => {
            *pinch = None;
            None
        }
    }
}
