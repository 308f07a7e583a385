// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame interpolation of a [`ViewportState`] toward its target.

use kurbo::{Point, Size};

use crate::smoothing::Smoothing;
use crate::viewport::{ViewportState, clamp_focus};

/// Linear blend from `a` toward `b` by `k`.
#[inline]
pub fn lerp(a: f64, b: f64, k: f64) -> f64 {
    a + (b - a) * k
}

/// Moves `a` toward `b` by a fixed step `k`, snapping to `b` once the
/// remaining gap is smaller than `k`.
#[inline]
pub fn bias(a: f64, b: f64, k: f64) -> f64 {
    let gap = b - a;
    if gap.abs() >= k {
        if gap > 0.0 { a + k } else { a - k }
    } else {
        b
    }
}

#[inline]
fn step(a: f64, b: f64, bias_k: f64, lerp_k: f64) -> f64 {
    lerp(bias(a, b, bias_k), b, lerp_k)
}

/// Advances `state` by one frame for a viewport of `size`.
///
/// The zoom factor moves toward its target first. The target focus is then
/// re-clamped against the target zoom so the destination view never shows
/// past the canvas edge, and the current focus moves toward it. The input is
/// not modified; the caller decides whether to commit the returned state.
#[must_use]
pub fn advance_animation(state: &ViewportState, size: Size, smoothing: &Smoothing) -> ViewportState {
    let current_zoom = step(
        state.current_zoom,
        state.target_zoom,
        smoothing.zoom_bias,
        smoothing.zoom_lerp,
    );
    let target_focus = clamp_focus(state.target_focus, size, state.target_zoom);
    let current_focus = Point::new(
        step(
            state.current_focus.x,
            target_focus.x,
            smoothing.focus_bias,
            smoothing.focus_lerp,
        ),
        step(
            state.current_focus.y,
            target_focus.y,
            smoothing.focus_bias,
            smoothing.focus_lerp,
        ),
    );
    ViewportState {
        current_zoom,
        target_zoom: state.target_zoom,
        current_focus,
        target_focus,
    }
}
