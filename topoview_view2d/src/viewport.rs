// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::animator::advance_animation;
use crate::smoothing::Smoothing;

/// Default upper bound for the zoom factor.
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;

/// Clamps `focus` so that a view of `size` at `zoom` stays inside the
/// canvas `[0, size]`.
///
/// At `zoom == 1.0` the valid range collapses to the canvas center.
#[must_use]
pub fn clamp_focus(focus: Point, size: Size, zoom: f64) -> Point {
    let half_w = 0.5 * size.width / zoom;
    let half_h = 0.5 * size.height / zoom;
    // max/min rather than `f64::clamp`, which panics on inverted bounds.
    Point::new(
        focus.x.min(size.width - half_w).max(half_w),
        focus.y.min(size.height - half_h).max(half_h),
    )
}

/// Zoom and focus of a viewport, both where it is and where it is going.
///
/// Gesture handling writes the `target_*` fields; the per-frame animation
/// step moves the `current_*` fields toward them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Zoom factor currently rendered. Never below `1.0`.
    pub current_zoom: f64,
    /// Zoom factor the animation is heading to, in `[1.0, max_zoom]`.
    pub target_zoom: f64,
    /// Canvas point currently centered in the view.
    pub current_focus: Point,
    /// Canvas point the animation is heading to.
    pub target_focus: Point,
}

impl ViewportState {
    /// Unzoomed state centered on a canvas of `size`.
    #[must_use]
    pub fn centered(size: Size) -> Self {
        let center = size.to_rect().center();
        Self {
            current_zoom: 1.0,
            target_zoom: 1.0,
            current_focus: center,
            target_focus: center,
        }
    }

    /// Returns `true` when every animated scalar is within `epsilon` of its
    /// target.
    #[must_use]
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.current_zoom - self.target_zoom).abs() <= epsilon
            && (self.current_focus.x - self.target_focus.x).abs() <= epsilon
            && (self.current_focus.y - self.target_focus.y).abs() <= epsilon
    }

    /// Current focus clamped against the current zoom.
    ///
    /// While zoom is still animating the raw focus may briefly lie outside
    /// the range valid for the current zoom; everything derived from the
    /// current state (transform, minimap, input mapping) uses this instead.
    #[must_use]
    pub fn effective_focus(&self, size: Size) -> Point {
        clamp_focus(self.current_focus, size, self.current_zoom)
    }
}

/// Outcome of a call that sets a new zoom target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTarget {
    /// Clamped target zoom.
    pub zoom: f64,
    /// Clamped target focus.
    pub focus: Point,
}

/// Outcome of one animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStep {
    /// The zoom factor has not reached its target yet.
    pub zooming: bool,
    /// Some scalar has not reached its target yet; another frame is needed.
    pub animating: bool,
}

/// Headless zoom/pan viewport over a canvas that fills the view.
///
/// The canvas is laid out to exactly cover the view at zoom `1.0`, so canvas
/// coordinates and view coordinates coincide until the user zooms in.
/// `ZoomViewport` owns the [`ViewportState`] and enforces its invariants:
/// zoom factors stay in `[1.0, max_zoom]` and the focus is clamped so that
/// the visible rectangle never leaves the canvas.
#[derive(Clone, Debug)]
pub struct ZoomViewport {
    size: Size,
    max_zoom: f64,
    smoothing: Smoothing,
    state: ViewportState,
}

impl ZoomViewport {
    /// Creates an unzoomed, centered viewport over a canvas of `size`.
    ///
    /// The maximum zoom defaults to [`DEFAULT_MAX_ZOOM`].
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            max_zoom: DEFAULT_MAX_ZOOM,
            smoothing: Smoothing::default(),
            state: ViewportState::centered(size),
        }
    }

    /// Returns the view (and canvas) size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the view size, re-clamping focus against the new bounds.
    pub fn set_size(&mut self, size: Size) {
        if self.size == size {
            return;
        }
        self.size = size;
        self.state.target_focus = clamp_focus(self.state.target_focus, size, self.state.target_zoom);
        self.state.current_focus =
            clamp_focus(self.state.current_focus, size, self.state.current_zoom);
    }

    /// Returns the view center in view coordinates.
    #[must_use]
    pub fn view_center(&self) -> Point {
        self.size.to_rect().center()
    }

    /// Returns the maximum zoom factor.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Sets the maximum zoom factor.
    ///
    /// Values below `1.0` (and NaN) are ignored and `false` is returned; the
    /// previous limit stays in effect. Zoom factors above a lowered limit
    /// are pulled down to it.
    pub fn set_max_zoom(&mut self, max_zoom: f64) -> bool {
        if max_zoom.is_nan() || max_zoom < 1.0 {
            return false;
        }
        self.max_zoom = max_zoom;
        self.state.target_zoom = self.state.target_zoom.min(max_zoom);
        self.state.current_zoom = self.state.current_zoom.min(max_zoom);
        true
    }

    /// Returns the smoothing factors.
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Sets the smoothing factors.
    ///
    /// Blend factors are clamped to `[0, 1]` and bias steps to `>= 0`, so the
    /// animation can never overshoot its target.
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        let unit = |k: f64| if k.is_nan() { 1.0 } else { k.clamp(0.0, 1.0) };
        let step = |k: f64| if k.is_nan() { 0.0 } else { k.max(0.0) };
        self.smoothing = Smoothing {
            zoom_bias: step(smoothing.zoom_bias),
            zoom_lerp: unit(smoothing.zoom_lerp),
            focus_bias: step(smoothing.focus_bias),
            focus_lerp: unit(smoothing.focus_lerp),
            epsilon: step(smoothing.epsilon),
        };
    }

    /// Returns the full viewport state.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Returns the zoom factor currently rendered.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.current_zoom
    }

    /// Returns the zoom factor the animation is heading to.
    #[must_use]
    pub fn target_zoom(&self) -> f64 {
        self.state.target_zoom
    }

    /// Returns the current focus, clamped against the current zoom.
    #[must_use]
    pub fn focus(&self) -> Point {
        self.state.effective_focus(self.size)
    }

    /// Returns the focus the animation is heading to.
    #[must_use]
    pub fn target_focus(&self) -> Point {
        self.state.target_focus
    }

    /// Returns `true` when the target zoom is above `1.0`.
    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.state.target_zoom > 1.0
    }

    /// Returns `true` when the current state has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.state.is_settled(self.smoothing.epsilon)
    }

    /// Jumps to `zoom` centered on `focus` without animating.
    ///
    /// Both the current and the target state are replaced.
    pub fn zoom_to(&mut self, zoom: f64, focus: Point) -> ZoomTarget {
        let target = self.smooth_zoom_to(zoom, focus);
        self.state.current_zoom = target.zoom;
        self.state.current_focus = target.focus;
        target
    }

    /// Sets a new animation target of `zoom` centered on `focus`.
    ///
    /// The zoom is clamped to `[1.0, max_zoom]` and the focus to the canvas
    /// bounds at that zoom. Non-finite inputs leave the corresponding target
    /// unchanged.
    pub fn smooth_zoom_to(&mut self, zoom: f64, focus: Point) -> ZoomTarget {
        if !zoom.is_nan() {
            self.state.target_zoom = zoom.min(self.max_zoom).max(1.0);
        }
        let focus = if focus.is_finite() {
            focus
        } else {
            self.state.target_focus
        };
        self.state.target_focus = clamp_focus(focus, self.size, self.state.target_zoom);
        ZoomTarget {
            zoom: self.state.target_zoom,
            focus: self.state.target_focus,
        }
    }

    /// Sets a zoom target that keeps `anchor_canvas` under `anchor_view`.
    ///
    /// The focus is derived after clamping the zoom, so the anchor holds
    /// whenever the resulting view does not hit a canvas edge.
    pub fn smooth_zoom_about(
        &mut self,
        zoom: f64,
        anchor_canvas: Point,
        anchor_view: Point,
    ) -> ZoomTarget {
        let zoom = if zoom.is_nan() {
            self.state.target_zoom
        } else {
            zoom.min(self.max_zoom).max(1.0)
        };
        let focus = anchor_canvas - (anchor_view - self.view_center()) / zoom;
        self.smooth_zoom_to(zoom, focus)
    }

    /// Animates back to zoom `1.0`, centered.
    pub fn reset(&mut self) -> ZoomTarget {
        self.smooth_zoom_to(1.0, self.view_center())
    }

    /// Replaces the whole state with the unzoomed, centered state.
    pub fn reset_immediately(&mut self) {
        self.state = ViewportState::centered(self.size);
    }

    /// Pans the target focus by a movement of `delta` view pixels.
    ///
    /// The canvas follows the pointer, so the focus moves against `delta`,
    /// scaled by the current zoom.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        let focus = self.state.target_focus - delta / self.state.current_zoom;
        self.state.target_focus = clamp_focus(focus, self.size, self.state.target_zoom);
    }

    /// Advances the animation by one frame.
    pub fn advance(&mut self) -> FrameStep {
        self.state = advance_animation(&self.state, self.size, &self.smoothing);
        let epsilon = self.smoothing.epsilon;
        FrameStep {
            zooming: self.state.current_zoom != self.state.target_zoom,
            animating: !self.state.is_settled(epsilon),
        }
    }

    /// Returns the canvas rectangle currently visible.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        let zoom = self.state.current_zoom;
        Rect::from_center_size(
            self.focus(),
            Size::new(self.size.width / zoom, self.size.height / zoom),
        )
    }

    /// Returns the canvas rectangle that will be visible once settled.
    #[must_use]
    pub fn target_visible_rect(&self) -> Rect {
        let zoom = self.state.target_zoom;
        Rect::from_center_size(
            self.state.target_focus,
            Size::new(self.size.width / zoom, self.size.height / zoom),
        )
    }

    /// Canvas → view transform for the current state.
    ///
    /// Equivalent to translating to the view center, scaling by the current
    /// zoom, then translating by the negated focus.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.view_center().to_vec2())
            * Affine::scale(self.state.current_zoom)
            * Affine::translate(-self.focus().to_vec2())
    }

    /// Converts a view point into canvas coordinates.
    #[must_use]
    pub fn view_to_canvas(&self, pt: Point) -> Point {
        self.focus() + (pt - self.view_center()) / self.state.current_zoom
    }

    /// Converts a canvas point into view coordinates.
    #[must_use]
    pub fn canvas_to_view(&self, pt: Point) -> Point {
        self.view_center() + (pt - self.focus()) * self.state.current_zoom
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{ViewportState, ZoomViewport, clamp_focus};
    use crate::Smoothing;

    fn viewport() -> ZoomViewport {
        ZoomViewport::new(Size::new(800.0, 600.0))
    }

    fn contains(outer: Rect, inner: Rect) -> bool {
        inner.x0 >= outer.x0 - 1e-9
            && inner.y0 >= outer.y0 - 1e-9
            && inner.x1 <= outer.x1 + 1e-9
            && inner.y1 <= outer.y1 + 1e-9
    }

    #[test]
    fn starts_unzoomed_and_centered() {
        let vp = viewport();
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.target_zoom(), 1.0);
        assert_eq!(vp.focus(), Point::new(400.0, 300.0));
        assert!(vp.is_settled());
        assert_eq!(vp.visible_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn smooth_zoom_clamps_zoom() {
        let mut vp = viewport();
        assert_eq!(vp.smooth_zoom_to(10.0, Point::new(400.0, 300.0)).zoom, 4.0);
        assert_eq!(vp.smooth_zoom_to(0.25, Point::new(400.0, 300.0)).zoom, 1.0);
        assert_eq!(vp.smooth_zoom_to(-3.0, Point::new(400.0, 300.0)).zoom, 1.0);
        // NaN keeps the previous target.
        vp.smooth_zoom_to(2.0, Point::new(400.0, 300.0));
        assert_eq!(vp.smooth_zoom_to(f64::NAN, Point::new(400.0, 300.0)).zoom, 2.0);
    }

    #[test]
    fn smooth_zoom_clamps_focus() {
        let mut vp = viewport();
        let target = vp.smooth_zoom_to(2.0, Point::new(0.0, 0.0));
        assert_eq!(target.focus, Point::new(200.0, 150.0));
        let target = vp.smooth_zoom_to(2.0, Point::new(5_000.0, 5_000.0));
        assert_eq!(target.focus, Point::new(600.0, 450.0));
        assert!(contains(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            vp.target_visible_rect()
        ));
    }

    #[test]
    fn set_max_zoom_ignores_values_below_one() {
        let mut vp = viewport();
        assert!(!vp.set_max_zoom(0.5));
        assert!(!vp.set_max_zoom(f64::NAN));
        assert_eq!(vp.max_zoom(), 4.0);
        assert!(vp.set_max_zoom(8.0));
        assert_eq!(vp.max_zoom(), 8.0);
    }

    #[test]
    fn lowering_max_zoom_pulls_zoom_down() {
        let mut vp = viewport();
        vp.zoom_to(4.0, Point::new(400.0, 300.0));
        assert!(vp.set_max_zoom(2.0));
        assert_eq!(vp.zoom(), 2.0);
        assert_eq!(vp.target_zoom(), 2.0);
    }

    #[test]
    fn zoom_to_is_immediate() {
        let mut vp = viewport();
        vp.zoom_to(2.0, Point::new(300.0, 200.0));
        assert_eq!(vp.zoom(), 2.0);
        assert_eq!(vp.focus(), Point::new(300.0, 200.0));
        assert!(vp.is_settled());
    }

    #[test]
    fn reset_immediately_drops_target_and_current() {
        let mut vp = ZoomViewport::new(Size::new(800.0, 600.0));
        vp.zoom_to(3.0, Point::new(100.0, 100.0));
        vp.smooth_zoom_to(4.0, Point::new(700.0, 500.0));
        vp.reset_immediately();
        assert_eq!(*vp.state(), ViewportState::centered(Size::new(800.0, 600.0)));
        assert!(vp.is_settled());
        assert!(!vp.is_zoomed_in());
    }

    #[test]
    fn pan_moves_against_pointer_and_clamps() {
        let mut vp = viewport();
        vp.zoom_to(2.0, Point::new(400.0, 300.0));
        vp.pan_by_view(Vec2::new(40.0, -20.0));
        assert_eq!(vp.target_focus(), Point::new(380.0, 310.0));

        vp.pan_by_view(Vec2::new(10_000.0, 10_000.0));
        assert_eq!(vp.target_focus(), Point::new(200.0, 150.0));
    }

    #[test]
    fn pan_at_unit_zoom_is_pinned_to_center() {
        let mut vp = viewport();
        vp.pan_by_view(Vec2::new(50.0, 50.0));
        assert_eq!(vp.target_focus(), Point::new(400.0, 300.0));
    }

    #[test]
    fn view_canvas_mapping_round_trips() {
        let mut vp = viewport();
        vp.zoom_to(3.0, Point::new(250.0, 350.0));
        let pt = Point::new(123.0, 456.0);
        let back = vp.canvas_to_view(vp.view_to_canvas(pt));
        assert!((back - pt).hypot() < 1e-9);
        let via_affine = vp.transform() * vp.view_to_canvas(pt);
        assert!((via_affine - pt).hypot() < 1e-9);
    }

    #[test]
    fn smooth_zoom_about_keeps_anchor() {
        let mut vp = viewport();
        let anchor_view = Point::new(300.0, 200.0);
        let anchor_canvas = vp.view_to_canvas(anchor_view);
        vp.smooth_zoom_about(2.0, anchor_canvas, anchor_view);
        vp.zoom_to(vp.target_zoom(), vp.target_focus());
        let after = vp.view_to_canvas(anchor_view);
        assert!((after - anchor_canvas).hypot() < 1e-9);
    }

    #[test]
    fn advance_converges_and_reports_settle() {
        let mut vp = viewport();
        vp.smooth_zoom_to(3.0, Point::new(250.0, 250.0));
        let mut frames = 0;
        loop {
            let step = vp.advance();
            frames += 1;
            if !step.animating {
                break;
            }
            assert!(frames < 1_000, "animation did not settle");
        }
        assert_eq!(vp.zoom(), 3.0);
        assert_eq!(vp.focus(), vp.target_focus());
    }

    #[test]
    fn immediate_smoothing_settles_in_one_frame() {
        let mut vp = viewport();
        vp.set_smoothing(Smoothing::IMMEDIATE);
        vp.smooth_zoom_to(2.0, Point::new(300.0, 300.0));
        let step = vp.advance();
        assert!(!step.animating);
        assert!(!step.zooming);
    }

    #[test]
    fn set_smoothing_sanitizes_factors() {
        let mut vp = viewport();
        vp.set_smoothing(Smoothing::DEFAULT.with_zoom(-1.0, 7.0));
        assert_eq!(vp.smoothing().zoom_bias, 0.0);
        assert_eq!(vp.smoothing().zoom_lerp, 1.0);
    }

    #[test]
    fn resize_reclamps_focus() {
        let mut vp = viewport();
        vp.zoom_to(2.0, Point::new(600.0, 450.0));
        vp.set_size(Size::new(400.0, 300.0));
        assert_eq!(vp.target_focus(), Point::new(300.0, 225.0));
        assert!(contains(Rect::new(0.0, 0.0, 400.0, 300.0), vp.visible_rect()));
    }

    #[test]
    fn clamp_focus_collapses_at_unit_zoom() {
        let size = Size::new(100.0, 50.0);
        assert_eq!(
            clamp_focus(Point::new(0.0, 0.0), size, 1.0),
            Point::new(50.0, 25.0)
        );
    }
}
