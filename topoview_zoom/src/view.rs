// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use kurbo::{Affine, Point, Rect, Size};
use topoview_event_state::gesture::{
    Classification, Gesture, GestureClassifier, GestureConfig, GesturePhase, Routing,
};
use topoview_event_state::pointer::{PointerAction, TouchEvent};
use topoview_imaging::ImagingBackend;
use topoview_view2d::{Smoothing, ZoomTarget, ZoomViewport};

use crate::cache::SnapshotCache;
use crate::interaction::{PinchAnchor, apply_gesture};
use crate::listener::ZoomListener;
use crate::minimap::{MinimapConfig, MinimapHeight, MinimapLayout, paint_minimap};
use crate::surface::Surface;

/// What happened during one [`ZoomView::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// The view was still moving toward its target this frame.
    pub animated: bool,
    /// The child was replayed from its snapshot instead of painted live.
    pub used_cache: bool,
    /// Another frame should be scheduled.
    pub needs_frame: bool,
}

/// A zoomable, pannable container around one child [`Surface`].
///
/// `ZoomView` sits between the platform and the child: touch input goes
/// through [`dispatch_input`](Self::dispatch_input), which recognizes drags,
/// double taps, pinches, and minimap touches and forwards the rest to the
/// child in its own coordinates. [`render`](Self::render) advances the zoom
/// animation one frame and paints the child under the current transform,
/// followed by the minimap.
///
/// The child is laid out to fill the view, so at zoom `1.0` the whole child
/// is visible.
pub struct ZoomView<S> {
    viewport: ZoomViewport,
    gestures: GestureClassifier,
    pinch: Option<PinchAnchor>,
    minimap: MinimapConfig,
    child: Option<S>,
    listener: Option<Box<dyn ZoomListener>>,
    cache: SnapshotCache,
    cache_enabled: bool,
}

impl<S> core::fmt::Debug for ZoomView<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ZoomView")
            .field("viewport", &self.viewport)
            .field("gestures", &self.gestures)
            .field("pinch", &self.pinch)
            .field("minimap", &self.minimap)
            .field("has_child", &self.child.is_some())
            .field("has_listener", &self.listener.is_some())
            .field("cache", &self.cache)
            .field("cache_enabled", &self.cache_enabled)
            .finish()
    }
}

impl<S: Surface> ZoomView<S> {
    /// An empty view of `size` view pixels.
    pub fn new(size: Size) -> Self {
        Self {
            viewport: ZoomViewport::new(size),
            gestures: GestureClassifier::default(),
            pinch: None,
            minimap: MinimapConfig::default(),
            child: None,
            listener: None,
            cache: SnapshotCache::default(),
            cache_enabled: true,
        }
    }

    /// A view sized to `child`'s current extent, wrapping it.
    pub fn with_child(child: S) -> Self {
        let mut view = Self::new(child.size());
        view.child = Some(child);
        view
    }

    /// Replaces the child, returning the previous one.
    ///
    /// The new child is resized to fill the view.
    pub fn set_child(&mut self, mut child: S) -> Option<S> {
        child.set_size(self.viewport.size());
        self.cache.invalidate();
        self.gestures.reset();
        self.pinch = None;
        self.child.replace(child)
    }

    /// Removes and returns the child.
    pub fn take_child(&mut self) -> Option<S> {
        self.cache.invalidate();
        self.child.take()
    }

    /// The child, if any.
    pub fn child(&self) -> Option<&S> {
        self.child.as_ref()
    }

    /// Mutable access to the child.
    ///
    /// The child's snapshot is dropped, since the caller may change what it
    /// paints.
    pub fn child_mut(&mut self) -> Option<&mut S> {
        self.cache.invalidate();
        self.child.as_mut()
    }

    /// View size in pixels.
    pub fn view_size(&self) -> Size {
        self.viewport.size()
    }

    /// Resizes the view and the child.
    ///
    /// The focus is re-clamped against the new bounds; an unzoomed view ends
    /// up centred.
    pub fn set_view_size(&mut self, size: Size) {
        self.viewport.set_size(size);
        if let Some(child) = self.child.as_mut() {
            child.set_size(size);
        }
        self.cache.invalidate();
    }

    /// Zoom factor drawn by the last frame.
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Zoom factor the view is heading to.
    pub fn target_zoom(&self) -> f64 {
        self.viewport.target_zoom()
    }

    /// Canvas point at the centre of the view, as drawn by the last frame.
    pub fn zoom_focus(&self) -> Point {
        self.viewport.focus()
    }

    /// Canvas point the view is heading to.
    pub fn target_focus(&self) -> Point {
        self.viewport.target_focus()
    }

    /// Upper bound for the zoom factor.
    pub fn max_zoom(&self) -> f64 {
        self.viewport.max_zoom()
    }

    /// Sets the upper bound for the zoom factor.
    ///
    /// Values below `1.0` are ignored and `false` is returned.
    pub fn set_max_zoom(&mut self, max_zoom: f64) -> bool {
        let accepted = self.viewport.set_max_zoom(max_zoom);
        #[cfg(feature = "tracing")]
        if !accepted {
            tracing::debug!(max_zoom, "ignored maximum zoom below 1.0");
        }
        accepted
    }

    /// Animation smoothing factors.
    pub fn smoothing(&self) -> Smoothing {
        self.viewport.smoothing()
    }

    /// Sets the animation smoothing factors.
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.viewport.set_smoothing(smoothing);
    }

    /// Gesture thresholds.
    pub fn gesture_config(&self) -> GestureConfig {
        self.gestures.config()
    }

    /// Sets the gesture thresholds.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.gestures.set_config(config);
    }

    /// Current gesture phase.
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// Jumps to `zoom` centred on canvas point `focus`, without animating.
    pub fn zoom_to(&mut self, zoom: f64, focus: Point) -> ZoomTarget {
        let target = self.viewport.zoom_to(zoom, focus);
        self.zoom_started(target);
        target
    }

    /// Animates to `zoom` centred on canvas point `focus`.
    ///
    /// The zoom is clamped to `[1.0, max_zoom]` and the focus so the view
    /// stays on the canvas.
    pub fn smooth_zoom_to(&mut self, zoom: f64, focus: Point) -> ZoomTarget {
        let target = self.viewport.smooth_zoom_to(zoom, focus);
        self.zoom_started(target);
        target
    }

    /// Animates back to zoom `1.0`, centred.
    pub fn reset_zoom(&mut self) -> ZoomTarget {
        let target = self.viewport.reset();
        self.zoom_started(target);
        target
    }

    /// Returns to zoom `1.0`, centred, without animating.
    ///
    /// Any gesture in progress is dropped and the child receives nothing
    /// more of it. Used when the host navigates away from the diagram.
    pub fn reset_view(&mut self) {
        self.viewport.reset_immediately();
        self.gestures.reset();
        self.pinch = None;
        self.cache.invalidate();
    }

    /// Minimap settings.
    pub fn minimap(&self) -> &MinimapConfig {
        &self.minimap
    }

    /// Replaces the minimap settings.
    ///
    /// A negative fixed height is ignored and the previous height kept.
    pub fn set_minimap(&mut self, config: MinimapConfig) {
        let height = config.height;
        let previous = self.minimap.height;
        self.minimap = config;
        self.minimap.height = previous;
        self.set_minimap_height(height);
    }

    /// Shows or hides the minimap.
    pub fn set_minimap_enabled(&mut self, enabled: bool) {
        self.minimap.enabled = enabled;
    }

    /// Sets the minimap height. Negative heights are ignored and `false`
    /// returned.
    pub fn set_minimap_height(&mut self, height: MinimapHeight) -> bool {
        let accepted = self.minimap.set_height(height);
        #[cfg(feature = "tracing")]
        if !accepted {
            tracing::debug!(?height, "ignored invalid minimap height");
        }
        accepted
    }

    /// Minimap placement for the current view size, when shown.
    pub fn minimap_layout(&self) -> Option<MinimapLayout> {
        self.minimap.layout(self.viewport.size())
    }

    /// Installs the listener notified of zoom changes, returning the old one.
    pub fn set_listener(
        &mut self,
        listener: Option<Box<dyn ZoomListener>>,
    ) -> Option<Box<dyn ZoomListener>> {
        core::mem::replace(&mut self.listener, listener)
    }

    /// Whether animating frames may replay a snapshot of the child.
    pub fn animation_cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Enables or disables the animation snapshot.
    pub fn set_animation_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
        if !enabled {
            self.cache.invalidate();
        }
    }

    /// Returns `true` while the current state differs from the target.
    pub fn is_animating(&self) -> bool {
        !self.viewport.is_settled()
    }

    /// Returns `true` when [`render`](Self::render) should be called again:
    /// the view is animating or resources from an earlier frame are still
    /// held.
    pub fn needs_frame(&self) -> bool {
        self.is_animating() || self.cache.is_holding()
    }

    /// Converts a view point into child coordinates.
    pub fn view_to_canvas(&self, pt: Point) -> Point {
        self.viewport.view_to_canvas(pt) - self.child_origin().to_vec2()
    }

    /// Converts a child point into view coordinates.
    pub fn canvas_to_view(&self, pt: Point) -> Point {
        self.viewport.canvas_to_view(pt + self.child_origin().to_vec2())
    }

    /// Canvas region drawn by the last frame, in unzoomed view coordinates.
    pub fn visible_rect(&self) -> Rect {
        self.viewport.visible_rect()
    }

    /// Child → view transform for the current state.
    pub fn transform(&self) -> Affine {
        self.viewport.transform() * Affine::translate(self.child_origin().to_vec2())
    }

    fn child_origin(&self) -> Point {
        self.child.as_ref().map_or(Point::ZERO, Surface::origin)
    }

    fn zoom_started(&mut self, target: ZoomTarget) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_zoom_started(target.zoom, target.focus);
        }
    }

    /// Handles a touch event in view coordinates.
    ///
    /// Returns `true` when the event was consumed by a gesture or used by
    /// the child.
    pub fn dispatch_input(&mut self, event: &TouchEvent) -> bool {
        if !event.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::trace!("dropped touch event with non-finite coordinates");
            return false;
        }

        if let Some(routing) = self.minimap_input(event) {
            self.route(event, routing);
            return true;
        }

        #[cfg(feature = "tracing")]
        let before = self.gestures.phase();
        let Classification { gesture, routing } =
            self.gestures.classify(event, self.viewport.is_zoomed_in());
        #[cfg(feature = "tracing")]
        if before != self.gestures.phase() {
            tracing::debug!(from = ?before, to = ?self.gestures.phase(), "gesture phase");
        }

        if let Some(gesture) = gesture
            && let Some(target) = apply_gesture(&mut self.viewport, &gesture, &mut self.pinch)
        {
            self.zoom_started(target);
        }
        if self.gestures.phase() == GesturePhase::Idle {
            self.pinch = None;
        }

        let consumed = gesture.is_some_and(|g| !matches!(g, Gesture::Tap { .. }));
        let used = self.route(event, routing);
        consumed || routing != Routing::Forward || used
    }

    /// Handles single-pointer touches on the minimap, returning how the
    /// event reaches the child when the minimap took it.
    fn minimap_input(&mut self, event: &TouchEvent) -> Option<Routing> {
        let [pos] = event.pointers.as_slice() else {
            return None;
        };
        let layout = self.minimap_layout()?;
        if !self.viewport.is_zoomed_in() || !layout.contains(*pos) {
            return None;
        }
        let zoom = self.viewport.target_zoom();
        let target = self.viewport.smooth_zoom_to(zoom, layout.to_canvas(*pos));
        self.zoom_started(target);
        if event.action.ends_sequence() {
            self.pinch = None;
        }
        Some(self.gestures.claim(event))
    }

    /// Delivers `event` to the child according to `routing`.
    fn route(&mut self, event: &TouchEvent, routing: Routing) -> bool {
        let action = match routing {
            Routing::Swallow => return false,
            Routing::Forward => event.action,
            Routing::Cancel => PointerAction::Cancel,
        };
        let origin = self.child_origin().to_vec2();
        let viewport = &self.viewport;
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        let remapped = event.map_positions(|p| viewport.view_to_canvas(p) - origin);
        if action == event.action {
            child.dispatch_input(&remapped)
        } else {
            child.dispatch_input(&remapped.with_action(action))
        }
    }

    /// Advances the animation one frame and paints into `backend`.
    ///
    /// The child is painted under [`transform`](Self::transform), then the
    /// minimap in view space. Without a child only the animation advances
    /// and nothing is drawn, minimap included.
    pub fn render(&mut self, backend: &mut dyn ImagingBackend) -> RenderStats {
        let step = self.viewport.advance();
        if step.zooming
            && let Some(listener) = self.listener.as_mut()
        {
            listener.on_zooming(self.viewport.zoom(), self.viewport.focus());
        }

        let transform = self.transform();
        let mut used_cache = false;
        match self.child.as_mut() {
            Some(child) if step.animating && self.cache_enabled => {
                used_cache = self.cache.paint(backend, transform, child);
            }
            Some(child) => self.cache.paint_live(backend, transform, child),
            None => {
                self.cache.release(backend);
                return RenderStats {
                    animated: step.animating,
                    used_cache: false,
                    needs_frame: self.needs_frame(),
                };
            }
        }

        if let Some(layout) = self.minimap_layout() {
            paint_minimap(
                backend,
                &self.minimap,
                &layout,
                self.viewport.focus(),
                self.viewport.zoom(),
            );
        }

        RenderStats {
            animated: step.animating,
            used_cache,
            needs_frame: self.needs_frame(),
        }
    }
}
