// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview View 2D: a headless zoom/pan viewport with smoothed animation.
//!
//! This crate models the viewport of a zoomable diagram whose canvas is laid
//! out to fill the view at zoom `1.0`. It provides:
//! - [`ViewportState`]: current and target zoom/focus.
//! - [`ZoomViewport`]: owns the state, enforces the zoom range and focus
//!   clamping, and maps points between view and canvas space.
//! - [`advance_animation`]: the pure per-frame step that moves the current
//!   state toward its target with a bias-then-lerp filter.
//!
//! It does **not** own any input handling or rendering. Callers are expected
//! to:
//! - Turn pointer input into pans and zoom targets at a higher layer.
//! - Call [`ZoomViewport::advance`] once per frame and keep requesting frames
//!   while it reports that the view is animating.
//! - Use [`ZoomViewport::transform`] to draw the canvas.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use topoview_view2d::ZoomViewport;
//!
//! let mut view = ZoomViewport::new(Size::new(800.0, 600.0));
//!
//! // Ask for a 2x zoom around a canvas point; the target is clamped so the
//! // view never shows past the canvas edge.
//! let target = view.smooth_zoom_to(2.0, Point::new(100.0, 100.0));
//! assert_eq!(target.focus, Point::new(200.0, 150.0));
//!
//! // Drive the animation until it settles.
//! while view.advance().animating {}
//! assert_eq!(view.zoom(), 2.0);
//!
//! // Map a touch in view space to the canvas point under it.
//! let canvas_pt = view.view_to_canvas(Point::new(400.0, 300.0));
//! assert_eq!(canvas_pt, Point::new(200.0, 150.0));
//! ```
//!
//! ## Design notes
//!
//! - The zoom factor is uniform and never below `1.0`: fully zoomed out
//!   shows exactly the whole canvas.
//! - Target focus is clamped whenever it is set and again every frame,
//!   against the target zoom. Derived values use the current focus clamped
//!   against the current zoom.
//! - Animation is frame-based rather than time-based.
//!
//! This crate is `no_std`.

#![no_std]

mod animator;
mod smoothing;
mod viewport;

pub use animator::{advance_animation, bias, lerp};
pub use smoothing::Smoothing;
pub use viewport::{
    DEFAULT_MAX_ZOOM, FrameStep, ViewportState, ZoomTarget, ZoomViewport, clamp_focus,
};
