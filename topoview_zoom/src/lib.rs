// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview Zoom: a zoom/pan/minimap container for one child surface.
//!
//! [`ZoomView`] wraps a single [`Surface`] (typically a rendered topology
//! diagram) and makes it zoomable:
//!
//! - A drag of at least the touch slop pans a zoomed-in view. The child is
//!   sent one cancel and sees nothing else of that touch sequence.
//! - A double tap zooms to the maximum around the tap, or back out.
//! - A two-finger pinch zooms around the pinch midpoint.
//! - While zoomed in, touching the minimap jumps the view to that spot.
//! - Everything else is forwarded to the child in child coordinates, so taps
//!   on diagram boxes keep working at any zoom.
//!
//! Zoom changes animate. Call [`ZoomView::render`] once per frame and keep
//! scheduling frames while it reports [`RenderStats::needs_frame`]. While the
//! view animates, the child is recorded once into an imaging picture and
//! replayed; the picture is dropped as soon as the view settles.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use topoview_event_state::pointer::TouchEvent;
//! use topoview_imaging::{DrawOp, ImagingBackend, RectF};
//! use topoview_imaging_ref::RefBackend;
//! use topoview_zoom::{Surface, ZoomView};
//!
//! struct Board;
//!
//! impl Surface for Board {
//!     fn size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!     fn dispatch_input(&mut self, _event: &TouchEvent) -> bool {
//!         false
//!     }
//!     fn paint(&mut self, backend: &mut dyn ImagingBackend) {
//!         backend.draw(DrawOp::FillRect(RectF::new(0.0, 0.0, 800.0, 600.0)));
//!     }
//! }
//!
//! let mut view = ZoomView::with_child(Board);
//! view.smooth_zoom_to(2.0, Point::new(400.0, 300.0));
//!
//! let mut backend = RefBackend::default();
//! while view.render(&mut backend).needs_frame {}
//! assert_eq!(view.zoom(), 2.0);
//! assert_eq!(view.view_to_canvas(Point::new(400.0, 300.0)), Point::new(400.0, 300.0));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for gesture phase changes, rejected
//!   settings, and snapshot recording.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod cache;
mod interaction;
mod listener;
mod minimap;
mod surface;
mod view;

pub use interaction::{PinchAnchor, apply_gesture};
pub use listener::{FnListener, ZoomEvent, ZoomListener, listener_fn};
pub use minimap::{
    MINIMAP_ALPHA, MINIMAP_INSET, MinimapConfig, MinimapHeight, MinimapLayout, paint_minimap,
};
pub use surface::Surface;
pub use view::{RenderStats, ZoomView};

pub use topoview_event_state::gesture::{GestureConfig, GesturePhase};
pub use topoview_view2d::{DEFAULT_MAX_ZOOM, Smoothing, ZoomTarget};
