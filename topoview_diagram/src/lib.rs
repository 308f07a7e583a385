// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview Diagram: topology diagrams as zoomable surfaces.
//!
//! A topology builder describes a machine as a stream of boxes, texts, and
//! lines in its own natural units. This crate defines that interface and a
//! canvas that lays the stream out on a screen:
//!
//! - [`RenderOptions`] select what the builder draws and translate to the
//!   native command line; [`RenderRequest`] adds the output format and an
//!   optional input file.
//! - [`DiagramBuilder`] produces a diagram into a [`DiagramSink`].
//!   [`Diagram`] records one and replays it.
//! - [`SurfaceCanvas`] is a sink that scales the diagram to the screen
//!   height, paints it through the imaging IR, and toggles box details on
//!   click. It implements [`Surface`](topoview_zoom::Surface), so it drops
//!   straight into a [`ZoomView`](topoview_zoom::ZoomView).
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use peniko::Color;
//! use topoview_diagram::{
//!     BoxId, BoxPrimitive, CanvasConfig, Diagram, RenderOptions, SurfaceCanvas,
//! };
//! use topoview_zoom::ZoomView;
//!
//! let mut machine = Diagram::new(Size::new(120.0, 80.0), 10.0).with(BoxPrimitive::new(
//!     BoxId(0),
//!     Color::WHITE,
//!     Rect::new(0.0, 0.0, 120.0, 80.0),
//! ));
//!
//! let config = CanvasConfig::default().with_screen(Size::new(480.0, 320.0));
//! let mut canvas = SurfaceCanvas::new(config);
//! canvas.load(&mut machine, &RenderOptions::default()).unwrap();
//!
//! let mut view = ZoomView::with_child(canvas);
//! view.zoom_to(2.0, Point::new(240.0, 160.0));
//! assert_eq!(view.visible_rect(), Rect::new(120.0, 80.0, 360.0, 240.0));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for dropped primitives, box toggles,
//!   and failed builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod builder;
mod canvas;
mod options;
mod primitive;

pub use builder::{BuildError, Diagram, DiagramBuilder, DiagramSink};
pub use canvas::{CAPPED_FONT_SIZE, CanvasConfig, LONG_TEXT_CHARS, MAX_FONT_SIZE, SurfaceCanvas};
pub use options::{
    IndexMode, IoMode, OutputFormat, PROGRAM_NAME, RenderFlags, RenderOptions, RenderRequest,
};
pub use primitive::{
    BoxId, BoxPrimitive, LinePrimitive, Primitive, TextAnchor, TextPrimitive,
};
