// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview Event State: touch gesture state for a zoomable view.
//!
//! This crate provides small state machines for touch interactions that need
//! to be tracked across several events:
//!
//! - [`pointer`]: the [`TouchEvent`](pointer::TouchEvent) type fed into the
//!   state machines.
//! - [`track`]: distance and delta tracking for one pointer or a pointer pair.
//! - [`tap`]: single/double tap recognition by timestamp.
//! - [`gesture`]: the classifier that turns a touch sequence into pans, taps,
//!   double taps, and pinches, and decides how each event reaches the child
//!   of the zoomable view.
//!
//! The crate does not know anything about viewports or drawing. The caller
//! tells the classifier whether the view is zoomed in and applies the
//! resulting gestures itself.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use topoview_event_state::gesture::{Gesture, GestureClassifier, Routing};
//! use topoview_event_state::pointer::{PointerAction, TouchEvent};
//!
//! let mut gestures = GestureClassifier::default();
//!
//! let down = TouchEvent::single(PointerAction::Down, Point::new(40.0, 40.0), 1_000);
//! let up = TouchEvent::single(PointerAction::Up, Point::new(42.0, 40.0), 1_050);
//!
//! assert_eq!(gestures.classify(&down, false).routing, Routing::Forward);
//! let result = gestures.classify(&up, false);
//! assert_eq!(result.gesture, Some(Gesture::Tap { position: Point::new(42.0, 40.0) }));
//! assert_eq!(result.routing, Routing::Forward);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod gesture;
pub mod pointer;
pub mod tap;
pub mod track;
