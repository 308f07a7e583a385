// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use topoview_event_state::pointer::TouchEvent;
use topoview_imaging::ImagingBackend;

/// The single child wrapped by a [`ZoomView`](crate::ZoomView).
///
/// A surface draws itself in its own coordinate space, with `(0, 0)` at its
/// top-left corner, and receives touch events in that same space. The zoom
/// engine places the surface at [`origin`](Surface::origin) inside the view
/// and takes care of mapping between view pixels and surface coordinates.
pub trait Surface {
    /// Extent of the surface in its own coordinates.
    fn size(&self) -> Size;

    /// Top-left corner of the surface inside the unzoomed view.
    fn origin(&self) -> Point {
        Point::ZERO
    }

    /// Called when the view is resized. Surfaces that fill the view lay
    /// themselves out again here.
    fn set_size(&mut self, size: Size) {
        let _ = size;
    }

    /// Handles a touch event in surface coordinates.
    ///
    /// Returns `true` when the event was used.
    fn dispatch_input(&mut self, event: &TouchEvent) -> bool;

    /// Paints the surface.
    ///
    /// The backend transform already maps surface coordinates to the
    /// screen. Implementations may change brushes, strokes, and clips but
    /// must not replace the transform, since the engine may be recording
    /// the output for replay under a different one.
    fn paint(&mut self, backend: &mut dyn ImagingBackend);
}

impl<S: Surface + ?Sized> Surface for alloc::boxed::Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn origin(&self) -> Point {
        (**self).origin()
    }

    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }

    fn dispatch_input(&mut self, event: &TouchEvent) -> bool {
        (**self).dispatch_input(event)
    }

    fn paint(&mut self, backend: &mut dyn ImagingBackend) {
        (**self).paint(backend);
    }
}
