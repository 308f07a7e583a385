// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topoview Imaging: the drawing vocabulary shared by the zoom engine, the
//! diagram canvas, and whatever rasterizes their output.
//!
//! Everything Topoview paints goes through an [`ImagingBackend`] as a flat
//! stream of operations:
//!
//! - [`StateOp`] changes the transform, brush, stroke, or clip.
//! - [`DrawOp`] fills and strokes rectangles, draws text runs, and replays
//!   pictures.
//!
//! A picture ([`PictureId`]) is a recorded stretch of that stream installed
//! as a backend resource. The zoom engine records the diagram into one when
//! an animation starts and redraws it under a new transform every frame,
//! instead of walking the diagram again.
//!
//! ```
//! use peniko::{Brush, Color};
//! use topoview_imaging::{
//!     Affine, DrawOp, ImagingBackend, ImagingOp, PictureDesc, PictureId, RecordedOps, RectF,
//!     ResourceBackend, StateOp, record_picture,
//! };
//!
//! #[derive(Default)]
//! struct Log {
//!     ops: Vec<ImagingOp>,
//!     pictures: Vec<PictureDesc>,
//!     mark: Option<usize>,
//! }
//!
//! impl ResourceBackend for Log {
//!     fn create_picture(&mut self, desc: PictureDesc) -> PictureId {
//!         self.pictures.push(desc);
//!         PictureId(self.pictures.len() as u32 - 1)
//!     }
//!     fn destroy_picture(&mut self, _id: PictureId) {}
//! }
//!
//! impl ImagingBackend for Log {
//!     fn state(&mut self, op: StateOp) {
//!         self.ops.push(ImagingOp::State(op));
//!     }
//!     fn draw(&mut self, op: DrawOp) {
//!         self.ops.push(ImagingOp::Draw(op));
//!     }
//!     fn begin_record(&mut self) {
//!         self.mark = Some(self.ops.len());
//!     }
//!     fn end_record(&mut self) -> RecordedOps {
//!         let start = self.mark.take().unwrap_or(self.ops.len());
//!         RecordedOps { ops: self.ops[start..].into(), original_ctm: None }
//!     }
//! }
//!
//! let mut log = Log::default();
//! let picture = record_picture(&mut log, |b| {
//!     b.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
//!     b.draw(DrawOp::FillRect(RectF::new(0.0, 0.0, 10.0, 10.0)));
//! });
//! log.draw(DrawOp::DrawPicture { picture, transform: Affine::scale(2.0) });
//! assert_eq!(log.ops.len(), 3);
//! assert_eq!(log.pictures[0].recording.ops.len(), 2);
//! ```

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
pub use peniko::Brush;

/// Handle to a recorded picture owned by a backend.
///
/// The handle stays valid until [`ResourceBackend::destroy_picture`] is
/// called with it. Backends may hand the same value out again afterwards.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PictureId(pub u32);

/// Affine transform type used throughout the IR.
pub type Affine = kurbo::Affine;

/// Stroke parameters: width, dashes, joins, and caps.
pub type StrokeStyle = kurbo::Stroke;

/// Axis-aligned rectangle in `f32` coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl RectF {
    /// A rectangle from its edges.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Narrows a [`kurbo::Rect`].
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "imaging coordinates are f32"
    )]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        Self::new(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        )
    }

    /// Widens to a [`kurbo::Rect`].
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// Operations that change what later draws look like.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Replace the transform from local to device coordinates.
    SetTransform(Affine),
    /// Brush for subsequent fills, strokes, and text.
    SetBrush(Brush),
    /// Stroke for subsequent [`DrawOp::StrokeRect`]s.
    SetStroke(StrokeStyle),
    /// Intersect the clip with a rectangle in local coordinates.
    ///
    /// Every push is matched by a [`StateOp::PopClip`].
    PushClip(RectF),
    /// Undo the most recent [`StateOp::PushClip`].
    PopClip,
}

/// A single line of text.
///
/// Shaping and font selection are up to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Content.
    pub text: Arc<str>,
    /// Left end of the baseline.
    pub x: f32,
    /// Baseline height.
    pub y: f32,
    /// Font size in local units.
    pub size: f32,
    /// Bold face.
    pub bold: bool,
}

/// Operations that put pixels down.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a rectangle with the current brush.
    FillRect(RectF),
    /// Outline a rectangle with the current stroke and brush.
    StrokeRect(RectF),
    /// Draw text with the current brush.
    DrawText(TextRun),
    /// Replay a picture with `transform` applied on top of the current one.
    DrawPicture {
        /// Picture to replay.
        picture: PictureId,
        /// Placement of the picture.
        transform: Affine,
    },
}

/// Either kind of operation, as stored in recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// A state change.
    State(StateOp),
    /// A draw.
    Draw(DrawOp),
}

/// A captured stretch of the operation stream.
///
/// Recordings refer to other pictures only by id, so they are only
/// meaningful to the backend that produced them.
#[derive(Clone, Debug)]
pub struct RecordedOps {
    /// The operations, in order.
    pub ops: Arc<[ImagingOp]>,
    /// Transform in effect when recording started, if the backend tracks it.
    pub original_ctm: Option<Affine>,
}

impl RecordedOps {
    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Issues the recorded operations to `backend` again.
    ///
    /// Backends without native picture support use this to implement
    /// [`DrawOp::DrawPicture`].
    pub fn replay<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        for op in self.ops.iter() {
            match op {
                ImagingOp::State(op) => backend.state(op.clone()),
                ImagingOp::Draw(op) => backend.draw(op.clone()),
            }
        }
    }
}

/// A recording installed as a picture.
#[derive(Clone, Debug)]
pub struct PictureDesc {
    /// What the picture draws.
    pub recording: RecordedOps,
}

/// Backend-owned resources.
pub trait ResourceBackend {
    /// Installs a picture and returns its handle.
    fn create_picture(&mut self, desc: PictureDesc) -> PictureId;

    /// Releases a picture. Unknown or already released ids are ignored.
    fn destroy_picture(&mut self, id: PictureId);
}

/// A consumer of the operation stream.
pub trait ImagingBackend: ResourceBackend {
    /// Applies a state change.
    ///
    /// While a recording is active the operation is also appended to it.
    fn state(&mut self, op: StateOp);

    /// Applies a draw.
    ///
    /// While a recording is active the operation is also appended to it.
    fn draw(&mut self, op: DrawOp);

    /// Starts capturing operations. Only one recording is active at a time,
    /// and captured operations still take effect.
    fn begin_record(&mut self);

    /// Stops capturing and returns what was captured.
    fn end_record(&mut self) -> RecordedOps;

    /// Shorthand for pushing a [`StateOp::PushClip`].
    #[inline]
    fn clip_to_rect(&mut self, rect: RectF) {
        self.state(StateOp::PushClip(rect));
    }

    /// Shorthand for pushing a [`StateOp::PopClip`].
    #[inline]
    fn pop_clip(&mut self) {
        self.state(StateOp::PopClip);
    }
}

/// Scoped helpers on any [`ImagingBackend`].
pub trait ImagingBackendExt: ImagingBackend {
    /// Runs `f` with `rect` pushed as a clip, popping it afterwards.
    fn with_clip_rect<R>(&mut self, rect: RectF, f: impl FnOnce(&mut Self) -> R) -> R {
        self.clip_to_rect(rect);
        let out = f(self);
        self.pop_clip();
        out
    }

    /// Runs `f` under `transform`, then sets `restore`.
    ///
    /// The IR has no transform stack, so the caller names the transform to
    /// go back to.
    fn with_transform<R>(
        &mut self,
        transform: Affine,
        restore: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.state(StateOp::SetTransform(transform));
        let out = f(self);
        self.state(StateOp::SetTransform(restore));
        out
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

/// Captures what `f` issues to `backend` while still applying it.
pub fn record_ops<B, F>(backend: &mut B, f: F) -> RecordedOps
where
    B: ImagingBackend + ?Sized,
    F: FnOnce(&mut B),
{
    backend.begin_record();
    f(backend);
    backend.end_record()
}

/// Captures what `f` issues to `backend` and installs it as a picture.
///
/// The operations also take effect immediately, so the frame that records a
/// picture does not need to draw it.
pub fn record_picture<B, F>(backend: &mut B, f: F) -> PictureId
where
    B: ImagingBackend + ?Sized,
    F: FnOnce(&mut B),
{
    let recording = record_ops(backend, f);
    backend.create_picture(PictureDesc { recording })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use peniko::Color;

    #[derive(Default)]
    struct Log {
        pictures: u32,
        ops: Vec<ImagingOp>,
        mark: Option<usize>,
    }

    impl ResourceBackend for Log {
        fn create_picture(&mut self, _desc: PictureDesc) -> PictureId {
            self.pictures += 1;
            PictureId(self.pictures - 1)
        }

        fn destroy_picture(&mut self, _id: PictureId) {}
    }

    impl ImagingBackend for Log {
        fn state(&mut self, op: StateOp) {
            self.ops.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.ops.push(ImagingOp::Draw(op));
        }

        fn begin_record(&mut self) {
            self.mark = Some(self.ops.len());
        }

        fn end_record(&mut self) -> RecordedOps {
            let start = self.mark.take().unwrap_or(self.ops.len());
            RecordedOps {
                ops: Arc::from(&self.ops[start..]),
                original_ctm: None,
            }
        }
    }

    fn square(side: f32) -> DrawOp {
        DrawOp::FillRect(RectF::new(0.0, 0.0, side, side))
    }

    #[test]
    fn recording_captures_only_its_scope() {
        let mut log = Log::default();
        log.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
        let recorded = record_ops(&mut log, |b| {
            b.draw(square(4.0));
            b.draw(DrawOp::StrokeRect(RectF::new(0.0, 0.0, 4.0, 4.0)));
        });
        assert_eq!(log.ops.len(), 3);
        assert_eq!(recorded.ops.len(), 2);
        assert!(!recorded.is_empty());
    }

    #[test]
    fn recorded_picture_draws_still_land() {
        let mut log = Log::default();
        let picture = record_picture(&mut log, |b| b.draw(square(1.0)));
        assert_eq!(picture, PictureId(0));
        assert_eq!(log.ops, [ImagingOp::Draw(square(1.0))]);
    }

    #[test]
    fn replay_reissues_every_op() {
        let mut log = Log::default();
        let recorded = record_ops(&mut log, |b| {
            b.state(StateOp::SetTransform(Affine::scale(2.0)));
            b.draw(square(3.0));
        });
        log.ops.clear();
        recorded.replay(&mut log);
        assert_eq!(
            log.ops,
            [
                ImagingOp::State(StateOp::SetTransform(Affine::scale(2.0))),
                ImagingOp::Draw(square(3.0)),
            ]
        );
    }

    #[test]
    fn scoped_helpers_restore_state() {
        let mut log = Log::default();
        let clip = RectF::new(0.0, 0.0, 2.0, 2.0);
        log.with_clip_rect(clip, |b| {
            b.with_transform(Affine::scale(4.0), Affine::IDENTITY, |b| {
                b.draw(square(4.0));
            });
        });
        assert_eq!(
            log.ops,
            [
                ImagingOp::State(StateOp::PushClip(clip)),
                ImagingOp::State(StateOp::SetTransform(Affine::scale(4.0))),
                ImagingOp::Draw(square(4.0)),
                ImagingOp::State(StateOp::SetTransform(Affine::IDENTITY)),
                ImagingOp::State(StateOp::PopClip),
            ]
        );
    }

    #[test]
    fn rect_conversions_round_trip_exact_values() {
        let r = kurbo::Rect::new(1.5, 2.0, 10.25, 20.0);
        assert_eq!(RectF::from_kurbo(r).to_kurbo(), r);
    }
}
