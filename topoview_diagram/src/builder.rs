// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface between a topology diagram builder and what it draws into.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

use crate::options::RenderOptions;
use crate::primitive::{BoxPrimitive, LinePrimitive, Primitive, TextPrimitive};

/// Receives a diagram as a stream of primitives.
///
/// A builder calls [`set_scale`](DiagramSink::set_scale) once before any
/// primitive, then pushes primitives back to front.
pub trait DiagramSink {
    /// Announces the diagram's natural extent and base font size.
    fn set_scale(&mut self, natural_height: f64, natural_width: f64, font_size: f64);

    /// Adds a box.
    fn push_box(&mut self, primitive: BoxPrimitive);

    /// Adds a text.
    fn push_text(&mut self, primitive: TextPrimitive);

    /// Adds a line.
    fn push_line(&mut self, primitive: LinePrimitive);
}

/// Produces a topology diagram.
pub trait DiagramBuilder {
    /// Draws the diagram selected by `options` into `sink`.
    fn build(
        &mut self,
        options: &RenderOptions,
        sink: &mut dyn DiagramSink,
    ) -> Result<(), BuildError>;
}

/// Why a diagram could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// No topology source is available on this platform.
    Unavailable,
    /// The topology could not be loaded or has an unusable shape.
    InvalidTopology(String),
    /// The builder ran and exited with a non-zero status.
    Failed {
        /// Exit status.
        code: i32,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("no topology source is available"),
            Self::InvalidTopology(reason) => write!(f, "invalid topology: {reason}"),
            Self::Failed { code } => write!(f, "diagram builder failed with status {code}"),
        }
    }
}

impl core::error::Error for BuildError {}

/// A recorded diagram.
///
/// `Diagram` is both a sink, capturing whatever a builder draws, and a
/// builder, replaying it. It lets a diagram be built once and shown again
/// without re-running the source, and serves as a fixed builder in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    natural_size: Size,
    font_size: f64,
    primitives: Vec<Primitive>,
}

impl Diagram {
    /// An empty diagram with the given natural extent and font size.
    pub fn new(natural_size: Size, font_size: f64) -> Self {
        Self {
            natural_size,
            font_size,
            primitives: Vec::new(),
        }
    }

    /// Returns the diagram with `primitive` appended.
    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.push(primitive);
        self
    }

    /// Appends a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Natural extent announced by the builder.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Base font size announced by the builder.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Recorded primitives, back to front.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Removes everything, keeping the allocation.
    pub fn clear(&mut self) {
        self.natural_size = Size::ZERO;
        self.font_size = 0.0;
        self.primitives.clear();
    }
}

impl DiagramSink for Diagram {
    fn set_scale(&mut self, natural_height: f64, natural_width: f64, font_size: f64) {
        self.natural_size = Size::new(natural_width, natural_height);
        self.font_size = font_size;
    }

    fn push_box(&mut self, primitive: BoxPrimitive) {
        self.push(primitive);
    }

    fn push_text(&mut self, primitive: TextPrimitive) {
        self.push(primitive);
    }

    fn push_line(&mut self, primitive: LinePrimitive) {
        self.push(primitive);
    }
}

impl DiagramBuilder for Diagram {
    /// Replays the recording. `options` were applied when it was captured
    /// and are ignored here.
    fn build(
        &mut self,
        _options: &RenderOptions,
        sink: &mut dyn DiagramSink,
    ) -> Result<(), BuildError> {
        let Size { width, height } = self.natural_size;
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(BuildError::InvalidTopology(alloc::format!(
                "natural size {width}x{height} is empty"
            )));
        }
        sink.set_scale(height, width, self.font_size);
        for primitive in &self.primitives {
            match primitive {
                Primitive::Box(b) => sink.push_box(b.clone()),
                Primitive::Text(t) => sink.push_text(t.clone()),
                Primitive::Line(l) => sink.push_line(*l),
            }
        }
        Ok(())
    }
}
