// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing primitives emitted by a diagram builder.
//!
//! Coordinates are in the builder's natural units. The canvas scales them to
//! the screen when it lays the diagram out.

use alloc::string::String;

use kurbo::{Point, Rect};
use peniko::Color;

/// Identifier of a topology object's box.
///
/// Box-anchored text refers to its box by this id.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub u32);

/// A filled, outlined rectangle standing for one topology object.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPrimitive {
    /// Id that texts use to attach to this box.
    pub id: BoxId,
    /// Fill colour.
    pub fill: Color,
    /// Extent in natural units.
    pub rect: Rect,
    /// Border style. `0` is a solid 2px border; higher values widen and dash
    /// it.
    pub style: u8,
    /// Details shown when the box is clicked. Empty when there are none.
    pub info: String,
}

impl BoxPrimitive {
    /// A solid-bordered box without info.
    pub fn new(id: BoxId, fill: Color, rect: Rect) -> Self {
        Self {
            id,
            fill,
            rect,
            style: 0,
            info: String::new(),
        }
    }

    /// Returns a copy with `style` set.
    pub fn with_style(mut self, style: u8) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy with `info` set.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Border width in pixels.
    pub fn stroke_width(&self) -> f64 {
        2.0 + f64::from(self.style)
    }

    /// Dash length in pixels, or `None` for a solid border.
    ///
    /// Styles past 29 are clamped so the shift cannot overflow.
    pub fn dash(&self) -> Option<f64> {
        match self.style {
            0 => None,
            style => Some(f64::from(1_u32 << (2 + style.min(29)))),
        }
    }
}

/// Where a text is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Placed at its own position on the canvas.
    Absolute,
    /// Attached to a box.
    Box {
        /// The box.
        id: BoxId,
        /// The text sits next to the box rather than in it, so it is placed
        /// at its own position and is not hidden when the box shows its info.
        outside: bool,
    },
}

/// A line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPrimitive {
    /// Content.
    pub text: String,
    /// Top-left corner in natural units. Unused for text stacked inside a
    /// box.
    pub pos: Point,
    /// Whether to use a bold face.
    pub bold: bool,
    /// Placement.
    pub anchor: TextAnchor,
}

impl TextPrimitive {
    /// Free-standing text at `pos`.
    pub fn absolute(text: impl Into<String>, pos: Point) -> Self {
        Self {
            text: text.into(),
            pos,
            bold: false,
            anchor: TextAnchor::Absolute,
        }
    }

    /// Text stacked inside box `id`.
    pub fn in_box(text: impl Into<String>, id: BoxId) -> Self {
        Self {
            text: text.into(),
            pos: Point::ZERO,
            bold: false,
            anchor: TextAnchor::Box { id, outside: false },
        }
    }

    /// Text belonging to box `id` but drawn at `pos`, outside it.
    pub fn beside_box(text: impl Into<String>, id: BoxId, pos: Point) -> Self {
        Self {
            text: text.into(),
            pos,
            bold: false,
            anchor: TextAnchor::Box { id, outside: true },
        }
    }

    /// Returns a copy with `bold` set.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// A connector between two points.
///
/// Only horizontal and vertical lines are drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinePrimitive {
    /// Start point in natural units.
    pub from: Point,
    /// End point in natural units.
    pub to: Point,
}

impl LinePrimitive {
    /// A line from `from` to `to`.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Whether the line is neither horizontal nor vertical.
    pub fn is_diagonal(&self) -> bool {
        self.from.x != self.to.x && self.from.y != self.to.y
    }
}

/// Any primitive, for recording builder output.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A box.
    Box(BoxPrimitive),
    /// A text.
    Text(TextPrimitive),
    /// A line.
    Line(LinePrimitive),
}

impl From<BoxPrimitive> for Primitive {
    fn from(value: BoxPrimitive) -> Self {
        Self::Box(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(value: LinePrimitive) -> Self {
        Self::Line(value)
    }
}
