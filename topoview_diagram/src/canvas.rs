// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Surface`] that lays out and paints a topology diagram.

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round` and `trunc`
use kurbo::{Point, Rect, Size, Stroke};
use peniko::{Brush, Color};
use topoview_event_state::pointer::{PointerAction, TouchEvent};
use topoview_imaging::{DrawOp, ImagingBackend, ImagingBackendExt, RectF, StateOp, TextRun};
use topoview_zoom::Surface;

use crate::builder::{BuildError, DiagramBuilder, DiagramSink};
use crate::options::RenderOptions;
use crate::primitive::{BoxId, BoxPrimitive, LinePrimitive, TextAnchor, TextPrimitive};

/// Absolute texts longer than this many characters are placed at their
/// natural position, unscaled.
pub const LONG_TEXT_CHARS: usize = 100;

/// Font sizes above this many dp are replaced by [`CAPPED_FONT_SIZE`].
pub const MAX_FONT_SIZE: f64 = 15.0;

/// Font size used when the scaled size exceeds [`MAX_FONT_SIZE`].
pub const CAPPED_FONT_SIZE: f64 = 14.0;

/// Line advance for text stacked inside a box, as a multiple of the font
/// size.
const LINE_HEIGHT: f64 = 1.2;

/// Screen properties the canvas lays the diagram out for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    /// Screen extent in pixels.
    pub screen: Size,
    /// Pixels per dp (dots per inch divided by 160).
    pub density: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1080.0, 1920.0),
            density: 1.0,
        }
    }
}

impl CanvasConfig {
    /// Returns a copy with `screen` set.
    pub fn with_screen(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    /// Returns a copy with `density` set.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    fn usable_density(&self) -> f64 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        }
    }
}

#[derive(Clone, Debug)]
struct Label {
    text: Arc<str>,
    bold: bool,
}

#[derive(Clone, Debug)]
struct CanvasBox {
    shape: BoxPrimitive,
    info: Option<Arc<str>>,
    texts: Vec<Label>,
    showing_info: bool,
}

#[derive(Clone, Debug)]
struct FreeText {
    label: Label,
    pos: Point,
    unscaled: bool,
}

#[derive(Copy, Clone, Debug)]
enum Item {
    Box(usize),
    Text(usize),
    Line(LinePrimitive),
}

/// A laid-out topology diagram that can be painted and clicked.
///
/// The canvas is a [`DiagramSink`]: a builder pushes primitives in natural
/// units and the canvas scales them so the diagram's natural height fills
/// the screen height. It is also a [`Surface`], so it can be wrapped in a
/// [`ZoomView`](topoview_zoom::ZoomView).
///
/// Clicking a box that carries info swaps the box's texts for its info
/// label, and clicking again swaps them back.
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use peniko::Color;
/// use topoview_diagram::{
///     BoxId, BoxPrimitive, CanvasConfig, Diagram, RenderOptions, SurfaceCanvas, TextPrimitive,
/// };
///
/// let mut diagram = Diagram::new(Size::new(100.0, 50.0), 10.0)
///     .with(BoxPrimitive::new(BoxId(0), Color::WHITE, Rect::new(10.0, 10.0, 60.0, 40.0))
///         .with_info("L2 (1024KB)"))
///     .with(TextPrimitive::in_box("L2", BoxId(0)));
///
/// let config = CanvasConfig::default().with_screen(Size::new(400.0, 200.0));
/// let mut canvas = SurfaceCanvas::new(config);
/// canvas.load(&mut diagram, &RenderOptions::default()).unwrap();
///
/// assert_eq!(canvas.scale(), 4.0);
/// assert_eq!(canvas.hit_test(Point::new(100.0, 100.0)), Some(BoxId(0)));
/// assert!(canvas.click(BoxId(0)));
/// assert_eq!(canvas.is_showing_info(BoxId(0)), Some(true));
/// ```
#[derive(Clone, Debug)]
pub struct SurfaceCanvas {
    config: CanvasConfig,
    natural: Size,
    base_font_size: f64,
    scale: f64,
    font_size: f64,
    boxes: Vec<CanvasBox>,
    index: HashMap<BoxId, usize>,
    texts: Vec<FreeText>,
    items: Vec<Item>,
    pressed: Option<usize>,
    last_text: Option<Arc<str>>,
}

impl Default for SurfaceCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl SurfaceCanvas {
    /// An empty canvas for `config`.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            natural: Size::ZERO,
            base_font_size: 0.0,
            scale: 1.0,
            font_size: 0.0,
            boxes: Vec::new(),
            index: HashMap::new(),
            texts: Vec::new(),
            items: Vec::new(),
            pressed: None,
            last_text: None,
        }
    }

    /// Screen properties.
    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    /// Replaces the screen properties and lays the diagram out again.
    pub fn set_config(&mut self, config: CanvasConfig) {
        self.config = config;
        self.rescale();
    }

    /// Clears the canvas and fills it from `builder`.
    ///
    /// On error the canvas is left empty.
    pub fn load(
        &mut self,
        builder: &mut dyn DiagramBuilder,
        options: &RenderOptions,
    ) -> Result<(), BuildError> {
        self.clear();
        let result = builder.build(options, self);
        if let Err(_err) = &result {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "diagram build failed");
            self.clear();
        }
        result
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.natural = Size::ZERO;
        self.base_font_size = 0.0;
        self.boxes.clear();
        self.index.clear();
        self.texts.clear();
        self.items.clear();
        self.pressed = None;
        self.last_text = None;
        self.rescale();
    }

    /// Factor from natural units to screen pixels, applied to both axes.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Text size in dp.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Info label size in dp.
    pub fn info_font_size(&self) -> f64 {
        (self.font_size / 1.5).trunc()
    }

    /// Number of boxes.
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Screen rectangle of box `id`.
    pub fn box_rect(&self, id: BoxId) -> Option<Rect> {
        let &i = self.index.get(&id)?;
        Some(self.screen_rect(i))
    }

    /// The top-most box under `point`, in screen pixels.
    pub fn hit_test(&self, point: Point) -> Option<BoxId> {
        self.hit_index(point).map(|i| self.boxes[i].shape.id)
    }

    /// Box currently pressed by a touch, if any.
    pub fn pressed(&self) -> Option<BoxId> {
        self.pressed.map(|i| self.boxes[i].shape.id)
    }

    /// Whether box `id` shows its info label instead of its texts.
    pub fn is_showing_info(&self, id: BoxId) -> Option<bool> {
        let &i = self.index.get(&id)?;
        Some(self.boxes[i].showing_info)
    }

    /// Clicks box `id`.
    ///
    /// Returns `true` when the box toggled between its texts and its info.
    /// Boxes without info absorb the click and return `false`.
    pub fn click(&mut self, id: BoxId) -> bool {
        match self.index.get(&id) {
            Some(&i) => self.toggle(i),
            None => false,
        }
    }

    /// The most recently pushed text.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    fn rescale(&mut self) {
        let h = self.natural.height;
        self.scale = if h.is_finite() && h > 0.0 {
            self.config.screen.height / h
        } else {
            1.0
        };
        let dp = (self.base_font_size * self.scale / self.config.usable_density()).round();
        self.font_size = if dp > MAX_FONT_SIZE {
            CAPPED_FONT_SIZE
        } else {
            dp
        };
    }

    fn px(&self, v: f64) -> f64 {
        (v * self.scale).trunc()
    }

    fn screen_rect(&self, i: usize) -> Rect {
        let r = self.boxes[i].shape.rect;
        let origin = Point::new(self.px(r.x0), self.px(r.y0));
        let size = Size::new(self.px(r.width()), self.px(r.height()));
        Rect::from_origin_size(origin, size)
    }

    fn line_rect(&self, line: &LinePrimitive) -> Rect {
        let x = line.from.x.min(line.to.x);
        let y = line.from.y.min(line.to.y);
        let mut w = (line.to.x - line.from.x).abs();
        let mut h = (line.to.y - line.from.y).abs();
        if w == 0.0 {
            w = 2.0;
        }
        if h == 0.0 {
            h = 2.0;
        }
        Rect::from_origin_size(
            Point::new(self.px(x) - 1.0, self.px(y) - 1.0),
            Size::new(self.px(w) + 2.0, self.px(h) + 2.0),
        )
    }

    fn hit_index(&self, point: Point) -> Option<usize> {
        (0..self.boxes.len())
            .rev()
            .find(|&i| self.screen_rect(i).contains(point))
    }

    fn toggle(&mut self, i: usize) -> bool {
        let b = &mut self.boxes[i];
        if b.info.is_none() {
            return false;
        }
        b.showing_info = !b.showing_info;
        #[cfg(feature = "tracing")]
        tracing::trace!(id = b.shape.id.0, showing_info = b.showing_info, "box toggled");
        true
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "imaging coordinates are f32"
    )]
    fn text_run(&self, label: &Label, x: f64, top: f64, size_dp: f64) -> TextRun {
        let size = size_dp * self.config.usable_density();
        TextRun {
            text: label.text.clone(),
            x: x as f32,
            y: (top + size) as f32,
            size: size as f32,
            bold: label.bold,
        }
    }

    fn paint_box(&self, backend: &mut dyn ImagingBackend, i: usize) {
        let b = &self.boxes[i];
        let rect = self.screen_rect(i);
        backend.state(StateOp::SetBrush(Brush::Solid(b.shape.fill)));
        backend.draw(DrawOp::FillRect(RectF::from_kurbo(rect)));

        let mut stroke = Stroke::new(b.shape.stroke_width());
        if let Some(dash) = b.shape.dash() {
            stroke = stroke.with_dashes(0.0, [dash, dash]);
        }
        backend.state(StateOp::SetStroke(stroke));
        backend.state(StateOp::SetBrush(Brush::Solid(Color::BLACK)));
        backend.draw(DrawOp::StrokeRect(RectF::from_kurbo(rect)));

        let runs: Vec<TextRun> = match (&b.info, b.showing_info) {
            (Some(info), true) => {
                let label = Label {
                    text: info.clone(),
                    bold: false,
                };
                let x = rect.x0 + self.px(5.0);
                let top = rect.y0 + self.px(1.0);
                [self.text_run(&label, x, top, self.info_font_size())].into()
            }
            _ => {
                let x = rect.x0 + self.px(10.0);
                let advance = self.font_size * self.config.usable_density() * LINE_HEIGHT;
                let mut top = rect.y0;
                b.texts
                    .iter()
                    .map(|label| {
                        top += self.px(2.0);
                        let run = self.text_run(label, x, top, self.font_size);
                        top += advance;
                        run
                    })
                    .collect()
            }
        };
        if runs.is_empty() {
            return;
        }
        backend.with_clip_rect(RectF::from_kurbo(rect), |backend| {
            for run in runs {
                backend.draw(DrawOp::DrawText(run));
            }
        });
    }

    fn paint_text(&self, backend: &mut dyn ImagingBackend, i: usize) {
        let t = &self.texts[i];
        let pos = if t.unscaled {
            t.pos
        } else {
            Point::new(t.pos.x * self.scale, t.pos.y * self.scale)
        };
        backend.state(StateOp::SetBrush(Brush::Solid(Color::BLACK)));
        backend.draw(DrawOp::DrawText(self.text_run(
            &t.label,
            pos.x,
            pos.y,
            self.font_size,
        )));
    }

    fn paint_line(&self, backend: &mut dyn ImagingBackend, line: &LinePrimitive) {
        backend.state(StateOp::SetBrush(Brush::Solid(Color::BLACK)));
        backend.draw(DrawOp::FillRect(RectF::from_kurbo(self.line_rect(line))));
    }
}

impl DiagramSink for SurfaceCanvas {
    fn set_scale(&mut self, natural_height: f64, natural_width: f64, font_size: f64) {
        self.natural = Size::new(natural_width, natural_height);
        self.base_font_size = font_size;
        self.rescale();
    }

    fn push_box(&mut self, primitive: BoxPrimitive) {
        let info = (!primitive.info.is_empty()).then(|| Arc::from(primitive.info.as_str()));
        let i = self.boxes.len();
        self.index.insert(primitive.id, i);
        self.boxes.push(CanvasBox {
            shape: primitive,
            info,
            texts: Vec::new(),
            showing_info: false,
        });
        self.items.push(Item::Box(i));
    }

    fn push_text(&mut self, primitive: TextPrimitive) {
        let TextPrimitive {
            text,
            pos,
            bold,
            anchor,
        } = primitive;
        let label = Label {
            text: Arc::from(text),
            bold,
        };
        self.last_text = Some(label.text.clone());
        let free = match anchor {
            TextAnchor::Absolute => FreeText {
                unscaled: label.text.chars().count() > LONG_TEXT_CHARS,
                label,
                pos,
            },
            TextAnchor::Box { outside: true, .. } => FreeText {
                label,
                pos,
                unscaled: false,
            },
            TextAnchor::Box { id, outside: false } => {
                match self.index.get(&id) {
                    Some(&i) => self.boxes[i].texts.push(label),
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(id = id.0, "text for unknown box dropped");
                    }
                }
                return;
            }
        };
        self.items.push(Item::Text(self.texts.len()));
        self.texts.push(free);
    }

    fn push_line(&mut self, primitive: LinePrimitive) {
        if primitive.is_diagonal() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?primitive, "diagonal line skipped");
            return;
        }
        self.items.push(Item::Line(primitive));
    }
}

impl Surface for SurfaceCanvas {
    fn size(&self) -> Size {
        self.config.screen
    }

    fn set_size(&mut self, size: Size) {
        self.config.screen = size;
        self.rescale();
    }

    fn dispatch_input(&mut self, event: &TouchEvent) -> bool {
        let position = match event.position() {
            Some(p) if event.pointer_count() == 1 => p,
            _ => {
                self.pressed = None;
                return false;
            }
        };
        match event.action {
            PointerAction::Down => {
                self.pressed = self.hit_index(position);
                self.pressed.is_some()
            }
            PointerAction::Move => {
                let inside = self
                    .pressed
                    .is_some_and(|i| self.screen_rect(i).contains(position));
                if !inside {
                    self.pressed = None;
                }
                inside
            }
            PointerAction::Up => match self.pressed.take() {
                Some(i) if self.screen_rect(i).contains(position) => {
                    self.toggle(i);
                    true
                }
                _ => false,
            },
            PointerAction::Outside | PointerAction::Cancel => {
                self.pressed = None;
                false
            }
        }
    }

    fn paint(&mut self, backend: &mut dyn ImagingBackend) {
        for item in &self.items {
            match item {
                Item::Box(i) => self.paint_box(backend, *i),
                Item::Text(i) => self.paint_text(backend, *i),
                Item::Line(line) => self.paint_line(backend, line),
            }
        }
    }
}
