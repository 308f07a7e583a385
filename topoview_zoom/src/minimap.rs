// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimap overlay: a scaled-down outline of the canvas with a rectangle
//! marking the visible region.
//!
//! The minimap sits at a fixed inset from the top-left corner of the view and
//! keeps the view's aspect ratio. Touches inside it jump the view to the
//! corresponding canvas point.

use alloc::sync::Arc;

use kurbo::{Point, Rect, Size, Vec2};
use peniko::{Brush, Color};
use topoview_imaging::{Affine, DrawOp, ImagingBackend, RectF, StateOp, TextRun};

/// Distance of the minimap from the top and left edges of the view.
pub const MINIMAP_INSET: f64 = 10.0;

/// Alpha applied to the minimap background and indicator.
pub const MINIMAP_ALPHA: u8 = 0x80;

/// Height of the minimap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MinimapHeight {
    /// A quarter of the view height.
    #[default]
    Auto,
    /// A fixed height in view pixels.
    Fixed(f64),
}

/// Host-provided minimap settings, read every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapConfig {
    /// Whether the minimap is drawn and takes input.
    pub enabled: bool,
    /// Minimap height.
    pub height: MinimapHeight,
    /// Background and indicator colour. Its alpha is replaced by
    /// [`MINIMAP_ALPHA`].
    pub color: Color,
    /// Optional caption drawn in the top-left corner of the minimap.
    pub caption: Option<Arc<str>>,
    /// Caption font size in view pixels.
    pub caption_size: f32,
    /// Caption colour.
    pub caption_color: Color,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            height: MinimapHeight::Auto,
            color: Color::WHITE,
            caption: None,
            caption_size: 10.0,
            caption_color: Color::WHITE,
        }
    }
}

impl MinimapConfig {
    /// Returns a copy with the minimap enabled or disabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns a copy with the given height.
    #[must_use]
    pub fn with_height(mut self, height: MinimapHeight) -> Self {
        self.height = height;
        self
    }

    /// Returns a copy with the given background colour.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy with the given caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<Arc<str>>, size: f32, color: Color) -> Self {
        self.caption = Some(caption.into());
        self.caption_size = size;
        self.caption_color = color;
        self
    }

    /// Sets the height, ignoring negative or non-finite values.
    ///
    /// Returns `false` when the value was rejected.
    pub fn set_height(&mut self, height: MinimapHeight) -> bool {
        if let MinimapHeight::Fixed(h) = height
            && (!h.is_finite() || h < 0.0)
        {
            return false;
        }
        self.height = height;
        true
    }

    /// Minimap geometry for a view of `view`, or `None` when the minimap is
    /// disabled or either it or the view has no area.
    pub fn layout(&self, view: Size) -> Option<MinimapLayout> {
        let has_area = view.width > 0.0 && view.height > 0.0;
        if !self.enabled || !has_area {
            return None;
        }
        let height = match self.height {
            MinimapHeight::Auto => view.height / 4.0,
            MinimapHeight::Fixed(h) => h,
        };
        if height.is_nan() || height <= 0.0 {
            return None;
        }
        let size = Size::new(height * view.width / view.height, height);
        Some(MinimapLayout {
            rect: Rect::from_origin_size(Point::new(MINIMAP_INSET, MINIMAP_INSET), size),
            view,
        })
    }
}

/// Minimap placement for one view size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapLayout {
    rect: Rect,
    view: Size,
}

impl MinimapLayout {
    /// Minimap bounds in view coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns `true` when `pt` (view coordinates) lies inside the minimap,
    /// edges included.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.rect.x0 && pt.x <= self.rect.x1 && pt.y >= self.rect.y0 && pt.y <= self.rect.y1
    }

    /// Maps a view point inside the minimap to the canvas point it stands
    /// for.
    pub fn to_canvas(&self, pt: Point) -> Point {
        let local = pt - self.rect.origin();
        Point::new(
            local.x / self.rect.width() * self.view.width,
            local.y / self.rect.height() * self.view.height,
        )
    }

    /// Indicator rectangle for a view centred on `focus` at `zoom`, in view
    /// coordinates.
    ///
    /// `focus` is expected to be clamped for `zoom`; the indicator then stays
    /// inside the minimap.
    pub fn indicator_rect(&self, focus: Point, zoom: f64) -> Rect {
        let w = self.rect.width();
        let h = self.rect.height();
        let center = Point::new(w * focus.x / self.view.width, h * focus.y / self.view.height);
        let half = Vec2::new(0.5 * w / zoom, 0.5 * h / zoom);
        Rect::from_points(center - half, center + half) + self.rect.origin().to_vec2()
    }
}

fn translucent(color: Color) -> Brush {
    let rgba = color.to_rgba8();
    Brush::Solid(Color::from_rgba8(rgba.r, rgba.g, rgba.b, MINIMAP_ALPHA))
}

/// Paints the minimap in view space.
///
/// Draws the background, then the caption (if any), then the indicator for
/// the view centred on `focus` at `zoom`. The transform is left at identity.
#[expect(
    clippy::cast_possible_truncation,
    reason = "text positions are stored as f32 in the imaging IR"
)]
pub fn paint_minimap(
    backend: &mut dyn ImagingBackend,
    config: &MinimapConfig,
    layout: &MinimapLayout,
    focus: Point,
    zoom: f64,
) {
    let background = translucent(config.color);
    backend.state(StateOp::SetTransform(Affine::IDENTITY));
    backend.state(StateOp::SetBrush(background.clone()));
    backend.draw(DrawOp::FillRect(RectF::from_kurbo(layout.rect)));

    if let Some(caption) = config.caption.as_ref().filter(|c| !c.is_empty()) {
        let origin = layout.rect.origin();
        backend.state(StateOp::SetBrush(Brush::Solid(config.caption_color)));
        backend.draw(DrawOp::DrawText(TextRun {
            text: caption.clone(),
            x: (origin.x + MINIMAP_INSET) as f32,
            y: (origin.y + MINIMAP_INSET) as f32 + config.caption_size,
            size: config.caption_size,
            bold: false,
        }));
        backend.state(StateOp::SetBrush(background));
    }

    backend.draw(DrawOp::FillRect(RectF::from_kurbo(
        layout.indicator_rect(focus, zoom),
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn layout() -> MinimapLayout {
        MinimapConfig::default()
            .with_enabled(true)
            .layout(Size::new(800.0, 600.0))
            .expect("enabled minimap has a layout")
    }

    #[test]
    fn auto_height_is_a_quarter_of_the_view() {
        let l = layout();
        assert_eq!(l.rect(), Rect::new(10.0, 10.0, 210.0, 160.0));
    }

    #[test]
    fn disabled_or_empty_view_has_no_layout() {
        assert!(MinimapConfig::default().layout(Size::new(800.0, 600.0)).is_none());
        let on = MinimapConfig::default().with_enabled(true);
        assert!(on.layout(Size::new(0.0, 600.0)).is_none());
    }

    #[test]
    fn negative_height_is_ignored() {
        let mut config = MinimapConfig::default().with_height(MinimapHeight::Fixed(90.0));
        assert!(!config.set_height(MinimapHeight::Fixed(-1.0)));
        assert!(!config.set_height(MinimapHeight::Fixed(f64::NAN)));
        assert_eq!(config.height, MinimapHeight::Fixed(90.0));
        assert!(config.set_height(MinimapHeight::Fixed(0.0)));
        assert!(config.set_height(MinimapHeight::Auto));
    }

    #[test]
    fn center_maps_to_canvas_center() {
        let l = layout();
        assert_eq!(l.to_canvas(l.rect().center()), Point::new(400.0, 300.0));
        assert_eq!(l.to_canvas(Point::new(10.0, 10.0)), Point::ZERO);
    }

    #[test]
    fn contains_includes_edges() {
        let l = layout();
        assert!(l.contains(Point::new(10.0, 10.0)));
        assert!(l.contains(Point::new(210.0, 160.0)));
        assert!(!l.contains(Point::new(9.9, 50.0)));
        assert!(!l.contains(Point::new(50.0, 160.1)));
    }

    #[test]
    fn indicator_tracks_focus_and_zoom() {
        let l = layout();
        // Unzoomed: the indicator covers the whole minimap.
        assert_eq!(l.indicator_rect(Point::new(400.0, 300.0), 1.0), l.rect());
        // Zoomed into the top-left quarter.
        let r = l.indicator_rect(Point::new(200.0, 150.0), 2.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 110.0, 85.0));
    }

    #[test]
    fn caption_sits_inside_the_minimap_and_indicator_keeps_the_background() {
        use topoview_imaging_ref::{Event, RefBackend};

        let config = MinimapConfig::default()
            .with_enabled(true)
            .with_color(Color::from_rgb8(0x20, 0x40, 0x60))
            .with_caption("Machine (16GB)", 12.0, Color::BLACK);
        let l = layout();
        let mut backend = RefBackend::default();
        paint_minimap(&mut backend, &config, &l, Point::new(200.0, 150.0), 2.0);

        let draws: Vec<_> = backend
            .events()
            .iter()
            .filter_map(|ev| match ev {
                Event::Draw { op, state } => Some((op.clone(), state.brush.clone())),
                Event::State { .. } => None,
            })
            .collect();
        let background = Some(translucent(config.color));
        let [
            (DrawOp::FillRect(bg), bg_brush),
            (DrawOp::DrawText(run), text_brush),
            (DrawOp::FillRect(indicator), indicator_brush),
        ] = draws.as_slice()
        else {
            panic!("unexpected minimap draws: {draws:?}");
        };
        assert_eq!(bg.to_kurbo(), l.rect());
        assert_eq!(*bg_brush, background);

        assert_eq!(&*run.text, "Machine (16GB)");
        assert_eq!((run.x, run.y, run.size), (20.0, 32.0, 12.0));
        assert_eq!(*text_brush, Some(Brush::Solid(Color::BLACK)));

        assert_eq!(indicator.to_kurbo(), Rect::new(10.0, 10.0, 110.0, 85.0));
        assert_eq!(*indicator_brush, background);
    }

    #[test]
    fn empty_caption_draws_no_text() {
        use topoview_imaging_ref::RefBackend;

        let config = MinimapConfig::default()
            .with_enabled(true)
            .with_caption("", 12.0, Color::BLACK);
        let mut backend = RefBackend::default();
        paint_minimap(&mut backend, &config, &layout(), Point::new(400.0, 300.0), 1.0);
        assert_eq!(backend.texts().count(), 0);
        assert_eq!(backend.draws().count(), 2);
    }

    #[test]
    fn background_alpha_is_fixed() {
        let Brush::Solid(c) = translucent(Color::from_rgba8(1, 2, 3, 255)) else {
            panic!("expected solid brush");
        };
        let rgba = c.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (1, 2, 3, 0x80));
    }
}
