//! Drawing surface abstraction and the seal renderer.

use kurbo::{Affine, BezPath, Point, Size};
use peniko::Color;
use sealmaker_core::layout::{
    ARC_TEXT_RADIUS, ArcSide, BorderGeometry, BorderStroke, EDGE_TEXT_SIZE, arc_layout,
    center_text_size, linear_text_origins, surface_center,
};
use sealmaker_core::seal::{FontFamily, SealConfig, SealShape};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Font selection for text drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    /// Font size in logical pixels.
    pub size: f64,
    pub bold: bool,
}

impl FontSpec {
    pub fn bold(family: FontFamily, size: f64) -> Self {
        Self {
            family,
            size,
            bold: true,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::default(),
            size: 10.0,
            bold: false,
        }
    }
}

/// Graphics state saved and restored by [`Surface::save`] / [`Surface::restore`].
#[derive(Debug, Clone, Copy)]
pub struct DrawState {
    pub color: Color,
    pub line_width: f64,
    pub font: FontSpec,
    /// Current transform from drawing coordinates to logical surface coordinates.
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(0, 0, 0, 255),
            line_width: 1.0,
            font: FontSpec::default(),
            transform: Affine::IDENTITY,
        }
    }
}

/// A 2D drawing surface with canvas-style state.
///
/// Implementations keep a current [`DrawState`]; `save` pushes it and
/// `restore` pops it. Drawing calls use the current state.
pub trait Surface {
    /// Logical size of the surface.
    fn size(&self) -> Size;

    /// Erase all pixels to transparent. Does not touch the draw state.
    fn clear(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    /// Concatenate `affine` onto the current transform (applied before it).
    fn transform(&mut self, affine: Affine);

    /// Set the color used for both strokes and text.
    fn set_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    fn set_font(&mut self, font: FontSpec);

    /// Stroke a path with the current color and line width.
    fn stroke_path(&mut self, path: &BezPath);

    /// Fill `text` centered horizontally on `at`, with `at` on the middle of the em box.
    fn fill_text(&mut self, text: &str, at: Point);
}

/// Draws a [`SealConfig`] onto a [`Surface`].
///
/// Every call is a full redraw: the surface is cleared, then border, center
/// text and top/bottom text are drawn in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SealRenderer;

impl SealRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `config` onto `surface`.
    pub fn render(&self, config: &SealConfig, surface: &mut dyn Surface) {
        let size = surface.size();
        let center = surface_center(size);

        surface.clear();
        surface.save();
        surface.set_color(config.resolved_color());

        self.draw_border(surface, config.shape, config.border_width);
        self.draw_center_text(surface, config, center);

        if config.shape.uses_arc_text() {
            self.draw_arc_text(surface, &config.top_text, center, ArcSide::Top, config.font_family);
            self.draw_arc_text(surface, &config.bottom_text, center, ArcSide::Bottom, config.font_family);
        } else {
            self.draw_linear_text(surface, config, size);
        }

        surface.restore();
    }

    /// Outer stroke, then the thin inner stroke.
    fn draw_border(&self, surface: &mut dyn Surface, shape: SealShape, border_width: u32) {
        let border = BorderGeometry::compute(shape, surface.size(), border_width);
        stroke_border(surface, &border.outer);
        stroke_border(surface, &border.inner);
    }

    fn draw_center_text(&self, surface: &mut dyn Surface, config: &SealConfig, center: Point) {
        surface.set_font(FontSpec::bold(config.font_family, center_text_size(config.shape)));
        if !config.center_text.is_empty() {
            surface.fill_text(&config.center_text, center);
        }
    }

    /// Straight top and bottom lines, used by square seals.
    fn draw_linear_text(&self, surface: &mut dyn Surface, config: &SealConfig, size: Size) {
        surface.set_font(FontSpec::bold(config.font_family, EDGE_TEXT_SIZE));
        let (top, bottom) = linear_text_origins(size);
        if !config.top_text.is_empty() {
            surface.fill_text(&config.top_text, top);
        }
        if !config.bottom_text.is_empty() {
            surface.fill_text(&config.bottom_text, bottom);
        }
    }

    /// One glyph at a time along the text arc, each with its own transform.
    fn draw_arc_text(
        &self,
        surface: &mut dyn Surface,
        text: &str,
        center: Point,
        side: ArcSide,
        family: FontFamily,
    ) {
        if text.is_empty() {
            return;
        }

        surface.set_font(FontSpec::bold(family, EDGE_TEXT_SIZE));
        let mut buf = [0u8; 4];
        surface.save();
        for glyph in arc_layout(text, center, ARC_TEXT_RADIUS, side) {
            surface.save();
            surface.transform(glyph.transform());
            surface.fill_text(glyph.ch.encode_utf8(&mut buf), Point::ORIGIN);
            surface.restore();
        }
        surface.restore();
    }
}

fn stroke_border(surface: &mut dyn Surface, stroke: &BorderStroke) {
    surface.set_line_width(stroke.width);
    match stroke.outline.to_path() {
        Some(path) => surface.stroke_path(&path),
        None => log::debug!("Skipping collapsed border outline {:?}", stroke.outline),
    }
}
