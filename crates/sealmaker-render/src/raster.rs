//! CPU raster surface backed by tiny-skia, with fontdue glyph rasterization.

use crate::fonts::FontBook;
use fontdue::Font;
use crate::renderer::{DrawState, FontSpec, RenderResult, RendererError, Surface};
use kurbo::{Affine, BezPath, PathEl, Point, Size};
use peniko::Color;
use std::sync::Arc;
use tiny_skia::{
    FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Stroke, Transform,
};

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel, not premultiplied).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// A [`Surface`] that draws into an in-memory pixmap.
///
/// Drawing happens in logical coordinates; `scale` maps them to device pixels,
/// so a 400×400 surface with scale 2 owns an 800×800 pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    size: Size,
    scale: f32,
    fonts: Arc<FontBook>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl PixmapSurface {
    pub fn new(size: Size, fonts: Arc<FontBook>) -> RenderResult<Self> {
        Self::with_scale(size, 1.0, fonts)
    }

    pub fn with_scale(size: Size, scale: f32, fonts: Arc<FontBook>) -> RenderResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RendererError::Surface(format!("Invalid scale factor {}", scale)));
        }
        let width = (size.width * f64::from(scale)).round();
        let height = (size.height * f64::from(scale)).round();
        if !(width >= 1.0 && height >= 1.0 && width <= f64::from(u32::MAX) && height <= f64::from(u32::MAX)) {
            return Err(RendererError::Surface(format!(
                "Invalid surface size {}x{}",
                width, height
            )));
        }
        let pixmap = Pixmap::new(width as u32, height as u32).ok_or_else(|| {
            RendererError::Surface(format!("Failed to allocate {}x{} pixmap", width, height))
        })?;

        log::debug!(
            "Created {}x{} pixmap surface (scale {})",
            pixmap.width(),
            pixmap.height(),
            scale
        );

        Ok(Self {
            pixmap,
            size,
            scale,
            fonts,
            state: DrawState::default(),
            stack: Vec::new(),
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size of the backing pixmap in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Current graphics state.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Copy out the pixels as straight (non-premultiplied) RGBA.
    pub fn to_rgba(&self) -> PngRenderResult {
        let mut rgba_data = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba_data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        PngRenderResult {
            rgba_data,
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }

    /// Encode the current pixels as a PNG file.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let result = self.to_rgba();
        encode_png(&result.rgba_data, result.width, result.height)
    }

    /// Logical-to-device transform for the current state.
    fn device_transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale).pre_concat(to_skia_transform(self.state.transform))
    }

    fn paint(&self) -> Paint<'static> {
        let c = self.state.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        paint.anti_alias = true;
        paint
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => log::warn!("restore() without matching save()"),
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.state.transform = self.state.transform * affine;
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    fn stroke_path(&mut self, path: &BezPath) {
        if self.state.line_width <= 0.0 {
            return;
        }
        let Some(skia_path) = to_skia_path(path) else {
            log::debug!("Skipping empty path");
            return;
        };
        let paint = self.paint();
        let stroke = Stroke {
            width: self.state.line_width as f32,
            ..Stroke::default()
        };
        let transform = self.device_transform();
        self.pixmap.stroke_path(&skia_path, &paint, &stroke, transform, None);
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        if text.is_empty() {
            return;
        }
        // Rasterize at device resolution, then map glyph pixels back to logical units.
        let font_spec = self.state.font;
        let px = font_spec.size as f32 * self.scale;
        if px <= 0.0 {
            return;
        }

        let line = layout_line(&self.fonts, font_spec, text, px);
        if line.glyphs.is_empty() {
            log::debug!("No drawable glyphs in {:?}", text);
            return;
        }

        let color = self.state.color.to_rgba8();
        let base = self
            .device_transform()
            .pre_translate(at.x as f32, at.y as f32)
            .pre_scale(1.0 / self.scale, 1.0 / self.scale);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        let origin_x = -line.width / 2.0;
        for glyph in &line.glyphs {
            let (metrics, coverage) = glyph.font.rasterize(glyph.ch, px);
            if let Some(pixmap) = glyph_pixmap(metrics.width, metrics.height, &coverage, color) {
                let x = origin_x + glyph.x + metrics.xmin as f32;
                let y = line.baseline - (metrics.ymin as f32 + metrics.height as f32);
                self.pixmap
                    .draw_pixmap(0, 0, pixmap.as_ref(), &paint, base.pre_translate(x, y), None);
            }
        }
    }
}

/// A glyph placed on a line, `x` being the pen position from the line start.
struct PlacedGlyph<'a> {
    font: &'a Font,
    ch: char,
    x: f32,
}

struct LineLayout<'a> {
    glyphs: Vec<PlacedGlyph<'a>>,
    width: f32,
    /// Baseline offset below the middle of the em box.
    baseline: f32,
}

/// Lay out one line at `px`, resolving a face per character.
///
/// Characters no loaded face covers are dropped and take no space.
fn layout_line<'a>(fonts: &'a FontBook, font_spec: FontSpec, text: &str, px: f32) -> LineLayout<'a> {
    let mut glyphs: Vec<PlacedGlyph<'a>> = Vec::new();
    let mut pen_x = 0.0;
    for ch in text.chars() {
        let Some(font) = fonts.face_for(font_spec.family, font_spec.bold, ch) else {
            log::debug!("No loaded face has a glyph for {:?}", ch);
            continue;
        };
        if let Some(prev) = glyphs.last() {
            if std::ptr::eq(prev.font, font) {
                pen_x += font.horizontal_kern(prev.ch, ch, px).unwrap_or(0.0);
            }
        }
        glyphs.push(PlacedGlyph { font, ch, x: pen_x });
        pen_x += font.metrics(ch, px).advance_width;
    }

    let baseline = fonts
        .get(font_spec.family, font_spec.bold)
        .or_else(|| glyphs.first().map(|glyph| glyph.font))
        .and_then(|font| font.horizontal_line_metrics(px))
        .map_or(px * 0.35, |line| (line.ascent + line.descent) / 2.0);

    LineLayout {
        glyphs,
        width: pen_x,
        baseline,
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("Failed to write PNG data: {}", e)))?;
        writer
            .finish()
            .map_err(|e| RendererError::Encode(format!("Failed to finish PNG: {}", e)))?;
    }
    Ok(png_data)
}

/// Tint a glyph coverage mask into a premultiplied pixmap. `None` for blank glyphs.
fn glyph_pixmap(
    width: usize,
    height: usize,
    coverage: &[u8],
    color: peniko::color::Rgba8,
) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width as u32, height as u32)?;
    for (dst, &cov) in pixmap.pixels_mut().iter_mut().zip(coverage) {
        let alpha = mul_div255(color.a, cov);
        *dst = PremultipliedColorU8::from_rgba(
            mul_div255(color.r, alpha),
            mul_div255(color.g, alpha),
            mul_div255(color.b, alpha),
            alpha,
        )
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
    Some(pixmap)
}

fn mul_div255(a: u8, b: u8) -> u8 {
    ((u16::from(a) * u16::from(b) + 127) / 255) as u8
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SealRenderer;
    use sealmaker_core::layout::SEAL_SIZE;
    use sealmaker_core::seal::{FontFamily, SealConfig, SealShape};
    use std::io::Cursor;

    fn surface() -> PixmapSurface {
        PixmapSurface::new(SEAL_SIZE, Arc::new(FontBook::new())).unwrap()
    }

    fn pixel(surface: &PixmapSurface, x: u32, y: u32) -> [u8; 4] {
        let rgba = surface.to_rgba();
        let i = ((y * rgba.width + x) * 4) as usize;
        [rgba.rgba_data[i], rgba.rgba_data[i + 1], rgba.rgba_data[i + 2], rgba.rgba_data[i + 3]]
    }

    fn render(surface: &mut PixmapSurface, config: &SealConfig) -> Vec<u8> {
        SealRenderer::new().render(config, surface);
        surface.to_rgba().rgba_data
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = surface();
        assert_eq!(surface.pixel_size(), (400, 400));
        assert!(surface.to_rgba().rgba_data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let fonts = Arc::new(FontBook::new());
        assert!(PixmapSurface::with_scale(SEAL_SIZE, 0.0, fonts.clone()).is_err());
        assert!(PixmapSurface::with_scale(SEAL_SIZE, f32::NAN, fonts.clone()).is_err());
        assert!(PixmapSurface::new(Size::new(0.0, 10.0), fonts).is_err());
    }

    #[test]
    fn test_circle_border_pixels() {
        let mut surface = surface();
        render(&mut surface, &SealConfig::default());

        // Outer stroke spans y = 10..18 on the vertical axis with the default width of 8.
        assert_eq!(pixel(&surface, 200, 14), [0xdc, 0x26, 0x26, 255]);
        // Outside the margin and the center stay empty (no fonts are loaded).
        assert_eq!(pixel(&surface, 200, 3)[3], 0);
        assert_eq!(pixel(&surface, 200, 200)[3], 0);
        assert_eq!(pixel(&surface, 5, 5)[3], 0);
    }

    #[test]
    fn test_square_border_reaches_corners() {
        let mut surface = surface();
        let config = SealConfig {
            shape: SealShape::Square,
            ..SealConfig::default()
        };
        render(&mut surface, &config);
        assert_eq!(pixel(&surface, 14, 14)[3], 255);
        assert_eq!(pixel(&surface, 385, 385)[3], 255);
    }

    #[test]
    fn test_redraw_leaves_no_residue() {
        let mut surface = surface();
        let circle = SealConfig::default();
        let square = SealConfig {
            shape: SealShape::Square,
            ..SealConfig::default()
        };

        let first = render(&mut surface, &circle);
        let middle = render(&mut surface, &square);
        let last = render(&mut surface, &circle);
        assert_ne!(first, middle);
        assert_eq!(first, last);
    }

    #[test]
    fn test_clear_erases_pixels() {
        let mut surface = surface();
        render(&mut surface, &SealConfig::default());
        surface.clear();
        assert!(surface.to_rgba().rgba_data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_save_restore_state() {
        let mut surface = surface();
        surface.set_line_width(5.0);
        surface.save();
        surface.transform(Affine::translate((10.0, 20.0)));
        surface.set_line_width(1.0);
        surface.restore();
        assert_eq!(surface.state().transform, Affine::IDENTITY);
        assert_eq!(surface.state().line_width, 5.0);

        // Unbalanced restore keeps the current state.
        surface.restore();
        assert_eq!(surface.state().line_width, 5.0);
    }

    #[test]
    fn test_text_without_fonts_draws_nothing() {
        let mut surface = surface();
        surface.set_font(FontSpec::bold(Default::default(), 32.0));
        surface.fill_text("SEAL", Point::new(200.0, 200.0));
        assert!(surface.to_rgba().rgba_data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scaled_export() {
        let fonts = Arc::new(FontBook::new());
        let mut surface = PixmapSurface::with_scale(SEAL_SIZE, 2.0, fonts).unwrap();
        assert_eq!(surface.pixel_size(), (800, 800));
        render(&mut surface, &SealConfig::default());
        // Same stroke, doubled.
        assert_eq!(pixel(&surface, 400, 28)[3], 255);
    }

    #[test]
    fn test_encode_png_header() {
        let mut surface = surface();
        render(&mut surface, &SealConfig::default());
        let png_data = surface.encode_png().unwrap();
        assert_eq!(&png_data[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(Cursor::new(png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 400);
        assert_eq!(reader.info().height, 400);
        assert_eq!(reader.info().color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        assert!(matches!(
            encode_png(&[0u8; 4], 2, 2),
            Err(RendererError::Encode(_))
        ));
    }

    fn text_surface(scale: f32) -> PixmapSurface {
        PixmapSurface::with_scale(SEAL_SIZE, scale, Arc::new(FontBook::bundled())).unwrap()
    }

    fn texts(top: &str, bottom: &str, center: &str) -> SealConfig {
        SealConfig {
            top_text: top.to_string(),
            bottom_text: bottom.to_string(),
            center_text: center.to_string(),
            ..SealConfig::default()
        }
    }

    /// Bounding box `(x0, y0, x1, y1)` of inked pixels within `radius` of `(cx, cy)`.
    fn ink_box(surface: &PixmapSurface, cx: f64, cy: f64, radius: f64) -> Option<(u32, u32, u32, u32)> {
        let rgba = surface.to_rgba();
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..rgba.height {
            for x in 0..rgba.width {
                let (dx, dy) = (f64::from(x) + 0.5 - cx, f64::from(y) + 0.5 - cy);
                if dx.hypot(dy) > radius || rgba.rgba_data[((y * rgba.width + x) * 4 + 3) as usize] < 128 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    fn box_center(bounds: (u32, u32, u32, u32)) -> (f64, f64) {
        let (x0, y0, x1, y1) = bounds;
        (f64::from(x0 + x1 + 1) / 2.0, f64::from(y0 + y1 + 1) / 2.0)
    }

    /// Row of the box with the most ink, relative to the box top (0.0) and bottom (1.0).
    fn heaviest_row(surface: &PixmapSurface, bounds: (u32, u32, u32, u32)) -> f64 {
        let rgba = surface.to_rgba();
        let (x0, y0, x1, y1) = bounds;
        let ink = |y: u32| {
            (x0..=x1)
                .filter(|&x| rgba.rgba_data[((y * rgba.width + x) * 4 + 3) as usize] >= 128)
                .count()
        };
        let row = (y0..=y1).max_by_key(|&y| ink(y)).unwrap();
        f64::from(row - y0) / f64::from((y1 - y0).max(1))
    }

    #[test]
    fn test_center_text_is_centered() {
        let mut surface = text_surface(1.0);
        render(&mut surface, &texts("", "", "H"));

        let bounds = ink_box(&surface, 200.0, 200.0, 100.0).unwrap();
        let (x, y) = box_center(bounds);
        assert!((x - 200.0).abs() <= 3.0, "ink box {:?}", bounds);
        assert!((y - 200.0).abs() <= 3.0, "ink box {:?}", bounds);
        // A 70px capital is several dozen pixels tall.
        assert!(bounds.3 - bounds.1 > 30);
    }

    #[test]
    fn test_scaled_text_scales_with_surface() {
        let mut surface = text_surface(2.0);
        render(&mut surface, &texts("", "", "H"));

        let bounds = ink_box(&surface, 400.0, 400.0, 200.0).unwrap();
        let (x, y) = box_center(bounds);
        assert!((x - 400.0).abs() <= 5.0, "ink box {:?}", bounds);
        assert!((y - 400.0).abs() <= 5.0, "ink box {:?}", bounds);
        assert!(bounds.3 - bounds.1 > 60);
    }

    #[test]
    fn test_top_arc_glyph_is_upright_above_center() {
        let mut surface = text_surface(1.0);
        render(&mut surface, &texts("T", "", ""));

        let bounds = ink_box(&surface, 200.0, 60.0, 35.0).unwrap();
        let (x, y) = box_center(bounds);
        assert!((x - 200.0).abs() <= 4.0, "ink box {:?}", bounds);
        assert!((y - 60.0).abs() <= 4.0, "ink box {:?}", bounds);
        // The crossbar of an upright T is its top row.
        assert!(heaviest_row(&surface, bounds) < 0.25);
    }

    #[test]
    fn test_bottom_arc_glyph_is_upright_below_center() {
        let mut surface = text_surface(1.0);
        render(&mut surface, &texts("", "T", ""));

        assert!(ink_box(&surface, 200.0, 60.0, 35.0).is_none());
        let bounds = ink_box(&surface, 200.0, 340.0, 35.0).unwrap();
        let (x, y) = box_center(bounds);
        assert!((x - 200.0).abs() <= 4.0, "ink box {:?}", bounds);
        assert!((y - 340.0).abs() <= 4.0, "ink box {:?}", bounds);
        assert!(heaviest_row(&surface, bounds) < 0.25);
    }

    #[test]
    fn test_redraw_with_text_leaves_no_residue() {
        let mut surface = text_surface(1.0);
        let circle = SealConfig::default();
        let square = SealConfig {
            shape: SealShape::Square,
            ..SealConfig::default()
        };

        let first = render(&mut surface, &circle);
        assert!(ink_box(&surface, 200.0, 200.0, 100.0).is_some());
        render(&mut surface, &square);
        let last = render(&mut surface, &circle);
        assert_eq!(first, last);
    }

    #[test]
    fn test_uncovered_glyph_draws_nothing() {
        let mut surface = text_surface(1.0);
        surface.set_font(FontSpec::bold(FontFamily::NotoSerif, 70.0));
        surface.fill_text("印", Point::new(200.0, 200.0));
        assert!(surface.to_rgba().rgba_data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_uncovered_glyph_takes_no_space() {
        let mut with_gap = text_surface(1.0);
        with_gap.set_font(FontSpec::bold(FontFamily::NotoSerif, 40.0));
        with_gap.fill_text("A印A", Point::new(200.0, 200.0));

        let mut plain = text_surface(1.0);
        plain.set_font(FontSpec::bold(FontFamily::NotoSerif, 40.0));
        plain.fill_text("AA", Point::new(200.0, 200.0));

        assert_eq!(with_gap.to_rgba().rgba_data, plain.to_rgba().rgba_data);
    }

    #[test]
    fn test_glyph_from_other_family() {
        // The serif face has no star; the sans face supplies it.
        let mut surface = text_surface(1.0);
        surface.set_font(FontSpec::bold(FontFamily::NotoSerif, 70.0));
        surface.fill_text("★", Point::new(200.0, 200.0));
        assert!(ink_box(&surface, 200.0, 200.0, 100.0).is_some());
    }

    #[test]
    fn test_glyph_pixmap_tint() {
        let color = Color::from_rgba8(200, 100, 0, 255).to_rgba8();
        let glyph = glyph_pixmap(2, 1, &[255, 0], color).unwrap();
        let px = glyph.pixels();
        assert_eq!(px[0].alpha(), 255);
        assert_eq!(px[0].red(), 200);
        assert_eq!(px[1].alpha(), 0);
        assert!(glyph_pixmap(0, 0, &[], color).is_none());
    }
}
