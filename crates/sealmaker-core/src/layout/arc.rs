//! Curved text layout.
//!
//! Characters are placed one by one on a circle around the seal center, a
//! fixed angle apart, centered on 12 o'clock (top text) or 6 o'clock (bottom
//! text). Each glyph is rotated so that it stands upright relative to the arc;
//! bottom glyphs get an extra half turn so they are not drawn upside down.

use kurbo::{Affine, Point};
use std::f64::consts::{FRAC_PI_2, PI};

/// Radius of the text arc, independent of the border size.
pub const ARC_TEXT_RADIUS: f64 = 140.0;

/// Angle between consecutive characters, in radians.
pub const ARC_STEP: f64 = 0.25;

/// Which half of the circle the text follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSide {
    Top,
    Bottom,
}

impl ArcSide {
    /// Angle the text is centered on (y axis points down).
    pub fn base_angle(self) -> f64 {
        match self {
            ArcSide::Top => -FRAC_PI_2,
            ArcSide::Bottom => FRAC_PI_2,
        }
    }

    fn glyph_rotation(self, angle: f64) -> f64 {
        match self {
            ArcSide::Top => angle + FRAC_PI_2,
            ArcSide::Bottom => angle + FRAC_PI_2 + PI,
        }
    }
}

/// A single character positioned on the arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGlyph {
    pub ch: char,
    /// Anchor of the glyph (its center) on the arc.
    pub position: Point,
    /// Polar angle of the anchor around the seal center.
    pub angle: f64,
    /// Rotation applied to the glyph around its anchor.
    pub rotation: f64,
}

impl ArcGlyph {
    /// Transform that maps glyph-local coordinates (anchor at the origin) to the surface.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation)
    }
}

/// Lay `text` out along an arc of `radius` around `center`.
///
/// Empty text produces no glyphs; a single character sits exactly on the base angle.
pub fn arc_layout(text: &str, center: Point, radius: f64, side: ArcSide) -> Vec<ArcGlyph> {
    let count = text.chars().count();
    if count == 0 {
        return Vec::new();
    }

    let span = ARC_STEP * (count - 1) as f64;
    let start = side.base_angle() - span / 2.0;

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let angle = start + i as f64 * ARC_STEP;
            ArcGlyph {
                ch,
                position: Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ),
                angle,
                rotation: side.glyph_rotation(angle),
            }
        })
        .collect()
}
