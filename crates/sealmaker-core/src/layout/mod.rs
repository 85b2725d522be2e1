//! Seal geometry: border outlines and text placement.
//!
//! Everything here is pure and works in logical surface coordinates
//! (origin top-left, y down), so it can be tested without a drawing surface.

mod arc;
mod border;

pub use arc::{ARC_STEP, ARC_TEXT_RADIUS, ArcGlyph, ArcSide, arc_layout};
pub use border::{BorderGeometry, BorderOutline, BorderStroke, OVAL_ASPECT, SEAL_MARGIN};

use crate::seal::SealShape;
use kurbo::{Point, Size};

/// Logical size of the seal surface.
pub const SEAL_SIZE: Size = Size::new(400.0, 400.0);

/// Font size of top/bottom text, both arc and linear.
pub const EDGE_TEXT_SIZE: f64 = 32.0;

/// Distance of linear top/bottom text from the surface edge.
pub const LINEAR_TEXT_OFFSET: f64 = 60.0;

/// Font size of the center text for a shape.
pub fn center_text_size(shape: SealShape) -> f64 {
    match shape {
        SealShape::Square => 80.0,
        SealShape::Circle | SealShape::Oval => 70.0,
    }
}

/// Center of a surface.
pub fn surface_center(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

/// Anchor points of the linear top and bottom text used by square seals.
pub fn linear_text_origins(size: Size) -> (Point, Point) {
    let x = size.width / 2.0;
    (
        Point::new(x, LINEAR_TEXT_OFFSET),
        Point::new(x, size.height - LINEAR_TEXT_OFFSET),
    )
}
