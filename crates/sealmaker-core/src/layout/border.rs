//! Outer and inner border strokes for each seal shape.

use crate::seal::{INNER_STROKE_WIDTH, SealShape};
use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as KurboShape, Size};

/// Gap between the surface edge and the outer border.
pub const SEAL_MARGIN: f64 = 10.0;

/// Extra spacing between the outer border and the inner stroke.
const INNER_GAP: f64 = 4.0;

/// Vertical radius of an oval as a fraction of half the surface height.
pub const OVAL_ASPECT: f64 = 0.7;

/// Tolerance used when flattening outlines to Bézier paths.
const PATH_TOLERANCE: f64 = 0.1;

/// A closed outline traced by one border stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderOutline {
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    Rect(Rect),
}

impl BorderOutline {
    /// Path for stroking, or `None` if the outline has collapsed.
    pub fn to_path(&self) -> Option<BezPath> {
        match *self {
            BorderOutline::Circle { center, radius } => {
                (radius > 0.0).then(|| Circle::new(center, radius).to_path(PATH_TOLERANCE))
            }
            BorderOutline::Ellipse {
                center,
                radius_x,
                radius_y,
            } => (radius_x > 0.0 && radius_y > 0.0).then(|| {
                Ellipse::new(center, (radius_x, radius_y), 0.0).to_path(PATH_TOLERANCE)
            }),
            BorderOutline::Rect(rect) => {
                (rect.width() > 0.0 && rect.height() > 0.0).then(|| rect.to_path(PATH_TOLERANCE))
            }
        }
    }
}

/// One stroke of the border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStroke {
    pub outline: BorderOutline,
    pub width: f64,
}

/// The two concentric strokes of a seal border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderGeometry {
    /// Thick stroke, `border_width` wide, kept inside the margin box.
    pub outer: BorderStroke,
    /// Thin stroke inset by `border_width + 4` from the outer edge.
    pub inner: BorderStroke,
}

impl BorderGeometry {
    /// Compute the border for a shape on a surface of the given size.
    pub fn compute(shape: SealShape, size: Size, border_width: u32) -> Self {
        let bw = f64::from(border_width);
        let half = bw / 2.0;
        let inset = bw + INNER_GAP;
        let center = Point::new(size.width / 2.0, size.height / 2.0);

        let (outer, inner) = match shape {
            SealShape::Circle => {
                let radius = size.min_side() / 2.0 - SEAL_MARGIN;
                (
                    BorderOutline::Circle {
                        center,
                        radius: radius - half,
                    },
                    BorderOutline::Circle {
                        center,
                        radius: radius - inset,
                    },
                )
            }
            SealShape::Square => {
                let side = size.min_side() - 2.0 * SEAL_MARGIN;
                (
                    BorderOutline::Rect(Rect::from_origin_size(
                        (SEAL_MARGIN + half, SEAL_MARGIN + half),
                        (side - bw, side - bw),
                    )),
                    BorderOutline::Rect(Rect::from_origin_size(
                        (SEAL_MARGIN + inset, SEAL_MARGIN + inset),
                        (side - 2.0 * inset, side - 2.0 * inset),
                    )),
                )
            }
            SealShape::Oval => {
                let radius_x = size.width / 2.0 - SEAL_MARGIN;
                let radius_y = size.height / 2.0 * OVAL_ASPECT;
                (
                    BorderOutline::Ellipse {
                        center,
                        radius_x: radius_x - half,
                        radius_y: radius_y - half,
                    },
                    BorderOutline::Ellipse {
                        center,
                        radius_x: radius_x - inset,
                        radius_y: radius_y - inset,
                    },
                )
            }
        };

        Self {
            outer: BorderStroke {
                outline: outer,
                width: bw,
            },
            inner: BorderStroke {
                outline: inner,
                width: INNER_STROKE_WIDTH,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SEAL_SIZE;
    use crate::seal::BORDER_WIDTH_RANGE;

    fn circle_radius(outline: BorderOutline) -> f64 {
        match outline {
            BorderOutline::Circle { radius, .. } => radius,
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_circle_radii() {
        for bw in BORDER_WIDTH_RANGE {
            let border = BorderGeometry::compute(SealShape::Circle, SEAL_SIZE, bw);
            let outer = circle_radius(border.outer.outline);
            let inner = circle_radius(border.inner.outline);
            let bw = f64::from(bw);
            assert!((outer - (200.0 - 10.0 - bw / 2.0)).abs() < f64::EPSILON);
            assert!((inner - (200.0 - 10.0 - bw - 4.0)).abs() < f64::EPSILON);
            assert!(inner < outer);
        }
    }

    #[test]
    fn test_stroke_widths() {
        let border = BorderGeometry::compute(SealShape::Oval, SEAL_SIZE, 15);
        assert_eq!(border.outer.width, 15.0);
        assert_eq!(border.inner.width, 2.0);
    }

    #[test]
    fn test_square_rects() {
        let border = BorderGeometry::compute(SealShape::Square, SEAL_SIZE, 8);
        assert_eq!(
            border.outer.outline,
            BorderOutline::Rect(Rect::new(14.0, 14.0, 386.0, 386.0))
        );
        assert_eq!(
            border.inner.outline,
            BorderOutline::Rect(Rect::new(22.0, 22.0, 378.0, 378.0))
        );
    }

    #[test]
    fn test_oval_radii() {
        let border = BorderGeometry::compute(SealShape::Oval, SEAL_SIZE, 8);
        assert_eq!(
            border.outer.outline,
            BorderOutline::Ellipse {
                center: Point::new(200.0, 200.0),
                radius_x: 186.0,
                radius_y: 136.0,
            }
        );
        assert_eq!(
            border.inner.outline,
            BorderOutline::Ellipse {
                center: Point::new(200.0, 200.0),
                radius_x: 178.0,
                radius_y: 128.0,
            }
        );
    }

    #[test]
    fn test_degenerate_outline_has_no_path() {
        let border = BorderGeometry::compute(SealShape::Circle, Size::new(20.0, 20.0), 20);
        assert!(border.outer.outline.to_path().is_none());
        assert!(border.inner.outline.to_path().is_none());

        let border = BorderGeometry::compute(SealShape::Circle, SEAL_SIZE, 20);
        assert!(border.outer.outline.to_path().is_some());
    }
}
