//! Ink region detection: surface → tight bounding box of ink pixels.
//!
//! A full scan of the surface, O(width × height). It runs once per solve,
//! never per frame.

use crate::model::BoundingBox;
use crate::surface::Surface;

/// Find the tight bounding box of every pixel whose alpha is non-zero.
///
/// Returns `None` for a surface with no ink. Callers must not derive an
/// anchor in that case.
pub fn detect_bounding_box(surface: &Surface) -> Option<BoundingBox> {
    let width = surface.width() as usize;
    if width == 0 {
        return None;
    }

    let mut bbox: Option<BoundingBox> = None;
    for (i, px) in surface.as_rgba().chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        match bbox.as_mut() {
            Some(b) => b.include(x, y),
            None => bbox = Some(BoundingBox::at(x, y)),
        }
    }

    if let Some(b) = &bbox {
        log::debug!(
            "ink bbox {}x{} at ({},{}) on {}x{}",
            b.width(),
            b.height(),
            b.min_x,
            b.min_y,
            surface.width(),
            surface.height()
        );
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, StrokeStyle};
    use pretty_assertions::assert_eq;

    /// Every ink pixel is inside the box, and each edge row/column holds ink.
    fn assert_tight(surface: &Surface, b: &BoundingBox) {
        assert!(b.min_x <= b.max_x && b.min_y <= b.max_y);
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.alpha(x, y) > 0 {
                    let inside =
                        (b.min_x..=b.max_x).contains(&x) && (b.min_y..=b.max_y).contains(&y);
                    assert!(inside, "ink at ({x},{y}) outside {b:?}");
                }
            }
        }
        let col_has_ink = |x| (b.min_y..=b.max_y).any(|y| surface.alpha(x, y) > 0);
        let row_has_ink = |y| (b.min_x..=b.max_x).any(|x| surface.alpha(x, y) > 0);
        assert!(col_has_ink(b.min_x) && col_has_ink(b.max_x));
        assert!(row_has_ink(b.min_y) && row_has_ink(b.max_y));
    }

    #[test]
    fn untouched_surface_has_no_box() {
        assert_eq!(detect_bounding_box(&Surface::new(64, 48)), None);
        assert_eq!(detect_bounding_box(&Surface::new(0, 0)), None);
    }

    #[test]
    fn box_is_tight_around_strokes() {
        let mut s = Surface::new(120, 80);
        let pen = StrokeStyle::default();
        s.stroke_segment(Point::new(20.0, 15.0), Point::new(60.0, 30.0), &pen);
        s.stroke_segment(Point::new(60.0, 30.0), Point::new(45.0, 70.0), &pen);
        s.stroke_segment(Point::new(90.0, 20.0), Point::new(100.0, 22.0), &pen);

        let b = detect_bounding_box(&s).expect("ink present");
        assert_tight(&s, &b);
    }

    #[test]
    fn single_pixel_box() {
        let mut s = Surface::new(10, 10);
        let pen = StrokeStyle {
            width: 1.0,
            ..StrokeStyle::default()
        };
        // A 1px horizontal run centered on row 3.
        s.stroke_segment(Point::new(2.0, 3.5), Point::new(6.0, 3.5), &pen);
        let b = detect_bounding_box(&s).unwrap();
        assert_eq!((b.min_y, b.max_y), (3, 3));
        assert_tight(&s, &b);
    }

    #[test]
    fn box_spans_surface_corners() {
        let mut s = Surface::new(30, 20);
        let pen = StrokeStyle::default();
        s.stroke_segment(Point::new(-5.0, -5.0), Point::new(0.0, 0.0), &pen);
        s.stroke_segment(Point::new(30.0, 20.0), Point::new(35.0, 25.0), &pen);
        let b = detect_bounding_box(&s).unwrap();
        assert_eq!(
            b,
            BoundingBox {
                min_x: 0,
                min_y: 0,
                max_x: 29,
                max_y: 19
            }
        );
    }
}
