//! Canvas surface: an RGBA8 pixel buffer the pen draws into.
//!
//! Pixels are stored row-major with straight (non-premultiplied) alpha,
//! the same layout a browser hands back from `getImageData`. A fully
//! transparent surface has no ink; any pixel with alpha > 0 is ink.
//!
//! Segments are rasterized with analytic coverage: each pixel center is
//! measured against the segment and shaded by how far inside the half
//! width it lies, so edges come out anti-aliased. Anything outside the
//! surface is clipped.

use crate::model::{Color, LineCap, Point, StrokeStyle};
use kurbo::{Line, ParamCurveNearest, Rect};

/// Bytes per pixel.
const BPP: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BPP],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BPP)
    }

    /// RGBA at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let px = &self.pixels[i..i + BPP];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Alpha at `(x, y)`; zero outside the surface.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.offset(x, y).map_or(0, |i| self.pixels[i + 3])
    }

    /// Whether any pixel carries ink.
    pub fn has_ink(&self) -> bool {
        self.pixels.chunks_exact(BPP).any(|px| px[3] > 0)
    }

    /// Wipe every pixel back to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reallocate at a new size. Existing ink is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!(
            "surface resize {}x{} -> {width}x{height}",
            self.width,
            self.height
        );
        *self = Self::new(width, height);
    }

    /// Composite `color` over the pixel at `(x, y)` with the given coverage.
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f64) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let src_a = (color.a as f64 * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[i..i + BPP];
        let dst_a = dst[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let s = src[c].clamp(0.0, 1.0) as f64;
            let d = dst[c] as f64 / 255.0;
            let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            dst[c] = (v * 255.0).round() as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Stroke a single line segment from `from` to `to`.
    ///
    /// Returns the number of pixels that received any coverage.
    pub fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> usize {
        let half = (style.width as f64 / 2.0).max(0.5);
        let mut a: kurbo::Point = from.into();
        let mut b: kurbo::Point = to.into();
        let dir = b - a;
        let len = dir.hypot();

        if len == 0.0 && style.cap != LineCap::Round {
            // Zero-length segments only leave a mark with round caps.
            return 0;
        }
        if style.cap == LineCap::Square {
            let ext = dir * (half / len);
            a -= ext;
            b += ext;
        }

        let line = Line::new(a, b);
        let seg = b - a;
        let seg_len2 = seg.hypot2();
        let bounds = Rect::from_points(a, b).inflate(half + 1.0, half + 1.0);
        // `as` saturates negatives to zero.
        let x0 = bounds.x0.floor() as u32;
        let y0 = bounds.y0.floor() as u32;
        let x1 = (bounds.x1.ceil() as u32).min(self.width);
        let y1 = (bounds.y1.ceil() as u32).min(self.height);

        let mut touched = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let c = kurbo::Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist = match style.cap {
                    LineCap::Round if seg_len2 == 0.0 => (c - a).hypot(),
                    LineCap::Round => line.nearest(c, 1e-6).distance_sq.sqrt(),
                    LineCap::Butt | LineCap::Square => {
                        let t = (c - a).dot(seg) / seg_len2;
                        if !(0.0..=1.0).contains(&t) {
                            continue;
                        }
                        (c - (a + seg * t)).hypot()
                    }
                };
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, style.color, coverage);
                    touched += 1;
                }
            }
        }

        log::trace!(
            "stroke ({:.1},{:.1})->({:.1},{:.1}) touched {touched}px",
            from.x,
            from.y,
            to.x,
            to.y
        );
        touched
    }
}
