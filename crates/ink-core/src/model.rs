//! Core data model for an ink-solving session.
//!
//! Everything here is plain data: colors and stroke style for the pen,
//! canvas points, the ink bounding box, and the entries returned by the
//! recognition service. Behavior lives in `surface`, `detect`, `env`
//! and `overlay`.

use serde::{Deserialize, Serialize};

// ─── Colors & Stroke Style ───────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, 1.0)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Quantize to 8-bit RGBA channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// How the ends of a stroked segment are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Fixed pen configuration. Not per-stroke state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    /// White, 2px, round caps.
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color::WHITE,
            cap: LineCap::Round,
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x as f64, p.y as f64)
    }
}

/// Largest canvas side, in pixels. Bigger viewports are clamped.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// The browser-side viewport the canvas is laid into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    /// Canvas pixel size: full width, height minus the canvas' top offset.
    /// Each side is clamped to `0..=MAX_CANVAS_SIDE`.
    pub fn canvas_size(&self, offset_top: f32) -> (u32, u32) {
        let w = (self.width.max(0.0) as u32).min(MAX_CANVAS_SIDE);
        let h = ((self.height - offset_top).max(0.0) as u32).min(MAX_CANVAS_SIDE);
        (w, h)
    }
}

/// Tight box around every ink pixel, inclusive on both ends.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`. An inkless surface
/// has no box at all (`detect_bounding_box` returns `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// Box covering a single pixel.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow to include pixel `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// The overlay anchor: midpoint of the min/max pixel coordinates.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        )
    }
}

// ─── Solve Results ───────────────────────────────────────────────────────

/// One recognized expression returned by the solve service.
///
/// Wire names follow the service: `expr`, `result`, `assign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveEntry {
    #[serde(rename = "expr")]
    pub expression: String,
    pub result: String,
    #[serde(rename = "assign")]
    pub is_assignment: bool,
}

impl SolveEntry {
    /// A plain evaluation (`2+2` → `4`).
    pub fn evaluation(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            is_assignment: false,
        }
    }

    /// A variable definition (`x` := `5`).
    pub fn assignment(symbol: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expression: symbol.into(),
            result: value.into(),
            is_assignment: true,
        }
    }
}
