//! Pen tool: pointer gestures → ink on the surface.
//!
//! Ink is laid down incrementally: every move while the pointer is down
//! strokes one segment from the previous point straight into the surface.
//! The stroke's points live only as long as the gesture.

use crate::input::InputEvent;
use ink_core::{Point, StrokeStyle, Surface};
use smallvec::SmallVec;

pub struct PenTool {
    style: StrokeStyle,
    drawing: bool,
    /// Points of the stroke in progress.
    points: SmallVec<[Point; 64]>,
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl PenTool {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            drawing: false,
            points: SmallVec::new(),
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points of the current stroke (empty when idle).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start a path at `point`. Nothing is drawn until the first extend.
    pub fn begin_stroke(&mut self, point: Point) {
        self.drawing = true;
        self.points.clear();
        self.points.push(point);
    }

    /// Stroke a segment from the last point to `point`. No-op when idle.
    pub fn extend_stroke(&mut self, point: Point, surface: &mut Surface) {
        if !self.drawing {
            return;
        }
        if let Some(&last) = self.points.last() {
            surface.stroke_segment(last, point, &self.style);
        }
        self.points.push(point);
    }

    pub fn end_stroke(&mut self) {
        if self.drawing {
            log::trace!("stroke ended after {} points", self.points.len());
        }
        self.drawing = false;
        self.points.clear();
    }

    /// Route a pointer event. Returns `true` if the surface changed.
    pub fn handle(&mut self, event: &InputEvent, surface: &mut Surface) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.begin_stroke(Point::new(*x, *y));
                false
            }
            InputEvent::PointerMove { x, y } => {
                let was_drawing = self.drawing;
                self.extend_stroke(Point::new(*x, *y), surface);
                was_drawing
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerOut => {
                self.end_stroke();
                false
            }
            InputEvent::Resize { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::detect_bounding_box;
    use pretty_assertions::assert_eq;

    #[test]
    fn move_without_down_draws_nothing() {
        let mut pen = PenTool::default();
        let mut surface = Surface::new(50, 50);
        pen.extend_stroke(Point::new(10.0, 10.0), &mut surface);
        pen.handle(&InputEvent::from_pointer_move(40.0, 40.0), &mut surface);
        assert!(!surface.has_ink());
        assert!(pen.points().is_empty());
    }

    #[test]
    fn down_alone_draws_nothing() {
        let mut pen = PenTool::default();
        let mut surface = Surface::new(50, 50);
        pen.handle(&InputEvent::from_pointer_down(10.0, 10.0), &mut surface);
        assert!(pen.is_drawing());
        assert!(!surface.has_ink());
    }

    #[test]
    fn each_move_inks_immediately() {
        let mut pen = PenTool::default();
        let mut surface = Surface::new(80, 80);
        pen.handle(&InputEvent::from_pointer_down(10.0, 10.0), &mut surface);
        assert!(pen.handle(&InputEvent::from_pointer_move(30.0, 10.0), &mut surface));
        assert!(surface.alpha(20, 10) > 0);
        assert_eq!(surface.alpha(30, 30), 0);

        pen.handle(&InputEvent::from_pointer_move(30.0, 30.0), &mut surface);
        assert!(surface.alpha(30, 20) > 0);
        assert_eq!(pen.points().len(), 3);
    }

    #[test]
    fn up_and_out_end_the_stroke() {
        let mut surface = Surface::new(80, 80);
        for end in [InputEvent::from_pointer_up(0.0, 0.0), InputEvent::PointerOut] {
            let mut pen = PenTool::default();
            pen.handle(&InputEvent::from_pointer_down(10.0, 10.0), &mut surface);
            pen.handle(&end, &mut surface);
            assert!(!pen.is_drawing());
            assert!(!pen.handle(&InputEvent::from_pointer_move(60.0, 60.0), &mut surface));
        }
        assert!(!surface.has_ink());
    }

    #[test]
    fn strokes_do_not_connect() {
        let mut pen = PenTool::default();
        let mut surface = Surface::new(100, 100);
        pen.begin_stroke(Point::new(10.0, 10.0));
        pen.extend_stroke(Point::new(20.0, 10.0), &mut surface);
        pen.end_stroke();
        pen.begin_stroke(Point::new(80.0, 80.0));
        pen.extend_stroke(Point::new(90.0, 80.0), &mut surface);
        pen.end_stroke();

        // Nothing drawn along the diagonal between the two strokes.
        assert_eq!(surface.alpha(50, 45), 0);
        let bbox = detect_bounding_box(&surface).unwrap();
        assert!(bbox.min_x <= 10 && bbox.max_x >= 90);
    }
}
