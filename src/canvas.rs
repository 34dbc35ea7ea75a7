//! Drawing surface boundary.
//!
//! The engine never rasterizes anything itself. Shape drawers talk to a
//! [`Canvas`], which the host implements on top of whatever it renders with.
//! [`HeadlessCanvas`] records calls instead of drawing; tests and the demo
//! binary use it.

use crate::options::Color;
use crate::utils::Dimension;
use glam::Vec2;

/// Primitive drawing operations a host surface provides.
pub trait Canvas {
    /// Current surface size.
    fn dimension(&self) -> Dimension;

    /// Resize the surface.
    fn resize(&mut self, dimension: Dimension);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32);

    /// Fill an axis-aligned rectangle given its top-left corner.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, opacity: f32);
}

/// One recorded [`HeadlessCanvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle { center: Vec2, radius: f32 },
    Rect { origin: Vec2, size: Vec2 },
}

/// Canvas that records draw calls instead of rendering them.
#[derive(Debug)]
pub struct HeadlessCanvas {
    dimension: Dimension,
    calls: Vec<DrawCall>,
    record: bool,
    frames: u64,
    shapes_drawn: u64,
}

impl HeadlessCanvas {
    /// Canvas that only counts frames and shapes.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            calls: Vec::new(),
            record: false,
            frames: 0,
            shapes_drawn: 0,
        }
    }

    /// Canvas that also keeps the calls of the most recent frame.
    pub fn recording(dimension: Dimension) -> Self {
        Self {
            record: true,
            ..Self::new(dimension)
        }
    }

    /// Calls made since the last `clear`.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of `clear` calls, one per rendered frame.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Shapes filled since creation.
    pub fn shapes_drawn(&self) -> u64 {
        self.shapes_drawn
    }

    fn push(&mut self, call: DrawCall) {
        if self.record {
            self.calls.push(call);
        }
    }
}

impl Canvas for HeadlessCanvas {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn resize(&mut self, dimension: Dimension) {
        self.dimension = dimension;
    }

    fn clear(&mut self) {
        self.frames += 1;
        self.calls.clear();
        self.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color, _opacity: f32) {
        self.shapes_drawn += 1;
        self.push(DrawCall::Circle { center, radius });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, _color: Color, _opacity: f32) {
        self.shapes_drawn += 1;
        self.push(DrawCall::Rect { origin, size });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_last_frame() {
        let mut canvas = HeadlessCanvas::recording(Dimension::new(10.0, 10.0));
        canvas.clear();
        canvas.fill_circle(Vec2::ONE, 2.0, Color::WHITE, 1.0);
        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE, 1.0);

        assert_eq!(canvas.frames(), 2);
        assert_eq!(canvas.shapes_drawn(), 2);
        assert_eq!(
            canvas.calls(),
            &[
                DrawCall::Clear,
                DrawCall::Rect { origin: Vec2::ZERO, size: Vec2::ONE }
            ]
        );
    }

    #[test]
    fn test_counting_canvas_records_nothing() {
        let mut canvas = HeadlessCanvas::new(Dimension::new(10.0, 10.0));
        canvas.clear();
        canvas.fill_circle(Vec2::ONE, 2.0, Color::WHITE, 1.0);
        assert!(canvas.calls().is_empty());
        assert_eq!(canvas.shapes_drawn(), 1);
    }
}
