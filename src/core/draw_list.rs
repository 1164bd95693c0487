use super::surface::DrawingSurface;
use crate::math::{Color, Point2D, Rectangle};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetColor(Color),
    Line { from: Point2D, to: Point2D },
    Point(Point2D),
    FillRect { rect: Rectangle, color: Color },
    StrokeRect(Rectangle),
}

impl DrawOp {
    /// True for calls that put fractal geometry on the surface
    pub fn is_geometry(&self) -> bool {
        matches!(self, DrawOp::Line { .. } | DrawOp::Point(_))
    }
}

/// Surface that records calls instead of rasterizing them.
///
/// Useful for inspecting exactly what a renderer emitted, and for
/// replaying the same picture onto several targets.
#[derive(Debug, Clone)]
pub struct DrawList {
    ops: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            ops: Vec::new(),
            width,
            height,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of line and point calls
    pub fn geometry_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_geometry()).count()
    }

    /// Issue every recorded call, in order, against `target`
    pub fn replay(&self, target: &mut dyn DrawingSurface) {
        for op in &self.ops {
            match op {
                DrawOp::SetColor(color) => target.set_color(*color),
                DrawOp::Line { from, to } => target.draw_line(*from, *to),
                DrawOp::Point(p) => target.draw_point(*p),
                DrawOp::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawOp::StrokeRect(rect) => target.stroke_rect(*rect),
            }
        }
    }
}

impl DrawingSurface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetColor(color));
    }

    fn draw_line(&mut self, a: Point2D, b: Point2D) {
        self.ops.push(DrawOp::Line { from: a, to: b });
    }

    fn draw_point(&mut self, p: Point2D) {
        self.ops.push(DrawOp::Point(p));
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        self.ops.push(DrawOp::StrokeRect(rect));
    }
}
