use crate::math::{Color, Point2D, Rectangle};

/// Drawing primitives the renderers emit.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
/// Implementations clip anything that falls outside their bounds; callers
/// never need to pre-clip.
pub trait DrawingSurface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Set the colour used by `draw_line`, `draw_point` and `stroke_rect`
    fn set_color(&mut self, color: Color);

    /// Line between two points, both endpoints inclusive
    fn draw_line(&mut self, a: Point2D, b: Point2D);

    /// Single-pixel marker
    fn draw_point(&mut self, p: Point2D);

    /// Fill every pixel of `rect` with `color`. Does not change the current colour.
    fn fill_rect(&mut self, rect: Rectangle, color: Color);

    /// One-pixel outline around the pixels covered by `rect`
    fn stroke_rect(&mut self, rect: Rectangle);
}
