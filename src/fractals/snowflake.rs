//! Snowflake layout: the largest apex-down equilateral triangle whose
//! finished snowflake fits a viewport, plus the three-edge traversal.

use std::ops::ControlFlow;

use glam::DVec2;
use log::debug;

use super::koch::{self, PixelRounding, RecursionDepth};
use crate::math::{Point2D, Rectangle, Segment};

/// Height-to-width ratio of a finished snowflake (2√3/3)
const HEIGHT_PER_WIDTH: f64 = 1.154_700_538_379_251_5;

/// Smallest viewport edge worth drawing into
pub const MIN_EXTENT: u32 = 2;

/// Triangle vertices and the box the finished snowflake occupies.
///
/// ```text
///  p1 _______ p2
///     \     /
///      \   /
///       \ /
///        v p3
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnowflakeLayout {
    pub p1: Point2D,
    pub p2: Point2D,
    pub p3: Point2D,
    /// Snowflake width (equals the triangle side)
    pub width: f64,
    /// Snowflake height including the upper spikes
    pub height: f64,
    /// Viewport the layout was computed for
    pub bounds: Rectangle,
}

/// Snowflake width and height for a `bw`x`bh` box
fn fit(bw: f64, bh: f64, height_limited: bool) -> (f64, f64) {
    if height_limited {
        (bh / HEIGHT_PER_WIDTH, bh)
    } else {
        (bw, bw * HEIGHT_PER_WIDTH)
    }
}

/// Fit the snowflake into `bounds`, centred. Returns `None` when either
/// dimension is below [`MIN_EXTENT`].
pub fn layout(bounds: Rectangle) -> Option<SnowflakeLayout> {
    if bounds.width < MIN_EXTENT || bounds.height < MIN_EXTENT {
        return None;
    }

    let bw = bounds.width as f64;
    let bh = bounds.height as f64;
    let (w, h) = fit(bw, bh, bh < bw * HEIGHT_PER_WIDTH);

    let x = bounds.x as f64;
    let y = bounds.y as f64;
    let top = y + (bh - h) * 0.5 + h * 0.25;

    let layout = SnowflakeLayout {
        p1: DVec2::new(x + (bw - w) * 0.5, top),
        p2: DVec2::new(x + (bw + w) * 0.5, top),
        p3: DVec2::new(x + bw * 0.5, y + (bh + h) * 0.5),
        width: w,
        height: h,
        bounds,
    };
    debug!("Snowflake layout in {:?}: {:.1}x{:.1}", bounds, w, h);
    Some(layout)
}

impl SnowflakeLayout {
    /// Edges in drawing order: top, right, left
    pub fn edges(&self) -> [(Point2D, Point2D); 3] {
        [(self.p1, self.p2), (self.p2, self.p3), (self.p3, self.p1)]
    }

    /// Integer-pixel layout: the height test uses the truncated
    /// `width·k`, and each offset is truncated before the origin is added.
    pub fn truncated(&self) -> Self {
        let b = self.bounds;
        let bw = b.width as f64;
        let bh = b.height as f64;
        let (w, h) = fit(bw, bh, (b.height as i64) < (bw * HEIGHT_PER_WIDTH) as i64);

        let x = b.x as f64;
        let y = b.y as f64;
        let top = y + ((bh - h) * 0.5 + h * 0.25).trunc();
        Self {
            p1: DVec2::new(x + ((bw - w) * 0.5).trunc(), top),
            p2: DVec2::new(x + ((bw + w) * 0.5).trunc(), top),
            p3: DVec2::new(x + (b.width / 2) as f64, y + ((bh + h) * 0.5).trunc()),
            width: w,
            height: h,
            bounds: b,
        }
    }

    /// Pixel box around the finished snowflake
    pub fn bounding_rect(&self) -> Rectangle {
        let b = self.bounds;
        Rectangle::new(
            b.x + ((b.width as f64 - self.width) * 0.5) as i32,
            b.y + ((b.height as f64 - self.height) * 0.5) as i32,
            self.width as u32,
            self.height as u32,
        )
    }

    /// Leaf segments per snowflake at `depth`
    pub fn segment_count(depth: RecursionDepth) -> u64 {
        3 * depth.segments_per_edge()
    }

    /// Walk all three edges in order, stopping early on `Break`
    pub fn try_for_each_segment<F>(&self, depth: RecursionDepth, rounding: PixelRounding, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(Segment) -> ControlFlow<()>,
    {
        let vertices = match rounding {
            PixelRounding::Deferred => *self,
            PixelRounding::Truncated => self.truncated(),
        };
        for (a, b) in vertices.edges() {
            koch::try_for_each_segment(a, b, depth, rounding, &mut visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Materialize every leaf segment of the closed outline
    pub fn segments(&self, depth: RecursionDepth, rounding: PixelRounding) -> Vec<Segment> {
        let mut out = Vec::with_capacity(Self::segment_count(depth) as usize);
        let _ = self.try_for_each_segment(depth, rounding, |seg| {
            out.push(seg);
            ControlFlow::Continue(())
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_too_small() {
        assert!(layout(Rectangle::from_size(1, 500)).is_none());
        assert!(layout(Rectangle::from_size(500, 1)).is_none());
        assert!(layout(Rectangle::from_size(0, 0)).is_none());
        assert!(layout(Rectangle::from_size(2, 2)).is_some());
    }

    #[test]
    fn test_layout_width_limited() {
        let l = layout(Rectangle::from_size(500, 600)).unwrap();
        assert_eq!(l.width, 500.0);
        assert!((l.height - 577.350_269).abs() < 1e-5);
        assert_eq!(l.p1.x, 0.0);
        assert_eq!(l.p2.x, 500.0);
        assert_eq!(l.p3.x, 250.0);
        assert_eq!(l.p1.y, l.p2.y);
    }

    #[test]
    fn test_layout_height_limited() {
        let l = layout(Rectangle::new(10, 20, 800, 300)).unwrap();
        assert_eq!(l.height, 300.0);
        assert!((l.width - 259.807_621).abs() < 1e-5);
        // centred horizontally
        assert!(((l.p1.x + l.p2.x) * 0.5 - 410.0).abs() < 1e-9);
        assert_eq!(l.p3.x, 410.0);
        // apex at the bottom of the box, top edge a quarter down
        assert!((l.p3.y - 320.0).abs() < 1e-9);
        assert!((l.p1.y - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_equilateral() {
        let l = layout(Rectangle::from_size(640, 480)).unwrap();
        let s1 = l.p1.distance(l.p2);
        let s2 = l.p2.distance(l.p3);
        let s3 = l.p3.distance(l.p1);
        assert!((s1 - s2).abs() < 1e-9);
        assert!((s2 - s3).abs() < 1e-9);
        assert!((s1 - l.width).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_rect_centred() {
        let l = layout(Rectangle::from_size(500, 600)).unwrap();
        assert_eq!(l.bounding_rect(), Rectangle::new(0, 11, 500, 577));
    }

    #[test]
    fn test_segment_count_three_edges() {
        let l = layout(Rectangle::from_size(300, 300)).unwrap();
        for d in 0..5 {
            let depth = RecursionDepth::new(d);
            assert_eq!(l.segments(depth, PixelRounding::Deferred).len() as u64, 3 * 4u64.pow(d as u32));
        }
    }

    #[test]
    fn test_count_independent_of_scale() {
        let depth = RecursionDepth::new(4);
        let small = layout(Rectangle::from_size(40, 40)).unwrap();
        let large = layout(Rectangle::new(-300, 900, 4000, 2500)).unwrap();
        assert_eq!(
            small.segments(depth, PixelRounding::Deferred).len(),
            large.segments(depth, PixelRounding::Deferred).len()
        );
    }

    #[test]
    fn test_spikes_point_outward() {
        let l = layout(Rectangle::from_size(600, 700)).unwrap();
        let segs = l.segments(RecursionDepth::new(1), PixelRounding::Deferred);
        // tip of the top edge's bump sits above the top edge
        assert!(segs[1].end.y < l.p1.y);
        // every point stays inside the bounding box
        let r = l.bounding_rect();
        for seg in &segs {
            assert!(seg.start.y >= r.y as f64 - 1.0);
            assert!(seg.start.y <= (r.y + r.height as i32) as f64 + 1.0);
        }
    }

    #[test]
    fn test_truncated_offsets_before_negative_origin() {
        let t = layout(Rectangle::new(-10, -200, 500, 600)).unwrap().truncated();
        assert_eq!(t.p1, DVec2::new(-10.0, -45.0));
        assert_eq!(t.p2, DVec2::new(490.0, -45.0));
        assert_eq!(t.p3, DVec2::new(240.0, 388.0));
    }

    #[test]
    fn test_truncated_height_test_uses_integer_width() {
        // 346 == (int)(300·k): width still limits in the integer layout
        let l = layout(Rectangle::from_size(300, 346)).unwrap();
        assert_eq!(l.height, 346.0);
        let t = l.truncated();
        assert_eq!(t.width, 300.0);
        assert_eq!(t.p1.x, 0.0);
        assert_eq!(t.p2.x, 300.0);
    }

    #[test]
    fn test_outline_is_closed() {
        let l = layout(Rectangle::from_size(300, 300)).unwrap();
        let segs = l.segments(RecursionDepth::new(2), PixelRounding::Deferred);
        assert_eq!(segs.first().unwrap().start, l.p1);
        assert!((segs.last().unwrap().end - l.p1).length() < 1e-9);
    }
}
