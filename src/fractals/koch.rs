//! Koch curve subdivision.
//!
//! A segment is split into thirds and the middle third is replaced by the two
//! sides of an equilateral bump. The bump is produced by rotating the
//! one-third vector by −60° in screen coordinates (y grows downward), so a
//! left-to-right segment bumps *upward* and a clockwise-wound triangle grows
//! outward-pointing spikes.

use std::ops::ControlFlow;

use glam::DVec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::math::{Point2D, Segment};

pub const DEPTH_DEFAULT: u32 = 4;
/// Anything past ~8 is visually identical and costs 4x per level
pub const DEPTH_MAX: u32 = 12;

const COS60: f64 = 0.5;
const SIN60: f64 = 0.866_025_403_784_438_6;

/// Recursion depth, always within `0..=DEPTH_MAX`
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "u32")]
pub struct RecursionDepth(u32);

impl RecursionDepth {
    pub const DEFAULT: RecursionDepth = RecursionDepth(DEPTH_DEFAULT);
    pub const MAX: RecursionDepth = RecursionDepth(DEPTH_MAX);

    /// Clamp any integer into range
    pub fn new(depth: i64) -> Self {
        let clamped = depth.clamp(0, DEPTH_MAX as i64) as u32;
        if clamped as i64 != depth {
            warn!("Depth {} out of range, clamped to {}", depth, clamped);
        }
        Self(clamped)
    }

    /// Parse user text. Non-numeric input falls back to the default depth;
    /// numbers are clamped.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<i64>() {
            Ok(depth) => Self::new(depth),
            Err(_) => {
                warn!("Depth {:?} is not a number, using {}", text, DEPTH_DEFAULT);
                Self::DEFAULT
            }
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Leaf segments produced per generated edge: 4^depth
    pub fn segments_per_edge(self) -> u64 {
        4u64.pow(self.0)
    }
}

impl Default for RecursionDepth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<RecursionDepth> for u32 {
    fn from(depth: RecursionDepth) -> u32 {
        depth.0
    }
}

impl From<serde_json::Value> for RecursionDepth {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(depth) => Self::new(depth),
                None => Self::new(n.as_f64().map_or(DEPTH_DEFAULT as i64, |f| f as i64)),
            },
            serde_json::Value::String(s) => Self::parse(&s),
            other => {
                warn!("Depth {} is not a number, using {}", other, DEPTH_DEFAULT);
                Self::DEFAULT
            }
        }
    }
}

/// How intermediate points snap to the pixel grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelRounding {
    /// Full precision throughout; the renderer rounds once when drawing
    #[default]
    Deferred,
    /// Truncate toward zero at every subdivision step. Rounding error
    /// accumulates, so high depths visibly drift from `Deferred`.
    Truncated,
}

impl PixelRounding {
    fn apply(self, v: DVec2) -> DVec2 {
        match self {
            PixelRounding::Deferred => v,
            PixelRounding::Truncated => v.trunc(),
        }
    }
}

/// Split `a→b` into the five points of one Koch step: a, pa, tip, pb, b
fn subdivide(a: Point2D, b: Point2D, rounding: PixelRounding) -> [Point2D; 5] {
    let d = rounding.apply((b - a) / 3.0);
    let pa = a + d;
    let pb = b - d;
    let bump = rounding.apply(DVec2::new(
        d.x * COS60 + d.y * SIN60,
        d.y * COS60 - d.x * SIN60,
    ));
    [a, pa, pa + bump, pb, b]
}

/// Visit every leaf segment of the curve from `a` to `b`, left to right.
///
/// Uses an explicit stack, so memory stays at O(depth) regardless of how
/// many leaves are produced. A zero-length input is emitted as a single
/// leaf without subdividing. Returning `Break` from `visit` stops the walk.
pub fn try_for_each_segment<F>(
    a: Point2D,
    b: Point2D,
    depth: RecursionDepth,
    rounding: PixelRounding,
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(Segment) -> ControlFlow<()>,
{
    let mut stack: Vec<(Point2D, Point2D, u32)> = Vec::with_capacity(3 * depth.get() as usize + 1);
    stack.push((a, b, depth.get()));

    while let Some((a, b, level)) = stack.pop() {
        let seg = Segment::new(a, b);
        if level == 0 || seg.is_degenerate() {
            visit(seg)?;
            continue;
        }

        let p = subdivide(a, b, rounding);
        // Reverse push so (a, pa) is popped first
        for k in (0..4).rev() {
            stack.push((p[k], p[k + 1], level - 1));
        }
    }

    ControlFlow::Continue(())
}

/// Infallible variant of [`try_for_each_segment`]
pub fn for_each_segment<F>(a: Point2D, b: Point2D, depth: RecursionDepth, rounding: PixelRounding, mut visit: F)
where
    F: FnMut(Segment),
{
    let _ = try_for_each_segment(a, b, depth, rounding, |seg| {
        visit(seg);
        ControlFlow::Continue(())
    });
}

/// Materialize the whole curve. At `DEPTH_MAX` this is ~16.7M segments;
/// prefer [`for_each_segment`] when drawing.
pub fn generate(a: Point2D, b: Point2D, depth: RecursionDepth, rounding: PixelRounding) -> Vec<Segment> {
    let mut out = Vec::with_capacity(depth.segments_per_edge() as usize);
    for_each_segment(a, b, depth, rounding, |seg| out.push(seg));
    out
}
