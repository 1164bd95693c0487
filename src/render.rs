//! Turns fractal geometry and samples into draw calls.
//!
//! `draw_*` target any [`DrawingSurface`]; `render_*` are the pure
//! parameters-in, raster-out entry points built on top of them.

use std::ops::ControlFlow;
use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use crate::config::{MandelbrotParams, SnowflakeParams};
use crate::core::{CancelToken, Canvas, DrawingSurface};
use crate::fractals::{color_for, snowflake, PixelRounding, SnowflakeLayout};
use crate::math::{Color, Rectangle};

/// Leaves drawn between cancellation checks
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Strips handed to each rayon worker per band
const STRIPS_PER_THREAD: usize = 4;

pub const BACKGROUND: Color = Color::WHITE;
pub const CURVE_COLOR: Color = Color::BLACK;
pub const BOUNDING_RECT_COLOR: Color = Color::GRAY;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FractalKind {
    Snowflake,
    Mandelbrot,
}

impl FractalKind {
    pub fn name(self) -> &'static str {
        match self {
            FractalKind::Snowflake => "snowflake",
            FractalKind::Mandelbrot => "mandelbrot",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderOutcome {
    Complete,
    /// Stopped by the cancel token; everything drawn so far is intact
    Cancelled,
}

/// What a draw pass emitted
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    /// Leaf segments (snowflake) or lattice samples (Mandelbrot) drawn
    pub primitives: u64,
    pub escaped: u64,
    pub bounded: u64,
    pub cancelled: bool,
}

impl DrawStats {
    pub fn outcome(&self) -> RenderOutcome {
        if self.cancelled {
            RenderOutcome::Cancelled
        } else {
            RenderOutcome::Complete
        }
    }
}

/// Serializable report of one render
#[derive(Clone, Debug, Serialize)]
pub struct RenderSummary {
    pub fractal: FractalKind,
    pub width: u32,
    pub height: u32,
    pub primitives: u64,
    pub escaped: u64,
    pub bounded: u64,
    pub outcome: RenderOutcome,
    pub elapsed_ms: u64,
}

/// Finished raster plus its report
pub struct Rendered {
    pub canvas: Canvas,
    pub summary: RenderSummary,
}

/// Draw a Koch snowflake into `bounds`.
///
/// Always clears `bounds` to white first. Viewports under 2px on a side
/// and flag sets with neither lines nor dots stop right after the clear.
/// Lines and dots are drawn in black per leaf segment; a dot marks the
/// segment's start.
pub fn draw_snowflake<S>(surface: &mut S, bounds: Rectangle, params: &SnowflakeParams, cancel: &CancelToken) -> DrawStats
where
    S: DrawingSurface + ?Sized,
{
    let mut stats = DrawStats::default();
    surface.fill_rect(bounds, BACKGROUND);

    let Some(layout) = snowflake::layout(bounds) else {
        debug!("Viewport {:?} too small for a snowflake", bounds);
        return stats;
    };
    let flags = params.flags;
    if !flags.draws_geometry() {
        debug!("Lines and dots both off, nothing to draw");
        return stats;
    }

    if flags.bounding_rect {
        surface.set_color(BOUNDING_RECT_COLOR);
        surface.stroke_rect(layout.bounding_rect());
    }

    surface.set_color(CURVE_COLOR);
    let flow = layout.try_for_each_segment(params.depth, params.rounding, |seg| {
        if stats.primitives % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        let seg = match params.rounding {
            PixelRounding::Deferred => seg.rounded(),
            PixelRounding::Truncated => seg,
        };
        if flags.lines {
            surface.draw_line(seg.start, seg.end);
        }
        if flags.dots {
            surface.draw_point(seg.start);
        }
        stats.primitives += 1;
        ControlFlow::Continue(())
    });

    stats.cancelled = flow.is_break();
    stats
}

/// Draw the Mandelbrot set over the whole surface.
///
/// Each sample paints a `map_area`-sized square at
/// `coord * (width / 2) + width / 2` on both axes, so the ±2 range spans
/// the image width. Strips are computed in parallel but drawn in lattice
/// order, giving the same picture as a sequential pass.
pub fn draw_mandelbrot<S>(surface: &mut S, params: &MandelbrotParams, cancel: &CancelToken) -> DrawStats
where
    S: DrawingSurface + ?Sized,
{
    let params = params.sanitized();
    let grid = params.grid;
    let (width, height) = surface.size();
    surface.fill_rect(Rectangle::from_size(width, height), BACKGROUND);

    let ratio = (width / 2) as f64;
    let to_pixel = |v: f64| (v * ratio + ratio) as i32;
    let band = rayon::current_num_threads() * STRIPS_PER_THREAD;

    let mut stats = DrawStats::default();
    let completed = grid.sample_par(params.max_iterations, band, cancel, |i, strip| {
        let left = to_pixel(grid.re_at(i));
        for (j, result) in strip.iter().enumerate() {
            let top = to_pixel(grid.im_at(j));
            let square = Rectangle::new(left, top, params.map_area, params.map_area);
            surface.fill_rect(square, color_for(*result, params.max_colors));

            if result.is_bounded() {
                stats.bounded += 1;
            } else {
                stats.escaped += 1;
            }
        }
        stats.primitives += strip.len() as u64;
    });

    stats.cancelled = !completed;
    stats
}

/// Render a snowflake onto a fresh `width`x`height` canvas
pub fn render_snowflake(params: &SnowflakeParams, cancel: &CancelToken) -> Rendered {
    let started = Instant::now();
    info!(
        "Rendering snowflake {}x{} at depth {} ({} segments)",
        params.width,
        params.height,
        params.depth.get(),
        SnowflakeLayout::segment_count(params.depth)
    );

    let mut canvas = Canvas::new(params.width, params.height);
    let stats = draw_snowflake(
        &mut canvas,
        Rectangle::from_size(params.width, params.height),
        params,
        cancel,
    );

    finish(FractalKind::Snowflake, canvas, stats, started)
}

/// Render the Mandelbrot set onto a fresh square canvas
pub fn render_mandelbrot(params: &MandelbrotParams, cancel: &CancelToken) -> Rendered {
    let started = Instant::now();
    info!(
        "Rendering Mandelbrot {}x{}, {} samples, cap {}",
        params.width,
        params.width,
        params.grid.sanitized().sample_count(),
        params.max_iterations
    );

    let mut canvas = Canvas::new(params.width, params.width);
    let stats = draw_mandelbrot(&mut canvas, params, cancel);

    finish(FractalKind::Mandelbrot, canvas, stats, started)
}

fn finish(fractal: FractalKind, canvas: Canvas, stats: DrawStats, started: Instant) -> Rendered {
    let (width, height) = canvas.dimensions();
    let summary = RenderSummary {
        fractal,
        width,
        height,
        primitives: stats.primitives,
        escaped: stats.escaped,
        bounded: stats.bounded,
        outcome: stats.outcome(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "{} render {:?}: {} primitives in {} ms",
        fractal.name(),
        summary.outcome,
        summary.primitives,
        summary.elapsed_ms
    );

    Rendered { canvas, summary }
}
