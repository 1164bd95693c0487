// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{MandelbrotParams, SnowflakeParams};
use crate::fractals::{PixelRounding, RecursionDepth};
use crate::render::FractalKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "fractal-raster")]
#[command(about = "Koch snowflake and Mandelbrot set rasterizer", long_about = None)]
pub struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Cancel the render after this many seconds
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    /// Print a JSON summary of the render to stdout
    #[arg(long, global = true, default_value = "false")]
    pub summary: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Draw a Koch snowflake
    Snowflake(SnowflakeArgs),
    /// Draw the Mandelbrot set
    Mandelbrot(MandelbrotArgs),
}

impl Command {
    pub fn kind(&self) -> FractalKind {
        match self {
            Command::Snowflake(_) => FractalKind::Snowflake,
            Command::Mandelbrot(_) => FractalKind::Mandelbrot,
        }
    }

    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Command::Snowflake(args) => args.output.as_ref(),
            Command::Mandelbrot(args) => args.output.as_ref(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SnowflakeArgs {
    /// Recursion depth 0-12; anything non-numeric means 4
    #[arg(long, allow_hyphen_values = true)]
    pub depth: Option<String>,

    /// Skip the curve lines
    #[arg(long = "no-lines", default_value = "false")]
    pub no_lines: bool,

    /// Mark each segment start with a dot
    #[arg(long, default_value = "false")]
    pub dots: bool,

    /// Outline the box the snowflake occupies
    #[arg(long = "bounding-rect", default_value = "false")]
    pub bounding_rect: bool,

    /// Truncate to whole pixels at every subdivision step
    #[arg(long, default_value = "false")]
    pub truncate: bool,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// PNG file to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl SnowflakeArgs {
    /// Overlay the given flags onto `params`
    pub fn apply(&self, params: &mut SnowflakeParams) {
        if let Some(depth) = &self.depth {
            params.depth = RecursionDepth::parse(depth);
        }
        if self.no_lines {
            params.flags.lines = false;
        }
        if self.dots {
            params.flags.dots = true;
        }
        if self.bounding_rect {
            params.flags.bounding_rect = true;
        }
        if self.truncate {
            params.rounding = PixelRounding::Truncated;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MandelbrotArgs {
    #[arg(long = "re-min", allow_hyphen_values = true)]
    pub re_min: Option<f64>,

    #[arg(long = "re-max", allow_hyphen_values = true)]
    pub re_max: Option<f64>,

    #[arg(long = "im-min", allow_hyphen_values = true)]
    pub im_min: Option<f64>,

    #[arg(long = "im-max", allow_hyphen_values = true)]
    pub im_max: Option<f64>,

    /// Lattice spacing in the complex plane
    #[arg(long)]
    pub step: Option<f64>,

    /// Iteration cap; points still bounded here count as inside the set
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<u32>,

    #[arg(long = "max-colors")]
    pub max_colors: Option<u32>,

    /// Image side in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// PNG file to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl MandelbrotArgs {
    /// Overlay the given flags onto `params`
    pub fn apply(&self, params: &mut MandelbrotParams) {
        let grid = &mut params.grid;
        for (arg, field) in [
            (self.re_min, &mut grid.re_min),
            (self.re_max, &mut grid.re_max),
            (self.im_min, &mut grid.im_min),
            (self.im_max, &mut grid.im_max),
            (self.step, &mut grid.step),
        ] {
            if let Some(value) = arg {
                *field = value;
            }
        }
        if let Some(max_iterations) = self.max_iterations {
            params.max_iterations = max_iterations;
        }
        if let Some(max_colors) = self.max_colors {
            params.max_colors = max_colors;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
    }
}

/// `<fractal>-<unix seconds>.png` in the working directory
pub fn default_output_path(kind: FractalKind, now: chrono::DateTime<chrono::Utc>) -> PathBuf {
    PathBuf::from(format!("{}-{}.png", kind.name(), now.timestamp()))
}
