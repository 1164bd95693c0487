//! Render parameters, their defaults, and JSON config loading.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fractals::mandelbrot::MAX_ITERATIONS_DEFAULT;
use crate::fractals::{Grid, PixelRounding, RecursionDepth, MAX_COLORS_DEFAULT};

/// Side of the square painted per Mandelbrot sample, in pixels
pub const MAP_AREA_DEFAULT: u32 = 2;

/// Independent snowflake drawing toggles. With both `lines` and `dots`
/// off nothing but the background is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFlags {
    pub lines: bool,
    pub dots: bool,
    pub bounding_rect: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            lines: true,
            dots: false,
            bounding_rect: false,
        }
    }
}

impl RenderFlags {
    /// True when the curve itself will be drawn
    pub fn draws_geometry(&self) -> bool {
        self.lines || self.dots
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowflakeParams {
    pub width: u32,
    pub height: u32,
    pub depth: RecursionDepth,
    pub flags: RenderFlags,
    pub rounding: PixelRounding,
}

impl Default for SnowflakeParams {
    fn default() -> Self {
        Self {
            width: 500,
            height: 600,
            depth: RecursionDepth::DEFAULT,
            flags: RenderFlags::default(),
            rounding: PixelRounding::Deferred,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandelbrotParams {
    /// Image is square, `width` pixels on a side
    pub width: u32,
    pub grid: Grid,
    pub max_iterations: u32,
    pub max_colors: u32,
    pub map_area: u32,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            width: 400,
            grid: Grid::default(),
            max_iterations: MAX_ITERATIONS_DEFAULT,
            max_colors: MAX_COLORS_DEFAULT,
            map_area: MAP_AREA_DEFAULT,
        }
    }
}

impl MandelbrotParams {
    /// Replace unusable values with working ones
    pub fn sanitized(self) -> Self {
        let mut params = self;
        params.grid = params.grid.sanitized();
        if params.max_iterations == 0 {
            warn!("max_iterations must be at least 1");
            params.max_iterations = 1;
        }
        if params.map_area == 0 {
            warn!("map_area must be at least 1");
            params.map_area = 1;
        }
        params
    }
}

/// Top-level config file shape; every section and field is optional
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub snowflake: SnowflakeParams,
    pub mandelbrot: MandelbrotParams,
}

impl RenderConfig {
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }
}
