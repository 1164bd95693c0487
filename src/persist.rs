//! Writing finished rasters to disk.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::info;

use crate::core::Canvas;
use crate::error::{Error, Result};

/// Destination for finished rasters
pub trait ImageSink {
    fn persist(&self, canvas: &Canvas, path: &Path) -> Result<()>;
}

/// Lossless PNG output through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    fn to_image(canvas: &Canvas) -> Result<RgbaImage> {
        let (width, height) = canvas.dimensions();
        RgbaImage::from_raw(width, height, canvas.pixels().to_vec()).ok_or(Error::BufferSize { width, height })
    }
}

impl ImageSink for PngWriter {
    fn persist(&self, canvas: &Canvas, path: &Path) -> Result<()> {
        let image = Self::to_image(canvas)?;
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| Error::Persistence {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
        Ok(())
    }
}
