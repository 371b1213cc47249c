//! Renderable handles derived from rasters
//!
//! The presentation layer owns the actual drawing surface. It plugs into the
//! core through [`TextureFactory`], which turns a [`Raster`] into whatever
//! handle that surface draws (a GPU texture, a window-system image, ...).

use crate::{DisplaySize, Raster, Result, ViewerError};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::Path;

/// Creates renderable handles from rasters
pub trait TextureFactory {
    /// Handle type drawn by the presentation layer
    type Texture;

    /// Build a handle holding the current contents of `raster`
    fn create_texture(&mut self, raster: &Raster) -> Result<Self::Texture>;
}

/// A renderable handle together with the size it should be drawn at
#[derive(Debug)]
pub struct DisplayHandle<'a, T> {
    pub texture: &'a T,
    pub size: DisplaySize,
}

/// CPU-side texture: an owned RGB snapshot of a raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTexture {
    image: RgbImage,
}

impl CpuTexture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Resample the snapshot to a display size (rounded to whole pixels, at least 1x1)
    pub fn resized(&self, size: DisplaySize) -> RgbImage {
        let width = (size.width.round() as u32).max(1);
        let height = (size.height.round() as u32).max(1);
        imageops::resize(&self.image, width, height, FilterType::Triangle)
    }

    /// Write the snapshot to disk, resampled to `size`
    pub fn save_resized<P: AsRef<Path>>(&self, path: P, size: DisplaySize) -> Result<()> {
        let path = path.as_ref();
        self.resized(size)
            .save(path)
            .map_err(|e| ViewerError::EncodeError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

/// Factory producing [`CpuTexture`] snapshots, for headless shells and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuTextureFactory;

impl TextureFactory for CpuTextureFactory {
    type Texture = CpuTexture;

    fn create_texture(&mut self, raster: &Raster) -> Result<CpuTexture> {
        if raster.is_empty() {
            return Err(ViewerError::TextureError(
                "cannot create a texture from an empty raster".to_string(),
            ));
        }
        Ok(CpuTexture {
            image: raster.as_image().clone(),
        })
    }
}
