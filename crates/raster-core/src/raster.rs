//! Owned RGB pixel buffers decoded from image files

use crate::{Result, ViewerError};
use image::{ImageReader, RgbImage};
use log::debug;
use std::path::Path;

/// In-memory 24-bit RGB raster
///
/// Pixels are stored row-major as RGB triples. A raster is either empty (0x0)
/// or holds exactly `width * height` pixels; filters mutate it in place and
/// never change its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    buffer: RgbImage,
}

impl Default for Raster {
    fn default() -> Self {
        Self::empty()
    }
}

impl Raster {
    /// Create an empty 0x0 raster
    pub fn empty() -> Self {
        Self {
            buffer: RgbImage::new(0, 0),
        }
    }

    /// Decode an image file into an RGB raster
    ///
    /// The format is guessed from the file contents. Alpha channels are
    /// dropped and higher bit depths are narrowed to 8 bits per channel.
    ///
    /// # Arguments
    /// * `path` - Path to a single-frame image file (TIFF in the viewer)
    pub fn decode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decode_error = |reason: String| ViewerError::DecodeError {
            path: path.display().to_string(),
            reason,
        };

        let reader = ImageReader::open(path)
            .map_err(|e| decode_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_error(e.to_string()))?;
        let image = reader.decode().map_err(|e| decode_error(e.to_string()))?;
        let buffer = image.to_rgb8();

        debug!(
            "decoded {} as {}x{} RGB",
            path.display(),
            buffer.width(),
            buffer.height()
        );

        Ok(Self { buffer })
    }

    /// Build a raster from raw row-major RGB bytes
    ///
    /// Fails with `InvalidDimensions` unless `data.len() == width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        let expected = width as usize * height as usize * 3;
        if len != expected {
            return Err(ViewerError::InvalidDimensions { width, height, len });
        }
        let buffer = RgbImage::from_raw(width, height, data)
            .ok_or(ViewerError::InvalidDimensions { width, height, len })?;
        Ok(Self { buffer })
    }

    /// Build a raster where every pixel has the same color
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, image::Rgb(rgb)),
        }
    }

    /// Encode the raster to disk, choosing the format from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.buffer
            .save(path)
            .map_err(|e| ViewerError::EncodeError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Raster height in pixels
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// True when the raster holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// RGB triple at (x, y), or `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.buffer.get_pixel(x, y).0)
    }

    /// Iterate over all RGB triples in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.buffer.pixels().map(|p| p.0)
    }

    /// Raw row-major RGB bytes
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Borrow the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }
}
