//! Raster Core - in-memory RGB rasters and the pixel filters applied to them
//!
//! This crate provides functionality for:
//! - Decoding a single-frame image file (TIFF, PNG) into a 24-bit RGB raster
//! - In-place pixel filters: grayscale, brightness, ordered dithering, auto tone
//! - Fitting a raster into a bounded display region while preserving aspect ratio
//! - An image entity that owns a raster plus its lazily created display handle
//!
//! # Example
//!
//! ```ignore
//! use raster_core::{CpuTextureFactory, DisplaySize, FitMode, ImageEntity};
//!
//! let mut entity = ImageEntity::open("scan.tif")?;
//! entity.grayscale().brightness(0.5);
//!
//! let mut factory = CpuTextureFactory;
//! let bounds = DisplaySize::new(700.0, 700.0);
//! if let Some(handle) = entity.get_display_handle(&mut factory, bounds, FitMode::DominantAxis)? {
//!     println!("draw at {}x{}", handle.size.width, handle.size.height);
//! }
//! ```

mod display;
mod entity;
mod filters;
mod fit;
mod raster;

pub use display::{CpuTexture, CpuTextureFactory, DisplayHandle, TextureFactory};
pub use entity::{EntityState, ImageEntity};
pub use filters::{AutoToneMode, Filter, BAYER_8X8, DEFAULT_BRIGHTNESS, DITHER_BIAS};
pub use fit::{fit, fit_with_mode, DisplaySize, FitMode};
pub use raster::Raster;

use thiserror::Error;

/// Errors that can occur while loading, converting or displaying rasters
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Failed to decode image '{path}': {reason}")]
    DecodeError { path: String, reason: String },

    #[error("Failed to encode image '{path}': {reason}")]
    EncodeError { path: String, reason: String },

    #[error("Invalid raster dimensions {width}x{height} for buffer of {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("Texture error: {0}")]
    TextureError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, ViewerError>;
