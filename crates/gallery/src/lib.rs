//! Gallery - filter pages over a single source image
//!
//! This crate provides:
//! - A JSON configuration describing the display box and the pages to show
//! - Filter steps per page (grayscale, brightness, dithering, auto tone)
//! - A gallery that loads one image entity per page and pages through them
//!
//! # Example
//!
//! ```ignore
//! use gallery::{Gallery, GalleryConfig};
//! use raster_core::CpuTextureFactory;
//!
//! let config = GalleryConfig::from_file("gallery.json")?;
//! let mut gallery = Gallery::build(config, "scan.tif")?;
//! gallery.next_page();
//! if let Some(handle) = gallery.display_current(&mut CpuTextureFactory)? {
//!     println!("{} at {}x{}", gallery.current().title, handle.size.width, handle.size.height);
//! }
//! ```

mod gallery;
pub mod parser;
mod schema;

pub use gallery::{Gallery, Page};
pub use parser::parse_gallery;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while configuring or building a gallery
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Failed to parse gallery config: {0}")]
    ParseError(String),

    #[error("Invalid gallery config: {0}")]
    ConfigError(String),

    #[error("Page {index} out of range (gallery has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Viewer error: {0}")]
    Viewer(#[from] raster_core::ViewerError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;
