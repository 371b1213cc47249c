//! Aspect-ratio preserving fit of a raster into a display box

use log::warn;
use serde::{Deserialize, Serialize};

/// Width and height of a display region, in display units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// How a raster is fitted into its display box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMode {
    /// Pin the raster's longer side to the matching box side and derive the
    /// other side from the aspect ratio. Square rasters take the whole box.
    #[default]
    DominantAxis,
    /// Scale uniformly so that neither side exceeds the box
    Contain,
}

/// Fit a `native_width` x `native_height` raster into `bounds` by its dominant axis
///
/// Landscape rasters keep the box width, portrait rasters keep the box height,
/// square rasters get the box unchanged. A zero-area raster returns the box
/// unchanged.
///
/// # Example
/// ```
/// use raster_core::{fit, DisplaySize};
///
/// let size = fit(1600, 900, DisplaySize::new(700.0, 700.0));
/// assert_eq!(size.width, 700.0);
/// assert!((size.height - 393.75).abs() < 1e-3);
/// ```
pub fn fit(native_width: u32, native_height: u32, bounds: DisplaySize) -> DisplaySize {
    fit_with_mode(native_width, native_height, bounds, FitMode::DominantAxis)
}

/// Fit a raster into `bounds` using the given mode
pub fn fit_with_mode(
    native_width: u32,
    native_height: u32,
    bounds: DisplaySize,
    mode: FitMode,
) -> DisplaySize {
    if native_width == 0 || native_height == 0 {
        warn!("fit of {native_width}x{native_height} raster: zero area, keeping box");
        return bounds;
    }

    let width = native_width as f32;
    let height = native_height as f32;

    match mode {
        FitMode::DominantAxis => {
            if native_width == native_height {
                return bounds;
            }
            let aspect_ratio = width / height;
            if native_width > native_height {
                DisplaySize::new(bounds.width, bounds.width / aspect_ratio)
            } else {
                DisplaySize::new(bounds.height * aspect_ratio, bounds.height)
            }
        }
        FitMode::Contain => {
            let scale = (bounds.width / width).min(bounds.height / height);
            DisplaySize::new(width * scale, height * scale)
        }
    }
}
