//! Image entity: a decoded raster, where it came from, and its display handle

use crate::display::{CpuTexture, DisplayHandle, TextureFactory};
use crate::filters::brightness_applies;
use crate::fit::{fit_with_mode, DisplaySize, FitMode};
use crate::{AutoToneMode, Filter, Raster, Result, DITHER_BIAS};
use log::debug;
use std::path::{Path, PathBuf};

/// Lifecycle state of an [`ImageEntity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// No source, no pixels, no handle
    Empty,
    /// Decoded and untouched since loading
    Loaded,
    /// At least one filter changed the pixels since the last handle was built
    Filtered,
    /// A display handle matching the current pixels exists
    HandleReady,
}

/// An image loaded from disk, the filters applied to it and its display handle
///
/// The entity exclusively owns its raster and its handle. Any filter that
/// changes pixels drops the handle; the next [`get_display_handle`] call
/// rebuilds it.
///
/// Cloning is deliberately not `Clone`: [`try_clone`] decodes the source file
/// again instead of copying pixels, so a copy starts out unfiltered and fails
/// if the file has been removed in the meantime.
///
/// [`get_display_handle`]: ImageEntity::get_display_handle
/// [`try_clone`]: ImageEntity::try_clone
#[derive(Debug)]
pub struct ImageEntity<T = CpuTexture> {
    source_path: PathBuf,
    raster: Raster,
    handle: Option<T>,
    filtered: bool,
}

impl<T> Default for ImageEntity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ImageEntity<T> {
    /// Create an empty entity
    pub fn new() -> Self {
        Self {
            source_path: PathBuf::new(),
            raster: Raster::empty(),
            handle: None,
            filtered: false,
        }
    }

    /// Create an entity and load `path` into it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut entity = Self::new();
        entity.load(path)?;
        Ok(entity)
    }

    /// Decode `path`, replacing whatever the entity held before
    ///
    /// On failure the entity is left empty and the decode error is returned.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.reset();

        let raster = Raster::decode(path)?;
        debug!(
            "loaded {} ({}x{})",
            path.display(),
            raster.width(),
            raster.height()
        );
        self.source_path = path.to_path_buf();
        self.raster = raster;
        Ok(())
    }

    /// Drop the raster, the handle and the source path
    pub fn reset(&mut self) {
        if !self.is_empty() {
            debug!("reset {}", self.source_path.display());
        }
        self.source_path = PathBuf::new();
        self.raster = Raster::empty();
        self.handle = None;
        self.filtered = false;
    }

    /// Load a fresh copy of the same source file
    ///
    /// Filters applied to `self` are not carried over. An empty entity clones
    /// to an empty entity.
    pub fn try_clone(&self) -> Result<Self> {
        if self.source_path.as_os_str().is_empty() {
            return Ok(Self::new());
        }
        Self::open(&self.source_path)
    }

    pub fn is_empty(&self) -> bool {
        self.source_path.as_os_str().is_empty() && self.raster.is_empty() && self.handle.is_none()
    }

    pub fn state(&self) -> EntityState {
        if self.is_empty() {
            EntityState::Empty
        } else if self.handle.is_some() {
            EntityState::HandleReady
        } else if self.filtered {
            EntityState::Filtered
        } else {
            EntityState::Loaded
        }
    }

    /// Path the raster was decoded from (empty for an empty entity)
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Whether a display handle for the current pixels exists
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// Apply a filter to the raster, dropping the display handle if pixels change
    pub fn apply(&mut self, filter: Filter) -> &mut Self {
        let changes_pixels = !self.raster.is_empty()
            && match filter {
                Filter::Brightness(factor) => brightness_applies(factor),
                _ => true,
            };

        filter.apply(&mut self.raster);

        if changes_pixels {
            debug!("{} applied to {}", filter.name(), self.source_path.display());
            self.filtered = true;
            self.handle = None;
        }
        self
    }

    pub fn grayscale(&mut self) -> &mut Self {
        self.apply(Filter::Grayscale)
    }

    pub fn brightness(&mut self, factor: f32) -> &mut Self {
        self.apply(Filter::Brightness(factor))
    }

    pub fn dither(&mut self) -> &mut Self {
        self.apply(Filter::Dither { bias: DITHER_BIAS })
    }

    pub fn dither_with_bias(&mut self, bias: i32) -> &mut Self {
        self.apply(Filter::Dither { bias })
    }

    pub fn auto_tone(&mut self, mode: AutoToneMode) -> &mut Self {
        self.apply(Filter::AutoTone(mode))
    }

    /// Get the display handle and the size to draw it at inside `bounds`
    ///
    /// Returns `Ok(None)` when there is nothing to show. The handle is built
    /// through `factory` on first use and after any pixel change, then reused.
    pub fn get_display_handle<F>(
        &mut self,
        factory: &mut F,
        bounds: DisplaySize,
        mode: FitMode,
    ) -> Result<Option<DisplayHandle<'_, T>>>
    where
        F: TextureFactory<Texture = T>,
    {
        if self.raster.is_empty() {
            return Ok(None);
        }

        let texture = match self.handle.take() {
            Some(texture) => texture,
            None => {
                debug!("creating display handle for {}", self.source_path.display());
                factory.create_texture(&self.raster)?
            }
        };
        let texture = self.handle.insert(texture);

        let (width, height) = self.raster.dimensions();
        let size = fit_with_mode(width, height, bounds, mode);

        Ok(Some(DisplayHandle { texture, size }))
    }
}
