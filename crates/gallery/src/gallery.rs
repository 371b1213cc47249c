//! Pages of filtered variants and the pager over them

use crate::{GalleryConfig, GalleryError, Result};
use log::{debug, info};
use raster_core::{CpuTexture, DisplayHandle, ImageEntity, TextureFactory};
use std::path::Path;

/// One filtered variant of the source image
#[derive(Debug)]
pub struct Page<T = CpuTexture> {
    pub title: String,
    pub entity: ImageEntity<T>,
}

/// Every configured page built from one source image, plus the current page
#[derive(Debug)]
pub struct Gallery<T = CpuTexture> {
    config: GalleryConfig,
    pages: Vec<Page<T>>,
    current: usize,
}

impl<T> Gallery<T> {
    /// Load `source` once, then give every page its own reloaded copy with
    /// the page's steps applied in order
    pub fn build<P: AsRef<Path>>(config: GalleryConfig, source: P) -> Result<Self> {
        config.validate()?;
        let source = source.as_ref();
        let base = ImageEntity::<T>::open(source)?;

        let mut pages = Vec::with_capacity(config.pages.len());
        for spec in &config.pages {
            let mut entity = base.try_clone()?;
            for filter in config.filters_for(spec) {
                entity.apply(filter);
            }
            debug!("page '{}' built with {} steps", spec.title, spec.steps.len());
            pages.push(Page {
                title: spec.title.clone(),
                entity,
            });
        }

        info!("{} pages ready for {}", pages.len(), source.display());
        Ok(Self {
            config,
            pages,
            current: 0,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    pub fn titles(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.title.as_str()).collect()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Page<T> {
        &self.pages[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Page<T> {
        &mut self.pages[self.current]
    }

    /// Move to the next page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current + 1 >= self.pages.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous page. Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to page `index`
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(GalleryError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Display handle and fitted size for the current page
    pub fn display_current<F>(&mut self, factory: &mut F) -> Result<Option<DisplayHandle<'_, T>>>
    where
        F: TextureFactory<Texture = T>,
    {
        let bounds = self.config.display.bounds();
        let mode = self.config.display.fit;
        let page = &mut self.pages[self.current];
        Ok(page.entity.get_display_handle(factory, bounds, mode)?)
    }
}
