//! Gallery config parsing

use crate::{GalleryConfig, GalleryError, Result};
use log::debug;
use std::path::Path;

/// Parse and validate a gallery config from a JSON string
pub fn parse_gallery(json: &str) -> Result<GalleryConfig> {
    let config: GalleryConfig =
        serde_json::from_str(json).map_err(|e| GalleryError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

impl GalleryConfig {
    /// Read, parse and validate a gallery config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = parse_gallery(&json)?;
        debug!(
            "gallery config {} with {} pages",
            path.display(),
            config.pages.len()
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
