//! Gallery JSON schema types

use raster_core::{AutoToneMode, DisplaySize, Filter, FitMode, DEFAULT_BRIGHTNESS, DITHER_BIAS};
use serde::{Deserialize, Serialize};

/// Root gallery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryConfig {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: String,

    /// Box every page is fitted into
    #[serde(default)]
    pub display: DisplayConfig,

    /// Auto tone mode for steps that do not pick one
    #[serde(default)]
    pub auto_tone: AutoToneMode,

    /// Pages in display order
    #[serde(default = "default_pages")]
    pub pages: Vec<PageSpec>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            display: DisplayConfig::default(),
            auto_tone: AutoToneMode::default(),
            pages: default_pages(),
        }
    }
}

impl GalleryConfig {
    /// Check the config can drive a gallery
    pub fn validate(&self) -> crate::Result<()> {
        if self.pages.is_empty() {
            return Err(crate::GalleryError::ConfigError(
                "at least one page is required".to_string(),
            ));
        }
        if !self.display.bounds().is_valid() {
            return Err(crate::GalleryError::ConfigError(format!(
                "display box {}x{} must be finite and positive",
                self.display.width, self.display.height
            )));
        }
        Ok(())
    }

    /// Resolve a page's steps into concrete filters
    pub fn filters_for(&self, page: &PageSpec) -> Vec<Filter> {
        page.steps
            .iter()
            .map(|step| step.to_filter(self.auto_tone))
            .collect()
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_pages() -> Vec<PageSpec> {
    vec![
        PageSpec::new("Original", vec![]),
        PageSpec::new("Grayscale", vec![FilterStep::Grayscale]),
        PageSpec::new(
            "Brightness",
            vec![FilterStep::Brightness {
                factor: DEFAULT_BRIGHTNESS,
            }],
        ),
        PageSpec::new("Dithering", vec![FilterStep::Dither { bias: DITHER_BIAS }]),
        PageSpec::new("Auto tone", vec![FilterStep::AutoTone { mode: None }]),
    ]
}

/// Display box and fit policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(default = "default_box_side")]
    pub width: f32,
    #[serde(default = "default_box_side")]
    pub height: f32,
    #[serde(default)]
    pub fit: FitMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_box_side(),
            height: default_box_side(),
            fit: FitMode::default(),
        }
    }
}

impl DisplayConfig {
    pub fn bounds(&self) -> DisplaySize {
        DisplaySize::new(self.width, self.height)
    }
}

fn default_box_side() -> f32 {
    700.0
}

/// One page of the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Title shown for the page
    pub title: String,

    /// Filters applied in order to a fresh copy of the source image
    #[serde(default)]
    pub steps: Vec<FilterStep>,
}

impl PageSpec {
    pub fn new(title: impl Into<String>, steps: Vec<FilterStep>) -> Self {
        Self {
            title: title.into(),
            steps,
        }
    }
}

/// A filter step as written in the config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterStep {
    Grayscale,
    Brightness {
        #[serde(default = "default_brightness")]
        factor: f32,
    },
    Dither {
        #[serde(default = "default_dither_bias")]
        bias: i32,
    },
    AutoTone {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<AutoToneMode>,
    },
}

impl FilterStep {
    /// Convert to a core filter, using `auto_tone` when the step names no mode
    pub fn to_filter(&self, auto_tone: AutoToneMode) -> Filter {
        match *self {
            FilterStep::Grayscale => Filter::Grayscale,
            FilterStep::Brightness { factor } => Filter::Brightness(factor),
            FilterStep::Dither { bias } => Filter::Dither { bias },
            FilterStep::AutoTone { mode } => Filter::AutoTone(mode.unwrap_or(auto_tone)),
        }
    }
}

fn default_brightness() -> f32 {
    DEFAULT_BRIGHTNESS
}

fn default_dither_bias() -> i32 {
    DITHER_BIAS
}
