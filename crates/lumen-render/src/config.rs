//! Text renderer configuration
//!
//! Deserialized from JSON:
//!
//! ```json
//! {
//!   "bounds": [240, 80],
//!   "color": [1.0, 0.9, 0.2, 1.0],
//!   "overflowWrap": "breakWord",
//!   "horizontalAlign": "center",
//!   "verticalAlign": 0,
//!   "text": "Hello world",
//!   "font": { "kind": "monospace" },
//!   "fontSize": 16
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use lumen_text::{Bounds, Color, TextAlign, WrapPolicy};

use crate::{RenderError, Result};

/// Where glyph metrics come from
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FontSelection {
    /// Procedural ASCII atlas
    #[default]
    Monospace,
    /// Pre-packed raster font description (JSON)
    Serialized { path: PathBuf },
    /// TrueType/OpenType file, measured at `fontSize`
    File {
        path: PathBuf,
        #[serde(default)]
        index: u32,
    },
    /// First installed family that matches
    System { families: Vec<String> },
}

/// Text renderer configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRendererConfig {
    pub bounds: Bounds,
    pub color: Color,
    pub overflow_wrap: WrapPolicy,
    pub horizontal_align: TextAlign,
    pub vertical_align: TextAlign,
    pub text: String,
    pub font: FontSelection,
    pub font_size: f32,
}

impl Default for TextRendererConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::unbounded(),
            color: Color::WHITE,
            overflow_wrap: WrapPolicy::Normal,
            horizontal_align: TextAlign::Start,
            vertical_align: TextAlign::Start,
            text: String::new(),
            font: FontSelection::Monospace,
            font_size: 16.0,
        }
    }
}

impl TextRendererConfig {
    /// Parse and validate a configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        tracing::debug!("Loading text renderer config {}", path.display());
        Self::from_json(&json)
    }

    /// Reject values the layout engine must never see
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.bounds)?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(RenderError::Config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

/// Bounds must be finite and non-negative; zero means unbounded
pub(crate) fn validate_bounds(bounds: Bounds) -> Result<()> {
    for (axis, value) in [("width", bounds.width), ("height", bounds.height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(RenderError::Config(format!(
                "bounds {} must be finite and non-negative, got {}",
                axis, value
            )));
        }
    }
    Ok(())
}
