//! Pre-packed raster fonts
//!
//! A raster font is a texture sheet produced offline together with a JSON
//! description of every glyph on it:
//!
//! ```json
//! {
//!   "name": "Pixel 8",
//!   "fontSize": 8,
//!   "lineHeight": 10,
//!   "texture": "pixel8.png",
//!   "glyphs": [
//!     { "ch": "A", "advanceX": 6, "bearingY": 7, "sizeX": 5, "sizeY": 7,
//!       "texRect": { "x": 0.0, "y": 0.125, "dx": 0.078, "dy": 0.0 } }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{GlyphMetrics, GlyphMetricsProvider};
use crate::{Result, TextError};

/// One glyph entry of a serialized raster font
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterGlyph {
    pub ch: char,
    #[serde(flatten)]
    pub metrics: GlyphMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RasterFontFile {
    #[serde(default)]
    name: String,
    font_size: f32,
    line_height: f32,
    #[serde(default)]
    texture: Option<String>,
    glyphs: Vec<RasterGlyph>,
}

/// Raster font loaded from its serialized description
#[derive(Debug, Clone)]
pub struct RasterFont {
    name: String,
    font_size: f32,
    line_height: f32,
    texture: Option<String>,
    glyphs: HashMap<char, GlyphMetrics>,
}

impl RasterFont {
    /// Parse a raster font description
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RasterFontFile =
            serde_json::from_str(json).map_err(|e| TextError::FontParsing(e.to_string()))?;
        Self::from_file(file)
    }

    /// Load a raster font description from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| TextError::FontNotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    fn from_file(file: RasterFontFile) -> Result<Self> {
        if !(file.line_height.is_finite() && file.line_height > 0.0) {
            return Err(TextError::InvalidAtlas(format!(
                "line height must be positive, got {}",
                file.line_height
            )));
        }

        let mut glyphs = HashMap::with_capacity(file.glyphs.len());
        for glyph in file.glyphs {
            let m = glyph.metrics;
            if m.size_x < 0.0 || m.size_y < 0.0 {
                return Err(TextError::InvalidAtlas(format!(
                    "glyph {:?} has a negative size",
                    glyph.ch
                )));
            }
            if glyphs.insert(glyph.ch, m).is_some() {
                tracing::warn!("Raster font {:?} defines {:?} twice, keeping the last", file.name, glyph.ch);
            }
        }

        tracing::debug!("Loaded raster font {:?} with {} glyphs", file.name, glyphs.len());

        Ok(Self {
            name: file.name,
            font_size: file.font_size,
            line_height: file.line_height,
            texture: file.texture,
            glyphs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Texture sheet this font samples from, relative to the description
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphMetricsProvider for RasterFont {
    fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        self.glyphs.get(&ch).copied()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
