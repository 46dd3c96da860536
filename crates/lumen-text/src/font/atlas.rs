//! Glyph Atlas Module
//!
//! Procedural monospace atlas covering printable ASCII. Every glyph gets a
//! fixed grid cell on a square texture sheet, which makes it a convenient
//! stand-in font when no font file is configured.

use std::collections::HashMap;

use super::{GlyphMetrics, GlyphMetricsProvider, grid_cells};

/// First and last printable ASCII characters
const ASCII_RANGE: std::ops::RangeInclusive<u8> = 32..=126;

/// Monospace glyph atlas for printable ASCII
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    /// Texture side length in pixels
    size: u32,
    /// Font size this atlas was laid out for
    font_size: f32,
    /// Baseline-to-baseline distance
    line_height: f32,
    /// Glyph metrics by character
    glyphs: HashMap<char, GlyphMetrics>,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl GlyphAtlas {
    /// Create an atlas for the given font size
    pub fn new(font_size: f32) -> Self {
        let font_size = if font_size.is_finite() && font_size > 0.0 { font_size } else { 16.0 };
        let mut atlas = Self {
            size: 0,
            font_size,
            line_height: font_size * 1.2,
            glyphs: HashMap::new(),
        };
        atlas.prerender_ascii();
        atlas
    }

    /// Lay out ASCII glyphs (32-126)
    fn prerender_ascii(&mut self) {
        let glyph_w = (self.font_size * 3.0 / 5.0).ceil() as u32;
        let glyph_h = self.font_size.ceil() as u32;
        let ascent = (self.font_size * 4.0 / 5.0).round();

        let (size, cells) = grid_cells(ASCII_RANGE.len(), glyph_w, glyph_h);
        self.size = size;

        for (c, tex_rect) in ASCII_RANGE.map(char::from).zip(cells) {
            let metrics = if c == ' ' {
                GlyphMetrics::spacing(glyph_w as f32)
            } else {
                GlyphMetrics {
                    advance_x: glyph_w as f32,
                    advance_y: 0.0,
                    bearing_x: 0.0,
                    bearing_y: ascent,
                    size_x: glyph_w as f32,
                    size_y: glyph_h as f32,
                    tex_rect,
                }
            };
            self.glyphs.insert(c, metrics);
        }

        tracing::debug!(
            "Glyph atlas {}x{} laid out {} glyphs at {}px",
            self.size,
            self.size,
            self.glyphs.len(),
            self.font_size
        );
    }

    /// Texture side length in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Number of glyphs in the atlas
    pub fn coverage(&self) -> usize {
        self.glyphs.len()
    }

    /// Override a glyph, e.g. to add a character outside ASCII
    pub fn insert(&mut self, c: char, metrics: GlyphMetrics) {
        self.glyphs.insert(c, metrics);
    }
}

impl GlyphMetricsProvider for GlyphAtlas {
    fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        self.glyphs.get(&ch).copied()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
