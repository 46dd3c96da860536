//! Glyph metrics measured from TrueType/OpenType data

use std::collections::HashMap;

use ttf_parser::Face;

use super::{GlyphMetrics, GlyphMetricsProvider, TexRect, grid_cells};
use crate::{Result, TextError};

/// Font measured at a fixed pixel size.
///
/// Advances come from `hmtx`, bearings and sizes from glyph bounding boxes.
/// Texture rectangles follow a grid pack in character order, matching how
/// the external rasterizer fills the sheet.
#[derive(Debug, Clone)]
pub struct TtfFont {
    font_size: f32,
    line_height: f32,
    sheet_size: u32,
    glyphs: HashMap<char, GlyphMetrics>,
}

impl TtfFont {
    /// Measure printable ASCII
    pub fn from_data_ascii(data: &[u8], index: u32, font_size: f32) -> Result<Self> {
        Self::from_data(data, index, font_size, (32u8..=126).map(char::from))
    }

    /// Measure the given characters; characters the font lacks are skipped
    pub fn from_data(
        data: &[u8],
        index: u32,
        font_size: f32,
        charset: impl IntoIterator<Item = char>,
    ) -> Result<Self> {
        if !(font_size.is_finite() && font_size > 0.0) {
            return Err(TextError::FontParsing(format!("invalid font size {}", font_size)));
        }

        let face = Face::parse(data, index).map_err(|e| TextError::FontParsing(e.to_string()))?;
        let scale = font_size / face.units_per_em() as f32;
        let line_height =
            (face.ascender() as f32 - face.descender() as f32 + face.line_gap() as f32) * scale;

        let mut measured = Vec::new();
        for c in charset {
            let Some(glyph_id) = face.glyph_index(c) else {
                continue;
            };
            let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0) as f32 * scale;
            let metrics = match face.glyph_bounding_box(glyph_id) {
                Some(bbox) => GlyphMetrics {
                    advance_x: advance,
                    advance_y: 0.0,
                    bearing_x: bbox.x_min as f32 * scale,
                    bearing_y: bbox.y_max as f32 * scale,
                    size_x: bbox.width() as f32 * scale,
                    size_y: bbox.height() as f32 * scale,
                    ..GlyphMetrics::EMPTY
                },
                // No outline (space, tab)
                None => GlyphMetrics::spacing(advance),
            };
            measured.push((c, metrics));
        }

        let cell_w = measured.iter().map(|(_, m)| m.size_x.ceil() as u32).max().unwrap_or(1);
        let cell_h = measured.iter().map(|(_, m)| m.size_y.ceil() as u32).max().unwrap_or(1);
        let (sheet_size, cells) = grid_cells(measured.len(), cell_w, cell_h);

        let glyphs = measured
            .into_iter()
            .zip(cells)
            .map(|((c, mut metrics), cell)| {
                if !metrics.is_whitespace() {
                    // Shrink the cell to the glyph's ink
                    let u_scale = (cell.dx - cell.x) / cell_w.max(1) as f32;
                    let v_scale = (cell.y - cell.dy) / cell_h.max(1) as f32;
                    metrics.tex_rect = TexRect::new(
                        cell.x,
                        cell.dy + metrics.size_y * v_scale,
                        cell.x + metrics.size_x * u_scale,
                        cell.dy,
                    );
                }
                (c, metrics)
            })
            .collect::<HashMap<_, _>>();

        tracing::debug!(
            "Measured {} glyphs at {}px (line height {:.2}, sheet {}px)",
            glyphs.len(),
            font_size,
            line_height,
            sheet_size
        );

        Ok(Self {
            font_size,
            line_height,
            sheet_size,
            glyphs,
        })
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Side length of the texture sheet the glyphs are packed into
    pub fn sheet_size(&self) -> u32 {
        self.sheet_size
    }

    /// Number of measured glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphMetricsProvider for TtfFont {
    fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        self.glyphs.get(&ch).copied()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
