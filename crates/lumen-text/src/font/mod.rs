//! Glyph metrics and the fonts that provide them

mod atlas;
mod database;
mod raster;
mod ttf;

pub use atlas::GlyphAtlas;
pub use database::FontDatabase;
pub use raster::{RasterFont, RasterGlyph};
pub use ttf::TtfFont;

use serde::{Deserialize, Serialize};

/// Rectangle on the texture sheet, in normalized texture coordinates.
///
/// `(x, y)` is the corner sampled by a glyph quad's bottom-left vertex and
/// `(dx, dy)` the corner sampled by its top-right vertex. Both are absolute
/// coordinates, not extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TexRect {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl TexRect {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self { x, y, dx, dy }
    }
}

/// Per-glyph metrics in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlyphMetrics {
    /// Horizontal pen advance
    pub advance_x: f32,
    /// Vertical pen advance (zero for horizontal scripts)
    pub advance_y: f32,
    /// Offset from the pen to the left edge of the ink
    pub bearing_x: f32,
    /// Offset from the baseline to the top edge of the ink
    pub bearing_y: f32,
    /// Rendered width
    pub size_x: f32,
    /// Rendered height
    pub size_y: f32,
    /// Location on the texture sheet
    pub tex_rect: TexRect,
}

impl GlyphMetrics {
    /// Zero-width, zero-advance glyph used in place of unresolved characters
    pub const EMPTY: GlyphMetrics = GlyphMetrics {
        advance_x: 0.0,
        advance_y: 0.0,
        bearing_x: 0.0,
        bearing_y: 0.0,
        size_x: 0.0,
        size_y: 0.0,
        tex_rect: TexRect { x: 0.0, y: 0.0, dx: 0.0, dy: 0.0 },
    };

    /// A glyph that advances the pen without leaving ink
    pub fn spacing(advance_x: f32) -> Self {
        Self { advance_x, ..Self::EMPTY }
    }

    /// Whitespace is anything with no rendered width
    pub fn is_whitespace(&self) -> bool {
        self.size_x == 0.0
    }
}

/// Glyph lookup capability consumed by the layout engine.
///
/// Implementations must answer synchronously and return the same metrics
/// for a given character for as long as a layout pass is running.
pub trait GlyphMetricsProvider {
    /// Metrics for `ch`, or `None` when the font cannot resolve it
    fn glyph(&self, ch: char) -> Option<GlyphMetrics>;

    /// Distance between consecutive baselines
    fn line_height(&self) -> f32;
}

/// Lay `count` equally sized cells out on a square grid, returning the
/// texture side length and the normalized rectangle of every cell.
///
/// Rows run top to bottom in the image, so a cell's bottom edge has the
/// larger `v` coordinate.
pub(crate) fn grid_cells(count: usize, cell_width: u32, cell_height: u32) -> (u32, Vec<TexRect>) {
    let cell_width = cell_width.max(1);
    let cell_height = cell_height.max(1);

    let mut cols = (count as f64).sqrt().ceil().max(1.0) as u32;
    let mut size = (cols * cell_width).max(cell_height).next_power_of_two();
    loop {
        cols = size / cell_width;
        let rows = count.div_ceil(cols.max(1) as usize) as u32;
        if cols > 0 && rows * cell_height <= size {
            break;
        }
        size *= 2;
    }

    let inv = 1.0 / size as f32;
    let cells = (0..count as u32)
        .map(|idx| {
            let x = (idx % cols) * cell_width;
            let y = (idx / cols) * cell_height;
            TexRect::new(
                x as f32 * inv,
                (y + cell_height) as f32 * inv,
                (x + cell_width) as f32 * inv,
                y as f32 * inv,
            )
        })
        .collect();

    (size, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_glyph_is_whitespace() {
        assert!(GlyphMetrics::EMPTY.is_whitespace());
        assert!(GlyphMetrics::spacing(4.0).is_whitespace());
        assert_eq!(GlyphMetrics::spacing(4.0).advance_x, 4.0);
    }

    #[test]
    fn test_grid_cells_fit_texture() {
        let (size, cells) = grid_cells(95, 10, 16);
        assert_eq!(cells.len(), 95);
        assert!(size.is_power_of_two());
        for cell in &cells {
            assert!(cell.x >= 0.0 && cell.dx <= 1.0);
            assert!(cell.dy >= 0.0 && cell.y <= 1.0);
            assert!(cell.dx > cell.x);
            assert!(cell.y > cell.dy);
        }
    }

    #[test]
    fn test_grid_cells_empty() {
        let (size, cells) = grid_cells(0, 8, 8);
        assert!(cells.is_empty());
        assert!(size >= 8);
    }

    #[test]
    fn test_metrics_deserialize_with_defaults() {
        let metrics: GlyphMetrics =
            serde_json::from_str(r#"{ "advanceX": 7.0, "sizeX": 5.0, "sizeY": 9.0 }"#).unwrap();
        assert_eq!(metrics.advance_x, 7.0);
        assert_eq!(metrics.advance_y, 0.0);
        assert_eq!(metrics.tex_rect, TexRect::default());
    }
}
