//! Glyph mesh generation
//!
//! One quad per character inside a line span. Vertices of a quad are
//! emitted bottom-left, top-left, top-right, bottom-right in both the
//! position and texture coordinate streams, and drawn as the triangles
//! `(0, 1, 2)` and `(0, 2, 3)`.

use serde::{Deserialize, Serialize};

use crate::font::{GlyphMetrics, GlyphMetricsProvider};
use crate::layout::{AlignmentCalculator, Bounds, LayoutResult, TextAlign};
use crate::{Result, TextError};

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;
const QUAD_TRIANGLES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// Color (RGBA, 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Renderable text geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Texture coordinates, parallel to `positions`
    pub tex_coords: Vec<[f32; 2]>,
    /// Vertex colors, parallel to `positions`
    pub colors: Vec<Color>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl TextMesh {
    fn with_quads(quads: usize) -> Self {
        Self {
            positions: Vec::with_capacity(quads * VERTICES_PER_QUAD),
            tex_coords: Vec::with_capacity(quads * VERTICES_PER_QUAD),
            colors: Vec::with_capacity(quads * VERTICES_PER_QUAD),
            indices: Vec::with_capacity(quads * INDICES_PER_QUAD),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of glyph quads
    pub fn quad_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_QUAD
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check buffer sizes against `quads` glyphs and that every index
    /// points at a vertex of this mesh
    pub fn validate(&self, quads: usize) -> Result<()> {
        let vertices = quads * VERTICES_PER_QUAD;
        let check = |buffer: &'static str, found: usize, expected: usize| {
            if found == expected {
                Ok(())
            } else {
                Err(TextError::MeshMismatch { buffer, expected, found })
            }
        };

        check("positions", self.positions.len(), vertices)?;
        check("tex_coords", self.tex_coords.len(), vertices)?;
        check("colors", self.colors.len(), vertices)?;
        check("indices", self.indices.len(), quads * INDICES_PER_QUAD)?;

        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(TextError::MeshMismatch {
                buffer: "indices",
                expected: vertices,
                found: bad as usize,
            });
        }
        Ok(())
    }

    fn push_quad(&mut self, glyph: &GlyphMetrics, pen_x: f32, pen_y: f32, color: Color) {
        let base = self.positions.len() as u32;

        let left = pen_x + glyph.bearing_x;
        let right = left + glyph.size_x;
        let top = pen_y + glyph.bearing_y;
        let bottom = top - glyph.size_y;
        self.positions.extend_from_slice(&[
            [left, bottom, 0.0],
            [left, top, 0.0],
            [right, top, 0.0],
            [right, bottom, 0.0],
        ]);

        let uv = glyph.tex_rect;
        self.tex_coords.extend_from_slice(&[
            [uv.x, uv.y],
            [uv.x, uv.dy],
            [uv.dx, uv.dy],
            [uv.dx, uv.y],
        ]);

        self.colors.extend_from_slice(&[color; VERTICES_PER_QUAD]);
        self.indices.extend(QUAD_TRIANGLES.iter().map(|i| base + i));
    }
}

/// Whether every vertex of `quads` glyph quads fits a `u32` index
fn indexable(quads: usize) -> bool {
    quads
        .checked_mul(VERTICES_PER_QUAD)
        .is_some_and(|vertices| vertices as u64 <= u32::MAX as u64 + 1)
}

/// Mesh builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBuilder {
    bounds: Bounds,
    horizontal: TextAlign,
    vertical: TextAlign,
    color: Color,
}

impl MeshBuilder {
    /// Builder with start alignment on both axes and white text
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            horizontal: TextAlign::Start,
            vertical: TextAlign::Start,
            color: Color::WHITE,
        }
    }

    /// Set horizontal alignment
    pub fn horizontal_align(mut self, align: TextAlign) -> Self {
        self.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn vertical_align(mut self, align: TextAlign) -> Self {
        self.vertical = align;
        self
    }

    /// Set text color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Generate the glyph mesh for a layout
    pub fn build<P>(&self, layout: &LayoutResult, provider: &P) -> Result<TextMesh>
    where
        P: GlyphMetricsProvider + ?Sized,
    {
        let quads = layout.visible_count();
        if !indexable(quads) {
            return Err(TextError::TooManyGlyphs(quads));
        }

        let vertical = AlignmentCalculator::vertical(
            self.vertical,
            layout.line_count(),
            self.bounds.height,
            provider.line_height(),
        );

        let text = layout.text();
        let mut mesh = TextMesh::with_quads(quads);
        let mut pen_y = vertical.pen_y;

        for line in layout.lines() {
            let horizontal = AlignmentCalculator::horizontal(
                self.horizontal,
                self.bounds.width,
                line.width,
                line.len(),
                line.start_adjust,
            );
            let mut pen_x = horizontal.pen_x + line.start_adjust;

            for &c in &text[line.start..line.end] {
                let glyph = provider.glyph(c).unwrap_or(GlyphMetrics::EMPTY);
                mesh.push_quad(&glyph, pen_x, pen_y, self.color);
                pen_x += glyph.advance_x + horizontal.extra_advance;
                pen_y += glyph.advance_y;
            }

            pen_y -= vertical.line_height;
        }

        mesh.validate(quads)?;

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::TexRect;
    use crate::layout::{LineBreaker, WrapPolicy};

    /// 2px advance, 2x3 ink raised 1px above the baseline
    struct Blocks;

    impl GlyphMetricsProvider for Blocks {
        fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
            match ch {
                ' ' => Some(GlyphMetrics::spacing(2.0)),
                _ => Some(GlyphMetrics {
                    advance_x: 2.0,
                    advance_y: 0.0,
                    bearing_x: 0.5,
                    bearing_y: 3.0,
                    size_x: 2.0,
                    size_y: 3.0,
                    tex_rect: TexRect::new(0.1, 0.4, 0.3, 0.2),
                }),
            }
        }

        fn line_height(&self) -> f32 {
            5.0
        }
    }

    fn layout(text: &str, width: f32) -> LayoutResult {
        LineBreaker::new(WrapPolicy::Normal, width).break_lines(text, &Blocks)
    }

    #[test]
    fn test_quad_corners() {
        let mesh = MeshBuilder::new(Bounds::unbounded()).build(&layout("a", 0.0), &Blocks).unwrap();
        assert_eq!(
            mesh.positions,
            vec![[0.5, 0.0, 0.0], [0.5, 3.0, 0.0], [2.5, 3.0, 0.0], [2.5, 0.0, 0.0]]
        );
        assert_eq!(mesh.tex_coords, vec![[0.1, 0.4], [0.1, 0.2], [0.3, 0.2], [0.3, 0.4]]);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_buffer_sizes() {
        let l = layout("ab cd\ref", 0.0);
        let mesh = MeshBuilder::new(Bounds::unbounded()).build(&l, &Blocks).unwrap();
        let v = l.visible_count();
        assert_eq!(v, 7);
        assert_eq!(mesh.vertex_count(), 4 * v);
        assert_eq!(mesh.tex_coords.len(), 4 * v);
        assert_eq!(mesh.colors.len(), 4 * v);
        assert_eq!(mesh.index_count(), 6 * v);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < 4 * v));
    }

    #[test]
    fn test_second_line_drops_by_line_height() {
        let mesh = MeshBuilder::new(Bounds::unbounded()).build(&layout("a\rb", 0.0), &Blocks).unwrap();
        // Bottom-left of the second quad
        assert_eq!(mesh.positions[4], [0.5, -5.0, 0.0]);
    }

    #[test]
    fn test_pen_advances() {
        let mesh = MeshBuilder::new(Bounds::unbounded()).build(&layout("ab", 0.0), &Blocks).unwrap();
        assert_eq!(mesh.positions[4][0], 2.5);
    }

    #[test]
    fn test_end_alignment() {
        let mesh = MeshBuilder::new(Bounds::new(10.0, 0.0))
            .horizontal_align(TextAlign::End)
            .build(&layout("ab", 10.0), &Blocks)
            .unwrap();
        // Line is 4px wide, so the pen starts at 6
        assert_eq!(mesh.positions[0][0], 6.5);
    }

    #[test]
    fn test_justify_spreads_glyphs() {
        let mesh = MeshBuilder::new(Bounds::new(10.0, 0.0))
            .horizontal_align(TextAlign::Justify)
            .build(&layout("ab", 10.0), &Blocks)
            .unwrap();
        // extra advance = (10 - 4) / 2 = 3
        assert_eq!(mesh.positions[4][0], 0.5 + 2.0 + 3.0);
    }

    #[test]
    fn test_color_is_constant() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let mesh = MeshBuilder::new(Bounds::unbounded())
            .color(red)
            .build(&layout("abc", 0.0), &Blocks)
            .unwrap();
        assert!(mesh.colors.iter().all(|c| *c == red));
    }

    #[test]
    fn test_empty_layout_gives_empty_mesh() {
        let mesh = MeshBuilder::new(Bounds::new(50.0, 50.0))
            .build(&LayoutResult::empty(), &Blocks)
            .unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn test_validate_rejects_dangling_index() {
        let mut mesh = MeshBuilder::new(Bounds::unbounded()).build(&layout("a", 0.0), &Blocks).unwrap();
        mesh.indices[2] = 9;
        assert!(matches!(
            mesh.validate(1),
            Err(TextError::MeshMismatch { buffer: "indices", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let mut mesh = MeshBuilder::new(Bounds::unbounded()).build(&layout("ab", 0.0), &Blocks).unwrap();
        mesh.colors.pop();
        assert!(matches!(
            mesh.validate(2),
            Err(TextError::MeshMismatch { buffer: "colors", .. })
        ));
    }

    #[test]
    fn test_index_range_limit() {
        // 2^30 quads end exactly on the last u32 index
        let max_quads = (u32::MAX as usize + 1) / VERTICES_PER_QUAD;
        assert!(indexable(0));
        assert!(indexable(max_quads));
        assert!(!indexable(max_quads + 1));
        assert!(!indexable(usize::MAX));
    }

    #[test]
    fn test_color_deserialize() {
        let color: Color = serde_json::from_str("[0.5, 0.25, 0, 1]").unwrap();
        assert_eq!(color, Color::rgba(0.5, 0.25, 0.0, 1.0));
    }
}
