//! Lumen Text - Text Layout Engine
//!
//! This crate turns a character sequence into renderable glyph geometry:
//! - Glyph metrics lookup (procedural atlas, raster fonts, TrueType via ttf-parser)
//! - Font discovery (fontdb)
//! - Line breaking with overflow-wrap policies
//! - Horizontal and vertical alignment
//! - Quad mesh generation (positions, texture coordinates, colors, indices)
//!
//! The engine performs no GPU work. Everything it produces is plain
//! buffer-shaped data for an external renderer to upload.

pub mod font;
pub mod layout;
pub mod mesh;

pub use font::{
    FontDatabase, GlyphAtlas, GlyphMetrics, GlyphMetricsProvider, RasterFont, TexRect, TtfFont,
};
pub use layout::{
    AlignmentCalculator, Bounds, HorizontalMetrics, LayoutDiagnostic, LayoutResult, Line,
    LineBreaker, TextAlign, VerticalMetrics, WrapPolicy,
};
pub use mesh::{Color, MeshBuilder, TextMesh};

/// Text layout error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Invalid glyph atlas: {0}")]
    InvalidAtlas(String),

    #[error("Broken line partition at line {line}: {reason}")]
    BrokenLines { line: usize, reason: &'static str },

    #[error("Mesh buffers disagree: expected {expected} vertices, found {found} in {buffer}")]
    MeshMismatch {
        buffer: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Too many glyphs for 32-bit indices: {0}")]
    TooManyGlyphs(usize),
}

pub type Result<T> = std::result::Result<T, TextError>;
