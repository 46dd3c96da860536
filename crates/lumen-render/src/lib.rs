//! Lumen Render - Text Renderer Component
//!
//! Owns the inputs of a text block (text, bounds, color, wrap and alignment
//! modes, font) and rebuilds its glyph mesh lazily when any of them change.

mod config;
mod fonts;
mod text_renderer;

pub use config::{FontSelection, TextRendererConfig};
pub use fonts::load_font;
pub use text_renderer::TextRenderer;

pub use lumen_text::{
    Bounds, Color, GlyphMetricsProvider, LayoutDiagnostic, Line, TextAlign, TextMesh, WrapPolicy,
};

/// Text renderer error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Text(#[from] lumen_text::TextError),

    #[error("No font set")]
    NoFont,
}

pub type Result<T> = std::result::Result<T, RenderError>;
