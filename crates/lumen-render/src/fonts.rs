//! Font loading for the text renderer

use std::path::Path;

use lumen_text::{FontDatabase, GlyphAtlas, GlyphMetricsProvider, RasterFont, TextError, TtfFont};

use crate::config::FontSelection;
use crate::{RenderError, Result};

/// Resolve a font selection into a glyph metrics provider.
///
/// Relative paths are resolved against `base_dir`, normally the directory
/// holding the configuration file.
pub fn load_font(
    selection: &FontSelection,
    font_size: f32,
    base_dir: &Path,
) -> Result<Box<dyn GlyphMetricsProvider>> {
    match selection {
        FontSelection::Monospace => {
            tracing::debug!("Using procedural monospace atlas at {}px", font_size);
            Ok(Box::new(GlyphAtlas::new(font_size)))
        }
        FontSelection::Serialized { path } => {
            let path = base_dir.join(path);
            let font = RasterFont::load(&path)?;
            tracing::info!(
                "Loaded raster font '{}' ({} glyphs) from {}",
                font.name(),
                font.len(),
                path.display()
            );
            Ok(Box::new(font))
        }
        FontSelection::File { path, index } => {
            let path = base_dir.join(path);
            let data = std::fs::read(&path)
                .map_err(|e| TextError::FontNotFound(format!("{}: {}", path.display(), e)))?;
            let font = TtfFont::from_data_ascii(&data, *index, font_size)?;
            tracing::info!(
                "Loaded font file {} ({} glyphs at {}px)",
                path.display(),
                font.len(),
                font_size
            );
            Ok(Box::new(font))
        }
        FontSelection::System { families } => {
            if families.is_empty() {
                return Err(RenderError::Config(
                    "system font selection needs at least one family".into(),
                ));
            }
            let names: Vec<&str> = families.iter().map(String::as_str).collect();
            let db = FontDatabase::with_system_fonts();
            let font = db.find(&names, font_size)?;
            tracing::info!("Matched system font for {:?}", names);
            Ok(Box::new(font))
        }
    }
}
