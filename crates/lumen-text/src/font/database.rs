//! Font database for locating fonts by family

use std::path::Path;

use fontdb::{Database, Family, ID, Query, Stretch, Style, Weight};

use super::TtfFont;
use crate::{Result, TextError};

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db
            .load_font_file(path)
            .map_err(|e| TextError::FontNotFound(format!("{}: {}", path.display(), e)))
    }

    /// Load a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Find the first face matching any of the families, in order.
    ///
    /// `serif`, `sans-serif` and `monospace` map to the generic families.
    pub fn query(&self, families: &[&str]) -> Option<ID> {
        let families: Vec<Family> = families
            .iter()
            .map(|name| match *name {
                "serif" => Family::Serif,
                "sans-serif" => Family::SansSerif,
                "monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                other => Family::Name(other),
            })
            .collect();

        self.db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })
    }

    /// Measure printable ASCII of a face at the given size
    pub fn load_face(&self, id: ID, font_size: f32) -> Result<TtfFont> {
        self.db
            .with_face_data(id, |data, index| TtfFont::from_data_ascii(data, index, font_size))
            .ok_or_else(|| TextError::FontNotFound(format!("face {:?} has no data", id)))?
    }

    /// Resolve a family list straight to measured metrics
    pub fn find(&self, families: &[&str], font_size: f32) -> Result<TtfFont> {
        let id = self
            .query(families)
            .ok_or_else(|| TextError::FontNotFound(families.join(", ")))?;
        self.load_face(id, font_size)
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
