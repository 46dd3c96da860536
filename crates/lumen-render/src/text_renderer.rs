//! Text renderer component
//!
//! Holds the inputs of one text block and the geometry derived from them.
//! Mutations only record what became stale; `recompute()` rebuilds it
//! before the mesh is consumed.

use std::path::Path;

use lumen_text::{
    Bounds, Color, GlyphMetricsProvider, LayoutDiagnostic, LayoutResult, Line, LineBreaker,
    MeshBuilder, TextAlign, TextMesh, WrapPolicy,
};

use crate::config::{validate_bounds, TextRendererConfig};
use crate::fonts::load_font;
use crate::{RenderError, Result};

/// What a mutation left stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Invalidation {
    Clean,
    /// Color or alignment changed: regenerate vertices only
    Mesh,
    /// Text, bounds, wrap policy or font changed: break lines again
    Layout,
}

impl Invalidation {
    fn needs_layout(self) -> bool {
        self == Invalidation::Layout
    }
}

/// Text renderer
pub struct TextRenderer {
    text: String,
    bounds: Bounds,
    color: Color,
    overflow_wrap: WrapPolicy,
    horizontal_align: TextAlign,
    vertical_align: TextAlign,
    font: Option<Box<dyn GlyphMetricsProvider>>,
    dirty: Invalidation,
    layout: LayoutResult,
    mesh: TextMesh,
}

impl TextRenderer {
    /// Create an empty renderer with no font
    pub fn new() -> Self {
        Self {
            text: String::new(),
            bounds: Bounds::unbounded(),
            color: Color::WHITE,
            overflow_wrap: WrapPolicy::Normal,
            horizontal_align: TextAlign::Start,
            vertical_align: TextAlign::Start,
            font: None,
            dirty: Invalidation::Layout,
            layout: LayoutResult::empty(),
            mesh: TextMesh::default(),
        }
    }

    /// Create a renderer using the given font
    pub fn with_font(font: Box<dyn GlyphMetricsProvider>) -> Self {
        let mut renderer = Self::new();
        renderer.font = Some(font);
        renderer
    }

    /// Build a renderer from configuration, loading its font.
    ///
    /// Font paths are resolved relative to `base_dir`.
    pub fn from_config(config: &TextRendererConfig, base_dir: &Path) -> Result<Self> {
        config.validate()?;
        let font = load_font(&config.font, config.font_size, base_dir)?;

        let mut renderer = Self::with_font(font);
        renderer.text = config.text.clone();
        renderer.bounds = config.bounds;
        renderer.color = config.color;
        renderer.overflow_wrap = config.overflow_wrap;
        renderer.horizontal_align = config.horizontal_align;
        renderer.vertical_align = config.vertical_align;
        Ok(renderer)
    }

    fn invalidate(&mut self, kind: Invalidation) {
        self.dirty = self.dirty.max(kind);
    }

    // === Inputs ===

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate(Invalidation::Layout);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Set the bounding box. Negative or non-finite extents are rejected.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        validate_bounds(bounds)?;
        self.bounds = bounds;
        self.invalidate(Invalidation::Layout);
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.invalidate(Invalidation::Mesh);
    }

    pub fn overflow_wrap(&self) -> WrapPolicy {
        self.overflow_wrap
    }

    pub fn set_overflow_wrap(&mut self, wrap: WrapPolicy) {
        self.overflow_wrap = wrap;
        self.invalidate(Invalidation::Layout);
    }

    pub fn horizontal_align(&self) -> TextAlign {
        self.horizontal_align
    }

    pub fn set_horizontal_align(&mut self, align: TextAlign) {
        self.horizontal_align = align;
        self.invalidate(Invalidation::Mesh);
    }

    pub fn vertical_align(&self) -> TextAlign {
        self.vertical_align
    }

    pub fn set_vertical_align(&mut self, align: TextAlign) {
        self.vertical_align = align;
        self.invalidate(Invalidation::Mesh);
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn font(&self) -> Option<&dyn GlyphMetricsProvider> {
        self.font.as_deref()
    }

    pub fn set_font(&mut self, font: Box<dyn GlyphMetricsProvider>) {
        self.font = Some(font);
        self.invalidate(Invalidation::Layout);
    }

    // === Derived geometry ===

    /// True when the layout or mesh no longer matches the inputs
    pub fn is_dirty(&self) -> bool {
        self.dirty != Invalidation::Clean
    }

    /// Rebuild whatever is stale. Returns `false` when nothing was.
    ///
    /// The previous layout and mesh stay in place until the new ones are
    /// complete and validated; on error they are left untouched.
    pub fn recompute(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        let font = self.font.as_deref().ok_or(RenderError::NoFont)?;

        let fresh = if self.dirty.needs_layout() {
            let layout = LineBreaker::new(self.overflow_wrap, self.bounds.width)
                .break_lines(&self.text, font);
            layout.validate()?;
            Some(layout)
        } else {
            None
        };
        let layout = fresh.as_ref().unwrap_or(&self.layout);

        let mesh = MeshBuilder::new(self.bounds)
            .horizontal_align(self.horizontal_align)
            .vertical_align(self.vertical_align)
            .color(self.color)
            .build(layout, font)?;

        tracing::debug!(
            "Text recomputed: {} lines, {} vertices, {} indices",
            layout.line_count(),
            mesh.vertex_count(),
            mesh.index_count()
        );

        if let Some(layout) = fresh {
            self.layout = layout;
        }
        self.mesh = mesh;
        self.dirty = Invalidation::Clean;
        Ok(true)
    }

    /// Last computed layout
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn lines(&self) -> &[Line] {
        self.layout.lines()
    }

    pub fn diagnostics(&self) -> &[LayoutDiagnostic] {
        self.layout.diagnostics()
    }

    /// Last computed mesh
    pub fn mesh(&self) -> &TextMesh {
        &self.mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.index_count()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}
