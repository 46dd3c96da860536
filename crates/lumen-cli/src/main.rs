//! Lumen CLI - Main Entry Point
//!
//! Usage: `lumen <config.json> [text]`
//!
//! Lays out the configured text block and prints its lines and mesh sizes.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use lumen_render::{LayoutDiagnostic, TextRenderer, TextRendererConfig};
use lumen_text::LineBreaker;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next().map(PathBuf::from) else {
        bail!("usage: lumen <config.json> [text]");
    };
    let text_override = args.next();

    let mut config = TextRendererConfig::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(text) = text_override {
        config.text = text;
    }

    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let mut renderer =
        TextRenderer::from_config(&config, base_dir).context("failed to set up text renderer")?;
    renderer.recompute().context("layout failed")?;

    info!(
        "Laid out {} chars in {} lines ({}x{} bounds, {:?} wrap)",
        renderer.layout().text().len(),
        renderer.lines().len(),
        config.bounds.width,
        config.bounds.height,
        config.overflow_wrap
    );

    for (i, line) in renderer.lines().iter().enumerate() {
        let text = renderer.layout().line_text(i).unwrap_or_default();
        println!(
            "{:>3} [{:>4}, {:>4}) width {:>8.2} adjust {:>6.2} | {}",
            i,
            line.start,
            line.end,
            line.width,
            line.start_adjust,
            text.trim_end()
        );
    }

    let unwrapped = renderer
        .font()
        .map(|font| LineBreaker::measure(&config.text, font))
        .unwrap_or_default();
    println!(
        "{} vertices, {} indices, widest line {:.2} (unwrapped {:.2})",
        renderer.vertex_count(),
        renderer.index_count(),
        renderer.layout().max_width(),
        unwrapped
    );

    for diagnostic in renderer.diagnostics() {
        match diagnostic {
            LayoutDiagnostic::MissingGlyph { ch, source_index } => {
                println!("missing glyph {:?} at {}", ch, source_index);
            }
        }
    }

    Ok(())
}
