//! Integration tests - Configuration to mesh
//!
//! Tests the complete workflow: JSON config → font → lines → mesh

use std::path::{Path, PathBuf};

use lumen_render::{
    Bounds, Color, FontSelection, RenderError, TextAlign, TextRenderer, TextRendererConfig,
    WrapPolicy,
};

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn trimmed_lines(renderer: &TextRenderer) -> Vec<String> {
    (0..renderer.lines().len())
        .filter_map(|i| renderer.layout().line_text(i))
        .map(|s| s.trim_end().to_string())
        .collect()
}

// ============================================================================
// DEMO CONFIGS
// ============================================================================

#[test]
fn test_monospace_demo() {
    let dir = demos_dir();
    let config = TextRendererConfig::load(&dir.join("hello.json")).unwrap();
    assert_eq!(config.overflow_wrap, WrapPolicy::BreakWord);
    assert_eq!(config.horizontal_align, TextAlign::Center);

    let mut renderer = TextRenderer::from_config(&config, &dir).unwrap();
    assert!(renderer.recompute().unwrap());

    assert!(renderer.lines().len() > 2);
    assert!(renderer.diagnostics().is_empty());
    let visible = renderer.layout().visible_count();
    assert_eq!(renderer.vertex_count(), visible * 4);
    assert_eq!(renderer.index_count(), visible * 6);
    assert!(renderer.mesh().colors.iter().all(|c| *c == config.color));
}

#[test]
fn test_pixel_font_demo() {
    let dir = demos_dir();
    let config = TextRendererConfig::load(&dir.join("pixel.json")).unwrap();
    assert_eq!(config.horizontal_align, TextAlign::End);

    let mut renderer = TextRenderer::from_config(&config, &dir).unwrap();
    renderer.recompute().unwrap();

    assert_eq!(
        trimmed_lines(&renderer),
        vec!["HELLO", "WORLD,", "PIXEL", "FONTS ARE", "FUN!"]
    );
    assert!(renderer.diagnostics().is_empty());

    // "HELLO" is 30 wide, flush against the 60 wide bound
    let first = renderer.mesh().positions[0];
    assert_eq!(first, [30.0, 0.0, 0.0]);
    assert_eq!(renderer.mesh().positions[1], [30.0, 7.0, 0.0]);

    // Second line sits one line height (9) lower
    let second_line_start = renderer.lines()[1].start * 4;
    assert_eq!(renderer.mesh().positions[second_line_start][1], -9.0);
}

#[test]
fn test_pixel_font_reports_missing_glyphs() {
    let dir = demos_dir();
    let mut config = TextRendererConfig::load(&dir.join("pixel.json")).unwrap();
    config.text = "lower case".to_string();

    let mut renderer = TextRenderer::from_config(&config, &dir).unwrap();
    renderer.recompute().unwrap();

    // Every letter is missing, the space is not
    assert_eq!(renderer.diagnostics().len(), 9);
    assert_eq!(renderer.vertex_count(), 10 * 4);
}

// ============================================================================
// RENDERER LIFECYCLE
// ============================================================================

#[test]
fn test_edit_cycle() {
    let config = TextRendererConfig::from_json(
        r#"{ "bounds": [60, 40], "text": "one two three", "fontSize": 10 }"#,
    )
    .unwrap();
    let mut renderer = TextRenderer::from_config(&config, Path::new(".")).unwrap();

    renderer.recompute().unwrap();
    assert_eq!(trimmed_lines(&renderer), vec!["one two", "three"]);

    renderer.set_bounds(Bounds::unbounded()).unwrap();
    renderer.recompute().unwrap();
    assert_eq!(trimmed_lines(&renderer), vec!["one two three"]);

    renderer.set_text("one\rtwo");
    renderer.recompute().unwrap();
    assert_eq!(trimmed_lines(&renderer), vec!["one", "two"]);

    let before = renderer.mesh().clone();
    assert!(!renderer.recompute().unwrap());
    assert_eq!(renderer.mesh(), &before);
}

#[test]
fn test_recompute_twice_is_identical() {
    let config = TextRendererConfig::from_json(
        r#"{ "bounds": [50, 30], "text": "justify me across lines please",
             "horizontalAlign": "justify", "verticalAlign": "justify" }"#,
    )
    .unwrap();

    let mut a = TextRenderer::from_config(&config, Path::new(".")).unwrap();
    let mut b = TextRenderer::from_config(&config, Path::new(".")).unwrap();
    a.recompute().unwrap();
    b.recompute().unwrap();

    assert_eq!(a.lines(), b.lines());
    assert_eq!(a.mesh(), b.mesh());
}

#[test]
fn test_color_only_change() {
    let mut renderer = TextRenderer::from_config(
        &TextRendererConfig {
            text: "tint".to_string(),
            ..TextRendererConfig::default()
        },
        Path::new("."),
    )
    .unwrap();
    renderer.recompute().unwrap();

    renderer.set_color(Color::BLACK);
    renderer.recompute().unwrap();
    assert_eq!(renderer.mesh().colors.len(), 16);
    assert!(renderer.mesh().colors.iter().all(|c| *c == Color::BLACK));
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_font_file_fails_construction() {
    let config = TextRendererConfig {
        font: FontSelection::Serialized {
            path: PathBuf::from("fonts/nope.json"),
        },
        ..TextRendererConfig::default()
    };
    let result = TextRenderer::from_config(&config, &demos_dir());
    assert!(matches!(result, Err(RenderError::Text(_))));
}

#[test]
fn test_invalid_config_rejected() {
    let config = TextRendererConfig {
        bounds: Bounds::new(f32::NAN, 0.0),
        ..TextRendererConfig::default()
    };
    let result = TextRenderer::from_config(&config, Path::new("."));
    assert!(matches!(result, Err(RenderError::Config(_))));
}

#[test]
fn test_missing_config_file() {
    let err = TextRendererConfig::load(Path::new("/nonexistent/lumen.json")).unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
}
