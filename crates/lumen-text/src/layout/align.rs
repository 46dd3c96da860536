//! Alignment
//!
//! Pen origins for each alignment mode. Computed once per layout pass.

use super::TextAlign;

/// Vertical pen placement for the whole block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    /// Baseline of the first line
    pub pen_y: f32,
    /// Distance the pen drops between lines
    pub line_height: f32,
}

/// Horizontal pen placement for one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalMetrics {
    /// Pen position before `start_adjust` is applied
    pub pen_x: f32,
    /// Spacing added after every glyph
    pub extra_advance: f32,
}

/// Alignment calculator
pub struct AlignmentCalculator;

impl AlignmentCalculator {
    /// Place the block of `line_count` lines inside a box `bound_height` tall
    pub fn vertical(
        align: TextAlign,
        line_count: usize,
        bound_height: f32,
        font_line_height: f32,
    ) -> VerticalMetrics {
        let lines = line_count as f32;
        match align {
            TextAlign::Start => VerticalMetrics {
                pen_y: 0.0,
                line_height: font_line_height,
            },
            TextAlign::Center => VerticalMetrics {
                pen_y: -(bound_height - lines * font_line_height / 2.0),
                line_height: font_line_height,
            },
            TextAlign::End => VerticalMetrics {
                pen_y: -(bound_height - lines * font_line_height),
                line_height: font_line_height,
            },
            TextAlign::Justify => VerticalMetrics {
                pen_y: 0.0,
                line_height: if line_count > 0 {
                    (bound_height - font_line_height) / lines
                } else {
                    font_line_height
                },
            },
        }
    }

    /// Place one line inside a box `bound_width` wide
    pub fn horizontal(
        align: TextAlign,
        bound_width: f32,
        line_width: f32,
        char_count: usize,
        start_adjust: f32,
    ) -> HorizontalMetrics {
        match align {
            TextAlign::Start => HorizontalMetrics {
                pen_x: 0.0,
                extra_advance: 0.0,
            },
            TextAlign::Center => HorizontalMetrics {
                pen_x: (bound_width - line_width - start_adjust) / 2.0,
                extra_advance: 0.0,
            },
            TextAlign::End => HorizontalMetrics {
                pen_x: bound_width - line_width - start_adjust,
                extra_advance: 0.0,
            },
            TextAlign::Justify => HorizontalMetrics {
                pen_x: 0.0,
                extra_advance: if bound_width > 0.0 && char_count > 0 {
                    (bound_width - line_width) / char_count as f32
                } else {
                    0.0
                },
            },
        }
    }
}
