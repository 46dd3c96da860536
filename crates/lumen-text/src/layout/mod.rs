//! Text layout module

mod align;
mod line;

pub use align::{AlignmentCalculator, HorizontalMetrics, VerticalMetrics};
pub use line::LineBreaker;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Result, TextError};

/// What to do when a line runs past the horizontal bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapPolicy {
    /// Wrap at the last space or hyphen; an unbreakable word may overflow
    #[default]
    Normal,
    /// Wrap at the last space or hyphen, splitting words that cannot fit
    BreakWord,
    /// Split at the bound regardless of word boundaries
    BreakAll,
}

/// Alignment along one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

/// Normalize a user-facing enum name: `break-word`, `BreakWord` and
/// `break_word` all become `breakword`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Error for unrecognised enum names or ordinals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError(String);

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseEnumError {}

impl FromStr for WrapPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "normal" => Ok(WrapPolicy::Normal),
            "breakword" => Ok(WrapPolicy::BreakWord),
            "breakall" => Ok(WrapPolicy::BreakAll),
            _ => Err(ParseEnumError(format!("unknown overflow wrap {:?}", s))),
        }
    }
}

impl TryFrom<u64> for WrapPolicy {
    type Error = ParseEnumError;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(WrapPolicy::Normal),
            1 => Ok(WrapPolicy::BreakWord),
            2 => Ok(WrapPolicy::BreakAll),
            _ => Err(ParseEnumError(format!("overflow wrap ordinal {} out of range", value))),
        }
    }
}

impl FromStr for TextAlign {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "start" | "left" | "top" => Ok(TextAlign::Start),
            "center" | "middle" => Ok(TextAlign::Center),
            "end" | "right" | "bottom" => Ok(TextAlign::End),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(ParseEnumError(format!("unknown alignment {:?}", s))),
        }
    }
}

impl TryFrom<u64> for TextAlign {
    type Error = ParseEnumError;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(TextAlign::Start),
            1 => Ok(TextAlign::Center),
            2 => Ok(TextAlign::End),
            3 => Ok(TextAlign::Justify),
            _ => Err(ParseEnumError(format!("alignment ordinal {} out of range", value))),
        }
    }
}

/// Serialized form of the enums: a name or a legacy ordinal
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Ordinal(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for WrapPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Ordinal(n) => WrapPolicy::try_from(n),
            EnumRepr::Name(s) => s.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TextAlign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Ordinal(n) => TextAlign::try_from(n),
            EnumRepr::Name(s) => s.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

/// Bounding box the text is laid out in. A zero width disables wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// No wrapping and no vertical extent
    pub fn unbounded() -> Self {
        Self::default()
    }
}

impl From<[f32; 2]> for Bounds {
    fn from([width, height]: [f32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Bounds> for [f32; 2] {
    fn from(bounds: Bounds) -> Self {
        [bounds.width, bounds.height]
    }
}

/// A laid out line of text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Line {
    /// Start index in the filtered text
    pub start: usize,
    /// End index (exclusive) in the filtered text
    pub end: usize,
    /// Advance width, excluding trailing whitespace and whitespace pulled
    /// back into `start_adjust`
    pub width: f32,
    /// Pen offset applied before the first glyph; negative when leading
    /// whitespace after a wrap is pulled out of view
    pub start_adjust: f32,
}

impl Line {
    /// Number of characters in the line
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Non-fatal findings from a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDiagnostic {
    /// The font had no glyph; a zero-advance glyph was used instead
    MissingGlyph { ch: char, source_index: usize },
}

/// Complete line breaking result
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Source text minus line terminators
    text: Vec<char>,
    /// Lines partitioning `text`
    lines: Vec<Line>,
    diagnostics: Vec<LayoutDiagnostic>,
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayoutResult {
    pub(crate) fn new(text: Vec<char>, lines: Vec<Line>, diagnostics: Vec<LayoutDiagnostic>) -> Self {
        Self {
            text,
            lines,
            diagnostics,
        }
    }

    /// Layout of the empty string: one empty line
    pub fn empty() -> Self {
        Self::new(Vec::new(), vec![Line::default()], Vec::new())
    }

    /// Filtered characters
    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Characters of line `index`
    pub fn line_text(&self, index: usize) -> Option<String> {
        self.lines
            .get(index)
            .map(|line| self.text[line.start..line.end].iter().collect())
    }

    /// Characters that end up inside a line span, i.e. get a quad
    pub fn visible_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Widest line
    pub fn max_width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }

    pub fn diagnostics(&self) -> &[LayoutDiagnostic] {
        &self.diagnostics
    }

    /// Check that the lines partition the filtered text
    pub fn validate(&self) -> Result<()> {
        let broken = |line: usize, reason: &'static str| Err(TextError::BrokenLines { line, reason });

        let Some(first) = self.lines.first() else {
            return broken(0, "no lines");
        };
        if first.start != 0 {
            return broken(0, "first line does not start at zero");
        }

        for (i, line) in self.lines.iter().enumerate() {
            if line.end < line.start {
                return broken(i, "line ends before it starts");
            }
            if line.is_empty() && !self.text.is_empty() {
                return broken(i, "empty line in non-empty text");
            }
            if let Some(next) = self.lines.get(i + 1) {
                if next.start != line.end {
                    return broken(i, "gap or overlap with next line");
                }
            }
        }

        if self.lines[self.lines.len() - 1].end != self.text.len() {
            return broken(self.lines.len() - 1, "last line does not reach the end of the text");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: usize, end: usize) -> Line {
        Line {
            start,
            end,
            ..Line::default()
        }
    }

    #[test]
    fn test_enum_names() {
        assert_eq!("breakWord".parse::<WrapPolicy>(), Ok(WrapPolicy::BreakWord));
        assert_eq!("break-all".parse::<WrapPolicy>(), Ok(WrapPolicy::BreakAll));
        assert_eq!("Center".parse::<TextAlign>(), Ok(TextAlign::Center));
        assert_eq!("right".parse::<TextAlign>(), Ok(TextAlign::End));
        assert!("sideways".parse::<TextAlign>().is_err());
    }

    #[test]
    fn test_enum_deserialize() {
        let wrap: WrapPolicy = serde_json::from_str("2").unwrap();
        assert_eq!(wrap, WrapPolicy::BreakAll);
        let align: TextAlign = serde_json::from_str("\"justify\"").unwrap();
        assert_eq!(align, TextAlign::Justify);
        assert!(serde_json::from_str::<TextAlign>("7").is_err());
    }

    #[test]
    fn test_bounds_from_array() {
        let bounds: Bounds = serde_json::from_str("[120.0, 40]").unwrap();
        assert_eq!(bounds, Bounds::new(120.0, 40.0));
    }

    #[test]
    fn test_empty_layout_is_valid() {
        let layout = LayoutResult::empty();
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.visible_count(), 0);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_gap() {
        let layout = LayoutResult::new("abcd".chars().collect(), vec![line(0, 1), line(2, 4)], Vec::new());
        assert!(matches!(layout.validate(), Err(TextError::BrokenLines { line: 0, .. })));
    }

    #[test]
    fn test_validate_detects_short_last_line() {
        let layout = LayoutResult::new("abcd".chars().collect(), vec![line(0, 3)], Vec::new());
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_validate_detects_empty_line() {
        let layout = LayoutResult::new("ab".chars().collect(), vec![line(0, 2), line(2, 2)], Vec::new());
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_line_text() {
        let layout = LayoutResult::new("abcd".chars().collect(), vec![line(0, 1), line(1, 4)], Vec::new());
        assert!(layout.validate().is_ok());
        assert_eq!(layout.line_text(1).as_deref(), Some("bcd"));
        assert_eq!(layout.line_text(2), None);
    }

    #[test]
    fn test_line_len() {
        let l = Line {
            start: 2,
            end: 5,
            width: 12.0,
            start_adjust: -4.0,
        };
        assert_eq!(l.len(), 3);
        assert!(!l.is_empty());
    }
}
