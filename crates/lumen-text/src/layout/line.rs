//! Line breaking
//!
//! Single forward scan over the source text. Each character is measured
//! once, except after a rewind to the last break opportunity, where the
//! characters following it are measured again as part of the next line.

use super::{LayoutDiagnostic, LayoutResult, Line, WrapPolicy};
use crate::font::{GlyphMetrics, GlyphMetricsProvider};

const CARRIAGE_RETURN: char = '\r';
const LINE_FEED: char = '\n';
const TERMINATOR: char = '\0';

/// Characters a line may wrap after
fn is_breakable(c: char) -> bool {
    c == ' ' || c == '-'
}

/// Last break opportunity on the line being built
#[derive(Debug, Clone, Copy)]
struct Bookmark {
    /// Index of the breakable character in the filtered text
    filtered: usize,
    /// Index of the breakable character in the source text
    source: usize,
    /// Line width if the line were closed right after the breakable character
    width: f32,
}

/// Line under construction
#[derive(Debug)]
struct LineState {
    start: usize,
    /// Sum of all advances added so far
    width: f32,
    /// `width` as of the last non-whitespace character
    content_width: f32,
    start_adjust: f32,
    /// Leading characters pulled back into `start_adjust`
    leading: usize,
    /// The line began because the previous one wrapped
    forced: bool,
    /// Overflowed under `Normal` with nowhere to break yet
    seeking_break: bool,
    bookmark: Option<Bookmark>,
}

impl LineState {
    fn new(start: usize, forced: bool) -> Self {
        Self {
            start,
            width: 0.0,
            content_width: 0.0,
            start_adjust: 0.0,
            leading: 0,
            forced,
            seeking_break: false,
            bookmark: None,
        }
    }

    fn add(&mut self, advance: f32, whitespace: bool) {
        self.width += advance;
        if !whitespace {
            self.content_width = self.width;
        }
    }

    /// Bookmark that can be rewound to without producing an empty line
    fn usable_bookmark(&self) -> Option<Bookmark> {
        self.bookmark.filter(|bm| bm.filtered > self.start)
    }
}

/// Line breaker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBreaker {
    wrap: WrapPolicy,
    /// Horizontal bound; zero or less disables wrapping
    max_width: f32,
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl LineBreaker {
    pub fn new(wrap: WrapPolicy, max_width: f32) -> Self {
        Self { wrap, max_width }
    }

    /// Breaker that only breaks at line terminators
    pub fn unbounded() -> Self {
        Self::new(WrapPolicy::Normal, 0.0)
    }

    pub fn wrap(&self) -> WrapPolicy {
        self.wrap
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    fn is_bounded(&self) -> bool {
        self.max_width > 0.0
    }

    /// Unwrapped advance width of `text`
    pub fn measure<P>(text: &str, provider: &P) -> f32
    where
        P: GlyphMetricsProvider + ?Sized,
    {
        text.chars()
            .filter(|c| !matches!(*c, CARRIAGE_RETURN | LINE_FEED | TERMINATOR))
            .filter_map(|c| provider.glyph(c))
            .map(|m| m.advance_x)
            .sum()
    }

    /// Split `text` into lines and strip line terminators from it
    pub fn break_lines<P>(&self, text: &str, provider: &P) -> LayoutResult
    where
        P: GlyphMetricsProvider + ?Sized,
    {
        let source: Vec<char> = text.chars().collect();
        let mut filtered: Vec<char> = Vec::with_capacity(source.len());
        let mut lines: Vec<Line> = Vec::new();
        let mut diagnostics: Vec<LayoutDiagnostic> = Vec::new();

        let mut line = LineState::new(0, false);
        let mut src = 0;

        loop {
            let c = source.get(src).copied().unwrap_or(TERMINATOR);

            match c {
                TERMINATOR => {
                    let width = line.content_width;
                    commit(&mut lines, &line, filtered.len(), width);
                    break;
                }
                CARRIAGE_RETURN | LINE_FEED => {
                    let width = line.content_width;
                    if commit(&mut lines, &line, filtered.len(), width) {
                        line = LineState::new(filtered.len(), false);
                    } else {
                        // Blank line: nothing to commit, but the wrap state is spent
                        line.forced = false;
                        line.seeking_break = false;
                    }
                    src += 1;
                    if c == CARRIAGE_RETURN && source.get(src) == Some(&LINE_FEED) {
                        src += 1;
                    }
                    continue;
                }
                _ => {}
            }

            let metrics = match provider.glyph(c) {
                Some(metrics) => metrics,
                None => {
                    // Rescans after a rewind revisit earlier indices; report each once
                    let reported = diagnostics.last().is_some_and(|d| match d {
                        LayoutDiagnostic::MissingGlyph { source_index, .. } => *source_index >= src,
                    });
                    if !reported {
                        tracing::warn!("No glyph for {:?} at {}, substituting an empty glyph", c, src);
                        diagnostics.push(LayoutDiagnostic::MissingGlyph { ch: c, source_index: src });
                    }
                    GlyphMetrics::EMPTY
                }
            };

            let index = filtered.len();
            let advance = metrics.advance_x;
            let whitespace = metrics.is_whitespace();
            let breakable = is_breakable(c);

            // Leading whitespace after a wrap is pulled back out of view and
            // never counts toward width or offers a break
            if line.forced && whitespace && index == line.start + line.leading {
                line.start_adjust -= advance;
                line.leading += 1;
                filtered.push(c);
                src += 1;
                continue;
            }

            if line.seeking_break {
                filtered.push(c);
                line.add(advance, whitespace);
                src += 1;
                if breakable {
                    let width = line.content_width;
                    commit(&mut lines, &line, index + 1, width);
                    line = LineState::new(index + 1, true);
                }
                continue;
            }

            let overflows = self.is_bounded() && line.width + advance > self.max_width;

            if overflows && index > line.start + line.leading {
                match self.wrap {
                    WrapPolicy::BreakAll => {
                        let width = line.content_width;
                        commit(&mut lines, &line, index, width);
                        line = LineState::new(index, true);
                        // Reprocess this character as the first of the next line
                        continue;
                    }
                    _ if breakable && whitespace => {
                        // A space may hang past the bound; it never counts toward width
                        filtered.push(c);
                        line.add(advance, whitespace);
                        src += 1;
                        let width = line.content_width;
                        commit(&mut lines, &line, index + 1, width);
                        line = LineState::new(index + 1, true);
                        continue;
                    }
                    _ => {
                        if let Some(bm) = line.usable_bookmark() {
                            filtered.truncate(bm.filtered + 1);
                            commit(&mut lines, &line, bm.filtered + 1, bm.width);
                            line = LineState::new(bm.filtered + 1, true);
                            src = bm.source + 1;
                            continue;
                        }
                        if self.wrap == WrapPolicy::BreakWord {
                            let width = line.content_width;
                            commit(&mut lines, &line, index, width);
                            line = LineState::new(index, true);
                            continue;
                        }
                        if breakable {
                            // Overflowing hyphen with nothing earlier to break at
                            filtered.push(c);
                            line.add(advance, whitespace);
                            src += 1;
                            let width = line.content_width;
                            commit(&mut lines, &line, index + 1, width);
                            line = LineState::new(index + 1, true);
                            continue;
                        }
                        // Normal: the word cannot be broken, let it overflow
                        line.seeking_break = true;
                    }
                }
            } else if overflows && self.wrap == WrapPolicy::Normal {
                // A lone first glyph wider than the bound still has to go somewhere
                line.seeking_break = !breakable;
            }

            filtered.push(c);
            line.add(advance, whitespace);
            if breakable {
                line.bookmark = Some(Bookmark {
                    filtered: index,
                    source: src,
                    width: line.content_width,
                });
            }
            src += 1;
        }

        if lines.is_empty() {
            lines.push(Line::default());
        }

        tracing::trace!("Broke {} chars into {} lines", filtered.len(), lines.len());

        LayoutResult::new(filtered, lines, diagnostics)
    }
}

/// Close the line at `end`. Empty lines are dropped and a wrapped line holding
/// nothing but pulled-back whitespace joins the previous line as trailing
/// whitespace; returns whether the span was committed.
fn commit(lines: &mut Vec<Line>, line: &LineState, end: usize, width: f32) -> bool {
    if end <= line.start {
        return false;
    }
    if line.forced && end == line.start + line.leading {
        if let Some(last) = lines.last_mut() {
            last.end = end;
            return true;
        }
    }
    tracing::trace!("Line {}..{} width {:.2}", line.start, end, width);
    lines.push(Line {
        start: line.start,
        end,
        width,
        start_adjust: line.start_adjust,
    });
    true
}
