// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting visible lines into styled runs for drawing.

use core::ops::Range;

use markup_text::{MarkupEdges, MarkupText, StyleSet};
use peniko::Color;
use peniko::kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::font::{FontDescriptor, FontSource};
use crate::layout::TextLayout;

/// A maximal piece of one line with a single style set.
#[derive(Clone, Debug)]
pub struct TextRun {
    /// The characters of the run.
    pub text: String,
    /// Char range of the run in the buffer.
    pub range: Range<usize>,
    /// Styles active over the whole run.
    pub styles: StyleSet,
    /// Index of the line the run is on.
    pub line: usize,
    /// Start of the run on its baseline, including any script shift.
    pub origin: Point,
    /// Total advance of the run.
    pub advance: f32,
    /// Font to draw the run with.
    pub font: FontDescriptor,
    /// Text color.
    pub color: Color,
}

/// A line drawn along or behind a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decoration {
    /// Below the baseline, for underlined text and links.
    Underline,
    /// Through the middle of lowercase letters.
    StrikeThrough,
    /// Behind the whole line band, for emphasized text.
    Highlight,
}

/// Receives the output of [`TextLayout::render`].
pub trait RenderTarget {
    /// Draw one run of text.
    fn draw_run(&mut self, run: &TextRun);

    /// Fill the area of a decoration of `run`.
    ///
    /// Highlights are emitted before the run they belong to, other
    /// decorations after it. The default implementation ignores decorations.
    fn fill_decoration(&mut self, decoration: Decoration, area: Rect, run: &TextRun) {
        let _ = (decoration, area, run);
    }
}

/// Runs of a single line.
pub type LineRuns = SmallVec<[TextRun; 4]>;

type Decorations = SmallVec<[Decoration; 3]>;

impl<S: FontSource> TextLayout<S> {
    /// Emit the runs of every line intersecting `visible` to `target`.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    pub fn render(&self, text: &MarkupText, target: &mut impl RenderTarget, visible: Rect) {
        self.assert_laid_out();
        let lines = self.visible_lines(visible);
        if lines.is_empty() {
            return;
        }
        let edges = text.edges();
        for line in lines {
            for run in self.runs_with(text, &edges, line) {
                let (behind, over): (Decorations, Decorations) = decorations(run.styles)
                    .partition(|decoration| *decoration == Decoration::Highlight);
                for decoration in behind {
                    target.fill_decoration(decoration, self.decoration_area(decoration, &run), &run);
                }
                target.draw_run(&run);
                for decoration in over {
                    target.fill_decoration(decoration, self.decoration_area(decoration, &run), &run);
                }
            }
        }
    }

    /// The runs of `line`, or none if there is no such line.
    ///
    /// The newline ending a paragraph is not part of any run.
    pub fn line_runs(&self, text: &MarkupText, line: usize) -> LineRuns {
        if line >= self.line_count() {
            return LineRuns::new();
        }
        self.runs_with(text, &text.edges(), line)
    }

    /// Lines intersecting the vertical extent of `visible`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Line indices are clamped to the line count."
    )]
    pub fn visible_lines(&self, visible: Rect) -> Range<usize> {
        let line_height = f64::from(self.line_height());
        let count = self.line_count();
        if line_height <= 0.0 || count == 0 {
            return 0..0;
        }
        let first = (visible.y0 / line_height).floor().max(0.0) as usize;
        let last = (visible.y1 / line_height).ceil().max(0.0) as usize;
        first.min(count)..last.min(count)
    }

    fn runs_with(&self, text: &MarkupText, edges: &MarkupEdges, line: usize) -> LineRuns {
        let mut runs = LineRuns::new();
        let Some(mut range) = self.line_range(line) else {
            return runs;
        };
        if range.end > range.start && text.char_at(range.end - 1) == Some('\n') {
            range.end -= 1;
        }
        let base = self.font();
        let baseline = f64::from(self.line_height()) * line as f64 + f64::from(self.baseline());
        let mut x = self.line_offset(line);
        for (segment, styles) in edges.segments(range) {
            let advance = self.widths().sum(segment.clone());
            let shift = base.baseline_shift(styles);
            runs.push(TextRun {
                text: text.slice(segment.clone()),
                range: segment,
                styles,
                line,
                origin: Point::new(f64::from(x), baseline + f64::from(shift)),
                advance,
                font: base.variant(styles),
                color: self.color(),
            });
            x += advance;
        }
        runs
    }

    fn decoration_area(&self, decoration: Decoration, run: &TextRun) -> Rect {
        let x0 = run.origin.x;
        let x1 = x0 + f64::from(run.advance);
        let size = f64::from(run.font.size);
        let thickness = (size / 14.0).max(1.0);
        match decoration {
            Decoration::Underline => {
                let y = run.origin.y + size * 0.1;
                Rect::new(x0, y, x1, y + thickness)
            }
            Decoration::StrikeThrough => {
                let y = run.origin.y - size * 0.3;
                Rect::new(x0, y - thickness * 0.5, x1, y + thickness * 0.5)
            }
            Decoration::Highlight => {
                let line_height = f64::from(self.line_height());
                let top = line_height * run.line as f64;
                Rect::new(x0, top, x1, top + line_height)
            }
        }
    }
}

fn decorations(styles: StyleSet) -> impl Iterator<Item = Decoration> {
    [
        (StyleSet::EMPHASIZE, Decoration::Highlight),
        (StyleSet::UNDERLINE | StyleSet::LINK, Decoration::Underline),
        (StyleSet::STRIKE_THROUGH, Decoration::StrikeThrough),
    ]
    .into_iter()
    .filter(move |(flags, _)| styles.intersects(*flags))
    .map(|(_, decoration)| decoration)
}
