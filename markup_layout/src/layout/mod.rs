// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine: line table, relayout and configuration.

mod cursor;
mod editing;
pub(crate) mod line_break;

use core::fmt;
use core::ops::Range;

use markup_text::{EdgesWorkspace, MarkupText, StyleSet};
use peniko::Color;
use peniko::color::palette;
use peniko::kurbo::Rect;

use crate::font::{FontDescriptor, FontSource, FontVariants};
use crate::metrics::CharWidths;

use self::line_break::{BreakParams, LineBreaker, LineStart, context_start, indent_offset};

/// Configuration of a [`TextLayout`].
#[derive(Clone, Debug)]
pub struct LayoutOptions {
    /// Base font. Markup derives bold, italic and script variants from it.
    pub font: FontDescriptor,
    /// Content width lines are packed into.
    pub width: f32,
    /// Paragraph indent. Positive values indent the first line of each
    /// paragraph, negative values indent every other line.
    pub indent: f32,
    /// Distance between consecutive lines.
    pub line_height: f32,
    /// Default text color.
    pub color: Color,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            width: 400.0,
            indent: 0.0,
            line_height: 20.0,
            color: palette::css::BLACK,
        }
    }
}

/// A contiguous replacement in the buffer: `removed` chars at `at` were
/// replaced by `inserted` chars.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEdit {
    /// Offset of the first changed char.
    pub at: usize,
    /// Number of chars removed at `at`.
    pub removed: usize,
    /// Number of chars inserted at `at`.
    pub inserted: usize,
}

/// Incremental layout of one [`MarkupText`] into lines of a fixed width.
///
/// The layout owns derived state only: the advance of every character and
/// the offsets at which lines start. The text itself is passed to every
/// operation that needs it. Edits should be made through
/// [`TextLayout::insert`] and [`TextLayout::remove`] so that both stay in
/// step with the buffer.
///
/// Geometry queries require at least one call to [`TextLayout::relayout`].
pub struct TextLayout<S: FontSource> {
    fonts: FontVariants<S>,
    options: LayoutOptions,
    widths: CharWidths,
    lines: Vec<LineStart>,
    /// Length of the buffer `lines` was built for.
    text_len: usize,
    /// Parameters `lines` was built with.
    broken_with: Option<BreakParams>,
    /// Every width must be measured again before the next layout.
    remeasure: bool,
    ascent: f32,
    descent: f32,
    edges: EdgesWorkspace,
}

impl<S: FontSource> TextLayout<S> {
    /// Create a layout with default options resolving fonts from `source`.
    pub fn new(source: S) -> Self {
        Self::with_options(source, LayoutOptions::default())
    }

    /// Create a layout with `options` resolving fonts from `source`.
    pub fn with_options(source: S, options: LayoutOptions) -> Self {
        Self {
            fonts: FontVariants::new(source),
            options,
            widths: CharWidths::default(),
            lines: Vec::new(),
            text_len: 0,
            broken_with: None,
            remeasure: true,
            ascent: 0.0,
            descent: 0.0,
            edges: EdgesWorkspace::new(),
        }
    }

    /// The current options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The base font.
    pub fn font(&self) -> &FontDescriptor {
        &self.options.font
    }

    /// Set the base font.
    ///
    /// Resolved fonts are dropped and every character is measured again by
    /// the next relayout, whether or not it preserves widths.
    pub fn set_font(&mut self, font: FontDescriptor) {
        self.options.font = font;
        self.invalidate_fonts();
    }

    /// The content width.
    pub fn width(&self) -> f32 {
        self.options.width
    }

    /// Set the content width. Takes effect on the next relayout.
    pub fn set_width(&mut self, width: f32) {
        self.options.width = width;
    }

    /// The paragraph indent.
    pub fn indent(&self) -> f32 {
        self.options.indent
    }

    /// Set the paragraph indent. Takes effect on the next relayout.
    pub fn set_indent(&mut self, indent: f32) {
        self.options.indent = indent;
    }

    /// The distance between consecutive lines.
    pub fn line_height(&self) -> f32 {
        self.options.line_height
    }

    /// Set the distance between consecutive lines.
    pub fn set_line_height(&mut self, line_height: f32) {
        self.options.line_height = line_height;
    }

    /// The default text color.
    pub fn color(&self) -> Color {
        self.options.color
    }

    /// Set the default text color.
    pub fn set_color(&mut self, color: Color) {
        self.options.color = color;
    }

    /// The font source.
    pub fn font_source(&self) -> &S {
        self.fonts.source()
    }

    /// Mutable access to the font source, for example to register fonts.
    ///
    /// Resolved fonts are dropped as if [`TextLayout::set_font`] was called.
    pub fn font_source_mut(&mut self) -> &mut S {
        self.invalidate_fonts();
        self.fonts.source_mut()
    }

    /// The measured advance of every character.
    pub fn widths(&self) -> &CharWidths {
        &self.widths
    }

    fn invalidate_fonts(&mut self) {
        self.fonts.clear();
        self.remeasure = true;
    }

    /// Lay out `text` from scratch.
    ///
    /// With `preserve_widths` the measured advances are reused; otherwise
    /// every character is measured again first. Advances are always measured
    /// again after a font change.
    pub fn relayout(&mut self, text: &MarkupText, preserve_widths: bool) {
        self.measure(text, preserve_widths);
        let params = self.break_params();
        self.lines.clear();
        self.lines.extend(LineBreaker::new(
            text.chars(),
            self.widths.as_slice(),
            params,
            0,
        ));
        self.finish(text, params);
        log::debug!(
            "relayout: {} chars in {} lines",
            text.len(),
            self.lines.len()
        );
    }

    /// Update the line table after `edit`, reusing the lines it cannot have
    /// affected.
    ///
    /// The widths of every character outside the edited region must already
    /// be current; [`TextLayout::insert`], [`TextLayout::remove`] and
    /// [`TextLayout::restyle`] ensure this. Line breaking starts again one
    /// line before the edited line and stops at the first line start past
    /// the edit that the previous table already had; the rest of the
    /// previous table is reused shifted by the edit. The result is the same
    /// as that of a full width-preserving relayout.
    ///
    /// Falls back to a full relayout when the configuration changed since
    /// the last layout.
    pub fn partial_relayout(&mut self, text: &MarkupText, edit: TextEdit) {
        let params = self.break_params();
        let reusable = !self.remeasure
            && self.broken_with == Some(params)
            && !self.lines.is_empty()
            && self.widths.len() == text.len()
            && edit.at + edit.removed <= self.text_len
            && self.text_len + edit.inserted == text.len() + edit.removed;
        if !reusable {
            self.relayout(text, true);
            return;
        }

        let old = core::mem::take(&mut self.lines);
        let edited_line = old.partition_point(|line| line.offset <= edit.at) - 1;
        // The line before the edit may now take the edited line's first bit.
        let restart = edited_line.saturating_sub(1);
        let edit_end = edit.at + edit.inserted;
        let chars = text.chars();

        self.lines.extend_from_slice(&old[..restart]);
        let mut resume = None;
        for line in LineBreaker::new(chars, self.widths.as_slice(), params, old[restart].offset) {
            self.lines.push(line);
            if line.offset <= edit_end
                || !context_start(chars, line.offset).is_some_and(|start| start >= edit_end)
            {
                continue;
            }
            let old_offset = line.offset - edit.inserted + edit.removed;
            if let Ok(index) = old.binary_search_by_key(&old_offset, |old_line| old_line.offset) {
                resume = Some(index);
                break;
            }
        }
        if let Some(index) = resume {
            log::trace!(
                "partial relayout: re-broke lines {}..{}, reused {}",
                restart,
                self.lines.len(),
                old.len() - index - 1
            );
            self.lines.extend(old[index + 1..].iter().map(|line| LineStart {
                offset: line.offset + edit.inserted - edit.removed,
                paragraph: line.paragraph,
            }));
        }
        self.finish(text, params);
    }

    /// Measure `range` again after its markup changed, then update the line
    /// table.
    pub fn restyle(&mut self, text: &MarkupText, range: Range<usize>) {
        if self.remeasure || self.widths.len() != text.len() {
            self.relayout(text, false);
            return;
        }
        let end = range.end.min(text.len());
        let start = range.start.min(end);
        let edges = self.edges.build(text.markups());
        self.widths
            .recompute(text, &edges, &mut self.fonts, &self.options.font, start..end);
        self.partial_relayout(
            text,
            TextEdit {
                at: start,
                removed: end - start,
                inserted: end - start,
            },
        );
    }

    /// Measure the characters of `text` unless the current widths can be
    /// reused.
    fn measure(&mut self, text: &MarkupText, preserve_widths: bool) {
        let in_sync = self.widths.len() == text.len();
        debug_assert!(
            !preserve_widths || self.remeasure || in_sync,
            "buffer of {} chars edited without going through TextLayout ({} widths)",
            text.len(),
            self.widths.len()
        );
        if !preserve_widths || self.remeasure || !in_sync {
            let edges = self.edges.build(text.markups());
            self.widths
                .rebuild(text, &edges, &mut self.fonts, &self.options.font);
            self.remeasure = false;
        }
    }

    fn break_params(&mut self) -> BreakParams {
        let space_width = self
            .fonts
            .variant(&self.options.font, StyleSet::empty())
            .advance(' ');
        BreakParams {
            width: self.options.width,
            indent: self.options.indent,
            space_width,
        }
    }

    fn finish(&mut self, text: &MarkupText, params: BreakParams) {
        let base = self.fonts.variant(&self.options.font, StyleSet::empty());
        self.ascent = base.ascent();
        self.descent = base.descent();
        self.text_len = text.len();
        self.broken_with = Some(params);
    }

    /// Returns `true` once a layout has run.
    pub fn is_laid_out(&self) -> bool {
        !self.lines.is_empty()
    }

    /// The size of the laid out text: the content width by the height of
    /// all lines. Empty text has an empty box.
    pub fn bounding_box(&self) -> Rect {
        if self.text_len == 0 {
            return Rect::ZERO;
        }
        Rect::new(
            0.0,
            0.0,
            f64::from(self.options.width),
            f64::from(self.options.line_height) * self.lines.len() as f64,
        )
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Offsets at which lines start, in increasing order. The first is zero.
    pub fn line_starts(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.lines.iter().map(|line| line.offset)
    }

    /// The chars on `line`, including its trailing separator.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = self.lines.get(line)?.offset;
        Some(start..self.next_line_start(line))
    }

    /// Index of the line containing `offset`.
    ///
    /// Offsets past the end belong to the last line.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.assert_laid_out();
        self.lines.partition_point(|line| line.offset <= offset) - 1
    }

    fn next_line_start(&self, line: usize) -> usize {
        self.lines
            .get(line + 1)
            .map_or(self.text_len, |next| next.offset)
    }

    /// Horizontal offset of `line` due to the indent.
    pub(crate) fn line_offset(&self, line: usize) -> f32 {
        indent_offset(self.options.indent, self.lines[line].paragraph)
    }

    /// Distance from the top of a line to its baseline.
    pub(crate) fn baseline(&self) -> f32 {
        let leading = self.options.line_height - (self.ascent + self.descent);
        leading * 0.5 + self.ascent
    }

    pub(crate) fn assert_laid_out(&self) {
        assert!(
            self.is_laid_out(),
            "TextLayout queried before relayout was called"
        );
    }
}

impl<S: FontSource> fmt::Debug for TextLayout<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayout")
            .field("options", &self.options)
            .field("text_len", &self.text_len)
            .field("lines", &self.lines.len())
            .finish_non_exhaustive()
    }
}
