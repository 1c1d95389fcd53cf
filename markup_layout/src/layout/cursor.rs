// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between character offsets and positions.

use peniko::kurbo::{Point, Rect};

use super::TextLayout;
use crate::font::FontSource;

/// Width of the caret rectangle returned by [`TextLayout::locate`].
const CARET_WIDTH: f64 = 1.0;

impl<S: FontSource> TextLayout<S> {
    /// The caret rectangle for `offset`.
    ///
    /// The rectangle is centered on the left edge of the character at
    /// `offset` and spans the height of its line. Returns `None` for offsets
    /// past the end of the text and for empty text.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    pub fn locate(&self, offset: usize) -> Option<Rect> {
        self.assert_laid_out();
        if self.text_len == 0 || offset > self.text_len {
            return None;
        }
        let line = self.line_for_offset(offset);
        let start = self.lines[line].offset;
        let x = f64::from(self.line_offset(line) + self.widths.sum(start..offset));
        let line_height = f64::from(self.options.line_height);
        let top = line_height * line as f64;
        Some(Rect::new(
            x - CARET_WIDTH * 0.5,
            top,
            x + CARET_WIDTH * 0.5,
            top + line_height,
        ))
    }

    /// The offset of the character under `point`.
    ///
    /// This is the first character on the line at `point.y` whose right edge
    /// is past `point.x`. Points past the end of a line map to the end of
    /// that line. Returns `None` for points left or right of the content
    /// width, above the first line or below the last, and for empty text.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Line indices are small and non-negative here."
    )]
    pub fn find(&self, point: Point) -> Option<usize> {
        self.assert_laid_out();
        let width = f64::from(self.options.width);
        let line_height = f64::from(self.options.line_height);
        if self.text_len == 0
            || !(0.0..=width).contains(&point.x)
            || point.y < 0.0
            || line_height <= 0.0
        {
            return None;
        }
        let line = (point.y / line_height).floor() as usize;
        if line >= self.lines.len() {
            return None;
        }
        let start = self.lines[line].offset;
        let next = self.next_line_start(line);
        let mut x = f64::from(self.line_offset(line));
        for (offset, advance) in (start..next).zip(self.widths.widths(start..next)) {
            x += f64::from(*advance);
            if x > point.x {
                return Some(offset);
            }
        }
        Some(self.line_end(line))
    }

    /// The offset at which the line containing `offset` starts.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    pub fn line_start_for(&self, offset: usize) -> usize {
        self.lines[self.line_for_offset(offset)].offset
    }

    /// The last offset on the line containing `offset`.
    ///
    /// This is one before the start of the next line, so it addresses the
    /// separator that ended the line, or the length of the text on the last
    /// line.
    ///
    /// # Panics
    ///
    /// Panics if no layout has run.
    pub fn line_end_for(&self, offset: usize) -> usize {
        self.line_end(self.line_for_offset(offset))
    }

    fn line_end(&self, line: usize) -> usize {
        match self.lines.get(line + 1) {
            Some(next) => next.offset - 1,
            None => self.text_len,
        }
    }
}
