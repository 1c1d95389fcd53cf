// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buffer edits that keep the width table and line table in step.

use markup_text::MarkupText;

use super::{TextEdit, TextLayout};
use crate::font::FontSource;

impl<S: FontSource> TextLayout<S> {
    /// Insert `insertion` into `text` at char `offset` and update the layout.
    ///
    /// Markup spans are shifted as described on [`MarkupText::insert`]. Only
    /// the inserted characters are measured. Inserting an empty string does
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of `text`.
    pub fn insert(&mut self, text: &mut MarkupText, offset: usize, insertion: &str) {
        if insertion.is_empty() {
            return;
        }
        let in_sync = self.widths_in_sync(text);
        let inserted = text.insert(offset, insertion);
        if in_sync {
            self.widths.insert_gap(offset, inserted);
            let edges = self.edges.build(text.markups());
            self.widths.recompute(
                text,
                &edges,
                &mut self.fonts,
                &self.options.font,
                offset..offset + inserted,
            );
        }
        self.partial_relayout(
            text,
            TextEdit {
                at: offset,
                removed: 0,
                inserted,
            },
        );
    }

    /// Remove `len` chars of `text` starting at `offset` and update the
    /// layout.
    ///
    /// The range is clamped to the text: a negative `offset` shortens the
    /// removal and starts it at zero, and a removal running past the end
    /// stops there. Nothing happens if the clamped length is not positive.
    pub fn remove(&mut self, text: &mut MarkupText, offset: isize, len: isize) {
        let (mut offset, mut len) = (offset, len);
        if offset < 0 {
            len = len.saturating_add(offset);
            offset = 0;
        }
        let text_len = isize::try_from(text.len()).unwrap_or(isize::MAX);
        if offset.saturating_add(len) > text_len {
            len = text_len - offset;
        }
        if len <= 0 {
            return;
        }
        let start = offset.unsigned_abs();
        let range = start..start + len.unsigned_abs();

        let in_sync = self.widths_in_sync(text);
        text.remove(range.clone());
        if in_sync {
            self.widths.remove(range.clone());
        }
        self.partial_relayout(
            text,
            TextEdit {
                at: range.start,
                removed: range.len(),
                inserted: 0,
            },
        );
    }

    fn widths_in_sync(&self, text: &MarkupText) -> bool {
        !self.remeasure && self.widths.len() == text.len()
    }
}
