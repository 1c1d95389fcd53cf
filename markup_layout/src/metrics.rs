// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-character advance widths kept in lock-step with the text buffer.

use core::ops::Range;

use markup_text::{MarkupEdges, MarkupText};

use crate::font::{FontDescriptor, FontSource, FontVariants};

/// The advance of every character in a buffer, under the style active there.
///
/// Entry `i` is the width of character `i`. Edits shift the table and only
/// the changed region is measured again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharWidths {
    widths: Vec<f32>,
}

impl CharWidths {
    /// Number of measured characters.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Returns `true` if nothing is measured.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// All widths.
    pub fn as_slice(&self) -> &[f32] {
        &self.widths
    }

    /// Widths of the characters in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn widths(&self, range: Range<usize>) -> &[f32] {
        &self.widths[range]
    }

    /// Total advance of the characters in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn sum(&self, range: Range<usize>) -> f32 {
        self.widths[range].iter().sum()
    }

    /// Measure every character of `text` from scratch.
    pub(crate) fn rebuild<S: FontSource>(
        &mut self,
        text: &MarkupText,
        edges: &MarkupEdges,
        fonts: &mut FontVariants<S>,
        base: &FontDescriptor,
    ) {
        self.widths.clear();
        self.widths.resize(text.len(), 0.0);
        self.recompute(text, edges, fonts, base, 0..text.len());
    }

    /// Measure the characters in `range` again.
    pub(crate) fn recompute<S: FontSource>(
        &mut self,
        text: &MarkupText,
        edges: &MarkupEdges,
        fonts: &mut FontVariants<S>,
        base: &FontDescriptor,
        range: Range<usize>,
    ) {
        debug_assert_eq!(self.widths.len(), text.len(), "width table out of sync");
        let chars = text.chars();
        for (segment, styles) in edges.segments(range) {
            let variant = fonts.variant(base, styles);
            for index in segment {
                self.widths[index] = variant.advance(chars[index]);
            }
        }
    }

    /// Open `len` unmeasured entries at `at`.
    pub(crate) fn insert_gap(&mut self, at: usize, len: usize) {
        self.widths.splice(at..at, core::iter::repeat_n(0.0, len));
    }

    /// Drop the entries in `range`.
    pub(crate) fn remove(&mut self, range: Range<usize>) {
        self.widths.drain(range);
    }
}
