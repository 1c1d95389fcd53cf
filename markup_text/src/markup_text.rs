// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::span::validate_range;
use crate::{Error, MarkupEdges, MarkupId, MarkupSpan, MarkupStyle, StyleSet};

/// A character buffer with markup spans applied to ranges within it.
///
/// Every span satisfies `start <= end <= len()` after every operation.
#[derive(Clone, Debug, Default)]
pub struct MarkupText {
    chars: Vec<char>,
    spans: Vec<MarkupSpan>,
    next_id: u64,
    clock: u64,
}

impl MarkupText {
    /// Create a `MarkupText` with no markups applied.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            ..Self::default()
        }
    }

    /// Returns the length of the buffer, in chars.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Borrow the buffer contents.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The character at `offset`, if any.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The whole buffer as a `String`.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The chars in `range` as a `String`.
    ///
    /// # Panics
    ///
    /// If `range` is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    /// Apply `style` to `range`.
    ///
    /// Spans of the same style that overlap or touch `range` are merged with it
    /// into a single span, whose id is returned. Applying
    /// [`MarkupStyle::Normal`] or an empty range does nothing and returns
    /// `Ok(None)`.
    pub fn apply_markup(
        &mut self,
        style: MarkupStyle,
        range: Range<usize>,
    ) -> Result<Option<MarkupId>, Error> {
        validate_range(&range, self.len())?;
        if range.is_empty() || style == MarkupStyle::Normal {
            return Ok(None);
        }

        let mut start = range.start;
        let mut end = range.end;
        let mut kept: Option<MarkupId> = None;
        self.spans.retain(|span| {
            if span.style != style || !span.touches(range.clone()) {
                return true;
            }
            start = start.min(span.start);
            end = end.max(span.end);
            if kept.is_none() {
                kept = Some(span.id);
            }
            false
        });

        let id = kept.unwrap_or_else(|| self.allocate_id());
        let created_at = self.tick();
        self.spans.push(MarkupSpan {
            id,
            style,
            start,
            end,
            created_at,
        });
        Ok(Some(id))
    }

    /// Remove the span with the given `id`, returning it.
    pub fn remove_markup(&mut self, id: MarkupId) -> Option<MarkupSpan> {
        let index = self.spans.iter().position(|span| span.id == id)?;
        Some(self.spans.remove(index))
    }

    /// Apply `style` to `range`, or remove it if a span of `style` covers
    /// exactly `range` already.
    ///
    /// Returns the id of the applied span, or `None` if a span was removed or
    /// nothing changed.
    pub fn toggle_markup(
        &mut self,
        style: MarkupStyle,
        range: Range<usize>,
    ) -> Result<Option<MarkupId>, Error> {
        validate_range(&range, self.len())?;
        let existing = self
            .spans
            .iter()
            .find(|span| span.style == style && span.range() == range)
            .map(MarkupSpan::id);
        match existing {
            Some(id) => {
                self.remove_markup(id);
                Ok(None)
            }
            None => self.apply_markup(style, range),
        }
    }

    /// Iterate over all spans.
    ///
    /// Spans are yielded in the order they were last created or merged.
    pub fn markups(&self) -> impl ExactSizeIterator<Item = &MarkupSpan> {
        self.spans.iter()
    }

    /// Returns the number of spans.
    pub fn markups_len(&self) -> usize {
        self.spans.len()
    }

    /// Look up a span by id.
    pub fn markup(&self, id: MarkupId) -> Option<&MarkupSpan> {
        self.spans.iter().find(|span| span.id == id)
    }

    /// Remove all spans.
    pub fn clear_markups(&mut self) {
        self.spans.clear();
    }

    /// The first span of `style` whose extent touches `offset`.
    pub fn markup_at(&self, offset: usize, style: MarkupStyle) -> Option<&MarkupSpan> {
        self.markup_in(offset..offset, style)
    }

    /// The first span of `style` whose extent touches `range`.
    pub fn markup_in(&self, range: Range<usize>, style: MarkupStyle) -> Option<&MarkupSpan> {
        self.spans
            .iter()
            .find(|span| span.style == style && span.touches(range.clone()))
    }

    /// The union of the styles of all spans covering `offset`.
    pub fn styles_at(&self, offset: usize) -> StyleSet {
        self.spans
            .iter()
            .filter(|span| span.range().contains(&offset))
            .fold(StyleSet::empty(), |acc, span| acc | span.style.flag())
    }

    /// Build the style transition table for the current spans.
    pub fn edges(&self) -> MarkupEdges {
        MarkupEdges::build(&self.spans)
    }

    /// Insert `text` at `offset`, returning the number of chars inserted.
    ///
    /// Spans are shifted as described on [`MarkupSpan`]: insertion at a span's
    /// start or end does not extend it, insertion strictly inside does.
    ///
    /// # Panics
    ///
    /// If `offset > len()`.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        assert!(
            offset <= self.len(),
            "insert offset {offset} out of bounds for len {}",
            self.len()
        );
        let len_before = self.chars.len();
        self.chars.splice(offset..offset, text.chars());
        let inserted = self.chars.len() - len_before;
        if inserted > 0 {
            for span in &mut self.spans {
                span.shift_for_insert(offset, inserted);
            }
        }
        inserted
    }

    /// Remove the chars in `range`.
    ///
    /// Span boundaries inside the removed range collapse to its start, later
    /// boundaries move left. Spans left empty are dropped.
    ///
    /// # Panics
    ///
    /// If `range` is reversed or out of bounds.
    pub fn remove(&mut self, range: Range<usize>) {
        if let Err(err) = validate_range(&range, self.len()) {
            panic!("cannot remove: {err}");
        }
        if range.is_empty() {
            return;
        }
        self.chars.drain(range.clone());
        for span in &mut self.spans {
            span.shift_for_remove(range.clone());
        }
        self.spans.retain(|span| !span.is_empty());
    }

    fn allocate_id(&mut self) -> MarkupId {
        let id = MarkupId(self.next_id);
        self.next_id += 1;
        id
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl From<&str> for MarkupText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
