// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style transitions for a [`MarkupText`](crate::MarkupText).
//!
//! Given overlapping markup spans, this module produces an ordered table of
//! the offsets at which the active [`StyleSet`] changes, and splits ranges into
//! contiguous segments of constant style.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{MarkupSpan, StyleSet};

#[derive(Copy, Clone, Debug)]
struct Event {
    offset: usize,
    bit: usize,
    delta: i32,
}

/// Reusable allocation workspace for building [`MarkupEdges`].
///
/// Reusing a workspace amortizes setup allocations when the table is rebuilt
/// after every edit.
#[derive(Clone, Debug, Default)]
pub struct EdgesWorkspace {
    events: Vec<Event>,
}

impl EdgesWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the transition table for `spans` using this workspace's retained
    /// allocations.
    ///
    /// Each span contributes an "add" event at its start and a "remove" event
    /// at its end. Events are swept in offset order; all events sharing an
    /// offset are applied before the resulting style set is compared with the
    /// previous one, so a span ending exactly where another of the same style
    /// begins produces no transition. Empty spans are ignored.
    pub fn build<'a>(&mut self, spans: impl IntoIterator<Item = &'a MarkupSpan>) -> MarkupEdges {
        self.events.clear();
        for span in spans {
            if span.is_empty() {
                continue;
            }
            let Some(bit) = span.style().bit_index() else {
                continue;
            };
            self.events.push(Event {
                offset: span.start(),
                bit,
                delta: 1,
            });
            self.events.push(Event {
                offset: span.end(),
                bit,
                delta: -1,
            });
        }
        // Stable, so ties keep span order.
        self.events.sort_by_key(|event| event.offset);

        let mut counts = [0_i32; StyleSet::COUNT];
        let mut current = StyleSet::empty();
        let mut transitions = Vec::new();
        let mut index = 0;
        while index < self.events.len() {
            let offset = self.events[index].offset;
            while index < self.events.len() && self.events[index].offset == offset {
                let event = self.events[index];
                counts[event.bit] += event.delta;
                index += 1;
            }
            let mut next = StyleSet::empty();
            for (bit, count) in counts.iter().enumerate() {
                debug_assert!(*count >= 0, "unbalanced markup events at offset {offset}");
                if *count > 0 {
                    next |= StyleSet::from_bits_truncate(1 << bit);
                }
            }
            if next != current {
                transitions.push((offset, next));
                current = next;
            }
        }
        MarkupEdges { transitions }
    }
}

/// Ordered table of offsets at which the active [`StyleSet`] changes.
///
/// Keys are strictly increasing. The style at any offset is the set of the
/// last entry at or before it, or the empty set if there is none.
///
/// # Examples
///
/// ```
/// use markup_text::{MarkupStyle, MarkupText, StyleSet};
///
/// let mut text = MarkupText::new("hello");
/// text.apply_markup(MarkupStyle::Bold, 0..2).unwrap();
/// text.apply_markup(MarkupStyle::Italic, 1..5).unwrap();
///
/// let edges = text.edges();
/// assert_eq!(
///     edges.transitions(),
///     [
///         (0, StyleSet::BOLD),
///         (1, StyleSet::BOLD | StyleSet::ITALIC),
///         (2, StyleSet::ITALIC),
///         (5, StyleSet::empty()),
///     ]
/// );
/// let mut segments = edges.segments(0..5);
/// assert_eq!(segments.next(), Some((0..1, StyleSet::BOLD)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkupEdges {
    transitions: Vec<(usize, StyleSet)>,
}

impl MarkupEdges {
    /// Build the transition table for `spans`.
    pub fn build<'a>(spans: impl IntoIterator<Item = &'a MarkupSpan>) -> Self {
        EdgesWorkspace::new().build(spans)
    }

    /// The ordered `(offset, style set)` entries.
    pub fn transitions(&self) -> &[(usize, StyleSet)] {
        &self.transitions
    }

    /// Iterate over the transition offsets.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.transitions.iter().map(|(offset, _)| *offset)
    }

    /// Returns the number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Returns `true` if no span contributes any style.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The style set active at `offset`.
    pub fn style_at(&self, offset: usize) -> StyleSet {
        match self.after(offset) {
            0 => StyleSet::empty(),
            index => self.transitions[index - 1].1,
        }
    }

    /// Split `range` into maximal segments of constant style.
    ///
    /// The first segment carries in the style active at `range.start`.
    pub fn segments(&self, range: Range<usize>) -> Segments<'_> {
        Segments {
            edges: self,
            style: self.style_at(range.start),
            next: self.after(range.start),
            pos: range.start,
            end: range.end,
        }
    }

    /// Index of the first transition strictly after `offset`.
    fn after(&self, offset: usize) -> usize {
        self.transitions.partition_point(|(key, _)| *key <= offset)
    }
}

/// Iterator over contiguous constant-style segments of a range.
///
/// Created by [`MarkupEdges::segments`]. Each item is a non-empty range and
/// the style set active over all of it.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    edges: &'a MarkupEdges,
    style: StyleSet,
    next: usize,
    pos: usize,
    end: usize,
}

impl Iterator for Segments<'_> {
    type Item = (Range<usize>, StyleSet);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let start = self.pos;
        let style = self.style;
        match self.edges.transitions.get(self.next) {
            Some(&(key, next_style)) if key < self.end => {
                self.pos = key;
                self.style = next_style;
                self.next += 1;
            }
            _ => self.pos = self.end,
        }
        Some((start..self.pos, style))
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgesWorkspace, MarkupEdges};
    use crate::{MarkupStyle, MarkupText, StyleSet};
    use alloc::vec::Vec;

    fn text_with(spans: &[(MarkupStyle, core::ops::Range<usize>)]) -> MarkupText {
        let mut text = MarkupText::new("The quick brown fox jumps over the lazy dog");
        for (style, range) in spans {
            text.apply_markup(*style, range.clone()).unwrap();
        }
        text
    }

    #[test]
    fn no_spans() {
        let text = text_with(&[]);
        let edges = text.edges();
        assert!(edges.is_empty());
        assert_eq!(edges.style_at(7), StyleSet::empty());
        let segments: Vec<_> = edges.segments(0..10).collect();
        assert_eq!(segments, [(0..10, StyleSet::empty())]);
    }

    #[test]
    fn keys_strictly_increase() {
        let text = text_with(&[
            (MarkupStyle::Bold, 4..9),
            (MarkupStyle::Italic, 0..20),
            (MarkupStyle::Link, 4..9),
            (MarkupStyle::Underline, 16..30),
            (MarkupStyle::Subscript, 9..10),
        ]);
        let edges = text.edges();
        let keys: Vec<_> = edges.keys().collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]), "{keys:?}");
        assert_eq!(keys, [0, 4, 9, 10, 16, 20, 30]);
    }

    #[test]
    fn style_at_zero_is_union_of_spans_starting_there() {
        let text = text_with(&[
            (MarkupStyle::Bold, 0..3),
            (MarkupStyle::Emphasize, 0..8),
            (MarkupStyle::Italic, 1..8),
        ]);
        let edges = text.edges();
        assert_eq!(edges.style_at(0), StyleSet::BOLD | StyleSet::EMPHASIZE);
        assert_eq!(
            edges.style_at(2),
            StyleSet::BOLD | StyleSet::EMPHASIZE | StyleSet::ITALIC
        );
        assert_eq!(edges.style_at(8), StyleSet::empty());
    }

    #[test]
    fn abutting_spans_do_not_flicker() {
        // Same-style spans would be merged by `apply_markup`, so build the
        // table from raw spans instead.
        let mut a = MarkupText::new("abcdefghij");
        a.apply_markup(MarkupStyle::Bold, 0..5).unwrap();
        let mut b = MarkupText::new("abcdefghij");
        b.apply_markup(MarkupStyle::Bold, 5..9).unwrap();
        let edges = MarkupEdges::build(a.markups().chain(b.markups()));
        assert_eq!(edges.transitions(), [(0, StyleSet::BOLD), (9, StyleSet::empty())]);
    }

    #[test]
    fn overlapping_same_style_counts() {
        let mut a = MarkupText::new("abcdefghij");
        a.apply_markup(MarkupStyle::Bold, 0..6).unwrap();
        let mut b = MarkupText::new("abcdefghij");
        b.apply_markup(MarkupStyle::Bold, 3..8).unwrap();
        let edges = MarkupEdges::build(a.markups().chain(b.markups()));
        assert_eq!(edges.transitions(), [(0, StyleSet::BOLD), (8, StyleSet::empty())]);
    }

    #[test]
    fn swap_at_shared_boundary() {
        let text = text_with(&[(MarkupStyle::Bold, 0..4), (MarkupStyle::Italic, 4..8)]);
        let edges = text.edges();
        assert_eq!(
            edges.transitions(),
            [
                (0, StyleSet::BOLD),
                (4, StyleSet::ITALIC),
                (8, StyleSet::empty())
            ]
        );
    }

    #[test]
    fn segments_carry_style_in() {
        let text = text_with(&[(MarkupStyle::Bold, 2..12), (MarkupStyle::Link, 6..9)]);
        let edges = text.edges();
        let segments: Vec<_> = edges.segments(4..11).collect();
        assert_eq!(
            segments,
            [
                (4..6, StyleSet::BOLD),
                (6..9, StyleSet::BOLD | StyleSet::LINK),
                (9..11, StyleSet::BOLD),
            ]
        );
        assert_eq!(edges.segments(5..5).count(), 0);
    }

    #[test]
    fn workspace_reuse_matches_fresh_build() {
        let text = text_with(&[(MarkupStyle::Superscript, 3..5), (MarkupStyle::Bold, 1..4)]);
        let mut workspace = EdgesWorkspace::new();
        let first = workspace.build(text.markups());
        let second = workspace.build(text.markups());
        assert_eq!(first, second);
        assert_eq!(first, text.edges());
    }
}
