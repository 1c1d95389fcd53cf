// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Error, MarkupStyle};

/// Stable identifier of a span within one [`MarkupText`](crate::MarkupText).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkupId(pub(crate) u64);

/// A half-open character range tagged with one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupSpan {
    pub(crate) id: MarkupId,
    pub(crate) style: MarkupStyle,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) created_at: u64,
}

impl MarkupSpan {
    /// The identifier of this span.
    pub fn id(&self) -> MarkupId {
        self.id
    }

    /// The style this span applies.
    pub fn style(&self) -> MarkupStyle {
        self.style
    }

    /// The first character covered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last character covered.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The covered range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Logical creation stamp.
    ///
    /// Stamps increase strictly with every span created or merged by the
    /// owning text, so a larger stamp means a more recent span.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if the closed extent `[start, end]` meets `range`.
    ///
    /// Touching counts, so a caret sitting right after a bold word still finds
    /// the bold span.
    pub fn touches(&self, range: Range<usize>) -> bool {
        self.end >= range.start && self.start <= range.end
    }

    /// Adjust for `len` chars inserted at `at`.
    ///
    /// A span starting at or after `at` moves right; a span containing `at`
    /// strictly inside grows; a span ending exactly at `at` is unchanged.
    pub(crate) fn shift_for_insert(&mut self, at: usize, len: usize) {
        if self.start >= at {
            self.start += len;
            self.end += len;
        } else if self.end > at {
            self.end += len;
        }
    }

    /// Adjust for the chars in `removed` being deleted.
    pub(crate) fn shift_for_remove(&mut self, removed: Range<usize>) {
        let map = |offset: usize| {
            if offset <= removed.start {
                offset
            } else if offset >= removed.end {
                offset - removed.len()
            } else {
                removed.start
            }
        };
        self.start = map(self.start);
        self.end = map(self.end);
    }
}

#[inline]
pub(crate) fn validate_range(range: &Range<usize>, len: usize) -> Result<(), Error> {
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    Ok(())
}
