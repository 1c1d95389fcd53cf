// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking over separator-delimited bits.
//!
//! The buffer is split at separators: one of space, hyphen, em dash or newline,
//! followed by any number of spaces. The text between two separators is a
//! "bit". A bit never straddles a line boundary; the separator that precedes
//! it is kept at the end of the previous line.

use core::iter::Peekable;

/// Characters at which a line may break.
pub(crate) fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '\u{2014}' | '\n')
}

/// A run of text between two separators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Bit {
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// The separator before this bit contains a space.
    pub(crate) space_before: bool,
    /// The separator before this bit contains a newline.
    pub(crate) paragraph_before: bool,
}

/// The separator context of the bit starting at `start`.
///
/// Returns `(space_before, paragraph_before)`. Offset zero starts the first
/// paragraph.
pub(crate) fn context_before(chars: &[char], start: usize) -> (bool, bool) {
    if start == 0 {
        return (false, true);
    }
    let spaces_from = space_run_start(chars, start);
    if spaces_from == start {
        // No trailing spaces, so the separator is the single character before.
        return (false, chars[start - 1] == '\n');
    }
    match spaces_from.checked_sub(1).map(|i| chars[i]) {
        // A non-space separator absorbs the spaces after it.
        Some(sep) if is_separator(sep) => (true, sep == '\n'),
        // Otherwise the first space is the separator.
        _ => (true, false),
    }
}

/// The lowest offset [`context_before`] inspects for `start`, or `None` if it
/// looks all the way back to the buffer start.
pub(crate) fn context_start(chars: &[char], start: usize) -> Option<usize> {
    space_run_start(chars, start).checked_sub(1)
}

fn space_run_start(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i > 0 && chars[i - 1] == ' ' {
        i -= 1;
    }
    i
}

/// Iterator over the bits of a buffer, starting at a known bit start.
#[derive(Clone, Debug)]
pub(crate) struct Bits<'a> {
    chars: &'a [char],
    pos: Option<usize>,
    space_before: bool,
    paragraph_before: bool,
}

impl<'a> Bits<'a> {
    /// Iterate over the bits of `chars` from `start`, which must be the start
    /// of a bit.
    pub(crate) fn new(chars: &'a [char], start: usize) -> Self {
        let (space_before, paragraph_before) = context_before(chars, start);
        Self {
            chars,
            pos: Some(start),
            space_before,
            paragraph_before,
        }
    }
}

impl Iterator for Bits<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        let start = self.pos?;
        let separator = self.chars[start..]
            .iter()
            .position(|ch| is_separator(*ch))
            .map(|i| start + i);
        let bit = Bit {
            start,
            end: separator.unwrap_or(self.chars.len()),
            space_before: self.space_before,
            paragraph_before: self.paragraph_before,
        };
        match separator {
            Some(sep) => {
                let mut next = sep + 1;
                while next < self.chars.len() && self.chars[next] == ' ' {
                    next += 1;
                }
                let ch = self.chars[sep];
                self.space_before = ch == ' ' || next > sep + 1;
                self.paragraph_before = ch == '\n';
                self.pos = Some(next);
            }
            None => self.pos = None,
        }
        Some(bit)
    }
}

/// Geometry that line breaking depends on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct BreakParams {
    pub(crate) width: f32,
    pub(crate) indent: f32,
    pub(crate) space_width: f32,
}

impl BreakParams {
    /// Horizontal offset of a line's content.
    pub(crate) fn line_offset(&self, paragraph_start: bool) -> f32 {
        indent_offset(self.indent, paragraph_start)
    }

    /// Width available to a line's content.
    pub(crate) fn available(&self, paragraph_start: bool) -> f32 {
        self.width - self.line_offset(paragraph_start)
    }
}

/// Horizontal offset of a line under `indent`.
///
/// A positive indent shifts the first line of each paragraph; a negative one
/// shifts every other line (a hanging indent).
pub(crate) fn indent_offset(indent: f32, paragraph_start: bool) -> f32 {
    match (paragraph_start, indent) {
        (true, indent) if indent > 0.0 => indent,
        (false, indent) if indent < 0.0 => -indent,
        _ => 0.0,
    }
}

/// Start of one packed line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LineStart {
    pub(crate) offset: usize,
    pub(crate) paragraph: bool,
}

/// Packs bits onto lines greedily, yielding the start of each line.
///
/// A bit is added to the current line while the line's width plus the bit's
/// width, and the space width if a space precedes the bit, stays below the
/// available width. A bit preceded by a newline always starts a new line,
/// so a line that ends a paragraph may be left short even when the next bit
/// would fit.
#[derive(Clone, Debug)]
pub(crate) struct LineBreaker<'a> {
    bits: Peekable<Bits<'a>>,
    widths: &'a [f32],
    params: BreakParams,
}

impl<'a> LineBreaker<'a> {
    /// Break `chars` from `start`, which must be the start of a bit.
    pub(crate) fn new(chars: &'a [char], widths: &'a [f32], params: BreakParams, start: usize) -> Self {
        debug_assert_eq!(chars.len(), widths.len(), "width table out of sync");
        Self {
            bits: Bits::new(chars, start).peekable(),
            widths,
            params,
        }
    }
}

fn bit_width(widths: &[f32], bit: &Bit) -> f32 {
    widths[bit.start..bit.end].iter().sum()
}

impl Iterator for LineBreaker<'_> {
    type Item = LineStart;

    fn next(&mut self) -> Option<LineStart> {
        // The first bit is placed even if it does not fit on its own.
        let first = self.bits.next()?;
        let available = self.params.available(first.paragraph_before);
        let mut used = bit_width(self.widths, &first);
        while let Some(bit) = self.bits.peek() {
            if bit.paragraph_before {
                break;
            }
            let mut needed = bit_width(self.widths, bit);
            if bit.space_before {
                needed += self.params.space_width;
            }
            if used + needed >= available {
                break;
            }
            used += needed;
            self.bits.next();
        }
        Some(LineStart {
            offset: first.start,
            paragraph: first.paragraph_before,
        })
    }
}
