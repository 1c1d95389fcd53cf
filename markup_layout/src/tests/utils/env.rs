// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use markup_text::{MarkupStyle, MarkupText};

use crate::{FontDescriptor, FontMetrics, FontSource, LayoutOptions, TextLayout};

/// A monospaced font whose metrics scale with the requested size.
///
/// At the default size of 16 every character advances by 10, or by 12 when
/// bold. Ascent and descent are 12 and 4.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct MonoFont {
    size: f32,
    bold: bool,
}

impl FontMetrics for MonoFont {
    fn advance(&self, _ch: char) -> f32 {
        let regular = self.size * 0.625;
        if self.bold {
            regular + self.size * 0.125
        } else {
            regular
        }
    }

    fn ascent(&self) -> f32 {
        self.size * 0.75
    }

    fn descent(&self) -> f32 {
        self.size * 0.25
    }
}

/// Resolves every family except `"missing"` to a [`MonoFont`].
#[derive(Clone, Debug, Default)]
pub(crate) struct MonoSource {
    pub(crate) resolved: usize,
}

impl FontSource for MonoSource {
    type Font = MonoFont;

    fn resolve(&mut self, descriptor: &FontDescriptor) -> Option<MonoFont> {
        self.resolved += 1;
        (descriptor.family != "missing").then_some(MonoFont {
            size: descriptor.size,
            bold: descriptor.weight >= 700.0,
        })
    }
}

/// A text with its layout, both edited together.
pub(crate) struct TestEnv {
    pub(crate) text: MarkupText,
    pub(crate) layout: TextLayout<MonoSource>,
}

impl TestEnv {
    /// Lay out `text` at `width` with default options otherwise.
    pub(crate) fn new(text: &str, width: f32) -> Self {
        Self::with_options(
            text,
            LayoutOptions {
                width,
                ..LayoutOptions::default()
            },
        )
    }

    pub(crate) fn with_options(text: &str, options: LayoutOptions) -> Self {
        let text = MarkupText::new(text);
        let mut layout = TextLayout::with_options(MonoSource::default(), options);
        layout.relayout(&text, false);
        Self { text, layout }
    }

    pub(crate) fn starts(&self) -> Vec<usize> {
        self.layout.line_starts().collect()
    }

    pub(crate) fn insert(&mut self, offset: usize, insertion: &str) {
        self.layout.insert(&mut self.text, offset, insertion);
    }

    pub(crate) fn remove(&mut self, offset: isize, len: isize) {
        self.layout.remove(&mut self.text, offset, len);
    }

    /// Apply `style` to `range` and remeasure it.
    pub(crate) fn apply(&mut self, style: MarkupStyle, range: Range<usize>) {
        self.text.apply_markup(style, range.clone()).unwrap();
        self.layout.restyle(&self.text, range);
    }

    /// A layout of the same text built from scratch.
    pub(crate) fn fresh_layout(&self) -> TextLayout<MonoSource> {
        let mut layout =
            TextLayout::with_options(MonoSource::default(), self.layout.options().clone());
        layout.relayout(&self.text, false);
        layout
    }

    /// Check that the incrementally maintained state matches a layout built
    /// from scratch and that every span is inside the buffer.
    #[track_caller]
    pub(crate) fn assert_consistent(&self) {
        let len = self.text.len();
        assert_eq!(self.layout.widths().len(), len, "width table length");
        for span in self.text.markups() {
            assert!(
                span.start() <= span.end() && span.end() <= len,
                "span {:?} outside buffer of {len}",
                span.range()
            );
        }
        let fresh = self.fresh_layout();
        assert_eq!(
            self.layout.widths().as_slice(),
            fresh.widths().as_slice(),
            "widths of {:?}",
            self.text.text()
        );
        assert_eq!(
            self.starts(),
            fresh.line_starts().collect::<Vec<_>>(),
            "line starts of {:?}",
            self.text.text()
        );
    }
}
