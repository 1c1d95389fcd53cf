// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental layout of marked up text.
//!
//! A [`TextLayout`] breaks a [`MarkupText`] into lines of a fixed width,
//! maps between character offsets and positions, keeps itself current
//! across edits, and splits visible lines into styled runs for drawing.
//!
//! Lines break greedily at separators: spaces, hyphens, em dashes and
//! newlines. A newline always starts a new paragraph. Character advances come
//! from a [`FontSource`]; [`SkrifaSource`] measures registered font files,
//! and any other source can be plugged in by implementing the trait.
//!
//! ```
//! use markup_layout::{
//!     FontDescriptor, FontMetrics, FontSource, MarkupStyle, MarkupText, TextLayout,
//! };
//!
//! struct Mono;
//!
//! impl FontMetrics for Mono {
//!     fn advance(&self, _ch: char) -> f32 { 10.0 }
//!     fn ascent(&self) -> f32 { 12.0 }
//!     fn descent(&self) -> f32 { 4.0 }
//! }
//!
//! struct MonoSource;
//!
//! impl FontSource for MonoSource {
//!     type Font = Mono;
//!     fn resolve(&mut self, _descriptor: &FontDescriptor) -> Option<Mono> {
//!         Some(Mono)
//!     }
//! }
//!
//! let mut text = MarkupText::new("hello world");
//! text.apply_markup(MarkupStyle::Bold, 0..5).unwrap();
//!
//! let mut layout = TextLayout::new(MonoSource);
//! layout.set_width(100.0);
//! layout.relayout(&text, false);
//! assert_eq!(layout.line_starts().collect::<Vec<_>>(), [0, 6]);
//!
//! layout.insert(&mut text, 5, "X");
//! assert_eq!(text.text(), "helloX world");
//! assert_eq!(text.markups().next().unwrap().range(), 0..5);
//! ```
//!
//! Offsets are counted in `char`s.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use markup_text;
pub use markup_text::{MarkupStyle, MarkupText, StyleSet};
pub use peniko;

pub mod font;

mod layout;
mod metrics;
mod render;

#[cfg(test)]
mod tests;

pub use crate::font::{
    FallbackMetrics, FontDescriptor, FontMetrics, FontSource, SkrifaFont, SkrifaSource,
};
pub use crate::layout::{LayoutOptions, TextEdit, TextLayout};
pub use crate::metrics::CharWidths;
pub use crate::render::{Decoration, LineRuns, RenderTarget, TextRun};
