// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup Text is a character buffer carrying overlapping style spans.
//!
//! Spans ("markups") are half-open character ranges tagged with a single
//! [`MarkupStyle`]. Edits made through [`MarkupText::insert`] and
//! [`MarkupText::remove`] keep every span consistent with the buffer, and
//! [`MarkupEdges`] turns the unordered span collection into an ordered table
//! of style transitions.
//!
//! Offsets are counted in `char`s, not bytes.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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
#![no_std]

extern crate alloc;

mod edges;
mod error;
mod markup_text;
mod span;
mod style;

pub use crate::edges::{EdgesWorkspace, MarkupEdges, Segments};
pub use crate::error::{Error, ErrorKind};
pub use crate::markup_text::MarkupText;
pub use crate::span::{MarkupId, MarkupSpan};
pub use crate::style::{MarkupStyle, StyleSet};
