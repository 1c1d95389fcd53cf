// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use markup_text::MarkupStyle;
use peniko::kurbo::Rect;

use super::utils::TestEnv;
use crate::{FontDescriptor, LayoutOptions};

#[test]
fn hello_world_fits() {
    let env = TestEnv::new("hello world", 120.0);
    assert_eq!(env.starts(), [0]);
    assert_eq!(env.layout.bounding_box(), Rect::new(0.0, 0.0, 120.0, 20.0));
}

#[test]
fn hello_world_wraps() {
    let env = TestEnv::new("hello world", 100.0);
    assert_eq!(env.starts(), [0, 6]);
    assert_eq!(env.layout.line_count(), 2);
    assert_eq!(env.layout.line_range(0), Some(0..6));
    assert_eq!(env.layout.line_range(1), Some(6..11));
    assert_eq!(env.layout.line_range(2), None);
    assert_eq!(env.layout.bounding_box(), Rect::new(0.0, 0.0, 100.0, 40.0));
}

#[test]
fn empty_text() {
    let env = TestEnv::new("", 100.0);
    assert_eq!(env.starts(), [0]);
    assert_eq!(env.layout.bounding_box(), Rect::ZERO);
    assert_eq!(env.layout.line_for_offset(0), 0);
}

#[test]
fn newlines_start_paragraphs() {
    let env = TestEnv::new("one\ntwo\n\nthree", 400.0);
    assert_eq!(env.starts(), [0, 4, 8, 9]);
    // A trailing newline opens an empty last line.
    let env = TestEnv::new("one\n", 400.0);
    assert_eq!(env.starts(), [0, 4]);
}

#[test]
fn breaks_after_hyphens_and_dashes() {
    // "well" is 40 wide; adding "known" would need another 50.
    let env = TestEnv::new("well-known", 80.0);
    assert_eq!(env.starts(), [0, 5]);
    let env = TestEnv::new("yes\u{2014}no", 50.0);
    assert_eq!(env.starts(), [0, 4]);
}

#[test]
fn overlong_word_is_placed_alone() {
    let env = TestEnv::new("a incomprehensibilities b", 60.0);
    assert_eq!(env.starts(), [0, 2, 24]);
}

#[test]
fn greedy_never_underfills() {
    let text = "the quick brown fox jumps over the lazy dog and keeps running \
                through an extraordinarily long field of grass until dusk";
    for width in [60.0, 95.0, 150.0, 233.0] {
        let env = TestEnv::new(text, width);
        let starts = env.starts();
        let chars = env.text.chars();
        for pair in starts.windows(2) {
            let (start, next) = (pair[0], pair[1]);
            // Single spaces separate words, so the line uses everything up to
            // its trailing space.
            let used = 10.0 * (next - 1 - start) as f32;
            let next_word = chars[next..]
                .iter()
                .position(|ch| *ch == ' ')
                .unwrap_or(chars.len() - next);
            let needed = 10.0 + 10.0 * next_word as f32;
            assert!(
                used + needed >= width,
                "line at {start} could take the word at {next} (width {width})"
            );
            assert!(
                used < width || !chars[start..next - 1].contains(&' '),
                "line at {start} overflows (width {width})"
            );
        }
    }
}

#[test]
fn bold_widens_and_rewraps() {
    let mut env = TestEnv::new("aaaa bbbb", 95.0);
    assert_eq!(env.starts(), [0]);
    env.apply(MarkupStyle::Bold, 5..9);
    assert_eq!(env.layout.widths().sum(5..9), 48.0);
    assert_eq!(env.starts(), [0, 5]);

    let id = env.text.markup_at(6, MarkupStyle::Bold).unwrap().id();
    env.text.remove_markup(id);
    env.layout.restyle(&env.text, 5..9);
    assert_eq!(env.starts(), [0]);
    env.assert_consistent();
}

#[test]
fn scripts_are_narrower() {
    let mut env = TestEnv::new("E mc2", 400.0);
    env.apply(MarkupStyle::Superscript, 4..5);
    let widths = env.layout.widths();
    assert_eq!(widths.sum(0..4), 40.0);
    assert!((widths.sum(4..5) - 7.0).abs() < 1e-4);
}

#[test]
fn positive_indent() {
    let env = TestEnv::with_options(
        "aaa bbb ccc\nddd eee fff",
        LayoutOptions {
            width: 100.0,
            indent: 20.0,
            ..LayoutOptions::default()
        },
    );
    assert_eq!(env.starts(), [0, 8, 12, 20]);
    assert_eq!(env.layout.locate(0).unwrap().center().x, 20.0);
    assert_eq!(env.layout.locate(8).unwrap().center().x, 0.0);
    assert_eq!(env.layout.locate(12).unwrap().center().x, 20.0);
}

#[test]
fn hanging_indent() {
    let env = TestEnv::with_options(
        "aaa bbb ccc\nddd eee fff",
        LayoutOptions {
            width: 100.0,
            indent: -20.0,
            ..LayoutOptions::default()
        },
    );
    assert_eq!(env.starts(), [0, 8, 12, 20]);
    assert_eq!(env.layout.locate(0).unwrap().center().x, 0.0);
    assert_eq!(env.layout.locate(8).unwrap().center().x, 20.0);
    assert_eq!(env.layout.locate(21).unwrap().center().x, 30.0);
}

#[test]
fn relayout_is_idempotent() {
    let mut env = TestEnv::new(
        "Lorem ipsum dolor sit amet, consectetur-adipiscing elit.\nSed do eiusmod tempor.",
        130.0,
    );
    env.apply(MarkupStyle::Bold, 6..17);
    env.layout.relayout(&env.text, true);
    let first = env.starts();
    env.layout.relayout(&env.text, true);
    assert_eq!(env.starts(), first);
    env.layout.relayout(&env.text, false);
    assert_eq!(env.starts(), first);
}

#[test]
fn width_change_needs_relayout() {
    let mut env = TestEnv::new("hello world", 120.0);
    env.layout.set_width(100.0);
    assert_eq!(env.starts(), [0], "setters take effect on relayout");
    env.layout.relayout(&env.text, true);
    assert_eq!(env.starts(), [0, 6]);
    assert_eq!(env.layout.width(), 100.0);
}

#[test]
fn font_change_remeasures() {
    let mut env = TestEnv::new("hello world", 400.0);
    assert_eq!(env.layout.widths().sum(0..5), 50.0);
    let resolved = env.layout.font_source().resolved;
    env.layout.relayout(&env.text, true);
    assert_eq!(env.layout.font_source().resolved, resolved, "variants are cached");

    env.layout.set_font(FontDescriptor::new("sans-serif", 32.0));
    // Even a width-preserving relayout measures again after a font change.
    env.layout.relayout(&env.text, true);
    assert_eq!(env.layout.widths().sum(0..5), 100.0);
    assert!(env.layout.font_source().resolved > resolved);
    env.layout.set_width(200.0);
    env.layout.relayout(&env.text, true);
    assert_eq!(env.starts(), [0, 6]);
}

#[test]
fn missing_font_still_lays_out() {
    let env = TestEnv::with_options(
        "hello world",
        LayoutOptions {
            font: FontDescriptor::new("missing", 16.0),
            width: 100.0,
            ..LayoutOptions::default()
        },
    );
    // Fallback metrics advance by half the font size.
    assert_eq!(env.layout.widths().sum(0..11), 88.0);
    assert_eq!(env.starts(), [0]);
}
