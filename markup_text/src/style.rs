// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bitflags::bitflags;

/// The closed vocabulary of styles a markup span can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkupStyle {
    /// Heavier font weight.
    Bold,
    /// Slanted font.
    Italic,
    /// Line drawn under the text.
    Underline,
    /// Smaller text raised above the baseline.
    Superscript,
    /// Smaller text lowered below the baseline.
    Subscript,
    /// Highlighted text.
    Emphasize,
    /// Line drawn through the text.
    StrikeThrough,
    /// Text that refers to a resource.
    Link,
    /// Footnote reference mark, drawn like a superscript.
    FootnoteRef,
    /// No styling. A span of this style contributes nothing.
    Normal,
}

impl MarkupStyle {
    /// Every style, in flag order.
    pub const ALL: [Self; 10] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Superscript,
        Self::Subscript,
        Self::Emphasize,
        Self::StrikeThrough,
        Self::Link,
        Self::FootnoteRef,
        Self::Normal,
    ];

    /// The single-member set for this style.
    ///
    /// [`MarkupStyle::Normal`] maps to the empty set.
    pub const fn flag(self) -> StyleSet {
        match self {
            Self::Bold => StyleSet::BOLD,
            Self::Italic => StyleSet::ITALIC,
            Self::Underline => StyleSet::UNDERLINE,
            Self::Superscript => StyleSet::SUPERSCRIPT,
            Self::Subscript => StyleSet::SUBSCRIPT,
            Self::Emphasize => StyleSet::EMPHASIZE,
            Self::StrikeThrough => StyleSet::STRIKE_THROUGH,
            Self::Link => StyleSet::LINK,
            Self::FootnoteRef => StyleSet::FOOTNOTE_REF,
            Self::Normal => StyleSet::empty(),
        }
    }

    /// Human readable name, as used in saved documents.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Superscript => "Superscript",
            Self::Subscript => "Subscript",
            Self::Emphasize => "Emphasize",
            Self::StrikeThrough => "StrikeThrough",
            Self::Link => "Link",
            Self::FootnoteRef => "FootnoteRef",
            Self::Normal => "Normal",
        }
    }

    /// Position of this style's bit, or `None` for [`MarkupStyle::Normal`].
    pub(crate) const fn bit_index(self) -> Option<usize> {
        match self {
            Self::Normal => None,
            _ => Some(self.flag().bits().trailing_zeros() as usize),
        }
    }
}

bitflags! {
    /// The set of styles active at some offset.
    ///
    /// Style sets are only ever combined by union and difference; the empty
    /// set is plain, unstyled text.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleSet: u16 {
        /// See [`MarkupStyle::Bold`].
        const BOLD = 1 << 0;
        /// See [`MarkupStyle::Italic`].
        const ITALIC = 1 << 1;
        /// See [`MarkupStyle::Underline`].
        const UNDERLINE = 1 << 2;
        /// See [`MarkupStyle::Superscript`].
        const SUPERSCRIPT = 1 << 3;
        /// See [`MarkupStyle::Subscript`].
        const SUBSCRIPT = 1 << 4;
        /// See [`MarkupStyle::Emphasize`].
        const EMPHASIZE = 1 << 5;
        /// See [`MarkupStyle::StrikeThrough`].
        const STRIKE_THROUGH = 1 << 6;
        /// See [`MarkupStyle::Link`].
        const LINK = 1 << 7;
        /// See [`MarkupStyle::FootnoteRef`].
        const FOOTNOTE_REF = 1 << 8;
    }
}

impl StyleSet {
    /// Number of distinct non-normal styles.
    pub(crate) const COUNT: usize = 9;

    /// Styles that change which font is used, and therefore character advances.
    pub const METRIC: Self = Self::BOLD
        .union(Self::ITALIC)
        .union(Self::SUPERSCRIPT)
        .union(Self::SUBSCRIPT)
        .union(Self::FOOTNOTE_REF);

    /// Returns `true` if `style` is in this set.
    ///
    /// [`MarkupStyle::Normal`] is in every set.
    pub fn has(self, style: MarkupStyle) -> bool {
        self.contains(style.flag())
    }

    /// The subset of this set that affects font selection.
    pub fn metric(self) -> Self {
        self & Self::METRIC
    }

    /// Returns `true` if this set raises text above the baseline.
    pub fn is_raised(self) -> bool {
        self.intersects(Self::SUPERSCRIPT | Self::FOOTNOTE_REF)
    }

    /// Returns `true` if this set lowers text below the baseline.
    pub fn is_lowered(self) -> bool {
        self.contains(Self::SUBSCRIPT) && !self.is_raised()
    }

    /// Iterate over the individual styles in this set.
    pub fn styles(self) -> impl Iterator<Item = MarkupStyle> {
        MarkupStyle::ALL
            .into_iter()
            .filter(move |style| *style != MarkupStyle::Normal && self.has(*style))
    }
}

impl From<MarkupStyle> for StyleSet {
    fn from(style: MarkupStyle) -> Self {
        style.flag()
    }
}
