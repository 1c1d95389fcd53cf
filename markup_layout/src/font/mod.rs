// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font descriptors, metric providers and the per-style variant cache.

mod lru_cache;
mod skrifa_source;

use core::fmt;

use hashbrown::HashMap;
use markup_text::StyleSet;

use self::lru_cache::LruCache;

pub use self::skrifa_source::{SkrifaFont, SkrifaSource};

/// Scale applied to the size of superscript, subscript and footnote text.
pub const SCRIPT_SCALE: f32 = 0.7;

/// Weight used for bold text.
pub const BOLD_WEIGHT: f32 = 700.0;

const MAX_VARIANTS: usize = 8;

/// Description of a font to resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// Family name, matched case-insensitively.
    pub family: String,
    /// Size in layout units (pixels per em).
    pub size: f32,
    /// Weight on the CSS 1..1000 scale.
    pub weight: f32,
    /// Whether an italic face is wanted.
    pub italic: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            size: 16.0,
            weight: 400.0,
            italic: false,
        }
    }
}

impl FontDescriptor {
    /// Create a regular weight, upright descriptor.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    /// The descriptor of the font used for text carrying `styles`.
    ///
    /// Only the metric-relevant styles matter. Bold never makes a face
    /// lighter than this descriptor's weight.
    pub fn variant(&self, styles: StyleSet) -> Self {
        let mut font = self.clone();
        if styles.contains(StyleSet::BOLD) {
            font.weight = font.weight.max(BOLD_WEIGHT);
        }
        if styles.contains(StyleSet::ITALIC) {
            font.italic = true;
        }
        if styles.is_raised() || styles.is_lowered() {
            font.size *= SCRIPT_SCALE;
        }
        font
    }

    /// Vertical offset of the baseline for text carrying `styles`.
    ///
    /// Negative values move text up.
    pub fn baseline_shift(&self, styles: StyleSet) -> f32 {
        if styles.is_raised() {
            -0.35 * self.size
        } else if styles.is_lowered() {
            0.2 * self.size
        } else {
            0.0
        }
    }
}

/// Metrics of a resolved font at a fixed size.
pub trait FontMetrics {
    /// Horizontal advance of `ch`.
    fn advance(&self, ch: char) -> f32;

    /// Distance from the baseline to the top of the line box.
    fn ascent(&self) -> f32;

    /// Distance from the baseline to the bottom of the line box, positive.
    fn descent(&self) -> f32;
}

/// Resolves font descriptors to fonts with metrics.
pub trait FontSource {
    /// The resolved font type.
    type Font: FontMetrics;

    /// Resolve `descriptor`, or `None` if no suitable font is available.
    fn resolve(&mut self, descriptor: &FontDescriptor) -> Option<Self::Font>;
}

/// Built-in metrics used when no font can be resolved at all.
///
/// Every character advances by half the font size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FallbackMetrics {
    /// Font size the metrics are derived from.
    pub size: f32,
}

impl FontMetrics for FallbackMetrics {
    fn advance(&self, _ch: char) -> f32 {
        0.5 * self.size
    }

    fn ascent(&self) -> f32 {
        0.8 * self.size
    }

    fn descent(&self) -> f32 {
        0.2 * self.size
    }
}

#[derive(Debug)]
enum Resolved<F> {
    Font(F),
    Fallback(FallbackMetrics),
}

impl<F: FontMetrics> Resolved<F> {
    fn metrics(&self) -> &dyn FontMetrics {
        match self {
            Self::Font(font) => font,
            Self::Fallback(fallback) => fallback,
        }
    }
}

/// A resolved font for one style set plus its memoized advances.
pub(crate) struct Variant<F> {
    font: Resolved<F>,
    advances: HashMap<char, f32>,
}

impl<F: FontMetrics> Variant<F> {
    /// Advance of `ch`, measured once per variant.
    pub(crate) fn advance(&mut self, ch: char) -> f32 {
        if ch == '\n' {
            return 0.0;
        }
        let font = &self.font;
        *self
            .advances
            .entry(ch)
            .or_insert_with(|| font.metrics().advance(ch))
    }

    pub(crate) fn ascent(&self) -> f32 {
        self.font.metrics().ascent()
    }

    pub(crate) fn descent(&self) -> f32 {
        self.font.metrics().descent()
    }

    #[cfg(test)]
    pub(crate) fn is_fallback(&self) -> bool {
        matches!(self.font, Resolved::Fallback(_))
    }
}

/// Resolved fonts for the style sets in use, keyed by metric-relevant styles.
pub(crate) struct FontVariants<S: FontSource> {
    source: S,
    cache: LruCache<StyleSet, Variant<S::Font>>,
}

impl<S: FontSource> FontVariants<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            cache: LruCache::new(MAX_VARIANTS),
        }
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Forget every resolved variant.
    pub(crate) fn clear(&mut self) {
        self.cache.clear();
    }

    /// The variant of `base` used for text carrying `styles`.
    ///
    /// Resolution falls back to the regular upright face of `base` at the
    /// variant's size, then to [`FallbackMetrics`].
    pub(crate) fn variant(&mut self, base: &FontDescriptor, styles: StyleSet) -> &mut Variant<S::Font> {
        let key = styles.metric();
        let source = &mut self.source;
        self.cache.entry(key, || Variant {
            font: resolve_variant(source, base, key),
            advances: HashMap::new(),
        })
    }
}

fn resolve_variant<S: FontSource>(
    source: &mut S,
    base: &FontDescriptor,
    styles: StyleSet,
) -> Resolved<S::Font> {
    let wanted = base.variant(styles);
    if let Some(font) = source.resolve(&wanted) {
        return Resolved::Font(font);
    }
    if !styles.is_empty() {
        // Keep the script size so advances agree with the drawn runs.
        let plain = FontDescriptor {
            size: wanted.size,
            ..base.clone()
        };
        log::warn!(
            "no font for {:?} ({} {} italic={}), using {} {} at size {}",
            styles,
            wanted.family,
            wanted.weight,
            wanted.italic,
            plain.family,
            plain.weight,
            plain.size
        );
        if plain != wanted {
            if let Some(font) = source.resolve(&plain) {
                return Resolved::Font(font);
            }
        }
    }
    log::warn!(
        "no font for family {:?}, using fallback metrics",
        base.family
    );
    Resolved::Fallback(FallbackMetrics { size: wanted.size })
}

impl<S: FontSource + fmt::Debug> fmt::Debug for FontVariants<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontVariants")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
