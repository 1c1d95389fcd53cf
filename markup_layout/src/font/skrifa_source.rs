// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`FontSource`] over font files registered in memory, measured with skrifa.

use std::sync::Arc;

use linebender_resource_handle::{Blob, FontData};
use skrifa::instance::{LocationRef, Size};
use skrifa::raw::tables::head::MacStyle;
use skrifa::raw::tables::os2::SelectionFlags;
use skrifa::raw::{FileRef, ReadError, TableProvider};
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use super::{FontDescriptor, FontMetrics, FontSource};

/// Family, weight and slant of one registered face.
#[derive(Clone, Debug, PartialEq)]
struct FaceAttributes {
    family: String,
    weight: f32,
    italic: bool,
}

#[derive(Clone, Debug)]
struct Face {
    attributes: FaceAttributes,
    data: FontData,
}

/// Font faces registered from raw font file data.
///
/// Faces are grouped by family name; resolving a [`FontDescriptor`] picks the
/// face of the requested family with the matching slant and the nearest
/// weight.
#[derive(Clone, Debug, Default)]
pub struct SkrifaSource {
    faces: Vec<Face>,
}

impl SkrifaSource {
    /// Create a source with no fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every face in a font file or collection.
    ///
    /// Returns the number of faces added.
    pub fn register_fonts(&mut self, data: Vec<u8>) -> Result<usize, ReadError> {
        let blob = Blob::new(Arc::new(data));
        let count = match FileRef::new(blob.as_ref())? {
            FileRef::Font(_) => 1,
            FileRef::Collection(collection) => collection.len(),
        };
        let mut added = 0;
        for index in 0..count {
            let font = FontRef::from_index(blob.as_ref(), index)?;
            let Some(attributes) = read_attributes(&font) else {
                log::warn!("skipping face {index} without a family name");
                continue;
            };
            log::debug!(
                "registered {} weight {} italic={}",
                attributes.family,
                attributes.weight,
                attributes.italic
            );
            self.faces.push(Face {
                attributes,
                data: FontData::new(blob.clone(), index),
            });
            added += 1;
        }
        Ok(added)
    }

    /// Names of the registered families, in registration order with
    /// duplicates removed.
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = Vec::new();
        for face in &self.faces {
            let family = face.attributes.family.as_str();
            if !families.iter().any(|f| f.eq_ignore_ascii_case(family)) {
                families.push(family);
            }
        }
        families
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if no faces are registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl FontSource for SkrifaSource {
    type Font = SkrifaFont;

    fn resolve(&mut self, descriptor: &FontDescriptor) -> Option<SkrifaFont> {
        let index = best_match(self.faces.iter().map(|face| &face.attributes), descriptor)?;
        match SkrifaFont::new(self.faces[index].data.clone(), descriptor.size) {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("failed to load {}: {err}", descriptor.family);
                None
            }
        }
    }
}

/// A registered face instanced at one size.
#[derive(Clone, Debug)]
pub struct SkrifaFont {
    data: FontData,
    size: f32,
    ascent: f32,
    descent: f32,
}

impl SkrifaFont {
    /// Load the face in `data` at `size` pixels per em.
    pub fn new(data: FontData, size: f32) -> Result<Self, ReadError> {
        let font = FontRef::from_index(data.data.as_ref(), data.index)?;
        let metrics = font.metrics(Size::new(size), LocationRef::default());
        Ok(Self {
            ascent: metrics.ascent,
            descent: metrics.descent.abs(),
            data,
            size,
        })
    }

    /// The font data backing this face.
    pub fn data(&self) -> &FontData {
        &self.data
    }

    /// Size in pixels per em.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl FontMetrics for SkrifaFont {
    fn advance(&self, ch: char) -> f32 {
        let Ok(font) = FontRef::from_index(self.data.data.as_ref(), self.data.index) else {
            return 0.0;
        };
        let glyph = font.charmap().map(ch).unwrap_or(GlyphId::NOTDEF);
        font.glyph_metrics(Size::new(self.size), LocationRef::default())
            .advance_width(glyph)
            .unwrap_or_default()
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }
}

fn read_attributes(font: &FontRef<'_>) -> Option<FaceAttributes> {
    let family = font
        .localized_strings(StringId::TYPOGRAPHIC_FAMILY_NAME)
        .english_or_first()
        .or_else(|| font.localized_strings(StringId::FAMILY_NAME).english_or_first())?
        .chars()
        .collect::<String>();
    if family.is_empty() {
        return None;
    }
    // Prefer the OS/2 table and fall back to the macStyle bits of `head`.
    let (weight, italic) = if let Ok(os2) = font.os2() {
        (
            f32::from(os2.us_weight_class()),
            os2.fs_selection().contains(SelectionFlags::ITALIC),
        )
    } else if let Ok(head) = font.head() {
        let style = head.mac_style();
        (
            if style.contains(MacStyle::BOLD) {
                700.0
            } else {
                400.0
            },
            style.contains(MacStyle::ITALIC),
        )
    } else {
        (400.0, false)
    };
    Some(FaceAttributes {
        family,
        weight,
        italic,
    })
}

/// Index of the best face for `descriptor` among `faces`.
///
/// Only faces of the requested family are candidates. A face with the wrong
/// slant is used only if no face of the right slant exists. Among the rest,
/// light requests (up to 500) prefer lighter faces and heavy requests prefer
/// heavier ones, then the nearest weight wins.
fn best_match<'a>(
    faces: impl Iterator<Item = &'a FaceAttributes>,
    descriptor: &FontDescriptor,
) -> Option<usize> {
    faces
        .enumerate()
        .filter(|(_, face)| face.family.eq_ignore_ascii_case(&descriptor.family))
        .map(|(index, face)| (index, match_cost(face, descriptor)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

fn match_cost(face: &FaceAttributes, descriptor: &FontDescriptor) -> f32 {
    let slant = if face.italic == descriptor.italic {
        0.0
    } else {
        10_000.0
    };
    let wanted = descriptor.weight;
    let wrong_direction = if wanted <= 500.0 {
        face.weight > wanted
    } else {
        face.weight < wanted
    };
    let direction = if wrong_direction { 1_000.0 } else { 0.0 };
    slant + direction + (face.weight - wanted).abs()
}
