//! UI font for menu titles: discovery, shaping, measurement, rasterization.
//!
//! Font bytes are owned here; swash `FontRef`s and rustybuzz `Face`s borrow
//! them transiently per call. When no font file can be found the menu still
//! lays out with [`FixedAdvance`] metrics, it just draws no text.

mod discovery;

use std::path::Path;

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use ori_menu_core::{FixedAdvance, TextMeasure};

use crate::gpu::atlas::GlyphBitmap;

pub use discovery::{family_file_names, ui_font_candidates};

/// A glyph positioned along a shaped line, in pixels from the pen origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID within the font face (not a Unicode codepoint).
    pub glyph_id: u16,
    /// Horizontal offset of the glyph origin from the start of the line.
    pub x: f32,
    /// Vertical offset from the baseline, positive up.
    pub y: f32,
    pub advance: f32,
}

/// A single loaded UI face.
pub struct UiFont {
    /// Raw font file bytes.
    bytes: Vec<u8>,
    /// Index within a .ttc collection file (0 for single-font files).
    face_index: u32,
    /// Byte offset to the font table directory (from `FontRef::from_index`).
    offset: u32,
    /// Cache key for `ScaleContext` reuse across frames.
    cache_key: CacheKey,
    scale_context: ScaleContext,
}

impl UiFont {
    /// Load the first usable font among the configured family and the
    /// platform UI fonts.
    pub fn load(family: Option<&str>) -> Option<Self> {
        for path in ui_font_candidates(family) {
            if let Some(font) = Self::from_file(&path) {
                log::info!("font: loaded {}", path.display());
                return Some(font);
            }
            log::debug!("font: {} is not a usable font", path.display());
        }
        None
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        Self::from_bytes(bytes, 0)
    }

    /// Validate the bytes with both swash and rustybuzz.
    fn from_bytes(bytes: Vec<u8>, face_index: u32) -> Option<Self> {
        let (offset, cache_key) = {
            let fr = FontRef::from_index(&bytes, face_index as usize)?;
            (fr.offset, fr.key)
        };
        rustybuzz::Face::from_slice(&bytes, face_index)?;
        Some(Self {
            bytes,
            face_index,
            offset,
            cache_key,
            scale_context: ScaleContext::new(),
        })
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        }
    }

    /// Shape `text` left to right at `size` pixels per em.
    pub fn shape(&self, text: &str, size: f32) -> Vec<ShapedGlyph> {
        let Some(face) = rustybuzz::Face::from_slice(&self.bytes, self.face_index) else {
            return Vec::new();
        };
        let upem = face.units_per_em() as f32;
        if upem <= 0.0 {
            return Vec::new();
        }
        let scale = size / upem;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(rustybuzz::Direction::LeftToRight);
        let glyph_buffer = rustybuzz::shape(&face, &[], buffer);

        let mut pen = 0.0f32;
        glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions())
            .map(|(info, pos)| {
                let advance = pos.x_advance as f32 * scale;
                let glyph = ShapedGlyph {
                    glyph_id: info.glyph_id as u16,
                    x: pen + pos.x_offset as f32 * scale,
                    y: pos.y_offset as f32 * scale,
                    advance,
                };
                pen += advance;
                glyph
            })
            .collect()
    }

    /// Distance from the baseline to the top of the tallest glyphs.
    pub fn ascent(&self, size: f32) -> f32 {
        self.font_ref().metrics(&[]).scale(size).ascent
    }

    /// Rasterize a glyph into an 8-bit coverage bitmap.
    pub fn rasterize(&mut self, glyph_id: u16, size: f32) -> Option<GlyphBitmap> {
        // Field borrows, not `self.font_ref()`, so the scale context can be
        // borrowed mutably alongside the bytes.
        let fr = FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        };
        let advance_width = fr.glyph_metrics(&[]).scale(size).advance_width(glyph_id);
        let mut scaler = self.scale_context.builder(fr).size(size).hint(true).build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)?;

        Some(GlyphBitmap {
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
            advance_width,
            data: image.data,
        })
    }
}

impl TextMeasure for UiFont {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        self.shape(text, font_size).iter().map(|g| g.advance).sum()
    }
}

/// Text measurement for the popup: the UI font when one loaded, otherwise
/// fixed advances.
pub struct MenuFont {
    ui: Option<UiFont>,
    fallback: FixedAdvance,
}

impl MenuFont {
    pub fn load(family: Option<&str>) -> Self {
        let ui = UiFont::load(family);
        if ui.is_none() {
            log::warn!("font: no UI font found, titles will not be drawn");
        }
        Self::from_parts(ui)
    }

    pub fn from_parts(ui: Option<UiFont>) -> Self {
        Self {
            ui,
            fallback: FixedAdvance::default(),
        }
    }

    pub fn ui(&self) -> Option<&UiFont> {
        self.ui.as_ref()
    }

    pub fn ui_mut(&mut self) -> Option<&mut UiFont> {
        self.ui.as_mut()
    }
}

impl TextMeasure for MenuFont {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        match self.ui.as_mut() {
            Some(ui) => ui.text_width(text, font_size),
            None => self.fallback.text_width(text, font_size),
        }
    }
}

#[cfg(test)]
mod tests;
