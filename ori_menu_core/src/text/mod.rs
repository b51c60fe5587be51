//! Text measurement seam between layout and whatever font stack draws the text.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Measures the pixel width of a string at a font size.
pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn text_width(&mut self, text: &str, font_size: f32) -> f32;
}

/// Deterministic measurement: every display column advances a fixed
/// fraction of the font size. Used when no font file is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one display column, in ems.
    pub em_advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_advance: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        text.width() as f32 * self.em_advance * font_size
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        (**self).text_width(text, font_size)
    }
}

const ELLIPSIS: &str = "\u{2026}";

/// Truncate `text` to fit within `max_width` pixels, appending an ellipsis
/// only if the full text overflows. Cuts on grapheme boundaries.
pub fn truncate_to_width<'t, M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &'t str,
    font_size: f32,
    max_width: f32,
) -> Cow<'t, str> {
    if measure.text_width(text, font_size) <= max_width {
        return Cow::Borrowed(text);
    }

    let target = (max_width - measure.text_width(ELLIPSIS, font_size)).max(0.0);
    let mut width = 0.0f32;
    let mut result = String::new();
    for grapheme in text.graphemes(true) {
        let w = measure.text_width(grapheme, font_size);
        if width + w > target {
            break;
        }
        width += w;
        result.push_str(grapheme);
    }
    result.push_str(ELLIPSIS);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests;
