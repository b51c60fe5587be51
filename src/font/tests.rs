//! Font tests. Tests that need a real font skip when the machine has none.

use std::path::Path;

use ori_menu_core::TextMeasure;

use super::{MenuFont, UiFont};

fn system_font() -> Option<UiFont> {
    UiFont::load(None)
}

#[test]
fn garbage_bytes_are_rejected() {
    let path = Path::new("/nonexistent/ori_menu/font.ttf");
    assert!(UiFont::from_file(path).is_none());
    assert!(UiFont::from_bytes(vec![0u8; 64], 0).is_none());
}

#[test]
fn fallback_measure_without_font() {
    let mut font = MenuFont::from_parts(None);
    assert!(font.ui().is_none());
    // FixedAdvance: half an em per column.
    assert!((font.text_width("Copy", 10.0) - 20.0).abs() < f32::EPSILON);
}

#[test]
fn wider_text_measures_wider() {
    let Some(mut font) = system_font() else {
        return;
    };
    let short = font.text_width("Cut", 13.0);
    let long = font.text_width("Select All", 13.0);
    assert!(short > 0.0);
    assert!(long > short);
}

#[test]
fn width_scales_with_size() {
    let Some(mut font) = system_font() else {
        return;
    };
    let small = font.text_width("Paste", 10.0);
    let large = font.text_width("Paste", 20.0);
    assert!((large - small * 2.0).abs() < 0.5);
}

#[test]
fn shaped_glyphs_advance_left_to_right() {
    let Some(font) = system_font() else {
        return;
    };
    let glyphs = font.shape("Copy", 13.0);
    assert_eq!(glyphs.len(), 4);
    assert!(glyphs.windows(2).all(|w| w[1].x > w[0].x));
}

#[test]
fn rasterized_glyph_has_coverage() {
    let Some(mut font) = system_font() else {
        return;
    };
    let glyph = font.shape("M", 20.0)[0];
    let bitmap = font.rasterize(glyph.glyph_id, 20.0).expect("outline glyph");
    assert!(bitmap.width > 0 && bitmap.height > 0);
    assert_eq!(bitmap.data.len(), (bitmap.width * bitmap.height) as usize);
    assert!(bitmap.data.iter().any(|&a| a > 0));
    assert!(font.ascent(20.0) > 0.0);
}
