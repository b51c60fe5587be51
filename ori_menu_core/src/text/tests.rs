use std::borrow::Cow;

use super::{FixedAdvance, TextMeasure, truncate_to_width};

#[test]
fn fixed_advance_scales_with_font_size() {
    let mut m = FixedAdvance::default();
    assert!((m.text_width("Copy", 10.0) - 20.0).abs() < f32::EPSILON);
    assert!((m.text_width("Copy", 20.0) - 40.0).abs() < f32::EPSILON);
}

#[test]
fn fixed_advance_counts_wide_chars_twice() {
    let mut m = FixedAdvance { em_advance: 1.0 };
    assert!((m.text_width("好", 10.0) - 20.0).abs() < f32::EPSILON);
}

#[test]
fn empty_text_has_zero_width() {
    let mut m = FixedAdvance::default();
    assert!(m.text_width("", 13.0).abs() < f32::EPSILON);
}

#[test]
fn fitting_text_is_borrowed() {
    let mut m = FixedAdvance { em_advance: 1.0 };
    let out = truncate_to_width(&mut m, "Paste", 10.0, 50.0);
    assert!(matches!(out, Cow::Borrowed("Paste")));
}

#[test]
fn overflowing_text_gets_ellipsis() {
    let mut m = FixedAdvance { em_advance: 1.0 };
    // 10px per column: ellipsis takes 10, leaving room for 3 graphemes.
    let out = truncate_to_width(&mut m, "Select All", 10.0, 40.0);
    assert_eq!(out, "Sel\u{2026}");
}

#[test]
fn truncation_keeps_grapheme_clusters_whole() {
    let mut m = FixedAdvance { em_advance: 1.0 };
    // "e" + combining acute is one grapheme of display width 1.
    let out = truncate_to_width(&mut m, "e\u{301}e\u{301}e\u{301}e\u{301}", 10.0, 30.0);
    assert_eq!(out, "e\u{301}e\u{301}\u{2026}");
}

#[test]
fn zero_width_budget_yields_only_ellipsis() {
    let mut m = FixedAdvance { em_advance: 1.0 };
    let out = truncate_to_width(&mut m, "Copy", 10.0, 0.0);
    assert_eq!(out, "\u{2026}");
}
