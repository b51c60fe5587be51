//! Configuration unit tests.

use ori_menu_core::style::MENU_ITEM_TEXT_SIZE;
use ori_menu_core::{MenuColors, MenuEntry, Rgba};

use super::*;

#[test]
fn default_config_roundtrip() {
    let cfg = Config::default();
    let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
    let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
    assert_eq!(parsed, cfg);
    assert!((parsed.font.size - MENU_ITEM_TEXT_SIZE).abs() < f32::EPSILON);
    assert_eq!(parsed.items.len(), 5);
    assert!(parsed.items[3].separator);
}

#[test]
fn separator_serializes_without_item_fields() {
    let toml_str = toml::to_string_pretty(&Config::default()).expect("serialize");
    assert!(toml_str.contains("separator = true"));
    assert!(!toml_str.contains("separator = false"));
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed: Config = toml::from_str("").expect("deserialize");
    assert_eq!(parsed, Config::default());
}

#[test]
fn partial_toml_uses_defaults() {
    let toml_str = r#"
[font]
size = 16.0
"#;
    let parsed: Config = toml::from_str(toml_str).expect("deserialize");
    assert!((parsed.font.size - 16.0).abs() < f32::EPSILON);
    assert_eq!(parsed.font.family, None);
    assert_eq!(parsed.items, Config::default().items);
}

#[test]
fn items_from_toml() {
    let toml_str = r#"
[[item]]
id = "open"
title = "Open"

[[item]]
separator = true

[[item]]
id = "delete"
title = "Delete"
enabled = false

[[item]]
id = "rename"
"#;
    let parsed = Config::parse(toml_str).expect("deserialize");
    assert_eq!(
        parsed.entries(),
        vec![
            MenuEntry::item("open", "Open", true),
            MenuEntry::Separator,
            MenuEntry::item("delete", "Delete", false),
            MenuEntry::item("rename", "rename", true),
        ]
    );
}

#[test]
fn invalid_toml_is_an_error() {
    assert!(Config::parse("[font\nsize = ").is_err());
    assert!(Config::parse("[font]\nsize = \"big\"").is_err());
}

#[test]
fn color_overrides_apply() {
    let toml_str = r##"
[colors]
hover = "#ff0000"
text = "#00ff0080"
"##;
    let parsed = Config::parse(toml_str).expect("deserialize");
    let mut colors = MenuColors::default();
    parsed.colors.apply(&mut colors);
    assert_eq!(colors.hover, Rgba::new(1.0, 0.0, 0.0, 1.0));
    assert!((colors.text.a - 128.0 / 255.0).abs() < f32::EPSILON);
    // Unset colors keep their defaults.
    assert_eq!(colors.background, MenuColors::default().background);
}

#[test]
fn invalid_color_keeps_default() {
    let colors_cfg = ColorConfig {
        border: Some("not a color".to_owned()),
        ..ColorConfig::default()
    };
    let mut colors = MenuColors::default();
    colors_cfg.apply(&mut colors);
    assert_eq!(colors, MenuColors::default());
}

#[test]
fn style_scales_font_and_metrics() {
    let mut cfg = Config::default();
    cfg.font.size = 10.0;
    let style = cfg.style(2.0);
    assert!((style.font_size - 20.0).abs() < f32::EPSILON);
    assert_eq!(style.metrics.item_height, 56);
}

#[test]
fn font_size_is_clamped() {
    let mut font = FontConfig {
        size: 1.0,
        family: None,
    };
    assert!((font.effective_size() - MIN_FONT_SIZE).abs() < f32::EPSILON);
    font.size = 500.0;
    assert!((font.effective_size() - MAX_FONT_SIZE).abs() < f32::EPSILON);
}

#[test]
fn config_path_ends_with_config_toml() {
    let path = config_path();
    assert!(path.ends_with("ori_menu/config.toml"));
}
