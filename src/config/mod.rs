//! Configuration structures and loading logic.

mod io;
pub mod monitor;

pub use io::{config_dir, config_path};

use serde::{Deserialize, Serialize};

use ori_menu_core::style::MENU_ITEM_TEXT_SIZE;
use ori_menu_core::{MenuColors, MenuEntry, MenuStyle, Rgba};

/// Smallest and largest accepted font size, in points.
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 48.0;

/// Top-level configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub colors: ColorConfig,
    /// Entries of the demo menu, top to bottom.
    #[serde(rename = "item")]
    pub items: Vec<ItemConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            colors: ColorConfig::default(),
            items: vec![
                ItemConfig::item("cut", "Cut"),
                ItemConfig::item("copy", "Copy"),
                ItemConfig::item("paste", "Paste"),
                ItemConfig::separator(),
                ItemConfig::item("select_all", "Select All"),
            ],
        }
    }
}

impl Config {
    /// Menu style for a DPI scale factor, with color overrides applied.
    pub fn style(&self, scale: f64) -> MenuStyle {
        let mut style = MenuStyle::default();
        self.colors.apply(&mut style.colors);
        style.with_scale(scale, self.font.effective_size())
    }

    /// Menu entries in display order.
    pub fn entries(&self) -> Vec<MenuEntry> {
        self.items.iter().map(ItemConfig::to_entry).collect()
    }
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Title size in points, before DPI scaling.
    pub size: f32,
    /// Font family name or file path. Falls back to the platform UI font.
    pub family: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: MENU_ITEM_TEXT_SIZE,
            family: None,
        }
    }
}

impl FontConfig {
    /// Returns size clamped to [`MIN_FONT_SIZE`, `MAX_FONT_SIZE`].
    pub fn effective_size(&self) -> f32 {
        self.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }
}

/// Color overrides, each a `"#RRGGBB"` or `"#RRGGBBAA"` hex string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: Option<String>,
    pub border: Option<String>,
    pub separator: Option<String>,
    /// Highlight behind the hovered item.
    pub hover: Option<String>,
    pub hover_text: Option<String>,
    pub text: Option<String>,
    pub disabled_text: Option<String>,
}

impl ColorConfig {
    /// Overwrite the colors that are set here. Invalid hex strings are logged
    /// and leave the color unchanged.
    pub fn apply(&self, colors: &mut MenuColors) {
        let slots: [(&str, &Option<String>, &mut Rgba); 7] = [
            ("background", &self.background, &mut colors.background),
            ("border", &self.border, &mut colors.border),
            ("separator", &self.separator, &mut colors.separator),
            ("hover", &self.hover, &mut colors.hover),
            ("hover_text", &self.hover_text, &mut colors.hover_text),
            ("text", &self.text, &mut colors.text),
            ("disabled_text", &self.disabled_text, &mut colors.disabled_text),
        ];
        for (name, hex, slot) in slots {
            let Some(hex) = hex else { continue };
            match Rgba::from_hex(hex) {
                Some(c) => *slot = c,
                None => log::warn!("config: invalid color for {name}: {hex:?}"),
            }
        }
    }
}

/// One `[[item]]` table: either an item or `separator = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub separator: bool,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            enabled: true,
            separator: false,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ItemConfig {
    pub fn item(id: &str, title: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            ..Self::default()
        }
    }

    pub fn separator() -> Self {
        Self {
            separator: true,
            ..Self::default()
        }
    }

    /// An item with no title shows its id.
    pub fn to_entry(&self) -> MenuEntry {
        if self.separator {
            return MenuEntry::Separator;
        }
        let title = if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        };
        MenuEntry::item(self.id.clone(), title.clone(), self.enabled)
    }
}

#[cfg(test)]
mod tests;
