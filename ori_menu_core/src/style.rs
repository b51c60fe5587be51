//! Visual constants, metrics, and colors for popup menus.
//!
//! All metrics are in logical pixels. [`MenuMetrics::scaled`] converts them
//! to physical pixels for a given DPI scale factor.

// ── Menu styling constants (logical pixels) ─────────────────────────────────

/// Padding above the first row and below the last row.
pub const MENU_VERTICAL_PADDING: i32 = 4;
/// Left inset of item text and separator lines.
pub const MENU_HORIZONTAL_PADDING: i32 = 12;
/// Height of an item row.
pub const MENU_ITEM_HEIGHT: i32 = 28;
/// Height of a separator row (including its own vertical margins).
pub const MENU_SEPARATOR_HEIGHT: i32 = 9;
/// Font size of item titles.
pub const MENU_ITEM_TEXT_SIZE: f32 = 13.0;
/// Minimum popup width.
pub const MENU_MIN_WIDTH: i32 = 150;
/// Maximum popup width.
pub const MENU_MAX_WIDTH: i32 = 400;
/// Corner radius of the popup background.
pub const MENU_CORNER_RADIUS: f32 = 6.0;
/// Horizontal inset of the hover highlight from each menu edge.
pub const MENU_HOVER_INSET: i32 = 4;
/// Distance from the bottom of an item row up to the text baseline.
pub const MENU_TEXT_BASELINE_INSET: i32 = 10;
/// Stroke width of the border and separator lines.
pub const MENU_LINE_WIDTH: f32 = 1.0;

/// Virtual screen assumed when no monitor information is available.
pub const DEFAULT_SCREEN_WIDTH: i32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 1080;

/// Straight (non-premultiplied) RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            let byte = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
            Some(f32::from(byte) / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Integer layout metrics, already scaled to the target pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuMetrics {
    pub vertical_padding: i32,
    pub horizontal_padding: i32,
    pub item_height: i32,
    pub separator_height: i32,
    pub min_width: i32,
    pub max_width: i32,
    pub hover_inset: i32,
    pub text_baseline_inset: i32,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            vertical_padding: MENU_VERTICAL_PADDING,
            horizontal_padding: MENU_HORIZONTAL_PADDING,
            item_height: MENU_ITEM_HEIGHT,
            separator_height: MENU_SEPARATOR_HEIGHT,
            min_width: MENU_MIN_WIDTH,
            max_width: MENU_MAX_WIDTH,
            hover_inset: MENU_HOVER_INSET,
            text_baseline_inset: MENU_TEXT_BASELINE_INSET,
        }
    }
}

impl MenuMetrics {
    /// Default metrics multiplied by a DPI scale factor.
    pub fn scaled(scale: f64) -> Self {
        let s = |v: i32| (f64::from(v) * scale).round() as i32;
        let base = Self::default();
        Self {
            vertical_padding: s(base.vertical_padding),
            horizontal_padding: s(base.horizontal_padding),
            item_height: s(base.item_height),
            separator_height: s(base.separator_height),
            min_width: s(base.min_width),
            max_width: s(base.max_width),
            hover_inset: s(base.hover_inset),
            text_baseline_inset: s(base.text_baseline_inset),
        }
    }
}

/// Menu color scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuColors {
    /// Near-white translucent background.
    pub background: Rgba,
    pub border: Rgba,
    pub separator: Rgba,
    /// Highlight behind the hovered item.
    pub hover: Rgba,
    pub hover_text: Rgba,
    pub text: Rgba,
    pub disabled_text: Rgba,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            background: Rgba::new(0.98, 0.98, 0.98, 0.98),
            border: Rgba::new(0.7, 0.7, 0.7, 1.0),
            separator: Rgba::new(0.8, 0.8, 0.8, 1.0),
            hover: Rgba::new(0.2, 0.5, 0.9, 1.0),
            hover_text: Rgba::new(1.0, 1.0, 1.0, 1.0),
            text: Rgba::new(0.1, 0.1, 0.1, 1.0),
            disabled_text: Rgba::new(0.6, 0.6, 0.6, 1.0),
        }
    }
}

/// Everything that decides how a popup looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuStyle {
    pub metrics: MenuMetrics,
    pub colors: MenuColors,
    /// Title font size in pixels.
    pub font_size: f32,
    pub corner_radius: f32,
    pub line_width: f32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            metrics: MenuMetrics::default(),
            colors: MenuColors::default(),
            font_size: MENU_ITEM_TEXT_SIZE,
            corner_radius: MENU_CORNER_RADIUS,
            line_width: MENU_LINE_WIDTH,
        }
    }
}

impl MenuStyle {
    /// Rescale every pixel quantity for a DPI scale factor, keeping colors.
    ///
    /// `font_size` is the logical size to scale (configured size, not the
    /// possibly already scaled `self.font_size`).
    #[must_use]
    pub fn with_scale(self, scale: f64, font_size: f32) -> Self {
        let s = scale as f32;
        Self {
            metrics: MenuMetrics::scaled(scale),
            colors: self.colors,
            font_size: font_size * s,
            corner_radius: MENU_CORNER_RADIUS * s,
            line_width: MENU_LINE_WIDTH * s,
        }
    }
}
