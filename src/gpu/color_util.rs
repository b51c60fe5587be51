//! Color conversion for GPU rendering.
//!
//! Menu colors are authored in sRGB. Render targets are sRGB views, so
//! instance colors are converted to linear space before upload.

use ori_menu_core::Rgba;

/// Convert an sRGB component (0.0-1.0) to linear light.
pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB color to `[f32; 4]` RGBA in **linear** space. Alpha is
/// left as is.
pub(crate) fn rgba_to_linear(c: Rgba) -> [f32; 4] {
    [
        srgb_to_linear(c.r),
        srgb_to_linear(c.g),
        srgb_to_linear(c.b),
        c.a,
    ]
}
