//! Glyph atlas with 2D rectangle bin packing.
//!
//! Stores rasterized glyph bitmaps in a single R8 texture. Menus show a
//! handful of short titles at one size, so one page is plenty; when it does
//! fill up (many font size changes) the atlas is cleared and refilled.

use std::collections::HashMap;

/// Atlas page size in pixels (width = height).
const PAGE_SIZE: u32 = 1024;

/// Cache key: glyph ID + size (26.6 fixed-point).
type GlyphKey = (u16, u32);

/// Convert a font size in pixels to a 26.6 fixed-point size key.
pub fn size_key(size: f32) -> u32 {
    (size * 64.0).round() as u32
}

/// An 8-bit coverage bitmap for one glyph, as rasterized.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Offset from the baseline up to the top edge of the bitmap.
    pub top: i32,
    pub advance_width: f32,
    /// `width * height` coverage bytes, row-major.
    pub data: Vec<u8>,
}

// Axis-aligned rectangle for the packer's free-space tracking.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// 2D rectangle bin packer using the Guillotine best-short-side-fit algorithm.
///
/// Maintains a list of free rectangles within a fixed-size page. When a glyph
/// is packed, the best-fitting free rectangle is split into two smaller ones
/// along the shorter leftover axis.
///
/// Reference: Jukka Jylanki, "A Thousand Ways to Pack the Bin" (2010).
struct RectPacker {
    width: u32,
    height: u32,
    free_rects: Vec<Rect>,
}

impl RectPacker {
    fn new(width: u32, height: u32) -> Self {
        let mut packer = Self {
            width,
            height,
            free_rects: Vec::new(),
        };
        packer.reset();
        packer
    }

    /// Find space for a glyph of the given dimensions.
    ///
    /// Returns the top-left position `(x, y)` within the page, or `None`
    /// if no free rectangle can fit the glyph.
    fn pack(&mut self, glyph_w: u32, glyph_h: u32) -> Option<(u32, u32)> {
        let (idx, _) = self
            .free_rects
            .iter()
            .enumerate()
            .filter(|(_, r)| r.w >= glyph_w && r.h >= glyph_h)
            .map(|(i, r)| {
                let leftover_w = r.w - glyph_w;
                let leftover_h = r.h - glyph_h;
                (i, (leftover_w.min(leftover_h), leftover_w.max(leftover_h)))
            })
            .min_by_key(|&(_, fit)| fit)?;

        let r = self.free_rects.swap_remove(idx);
        let leftover_w = r.w - glyph_w;
        let leftover_h = r.h - glyph_h;

        // Split along the shorter leftover axis: the longer strip keeps the
        // full extent of the chosen rect.
        let (right, below) = if leftover_w < leftover_h {
            (
                Rect {
                    x: r.x + glyph_w,
                    y: r.y,
                    w: leftover_w,
                    h: glyph_h,
                },
                Rect {
                    x: r.x,
                    y: r.y + glyph_h,
                    w: r.w,
                    h: leftover_h,
                },
            )
        } else {
            (
                Rect {
                    x: r.x + glyph_w,
                    y: r.y,
                    w: leftover_w,
                    h: r.h,
                },
                Rect {
                    x: r.x,
                    y: r.y + glyph_h,
                    w: glyph_w,
                    h: leftover_h,
                },
            )
        };
        self.free_rects
            .extend([right, below].into_iter().filter(|f| f.w > 0 && f.h > 0));

        Some((r.x, r.y))
    }

    /// Reset the packer to a single free rectangle covering the full page.
    fn reset(&mut self) {
        self.free_rects.clear();
        self.free_rects.push(Rect {
            x: 0,
            y: 0,
            w: self.width,
            h: self.height,
        });
    }
}

/// UV coordinates and placement for a glyph stored in the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasEntry {
    pub uv_pos: [f32; 2],
    pub uv_size: [f32; 2],
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

impl AtlasEntry {
    /// A zero-size entry for glyphs that have no bitmap (e.g. space).
    const EMPTY: Self = Self {
        uv_pos: [0.0, 0.0],
        uv_size: [0.0, 0.0],
        width: 0,
        height: 0,
        left: 0,
        top: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Single-page glyph texture atlas.
pub struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: RectPacker,
    entries: HashMap<GlyphKey, AtlasEntry>,
}

impl GlyphAtlas {
    pub fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glyph_atlas"),
            size: wgpu::Extent3d {
                width: PAGE_SIZE,
                height: PAGE_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            packer: RectPacker::new(PAGE_SIZE, PAGE_SIZE),
            entries: HashMap::new(),
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Look up a glyph in the atlas, inserting it if missing.
    ///
    /// The `rasterize` callback is invoked on cache miss to produce the
    /// bitmap. Glyphs that fail to rasterize or don't fit are cached as
    /// empty entries.
    pub fn get_or_insert(
        &mut self,
        glyph_id: u16,
        size: f32,
        rasterize: impl FnOnce() -> Option<GlyphBitmap>,
        queue: &wgpu::Queue,
    ) -> AtlasEntry {
        let key = (glyph_id, size_key(size));
        if let Some(entry) = self.entries.get(&key) {
            return *entry;
        }
        let entry = match rasterize() {
            Some(bitmap) => self.upload_bitmap(&bitmap, queue),
            None => AtlasEntry::EMPTY,
        };
        self.entries.insert(key, entry);
        entry
    }

    /// Clear all entries and reset packing state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.packer.reset();
    }

    /// Allocate atlas space, upload bitmap, and return the entry.
    fn upload_bitmap(&mut self, bitmap: &GlyphBitmap, queue: &wgpu::Queue) -> AtlasEntry {
        let gw = bitmap.width;
        let gh = bitmap.height;

        // Zero-size bitmap (e.g. space): no UV region.
        if gw == 0 || gh == 0 || bitmap.data.len() < (gw * gh) as usize {
            return AtlasEntry::EMPTY;
        }

        let pos = match self.packer.pack(gw, gh) {
            Some(pos) => pos,
            None => {
                log::debug!("atlas: page full, clearing");
                self.clear();
                match self.packer.pack(gw, gh) {
                    Some(pos) => pos,
                    None => {
                        log::warn!("atlas: glyph {gw}x{gh} larger than the page");
                        return AtlasEntry::EMPTY;
                    }
                }
            }
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: pos.0,
                    y: pos.1,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(gw),
                rows_per_image: Some(gh),
            },
            wgpu::Extent3d {
                width: gw,
                height: gh,
                depth_or_array_layers: 1,
            },
        );

        let ps = PAGE_SIZE as f32;
        AtlasEntry {
            uv_pos: [pos.0 as f32 / ps, pos.1 as f32 / ps],
            uv_size: [gw as f32 / ps, gh as f32 / ps],
            width: gw,
            height: gh,
            left: bitmap.left,
            top: bitmap.top,
        }
    }
}
