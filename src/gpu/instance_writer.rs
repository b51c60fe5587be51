//! GPU instance byte buffer writer.

use super::pipeline::INSTANCE_STRIDE;

/// Reuse an existing GPU buffer if it has enough capacity, otherwise create a new one.
///
/// When `existing` is `Some` and its size >= the data length, writes data
/// into the existing buffer via `queue.write_buffer()` (no allocation).
/// Otherwise creates a fresh buffer.
pub(super) fn reuse_or_create_buffer(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    existing: Option<wgpu::Buffer>,
    data: &[u8],
    label: &str,
) -> wgpu::Buffer {
    let needed = (data.len() as u64).max(INSTANCE_STRIDE);
    if let Some(buf) = existing {
        if buf.size() >= needed {
            if !data.is_empty() {
                queue.write_buffer(&buf, 0, data);
            }
            return buf;
        }
    }
    let buf = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: needed,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    if !data.is_empty() {
        queue.write_buffer(&buf, 0, data);
    }
    buf
}

/// Writes quad instance data to a byte buffer without unsafe code.
pub(super) struct InstanceWriter {
    data: Vec<u8>,
}

impl InstanceWriter {
    /// Reuse an existing byte buffer, clearing its contents but keeping its allocation.
    pub(super) fn from_buffer(mut buf: Vec<u8>) -> Self {
        buf.clear();
        Self { data: buf }
    }

    /// Consume the writer, returning the underlying byte buffer for reuse.
    pub(super) fn into_buffer(self) -> Vec<u8> {
        self.data
    }

    /// Push a colored rectangle (no texture, sharp corners).
    pub(super) fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.push_colored_rect(x, y, w, h, color, 0.0);
    }

    /// Push a colored rectangle with all four corners rounded.
    pub(super) fn push_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
        radius: f32,
    ) {
        self.push_colored_rect(x, y, w, h, color, radius.max(0.0));
    }

    fn push_colored_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        bg_color: [f32; 4],
        corner_radius: f32,
    ) {
        self.push_raw(
            [x, y],
            [w, h],
            [0.0, 0.0],
            [0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            bg_color,
            0,
            corner_radius,
        );
    }

    /// Push a textured glyph quad (alpha-blended).
    pub(super) fn push_glyph(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        uv_pos: [f32; 2],
        uv_size: [f32; 2],
        fg_color: [f32; 4],
    ) {
        self.push_raw(
            [x, y],
            [w, h],
            uv_pos,
            uv_size,
            fg_color,
            [0.0, 0.0, 0.0, 0.0],
            1,
            0.0,
        );
    }

    /// Write a full 80-byte instance record.
    fn push_raw(
        &mut self,
        pos: [f32; 2],
        size: [f32; 2],
        uv_pos: [f32; 2],
        uv_size: [f32; 2],
        fg_color: [f32; 4],
        bg_color: [f32; 4],
        flags: u32,
        corner_radius: f32,
    ) {
        let floats = pos
            .iter()
            .chain(&size)
            .chain(&uv_pos)
            .chain(&uv_size)
            .chain(&fg_color)
            .chain(&bg_color);
        for &v in floats {
            self.data.extend_from_slice(&v.to_ne_bytes());
        }
        self.data.extend_from_slice(&flags.to_ne_bytes());
        self.data.extend_from_slice(&corner_radius.to_ne_bytes());
        // 8 bytes padding to reach 80-byte stride
        self.data.extend_from_slice(&[0u8; 8]);
    }

    pub(super) fn count(&self) -> u32 {
        (self.data.len() / INSTANCE_STRIDE as usize) as u32
    }

    pub(super) fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::{INSTANCE_STRIDE, InstanceWriter};

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        let mut b = [0u8; 4];
        b.copy_from_slice(&bytes[offset..offset + 4]);
        f32::from_ne_bytes(b)
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        let mut b = [0u8; 4];
        b.copy_from_slice(&bytes[offset..offset + 4]);
        u32::from_ne_bytes(b)
    }

    #[test]
    fn each_push_writes_one_stride() {
        let mut w = InstanceWriter::from_buffer(Vec::new());
        w.push_rect(0.0, 0.0, 10.0, 10.0, [1.0; 4]);
        w.push_rounded_rect(0.0, 0.0, 10.0, 10.0, [1.0; 4], 4.0);
        w.push_glyph(0.0, 0.0, 5.0, 5.0, [0.0; 2], [0.1; 2], [1.0; 4]);
        assert_eq!(w.count(), 3);
        assert_eq!(w.as_bytes().len(), 3 * INSTANCE_STRIDE as usize);
    }

    #[test]
    fn rounded_rect_layout() {
        let mut w = InstanceWriter::from_buffer(Vec::new());
        w.push_rounded_rect(1.0, 2.0, 30.0, 40.0, [0.1, 0.2, 0.3, 0.4], 6.0);
        let b = w.as_bytes();
        assert_eq!(f32_at(b, 0), 1.0);
        assert_eq!(f32_at(b, 4), 2.0);
        assert_eq!(f32_at(b, 8), 30.0);
        assert_eq!(f32_at(b, 12), 40.0);
        // bg color at 48..64
        assert_eq!(f32_at(b, 48), 0.1);
        assert_eq!(f32_at(b, 60), 0.4);
        assert_eq!(u32_at(b, 64), 0);
        assert_eq!(f32_at(b, 68), 6.0);
    }

    #[test]
    fn glyph_sets_flag_and_uv() {
        let mut w = InstanceWriter::from_buffer(Vec::new());
        w.push_glyph(0.0, 0.0, 5.0, 6.0, [0.25, 0.5], [0.125, 0.0625], [1.0; 4]);
        let b = w.as_bytes();
        assert_eq!(f32_at(b, 16), 0.25);
        assert_eq!(f32_at(b, 28), 0.0625);
        assert_eq!(u32_at(b, 64), 1);
    }

    #[test]
    fn buffer_is_reused_empty() {
        let mut w = InstanceWriter::from_buffer(Vec::new());
        w.push_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        let w = InstanceWriter::from_buffer(w.into_buffer());
        assert_eq!(w.count(), 0);
    }
}
