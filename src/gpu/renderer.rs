//! Popup renderer: turns a draw list into instanced quads.
//!
//! Shapes go through the SDF background pipeline, text through the glyph
//! pipeline. Both are drawn in one pass, backgrounds first.

use ori_menu_core::{DrawCommand, Rgba};

use super::atlas::GlyphAtlas;
use super::instance_writer::{InstanceWriter, reuse_or_create_buffer};
use super::pipeline::{self, UNIFORM_SIZE};
use super::state::{GpuState, RenderTarget};
use super::rgba_to_linear;
use crate::font::MenuFont;

pub struct PopupRenderer {
    bg_pipeline: wgpu::RenderPipeline,
    fg_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    atlas: GlyphAtlas,
    atlas_bind_group: wgpu::BindGroup,
    /// Instance bytes and GPU buffers kept across frames.
    bg_bytes: Vec<u8>,
    fg_bytes: Vec<u8>,
    bg_buffer: Option<wgpu::Buffer>,
    fg_buffer: Option<wgpu::Buffer>,
}

impl PopupRenderer {
    pub fn new(gpu: &GpuState) -> Self {
        let device = &gpu.device;
        let format = gpu.render_format;

        let uniform_layout = pipeline::create_uniform_bind_group_layout(device);
        let atlas_layout = pipeline::create_atlas_bind_group_layout(device);

        let bg_pipeline = pipeline::create_bg_pipeline(device, format, &uniform_layout);
        let fg_pipeline =
            pipeline::create_fg_pipeline(device, format, &uniform_layout, &atlas_layout);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let atlas = GlyphAtlas::new(device);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bind_group"),
            layout: &atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(atlas.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            bg_pipeline,
            fg_pipeline,
            uniform_buffer,
            uniform_bind_group,
            atlas,
            atlas_bind_group,
            bg_bytes: Vec::new(),
            fg_bytes: Vec::new(),
            bg_buffer: None,
            fg_buffer: None,
        }
    }

    /// Drop cached glyphs, e.g. after the font changed.
    pub fn clear_glyphs(&mut self) {
        self.atlas.clear();
    }

    /// Draw `commands` into the target, cleared to transparent first.
    pub fn render(
        &mut self,
        gpu: &GpuState,
        target: &RenderTarget,
        commands: &[DrawCommand],
        font: &mut MenuFont,
    ) {
        let w = target.config.width as f32;
        let h = target.config.height as f32;
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, &ortho_projection(w, h));

        let mut bg = InstanceWriter::from_buffer(std::mem::take(&mut self.bg_bytes));
        let mut fg = InstanceWriter::from_buffer(std::mem::take(&mut self.fg_bytes));
        for cmd in commands {
            match cmd {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                } => self.push_text(&mut fg, gpu, font, (*x, *y), text, *font_size, *color),
                _ => push_shape(&mut bg, cmd),
            }
        }

        self.bg_buffer = Some(reuse_or_create_buffer(
            &gpu.device,
            &gpu.queue,
            self.bg_buffer.take(),
            bg.as_bytes(),
            "bg_instances",
        ));
        self.fg_buffer = Some(reuse_or_create_buffer(
            &gpu.device,
            &gpu.queue,
            self.fg_buffer.take(),
            fg.as_bytes(),
            "fg_instances",
        ));

        self.submit(gpu, target, wgpu::Color::TRANSPARENT, &bg, &fg);

        self.bg_bytes = bg.into_buffer();
        self.fg_bytes = fg.into_buffer();
    }

    /// Shape, rasterize, and push one line of text. `origin.1` is the baseline.
    fn push_text(
        &mut self,
        fg: &mut InstanceWriter,
        gpu: &GpuState,
        font: &mut MenuFont,
        origin: (f32, f32),
        text: &str,
        size: f32,
        color: Rgba,
    ) {
        let Some(ui) = font.ui_mut() else {
            return;
        };
        let color = rgba_to_linear(color);
        let glyphs = ui.shape(text, size);
        for glyph in glyphs {
            let entry = self.atlas.get_or_insert(
                glyph.glyph_id,
                size,
                || ui.rasterize(glyph.glyph_id, size),
                &gpu.queue,
            );
            if entry.is_empty() {
                continue;
            }
            let x = (origin.0 + glyph.x).round() + entry.left as f32;
            let y = (origin.1 - glyph.y).round() - entry.top as f32;
            fg.push_glyph(
                x,
                y,
                entry.width as f32,
                entry.height as f32,
                entry.uv_pos,
                entry.uv_size,
                color,
            );
        }
    }

    fn submit(
        &self,
        gpu: &GpuState,
        target: &RenderTarget,
        clear: wgpu::Color,
        bg: &InstanceWriter,
        fg: &InstanceWriter,
    ) {
        present_frame(gpu, target, clear, |rpass| {
            if let Some(buffer) = self.bg_buffer.as_ref().filter(|_| bg.count() > 0) {
                rpass.set_pipeline(&self.bg_pipeline);
                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..4, 0..bg.count());
            }

            if let Some(buffer) = self.fg_buffer.as_ref().filter(|_| fg.count() > 0) {
                rpass.set_pipeline(&self.fg_pipeline);
                rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
                rpass.set_bind_group(1, &self.atlas_bind_group, &[]);
                rpass.set_vertex_buffer(0, buffer.slice(..));
                rpass.draw(0..4, 0..fg.count());
            }
        });
    }
}

/// Fill the whole target with one color. Used for the host window.
pub fn clear_target(gpu: &GpuState, target: &RenderTarget, color: Rgba) {
    let c = rgba_to_linear(color);
    let clear = wgpu::Color {
        r: f64::from(c[0]),
        g: f64::from(c[1]),
        b: f64::from(c[2]),
        a: f64::from(c[3]),
    };
    present_frame(gpu, target, clear, |_| {});
}

/// Acquire the next frame, run one cleared render pass, and present.
///
/// A lost surface is reconfigured and the frame skipped.
fn present_frame(
    gpu: &GpuState,
    target: &RenderTarget,
    clear: wgpu::Color,
    draw: impl FnOnce(&mut wgpu::RenderPass<'_>),
) {
    let frame = match target.surface.get_current_texture() {
        Ok(f) => f,
        Err(wgpu::SurfaceError::Lost) => {
            target.surface.configure(&gpu.device, &target.config);
            return;
        }
        Err(e) => {
            log::warn!("surface error: {e}");
            return;
        }
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
        format: Some(gpu.render_format),
        ..Default::default()
    });

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        draw(&mut rpass);
    }

    gpu.queue.submit(std::iter::once(encoder.finish()));
    frame.present();
}

/// Push the background quads for a non-text command.
fn push_shape(bg: &mut InstanceWriter, cmd: &DrawCommand) {
    match cmd {
        DrawCommand::RoundedRect {
            rect,
            radius,
            fill,
            border,
            border_width,
        } => {
            let bw = border_width.max(0.0);
            if bw > 0.0 {
                bg.push_rounded_rect(
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    rgba_to_linear(*border),
                    *radius,
                );
            }
            bg.push_rounded_rect(
                rect.x + bw,
                rect.y + bw,
                (rect.width - 2.0 * bw).max(0.0),
                (rect.height - 2.0 * bw).max(0.0),
                rgba_to_linear(*fill),
                (radius - bw).max(0.0),
            );
        }
        DrawCommand::FillRect { rect, color } => {
            bg.push_rect(rect.x, rect.y, rect.width, rect.height, rgba_to_linear(*color));
        }
        DrawCommand::Line {
            from,
            to,
            width,
            color,
        } => {
            let half = width / 2.0;
            let color = rgba_to_linear(*color);
            if (from.1 - to.1).abs() < f32::EPSILON {
                let x = from.0.min(to.0);
                bg.push_rect(x, from.1 - half, (to.0 - from.0).abs(), *width, color);
            } else if (from.0 - to.0).abs() < f32::EPSILON {
                let y = from.1.min(to.1);
                bg.push_rect(from.0 - half, y, *width, (to.1 - from.1).abs(), color);
            } else {
                log::trace!("renderer: skipping diagonal line {from:?} -> {to:?}");
            }
        }
        DrawCommand::Text { .. } => {}
    }
}

/// Build an orthographic projection matrix (pixels → NDC) as 64 bytes.
/// Maps (0,0)-(w,h) to (-1,1)-(1,-1), column-major for WGSL mat4x4.
fn ortho_projection(w: f32, h: f32) -> [u8; 64] {
    #[rustfmt::skip]
    let proj: [f32; 16] = [
        2.0 / w, 0.0,      0.0, 0.0,
        0.0,     -2.0 / h, 0.0, 0.0,
        0.0,     0.0,      1.0, 0.0,
        -1.0,    1.0,      0.0, 1.0,
    ];

    let mut bytes = [0u8; 64];
    for (chunk, v) in bytes.chunks_exact_mut(4).zip(proj) {
        chunk.copy_from_slice(&v.to_ne_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use ori_menu_core::{DrawCommand, RectF, Rgba};

    use super::{InstanceWriter, ortho_projection, push_shape};
    use crate::gpu::pipeline::INSTANCE_STRIDE;

    fn f32s(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    /// (x, y, w, h, radius) of each instance.
    fn quads(w: &InstanceWriter) -> Vec<(f32, f32, f32, f32, f32)> {
        w.as_bytes()
            .chunks_exact(INSTANCE_STRIDE as usize)
            .map(|inst| {
                let v = f32s(inst);
                (v[0], v[1], v[2], v[3], v[17])
            })
            .collect()
    }

    #[test]
    fn projection_maps_corners_to_ndc() {
        let m = f32s(&ortho_projection(200.0, 100.0));
        // Column-major: x' = m0*x + m12, y' = m5*y + m13.
        let check = |x: f32, y: f32, want: (f32, f32)| {
            let got = (m[0] * x + m[12], m[5] * y + m[13]);
            assert!((got.0 - want.0).abs() < 1e-6, "{got:?} vs {want:?}");
            assert!((got.1 - want.1).abs() < 1e-6, "{got:?} vs {want:?}");
        };
        check(0.0, 0.0, (-1.0, 1.0));
        check(200.0, 100.0, (1.0, -1.0));
        check(100.0, 50.0, (0.0, 0.0));
    }

    #[test]
    fn bordered_rounded_rect_is_two_quads() {
        let mut bg = InstanceWriter::from_buffer(Vec::new());
        push_shape(
            &mut bg,
            &DrawCommand::RoundedRect {
                rect: RectF::new(0.0, 0.0, 150.0, 129.0),
                radius: 6.0,
                fill: Rgba::new(0.2, 0.2, 0.2, 1.0),
                border: Rgba::new(0.5, 0.5, 0.5, 1.0),
                border_width: 1.0,
            },
        );
        assert_eq!(
            quads(&bg),
            vec![
                (0.0, 0.0, 150.0, 129.0, 6.0),
                (1.0, 1.0, 148.0, 127.0, 5.0),
            ]
        );
    }

    #[test]
    fn borderless_rounded_rect_is_one_quad() {
        let mut bg = InstanceWriter::from_buffer(Vec::new());
        push_shape(
            &mut bg,
            &DrawCommand::RoundedRect {
                rect: RectF::new(0.0, 0.0, 10.0, 10.0),
                radius: 3.0,
                fill: Rgba::new(1.0, 1.0, 1.0, 1.0),
                border: Rgba::new(0.0, 0.0, 0.0, 1.0),
                border_width: 0.0,
            },
        );
        assert_eq!(quads(&bg), vec![(0.0, 0.0, 10.0, 10.0, 3.0)]);
    }

    #[test]
    fn horizontal_line_is_thin_rect() {
        let mut bg = InstanceWriter::from_buffer(Vec::new());
        push_shape(
            &mut bg,
            &DrawCommand::Line {
                from: (12.0, 68.5),
                to: (138.0, 68.5),
                width: 1.0,
                color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            },
        );
        assert_eq!(quads(&bg), vec![(12.0, 68.0, 126.0, 1.0, 0.0)]);
    }

    #[test]
    fn vertical_line_is_thin_rect() {
        let mut bg = InstanceWriter::from_buffer(Vec::new());
        push_shape(
            &mut bg,
            &DrawCommand::Line {
                from: (5.0, 20.0),
                to: (5.0, 10.0),
                width: 2.0,
                color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            },
        );
        assert_eq!(quads(&bg), vec![(4.0, 10.0, 2.0, 10.0, 0.0)]);
    }

    #[test]
    fn fill_rect_and_text() {
        let mut bg = InstanceWriter::from_buffer(Vec::new());
        push_shape(
            &mut bg,
            &DrawCommand::FillRect {
                rect: RectF::new(4.0, 10.0, 142.0, 28.0),
                color: Rgba::new(0.0, 0.0, 1.0, 1.0),
            },
        );
        // Text is not a shape.
        push_shape(
            &mut bg,
            &DrawCommand::Text {
                x: 12.0,
                y: 28.0,
                text: "Cut".to_owned(),
                font_size: 13.0,
                color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            },
        );
        assert_eq!(quads(&bg), vec![(4.0, 10.0, 142.0, 28.0, 0.0)]);
    }
}
