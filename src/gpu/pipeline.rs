/// Instance data stride in bytes: 80 bytes per quad instance.
///
/// Layout:
///   [0..8]   pos:      vec2<f32>  (pixel position)
///   [8..16]  size:     vec2<f32>  (pixel size)
///   [16..24] `uv_pos`:   vec2<f32>  (atlas UV top-left)
///   [24..32] `uv_size`:  vec2<f32>  (atlas UV size)
///   [32..48] `fg_color`: vec4<f32>  (foreground RGBA)
///   [48..64] `bg_color`: vec4<f32>  (background RGBA)
///   [64..68] flags:    u32
///   [68..72] `corner_radius`: f32  (0.0 = sharp rect)
///   [72..80] _pad:     8 bytes
pub const INSTANCE_STRIDE: u64 = 80;

/// Uniform buffer size: one `mat4x4<f32>` projection.
pub const UNIFORM_SIZE: u64 = 64;

/// Instance vertex attributes, shared by both bg and fg pipelines.
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 8] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 8,
        shader_location: 1,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 16,
        shader_location: 2,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 24,
        shader_location: 3,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 32,
        shader_location: 4,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 48,
        shader_location: 5,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Uint32,
        offset: 64,
        shader_location: 6,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32,
        offset: 68,
        shader_location: 7,
    },
];

pub fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: INSTANCE_STRIDE,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

// --- WGSL Shaders ---

const BG_SHADER_SRC: &str = "
struct Uniforms {
    projection: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct QuadInput {
    @location(0) pos: vec2<f32>,
    @location(1) size: vec2<f32>,
    @location(2) uv_pos: vec2<f32>,
    @location(3) uv_size: vec2<f32>,
    @location(4) fg_color: vec4<f32>,
    @location(5) bg_color: vec4<f32>,
    @location(6) flags: u32,
    @location(7) corner_radius: f32,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) bg_color: vec4<f32>,
    @location(1) local_pos: vec2<f32>,
    @location(2) @interpolate(flat) rect_size: vec2<f32>,
    @location(3) @interpolate(flat) radius: f32,
}

@vertex
fn vs_main(@builtin(vertex_index) vi: u32, input: QuadInput) -> VertexOutput {
    let corner = vec2<f32>(f32(vi & 1u), f32((vi >> 1u) & 1u));
    let pixel_pos = input.pos + input.size * corner;

    var out: VertexOutput;
    out.position = uniforms.projection * vec4<f32>(pixel_pos, 0.0, 1.0);
    out.bg_color = input.bg_color;
    out.local_pos = corner * input.size;
    out.rect_size = input.size;
    out.radius = input.corner_radius;
    return out;
}

// Iq-style rounded box SDF with a uniform corner radius.
// p: position relative to box center
// b: box half-size
fn sd_rounded_box(p: vec2<f32>, b: vec2<f32>, r: f32) -> f32 {
    let q = abs(p) - b + r;
    return min(max(q.x, q.y), 0.0) + length(max(q, vec2(0.0))) - r;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    if (input.radius <= 0.0) {
        return vec4<f32>(input.bg_color.rgb * input.bg_color.a, input.bg_color.a);
    }

    let half = input.rect_size * 0.5;
    let p = input.local_pos - half;
    let r = min(input.radius, min(half.x, half.y));
    let d = sd_rounded_box(p, half, r);
    let aa = 1.0 - smoothstep(-0.5, 0.5, d);

    if (aa <= 0.0) {
        discard;
    }

    let a = input.bg_color.a * aa;
    return vec4<f32>(input.bg_color.rgb * a, a);
}
";

const FG_SHADER_SRC: &str = "
struct Uniforms {
    projection: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(1) @binding(0) var glyph_texture: texture_2d<f32>;
@group(1) @binding(1) var glyph_sampler: sampler;

struct QuadInput {
    @location(0) pos: vec2<f32>,
    @location(1) size: vec2<f32>,
    @location(2) uv_pos: vec2<f32>,
    @location(3) uv_size: vec2<f32>,
    @location(4) fg_color: vec4<f32>,
    @location(5) bg_color: vec4<f32>,
    @location(6) flags: u32,
    @location(7) corner_radius: f32,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) fg_color: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vi: u32, input: QuadInput) -> VertexOutput {
    let corner = vec2<f32>(f32(vi & 1u), f32((vi >> 1u) & 1u));
    let pixel_pos = input.pos + input.size * corner;

    var out: VertexOutput;
    out.position = uniforms.projection * vec4<f32>(pixel_pos, 0.0, 1.0);
    out.uv = input.uv_pos + input.uv_size * corner;
    out.fg_color = input.fg_color;
    return out;
}

// The sRGB render target blends in linear space, so raw coverage is the
// correct alpha.
@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let a = textureSample(glyph_texture, glyph_sampler, input.uv).r;
    let color = input.fg_color;

    // Premultiplied alpha output
    return vec4<f32>(color.rgb * a, a) * color.a;
}
";

// --- Pipeline creation ---

/// Uniform bind group layout: group(0) binding(0) = projection.
pub fn create_uniform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("uniform_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
            },
            count: None,
        }],
    })
}

/// Atlas texture bind group layout: group(1) binding(0) = texture, binding(1) = sampler.
pub fn create_atlas_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("atlas_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Premultiplied alpha: shaders output (rgb * a, a).
const PREMULTIPLIED_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

fn create_quad_pipeline(
    device: &wgpu::Device,
    label: &str,
    source: &'static str,
    format: wgpu::TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[instance_buffer_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(PREMULTIPLIED_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Background pipeline: colored quads, optionally rounded via SDF.
pub fn create_bg_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    uniform_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    create_quad_pipeline(device, "bg_pipeline", BG_SHADER_SRC, format, &[uniform_layout])
}

/// Foreground pipeline: alpha-blended textured glyph quads.
pub fn create_fg_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    uniform_layout: &wgpu::BindGroupLayout,
    atlas_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    create_quad_pipeline(
        device,
        "fg_pipeline",
        FG_SHADER_SRC,
        format,
        &[uniform_layout, atlas_layout],
    )
}
