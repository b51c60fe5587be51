//! GPU device, adapter, queue, and surface management.
//!
//! `GpuState` is shared by the host window and the popup and owns the wgpu
//! device lifetime. Each window keeps its own [`RenderTarget`].

use std::sync::Arc;

use winit::window::Window;

/// A configured surface for one window.
pub struct RenderTarget {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderTarget {
    /// Resize the swapchain. Zero sizes are clamped to 1.
    pub fn resize(&mut self, gpu: &GpuState, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if self.config.width == width && self.config.height == height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&gpu.device, &self.config);
    }
}

/// GPU state shared across all windows.
pub struct GpuState {
    instance: wgpu::Instance,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    /// The native surface format (used for surface configuration).
    surface_format: wgpu::TextureFormat,
    /// The sRGB format used for render passes and pipelines.
    /// May differ from `surface_format` when the surface doesn't natively
    /// support sRGB.
    pub(super) render_format: wgpu::TextureFormat,
    surface_alpha_mode: wgpu::CompositeAlphaMode,
}

impl GpuState {
    /// Initialize GPU: instance, adapter, device, queue. `window` is only
    /// used to pick an adapter that can present to it.
    ///
    /// Tries the primary backends first, then secondary ones (GL).
    pub fn new(window: &Arc<Window>) -> Option<(Self, RenderTarget)> {
        if let Some(state) = Self::try_init(window, wgpu::Backends::PRIMARY) {
            return Some(state);
        }
        log::warn!("gpu: no primary backend, trying secondary backends");
        Self::try_init(window, wgpu::Backends::SECONDARY)
    }

    fn try_init(window: &Arc<Window>, backends: wgpu::Backends) -> Option<(Self, RenderTarget)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).ok()?;

        // Pick the first discrete GPU that supports our surface, falling
        // back to any compatible adapter.
        let mut adapter: Option<wgpu::Adapter> = None;
        let mut fallback: Option<wgpu::Adapter> = None;
        for a in pollster::block_on(instance.enumerate_adapters(backends)) {
            if !a.is_surface_supported(&surface) {
                continue;
            }
            if a.get_info().device_type == wgpu::DeviceType::DiscreteGpu {
                adapter = Some(a);
                break;
            }
            if fallback.is_none() {
                fallback = Some(a);
            }
        }
        let adapter = adapter.or(fallback)?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("ori_menu"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            ..Default::default()
        }))
        .map_err(|e| log::error!("gpu: device request failed: {e}"))
        .ok()?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = *caps.formats.first()?;
        let render_format = surface_format.add_srgb_suffix();

        // A non-opaque alpha mode lets the rounded corners show the desktop
        // through the transparent window.
        let surface_alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PostMultiplied)
        {
            wgpu::CompositeAlphaMode::PostMultiplied
        } else {
            *caps.alpha_modes.first()?
        };

        let info = adapter.get_info();
        log::info!(
            "gpu: adapter={}, backend={:?}, surface_format={surface_format:?}, \
             render_format={render_format:?}, alpha_mode={surface_alpha_mode:?} \
             (available: {:?})",
            info.name,
            info.backend,
            caps.alpha_modes,
        );

        let state = Self {
            instance,
            device,
            queue,
            surface_format,
            render_format,
            surface_alpha_mode,
        };
        let target = state.configure(surface, window);
        Some((state, target))
    }

    /// Returns true if the surface alpha mode supports transparency.
    pub fn supports_transparency(&self) -> bool {
        !matches!(self.surface_alpha_mode, wgpu::CompositeAlphaMode::Opaque)
    }

    /// `view_formats` for surface configuration: an sRGB view of a non-sRGB
    /// surface when the two formats differ.
    fn view_formats(&self) -> Vec<wgpu::TextureFormat> {
        if self.render_format == self.surface_format {
            vec![]
        } else {
            vec![self.render_format]
        }
    }

    /// Create and configure a surface for another window.
    pub fn create_target(&self, window: &Arc<Window>) -> Option<RenderTarget> {
        let surface = self.instance.create_surface(window.clone()).ok()?;
        Some(self.configure(surface, window))
    }

    fn configure(&self, surface: wgpu::Surface<'static>, window: &Window) -> RenderTarget {
        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: self.surface_alpha_mode,
            view_formats: self.view_formats(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.device, &config);
        RenderTarget { surface, config }
    }
}
