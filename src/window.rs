//! Native popup window: a winit window implementing [`PopupSurface`].

use std::rc::Rc;
use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId, WindowLevel};

use ori_menu_core::{DisplayInfo, DrawCommand, ListenerId, PopupSurface, ScreenRect, TextMeasure};

use crate::font::MenuFont;
use crate::gpu::{GpuState, PopupRenderer, RenderTarget};

/// GPU resources for drawing into the popup window.
struct Painter {
    gpu: Rc<GpuState>,
    target: RenderTarget,
    renderer: PopupRenderer,
}

pub struct PopupWindow {
    /// `None` once destroyed.
    window: Option<Arc<Window>>,
    /// `None` without a GPU; the popup still tracks state but draws nothing.
    painter: Option<Painter>,
    font: MenuFont,
    /// Active parent listener; the app checks it when routing parent presses.
    listener: Option<ListenerId>,
    next_listener: u64,
}

impl PopupWindow {
    pub fn new(
        event_loop: &ActiveEventLoop,
        gpu: Option<Rc<GpuState>>,
        font: MenuFont,
    ) -> Result<Self, OsError> {
        #[allow(unused_mut)]
        let mut attrs = Window::default_attributes()
            .with_title("ori_menu popup")
            .with_inner_size(PhysicalSize::new(1u32, 1u32))
            .with_decorations(false)
            .with_resizable(false)
            .with_transparent(true)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_visible(false);

        #[cfg(target_os = "linux")]
        {
            use winit::platform::x11::{WindowAttributesExtX11, WindowType};
            attrs = attrs
                .with_x11_window_type(vec![WindowType::PopupMenu])
                .with_override_redirect(true);
        }

        #[cfg(target_os = "windows")]
        {
            use winit::platform::windows::WindowAttributesExtWindows;
            attrs = attrs.with_skip_taskbar(true);
        }

        let window = Arc::new(event_loop.create_window(attrs)?);
        let painter = gpu.and_then(|gpu| {
            let target = gpu.create_target(&window)?;
            if !gpu.supports_transparency() {
                log::info!("popup: surface is opaque, corners will not be see-through");
            }
            let renderer = PopupRenderer::new(&gpu);
            Some(Painter {
                gpu,
                target,
                renderer,
            })
        });
        if painter.is_none() {
            log::warn!("popup: no GPU surface, the menu will not be drawn");
        }

        Ok(Self {
            window: Some(window),
            painter,
            font,
            listener: None,
            next_listener: 0,
        })
    }

    pub fn id(&self) -> Option<WindowId> {
        self.window.as_ref().map(|w| w.id())
    }

    /// Screen position of the window's client area, when the platform
    /// reports one.
    pub fn inner_position(&self) -> Option<(i32, i32)> {
        let pos = self.window.as_ref()?.inner_position().ok()?;
        Some((pos.x, pos.y))
    }

    pub fn is_listening_to_parent(&self) -> bool {
        self.listener.is_some()
    }

    /// Swap the font, dropping glyphs rasterized from the old one.
    pub fn set_font(&mut self, font: MenuFont) {
        self.font = font;
        if let Some(painter) = self.painter.as_mut() {
            painter.renderer.clear_glyphs();
        }
    }

    /// Present one frame of `commands`.
    pub fn render(&mut self, commands: &[DrawCommand]) {
        let Some(painter) = self.painter.as_mut() else {
            return;
        };
        painter
            .renderer
            .render(&painter.gpu, &painter.target, commands, &mut self.font);
    }
}

impl TextMeasure for PopupWindow {
    fn text_width(&mut self, text: &str, font_size: f32) -> f32 {
        self.font.text_width(text, font_size)
    }
}

impl PopupSurface for PopupWindow {
    fn display_info(&self) -> Option<DisplayInfo> {
        let window = self.window.as_ref()?;
        let handles: Vec<_> = window.available_monitors().collect();
        if handles.is_empty() {
            return None;
        }
        let primary = window
            .primary_monitor()
            .and_then(|p| handles.iter().position(|m| *m == p));
        let monitors = handles
            .iter()
            .map(|m| {
                let pos = m.position();
                let size = m.size();
                ScreenRect::new(pos.x, pos.y, size.width as i32, size.height as i32)
            })
            .collect();
        Some(DisplayInfo { monitors, primary })
    }

    fn set_geometry(&mut self, rect: ScreenRect) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let width = rect.width.max(1) as u32;
        let height = rect.height.max(1) as u32;
        window.set_outer_position(PhysicalPosition::new(rect.x, rect.y));
        // The returned size is only a hint on some platforms; the surface
        // follows the requested size either way.
        let _ = window.request_inner_size(PhysicalSize::new(width, height));
        if let Some(painter) = self.painter.as_mut() {
            painter.target.resize(&painter.gpu, width, height);
        }
    }

    fn show(&mut self) {
        if let Some(window) = &self.window {
            window.set_visible(true);
        }
    }

    fn hide(&mut self) {
        if let Some(window) = &self.window {
            window.set_visible(false);
        }
    }

    fn request_redraw(&mut self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn install_parent_listener(&mut self) -> Option<ListenerId> {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listener = Some(id);
        Some(id)
    }

    fn remove_parent_listener(&mut self, id: ListenerId) {
        if self.listener == Some(id) {
            self.listener = None;
        }
    }

    fn destroy(&mut self) {
        // The surface borrows the window, so it goes first.
        self.painter = None;
        if let Some(window) = self.window.take() {
            window.set_visible(false);
            log::debug!("popup: window {:?} destroyed", window.id());
        }
    }
}
