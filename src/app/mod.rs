//! Application state, startup, and popup wiring.
//!
//! A small host window stands in for the application that owns the menu:
//! right-clicking it opens a [`ContextMenuPopup`] at the pointer.

mod event_loop;

use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::Window;

use ori_menu_core::{ContextMenuPopup, MenuEntry, Point, Rgba};

use crate::config::Config;
use crate::config::monitor::ConfigMonitor;
use crate::font::MenuFont;
use crate::gpu::{GpuState, RenderTarget};
use crate::window::PopupWindow;

/// Host window size in logical pixels.
const HOST_WIDTH: f64 = 640.0;
const HOST_HEIGHT: f64 = 400.0;

/// Host window fill color.
const HOST_BACKGROUND: Rgba = Rgba::new(0.118, 0.118, 0.118, 1.0);

/// Events sent into the winit event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The config file changed on disk.
    ConfigReload,
}

/// The host window and its surface.
struct Host {
    window: Arc<Window>,
    /// `None` without a GPU.
    target: Option<RenderTarget>,
}

pub struct App {
    config: Config,
    config_monitor: Option<ConfigMonitor>,
    scale_factor: f64,
    host: Option<Host>,
    gpu: Option<Rc<GpuState>>,
    popup: Option<ContextMenuPopup<PopupWindow>>,
    /// Last pointer position over the host window, in window pixels.
    host_cursor: PhysicalPosition<f64>,
    /// Last pointer position over the popup window, in popup pixels.
    popup_cursor: Point,
}

impl App {
    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        std::panic::set_hook(Box::new(|info| {
            let path = crate::logging::exe_dir().join("ori_menu_panic.log");
            let _ = std::fs::write(path, format!("{info}"));
        }));

        let startup = Instant::now();
        log::info!("starting ori_menu {}", env!("CARGO_PKG_VERSION"));

        let config = Config::load();
        log::info!(
            "config: font size={}, family={:?}, {} items",
            config.font.effective_size(),
            config.font.family,
            config.items.len(),
        );

        let event_loop = EventLoop::<MenuEvent>::with_user_event().build()?;
        let config_monitor = ConfigMonitor::new(event_loop.create_proxy());

        log::debug!(
            "pre-event-loop total: {:.1}ms",
            startup.elapsed().as_secs_f64() * 1000.0
        );

        let mut app = Self {
            config,
            config_monitor,
            scale_factor: 1.0,
            host: None,
            gpu: None,
            popup: None,
            host_cursor: PhysicalPosition::new(0.0, 0.0),
            popup_cursor: Point::default(),
        };
        event_loop.run_app(&mut app)?;

        // Popup first: dropping it hides and destroys its window.
        app.popup = None;
        if let Some(monitor) = app.config_monitor.take() {
            monitor.shutdown();
        }
        log::info!("exiting");
        Ok(())
    }

    /// Create the host window, the GPU, and the popup.
    fn create_windows(&mut self, event_loop: &ActiveEventLoop) -> Result<(), winit::error::OsError> {
        let attrs = Window::default_attributes()
            .with_title("ori_menu: right-click for a menu")
            .with_inner_size(winit::dpi::LogicalSize::new(HOST_WIDTH, HOST_HEIGHT));
        let window = Arc::new(event_loop.create_window(attrs)?);
        self.scale_factor = window.scale_factor();

        let t0 = Instant::now();
        let target = match GpuState::new(&window) {
            Some((gpu, target)) => {
                self.gpu = Some(Rc::new(gpu));
                Some(target)
            }
            None => {
                log::error!("gpu: initialization failed, nothing will be drawn");
                None
            }
        };
        log::debug!("gpu init: {:.1}ms", t0.elapsed().as_secs_f64() * 1000.0);

        let font = MenuFont::load(self.config.font.family.as_deref());
        let surface = PopupWindow::new(event_loop, self.gpu.clone(), font)?;
        let style = self.config.style(self.scale_factor);
        let mut popup = ContextMenuPopup::with_style(surface, true, style);
        fill_menu(&mut popup, self.config.entries());
        popup.set_item_callback(|id, title| {
            log::info!("menu: selected {id:?} ({title})");
            println!("{id}");
        });
        popup.set_dismissed_callback(|| log::debug!("menu: dismissed"));

        window.request_redraw();
        self.host = Some(Host { window, target });
        self.popup = Some(popup);
        Ok(())
    }

    /// Re-read the config file and apply it to the popup.
    fn apply_config_reload(&mut self) {
        let new_config = match Config::try_load() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("config reload: {e}");
                return;
            }
        };
        let Some(popup) = self.popup.as_mut() else {
            self.config = new_config;
            return;
        };

        if new_config.font.family != self.config.font.family {
            let font = MenuFont::load(new_config.font.family.as_deref());
            popup.surface_mut().set_font(font);
        }

        // Items first so the style change lays out the new entries.
        popup.hide();
        popup.clear();
        fill_menu(popup, new_config.entries());
        popup.set_style(new_config.style(self.scale_factor));

        log::info!(
            "config reload: font size={}, {} items",
            new_config.font.effective_size(),
            new_config.items.len(),
        );
        self.config = new_config;
    }

    /// Screen position of the host pointer, falling back to the window
    /// origin where the platform hides window positions.
    fn host_cursor_on_screen(&self) -> (i32, i32) {
        let origin = self
            .host
            .as_ref()
            .and_then(|h| h.window.inner_position().ok())
            .unwrap_or_default();
        (
            origin.x + self.host_cursor.x.round() as i32,
            origin.y + self.host_cursor.y.round() as i32,
        )
    }

    fn resize_host(&mut self, size: PhysicalSize<u32>) {
        let (Some(host), Some(gpu)) = (self.host.as_mut(), self.gpu.as_ref()) else {
            return;
        };
        if let Some(target) = host.target.as_mut() {
            target.resize(gpu, size.width, size.height);
        }
        host.window.request_redraw();
    }
}

/// Append `entries` to the popup, in order.
fn fill_menu(popup: &mut ContextMenuPopup<PopupWindow>, entries: Vec<MenuEntry>) {
    for entry in entries {
        match entry {
            MenuEntry::Item(item) => popup.add_item(item.id, item.title, item.enabled),
            MenuEntry::Separator => popup.add_separator(),
        }
    }
}
