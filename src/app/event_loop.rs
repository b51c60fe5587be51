//! winit event loop: `ApplicationHandler` impl and event routing.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use ori_menu_core::{Point, PointerButton, PopupEvent};

use crate::gpu::clear_target;

use super::{App, HOST_BACKGROUND, MenuEvent};

/// Map a winit mouse button to the popup's button model.
fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(8),
        MouseButton::Forward => PointerButton::Other(9),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

fn is_escape(key: &Key) -> bool {
    matches!(key, Key::Named(NamedKey::Escape))
}

impl ApplicationHandler<MenuEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }
        if let Err(e) = self.create_windows(event_loop) {
            log::error!("failed to create windows: {e}");
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: MenuEvent) {
        match event {
            MenuEvent::ConfigReload => self.apply_config_reload(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let popup_id = self.popup.as_ref().and_then(|p| p.surface().id());
        if popup_id == Some(window_id) {
            self.popup_window_event(event);
        } else if self.host.as_ref().is_some_and(|h| h.window.id() == window_id) {
            self.host_window_event(event_loop, event);
        } else {
            // Late event for a destroyed popup window.
        }
    }
}

impl App {
    fn host_window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("host window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize_host(size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor changed to {scale_factor:.2}");
                self.scale_factor = scale_factor;
                if let Some(popup) = self.popup.as_mut() {
                    popup.set_style(self.config.style(scale_factor));
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.host_cursor = position,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let anchor = self.host_cursor_on_screen();
                let Some(popup) = self.popup.as_mut() else {
                    return;
                };
                if popup.surface().is_listening_to_parent() {
                    popup.handle_event(PopupEvent::ParentButtonPress);
                }
                if button == MouseButton::Right {
                    popup.show(anchor.0, anchor.1);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && is_escape(&event.logical_key) {
                    if let Some(popup) = self.popup.as_mut() {
                        popup.hide();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(host), Some(gpu)) = (self.host.as_ref(), self.gpu.as_ref()) {
                    if let Some(target) = host.target.as_ref() {
                        clear_target(gpu, target, HOST_BACKGROUND);
                    }
                }
            }
            _ => {}
        }
    }

    fn popup_window_event(&mut self, event: WindowEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let popup_event = match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.popup_cursor = Point::new(position.x as i32, position.y as i32);
                PopupEvent::Motion {
                    local: self.popup_cursor,
                }
            }
            WindowEvent::CursorLeft { .. } => PopupEvent::Leave,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let local = self.popup_cursor;
                let origin = popup
                    .surface()
                    .inner_position()
                    .unwrap_or_else(|| popup.position());
                PopupEvent::ButtonPress {
                    button: pointer_button(button),
                    local,
                    root: Point::new(origin.0 + local.x, origin.1 + local.y),
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } => PopupEvent::ButtonRelease {
                button: pointer_button(button),
                local: self.popup_cursor,
            },
            WindowEvent::Focused(false) if popup.is_visible() => PopupEvent::FocusOut,
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && is_escape(&event.logical_key) {
                    popup.hide();
                }
                return;
            }
            WindowEvent::Destroyed => PopupEvent::Destroyed,
            WindowEvent::RedrawRequested => {
                let commands = popup.draw();
                popup.surface_mut().render(&commands);
                return;
            }
            _ => return,
        };
        popup.handle_event(popup_event);
    }
}
