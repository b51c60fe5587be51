//! ori_menu: a GPU-drawn context menu popup over winit.
//!
//! The toolkit-independent widget lives in `ori_menu_core`; this crate
//! supplies the native window, font, renderer, and a demo host.

pub mod app;
pub mod config;
pub mod font;
pub mod gpu;
pub mod logging;
pub mod window;
