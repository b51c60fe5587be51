//! GPU rendering: wgpu state, glyph atlas, pipelines, and the popup renderer.

pub mod atlas;
mod color_util;
mod instance_writer;
pub mod pipeline;
pub mod renderer;
pub mod state;

pub(crate) use color_util::rgba_to_linear;
pub use renderer::{PopupRenderer, clear_target};
pub use state::{GpuState, RenderTarget};
