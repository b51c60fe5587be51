//! The boundary between a popup and the windowing toolkit that hosts it.

use crate::placement::{DisplayInfo, ScreenRect};
use crate::text::TextMeasure;

/// Handle for a parent-window press listener installed by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A native top-level popup window plus its drawing area.
///
/// All methods are called on the UI thread. `show`, `hide` and
/// `request_redraw` must not deliver events synchronously back into the
/// popup.
pub trait PopupSurface: TextMeasure {
    /// Monitor layout, or `None` when no display is available.
    fn display_info(&self) -> Option<DisplayInfo>;

    /// Resize the drawing area and move the window, in screen pixels.
    fn set_geometry(&mut self, rect: ScreenRect);

    fn show(&mut self);

    fn hide(&mut self);

    /// Schedule a redraw; the toolkit later asks the popup for its draw list.
    fn request_redraw(&mut self);

    /// Start forwarding presses on the parent window as
    /// [`PopupEvent::ParentButtonPress`](crate::PopupEvent::ParentButtonPress).
    /// Returns `None` when there is no parent to listen on.
    fn install_parent_listener(&mut self) -> Option<ListenerId>;

    fn remove_parent_listener(&mut self, id: ListenerId);

    /// Release the native window. Called once, when the popup is dropped.
    fn destroy(&mut self);
}
