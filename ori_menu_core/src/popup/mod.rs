//! The context menu popup: entries, layout, placement and the event-driven
//! show/hide state machine.
//!
//! `ContextMenuPopup` owns a [`PopupSurface`] and drives it. The host
//! toolkit feeds input through [`ContextMenuPopup::handle_event`] and asks
//! for pixels through [`ContextMenuPopup::draw`] when it redraws.

use crate::entry::MenuEntry;
use crate::event::{EventResponse, PointerButton, PopupEvent};
use crate::layout::MenuLayout;
use crate::paint::{DrawCommand, build_draw_list};
use crate::placement::{ScreenRect, choose_work_area, place};
use crate::style::MenuStyle;
use crate::surface::{ListenerId, PopupSurface};

/// Called with the `(id, title)` of the selected item.
pub type ItemCallback = Box<dyn FnMut(&str, &str)>;

/// Called once each time a visible popup hides.
pub type DismissedCallback = Box<dyn FnMut()>;

/// A floating menu bound to one native popup surface.
///
/// Entries persist across show/hide cycles until [`clear`](Self::clear).
/// Each [`show`](Self::show) starts a fresh session: layout and position are
/// recomputed and hover/press state starts empty.
pub struct ContextMenuPopup<S: PopupSurface> {
    surface: S,
    has_parent: bool,
    style: MenuStyle,
    entries: Vec<MenuEntry>,
    layout: MenuLayout,
    /// Screen position of the top-left corner from the last `show`.
    position: (i32, i32),
    hovered: Option<usize>,
    pressed: Option<usize>,
    visible: bool,
    parent_listener: Option<ListenerId>,
    item_callback: Option<ItemCallback>,
    dismissed_callback: Option<DismissedCallback>,
}

impl<S: PopupSurface> ContextMenuPopup<S> {
    /// Create a hidden, empty popup. `has_parent` enables dismissal on
    /// presses in the owning window.
    pub fn new(surface: S, has_parent: bool) -> Self {
        Self::with_style(surface, has_parent, MenuStyle::default())
    }

    pub fn with_style(surface: S, has_parent: bool, style: MenuStyle) -> Self {
        Self {
            surface,
            has_parent,
            layout: MenuLayout::empty(&style.metrics),
            style,
            entries: Vec::new(),
            position: (0, 0),
            hovered: None,
            pressed: None,
            visible: false,
            parent_listener: None,
            item_callback: None,
            dismissed_callback: None,
        }
    }

    // ── Entries ────────────────────────────────────────────────────────

    /// Append an actionable row. Takes effect on the next layout pass.
    pub fn add_item(&mut self, id: impl Into<String>, title: impl Into<String>, enabled: bool) {
        self.entries.push(MenuEntry::item(id, title, enabled));
    }

    pub fn add_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
    }

    /// Remove every entry and forget hover/press state. Visibility is
    /// unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hovered = None;
        self.pressed = None;
    }

    // ── Callbacks ──────────────────────────────────────────────────────

    /// Replace the selection observer.
    pub fn set_item_callback(&mut self, cb: impl FnMut(&str, &str) + 'static) {
        self.item_callback = Some(Box::new(cb));
    }

    /// Replace the dismissal observer.
    pub fn set_dismissed_callback(&mut self, cb: impl FnMut() + 'static) {
        self.dismissed_callback = Some(Box::new(cb));
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Open the popup with its top-left corner near screen point `(x, y)`.
    ///
    /// Does nothing when there are no entries. The popup flips to stay on
    /// the monitor under the anchor.
    pub fn show(&mut self, x: i32, y: i32) {
        if self.entries.is_empty() {
            log::debug!("popup: show ignored, no entries");
            return;
        }

        self.update_size();
        self.hovered = None;
        self.pressed = None;

        let display = self.surface.display_info();
        if display.as_ref().is_none_or(|d| d.monitors.is_empty()) {
            log::debug!("popup: no monitor information, using default work area");
        }
        let area = choose_work_area(display.as_ref(), x, y);
        let (w, h) = (self.layout.width, self.layout.height);
        let (px, py) = place(x, y, w, h, &area);
        self.position = (px, py);

        self.surface.set_geometry(ScreenRect::new(px, py, w, h));
        self.surface.show();
        self.visible = true;

        if self.has_parent && self.parent_listener.is_none() {
            self.parent_listener = self.surface.install_parent_listener();
        }

        log::debug!(
            "popup: shown at ({px}, {py}) size {w}x{h} for anchor ({x}, {y}), {} entries",
            self.entries.len()
        );
    }

    /// Close the popup and notify the dismissal observer. No-op when hidden.
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.hovered = None;
        self.pressed = None;

        if let Some(id) = self.parent_listener.take() {
            self.surface.remove_parent_listener(id);
        }
        self.surface.hide();
        log::debug!("popup: hidden");

        if let Some(cb) = self.dismissed_callback.as_mut() {
            cb();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // ── Geometry ───────────────────────────────────────────────────────

    /// Recompute width, height and the visible rows from the current
    /// entries.
    pub fn update_size(&mut self) {
        self.layout = MenuLayout::compute(
            &self.entries,
            &self.style.metrics,
            self.style.font_size,
            &mut self.surface,
        );
    }

    /// Entry index of the selectable item under a popup-local point.
    ///
    /// Separators, disabled items, padding and points outside the popup
    /// width report `None`.
    pub fn item_at(&self, x: i32, y: i32) -> Option<usize> {
        let row = self.layout.row_at(x, y)?;
        self.entries
            .get(row.index)
            .filter(|e| e.is_selectable())
            .map(|_| row.index)
    }

    /// Whether a screen point lies on the popup as last shown.
    fn contains_screen_point(&self, x: i32, y: i32) -> bool {
        let (px, py) = self.position;
        ScreenRect::new(px, py, self.layout.width, self.layout.height).contains(x, y)
    }

    // ── Drawing ────────────────────────────────────────────────────────

    /// Ask the surface to schedule a redraw.
    pub fn paint(&mut self) {
        self.surface.request_redraw();
    }

    /// Draw list for the current state, for the surface's redraw handler.
    pub fn draw(&mut self) -> Vec<DrawCommand> {
        build_draw_list(
            &self.entries,
            &self.layout,
            self.hovered,
            &self.style,
            &mut self.surface,
        )
    }

    // ── Events ─────────────────────────────────────────────────────────

    /// Feed one toolkit event through the state machine.
    pub fn handle_event(&mut self, event: PopupEvent) -> EventResponse {
        match event {
            PopupEvent::ButtonPress {
                button,
                local,
                root,
            } => {
                if !self.contains_screen_point(root.x, root.y) {
                    self.hide();
                    return EventResponse::Propagate;
                }
                match button {
                    PointerButton::Primary => self.pressed = self.item_at(local.x, local.y),
                    PointerButton::Secondary => self.hide(),
                    PointerButton::Middle | PointerButton::Other(_) => {}
                }
                EventResponse::Consumed
            }
            PopupEvent::ButtonRelease { button, local } => {
                let pressed = self.pressed.take();
                match button {
                    PointerButton::Primary => {
                        let released = self.item_at(local.x, local.y);
                        if let Some(index) = released.filter(|_| released == pressed) {
                            self.select(index);
                        }
                    }
                    PointerButton::Secondary => self.hide(),
                    PointerButton::Middle | PointerButton::Other(_) => {}
                }
                EventResponse::Consumed
            }
            PopupEvent::Motion { local } => {
                let hovered = self.item_at(local.x, local.y);
                if hovered != self.hovered {
                    self.hovered = hovered;
                    self.paint();
                }
                EventResponse::Consumed
            }
            PopupEvent::Leave => {
                if self.hovered.take().is_some() {
                    self.paint();
                }
                EventResponse::Consumed
            }
            PopupEvent::ParentButtonPress | PopupEvent::FocusOut => {
                self.hide();
                EventResponse::Propagate
            }
            PopupEvent::Destroyed => {
                self.visible = false;
                EventResponse::Propagate
            }
        }
    }

    /// Report entry `index` to the selection observer, then close.
    fn select(&mut self, index: usize) {
        if let Some(MenuEntry::Item(item)) = self.entries.get(index) {
            log::info!("popup: selected '{}' ({})", item.title, item.id);
            if let Some(cb) = self.item_callback.as_mut() {
                cb(&item.id, &item.title);
            }
        }
        self.hide();
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn width(&self) -> i32 {
        self.layout.width
    }

    pub fn height(&self) -> i32 {
        self.layout.height
    }

    /// Screen position of the top-left corner from the last `show`.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    /// Replace the style. A visible popup is re-laid out in place and
    /// repainted; its position is kept.
    pub fn set_style(&mut self, style: MenuStyle) {
        self.style = style;
        self.update_size();
        if self.visible {
            let (x, y) = self.position;
            self.surface.set_geometry(ScreenRect::new(
                x,
                y,
                self.layout.width,
                self.layout.height,
            ));
            self.paint();
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: PopupSurface> Drop for ContextMenuPopup<S> {
    fn drop(&mut self) {
        self.hide();
        // A surface destroyed while visible skips `hide`, leaving the
        // listener behind.
        if let Some(id) = self.parent_listener.take() {
            self.surface.remove_parent_listener(id);
        }
        self.surface.destroy();
    }
}
