//! Input events delivered to a popup by its host toolkit.

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mouse button that produced a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    Middle,
    /// The context (usually right) button.
    Secondary,
    Other(u16),
}

/// Everything the popup reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// A button went down on the popup surface. `local` is relative to the
    /// popup's top-left corner, `root` is in screen coordinates.
    ButtonPress {
        button: PointerButton,
        local: Point,
        root: Point,
    },
    ButtonRelease {
        button: PointerButton,
        local: Point,
    },
    /// The pointer moved over the popup surface.
    Motion { local: Point },
    /// The pointer left the popup surface.
    Leave,
    /// A button went down on the parent window while the listener
    /// installed by `show` is active.
    ParentButtonPress,
    /// The popup surface lost keyboard focus.
    FocusOut,
    /// The toolkit tore the popup surface down.
    Destroyed,
}

/// What the host should do with the event after the popup handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Stop here.
    Consumed,
    /// Let the event continue to whatever it landed on.
    Propagate,
}
