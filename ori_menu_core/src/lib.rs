//! Core popup menu data structures and logic.
//!
//! This crate provides everything about a context menu popup that can be
//! reasoned about without a display: the entry model, style constants,
//! layout with separator collapsing, hit-testing, multi-monitor placement,
//! the draw list, and the event-driven show/hide state machine. It contains
//! no windowing, GPU, or font-file code; those live behind the
//! [`PopupSurface`] and [`TextMeasure`] traits.

#![deny(unsafe_code)]

pub mod entry;
pub mod event;
pub mod layout;
pub mod paint;
pub mod placement;
pub mod popup;
pub mod style;
pub mod surface;
pub mod text;

pub use entry::{MenuEntry, MenuItem};
pub use event::{EventResponse, Point, PointerButton, PopupEvent};
pub use layout::{LayoutRow, MenuLayout, RowKind};
pub use paint::{DrawCommand, RectF};
pub use placement::{DisplayInfo, ScreenRect};
pub use popup::{ContextMenuPopup, DismissedCallback, ItemCallback};
pub use style::{MenuColors, MenuMetrics, MenuStyle, Rgba};
pub use surface::{ListenerId, PopupSurface};
pub use text::{FixedAdvance, TextMeasure};
