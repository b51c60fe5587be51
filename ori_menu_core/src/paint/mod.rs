//! Draw list construction.
//!
//! The popup is drawn immediate-mode: every redraw rebuilds a flat list of
//! vector commands from the layout and the hover state. Renderers translate
//! the list into whatever their backend needs.

use crate::entry::MenuEntry;
use crate::layout::{MenuLayout, RowKind};
use crate::style::MenuStyle;
use crate::text::{TextMeasure, truncate_to_width};

/// A rectangle in popup-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One vector drawing operation, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle with a stroked border.
    RoundedRect {
        rect: RectF,
        radius: f32,
        fill: crate::Rgba,
        border: crate::Rgba,
        border_width: f32,
    },
    FillRect { rect: RectF, color: crate::Rgba },
    /// Straight stroked line centered on the segment.
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: crate::Rgba,
    },
    /// Left-aligned single-line text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        color: crate::Rgba,
    },
}

/// Build the commands that draw the popup.
///
/// `hovered` is an entry index. The highlight is only drawn when that entry
/// is a visible, enabled item.
pub fn build_draw_list<M: TextMeasure + ?Sized>(
    entries: &[MenuEntry],
    layout: &MenuLayout,
    hovered: Option<usize>,
    style: &MenuStyle,
    measure: &mut M,
) -> Vec<DrawCommand> {
    let m = &style.metrics;
    let c = &style.colors;
    let width = layout.width as f32;
    let hpad = m.horizontal_padding as f32;

    let mut cmds = Vec::with_capacity(layout.rows().len() * 2 + 1);
    cmds.push(DrawCommand::RoundedRect {
        rect: RectF::new(0.0, 0.0, width, layout.height as f32),
        radius: style.corner_radius,
        fill: c.background,
        border: c.border,
        border_width: style.line_width,
    });

    let text_room = (width - hpad * 2.0).max(0.0);

    for row in layout.rows() {
        let top = row.top as f32;
        match (row.kind, entries.get(row.index)) {
            (RowKind::Separator, _) => {
                let y = (row.top + m.separator_height / 2) as f32;
                cmds.push(DrawCommand::Line {
                    from: (hpad, y),
                    to: (width - hpad, y),
                    width: style.line_width,
                    color: c.separator,
                });
            }
            (RowKind::Item, Some(MenuEntry::Item(item))) => {
                let is_hovered = hovered == Some(row.index);
                if is_hovered && item.enabled {
                    let inset = m.hover_inset as f32;
                    cmds.push(DrawCommand::FillRect {
                        rect: RectF::new(inset, top, width - inset * 2.0, m.item_height as f32),
                        color: c.hover,
                    });
                }

                let color = if !item.enabled {
                    c.disabled_text
                } else if is_hovered {
                    c.hover_text
                } else {
                    c.text
                };
                let text = truncate_to_width(measure, &item.title, style.font_size, text_room);
                cmds.push(DrawCommand::Text {
                    x: hpad,
                    y: (row.top + m.item_height - m.text_baseline_inset) as f32,
                    text: text.into_owned(),
                    font_size: style.font_size,
                    color,
                });
            }
            (RowKind::Item, _) => {
                log::warn!("paint: row {} is stale, entries changed after layout", row.index);
            }
        }
    }

    cmds
}
