//! Menu layout: popup size and the list of rows that are actually shown.
//!
//! Separators are collapsed here, once per layout pass. Painting and
//! hit-testing both walk [`MenuLayout::rows`], so the rows a user sees and
//! the rows a click resolves to always agree pixel for pixel.

use crate::entry::MenuEntry;
use crate::style::MenuMetrics;
use crate::text::TextMeasure;

/// What a laid-out row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Item,
    Separator,
}

/// A visible row with its vertical extent in popup-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRow {
    /// Index into the entry list this row was produced from.
    pub index: usize,
    pub kind: RowKind,
    /// Top edge, measured from the top of the popup.
    pub top: i32,
    pub height: i32,
}

impl LayoutRow {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Computed popup dimensions plus the collapsed row list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub width: i32,
    pub height: i32,
    rows: Vec<LayoutRow>,
}

impl MenuLayout {
    /// Layout of a menu with no entries.
    pub fn empty(metrics: &MenuMetrics) -> Self {
        Self {
            width: metrics.min_width,
            height: metrics.vertical_padding * 2,
            rows: Vec::new(),
        }
    }

    /// Measure titles and stack the visible rows.
    pub fn compute<M: TextMeasure + ?Sized>(
        entries: &[MenuEntry],
        metrics: &MenuMetrics,
        font_size: f32,
        measure: &mut M,
    ) -> Self {
        if entries.is_empty() {
            return Self::empty(metrics);
        }

        let max_text_width = entries
            .iter()
            .filter_map(MenuEntry::as_item)
            .map(|item| measure.text_width(&item.title, font_size) as i32)
            .max()
            .unwrap_or(0);

        let width = metrics
            .min_width
            .max(metrics.max_width.min(max_text_width + metrics.horizontal_padding * 4));

        let mut top = metrics.vertical_padding;
        let rows: Vec<LayoutRow> = visible_entries(entries)
            .into_iter()
            .map(|index| {
                let (kind, height) = if entries[index].is_separator() {
                    (RowKind::Separator, metrics.separator_height)
                } else {
                    (RowKind::Item, metrics.item_height)
                };
                let row = LayoutRow {
                    index,
                    kind,
                    top,
                    height,
                };
                top += height;
                row
            })
            .collect();

        Self {
            width,
            height: top + metrics.vertical_padding,
            rows,
        }
    }

    /// Rows that are drawn, top to bottom.
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// The row under a popup-local point, if any.
    pub fn row_at(&self, x: i32, y: i32) -> Option<&LayoutRow> {
        if x < 0 || x >= self.width {
            return None;
        }
        self.rows.iter().find(|row| row.contains_y(y))
    }

    /// The row produced from entry `index`, if it is visible.
    pub fn row_for_entry(&self, index: usize) -> Option<&LayoutRow> {
        self.rows.iter().find(|row| row.index == index)
    }
}

/// Indices of the entries that get a row, in display order.
///
/// Items always appear. A separator is dropped when the menu has at most one
/// item, when it would lead the menu or follow another shown separator, or
/// when only separators come after it.
pub fn visible_entries(entries: &[MenuEntry]) -> Vec<usize> {
    let item_count = entries.iter().filter(|e| !e.is_separator()).count();
    // Start as if a separator was just shown so leading separators collapse.
    let mut last_was_separator = true;
    let mut visible = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if entry.is_separator() {
            if item_count <= 1 || last_was_separator {
                continue;
            }
            let trailing = entries[i + 1..].iter().all(MenuEntry::is_separator);
            if trailing {
                continue;
            }
            last_was_separator = true;
        } else {
            last_was_separator = false;
        }
        visible.push(i);
    }

    visible
}

#[cfg(test)]
mod tests;
