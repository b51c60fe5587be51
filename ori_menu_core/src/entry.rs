//! Menu entries: actionable items and separators.

/// An actionable row in a popup menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Opaque identifier handed back to the selection callback.
    pub id: String,
    /// Display text.
    pub title: String,
    /// Disabled items are drawn dimmed and never hovered or selected.
    pub enabled: bool,
}

/// A single row of a popup menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// A clickable text row.
    Item(MenuItem),
    /// A thin divider line.
    Separator,
}

impl MenuEntry {
    /// Build an item entry.
    pub fn item(id: impl Into<String>, title: impl Into<String>, enabled: bool) -> Self {
        Self::Item(MenuItem {
            id: id.into(),
            title: title.into(),
            enabled,
        })
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    /// The item payload, or `None` for separators.
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Separator => None,
        }
    }

    /// Whether this row can be hovered, pressed and selected.
    pub fn is_selectable(&self) -> bool {
        self.as_item().is_some_and(|item| item.enabled)
    }
}
