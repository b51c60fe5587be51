//! Screen placement: pick the monitor under the anchor and flip the popup
//! so it stays on that monitor.

use crate::style::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment: `[x, right) × [y, bottom)`.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// The virtual screen assumed when the display reports no monitors.
pub const DEFAULT_WORK_AREA: ScreenRect =
    ScreenRect::new(0, 0, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);

/// Monitor layout reported by the windowing system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Geometry of each monitor, in the order the system lists them.
    pub monitors: Vec<ScreenRect>,
    /// Index of the primary monitor in `monitors`, when known.
    pub primary: Option<usize>,
}

impl DisplayInfo {
    /// Monitor containing the point, else the primary monitor, else the
    /// first monitor. `None` only when there are no monitors at all.
    pub fn monitor_for_point(&self, x: i32, y: i32) -> Option<ScreenRect> {
        self.monitors
            .iter()
            .find(|m| m.contains(x, y))
            .or_else(|| self.primary.and_then(|i| self.monitors.get(i)))
            .or_else(|| self.monitors.first())
            .copied()
    }
}

/// Bounds the popup must fit in when anchored at `(x, y)`.
pub fn choose_work_area(display: Option<&DisplayInfo>, x: i32, y: i32) -> ScreenRect {
    display
        .and_then(|d| d.monitor_for_point(x, y))
        .unwrap_or(DEFAULT_WORK_AREA)
}

/// Top-left corner for a `width × height` popup anchored at `(x, y)`.
///
/// The popup opens down and to the right of the anchor. It flips to the left
/// of the anchor when it would cross the right edge of `area`, and above the
/// anchor when it would cross the bottom edge. It is then pulled back inside
/// `area`, so a popup no larger than the area always ends up within it, even
/// for anchors off the area. The result never starts left of or above the
/// area origin.
pub fn place(x: i32, y: i32, width: i32, height: i32, area: &ScreenRect) -> (i32, i32) {
    let mut x = x;
    let mut y = y;
    if x.saturating_add(width) > area.right() {
        x = x.saturating_sub(width);
    }
    if y.saturating_add(height) > area.bottom() {
        y = y.saturating_sub(height);
    }
    x = x.min(area.right().saturating_sub(width));
    y = y.min(area.bottom().saturating_sub(height));
    (x.max(area.x), y.max(area.y))
}

#[cfg(test)]
mod tests;
