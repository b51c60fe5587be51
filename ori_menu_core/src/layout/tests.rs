use super::{MenuLayout, RowKind, visible_entries};
use crate::entry::MenuEntry;
use crate::style::{
    MENU_HORIZONTAL_PADDING, MENU_ITEM_HEIGHT, MENU_ITEM_TEXT_SIZE, MENU_MAX_WIDTH,
    MENU_MIN_WIDTH, MENU_SEPARATOR_HEIGHT, MENU_VERTICAL_PADDING, MenuMetrics,
};
use crate::text::FixedAdvance;

fn item(id: &str) -> MenuEntry {
    MenuEntry::item(id, id, true)
}

fn layout(entries: &[MenuEntry]) -> MenuLayout {
    MenuLayout::compute(
        entries,
        &MenuMetrics::default(),
        MENU_ITEM_TEXT_SIZE,
        &mut FixedAdvance::default(),
    )
}

/// Every item/separator sequence of the given length.
fn all_sequences(len: usize) -> impl Iterator<Item = Vec<MenuEntry>> {
    (0u32..1 << len).map(move |bits| {
        (0..len)
            .map(|i| {
                if bits & (1 << i) == 0 {
                    MenuEntry::item(format!("i{i}"), format!("Item {i}"), i % 3 != 2)
                } else {
                    MenuEntry::Separator
                }
            })
            .collect()
    })
}

#[test]
fn empty_menu_has_min_width_and_padding_height() {
    let l = layout(&[]);
    assert_eq!(l.width, MENU_MIN_WIDTH);
    assert_eq!(l.height, MENU_VERTICAL_PADDING * 2);
    assert!(l.rows().is_empty());
}

#[test]
fn separator_before_disabled_item_is_kept() {
    // Disabled items still count as items, so this separator is interior.
    let entries = [
        MenuEntry::item("copy", "Copy", true),
        MenuEntry::Separator,
        MenuEntry::item("paste", "Paste", false),
    ];
    let l = layout(&entries);
    assert_eq!(l.rows().len(), 3);
    assert_eq!(l.rows()[1].kind, RowKind::Separator);
    assert_eq!(
        l.height,
        2 * MENU_VERTICAL_PADDING + 2 * MENU_ITEM_HEIGHT + MENU_SEPARATOR_HEIGHT
    );
}

#[test]
fn trailing_separator_is_elided() {
    let entries = [
        MenuEntry::item("copy", "Copy", true),
        MenuEntry::item("paste", "Paste", false),
        MenuEntry::Separator,
    ];
    let l = layout(&entries);
    assert_eq!(l.rows().len(), 2);
    assert_eq!(l.height, 2 * MENU_VERTICAL_PADDING + 2 * MENU_ITEM_HEIGHT);
    assert_eq!(l.rows()[1].top, MENU_VERTICAL_PADDING + MENU_ITEM_HEIGHT);
}

#[test]
fn separator_with_single_item_is_elided() {
    let entries = [
        MenuEntry::item("copy", "Copy", true),
        MenuEntry::Separator,
        MenuEntry::Separator,
    ];
    let l = layout(&entries);
    assert_eq!(l.rows().len(), 1);
    assert_eq!(l.height, 2 * MENU_VERTICAL_PADDING + MENU_ITEM_HEIGHT);
}

#[test]
fn leading_separator_is_elided() {
    let entries = [MenuEntry::Separator, MenuEntry::item("x", "X", true)];
    let l = layout(&entries);
    assert_eq!(l.height, 2 * MENU_VERTICAL_PADDING + MENU_ITEM_HEIGHT);
    assert_eq!(l.rows()[0].index, 1);
    assert_eq!(l.rows()[0].top, MENU_VERTICAL_PADDING);
}

#[test]
fn consecutive_separators_collapse_to_one() {
    let entries = [
        item("a"),
        MenuEntry::Separator,
        MenuEntry::Separator,
        MenuEntry::Separator,
        item("b"),
    ];
    assert_eq!(visible_entries(&entries), vec![0, 1, 4]);

    let l = layout(&entries);
    assert_eq!(
        l.height,
        2 * MENU_VERTICAL_PADDING + 2 * MENU_ITEM_HEIGHT + MENU_SEPARATOR_HEIGHT
    );
    assert_eq!(l.rows()[1].kind, RowKind::Separator);
    assert_eq!(
        l.rows()[2].top,
        MENU_VERTICAL_PADDING + MENU_ITEM_HEIGHT + MENU_SEPARATOR_HEIGHT
    );
}

#[test]
fn width_is_clamped_between_min_and_max() {
    let short = layout(&[item("a")]);
    assert_eq!(short.width, MENU_MIN_WIDTH);

    let long_title = "W".repeat(200);
    let long = layout(&[MenuEntry::item("w", long_title, true)]);
    assert_eq!(long.width, MENU_MAX_WIDTH);
}

#[test]
fn width_tracks_longest_title_plus_padding() {
    // 30 columns * 0.5em * 13px = 195px of text.
    let title = "a".repeat(30);
    let l = layout(&[item("x"), MenuEntry::item("y", title, true)]);
    assert_eq!(l.width, 195 + MENU_HORIZONTAL_PADDING * 4);
}

#[test]
fn separator_titles_do_not_affect_width() {
    let with_sep = layout(&[item("a"), MenuEntry::Separator, item("b")]);
    let without = layout(&[item("a"), item("b")]);
    assert_eq!(with_sep.width, without.width);
}

#[test]
fn row_at_respects_horizontal_bounds() {
    let l = layout(&[item("a"), item("b")]);
    let y = MENU_VERTICAL_PADDING + 1;
    assert!(l.row_at(-1, y).is_none());
    assert!(l.row_at(l.width, y).is_none());
    assert_eq!(l.row_at(0, y).map(|r| r.index), Some(0));
    assert_eq!(l.row_at(l.width - 1, y).map(|r| r.index), Some(0));
}

#[test]
fn row_at_misses_padding() {
    let l = layout(&[item("a"), item("b")]);
    assert!(l.row_at(10, 0).is_none());
    assert!(l.row_at(10, l.height - 1).is_none());
}

#[test]
fn row_at_uses_collapsed_geometry() {
    // The leading separator is elided, so the first item starts right after
    // the top padding.
    let entries = [MenuEntry::Separator, item("a"), item("b")];
    let l = layout(&entries);
    let first = MENU_VERTICAL_PADDING;
    let second = MENU_VERTICAL_PADDING + MENU_ITEM_HEIGHT;
    assert_eq!(l.row_at(10, first).map(|r| r.index), Some(1));
    assert_eq!(l.row_at(10, second).map(|r| r.index), Some(2));
    assert!(l.row_for_entry(0).is_none());
}

#[test]
fn collapsed_rows_never_lead_trail_or_repeat_separators() {
    for len in 0..=9 {
        for entries in all_sequences(len) {
            let item_count = entries.iter().filter(|e| !e.is_separator()).count();
            let l = layout(&entries);
            let kinds: Vec<RowKind> = l.rows().iter().map(|r| r.kind).collect();

            assert_ne!(kinds.first(), Some(&RowKind::Separator), "{entries:?}");
            assert_ne!(kinds.last(), Some(&RowKind::Separator), "{entries:?}");
            assert!(
                !kinds
                    .windows(2)
                    .any(|w| w[0] == RowKind::Separator && w[1] == RowKind::Separator),
                "{entries:?}"
            );
            if item_count <= 1 {
                assert!(!kinds.contains(&RowKind::Separator), "{entries:?}");
            }
            // Every item is shown exactly once.
            assert_eq!(
                kinds.iter().filter(|k| **k == RowKind::Item).count(),
                item_count
            );
        }
    }
}

#[test]
fn rows_tile_the_popup_without_gaps() {
    for entries in all_sequences(7) {
        let l = layout(&entries);
        let mut expected_top = MENU_VERTICAL_PADDING;
        for row in l.rows() {
            assert_eq!(row.top, expected_top);
            expected_top = row.bottom();
        }
        assert_eq!(l.height, expected_top + MENU_VERTICAL_PADDING);
    }
}

#[test]
fn scaled_metrics_scale_height() {
    let entries = [item("a"), MenuEntry::Separator, item("b")];
    let l = MenuLayout::compute(
        &entries,
        &MenuMetrics::scaled(2.0),
        MENU_ITEM_TEXT_SIZE * 2.0,
        &mut FixedAdvance::default(),
    );
    assert_eq!(
        l.height,
        2 * (2 * MENU_VERTICAL_PADDING + 2 * MENU_ITEM_HEIGHT + MENU_SEPARATOR_HEIGHT)
    );
}
