use super::{DEFAULT_WORK_AREA, DisplayInfo, ScreenRect, choose_work_area, place};

const MONITOR: ScreenRect = ScreenRect::new(0, 0, 800, 600);

fn dual_monitors() -> DisplayInfo {
    DisplayInfo {
        monitors: vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(1920, 0, 1280, 1024),
        ],
        primary: Some(0),
    }
}

#[test]
fn no_flip_when_popup_fits() {
    assert_eq!(place(10, 10, 150, 100, &MONITOR), (10, 10));
}

#[test]
fn flips_both_axes_near_bottom_right() {
    assert_eq!(place(790, 590, 150, 100, &MONITOR), (640, 490));
}

#[test]
fn flips_only_horizontally_near_right_edge() {
    assert_eq!(place(700, 100, 150, 100, &MONITOR), (550, 100));
}

#[test]
fn flips_only_vertically_near_bottom_edge() {
    assert_eq!(place(100, 550, 150, 100, &MONITOR), (100, 450));
}

#[test]
fn exact_fit_does_not_flip() {
    assert_eq!(place(650, 500, 150, 100, &MONITOR), (650, 500));
}

#[test]
fn flip_to_fit_at_last_pixel() {
    let (w, h) = (180, 120);
    let x = MONITOR.width - 1;
    let y = MONITOR.height - 1;
    assert_eq!(place(x, y, w, h, &MONITOR), (x - w, y - h));
}

#[test]
fn flipped_popup_is_clamped_to_origin() {
    // Anchor near the left edge, popup wider than the space on either side.
    let narrow = ScreenRect::new(0, 0, 200, 200);
    assert_eq!(place(50, 50, 180, 180, &narrow), (0, 0));
}

#[test]
fn clamps_to_monitor_with_nonzero_origin() {
    let second = ScreenRect::new(1920, 0, 1280, 1024);
    let (x, y) = place(1925, 1000, 150, 100, &second);
    assert_eq!((x, y), (1925, 900));
    let (x, _) = place(1930, 10, 1275, 100, &second);
    assert_eq!(x, 1920);
}

#[test]
fn placement_stays_inside_monitor() {
    let monitors = [
        ScreenRect::new(0, 0, 800, 600),
        ScreenRect::new(-1280, 100, 1280, 720),
        ScreenRect::new(1920, -200, 1080, 1920),
    ];
    let sizes = [(150, 100), (400, 300), (800, 600), (1, 1)];
    for area in &monitors {
        for &(w, h) in &sizes {
            if w > area.width || h > area.height {
                continue;
            }
            // Anchors on the area and a margin around it on every side.
            let xs = (area.x - 2 * area.width)..(area.right() + 2 * area.width);
            for ax in xs.step_by(37) {
                let ys = (area.y - 2 * area.height)..(area.bottom() + 2 * area.height);
                for ay in ys.step_by(41) {
                    let (x, y) = place(ax, ay, w, h, area);
                    let rect = ScreenRect::new(x, y, w, h);
                    assert!(
                        area.contains_rect(&rect),
                        "anchor ({ax}, {ay}) size {w}x{h} placed at {rect:?} outside {area:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn anchor_off_monitor_is_pulled_onto_fallback() {
    let display = DisplayInfo {
        monitors: vec![MONITOR],
        primary: Some(0),
    };
    let area = choose_work_area(Some(&display), 2000, 10);
    assert_eq!(area, MONITOR);
    assert_eq!(place(2000, 10, 150, 100, &area), (650, 10));
    assert_eq!(place(-500, -500, 150, 100, &area), (0, 0));
}

#[test]
fn far_anchor_on_default_screen_stays_on_screen() {
    let area = choose_work_area(None, 5000, 5000);
    let (x, y) = place(5000, 5000, 150, 100, &area);
    assert_eq!((x, y), (1920 - 150, 1080 - 100));
}

#[test]
fn extreme_anchors_do_not_overflow() {
    assert_eq!(
        place(i32::MAX, i32::MAX, 150, 100, &MONITOR),
        (800 - 150, 600 - 100)
    );
    assert_eq!(place(i32::MIN, i32::MIN, 150, 100, &MONITOR), (0, 0));
    assert_eq!(place(i32::MAX - 10, 20, 150, 100, &DEFAULT_WORK_AREA).1, 20);
}

#[test]
fn monitor_containing_point_wins() {
    let display = dual_monitors();
    assert_eq!(
        display.monitor_for_point(2000, 500),
        Some(ScreenRect::new(1920, 0, 1280, 1024))
    );
    assert_eq!(
        display.monitor_for_point(100, 100),
        Some(ScreenRect::new(0, 0, 1920, 1080))
    );
}

#[test]
fn point_off_every_monitor_falls_back_to_primary() {
    let mut display = dual_monitors();
    display.primary = Some(1);
    assert_eq!(
        display.monitor_for_point(-50, -50),
        Some(ScreenRect::new(1920, 0, 1280, 1024))
    );
}

#[test]
fn missing_primary_falls_back_to_first() {
    let mut display = dual_monitors();
    display.primary = None;
    assert_eq!(
        display.monitor_for_point(-50, -50),
        Some(ScreenRect::new(0, 0, 1920, 1080))
    );
    // A stale primary index also falls through to the first monitor.
    display.primary = Some(7);
    assert_eq!(
        display.monitor_for_point(-50, -50),
        Some(ScreenRect::new(0, 0, 1920, 1080))
    );
}

#[test]
fn no_display_uses_default_virtual_screen() {
    assert_eq!(choose_work_area(None, 10, 10), DEFAULT_WORK_AREA);
    assert_eq!(
        choose_work_area(Some(&DisplayInfo::default()), 10, 10),
        ScreenRect::new(0, 0, 1920, 1080)
    );
}

#[test]
fn rect_containment_is_half_open() {
    assert!(MONITOR.contains(0, 0));
    assert!(MONITOR.contains(799, 599));
    assert!(!MONITOR.contains(800, 0));
    assert!(!MONITOR.contains(0, 600));
}
