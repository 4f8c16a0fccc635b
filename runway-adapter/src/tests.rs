use crate::*;

use runway::{FrameRequester, Item, ScrollListener, TicketGenerator, Viewport, VirtualizerOptions};

fn items(prefix: &str, n: usize) -> Vec<Item<String, u32>> {
    (0..n)
        .map(|i| Item::new(format!("{prefix}{i}"), i as u32))
        .collect()
}

fn keys(prefix: &str, start: usize, end: usize) -> Vec<String> {
    (start..end).map(|i| format!("{prefix}{i}")).collect()
}

fn rendered(c: &Controller<String, u32>) -> Vec<String> {
    c.virtualizer()
        .frame()
        .rendition
        .iter()
        .map(|r| r.item.key.clone())
        .collect()
}

fn uniform(_: &String) -> Option<f64> {
    Some(100.0)
}

fn mounted(list: Vec<Item<String, u32>>, surface: ScrollSurface) -> Controller<String, u32> {
    let mut c = Controller::new(list, VirtualizerOptions::uniform(100.0), surface);
    assert!(c.mount());
    c
}

#[test]
fn surface_clamps_user_scrolls_and_notifies_on_change() {
    let s = ScrollSurface::new(300.0);
    s.set_content_height(1000.0);
    assert_eq!(s.max_scroll(), 700.0);

    let mut engine = s.clone();
    let listener = ScrollListener::new();
    let sub = engine.listen_to_scroll(listener.clone());
    assert_eq!(s.listener_count(), 1);

    assert_eq!(s.scroll_to(900.0), 700.0);
    assert!(listener.is_pending());
    assert_eq!(s.scroll_to(-5.0), 0.0);
    assert_eq!(s.scroll_by_user(50.0), 50.0);
    assert_eq!(engine.rectangle(), runway::Rectangle::new(50.0, 300.0));

    // Engine corrections run ahead of the repaint: only the next content update clamps them.
    engine.scroll_by(1000.0);
    assert_eq!(s.scroll_top(), 1050.0);
    s.set_content_height(1000.0);
    assert_eq!(s.scroll_top(), 700.0);
    engine.scroll_by(-5000.0);
    assert_eq!(s.scroll_top(), 0.0);

    drop(sub);
    assert_eq!(s.listener_count(), 0);
}

#[test]
fn surface_header_is_the_list_origin() {
    let s = ScrollSurface::new(500.0).with_header_height(120.0);
    assert_eq!(s.list_origin(), Some(120.0));
    s.set_content_height(1000.0);
    assert_eq!(
        s.snapshot(),
        SurfaceSnapshot {
            viewport_height: 500.0,
            scroll_top: 0.0,
            header_height: Some(120.0),
            content_height: 1000.0,
            max_scroll: 620.0,
        }
    );

    s.set_header_height(None);
    assert_eq!(s.list_origin(), None);

    s.scroll_to(600.0);
    s.set_viewport_height(900.0);
    assert_eq!(s.scroll_top(), 100.0);
}

#[test]
fn frame_queue_drains_in_order_and_drops_cancelled() {
    let mut q = FrameQueue::new();
    let mut tickets = TicketGenerator::default();
    let a = tickets.next_ticket();
    let b = tickets.next_ticket();
    let c = tickets.next_ticket();
    q.request_frame(a);
    q.request_frame(b);
    q.request_frame(c);
    q.cancel_frame(b);
    q.cancel_frame(b);

    assert_eq!(q.len(), 2);
    assert_eq!(q.take(), vec![a, c]);
    assert!(q.is_empty());
    assert_eq!(q.requested(), 3);
    assert_eq!(q.cancelled(), 1);
}

#[test]
fn controller_mount_renders_first_window() {
    let mut c = mounted(items("k", 1000), ScrollSurface::new(800.0));
    assert_eq!(c.settle(0, &uniform, 10), 2);
    assert_eq!(rendered(&c), keys("k", 0, 8));
    assert_eq!(c.surface().content_height(), 100_000.0);
    assert_eq!(c.commits(), 1);
    assert!(c.frames().is_empty());
}

#[test]
fn controller_converges_on_measured_heights() {
    let mut c = mounted(items("k", 1000), ScrollSurface::new(800.0));
    let half = |_: &String| Some(50.0);
    assert_eq!(c.settle(0, &half, 10), 3);
    assert_eq!(c.commits(), 2);

    let v = c.virtualizer();
    let k1 = v.layout().rectangle(&"k1".to_string());
    assert_eq!(k1.map(|r| r.top), Some(50.0));
    assert_eq!(v.runway_height(), 8.0 * 50.0 + 992.0 * 100.0);
    assert_eq!(c.surface().content_height(), v.runway_height());
}

#[test]
fn controller_follows_user_scroll() {
    let mut c = mounted(items("k", 1000), ScrollSurface::new(800.0));
    c.settle(0, &uniform, 10);

    assert_eq!(c.scroll_to(4000.0, 10), 4000.0);
    let frame = c.tick(10, &uniform).unwrap();
    assert_eq!(frame.rendition[0].item.key, "k40");
    assert_eq!(rendered(&c), keys("k", 40, 48));

    // Past the end: clamped to the last window.
    let applied = c.scroll_to(1e9, 20);
    assert_eq!(applied, 100_000.0 - 800.0);
    c.settle(20, &uniform, 10);
    assert_eq!(rendered(&c), keys("k", 992, 1000));
}

#[test]
fn controller_prepend_keeps_viewport_steady() {
    let mut c = mounted(items("k", 100), ScrollSurface::new(800.0));
    c.settle(0, &uniform, 10);
    c.scroll_to(4000.0, 10);
    c.settle(10, &uniform, 10);
    assert_eq!(rendered(&c), keys("k", 40, 48));

    let mut next = items("p", 20);
    next.extend(items("k", 100));
    c.set_list(next);
    assert_eq!(c.settle(20, &uniform, 10), 1);

    // No visible change, no scroll correction.
    assert_eq!(rendered(&c), keys("k", 40, 48));
    assert_eq!(c.surface().scroll_top(), 4000.0);
    assert_eq!(c.virtualizer().frame().rendition[0].offset, 4000.0);

    // Once scrolling has been idle long enough, coordinates are normalized.
    let frame = c.tick(1510, &uniform).unwrap();
    assert_eq!(frame.rendition[0].item.key, "k40");
    assert_eq!(frame.rendition[0].offset, 6000.0);
    assert_eq!(frame.runway_height, 12_000.0);
    assert_eq!(c.surface().scroll_top(), 6000.0);
    assert_eq!(frame.rendition[0].offset - c.surface().scroll_top(), 0.0);

    c.settle(1510, &uniform, 10);
    assert_eq!(rendered(&c), keys("k", 40, 48));
}

#[test]
fn controller_waits_for_list_origin() {
    let surface = ScrollSurface::new(800.0);
    surface.set_header_height(None);
    let mut c = mounted(items("k", 50), surface);
    assert_eq!(c.settle(0, &uniform, 10), 1);
    assert!(c.virtualizer().frame().is_empty());

    c.surface().set_header_height(Some(200.0));
    c.set_list(items("k", 50));
    c.settle(0, &uniform, 10);
    assert_eq!(rendered(&c), keys("k", 0, 6));
}

#[test]
fn controller_recovers_from_missing_origin_on_scroll() {
    let surface = ScrollSurface::new(800.0);
    surface.set_header_height(None);
    let mut c = mounted(items("k", 50), surface);
    c.settle(0, &uniform, 10);
    assert!(rendered(&c).is_empty());

    // The list gets laid out; the next event is a user scroll, not a list update.
    c.surface().set_header_height(Some(0.0));
    c.surface().set_content_height(5000.0);
    assert_eq!(c.scroll_to(100.0, 10), 100.0);
    c.settle(10, &uniform, 10);
    assert_eq!(rendered(&c), keys("k", 1, 9));
    assert_eq!(c.virtualizer().layout().len(), 50);
    assert_eq!(c.surface().content_height(), 5000.0);
}

#[test]
fn controller_unmount_stops_everything() {
    let mut c = mounted(items("k", 50), ScrollSurface::new(800.0));
    assert_eq!(c.frames().len(), 1);
    assert_eq!(c.surface().listener_count(), 1);

    c.unmount();
    assert!(c.frames().is_empty());
    assert_eq!(c.frames().cancelled(), 1);
    assert_eq!(c.surface().listener_count(), 0);

    c.surface().scroll_to(100.0);
    assert!(c.tick(10, &uniform).is_none());
    assert_eq!(c.settle(10, &uniform, 10), 0);
    assert!(!c.mount());
    c.unmount();
}
