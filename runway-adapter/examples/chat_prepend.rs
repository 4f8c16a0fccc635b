// Example: a chat log that loads older messages above the viewport while the reader stays put.
use runway::{Item, VirtualizerOptions};
use runway_adapter::{Controller, ScrollSurface};

fn page(start: u32, len: u32) -> Vec<Item<u32, String>> {
    (start..start + len)
        .map(|id| Item::new(id, format!("message #{id}")))
        .collect()
}

fn main() {
    let surface = ScrollSurface::new(600.0).with_header_height(40.0);
    let mut c = Controller::new(page(1000, 200), VirtualizerOptions::uniform(56.0), surface);
    c.mount();

    let measure = |id: &u32| Some(if id % 3 == 0 { 80.0 } else { 56.0 });
    c.settle(0, &measure, 16);

    c.scroll_to(300.0, 16);
    c.settle(16, &measure, 16);
    let before = c.virtualizer().frame().rendition[0].clone();
    let on_screen = before.offset - c.surface().scroll_top();
    println!("top message: {} at {on_screen}", before.item.key);

    // Older history arrives.
    let mut list = page(900, 100);
    list.extend(page(1000, 200));
    c.set_list(list);
    c.settle(32, &measure, 16);

    // After the quiescence interval the coordinates are normalized and compensated.
    c.tick(32 + 1500, &measure);
    c.settle(32 + 1500, &measure, 16);

    let frame = c.virtualizer().frame();
    if let Some(after) = frame.rendition.iter().find(|r| r.item.key == before.item.key) {
        println!(
            "top message: {} at {} (scroll_top={})",
            after.item.key,
            after.offset - c.surface().scroll_top(),
            c.surface().scroll_top()
        );
    }
}
