// Example: driving the engine by hand with a fixed viewport and an immediate frame clock.
use std::cell::Cell;
use std::rc::Rc;

use runway::{
    Frame, FrameRequester, FrameTicket, Item, Rectangle, ScrollListener, Subscription, Viewport,
    Virtualizer, VirtualizerOptions,
};

struct FixedViewport {
    top: Rc<Cell<f64>>,
}

impl Viewport for FixedViewport {
    fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.top.get(), 600.0)
    }

    fn listen_to_scroll(&mut self, _listener: ScrollListener) -> Subscription {
        Subscription::empty()
    }

    fn scroll_by(&mut self, delta: f64) {
        self.top.set(self.top.get() + delta);
    }
}

struct NoClock;

impl FrameRequester for NoClock {
    fn request_frame(&mut self, _ticket: FrameTicket) {}
}

fn estimate_row(text: &String) -> f64 {
    if text.len() > 8 { 48.0 } else { 32.0 }
}

fn report(frame: &Frame<u64, String>) {
    println!("commit: {} items, runway={}", frame.len(), frame.runway_height);
}

fn main() {
    let list: Vec<Item<u64, String>> = (0..100_000u64)
        .map(|i| Item::new(i, format!("row {i}")))
        .collect();
    let options = VirtualizerOptions::new(estimate_row).with_on_commit(Some(report));

    let top = Rc::new(Cell::new(0.0));
    let viewport = FixedViewport { top: Rc::clone(&top) };
    let mut v = Virtualizer::new(list, options, Box::new(viewport), Box::new(NoClock));
    v.attach();
    v.flush(&|_: &u64| -> Option<f64> { None });

    // Rows render taller than estimated.
    v.on_repaint();
    v.flush(&|_: &u64| Some(40.0));

    for (item, offset, slot) in v.frame().iter().take(5) {
        println!("{:>6} @ {offset:>5} slot {}", item.key, slot.get());
    }
}
