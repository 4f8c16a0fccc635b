use runway::{Frame, HeightMeasurer, Item, ItemKey, Virtualizer, VirtualizerOptions};

use crate::{FrameQueue, ScrollSurface};

/// A framework-neutral host loop around one `runway::Virtualizer`, backed by a
/// [`ScrollSurface`] and a [`FrameQueue`].
///
/// Holds no UI objects. A host drives it by calling:
/// - `mount` once, `set_list` on data changes, `unmount` on teardown
/// - `scroll_to` when the user scrolls
/// - `tick(now_ms, measurer)` each frame, repainting whatever frame it returns
///
/// Committed frames update the surface's content height, and a height sync is requested after
/// each of them, as a real host would do after painting.
#[derive(Debug)]
pub struct Controller<K, T> {
    v: Virtualizer<K, T>,
    surface: ScrollSurface,
    frames: FrameQueue,
    commits: u64,
}

impl<K: ItemKey, T: Clone + PartialEq> Controller<K, T> {
    pub fn new(
        list: Vec<Item<K, T>>,
        options: VirtualizerOptions<K, T>,
        surface: ScrollSurface,
    ) -> Self {
        let frames = FrameQueue::new();
        let v = Virtualizer::new(
            list,
            options,
            Box::new(surface.clone()),
            Box::new(frames.clone()),
        );
        Self {
            v,
            surface,
            frames,
            commits: 0,
        }
    }

    pub fn virtualizer(&self) -> &Virtualizer<K, T> {
        &self.v
    }

    pub fn virtualizer_mut(&mut self) -> &mut Virtualizer<K, T> {
        &mut self.v
    }

    pub fn surface(&self) -> &ScrollSurface {
        &self.surface
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    /// Number of frames committed so far.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Attaches the virtualizer. Returns `false` if already mounted or unmounted.
    pub fn mount(&mut self) -> bool {
        self.v.attach()
    }

    pub fn set_list(&mut self, list: Vec<Item<K, T>>) {
        self.v.set_list(list);
    }

    /// Applies a user scroll. Returns the applied (clamped) offset.
    pub fn scroll_to(&mut self, offset: f64, now_ms: u64) -> f64 {
        let applied = self.surface.scroll_to(offset);
        self.v.pump(now_ms);
        applied
    }

    /// Advances one frame.
    ///
    /// Pumps scroll notifications and timers, fires the queued frames and returns the frame to
    /// repaint, if one was committed.
    pub fn tick<M>(&mut self, now_ms: u64, measurer: &M) -> Option<Frame<K, T>>
    where
        M: HeightMeasurer<K> + ?Sized,
    {
        self.v.pump(now_ms);

        let mut committed = None;
        for ticket in self.frames.take() {
            if let Some(frame) = self.v.on_frame(ticket, measurer) {
                committed = Some(frame.clone());
            }
        }

        if let Some(frame) = &committed {
            self.commits += 1;
            self.surface.set_content_height(frame.runway_height);
            self.v.on_repaint();
            vtrace!(
                now_ms,
                rendered = frame.len(),
                runway = frame.runway_height,
                "Controller::tick: committed"
            );
        }

        // Scroll corrections issued during the pass notify the surface listeners.
        self.v.pump(now_ms);
        committed
    }

    /// Ticks at `now_ms` until no frame is pending, at most `max_ticks` times.
    ///
    /// Returns the number of ticks run.
    pub fn settle<M>(&mut self, now_ms: u64, measurer: &M, max_ticks: usize) -> usize
    where
        M: HeightMeasurer<K> + ?Sized,
    {
        let mut ticks = 0usize;
        while ticks < max_ticks && self.v.has_pending_frame() {
            self.tick(now_ms, measurer);
            ticks += 1;
        }
        if self.v.has_pending_frame() {
            vdebug!(max_ticks, "Controller::settle: still pending");
        }
        ticks
    }

    /// Disposes the virtualizer: unsubscribes from the surface and drops queued frames.
    pub fn unmount(&mut self) {
        self.v.dispose();
    }
}
