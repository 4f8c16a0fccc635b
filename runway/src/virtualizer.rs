use std::collections::HashSet;

use crate::denormalize::{is_denormalization_visible, is_top_denormalized, normalize_top};
use crate::pivot::{find_pivot_index, order_by_salience};
use crate::relax::relax_layout;
use crate::rendition::{
    calculate_rendition, calculate_rendition_retaining, is_equal_rendition, prune_missing,
    relayout_rendition, runway_height,
};
use crate::{
    Frame, FrameRequester, FrameTicket, HeightMeasurer, Item, ItemKey, Layout, PassReport,
    RenderableItem, Rendition, Scheduler, ScrollListener, SlotRecycler, Subscription,
    UpdateRequest, Viewport, VirtualizerOptions,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Detached,
    Attached,
    Disposed,
}

/// The orchestrator: keeps a rendition of a list in sync with a viewport.
///
/// This type holds no UI objects. The host provides:
/// - a [`Viewport`] (visible rectangle, scroll notifications, scroll requests)
/// - a [`FrameRequester`] (next-frame callbacks, reported back via [`Virtualizer::on_frame`])
/// - a [`HeightMeasurer`] for the items it rendered
///
/// and repaints whenever a [`Frame`] is committed. Work requested between two frames is
/// coalesced, so at most one frame is committed per tick.
///
/// Lifecycle: [`Virtualizer::attach`] once the list is mounted, [`Virtualizer::set_list`] on
/// data changes, [`Virtualizer::pump`] on every event-loop turn, [`Virtualizer::on_repaint`]
/// after painting a committed frame, [`Virtualizer::dispose`] (or drop) on teardown.
pub struct Virtualizer<K, T> {
    options: VirtualizerOptions<K, T>,
    list: Vec<Item<K, T>>,
    layout: Layout<K>,
    rendition: Rendition<K, T>,
    runway_height: f64,
    salience: Vec<K>,
    slots: SlotRecycler<K>,

    frame: Frame<K, T>,
    renderer_revision: u64,

    scheduler: Scheduler<UpdateRequest>,
    /// Work of a pass skipped for lack of a list origin, folded into the next pass.
    deferred: Option<UpdateRequest>,
    viewport: Box<dyn Viewport>,
    listener: ScrollListener,
    subscription: Option<Subscription>,
    last_scroll_ms: Option<u64>,
    phase: Phase,
}

impl<K: ItemKey, T: Clone + PartialEq> Virtualizer<K, T> {
    /// Creates a detached virtualizer. Nothing is laid out until [`Virtualizer::attach`].
    pub fn new(
        list: Vec<Item<K, T>>,
        options: VirtualizerOptions<K, T>,
        viewport: Box<dyn Viewport>,
        frames: Box<dyn FrameRequester>,
    ) -> Self {
        vdebug!(count = list.len(), "Virtualizer::new");
        check_unique_keys(&list);
        Self {
            options,
            list,
            layout: Layout::new(),
            rendition: Vec::new(),
            runway_height: 0.0,
            salience: Vec::new(),
            slots: SlotRecycler::new(),
            frame: Frame::default(),
            renderer_revision: 0,
            scheduler: Scheduler::new(frames, UpdateRequest::merge),
            deferred: None,
            viewport,
            listener: ScrollListener::new(),
            subscription: None,
            last_scroll_ms: None,
            phase: Phase::Detached,
        }
    }

    pub fn options(&self) -> &VirtualizerOptions<K, T> {
        &self.options
    }

    /// Replaces the options and schedules a rendition update.
    pub fn set_options(&mut self, options: VirtualizerOptions<K, T>) {
        self.options = options;
        vtrace!(
            epsilon = self.options.scroll_correction_epsilon,
            quiescence_ms = self.options.quiescence_ms,
            overscan = self.options.overscan,
            "Virtualizer::set_options"
        );
        self.schedule(UpdateRequest::rendition());
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualizerOptions<K, T>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Subscribes to scroll notifications and schedules the initial layout.
    ///
    /// Returns `false` if already attached or disposed.
    pub fn attach(&mut self) -> bool {
        if self.phase != Phase::Detached {
            return false;
        }
        vdebug!(count = self.list.len(), "Virtualizer::attach");
        self.subscription = Some(self.viewport.listen_to_scroll(self.listener.clone()));
        self.phase = Phase::Attached;
        self.schedule(UpdateRequest::layout());
        true
    }

    /// Replaces the list.
    ///
    /// Layout rectangles and slots are keyed by item key, so they carry over to the new list.
    /// Rendered items missing from `list` are dropped right away; everything else is
    /// recomputed on the next frame.
    pub fn set_list(&mut self, list: Vec<Item<K, T>>) {
        if self.phase == Phase::Disposed {
            return;
        }
        vtrace!(prev = self.list.len(), next = list.len(), "Virtualizer::set_list");
        check_unique_keys(&list);
        self.rendition = prune_missing(&self.rendition, &list);
        self.list = list;
        self.schedule(UpdateRequest::layout());
    }

    /// Handles a scroll notification delivered directly by the host.
    ///
    /// Schedules a rendition update and re-arms the quiescence timer.
    pub fn on_scroll(&mut self, now_ms: u64) {
        if self.phase != Phase::Attached {
            return;
        }
        self.last_scroll_ms = Some(now_ms);
        self.schedule(UpdateRequest::rendition());
    }

    /// Drives time-based work. Call once per event-loop turn.
    ///
    /// Picks up scroll notifications raised through the [`ScrollListener`] and fires the
    /// quiescence timer once scrolling has been idle for `quiescence_ms`.
    pub fn pump(&mut self, now_ms: u64) {
        if self.phase != Phase::Attached {
            return;
        }
        if self.listener.take() {
            self.on_scroll(now_ms);
        }
        let Some(last) = self.last_scroll_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.quiescence_ms {
            vtrace!(now_ms, last, "Virtualizer::pump: quiescent");
            self.last_scroll_ms = None;
            self.schedule(UpdateRequest::quiescent());
        }
    }

    /// When the quiescence timer will fire, if armed.
    pub fn quiescence_deadline(&self) -> Option<u64> {
        self.last_scroll_ms
            .map(|last| last.saturating_add(self.options.quiescence_ms))
    }

    /// Call after the host painted a committed frame: schedules a height sync.
    pub fn on_repaint(&mut self) {
        self.schedule(UpdateRequest::sync_heights());
    }

    /// Forces the next pass to commit, e.g. after the item presentation changed.
    pub fn invalidate_renderer(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.renderer_revision = self.renderer_revision.wrapping_add(1);
        self.schedule(UpdateRequest::default());
    }

    /// Runs the update pass for a fired frame.
    ///
    /// Returns the committed frame, or `None` when `ticket` is stale, the virtualizer is not
    /// attached, or nothing visible changed (the host must not repaint then).
    ///
    /// A pass that finds no list origin does nothing, and its work is carried into the next
    /// pass.
    pub fn on_frame<M>(&mut self, ticket: FrameTicket, measurer: &M) -> Option<&Frame<K, T>>
    where
        M: HeightMeasurer<K> + ?Sized,
    {
        if self.phase != Phase::Attached {
            return None;
        }
        let fired = self.scheduler.fire(ticket)?;
        let request = match self.deferred.take() {
            Some(deferred) => deferred.merge(fired),
            None => fired,
        };
        self.update(request, measurer).then_some(&self.frame)
    }

    /// Fires the pending frame right away, if any. Handy for hosts without a frame clock.
    pub fn flush<M>(&mut self, measurer: &M) -> Option<&Frame<K, T>>
    where
        M: HeightMeasurer<K> + ?Sized,
    {
        let ticket = self.scheduler.pending_ticket()?;
        self.on_frame(ticket, measurer)
    }

    /// Exports measured (and estimated) heights by key.
    pub fn export_measurement_cache(&self) -> Vec<(K, f64)> {
        self.layout.export_heights()
    }

    /// Imports heights exported earlier and schedules a relayout.
    pub fn import_measurement_cache(&mut self, entries: impl IntoIterator<Item = (K, f64)>) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.layout.import_heights(entries);
        self.schedule(UpdateRequest::layout());
    }

    pub fn list(&self) -> &[Item<K, T>] {
        &self.list
    }

    pub fn layout(&self) -> &Layout<K> {
        &self.layout
    }

    /// The working rendition (may be ahead of the committed frame).
    pub fn rendition(&self) -> &[RenderableItem<K, T>] {
        &self.rendition
    }

    pub fn runway_height(&self) -> f64 {
        self.runway_height
    }

    /// Rendered keys from the last pass, most salient first.
    pub fn salience(&self) -> &[K] {
        &self.salience
    }

    pub fn slots(&self) -> &SlotRecycler<K> {
        &self.slots
    }

    /// The last committed frame.
    pub fn frame(&self) -> &Frame<K, T> {
        &self.frame
    }

    pub fn renderer_revision(&self) -> u64 {
        self.renderer_revision
    }

    fn update<M>(&mut self, request: UpdateRequest, measurer: &M) -> bool
    where
        M: HeightMeasurer<K> + ?Sized,
    {
        let Some(origin) = self.viewport.list_origin() else {
            vtrace!("Virtualizer::update: list origin unavailable, deferring pass");
            self.deferred = Some(request);
            return false;
        };
        let mut viewport = self.viewport.rectangle().translated_by(-origin);
        let estimate = &*self.options.estimate_height;
        let mut report = PassReport::default();

        if request.sync_heights {
            for r in &self.rendition {
                if let Some(height) = measurer.measure(&r.item.key) {
                    report.heights_changed |= self.layout.update_height(&r.item.key, height);
                }
            }
        }

        if request.relax_layout || report.heights_changed {
            let pivot = find_pivot_index(&self.list, &self.rendition, &self.salience);
            relax_layout(&self.list, pivot, &mut self.layout, estimate);
            report.pivot = Some(pivot);
            report.layout_changed = true;
        }

        if is_denormalization_visible(&viewport, &self.layout, &self.list)
            || (request.quiescent && is_top_denormalized(&self.layout, &self.list))
        {
            let shift = normalize_top(&mut self.layout, &self.list, estimate);
            if shift != 0.0 {
                viewport = viewport.translated_by(shift);
                report.correction = shift;
                report.layout_changed = true;
            }
        }

        if report.layout_changed {
            self.runway_height = runway_height(&self.layout, &self.list);
        }

        if request.update_rendition {
            let window = viewport.expanded_by(self.options.overscan);
            self.rendition = if self.options.retain_departing {
                calculate_rendition_retaining(&self.layout, &self.list, &window, &self.rendition)
            } else {
                calculate_rendition(&self.layout, &self.list, &window)
            };
        } else if report.layout_changed {
            self.rendition = relayout_rendition(&self.rendition, &self.layout);
        }

        self.salience = order_by_salience(&self.rendition, &self.layout, &viewport);

        report.committed = self.commit();
        if report.correction.abs() > self.options.scroll_correction_epsilon {
            vdebug!(shift = report.correction, "Virtualizer: compensating scroll");
            self.viewport.scroll_by(report.correction);
            report.scrolled = true;
        }

        report.rendition_len = self.rendition.len();
        report.runway_height = self.runway_height;
        vtrace!(
            pivot = ?report.pivot,
            heights_changed = report.heights_changed,
            layout_changed = report.layout_changed,
            correction = report.correction,
            rendered = report.rendition_len,
            runway = report.runway_height,
            committed = report.committed,
            "Virtualizer::update"
        );
        if let Some(on_pass) = &self.options.on_pass {
            on_pass(&report);
        }
        report.committed
    }

    /// Publishes the working rendition unless it matches the last committed frame.
    fn commit(&mut self) -> bool {
        let unchanged = self.frame.runway_height == self.runway_height
            && self.frame.renderer_revision == self.renderer_revision
            && is_equal_rendition(&self.frame.rendition, &self.rendition);
        if unchanged {
            return false;
        }
        let slots = self.slots.assign(self.rendition.iter().map(|r| &r.item.key));
        self.frame = Frame {
            rendition: self.rendition.clone(),
            slots,
            runway_height: self.runway_height,
            renderer_revision: self.renderer_revision,
        };
        if let Some(on_commit) = &self.options.on_commit {
            on_commit(&self.frame);
        }
        true
    }
}

impl<K, T> Virtualizer<K, T> {
    /// Unsubscribes from the viewport and cancels pending work. Idempotent.
    ///
    /// Afterwards every entry point is a no-op and frames reported with old tickets are
    /// ignored.
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        vdebug!("Virtualizer::dispose");
        self.phase = Phase::Disposed;
        self.listener.close();
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.scheduler.cancel();
        self.deferred = None;
        self.last_scroll_ms = None;
    }

    pub fn is_attached(&self) -> bool {
        self.phase == Phase::Attached
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn pending_ticket(&self) -> Option<FrameTicket> {
        self.scheduler.pending_ticket()
    }

    /// Requests are accepted only while attached: before attach the initial layout request
    /// covers them, after dispose nothing may run.
    fn schedule(&mut self, request: UpdateRequest) {
        if self.phase != Phase::Attached {
            return;
        }
        self.scheduler.schedule(request);
    }
}

impl<K, T> Drop for Virtualizer<K, T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<K: core::fmt::Debug, T> core::fmt::Debug for Virtualizer<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Virtualizer")
            .field("options", &self.options)
            .field("count", &self.list.len())
            .field("rendered", &self.rendition.len())
            .field("runway_height", &self.runway_height)
            .field("salience", &self.salience)
            .field("renderer_revision", &self.renderer_revision)
            .field("phase", &self.phase)
            .field("scheduler", &self.scheduler)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

fn check_unique_keys<K: ItemKey, T>(list: &[Item<K, T>]) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut seen = HashSet::with_capacity(list.len());
    let duplicates = list.iter().filter(|item| !seen.insert(&item.key)).count();
    if duplicates > 0 {
        vwarn!(duplicates, "Virtualizer: list contains duplicate keys");
    }
    debug_assert!(duplicates == 0, "list contains {duplicates} duplicate key(s)");
}
