use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::Rectangle;

/// The scrollable surface the list lives in.
///
/// All coordinates are in the viewport's own space; the engine converts to list coordinates
/// with [`Viewport::list_origin`].
pub trait Viewport {
    /// The currently visible rectangle.
    fn rectangle(&self) -> Rectangle;

    /// Where the list's top sits in viewport space, or `None` while the list is not laid out
    /// yet (update passes are skipped until it is).
    fn list_origin(&self) -> Option<f64> {
        Some(0.0)
    }

    /// Registers `listener` to be notified on every scroll. Dropping the returned
    /// [`Subscription`] unregisters it.
    fn listen_to_scroll(&mut self, listener: ScrollListener) -> Subscription;

    /// Best-effort, non-blocking scroll request.
    fn scroll_by(&mut self, delta: f64);
}

/// Reports the real height of a rendered item, or `None` if it is not rendered.
pub trait HeightMeasurer<K> {
    fn measure(&self, key: &K) -> Option<f64>;
}

impl<K, F: Fn(&K) -> Option<f64>> HeightMeasurer<K> for F {
    fn measure(&self, key: &K) -> Option<f64> {
        self(key)
    }
}

#[derive(Debug, Default)]
struct ScrollSignal {
    pending: AtomicBool,
    closed: AtomicBool,
}

/// Handle a viewport calls when it scrolls.
///
/// Notifications only raise a flag; the engine picks it up on its next
/// `Virtualizer::pump`. Once the engine is disposed the handle is closed and notifications are
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct ScrollListener {
    signal: Arc<ScrollSignal>,
}

impl ScrollListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the listener has been closed.
    pub fn notify(&self) -> bool {
        if self.signal.closed.load(Ordering::Acquire) {
            return false;
        }
        self.signal.pending.store(true, Ordering::Release);
        true
    }

    /// Whether a notification is waiting to be picked up by the engine.
    pub fn is_pending(&self) -> bool {
        self.signal.pending.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.signal.closed.load(Ordering::Acquire)
    }

    pub(crate) fn take(&self) -> bool {
        self.signal.pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn close(&self) {
        self.signal.closed.store(true, Ordering::Release);
        self.signal.pending.store(false, Ordering::Release);
    }
}

/// Keeps a scroll registration alive. Unsubscribes exactly once, on [`Subscription::cancel`]
/// or drop.
#[derive(Default)]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to undo.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cancel(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
