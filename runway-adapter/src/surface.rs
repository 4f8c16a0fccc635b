use std::cell::RefCell;
use std::rc::{Rc, Weak};

use runway::{Rectangle, ScrollListener, Subscription, Viewport};

#[derive(Debug, Default)]
struct SurfaceState {
    viewport_height: f64,
    scroll_top: f64,
    header_height: Option<f64>,
    content_height: f64,
    listeners: Vec<(u64, ScrollListener)>,
    next_listener: u64,
}

impl SurfaceState {
    fn max_scroll(&self) -> f64 {
        (self.header_height.unwrap_or(0.0) + self.content_height - self.viewport_height).max(0.0)
    }

    /// Moves to `top` and returns the listeners to notify, if the position changed.
    fn move_to(&mut self, top: f64) -> Option<Vec<ScrollListener>> {
        if top == self.scroll_top || !top.is_finite() {
            return None;
        }
        self.scroll_top = top;
        Some(self.listeners.iter().map(|(_, l)| l.clone()).collect())
    }
}

/// A point-in-time view of a [`ScrollSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSnapshot {
    pub viewport_height: f64,
    pub scroll_top: f64,
    pub header_height: Option<f64>,
    pub content_height: f64,
    pub max_scroll: f64,
}

/// An in-memory scroll container: a viewport of fixed height over a header followed by the
/// list's runway.
///
/// Handles are cheap clones sharing one state, so a host can keep one while the engine owns
/// another (`Box<dyn Viewport>`). Not thread-safe.
///
/// User scrolls ([`ScrollSurface::scroll_to`], [`ScrollSurface::scroll_by_user`]) are clamped
/// to `[0, max_scroll]`. Scroll requests from the engine ([`Viewport::scroll_by`]) arrive
/// before the host repaints the new runway, so they are only clamped at `0`; the upper bound
/// is re-applied by the next [`ScrollSurface::set_content_height`].
#[derive(Clone, Debug, Default)]
pub struct ScrollSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl ScrollSurface {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState {
                viewport_height: viewport_height.max(0.0),
                header_height: Some(0.0),
                ..SurfaceState::default()
            })),
        }
    }

    /// Places the list below a header of the given height.
    pub fn with_header_height(self, header_height: f64) -> Self {
        self.set_header_height(Some(header_height));
        self
    }

    /// `None` means the list is not laid out yet; the engine skips its passes until it is.
    pub fn set_header_height(&self, header_height: Option<f64>) {
        self.state.borrow_mut().header_height = header_height.map(|h| h.max(0.0));
    }

    pub fn header_height(&self) -> Option<f64> {
        self.state.borrow().header_height
    }

    pub fn viewport_height(&self) -> f64 {
        self.state.borrow().viewport_height
    }

    pub fn set_viewport_height(&self, viewport_height: f64) {
        self.state.borrow_mut().viewport_height = viewport_height.max(0.0);
        self.reclamp();
    }

    pub fn scroll_top(&self) -> f64 {
        self.state.borrow().scroll_top
    }

    /// Height of the list's runway (excluding the header).
    pub fn content_height(&self) -> f64 {
        self.state.borrow().content_height
    }

    /// Updates the runway height, as a repaint would, and clamps the scroll position to it.
    pub fn set_content_height(&self, content_height: f64) {
        self.state.borrow_mut().content_height = content_height.max(0.0);
        self.reclamp();
    }

    pub fn max_scroll(&self) -> f64 {
        self.state.borrow().max_scroll()
    }

    /// Scrolls to `top`, clamped. Returns the applied position.
    pub fn scroll_to(&self, top: f64) -> f64 {
        let clamped = top.clamp(0.0, self.max_scroll());
        self.move_and_notify(clamped);
        self.scroll_top()
    }

    /// Scrolls by `delta`, clamped. Returns the applied position.
    pub fn scroll_by_user(&self, delta: f64) -> f64 {
        self.scroll_to(self.scroll_top() + delta)
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let s = self.state.borrow();
        SurfaceSnapshot {
            viewport_height: s.viewport_height,
            scroll_top: s.scroll_top,
            header_height: s.header_height,
            content_height: s.content_height,
            max_scroll: s.max_scroll(),
        }
    }

    fn reclamp(&self) {
        let (top, max) = {
            let s = self.state.borrow();
            (s.scroll_top, s.max_scroll())
        };
        if top > max {
            vtrace!(top, max, "ScrollSurface: clamping scroll position");
            self.move_and_notify(max);
        }
    }

    fn move_and_notify(&self, top: f64) {
        // Release the borrow before notifying.
        let listeners = self.state.borrow_mut().move_to(top);
        for l in listeners.into_iter().flatten() {
            l.notify();
        }
    }
}

impl Viewport for ScrollSurface {
    fn rectangle(&self) -> Rectangle {
        let s = self.state.borrow();
        Rectangle::new(s.scroll_top, s.viewport_height)
    }

    fn list_origin(&self) -> Option<f64> {
        self.header_height()
    }

    fn listen_to_scroll(&mut self, listener: ScrollListener) -> Subscription {
        let id = {
            let mut s = self.state.borrow_mut();
            let id = s.next_listener;
            s.next_listener += 1;
            s.listeners.push((id, listener));
            id
        };
        let state: Weak<RefCell<SurfaceState>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().listeners.retain(|(l, _)| *l != id);
            }
        })
    }

    fn scroll_by(&mut self, delta: f64) {
        let top = (self.scroll_top() + delta).max(0.0);
        vdebug!(delta, top, "ScrollSurface::scroll_by");
        self.move_and_notify(top);
    }
}
