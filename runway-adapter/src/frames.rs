use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use runway::{FrameRequester, FrameTicket};

#[derive(Debug, Default)]
struct QueueState {
    queued: VecDeque<FrameTicket>,
    requested: u64,
    cancelled: u64,
}

/// A [`FrameRequester`] for hosts without a frame clock: requested tickets are queued until
/// the host drains them with [`FrameQueue::take`] on its next tick.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    state: Rc<RefCell<QueueState>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the queued tickets, oldest first.
    pub fn take(&self) -> Vec<FrameTicket> {
        self.state.borrow_mut().queued.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().queued.is_empty()
    }

    /// Total number of frames ever requested.
    pub fn requested(&self) -> u64 {
        self.state.borrow().requested
    }

    /// Total number of frames cancelled while still queued.
    pub fn cancelled(&self) -> u64 {
        self.state.borrow().cancelled
    }
}

impl FrameRequester for FrameQueue {
    fn request_frame(&mut self, ticket: FrameTicket) {
        let mut s = self.state.borrow_mut();
        s.queued.push_back(ticket);
        s.requested += 1;
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        let mut s = self.state.borrow_mut();
        let before = s.queued.len();
        s.queued.retain(|t| *t != ticket);
        if s.queued.len() != before {
            s.cancelled += 1;
        }
    }
}
