use std::sync::Arc;

/// Identifies one outstanding frame request. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameTicket(u64);

impl FrameTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The host's "call me on the next frame" primitive.
///
/// The host must report the frame later by handing `ticket` back (for the orchestrator:
/// `Virtualizer::on_frame`). It must not report it synchronously from inside
/// `request_frame`.
pub trait FrameRequester {
    fn request_frame(&mut self, ticket: FrameTicket);

    /// Best-effort: a cancelled ticket that is reported anyway is ignored.
    fn cancel_frame(&mut self, _ticket: FrameTicket) {}
}

/// Mints frame tickets. Wraps back to 1 instead of overflowing.
#[derive(Clone, Debug)]
pub struct TicketGenerator {
    next: u64,
}

impl Default for TicketGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl TicketGenerator {
    /// Starts minting at `next` (`0` counts as `1`).
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    pub fn next_ticket(&mut self) -> FrameTicket {
        if self.next == u64::MAX {
            self.next = 1;
        }
        let ticket = FrameTicket(self.next);
        self.next += 1;
        ticket
    }
}

/// Merges a newly submitted argument into the pending one. Must be associative.
pub type MergeFn<A> = Arc<dyn Fn(A, A) -> A + Send + Sync>;

#[derive(Clone, Debug)]
struct Pending<A> {
    ticket: FrameTicket,
    arg: A,
}

/// Coalesces any number of submissions per frame into one.
///
/// At most one frame request is outstanding. Submissions made while it is pending are merged
/// into its argument (left to right); when the frame fires, the merged argument is handed out
/// exactly once.
pub struct Scheduler<A> {
    requester: Box<dyn FrameRequester>,
    merge: MergeFn<A>,
    pending: Option<Pending<A>>,
    tickets: TicketGenerator,
}

impl<A> Scheduler<A> {
    pub fn new(
        requester: Box<dyn FrameRequester>,
        merge: impl Fn(A, A) -> A + Send + Sync + 'static,
    ) -> Self {
        Self {
            requester,
            merge: Arc::new(merge),
            pending: None,
            tickets: TicketGenerator::default(),
        }
    }

    /// Submits `arg`. Returns the ticket of the (possibly pre-existing) pending request.
    pub fn schedule(&mut self, arg: A) -> FrameTicket {
        match self.pending.take() {
            Some(Pending { ticket, arg: prev }) => {
                let arg = (self.merge)(prev, arg);
                self.pending = Some(Pending { ticket, arg });
                ticket
            }
            None => {
                let ticket = self.tickets.next_ticket();
                self.pending = Some(Pending { ticket, arg });
                self.requester.request_frame(ticket);
                ticket
            }
        }
    }

    /// Takes the merged argument if `ticket` is the pending request.
    ///
    /// Stale, cancelled or unknown tickets return `None` and leave the pending request alone.
    pub fn fire(&mut self, ticket: FrameTicket) -> Option<A> {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            return self.pending.take().map(|p| p.arg);
        }
        vtrace!(ticket = ticket.get(), "Scheduler::fire: ignoring stale ticket");
        None
    }

    /// Drops the pending request. Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(p) => {
                self.requester.cancel_frame(p.ticket);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<FrameTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }
}

impl<A: core::fmt::Debug> core::fmt::Debug for Scheduler<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending)
            .field("tickets", &self.tickets)
            .finish_non_exhaustive()
    }
}
