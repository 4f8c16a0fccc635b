//! A headless virtualization engine for long lists of items with unknown heights.
//!
//! For host-side helpers (an in-memory scroll surface, a frame queue, a controller), see the
//! `runway-adapter` crate.
//!
//! Given an ordered list of keyed items, the engine decides which items fall within the
//! viewport, computes their vertical offsets, and keeps that picture stable while items are
//! measured, inserted, removed or scrolled past, without ever measuring the whole list:
//!
//! - heights start as estimates and are replaced by measurements of rendered items only
//! - positions are recomputed outward from a pivot item that is currently on screen, so
//!   corrections to off-screen estimates never move what the user is looking at
//! - coordinate drift caused by pivot anchoring is normalized and compensated with a scroll
//! - update requests are coalesced into at most one pass per frame
//! - rendered keys are mapped to recyclable view slots
//!
//! It is UI-agnostic. A host is expected to provide a [`Viewport`], a [`FrameRequester`] and a
//! [`HeightMeasurer`], and to repaint when a [`Frame`] is committed.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod denormalize;
mod key;
mod layout;
mod options;
mod pivot;
mod rect;
mod relax;
mod rendition;
mod scheduler;
mod slots;
mod state;
mod types;
mod viewport;
mod virtualizer;


pub use denormalize::{is_denormalization_visible, is_top_denormalized, normalize_top};
pub use key::ItemKey;
pub use layout::Layout;
pub use options::{HeightEstimator, OnCommitCallback, OnPassCallback, VirtualizerOptions};
pub use pivot::{PositioningGrade, find_pivot_index, order_by_salience};
pub use rect::Rectangle;
pub use relax::relax_layout;
pub use rendition::{
    calculate_rendition, calculate_rendition_retaining, is_equal_rendition, prune_missing,
    relayout_rendition, runway_height,
};
pub use scheduler::{FrameRequester, FrameTicket, MergeFn, Scheduler, TicketGenerator};
pub use slots::{Slot, SlotRecycler};
pub use state::PassReport;
pub use types::{Frame, Item, RenderableItem, Rendition, UpdateRequest};
pub use viewport::{HeightMeasurer, ScrollListener, Subscription, Viewport};
pub use virtualizer::Virtualizer;
