//! Host-side helpers for the `runway` crate.
//!
//! `runway` only talks to its host through traits. This crate provides small, framework-neutral
//! implementations of them, useful for headless hosts, tests and simulations:
//!
//! - [`ScrollSurface`]: an in-memory scroll container implementing `runway::Viewport`
//! - [`FrameQueue`]: a `runway::FrameRequester` that queues frame tickets
//! - [`Controller`]: a host loop driving one virtualizer over both
//!
//! No UI framework bindings are included; hosts wire these to their own event loop.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod frames;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use frames::FrameQueue;
pub use surface::{ScrollSurface, SurfaceSnapshot};
