//! Page behaviors
//!
//! The interactive layer of the site as a headless state machine: a
//! [`Document`] model, a [`Host`] for timers and observation, and a
//! [`PresentationController`] that initializes the behavior catalogue and
//! routes events to it. Behaviors run to completion one event at a time.

pub mod behavior;
pub mod behaviors;
pub mod controller;
pub mod document;
pub mod event;
pub mod host;

pub use behavior::{Behavior, Context};
pub use controller::PresentationController;
pub use document::{Document, Element, ElementId};
pub use event::{Event, EventOutcome, ObservedEntry, ESCAPE};
pub use host::{
    FrameId, HeadlessHost, Host, ObserveOptions, ObserverId, ScrollBehavior, ScrollBlock,
    ScrollRequest, Tick, TimerId, VirtualClock, FRAME_INTERVAL_MS,
};
