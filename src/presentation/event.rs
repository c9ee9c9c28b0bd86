//! Events delivered to page behaviors

use super::document::ElementId;
use super::host::{FrameId, ObserverId, TimerId};

/// Escape key name as reported by keyboard events
pub const ESCAPE: &str = "Escape";

/// An intersection change routed to one observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedEntry {
    pub observer: ObserverId,
    pub target: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Everything that can happen to a loaded page
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(ElementId),
    Scroll { offset: f64 },
    KeyDown(String),
    Resize { width: u32 },
    VisibilityChange { hidden: bool },
    Input(ElementId),
    Submit(ElementId),
    /// Raw visibility of an element; the controller fans it out to observers
    Intersection { target: ElementId, ratio: f64 },
    Observed(ObservedEntry),
    Timer(TimerId),
    AnimationFrame(FrameId),
}

/// Whether the host's default action for an event should still run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    #[default]
    Proceed,
    PreventDefault,
}

impl EventOutcome {
    pub const fn is_prevented(self) -> bool {
        matches!(self, Self::PreventDefault)
    }

    /// Combine two outcomes; any prevention wins
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        if self.is_prevented() || other.is_prevented() {
            Self::PreventDefault
        } else {
            Self::Proceed
        }
    }
}
