//! Host capabilities
//!
//! Everything a behavior needs from the environment besides the document:
//! timers, animation frames, intersection observation, scrolling and alerts.
//! [`HeadlessHost`] implements them over a virtual clock so behaviors can be
//! driven deterministically.

use std::collections::{BTreeMap, BTreeSet};

use super::document::ElementId;

/// Nominal animation frame interval in milliseconds
pub const FRAME_INTERVAL_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Intersection observer options
#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction at which an entry counts as intersecting
    pub threshold: f64,
    /// CSS margin applied to the root bounds, e.g. `0px 0px -50px 0px`
    pub root_margin: String,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

impl ObserveOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Whether an element at `ratio` visibility is intersecting
    pub fn is_intersecting(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// A `scrollIntoView` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ElementId,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// Environment capabilities available to behaviors
pub trait Host {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;
    fn set_interval(&mut self, period_ms: u64) -> TimerId;
    fn clear_timer(&mut self, id: TimerId);
    fn request_animation_frame(&mut self) -> FrameId;

    /// Create an intersection observer; `None` when the capability is missing
    fn create_observer(&mut self, options: ObserveOptions) -> Option<ObserverId>;
    fn observe(&mut self, observer: ObserverId, target: ElementId);
    fn unobserve(&mut self, observer: ObserverId, target: ElementId);
    fn disconnect(&mut self, observer: ObserverId);
    /// Observers currently watching `target`, with their options
    fn observers_of(&self, target: ElementId) -> Vec<(ObserverId, ObserveOptions)>;

    fn scroll_into_view(&mut self, request: ScrollRequest);
    fn alert(&mut self, message: &str);
}

/// A scheduled callback becoming due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Timer(TimerId),
    Frame(FrameId),
}

/// Virtual time control, for hosts whose clock is driven externally
pub trait VirtualClock {
    fn now(&self) -> u64;
    /// Pop the earliest callback due at or before `until`, advancing the clock to it
    fn next_due(&mut self, until: u64) -> Option<Tick>;
    /// Move the clock to `until` once nothing else is due
    fn settle(&mut self, until: u64);
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    due: u64,
    period: Option<u64>,
}

#[derive(Debug, Clone)]
struct Observer {
    options: ObserveOptions,
    targets: BTreeSet<ElementId>,
}

/// Host with a virtual clock that records scroll and alert effects
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    now: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, ScheduledTimer>,
    frames: BTreeMap<FrameId, u64>,
    observers: BTreeMap<ObserverId, Observer>,
    observation_supported: bool,
    scrolls: Vec<ScrollRequest>,
    alerts: Vec<String>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    pub const fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            timers: BTreeMap::new(),
            frames: BTreeMap::new(),
            observers: BTreeMap::new(),
            observation_supported: true,
            scrolls: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// A host lacking intersection observation (older browsers)
    #[must_use]
    pub const fn without_observation(mut self) -> Self {
        self.observation_supported = false;
        self
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Timers (one-shot and repeating) still scheduled
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn is_observing(&self, observer: ObserverId, target: ElementId) -> bool {
        self.observers
            .get(&observer)
            .is_some_and(|o| o.targets.contains(&target))
    }

    pub fn observer_options(&self, observer: ObserverId) -> Option<&ObserveOptions> {
        self.observers.get(&observer).map(|o| &o.options)
    }

    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Host for HeadlessHost {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.allocate());
        self.timers.insert(
            id,
            ScheduledTimer {
                due: self.now + delay_ms,
                period: None,
            },
        );
        id
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        let id = TimerId(self.allocate());
        self.timers.insert(
            id,
            ScheduledTimer {
                due: self.now + period,
                period: Some(period),
            },
        );
        id
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let id = FrameId(self.allocate());
        self.frames.insert(id, self.now + FRAME_INTERVAL_MS);
        id
    }

    fn create_observer(&mut self, options: ObserveOptions) -> Option<ObserverId> {
        if !self.observation_supported {
            return None;
        }
        let id = ObserverId(self.allocate());
        self.observers.insert(
            id,
            Observer {
                options,
                targets: BTreeSet::new(),
            },
        );
        Some(id)
    }

    fn observe(&mut self, observer: ObserverId, target: ElementId) {
        if let Some(o) = self.observers.get_mut(&observer) {
            o.targets.insert(target);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, target: ElementId) {
        if let Some(o) = self.observers.get_mut(&observer) {
            o.targets.remove(&target);
        }
    }

    fn disconnect(&mut self, observer: ObserverId) {
        if let Some(o) = self.observers.get_mut(&observer) {
            o.targets.clear();
        }
    }

    fn observers_of(&self, target: ElementId) -> Vec<(ObserverId, ObserveOptions)> {
        self.observers
            .iter()
            .filter(|(_, o)| o.targets.contains(&target))
            .map(|(id, o)| (*id, o.options.clone()))
            .collect()
    }

    fn scroll_into_view(&mut self, request: ScrollRequest) {
        self.scrolls.push(request);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl VirtualClock for HeadlessHost {
    fn now(&self) -> u64 {
        self.now
    }

    fn next_due(&mut self, until: u64) -> Option<Tick> {
        // Ids are allocated from one sequence, so (due, id) orders ties by scheduling order
        let timer = self
            .timers
            .iter()
            .map(|(id, t)| (t.due, id.0, Tick::Timer(*id)))
            .min_by_key(|(due, seq, _)| (*due, *seq));
        let frame = self
            .frames
            .iter()
            .map(|(id, due)| (*due, id.0, Tick::Frame(*id)))
            .min_by_key(|(due, seq, _)| (*due, *seq));

        let (due, _, tick) = match (timer, frame) {
            (Some(t), Some(f)) => {
                if (t.0, t.1) <= (f.0, f.1) {
                    t
                } else {
                    f
                }
            }
            (Some(t), None) => t,
            (None, Some(f)) => f,
            (None, None) => return None,
        };
        if due > until {
            return None;
        }

        self.now = self.now.max(due);
        match tick {
            Tick::Timer(id) => {
                let reschedule = self.timers.get(&id).and_then(|t| t.period);
                match reschedule {
                    Some(period) => {
                        if let Some(t) = self.timers.get_mut(&id) {
                            t.due = due + period;
                        }
                    }
                    None => {
                        self.timers.remove(&id);
                    }
                }
            }
            Tick::Frame(id) => {
                self.frames.remove(&id);
            }
        }
        Some(tick)
    }

    fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
