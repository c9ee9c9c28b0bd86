//! Page lifecycle: initialize the catalogue, then route every event to it

use super::behavior::{Behavior, Context};
use super::behaviors;
use super::document::{Document, ElementId};
use super::event::{Event, EventOutcome, ObservedEntry};
use super::host::{Host, Tick, VirtualClock};
use crate::logger;

struct Slot {
    behavior: Box<dyn Behavior>,
    enabled: bool,
}

/// Owns one loaded page and the behaviors attached to it
pub struct PresentationController<H: Host> {
    document: Document,
    host: H,
    slots: Vec<Slot>,
}

impl<H: Host> PresentationController<H> {
    /// Controller with the full site catalogue
    pub fn new(document: Document, host: H) -> Self {
        Self::with_behaviors(document, host, behaviors::catalogue())
    }

    pub fn with_behaviors(document: Document, host: H, behaviors: Vec<Box<dyn Behavior>>) -> Self {
        let slots = behaviors
            .into_iter()
            .map(|behavior| Slot {
                behavior,
                enabled: false,
            })
            .collect();
        Self {
            document,
            host,
            slots,
        }
    }

    /// Initialize every behavior. A failing behavior is disabled and logged;
    /// the rest still initialize. Returns how many are enabled.
    pub fn load(&mut self) -> usize {
        for slot in &mut self.slots {
            let mut ctx = Context::new(&mut self.document, &mut self.host);
            match slot.behavior.init(&mut ctx) {
                Ok(()) => slot.enabled = true,
                Err(err) => {
                    slot.enabled = false;
                    logger::log_behavior_skipped(slot.behavior.name(), &err);
                }
            }
        }

        let enabled = self.enabled_behaviors().len();
        logger::log_info(&format!(
            "Page loaded with {enabled}/{} behaviors",
            self.slots.len()
        ));
        enabled
    }

    /// Names of behaviors that initialized successfully
    pub fn enabled_behaviors(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|slot| slot.enabled)
            .map(|slot| slot.behavior.name())
            .collect()
    }

    /// Deliver an event; the outcome tells the host whether to run its default action
    pub fn dispatch(&mut self, event: &Event) -> EventOutcome {
        match event {
            Event::Scroll { offset } => self.document.set_scroll_offset(*offset),
            Event::Resize { width } => self.document.set_viewport_width(*width),
            Event::VisibilityChange { hidden } => self.document.set_hidden(*hidden),
            Event::Intersection { target, ratio } => return self.intersect(*target, *ratio),
            _ => {}
        }
        self.deliver(event)
    }

    /// Set a form control's value and fire its input event
    pub fn type_into(&mut self, field: ElementId, value: &str) -> EventOutcome {
        self.document.update(field, |el| el.set_value(value));
        self.dispatch(&Event::Input(field))
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn intersect(&mut self, target: ElementId, ratio: f64) -> EventOutcome {
        let entries: Vec<_> = self
            .host
            .observers_of(target)
            .into_iter()
            .map(|(observer, options)| ObservedEntry {
                observer,
                target,
                ratio,
                is_intersecting: options.is_intersecting(ratio),
            })
            .collect();

        entries
            .into_iter()
            .fold(EventOutcome::Proceed, |outcome, entry| {
                outcome.merge(self.deliver(&Event::Observed(entry)))
            })
    }

    fn deliver(&mut self, event: &Event) -> EventOutcome {
        let mut outcome = EventOutcome::Proceed;
        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            let mut ctx = Context::new(&mut self.document, &mut self.host);
            outcome = outcome.merge(slot.behavior.handle(event, &mut ctx));
        }
        outcome
    }
}

impl<H: Host + VirtualClock> PresentationController<H> {
    /// Run the virtual clock forward, firing due timers and frames in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.host.now() + ms;
        while let Some(tick) = self.host.next_due(until) {
            let event = match tick {
                Tick::Timer(id) => Event::Timer(id),
                Tick::Frame(id) => Event::AnimationFrame(id),
            };
            self.deliver(&event);
        }
        self.host.settle(until);
    }

    pub fn now(&self) -> u64 {
        self.host.now()
    }
}
