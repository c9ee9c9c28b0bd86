//! One-shot fade-in when content scrolls into view

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::{ObserveOptions, ObserverId};

/// Classes whose elements fade in
pub const FADE_CLASSES: [&str; 4] = ["card", "value-item", "stat-item", "project-card"];

pub const FADE_THRESHOLD: f64 = 0.1;
pub const FADE_ROOT_MARGIN: &str = "0px 0px -50px 0px";

#[derive(Debug, Default)]
pub struct FadeIn {
    observer: Option<ObserverId>,
}

impl FadeIn {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for FadeIn {
    fn name(&self) -> &'static str {
        "fade-in"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        let targets = ctx
            .document
            .select(|el| FADE_CLASSES.iter().any(|class| el.has_class(class)));
        for &id in &targets {
            ctx.document.update(id, |el| el.add_class("fade-in"));
        }

        self.observer = ctx.host.create_observer(ObserveOptions {
            threshold: FADE_THRESHOLD,
            root_margin: FADE_ROOT_MARGIN.to_string(),
        });
        match self.observer {
            Some(observer) => {
                for id in targets {
                    ctx.host.observe(observer, id);
                }
            }
            // Without observation nothing would ever reveal them
            None => {
                for id in targets {
                    ctx.document.update(id, |el| el.add_class("visible"));
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if let Event::Observed(entry) = event {
            if Some(entry.observer) == self.observer && entry.is_intersecting {
                ctx.document.update(entry.target, |el| el.add_class("visible"));
            }
        }
        EventOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::document::{Document, Element};
    use crate::presentation::event::ObservedEntry;
    use crate::presentation::host::{HeadlessHost, Host};

    #[test]
    fn test_marks_and_observes_targets() {
        let mut doc = Document::new();
        let card = doc.append(Element::new("div").with_class("card"));
        let plain = doc.append(Element::new("div"));
        let mut host = HeadlessHost::new();
        let mut behavior = FadeIn::new();
        behavior.init(&mut Context::new(&mut doc, &mut host)).unwrap();

        assert!(doc.has_class(card, "fade-in"));
        assert!(!doc.has_class(plain, "fade-in"));
        let observers = host.observers_of(card);
        assert_eq!(observers.len(), 1);
        assert_eq!(observers[0].1.threshold, FADE_THRESHOLD);
        assert_eq!(observers[0].1.root_margin, FADE_ROOT_MARGIN);
    }

    #[test]
    fn test_visible_is_permanent() {
        let mut doc = Document::new();
        let card = doc.append(Element::new("div").with_class("project-card"));
        let mut host = HeadlessHost::new();
        let mut behavior = FadeIn::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        behavior.init(&mut ctx).unwrap();
        let observer = behavior.observer.unwrap();

        let entry = |is_intersecting| {
            Event::Observed(ObservedEntry {
                observer,
                target: card,
                ratio: if is_intersecting { 0.4 } else { 0.0 },
                is_intersecting,
            })
        };
        behavior.handle(&entry(false), &mut ctx);
        assert!(!ctx.document.has_class(card, "visible"));
        behavior.handle(&entry(true), &mut ctx);
        behavior.handle(&entry(false), &mut ctx);
        assert!(ctx.document.has_class(card, "visible"));
    }

    #[test]
    fn test_without_observation_reveals_immediately() {
        let mut doc = Document::new();
        let item = doc.append(Element::new("div").with_class("value-item"));
        let mut host = HeadlessHost::new().without_observation();
        FadeIn::new()
            .init(&mut Context::new(&mut doc, &mut host))
            .unwrap();
        assert!(doc.has_class(item, "visible"));
    }
}
