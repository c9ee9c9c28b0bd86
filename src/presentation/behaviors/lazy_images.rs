//! Marks lazy images `loaded` the first time they enter the viewport

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::{ObserveOptions, ObserverId};

#[derive(Debug, Default)]
pub struct LazyImages {
    observer: Option<ObserverId>,
}

impl LazyImages {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for LazyImages {
    fn name(&self) -> &'static str {
        "lazy-images"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        let images = ctx
            .document
            .select(|el| el.tag() == "img" && el.attr("loading") == Some("lazy"));

        self.observer = ctx.host.create_observer(ObserveOptions::default());
        match self.observer {
            Some(observer) => {
                for id in images {
                    ctx.host.observe(observer, id);
                }
            }
            None => {
                for id in images {
                    ctx.document.update(id, |el| el.add_class("loaded"));
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if let Event::Observed(entry) = event {
            if Some(entry.observer) == self.observer && entry.is_intersecting {
                ctx.document.update(entry.target, |el| el.add_class("loaded"));
                ctx.host.unobserve(entry.observer, entry.target);
            }
        }
        EventOutcome::Proceed
    }
}
