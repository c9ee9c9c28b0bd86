//! Smooth scrolling for same-document anchor links

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::{ScrollBehavior, ScrollBlock, ScrollRequest};

/// Intercepts clicks on `a[href^="#"]`
#[derive(Debug, Default)]
pub struct AnchorScroll {
    anchors: Vec<ElementId>,
}

impl AnchorScroll {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for AnchorScroll {
    fn name(&self) -> &'static str {
        "anchor-scroll"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        self.anchors = ctx
            .document
            .select(|el| el.tag() == "a" && el.attr("href").is_some_and(|h| h.starts_with('#')));
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        let Event::Click(id) = event else {
            return EventOutcome::Proceed;
        };
        if !self.anchors.contains(id) {
            return EventOutcome::Proceed;
        }

        let fragment = ctx
            .document
            .get(*id)
            .and_then(|el| el.attr("href"))
            .map(|href| href.trim_start_matches('#').to_string())
            .unwrap_or_default();
        // A bare "#" names no element
        let target = if fragment.is_empty() {
            None
        } else {
            ctx.document.by_id(&fragment)
        };
        if let Some(target) = target {
            ctx.host.scroll_into_view(ScrollRequest {
                target,
                behavior: ScrollBehavior::Smooth,
                block: ScrollBlock::Start,
            });
        }
        EventOutcome::PreventDefault
    }
}
