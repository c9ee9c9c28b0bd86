//! Header styling driven by the vertical scroll offset

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};

/// Offset past which the header switches to its scrolled look
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

const BACKGROUND: &str = "var(--dark)";
const SCROLLED_FILTER: &str = "blur(10px)";
const RESTING_FILTER: &str = "none";

#[derive(Debug, Default)]
pub struct HeaderScroll {
    header: Option<ElementId>,
}

impl HeaderScroll {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Backdrop filter for a given offset; a pure function of the offset
pub fn backdrop_filter_for(offset: f64) -> &'static str {
    if offset > SCROLL_THRESHOLD_PX {
        SCROLLED_FILTER
    } else {
        RESTING_FILTER
    }
}

impl Behavior for HeaderScroll {
    fn name(&self) -> &'static str {
        "header-scroll"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        self.header = Some(
            ctx.document
                .first_by_class("site-header")
                .ok_or(BehaviorError::MissingElement(".site-header"))?,
        );
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if let (Event::Scroll { offset }, Some(header)) = (event, self.header) {
            let filter = backdrop_filter_for(*offset);
            ctx.document.update(header, |el| {
                el.set_style("background", BACKGROUND);
                el.set_style("backdrop-filter", filter);
            });
        }
        EventOutcome::Proceed
    }
}
