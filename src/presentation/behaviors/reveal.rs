//! Load-time reveals: staggered card delays and the delayed hero transition

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::TimerId;

pub const HERO_REVEAL_DELAY_MS: u64 = 300;

/// `animation-delay` for the card at `index` in document order
#[allow(clippy::cast_precision_loss)]
pub fn card_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

/// Gives every `.card` an animation delay of a tenth of a second per position
#[derive(Debug, Default)]
pub struct CardStagger;

impl CardStagger {
    pub const fn new() -> Self {
        Self
    }
}

impl Behavior for CardStagger {
    fn name(&self) -> &'static str {
        "card-stagger"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        for (index, card) in ctx.document.by_class("card").into_iter().enumerate() {
            let delay = card_delay(index);
            ctx.document
                .update(card, |el| el.set_style("animation-delay", &delay));
        }
        Ok(())
    }

    fn handle(&mut self, _event: &Event, _ctx: &mut Context<'_>) -> EventOutcome {
        EventOutcome::Proceed
    }
}

/// Brings `.hero-content` to rest shortly after load
#[derive(Debug, Default)]
pub struct HeroReveal {
    pending: Option<(TimerId, ElementId)>,
}

impl HeroReveal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for HeroReveal {
    fn name(&self) -> &'static str {
        "hero-reveal"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        if let Some(hero) = ctx.document.first_by_class("hero-content") {
            let timer = ctx.host.set_timeout(HERO_REVEAL_DELAY_MS);
            self.pending = Some((timer, hero));
        }
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if let Event::Timer(id) = event {
            if let Some((timer, hero)) = self.pending {
                if timer == *id {
                    self.pending = None;
                    ctx.document.update(hero, |el| {
                        el.set_style("opacity", "1");
                        el.set_style("transform", "translateY(0)");
                    });
                }
            }
        }
        EventOutcome::Proceed
    }
}
