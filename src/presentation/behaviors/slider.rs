//! Hero slide rotation
//!
//! Exactly one `.hero-slide` carries `active`. A repeating timer advances the
//! cursor; it only exists while the page is visible.

use crate::error::BehaviorError;
use crate::logger;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::TimerId;

pub const SLIDE_INTERVAL_MS: u64 = 5000;
const ACTIVE: &str = "active";

#[derive(Debug, Default)]
pub struct HeroSlider {
    slides: Vec<ElementId>,
    current: usize,
    timer: Option<TimerId>,
}

impl HeroSlider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active slide
    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn advance(&mut self, ctx: &mut Context<'_>) {
        let from = self.slides[self.current];
        self.current = (self.current + 1) % self.slides.len();
        let to = self.slides[self.current];
        ctx.document.update(from, |el| el.remove_class(ACTIVE));
        ctx.document.update(to, |el| el.add_class(ACTIVE));
    }

    fn start(&mut self, ctx: &mut Context<'_>) {
        if self.timer.is_none() {
            self.timer = Some(ctx.host.set_interval(SLIDE_INTERVAL_MS));
        }
    }

    fn stop(&mut self, ctx: &mut Context<'_>) {
        if let Some(timer) = self.timer.take() {
            ctx.host.clear_timer(timer);
        }
    }
}

impl Behavior for HeroSlider {
    fn name(&self) -> &'static str {
        "hero-slider"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        self.stop(ctx);
        self.slides = ctx.document.by_class("hero-slide");
        if self.slides.is_empty() {
            return Ok(());
        }

        self.current = self
            .slides
            .iter()
            .position(|&id| ctx.document.has_class(id, ACTIVE))
            .unwrap_or(0);
        for (index, &id) in self.slides.iter().enumerate() {
            let active = index == self.current;
            ctx.document.update(id, |el| {
                if active {
                    el.add_class(ACTIVE);
                } else {
                    el.remove_class(ACTIVE);
                }
            });
        }

        if !ctx.document.is_hidden() {
            self.start(ctx);
        }
        logger::log_debug(&format!("[Slider] {} slides", self.slides.len()));
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if self.slides.is_empty() {
            return EventOutcome::Proceed;
        }
        match event {
            Event::Timer(id) if self.timer == Some(*id) => self.advance(ctx),
            Event::VisibilityChange { hidden: true } => self.stop(ctx),
            Event::VisibilityChange { hidden: false } => self.start(ctx),
            _ => {}
        }
        EventOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::document::{Document, Element};
    use crate::presentation::host::HeadlessHost;

    fn slides(doc: &mut Document, n: usize) -> Vec<ElementId> {
        (0..n)
            .map(|_| doc.append(Element::new("div").with_class("hero-slide")))
            .collect()
    }

    fn active(doc: &Document, slides: &[ElementId]) -> Vec<usize> {
        slides
            .iter()
            .enumerate()
            .filter(|(_, id)| doc.has_class(**id, ACTIVE))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_three_firings_wrap_around() {
        let mut doc = Document::new();
        let ids = slides(&mut doc, 3);
        let mut host = HeadlessHost::new();
        let mut slider = HeroSlider::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        slider.init(&mut ctx).unwrap();
        assert_eq!(active(ctx.document, &ids), [0]);

        let timer = slider.timer.unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            slider.handle(&Event::Timer(timer), &mut ctx);
            let now_active = active(ctx.document, &ids);
            assert_eq!(now_active.len(), 1);
            seen.push(now_active[0]);
        }
        assert_eq!(seen, [1, 2, 0]);
    }

    #[test]
    fn test_existing_active_slide_kept() {
        let mut doc = Document::new();
        let ids = slides(&mut doc, 3);
        doc.update(ids[1], |el| el.add_class(ACTIVE));
        doc.update(ids[2], |el| el.add_class(ACTIVE));
        let mut host = HeadlessHost::new();
        let mut slider = HeroSlider::new();
        slider.init(&mut Context::new(&mut doc, &mut host)).unwrap();
        assert_eq!(slider.current(), 1);
        assert_eq!(active(&doc, &ids), [1]);
    }

    #[test]
    fn test_hidden_page_stops_timer() {
        let mut doc = Document::new();
        slides(&mut doc, 2);
        let mut host = HeadlessHost::new();
        let mut slider = HeroSlider::new();
        let first = {
            let mut ctx = Context::new(&mut doc, &mut host);
            slider.init(&mut ctx).unwrap();
            let first = slider.timer.unwrap();
            slider.handle(&Event::VisibilityChange { hidden: true }, &mut ctx);
            first
        };
        assert!(!slider.is_running());
        assert!(!host.is_timer_pending(first));
        assert_eq!(host.pending_timers(), 0);

        {
            let mut ctx = Context::new(&mut doc, &mut host);
            slider.handle(&Event::VisibilityChange { hidden: false }, &mut ctx);
            // A second visible notification must not add another interval
            slider.handle(&Event::VisibilityChange { hidden: false }, &mut ctx);
        }
        assert_eq!(host.pending_timers(), 1);

        // The stale timer id no longer advances anything
        let mut ctx = Context::new(&mut doc, &mut host);
        slider.handle(&Event::Timer(first), &mut ctx);
        assert_eq!(slider.current(), 0);
    }

    #[test]
    fn test_starts_paused_on_hidden_page() {
        let mut doc = Document::new();
        slides(&mut doc, 2);
        doc.set_hidden(true);
        let mut host = HeadlessHost::new();
        let mut slider = HeroSlider::new();
        slider.init(&mut Context::new(&mut doc, &mut host)).unwrap();
        assert!(!slider.is_running());
    }

    #[test]
    fn test_no_slides_is_noop() {
        let mut doc = Document::new();
        let mut host = HeadlessHost::new();
        let mut slider = HeroSlider::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        slider.init(&mut ctx).unwrap();
        slider.handle(&Event::VisibilityChange { hidden: false }, &mut ctx);
        assert!(!slider.is_running());
    }
}
