//! Statistic counters
//!
//! Each `.stat-number` counts up from zero to the number in its text once the
//! `.stats-section` is at least half visible. One animation frame per step.

use std::collections::BTreeMap;

use crate::error::BehaviorError;
use crate::logger;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};
use crate::presentation::host::{FrameId, ObserveOptions, ObserverId, FRAME_INTERVAL_MS};

pub const COUNTER_DURATION_MS: u64 = 2000;
pub const STATS_THRESHOLD: f64 = 0.5;

/// Progress of a single count-up, independent of any document
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
    suffix: &'static str,
}

impl CounterAnimation {
    /// Parse a counter's text; `None` when it holds no digits or only zeros
    #[allow(clippy::cast_precision_loss)]
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok()?;
        if target == 0 {
            return None;
        }
        let frames = COUNTER_DURATION_MS as f64 / FRAME_INTERVAL_MS as f64;
        Some(Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
            suffix: if text.contains('+') { "+" } else { "" },
        })
    }

    pub const fn target(&self) -> u64 {
        self.target
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn is_done(&self) -> bool {
        self.current >= self.target as f64
    }

    /// Advance one frame and return the text to display
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn step(&mut self) -> String {
        let target = self.target as f64;
        if self.current < target {
            self.current = (self.current + self.step).min(target);
        }
        format!("{}{}", self.current.floor() as u64, self.suffix)
    }
}

#[derive(Debug, Default)]
pub struct StatCounters {
    section: Option<ElementId>,
    observer: Option<ObserverId>,
    triggered: bool,
    running: BTreeMap<FrameId, (ElementId, CounterAnimation)>,
}

impl StatCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Counters still animating
    pub fn running(&self) -> usize {
        self.running.len()
    }

    fn start(&mut self, ctx: &mut Context<'_>) {
        if self.triggered {
            return;
        }
        self.triggered = true;
        if let Some(observer) = self.observer.take() {
            ctx.host.disconnect(observer);
        }

        for id in ctx.document.by_class("stat-number") {
            let Some(text) = ctx.document.get(id).map(|el| el.text().to_string()) else {
                continue;
            };
            match CounterAnimation::parse(&text) {
                Some(animation) => self.tick(id, animation, ctx),
                None => logger::log_debug(&format!("[Counters] no target in {text:?}")),
            }
        }
    }

    fn tick(&mut self, id: ElementId, mut animation: CounterAnimation, ctx: &mut Context<'_>) {
        let text = animation.step();
        ctx.document.update(id, |el| el.set_text(&text));
        if !animation.is_done() {
            let frame = ctx.host.request_animation_frame();
            self.running.insert(frame, (id, animation));
        }
    }
}

impl Behavior for StatCounters {
    fn name(&self) -> &'static str {
        "stat-counters"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        let Some(section) = ctx.document.first_by_class("stats-section") else {
            return Ok(());
        };
        self.section = Some(section);
        self.observer = ctx
            .host
            .create_observer(ObserveOptions::threshold(STATS_THRESHOLD));
        match self.observer {
            Some(observer) => ctx.host.observe(observer, section),
            None => self.start(ctx),
        }
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        match event {
            Event::Observed(entry)
                if self.observer == Some(entry.observer) && entry.is_intersecting =>
            {
                self.start(ctx);
            }
            Event::AnimationFrame(frame) => {
                if let Some((id, animation)) = self.running.remove(frame) {
                    self.tick(id, animation, ctx);
                }
            }
            _ => {}
        }
        EventOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::document::{Document, Element};
    use crate::presentation::event::ObservedEntry;
    use crate::presentation::host::HeadlessHost;

    fn run_to_end(animation: &mut CounterAnimation) -> Vec<u64> {
        let mut shown = Vec::new();
        while !animation.is_done() {
            let text = animation.step();
            shown.push(text.trim_end_matches('+').parse().unwrap());
        }
        shown
    }

    #[test]
    fn test_parse() {
        let a = CounterAnimation::parse("500+").unwrap();
        assert_eq!(a.target(), 500);
        assert_eq!(CounterAnimation::parse("1,250").unwrap().target(), 1250);
        assert!(CounterAnimation::parse("Years").is_none());
        assert!(CounterAnimation::parse("0").is_none());
    }

    #[test]
    fn test_monotonic_and_exact() {
        for target in [1_u64, 7, 25, 125, 500, 1250, 99_999] {
            let mut animation = CounterAnimation::parse(&target.to_string()).unwrap();
            let shown = run_to_end(&mut animation);
            assert!(shown.windows(2).all(|w| w[0] <= w[1]), "target {target}");
            assert!(shown.iter().all(|&v| v <= target));
            assert_eq!(*shown.last().unwrap(), target);
        }
    }

    #[test]
    fn test_frame_count_covers_duration() {
        let mut animation = CounterAnimation::parse("250").unwrap();
        let frames = run_to_end(&mut animation).len() as u64;
        let expected = COUNTER_DURATION_MS / FRAME_INTERVAL_MS;
        assert!((expected..=expected + 1).contains(&frames), "{frames} frames");
    }

    #[test]
    fn test_suffix_kept() {
        let mut animation = CounterAnimation::parse("15+").unwrap();
        while !animation.is_done() {
            assert!(animation.step().ends_with('+'));
        }
        let mut plain = CounterAnimation::parse("15").unwrap();
        assert!(!plain.step().ends_with('+'));
    }

    fn stats_page() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new();
        let section = doc.append(Element::new("section").with_class("stats-section"));
        let number = doc.append_child(
            section,
            Element::new("span").with_class("stat-number").with_text("50+"),
        );
        (doc, section, number)
    }

    fn observed(observer: ObserverId, target: ElementId, ratio: f64) -> Event {
        Event::Observed(ObservedEntry {
            observer,
            target,
            ratio,
            is_intersecting: ObserveOptions::threshold(STATS_THRESHOLD).is_intersecting(ratio),
        })
    }

    #[test]
    fn test_triggers_once_at_half_visibility() {
        let (mut doc, section, number) = stats_page();
        let mut host = HeadlessHost::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        let mut counters = StatCounters::new();
        counters.init(&mut ctx).unwrap();
        let observer = counters.observer.unwrap();

        counters.handle(&observed(observer, section, 0.3), &mut ctx);
        assert!(!counters.is_triggered());
        assert_eq!(ctx.document.get(number).unwrap().text(), "50+");

        counters.handle(&observed(observer, section, 0.6), &mut ctx);
        assert!(counters.is_triggered());
        assert_eq!(counters.running(), 1);
        assert!(ctx.host.observers_of(section).is_empty());
        assert_eq!(ctx.document.get(number).unwrap().text(), "0+");
    }

    #[test]
    fn test_frames_drive_to_target() {
        let (mut doc, section, number) = stats_page();
        let mut host = HeadlessHost::new();
        let mut counters = StatCounters::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        counters.init(&mut ctx).unwrap();
        let observer = counters.observer.unwrap();
        counters.handle(&observed(observer, section, 1.0), &mut ctx);

        let mut last = 0;
        while counters.running() > 0 {
            let frame = *counters.running.keys().next().unwrap();
            counters.handle(&Event::AnimationFrame(frame), &mut ctx);
            let text = ctx.document.get(number).unwrap().text().to_string();
            let value: u64 = text.trim_end_matches('+').parse().unwrap();
            assert!(value >= last);
            last = value;
        }
        assert_eq!(ctx.document.get(number).unwrap().text(), "50+");

        // A second intersection never restarts
        counters.handle(&observed(observer, section, 1.0), &mut ctx);
        assert_eq!(counters.running(), 0);
    }

    #[test]
    fn test_without_observation_starts_immediately() {
        let (mut doc, _, _) = stats_page();
        let mut host = HeadlessHost::new().without_observation();
        let mut counters = StatCounters::new();
        counters
            .init(&mut Context::new(&mut doc, &mut host))
            .unwrap();
        assert!(counters.is_triggered());
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_no_section_is_noop() {
        let mut doc = Document::new();
        let number = doc.append(Element::new("span").with_class("stat-number").with_text("9"));
        let mut host = HeadlessHost::new();
        let mut counters = StatCounters::new();
        counters
            .init(&mut Context::new(&mut doc, &mut host))
            .unwrap();
        assert!(!counters.is_triggered());
        assert_eq!(doc.get(number).unwrap().text(), "9");
    }
}
