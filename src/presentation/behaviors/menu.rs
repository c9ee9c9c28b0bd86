//! Mobile navigation menu
//!
//! Two states, closed initially. The toggle's click handler is bound at most
//! once no matter how often [`MobileMenu::init`] runs.

use crate::error::BehaviorError;
use crate::logger;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome, ESCAPE};

/// Viewport width above which the menu is always closed
pub const DESKTOP_BREAKPOINT_PX: u32 = 768;

pub const NAV_ID: &str = "main-navigation";
const OPEN_CLASS: &str = "is-open";
const OPEN_GLYPH: &str = "✕";
const CLOSED_GLYPH: &str = "☰";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug, Default)]
pub struct MobileMenu {
    nav: Option<ElementId>,
    toggle: Option<ElementId>,
    links: Vec<ElementId>,
    /// Register-once guard for the toggle click handler
    toggle_bound: bool,
    toggle_bindings: usize,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of click handlers attached to the toggle (0 or 1)
    pub const fn toggle_bindings(&self) -> usize {
        self.toggle_bindings
    }

    pub fn state(&self, ctx: &Context<'_>) -> MenuState {
        match self.nav {
            Some(nav) if ctx.document.has_class(nav, OPEN_CLASS) => MenuState::Open,
            _ => MenuState::Closed,
        }
    }

    fn is_open(&self, ctx: &Context<'_>) -> bool {
        self.state(ctx) == MenuState::Open
    }

    fn toggle_menu(&self, ctx: &mut Context<'_>) {
        if self.is_open(ctx) {
            self.close(ctx);
        } else {
            self.open(ctx);
        }
    }

    fn open(&self, ctx: &mut Context<'_>) {
        self.apply(ctx, MenuState::Open);
        logger::log_debug("[Menu] opened");
    }

    fn close(&self, ctx: &mut Context<'_>) {
        self.apply(ctx, MenuState::Closed);
        logger::log_debug("[Menu] closed");
    }

    fn apply(&self, ctx: &mut Context<'_>, state: MenuState) {
        let open = state == MenuState::Open;
        if let Some(nav) = self.nav {
            ctx.document.update(nav, |el| {
                if open {
                    el.add_class(OPEN_CLASS);
                } else {
                    el.remove_class(OPEN_CLASS);
                }
            });
        }
        if let Some(toggle) = self.toggle {
            ctx.document.update(toggle, |el| {
                el.set_attr("aria-expanded", if open { "true" } else { "false" });
                el.set_text(if open { OPEN_GLYPH } else { CLOSED_GLYPH });
            });
        }
        ctx.document.set_scroll_locked(open);
    }
}

impl Behavior for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile-menu"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        let toggle = ctx.document.first_by_class("mobile-menu-toggle");
        if let Some(toggle) = toggle {
            ctx.document
                .update(toggle, |el| el.set_attr("aria-controls", NAV_ID));
        }

        let nav = ctx
            .document
            .first_by_class("main-nav")
            .ok_or(BehaviorError::MissingElement(".main-nav"))?;
        ctx.document.update(nav, |el| el.set_attr("id", NAV_ID));
        self.nav = Some(nav);

        match toggle {
            Some(toggle) if !self.toggle_bound => {
                self.toggle = Some(toggle);
                self.toggle_bound = true;
                self.toggle_bindings += 1;
            }
            Some(_) => {}
            None => logger::log_warning("[Menu] .mobile-menu-toggle not found"),
        }

        self.links = ctx.document.select_within(nav, |el| el.tag() == "a");
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if self.nav.is_none() {
            return EventOutcome::Proceed;
        }

        match event {
            Event::Click(id) if self.toggle_bound && Some(*id) == self.toggle => {
                self.toggle_menu(ctx);
                EventOutcome::PreventDefault
            }
            Event::Click(id) if self.links.contains(id) => {
                if self.is_open(ctx) {
                    self.close(ctx);
                }
                EventOutcome::Proceed
            }
            Event::KeyDown(key) if key == ESCAPE => {
                if self.is_open(ctx) {
                    self.close(ctx);
                }
                EventOutcome::Proceed
            }
            Event::Resize { width } if *width > DESKTOP_BREAKPOINT_PX => {
                if self.is_open(ctx) {
                    self.close(ctx);
                }
                EventOutcome::Proceed
            }
            _ => EventOutcome::Proceed,
        }
    }
}
