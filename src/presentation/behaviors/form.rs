//! Required-field validation on form submission

use std::collections::BTreeSet;

use crate::error::BehaviorError;
use crate::logger;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::{Element, ElementId};
use crate::presentation::event::{Event, EventOutcome};

pub const INVALID_BORDER: &str = "#dc2626";
pub const VALID_BORDER: &str = "#e2e8f0";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

fn is_required_field(el: &Element) -> bool {
    matches!(el.tag(), "input" | "textarea") && el.has_attr("required")
}

fn is_blank(el: &Element) -> bool {
    el.value().trim().is_empty()
}

#[derive(Debug, Default)]
pub struct FormValidation {
    forms: Vec<ElementId>,
    /// Flagged fields waiting for their first non-empty input
    awaiting_input: BTreeSet<ElementId>,
}

impl FormValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_flagged(&self, field: ElementId) -> bool {
        self.awaiting_input.contains(&field)
    }

    fn validate(&mut self, form: ElementId, ctx: &mut Context<'_>) -> EventOutcome {
        let fields = ctx.document.select_within(form, is_required_field);
        let mut empty = 0_usize;
        for field in fields {
            if ctx.document.get(field).is_some_and(is_blank) {
                empty += 1;
                ctx.document
                    .update(field, |el| el.set_style("border-color", INVALID_BORDER));
                self.awaiting_input.insert(field);
            }
        }

        if empty == 0 {
            EventOutcome::Proceed
        } else {
            logger::log_debug(&format!("[Form] submission blocked, {empty} field(s) empty"));
            ctx.host.alert(REQUIRED_FIELDS_MESSAGE);
            EventOutcome::PreventDefault
        }
    }

    fn clear_if_filled(&mut self, field: ElementId, ctx: &mut Context<'_>) {
        if !self.awaiting_input.contains(&field) {
            return;
        }
        if ctx.document.get(field).is_some_and(|el| !is_blank(el)) {
            ctx.document
                .update(field, |el| el.set_style("border-color", VALID_BORDER));
            self.awaiting_input.remove(&field);
        }
    }
}

impl Behavior for FormValidation {
    fn name(&self) -> &'static str {
        "form-validation"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        self.forms = ctx.document.select(|el| el.tag() == "form");
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        match event {
            Event::Submit(form) if self.forms.contains(form) => self.validate(*form, ctx),
            Event::Input(field) => {
                self.clear_if_filled(*field, ctx);
                EventOutcome::Proceed
            }
            _ => EventOutcome::Proceed,
        }
    }
}
