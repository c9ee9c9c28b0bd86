//! The behavior seam
//!
//! A behavior attaches to the document once in [`Behavior::init`] and then
//! sees every event. It may only touch the document and host it is handed.

use super::document::Document;
use super::event::{Event, EventOutcome};
use super::host::Host;
use crate::error::BehaviorError;

/// Mutable view of the page handed to behaviors
pub struct Context<'a> {
    pub document: &'a mut Document,
    pub host: &'a mut dyn Host,
}

impl<'a> Context<'a> {
    pub fn new(document: &'a mut Document, host: &'a mut dyn Host) -> Self {
        Self { document, host }
    }
}

pub trait Behavior {
    fn name(&self) -> &'static str;

    /// Attach to the document. An error disables this behavior only.
    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError>;

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome;
}
