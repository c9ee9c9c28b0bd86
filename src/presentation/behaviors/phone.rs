//! Pakistani phone number normalization for `input[type="tel"]`

use crate::error::BehaviorError;
use crate::presentation::behavior::{Behavior, Context};
use crate::presentation::document::ElementId;
use crate::presentation::event::{Event, EventOutcome};

const COUNTRY_CODE: &str = "92";

/// Normalize raw input.
///
/// Non-digits are dropped, then one leading `0` and then a leading `92`.
/// With ten or more digits left the result is `+92-XXX-XXXX-XXX` built from
/// the first ten; otherwise the bare digits are returned.
///
/// ```
/// use pak_builders::presentation::behaviors::phone::format_phone;
///
/// assert_eq!(format_phone("0300 1234567"), "+92-300-1234-567");
/// assert_eq!(format_phone("0300-12"), "30012");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix('0').unwrap_or(&digits);
    let digits = digits.strip_prefix(COUNTRY_CODE).unwrap_or(digits);

    if digits.len() < 10 {
        return digits.to_string();
    }
    format!(
        "+{COUNTRY_CODE}-{}-{}-{}",
        &digits[..3],
        &digits[3..7],
        &digits[7..10]
    )
}

#[derive(Debug, Default)]
pub struct PhoneFormatting {
    fields: Vec<ElementId>,
}

impl PhoneFormatting {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for PhoneFormatting {
    fn name(&self) -> &'static str {
        "phone-formatting"
    }

    fn init(&mut self, ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        self.fields = ctx
            .document
            .select(|el| el.tag() == "input" && el.attr("type") == Some("tel"));
        Ok(())
    }

    fn handle(&mut self, event: &Event, ctx: &mut Context<'_>) -> EventOutcome {
        if let Event::Input(field) = event {
            if self.fields.contains(field) {
                ctx.document.update(*field, |el| {
                    let formatted = format_phone(el.value());
                    el.set_value(&formatted);
                });
            }
        }
        EventOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::document::{Document, Element};
    use crate::presentation::host::HeadlessHost;

    #[test]
    fn test_local_and_international_forms_agree() {
        assert_eq!(format_phone("03001234567"), "+92-300-1234-567");
        assert_eq!(format_phone("923001234567"), "+92-300-1234-567");
        assert_eq!(format_phone("+92 300 1234567"), "+92-300-1234-567");
    }

    #[test]
    fn test_short_input_stays_raw() {
        assert_eq!(format_phone("0300"), "300");
        assert_eq!(format_phone("(042) 123"), "42123");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_formatting_is_stable() {
        let once = format_phone("03001234567");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn test_only_one_leading_zero_stripped() {
        assert_eq!(format_phone("003001234567"), "+92-030-0123-456");
    }

    #[test]
    fn test_keystrokes_normalize_incrementally() {
        let mut doc = Document::new();
        let tel = doc.append(Element::new("input").with_attr("type", "tel"));
        let text = doc.append(Element::new("input").with_attr("type", "text").with_value("0300"));
        let mut host = HeadlessHost::new();
        let mut ctx = Context::new(&mut doc, &mut host);
        let mut phone = PhoneFormatting::new();
        phone.init(&mut ctx).unwrap();

        for key in "03001234567".chars() {
            let typed = format!("{}{key}", ctx.document.get(tel).unwrap().value());
            ctx.document.update(tel, |el| el.set_value(&typed));
            phone.handle(&Event::Input(tel), &mut ctx);
        }
        assert_eq!(ctx.document.get(tel).unwrap().value(), "+92-300-1234-567");

        phone.handle(&Event::Input(text), &mut ctx);
        assert_eq!(ctx.document.get(text).unwrap().value(), "0300");
    }
}
