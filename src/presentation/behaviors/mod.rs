//! The page behavior catalogue

pub mod anchor;
pub mod counter;
pub mod fade_in;
pub mod form;
pub mod header;
pub mod lazy_images;
pub mod menu;
pub mod phone;
pub mod reveal;
pub mod slider;

pub use anchor::AnchorScroll;
pub use counter::{CounterAnimation, StatCounters};
pub use fade_in::FadeIn;
pub use form::FormValidation;
pub use header::HeaderScroll;
pub use lazy_images::LazyImages;
pub use menu::{MenuState, MobileMenu};
pub use phone::{format_phone, PhoneFormatting};
pub use reveal::{CardStagger, HeroReveal};
pub use slider::HeroSlider;

use super::behavior::Behavior;

/// Every site behavior, in initialization order
pub fn catalogue() -> Vec<Box<dyn Behavior>> {
    vec![
        Box::new(AnchorScroll::new()),
        Box::new(HeaderScroll::new()),
        Box::new(FadeIn::new()),
        Box::new(MobileMenu::new()),
        Box::new(StatCounters::new()),
        Box::new(FormValidation::new()),
        Box::new(CardStagger::new()),
        Box::new(HeroReveal::new()),
        Box::new(PhoneFormatting::new()),
        Box::new(HeroSlider::new()),
        Box::new(LazyImages::new()),
    ]
}
