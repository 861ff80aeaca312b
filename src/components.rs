pub mod contact_form;
pub mod count_up;
pub mod faq;
pub mod header;
pub mod hero;
pub mod image_fallback;
pub mod mobile_menu;
pub mod reveal;
pub mod smooth_scroll;
pub mod toast;

use std::fmt;
use std::str::FromStr;

use crate::dom::{Disposer, PageContext};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    StickyHeader,
    SmoothScroll,
    MobileMenu,
    Reveal,
    CountUp,
    ContactForm,
    Faq,
    Hero,
    ImageFallback,
}

impl Component {
    /// Mount order; handlers for the same event fire in this order.
    pub const ALL: [Component; 9] = [
        Component::StickyHeader,
        Component::SmoothScroll,
        Component::MobileMenu,
        Component::Reveal,
        Component::CountUp,
        Component::ContactForm,
        Component::Faq,
        Component::Hero,
        Component::ImageFallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::StickyHeader => "sticky-header",
            Component::SmoothScroll => "smooth-scroll",
            Component::MobileMenu => "mobile-menu",
            Component::Reveal => "reveal",
            Component::CountUp => "count-up",
            Component::ContactForm => "contact-form",
            Component::Faq => "faq",
            Component::Hero => "hero",
            Component::ImageFallback => "image-fallback",
        }
    }

    pub fn mount(self, ctx: &PageContext) -> Result<Vec<Disposer>> {
        match self {
            Component::StickyHeader => header::mount(ctx),
            Component::SmoothScroll => smooth_scroll::mount(ctx),
            Component::MobileMenu => mobile_menu::mount(ctx),
            Component::Reveal => reveal::mount(ctx),
            Component::CountUp => count_up::mount(ctx),
            Component::ContactForm => contact_form::mount(ctx),
            Component::Faq => faq::mount(ctx),
            Component::Hero => hero::mount(ctx),
            Component::ImageFallback => image_fallback::mount(ctx),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Component::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownComponent(s.to_string()))
    }
}
