use log::{debug, warn};
use web_sys::Element;

use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const ACTIVE_CLASS: &str = "active";

/// Expanded flag of one question, as carried by its `aria-expanded` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaqItem {
    pub expanded: bool,
}

impl FaqItem {
    pub fn from_aria(value: Option<&str>) -> Self {
        Self {
            expanded: value == Some("true"),
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            expanded: !self.expanded,
        }
    }
}

fn toggle(question: &Element) -> Result<()> {
    let item = FaqItem::from_aria(question.get_attribute("aria-expanded").as_deref()).toggled();
    question.set_attribute("aria-expanded", dom::aria_bool(item.expanded))?;
    if let Some(answer) = question.next_element_sibling() {
        answer.class_list().toggle(ACTIVE_CLASS)?;
    }
    Ok(())
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let questions = ctx.query_all(&ctx.config.faq_question_selector)?;
    let mut disposers = Vec::with_capacity(questions.len());
    for question in questions {
        let target = question.clone();
        disposers.push(dom::listen(question.as_ref(), "click", move |_| {
            if let Err(err) = toggle(&target) {
                warn!("faq: {}", err);
            }
        })?);
    }
    if !disposers.is_empty() {
        debug!("faq mounted on {} questions", disposers.len());
    }
    Ok(disposers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_aria_expanded() {
        assert!(FaqItem::from_aria(Some("true")).expanded);
        assert!(!FaqItem::from_aria(Some("false")).expanded);
        assert!(!FaqItem::from_aria(None).expanded);
    }

    #[test]
    fn items_toggle_independently() {
        let mut items = [FaqItem::default(), FaqItem::default()];
        items[0] = items[0].toggled();
        assert!(items[0].expanded);
        assert!(!items[1].expanded);

        items[1] = items[1].toggled();
        items[0] = items[0].toggled();
        assert!(!items[0].expanded);
        assert!(items[1].expanded);
    }
}
