use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use web_sys::Element;

pub const SHOW_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    /// Class attribute for a visible toast of this kind.
    pub fn visible_class(self) -> String {
        format!("toast {} {}", self.as_str(), SHOW_CLASS)
    }
}

/// Transient notification bound to one element.
///
/// Showing a new message while one is visible replaces the pending hide
/// timer, so the latest message always stays up for the full duration.
#[derive(Clone)]
pub struct Toast {
    element: Option<Element>,
    duration_ms: u32,
    hide: Rc<RefCell<Option<Timeout>>>,
}

impl Toast {
    pub fn new(element: Option<Element>, duration_ms: u32) -> Self {
        Self {
            element,
            duration_ms,
            hide: Rc::new(RefCell::new(None)),
        }
    }

    pub fn show(&self, message: &str, kind: ToastKind) {
        let Some(element) = &self.element else {
            return;
        };
        element.set_text_content(Some(message));
        element.set_class_name(&kind.visible_class());

        let target = element.clone();
        let timeout = Timeout::new(self.duration_ms, move || {
            if let Err(err) = target.class_list().remove_1(SHOW_CLASS) {
                warn!("toast: {:?}", err);
            }
        });
        // Dropping the previous timeout cancels it.
        self.hide.borrow_mut().replace(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_class_names() {
        assert_eq!(ToastKind::Success.visible_class(), "toast success show");
        assert_eq!(ToastKind::Error.visible_class(), "toast error show");
    }

    #[test]
    fn missing_element_is_a_no_op() {
        let toast = Toast::new(None, 5000);
        toast.show("Please fill in all required fields.", ToastKind::Error);
        assert!(toast.hide.borrow().is_none());
    }
}
