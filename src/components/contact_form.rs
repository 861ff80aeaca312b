use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::toast::{Toast, ToastKind};
use crate::dom::{self, Disposer, PageContext};
use crate::error::Result;

pub const SUCCESS_MESSAGE: &str = "Your message has been sent successfully! We will get back to you soon.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// The four required fields, already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), FormError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(FormError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Message and toast kind reported to the visitor for this submission.
    pub fn outcome(&self) -> (String, ToastKind) {
        match self.validate() {
            Ok(()) => (SUCCESS_MESSAGE.to_string(), ToastKind::Success),
            Err(err) => (err.to_string(), ToastKind::Error),
        }
    }
}

fn field_value(form: &HtmlFormElement, name: &str) -> String {
    let Some(field) = form.elements().named_item(name) else {
        return String::new();
    };
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn read(form: &HtmlFormElement) -> ContactSubmission {
    ContactSubmission::new(
        &field_value(form, "name"),
        &field_value(form, "email"),
        &field_value(form, "subject"),
        &field_value(form, "message"),
    )
}

pub fn mount(ctx: &PageContext) -> Result<Vec<Disposer>> {
    let Some(form) = ctx
        .document
        .get_element_by_id(&ctx.config.form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("contact form: #{} not on page", ctx.config.form_id);
        return Ok(Vec::new());
    };
    let toast = Toast::new(
        ctx.document.get_element_by_id(&ctx.config.toast_id),
        ctx.config.toast_duration_ms,
    );

    let target = form.clone();
    let listener = dom::listen(form.as_ref(), "submit", move |event| {
        event.prevent_default();
        let submission = read(&target);
        let (message, kind) = submission.outcome();
        toast.show(&message, kind);
        // Submission is simulated: nothing leaves the page.
        if kind == ToastKind::Success {
            info!("contact form accepted");
            target.reset();
        }
    })?;

    debug!("contact form mounted");
    Ok(vec![listener])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("noatsign.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn any_empty_field_is_never_a_success() {
        let cases = [
            ContactSubmission::new("", "a@b.com", "S", "M"),
            ContactSubmission::new("A", "", "S", "M"),
            ContactSubmission::new("A", "a@b.com", "   ", "M"),
            ContactSubmission::new("A", "a@b.com", "S", "\n\t"),
        ];
        for submission in cases {
            assert_eq!(submission.validate(), Err(FormError::MissingField));
            let (message, kind) = submission.outcome();
            assert_eq!(kind, ToastKind::Error);
            assert_eq!(message, "Please fill in all required fields.");
        }
    }

    #[test]
    fn missing_fields_reported_before_bad_email() {
        let submission = ContactSubmission::new("", "not-an-email", "S", "M");
        assert_eq!(submission.validate(), Err(FormError::MissingField));
    }

    #[test]
    fn bad_email_is_rejected() {
        let (message, kind) = ContactSubmission::new("A", "a@b", "S", "M").outcome();
        assert_eq!(kind, ToastKind::Error);
        assert_eq!(message, "Please enter a valid email address.");
    }

    #[test]
    fn valid_submission_succeeds() {
        let submission = ContactSubmission::new(" A ", " a@b.com ", "S", "M");
        assert_eq!(submission.email, "a@b.com");
        let (message, kind) = submission.outcome();
        assert_eq!(kind, ToastKind::Success);
        assert_eq!(message, SUCCESS_MESSAGE);
    }
}
