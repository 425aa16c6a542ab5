//! Contact form
//!
//! Validation plus the simulated submission flow. Nothing is sent anywhere:
//! a valid submission puts the submit button into its sending state, the
//! engine waits out the simulated latency and then calls
//! [`ContactForm::complete`] to reset the form.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use ember_core::{ClassNames, Document, ElementId, FormFields, Selector};

/// Reasons a submission is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail(String),
}

/// Result type for form validation
pub type Result<T> = std::result::Result<T, FormError>;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Whether `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Values read from the form controls
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Read the configured controls; missing controls read as empty
    pub fn read(doc: &dyn Document, fields: &FormFields) -> Self {
        let value = |id: &str| {
            doc.get_by_id(id)
                .and_then(|el| doc.value(el))
                .unwrap_or_default()
        };
        Self {
            name: value(&fields.name_id),
            email: value(&fields.email_id),
            subject: value(&fields.subject_id),
            message: value(&fields.message_id),
        }
    }

    /// Check required fields and the email shape
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(label));
            }
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct InFlight {
    button: Option<ElementId>,
    label: String,
}

/// Submission state of the contact form
#[derive(Clone, Debug)]
pub struct ContactForm {
    fields: FormFields,
    form_control: String,
    focused: String,
    submit_button: Selector,
    in_flight: Option<InFlight>,
}

impl ContactForm {
    pub fn new(fields: FormFields, classes: &ClassNames) -> Self {
        Self {
            fields,
            form_control: classes.form_control.clone(),
            focused: classes.focused.clone(),
            submit_button: Selector::class(classes.submit_button.clone()),
            in_flight: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate and start a submission
    ///
    /// Returns `Ok(None)` when a submission is already in flight. On success
    /// the submit button shows the sending label and is disabled until
    /// [`ContactForm::complete`].
    pub fn submit(&mut self, doc: &mut dyn Document, form: ElementId) -> Result<Option<ContactSubmission>> {
        if self.in_flight.is_some() {
            tracing::debug!("Contact form: submission already in flight, ignoring");
            return Ok(None);
        }

        let submission = ContactSubmission::read(doc, &self.fields);
        submission.validate()?;

        let button = doc.query_within(form, &self.submit_button);
        let label = button.and_then(|b| doc.text(b)).unwrap_or_default();
        if let Some(button) = button {
            doc.set_text(button, &self.fields.sending_label);
            doc.set_attribute(button, "disabled", Some(""));
        }
        self.in_flight = Some(InFlight { button, label });

        tracing::info!(
            "Contact form submitted: name={:?} email={:?} subject={:?}",
            submission.name,
            submission.email,
            submission.subject
        );
        Ok(Some(submission))
    }

    /// Finish the in-flight submission: clear fields and restore the button
    ///
    /// Returns `false` if nothing was in flight.
    pub fn complete(&mut self, doc: &mut dyn Document) -> bool {
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };

        for id in [
            &self.fields.name_id,
            &self.fields.email_id,
            &self.fields.subject_id,
            &self.fields.message_id,
        ] {
            let Some(control) = doc.get_by_id(id) else {
                continue;
            };
            doc.set_value(control, "");
            if let Some(group) = doc.parent(control) {
                doc.remove_class(group, &self.focused);
            }
        }

        if let Some(button) = in_flight.button {
            doc.set_text(button, &in_flight.label);
            doc.set_attribute(button, "disabled", None);
        }
        true
    }

    /// Mark the control's group as focused
    pub fn on_focus(&self, doc: &mut dyn Document, control: ElementId) -> bool {
        if !doc.has_class(control, &self.form_control) {
            return false;
        }
        match doc.parent(control) {
            Some(group) => doc.add_class(group, &self.focused),
            None => false,
        }
    }

    /// Unmark the control's group if the control is empty
    pub fn on_blur(&self, doc: &mut dyn Document, control: ElementId) -> bool {
        if !doc.has_class(control, &self.form_control) {
            return false;
        }
        if !doc.value(control).unwrap_or_default().is_empty() {
            return false;
        }
        match doc.parent(control) {
            Some(group) => doc.remove_class(group, &self.focused),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::MemoryDocument;

    struct Page {
        doc: MemoryDocument,
        form: ElementId,
        controls: Vec<ElementId>,
        button: ElementId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let form = doc.append(doc.body(), Some("contact-form"), &["contact-form"]);
        let mut controls = Vec::new();
        for id in ["name", "email", "subject", "message"] {
            let group = doc.append(form, None, &["form-group"]);
            controls.push(doc.append(group, Some(id), &["form-control"]));
        }
        let button = doc.append(form, None, &["btn-submit"]);
        doc.with_text(button, "Send Message");
        Page {
            doc,
            form,
            controls,
            button,
        }
    }

    fn fill(page: &mut Page, values: [&str; 4]) {
        for (control, value) in page.controls.iter().zip(values) {
            page.doc.type_value(*control, value);
        }
    }

    fn contact_form() -> ContactForm {
        ContactForm::new(FormFields::default(), &ClassNames::default())
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.co"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@c.de"));
    }

    #[test]
    fn test_required_fields() {
        let submission = ContactSubmission {
            name: "Solaire".into(),
            email: "sun@astora.co".into(),
            subject: String::new(),
            message: "   ".into(),
        };
        assert_eq!(submission.validate(), Err(FormError::MissingField("message")));

        let submission = ContactSubmission {
            message: "Praise the sun".into(),
            ..submission
        };
        assert_eq!(submission.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let submission = ContactSubmission {
            name: "x".into(),
            email: "nope".into(),
            subject: String::new(),
            message: "y".into(),
        };
        assert_eq!(
            submission.validate(),
            Err(FormError::InvalidEmail("nope".into()))
        );
        assert_eq!(
            FormError::InvalidEmail("nope".into()).to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_submit_and_complete() {
        let mut p = page();
        let mut form = contact_form();
        fill(&mut p, ["Siegmeyer", "onion@catarina.co", "Hi", "Mmm"]);

        let submission = form.submit(&mut p.doc, p.form).unwrap().unwrap();
        assert_eq!(submission.name, "Siegmeyer");
        assert_eq!(p.doc.text(p.button).as_deref(), Some("Sending Message..."));
        assert!(p.doc.attribute(p.button, "disabled").is_some());

        // Second submit while in flight is ignored
        assert_eq!(form.submit(&mut p.doc, p.form), Ok(None));

        assert!(form.complete(&mut p.doc));
        assert!(!form.is_in_flight());
        assert_eq!(p.doc.text(p.button).as_deref(), Some("Send Message"));
        assert!(p.doc.attribute(p.button, "disabled").is_none());
        for control in &p.controls {
            assert_eq!(p.doc.value(*control).as_deref(), Some(""));
        }
        assert!(!form.complete(&mut p.doc));
    }

    #[test]
    fn test_failed_submit_leaves_button() {
        let mut p = page();
        let mut form = contact_form();
        fill(&mut p, ["", "a@b.co", "", "msg"]);

        assert_eq!(
            form.submit(&mut p.doc, p.form),
            Err(FormError::MissingField("name"))
        );
        assert!(!form.is_in_flight());
        assert_eq!(p.doc.text(p.button).as_deref(), Some("Send Message"));
    }

    #[test]
    fn test_focus_and_blur() {
        let mut p = page();
        let form = contact_form();
        let name = p.controls[0];
        let group = p.doc.parent(name).unwrap();

        assert!(form.on_focus(&mut p.doc, name));
        assert!(p.doc.has_class(group, "focused"));

        p.doc.type_value(name, "Patches");
        assert!(!form.on_blur(&mut p.doc, name));
        assert!(p.doc.has_class(group, "focused"));

        p.doc.type_value(name, "");
        assert!(form.on_blur(&mut p.doc, name));
        assert!(!p.doc.has_class(group, "focused"));

        // Not a form control
        assert!(!form.on_focus(&mut p.doc, group));
    }
}
