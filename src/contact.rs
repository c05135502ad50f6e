//! Contact form submission.
//!
//! The network call is a [`Submitter`]. It is invoked when the form is
//! submitted and its outcome is delivered after the submitter's latency, at
//! which point the form is reset or kept and the submit control is released.

use crate::notify::{Notice, NotificationKind};
use crate::timeline::Deferred;
use crate::view::{Surface, classes, ids};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Form field names, in form order.
pub const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const ERROR_MESSAGE: &str = "Error sending message. Please try again.";

pub type FormFields = BTreeMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("submission failed: {0}")]
pub struct SubmitError(pub String);

/// Delivers a contact form somewhere.
pub trait Submitter {
    /// How long the outcome takes to arrive.
    fn latency_ms(&self) -> u64;
    fn submit(&mut self, fields: &FormFields) -> Result<(), SubmitError>;
}

/// Stand-in backend: logs the fields and answers after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency_ms: u64,
    fail: bool,
    submissions: usize,
}

impl SimulatedBackend {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            fail: false,
            submissions: 0,
        }
    }

    /// A backend whose every submission fails.
    pub fn failing(latency_ms: u64) -> Self {
        Self {
            fail: true,
            ..Self::new(latency_ms)
        }
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }
}

impl Submitter for SimulatedBackend {
    fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    fn submit(&mut self, fields: &FormFields) -> Result<(), SubmitError> {
        self.submissions += 1;
        info!(?fields, "form data");
        if self.fail {
            Err(SubmitError("simulated backend failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactTask {
    Settle(Result<(), SubmitError>),
}

#[derive(Debug, Clone, Default)]
pub struct ContactFormHandler {
    in_flight: bool,
}

impl ContactFormHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Type into a field. Unknown field names are ignored.
    pub fn set_field(&self, surface: &mut dyn Surface, name: &str, value: &str) {
        if FIELDS.contains(&name) {
            surface.set_attribute(&ids::contact_field(name), "value", value);
        }
    }

    pub fn fields(&self, surface: &dyn Surface) -> FormFields {
        FIELDS
            .iter()
            .map(|name| {
                let value = surface
                    .attribute(&ids::contact_field(name), "value")
                    .unwrap_or_default();
                (name.to_string(), value)
            })
            .collect()
    }

    /// Lock the submit control and hand the fields to `submitter`.
    ///
    /// Returns the settle task, or `None` when a submission is already in
    /// flight (the control is disabled).
    pub fn submit(
        &mut self,
        surface: &mut dyn Surface,
        submitter: &mut dyn Submitter,
    ) -> Option<Deferred<ContactTask>> {
        if self.in_flight {
            debug!("submit ignored while in flight");
            return None;
        }
        self.in_flight = true;
        surface.add_class(ids::SUBMIT_BUTTON, classes::LOADING);
        surface.set_attribute(ids::SUBMIT_BUTTON, "disabled", "");

        let outcome = submitter.submit(&self.fields(surface));
        Some(Deferred::new(
            submitter.latency_ms(),
            ContactTask::Settle(outcome),
        ))
    }

    /// Apply a submission outcome. The submit control is released on both
    /// paths; fields are cleared only on success.
    pub fn settle(&mut self, surface: &mut dyn Surface, outcome: Result<(), SubmitError>) -> Notice {
        let notice = match outcome {
            Ok(()) => {
                for name in FIELDS {
                    surface.set_attribute(&ids::contact_field(name), "value", "");
                }
                Notice::new(SUCCESS_MESSAGE, NotificationKind::Success)
            }
            Err(e) => {
                warn!(error = %e, "contact submission failed");
                Notice::new(ERROR_MESSAGE, NotificationKind::Error)
            }
        };
        surface.remove_class(ids::SUBMIT_BUTTON, classes::LOADING);
        surface.remove_attribute(ids::SUBMIT_BUTTON, "disabled");
        self.in_flight = false;
        notice
    }

    pub fn run(&mut self, surface: &mut dyn Surface, task: ContactTask) -> Notice {
        match task {
            ContactTask::Settle(outcome) => self.settle(surface, outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedSubmitter, sample_page};
    use crate::view::PageModel;

    fn fill(page: &mut PageModel, handler: &ContactFormHandler) {
        handler.set_field(page, "name", "Ada");
        handler.set_field(page, "email", "ada@example.com");
        handler.set_field(page, "subject", "Hello");
        handler.set_field(page, "message", "Hi there");
    }

    fn submit_locked(page: &PageModel) -> bool {
        page.has_class(ids::SUBMIT_BUTTON, classes::LOADING)
            && page.attribute(ids::SUBMIT_BUTTON, "disabled").is_some()
    }

    #[test]
    fn submit_locks_control_and_passes_fields() {
        let mut page = sample_page();
        let mut handler = ContactFormHandler::new();
        let mut submitter = ScriptedSubmitter::succeeding();
        fill(&mut page, &handler);

        let task = handler.submit(&mut page, &mut submitter).unwrap();
        assert!(submit_locked(&page));
        assert!(handler.is_submitting());
        assert_eq!(task.delay_ms, submitter.latency_ms());
        let seen = submitter.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["email"], "ada@example.com");
    }

    #[test]
    fn success_clears_fields_and_releases_control() {
        let mut page = sample_page();
        let mut handler = ContactFormHandler::new();
        let mut submitter = ScriptedSubmitter::succeeding();
        fill(&mut page, &handler);

        let task = handler.submit(&mut page, &mut submitter).unwrap();
        let notice = handler.run(&mut page, task.task);
        assert_eq!(notice, Notice::new(SUCCESS_MESSAGE, NotificationKind::Success));
        assert!(handler.fields(&page).values().all(String::is_empty));
        assert!(!submit_locked(&page));
        assert!(!handler.is_submitting());
    }

    #[test]
    fn failure_keeps_fields_and_releases_control() {
        let mut page = sample_page();
        let mut handler = ContactFormHandler::new();
        let mut submitter = ScriptedSubmitter::failing();
        fill(&mut page, &handler);
        let before = handler.fields(&page);

        let task = handler.submit(&mut page, &mut submitter).unwrap();
        let notice = handler.run(&mut page, task.task);
        assert_eq!(notice.kind, NotificationKind::Error);
        assert_eq!(notice.message, ERROR_MESSAGE);
        assert_eq!(handler.fields(&page), before);
        assert!(!submit_locked(&page));
        assert!(page.attribute(ids::SUBMIT_BUTTON, "disabled").is_none());
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut page = sample_page();
        let mut handler = ContactFormHandler::new();
        let mut submitter = ScriptedSubmitter::succeeding();
        assert!(handler.submit(&mut page, &mut submitter).is_some());
        assert!(handler.submit(&mut page, &mut submitter).is_none());
        assert_eq!(submitter.seen().len(), 1);
    }

    #[test]
    fn unknown_field_ignored() {
        let mut page = sample_page();
        let handler = ContactFormHandler::new();
        handler.set_field(&mut page, "phone", "123");
        assert!(!handler.fields(&page).contains_key("phone"));
        assert!(!page.exists("contact-phone"));
    }

    #[test]
    fn simulated_backend_counts_and_fails_on_demand() {
        let fields = FormFields::new();
        let mut ok = SimulatedBackend::new(2000);
        assert!(ok.submit(&fields).is_ok());
        assert_eq!(ok.submissions(), 1);
        assert_eq!(ok.latency_ms(), 2000);

        let mut bad = SimulatedBackend::failing(10);
        assert!(bad.submit(&fields).is_err());
    }
}
