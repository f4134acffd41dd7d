use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use super::{
    api_client::ContactApiClient,
    notifications::{Notification, NotificationCenter, NotificationId},
};
use crate::domain::{Field, Submission, ValidationErrors};

pub const PENDING_TITLE: &str = "Sending your message...";
pub const SUCCESS_TITLE: &str = "Message sent!";
pub const SUCCESS_DESCRIPTION: &str = "Thank you for your message. I will get back to you soon.";
pub const FAILURE_TITLE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// A previous submit of this form is still in flight.
    AlreadySubmitting,
    Sent,
    /// Carries the reason shown to the visitor.
    Failed(String),
}

#[derive(Default)]
struct FormState {
    values: Submission,
    errors: ValidationErrors,
}

/// State and submit pipeline of one contact form instance.
pub struct ContactForm {
    api_client: ContactApiClient,
    notifications: NotificationCenter,
    state: Mutex<FormState>,
    submitting: AtomicBool,
}

/// Clears the in-flight flag however `submit` exits.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ContactForm {
    pub fn new(api_client: ContactApiClient, notifications: NotificationCenter) -> Self {
        Self {
            api_client,
            notifications,
            state: Mutex::new(FormState::default()),
            submitting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record input for `field`, clearing only that field's error.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut state = self.lock();
        *state.values.field_mut(field) = value.into();
        state.errors.clear(field);
    }

    pub fn values(&self) -> Submission {
        self.lock().values.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Swap the pending notification for its outcome. A released surface makes this a no-op.
    fn settle(&self, pending: Option<NotificationId>, outcome: Notification) {
        if let Some(pending) = pending {
            self.notifications.replace(pending, outcome);
        }
    }

    #[tracing::instrument(name = "Submitting contact form", skip(self))]
    pub async fn submit(&self) -> Outcome {
        let submission = {
            let mut state = self.lock();
            let errors = state.values.validate();
            state.errors = errors.clone();
            if !errors.is_empty() {
                return Outcome::Invalid(errors);
            }
            state.values.clone()
        };

        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Outcome::AlreadySubmitting;
        }
        let _in_flight = InFlight(&self.submitting);

        let pending = self.notifications.show(Notification::pending(PENDING_TITLE));

        match self.api_client.send_email(&submission).await {
            Ok(()) => {
                self.lock().values = Submission::default();
                self.settle(
                    pending,
                    Notification::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION),
                );
                Outcome::Sent
            }
            Err(e) => {
                tracing::error!(error = ?e, "Error sending message");
                let reason = e.reason().to_owned();
                self.settle(pending, Notification::failure(FAILURE_TITLE, reason.clone()));
                Outcome::Failed(reason)
            }
        }
    }
}
