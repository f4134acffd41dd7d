//! The browser side of the contact form, driven from Rust.

mod api_client;
mod form;
mod notifications;

pub use api_client::{ContactApiClient, RequestError};
pub use form::{
    ContactForm, FAILURE_TITLE, Outcome, PENDING_TITLE, SUCCESS_DESCRIPTION, SUCCESS_TITLE,
};
pub use notifications::{
    Notification, NotificationCenter, NotificationId, NotificationKind, NotificationSurface,
};
