use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::field::Empty;

use crate::{
    domain::{OutboundMessage, Submission},
    email_client::TransportError,
    startup::AppState,
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";

#[derive(Deserialize)]
pub struct ContactFormBody {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(error: &str) -> Json<Self> {
        Json(Self {
            error: error.to_owned(),
        })
    }
}

impl TryFrom<ContactFormBody> for Submission {
    type Error = ContactError;

    fn try_from(value: ContactFormBody) -> Result<Self, Self::Error> {
        let required = |field: Option<String>| {
            field
                .filter(|value| !value.trim().is_empty())
                .ok_or(ContactError::MissingFields)
        };
        Ok(Submission {
            name: required(value.name)?,
            email: required(value.email)?,
            message: required(value.message)?,
        })
    }
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(payload, app_state),
    fields(contact_name = Empty, contact_email = Empty)
)]
pub async fn send_email(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ContactFormBody>, JsonRejection>,
) -> Result<impl IntoResponse, ContactError> {
    let Json(body) = payload.map_err(|e| ContactError::MalformedBody(e.body_text()))?;
    let submission = Submission::try_from(body)?;

    let span = tracing::Span::current();
    span.record("contact_name", submission.name.as_str());
    span.record("contact_email", submission.email.as_str());

    let message = OutboundMessage::from_submission(&submission);
    app_state.email_client.send(message).await?;

    tracing::info!("Contact submission relayed");
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    #[error("contact submission is missing a required field")]
    MissingFields,
    #[error("contact submission body could not be parsed, {0}")]
    MalformedBody(String),
    #[error("couldn't send contact email, {0}")]
    SendEmail(#[from] TransportError),
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ContactError::MissingFields | ContactError::MalformedBody(_) => {
                tracing::warn!("{}", self);
                (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
            }
            ContactError::SendEmail(e) => {
                tracing::error!(error = ?e, "{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
            }
        };
        (status, ErrorResponse::new(message)).into_response()
    }
}
