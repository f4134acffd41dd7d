use reqwest::StatusCode;

use crate::{domain::Submission, routes::ErrorResponse};

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("couldn't reach the contact endpoint, {0}")]
    Network(#[from] reqwest::Error),
    #[error("contact endpoint answered {status}")]
    Rejected {
        status: StatusCode,
        reason: Option<String>,
    },
}

impl RequestError {
    /// What to tell the visitor about this failure.
    pub fn reason(&self) -> &str {
        match self {
            RequestError::Rejected {
                reason: Some(reason),
                ..
            } => reason,
            RequestError::Rejected { reason: None, .. } => "Failed to send message",
            RequestError::Network(_) => "Failed to send message. Please try again.",
        }
    }
}

/// HTTP client for the site's own `/api/send-email` endpoint.
#[derive(Clone)]
pub struct ContactApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ContactApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    #[tracing::instrument(name = "Posting contact submission", skip(self, submission))]
    pub async fn send_email(&self, submission: &Submission) -> Result<(), RequestError> {
        let url = format!("{}/api/send-email", self.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(url)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|error| !error.is_empty());
        Err(RequestError::Rejected { status, reason })
    }
}
