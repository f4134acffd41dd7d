use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::startup::AppState;

#[derive(Serialize, Deserialize, Debug)]
pub struct ContactDetails {
    pub email: String,
}

/// The address the site advertises to visitors.
pub async fn contact_details(State(app_state): State<Arc<AppState>>) -> Json<ContactDetails> {
    Json(ContactDetails {
        email: app_state.contact_email.clone(),
    })
}
