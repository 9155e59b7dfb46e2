//! Contact form endpoint.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::MutationOutcome;
use civinet_core::SubmitContactInput;

use crate::middleware::AppState;

/// Accept a contact form submission from the public site.
async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitContactInput>,
) -> Json<MutationOutcome> {
    Json(state.contact_service.submit(input).await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/submit", post(submit))
}
