//! Profile endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::UpdateProfileInput;
use civinet_db::entities::profile;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthActor, middleware::AppState, response::ApiResponse};

/// Profile response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub organisation_id: Option<String>,
    pub locale: String,
    pub created_at: String,
}

impl From<profile::Model> for ProfileResponse {
    fn from(profile: profile::Model) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            role: profile.role.as_str().to_string(),
            organisation_id: profile.organisation_id,
            locale: profile.locale,
            created_at: profile.created_at.to_rfc3339(),
        }
    }
}

/// First-login registration request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureProfileRequest {
    pub display_name: String,
}

/// The acting user's profile.
async fn me(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state.profile_service.get_own(&actor).await?;

    Ok(ApiResponse::ok(profile.into()))
}

/// Create the profile row on first login; a no-op when it exists.
async fn ensure(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<EnsureProfileRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state
        .profile_service
        .ensure_exists(&actor, &req.display_name)
        .await?;

    Ok(ApiResponse::ok(profile.into()))
}

/// Update the acting user's profile.
async fn update(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> Json<MutationOutcome> {
    Json(state.profile_service.update_own(&actor, input).await)
}

/// Detach from the current organisation.
async fn leave_organisation(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
) -> Json<MutationOutcome> {
    Json(state.profile_service.leave_organisation(&actor).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", post(me))
        .route("/ensure", post(ensure))
        .route("/update", post(update))
        .route("/leave-organisation", post(leave_organisation))
}
