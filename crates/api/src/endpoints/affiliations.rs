//! Affiliation request endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppError, AppResult, MutationOutcome};
use civinet_core::{CreateRequestInput, RequestDecision, RespondInput};
use civinet_db::entities::affiliation_request;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

// ==================== Request/Response Types ====================

/// Affiliation request response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliationRequestResponse {
    pub id: String,
    pub user_id: String,
    pub organisation_id: String,
    pub request_status: String,
    pub request_message: Option<String>,
    pub admin_response: Option<String>,
    pub requested_at: String,
    pub responded_at: Option<String>,
}

impl From<affiliation_request::Model> for AffiliationRequestResponse {
    fn from(request: affiliation_request::Model) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            organisation_id: request.organisation_id,
            request_status: request.request_status.as_str().to_string(),
            request_message: request.request_message,
            admin_response: request.admin_response,
            requested_at: request.requested_at.to_rfc3339(),
            responded_at: request.responded_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Respond request from the dashboard.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub request_id: String,
    /// `"approved"` or `"rejected"`.
    pub decision: String,
    pub admin_response: Option<String>,
}

/// Cancel request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub request_id: String,
}

// ==================== Handlers ====================

/// Open an affiliation request.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateRequestInput>,
) -> Json<MutationOutcome> {
    Json(state.affiliation_service.create(&actor, input).await)
}

/// Approve or reject a pending request.
async fn respond(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<RespondRequest>,
) -> AppResult<Json<MutationOutcome>> {
    let decision = match req.decision.as_str() {
        "approved" => RequestDecision::Approved,
        "rejected" => RequestDecision::Rejected,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown decision: {other}"
            )));
        }
    };

    let outcome = state
        .affiliation_service
        .respond(
            &actor,
            RespondInput {
                request_id: req.request_id,
                decision,
                admin_response: req.admin_response,
            },
        )
        .await;

    Ok(Json(outcome))
}

/// Cancel a pending request.
async fn cancel(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<CancelRequest>,
) -> Json<MutationOutcome> {
    Json(state.affiliation_service.cancel(&actor, &req.request_id).await)
}

/// The acting user's pending request, if any.
async fn pending(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Option<AffiliationRequestResponse>>> {
    let request = state.affiliation_service.find_pending(&actor.user_id).await?;

    Ok(ApiResponse::ok(request.map(Into::into)))
}

/// The acting user's request history.
async fn mine(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<AffiliationRequestResponse>>> {
    let page = state.affiliation_service.list_own(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Requests under review for the actor's organisation (or all of them,
/// for administrators).
async fn list(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<AffiliationRequestResponse>>> {
    let page = state.affiliation_service.list(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/respond", post(respond))
        .route("/cancel", post(cancel))
        .route("/pending", post(pending))
        .route("/mine", post(mine))
        .route("/list", post(list))
}
