//! Event endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::CreateEventInput;
use civinet_db::entities::event;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

/// Event response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub organisation_id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub language: String,
    pub starts_at: String,
    pub ends_at: Option<String>,
    pub status: String,
    pub is_featured: bool,
    pub view_count: i64,
}

impl From<event::Model> for EventResponse {
    fn from(event: event::Model) -> Self {
        Self {
            id: event.id,
            organisation_id: event.organisation_id,
            title: event.title,
            description: event.description,
            location: event.location,
            language: event.language,
            starts_at: event.starts_at.to_rfc3339(),
            ends_at: event.ends_at.map(|t| t.to_rfc3339()),
            status: event.status.as_str().to_string(),
            is_featured: event.is_featured,
            view_count: event.view_count,
        }
    }
}

/// Request naming an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdRequest {
    pub event_id: String,
}

/// Featured carousel request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRequest {
    pub limit: Option<u64>,
}

/// Public listing, soonest first.
async fn list(
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<EventResponse>>> {
    let page = state.event_service.list_public(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Featured events.
async fn featured(
    State(state): State<AppState>,
    Json(req): Json<FeaturedRequest>,
) -> AppResult<ApiResponse<PageResponse<EventResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.event_service.list_featured(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one event.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<EventIdRequest>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.get(&req.event_id).await?;

    Ok(ApiResponse::ok(event.into()))
}

/// Record a view.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<EventIdRequest>,
) -> Json<MutationOutcome> {
    Json(state.event_service.record_view(&req.event_id).await)
}

/// Announce an event.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateEventInput>,
) -> Json<MutationOutcome> {
    Json(state.event_service.create(&actor, input).await)
}

/// Delete an event.
async fn delete(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<EventIdRequest>,
) -> Json<MutationOutcome> {
    Json(state.event_service.delete(&actor, &req.event_id).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/featured", post(featured))
        .route("/show", post(show))
        .route("/view", post(view))
        .route("/create", post(create))
        .route("/delete", post(delete))
}
