//! Project endpoints for the member dashboard.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::{CreateProjectInput, UpdateProjectInput};
use civinet_db::entities::project;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

/// Project response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub organisation_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<project::Model> for ProjectResponse {
    fn from(project: project::Model) -> Self {
        Self {
            id: project.id,
            organisation_id: project.organisation_id,
            title: project.title,
            summary: project.summary,
            status: project.status.as_str().to_string(),
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Delete project request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    pub project_id: String,
}

/// Dashboard project listing.
async fn list(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<ProjectResponse>>> {
    let page = state.project_service.list(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Create a project.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> Json<MutationOutcome> {
    Json(state.project_service.create(&actor, input).await)
}

/// Update a project.
async fn update(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<UpdateProjectInput>,
) -> Json<MutationOutcome> {
    Json(state.project_service.update(&actor, input).await)
}

/// Delete a project.
async fn delete(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<DeleteProjectRequest>,
) -> Json<MutationOutcome> {
    Json(state.project_service.delete(&actor, &req.project_id).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/delete", post(delete))
}
