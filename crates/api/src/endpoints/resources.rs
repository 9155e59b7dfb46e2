//! Resource library endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::CreateResourceInput;
use civinet_db::entities::resource;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

/// Resource response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub organisation_id: Option<String>,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub url: Option<String>,
    pub language: String,
    pub status: String,
    pub is_featured: bool,
    pub download_count: i64,
}

impl From<resource::Model> for ResourceResponse {
    fn from(resource: resource::Model) -> Self {
        Self {
            id: resource.id,
            organisation_id: resource.organisation_id,
            title: resource.title,
            description: resource.description,
            resource_type: resource.resource_type.as_str().to_string(),
            url: resource.url,
            language: resource.language,
            status: resource.status.as_str().to_string(),
            is_featured: resource.is_featured,
            download_count: resource.download_count,
        }
    }
}

/// Request naming a resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIdRequest {
    pub resource_id: String,
}

/// Featured carousel request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRequest {
    pub limit: Option<u64>,
}

/// Public listing.
async fn list(
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<ResourceResponse>>> {
    let page = state.resource_service.list_public(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Featured resources.
async fn featured(
    State(state): State<AppState>,
    Json(req): Json<FeaturedRequest>,
) -> AppResult<ApiResponse<PageResponse<ResourceResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.resource_service.list_featured(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one resource.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ResourceIdRequest>,
) -> AppResult<ApiResponse<ResourceResponse>> {
    let resource = state.resource_service.get(&req.resource_id).await?;

    Ok(ApiResponse::ok(resource.into()))
}

/// Record a download.
async fn download(
    State(state): State<AppState>,
    Json(req): Json<ResourceIdRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .resource_service
            .record_download(&req.resource_id)
            .await,
    )
}

/// Add a resource.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateResourceInput>,
) -> Json<MutationOutcome> {
    Json(state.resource_service.create(&actor, input).await)
}

/// Delete a resource.
async fn delete(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ResourceIdRequest>,
) -> Json<MutationOutcome> {
    Json(state.resource_service.delete(&actor, &req.resource_id).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/featured", post(featured))
        .route("/show", post(show))
        .route("/download", post(download))
        .route("/create", post(create))
        .route("/delete", post(delete))
}
