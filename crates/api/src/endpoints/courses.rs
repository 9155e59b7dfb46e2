//! Course endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::CreateCourseInput;
use civinet_db::entities::course;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

/// Course response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub organisation_id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub enrol_url: Option<String>,
    pub status: String,
    pub is_featured: bool,
    pub view_count: i64,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            organisation_id: course.organisation_id,
            title: course.title,
            description: course.description,
            language: course.language,
            enrol_url: course.enrol_url,
            status: course.status.as_str().to_string(),
            is_featured: course.is_featured,
            view_count: course.view_count,
        }
    }
}

/// Request naming a course.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseIdRequest {
    pub course_id: String,
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
) -> AppResult<ApiResponse<PageResponse<CourseResponse>>> {
    let page = state.course_service.list_public(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Featured courses.
async fn featured(
    State(state): State<AppState>,
    Json(req): Json<FeaturedRequest>,
) -> AppResult<ApiResponse<PageResponse<CourseResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.course_service.list_featured(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one course.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<CourseIdRequest>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let course = state.course_service.get(&req.course_id).await?;

    Ok(ApiResponse::ok(course.into()))
}

/// Record a view.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<CourseIdRequest>,
) -> Json<MutationOutcome> {
    Json(state.course_service.record_view(&req.course_id).await)
}

/// Offer a course.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateCourseInput>,
) -> Json<MutationOutcome> {
    Json(state.course_service.create(&actor, input).await)
}

/// Delete a course.
async fn delete(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<CourseIdRequest>,
) -> Json<MutationOutcome> {
    Json(state.course_service.delete(&actor, &req.course_id).await)
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
