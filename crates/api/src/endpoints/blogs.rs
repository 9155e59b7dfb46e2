//! Blog endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::{CreatePostInput, UpdatePostInput};
use civinet_db::entities::blog_post;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthActor, MaybeActor},
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

// ==================== Request/Response Types ====================

/// Blog post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    pub id: String,
    pub author_id: String,
    pub organisation_id: Option<String>,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub language: String,
    pub category_id: Option<String>,
    pub tags: serde_json::Value,
    pub status: String,
    pub published_at: Option<String>,
    pub moderation_status: String,
    pub is_featured: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(post: blog_post::Model) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            organisation_id: post.organisation_id,
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            language: post.language,
            category_id: post.category_id,
            tags: post.tags,
            status: post.status.as_str().to_string(),
            published_at: post.published_at.map(|t| t.to_rfc3339()),
            moderation_status: post.moderation_status.as_str().to_string(),
            is_featured: post.is_featured,
            view_count: post.view_count,
            like_count: post.like_count,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Show post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPostRequest {
    pub post_id: String,
}

/// Featured carousel request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRequest {
    pub limit: Option<u64>,
}

// ==================== Handlers ====================

/// Public listing: published and approved posts.
async fn list(
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<BlogPostResponse>>> {
    let page = state.blog_service.list_public(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Featured carousel.
async fn featured(
    State(state): State<AppState>,
    Json(req): Json<FeaturedRequest>,
) -> AppResult<ApiResponse<PageResponse<BlogPostResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.blog_service.list_featured(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one post.
async fn show(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> AppResult<ApiResponse<BlogPostResponse>> {
    let post = state.blog_service.get(actor.as_ref(), &req.post_id).await?;

    Ok(ApiResponse::ok(post.into()))
}

/// The acting member's own posts.
async fn mine(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<BlogPostResponse>>> {
    let page = state.blog_service.list_own(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Record a view.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.record_view(&req.post_id).await)
}

/// Like a post.
async fn like(
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.like(&req.post_id).await)
}

/// Withdraw a like.
async fn unlike(
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.unlike(&req.post_id).await)
}

/// Create a draft post.
async fn create(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.create(&actor, input).await)
}

/// Update a post.
async fn update(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<UpdatePostInput>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.update(&actor, input).await)
}

/// Publish a draft.
async fn publish(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.publish(&actor, &req.post_id).await)
}

/// Delete a post.
async fn delete(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ShowPostRequest>,
) -> Json<MutationOutcome> {
    Json(state.blog_service.delete(&actor, &req.post_id).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/featured", post(featured))
        .route("/show", post(show))
        .route("/mine", post(mine))
        .route("/view", post(view))
        .route("/like", post(like))
        .route("/unlike", post(unlike))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/publish", post(publish))
        .route("/delete", post(delete))
}
