//! Forum endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::{CreateReplyInput, CreateThreadInput};
use civinet_db::entities::{forum_reply, forum_thread};
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthActor, MaybeActor},
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

// ==================== Request/Response Types ====================

/// Forum thread response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub id: String,
    pub author_id: String,
    pub category: String,
    pub title: String,
    pub content: String,
    pub tags: serde_json::Value,
    pub language: String,
    pub is_locked: bool,
    pub is_pinned: bool,
    pub moderation_status: String,
    pub view_count: i64,
    pub like_count: i64,
    pub reply_count: i64,
    pub last_reply_at: Option<String>,
    pub created_at: String,
}

impl From<forum_thread::Model> for ThreadResponse {
    fn from(thread: forum_thread::Model) -> Self {
        Self {
            id: thread.id,
            author_id: thread.author_id,
            category: thread.category,
            title: thread.title,
            content: thread.content,
            tags: thread.tags,
            language: thread.language,
            is_locked: thread.is_locked,
            is_pinned: thread.is_pinned,
            moderation_status: thread.moderation_status.as_str().to_string(),
            view_count: thread.view_count,
            like_count: thread.like_count,
            reply_count: thread.reply_count,
            last_reply_at: thread.last_reply_at.map(|t| t.to_rfc3339()),
            created_at: thread.created_at.to_rfc3339(),
        }
    }
}

/// Forum reply response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    pub content: String,
    pub moderation_status: String,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<forum_reply::Model> for ReplyResponse {
    fn from(reply: forum_reply::Model) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            author_id: reply.author_id,
            content: reply.content,
            moderation_status: reply.moderation_status.as_str().to_string(),
            like_count: reply.like_count,
            created_at: reply.created_at.to_rfc3339(),
            updated_at: reply.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Show thread request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowThreadRequest {
    pub thread_id: String,
}

/// Pinned threads request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRequest {
    pub limit: Option<u64>,
}

/// List replies request: the thread plus the common filter fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepliesRequest {
    pub thread_id: String,
    #[serde(flatten)]
    pub filter: ContentFilter,
}

/// Lock/unlock request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockThreadRequest {
    pub thread_id: String,
    pub locked: bool,
}

/// Delete reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReplyRequest {
    pub reply_id: String,
}

// ==================== Handlers ====================

/// Public thread listing.
async fn list_threads(
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<ThreadResponse>>> {
    let page = state.forum_service.list_threads(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Pinned threads.
async fn pinned(
    State(state): State<AppState>,
    Json(req): Json<PinnedRequest>,
) -> AppResult<ApiResponse<PageResponse<ThreadResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.forum_service.list_pinned(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one thread.
async fn show_thread(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(req): Json<ShowThreadRequest>,
) -> AppResult<ApiResponse<ThreadResponse>> {
    let thread = state
        .forum_service
        .get_thread(actor.as_ref(), &req.thread_id)
        .await?;

    Ok(ApiResponse::ok(thread.into()))
}

/// Record a thread view.
async fn view_thread(
    State(state): State<AppState>,
    Json(req): Json<ShowThreadRequest>,
) -> Json<MutationOutcome> {
    Json(state.forum_service.record_view(&req.thread_id).await)
}

/// Open a thread.
async fn create_thread(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateThreadInput>,
) -> Json<MutationOutcome> {
    Json(state.forum_service.create_thread(&actor, input).await)
}

/// Lock or unlock a thread.
async fn lock_thread(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<LockThreadRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .forum_service
            .set_locked(&actor, &req.thread_id, req.locked)
            .await,
    )
}

/// Replies within a thread.
async fn list_replies(
    State(state): State<AppState>,
    Json(req): Json<ListRepliesRequest>,
) -> AppResult<ApiResponse<PageResponse<ReplyResponse>>> {
    let page = state
        .forum_service
        .list_replies(&req.thread_id, &req.filter)
        .await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Post a reply.
async fn create_reply(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateReplyInput>,
) -> Json<MutationOutcome> {
    Json(state.forum_service.create_reply(&actor, input).await)
}

/// Delete a reply.
async fn delete_reply(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<DeleteReplyRequest>,
) -> Json<MutationOutcome> {
    Json(state.forum_service.delete_reply(&actor, &req.reply_id).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/threads/list", post(list_threads))
        .route("/threads/pinned", post(pinned))
        .route("/threads/show", post(show_thread))
        .route("/threads/view", post(view_thread))
        .route("/threads/create", post(create_thread))
        .route("/threads/lock", post(lock_thread))
        .route("/replies/list", post(list_replies))
        .route("/replies/create", post(create_reply))
        .route("/replies/delete", post(delete_reply))
}
