//! Admin/back-office endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppError, AppResult, MutationOutcome};
use civinet_core::{ContentKind, ModerateInput, ModerationStatus};
use civinet_db::entities::contact_submission;
use civinet_db::listing::ContentFilter;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::blogs::BlogPostResponse,
    endpoints::forum::{ReplyResponse, ThreadResponse},
    endpoints::organisations::OrganisationResponse,
    extractors::AuthActor,
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

// ==================== Request/Response Types ====================

/// Moderation decision request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateRequest {
    /// `"blog_post"`, `"forum_thread"`, `"forum_reply"` or
    /// `"organisation"`.
    pub kind: String,
    pub content_id: String,
    /// Target moderation status.
    pub status: String,
    pub notes: Option<String>,
}

/// Request naming one piece of content.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub kind: String,
    pub content_id: String,
}

/// Organisation approval request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveOrganisationRequest {
    pub organisation_id: String,
}

/// Contact inbox request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInboxRequest {
    #[serde(default)]
    pub unread_only: bool,
    #[serde(flatten)]
    pub filter: ContentFilter,
}

/// Mark-read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub submission_id: String,
}

/// Contact submission response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<contact_submission::Model> for ContactSubmissionResponse {
    fn from(submission: contact_submission::Model) -> Self {
        Self {
            id: submission.id,
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            is_read: submission.is_read,
            created_at: submission.created_at.to_rfc3339(),
        }
    }
}

/// Unread badge response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: u64,
}

fn parse_kind(kind: &str) -> AppResult<ContentKind> {
    ContentKind::parse(kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown content kind: {kind}")))
}

// ==================== Handlers ====================

/// Apply a moderation decision to any moderatable content.
async fn moderate(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ModerateRequest>,
) -> AppResult<Json<MutationOutcome>> {
    let kind = parse_kind(&req.kind)?;
    let new_status = ModerationStatus::parse(&req.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown moderation status: {}", req.status)))?;

    let outcome = state
        .moderation_service
        .moderate(
            &actor,
            ModerateInput {
                kind,
                content_id: req.content_id,
                new_status,
                notes: req.notes,
            },
        )
        .await;

    Ok(Json(outcome))
}

/// Flip the featured flag on any content that has one.
async fn toggle_featured(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ContentRequest>,
) -> AppResult<Json<MutationOutcome>> {
    let kind = parse_kind(&req.kind)?;
    let outcome = state
        .moderation_service
        .toggle_featured(&actor, kind, &req.content_id)
        .await;

    Ok(Json(outcome))
}

/// Hard-delete content.
async fn delete_content(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ContentRequest>,
) -> AppResult<Json<MutationOutcome>> {
    let kind = parse_kind(&req.kind)?;
    let outcome = state
        .moderation_service
        .delete(&actor, kind, &req.content_id)
        .await;

    Ok(Json(outcome))
}

/// Approve a pending organisation.
async fn approve_organisation(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ApproveOrganisationRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .organisation_service
            .approve(&actor, &req.organisation_id)
            .await,
    )
}

/// Blog posts across all statuses.
async fn list_blogs(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<BlogPostResponse>>> {
    let page = state.blog_service.list_admin(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Threads across all moderation states.
async fn list_threads(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<ThreadResponse>>> {
    let page = state.forum_service.list_threads_admin(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Replies across all moderation states.
async fn list_replies(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<ReplyResponse>>> {
    let page = state.forum_service.list_replies_admin(&actor, &filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Organisations across all statuses.
async fn list_organisations(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<OrganisationResponse>>> {
    let page = state
        .organisation_service
        .list_admin(&actor, &filter)
        .await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Contact inbox.
async fn contact_inbox(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<ContactInboxRequest>,
) -> AppResult<ApiResponse<PageResponse<ContactSubmissionResponse>>> {
    let page = state
        .contact_service
        .list(&actor, &req.filter, req.unread_only)
        .await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Mark a contact submission read.
async fn contact_mark_read(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .contact_service
            .mark_read(&actor, &req.submission_id)
            .await,
    )
}

/// Unread contact submissions count.
async fn contact_unread_count(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state.contact_service.count_unread(&actor).await?;

    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/moderate", post(moderate))
        .route("/toggle-featured", post(toggle_featured))
        .route("/delete-content", post(delete_content))
        .route("/organisations/approve", post(approve_organisation))
        .route("/organisations/list", post(list_organisations))
        .route("/blogs/list", post(list_blogs))
        .route("/threads/list", post(list_threads))
        .route("/replies/list", post(list_replies))
        .route("/contact/list", post(contact_inbox))
        .route("/contact/mark-read", post(contact_mark_read))
        .route("/contact/unread-count", post(contact_unread_count))
}
