//! Organisation directory endpoints.

use axum::{Json, Router, extract::State, routing::post};
use civinet_common::{AppResult, MutationOutcome};
use civinet_core::{RegisterOrganisationInput, UpdateOrganisationInput};
use civinet_db::entities::{organisation, profile};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::CountryStat;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthActor, MaybeActor},
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

// ==================== Request/Response Types ====================

/// Organisation response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub countries: serde_json::Value,
    pub thematic_areas: serde_json::Value,
    pub status: String,
    pub moderation_status: String,
    pub is_featured: bool,
    pub view_count: i64,
    pub created_at: String,
}

impl From<organisation::Model> for OrganisationResponse {
    fn from(org: organisation::Model) -> Self {
        Self {
            id: org.id,
            name: org.name,
            slug: org.slug,
            description: org.description,
            website: org.website,
            countries: org.countries,
            thematic_areas: org.thematic_areas,
            status: org.status.as_str().to_string(),
            moderation_status: org.moderation_status.as_str().to_string(),
            is_featured: org.is_featured,
            view_count: org.view_count,
            created_at: org.created_at.to_rfc3339(),
        }
    }
}

/// Organisation member response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
}

impl From<profile::Model> for MemberResponse {
    fn from(member: profile::Model) -> Self {
        Self {
            id: member.id,
            display_name: member.display_name,
            role: member.role.as_str().to_string(),
        }
    }
}

/// Country statistics response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStatResponse {
    pub country: String,
    pub organisation_count: i64,
}

impl From<CountryStat> for CountryStatResponse {
    fn from(stat: CountryStat) -> Self {
        Self {
            country: stat.country,
            organisation_count: stat.organisation_count,
        }
    }
}

/// Show organisation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowOrganisationRequest {
    pub slug: String,
}

/// Request naming an organisation by ID.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationIdRequest {
    pub organisation_id: String,
}

/// Featured carousel request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRequest {
    pub limit: Option<u64>,
}

// ==================== Handlers ====================

/// Public directory listing.
async fn list(
    State(state): State<AppState>,
    Json(filter): Json<ContentFilter>,
) -> AppResult<ApiResponse<PageResponse<OrganisationResponse>>> {
    let page = state.organisation_service.list_directory(&filter).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Featured organisations.
async fn featured(
    State(state): State<AppState>,
    Json(req): Json<FeaturedRequest>,
) -> AppResult<ApiResponse<PageResponse<OrganisationResponse>>> {
    let limit = req.limit.unwrap_or(state.featured_limit);
    let page = state.organisation_service.list_featured(limit).await?;

    Ok(ApiResponse::ok(PageResponse::from_page(page, Into::into)))
}

/// Show one organisation.
async fn show(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(req): Json<ShowOrganisationRequest>,
) -> AppResult<ApiResponse<OrganisationResponse>> {
    let org = state
        .organisation_service
        .get_by_slug(actor.as_ref(), &req.slug)
        .await?;

    Ok(ApiResponse::ok(org.into()))
}

/// Record a profile view.
async fn view(
    State(state): State<AppState>,
    Json(req): Json<OrganisationIdRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .organisation_service
            .record_view(&req.organisation_id)
            .await,
    )
}

/// Organisation members, for the dashboard.
async fn members(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<OrganisationIdRequest>,
) -> AppResult<ApiResponse<Vec<MemberResponse>>> {
    let members = state
        .organisation_service
        .members(&actor, &req.organisation_id)
        .await?;

    Ok(ApiResponse::ok(
        members.into_iter().map(Into::into).collect(),
    ))
}

/// Organisations per country.
async fn country_stats(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CountryStatResponse>>> {
    let stats = state.organisation_service.country_stats().await?;

    Ok(ApiResponse::ok(stats.into_iter().map(Into::into).collect()))
}

/// Register a new organisation.
async fn register(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<RegisterOrganisationInput>,
) -> Json<MutationOutcome> {
    Json(state.organisation_service.register(&actor, input).await)
}

/// Update an organisation profile.
async fn update(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<UpdateOrganisationInput>,
) -> Json<MutationOutcome> {
    Json(state.organisation_service.update(&actor, input).await)
}

/// Deactivate an organisation.
async fn deactivate(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(req): Json<OrganisationIdRequest>,
) -> Json<MutationOutcome> {
    Json(
        state
            .organisation_service
            .deactivate(&actor, &req.organisation_id)
            .await,
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/featured", post(featured))
        .route("/show", post(show))
        .route("/view", post(view))
        .route("/members", post(members))
        .route("/stats/countries", post(country_stats))
        .route("/register", post(register))
        .route("/update", post(update))
        .route("/deactivate", post(deactivate))
}
