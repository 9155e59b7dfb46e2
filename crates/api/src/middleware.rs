//! API middleware.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use civinet_common::{Actor, Config, Role};
use civinet_core::{
    AffiliationService, BlogService, ContactService, CourseService, EventService, ForumService,
    ModerationService, OrganisationService, ProfileService, ProjectService, ResourceService,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Claims carried by the identity provider's session token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// User ID.
    sub: String,
    /// Platform role.
    role: String,
    /// Affiliated organisation, when the user has one.
    #[serde(default)]
    org: Option<String>,
    /// Expiry, validated by the library.
    #[allow(dead_code)]
    exp: usize,
}

/// Verifies session tokens minted by the external identity provider.
#[derive(Clone)]
pub struct AuthVerifier {
    key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl AuthVerifier {
    /// Build a verifier from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.auth.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: Arc::new(DecodingKey::from_secret(
                config.auth.token_secret.as_bytes(),
            )),
            validation: Arc::new(validation),
        }
    }

    /// Decode a bearer token into an [`Actor`]. Tokens with unknown roles
    /// are rejected, not defaulted.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Actor> {
        let claims = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .ok()?
            .claims;

        let role = Role::parse(&claims.role)?;

        Some(Actor {
            user_id: claims.sub,
            role,
            organisation_id: claims.org,
        })
    }
}

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub blog_service: BlogService,
    pub forum_service: ForumService,
    pub organisation_service: OrganisationService,
    pub event_service: EventService,
    pub course_service: CourseService,
    pub resource_service: ResourceService,
    pub project_service: ProjectService,
    pub profile_service: ProfileService,
    pub affiliation_service: AffiliationService,
    pub moderation_service: ModerationService,
    pub contact_service: ContactService,
    pub auth: AuthVerifier,
    /// Rows in featured carousels.
    pub featured_limit: u64,
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Some(actor) = state.auth.verify(token)
    {
        req.extensions_mut().insert(actor);
    }

    next.run(req).await
}
