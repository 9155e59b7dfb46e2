//! API endpoints.

mod admin;
mod affiliations;
mod blogs;
mod contact;
mod courses;
mod events;
mod forum;
mod organisations;
mod profiles;
mod projects;
mod resources;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/blogs", blogs::router())
        .nest("/forum", forum::router())
        .nest("/organisations", organisations::router())
        .nest("/events", events::router())
        .nest("/courses", courses::router())
        .nest("/resources", resources::router())
        .nest("/projects", projects::router())
        .nest("/affiliations", affiliations::router())
        .nest("/profiles", profiles::router())
        .nest("/contact", contact::router())
        .nest("/admin", admin::router())
}
