//! Civinet server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use civinet_api::{AppState, AuthVerifier, router as api_router};
use civinet_common::Config;
use civinet_core::{
    AffiliationService, BlogService, ContactService, CourseService, EventService, ForumService,
    ModerationService, OrganisationService, ProfileService, ProjectService, ResourceService,
};
use civinet_db::repositories::{
    BlogRepository, ContactRepository, CourseRepository, EventRepository, ForumRepository,
    ModerationRepository, OrganisationRepository, ProfileRepository, ProjectRepository,
    ResourceRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civinet=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting civinet server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = civinet_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    civinet_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let blog_repo = BlogRepository::new(Arc::clone(&db));
    let forum_repo = ForumRepository::new(Arc::clone(&db));
    let organisation_repo = OrganisationRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let course_repo = CourseRepository::new(Arc::clone(&db));
    let resource_repo = ResourceRepository::new(Arc::clone(&db));
    let project_repo = ProjectRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let contact_repo = ContactRepository::new(Arc::clone(&db));
    let moderation_repo = ModerationRepository::new(Arc::clone(&db));

    // Initialize services
    let blog_service = BlogService::new(blog_repo);
    let forum_service = ForumService::new(forum_repo);
    let organisation_service =
        OrganisationService::new(organisation_repo, profile_repo.clone());
    let event_service = EventService::new(event_repo);
    let course_service = CourseService::new(course_repo);
    let resource_service = ResourceService::new(resource_repo);
    let project_service = ProjectService::new(project_repo);
    let profile_service = ProfileService::new(profile_repo);
    let affiliation_service = AffiliationService::new(Arc::clone(&db));
    let moderation_service = ModerationService::new(moderation_repo);
    let contact_service = ContactService::new(contact_repo);

    // Create app state
    let state = AppState {
        blog_service,
        forum_service,
        organisation_service,
        event_service,
        course_service,
        resource_service,
        project_service,
        profile_service,
        affiliation_service,
        moderation_service,
        contact_service,
        auth: AuthVerifier::new(&config),
        featured_limit: config.content.featured_limit,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            civinet_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
