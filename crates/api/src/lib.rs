//! HTTP API layer for civinet.
//!
//! This crate exposes the platform core to UI collaborators:
//!
//! - **Endpoints**: public listings, the member dashboard and the admin
//!   back office
//! - **Extractors**: the authenticated [`civinet_common::Actor`]
//! - **Middleware**: session-token verification against the external
//!   identity provider
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, AuthVerifier};
