//! Session token verification against the external identity provider's
//! token format.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use civinet_api::AuthVerifier;
use civinet_common::Role;
use civinet_common::config::{AuthConfig, Config, ContentConfig, DatabaseConfig, ServerConfig};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

fn test_config(secret: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/civinet".to_string(),
            max_connections: 5,
            min_connections: 1,
        },
        auth: AuthConfig {
            token_secret: secret.to_string(),
            issuer: None,
        },
        content: ContentConfig::default(),
    }
}

fn token_with(secret: &str, claims: &serde_json::Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn future_exp() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

#[test]
fn valid_token_yields_actor() {
    let verifier = AuthVerifier::new(&test_config("s3cret"));
    let token = token_with(
        "s3cret",
        &json!({"sub": "user1", "role": "cso_rep", "org": "org1", "exp": future_exp()}),
    );

    let actor = verifier.verify(&token).expect("token should verify");

    assert_eq!(actor.user_id, "user1");
    assert_eq!(actor.role, Role::CsoRep);
    assert_eq!(actor.organisation_id.as_deref(), Some("org1"));
}

#[test]
fn admin_token_without_org() {
    let verifier = AuthVerifier::new(&test_config("s3cret"));
    let token = token_with(
        "s3cret",
        &json!({"sub": "admin1", "role": "admin", "exp": future_exp()}),
    );

    let actor = verifier.verify(&token).expect("token should verify");

    assert_eq!(actor.role, Role::Admin);
    assert!(actor.organisation_id.is_none());
}

#[test]
fn wrong_secret_is_rejected() {
    let verifier = AuthVerifier::new(&test_config("s3cret"));
    let token = token_with(
        "other-secret",
        &json!({"sub": "user1", "role": "cso_rep", "exp": future_exp()}),
    );

    assert!(verifier.verify(&token).is_none());
}

#[test]
fn unknown_role_is_rejected_not_defaulted() {
    let verifier = AuthVerifier::new(&test_config("s3cret"));
    let token = token_with(
        "s3cret",
        &json!({"sub": "user1", "role": "superuser", "exp": future_exp()}),
    );

    assert!(verifier.verify(&token).is_none());
}

#[test]
fn expired_token_is_rejected() {
    let verifier = AuthVerifier::new(&test_config("s3cret"));
    let token = token_with(
        "s3cret",
        &json!({"sub": "user1", "role": "cso_rep", "exp": chrono::Utc::now().timestamp() - 3600}),
    );

    assert!(verifier.verify(&token).is_none());
}
