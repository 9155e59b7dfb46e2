//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session token verification.
    pub auth: AuthConfig,
    /// Content listing defaults.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Verification settings for session tokens minted by the external identity
/// provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for token signatures.
    pub token_secret: String,
    /// Expected token issuer, when the provider sets one.
    #[serde(default)]
    pub issuer: Option<String>,
}

/// Listing defaults for public content.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Default rows per page when a listing request omits a limit.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Rows in featured carousels.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            featured_limit: default_featured_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_page_size() -> u64 {
    12
}

const fn default_featured_limit() -> u64 {
    6
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `CIVINET_ENV`)
    /// 3. Environment variables with `CIVINET_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("CIVINET_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CIVINET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("CIVINET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
