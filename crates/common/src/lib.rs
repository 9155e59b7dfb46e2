//! Common utilities and shared types for civinet.
//!
//! This crate provides foundational components used across all civinet crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Pagination**: The listing envelope via [`Page`] and [`PageRequest`]
//! - **Mutation results**: The non-throwing write result via [`MutationOutcome`]
//! - **Request context**: The authenticated caller via [`Actor`] and [`Role`]
//!
//! # Example
//!
//! ```no_run
//! use civinet_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod id;
pub mod outcome;
pub mod pagination;

pub use actor::{Actor, Role};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use outcome::MutationOutcome;
pub use pagination::{Page, PageRequest};
