//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_profile_table;
mod m20250301_000002_create_organisation_table;
mod m20250301_000003_link_profile_to_organisation;
mod m20250301_000004_create_blog_post_table;
mod m20250301_000005_create_forum_tables;
mod m20250301_000006_create_catalog_tables;
mod m20250301_000007_create_project_table;
mod m20250301_000008_create_affiliation_request_table;
mod m20250301_000009_create_contact_submission_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_profile_table::Migration),
            Box::new(m20250301_000002_create_organisation_table::Migration),
            Box::new(m20250301_000003_link_profile_to_organisation::Migration),
            Box::new(m20250301_000004_create_blog_post_table::Migration),
            Box::new(m20250301_000005_create_forum_tables::Migration),
            Box::new(m20250301_000006_create_catalog_tables::Migration),
            Box::new(m20250301_000007_create_project_table::Migration),
            Box::new(m20250301_000008_create_affiliation_request_table::Migration),
            Box::new(m20250301_000009_create_contact_submission_table::Migration),
        ]
    }
}
