//! Profile repository.

use std::sync::Arc;

use chrono::Utc;
use civinet_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{Profile, profile};
use crate::store::with_timeout;

/// Repository for profile operations.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a profile by user ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<profile::Model>> {
        with_timeout("find profile", Profile::find_by_id(id).one(self.db.as_ref())).await
    }

    /// Get a profile by user ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<profile::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile not found: {id}")))
    }

    /// Create a new profile.
    pub async fn create(&self, model: profile::ActiveModel) -> AppResult<profile::Model> {
        with_timeout("insert profile", model.insert(self.db.as_ref())).await
    }

    /// Update a profile.
    pub async fn update(&self, model: profile::ActiveModel) -> AppResult<profile::Model> {
        with_timeout("update profile", model.update(self.db.as_ref())).await
    }

    /// Point a profile at an organisation (or detach it with `None`).
    /// Returns the number of rows touched.
    pub async fn link_organisation(
        &self,
        user_id: &str,
        organisation_id: Option<&str>,
    ) -> AppResult<u64> {
        let result = with_timeout(
            "link profile to organisation",
            Profile::update_many()
                .col_expr(
                    profile::Column::OrganisationId,
                    Expr::value(organisation_id.map(String::from)),
                )
                .col_expr(
                    profile::Column::UpdatedAt,
                    Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(
                        Utc::now(),
                    ))),
                )
                .filter(profile::Column::Id.eq(user_id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// List members of an organisation, alphabetically.
    pub async fn members_of(&self, organisation_id: &str) -> AppResult<Vec<profile::Model>> {
        with_timeout(
            "list organisation members",
            Profile::find()
                .filter(profile::Column::OrganisationId.eq(organisation_id))
                .order_by_asc(profile::Column::DisplayName)
                .all(self.db.as_ref()),
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::profile::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_profile(id: &str, name: &str) -> profile::Model {
        profile::Model {
            id: id.to_string(),
            display_name: name.to_string(),
            role: UserRole::CsoRep,
            organisation_id: None,
            locale: "en".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let profile = create_test_profile("user1", "Amina");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[profile.clone()]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.find_by_id("user1").await.unwrap();

        assert_eq!(result.unwrap().display_name, "Amina");
    }

    #[tokio::test]
    async fn test_link_organisation_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let rows = repo.link_organisation("user1", Some("org1")).await.unwrap();

        assert_eq!(rows, 1);
    }
}
