//! Organisation repository.

use std::sync::Arc;

use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, Statement,
};
use serde::Serialize;

use crate::entities::{Organisation, organisation};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Number of organisations operating in one country.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct CountryStat {
    /// Country name as stored in the `countries` array.
    pub country: String,
    /// Organisations active there.
    pub organisation_count: i64,
}

/// Repository for organisation operations.
#[derive(Clone)]
pub struct OrganisationRepository {
    db: Arc<DatabaseConnection>,
}

impl OrganisationRepository {
    /// Create a new organisation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an organisation by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<organisation::Model>> {
        with_timeout(
            "find organisation",
            Organisation::find_by_id(id).one(self.db.as_ref()),
        )
        .await
    }

    /// Get an organisation by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<organisation::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Organisation not found: {id}")))
    }

    /// Find an organisation by its directory slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<organisation::Model>> {
        with_timeout(
            "find organisation by slug",
            Organisation::find()
                .filter(organisation::Column::Slug.eq(slug))
                .one(self.db.as_ref()),
        )
        .await
    }

    /// Get an organisation by slug, returning an error if not found.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<organisation::Model> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Organisation not found: {slug}")))
    }

    /// List the public directory (active and approved).
    pub async fn list_public(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<organisation::Model>> {
        let base = Organisation::find().filter(organisation::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List featured organisations, approval-gated.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<organisation::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = Organisation::find().filter(organisation::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List organisations for the back office, any status.
    pub async fn list_admin(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<organisation::Model>> {
        list_page(self.db.as_ref(), Organisation::find(), filter).await
    }

    /// Create a new organisation.
    pub async fn create(
        &self,
        model: organisation::ActiveModel,
    ) -> AppResult<organisation::Model> {
        with_timeout("insert organisation", model.insert(self.db.as_ref())).await
    }

    /// Update an organisation.
    pub async fn update(
        &self,
        model: organisation::ActiveModel,
    ) -> AppResult<organisation::Model> {
        with_timeout("update organisation", model.update(self.db.as_ref())).await
    }

    /// Record one profile view atomically.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment view count",
            Organisation::update_many()
                .col_expr(
                    organisation::Column::ViewCount,
                    Expr::col(organisation::Column::ViewCount).add(1),
                )
                .filter(organisation::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }

    /// Count publicly visible organisations per country. One grouped query
    /// over the unnested `countries` array; only active, approved
    /// organisations contribute.
    pub async fn country_stats(&self) -> AppResult<Vec<CountryStat>> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            "SELECT jsonb_array_elements_text(countries) AS country, \
             COUNT(*)::bigint AS organisation_count \
             FROM organisation \
             WHERE status = 'active' AND moderation_status = 'approved' \
             GROUP BY country \
             ORDER BY organisation_count DESC, country ASC"
                .to_string(),
        );

        with_timeout(
            "aggregate country stats",
            CountryStat::find_by_statement(stmt).all(self.db.as_ref()),
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::{ModerationStatus, organisation::OrganisationStatus};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_org(id: &str, name: &str, slug: &str) -> organisation::Model {
        organisation::Model {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            website: None,
            countries: serde_json::json!(["Kenya"]),
            thematic_areas: serde_json::json!(["education"]),
            status: OrganisationStatus::Active,
            moderation_status: ModerationStatus::Approved,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            is_featured: false,
            view_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let org = create_test_org("org1", "Water Aid Collective", "water-aid-collective");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[org.clone()]])
                .into_connection(),
        );

        let repo = OrganisationRepository::new(db);
        let result = repo.find_by_slug("water-aid-collective").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "Water Aid Collective");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<organisation::Model>::new()])
                .into_connection(),
        );

        let repo = OrganisationRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
