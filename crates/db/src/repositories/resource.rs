//! Resource library repository.

use std::sync::Arc;

use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{Resource, resource};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Repository for resource operations.
#[derive(Clone)]
pub struct ResourceRepository {
    db: Arc<DatabaseConnection>,
}

impl ResourceRepository {
    /// Create a new resource repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a resource by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<resource::Model>> {
        with_timeout(
            "find resource",
            Resource::find_by_id(id).one(self.db.as_ref()),
        )
        .await
    }

    /// Get a resource by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<resource::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource not found: {id}")))
    }

    /// List published resources.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<resource::Model>> {
        let base = Resource::find().filter(resource::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List featured resources.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<resource::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = Resource::find().filter(resource::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List resources for the back office, any status.
    pub async fn list_admin(&self, filter: &ContentFilter) -> AppResult<Page<resource::Model>> {
        list_page(self.db.as_ref(), Resource::find(), filter).await
    }

    /// Create a new resource.
    pub async fn create(&self, model: resource::ActiveModel) -> AppResult<resource::Model> {
        with_timeout("insert resource", model.insert(self.db.as_ref())).await
    }

    /// Update a resource.
    pub async fn update(&self, model: resource::ActiveModel) -> AppResult<resource::Model> {
        with_timeout("update resource", model.update(self.db.as_ref())).await
    }

    /// Delete a resource. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete resource",
            Resource::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// Record one download atomically.
    pub async fn record_download(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment download count",
            Resource::update_many()
                .col_expr(
                    resource::Column::DownloadCount,
                    Expr::col(resource::Column::DownloadCount).add(1),
                )
                .filter(resource::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }
}
