//! Course repository.

use std::sync::Arc;

use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{Course, course};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Repository for course operations.
#[derive(Clone)]
pub struct CourseRepository {
    db: Arc<DatabaseConnection>,
}

impl CourseRepository {
    /// Create a new course repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<course::Model>> {
        with_timeout("find course", Course::find_by_id(id).one(self.db.as_ref())).await
    }

    /// Get a course by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<course::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course not found: {id}")))
    }

    /// List published courses.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<course::Model>> {
        let base = Course::find().filter(course::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List featured courses.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<course::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = Course::find().filter(course::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List courses for the back office, any status.
    pub async fn list_admin(&self, filter: &ContentFilter) -> AppResult<Page<course::Model>> {
        list_page(self.db.as_ref(), Course::find(), filter).await
    }

    /// Create a new course.
    pub async fn create(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        with_timeout("insert course", model.insert(self.db.as_ref())).await
    }

    /// Update a course.
    pub async fn update(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        with_timeout("update course", model.update(self.db.as_ref())).await
    }

    /// Delete a course. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete course",
            Course::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// Record one view atomically.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment view count",
            Course::update_many()
                .col_expr(
                    course::Column::ViewCount,
                    Expr::col(course::Column::ViewCount).add(1),
                )
                .filter(course::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }
}
