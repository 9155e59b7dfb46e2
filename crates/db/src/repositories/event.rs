//! Event repository.

use std::sync::Arc;

use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{Event, event};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Repository for event operations.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<event::Model>> {
        with_timeout("find event", Event::find_by_id(id).one(self.db.as_ref())).await
    }

    /// Get an event by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event not found: {id}")))
    }

    /// List published events, soonest first.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<event::Model>> {
        let base = Event::find().filter(event::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List featured events for the homepage carousel.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<event::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = Event::find().filter(event::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List events for the back office, any status.
    pub async fn list_admin(&self, filter: &ContentFilter) -> AppResult<Page<event::Model>> {
        list_page(self.db.as_ref(), Event::find(), filter).await
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        with_timeout("insert event", model.insert(self.db.as_ref())).await
    }

    /// Update an event.
    pub async fn update(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        with_timeout("update event", model.update(self.db.as_ref())).await
    }

    /// Delete an event. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete event",
            Event::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// Record one view atomically.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment view count",
            Event::update_many()
                .col_expr(
                    event::Column::ViewCount,
                    Expr::col(event::Column::ViewCount).add(1),
                )
                .filter(event::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }
}
