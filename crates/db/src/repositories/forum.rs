//! Forum repository for threads and replies.

use std::sync::Arc;

use chrono::Utc;
use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{ForumReply, ForumThread, forum_reply, forum_thread};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Repository for forum operations.
#[derive(Clone)]
pub struct ForumRepository {
    db: Arc<DatabaseConnection>,
}

impl ForumRepository {
    /// Create a new forum repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ==================== Thread Operations ====================

    /// Find a thread by ID.
    pub async fn find_thread(&self, id: &str) -> AppResult<Option<forum_thread::Model>> {
        with_timeout(
            "find forum thread",
            ForumThread::find_by_id(id).one(self.db.as_ref()),
        )
        .await
    }

    /// Get a thread by ID, returning an error if not found.
    pub async fn get_thread(&self, id: &str) -> AppResult<forum_thread::Model> {
        self.find_thread(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Forum thread not found: {id}")))
    }

    /// List publicly visible threads (approved).
    pub async fn list_threads(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_thread::Model>> {
        let base = ForumThread::find().filter(forum_thread::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List pinned threads. Approval still gates visibility.
    pub async fn list_pinned(&self, limit: u64) -> AppResult<Page<forum_thread::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = ForumThread::find().filter(forum_thread::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List threads for the back office, any moderation status.
    pub async fn list_threads_admin(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_thread::Model>> {
        list_page(self.db.as_ref(), ForumThread::find(), filter).await
    }

    /// Create a new thread.
    pub async fn create_thread(
        &self,
        model: forum_thread::ActiveModel,
    ) -> AppResult<forum_thread::Model> {
        with_timeout("insert forum thread", model.insert(self.db.as_ref())).await
    }

    /// Update a thread.
    pub async fn update_thread(
        &self,
        model: forum_thread::ActiveModel,
    ) -> AppResult<forum_thread::Model> {
        with_timeout("update forum thread", model.update(self.db.as_ref())).await
    }

    /// Lock or unlock a thread against new replies.
    pub async fn set_locked(&self, id: &str, locked: bool) -> AppResult<forum_thread::Model> {
        let thread = self.get_thread(id).await?;
        let mut model: forum_thread::ActiveModel = thread.into();
        model.is_locked = Set(locked);
        model.updated_at = Set(Some(Utc::now().into()));

        self.update_thread(model).await
    }

    /// Record one thread view atomically.
    pub async fn record_thread_view(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment thread view count",
            ForumThread::update_many()
                .col_expr(
                    forum_thread::Column::ViewCount,
                    Expr::col(forum_thread::Column::ViewCount).add(1),
                )
                .filter(forum_thread::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }

    // ==================== Reply Operations ====================

    /// Find a reply by ID.
    pub async fn find_reply(&self, id: &str) -> AppResult<Option<forum_reply::Model>> {
        with_timeout(
            "find forum reply",
            ForumReply::find_by_id(id).one(self.db.as_ref()),
        )
        .await
    }

    /// List visible replies within a thread, oldest first.
    pub async fn list_replies(
        &self,
        thread_id: &str,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_reply::Model>> {
        let base = ForumReply::find()
            .filter(forum_reply::Entity::visible())
            .filter(forum_reply::Column::ThreadId.eq(thread_id));
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List replies for the back office, any moderation status.
    pub async fn list_replies_admin(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_reply::Model>> {
        list_page(self.db.as_ref(), ForumReply::find(), filter).await
    }

    /// Create a reply and bump the thread's reply counter and activity
    /// timestamp.
    pub async fn create_reply(
        &self,
        model: forum_reply::ActiveModel,
    ) -> AppResult<forum_reply::Model> {
        let reply = with_timeout("insert forum reply", model.insert(self.db.as_ref())).await?;

        with_timeout(
            "increment reply count",
            ForumThread::update_many()
                .col_expr(
                    forum_thread::Column::ReplyCount,
                    Expr::col(forum_thread::Column::ReplyCount).add(1),
                )
                .col_expr(
                    forum_thread::Column::LastReplyAt,
                    Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(
                        Utc::now(),
                    ))),
                )
                .filter(forum_thread::Column::Id.eq(&reply.thread_id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(reply)
    }

    /// Update a reply.
    pub async fn update_reply(
        &self,
        model: forum_reply::ActiveModel,
    ) -> AppResult<forum_reply::Model> {
        with_timeout("update forum reply", model.update(self.db.as_ref())).await
    }

    /// Delete a reply and release its slot in the thread counter.
    pub async fn delete_reply(&self, id: &str) -> AppResult<u64> {
        let Some(reply) = self.find_reply(id).await? else {
            return Ok(0);
        };

        let result = with_timeout(
            "delete forum reply",
            ForumReply::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        if result.rows_affected > 0 {
            with_timeout(
                "decrement reply count",
                ForumThread::update_many()
                    .col_expr(
                        forum_thread::Column::ReplyCount,
                        Expr::cust("GREATEST(reply_count - 1, 0)"),
                    )
                    .filter(forum_thread::Column::Id.eq(&reply.thread_id))
                    .exec(self.db.as_ref()),
            )
            .await?;
        }

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::ModerationStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_thread(id: &str, title: &str) -> forum_thread::Model {
        forum_thread::Model {
            id: id.to_string(),
            author_id: "user1".to_string(),
            category: "general".to_string(),
            title: title.to_string(),
            content: "Opening post".to_string(),
            tags: serde_json::json!([]),
            language: "English".to_string(),
            is_locked: false,
            is_pinned: false,
            moderation_status: ModerationStatus::Approved,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            view_count: 0,
            like_count: 0,
            reply_count: 0,
            last_reply_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_reply(id: &str, thread_id: &str) -> forum_reply::Model {
        forum_reply::Model {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            author_id: "user2".to_string(),
            content: "A reply".to_string(),
            moderation_status: ModerationStatus::Pending,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            like_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_thread() {
        let thread = create_test_thread("t1", "Funding opportunities");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[thread.clone()]])
                .into_connection(),
        );

        let repo = ForumRepository::new(db);
        let result = repo.get_thread("t1").await.unwrap();

        assert_eq!(result.title, "Funding opportunities");
    }

    #[tokio::test]
    async fn test_create_reply_bumps_thread_counters() {
        let reply = create_test_reply("r1", "t1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[reply.clone()]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = ForumRepository::new(db);
        let model: forum_reply::ActiveModel = reply.into();
        let created = repo.create_reply(model).await.unwrap();

        assert_eq!(created.thread_id, "t1");
    }

    #[tokio::test]
    async fn test_delete_missing_reply_is_zero_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<forum_reply::Model>::new()])
                .into_connection(),
        );

        let repo = ForumRepository::new(db);
        let rows = repo.delete_reply("missing").await.unwrap();

        assert_eq!(rows, 0);
    }
}
