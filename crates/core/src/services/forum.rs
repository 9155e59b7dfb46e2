//! Forum service for threads and replies.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{ModerationStatus, forum_reply, forum_thread};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::ForumRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for opening a thread.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadInput {
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for posting a reply.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyInput {
    pub thread_id: String,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

/// Forum service.
#[derive(Clone)]
pub struct ForumService {
    repo: ForumRepository,
}

impl ForumService {
    /// Create a new forum service.
    #[must_use]
    pub const fn new(repo: ForumRepository) -> Self {
        Self { repo }
    }

    // ==================== Threads ====================

    /// Public thread listing, approved threads only.
    pub async fn list_threads(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_thread::Model>> {
        self.repo.list_threads(filter).await
    }

    /// Pinned threads, approval-gated.
    pub async fn list_pinned(&self, limit: u64) -> AppResult<Page<forum_thread::Model>> {
        self.repo.list_pinned(limit).await
    }

    /// Back-office thread listing across all moderation states.
    pub async fn list_threads_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_thread::Model>> {
        require_admin(actor)?;
        self.repo.list_threads_admin(filter).await
    }

    /// Fetch one thread; unapproved threads are visible only to their
    /// author and administrators.
    pub async fn get_thread(
        &self,
        actor: Option<&Actor>,
        id: &str,
    ) -> AppResult<forum_thread::Model> {
        let thread = self.repo.get_thread(id).await?;

        let publicly_visible = thread.moderation_status == ModerationStatus::Approved;
        let privileged = actor
            .map(|a| a.can_moderate() || a.user_id == thread.author_id)
            .unwrap_or(false);

        if publicly_visible || privileged {
            Ok(thread)
        } else {
            Err(AppError::NotFound(format!("Forum thread not found: {id}")))
        }
    }

    /// Open a new thread. Starts pending moderation.
    pub async fn create_thread(&self, actor: &Actor, input: CreateThreadInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create_thread(actor, input).await)
    }

    /// Lock or unlock a thread. Administrators only.
    pub async fn set_locked(&self, actor: &Actor, id: &str, locked: bool) -> MutationOutcome {
        MutationOutcome::from_result(async {
            require_admin(actor)?;
            self.repo.set_locked(id, locked).await?;
            Ok(())
        }
        .await)
    }

    /// Record one thread view.
    pub async fn record_view(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_thread_view(id).await)
    }

    // ==================== Replies ====================

    /// Replies within a thread, oldest first, approved only.
    pub async fn list_replies(
        &self,
        thread_id: &str,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_reply::Model>> {
        self.repo.list_replies(thread_id, filter).await
    }

    /// Back-office reply listing.
    pub async fn list_replies_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<forum_reply::Model>> {
        require_admin(actor)?;
        self.repo.list_replies_admin(filter).await
    }

    /// Post a reply. Locked threads take no replies.
    pub async fn create_reply(&self, actor: &Actor, input: CreateReplyInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create_reply(actor, input).await)
    }

    /// Remove a reply. Author or administrator only.
    pub async fn delete_reply(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete_reply(actor, id).await)
    }

    async fn try_create_thread(&self, actor: &Actor, input: CreateThreadInput) -> AppResult<()> {
        input.validate()?;

        let model = forum_thread::ActiveModel {
            id: Set(crate::generate_id()),
            author_id: Set(actor.user_id.clone()),
            category: Set(input.category),
            title: Set(input.title),
            content: Set(input.content),
            tags: Set(serde_json::json!(input.tags)),
            language: Set(input.language),
            is_locked: Set(false),
            is_pinned: Set(false),
            moderation_status: Set(ModerationStatus::Pending),
            moderated_by: Set(None),
            moderated_at: Set(None),
            moderation_notes: Set(None),
            view_count: Set(0),
            like_count: Set(0),
            reply_count: Set(0),
            last_reply_at: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create_thread(model).await?;
        Ok(())
    }

    async fn try_create_reply(&self, actor: &Actor, input: CreateReplyInput) -> AppResult<()> {
        input.validate()?;

        let thread = self.repo.get_thread(&input.thread_id).await?;
        if thread.is_locked {
            return Err(AppError::Conflict("Thread is locked".to_string()));
        }

        let model = forum_reply::ActiveModel {
            id: Set(crate::generate_id()),
            thread_id: Set(input.thread_id),
            author_id: Set(actor.user_id.clone()),
            content: Set(input.content),
            moderation_status: Set(ModerationStatus::Pending),
            moderated_by: Set(None),
            moderated_at: Set(None),
            moderation_notes: Set(None),
            like_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create_reply(model).await?;
        Ok(())
    }

    async fn try_delete_reply(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let reply = self
            .repo
            .find_reply(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Forum reply not found: {id}")))?;

        if !actor.can_moderate() && actor.user_id != reply.author_id {
            return Err(AppError::Forbidden(
                "Only the author can delete this reply".to_string(),
            ));
        }

        self.repo.delete_reply(id).await?;
        Ok(())
    }
}

fn require_admin(actor: &Actor) -> AppResult<()> {
    if actor.can_moderate() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Administrators only".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn member() -> Actor {
        Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: None,
        }
    }

    fn locked_thread(id: &str) -> forum_thread::Model {
        forum_thread::Model {
            id: id.to_string(),
            author_id: "user9".to_string(),
            category: "general".to_string(),
            title: "Archived discussion".to_string(),
            content: "Opening".to_string(),
            tags: serde_json::json!([]),
            language: "English".to_string(),
            is_locked: true,
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

    fn service_with(db: MockDatabase) -> ForumService {
        ForumService::new(ForumRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_locked_thread_takes_no_replies() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[locked_thread("t1")]]);
        let service = service_with(db);

        let outcome = service
            .create_reply(
                &member(),
                CreateReplyInput {
                    thread_id: "t1".to_string(),
                    content: "Late to the party".to_string(),
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("locked"));
    }

    #[tokio::test]
    async fn test_pending_thread_hidden_from_public() {
        let mut thread = locked_thread("t1");
        thread.moderation_status = ModerationStatus::Pending;

        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[thread]]);
        let service = service_with(db);

        let result = service.get_thread(None, "t1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_only_admin_locks_threads() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = service_with(db);

        let outcome = service.set_locked(&member(), "t1", true).await;

        assert!(!outcome.success);
    }
}
