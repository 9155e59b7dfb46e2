//! Moderation repository: generic status writes over moderatable entities.

use std::sync::Arc;

use chrono::Utc;
use civinet_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    prelude::DateTimeWithTimeZone, sea_query::ExprTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{
    ModerationStatus, blog_post, forum_reply, forum_thread, organisation,
};
use crate::store::with_timeout;

/// Tagged reference to one kind of moderatable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    BlogPost,
    ForumThread,
    ForumReply,
    Organisation,
}

impl ContentKind {
    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "blog_post" => Some(Self::BlogPost),
            "forum_thread" => Some(Self::ForumThread),
            "forum_reply" => Some(Self::ForumReply),
            "organisation" => Some(Self::Organisation),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlogPost => "blog post",
            Self::ForumThread => "forum thread",
            Self::ForumReply => "forum reply",
            Self::Organisation => "organisation",
        }
    }
}

/// Column descriptor for entities carrying the moderation block.
pub trait Moderatable: EntityTrait {
    fn id_col() -> Self::Column;
    fn status_col() -> Self::Column;
    fn moderated_by_col() -> Self::Column;
    fn moderated_at_col() -> Self::Column;
    fn notes_col() -> Self::Column;
    fn updated_at_col() -> Self::Column;
    /// The promotion flag, for entities that have one.
    fn featured_col() -> Option<Self::Column>;
}

impl Moderatable for blog_post::Entity {
    fn id_col() -> Self::Column {
        blog_post::Column::Id
    }
    fn status_col() -> Self::Column {
        blog_post::Column::ModerationStatus
    }
    fn moderated_by_col() -> Self::Column {
        blog_post::Column::ModeratedBy
    }
    fn moderated_at_col() -> Self::Column {
        blog_post::Column::ModeratedAt
    }
    fn notes_col() -> Self::Column {
        blog_post::Column::ModerationNotes
    }
    fn updated_at_col() -> Self::Column {
        blog_post::Column::UpdatedAt
    }
    fn featured_col() -> Option<Self::Column> {
        Some(blog_post::Column::IsFeatured)
    }
}

impl Moderatable for forum_thread::Entity {
    fn id_col() -> Self::Column {
        forum_thread::Column::Id
    }
    fn status_col() -> Self::Column {
        forum_thread::Column::ModerationStatus
    }
    fn moderated_by_col() -> Self::Column {
        forum_thread::Column::ModeratedBy
    }
    fn moderated_at_col() -> Self::Column {
        forum_thread::Column::ModeratedAt
    }
    fn notes_col() -> Self::Column {
        forum_thread::Column::ModerationNotes
    }
    fn updated_at_col() -> Self::Column {
        forum_thread::Column::UpdatedAt
    }
    fn featured_col() -> Option<Self::Column> {
        Some(forum_thread::Column::IsPinned)
    }
}

impl Moderatable for forum_reply::Entity {
    fn id_col() -> Self::Column {
        forum_reply::Column::Id
    }
    fn status_col() -> Self::Column {
        forum_reply::Column::ModerationStatus
    }
    fn moderated_by_col() -> Self::Column {
        forum_reply::Column::ModeratedBy
    }
    fn moderated_at_col() -> Self::Column {
        forum_reply::Column::ModeratedAt
    }
    fn notes_col() -> Self::Column {
        forum_reply::Column::ModerationNotes
    }
    fn updated_at_col() -> Self::Column {
        forum_reply::Column::UpdatedAt
    }
    // Replies have no carousel; there is nothing to feature.
    fn featured_col() -> Option<Self::Column> {
        None
    }
}

impl Moderatable for organisation::Entity {
    fn id_col() -> Self::Column {
        organisation::Column::Id
    }
    fn status_col() -> Self::Column {
        organisation::Column::ModerationStatus
    }
    fn moderated_by_col() -> Self::Column {
        organisation::Column::ModeratedBy
    }
    fn moderated_at_col() -> Self::Column {
        organisation::Column::ModeratedAt
    }
    fn notes_col() -> Self::Column {
        organisation::Column::ModerationNotes
    }
    fn updated_at_col() -> Self::Column {
        organisation::Column::UpdatedAt
    }
    fn featured_col() -> Option<Self::Column> {
        Some(organisation::Column::IsFeatured)
    }
}

/// Repository for moderation writes, dispatched by [`ContentKind`].
#[derive(Clone)]
pub struct ModerationRepository {
    db: Arc<DatabaseConnection>,
}

impl ModerationRepository {
    /// Create a new moderation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Read the current moderation status of one item, if it exists.
    pub async fn current_status(
        &self,
        kind: ContentKind,
        id: &str,
    ) -> AppResult<Option<ModerationStatus>> {
        match kind {
            ContentKind::BlogPost => self.status_of::<blog_post::Entity>(id).await,
            ContentKind::ForumThread => self.status_of::<forum_thread::Entity>(id).await,
            ContentKind::ForumReply => self.status_of::<forum_reply::Entity>(id).await,
            ContentKind::Organisation => self.status_of::<organisation::Entity>(id).await,
        }
    }

    /// Write a new moderation status with notes and audit fields. Returns
    /// the number of rows touched; zero means the item is gone.
    pub async fn set_status(
        &self,
        kind: ContentKind,
        id: &str,
        status: ModerationStatus,
        notes: Option<&str>,
        admin_id: &str,
    ) -> AppResult<u64> {
        match kind {
            ContentKind::BlogPost => {
                self.write_status::<blog_post::Entity>(id, status, notes, admin_id)
                    .await
            }
            ContentKind::ForumThread => {
                self.write_status::<forum_thread::Entity>(id, status, notes, admin_id)
                    .await
            }
            ContentKind::ForumReply => {
                self.write_status::<forum_reply::Entity>(id, status, notes, admin_id)
                    .await
            }
            ContentKind::Organisation => {
                self.write_status::<organisation::Entity>(id, status, notes, admin_id)
                    .await
            }
        }
    }

    /// Flip the promotion flag in a single statement. Independent of
    /// moderation status; public carousels still gate on approval.
    pub async fn toggle_featured(&self, kind: ContentKind, id: &str) -> AppResult<u64> {
        match kind {
            ContentKind::BlogPost => self.flip_featured::<blog_post::Entity>(kind, id).await,
            ContentKind::ForumThread => self.flip_featured::<forum_thread::Entity>(kind, id).await,
            ContentKind::ForumReply => self.flip_featured::<forum_reply::Entity>(kind, id).await,
            ContentKind::Organisation => self.flip_featured::<organisation::Entity>(kind, id).await,
        }
    }

    /// Hard-delete one item. Returns the number of rows removed.
    pub async fn delete(&self, kind: ContentKind, id: &str) -> AppResult<u64> {
        match kind {
            ContentKind::BlogPost => self.delete_one::<blog_post::Entity>(id).await,
            ContentKind::ForumThread => self.delete_one::<forum_thread::Entity>(id).await,
            ContentKind::ForumReply => self.delete_one::<forum_reply::Entity>(id).await,
            ContentKind::Organisation => self.delete_one::<organisation::Entity>(id).await,
        }
    }

    async fn status_of<E: Moderatable>(&self, id: &str) -> AppResult<Option<ModerationStatus>> {
        with_timeout(
            "read moderation status",
            E::find()
                .filter(E::id_col().eq(id))
                .select_only()
                .column(E::status_col())
                .into_tuple::<ModerationStatus>()
                .one(self.db.as_ref()),
        )
        .await
    }

    async fn write_status<E: Moderatable>(
        &self,
        id: &str,
        status: ModerationStatus,
        notes: Option<&str>,
        admin_id: &str,
    ) -> AppResult<u64> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = with_timeout(
            "write moderation status",
            E::update_many()
                .col_expr(E::status_col(), Expr::value(status))
                .col_expr(E::notes_col(), Expr::value(notes.map(String::from)))
                .col_expr(E::moderated_by_col(), Expr::value(Some(admin_id.to_string())))
                .col_expr(E::moderated_at_col(), Expr::value(Some(now)))
                .col_expr(E::updated_at_col(), Expr::value(Some(now)))
                .filter(E::id_col().eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    async fn flip_featured<E: Moderatable>(&self, kind: ContentKind, id: &str) -> AppResult<u64> {
        let Some(featured) = E::featured_col() else {
            return Err(AppError::BadRequest(format!(
                "a {} cannot be featured",
                kind.as_str()
            )));
        };
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = with_timeout(
            "toggle featured flag",
            E::update_many()
                .col_expr(featured, Expr::col(featured).not())
                .col_expr(E::updated_at_col(), Expr::value(Some(now)))
                .filter(E::id_col().eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    async fn delete_one<E: Moderatable>(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete content",
            E::delete_many()
                .filter(E::id_col().eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ModerationRepository::new(db);
        let rows = repo.delete(ContentKind::BlogPost, "post1").await.unwrap();

        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_row_affects_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = ModerationRepository::new(db);
        let rows = repo.delete(ContentKind::ForumReply, "gone").await.unwrap();

        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_replies_cannot_be_featured() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = ModerationRepository::new(db);
        let result = repo.toggle_featured(ContentKind::ForumReply, "reply1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
