//! Blog post repository.

use std::sync::Arc;

use chrono::Utc;
use civinet_common::{AppError, AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::entities::{BlogPost, blog_post};
use crate::listing::{ContentFilter, Listable, list_page};
use crate::store::with_timeout;

/// Repository for blog post operations.
#[derive(Clone)]
pub struct BlogRepository {
    db: Arc<DatabaseConnection>,
}

impl BlogRepository {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<blog_post::Model>> {
        with_timeout("find blog post", BlogPost::find_by_id(id).one(self.db.as_ref())).await
    }

    /// Get a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<blog_post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post not found: {id}")))
    }

    /// List publicly visible posts (published and approved).
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<blog_post::Model>> {
        let base = BlogPost::find().filter(blog_post::Entity::visible());
        list_page(self.db.as_ref(), base, filter).await
    }

    /// List featured posts for the carousel. The approval gate still
    /// applies: featured-but-unapproved posts never appear here.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<blog_post::Model>> {
        let filter = ContentFilter {
            is_featured: Some(true),
            limit: Some(limit),
            ..ContentFilter::default()
        };
        let base = BlogPost::find().filter(blog_post::Entity::visible());
        list_page(self.db.as_ref(), base, &filter).await
    }

    /// List posts for the back office, any status.
    pub async fn list_admin(&self, filter: &ContentFilter) -> AppResult<Page<blog_post::Model>> {
        list_page(self.db.as_ref(), BlogPost::find(), filter).await
    }

    /// List a member's own posts, any status.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        filter: &ContentFilter,
    ) -> AppResult<Page<blog_post::Model>> {
        let base = BlogPost::find().filter(blog_post::Column::AuthorId.eq(author_id));
        list_page(self.db.as_ref(), base, filter).await
    }

    /// Create a new post.
    pub async fn create(&self, model: blog_post::ActiveModel) -> AppResult<blog_post::Model> {
        with_timeout("insert blog post", model.insert(self.db.as_ref())).await
    }

    /// Update a post.
    pub async fn update(&self, model: blog_post::ActiveModel) -> AppResult<blog_post::Model> {
        with_timeout("update blog post", model.update(self.db.as_ref())).await
    }

    /// Delete a post. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete blog post",
            BlogPost::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// Record one view atomically.
    pub async fn record_view(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment view count",
            BlogPost::update_many()
                .col_expr(
                    blog_post::Column::ViewCount,
                    Expr::col(blog_post::Column::ViewCount).add(1),
                )
                .filter(blog_post::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }

    /// Record one like atomically.
    pub async fn like(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "increment like count",
            BlogPost::update_many()
                .col_expr(
                    blog_post::Column::LikeCount,
                    Expr::col(blog_post::Column::LikeCount).add(1),
                )
                .filter(blog_post::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }

    /// Remove one like atomically, never below zero.
    pub async fn unlike(&self, id: &str) -> AppResult<()> {
        with_timeout(
            "decrement like count",
            BlogPost::update_many()
                .col_expr(
                    blog_post::Column::LikeCount,
                    Expr::cust("GREATEST(like_count - 1, 0)"),
                )
                .filter(blog_post::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(())
    }

    /// Mark a post published, stamping `published_at` once.
    pub async fn publish(&self, post: blog_post::Model) -> AppResult<blog_post::Model> {
        use crate::entities::PublicationStatus;
        use sea_orm::Set;

        let already_published = post.published_at;
        let mut model: blog_post::ActiveModel = post.into();
        model.status = Set(PublicationStatus::Published);
        model.published_at = Set(already_published.or_else(|| Some(Utc::now().into())));
        model.updated_at = Set(Some(Utc::now().into()));

        self.update(model).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::{ModerationStatus, PublicationStatus};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_post(id: &str, title: &str) -> blog_post::Model {
        blog_post::Model {
            id: id.to_string(),
            author_id: "user1".to_string(),
            organisation_id: None,
            title: title.to_string(),
            excerpt: None,
            content: "Body".to_string(),
            language: "English".to_string(),
            category_id: None,
            tags: serde_json::json!([]),
            status: PublicationStatus::Published,
            published_at: Some(Utc::now().into()),
            moderation_status: ModerationStatus::Approved,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            is_featured: false,
            view_count: 0,
            like_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let post = create_test_post("post1", "Clean water access");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.find_by_id("post1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Clean water access");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<blog_post::Model>::new()])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_record_view() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        assert!(repo.record_view("post1").await.is_ok());
    }
}
