//! Blog service.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{ModerationStatus, PublicationStatus, blog_post};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::BlogRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a blog post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for updating a blog post. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    pub id: String,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Blog service.
#[derive(Clone)]
pub struct BlogService {
    repo: BlogRepository,
}

impl BlogService {
    /// Create a new blog service.
    #[must_use]
    pub const fn new(repo: BlogRepository) -> Self {
        Self { repo }
    }

    // ==================== Listings ====================

    /// Public listing: published and approved posts only.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<blog_post::Model>> {
        self.repo.list_public(filter).await
    }

    /// Featured carousel, approval-gated.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<blog_post::Model>> {
        self.repo.list_featured(limit).await
    }

    /// Back-office listing across all statuses.
    pub async fn list_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<blog_post::Model>> {
        require_admin(actor)?;
        self.repo.list_admin(filter).await
    }

    /// The acting member's own posts, drafts included.
    pub async fn list_own(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<blog_post::Model>> {
        self.repo.list_by_author(&actor.user_id, filter).await
    }

    /// Fetch one post. Unpublished or unapproved posts are visible only to
    /// their author and administrators; everyone else gets not-found.
    pub async fn get(&self, actor: Option<&Actor>, id: &str) -> AppResult<blog_post::Model> {
        let post = self.repo.get_by_id(id).await?;

        let publicly_visible = post.status == PublicationStatus::Published
            && post.moderation_status == ModerationStatus::Approved;
        let privileged = actor
            .map(|a| a.can_moderate() || a.user_id == post.author_id)
            .unwrap_or(false);

        if publicly_visible || privileged {
            Ok(post)
        } else {
            Err(AppError::NotFound(format!("Blog post not found: {id}")))
        }
    }

    // ==================== Mutations ====================

    /// Create a draft post. New content always starts in moderation state
    /// pending.
    pub async fn create(&self, actor: &Actor, input: CreatePostInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create(actor, input).await)
    }

    /// Update a post. Only the author or an administrator may edit.
    pub async fn update(&self, actor: &Actor, input: UpdatePostInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_update(actor, input).await)
    }

    /// Publish a draft. Only the author may publish; approval is still a
    /// separate moderation step.
    pub async fn publish(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_publish(actor, id).await)
    }

    /// Delete a post. Only the author or an administrator.
    pub async fn delete(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, id).await)
    }

    /// Record one view.
    pub async fn record_view(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_view(id).await)
    }

    /// Record one like.
    pub async fn like(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.like(id).await)
    }

    /// Withdraw one like.
    pub async fn unlike(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.unlike(id).await)
    }

    async fn try_create(&self, actor: &Actor, input: CreatePostInput) -> AppResult<()> {
        input.validate()?;

        let model = blog_post::ActiveModel {
            id: Set(crate::generate_id()),
            author_id: Set(actor.user_id.clone()),
            organisation_id: Set(actor.organisation_id.clone()),
            title: Set(input.title),
            excerpt: Set(input.excerpt),
            content: Set(input.content),
            language: Set(input.language),
            category_id: Set(input.category_id),
            tags: Set(serde_json::json!(input.tags)),
            status: Set(PublicationStatus::Draft),
            published_at: Set(None),
            moderation_status: Set(ModerationStatus::Pending),
            moderated_by: Set(None),
            moderated_at: Set(None),
            moderation_notes: Set(None),
            is_featured: Set(false),
            view_count: Set(0),
            like_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create(model).await?;
        Ok(())
    }

    async fn try_update(&self, actor: &Actor, input: UpdatePostInput) -> AppResult<()> {
        input.validate()?;

        let post = self.repo.get_by_id(&input.id).await?;
        require_author_or_admin(actor, &post.author_id)?;

        let mut model: blog_post::ActiveModel = post.into();
        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(excerpt) = input.excerpt {
            model.excerpt = Set(Some(excerpt));
        }
        if let Some(content) = input.content {
            model.content = Set(content);
        }
        if let Some(category_id) = input.category_id {
            model.category_id = Set(Some(category_id));
        }
        if let Some(tags) = input.tags {
            model.tags = Set(serde_json::json!(tags));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;
        Ok(())
    }

    async fn try_publish(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let post = self.repo.get_by_id(id).await?;
        require_author_or_admin(actor, &post.author_id)?;

        self.repo.publish(post).await?;
        Ok(())
    }

    async fn try_delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let post = self.repo.get_by_id(id).await?;
        require_author_or_admin(actor, &post.author_id)?;

        let rows = self.repo.delete(id).await?;
        if rows == 0 {
            return Err(AppError::NotFound(format!("Blog post not found: {id}")));
        }

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

fn require_author_or_admin(actor: &Actor, author_id: &str) -> AppResult<()> {
    if actor.can_moderate() || actor.user_id == author_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the author can modify this post".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn author() -> Actor {
        Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: None,
        }
    }

    fn pending_post(id: &str) -> blog_post::Model {
        blog_post::Model {
            id: id.to_string(),
            author_id: "user1".to_string(),
            organisation_id: None,
            title: "Draft".to_string(),
            excerpt: None,
            content: "Body".to_string(),
            language: "English".to_string(),
            category_id: None,
            tags: serde_json::json!([]),
            status: PublicationStatus::Published,
            published_at: Some(Utc::now().into()),
            moderation_status: ModerationStatus::Pending,
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

    fn service_with(db: MockDatabase) -> BlogService {
        BlogService::new(BlogRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_unapproved_post_is_hidden_from_the_public() {
        // Published but still pending moderation: anonymous readers must
        // not see it.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[pending_post("post1")]]);
        let service = service_with(db);

        let result = service.get(None, "post1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_author_sees_own_unapproved_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[pending_post("post1")]]);
        let service = service_with(db);

        let result = service.get(Some(&author()), "post1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = service_with(db);

        let outcome = service
            .create(
                &author(),
                CreatePostInput {
                    title: String::new(),
                    excerpt: None,
                    content: "Body".to_string(),
                    language: "English".to_string(),
                    category_id: None,
                    tags: vec![],
                },
            )
            .await;

        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_stranger_cannot_delete() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[pending_post("post1")]]);
        let service = service_with(db);

        let stranger = Actor {
            user_id: "user2".to_string(),
            role: Role::CsoRep,
            organisation_id: None,
        };
        let outcome = service.delete(&stranger, "post1").await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("author"));
    }
}
