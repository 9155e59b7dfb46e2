//! Resource library service.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{PublicationStatus, resource, resource::ResourceType};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::ResourceRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for adding a resource.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub resource_type: String,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
    #[serde(default)]
    pub publish: bool,
}

/// Resource library service.
#[derive(Clone)]
pub struct ResourceService {
    repo: ResourceRepository,
}

impl ResourceService {
    /// Create a new resource service.
    #[must_use]
    pub const fn new(repo: ResourceRepository) -> Self {
        Self { repo }
    }

    /// Public listing of published resources.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<resource::Model>> {
        self.repo.list_public(filter).await
    }

    /// Featured resources.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<resource::Model>> {
        self.repo.list_featured(limit).await
    }

    /// Back-office listing.
    pub async fn list_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<resource::Model>> {
        if !actor.can_moderate() {
            return Err(AppError::Forbidden("Administrators only".to_string()));
        }
        self.repo.list_admin(filter).await
    }

    /// Fetch one resource.
    pub async fn get(&self, id: &str) -> AppResult<resource::Model> {
        self.repo.get_by_id(id).await
    }

    /// Add a resource, attributed to the actor's organisation when they
    /// have one.
    pub async fn create(&self, actor: &Actor, input: CreateResourceInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create(actor, input).await)
    }

    /// Delete a resource.
    pub async fn delete(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, id).await)
    }

    /// Record one download.
    pub async fn record_download(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_download(id).await)
    }

    async fn try_create(&self, actor: &Actor, input: CreateResourceInput) -> AppResult<()> {
        input.validate()?;

        let resource_type = ResourceType::parse(&input.resource_type).ok_or_else(|| {
            AppError::Validation(format!("Unknown resource type: {}", input.resource_type))
        })?;

        let status = if input.publish {
            PublicationStatus::Published
        } else {
            PublicationStatus::Draft
        };

        let model = resource::ActiveModel {
            id: Set(crate::generate_id()),
            organisation_id: Set(actor.organisation_id.clone()),
            title: Set(input.title),
            description: Set(input.description),
            resource_type: Set(resource_type),
            url: Set(input.url),
            language: Set(input.language),
            status: Set(status),
            is_featured: Set(false),
            download_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create(model).await?;
        Ok(())
    }

    async fn try_delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let resource = self.repo.get_by_id(id).await?;

        let owns = resource
            .organisation_id
            .as_deref()
            .is_some_and(|org| actor.represents(org));
        if !actor.can_moderate() && !owns {
            return Err(AppError::Forbidden(
                "Only the contributing CSO can delete this resource".to_string(),
            ));
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use civinet_db::repositories::ResourceRepository;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_resource_type_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = ResourceService::new(ResourceRepository::new(Arc::new(db.into_connection())));

        let actor = Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org1".to_string()),
        };

        let outcome = service
            .create(
                &actor,
                CreateResourceInput {
                    title: "Guide".to_string(),
                    description: "A guide".to_string(),
                    resource_type: "podcast".to_string(),
                    url: None,
                    language: "English".to_string(),
                    publish: false,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("resource type"));
    }
}
