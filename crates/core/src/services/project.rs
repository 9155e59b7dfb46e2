//! Project service for the member dashboard.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{project, project::ProjectStatus};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::ProjectRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub summary: Option<String>,
}

/// Input for updating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub id: String,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub summary: Option<String>,
    pub status: Option<String>,
}

/// Project service.
#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    /// Create a new project service.
    #[must_use]
    pub const fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    /// List the actor's organisation projects. Administrators may pass any
    /// organisation through the filter.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<project::Model>> {
        let organisation_id = if actor.can_moderate() {
            filter
                .organisation_id
                .clone()
                .ok_or_else(|| AppError::BadRequest("organisationId is required".to_string()))?
        } else {
            actor.organisation_id.clone().ok_or_else(|| {
                AppError::Forbidden("Not affiliated with an organisation".to_string())
            })?
        };

        self.repo.list_by_organisation(&organisation_id, filter).await
    }

    /// Create a project under the actor's organisation.
    pub async fn create(&self, actor: &Actor, input: CreateProjectInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create(actor, input).await)
    }

    /// Update a project owned by the actor's organisation.
    pub async fn update(&self, actor: &Actor, input: UpdateProjectInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_update(actor, input).await)
    }

    /// Delete a project owned by the actor's organisation.
    pub async fn delete(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, id).await)
    }

    async fn try_create(&self, actor: &Actor, input: CreateProjectInput) -> AppResult<()> {
        input.validate()?;

        let Some(organisation_id) = actor.organisation_id.clone() else {
            return Err(AppError::Forbidden(
                "Not affiliated with an organisation".to_string(),
            ));
        };

        let model = project::ActiveModel {
            id: Set(crate::generate_id()),
            organisation_id: Set(organisation_id),
            title: Set(input.title),
            summary: Set(input.summary),
            status: Set(ProjectStatus::Planned),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create(model).await?;
        Ok(())
    }

    async fn try_update(&self, actor: &Actor, input: UpdateProjectInput) -> AppResult<()> {
        input.validate()?;

        let project = self.repo.get_by_id(&input.id).await?;
        self.require_owner(actor, &project)?;

        let mut model: project::ActiveModel = project.into();
        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(summary) = input.summary {
            model.summary = Set(Some(summary));
        }
        if let Some(status) = input.status {
            let status = ProjectStatus::parse(&status)
                .ok_or_else(|| AppError::Validation(format!("Unknown status: {status}")))?;
            model.status = Set(status);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;
        Ok(())
    }

    async fn try_delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let project = self.repo.get_by_id(id).await?;
        self.require_owner(actor, &project)?;

        self.repo.delete(id).await?;
        Ok(())
    }

    fn require_owner(&self, actor: &Actor, project: &project::Model) -> AppResult<()> {
        if actor.can_moderate() || actor.represents(&project.organisation_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Project belongs to another organisation".to_string(),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unaffiliated_member_cannot_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = ProjectService::new(ProjectRepository::new(Arc::new(db.into_connection())));

        let loner = Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: None,
        };

        let outcome = service
            .create(
                &loner,
                CreateProjectInput {
                    title: "Well drilling".to_string(),
                    summary: None,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("organisation"));
    }

    #[tokio::test]
    async fn test_other_organisations_project_is_off_limits() {
        let project = project::Model {
            id: "p1".to_string(),
            organisation_id: "org2".to_string(),
            title: "Their project".to_string(),
            summary: None,
            status: ProjectStatus::Ongoing,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[project]]);
        let service = ProjectService::new(ProjectRepository::new(Arc::new(db.into_connection())));

        let rep = Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org1".to_string()),
        };

        let outcome = service.delete(&rep, "p1").await;

        assert!(!outcome.success);
    }
}
