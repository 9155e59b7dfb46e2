//! Course service.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{PublicationStatus, course};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::CourseRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for listing a course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
    #[validate(url)]
    pub enrol_url: Option<String>,
    #[serde(default)]
    pub publish: bool,
}

/// Course service.
#[derive(Clone)]
pub struct CourseService {
    repo: CourseRepository,
}

impl CourseService {
    /// Create a new course service.
    #[must_use]
    pub const fn new(repo: CourseRepository) -> Self {
        Self { repo }
    }

    /// Public listing of published courses.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<course::Model>> {
        self.repo.list_public(filter).await
    }

    /// Featured courses.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<course::Model>> {
        self.repo.list_featured(limit).await
    }

    /// Back-office listing.
    pub async fn list_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<course::Model>> {
        if !actor.can_moderate() {
            return Err(AppError::Forbidden("Administrators only".to_string()));
        }
        self.repo.list_admin(filter).await
    }

    /// Fetch one course.
    pub async fn get(&self, id: &str) -> AppResult<course::Model> {
        self.repo.get_by_id(id).await
    }

    /// Offer a course under the actor's organisation.
    pub async fn create(&self, actor: &Actor, input: CreateCourseInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create(actor, input).await)
    }

    /// Delete a course.
    pub async fn delete(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, id).await)
    }

    /// Record one view.
    pub async fn record_view(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_view(id).await)
    }

    async fn try_create(&self, actor: &Actor, input: CreateCourseInput) -> AppResult<()> {
        input.validate()?;

        let Some(organisation_id) = actor.organisation_id.clone() else {
            return Err(AppError::Forbidden(
                "Only organisation members can offer courses".to_string(),
            ));
        };

        let status = if input.publish {
            PublicationStatus::Published
        } else {
            PublicationStatus::Draft
        };

        let model = course::ActiveModel {
            id: Set(crate::generate_id()),
            organisation_id: Set(organisation_id),
            title: Set(input.title),
            description: Set(input.description),
            language: Set(input.language),
            enrol_url: Set(input.enrol_url),
            status: Set(status),
            is_featured: Set(false),
            view_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.repo.create(model).await?;
        Ok(())
    }

    async fn try_delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let course = self.repo.get_by_id(id).await?;

        if !actor.can_moderate() && !actor.represents(&course.organisation_id) {
            return Err(AppError::Forbidden(
                "Only the providing CSO can delete this course".to_string(),
            ));
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}
