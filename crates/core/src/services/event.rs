//! Event service.

use chrono::{DateTime, Utc};
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{PublicationStatus, event};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::EventRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for announcing an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(max = 256))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Publish immediately rather than keeping a draft.
    #[serde(default)]
    pub publish: bool,
}

/// Event service.
#[derive(Clone)]
pub struct EventService {
    repo: EventRepository,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(repo: EventRepository) -> Self {
        Self { repo }
    }

    /// Public listing of published events, soonest first.
    pub async fn list_public(&self, filter: &ContentFilter) -> AppResult<Page<event::Model>> {
        self.repo.list_public(filter).await
    }

    /// Featured events.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<event::Model>> {
        self.repo.list_featured(limit).await
    }

    /// Back-office listing.
    pub async fn list_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<event::Model>> {
        require_admin(actor)?;
        self.repo.list_admin(filter).await
    }

    /// Fetch one event.
    pub async fn get(&self, id: &str) -> AppResult<event::Model> {
        self.repo.get_by_id(id).await
    }

    /// Announce an event under the actor's organisation.
    pub async fn create(&self, actor: &Actor, input: CreateEventInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_create(actor, input).await)
    }

    /// Delete an event. Organisation representatives and administrators.
    pub async fn delete(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, id).await)
    }

    /// Record one view.
    pub async fn record_view(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_view(id).await)
    }

    async fn try_create(&self, actor: &Actor, input: CreateEventInput) -> AppResult<()> {
        input.validate()?;

        let Some(organisation_id) = actor.organisation_id.clone() else {
            return Err(AppError::Forbidden(
                "Only organisation members can announce events".to_string(),
            ));
        };

        if let Some(ends_at) = input.ends_at
            && ends_at < input.starts_at
        {
            return Err(AppError::Validation(
                "Event cannot end before it starts".to_string(),
            ));
        }

        let status = if input.publish {
            PublicationStatus::Published
        } else {
            PublicationStatus::Draft
        };

        let model = event::ActiveModel {
            id: Set(crate::generate_id()),
            organisation_id: Set(organisation_id),
            title: Set(input.title),
            description: Set(input.description),
            location: Set(input.location),
            language: Set(input.language),
            starts_at: Set(input.starts_at.into()),
            ends_at: Set(input.ends_at.map(Into::into)),
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
        let event = self.repo.get_by_id(id).await?;

        if !actor.can_moderate() && !actor.represents(&event.organisation_id) {
            return Err(AppError::Forbidden(
                "Only the organising CSO can delete this event".to_string(),
            ));
        }

        self.repo.delete(id).await?;
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
