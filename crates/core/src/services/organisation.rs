//! Organisation service: the public directory and its back office.

use chrono::Utc;
use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::{
    ModerationStatus, organisation, organisation::OrganisationStatus, profile,
};
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::{CountryStat, OrganisationRepository, ProfileRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for registering an organisation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganisationInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 256))]
    pub slug: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub thematic_areas: Vec<String>,
}

/// Input for updating an organisation profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganisationInput {
    pub id: String,
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub countries: Option<Vec<String>>,
    pub thematic_areas: Option<Vec<String>>,
}

/// Organisation service.
#[derive(Clone)]
pub struct OrganisationService {
    repo: OrganisationRepository,
    profile_repo: ProfileRepository,
}

impl OrganisationService {
    /// Create a new organisation service.
    #[must_use]
    pub const fn new(repo: OrganisationRepository, profile_repo: ProfileRepository) -> Self {
        Self { repo, profile_repo }
    }

    // ==================== Directory ====================

    /// Public directory listing: active and approved organisations.
    pub async fn list_directory(
        &self,
        filter: &ContentFilter,
    ) -> AppResult<Page<organisation::Model>> {
        self.repo.list_public(filter).await
    }

    /// Featured organisations, approval-gated.
    pub async fn list_featured(&self, limit: u64) -> AppResult<Page<organisation::Model>> {
        self.repo.list_featured(limit).await
    }

    /// Back-office listing across all statuses.
    pub async fn list_admin(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<organisation::Model>> {
        require_admin(actor)?;
        self.repo.list_admin(filter).await
    }

    /// Fetch one organisation by slug. Hidden organisations are visible
    /// only to their own members and administrators.
    pub async fn get_by_slug(
        &self,
        actor: Option<&Actor>,
        slug: &str,
    ) -> AppResult<organisation::Model> {
        let org = self.repo.get_by_slug(slug).await?;

        let publicly_visible = org.status == OrganisationStatus::Active
            && org.moderation_status == ModerationStatus::Approved;
        let privileged = actor
            .map(|a| a.can_moderate() || a.represents(&org.id))
            .unwrap_or(false);

        if publicly_visible || privileged {
            Ok(org)
        } else {
            Err(AppError::NotFound(format!("Organisation not found: {slug}")))
        }
    }

    /// Organisation members, for the dashboard.
    pub async fn members(&self, actor: &Actor, id: &str) -> AppResult<Vec<profile::Model>> {
        if !actor.can_moderate() && !actor.represents(id) {
            return Err(AppError::Forbidden(
                "Not a member of this organisation".to_string(),
            ));
        }

        self.profile_repo.members_of(id).await
    }

    /// Organisations per country for the directory map. One grouped query;
    /// only publicly visible organisations count.
    pub async fn country_stats(&self) -> AppResult<Vec<CountryStat>> {
        self.repo.country_stats().await
    }

    /// Record one profile view.
    pub async fn record_view(&self, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.repo.record_view(id).await)
    }

    // ==================== Lifecycle ====================

    /// Register a new organisation. It enters the directory only after
    /// back-office approval.
    pub async fn register(&self, actor: &Actor, input: RegisterOrganisationInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_register(actor, input).await)
    }

    /// Update an organisation profile. Representatives of the organisation
    /// and administrators only.
    pub async fn update(&self, actor: &Actor, input: UpdateOrganisationInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_update(actor, input).await)
    }

    /// Approve a pending organisation: activates it and clears moderation
    /// in one write.
    pub async fn approve(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_approve(actor, id).await)
    }

    /// Deactivate an organisation, removing it from the directory.
    pub async fn deactivate(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_set_status(actor, id, OrganisationStatus::Inactive).await)
    }

    async fn try_register(&self, actor: &Actor, input: RegisterOrganisationInput) -> AppResult<()> {
        input.validate()?;

        if !is_valid_slug(&input.slug) {
            return Err(AppError::Validation(
                "Slug may contain only lowercase letters, digits and hyphens".to_string(),
            ));
        }

        if self.repo.find_by_slug(&input.slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Slug already taken: {}",
                input.slug
            )));
        }

        let model = organisation::ActiveModel {
            id: Set(crate::generate_id()),
            name: Set(input.name),
            slug: Set(input.slug),
            description: Set(input.description),
            website: Set(input.website),
            countries: Set(serde_json::json!(input.countries)),
            thematic_areas: Set(serde_json::json!(input.thematic_areas)),
            status: Set(OrganisationStatus::PendingApproval),
            moderation_status: Set(ModerationStatus::Pending),
            moderated_by: Set(None),
            moderated_at: Set(None),
            moderation_notes: Set(None),
            is_featured: Set(false),
            view_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let org = self.repo.create(model).await?;

        tracing::info!(
            organisation_id = %org.id,
            registered_by = %actor.user_id,
            "Organisation registered, awaiting approval"
        );

        Ok(())
    }

    async fn try_update(&self, actor: &Actor, input: UpdateOrganisationInput) -> AppResult<()> {
        input.validate()?;

        let org = self.repo.get_by_id(&input.id).await?;
        if !actor.can_moderate() && !actor.represents(&org.id) {
            return Err(AppError::Forbidden(
                "Only the organisation's representatives can update it".to_string(),
            ));
        }

        let mut model: organisation::ActiveModel = org.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(website) = input.website {
            model.website = Set(Some(website));
        }
        if let Some(countries) = input.countries {
            model.countries = Set(serde_json::json!(countries));
        }
        if let Some(thematic_areas) = input.thematic_areas {
            model.thematic_areas = Set(serde_json::json!(thematic_areas));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;
        Ok(())
    }

    async fn try_approve(&self, actor: &Actor, id: &str) -> AppResult<()> {
        require_admin(actor)?;

        let org = self.repo.get_by_id(id).await?;
        let mut model: organisation::ActiveModel = org.into();
        model.status = Set(OrganisationStatus::Active);
        model.moderation_status = Set(ModerationStatus::Approved);
        model.moderated_by = Set(Some(actor.user_id.clone()));
        model.moderated_at = Set(Some(Utc::now().into()));
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;

        tracing::info!(organisation_id = %id, approved_by = %actor.user_id, "Organisation approved");

        Ok(())
    }

    async fn try_set_status(
        &self,
        actor: &Actor,
        id: &str,
        status: OrganisationStatus,
    ) -> AppResult<()> {
        let org = self.repo.get_by_id(id).await?;
        if !actor.can_moderate() && !actor.represents(&org.id) {
            return Err(AppError::Forbidden(
                "Only the organisation's representatives can change its status".to_string(),
            ));
        }

        let mut model: organisation::ActiveModel = org.into();
        model.status = Set(status);
        model.updated_at = Set(Some(Utc::now().into()));

        self.repo.update(model).await?;
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

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn rep_of(org: &str) -> Actor {
        Actor {
            user_id: "rep1".to_string(),
            role: Role::CsoRep,
            organisation_id: Some(org.to_string()),
        }
    }

    fn hidden_org(id: &str, slug: &str) -> organisation::Model {
        organisation::Model {
            id: id.to_string(),
            name: "Shadow Org".to_string(),
            slug: slug.to_string(),
            description: None,
            website: None,
            countries: serde_json::json!([]),
            thematic_areas: serde_json::json!([]),
            status: OrganisationStatus::PendingApproval,
            moderation_status: ModerationStatus::Pending,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            is_featured: false,
            view_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> OrganisationService {
        let conn = Arc::new(db.into_connection());
        OrganisationService::new(
            OrganisationRepository::new(Arc::clone(&conn)),
            ProfileRepository::new(conn),
        )
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("water-aid-2024"));
        assert!(!is_valid_slug("Water Aid"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
    }

    #[tokio::test]
    async fn test_pending_organisation_hidden_from_public() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[hidden_org("org1", "shadow-org")]]);
        let service = service_with(db);

        let result = service.get_by_slug(None, "shadow-org").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_member_sees_own_pending_organisation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[hidden_org("org1", "shadow-org")]]);
        let service = service_with(db);

        let result = service.get_by_slug(Some(&rep_of("org1")), "shadow-org").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_only_admin_approves() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = service_with(db);

        let outcome = service.approve(&rep_of("org1"), "org1").await;

        assert!(!outcome.success);
    }
}
