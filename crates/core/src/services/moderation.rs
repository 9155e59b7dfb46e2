//! Moderation service: the lifecycle of moderatable content.
//!
//! Valid transitions live on [`ModerationStatus`]; this service validates
//! them, writes the audit fields, and collapses every failure into a
//! [`MutationOutcome`] — moderation actions never throw across the service
//! boundary.

use civinet_common::{Actor, AppError, AppResult, MutationOutcome};
use civinet_db::repositories::ModerationRepository;

pub use civinet_db::entities::ModerationStatus;
pub use civinet_db::repositories::ContentKind;

/// Input for a moderation decision.
#[derive(Debug, Clone)]
pub struct ModerateInput {
    /// Which table the target lives in.
    pub kind: ContentKind,
    /// Target row.
    pub content_id: String,
    /// Status to move to.
    pub new_status: ModerationStatus,
    /// Free-text rationale.
    pub notes: Option<String>,
}

/// Moderation service over all moderatable content kinds.
#[derive(Clone)]
pub struct ModerationService {
    repo: ModerationRepository,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(repo: ModerationRepository) -> Self {
        Self { repo }
    }

    /// Apply a moderation decision.
    ///
    /// Re-moderating to the current status is an idempotent success; a
    /// disallowed transition or a vanished target is a failure outcome.
    pub async fn moderate(&self, actor: &Actor, input: ModerateInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_moderate(actor, input).await)
    }

    /// Flip the promotion flag of one item. Deliberately independent of
    /// moderation status; public carousels gate on approval in the listing
    /// layer.
    pub async fn toggle_featured(
        &self,
        actor: &Actor,
        kind: ContentKind,
        content_id: &str,
    ) -> MutationOutcome {
        MutationOutcome::from_result(self.try_toggle_featured(actor, kind, content_id).await)
    }

    /// Hard-delete one item. Irreversible; no tombstone is kept.
    pub async fn delete(
        &self,
        actor: &Actor,
        kind: ContentKind,
        content_id: &str,
    ) -> MutationOutcome {
        MutationOutcome::from_result(self.try_delete(actor, kind, content_id).await)
    }

    async fn try_moderate(&self, actor: &Actor, input: ModerateInput) -> AppResult<()> {
        require_moderator(actor)?;

        let current = self
            .repo
            .current_status(input.kind, &input.content_id)
            .await?
            .ok_or_else(|| not_found(input.kind, &input.content_id))?;

        if current == input.new_status {
            // Idempotent: nothing to write, nothing to audit.
            return Ok(());
        }

        if !current.can_transition_to(input.new_status) {
            return Err(AppError::InvalidTransition(format!(
                "cannot move {} from {} to {}",
                input.kind.as_str(),
                current.as_str(),
                input.new_status.as_str()
            )));
        }

        let rows = self
            .repo
            .set_status(
                input.kind,
                &input.content_id,
                input.new_status,
                input.notes.as_deref(),
                &actor.user_id,
            )
            .await?;

        // The read above raced a delete.
        if rows == 0 {
            return Err(not_found(input.kind, &input.content_id));
        }

        tracing::info!(
            kind = input.kind.as_str(),
            content_id = %input.content_id,
            status = input.new_status.as_str(),
            moderator = %actor.user_id,
            "Content moderated"
        );

        Ok(())
    }

    async fn try_toggle_featured(
        &self,
        actor: &Actor,
        kind: ContentKind,
        content_id: &str,
    ) -> AppResult<()> {
        require_moderator(actor)?;

        let rows = self.repo.toggle_featured(kind, content_id).await?;
        if rows == 0 {
            return Err(not_found(kind, content_id));
        }

        Ok(())
    }

    async fn try_delete(&self, actor: &Actor, kind: ContentKind, content_id: &str) -> AppResult<()> {
        require_moderator(actor)?;

        let rows = self.repo.delete(kind, content_id).await?;
        if rows == 0 {
            return Err(not_found(kind, content_id));
        }

        tracing::info!(
            kind = kind.as_str(),
            content_id = %content_id,
            moderator = %actor.user_id,
            "Content deleted"
        );

        Ok(())
    }
}

fn require_moderator(actor: &Actor) -> AppResult<()> {
    if actor.can_moderate() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only administrators can moderate content".to_string(),
        ))
    }
}

fn not_found(kind: ContentKind, id: &str) -> AppError {
    AppError::NotFound(format!("{} not found: {id}", kind.as_str()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn admin() -> Actor {
        Actor {
            user_id: "admin1".to_string(),
            role: Role::Admin,
            organisation_id: None,
        }
    }

    fn rep() -> Actor {
        Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org1".to_string()),
        }
    }

    fn status_row(status: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("moderation_status", Value::from(status))])
    }

    fn service_with(db: MockDatabase) -> ModerationService {
        ModerationService::new(ModerationRepository::new(Arc::new(db.into_connection())))
    }

    fn moderate_input(new_status: ModerationStatus) -> ModerateInput {
        ModerateInput {
            kind: ContentKind::BlogPost,
            content_id: "post1".to_string(),
            new_status,
            notes: Some("reviewed".to_string()),
        }
    }

    #[tokio::test]
    async fn test_non_admin_cannot_moderate() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let outcome = service
            .moderate(&rep(), moderate_input(ModerationStatus::Approved))
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("administrators"));
    }

    #[tokio::test]
    async fn test_approve_pending_content() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![status_row("pending")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let service = service_with(db);

        let outcome = service
            .moderate(&admin(), moderate_input(ModerationStatus::Approved))
            .await;

        assert!(outcome.success);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_remoderating_same_status_is_idempotent() {
        // Only the status read is mocked: no write may happen.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![status_row("approved")]]);
        let service = service_with(db);

        let outcome = service
            .moderate(&admin(), moderate_input(ModerationStatus::Approved))
            .await;

        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_approved_to_rejected_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![status_row("approved")]]);
        let service = service_with(db);

        let outcome = service
            .moderate(&admin(), moderate_input(ModerationStatus::Rejected))
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Invalid transition"));
    }

    #[tokio::test]
    async fn test_moderating_missing_content_fails_without_throwing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()]);
        let service = service_with(db);

        let outcome = service
            .moderate(&admin(), moderate_input(ModerationStatus::Approved))
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_deleting_missing_content_is_a_failure_outcome() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let service = service_with(db);

        let outcome = service
            .delete(&admin(), ContentKind::ForumThread, "gone")
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_toggle_featured_missing_content() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let service = service_with(db);

        let outcome = service
            .toggle_featured(&admin(), ContentKind::BlogPost, "gone")
            .await;

        assert!(!outcome.success);
    }
}
