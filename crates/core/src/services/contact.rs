//! Contact form service.

use civinet_common::{Actor, AppError, AppResult, MutationOutcome, Page};
use civinet_db::entities::contact_submission;
use civinet_db::listing::ContentFilter;
use civinet_db::repositories::ContactRepository;
use serde::Deserialize;
use validator::Validate;

/// A contact form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 256))]
    pub subject: String,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

/// Contact form service. Submissions are stored for the back office; mail
/// delivery happens outside this system.
#[derive(Clone)]
pub struct ContactService {
    repo: ContactRepository,
}

impl ContactService {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(repo: ContactRepository) -> Self {
        Self { repo }
    }

    /// Accept a submission from the public site.
    pub async fn submit(&self, input: SubmitContactInput) -> MutationOutcome {
        MutationOutcome::from_result(self.try_submit(input).await)
    }

    /// Admin inbox listing.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
        unread_only: bool,
    ) -> AppResult<Page<contact_submission::Model>> {
        require_admin(actor)?;
        self.repo.list(filter, unread_only).await
    }

    /// Mark a submission read.
    pub async fn mark_read(&self, actor: &Actor, id: &str) -> MutationOutcome {
        MutationOutcome::from_result(async {
            require_admin(actor)?;
            let rows = self.repo.mark_read(id).await?;
            if rows == 0 {
                return Err(AppError::NotFound(format!("Submission not found: {id}")));
            }
            Ok(())
        }
        .await)
    }

    /// Unread submissions badge count.
    pub async fn count_unread(&self, actor: &Actor) -> AppResult<u64> {
        require_admin(actor)?;
        self.repo.count_unread().await
    }

    async fn try_submit(&self, input: SubmitContactInput) -> AppResult<()> {
        input.validate()?;

        let model = ContactRepository::new_submission(
            crate::generate_id(),
            input.name.trim().to_string(),
            input.email.trim().to_string(),
            input.subject.trim().to_string(),
            input.message,
        );

        self.repo.create(model).await?;
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
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let service = ContactService::new(ContactRepository::new(Arc::new(db.into_connection())));

        let outcome = service
            .submit(SubmitContactInput {
                name: "Ade".to_string(),
                email: "not-an-email".to_string(),
                subject: "Partnership".to_string(),
                message: "Hello".to_string(),
            })
            .await;

        assert!(!outcome.success);
    }
}
