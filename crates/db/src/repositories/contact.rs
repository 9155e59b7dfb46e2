//! Contact submission repository.

use std::sync::Arc;

use chrono::Utc;
use civinet_common::{AppResult, Page};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{ContactSubmission, contact_submission};
use crate::listing::{ContentFilter, list_page};
use crate::store::with_timeout;

/// Repository for contact submissions.
#[derive(Clone)]
pub struct ContactRepository {
    db: Arc<DatabaseConnection>,
}

impl ContactRepository {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Store a submission.
    pub async fn create(
        &self,
        model: contact_submission::ActiveModel,
    ) -> AppResult<contact_submission::Model> {
        with_timeout("insert contact submission", model.insert(self.db.as_ref())).await
    }

    /// List the admin inbox, newest first.
    pub async fn list(
        &self,
        filter: &ContentFilter,
        unread_only: bool,
    ) -> AppResult<Page<contact_submission::Model>> {
        let mut base = ContactSubmission::find();
        if unread_only {
            base = base.filter(contact_submission::Column::IsRead.eq(false));
        }

        list_page(self.db.as_ref(), base, filter).await
    }

    /// Mark a submission as read. Returns the number of rows touched.
    pub async fn mark_read(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "mark submission read",
            ContactSubmission::update_many()
                .col_expr(contact_submission::Column::IsRead, Expr::value(true))
                .filter(contact_submission::Column::Id.eq(id))
                .exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }

    /// Count unread submissions.
    pub async fn count_unread(&self) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;

        with_timeout(
            "count unread submissions",
            ContactSubmission::find()
                .filter(contact_submission::Column::IsRead.eq(false))
                .count(self.db.as_ref()),
        )
        .await
    }

    /// Build an active model for a fresh submission.
    #[must_use]
    pub fn new_submission(
        id: String,
        name: String,
        email: String,
        subject: String,
        message: String,
    ) -> contact_submission::ActiveModel {
        use sea_orm::Set;

        contact_submission::ActiveModel {
            id: Set(id),
            name: Set(name),
            email: Set(email),
            subject: Set(subject),
            message: Set(message),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        }
    }
}
