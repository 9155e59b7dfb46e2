//! Contact form submission entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored contact-form submission. Mail delivery is handled outside this
/// system; the back-office reads these from the admin inbox.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Sender name.
    pub name: String,

    /// Sender email address.
    pub email: String,

    /// Message subject.
    pub subject: String,

    /// Message body.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Whether an admin has read this submission.
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    /// When the submission arrived.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
