//! Forum reply entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::ModerationStatus;

/// Reply within a forum thread.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forum_reply")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Parent thread.
    #[sea_orm(indexed)]
    pub thread_id: String,

    /// Author profile ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Reply body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Moderation status.
    pub moderation_status: ModerationStatus,

    /// Admin who last moderated this reply.
    #[sea_orm(nullable)]
    pub moderated_by: Option<String>,

    /// When the last moderation action happened.
    #[sea_orm(nullable)]
    pub moderated_at: Option<DateTimeWithTimeZone>,

    /// Free-text moderation rationale.
    #[sea_orm(column_type = "Text", nullable)]
    pub moderation_notes: Option<String>,

    /// Number of likes (denormalized).
    #[sea_orm(default_value = 0)]
    pub like_count: i64,

    /// When the reply was posted.
    pub created_at: DateTimeWithTimeZone,

    /// When the reply was last edited.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_thread::Entity",
        from = "Column::ThreadId",
        to = "super::forum_thread::Column::Id",
        on_delete = "Cascade"
    )]
    Thread,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::AuthorId",
        to = "super::profile::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::forum_thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
