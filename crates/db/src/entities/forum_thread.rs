//! Forum thread entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::ModerationStatus;

/// Forum thread. Threads have no draft state; visibility is gated on
/// moderation approval alone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "forum_thread")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author profile ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Discussion category slug.
    #[sea_orm(indexed)]
    pub category: String,

    /// Thread title.
    pub title: String,

    /// Opening post body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Free-form tags (JSON array).
    pub tags: Json,

    /// Content language.
    pub language: String,

    /// Whether new replies are blocked.
    #[sea_orm(default_value = false)]
    pub is_locked: bool,

    /// Pinned to the top of the forum (featured-equivalent).
    #[sea_orm(default_value = false)]
    pub is_pinned: bool,

    /// Moderation status.
    pub moderation_status: ModerationStatus,

    /// Admin who last moderated this thread.
    #[sea_orm(nullable)]
    pub moderated_by: Option<String>,

    /// When the last moderation action happened.
    #[sea_orm(nullable)]
    pub moderated_at: Option<DateTimeWithTimeZone>,

    /// Free-text moderation rationale.
    #[sea_orm(column_type = "Text", nullable)]
    pub moderation_notes: Option<String>,

    /// Number of views (denormalized).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// Number of likes (denormalized).
    #[sea_orm(default_value = 0)]
    pub like_count: i64,

    /// Number of replies (denormalized).
    #[sea_orm(default_value = 0)]
    pub reply_count: i64,

    /// Last time a reply was posted.
    #[sea_orm(nullable)]
    pub last_reply_at: Option<DateTimeWithTimeZone>,

    /// When the thread was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the thread was last updated.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::AuthorId",
        to = "super::profile::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::forum_reply::Entity")]
    Replies,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::forum_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
