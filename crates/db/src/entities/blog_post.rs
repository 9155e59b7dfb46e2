//! Blog post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::{ModerationStatus, PublicationStatus};

/// Blog post authored by a member, publicly listable once published and
/// approved.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author profile ID.
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Organisation the post is published under (optional).
    #[sea_orm(nullable, indexed)]
    pub organisation_id: Option<String>,

    /// Post title.
    pub title: String,

    /// Short teaser shown in listings.
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,

    /// Full post body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Content language (e.g. "English", "French").
    pub language: String,

    /// Editorial category (optional).
    #[sea_orm(nullable)]
    pub category_id: Option<String>,

    /// Free-form tags (JSON array).
    pub tags: Json,

    /// Draft/published lifecycle.
    pub status: PublicationStatus,

    /// When the author published the post.
    #[sea_orm(nullable)]
    pub published_at: Option<DateTimeWithTimeZone>,

    /// Moderation status, orthogonal to `status`.
    pub moderation_status: ModerationStatus,

    /// Admin who last moderated this post.
    #[sea_orm(nullable)]
    pub moderated_by: Option<String>,

    /// When the last moderation action happened.
    #[sea_orm(nullable)]
    pub moderated_at: Option<DateTimeWithTimeZone>,

    /// Free-text moderation rationale.
    #[sea_orm(column_type = "Text", nullable)]
    pub moderation_notes: Option<String>,

    /// Promotion flag for the featured carousel.
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Number of views (denormalized).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// Number of likes (denormalized).
    #[sea_orm(default_value = 0)]
    pub like_count: i64,

    /// When the post was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the post was last updated.
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
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id",
        on_delete = "SetNull"
    )]
    Organisation,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
