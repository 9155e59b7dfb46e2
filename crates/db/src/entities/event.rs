//! Event entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::PublicationStatus;

/// Event announced by an organisation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Organising CSO.
    #[sea_orm(indexed)]
    pub organisation_id: String,

    /// Event title.
    pub title: String,

    /// Event description.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Venue or "online".
    #[sea_orm(nullable)]
    pub location: Option<String>,

    /// Content language.
    pub language: String,

    /// When the event starts.
    pub starts_at: DateTimeWithTimeZone,

    /// When the event ends (optional).
    #[sea_orm(nullable)]
    pub ends_at: Option<DateTimeWithTimeZone>,

    /// Draft/published lifecycle.
    pub status: PublicationStatus,

    /// Promotion flag for the homepage carousel.
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Number of views (denormalized).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// When the event was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the event was last updated.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id",
        on_delete = "Cascade"
    )]
    Organisation,
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
