//! Course entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::PublicationStatus;

/// Training course offered through the platform.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Providing CSO.
    #[sea_orm(indexed)]
    pub organisation_id: String,

    /// Course title.
    pub title: String,

    /// Course description.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Content language.
    pub language: String,

    /// External enrolment link (optional).
    #[sea_orm(nullable)]
    pub enrol_url: Option<String>,

    /// Draft/published lifecycle.
    pub status: PublicationStatus,

    /// Promotion flag.
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Number of views (denormalized).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// When the course was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the course was last updated.
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
