//! Resource library entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::PublicationStatus;

/// Kind of resource in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[sea_orm(string_value = "document")]
    #[default]
    Document,
    #[sea_orm(string_value = "toolkit")]
    Toolkit,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "link")]
    Link,
}

impl ResourceType {
    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "toolkit" => Some(Self::Toolkit),
            "video" => Some(Self::Video),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    /// The wire representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Toolkit => "toolkit",
            Self::Video => "video",
            Self::Link => "link",
        }
    }
}

/// Shared resource (document, toolkit, video or external link).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Contributing CSO (optional; platform-curated resources have none).
    #[sea_orm(nullable, indexed)]
    pub organisation_id: Option<String>,

    /// Resource title.
    pub title: String,

    /// Resource description.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Kind of resource.
    pub resource_type: ResourceType,

    /// Download or external URL.
    #[sea_orm(nullable)]
    pub url: Option<String>,

    /// Content language.
    pub language: String,

    /// Draft/published lifecycle.
    pub status: PublicationStatus,

    /// Promotion flag.
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Number of downloads (denormalized).
    #[sea_orm(default_value = 0)]
    pub download_count: i64,

    /// When the resource was added.
    pub created_at: DateTimeWithTimeZone,

    /// When the resource was last updated.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id",
        on_delete = "SetNull"
    )]
    Organisation,
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
