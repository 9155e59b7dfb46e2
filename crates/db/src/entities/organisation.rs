//! Organisation entity - a CSO directory entry.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lifecycle::ModerationStatus;

/// Organisation lifecycle state, orthogonal to moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum OrganisationStatus {
    /// Visible in the public directory once approved.
    #[sea_orm(string_value = "active")]
    Active,
    /// Newly registered, awaiting back-office approval.
    #[sea_orm(string_value = "pending_approval")]
    #[default]
    PendingApproval,
    /// Flagged for review; hidden from the public directory.
    #[sea_orm(string_value = "flagged")]
    Flagged,
    /// Deactivated by the organisation or an administrator.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl OrganisationStatus {
    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "pending_approval" => Some(Self::PendingApproval),
            "flagged" => Some(Self::Flagged),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingApproval => "pending_approval",
            Self::Flagged => "flagged",
            Self::Inactive => "inactive",
        }
    }
}

/// Organisation entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organisation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Organisation name.
    pub name: String,

    /// URL slug, unique across the directory.
    #[sea_orm(unique, indexed)]
    pub slug: String,

    /// Mission statement / description.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Public website (optional).
    #[sea_orm(nullable)]
    pub website: Option<String>,

    /// Countries of operation (JSON array of country names).
    pub countries: Json,

    /// Thematic areas of work (JSON array).
    pub thematic_areas: Json,

    /// Lifecycle state.
    pub status: OrganisationStatus,

    /// Moderation status, orthogonal to `status`.
    pub moderation_status: ModerationStatus,

    /// Admin who last moderated this organisation.
    #[sea_orm(nullable)]
    pub moderated_by: Option<String>,

    /// When the last moderation action happened.
    #[sea_orm(nullable)]
    pub moderated_at: Option<DateTimeWithTimeZone>,

    /// Free-text moderation rationale.
    #[sea_orm(column_type = "Text", nullable)]
    pub moderation_notes: Option<String>,

    /// Promotion flag for the directory carousel.
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Profile page views (denormalized).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// When the organisation registered.
    pub created_at: DateTimeWithTimeZone,

    /// When the organisation was last updated.
    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profile::Entity")]
    Members,
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
    #[sea_orm(has_many = "super::affiliation_request::Entity")]
    AffiliationRequests,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::affiliation_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffiliationRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
