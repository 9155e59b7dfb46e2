//! Member profile entity, keyed by the identity provider's user ID.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform role stored on the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "cso_rep")]
    #[default]
    CsoRep,
}

impl UserRole {
    /// The wire representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::CsoRep => "cso_rep",
        }
    }
}

/// Member profile.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    /// User ID issued by the identity provider.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name shown on authored content.
    pub display_name: String,

    /// Platform role.
    pub role: UserRole,

    /// Organisation this user is affiliated with, set by an approved
    /// affiliation request.
    #[sea_orm(nullable, indexed)]
    pub organisation_id: Option<String>,

    /// Preferred locale.
    pub locale: String,

    /// When the profile was created.
    pub created_at: DateTimeWithTimeZone,

    /// When the profile was last updated.
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
    #[sea_orm(has_many = "super::affiliation_request::Entity")]
    AffiliationRequests,
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl Related<super::affiliation_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffiliationRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
