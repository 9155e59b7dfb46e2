//! Affiliation request entity for the user-joins-organisation workflow.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Affiliation request status. All states but `Pending` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl RequestStatus {
    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A user's request to be linked to an organisation.
///
/// At most one pending request may exist per user at any time; a partial
/// unique index backs the service-level check.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliation_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Requesting user.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Target organisation.
    #[sea_orm(indexed)]
    pub organisation_id: String,

    /// Request status.
    pub request_status: RequestStatus,

    /// Message from the requester (optional).
    #[sea_orm(column_type = "Text", nullable)]
    pub request_message: Option<String>,

    /// Response from the reviewing admin (optional).
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_response: Option<String>,

    /// Admin who responded.
    #[sea_orm(nullable)]
    pub responded_by: Option<String>,

    /// When the request was submitted.
    pub requested_at: DateTimeWithTimeZone,

    /// When the request was approved, rejected or cancelled.
    #[sea_orm(nullable)]
    pub responded_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id",
        on_delete = "Cascade"
    )]
    Requester,
    #[sea_orm(
        belongs_to = "super::organisation::Entity",
        from = "Column::OrganisationId",
        to = "super::organisation::Column::Id",
        on_delete = "Cascade"
    )]
    Organisation,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requester.def()
    }
}

impl Related<super::organisation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
