//! Lifecycle enums shared by content entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation status carried by every moderatable entity, orthogonal to its
/// publication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting first review. Initial state for all user-generated content.
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "flagged")]
    Flagged,
}

impl ModerationStatus {
    /// Parse a wire value. `"all"` is not a status; callers treat it as the
    /// no-filter sentinel before calling this.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "flagged" => Some(Self::Flagged),
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
            Self::Flagged => "flagged",
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Pending content may be approved, rejected or flagged. Approved
    /// content may be re-flagged; rejected and flagged content may be
    /// re-reviewed into approved. Nothing returns to pending after creation.
    /// A same-state "transition" is not a transition; callers treat it as an
    /// idempotent no-op.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected | Self::Flagged)
                | (Self::Approved, Self::Flagged)
                | (Self::Rejected | Self::Flagged, Self::Approved)
        )
    }
}

/// Publication state for authored content (blogs, events, courses,
/// resources). Distinct from moderation: a published item still needs
/// approval before it is publicly listable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    #[sea_orm(string_value = "draft")]
    #[default]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

impl PublicationStatus {
    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            _ => None,
        }
    }

    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_fans_out() {
        assert!(ModerationStatus::Pending.can_transition_to(ModerationStatus::Approved));
        assert!(ModerationStatus::Pending.can_transition_to(ModerationStatus::Rejected));
        assert!(ModerationStatus::Pending.can_transition_to(ModerationStatus::Flagged));
    }

    #[test]
    fn test_approved_and_flagged_swap() {
        assert!(ModerationStatus::Approved.can_transition_to(ModerationStatus::Flagged));
        assert!(ModerationStatus::Flagged.can_transition_to(ModerationStatus::Approved));
    }

    #[test]
    fn test_rejected_can_be_rereviewed() {
        assert!(ModerationStatus::Rejected.can_transition_to(ModerationStatus::Approved));
        assert!(!ModerationStatus::Rejected.can_transition_to(ModerationStatus::Flagged));
    }

    #[test]
    fn test_nothing_returns_to_pending() {
        for status in [
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
            ModerationStatus::Flagged,
        ] {
            assert!(!status.can_transition_to(ModerationStatus::Pending));
        }
    }

    #[test]
    fn test_approved_cannot_be_rejected_directly() {
        assert!(!ModerationStatus::Approved.can_transition_to(ModerationStatus::Rejected));
    }

    #[test]
    fn test_same_state_is_not_a_transition() {
        for status in [
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
            ModerationStatus::Flagged,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }
}
