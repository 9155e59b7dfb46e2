//! Affiliation request workflow.
//!
//! A user asks to be linked to an organisation; an organisation
//! representative (or an administrator) approves or rejects; the requester
//! may cancel while the request is still pending. Every state but pending
//! is terminal. A user has at most one outstanding request at a time,
//! across all organisations.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use civinet_common::{Actor, AppError, AppResult, IdGenerator, MutationOutcome, Page};
use civinet_db::entities::{
    AffiliationRequest, Organisation, Profile, affiliation_request,
    affiliation_request::RequestStatus, profile,
};
use civinet_db::listing::{ContentFilter, list_page};
use civinet_db::store::{with_deadline, with_timeout};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

/// Decision taken on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Approved,
    Rejected,
}

impl RequestDecision {
    const fn status(self) -> RequestStatus {
        match self {
            Self::Approved => RequestStatus::Approved,
            Self::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Input for creating an affiliation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestInput {
    /// Organisation the user wants to join.
    pub organisation_id: String,
    /// Message to the organisation (optional).
    pub message: Option<String>,
}

/// Input for responding to a pending request.
#[derive(Debug, Clone)]
pub struct RespondInput {
    /// Request under review.
    pub request_id: String,
    /// Approve or reject.
    pub decision: RequestDecision,
    /// Response shown to the requester (optional).
    pub admin_response: Option<String>,
}

/// Affiliation request service.
#[derive(Clone)]
pub struct AffiliationService {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl AffiliationService {
    /// Create a new affiliation service.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Open a new affiliation request for the acting user.
    pub async fn create(&self, actor: &Actor, input: CreateRequestInput) -> MutationOutcome {
        MutationOutcome::from_result(
            with_deadline("create affiliation request", self.try_create(actor, input)).await,
        )
    }

    /// Approve or reject a pending request. On approval the requester's
    /// profile is linked to the organisation in the same transaction — an
    /// approved-but-unlinked state must not exist.
    pub async fn respond(&self, actor: &Actor, input: RespondInput) -> MutationOutcome {
        MutationOutcome::from_result(
            with_deadline("respond to affiliation request", self.try_respond(actor, input)).await,
        )
    }

    /// Cancel a pending request. Only the requester may cancel.
    pub async fn cancel(&self, actor: &Actor, request_id: &str) -> MutationOutcome {
        MutationOutcome::from_result(self.try_cancel(actor, request_id).await)
    }

    /// The acting user's pending request, if any.
    pub async fn find_pending(&self, user_id: &str) -> AppResult<Option<affiliation_request::Model>> {
        with_timeout(
            "find pending affiliation request",
            AffiliationRequest::find()
                .filter(affiliation_request::Column::UserId.eq(user_id))
                .filter(affiliation_request::Column::RequestStatus.eq(RequestStatus::Pending))
                .one(self.db.as_ref()),
        )
        .await
    }

    /// List requests for review. Administrators see everything;
    /// representatives see only their own organisation's requests.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<affiliation_request::Model>> {
        let mut filter = filter.clone();

        if !actor.can_moderate() {
            let Some(organisation_id) = actor.organisation_id.clone() else {
                return Err(AppError::Forbidden(
                    "Not affiliated with an organisation".to_string(),
                ));
            };
            filter.organisation_id = Some(organisation_id);
        }

        list_page(self.db.as_ref(), AffiliationRequest::find(), &filter).await
    }

    /// List the acting user's own requests, newest first.
    pub async fn list_own(
        &self,
        actor: &Actor,
        filter: &ContentFilter,
    ) -> AppResult<Page<affiliation_request::Model>> {
        let mut filter = filter.clone();
        filter.author_id = Some(actor.user_id.clone());

        list_page(self.db.as_ref(), AffiliationRequest::find(), &filter).await
    }

    async fn try_create(&self, actor: &Actor, input: CreateRequestInput) -> AppResult<()> {
        let message = match input.message.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(m) if m.len() > 2000 => {
                return Err(AppError::Validation("Request message too long".to_string()));
            }
            Some(m) => Some(m.to_string()),
        };

        // One affiliation at a time, regardless of organisation.
        if self.find_pending(&actor.user_id).await?.is_some() {
            return Err(AppError::DuplicateRequest(
                "A pending affiliation request already exists".to_string(),
            ));
        }

        let organisation = with_timeout(
            "find organisation",
            Organisation::find_by_id(&input.organisation_id).one(self.db.as_ref()),
        )
        .await?;
        if organisation.is_none() {
            return Err(AppError::NotFound(format!(
                "Organisation not found: {}",
                input.organisation_id
            )));
        }

        let model = affiliation_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor.user_id.clone()),
            organisation_id: Set(input.organisation_id),
            request_status: Set(RequestStatus::Pending),
            request_message: Set(message),
            admin_response: Set(None),
            responded_by: Set(None),
            requested_at: Set(Utc::now().into()),
            responded_at: Set(None),
        };

        // The partial unique index backs the check above against a
        // concurrent create racing past it.
        match model.insert(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(err) if err.to_string().contains("duplicate key") => {
                Err(AppError::DuplicateRequest(
                    "A pending affiliation request already exists".to_string(),
                ))
            }
            Err(err) => Err(AppError::Database(err.to_string())),
        }
    }

    async fn try_respond(&self, actor: &Actor, input: RespondInput) -> AppResult<()> {
        let request = with_timeout(
            "find affiliation request",
            AffiliationRequest::find_by_id(&input.request_id).one(self.db.as_ref()),
        )
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Affiliation request not found: {}", input.request_id))
        })?;

        if !actor.can_moderate() && !actor.represents(&request.organisation_id) {
            return Err(AppError::Forbidden(
                "Only the organisation's representatives can respond".to_string(),
            ));
        }

        if request.request_status != RequestStatus::Pending {
            return Err(AppError::InvalidTransition(
                "Request has already been reviewed".to_string(),
            ));
        }

        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Conditional update: the pending check and the write are one
        // statement, so a concurrent response cannot double-apply.
        let updated = AffiliationRequest::update_many()
            .col_expr(
                affiliation_request::Column::RequestStatus,
                Expr::value(input.decision.status()),
            )
            .col_expr(
                affiliation_request::Column::AdminResponse,
                Expr::value(input.admin_response.clone()),
            )
            .col_expr(
                affiliation_request::Column::RespondedBy,
                Expr::value(Some(actor.user_id.clone())),
            )
            .col_expr(
                affiliation_request::Column::RespondedAt,
                Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(now))),
            )
            .filter(affiliation_request::Column::Id.eq(&input.request_id))
            .filter(affiliation_request::Column::RequestStatus.eq(RequestStatus::Pending))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::InvalidTransition(
                "Request has already been reviewed".to_string(),
            ));
        }

        if input.decision == RequestDecision::Approved {
            let linked = Profile::update_many()
                .col_expr(
                    profile::Column::OrganisationId,
                    Expr::value(Some(request.organisation_id.clone())),
                )
                .col_expr(
                    profile::Column::UpdatedAt,
                    Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(now))),
                )
                .filter(profile::Column::Id.eq(&request.user_id))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if linked.rows_affected == 0 {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Err(AppError::NotFound(format!(
                    "Profile not found: {}",
                    request.user_id
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            request_id = %input.request_id,
            decision = ?input.decision,
            responder = %actor.user_id,
            "Affiliation request reviewed"
        );

        Ok(())
    }

    async fn try_cancel(&self, actor: &Actor, request_id: &str) -> AppResult<()> {
        let request = with_timeout(
            "find affiliation request",
            AffiliationRequest::find_by_id(request_id).one(self.db.as_ref()),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Affiliation request not found: {request_id}")))?;

        if request.user_id != actor.user_id {
            return Err(AppError::Forbidden(
                "Only the requester can cancel a request".to_string(),
            ));
        }

        if request.request_status != RequestStatus::Pending {
            return Err(AppError::InvalidTransition(
                "Only pending requests can be cancelled".to_string(),
            ));
        }

        let updated = with_timeout(
            "cancel affiliation request",
            AffiliationRequest::update_many()
                .col_expr(
                    affiliation_request::Column::RequestStatus,
                    Expr::value(RequestStatus::Cancelled),
                )
                .col_expr(
                    affiliation_request::Column::RespondedAt,
                    Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(
                        Utc::now(),
                    ))),
                )
                .filter(affiliation_request::Column::Id.eq(request_id))
                .filter(affiliation_request::Column::RequestStatus.eq(RequestStatus::Pending))
                .exec(self.db.as_ref()),
        )
        .await?;

        if updated.rows_affected == 0 {
            return Err(AppError::InvalidTransition(
                "Only pending requests can be cancelled".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use civinet_common::Role;
    use civinet_db::entities::organisation;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn requester() -> Actor {
        Actor {
            user_id: "user1".to_string(),
            role: Role::CsoRep,
            organisation_id: None,
        }
    }

    fn org_rep() -> Actor {
        Actor {
            user_id: "rep1".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org1".to_string()),
        }
    }

    fn test_request(id: &str, user_id: &str, status: RequestStatus) -> affiliation_request::Model {
        affiliation_request::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            organisation_id: "org1".to_string(),
            request_status: status,
            request_message: None,
            admin_response: None,
            responded_by: None,
            requested_at: Utc::now().into(),
            responded_at: None,
        }
    }

    fn test_org(id: &str) -> organisation::Model {
        use civinet_db::entities::{ModerationStatus, organisation::OrganisationStatus};

        organisation::Model {
            id: id.to_string(),
            name: "Org".to_string(),
            slug: "org".to_string(),
            description: None,
            website: None,
            countries: serde_json::json!([]),
            thematic_areas: serde_json::json!([]),
            status: OrganisationStatus::Active,
            moderation_status: ModerationStatus::Approved,
            moderated_by: None,
            moderated_at: None,
            moderation_notes: None,
            is_featured: false,
            view_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> AffiliationService {
        AffiliationService::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn test_second_pending_request_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_request("req1", "user1", RequestStatus::Pending),
        ]]);
        let service = service_with(db);

        let outcome = service
            .create(
                &requester(),
                CreateRequestInput {
                    organisation_id: "org2".to_string(),
                    message: None,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("pending affiliation request"));
    }

    #[tokio::test]
    async fn test_create_first_request_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<affiliation_request::Model>::new()])
            .append_query_results([[test_org("org1")]])
            .append_query_results([[test_request("req1", "user1", RequestStatus::Pending)]]);
        let service = service_with(db);

        let outcome = service
            .create(
                &requester(),
                CreateRequestInput {
                    organisation_id: "org1".to_string(),
                    message: Some("We work in the same region".to_string()),
                },
            )
            .await;

        assert!(outcome.success, "{:?}", outcome.error);
    }

    #[tokio::test]
    async fn test_respond_to_reviewed_request_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_request("req1", "user1", RequestStatus::Approved),
        ]]);
        let service = service_with(db);

        let outcome = service
            .respond(
                &org_rep(),
                RespondInput {
                    request_id: "req1".to_string(),
                    decision: RequestDecision::Rejected,
                    admin_response: None,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("already been reviewed"));
    }

    #[tokio::test]
    async fn test_approve_links_profile_in_same_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_request("req1", "user1", RequestStatus::Pending)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ]);
        let service = service_with(db);

        let outcome = service
            .respond(
                &org_rep(),
                RespondInput {
                    request_id: "req1".to_string(),
                    decision: RequestDecision::Approved,
                    admin_response: Some("Welcome".to_string()),
                },
            )
            .await;

        assert!(outcome.success, "{:?}", outcome.error);
    }

    #[tokio::test]
    async fn test_approve_fails_when_profile_link_fails() {
        // Status update succeeds, profile link touches no rows: the whole
        // response fails rather than leaving an approved-but-unlinked state.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_request("req1", "user1", RequestStatus::Pending)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ]);
        let service = service_with(db);

        let outcome = service
            .respond(
                &org_rep(),
                RespondInput {
                    request_id: "req1".to_string(),
                    decision: RequestDecision::Approved,
                    admin_response: None,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Profile not found"));
    }

    #[tokio::test]
    async fn test_unrelated_rep_cannot_respond() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_request("req1", "user1", RequestStatus::Pending),
        ]]);
        let service = service_with(db);

        let stranger = Actor {
            user_id: "rep2".to_string(),
            role: Role::CsoRep,
            organisation_id: Some("org9".to_string()),
        };

        let outcome = service
            .respond(
                &stranger,
                RespondInput {
                    request_id: "req1".to_string(),
                    decision: RequestDecision::Approved,
                    admin_response: None,
                },
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Forbidden"));
    }

    #[tokio::test]
    async fn test_only_requester_can_cancel() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_request("req1", "user1", RequestStatus::Pending),
        ]]);
        let service = service_with(db);

        let outcome = service.cancel(&org_rep(), "req1").await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("requester"));
    }

    #[tokio::test]
    async fn test_cancel_after_review_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[
            test_request("req1", "user1", RequestStatus::Rejected),
        ]]);
        let service = service_with(db);

        let outcome = service.cancel(&requester(), "req1").await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("pending"));
    }
}
