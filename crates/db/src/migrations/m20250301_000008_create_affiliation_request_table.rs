//! Create affiliation_request table.
//!
//! A partial unique index enforces the one-pending-request-per-user
//! invariant at write time; the service check alone cannot exclude a race
//! between concurrent creates.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AffiliationRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AffiliationRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AffiliationRequest::UserId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AffiliationRequest::OrganisationId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AffiliationRequest::RequestStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(AffiliationRequest::RequestMessage).text())
                    .col(ColumnDef::new(AffiliationRequest::AdminResponse).text())
                    .col(ColumnDef::new(AffiliationRequest::RespondedBy).string_len(36))
                    .col(
                        ColumnDef::new(AffiliationRequest::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AffiliationRequest::RespondedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_affiliation_request_user")
                            .from(AffiliationRequest::Table, AffiliationRequest::UserId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_affiliation_request_organisation")
                            .from(AffiliationRequest::Table, AffiliationRequest::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_affiliation_request_user_id")
                    .table(AffiliationRequest::Table)
                    .col(AffiliationRequest::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_affiliation_request_organisation_id")
                    .table(AffiliationRequest::Table)
                    .col(AffiliationRequest::OrganisationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_affiliation_request_status")
                    .table(AffiliationRequest::Table)
                    .col(AffiliationRequest::RequestStatus)
                    .to_owned(),
            )
            .await?;

        // Partial unique index: sea-query has no WHERE clause on index
        // builders, so raw SQL it is.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_affiliation_request_single_pending \
                 ON affiliation_request (user_id) \
                 WHERE request_status = 'pending'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AffiliationRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AffiliationRequest {
    Table,
    Id,
    UserId,
    OrganisationId,
    RequestStatus,
    RequestMessage,
    AdminResponse,
    RespondedBy,
    RequestedAt,
    RespondedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
}

#[derive(Iden)]
enum Organisation {
    Table,
    Id,
}
