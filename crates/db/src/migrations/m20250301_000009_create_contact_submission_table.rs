//! Create contact_submission table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmission::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmission::Name)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmission::Email)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmission::Subject)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactSubmission::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactSubmission::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ContactSubmission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_submission_is_read")
                    .table(ContactSubmission::Table)
                    .col(ContactSubmission::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactSubmission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContactSubmission {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    IsRead,
    CreatedAt,
}
