//! Create organisation table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organisation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organisation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Organisation::Name)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organisation::Slug)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Organisation::Description).text())
                    .col(ColumnDef::new(Organisation::Website).string_len(512))
                    .col(
                        ColumnDef::new(Organisation::Countries)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organisation::ThematicAreas)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organisation::Status)
                            .string_len(24)
                            .not_null()
                            .default("pending_approval"),
                    )
                    .col(
                        ColumnDef::new(Organisation::ModerationStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Organisation::ModeratedBy).string_len(36))
                    .col(ColumnDef::new(Organisation::ModeratedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Organisation::ModerationNotes).text())
                    .col(
                        ColumnDef::new(Organisation::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Organisation::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Organisation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Organisation::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organisation_moderated_by")
                            .from(Organisation::Table, Organisation::ModeratedBy)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organisation_slug")
                    .table(Organisation::Table)
                    .col(Organisation::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organisation_status")
                    .table(Organisation::Table)
                    .col(Organisation::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organisation_moderation_status")
                    .table(Organisation::Table)
                    .col(Organisation::ModerationStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organisation_is_featured")
                    .table(Organisation::Table)
                    .col(Organisation::IsFeatured)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organisation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Organisation {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Website,
    Countries,
    ThematicAreas,
    Status,
    ModerationStatus,
    ModeratedBy,
    ModeratedAt,
    ModerationNotes,
    IsFeatured,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
}
