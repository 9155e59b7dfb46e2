//! Create project table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Project::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Project::OrganisationId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Project::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Project::Summary).text())
                    .col(
                        ColumnDef::new(Project::Status)
                            .string_len(16)
                            .not_null()
                            .default("planned"),
                    )
                    .col(
                        ColumnDef::new(Project::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Project::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_organisation")
                            .from(Project::Table, Project::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_organisation_id")
                    .table(Project::Table)
                    .col(Project::OrganisationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Project {
    Table,
    Id,
    OrganisationId,
    Title,
    Summary,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Organisation {
    Table,
    Id,
}
