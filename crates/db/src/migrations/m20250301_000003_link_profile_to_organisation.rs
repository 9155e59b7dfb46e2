//! Add the profile → organisation foreign key, deferred until both tables
//! exist.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Profile::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_profile_organisation")
                            .from_tbl(Profile::Table)
                            .from_col(Profile::OrganisationId)
                            .to_tbl(Organisation::Table)
                            .to_col(Organisation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Profile::Table)
                    .drop_foreign_key(Alias::new("fk_profile_organisation"))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Profile {
    Table,
    OrganisationId,
}

#[derive(Iden)]
enum Organisation {
    Table,
    Id,
}
