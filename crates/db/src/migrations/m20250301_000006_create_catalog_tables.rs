//! Create event, course and resource tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create event table
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Event::OrganisationId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Event::Description).text().not_null())
                    .col(ColumnDef::new(Event::Location).string_len(256))
                    .col(ColumnDef::new(Event::Language).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Event::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::EndsAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Event::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Event::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Event::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Event::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organisation")
                            .from(Event::Table, Event::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_starts_at")
                    .table(Event::Table)
                    .col(Event::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_status")
                    .table(Event::Table)
                    .col(Event::Status)
                    .to_owned(),
            )
            .await?;

        // Create course table
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Course::OrganisationId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Course::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Course::Description).text().not_null())
                    .col(ColumnDef::new(Course::Language).string_len(32).not_null())
                    .col(ColumnDef::new(Course::EnrolUrl).string_len(512))
                    .col(
                        ColumnDef::new(Course::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Course::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Course::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Course::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_organisation")
                            .from(Course::Table, Course::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_status")
                    .table(Course::Table)
                    .col(Course::Status)
                    .to_owned(),
            )
            .await?;

        // Create resource table
        manager
            .create_table(
                Table::create()
                    .table(Resource::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resource::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resource::OrganisationId).string_len(32))
                    .col(ColumnDef::new(Resource::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Resource::Description).text().not_null())
                    .col(
                        ColumnDef::new(Resource::ResourceType)
                            .string_len(16)
                            .not_null()
                            .default("document"),
                    )
                    .col(ColumnDef::new(Resource::Url).string_len(512))
                    .col(ColumnDef::new(Resource::Language).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Resource::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Resource::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Resource::DownloadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Resource::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Resource::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_organisation")
                            .from(Resource::Table, Resource::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resource_status")
                    .table(Resource::Table)
                    .col(Resource::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resource_resource_type")
                    .table(Resource::Table)
                    .col(Resource::ResourceType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resource::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
    OrganisationId,
    Title,
    Description,
    Location,
    Language,
    StartsAt,
    EndsAt,
    Status,
    IsFeatured,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
    OrganisationId,
    Title,
    Description,
    Language,
    EnrolUrl,
    Status,
    IsFeatured,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Resource {
    Table,
    Id,
    OrganisationId,
    Title,
    Description,
    ResourceType,
    Url,
    Language,
    Status,
    IsFeatured,
    DownloadCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Organisation {
    Table,
    Id,
}
