//! Create blog_post table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPost::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPost::AuthorId).string_len(36).not_null())
                    .col(ColumnDef::new(BlogPost::OrganisationId).string_len(32))
                    .col(ColumnDef::new(BlogPost::Title).string_len(256).not_null())
                    .col(ColumnDef::new(BlogPost::Excerpt).text())
                    .col(ColumnDef::new(BlogPost::Content).text().not_null())
                    .col(
                        ColumnDef::new(BlogPost::Language)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlogPost::CategoryId).string_len(64))
                    .col(ColumnDef::new(BlogPost::Tags).json_binary().not_null())
                    .col(
                        ColumnDef::new(BlogPost::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(BlogPost::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(BlogPost::ModerationStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(BlogPost::ModeratedBy).string_len(36))
                    .col(ColumnDef::new(BlogPost::ModeratedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(BlogPost::ModerationNotes).text())
                    .col(
                        ColumnDef::new(BlogPost::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogPost::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPost::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPost::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(BlogPost::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_author")
                            .from(BlogPost::Table, BlogPost::AuthorId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_organisation")
                            .from(BlogPost::Table, BlogPost::OrganisationId)
                            .to(Organisation::Table, Organisation::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_author_id")
                    .table(BlogPost::Table)
                    .col(BlogPost::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_status")
                    .table(BlogPost::Table)
                    .col(BlogPost::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_moderation_status")
                    .table(BlogPost::Table)
                    .col(BlogPost::ModerationStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_is_featured")
                    .table(BlogPost::Table)
                    .col(BlogPost::IsFeatured)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_created_at")
                    .table(BlogPost::Table)
                    .col(BlogPost::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BlogPost {
    Table,
    Id,
    AuthorId,
    OrganisationId,
    Title,
    Excerpt,
    Content,
    Language,
    CategoryId,
    Tags,
    Status,
    PublishedAt,
    ModerationStatus,
    ModeratedBy,
    ModeratedAt,
    ModerationNotes,
    IsFeatured,
    ViewCount,
    LikeCount,
    CreatedAt,
    UpdatedAt,
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
