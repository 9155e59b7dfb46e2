//! Create forum_thread and forum_reply tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create forum_thread table
        manager
            .create_table(
                Table::create()
                    .table(ForumThread::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForumThread::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ForumThread::AuthorId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThread::Category)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThread::Title)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ForumThread::Content).text().not_null())
                    .col(ColumnDef::new(ForumThread::Tags).json_binary().not_null())
                    .col(
                        ColumnDef::new(ForumThread::Language)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThread::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ForumThread::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ForumThread::ModerationStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ForumThread::ModeratedBy).string_len(36))
                    .col(ColumnDef::new(ForumThread::ModeratedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ForumThread::ModerationNotes).text())
                    .col(
                        ColumnDef::new(ForumThread::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ForumThread::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ForumThread::ReplyCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ForumThread::LastReplyAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ForumThread::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ForumThread::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_thread_author")
                            .from(ForumThread::Table, ForumThread::AuthorId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_thread_author_id")
                    .table(ForumThread::Table)
                    .col(ForumThread::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_thread_category")
                    .table(ForumThread::Table)
                    .col(ForumThread::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_thread_moderation_status")
                    .table(ForumThread::Table)
                    .col(ForumThread::ModerationStatus)
                    .to_owned(),
            )
            .await?;

        // Create forum_reply table
        manager
            .create_table(
                Table::create()
                    .table(ForumReply::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForumReply::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ForumReply::ThreadId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumReply::AuthorId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ForumReply::Content).text().not_null())
                    .col(
                        ColumnDef::new(ForumReply::ModerationStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ForumReply::ModeratedBy).string_len(36))
                    .col(ColumnDef::new(ForumReply::ModeratedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ForumReply::ModerationNotes).text())
                    .col(
                        ColumnDef::new(ForumReply::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ForumReply::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ForumReply::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_reply_thread")
                            .from(ForumReply::Table, ForumReply::ThreadId)
                            .to(ForumThread::Table, ForumThread::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_reply_author")
                            .from(ForumReply::Table, ForumReply::AuthorId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_reply_thread_id")
                    .table(ForumReply::Table)
                    .col(ForumReply::ThreadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_reply_author_id")
                    .table(ForumReply::Table)
                    .col(ForumReply::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_reply_moderation_status")
                    .table(ForumReply::Table)
                    .col(ForumReply::ModerationStatus)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumReply::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ForumThread::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ForumThread {
    Table,
    Id,
    AuthorId,
    Category,
    Title,
    Content,
    Tags,
    Language,
    IsLocked,
    IsPinned,
    ModerationStatus,
    ModeratedBy,
    ModeratedAt,
    ModerationNotes,
    ViewCount,
    LikeCount,
    ReplyCount,
    LastReplyAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ForumReply {
    Table,
    Id,
    ThreadId,
    AuthorId,
    Content,
    ModerationStatus,
    ModeratedBy,
    ModeratedAt,
    ModerationNotes,
    LikeCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    Id,
}
