//! Migration: Create the questions table.
//!
//! Tags, voter list, and the AI analysis sub-document are JSON columns,
//! matching the document shapes of the original data model.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Questions::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::Description).text().not_null())
                    .col(ColumnDef::new(Questions::Tags).json().not_null())
                    .col(ColumnDef::new(Questions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Questions::Votes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Questions::Voters).json().not_null())
                    .col(
                        ColumnDef::new(Questions::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Questions::Views)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Questions::IsAnswered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Questions::AcceptedAnswerId).uuid().null())
                    .col(ColumnDef::new(Questions::AiAnalysis).json().null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_user_id")
                            .from(Questions::Table, Questions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_status")
                    .table(Questions::Table)
                    .col(Questions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_user_created")
                    .table(Questions::Table)
                    .col(Questions::UserId)
                    .col(Questions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Questions {
    Table,
    Id,
    Title,
    Description,
    Tags,
    UserId,
    Votes,
    Voters,
    Status,
    Views,
    IsAnswered,
    AcceptedAnswerId,
    AiAnalysis,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
