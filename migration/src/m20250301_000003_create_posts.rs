use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_projects::Projects;
use crate::m20250301_000002_create_pipelines_and_tasks::Pipelines;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::PipelineId).uuid().not_null())
                    .col(ColumnDef::new(Posts::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_pipeline_id")
                            .from(Posts::Table, Posts::PipelineId)
                            .to(Pipelines::Table, Pipelines::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_project_id")
                            .from(Posts::Table, Posts::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_pipeline_id")
                    .table(Posts::Table)
                    .col(Posts::PipelineId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_project_created_at")
                    .table(Posts::Table)
                    .col(Posts::ProjectId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PostItems::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostItems::Position).integer().not_null())
                    .col(ColumnDef::new(PostItems::Title).text().not_null())
                    .col(ColumnDef::new(PostItems::Link).text().not_null())
                    .col(ColumnDef::new(PostItems::Content).text().not_null())
                    .col(ColumnDef::new(PostItems::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PostItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_items_post_id")
                            .from(PostItems::Table, PostItems::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    PipelineId,
    ProjectId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PostItems {
    Table,
    Id,
    PostId,
    Position,
    Title,
    Link,
    Content,
    PublishedAt,
    CreatedAt,
}
