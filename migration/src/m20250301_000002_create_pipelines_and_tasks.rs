use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pipelines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pipelines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pipelines::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Pipelines::Sequence).big_integer().not_null())
                    .col(
                        ColumnDef::new(Pipelines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Pipelines::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pipelines_project_id")
                            .from(Pipelines::Table, Pipelines::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One pipeline per (project, sequence): concurrent reconcilers that observed
        // the same predecessor collapse onto a single row.
        manager
            .create_index(
                Index::create()
                    .name("idx_pipelines_project_sequence")
                    .table(Pipelines::Table)
                    .col(Pipelines::ProjectId)
                    .col(Pipelines::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tasks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tasks::PipelineId).uuid().not_null())
                    .col(ColumnDef::new(Tasks::TaskType).string().not_null())
                    .col(ColumnDef::new(Tasks::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_pipeline_id")
                            .from(Tasks::Table, Tasks::PipelineId)
                            .to(Pipelines::Table, Pipelines::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_pipeline_type")
                    .table(Tasks::Table)
                    .col(Tasks::PipelineId)
                    .col(Tasks::TaskType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Workers poll by (type, status) every tick
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_type_status")
                    .table(Tasks::Table)
                    .col(Tasks::TaskType)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pipelines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Pipelines {
    Table,
    Id,
    ProjectId,
    Sequence,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    PipelineId,
    TaskType,
    Status,
    CreatedAt,
    UpdatedAt,
}
