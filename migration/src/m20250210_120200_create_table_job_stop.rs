/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobStop::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobStop::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobStop::Job).uuid().not_null())
                    .col(ColumnDef::new(JobStop::Sequence).integer().not_null())
                    .col(ColumnDef::new(JobStop::Location).string().not_null())
                    .col(ColumnDef::new(JobStop::EstimatedDriveTime).integer().null())
                    .col(
                        ColumnDef::new(JobStop::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(JobStop::CompletedAt).date_time().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_stop-job")
                            .from(JobStop::Table, JobStop::Job)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-job_stop-job-sequence")
                    .table(JobStop::Table)
                    .col(JobStop::Job)
                    .col(JobStop::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobStop::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobStop {
    Table,
    Id,
    Job,
    Sequence,
    Location,
    EstimatedDriveTime,
    Completed,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
}
