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
        manager.create_table(job_table()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-job-branch")
                    .table(Job::Table)
                    .col(Job::Branch)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await
    }
}

/// A job keeps its driver while `InProgress`, so drivers with assigned jobs
/// cannot be deleted.
fn job_table() -> TableCreateStatement {
    Table::create()
        .table(Job::Table)
        .if_not_exists()
        .col(ColumnDef::new(Job::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Job::Description).text().not_null())
        .col(ColumnDef::new(Job::Branch).string_len(50).null())
        .col(ColumnDef::new(Job::CreatedBy).uuid().not_null())
        .col(ColumnDef::new(Job::AssignedDriver).uuid().null())
        .col(ColumnDef::new(Job::Status).integer().not_null().default(0))
        .col(ColumnDef::new(Job::CreatedAt).date_time().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk-job-created_by")
                .from(Job::Table, Job::CreatedBy)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk-job-assigned_driver")
                .from(Job::Table, Job::AssignedDriver)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    Description,
    Branch,
    CreatedBy,
    AssignedDriver,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
