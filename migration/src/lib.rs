/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250210_120000_create_table_user;
mod m20250210_120100_create_table_job;
mod m20250210_120200_create_table_job_stop;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_120000_create_table_user::Migration),
            Box::new(m20250210_120100_create_table_job::Migration),
            Box::new(m20250210_120200_create_table_job_stop::Migration),
        ]
    }
}
