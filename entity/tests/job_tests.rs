/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for job and job stop entities

use chrono::NaiveDate;
use entity::job::JobStatus;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, QueryOrder, entity::prelude::*};
use uuid::Uuid;

#[tokio::test]
async fn test_job_entity_basic() -> Result<(), DbErr> {
    let job_id = Uuid::new_v4();
    let creator = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![job::Model {
            id: job_id,
            description: "Deliver pallet".to_owned(),
            branch: Some("Rome".to_owned()),
            created_by: creator,
            assigned_driver: None,
            status: JobStatus::Pending,
            created_at: naive_date,
        }]])
        .into_connection();

    let result = job::Entity::find_by_id(job_id).one(&db).await?;

    let job = result.unwrap();
    assert_eq!(job.description, "Deliver pallet");
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.assigned_driver.is_none());

    Ok(())
}

#[tokio::test]
async fn test_job_stops_ordered_by_sequence() -> Result<(), DbErr> {
    let job_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            job_stop::Model {
                id: Uuid::new_v4(),
                job: job_id,
                sequence: 1,
                location: "Rome Depot".to_owned(),
                estimated_drive_time: Some(45),
                completed: false,
                completed_at: None,
            },
            job_stop::Model {
                id: Uuid::new_v4(),
                job: job_id,
                sequence: 2,
                location: "Milan Hub".to_owned(),
                estimated_drive_time: None,
                completed: false,
                completed_at: None,
            },
        ]])
        .into_connection();

    let stops = job_stop::Entity::find()
        .filter(job_stop::Column::Job.eq(job_id))
        .order_by_asc(job_stop::Column::Sequence)
        .all(&db)
        .await?;

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].location, "Rome Depot");
    assert_eq!(stops[1].sequence, 2);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("ORDER BY"));

    Ok(())
}
