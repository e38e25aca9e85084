/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use entity::job::JobStatus;
use entity::user::UserRole;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{CoreError, CoreResult};
use super::input::{check_description, check_drive_time, check_location};
use super::permission::*;
use super::types::*;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewStop {
    pub location: String,
    #[serde(default)]
    pub estimated_drive_time: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub description: String,
    pub branch: Option<String>,
    pub stops: Vec<NewStop>,
}

/// Fields left as `None` stay untouched. `stops` replaces the whole route.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub description: Option<String>,
    pub branch: Option<String>,
    pub stops: Option<Vec<NewStop>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobWithStops {
    #[serde(flatten)]
    pub job: MJob,
    pub stops: Vec<MJobStop>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard {
    Admin {
        jobs: Vec<MJob>,
    },
    Manager {
        branch: Option<String>,
        jobs: Vec<MJob>,
    },
    Driver {
        available_jobs: Vec<MJob>,
        accepted_jobs: Vec<MJob>,
    },
}

/// Turns submitted stops into rows with `sequence = position + 1`.
pub fn plan_stops(job_id: Uuid, stops: &[NewStop]) -> CoreResult<Vec<AJobStop>> {
    stops
        .iter()
        .enumerate()
        .map(|(position, stop)| -> CoreResult<AJobStop> {
            Ok(AJobStop {
                id: Set(Uuid::new_v4()),
                job: Set(job_id),
                sequence: Set(position as i32 + 1),
                location: Set(check_location(&stop.location).map_err(CoreError::Validation)?),
                estimated_drive_time: Set(
                    check_drive_time(stop.estimated_drive_time).map_err(CoreError::Validation)?
                ),
                completed: Set(false),
                completed_at: Set(None),
            })
        })
        .collect()
}

async fn insert_stops<C: ConnectionTrait>(
    db: &C,
    stops: Vec<AJobStop>,
) -> CoreResult<Vec<MJobStop>> {
    let mut inserted = Vec::with_capacity(stops.len());

    for stop in stops {
        inserted.push(stop.insert(db).await?);
    }

    Ok(inserted)
}

pub async fn get_job(db: &DatabaseConnection, job_id: Uuid) -> CoreResult<MJob> {
    EJob::find_by_id(job_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("Job"))
}

pub async fn get_stops_for_job<C: ConnectionTrait>(
    db: &C,
    job_id: Uuid,
) -> CoreResult<Vec<MJobStop>> {
    Ok(EJobStop::find()
        .filter(CJobStop::Job.eq(job_id))
        .order_by_asc(CJobStop::Sequence)
        .all(db)
        .await?)
}

/// Loads the job and checks `action` against the role policy.
pub async fn get_permitted_job(
    db: &DatabaseConnection,
    user: &MUser,
    job_id: Uuid,
    action: Action,
) -> CoreResult<MJob> {
    let job = get_job(db, job_id).await?;

    if !is_permitted(user, action, Some(&job)) {
        tracing::debug!(user = %user.username, job = %job_id, ?action, "Action denied");
        return Err(CoreError::Forbidden);
    }

    Ok(job)
}

pub async fn get_visible_job(
    db: &DatabaseConnection,
    user: &MUser,
    job_id: Uuid,
) -> CoreResult<JobWithStops> {
    let job = get_permitted_job(db, user, job_id, Action::ViewJob).await?;
    let stops = get_stops_for_job(db, job.id).await?;
    Ok(JobWithStops { job, stops })
}

pub async fn get_editable_job(
    db: &DatabaseConnection,
    user: &MUser,
    job_id: Uuid,
) -> CoreResult<JobWithStops> {
    let job = get_permitted_job(db, user, job_id, Action::EditJob).await?;
    let stops = get_stops_for_job(db, job.id).await?;
    Ok(JobWithStops { job, stops })
}

pub async fn create_job(
    db: &DatabaseConnection,
    creator: &MUser,
    new_job: NewJob,
) -> CoreResult<JobWithStops> {
    if !is_permitted(creator, Action::CreateJob, None) {
        return Err(CoreError::Forbidden);
    }

    let description = check_description(&new_job.description).map_err(CoreError::Validation)?;
    let branch =
        resolve_branch(creator, new_job.branch.as_deref()).map_err(CoreError::Validation)?;

    let job_id = Uuid::new_v4();
    let stops = plan_stops(job_id, &new_job.stops)?;

    let txn = db.begin().await?;

    let job = AJob {
        id: Set(job_id),
        description: Set(description),
        branch: Set(branch),
        created_by: Set(creator.id),
        assigned_driver: Set(None),
        status: Set(JobStatus::Pending),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&txn)
    .await?;

    let stops = insert_stops(&txn, stops).await?;

    txn.commit().await?;

    tracing::info!(
        job = %job.id,
        created_by = %creator.username,
        stops = stops.len(),
        "Created job"
    );

    Ok(JobWithStops { job, stops })
}

pub async fn update_job(
    db: &DatabaseConnection,
    user: &MUser,
    job_id: Uuid,
    update: JobUpdate,
) -> CoreResult<JobWithStops> {
    let job = get_permitted_job(db, user, job_id, Action::EditJob).await?;

    let description = update
        .description
        .as_deref()
        .map(check_description)
        .transpose()
        .map_err(CoreError::Validation)?;

    // Managers cannot move a job out of their branch.
    let branch = match (user.role, update.branch.as_deref()) {
        (UserRole::Admin, Some(branch)) => {
            Some(resolve_branch(user, Some(branch)).map_err(CoreError::Validation)?)
        }
        _ => None,
    };

    let stops = update
        .stops
        .as_deref()
        .map(|stops| plan_stops(job.id, stops))
        .transpose()?;

    let txn = db.begin().await?;

    let mut ajob: AJob = job.clone().into();

    if let Some(description) = description {
        ajob.description = Set(description);
    }

    if let Some(branch) = branch {
        ajob.branch = Set(branch);
    }

    let job = if ajob.is_changed() {
        ajob.update(&txn).await?
    } else {
        job
    };

    let stops = match stops {
        Some(stops) => {
            EJobStop::delete_many()
                .filter(CJobStop::Job.eq(job.id))
                .exec(&txn)
                .await?;
            insert_stops(&txn, stops).await?
        }
        None => get_stops_for_job(&txn, job.id).await?,
    };

    txn.commit().await?;

    tracing::info!(job = %job.id, updated_by = %user.username, "Updated job");

    Ok(JobWithStops { job, stops })
}

pub async fn delete_job(db: &DatabaseConnection, user: &MUser, job_id: Uuid) -> CoreResult<()> {
    let job = get_permitted_job(db, user, job_id, Action::DeleteJob).await?;

    let txn = db.begin().await?;

    EJobStop::delete_many()
        .filter(CJobStop::Job.eq(job.id))
        .exec(&txn)
        .await?;
    EJob::delete_by_id(job.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(job = %job.id, deleted_by = %user.username, "Deleted job");

    Ok(())
}

/// Assigns the driver only if nobody else did first. The conditional update
/// is the single point deciding who wins concurrent accepts.
pub async fn accept_job(db: &DatabaseConnection, driver: &MUser, job_id: Uuid) -> CoreResult<MJob> {
    let job = get_permitted_job(db, driver, job_id, Action::AcceptJob).await?;

    if job.assigned_driver.is_some() {
        return Err(CoreError::AlreadyTaken);
    }

    if !job.status.can_transition_to(&JobStatus::InProgress) {
        return Err(CoreError::InvalidTransition {
            from: job.status,
            to: JobStatus::InProgress,
        });
    }

    let result = EJob::update_many()
        .col_expr(CJob::AssignedDriver, Expr::value(driver.id))
        .col_expr(CJob::Status, Expr::value(JobStatus::InProgress))
        .filter(CJob::Id.eq(job.id))
        .filter(CJob::AssignedDriver.is_null())
        .filter(CJob::Status.eq(JobStatus::Pending))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        tracing::warn!(job = %job.id, driver = %driver.username, "Lost race accepting job");
        return Err(CoreError::AlreadyTaken);
    }

    tracing::info!(job = %job.id, driver = %driver.username, "Job accepted");

    Ok(MJob {
        assigned_driver: Some(driver.id),
        status: JobStatus::InProgress,
        ..job
    })
}

pub async fn complete_job(db: &DatabaseConnection, user: &MUser, job_id: Uuid) -> CoreResult<MJob> {
    let job = get_permitted_job(db, user, job_id, Action::CompleteJob).await?;

    if !job.status.can_transition_to(&JobStatus::Completed) {
        return Err(CoreError::InvalidTransition {
            from: job.status,
            to: JobStatus::Completed,
        });
    }

    let mut ajob: AJob = job.into();
    ajob.status = Set(JobStatus::Completed);
    let job = ajob.update(db).await?;

    tracing::info!(job = %job.id, completed_by = %user.username, "Job completed");

    Ok(job)
}

/// Marks a single stop as reached. Does not touch the job status.
pub async fn complete_stop(
    db: &DatabaseConnection,
    user: &MUser,
    stop_id: Uuid,
) -> CoreResult<MJobStop> {
    let stop = EJobStop::find_by_id(stop_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("Stop"))?;

    let job = get_permitted_job(db, user, stop.job, Action::CompleteStop).await?;

    if job.status != JobStatus::InProgress {
        return Err(CoreError::NotInProgress);
    }

    if stop.completed {
        return Ok(stop);
    }

    let mut astop: AJobStop = stop.into();
    astop.completed = Set(true);
    astop.completed_at = Set(Some(Utc::now().naive_utc()));
    let stop = astop.update(db).await?;

    tracing::info!(job = %job.id, sequence = stop.sequence, "Stop completed");

    Ok(stop)
}

pub async fn get_dashboard(db: &DatabaseConnection, user: &MUser) -> CoreResult<Dashboard> {
    let dashboard = match user.role {
        UserRole::Admin => Dashboard::Admin {
            jobs: EJob::find()
                .order_by_desc(CJob::CreatedAt)
                .all(db)
                .await?,
        },
        UserRole::Manager => Dashboard::Manager {
            branch: user.branch.clone(),
            jobs: EJob::find()
                .filter(manager_visibility(user.branch.as_deref()))
                .order_by_desc(CJob::CreatedAt)
                .all(db)
                .await?,
        },
        UserRole::Driver => Dashboard::Driver {
            available_jobs: EJob::find()
                .filter(driver_available())
                .order_by_desc(CJob::CreatedAt)
                .all(db)
                .await?,
            accepted_jobs: EJob::find()
                .filter(driver_accepted(user.id))
                .order_by_desc(CJob::CreatedAt)
                .all(db)
                .await?,
        },
    };

    Ok(dashboard)
}
