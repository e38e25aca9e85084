/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Role policy: which user may see or change which job.
//!
//! Admins may do everything except accept jobs. Managers work on jobs of
//! their own branch and can additionally see jobs without a branch. Drivers
//! see unassigned jobs plus the ones they accepted, and never create, edit
//! or delete jobs.

use entity::user::UserRole;
use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use super::input::normalize_branch;
use super::types::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ViewDashboard,
    ViewJob,
    CreateJob,
    EditJob,
    DeleteJob,
    AcceptJob,
    CompleteJob,
    CompleteStop,
    RunAdminOp,
    ManageUsers,
}

pub fn is_admin(user: &MUser) -> bool {
    user.role == UserRole::Admin
}

/// Both sides need a branch; a branchless job never matches a manager.
pub fn same_branch(user: &MUser, job: &MJob) -> bool {
    match (&user.branch, &job.branch) {
        (Some(user_branch), Some(job_branch)) => user_branch == job_branch,
        _ => false,
    }
}

pub fn is_assigned_driver(user: &MUser, job: &MJob) -> bool {
    job.assigned_driver == Some(user.id)
}

pub fn can_view_job(user: &MUser, job: &MJob) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::Manager => job.branch.is_none() || same_branch(user, job),
        UserRole::Driver => job.assigned_driver.is_none() || is_assigned_driver(user, job),
    }
}

pub fn is_permitted(user: &MUser, action: Action, job: Option<&MJob>) -> bool {
    match (user.role, action) {
        (_, Action::ViewDashboard) => true,
        (_, Action::ViewJob) => job.is_some_and(|j| can_view_job(user, j)),
        (UserRole::Admin, Action::AcceptJob) => false,
        (UserRole::Admin, _) => true,
        (UserRole::Manager, Action::CreateJob) => true,
        (UserRole::Manager, Action::EditJob | Action::DeleteJob | Action::CompleteJob) => {
            job.is_some_and(|j| same_branch(user, j))
        }
        (UserRole::Driver, Action::AcceptJob) => true,
        (UserRole::Driver, Action::CompleteJob | Action::CompleteStop) => {
            job.is_some_and(|j| is_assigned_driver(user, j))
        }
        _ => false,
    }
}

/// Branch a new job is filed under. Managers always post into their own
/// branch, admins choose freely.
pub fn resolve_branch(user: &MUser, requested: Option<&str>) -> Result<Option<String>, String> {
    match user.role {
        UserRole::Admin => normalize_branch(requested),
        UserRole::Manager => Ok(user.branch.clone()),
        UserRole::Driver => Ok(None),
    }
}

pub fn manager_visibility(branch: Option<&str>) -> Condition {
    let condition = Condition::any().add(CJob::Branch.is_null());

    match branch {
        Some(branch) => condition.add(CJob::Branch.eq(branch)),
        None => condition,
    }
}

pub fn driver_available() -> Condition {
    Condition::all().add(CJob::AssignedDriver.is_null())
}

pub fn driver_accepted(driver_id: Uuid) -> Condition {
    Condition::all().add(CJob::AssignedDriver.eq(driver_id))
}
