/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use automax_core::types::*;
use chrono::{NaiveDate, NaiveDateTime};
use entity::job::JobStatus;
use entity::user::UserRole;
use uuid::Uuid;

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn user(username: &str, role: UserRole, branch: Option<&str>) -> MUser {
    MUser {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password: "hash".to_string(),
        role,
        branch: branch.map(str::to_string),
        last_login_at: timestamp(),
        created_at: timestamp(),
    }
}

pub fn admin() -> MUser {
    user("admin", UserRole::Admin, None)
}

pub fn manager(branch: &str) -> MUser {
    user("manager", UserRole::Manager, Some(branch))
}

pub fn driver(username: &str) -> MUser {
    user(username, UserRole::Driver, None)
}

pub fn job(branch: Option<&str>, assigned_driver: Option<Uuid>) -> MJob {
    MJob {
        id: Uuid::new_v4(),
        description: "Deliver pallet".to_string(),
        branch: branch.map(str::to_string),
        created_by: Uuid::new_v4(),
        assigned_driver,
        status: if assigned_driver.is_some() {
            JobStatus::InProgress
        } else {
            JobStatus::Pending
        },
        created_at: timestamp(),
    }
}

pub fn stop(job_id: Uuid, sequence: i32, location: &str) -> MJobStop {
    MJobStop {
        id: Uuid::new_v4(),
        job: job_id,
        sequence,
        location: location.to_string(),
        estimated_drive_time: None,
        completed: false,
        completed_at: None,
    }
}
