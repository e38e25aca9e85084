/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use automax_core::types::*;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use entity::job::JobStatus;
use entity::user::UserRole;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

pub const JWT_SECRET: &str = "automax-test-secret";

pub fn create_mock_cli() -> Cli {
    Cli {
        log_level: "debug".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 10000,
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: "/nonexistent/automax/jwt".to_string(),
        session_lifetime_hours: 24,
        secure_cookie: false,
        state_file: None,
        report_errors: false,
        sentry_dsn: None,
    }
}

pub fn create_state(db: DatabaseConnection) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: create_mock_cli(),
        jwt_secret: JWT_SECRET.to_string(),
    })
}

pub fn create_server(state: Arc<ServerState>) -> TestServer {
    TestServer::new(web::create_router(state)).unwrap()
}

pub fn token_for(state: &ServerState, user: &MUser) -> String {
    web::authorization::encode_jwt(state, user.id).unwrap()
}

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
