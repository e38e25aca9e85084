/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone)]
#[command(name = "Automax", display_name = "Automax", bin_name = "automax-server", author = "Automax Transport", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "AUTOMAX_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "AUTOMAX_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "AUTOMAX_PORT", value_parser = port_in_range, default_value_t = 10000)]
    pub port: u16,
    #[arg(long, env = "AUTOMAX_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "AUTOMAX_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "AUTOMAX_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "AUTOMAX_SESSION_LIFETIME_HOURS", value_parser = greater_than_zero::<i64>, default_value = "24")]
    pub session_lifetime_hours: i64,
    #[arg(long, env = "AUTOMAX_SECURE_COOKIE", default_value = "false")]
    pub secure_cookie: bool,
    #[arg(long, env = "AUTOMAX_STATE_FILE")]
    pub state_file: Option<String>,
    #[arg(long, env = "AUTOMAX_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
    #[arg(long, env = "AUTOMAX_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
    /// HMAC key for session tokens, loaded once at startup.
    pub jwt_secret: String,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("db", &self.db)
            .field("cli", &self.cli)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

pub type EJob = job::Entity;
pub type EJobStop = job_stop::Entity;
pub type EUser = user::Entity;

pub type MJob = job::Model;
pub type MJobStop = job_stop::Model;
pub type MUser = user::Model;

pub type AJob = job::ActiveModel;
pub type AJobStop = job_stop::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CJob = job::Column;
pub type CJobStop = job_stop::Column;
pub type CUser = user::Column;

pub type RJob = job::Relation;
pub type RJobStop = job_stop::Relation;
pub type RUser = user::Relation;
