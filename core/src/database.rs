/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use entity::user::UserRole;
use migration::Migrator;
use password_auth::generate_hash;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::error::{CoreError, CoreResult};
use super::input::{check_username, normalize_branch, normalize_username};
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file)
            .context("Failed to read database url from file")?
            .trim()
            .to_string()
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    Ok(db)
}

/// Drops every table and recreates the schema from scratch.
pub async fn reset_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::warn!("Resetting database schema");
    Migrator::fresh(db).await
}

/// Applies pending migrations and returns how many ran.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?.len();
    Migrator::up(db, None).await?;
    tracing::info!(applied = pending, "Applied database migrations");
    Ok(pending)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Managers must belong to a branch, the other roles keep whatever was given.
pub fn check_new_user(new_user: &NewUser) -> CoreResult<(String, Option<String>)> {
    let username = normalize_username(&new_user.username);
    check_username(&username).map_err(CoreError::Validation)?;

    if new_user.password.is_empty() {
        return Err(CoreError::validation("Password cannot be empty"));
    }

    let branch = normalize_branch(new_user.branch.as_deref()).map_err(CoreError::Validation)?;

    if new_user.role == UserRole::Manager && branch.is_none() {
        return Err(CoreError::validation("Managers must belong to a branch"));
    }

    Ok((username, branch))
}

pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<MUser>, DbErr> {
    EUser::find()
        .filter(CUser::Username.eq(normalize_username(username)))
        .one(db)
        .await
}

pub async fn get_users(db: &DatabaseConnection) -> Result<Vec<MUser>, DbErr> {
    EUser::find().order_by_asc(CUser::Username).all(db).await
}

pub async fn create_user(db: &DatabaseConnection, new_user: NewUser) -> CoreResult<MUser> {
    let (username, branch) = check_new_user(&new_user)?;

    if get_user_by_username(db, &username).await?.is_some() {
        return Err(CoreError::AlreadyExists("User"));
    }

    let now = Utc::now().naive_utc();

    let user = AUser {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        password: Set(generate_hash(&new_user.password)),
        role: Set(new_user.role),
        branch: Set(branch),
        last_login_at: Set(now),
        created_at: Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(user = %user.username, role = %user.role, "Created user");

    Ok(user)
}

pub async fn update_last_login(db: &DatabaseConnection, user: MUser) -> Result<MUser> {
    let mut auser: AUser = user.into();

    auser.last_login_at = Set(Utc::now().naive_utc());
    auser
        .update(db)
        .await
        .context("Failed to update user last login")
}
