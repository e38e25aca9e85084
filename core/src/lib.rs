/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod error;
pub mod input;
pub mod jobs;
pub mod permission;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use database::connect_db;
use std::sync::Arc;
use types::*;

pub async fn init_state(cli: Cli) -> Result<Arc<ServerState>> {
    tracing::info!("Starting Automax Server on {}:{}", cli.ip, cli.port);

    let jwt_secret =
        input::load_secret(&cli.jwt_secret_file).context("Failed to load JWT secret")?;

    let db = connect_db(&cli).await?;
    state::load_and_apply_state(&db, cli.state_file.as_deref()).await?;

    Ok(Arc::new(ServerState { db, cli, jwt_secret }))
}
