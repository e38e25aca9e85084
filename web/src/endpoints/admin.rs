/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Schema maintenance. Failures are reported to the admin verbatim.

use crate::error::{WebError, WebResult};
use automax_core::database::{reset_schema, run_migrations};
use automax_core::permission::{Action, is_permitted};
use automax_core::state::load_and_apply_state;
use automax_core::types::*;
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

fn ok(message: String) -> WebResult<Json<BaseResponse<String>>> {
    Ok(Json(BaseResponse {
        error: false,
        message,
    }))
}

pub async fn get_reset_database(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_permitted(&user, Action::RunAdminOp, None) {
        return Err(WebError::admin_only("reset the database"));
    }

    reset_schema(&state.db)
        .await
        .map_err(WebError::maintenance_failed)?;
    load_and_apply_state(&state.db, state.cli.state_file.as_deref())
        .await
        .map_err(WebError::maintenance_failed)?;

    tracing::warn!(user = %user.username, "Database reset");

    ok("Database reset successfully".to_string())
}

pub async fn get_run_migrations(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_permitted(&user, Action::RunAdminOp, None) {
        return Err(WebError::admin_only("run migrations"));
    }

    run_migrations(&state.db)
        .await
        .map_err(WebError::maintenance_failed)?;

    ok("Migrations applied successfully".to_string())
}

pub async fn get_createdb(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_permitted(&user, Action::RunAdminOp, None) {
        return Err(WebError::admin_only("create the database"));
    }

    run_migrations(&state.db)
        .await
        .map_err(WebError::maintenance_failed)?;
    load_and_apply_state(&state.db, state.cli.state_file.as_deref())
        .await
        .map_err(WebError::maintenance_failed)?;

    ok("Database created successfully".to_string())
}

pub async fn get_updatedb(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    if !is_permitted(&user, Action::RunAdminOp, None) {
        return Err(WebError::admin_only("update the database"));
    }

    let applied = run_migrations(&state.db)
        .await
        .map_err(WebError::maintenance_failed)?;

    ok(format!("Database updated, {} migrations applied", applied))
}
