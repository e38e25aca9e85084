/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use automax_core::jobs::{self, Dashboard};
use automax_core::permission::{Action, is_permitted};
use automax_core::types::*;
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn get_dashboard(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Dashboard>>> {
    if !is_permitted(&user, Action::ViewDashboard, None) {
        return Err(WebError::Forbidden("Dashboard not available".to_string()));
    }

    let dashboard = jobs::get_dashboard(&state.db, &user).await?;

    let res = BaseResponse {
        error: false,
        message: dashboard,
    };

    Ok(Json(res))
}
