/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use automax_core::database::{NewUser, create_user, get_users};
use automax_core::permission::{Action, is_permitted};
use automax_core::types::*;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn get_user_list(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MUser>>>> {
    if !is_permitted(&user, Action::ManageUsers, None) {
        return Err(WebError::admin_only("manage users"));
    }

    let users = get_users(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: users,
    };

    Ok(Json(res))
}

pub async fn post_user(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> WebResult<Json<BaseResponse<MUser>>> {
    if !is_permitted(&user, Action::ManageUsers, None) {
        return Err(WebError::admin_only("manage users"));
    }

    let Json(body) = body?;
    let created = create_user(&state.db, body).await?;

    let res = BaseResponse {
        error: false,
        message: created,
    };

    Ok(Json(res))
}
