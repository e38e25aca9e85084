/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{clear_session_cookie, encode_jwt, session_cookie, session_user};
use crate::error::{WebError, WebResult};
use automax_core::database::{get_user_by_username, update_last_login};
use automax_core::types::*;
use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::{Extension, Json};
use password_auth::{generate_hash, verify_password};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| generate_hash("automax-dummy-password"));

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginView {
    pub fields: Vec<String>,
}

pub async fn get_index(
    state: State<Arc<ServerState>>,
    headers: HeaderMap,
) -> WebResult<Redirect> {
    match session_user(&state, &headers).await? {
        Some(_) => Ok(Redirect::to("/dashboard")),
        None => Ok(Redirect::to("/login")),
    }
}

pub async fn get_login() -> WebResult<Json<BaseResponse<LoginView>>> {
    let res = BaseResponse {
        error: false,
        message: LoginView {
            fields: vec!["username".to_string(), "password".to_string()],
        },
    };

    Ok(Json(res))
}

/// Unknown users are verified against a dummy hash, so both failure cases
/// do the same argon2 work.
fn check_credentials(password: &str, user: Option<&MUser>) -> bool {
    match user {
        Some(user) => verify_password(password, &user.password).is_ok(),
        None => {
            let _ = verify_password(password, &DUMMY_HASH);
            false
        }
    }
}

/// Unknown users and wrong passwords produce the same response.
pub async fn post_login(
    state: State<Arc<ServerState>>,
    Form(body): Form<MakeLoginRequest>,
) -> WebResult<Response> {
    let user = match get_user_by_username(&state.db, &body.username).await? {
        Some(user) if check_credentials(&body.password, Some(&user)) => user,
        Some(user) => {
            tracing::info!(user = %user.username, "Login failed");
            return Err(WebError::invalid_credentials());
        }
        None => {
            check_credentials(&body.password, None);
            tracing::info!("Login failed for unknown user");
            return Err(WebError::invalid_credentials());
        }
    };

    let user = update_last_login(&state.db, user).await?;
    let token = encode_jwt(&state, user.id)?;

    tracing::info!(user = %user.username, role = %user.role, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state, &token))]),
        Redirect::to("/dashboard"),
    )
        .into_response())
}

pub async fn get_logout(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Response> {
    tracing::info!(user = %user.username, "User logged out");

    let res = BaseResponse {
        error: false,
        message: "Logout Successfully".to_string(),
    };

    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie(&state))]),
        Json(res),
    )
        .into_response())
}
