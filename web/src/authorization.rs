/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use automax_core::consts::SESSION_COOKIE;
use automax_core::types::*;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
}

/// Requires a valid session and exposes the user as an `MUser` extension.
pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> WebResult<Response<Body>> {
    let current_user = session_user(&state, req.headers())
        .await?
        .ok_or(WebError::LoginRequired)?;

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Resolves the user behind the request, if any. Broken or expired tokens
/// and tokens of deleted users count as no session.
pub async fn session_user(state: &ServerState, headers: &HeaderMap) -> WebResult<Option<MUser>> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };

    let token_data = match decode_jwt(state, &token) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            return Ok(None);
        }
    };

    Ok(EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await?)
}

/// Bearer header first, then the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

pub fn encode_jwt(state: &ServerState, id: Uuid) -> WebResult<String> {
    let now = Utc::now();
    let expire = Duration::hours(state.cli.session_lifetime_hours);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;

    let claim = Claims { iat, exp, id };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to encode session token: {}", e);
        WebError::failed_to_generate_token()
    })
}

pub fn decode_jwt(
    state: &ServerState,
    jwt: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    decode(
        jwt,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
}

pub fn session_cookie(state: &ServerState, token: &str) -> String {
    let max_age = Duration::hours(state.cli.session_lifetime_hours).num_seconds();
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );

    if state.cli.secure_cookie {
        cookie.push_str("; Secure");
    }

    cookie
}

pub fn clear_session_cookie(state: &ServerState) -> String {
    let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);

    if state.cli.secure_cookie {
        cookie.push_str("; Secure");
    }

    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(COOKIE, HeaderValue::from_static("automax_session=def"));

        assert_eq!(session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; automax_session=def; lang=it"),
        );

        assert_eq!(session_token(&headers).as_deref(), Some("def"));
    }

    #[test]
    fn test_session_token_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(COOKIE, HeaderValue::from_static("automax_session="));
        assert_eq!(session_token(&headers), None);
    }
}
