/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use automax_core::types::MUser;
use axum::http::{HeaderValue, StatusCode, header};
use common::*;
use entity::user::UserRole;
use jsonwebtoken::{EncodingKey, Header, encode};
use password_auth::generate_hash;
use sea_orm::{DatabaseBackend, MockDatabase};
use web::authorization::Claims;
use web::endpoints::auth::MakeLoginRequest;

fn login(username: &str, password: &str) -> MakeLoginRequest {
    MakeLoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let mut admin = user("admin", UserRole::Admin, None);
    admin.password = generate_hash("admin123");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .append_query_results([vec![admin.clone()]])
        .into_connection();
    let server = create_server(create_state(db));

    let response = server.post("/login").form(&login("Admin", "admin123")).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/dashboard");

    let cookie = response.header(header::SET_COOKIE);
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("automax_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_invalid_credentials_are_indistinguishable() {
    let mut manager = user("manager", UserRole::Manager, Some("Rome"));
    manager.password = generate_hash("manager123");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MUser>::new()])
        .append_query_results([vec![manager]])
        .into_connection();
    let server = create_server(create_state(db));

    let unknown_user = server.post("/login").form(&login("nobody", "x")).await;
    let wrong_password = server.post("/login").form(&login("manager", "x")).await;

    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.text(), wrong_password.text());

    let body: serde_json::Value = unknown_user.json();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_session_routes_redirect_to_login() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = create_server(create_state(db));

    for path in ["/dashboard", "/post_job", "/users", "/logout"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(response.header(header::LOCATION), "/login", "{}", path);
    }

    let response = server
        .get("/dashboard")
        .authorization_bearer("not-a-token")
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");
}

#[tokio::test]
async fn test_session_of_deleted_user_redirects_to_login() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MUser>::new()])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &user("gone", UserRole::Driver, None));
    let server = create_server(state);

    let response = server.get("/dashboard").authorization_bearer(token).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");
}

#[tokio::test]
async fn test_index_redirects_by_session() {
    let driver = user("driver", UserRole::Driver, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![driver.clone()]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &driver);
    let server = create_server(state);

    let anonymous = server.get("/").await;
    assert_eq!(anonymous.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(anonymous.header(header::LOCATION), "/login");

    let cookie = HeaderValue::from_str(&format!("automax_session={}", token)).unwrap();
    let signed_in = server.get("/").add_header(header::COOKIE, cookie).await;
    assert_eq!(signed_in.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(signed_in.header(header::LOCATION), "/dashboard");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let driver = user("driver", UserRole::Driver, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![driver.clone()]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &driver);
    let server = create_server(state);

    let response = server.get("/logout").authorization_bearer(token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response.header(header::SET_COOKIE);
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Logout Successfully");
}

#[tokio::test]
async fn test_health_and_fallback() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let server = create_server(create_state(db));

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);

    let body: serde_json::Value = health.json();
    assert_eq!(body["error"], false);
    assert_eq!(body["message"], "200 ALIVE");

    let missing = server.get("/does-not-exist").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = missing.json();
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let admin = user("admin", UserRole::Admin, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .into_connection();
    let server = create_server(create_state(db));

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        exp: now + 3600,
        iat: now,
        id: admin.id,
    };

    for key in [&b""[..], &b"guessed-secret"[..]] {
        let forged = encode(&Header::default(), &claims, &EncodingKey::from_secret(key)).unwrap();

        let response = server.get("/dashboard").authorization_bearer(forged).await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
    }

    let genuine = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();
    let response = server.get("/logout").authorization_bearer(genuine).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
