/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use axum::http::StatusCode;
use common::*;
use entity::user::UserRole;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;

#[tokio::test]
async fn test_maintenance_is_admin_only() {
    let manager = user("manager", UserRole::Manager, Some("Rome"));

    let cases = [
        ("/reset_database", "Unauthorized. Only admins can reset the database."),
        ("/run_migrations", "Unauthorized. Only admins can run migrations."),
        ("/createdb", "Unauthorized. Only admins can create the database."),
        ("/updatedb", "Unauthorized. Only admins can update the database."),
    ];

    for (path, message) in cases {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![manager.clone()]])
            .into_connection();
        let state = create_state(db);
        let token = token_for(&state, &manager);
        let server = create_server(state);

        let response = server.get(path).authorization_bearer(token).await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN, "{}", path);

        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_admin_lists_users_without_passwords() {
    let admin = user("admin", UserRole::Admin, None);
    let driver = user("driver", UserRole::Driver, None);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .append_query_results([vec![admin.clone(), driver.clone()]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &admin);
    let server = create_server(state);

    let response = server.get("/users").authorization_bearer(token).await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"][1]["username"], "driver");
    assert_eq!(body["message"][1]["role"], "driver");
    assert!(body["message"][1].get("password").is_none());
}

#[tokio::test]
async fn test_driver_cannot_manage_users() {
    let driver = user("driver", UserRole::Driver, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![driver.clone()]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &driver);
    let server = create_server(state);

    let response = server.get("/users").authorization_bearer(token).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_duplicate_user_conflicts() {
    let admin = user("admin", UserRole::Admin, None);
    let existing = user("marco", UserRole::Driver, None);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .append_query_results([vec![existing]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &admin);
    let server = create_server(state);

    let response = server
        .post("/users")
        .authorization_bearer(token)
        .json(&json!({ "username": "Marco", "password": "pw", "role": "driver" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_manager_requires_branch() {
    let admin = user("admin", UserRole::Admin, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .into_connection();
    let state = create_state(db);
    let token = token_for(&state, &admin);
    let server = create_server(state);

    let response = server
        .post("/users")
        .authorization_bearer(token)
        .json(&json!({ "username": "giulia", "password": "pw", "role": "manager" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Managers must belong to a branch");
}
