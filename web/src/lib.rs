/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;

use automax_core::types::ServerState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use endpoints::*;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/logout", get(auth::get_logout))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/post_job", get(jobs::get_post_job).post(jobs::post_job))
        .route("/job/{job}", get(jobs::get_job))
        .route(
            "/edit_job/{job}",
            get(jobs::get_edit_job).post(jobs::post_edit_job),
        )
        .route("/delete_job/{job}", post(jobs::post_delete_job))
        .route("/accept_job/{job}", post(jobs::post_accept_job))
        .route("/complete_job/{job}", post(jobs::post_complete_job))
        .route("/complete_stop/{stop}", post(jobs::post_complete_stop))
        .route("/users", get(users::get_user_list).post(users::post_user))
        .route("/reset_database", get(admin::get_reset_database))
        .route("/run_migrations", get(admin::get_run_migrations))
        .route("/createdb", get(admin::get_createdb))
        .route("/updatedb", get(admin::get_updatedb))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/", get(auth::get_index))
        .route("/login", get(auth::get_login).post(auth::post_login))
        .route("/health", get(get_health))
        .fallback(handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> std::io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    tracing::info!("Listening on {}", server_url);

    axum::serve(listener, app).await
}
