/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use automax_core::jobs::{self, JobUpdate, JobWithStops, NewJob, NewStop};
use automax_core::permission::{Action, is_admin, is_permitted};
use automax_core::types::*;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeJobRequest {
    pub description: String,
    pub branch: Option<String>,
    #[serde(default)]
    pub stops: Vec<NewStop>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchJobRequest {
    pub description: Option<String>,
    pub branch: Option<String>,
    pub stops: Option<Vec<NewStop>>,
}

/// Context for the job form.
#[derive(Serialize, Deserialize, Debug)]
pub struct PostJobView {
    pub branch: Option<String>,
    pub branch_editable: bool,
}

pub async fn get_post_job(
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<PostJobView>>> {
    if !is_permitted(&user, Action::CreateJob, None) {
        return Err(WebError::Denied);
    }

    let res = BaseResponse {
        error: false,
        message: PostJobView {
            branch_editable: is_admin(&user),
            branch: user.branch,
        },
    };

    Ok(Json(res))
}

pub async fn post_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    body: Result<Json<MakeJobRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<JobWithStops>>> {
    // Users without create rights are redirected before the payload is parsed.
    if !is_permitted(&user, Action::CreateJob, None) {
        return Err(WebError::Denied);
    }

    let Json(body) = body?;

    let job = jobs::create_job(
        &state.db,
        &user,
        NewJob {
            description: body.description,
            branch: body.branch,
            stops: body.stops,
        },
    )
    .await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn get_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<JobWithStops>>> {
    let job = jobs::get_visible_job(&state.db, &user, job_id).await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn get_edit_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<JobWithStops>>> {
    let job = jobs::get_editable_job(&state.db, &user, job_id).await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn post_edit_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
    body: Result<Json<PatchJobRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<JobWithStops>>> {
    // Users without edit rights are redirected before the payload is parsed.
    jobs::get_permitted_job(&state.db, &user, job_id, Action::EditJob).await?;

    let Json(body) = body?;

    let job = jobs::update_job(
        &state.db,
        &user,
        job_id,
        JobUpdate {
            description: body.description,
            branch: body.branch,
            stops: body.stops,
        },
    )
    .await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn post_delete_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    jobs::delete_job(&state.db, &user, job_id).await?;

    let res = BaseResponse {
        error: false,
        message: "Job deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_accept_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MJob>>> {
    let job = jobs::accept_job(&state.db, &user, job_id).await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn post_complete_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MJob>>> {
    let job = jobs::complete_job(&state.db, &user, job_id).await?;

    let res = BaseResponse {
        error: false,
        message: job,
    };

    Ok(Json(res))
}

pub async fn post_complete_stop(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(stop_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MJobStop>>> {
    let stop = jobs::complete_stop(&state.db, &user, stop_id).await?;

    let res = BaseResponse {
        error: false,
        message: stop,
    };

    Ok(Json(res))
}
