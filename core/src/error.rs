/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::job::JobStatus;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The requester's role or branch does not allow the action.
    #[error("Action not permitted")]
    Forbidden,
    #[error("Job already taken")]
    AlreadyTaken,
    #[error("Job cannot move from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
    #[error("Job is not in progress")]
    NotInProgress,
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}
