/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, bail};
use chrono::Utc;
use entity::user::UserRole;
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use uuid::Uuid;

use crate::database::get_user_by_username;
use crate::input::{check_username, normalize_branch, normalize_username};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUser {
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub branch: Option<String>,
    pub password_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfiguration {
    #[serde(default)]
    pub users: Vec<StateUser>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub is_valid: bool,
}

impl StateConfiguration {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse state file")
    }

    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut seen_usernames = HashSet::new();

        for user in &self.users {
            let username = normalize_username(&user.username);

            if let Err(message) = check_username(&username) {
                errors.push(ValidationError {
                    field: format!("users.{}.username", user.username),
                    message,
                });
            }

            if !seen_usernames.insert(username) {
                errors.push(ValidationError {
                    field: format!("users.{}.username", user.username),
                    message: "Duplicate username found".to_string(),
                });
            }

            match normalize_branch(user.branch.as_deref()) {
                Ok(None) if user.role == UserRole::Manager => errors.push(ValidationError {
                    field: format!("users.{}.branch", user.username),
                    message: "Managers must belong to a branch".to_string(),
                }),
                Err(message) => errors.push(ValidationError {
                    field: format!("users.{}.branch", user.username),
                    message,
                }),
                _ => {}
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub async fn load_and_apply_state(db: &DatabaseConnection, state_file_path: Option<&str>) -> Result<()> {
    let Some(path) = state_file_path else {
        tracing::info!("No state file configured, skipping state management");
        return Ok(());
    };

    tracing::info!("Loading state configuration from: {}", path);

    let config = StateConfiguration::from_file(path)?;

    let validation = config.validate();
    if !validation.is_valid {
        let error_messages: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();

        bail!(
            "State configuration validation failed:\n{}",
            error_messages.join("\n")
        );
    }

    apply_users(db, &config.users).await?;

    tracing::info!("State applied successfully");
    Ok(())
}

async fn apply_users(db: &DatabaseConnection, state_users: &[StateUser]) -> Result<()> {
    for state_user in state_users {
        let password = fs::read_to_string(&state_user.password_file).with_context(|| {
            format!(
                "Failed to read password file {}",
                state_user.password_file
            )
        })?;
        let password = password.trim();

        if password.is_empty() {
            bail!("Password file {} is empty", state_user.password_file);
        }

        let username = normalize_username(&state_user.username);
        let branch = normalize_branch(state_user.branch.as_deref()).map_err(anyhow::Error::msg)?;

        match get_user_by_username(db, &username).await? {
            Some(existing) => {
                let mut user: AUser = existing.into();
                user.password = Set(generate_hash(password));
                user.role = Set(state_user.role);
                user.branch = Set(branch);
                user.update(db).await?;
                tracing::info!("Updated managed user: {}", username);
            }
            None => {
                let now = Utc::now().naive_utc();
                let user = AUser {
                    id: Set(Uuid::new_v4()),
                    username: Set(username.clone()),
                    password: Set(generate_hash(password)),
                    role: Set(state_user.role),
                    branch: Set(branch),
                    last_login_at: Set(now),
                    created_at: Set(now),
                };
                user.insert(db).await?;
                tracing::info!("Created managed user: {}", username);
            }
        }
    }

    Ok(())
}
