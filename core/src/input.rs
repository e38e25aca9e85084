/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, bail};

use super::consts::*;

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

/// Reads a secret from a file. An unreadable or blank file is an error, never
/// an empty key.
pub fn load_secret(f: &str) -> Result<String> {
    let s = std::fs::read_to_string(f)
        .with_context(|| format!("Failed to read secret file {}", f))?;
    let secret = s.trim().replace(char::from(25), "");

    if secret.is_empty() {
        bail!("Secret file {} is empty", f);
    }

    Ok(secret)
}

/// Usernames are matched case-insensitively, so they are always stored lowercase.
pub fn normalize_username(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn check_username(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if s.len() > USERNAME_MAX_LENGTH {
        return Err(format!(
            "Username cannot exceed {} characters",
            USERNAME_MAX_LENGTH
        ));
    }

    if s != s.to_lowercase() {
        return Err("Username must be lowercase".to_string());
    }

    if s.contains(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.') {
        return Err(
            "Username can only contain letters, numbers, dots, dashes and underscores".to_string(),
        );
    }

    Ok(())
}

/// Blank branches are treated as "no branch".
pub fn normalize_branch(branch: Option<&str>) -> Result<Option<String>, String> {
    let Some(branch) = branch.map(str::trim).filter(|b| !b.is_empty()) else {
        return Ok(None);
    };

    if branch.len() > BRANCH_MAX_LENGTH {
        return Err(format!(
            "Branch cannot exceed {} characters",
            BRANCH_MAX_LENGTH
        ));
    }

    Ok(Some(branch.to_string()))
}

pub fn check_description(s: &str) -> Result<String, String> {
    let description = s.trim();

    if description.is_empty() {
        return Err("Description cannot be empty".to_string());
    }

    Ok(description.to_string())
}

pub fn check_location(s: &str) -> Result<String, String> {
    let location = s.trim();

    if location.is_empty() {
        return Err("Stop location cannot be empty".to_string());
    }

    if location.len() > LOCATION_MAX_LENGTH {
        return Err(format!(
            "Stop location cannot exceed {} characters",
            LOCATION_MAX_LENGTH
        ));
    }

    Ok(location.to_string())
}

pub fn check_drive_time(minutes: Option<i32>) -> Result<Option<i32>, String> {
    match minutes {
        Some(m) if m < 0 => Err("Estimated drive time cannot be negative".to_string()),
        other => Ok(other),
    }
}
