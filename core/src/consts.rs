/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::ops::RangeInclusive;

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

pub const USERNAME_MAX_LENGTH: usize = 100;
pub const BRANCH_MAX_LENGTH: usize = 50;
pub const LOCATION_MAX_LENGTH: usize = 255;

pub const SESSION_COOKIE: &str = "automax_session";
