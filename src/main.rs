/*
 * SPDX-FileCopyrightText: 2025 Automax Transport <dev@automax-transport.it>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use automax_core::init_state;
use automax_core::types::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

#[tokio::main]
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let _guard = match (cli.report_errors, cli.sentry_dsn.clone()) {
        (true, Some(dsn)) => Some(sentry::init(dsn)),
        (true, None) => {
            tracing::warn!("Error reporting enabled without a Sentry DSN, skipping");
            None
        }
        _ => None,
    };

    let state = init_state(cli).await?;
    web::serve_web(state)
        .await
        .context("Web server stopped unexpectedly")?;

    Ok(())
}
