// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley serve` command implementation.
//!
//! Builds the selector, optional history store and gateway, then serves until
//! SIGINT/SIGTERM. On unix, SIGHUP reloads the response table from
//! configuration without dropping connections.

use std::path::PathBuf;
use std::sync::Arc;

use parley_config::ParleyConfig;
use parley_core::{HistoryStore, ParleyError};
use parley_gateway::{GatewayState, ReplyService};
use parley_responder::{ResponseSelector, ResponseTable, SharedSelector};
use parley_storage::SqliteHistory;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config_cmd;
use crate::shutdown;

/// Run the server until a shutdown signal arrives.
pub async fn run_serve(
    config: ParleyConfig,
    config_path: Option<PathBuf>,
) -> Result<(), ParleyError> {
    init_tracing(&config.agent.log_level);

    info!(
        name = %config.agent.name,
        categories = config.responder.categories.len(),
        match_mode = %config.responder.match_mode,
        "starting parley"
    );

    let history = open_history(&config).await?;

    let table = ResponseTable::from_config(&config.responder)?;
    let selector = SharedSelector::new(ResponseSelector::new(table));
    let replies = ReplyService::from_config(selector.clone(), &config);

    let state = GatewayState::new(
        replies,
        history.clone().map(|h| h as Arc<dyn HistoryStore>),
    );
    let app = parley_gateway::router(state, config.server.cors_origin.as_deref())?;
    let listener = parley_gateway::bind(&config.server).await?;

    let cancel = shutdown::install_signal_handler();
    spawn_reload_handler(selector, config_path, cancel.clone());

    parley_gateway::serve(listener, app, cancel).await?;

    if let Some(history) = history
        && let Err(e) = history.close().await
    {
        warn!(error = %e, "failed to close history store");
    }
    info!("parley stopped");
    Ok(())
}

async fn open_history(config: &ParleyConfig) -> Result<Option<Arc<SqliteHistory>>, ParleyError> {
    if !config.storage.enabled {
        info!("exchange history disabled");
        return Ok(None);
    }
    let history = SqliteHistory::open(config.storage.clone()).await?;
    info!(path = %config.storage.database_path, "exchange history enabled");
    Ok(Some(Arc::new(history)))
}

/// Re-read configuration and build a fresh table.
///
/// Errors are flattened into one [`ParleyError::Config`] so the caller can log
/// them and keep the current table.
fn reload_table(config_path: Option<&std::path::Path>) -> Result<ResponseTable, ParleyError> {
    let config = config_cmd::load(config_path).map_err(|errors| {
        ParleyError::Config(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;
    ResponseTable::from_config(&config.responder)
}

#[cfg(unix)]
fn spawn_reload_handler(
    selector: SharedSelector,
    config_path: Option<PathBuf>,
    cancel: CancellationToken,
) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to install SIGHUP handler, live reload disabled");
            return;
        }
    };

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    info!("received SIGHUP, reloading response table");
                    match reload_table(config_path.as_deref()) {
                        Ok(table) => selector.replace_table(table),
                        Err(e) => warn!(error = %e, "reload failed, keeping current table"),
                    }
                }
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_reload_handler(
    _selector: SharedSelector,
    _config_path: Option<PathBuf>,
    _cancel: CancellationToken,
) {
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over
/// `agent.log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("parley={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
