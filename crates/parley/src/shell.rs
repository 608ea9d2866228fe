// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley shell` command implementation.
//!
//! An interactive REPL with a colored prompt and readline history. When
//! storage is enabled, each exchange is recorded under a fresh session id.

use std::path::PathBuf;

use colored::Colorize;
use parley_config::ParleyConfig;
use parley_core::types::{Channel, Exchange};
use parley_core::{HistoryStore, ParleyError};
use parley_responder::{ResponseSelector, ResponseTable, Selection};
use parley_storage::SqliteHistory;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

/// What the REPL should do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    ToggleCategory,
    Skip,
    /// Answer the message; `true` if the shell should exit afterwards.
    Message(&'a str, bool),
}

fn classify(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => ShellInput::Quit,
        "/category" => ShellInput::ToggleCategory,
        "" => ShellInput::Skip,
        _ => ShellInput::Message(trimmed, trimmed.eq_ignore_ascii_case("bye")),
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("parley").join("shell_history"))
}

fn render(selection: &Selection<'_>, show_category: bool) -> String {
    match (show_category, selection.category) {
        (true, Some(category)) => format!("{} {}", format!("[{category}]").dimmed(), selection.reply),
        (true, None) => format!("{} {}", "[default]".dimmed(), selection.reply),
        (false, _) => selection.reply.to_string(),
    }
}

/// Append the exchange to history. Failures are logged and otherwise ignored.
async fn record(
    history: &dyn HistoryStore,
    session_id: &str,
    message: &str,
    selection: &Selection<'_>,
) {
    let exchange = Exchange {
        id: uuid::Uuid::new_v4().to_string(),
        session_id: session_id.to_string(),
        user_id: None,
        user_message: message.to_string(),
        bot_reply: selection.reply.to_string(),
        category: selection.category.map(str::to_string),
        channel: Channel::Cli,
        created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };
    if let Err(e) = history.record_exchange(&exchange).await {
        warn!(error = %e, session_id, "failed to record exchange");
    }
}

/// Warnings only, on stderr, so log lines do not interleave with replies.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Runs the interactive shell until `/quit`, `bye`, Ctrl+C or Ctrl+D.
pub async fn run_shell(config: ParleyConfig) -> Result<(), ParleyError> {
    init_tracing();
    let selector = ResponseSelector::new(ResponseTable::from_config(&config.responder)?);

    let history = if config.storage.enabled {
        Some(SqliteHistory::open(config.storage.clone()).await?)
    } else {
        None
    };
    let session_id = uuid::Uuid::new_v4().to_string();

    let mut rl = DefaultEditor::new()
        .map_err(|e| ParleyError::Internal(format!("failed to initialize readline: {e}")))?;
    let history_path = history_file();
    if let Some(path) = &history_path
        && rl.load_history(path).is_err()
    {
        debug!(path = %path.display(), "no shell history loaded");
    }

    println!("{}", format!("{} shell", config.agent.name).bold().green());
    println!(
        "Type {} to exit, {} to show matched categories.\n",
        "/quit".yellow(),
        "/category".yellow()
    );

    let prompt = format!("{}> ", "you".green());
    let mut show_category = false;
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let (message, exit_after) = match classify(&line) {
            ShellInput::Quit => break,
            ShellInput::Skip => continue,
            ShellInput::ToggleCategory => {
                show_category = !show_category;
                let state = if show_category { "on" } else { "off" };
                println!("{}", format!("category display {state}").dimmed());
                continue;
            }
            ShellInput::Message(message, exit_after) => (message, exit_after),
        };

        let _ = rl.add_history_entry(&line);

        let selection = selector.select(message);
        println!("{}> {}", config.agent.name.cyan(), render(&selection, show_category));

        if let Some(history) = &history {
            record(history, &session_id, message, &selection).await;
        }

        if exit_after {
            break;
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            debug!(error = %e, "failed to save shell history");
        }
    }
    if let Some(history) = history {
        history.close().await?;
    }
    Ok(())
}
