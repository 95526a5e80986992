//! Terminal front end for the quiz engine.
//!
//! Every invocation loads the saved session, applies one command, saves the
//! session if it changed and renders the result.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod state;
pub mod store;

use anyhow::Context;
use cli::{Cli, Command};
use commands::{Notice, Report, Show};
use config::{Config, Overrides};
use quiz_core::Session;
use render::Style;
use serde_json::json;
use state::AppState;
use std::io::{self, IsTerminal, Write};
use store::JsonFileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text { color: bool },
    Json,
}

/// Rendered result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// For stdout.
    pub text: String,
    /// For stderr, one per line.
    pub warnings: Vec<String>,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(Overrides {
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
    });
    logging::init(&config.log_filter)?;
    tracing::debug!(?config, "resolved configuration");

    let mut state = AppState::open(JsonFileStore::new(&config.snapshot_path)).with_context(|| {
        format!(
            "could not load the saved session at {}",
            config.snapshot_path.display()
        )
    })?;

    if let Some(prompt) = commands::confirmation_prompt(&state.session, &cli.command) {
        if io::stdin().is_terminal() && !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text {
            color: io::stdout().is_terminal(),
        }
    };

    let output = execute(&mut state, &cli.command, format)?;
    print!("{}", output.text);
    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` declines.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush().context("failed to write prompt")?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Apply a command, save on change and render.
///
/// Import failures are errors. A failed save only adds a warning: the
/// rendered state is still correct for this invocation.
pub fn execute(state: &mut AppState, command: &Command, format: OutputFormat) -> anyhow::Result<Output> {
    let mut report = commands::dispatch(&mut state.session, command)?;

    if report.changed {
        if let Err(e) = state.persist() {
            tracing::warn!(error = %e, path = %state.store.path().display(), "session not saved");
            report = report.warning(e.to_string());
        }
    }

    match format {
        OutputFormat::Text { color } => Ok(text_output(&state.session, &report, color)),
        OutputFormat::Json => json_output(&state.session, &report),
    }
}

fn text_output(session: &Session, report: &Report, color: bool) -> Output {
    let mut output = Output::default();
    for notice in &report.notices {
        match notice {
            Notice::Info(message) => {
                output.text.push_str(message);
                output.text.push('\n');
            }
            Notice::Warning(message) => output.warnings.push(message.clone()),
        }
    }
    if !output.text.is_empty() {
        output.text.push('\n');
    }

    let style = Style {
        color,
        theme: session.theme(),
    };
    let body = match report.show {
        Show::Libraries => render::libraries(session),
        Show::Question => match (session.view(), session.active_library()) {
            (Some(view), _) => render::question(&view, style),
            (None, Some(library)) => render::empty_library(&library.name),
            (None, None) => render::nothing_loaded(),
        },
    };
    output.text.push_str(&body);
    output
}

fn json_output(session: &Session, report: &Report) -> anyhow::Result<Output> {
    let notices: Vec<_> = report
        .notices
        .iter()
        .map(|notice| match notice {
            Notice::Info(message) => json!({ "level": "info", "message": message }),
            Notice::Warning(message) => json!({ "level": "warning", "message": message }),
        })
        .collect();

    let body = match report.show {
        Show::Question => json!({
            "notices": notices,
            "theme": session.theme(),
            "view": session.view(),
        }),
        Show::Libraries => {
            let libraries: Vec<_> = session
                .libraries()
                .iter()
                .enumerate()
                .map(|(index, library)| {
                    json!({
                        "number": index + 1,
                        "name": library.name,
                        "questions": library.len(),
                        "answered": library.answers.values().filter(|a| a.is_submitted()).count(),
                        "shuffled": library.is_shuffled(),
                        "active": session.active_index() == Some(index),
                        "imported_at": library.imported_at,
                    })
                })
                .collect();
            json!({ "notices": notices, "libraries": libraries })
        }
    };

    let mut text = serde_json::to_string_pretty(&body).context("failed to encode output")?;
    text.push('\n');
    Ok(Output {
        text,
        warnings: Vec::new(),
    })
}
