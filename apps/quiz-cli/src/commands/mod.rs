//! Command handlers.
//!
//! Each handler applies one user intent to the session and reports what
//! changed and what to show. Handlers never touch the snapshot file.

pub mod library;
pub mod settings;
pub mod study;

use crate::cli::Command;
use quiz_core::{QuizError, Session};

/// Message for the user alongside the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// What to render after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Show {
    Question,
    Libraries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The session differs from the saved snapshot.
    pub changed: bool,
    pub notices: Vec<Notice>,
    pub show: Show,
}

impl Report {
    pub fn question(changed: bool) -> Self {
        Self {
            changed,
            notices: Vec::new(),
            show: Show::Question,
        }
    }

    pub fn libraries(changed: bool) -> Self {
        Self {
            changed,
            notices: Vec::new(),
            show: Show::Libraries,
        }
    }

    pub fn info(mut self, message: impl Into<String>) -> Self {
        self.notices.push(Notice::Info(message.into()));
        self
    }

    pub fn warning(mut self, message: impl Into<String>) -> Self {
        self.notices.push(Notice::Warning(message.into()));
        self
    }

    /// Turn a warning-level error into a notice; anything else stays an error.
    pub(crate) fn from_warning(error: QuizError) -> quiz_core::Result<Self> {
        if error.is_warning() {
            Ok(Self::question(false).warning(error.to_string()))
        } else {
            Err(error)
        }
    }
}

/// Question to confirm before running a destructive command.
///
/// `None` when the command is not destructive, was confirmed with `--yes`,
/// or has nothing to act on.
pub fn confirmation_prompt(session: &Session, command: &Command) -> Option<String> {
    let library = session.active_library()?;
    match command {
        Command::Delete { yes: false } => Some(format!(
            "Delete library \"{}\" and all its answers?",
            library.name
        )),
        Command::Reset { yes: false } if !library.is_empty() => Some(format!(
            "Clear all answers in \"{}\" and restore its import order?",
            library.name
        )),
        _ => None,
    }
}

/// Apply a command to the session.
pub fn dispatch(session: &mut Session, command: &Command) -> quiz_core::Result<Report> {
    match command {
        Command::Import { path } => library::import(session, path),
        Command::Libraries => Ok(library::list()),
        Command::Select { number } => Ok(library::select(session, *number)),
        Command::Delete { .. } => library::delete(session),
        Command::Reset { .. } => library::reset(session),
        Command::Show => Ok(Report::question(false)),
        Command::Next => Ok(study::next(session)),
        Command::Prev => Ok(study::prev(session)),
        Command::Jump { number } => Ok(study::jump(session, *number)),
        Command::Favorite => Ok(study::favorite(session)),
        Command::Answer { letter } => Ok(study::answer(session, *letter)),
        Command::Toggle { letter } => Ok(study::toggle(session, *letter)),
        Command::Submit => Ok(study::submit(session)),
        Command::Key { key } => Ok(study::key(session, *key)),
        Command::Shuffle => Ok(settings::shuffle(session)),
        Command::Mode { mode } => Ok(settings::mode(session, mode.map(Into::into))),
        Command::Theme => Ok(settings::theme(session)),
    }
}
