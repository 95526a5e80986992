//! Mode, shuffle and theme.

use super::Report;
use quiz_core::{Mode, Session};

/// Set the mode, or toggle it when `mode` is `None`.
pub fn mode(session: &mut Session, mode: Option<Mode>) -> Report {
    let changed = match mode {
        Some(mode) => session.set_mode(mode),
        None => session.toggle_mode(),
    };
    let report = Report::question(changed);
    if changed {
        report
    } else {
        report.info(format!("Already in {} mode.", session.mode().as_str()))
    }
}

pub fn shuffle(session: &mut Session) -> Report {
    if !session.toggle_shuffle() {
        return Report::question(false);
    }
    let message = if session.is_shuffled() {
        "Questions shuffled."
    } else {
        "Import order restored."
    };
    Report::question(true).info(message)
}

pub fn theme(session: &mut Session) -> Report {
    let changed = session.toggle_theme();
    Report::question(changed).info(format!("Theme: {}.", session.theme().as_str()))
}
