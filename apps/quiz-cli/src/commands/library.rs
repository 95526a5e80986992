//! Library management commands.

use super::Report;
use quiz_core::{load_library_file, Session};
use std::path::Path;
use tracing::info;

/// Import a question bank file as a new, active library.
pub fn import(session: &mut Session, path: &Path) -> quiz_core::Result<Report> {
    let imported = load_library_file(path)?;
    let count = imported.questions.len();
    let name = imported.name.clone();

    session.import_library(imported.name, imported.questions);
    info!(library = %name, questions = count, "imported library");

    Ok(Report::question(true).info(format!("Imported {count} questions into \"{name}\".")))
}

pub fn list() -> Report {
    Report::libraries(false)
}

/// Select by 1-based list number.
pub fn select(session: &mut Session, number: usize) -> Report {
    let changed = number
        .checked_sub(1)
        .map(|index| session.select_library(index))
        .unwrap_or(false);

    if changed {
        Report::question(true)
    } else {
        Report::libraries(false).warning(format!("There is no library {number}."))
    }
}

pub fn delete(session: &mut Session) -> quiz_core::Result<Report> {
    match session.delete_active_library() {
        Ok(removed) => Ok(Report::libraries(true).info(format!("Deleted \"{}\".", removed.name))),
        Err(e) => Report::from_warning(e),
    }
}

pub fn reset(session: &mut Session) -> quiz_core::Result<Report> {
    match session.reset_active_library() {
        Ok(true) => Ok(Report::question(true).info("Library reset.")),
        Ok(false) => Ok(Report::question(false).info("Nothing to reset.")),
        Err(e) => Report::from_warning(e),
    }
}
