//! Plain-text rendering.
//!
//! Colour is only used when writing to a terminal; the palette follows the
//! session theme.

use quiz_core::{OptionMark, QuestionKind, QuestionView, Session, Theme};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// Output styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
    pub theme: Theme,
}

impl Style {
    pub fn plain() -> Self {
        Self {
            color: false,
            theme: Theme::default(),
        }
    }

    fn paint(&self, mark: OptionMark, text: &str) -> String {
        let code = match (mark, self.theme) {
            (OptionMark::Plain, _) => None,
            (OptionMark::Selected, Theme::Light) => Some("34"),
            (OptionMark::Selected, Theme::Dark) => Some("94"),
            (OptionMark::Correct, Theme::Light) => Some("32"),
            (OptionMark::Correct, Theme::Dark) => Some("92"),
            (OptionMark::Wrong, Theme::Light) => Some("31"),
            (OptionMark::Wrong, Theme::Dark) => Some("91"),
        };
        match code {
            Some(code) if self.color => format!("\x1b[{code}m{text}{RESET}"),
            _ => text.to_string(),
        }
    }
}

fn marker(mark: OptionMark) -> char {
    match mark {
        OptionMark::Plain => ' ',
        OptionMark::Selected => '*',
        OptionMark::Correct => '+',
        OptionMark::Wrong => 'x',
    }
}

/// Render the active question.
pub fn question(view: &QuestionView, style: Style) -> String {
    let mut out = String::new();

    let mut flags = vec![view.kind.as_str(), view.mode.as_str()];
    if view.shuffled {
        flags.push("shuffled");
    }
    if view.favorited {
        flags.push("favorite");
    }
    let _ = writeln!(
        out,
        "[{}] Question {}/{} ({}%) | {}",
        view.library_name,
        view.number,
        view.total,
        view.progress_percent,
        flags.join(", ")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.stem);
    let _ = writeln!(out);

    for option in &view.options {
        let line = format!(" {} {}. {}", marker(option.mark), option.letter, option.text);
        let _ = writeln!(out, "{}", style.paint(option.mark, &line));
    }

    if let Some(reveal) = &view.reveal {
        let _ = writeln!(out);
        match reveal.answered_correctly {
            Some(true) => {
                let _ = writeln!(out, "{}", style.paint(OptionMark::Correct, "Correct!"));
            }
            Some(false) => {
                let _ = writeln!(out, "{}", style.paint(OptionMark::Wrong, "Incorrect."));
            }
            None => {}
        }
        let _ = writeln!(out, "Answer: {}", reveal.answer);
        if !reveal.explanation.is_empty() {
            let _ = writeln!(out, "Explanation: {}", reveal.explanation);
        }
    } else if view.can_submit {
        let _ = writeln!(out);
        let _ = writeln!(out, "Run `quiz submit` to check your selection.");
    } else if view.kind == QuestionKind::Multi {
        let _ = writeln!(out);
        let _ = writeln!(out, "Select every correct option, then submit.");
    }

    out
}

/// Render the library list, marking the active one.
pub fn libraries(session: &Session) -> String {
    if session.libraries().is_empty() {
        return nothing_loaded();
    }

    let mut out = String::new();
    for (index, library) in session.libraries().iter().enumerate() {
        let active = if session.active_index() == Some(index) { '>' } else { ' ' };
        let answered = library.answers.values().filter(|a| a.is_submitted()).count();
        let _ = write!(
            out,
            "{active} {}. {} ({} questions, {answered} answered",
            index + 1,
            library.name,
            library.len()
        );
        if library.is_shuffled() {
            out.push_str(", shuffled");
        }
        let _ = writeln!(out, ", imported {})", library.imported_at.format("%Y-%m-%d %H:%M"));
    }
    out
}

/// Shown when there is no active question.
pub fn nothing_loaded() -> String {
    "No library loaded. Import one with `quiz import <FILE>`.\n".to_string()
}

pub fn empty_library(name: &str) -> String {
    format!("Library \"{name}\" has no questions.\n")
}
