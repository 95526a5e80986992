//! Navigation and answering.

use super::Report;
use quiz_core::{Key, Letter, Mode, QuestionKind, Session};

pub fn next(session: &mut Session) -> Report {
    let changed = session.next();
    edge(session, changed, "Already at the last question.")
}

pub fn prev(session: &mut Session) -> Report {
    let changed = session.prev();
    edge(session, changed, "Already at the first question.")
}

/// Jump to a 1-based question number.
pub fn jump(session: &mut Session, number: usize) -> Report {
    if session.jump_to(number) {
        return Report::question(true);
    }
    match session.active_library() {
        Some(library) if !library.is_empty() && !(1..=library.len()).contains(&number) => {
            let total = library.len();
            Report::question(false).warning(format!("Question {number} is out of range 1-{total}."))
        }
        _ => Report::question(false),
    }
}

pub fn favorite(session: &mut Session) -> Report {
    Report::question(session.toggle_favorite())
}

/// Submit a single-select answer.
pub fn answer(session: &mut Session, letter: Letter) -> Report {
    if session.submit_single(letter) {
        return Report::question(true);
    }
    rejected(session, QuestionKind::Single, Some(letter))
}

/// Flip one option of a pending multi-select answer.
pub fn toggle(session: &mut Session, letter: Letter) -> Report {
    if session.toggle_multi_option(letter) {
        return Report::question(true);
    }
    rejected(session, QuestionKind::Multi, Some(letter))
}

pub fn submit(session: &mut Session) -> Report {
    if session.submit_multi() {
        return Report::question(true);
    }
    match rejected(session, QuestionKind::Multi, None) {
        report if report.notices.is_empty() && session.active_question().is_some() => {
            report.info("Select at least one option before submitting.")
        }
        report => report,
    }
}

pub fn key(session: &mut Session, key: Key) -> Report {
    Report::question(session.handle_key(key))
}

fn edge(session: &Session, changed: bool, message: &str) -> Report {
    if changed || session.active_question().is_none() {
        Report::question(changed)
    } else {
        Report::question(false).info(message)
    }
}

/// Explain why an answering command did nothing.
fn rejected(session: &Session, expected: QuestionKind, letter: Option<Letter>) -> Report {
    let report = Report::question(false);
    let Some(question) = session.active_question() else {
        return report;
    };

    if session.mode() == Mode::Review {
        return report.info("Answers are shown in review mode. Switch to practice mode to answer.");
    }
    if question.kind != expected {
        return match question.kind {
            QuestionKind::Single => report.info("This is a single-select question. Use `answer`."),
            QuestionKind::Multi => {
                report.info("This is a multi-select question. Use `toggle` and `submit`.")
            }
        };
    }
    if let Some(letter) = letter.filter(|&l| !question.has_option(l)) {
        return report.warning(format!("Option {letter} is not offered for this question."));
    }
    if session.active_answer().is_some_and(|record| record.is_submitted()) && expected == QuestionKind::Multi {
        return report.info("This question has already been submitted.");
    }
    report
}
