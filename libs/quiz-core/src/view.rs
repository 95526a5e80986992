//! Read-only presentation snapshot of the active question.

use crate::session::Session;
use crate::types::{letters_to_string, AnswerRecord, Letter, Mode, Question, QuestionKind};
use serde::Serialize;

/// How an option should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    Plain,
    /// Part of a pending multi-select selection.
    Selected,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub letter: Letter,
    pub text: String,
    pub mark: OptionMark,
}

/// Answer and explanation, once they may be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    pub answer: String,
    pub explanation: String,
    /// `None` in review mode or when the question was never answered.
    pub answered_correctly: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub library_name: String,
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub stem: String,
    pub kind: QuestionKind,
    pub mode: Mode,
    pub shuffled: bool,
    pub favorited: bool,
    pub options: Vec<OptionView>,
    pub can_submit: bool,
    pub reveal: Option<Reveal>,
}

impl QuestionView {
    /// View of the session's active question, if there is one.
    pub fn build(session: &Session) -> Option<Self> {
        let library = session.active_library()?;
        let question = session.active_question()?;
        let answer = session.active_answer();
        let mode = session.mode();

        let number = session.position() + 1;
        let total = library.len();
        let progress_percent = ((number as f64 / total as f64) * 100.0).round() as u32;

        let options = question
            .options
            .iter()
            .map(|(&letter, text)| OptionView {
                letter,
                text: text.clone(),
                mark: mark_option(question, answer, mode, letter),
            })
            .collect();

        let can_submit = mode == Mode::Practice
            && matches!(
                answer,
                Some(AnswerRecord::Multi { selected, submitted: false, .. }) if !selected.is_empty()
            );

        let reveal = match (mode, answer) {
            (Mode::Review, _) => Some(reveal(question, None)),
            (Mode::Practice, Some(record)) if record.is_submitted() => {
                Some(reveal(question, Some(record.is_correct())))
            }
            _ => None,
        };

        Some(Self {
            library_name: library.name.clone(),
            number,
            total,
            progress_percent,
            stem: question.stem.clone(),
            kind: question.kind,
            mode,
            shuffled: library.is_shuffled(),
            favorited: question.favorited,
            options,
            can_submit,
            reveal,
        })
    }
}

fn reveal(question: &Question, answered_correctly: Option<bool>) -> Reveal {
    Reveal {
        answer: letters_to_string(&question.correct),
        explanation: question.explanation.clone(),
        answered_correctly,
    }
}

fn mark_option(
    question: &Question,
    answer: Option<&AnswerRecord>,
    mode: Mode,
    letter: Letter,
) -> OptionMark {
    let is_correct = question.correct.contains(&letter);

    if mode == Mode::Review {
        return if is_correct {
            OptionMark::Correct
        } else {
            OptionMark::Plain
        };
    }

    match answer {
        Some(record) if record.is_submitted() => {
            if is_correct {
                OptionMark::Correct
            } else if record.is_selected(letter) {
                OptionMark::Wrong
            } else {
                OptionMark::Plain
            }
        }
        Some(record) if record.is_selected(letter) => OptionMark::Selected,
        _ => OptionMark::Plain,
    }
}
