//! Session state machine.
//!
//! [`Session`] owns every loaded library plus the pointers the front end
//! renders from. Each operation runs to completion and leaves the state
//! consistent. Operations that the UI can trigger from stale state (wrong
//! mode, wrong question kind, a letter the question does not offer, out of
//! range navigation) are silent no-ops returning `false`; a `true` return
//! means the state changed and should be persisted.

use crate::error::{QuizError, Result};
use crate::evaluate::{evaluate_multi, evaluate_single};
use crate::normalize::{normalize_batch, RawRecord};
use crate::order;
use crate::store::Snapshot;
use crate::types::{AnswerRecord, Letter, Library, Mode, Question, QuestionKind, Theme};
use crate::view::QuestionView;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Everything that is persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// In load order.
    pub libraries: Vec<Library>,
    pub active_library: Option<usize>,
    /// Index into the active library's current ordering.
    pub position: usize,
    pub mode: Mode,
    pub theme: Theme,
}

impl SessionState {
    /// Repair anything that violates the session invariants.
    ///
    /// Snapshots written by older builds or edited by hand may carry stale
    /// pointers. Returns `true` if something had to be fixed.
    pub fn sanitize(&mut self) -> bool {
        let mut repaired = false;

        for library in &mut self.libraries {
            let len = library.questions.len();

            if let Some(permutation) = &library.permutation {
                if !order::is_valid_permutation(permutation, len) {
                    warn!(library = %library.name, "dropping invalid permutation");
                    library.permutation = None;
                    repaired = true;
                }
            }

            let before = library.answers.len();
            library.answers.retain(|&position, _| position < len);
            if library.answers.len() != before {
                warn!(library = %library.name, dropped = before - library.answers.len(), "dropping out of range answers");
                repaired = true;
            }
        }

        let active = match (self.libraries.len(), self.active_library) {
            (0, _) => None,
            (len, Some(index)) if index < len => Some(index),
            (len, _) => Some(len - 1),
        };
        if active != self.active_library {
            self.active_library = active;
            self.position = 0;
            repaired = true;
        }

        let len = active.map_or(0, |index| self.libraries[index].questions.len());
        if self.position >= len.max(1) {
            self.position = 0;
            repaired = true;
        }

        repaired
    }
}

/// The quiz session engine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Empty session with default mode and theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt previously persisted state, repairing it if needed.
    pub fn from_state(mut state: SessionState) -> Self {
        if state.sanitize() {
            warn!("session state needed repair on load");
        }
        Self { state }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from_state(snapshot.state)
    }

    /// Owned copy of the current state for the persistence store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state.clone())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn libraries(&self) -> &[Library] {
        &self.state.libraries
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.active_library
    }

    pub fn active_library(&self) -> Option<&Library> {
        self.state
            .active_library
            .and_then(|index| self.state.libraries.get(index))
    }

    fn active_library_mut(&mut self) -> Option<&mut Library> {
        self.state
            .active_library
            .and_then(|index| self.state.libraries.get_mut(index))
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active_library()?.question(self.state.position)
    }

    pub fn active_answer(&self) -> Option<&AnswerRecord> {
        self.active_library()?.answer(self.state.position)
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Whether the active library is currently in shuffled order.
    pub fn is_shuffled(&self) -> bool {
        self.active_library().is_some_and(Library::is_shuffled)
    }

    pub fn view(&self) -> Option<QuestionView> {
        QuestionView::build(self)
    }

    // Libraries

    /// Add a library built from normalized questions and make it active.
    pub fn import_library(&mut self, name: impl Into<String>, questions: Vec<Question>) {
        let library = Library::new(name, questions);
        debug!(library = %library.name, questions = library.len(), "imported library");
        self.state.libraries.push(library);
        self.state.active_library = Some(self.state.libraries.len() - 1);
        self.state.position = 0;
        self.state.mode = Mode::Practice;
    }

    /// Normalize a raw batch and import it. State is untouched on error.
    pub fn import_records(&mut self, name: impl Into<String>, records: &[RawRecord]) -> Result<usize> {
        let questions = normalize_batch(records)?;
        let count = questions.len();
        self.import_library(name, questions);
        Ok(count)
    }

    /// Remove the active library and select a neighbour.
    ///
    /// The library now at the same index is preferred, then the last one.
    pub fn delete_active_library(&mut self) -> Result<Library> {
        let index = self
            .state
            .active_library
            .filter(|&index| index < self.state.libraries.len())
            .ok_or(QuizError::NoLibrary)?;

        let removed = self.state.libraries.remove(index);
        let remaining = self.state.libraries.len();
        self.state.active_library = if remaining == 0 {
            None
        } else {
            Some(index.min(remaining - 1))
        };
        self.state.position = 0;

        debug!(library = %removed.name, remaining, "deleted library");
        Ok(removed)
    }

    /// Switch to another library (0-based). Its own shuffle state is kept.
    pub fn select_library(&mut self, index: usize) -> bool {
        if index >= self.state.libraries.len() {
            return false;
        }
        self.state.active_library = Some(index);
        self.state.position = 0;
        true
    }

    /// Restore import order, clear all answers, keep favorites.
    ///
    /// A library without questions is left alone.
    pub fn reset_active_library(&mut self) -> Result<bool> {
        let library = self.active_library_mut().ok_or(QuizError::NoLibrary)?;
        if library.is_empty() {
            return Ok(false);
        }

        order::restore(library);
        library.answers.clear();
        debug!(library = %library.name, "reset library");

        self.state.position = 0;
        self.state.mode = Mode::Practice;
        Ok(true)
    }

    // Modes

    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.state.mode == mode {
            return false;
        }
        self.state.mode = mode;
        true
    }

    pub fn toggle_mode(&mut self) -> bool {
        self.set_mode(self.state.mode.toggled())
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.state.theme = self.state.theme.toggled();
        true
    }

    /// Shuffle or restore the active library using the thread rng.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.toggle_shuffle_with(&mut rand::thread_rng())
    }

    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(library) = self.active_library_mut() else {
            return false;
        };
        if library.is_shuffled() {
            order::restore(library);
        } else {
            order::shuffle(library, rng);
        }
        self.state.position = 0;
        true
    }

    // Navigation

    pub fn toggle_favorite(&mut self) -> bool {
        let position = self.state.position;
        let Some(question) = self
            .active_library_mut()
            .and_then(|library| library.questions.get_mut(position))
        else {
            return false;
        };
        question.favorited = !question.favorited;
        true
    }

    /// Jump to a 1-based question number. Jumping to the current question is a no-op.
    pub fn jump_to(&mut self, number: usize) -> bool {
        let len = self.active_library().map_or(0, Library::len);
        if number == 0 || number > len || number - 1 == self.state.position {
            return false;
        }
        self.state.position = number - 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.active_question().is_none() || self.state.position == 0 {
            return false;
        }
        self.state.position -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        let len = self.active_library().map_or(0, Library::len);
        if self.state.position + 1 >= len {
            return false;
        }
        self.state.position += 1;
        true
    }

    // Answers

    /// Answer the active single-select question. Re-answering overwrites.
    pub fn submit_single(&mut self, letter: Letter) -> bool {
        if self.state.mode != Mode::Practice {
            return false;
        }
        let position = self.state.position;
        let Some(library) = self.active_library_mut() else {
            return false;
        };
        let Some(question) = library.questions.get(position) else {
            return false;
        };
        if question.kind != QuestionKind::Single || !question.has_option(letter) {
            return false;
        }

        let correct = evaluate_single(question, letter);
        library
            .answers
            .insert(position, AnswerRecord::Single { selected: letter, correct });
        debug!(position, %letter, correct, "submitted single answer");
        true
    }

    /// Flip a letter in the pending multi-select selection.
    pub fn toggle_multi_option(&mut self, letter: Letter) -> bool {
        if self.state.mode != Mode::Practice {
            return false;
        }
        let position = self.state.position;
        let Some(library) = self.active_library_mut() else {
            return false;
        };
        let Some(question) = library.questions.get(position) else {
            return false;
        };
        if question.kind != QuestionKind::Multi || !question.has_option(letter) {
            return false;
        }

        let record = library
            .answers
            .entry(position)
            .or_insert_with(AnswerRecord::pending_multi);
        match record {
            AnswerRecord::Multi {
                selected,
                submitted: false,
                ..
            } => {
                if !selected.remove(&letter) {
                    selected.insert(letter);
                }
                true
            }
            _ => false,
        }
    }

    /// Submit the pending multi-select selection.
    ///
    /// No-op when nothing is selected or the answer is already submitted.
    pub fn submit_multi(&mut self) -> bool {
        if self.state.mode != Mode::Practice {
            return false;
        }
        let position = self.state.position;
        let Some(library) = self.active_library_mut() else {
            return false;
        };
        let Some(question) = library.questions.get(position) else {
            return false;
        };
        if question.kind != QuestionKind::Multi {
            return false;
        }
        let Some(AnswerRecord::Multi {
            selected,
            correct,
            submitted,
        }) = library.answers.get_mut(&position)
        else {
            return false;
        };
        if *submitted || selected.is_empty() {
            return false;
        }

        *correct = evaluate_multi(question, selected);
        *submitted = true;
        debug!(position, correct = *correct, "submitted multi answer");
        true
    }
}
