//! Core types for the quiz engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Option letter. A question offers at most five options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    /// All letters in display order.
    pub const ALL: [Letter; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }

    /// Parse a letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Format a set of letters as a compact string, e.g. `AC`.
pub fn letters_to_string(letters: &BTreeSet<Letter>) -> String {
    letters.iter().map(|l| l.as_char()).collect()
}

/// Whether one or several letters make up the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multi,
}

impl Default for QuestionKind {
    fn default() -> Self {
        Self::Single
    }
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }

    /// Parse an explicit kind from an import field.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "单选" => Some(Self::Single),
            "multi" | "multiple" | "多选" => Some(Self::Multi),
            _ => None,
        }
    }

    /// Kind implied by the number of correct letters.
    pub fn infer(correct_count: usize) -> Self {
        if correct_count > 1 {
            Self::Multi
        } else {
            Self::Single
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub stem: String,
    /// Only letters with option text are present.
    pub options: BTreeMap<Letter, String>,
    pub correct: BTreeSet<Letter>,
    #[serde(default)]
    pub explanation: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub favorited: bool,
}

impl Question {
    /// Build a question, inferring its kind from the correct letters.
    ///
    /// Correct letters without option text are dropped.
    pub fn new<S: Into<String>>(
        stem: impl Into<String>,
        options: impl IntoIterator<Item = (Letter, S)>,
        correct: impl IntoIterator<Item = Letter>,
    ) -> Self {
        let options: BTreeMap<Letter, String> = options
            .into_iter()
            .map(|(letter, text)| (letter, text.into()))
            .filter(|(_, text)| !text.is_empty())
            .collect();
        let correct: BTreeSet<Letter> = correct
            .into_iter()
            .filter(|letter| options.contains_key(letter))
            .collect();
        Self {
            stem: stem.into(),
            kind: QuestionKind::infer(correct.len()),
            options,
            correct,
            explanation: String::new(),
            favorited: false,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn has_option(&self, letter: Letter) -> bool {
        self.options.contains_key(&letter)
    }

    pub fn option(&self, letter: Letter) -> Option<&str> {
        self.options.get(&letter).map(String::as_str)
    }
}

/// Recorded answer for one question, shaped by the question's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerRecord {
    /// Single-select answers only exist once submitted.
    Single { selected: Letter, correct: bool },
    Multi {
        selected: BTreeSet<Letter>,
        correct: bool,
        submitted: bool,
    },
}

impl AnswerRecord {
    /// Empty, not yet submitted multi-select selection.
    pub fn pending_multi() -> Self {
        Self::Multi {
            selected: BTreeSet::new(),
            correct: false,
            submitted: false,
        }
    }

    pub fn is_submitted(&self) -> bool {
        match self {
            Self::Single { .. } => true,
            Self::Multi { submitted, .. } => *submitted,
        }
    }

    /// Correctness of a submitted answer; `false` while pending.
    pub fn is_correct(&self) -> bool {
        match self {
            Self::Single { correct, .. } => *correct,
            Self::Multi {
                correct, submitted, ..
            } => *submitted && *correct,
        }
    }

    pub fn is_selected(&self, letter: Letter) -> bool {
        match self {
            Self::Single { selected, .. } => *selected == letter,
            Self::Multi { selected, .. } => selected.contains(&letter),
        }
    }
}

/// A named set of questions plus the user's answers to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    #[serde(default = "Utc::now")]
    pub imported_at: DateTime<Utc>,
    pub questions: Vec<Question>,
    /// Keyed by position in the current ordering.
    #[serde(default)]
    pub answers: BTreeMap<usize, AnswerRecord>,
    /// `permutation[new] = old` while shuffled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permutation: Option<Vec<usize>>,
}

impl Library {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            imported_at: Utc::now(),
            questions,
            answers: BTreeMap::new(),
            permutation: None,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.permutation.is_some()
    }

    pub fn question(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn answer(&self, position: usize) -> Option<&AnswerRecord> {
        self.answers.get(&position)
    }
}

/// Study mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Answers hidden until submitted.
    Practice,
    /// Correct answers shown for every question.
    Review,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Practice
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Review => "review",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "practice" => Some(Self::Practice),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Practice => Self::Review,
            Self::Review => Self::Practice,
        }
    }
}

/// Display theme, persisted with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
