//! Keyboard intents.

use crate::session::Session;
use crate::types::{Letter, QuestionKind};

/// A key press forwarded by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Enter,
    Char(char),
}

impl Key {
    /// Parse a key name such as `left`, `space` or a single character.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Some(Self::Left),
            "right" | "arrowright" => Some(Self::Right),
            "space" | " " => Some(Self::Space),
            "enter" | "return" => Some(Self::Enter),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl Session {
    /// Dispatch a key press. Does nothing without an active question.
    ///
    /// Letter keys only act when the active question offers that letter.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let Some(question) = self.active_question() else {
            return false;
        };

        match key {
            Key::Left => self.prev(),
            Key::Right => self.next(),
            Key::Space => self.toggle_mode(),
            Key::Enter => self.submit_multi(),
            Key::Char(c) => {
                let Some(letter) = Letter::from_char(c).filter(|&l| question.has_option(l)) else {
                    return false;
                };
                let kind = question.kind;
                match kind {
                    QuestionKind::Single => self.submit_single(letter),
                    QuestionKind::Multi => self.toggle_multi_option(letter),
                }
            }
        }
    }
}
