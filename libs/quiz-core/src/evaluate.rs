//! Answer evaluation for single- and multi-select questions.
//!
//! Both checks are pure. Recording the result, and locking multi-select
//! answers after submission, is the session's job.

use crate::types::{Letter, Question};
use std::collections::BTreeSet;

/// A single-select answer is correct iff the letter is a correct letter.
pub fn evaluate_single(question: &Question, letter: Letter) -> bool {
    question.correct.contains(&letter)
}

/// A multi-select answer is correct iff it equals the correct set exactly.
pub fn evaluate_multi(question: &Question, selected: &BTreeSet<Letter>) -> bool {
    *selected == question.correct
}
