//! Reversible shuffling of a library's question order.
//!
//! A shuffle records `permutation[new] = old` for every position. That is
//! exactly what [`restore`] needs to put questions back in import order, and
//! both directions carry the answer map along so every record stays attached
//! to the question it was given for.

use crate::types::{AnswerRecord, Library, Question};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Shuffle the library's questions and answers.
///
/// Returns `false` without touching anything if the library is already
/// shuffled. Libraries with zero or one question still become "shuffled"
/// with the trivial permutation.
pub fn shuffle<R: Rng + ?Sized>(library: &mut Library, rng: &mut R) -> bool {
    if library.is_shuffled() {
        return false;
    }

    let mut permutation: Vec<usize> = (0..library.questions.len()).collect();
    // Fisher-Yates: from the last index down to 1, swap with a uniform index in [0, i].
    permutation.shuffle(rng);

    library.questions = reorder(std::mem::take(&mut library.questions), &permutation);

    let mut answers = std::mem::take(&mut library.answers);
    library.answers = permutation
        .iter()
        .enumerate()
        .filter_map(|(new, old)| answers.remove(old).map(|record| (new, record)))
        .collect();

    debug!(library = %library.name, len = permutation.len(), "shuffled library");
    library.permutation = Some(permutation);
    true
}

/// Put the library back in the order it had before [`shuffle`].
///
/// Returns `false` if the library is not shuffled.
pub fn restore(library: &mut Library) -> bool {
    let Some(permutation) = library.permutation.take() else {
        return false;
    };

    if !is_valid_permutation(&permutation, library.questions.len()) {
        warn!(library = %library.name, "discarding invalid permutation; keeping current order");
        return true;
    }

    let mut slots: Vec<Option<Question>> = vec![None; permutation.len()];
    for (question, &old) in std::mem::take(&mut library.questions)
        .into_iter()
        .zip(&permutation)
    {
        slots[old] = Some(question);
    }
    library.questions = slots.into_iter().flatten().collect();

    library.answers = remap_answers(std::mem::take(&mut library.answers), &permutation);

    debug!(library = %library.name, "restored original order");
    true
}

/// Whether `permutation` is a bijection on `[0, len)`.
pub fn is_valid_permutation(permutation: &[usize], len: usize) -> bool {
    if permutation.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in permutation {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// `result[i] = questions[permutation[i]]`.
fn reorder(questions: Vec<Question>, permutation: &[usize]) -> Vec<Question> {
    let mut slots: Vec<Option<Question>> = questions.into_iter().map(Some).collect();
    permutation
        .iter()
        .filter_map(|&old| slots.get_mut(old).and_then(Option::take))
        .collect()
}

/// Move the record at shuffled position `i` to original position `permutation[i]`.
fn remap_answers(
    answers: BTreeMap<usize, AnswerRecord>,
    permutation: &[usize],
) -> BTreeMap<usize, AnswerRecord> {
    answers
        .into_iter()
        .filter_map(|(position, record)| permutation.get(position).map(|&old| (old, record)))
        .collect()
}
