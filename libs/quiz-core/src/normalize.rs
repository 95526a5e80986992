//! Normalization of raw imported records into questions.
//!
//! Import adapters produce one [`RawRecord`] per row/object. Field names are
//! matched against a fixed alias table (English and the Chinese headers used
//! by existing question banks), ignoring ASCII case and surrounding spaces.

use crate::error::{QuizError, Result};
use crate::types::{letters_to_string, Letter, Question, QuestionKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Field name → value mapping produced by an import adapter.
pub type RawRecord = BTreeMap<String, String>;

const STEM_FIELDS: &[&str] = &["stem", "question", "题干"];
const ANSWER_FIELDS: &[&str] = &["answer", "答案"];
const EXPLANATION_FIELDS: &[&str] = &["explanation", "解析"];
const KIND_FIELDS: &[&str] = &["kind", "type", "类型"];

/// Characters allowed between answer letters.
const ANSWER_SEPARATORS: &[char] = &[',', '，', ';', '；', '、', '/', '|'];

fn option_fields(letter: Letter) -> &'static [&'static str] {
    match letter {
        Letter::A => &["option_a", "optiona", "a", "选项A"],
        Letter::B => &["option_b", "optionb", "b", "选项B"],
        Letter::C => &["option_c", "optionc", "c", "选项C"],
        Letter::D => &["option_d", "optiond", "d", "选项D"],
        Letter::E => &["option_e", "optione", "e", "选项E"],
    }
}

/// First non-empty value among the aliases, trimmed.
fn field<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| {
        record
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(alias))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    })
}

/// Verify the batch carries every required field.
///
/// A field counts as present when at least one record has a value for it.
/// Missing fields are reported together, once for the whole batch.
pub fn check_batch(records: &[RawRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(QuizError::EmptyImport);
    }

    let required: [(&'static str, &[&str]); 4] = [
        ("stem", STEM_FIELDS),
        ("option A", option_fields(Letter::A)),
        ("option B", option_fields(Letter::B)),
        ("answer", ANSWER_FIELDS),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, aliases)| !records.iter().any(|r| field(r, aliases).is_some()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(QuizError::Schema { missing })
    }
}

/// Parse the letters of an answer field such as `AC`, `a, c` or `A、C`.
fn parse_answer(raw: &str) -> BTreeSet<Letter> {
    let mut letters = BTreeSet::new();
    for c in raw.chars() {
        if c.is_whitespace() || ANSWER_SEPARATORS.contains(&c) {
            continue;
        }
        match Letter::from_char(c) {
            Some(letter) => {
                letters.insert(letter);
            }
            None => warn!(character = %c, answer = raw, "ignoring unrecognised answer character"),
        }
    }
    letters
}

/// Convert one raw record into a question.
///
/// Missing optional fields default to empty. Without an explicit kind the
/// question is multi-select iff the answer names more than one letter.
pub fn normalize_record(record: &RawRecord) -> Question {
    let stem = field(record, STEM_FIELDS).unwrap_or_default();
    let options = Letter::ALL
        .iter()
        .filter_map(|&letter| field(record, option_fields(letter)).map(|text| (letter, text)));
    let answer = parse_answer(field(record, ANSWER_FIELDS).unwrap_or_default());

    let inferred = QuestionKind::infer(answer.len());
    let kind = match field(record, KIND_FIELDS) {
        Some(raw) => QuestionKind::from_str(raw).unwrap_or_else(|| {
            warn!(kind = raw, "unknown question kind, inferring from answer");
            inferred
        }),
        None => inferred,
    };

    let question = Question::new(stem, options, answer.iter().copied());
    if question.correct.len() != answer.len() {
        warn!(stem, "answer names letters without option text; dropping them");
    }

    let kind = if kind == QuestionKind::Single && question.correct.len() > 1 {
        warn!(stem, answer = %letters_to_string(&question.correct), "single-select question has several correct letters, importing as multi-select");
        QuestionKind::Multi
    } else {
        kind
    };

    question
        .with_kind(kind)
        .with_explanation(field(record, EXPLANATION_FIELDS).unwrap_or_default())
}

/// Check the batch, then normalize every record in order.
pub fn normalize_batch(records: &[RawRecord]) -> Result<Vec<Question>> {
    check_batch(records)?;
    Ok(records.iter().map(normalize_record).collect())
}
