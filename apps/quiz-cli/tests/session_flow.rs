//! End-to-end command sequences against a session file.

mod common;

use common::{fixtures, TestContext};
use pretty_assertions::assert_eq;
use quiz_cli::store::JsonFileStore;
use quiz_core::{AnswerRecord, Letter, Mode, SnapshotStore};
use std::collections::BTreeSet;

fn saved_state(ctx: &TestContext) -> quiz_core::SessionState {
    JsonFileStore::new(ctx.snapshot_path())
        .load()
        .unwrap()
        .expect("session saved")
        .state
}

#[test]
fn fresh_session_shows_hint() {
    let ctx = TestContext::new();
    let output = ctx.run(&["show"]);
    assert_eq!(output.text, "No library loaded. Import one with `quiz import <FILE>`.\n");
    assert!(!ctx.snapshot_path().exists());
}

#[test]
fn import_then_answer_persists() {
    let ctx = TestContext::new();
    let bank = fixtures::spreadsheet_bank(ctx.dir(), "science");

    let output = ctx.run(&["import", bank.to_str().unwrap()]);
    assert!(output.text.starts_with("Imported 3 questions into \"science\".\n\n"));
    assert!(output.text.contains("[science] Question 1/3 (33%) | single, practice"));

    let output = ctx.run(&["answer", "b"]);
    assert!(output.text.contains("Correct!\nAnswer: B\nExplanation: Used in photosynthesis"));

    ctx.run(&["next"]);
    ctx.run(&["toggle", "A"]);
    ctx.run(&["toggle", "B"]);
    let output = ctx.run(&["submit"]);
    assert!(output.text.contains("Incorrect.\nAnswer: ABC"));

    let state = saved_state(&ctx);
    let library = &state.libraries[0];
    assert_eq!(state.position, 1);
    assert_eq!(
        library.answers.get(&0),
        Some(&AnswerRecord::Single {
            selected: Letter::B,
            correct: true
        })
    );
    assert_eq!(
        library.answers.get(&1),
        Some(&AnswerRecord::Multi {
            selected: BTreeSet::from([Letter::A, Letter::B]),
            correct: false,
            submitted: true,
        })
    );
}

#[test]
fn workbook_import() {
    let ctx = TestContext::new();
    let bank = fixtures::workbook_bank(ctx.dir(), "chemistry");

    let output = ctx.run(&["import", bank.to_str().unwrap()]);
    assert!(output.text.starts_with("Imported 2 questions into \"chemistry\".\n\n"));
    assert!(output.text.contains("   B. 100 °C\n"));

    ctx.run(&["next"]);
    ctx.run(&["toggle", "a"]);
    ctx.run(&["toggle", "b"]);
    let output = ctx.run(&["submit"]);
    assert!(output.text.contains("Correct!\nAnswer: AB"));

    let state = saved_state(&ctx);
    assert_eq!(state.libraries[0].name, "chemistry");
    assert!(state.libraries[0].answers.get(&1).is_some_and(|a| a.is_correct()));
}

#[test]
fn failed_save_is_a_warning() {
    let ctx = TestContext::new();
    let bank = fixtures::document_bank(ctx.dir(), "numbers", 2);
    ctx.run(&["import", bank.to_str().unwrap()]);

    std::fs::create_dir(ctx.snapshot_path().with_extension("json.tmp")).unwrap();

    let output = ctx.try_run(&["next"]).expect("command succeeds despite the failed save");
    assert!(output.text.contains("[numbers] Question 2/2"));
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].starts_with("session storage error: "));

    assert_eq!(saved_state(&ctx).position, 0);
}

#[test]
fn shuffle_survives_reload_and_restores() {
    let ctx = TestContext::new();
    let bank = fixtures::document_bank(ctx.dir(), "numbers", 12);
    ctx.run(&["import", bank.to_str().unwrap()]);

    ctx.run(&["jump", "5"]);
    ctx.run(&["answer", "C"]);
    ctx.run(&["shuffle"]);

    let shuffled = saved_state(&ctx);
    let library = &shuffled.libraries[0];
    let permutation = library.permutation.clone().expect("shuffled library");
    let new_position = permutation.iter().position(|&old| old == 4).unwrap();
    assert_eq!(library.questions[new_position].stem, "Question 5");
    assert!(library.answers.contains_key(&new_position));
    assert_eq!(shuffled.position, 0);

    let output = ctx.run(&["shuffle"]);
    assert!(output.text.starts_with("Import order restored.\n"));

    let restored = saved_state(&ctx);
    let library = &restored.libraries[0];
    assert_eq!(library.permutation, None);
    let stems: Vec<_> = library.questions.iter().map(|q| q.stem.as_str()).collect();
    let expected: Vec<String> = (1..=12).map(|n| format!("Question {n}")).collect();
    assert_eq!(stems, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(library.answers.keys().copied().collect::<Vec<_>>(), vec![4]);
}

#[test]
fn review_mode_and_keys() {
    let ctx = TestContext::new();
    let bank = fixtures::spreadsheet_bank(ctx.dir(), "science");
    ctx.run(&["import", bank.to_str().unwrap()]);

    let output = ctx.run(&["key", "space"]);
    assert!(output.text.contains("single, review"));
    assert!(output.text.contains(" + B. Carbon dioxide"));

    let output = ctx.run(&["answer", "B"]);
    assert!(output.text.starts_with("Answers are shown in review mode."));

    ctx.run(&["mode", "practice"]);
    ctx.run(&["key", "right"]);
    ctx.run(&["key", "c"]);
    ctx.run(&["key", "enter"]);

    let state = saved_state(&ctx);
    assert_eq!(state.mode, Mode::Practice);
    assert!(state.libraries[0].answers.get(&1).is_some_and(|a| a.is_submitted()));
}

#[test]
fn reset_keeps_favorites() {
    let ctx = TestContext::new();
    let bank = fixtures::document_bank(ctx.dir(), "numbers", 3);
    ctx.run(&["import", bank.to_str().unwrap()]);
    ctx.run(&["favorite"]);
    ctx.run(&["answer", "B"]);
    ctx.run(&["shuffle"]);

    let output = ctx.run(&["reset"]);
    assert!(output.text.starts_with("Library reset.\n"));

    let state = saved_state(&ctx);
    let library = &state.libraries[0];
    assert!(library.answers.is_empty());
    assert_eq!(library.permutation, None);
    assert!(library.questions[0].favorited);
}

#[test]
fn library_switching_and_delete() {
    let ctx = TestContext::new();
    let first = fixtures::document_bank(ctx.dir(), "first", 2);
    let second = fixtures::spreadsheet_bank(ctx.dir(), "second");
    ctx.run(&["import", first.to_str().unwrap()]);
    ctx.run(&["import", second.to_str().unwrap()]);

    let listing = ctx.run(&["libraries"]).text;
    assert!(listing.contains("  1. first (2 questions, 0 answered"));
    assert!(listing.contains("> 2. second (3 questions, 0 answered"));

    let output = ctx.run(&["select", "1"]);
    assert!(output.text.contains("[first] Question 1/2"));

    let output = ctx.run(&["delete"]);
    assert!(output.text.starts_with("Deleted \"first\".\n"));
    assert!(output.text.contains("> 1. second"));

    ctx.run(&["delete"]);
    let output = ctx.run(&["delete"]);
    assert_eq!(output.warnings, vec!["no library loaded".to_string()]);

    let state = saved_state(&ctx);
    assert!(state.libraries.is_empty());
    assert_eq!(state.active_library, None);
}

#[test]
fn failed_import_leaves_session_untouched() {
    let ctx = TestContext::new();
    let good = fixtures::document_bank(ctx.dir(), "good", 2);
    ctx.run(&["import", good.to_str().unwrap()]);

    let broken = fixtures::bank_without_answers(ctx.dir());
    let error = ctx.try_run(&["import", broken.to_str().unwrap()]).unwrap_err();
    assert_eq!(error.to_string(), "import is missing required fields: answer");

    let unsupported = ctx.dir().join("bank.txt");
    std::fs::write(&unsupported, "plain text").unwrap();
    let error = ctx.try_run(&["import", unsupported.to_str().unwrap()]).unwrap_err();
    assert_eq!(error.to_string(), "unsupported import format: \"txt\"");

    let corrupt = ctx.dir().join("corrupt.xlsx");
    std::fs::write(&corrupt, "not a workbook").unwrap();
    let error = ctx.try_run(&["import", corrupt.to_str().unwrap()]).unwrap_err();
    assert!(error.to_string().starts_with("failed to parse workbook import"));

    assert_eq!(saved_state(&ctx).libraries.len(), 1);
}

#[test]
fn corrupt_snapshot_is_an_error() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.snapshot_path().parent().unwrap()).unwrap();
    std::fs::write(ctx.snapshot_path(), "not json").unwrap();

    let error = ctx.try_run(&["show"]).unwrap_err();
    assert!(error.to_string().starts_with("session storage error: invalid snapshot"));
}

#[test]
fn json_output() {
    let ctx = TestContext::new();
    let bank = fixtures::spreadsheet_bank(ctx.dir(), "science");
    ctx.run(&["import", bank.to_str().unwrap()]);

    let output = ctx.run(&["next", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["view"]["number"], 2);
    assert_eq!(value["view"]["kind"], "multi");
    assert_eq!(value["view"]["options"][0]["letter"], "A");
    assert_eq!(value["theme"], "light");

    let output = ctx.run(&["libraries", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["libraries"][0]["name"], "science");
    assert_eq!(value["libraries"][0]["active"], true);
}
