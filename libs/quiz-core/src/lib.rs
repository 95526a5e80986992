//! Core quiz engine shared by the command-line front end.
//!
//! Provides:
//! - Question normalization for imported spreadsheet/document records
//! - Answer evaluation for single- and multi-select questions
//! - Reversible shuffle/restore of a library's question order
//! - The session state machine (libraries, navigation, modes, answers)
//! - Snapshot persistence contract and an in-memory store

pub mod error;
pub mod evaluate;
pub mod import;
pub mod keymap;
pub mod normalize;
pub mod order;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use error::{QuizError, Result};
pub use evaluate::{evaluate_multi, evaluate_single};
pub use import::{load_library_file, read_records, ImportFormat, ImportedLibrary};
pub use keymap::Key;
pub use normalize::{check_batch, normalize_batch, normalize_record, RawRecord};
pub use session::{Session, SessionState};
pub use store::{MemoryStore, Snapshot, SnapshotStore, SNAPSHOT_VERSION};
pub use types::{AnswerRecord, Letter, Library, Mode, Question, QuestionKind, Theme};
pub use view::{OptionMark, OptionView, QuestionView, Reveal};
