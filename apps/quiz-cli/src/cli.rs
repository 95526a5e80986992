//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use quiz_core::{Key, Letter, Mode};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "quiz",
    version,
    about = "Drill multiple-choice question banks from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the saved session (overrides QUIZ_DATA_DIR).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter such as `info` or `quiz_core=debug` (overrides QUIZ_LOG).
    #[arg(long = "log-level", value_name = "FILTER", global = true)]
    pub log_level: Option<String>,

    /// Print the question view as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Import a question bank (.csv, .xlsx, .xls or .json) as a new library.
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// List imported libraries.
    Libraries,

    /// Switch to another library (1-based, as listed).
    Select {
        #[arg(value_name = "N")]
        number: usize,
    },

    /// Delete the active library.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Clear all answers and restore import order in the active library.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the current question.
    Show,

    /// Go to the next question.
    Next,

    /// Go to the previous question.
    Prev,

    /// Go to a question by number (1-based).
    Jump {
        #[arg(value_name = "N")]
        number: usize,
    },

    /// Set the mode, or toggle it when none is given.
    Mode {
        #[arg(value_enum)]
        mode: Option<ModeArg>,
    },

    /// Shuffle the active library, or restore its import order.
    Shuffle,

    /// Mark or unmark the current question as a favorite.
    Favorite,

    /// Answer a single-select question.
    Answer {
        #[arg(value_parser = parse_letter)]
        letter: Letter,
    },

    /// Select or deselect an option of a multi-select question.
    Toggle {
        #[arg(value_parser = parse_letter)]
        letter: Letter,
    },

    /// Submit the multi-select selection.
    Submit,

    /// Feed a key press: left, right, space, enter or a letter.
    Key {
        #[arg(value_parser = parse_key)]
        key: Key,
    },

    /// Switch between light and dark theme.
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Practice,
    Review,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Practice => Mode::Practice,
            ModeArg::Review => Mode::Review,
        }
    }
}

fn parse_letter(s: &str) -> Result<Letter, String> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Letter::from_char(c).ok_or_else(|| format!("{s:?} is not an option letter A-E")),
        _ => Err(format!("expected a single letter A-E, got {s:?}")),
    }
}

fn parse_key(s: &str) -> Result<Key, String> {
    Key::parse(s).ok_or_else(|| format!("unknown key {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quiz", "show", "--data-dir", "/tmp/q", "--json"]).unwrap();
        assert_eq!(cli.command, Command::Show);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/q")));
        assert!(cli.json);
    }

    #[test]
    fn letters_are_case_insensitive() {
        let cli = Cli::try_parse_from(["quiz", "answer", "c"]).unwrap();
        assert_eq!(cli.command, Command::Answer { letter: Letter::C });
    }

    #[test]
    fn bad_letters_are_rejected() {
        assert!(Cli::try_parse_from(["quiz", "answer", "F"]).is_err());
        assert!(Cli::try_parse_from(["quiz", "toggle", "AB"]).is_err());
    }

    #[test]
    fn mode_is_optional() {
        let toggle = Cli::try_parse_from(["quiz", "mode"]).unwrap();
        assert_eq!(toggle.command, Command::Mode { mode: None });

        let review = Cli::try_parse_from(["quiz", "mode", "review"]).unwrap();
        assert_eq!(review.command, Command::Mode { mode: Some(ModeArg::Review) });
    }

    #[test]
    fn destructive_commands_accept_yes() {
        let cli = Cli::try_parse_from(["quiz", "delete", "-y"]).unwrap();
        assert_eq!(cli.command, Command::Delete { yes: true });

        let cli = Cli::try_parse_from(["quiz", "reset"]).unwrap();
        assert_eq!(cli.command, Command::Reset { yes: false });
    }

    #[test]
    fn keys_parse() {
        let cli = Cli::try_parse_from(["quiz", "key", "space"]).unwrap();
        assert_eq!(cli.command, Command::Key { key: Key::Space });
        assert!(Cli::try_parse_from(["quiz", "key", "escape"]).is_err());
    }
}
