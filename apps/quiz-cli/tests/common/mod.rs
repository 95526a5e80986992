//! Shared setup for command-line integration tests.
//!
//! Each test gets its own temporary data directory; commands go through
//! argument parsing, the session file and rendering exactly as the binary
//! does, minus process setup.

pub mod fixtures;

use clap::Parser;
use quiz_cli::cli::Cli;
use quiz_cli::state::AppState;
use quiz_cli::store::JsonFileStore;
use quiz_cli::{execute, Output, OutputFormat};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("data").join("session.json")
    }

    /// Run one invocation, reloading the session from disk like the binary.
    pub fn try_run(&self, args: &[&str]) -> anyhow::Result<Output> {
        let cli = Cli::try_parse_from(std::iter::once("quiz").chain(args.iter().copied()))?;
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text { color: false }
        };
        let mut state = AppState::open(JsonFileStore::new(self.snapshot_path()))?;
        execute(&mut state, &cli.command, format)
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.try_run(args)
            .unwrap_or_else(|e| panic!("quiz {} failed: {e:#}", args.join(" ")))
    }
}
