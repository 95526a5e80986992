//! Runtime configuration.
//!
//! Sources, later ones winning: built-in defaults, a `.env` file, the
//! `QUIZ_DATA_DIR` / `QUIZ_LOG` environment variables, command-line flags.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "QUIZ_DATA_DIR";
pub const LOG_VAR: &str = "QUIZ_LOG";

const APP_DIR: &str = "quiz-drill";
const SNAPSHOT_FILE: &str = "session.json";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub snapshot_path: PathBuf,
    /// `EnvFilter` directive string.
    pub log_filter: String,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load `.env`, then resolve against the process environment.
    pub fn load(overrides: Overrides) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let data_dir = overrides
            .data_dir
            .or_else(|| non_empty(DATA_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let log_filter = overrides
            .log_level
            .or_else(|| non_empty(LOG_VAR))
            .or_else(|| non_empty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            snapshot_path: data_dir.join(SNAPSHOT_FILE),
            data_dir,
            log_filter,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(Overrides::default(), env(&[]));
        assert!(config.data_dir.ends_with(APP_DIR));
        assert_eq!(config.snapshot_path, config.data_dir.join("session.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn environment_over_defaults() {
        let config = Config::resolve(
            Overrides::default(),
            env(&[(DATA_DIR_VAR, "/tmp/quiz"), (LOG_VAR, "debug"), ("RUST_LOG", "trace")]),
        );
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quiz"));
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/quiz/session.json"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rust_log_is_a_fallback() {
        let config = Config::resolve(Overrides::default(), env(&[("RUST_LOG", "info")]));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn flags_over_environment() {
        let overrides = Overrides {
            data_dir: Some(PathBuf::from("/srv/quiz")),
            log_level: Some("error".into()),
        };
        let config = Config::resolve(overrides, env(&[(DATA_DIR_VAR, "/tmp/quiz"), (LOG_VAR, "debug")]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/quiz"));
        assert_eq!(config.log_filter, "error");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = Config::resolve(Overrides::default(), env(&[(DATA_DIR_VAR, "  "), (LOG_VAR, "")]));
        assert!(config.data_dir.ends_with(APP_DIR));
        assert_eq!(config.log_filter, "warn");
    }
}
