use std::path::PathBuf;
use thiserror::Error;

/// Problems with the invocation itself. All of these are reported before any
/// history is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("author filter must not be empty (pass --user <AUTHOR>)")]
    EmptyAuthor,
    #[error("invalid directory: {path} ({source})")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a git repository: {path} ({source})")]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Failures of the `git log` subprocess. Any of these ends the run.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to launch git: {0}")]
    Launch(#[source] std::io::Error),
    #[error("git exited with status {}: {stderr}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Execution { code: Option<i32>, stderr: String },
    #[error("failed to read git output: {0}")]
    Read(#[source] std::io::Error),
}

/// A single log line that could not be turned into a commit timestamp.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    TooFewFields(usize),
    #[error("malformed UTC offset {0:?} (expected ±HHMM)")]
    Offset(String),
    #[error("cannot parse timestamp {text:?}: {source}")]
    Timestamp {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}
