use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing and assembling STRASSE log files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("splitting {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: expected {expected} tab-separated fields, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no log files match '{0}'")]
    NoLogFiles(String),

    #[error("no data rows found in files matching '{0}'")]
    NoRows(String),

    #[error("{path} has {found} columns but previous files have {expected}")]
    WidthMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("schema '{schema}' expects {expected} columns, log data has {found}")]
    SchemaMismatch {
        schema: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: cannot parse timestamp '{raw}'")]
    Timestamp {
        path: PathBuf,
        line: usize,
        raw: String,
    },

    #[error("{path}:{line}: local time {local} is ambiguous in {zone}")]
    AmbiguousTime {
        path: PathBuf,
        line: usize,
        local: String,
        zone: &'static str,
    },

    #[error("{path}:{line}: local time {local} does not exist in {zone}")]
    NonexistentTime {
        path: PathBuf,
        line: usize,
        local: String,
        zone: &'static str,
    },

    #[error("experiment number does not exist: {0}")]
    UnknownExperiment(u32),
}

/// Result type for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;
