//! Error taxonomy for gencore.
//!
//! Mirrors the recovery policy of the original pipeline: CLI/setup errors
//! are fatal for the whole process, while per-genome I/O and invariant
//! errors are isolated to the job that produced them.

use thiserror::Error;

/// Errors that can occur while processing a single genome's job.
///
/// These are caught by the worker pool and turned into an empty
/// signature plus a logged error.
#[derive(Debug, Error)]
pub enum GenomeError {
    #[error("failed to open input {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create archive output {path}: {source}")]
    ArchiveCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read error in {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("archive {path} ended without a terminator record")]
    MissingTerminator { path: String },
}

/// Fatal, process-level errors. Any of these abort the whole run with a
/// non-zero exit code before any worker is scheduled.
#[derive(Debug, Error)]
pub enum GencoreError {
    #[error("{0}")]
    Cli(String),

    #[error("input list and {what} list have different lengths: {inputs} inputs vs {other} {what}")]
    ListLengthMismatch {
        what: &'static str,
        inputs: usize,
        other: usize,
    },

    #[error("at least 2 input genomes are required, got {0}")]
    TooFewGenomes(usize),

    #[error("BAM mode is not yet supported")]
    BamNotSupported,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
