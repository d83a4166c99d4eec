//! Error types for `CommuScript`

use std::path::PathBuf;

use thiserror::Error;

use crate::transcript::MergeStage;

/// The error type for `CommuScript` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== String Table (GTX) Errors ====================
    /// A string table token did not split into exactly one identifier and one text.
    #[error("malformed string table entry ({separators} field separators, expected 1): {token:?}")]
    MalformedStringEntry {
        /// The offending token as it appeared in the file.
        token: String,
        /// How many field separators the token actually contained.
        separators: usize,
    },

    // ==================== Event File Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// An event record could not be validated into a typed event.
    #[error("invalid {command} event: {field} {reason}")]
    InvalidEvent {
        /// The event's `command` value.
        command: String,
        /// The positional argument at fault (e.g. `arg1`).
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A line's text identifier is absent from the chapter's string table.
    #[error("line {line_id} references missing text {text_id:?}")]
    MissingText {
        /// The line the reference belongs to.
        line_id: u32,
        /// The text identifier that could not be found.
        text_id: String,
    },

    // ==================== Name Cache Errors ====================
    /// The common strings file needed to build the name cache does not exist.
    #[error("common strings file not found: {path}")]
    CommonStringsMissing {
        /// The expected path of the common strings file.
        path: PathBuf,
    },

    // ==================== Chapter / Batch Errors ====================
    /// The source directory contained no chapter files.
    #[error("no chapter files (.json/.txt) found in {dir}")]
    NoChapterFiles {
        /// The directory that was scanned.
        dir: PathBuf,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// A chapter failed while being merged; it is dropped from the transcript.
    #[error("chapter {chapter} failed while {stage}: {source}")]
    Chapter {
        /// Placeholder or header id of the chapter.
        chapter: String,
        /// The pipeline stage that was running.
        stage: MergeStage,
        /// The underlying failure.
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the chapter and stage it occurred in.
    #[must_use]
    pub fn in_chapter(self, chapter: impl Into<String>, stage: MergeStage) -> Self {
        Error::Chapter {
            chapter: chapter.into(),
            stage,
            source: Box::new(self),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `CommuScript` operations.
pub type Result<T> = std::result::Result<T, Error>;
