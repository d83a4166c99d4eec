//! Options for transcript generation

use std::path::PathBuf;

use crate::formats::gtx::RECORD_DELIMITER;

/// What to do when a line's text identifier is missing from the string table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTextPolicy {
    /// Drop the line (or choice) and record a warning
    #[default]
    Skip,
    /// Fail the whole chapter
    Abort,
}

/// Options for merging chapters into a transcript.
///
/// # Example
///
/// ```
/// use commuscript::transcript::{MissingTextPolicy, TranscribeOptions};
///
/// let options = TranscribeOptions::new()
///     .with_missing_text(MissingTextPolicy::Abort)
///     .with_parallel(true);
/// assert_eq!(options.delimiter, '|');
/// ```
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// Record delimiter of the chapter string tables
    pub delimiter: char,
    /// Handling of unresolvable text references
    pub missing_text: MissingTextPolicy,
    /// Merge chapters on the rayon thread pool (output order is unchanged)
    pub parallel: bool,
    /// Files in the source directory that are never chapters (e.g. the name
    /// cache or common strings table when they live alongside the chapters)
    pub exclude: Vec<PathBuf>,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            delimiter: RECORD_DELIMITER,
            missing_text: MissingTextPolicy::Skip,
            parallel: false,
            exclude: Vec::new(),
        }
    }
}

impl TranscribeOptions {
    /// Create options with the defaults: `|` delimiter, skip missing text, sequential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_missing_text(mut self, policy: MissingTextPolicy) -> Self {
        self.missing_text = policy;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude.push(path.into());
        self
    }
}
