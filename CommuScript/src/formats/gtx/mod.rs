//! `.gtx.txt` string table format
//!
//! A flat text blob of `identifier^text` records separated by a single
//! delimiter character (`|` in shipped files). There is no escaping, so a
//! text payload can never contain the record delimiter.
//!
//! A few identifier suffixes are reserved:
//! - `_title` carries the chapter title and is not a line of text
//! - `_synopsis` is dropped
//! - `_null` with the [`NULL_TEXT_MARKER`] text is an intentionally empty
//!   placeholder and is dropped with a warning

mod reader;

pub use reader::{GtxTokens, parse_entry, parse_string_table, read_string_table, tokens};

use indexmap::IndexMap;

/// Default separator between records
pub const RECORD_DELIMITER: char = '|';

/// Separator between the identifier and the text of one record
pub const FIELD_DELIMITER: char = '^';

/// Suffix of the entry holding the chapter title
pub const TITLE_SUFFIX: &str = "_title";

/// Suffix of the (unused) synopsis entry
pub const SYNOPSIS_SUFFIX: &str = "_synopsis";

/// Suffix of placeholder entries
pub const NULL_SUFFIX: &str = "_null";

/// Text of a placeholder entry that has no real content ("no text")
pub const NULL_TEXT_MARKER: &str = "テキスト無し";

/// One `identifier^text` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub id: String,
    pub text: String,
}

impl StringEntry {
    /// How the reserved suffix rules route this entry
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        if self.id.ends_with(TITLE_SUFFIX) {
            EntryKind::Title
        } else if self.id.ends_with(SYNOPSIS_SUFFIX) {
            EntryKind::Synopsis
        } else if self.id.ends_with(NULL_SUFFIX) && self.text == NULL_TEXT_MARKER {
            EntryKind::NullText
        } else {
            EntryKind::Text
        }
    }
}

/// Routing of a string table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular line text
    Text,
    /// Chapter title
    Title,
    /// Synopsis, ignored
    Synopsis,
    /// Textless placeholder, ignored with a warning
    NullText,
}

/// A parsed string table: the identifier → text mapping plus the title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    /// Chapter title from the `_title` entry, if any
    pub title: Option<String>,
    /// Text entries in file order
    pub entries: IndexMap<String, String>,
}

impl StringTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the text for an identifier
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
