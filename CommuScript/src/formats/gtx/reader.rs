//! `.gtx.txt` tokenizing and parsing

use std::path::Path;
use std::str::Split;

use super::{EntryKind, FIELD_DELIMITER, StringEntry, StringTable};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};

/// Lazy iterator over the records of a string table blob
///
/// Yields one `Result<StringEntry>` per non-empty record. Nothing is
/// materialized up front, so arbitrarily large tables can be walked.
#[derive(Debug, Clone)]
pub struct GtxTokens<'a> {
    inner: Split<'a, char>,
}

impl<'a> Iterator for GtxTokens<'a> {
    type Item = Result<StringEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.inner.next()?;
            // A trailing delimiter leaves an empty record behind
            if token.is_empty() {
                continue;
            }
            return Some(parse_entry(token));
        }
    }
}

/// Start tokenizing `content`, splitting records on `delimiter`
pub fn tokens(content: &str, delimiter: char) -> GtxTokens<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    GtxTokens {
        inner: content.split(delimiter),
    }
}

/// Split a single record into identifier and text
///
/// # Errors
///
/// Returns [`Error::MalformedStringEntry`] unless the record contains the
/// field delimiter exactly once.
pub fn parse_entry(token: &str) -> Result<StringEntry> {
    let separators = token.matches(FIELD_DELIMITER).count();
    match token.split_once(FIELD_DELIMITER) {
        Some((id, text)) if separators == 1 => Ok(StringEntry {
            id: id.to_string(),
            text: text.to_string(),
        }),
        _ => Err(Error::MalformedStringEntry {
            token: token.to_string(),
            separators,
        }),
    }
}

/// Parse a whole string table, applying the reserved suffix rules
///
/// # Errors
///
/// Fails on the first malformed record; the table is then unusable.
pub fn parse_string_table(
    content: &str,
    delimiter: char,
    diagnostics: &mut Diagnostics,
) -> Result<StringTable> {
    let mut table = StringTable::new();

    for entry in tokens(content, delimiter) {
        let entry = entry?;
        match entry.kind() {
            EntryKind::Title => {
                tracing::debug!("chapter title: {}", entry.text);
                table.title = Some(entry.text);
            }
            EntryKind::Synopsis => {}
            EntryKind::NullText => {
                diagnostics.push(Warning::NullTextSkipped { id: entry.id });
            }
            EntryKind::Text => {
                if table.entries.contains_key(&entry.id) {
                    diagnostics.push(Warning::DuplicateStringId {
                        id: entry.id.clone(),
                    });
                }
                table.entries.insert(entry.id, entry.text);
            }
        }
    }

    tracing::debug!("found {} lines in text data", table.entries.len());
    Ok(table)
}

/// Read and parse a string table file
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error from
/// [`parse_string_table`].
pub fn read_string_table<P: AsRef<Path>>(
    path: P,
    delimiter: char,
    diagnostics: &mut Diagnostics,
) -> Result<StringTable> {
    let content = std::fs::read_to_string(path)?;
    parse_string_table(&content, delimiter, diagnostics)
}
