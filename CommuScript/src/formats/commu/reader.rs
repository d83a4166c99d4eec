//! Commu event file reading
//!
//! Records that fail validation are skipped and reported through the
//! caller's [`Diagnostics`]; only an unreadable or structurally broken file
//! is an error.

use super::types::{CommuScript, RawCommuFile};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Read an event file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid event file.
pub fn read_commu<P: AsRef<Path>>(path: P, diagnostics: &mut Diagnostics) -> Result<CommuScript> {
    let data = fs::read(path)?;
    parse_commu_bytes(&data, diagnostics)
}

/// Parse an event file from raw bytes (a leading UTF-8 BOM is allowed)
///
/// # Errors
/// Returns an error if the JSON is malformed or lacks the `header` object.
pub fn parse_commu_bytes(data: &[u8], diagnostics: &mut Diagnostics) -> Result<CommuScript> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let raw: RawCommuFile = serde_json::from_slice(data)?;
    CommuScript::from_raw(&raw, diagnostics)
}

/// Parse an event file from a JSON string
///
/// # Errors
/// Returns an error if the JSON is malformed or lacks the `header` object.
pub fn parse_commu_str(content: &str, diagnostics: &mut Diagnostics) -> Result<CommuScript> {
    parse_commu_bytes(content.as_bytes(), diagnostics)
}
