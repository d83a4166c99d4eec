//! JSON output helpers
//!
//! Output files are written the way the game tooling community expects to
//! read them: UTF-8 text (no `\u` escaping) with 4-space indentation.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// Serialize `value` as 4-space indented JSON
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `value` and write it to `path`, creating parent directories
///
/// # Errors
/// Returns an error if serialization or any file system operation fails.
pub fn write_pretty_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_pretty_json(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_four_space_indent_and_raw_utf8() {
        let mut map = IndexMap::new();
        map.insert("display_character_1", "春香");
        let json = to_pretty_json(&map).unwrap();
        assert_eq!(json, "{\n    \"display_character_1\": \"春香\"\n}");
    }
}
