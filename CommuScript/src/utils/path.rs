//! Path utilities

use std::path::{Path, PathBuf};

/// Expand a leading `~` and environment variables in a user-supplied path
///
/// Falls back to the path as given when expansion fails (e.g. an unset
/// variable).
pub fn expand_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

/// File name with `suffix` removed, e.g. `main_01.json` → `main_01`
pub fn file_stem_str(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(suffix) {
        Some(stem) => stem.to_string(),
        None => name,
    }
}
