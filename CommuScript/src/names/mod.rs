//! Character display names
//!
//! Spoken lines reference characters by number. The common strings table
//! (`CM_jp.gtx.txt`) holds the display names as `display_character_<n>`
//! entries; [`NameCache`] extracts those once and persists them as a flat
//! JSON object so later runs don't have to re-read the common table.
//!
//! [`NameResolver`] turns a line's pair of character references into the
//! speaker label that ends up in the transcript.

mod cache;
mod resolver;

pub use cache::{
    DEFAULT_CACHE_FILE, DEFAULT_COMMON_STRINGS, NameCache, NameCacheOptions, NameCacheStats,
    load_or_build,
};
pub use resolver::NameResolver;

/// Key prefix of display name entries in the common strings table
pub const DISPLAY_CHARACTER_PREFIX: &str = "display_character_";

/// Speaker label for lines with no attributed character
pub const NARRATION_SPEAKER: &str = "---";

/// Speaker label for choice buttons
pub const BUTTON_SPEAKER: &str = "[button]";

/// Cache key for a character reference, e.g. `7` → `display_character_7`
pub fn display_key(reference: &str) -> String {
    format!("{DISPLAY_CHARACTER_PREFIX}{reference}")
}
