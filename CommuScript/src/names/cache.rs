//! Name cache construction and persistence

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use super::{DISPLAY_CHARACTER_PREFIX, display_key};
use crate::error::{Error, Result};
use crate::formats::gtx::{self, RECORD_DELIMITER};
use crate::utils::write_pretty_json;

/// Default common strings file
pub const DEFAULT_COMMON_STRINGS: &str = "CM_jp.gtx.txt";

/// Default name cache file
pub const DEFAULT_CACHE_FILE: &str = "character_names.json";

/// Display name lookup (`display_character_<n>` → name)
///
/// Read-only once built; shared by every chapter of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCache {
    names: IndexMap<String, String>,
}

/// Counts gathered while building a cache from the common strings table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameCacheStats {
    /// Records in the common strings table
    pub tokens: usize,
    /// `display_character_` records among them
    pub names: usize,
}

impl NameCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of cached names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a name by full cache key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Look up a name by character reference (`7` → `display_character_7`)
    pub fn display_name(&self, reference: &str) -> Option<&str> {
        self.get(&display_key(reference))
    }

    /// Insert a name directly (for testing or manual additions)
    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        self.names.insert(key.into(), name.into());
    }

    /// Build the cache from the contents of a common strings table
    ///
    /// Only records whose identifier starts with `display_character_` are
    /// looked at; the rest of the table is never split.
    ///
    /// # Errors
    /// Returns [`Error::MalformedStringEntry`] if a display name record does not
    /// split into identifier and name.
    pub fn from_common_strings(content: &str, delimiter: char) -> Result<(Self, NameCacheStats)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut cache = Self::new();
        let mut stats = NameCacheStats::default();

        for token in content.split(delimiter).filter(|t| !t.is_empty()) {
            stats.tokens += 1;
            if token.starts_with(DISPLAY_CHARACTER_PREFIX) {
                stats.names += 1;
                let entry = gtx::parse_entry(token)?;
                cache.names.insert(entry.id, entry.text);
            }
        }

        tracing::info!(
            "found {} display_character entries in {} strings",
            stats.names,
            stats.tokens
        );
        Ok((cache, stats))
    }

    /// Build the cache from a common strings file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a display record is malformed.
    pub fn from_common_strings_file<P: AsRef<Path>>(
        path: P,
        delimiter: char,
    ) -> Result<(Self, NameCacheStats)> {
        let path = path.as_ref();
        tracing::info!("reading {}...", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_common_strings(&content, delimiter)
    }

    /// Save the cache as a flat JSON object
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        tracing::info!("writing to {}...", path.as_ref().display());
        write_pretty_json(path, &self.names)
    }

    /// Load a cache saved by [`NameCache::save`]
    ///
    /// # Errors
    /// Returns an error if reading or deserialization fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let names: IndexMap<String, String> = serde_json::from_str(&json)?;
        Ok(Self { names })
    }
}

impl FromIterator<(String, String)> for NameCache {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Where the name cache comes from and whether to rebuild it
#[derive(Debug, Clone)]
pub struct NameCacheOptions {
    /// Common strings table used to (re)build the cache
    pub common_strings: PathBuf,
    /// Cache file to load from and save to
    pub cache_path: PathBuf,
    /// Rebuild even if the cache file exists
    pub force_regenerate: bool,
    /// Record delimiter of the common strings table
    pub delimiter: char,
}

impl Default for NameCacheOptions {
    fn default() -> Self {
        Self {
            common_strings: PathBuf::from(DEFAULT_COMMON_STRINGS),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            force_regenerate: false,
            delimiter: RECORD_DELIMITER,
        }
    }
}

impl NameCacheOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_common_strings(mut self, path: impl Into<PathBuf>) -> Self {
        self.common_strings = path.into();
        self
    }

    #[must_use]
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    #[must_use]
    pub fn with_force_regenerate(mut self, force: bool) -> Self {
        self.force_regenerate = force;
        self
    }

    /// Rebuild the cache from the common strings table and save it
    ///
    /// # Errors
    /// Returns [`Error::CommonStringsMissing`] if the common strings file does not
    /// exist, or any read/parse/write error.
    pub fn regenerate(&self) -> Result<NameCache> {
        if !self.common_strings.is_file() {
            return Err(Error::CommonStringsMissing {
                path: self.common_strings.clone(),
            });
        }
        let (cache, _) = NameCache::from_common_strings_file(&self.common_strings, self.delimiter)?;
        cache.save(&self.cache_path)?;
        Ok(cache)
    }
}

/// Load the name cache, building it first when needed
///
/// Uses the cache file when it exists, unless `force_regenerate` is set;
/// otherwise builds it from the common strings table and saves it.
///
/// # Errors
/// Returns an error if the cache cannot be loaded or rebuilt.
pub fn load_or_build(options: &NameCacheOptions) -> Result<NameCache> {
    let cache = if options.cache_path.is_file() {
        if options.force_regenerate {
            tracing::info!(
                "overwriting existing name cache at {}",
                options.cache_path.display()
            );
            options.regenerate()?
        } else {
            tracing::info!(
                "name cache already found at {}, using...",
                options.cache_path.display()
            );
            NameCache::load(&options.cache_path)?
        }
    } else {
        tracing::info!("no name cache file found, generating...");
        options.regenerate()?
    };

    tracing::debug!("found {} names", cache.len());
    Ok(cache)
}
