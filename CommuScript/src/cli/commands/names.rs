//! CLI command for building the name cache

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{BOOK, DISK, print_done, print_step};
use crate::names::NameCache;
use crate::utils::expand_path;

/// Build the display name cache from the common strings file and save it
pub fn execute(common_strings: &Path, names_file: &Path, delimiter: char) -> anyhow::Result<()> {
    let start = Instant::now();
    let common_strings = expand_path(common_strings);
    let names_file = expand_path(names_file);

    print_step(1, 2, BOOK, &format!("Reading {}...", common_strings.display()));
    let (cache, stats) = NameCache::from_common_strings_file(&common_strings, delimiter)?;

    print_step(
        2,
        2,
        DISK,
        &format!("Writing {} names to {}...", cache.len(), names_file.display()),
    );
    cache.save(&names_file)?;

    println!(
        "Found {} display_character entries in {} strings",
        stats.names, stats.tokens
    );
    print_done(start.elapsed());
    Ok(())
}
