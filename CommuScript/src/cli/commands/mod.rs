use clap::Subcommand;
use std::path::PathBuf;

use crate::names::{DEFAULT_CACHE_FILE, DEFAULT_COMMON_STRINGS};

pub mod execute;
pub mod names;
pub mod transcribe;

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a directory of commu .json/.txt pairs into one transcript
    Transcribe {
        /// Directory containing commu .txt and .json files (paired by sorted file name)
        source: PathBuf,

        /// Directory to save the transcript to
        #[arg(short, long, default_value = "transcribed", value_name = "DIR")]
        output_dir: PathBuf,

        /// Common strings file used to build the name cache
        #[arg(short = 'c', long = "cm-gtx", default_value = DEFAULT_COMMON_STRINGS, value_name = "CM_FILE")]
        common_strings: PathBuf,

        /// Character display name cache file
        #[arg(short = 'n', long = "names-file", default_value = DEFAULT_CACHE_FILE, value_name = "NAME_FILE")]
        names_file: PathBuf,

        /// Force regeneration of the name cache file
        #[arg(short = 'r', long)]
        force_regen_names: bool,

        /// Record delimiter of the string tables
        #[arg(long, default_value_t = '|')]
        delimiter: char,

        /// Fail a chapter when a line's text is missing instead of skipping the line
        #[arg(long)]
        strict: bool,

        /// Merge chapters in parallel
        #[arg(long)]
        parallel: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Only (re)generate the character display name cache
    Names {
        /// Common strings file
        #[arg(short = 'c', long = "cm-gtx", default_value = DEFAULT_COMMON_STRINGS, value_name = "CM_FILE")]
        common_strings: PathBuf,

        /// Character display name cache file to write
        #[arg(short = 'n', long = "names-file", default_value = DEFAULT_CACHE_FILE, value_name = "NAME_FILE")]
        names_file: PathBuf,

        /// Record delimiter of the common strings file
        #[arg(long, default_value_t = '|')]
        delimiter: char,
    },
}
