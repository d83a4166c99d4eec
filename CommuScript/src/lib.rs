//! # CommuScript
//!
//! Rebuilds readable dialogue transcripts from visual-novel "commu" script
//! exports.
//!
//! Each chapter ships as two files that are unreadable on their own:
//!
//! - **Event list** (`.json`) - which lines are spoken, by which character
//!   reference, plus the choice buttons
//! - **String table** (`.gtx.txt`) - `id^text` records joined with `|`
//!
//! A third file, the common strings table, supplies character display names
//! and is turned into a [`names::NameCache`] once.
//!
//! ## Quick Start
//!
//! ```no_run
//! use commuscript::prelude::*;
//!
//! let names = load_or_build(&NameCacheOptions::default())?;
//! let run = transcribe_directory("commu/main_01", &names, &TranscribeOptions::new())?;
//! println!("{} chapters, {} failed", run.success_count(), run.fail_count());
//! run.write_to_dir("transcribed")?;
//! # Ok::<(), commuscript::Error>(())
//! ```
//!
//! ## Merging in memory
//!
//! ```
//! use commuscript::prelude::*;
//! use commuscript::formats::commu::parse_commu_str;
//! use commuscript::formats::gtx::parse_string_table;
//!
//! let mut diagnostics = Diagnostics::new();
//! let script = parse_commu_str(r#"{
//!     "header": { "title": "op" },
//!     "datas": {
//!         "CutRecord": [
//!             { "command": "actor_text", "arg1": "1000", "arg4": "1", "arg5": "1", "arg6": "l0" },
//!             { "command": "actor_text", "arg1": "1002", "arg4": "null", "arg5": "null", "arg6": "l2" }
//!         ],
//!         "Scenario": [ { "command": "select1", "arg1": "op_sel_1001" } ]
//!     }
//! }"#, &mut diagnostics)?;
//!
//! let table = parse_string_table("l0^Hi!|op_sel_1001^Wave back|l2^(later)", '|', &mut diagnostics)?;
//!
//! let mut names = NameCache::new();
//! names.insert("display_character_1", "Haruka");
//!
//! let chapter = merge_chapter("op", &script, &table, &names, MissingTextPolicy::Skip, &mut diagnostics)?;
//! let speakers: Vec<_> = chapter.lines.iter().map(|l| l.speaker.as_str()).collect();
//! assert_eq!(speakers, ["Haruka", "[button]", "---"]);
//! # Ok::<(), commuscript::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `commuscript` command-line binary

pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod names;
pub mod transcript;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::diagnostics::{Diagnostics, UnplaceableReason, Warning};
    pub use crate::error::{Error, Result};
    pub use crate::formats::commu::{ChoiceEvent, CommuEvent, CommuScript, SpeakerRef, SpeechEvent};
    pub use crate::formats::gtx::{StringEntry, StringTable};
    pub use crate::names::{NameCache, NameCacheOptions, NameResolver, load_or_build};
    pub use crate::transcript::{
        Chapter, ChapterSource, MissingTextPolicy, ResolvedLine, TranscribeOptions,
        TranscriptDocument, TranscriptRun, merge_chapter, transcribe_directory,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
