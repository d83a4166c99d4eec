//! Transcript assembly
//!
//! Merges a chapter's event list and string table into an ordered sequence
//! of speaker/text lines, then slots the choice buttons in between.
//!
//! # Usage
//!
//! ```no_run
//! use commuscript::names::{NameCacheOptions, load_or_build};
//! use commuscript::transcript::{TranscribeOptions, transcribe_directory};
//!
//! let names = load_or_build(&NameCacheOptions::default())?;
//! let run = transcribe_directory("commu/main_01", &names, &TranscribeOptions::new())?;
//! for chapter in &run.document.chapters {
//!     println!("{} ({} lines)", chapter.id, chapter.lines.len());
//! }
//! run.write_to_dir("transcribed")?;
//! # Ok::<(), commuscript::Error>(())
//! ```

mod batch;
mod choices;
mod merge;
mod options;
mod types;

pub use batch::{
    ChapterFailure, TranscribeProgress, TranscriptRun, discover_chapters, document_id,
    transcribe_chapters, transcribe_directory,
};
pub use choices::{find_insertion_point, insert_choices};
pub use merge::{ChapterReport, ChapterSource, merge_chapter, transcribe_chapter};
pub use options::{MissingTextPolicy, TranscribeOptions};
pub use types::{Chapter, MergeStage, ResolvedLine, TranscriptDocument};
