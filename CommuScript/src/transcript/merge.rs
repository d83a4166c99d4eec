//! Per-chapter merge pipeline
//!
//! `ParsingEvents → ParsingText → Resolving → Sorting → InsertingChoices → Done`
//!
//! Problems with a single line or choice are recorded in the chapter's
//! [`Diagnostics`] and the line is dropped; a failure to parse either file
//! (or a missing text under [`MissingTextPolicy::Abort`]) fails the chapter.

use std::path::{Path, PathBuf};

use super::choices::insert_choices;
use super::options::{MissingTextPolicy, TranscribeOptions};
use super::types::{Chapter, MergeStage, ResolvedLine};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::formats::commu::{CommuScript, SpeechEvent, read_commu};
use crate::formats::gtx::{StringTable, read_string_table};
use crate::names::{NameCache, NameResolver};

/// The pair of files backing one chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSource {
    /// Placeholder id derived from the event file name
    pub id: String,
    /// Event list (`.json`)
    pub events: PathBuf,
    /// String table (`.txt`)
    pub text: PathBuf,
}

impl ChapterSource {
    pub fn new(events: impl Into<PathBuf>, text: impl Into<PathBuf>) -> Self {
        let events = events.into();
        let id = crate::utils::file_stem_str(&events, ".json");
        Self {
            id,
            events,
            text: text.into(),
        }
    }
}

/// A merged chapter together with the warnings raised while merging it
#[derive(Debug, Clone)]
pub struct ChapterReport {
    pub chapter: Chapter,
    pub diagnostics: Diagnostics,
}

/// Load both files of a chapter and merge them
///
/// # Errors
/// Returns [`Error::Chapter`] naming the failing stage.
pub fn transcribe_chapter(
    source: &ChapterSource,
    names: &NameCache,
    options: &TranscribeOptions,
) -> Result<ChapterReport> {
    let mut diagnostics = Diagnostics::new();

    let script = read_commu(&source.events, &mut diagnostics)
        .map_err(|e| e.in_chapter(&source.id, MergeStage::ParsingEvents))?;
    tracing::debug!(
        "found {} actor_text events and {} select1 buttons in {}",
        script.speech.len(),
        script.choices.len(),
        display_name(&source.events)
    );

    let table = read_string_table(&source.text, options.delimiter, &mut diagnostics)
        .map_err(|e| e.in_chapter(&source.id, MergeStage::ParsingText))?;

    let chapter = merge_chapter(&source.id, &script, &table, names, options.missing_text, &mut diagnostics)?;
    Ok(ChapterReport { chapter, diagnostics })
}

/// Merge an already-parsed event list and string table into a chapter
///
/// `fallback_id` is used when the event file has no header title.
///
/// # Errors
/// Returns [`Error::Chapter`] wrapping [`Error::MissingText`] when `policy`
/// is [`MissingTextPolicy::Abort`] and a text reference is unresolvable.
pub fn merge_chapter(
    fallback_id: &str,
    script: &CommuScript,
    table: &StringTable,
    names: &NameCache,
    policy: MissingTextPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<Chapter> {
    let mut chapter = Chapter::new(script.title.as_deref().unwrap_or(fallback_id));
    chapter.title.clone_from(&table.title);

    let resolver = NameResolver::new(names);
    let mut lines = resolve_lines(&script.speech, table, &resolver, policy, diagnostics)
        .map_err(|e| e.in_chapter(&chapter.id, MergeStage::Resolving))?;

    sort_lines(&mut lines, diagnostics);

    insert_choices(&mut lines, &script.choices, table, policy, diagnostics)
        .map_err(|e| e.in_chapter(&chapter.id, MergeStage::InsertingChoices))?;

    chapter.lines = lines;
    tracing::debug!("chapter {} complete with {} lines", chapter.id, chapter.lines.len());
    Ok(chapter)
}

fn resolve_lines(
    events: &[SpeechEvent],
    table: &StringTable,
    resolver: &NameResolver<'_>,
    policy: MissingTextPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ResolvedLine>> {
    let mut lines = Vec::with_capacity(events.len());

    for event in events {
        let Some(speaker) =
            resolver.resolve(event.line_id, &event.display, &event.actor, diagnostics)
        else {
            continue;
        };

        let Some(text) = table.get(&event.text_id) else {
            if policy == MissingTextPolicy::Abort {
                return Err(Error::MissingText {
                    line_id: event.line_id,
                    text_id: event.text_id.clone(),
                });
            }
            diagnostics.push(Warning::MissingText {
                line_id: event.line_id,
                text_id: event.text_id.clone(),
            });
            continue;
        };

        lines.push(ResolvedLine::new(event.line_id, speaker, text));
    }

    Ok(lines)
}

/// Sort by line id, dropping later duplicates so ids stay strictly increasing
fn sort_lines(lines: &mut Vec<ResolvedLine>, diagnostics: &mut Diagnostics) {
    lines.sort_by_key(|l| l.line_id);
    let mut last = None;
    lines.retain(|line| {
        if last == Some(line.line_id) {
            diagnostics.push(Warning::DuplicateLineId {
                line_id: line.line_id,
                text: line.text.clone(),
            });
            return false;
        }
        last = Some(line.line_id);
        true
    });
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::commu::{ChoiceEvent, SpeakerRef};
    use pretty_assertions::assert_eq;

    fn speech(line_id: u32, display: &str, actor: &str) -> SpeechEvent {
        let as_ref = |s: &str| {
            if s == "null" {
                SpeakerRef::Null
            } else {
                SpeakerRef::Id(s.to_string())
            }
        };
        SpeechEvent {
            line_id,
            display: as_ref(display),
            actor: as_ref(actor),
            text_id: format!("t_{line_id}"),
            voice_bank: None,
            voice_cue: None,
        }
    }

    fn table(ids: &[u32]) -> StringTable {
        let mut table = StringTable::new();
        table.title = Some("Chapter One".into());
        for id in ids {
            table.entries.insert(format!("t_{id}"), format!("text {id}"));
        }
        table
    }

    fn names() -> NameCache {
        let mut cache = NameCache::new();
        cache.insert("display_character_1", "Haruka");
        cache.insert("display_character_7", "Alice");
        cache
    }

    #[test]
    fn test_merge_orders_resolves_and_inserts() {
        let script = CommuScript {
            title: Some("main_01_op".into()),
            speech: vec![
                speech(1003, "1", "1"),
                speech(1000, "null", "null"),
                speech(1001, "9", "7"),
            ],
            choices: vec![ChoiceEvent {
                text_id: "t_1002".into(),
                line_id: 1002,
                jump_target: None,
            }],
        };
        let mut diag = Diagnostics::new();

        let chapter = merge_chapter(
            "placeholder",
            &script,
            &table(&[1000, 1001, 1002, 1003]),
            &names(),
            MissingTextPolicy::Skip,
            &mut diag,
        )
        .unwrap();

        assert_eq!(chapter.id, "main_01_op");
        assert_eq!(chapter.title.as_deref(), Some("Chapter One"));
        assert_eq!(
            chapter.lines,
            vec![
                ResolvedLine::new(1000, "---", "text 1000"),
                ResolvedLine::new(1001, "Alice", "text 1001"),
                ResolvedLine::new(1002, "[button]", "text 1002"),
                ResolvedLine::new(1003, "Haruka", "text 1003"),
            ]
        );
        assert!(chapter.is_monotonic());
        assert_eq!(diag.len(), 1); // the 9 -> 7 fallback
    }

    #[test]
    fn test_unresolvable_speaker_drops_only_that_line() {
        let script = CommuScript {
            title: None,
            speech: vec![speech(1000, "1", "1"), speech(1001, "40", "41")],
            choices: Vec::new(),
        };
        let mut diag = Diagnostics::new();

        let chapter = merge_chapter(
            "placeholder",
            &script,
            &table(&[1000, 1001]),
            &names(),
            MissingTextPolicy::Skip,
            &mut diag,
        )
        .unwrap();

        assert_eq!(chapter.id, "placeholder");
        assert_eq!(chapter.lines.len(), 1);
        assert_eq!(chapter.lines[0].line_id, 1000);
        assert!(diag.any(|w| matches!(w, Warning::UnresolvedSpeaker { line_id: 1001, .. })));
    }

    #[test]
    fn test_missing_text_policy() {
        let script = CommuScript {
            title: None,
            speech: vec![speech(1000, "1", "1"), speech(1001, "1", "1")],
            choices: Vec::new(),
        };

        let mut diag = Diagnostics::new();
        let chapter = merge_chapter(
            "c",
            &script,
            &table(&[1000]),
            &names(),
            MissingTextPolicy::Skip,
            &mut diag,
        )
        .unwrap();
        assert_eq!(chapter.lines.len(), 1);
        assert!(diag.any(|w| matches!(w, Warning::MissingText { line_id: 1001, .. })));

        let result = merge_chapter(
            "c",
            &script,
            &table(&[1000]),
            &names(),
            MissingTextPolicy::Abort,
            &mut Diagnostics::new(),
        );
        match result {
            Err(Error::Chapter { stage, source, .. }) => {
                assert_eq!(stage, MergeStage::Resolving);
                assert!(matches!(*source, Error::MissingText { line_id: 1001, .. }));
            }
            other => panic!("expected chapter failure, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_line_ids_keep_first() {
        let mut first = speech(1000, "1", "1");
        first.text_id = "t_a".into();
        let mut second = speech(1000, "7", "7");
        second.text_id = "t_b".into();
        let mut tbl = StringTable::new();
        tbl.entries.insert("t_a".into(), "first".into());
        tbl.entries.insert("t_b".into(), "second".into());
        let script = CommuScript {
            title: None,
            speech: vec![first, second],
            choices: Vec::new(),
        };
        let mut diag = Diagnostics::new();

        let chapter = merge_chapter("c", &script, &tbl, &names(), MissingTextPolicy::Skip, &mut diag).unwrap();

        assert_eq!(chapter.lines, vec![ResolvedLine::new(1000, "Haruka", "first")]);
        assert!(diag.any(|w| matches!(w, Warning::DuplicateLineId { line_id: 1000, .. })));
    }
}
