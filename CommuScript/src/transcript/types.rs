//! Transcript output types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the finished transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub line_id: u32,
    pub speaker: String,
    pub text: String,
}

impl ResolvedLine {
    pub fn new(line_id: u32, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            line_id,
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// One transcribed chapter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter identifier; the event file's header title when present
    pub id: String,
    /// Title from the string table's `_title` entry
    pub title: Option<String>,
    /// Lines ordered by strictly increasing `line_id`
    pub lines: Vec<ResolvedLine>,
}

impl Chapter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether `line_id` is strictly increasing over all lines
    pub fn is_monotonic(&self) -> bool {
        self.lines.windows(2).all(|w| w[0].line_id < w[1].line_id)
    }
}

/// The full transcript: chapters in file name order
///
/// Serializes as a bare JSON array of chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptDocument {
    pub chapters: Vec<Chapter>,
}

impl TranscriptDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Total number of lines across all chapters
    pub fn line_count(&self) -> usize {
        self.chapters.iter().map(|c| c.lines.len()).sum()
    }
}

/// Stage of the per-chapter pipeline
///
/// Stages only ever move forward; a failure in any stage drops the chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MergeStage {
    Init,
    ParsingEvents,
    ParsingText,
    Resolving,
    Sorting,
    InsertingChoices,
    Done,
}

impl MergeStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "starting",
            Self::ParsingEvents => "parsing events",
            Self::ParsingText => "parsing text",
            Self::Resolving => "resolving lines",
            Self::Sorting => "sorting lines",
            Self::InsertingChoices => "inserting choices",
            Self::Done => "finishing",
        }
    }
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_as_array() {
        let doc = TranscriptDocument {
            chapters: vec![Chapter {
                id: "main_01".into(),
                title: None,
                lines: vec![ResolvedLine::new(1000, "---", "Morning.")],
            }],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "main_01",
                "title": null,
                "lines": [{ "line_id": 1000, "speaker": "---", "text": "Morning." }]
            }])
        );
    }

    #[test]
    fn test_monotonic_check() {
        let mut chapter = Chapter::new("c");
        chapter.lines = vec![ResolvedLine::new(1, "a", ""), ResolvedLine::new(2, "a", "")];
        assert!(chapter.is_monotonic());
        chapter.lines.push(ResolvedLine::new(2, "a", ""));
        assert!(!chapter.is_monotonic());
    }

    #[test]
    fn test_stages_move_forward() {
        assert!(MergeStage::Init < MergeStage::ParsingEvents);
        assert!(MergeStage::InsertingChoices < MergeStage::Done);
        assert_eq!(MergeStage::ParsingText.to_string(), "parsing text");
    }
}
