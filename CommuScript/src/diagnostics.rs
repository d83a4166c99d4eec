//! Recoverable warnings collected while merging a chapter
//!
//! Every stage of the pipeline takes a `&mut Diagnostics` and records the
//! problems it stepped over instead of logging them directly. The batch layer
//! decides how to report them (see [`Diagnostics::log`]).

use std::fmt;

/// Why a choice event could not be placed between two lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnplaceableReason {
    /// The chapter has no spoken lines to place the choice between
    NoLines,
    /// The derived id is smaller than the first line's id
    BeforeFirst,
    /// The derived id is greater than the last line's id
    AfterLast,
    /// The derived id equals an id already in the transcript
    Collision,
}

impl UnplaceableReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoLines => "chapter has no lines",
            Self::BeforeFirst => "id precedes the first line",
            Self::AfterLast => "id follows the last line",
            Self::Collision => "id collides with an existing line",
        }
    }
}

/// A single recoverable problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A narrative event record failed validation and was skipped
    InvalidEvent {
        command: String,
        field: &'static str,
        reason: String,
    },
    /// A `_null` placeholder entry carrying the "no text" marker was dropped
    NullTextSkipped { id: String },
    /// The same identifier appeared twice in a string table; the later text won
    DuplicateStringId { id: String },
    /// The display character was unknown, the actual speaker was used instead
    SpeakerFallback {
        line_id: u32,
        display: String,
        actor: String,
    },
    /// Neither speaker reference is in the name cache; the line was skipped
    UnresolvedSpeaker {
        line_id: u32,
        display: String,
        actor: String,
    },
    /// Two spoken lines share a line id; the later one in file order was dropped
    DuplicateLineId { line_id: u32, text: String },
    /// The line's text identifier is not in the string table; the line was skipped
    MissingText { line_id: u32, text_id: String },
    /// A choice event could not be placed and was dropped
    UnplaceableChoice {
        text_id: String,
        line_id: u32,
        reason: UnplaceableReason,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidEvent {
                command,
                field,
                reason,
            } => write!(f, "skipping invalid {command} event: {field} {reason}"),
            Warning::NullTextSkipped { id } => write!(f, "skipping {id}, null and textless"),
            Warning::DuplicateStringId { id } => {
                write!(f, "duplicate string id {id}, keeping the later text")
            }
            Warning::SpeakerFallback {
                line_id,
                display,
                actor,
            } => write!(
                f,
                "line {line_id}: could not find \"{display}\" in name cache, fell back to \"{actor}\""
            ),
            Warning::UnresolvedSpeaker {
                line_id,
                display,
                actor,
            } => write!(
                f,
                "line {line_id}: neither \"{display}\" nor \"{actor}\" is in name cache, skipping line"
            ),
            Warning::DuplicateLineId { line_id, text } => {
                write!(f, "line {line_id} appears more than once, dropping {text:?}")
            }
            Warning::MissingText { line_id, text_id } => {
                write!(f, "line {line_id}: text {text_id} not in string table, skipping line")
            }
            Warning::UnplaceableChoice {
                text_id,
                line_id,
                reason,
            } => write!(
                f,
                "found no position for button {text_id} ({line_id}): {}",
                reason.as_str()
            ),
        }
    }
}

/// Ordered collection of warnings for one unit of work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.warnings.iter()
    }

    /// Whether any recorded warning matches the predicate
    pub fn any(&self, predicate: impl Fn(&Warning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }

    /// Emit every warning through `tracing`, tagged with `context`
    pub fn log(&self, context: &str) {
        for warning in &self.warnings {
            tracing::warn!("{context}: {warning}");
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());

        diag.push(Warning::NullTextSkipped { id: "a_null".into() });
        diag.push(Warning::DuplicateStringId { id: "b".into() });

        assert_eq!(diag.len(), 2);
        let ids: Vec<_> = diag
            .iter()
            .map(|w| match w {
                Warning::NullTextSkipped { id } | Warning::DuplicateStringId { id } => id.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(ids, ["a_null", "b"]);
    }

    #[test]
    fn test_display_names_the_identifiers() {
        let warning = Warning::UnplaceableChoice {
            text_id: "sel_999".into(),
            line_id: 999,
            reason: UnplaceableReason::BeforeFirst,
        };
        let text = warning.to_string();
        assert!(text.contains("sel_999"));
        assert!(text.contains("precedes"));
    }

    #[test]
    fn test_invalid_event_display() {
        let warning = Warning::InvalidEvent {
            command: "select1".into(),
            field: "arg1",
            reason: "has no numeric suffix: \"op_sel_x\"".into(),
        };
        assert_eq!(
            warning.to_string(),
            "skipping invalid select1 event: arg1 has no numeric suffix: \"op_sel_x\""
        );
    }
}
