//! Raw and validated commu event types

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

use super::{ACTOR_TEXT_COMMAND, NULL_REF, SELECT_COMMAND};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};

/// Top-level layout of an event file, as exported
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommuFile {
    pub header: RawHeader,
    #[serde(default)]
    pub datas: RawDatas,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHeader {
    #[serde(default, deserialize_with = "arg_string")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDatas {
    #[serde(rename = "CutRecord", default)]
    pub cut_record: Vec<RawEvent>,
    #[serde(rename = "Scenario", default)]
    pub scenario: Vec<RawEvent>,
}

/// An event record before validation
///
/// Positional arguments are kept as strings; the exporter writes them as
/// strings, numbers or `null` depending on the command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub command: String,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg1: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg2: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg3: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg4: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg5: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg6: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg7: Option<String>,
    #[serde(default, deserialize_with = "arg_string")]
    pub arg8: Option<String>,
}

fn arg_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// A character reference on a spoken line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpeakerRef {
    /// No character attributed (`null` in the export)
    Null,
    /// Numeric or symbolic character id
    Id(String),
}

impl SpeakerRef {
    fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some(NULL_REF) => SpeakerRef::Null,
            Some(s) => SpeakerRef::Id(s.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SpeakerRef::Null)
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            SpeakerRef::Null => None,
            SpeakerRef::Id(id) => Some(id),
        }
    }
}

impl fmt::Display for SpeakerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRef::Null => f.write_str(NULL_REF),
            SpeakerRef::Id(id) => f.write_str(id),
        }
    }
}

/// A spoken line (`actor_text`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechEvent {
    /// Sequential line number (`arg1`), e.g. 1000, 1001, ...
    pub line_id: u32,
    /// Display character shown to the reader (`arg5`)
    pub display: SpeakerRef,
    /// Character actually speaking (`arg4`)
    pub actor: SpeakerRef,
    /// String table identifier of the text (`arg6`)
    pub text_id: String,
    /// Sound bank holding the voice cue (`arg7`)
    pub voice_bank: Option<String>,
    /// Voice cue or sound effect name (`arg8`)
    pub voice_cue: Option<String>,
}

/// A first-level choice button (`select1`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEvent {
    /// String table identifier of the button text (`arg1`)
    pub text_id: String,
    /// Position key derived from the numeric suffix of `text_id`
    pub line_id: u32,
    /// Label jumped to when selected (`arg2`, e.g. `*2000`)
    pub jump_target: Option<String>,
}

/// A validated narrative event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommuEvent {
    Speech(SpeechEvent),
    Choice(ChoiceEvent),
}

impl CommuEvent {
    /// Validate a raw record into a typed event
    ///
    /// Returns `Ok(None)` for commands that carry no narrative content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEvent`] when a narrative record lacks a
    /// required argument or has a non-numeric id.
    pub fn from_raw(raw: &RawEvent) -> Result<Option<Self>> {
        match raw.command.as_str() {
            ACTOR_TEXT_COMMAND => SpeechEvent::from_raw(raw).map(|e| Some(CommuEvent::Speech(e))),
            SELECT_COMMAND => ChoiceEvent::from_raw(raw).map(|e| Some(CommuEvent::Choice(e))),
            _ => Ok(None),
        }
    }

    pub fn line_id(&self) -> u32 {
        match self {
            CommuEvent::Speech(e) => e.line_id,
            CommuEvent::Choice(e) => e.line_id,
        }
    }

    pub fn text_id(&self) -> &str {
        match self {
            CommuEvent::Speech(e) => &e.text_id,
            CommuEvent::Choice(e) => &e.text_id,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, CommuEvent::Choice(_))
    }
}

fn invalid(raw: &RawEvent, field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidEvent {
        command: raw.command.clone(),
        field,
        reason: reason.into(),
    }
}

fn required<'a>(raw: &'a RawEvent, value: Option<&'a String>, field: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.as_str()),
        _ => Err(invalid(raw, field, "is missing")),
    }
}

impl SpeechEvent {
    fn from_raw(raw: &RawEvent) -> Result<Self> {
        let arg1 = required(raw, raw.arg1.as_ref(), "arg1")?;
        let line_id = arg1
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid(raw, "arg1", format!("is not a line number: {arg1:?}")))?;
        let text_id = required(raw, raw.arg6.as_ref(), "arg6")?.to_string();

        Ok(Self {
            line_id,
            display: SpeakerRef::from_arg(raw.arg5.as_deref()),
            actor: SpeakerRef::from_arg(raw.arg4.as_deref()),
            text_id,
            voice_bank: raw.arg7.clone().filter(|s| s != NULL_REF),
            voice_cue: raw.arg8.clone().filter(|s| s != NULL_REF),
        })
    }
}

impl ChoiceEvent {
    fn from_raw(raw: &RawEvent) -> Result<Self> {
        let text_id = required(raw, raw.arg1.as_ref(), "arg1")?;
        let line_id = Self::derive_line_id(text_id)
            .ok_or_else(|| invalid(raw, "arg1", format!("has no numeric suffix: {text_id:?}")))?;

        Ok(Self {
            text_id: text_id.to_string(),
            line_id,
            jump_target: raw.arg2.clone().filter(|s| !s.is_empty() && s != NULL_REF),
        })
    }

    /// The numeric part after the last `_` of a choice identifier
    pub fn derive_line_id(text_id: &str) -> Option<u32> {
        let (_, suffix) = text_id.rsplit_once('_')?;
        suffix.parse().ok()
    }
}

/// The narrative content of one event file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommuScript {
    /// `header.title`, the chapter's own identifier
    pub title: Option<String>,
    /// Spoken lines in file order
    pub speech: Vec<SpeechEvent>,
    /// First-level choices in file order
    pub choices: Vec<ChoiceEvent>,
}

impl CommuScript {
    /// Validate the narrative records of a raw file
    ///
    /// Only `actor_text` from `CutRecord` and `select1` from `Scenario` are
    /// kept; every other command is ignored. A narrative record that fails
    /// validation is skipped and recorded as [`Warning::InvalidEvent`].
    ///
    /// # Errors
    /// Validation problems never fail the file; any other error is propagated.
    pub fn from_raw(raw: &RawCommuFile, diagnostics: &mut Diagnostics) -> Result<Self> {
        let mut script = CommuScript {
            title: raw.header.title.clone(),
            ..Self::default()
        };

        let records = raw
            .datas
            .cut_record
            .iter()
            .filter(|e| e.command == ACTOR_TEXT_COMMAND)
            .chain(raw.datas.scenario.iter().filter(|e| e.command == SELECT_COMMAND));

        for record in records {
            match CommuEvent::from_raw(record) {
                Ok(Some(CommuEvent::Speech(event))) => script.speech.push(event),
                Ok(Some(CommuEvent::Choice(event))) => script.choices.push(event),
                Ok(None) => {}
                Err(Error::InvalidEvent {
                    command,
                    field,
                    reason,
                }) => diagnostics.push(Warning::InvalidEvent {
                    command,
                    field,
                    reason,
                }),
                Err(other) => return Err(other),
            }
        }

        Ok(script)
    }
}
