//! Commu event list format
//!
//! Event files are JSON documents exported from the game's cutscene
//! scripts. Only two record kinds carry narrative content:
//!
//! - `actor_text` records in `datas.CutRecord` are spoken lines
//! - `select1` records in `datas.Scenario` are first-level choice buttons
//!
//! Records use positional `arg1`..`arg8` fields whose meaning depends on the
//! command; [`CommuEvent`] gives them names and validates them on load.

mod reader;
mod types;

pub use reader::{parse_commu_bytes, parse_commu_str, read_commu};
pub use types::{
    ChoiceEvent, CommuEvent, CommuScript, RawCommuFile, RawDatas, RawEvent, RawHeader, SpeakerRef,
    SpeechEvent,
};

/// Command of a spoken line record
pub const ACTOR_TEXT_COMMAND: &str = "actor_text";

/// Command of a first-level choice record
pub const SELECT_COMMAND: &str = "select1";

/// Literal used by the exporter for "no speaker"
pub const NULL_REF: &str = "null";
